use vitrine_core::Config;
use vitrine_dom::{EventStatus, Page, PageEvent};

use crate::animation::{Animator, Frame};
use crate::timer::{TimerId, TimerTask, Timers};

/// Everything an effect may touch while handling a callback.
pub struct EffectContext<'a> {
    pub page: &'a mut dyn Page,
    pub config: &'a Config,
    pub timers: &'a mut Timers,
    pub animator: &'a mut Animator,
}

/// A self-contained UI behavior bound to the page.
///
/// The host calls [`init`](Effect::init) once when the page structure is
/// ready, then forwards events, fired timers and animation frames. Effects
/// only see timers and frames they are interested in by checking the task or
/// track; anything else is ignored.
pub trait Effect {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Look up element handles and bind behavior. Must be a no-op when the
    /// markup the effect relies on is absent.
    fn init(&mut self, cx: &mut EffectContext<'_>);

    fn handle_event(&mut self, _cx: &mut EffectContext<'_>, _event: &PageEvent) -> EventStatus {
        EventStatus::ignored()
    }

    fn on_timer(&mut self, _cx: &mut EffectContext<'_>, _timer: TimerId, _task: TimerTask) {}

    fn on_frame(&mut self, _cx: &mut EffectContext<'_>, _frame: &Frame) {}
}
