//! Shared scaffolding for effect unit tests.

use std::time::Duration;

use vitrine_core::Config;
use vitrine_dom::MemoryPage;

use crate::animation::Animator;
use crate::effect::{Effect, EffectContext};
use crate::timer::Timers;

pub(crate) struct Harness {
    pub page: MemoryPage,
    pub config: Config,
    pub timers: Timers,
    pub animator: Animator,
}

impl Harness {
    pub fn new(page: MemoryPage) -> Self {
        Self {
            page,
            config: Config::default(),
            timers: Timers::new(),
            animator: Animator::new(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn cx(&mut self) -> EffectContext<'_> {
        EffectContext {
            page: &mut self.page,
            config: &self.config,
            timers: &mut self.timers,
            animator: &mut self.animator,
        }
    }

    /// Fire due timers one at a time, then apply animation frames, the way
    /// the site host does.
    pub fn advance(&mut self, effect: &mut dyn Effect, delta: Duration) {
        let deadline = self.timers.deadline(delta);
        while let Some((id, task)) = self.timers.pop_due(deadline) {
            effect.on_timer(&mut self.cx(), id, task);
        }
        self.timers.settle(deadline);
        for frame in self.animator.advance(delta) {
            crate::animation::apply_frame(&mut self.page, &frame);
            effect.on_frame(&mut self.cx(), &frame);
        }
    }
}
