use bitflags::bitflags;

use crate::element::ElementId;

/// Events a host delivers to the behavior layer.
///
/// Scroll and resize carry no payload: effects read the current position and
/// viewport from the page when they handle them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// The page structure is ready (`DOMContentLoaded`).
    Ready,
    /// Every subordinate resource, images included, finished loading.
    Load,
    /// The window scrolled.
    Scroll,
    /// The viewport was resized.
    Resize,
    /// An element was clicked. `target` is the innermost element hit.
    Click { target: ElementId },
    /// A form is being submitted.
    Submit { form: ElementId },
    /// The pointer entered an element.
    MouseEnter { target: ElementId },
    /// The pointer left an element.
    MouseLeave { target: ElementId },
    /// The carousel moved to a new slide.
    SlideChanged { slide: ElementId },
}

bitflags! {
    /// Outcome of dispatching a [`PageEvent`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EventStatus: u8 {
        const HANDLED = 0b00000001;
        const DEFAULT_PREVENTED = 0b00000010;
    }
}

impl EventStatus {
    pub const fn is_handled(&self) -> bool {
        self.contains(Self::HANDLED)
    }

    /// The host must suppress the browser's default action (navigation, submission).
    pub const fn is_default_prevented(&self) -> bool {
        self.contains(Self::DEFAULT_PREVENTED)
    }

    pub const fn handled() -> Self {
        Self::HANDLED
    }

    pub const fn prevent_default() -> Self {
        Self::from_bits_truncate(Self::HANDLED.bits() | Self::DEFAULT_PREVENTED.bits())
    }

    pub const fn ignored() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_combines() {
        let mut status = EventStatus::ignored();
        assert!(!status.is_handled());
        status |= EventStatus::handled();
        assert!(status.is_handled() && !status.is_default_prevented());
        status |= EventStatus::prevent_default();
        assert!(status.is_default_prevented());
    }
}
