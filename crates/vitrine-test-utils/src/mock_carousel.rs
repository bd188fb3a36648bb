//! Mock carousel that records mount calls.

use std::sync::Arc;

use parking_lot::Mutex;
use vitrine_dom::{ElementId, Page, PageError};
use vitrine_effects::{Carousel, CarouselOptions};

/// One recorded [`Carousel::mount`] call.
#[derive(Debug, Clone)]
pub struct MountCall {
    pub container: ElementId,
    pub options: CarouselOptions,
}

/// A [`Carousel`] that records how it was mounted.
///
/// Clones share the same recording, so a test can keep one handle and box
/// the other into the slider.
///
/// # Example
///
/// ```rust
/// use vitrine_test_utils::RecordingCarousel;
///
/// let carousel = RecordingCarousel::new();
/// let boxed: Box<dyn vitrine_effects::Carousel> = Box::new(carousel.clone());
/// assert_eq!(carousel.mount_count(), 0);
/// # drop(boxed);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingCarousel {
    calls: Arc<Mutex<Vec<MountCall>>>,
    fail: bool,
}

impl RecordingCarousel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A carousel whose every mount fails with a script error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<MountCall> {
        self.calls.lock().clone()
    }

    pub fn mount_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_options(&self) -> Option<CarouselOptions> {
        self.calls.lock().last().map(|call| call.options.clone())
    }
}

impl Carousel for RecordingCarousel {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn mount(
        &mut self,
        page: &mut dyn Page,
        container: ElementId,
        options: &CarouselOptions,
    ) -> Result<(), PageError> {
        self.calls.lock().push(MountCall {
            container,
            options: options.clone(),
        });
        if self.fail {
            return Err(PageError::Script {
                message: "owlCarousel is not a function".to_owned(),
            });
        }
        page.add_class(container, "owl-loaded");
        Ok(())
    }
}
