//! Error types for page backends.

use std::fmt;

/// Errors raised by a page backend.
///
/// Effects never surface these: a missing element is a silent no-op. They
/// only come out of backend construction and external collaborators such as
/// a carousel.
#[derive(Debug, Clone, PartialEq)]
pub enum PageError {
    /// No global `window` object is available.
    NoWindow,

    /// The window has no document.
    NoDocument,

    /// A CSS selector could not be parsed.
    InvalidSelector {
        /// The offending selector.
        selector: String,
        /// What the parser tripped over.
        reason: String,
    },

    /// A capability the caller relies on is missing at runtime.
    MissingCapability {
        /// Name of the capability, e.g. `jQuery.fn.owlCarousel`.
        name: &'static str,
    },

    /// A script call threw.
    Script {
        /// Stringified exception.
        message: String,
    },
}

impl PageError {
    pub(crate) fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        PageError::InvalidSelector {
            selector: selector.to_owned(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::NoWindow => write!(f, "No window object available"),
            PageError::NoDocument => write!(f, "Window has no document"),
            PageError::InvalidSelector { selector, reason } => {
                write!(f, "Invalid selector '{}': {}", selector, reason)
            }
            PageError::MissingCapability { name } => {
                write!(f, "Missing capability: {}", name)
            }
            PageError::Script { message } => write!(f, "Script error: {}", message),
        }
    }
}

impl std::error::Error for PageError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = PageError::invalid_selector("a[", "unterminated attribute");
        assert_eq!(
            err.to_string(),
            "Invalid selector 'a[': unterminated attribute"
        );
        assert_eq!(
            PageError::MissingCapability { name: "IntersectionObserver" }.to_string(),
            "Missing capability: IntersectionObserver"
        );
    }
}
