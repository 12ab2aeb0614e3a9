//! URL address bar: validation state and navigation targets
//!
//! One Enter press is one synchronous check. Parse failure is a value, not an
//! exception, so the submit path stays unit-testable without a live DOM.

mod target;

pub use target::{parse_address, read_target, Navigation, READ_PATH};

use std::fmt;

use crate::input::KeyEvent;

/// Marker class toggled on the input element while its text is malformed
pub const INVALID_CLASS: &str = "invalid";

/// The one failure mode of the address bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The typed text is not a well-formed absolute URL
    #[error("malformed URL: {0}")]
    Malformed(#[from] url::ParseError),
}

/// Visual validity of the address field.
///
/// Mirrors the presence of [`INVALID_CLASS`] on the element: `Invalid` after
/// a failed parse, `Valid` after any successful parse. The field starts
/// `Valid` as rendered by the page markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Valid,
    Invalid,
}

impl Validity {
    pub fn is_invalid(&self) -> bool {
        *self == Validity::Invalid
    }
}

/// Severity of a user-facing validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Inline message the host page can render under the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

/// The address bar state machine
#[derive(Debug, Default)]
pub struct AddressBar {
    validity: Validity,
}

impl AddressBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current visual validity of the field
    pub fn validity(&self) -> Validity {
        self.validity
    }

    /// Validation message to show while the field is invalid
    pub fn notice(&self) -> Option<Notice> {
        match self.validity {
            Validity::Invalid => Some(Notice {
                message: "Error: The URL you entered is invalid.".to_string(),
                severity: Severity::Error,
            }),
            Validity::Valid => None,
        }
    }

    /// Submit the field's current text.
    ///
    /// On success the validity resets to `Valid` and the reader navigation is
    /// returned; on failure the validity flips to `Invalid`. The error is
    /// recovered locally by the caller toggling the marker class, nothing is
    /// logged or surfaced as text here.
    pub fn submit(&mut self, text: &str) -> Result<Navigation, AddressError> {
        match parse_address(text) {
            Ok(url) => {
                self.validity = Validity::Valid;
                Ok(Navigation::to_reader(&url))
            }
            Err(err) => {
                self.validity = Validity::Invalid;
                Err(err)
            }
        }
    }

    /// Handle one key-down event against the field's current text.
    ///
    /// Only Enter triggers a submit; every other key leaves the state
    /// untouched and yields no navigation.
    pub fn handle_key(&mut self, event: &KeyEvent, text: &str) -> Option<Navigation> {
        if !event.is_enter() {
            return None;
        }
        self.submit(text).ok()
    }
}
