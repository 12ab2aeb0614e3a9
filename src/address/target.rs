//! Navigation targets for the reader route

use url::form_urlencoded;
use url::Url;

use super::AddressError;

/// Path handled by the hosting application's router
pub const READ_PATH: &str = "/read";

/// Parse typed text as an absolute URL.
///
/// Uses WHATWG parsing rules, so the result matches what the browser's own
/// `new URL(text)` would accept and how it would canonicalize: lowercased
/// scheme and host, default ports dropped, percent-encoding normalized.
/// Scheme-less text ("example.com") is malformed.
pub fn parse_address(text: &str) -> Result<Url, AddressError> {
    Ok(Url::parse(text)?)
}

/// Build the reader target `/read?url=<canonical>` for a parsed URL.
///
/// The query value is the canonical serialization of the URL, never the raw
/// typed text, percent-encoded as a query parameter.
pub fn read_target(url: &Url) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("url", url.as_str())
        .finish();
    format!("{READ_PATH}?{query}")
}

/// A full-page navigation request produced by the address bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    href: String,
}

impl Navigation {
    /// Navigation to the reader route carrying the canonical URL
    pub fn to_reader(url: &Url) -> Self {
        Self {
            href: read_target(url),
        }
    }

    /// The address to hand to `location.href`
    pub fn href(&self) -> &str {
        &self.href
    }
}

impl std::fmt::Display for Navigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.href)
    }
}
