use serde::{Deserialize, Serialize};
use url::Url;

/// Another way of getting in touch, listed next to the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactChannel {
    /// e.g. `Email` or `GitHub`
    pub label: String,
    /// Text shown to the visitor, e.g. the address or handle.
    pub value: String,
    pub href: Url,
}

impl ContactChannel {
    /// Whether the link leaves the page, i.e. is not a `mailto:` or `tel:`
    /// link.
    pub fn is_external(&self) -> bool {
        matches!(self.href.scheme(), "http" | "https")
    }
}
