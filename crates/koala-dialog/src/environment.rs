//! Host capability detection.
//!
//! Old Internet Explorer (before version 7) let windowed controls such as
//! `<select>` paint through any positioned overlay. The workaround is to size
//! the overlay to the whole document and put a transparent `<iframe>` behind
//! the dialog. Whether a host needs it is decided once, when the
//! [`Environment`] is built, and dialogs only ask the resulting flag.

/// What the dialog needs to know about its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    user_agent: String,
    overlay_fix: bool,
}

impl Environment {
    /// Build from the host's `navigator.userAgent` and whether it exposes a
    /// native `XMLHttpRequest` (absent before IE 7).
    #[must_use]
    pub fn detect(user_agent: &str, native_xml_http_request: bool) -> Self {
        let lower = user_agent.to_ascii_lowercase();
        let overlay_fix =
            lower.contains("msie") && !lower.contains("opera") && !native_xml_http_request;
        Self {
            user_agent: user_agent.to_string(),
            overlay_fix,
        }
    }

    /// A standards-compliant host with no workarounds.
    #[must_use]
    pub const fn modern() -> Self {
        Self {
            user_agent: String::new(),
            overlay_fix: false,
        }
    }

    /// The identification string this environment was built from.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Whether dialogs must apply the full-document overlay and `<iframe>` shim.
    #[must_use]
    pub const fn needs_overlay_fix(&self) -> bool {
        self.overlay_fix
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::modern()
    }
}
