//! JSON dialog configuration.
//!
//! The serializable subset of [`DialogOptions`]: everything except custom
//! handlers. Keys use the camelCase names pages already use in markup
//! attributes and script, e.g.
//!
//! ```json
//! { "title": "Delete?", "content": "This cannot be undone.",
//!   "buttons": ["Cancel", "Delete"], "destroyOnClose": false }
//! ```
//!
//! `escHandler` is absent or `true` to close on Escape, `null` or `false`
//! to ignore Escape. Every configured button closes the dialog.

use crate::DialogError;
use crate::options::{ButtonMap, DialogOptions, Escape};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A dialog described in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DialogConfig {
    /// Wrapper width in pixels.
    pub width: u32,
    /// Offset below the scroll position in pixels.
    pub top: i32,
    /// Open on construction.
    pub open_on_create: bool,
    /// Destroy rather than hide on close.
    pub destroy_on_close: bool,
    /// `Some(true)` closes on Escape; anything else ignores it.
    pub esc_handler: Option<bool>,
    /// Header markup.
    pub title: Option<String>,
    /// Body markup.
    pub content: String,
    /// Id of the element to focus after opening.
    pub focus: Option<String>,
    /// Button labels, in order.
    pub buttons: Vec<String>,
    /// Unrecognized keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        let options = DialogOptions::default();
        Self {
            width: options.width,
            top: options.top,
            open_on_create: options.open_on_create,
            destroy_on_close: options.destroy_on_close,
            esc_handler: Some(true),
            title: None,
            content: String::new(),
            focus: None,
            buttons: options
                .buttons
                .labels()
                .into_iter()
                .map(str::to_string)
                .collect(),
            extra: Map::new(),
        }
    }
}

impl DialogConfig {
    /// Parse a single dialog object.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::Config`] on malformed JSON or mistyped values.
    pub fn from_json(json: &str) -> Result<Self, DialogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse either one dialog object or an array of them.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::Config`] on malformed JSON or mistyped values.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, DialogError> {
        // Look at the shape first so field errors keep their own message.
        Ok(match serde_json::from_str::<Value>(json)? {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<Self>, _>>()?,
            value => vec![serde_json::from_value(value)?],
        })
    }

    /// Convert into constructor options.
    #[must_use]
    pub fn into_options(self) -> DialogOptions {
        DialogOptions {
            width: self.width,
            top: self.top,
            open_on_create: self.open_on_create,
            destroy_on_close: self.destroy_on_close,
            escape: if self.esc_handler == Some(true) {
                Escape::Close
            } else {
                Escape::Ignore
            },
            buttons: ButtonMap::closing(&self.buttons),
            title: self.title,
            content: self.content,
            focus: self.focus,
            extra: self.extra,
        }
    }
}
