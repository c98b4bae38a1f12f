//! Dialog configuration.

use crate::dialog::Dialog;
use koala_dom::Event;
use serde_json::{Map, Value};
use std::fmt;
use std::rc::Rc;

/// A callback run with the dialog it belongs to and the triggering event.
pub type Handler = Rc<dyn Fn(&Dialog, &Event)>;

/// Wrap a closure as a [`Handler`].
#[must_use]
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Dialog, &Event) + 'static,
{
    Rc::new(f)
}

/// A handler that closes its dialog.
#[must_use]
pub fn close_handler() -> Handler {
    handler(|dialog, _| dialog.close())
}

/// What the Escape key does while focus is inside the dialog.
#[derive(Clone, Default)]
pub enum Escape {
    /// Close the dialog.
    #[default]
    Close,
    /// Run a custom handler.
    Handler(Handler),
    /// Escape does nothing and no key listener is installed.
    Ignore,
}

impl fmt::Debug for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Close => f.write_str("Close"),
            Self::Handler(_) => f.write_str("Handler(..)"),
            Self::Ignore => f.write_str("Ignore"),
        }
    }
}

/// Button labels mapped to click handlers, kept in insertion order.
///
/// Inserting a label that is already present replaces its handler without
/// moving it.
#[derive(Clone, Default)]
pub struct ButtonMap {
    entries: Vec<(String, Handler)>,
}

impl ButtonMap {
    /// An empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Buttons that each close the dialog.
    #[must_use]
    pub fn closing<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for label in labels {
            map.insert_handler(label.as_ref(), close_handler());
        }
        map
    }

    /// Add or replace the button `label`.
    pub fn insert<F>(&mut self, label: &str, f: F)
    where
        F: Fn(&Dialog, &Event) + 'static,
    {
        self.insert_handler(label, handler(f));
    }

    /// Add or replace the button `label` with a prepared handler.
    pub fn insert_handler(&mut self, label: &str, handler: Handler) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, existing)) => *existing = handler,
            None => self.entries.push((label.to_string(), handler)),
        }
    }

    /// Builder form of [`ButtonMap::insert`].
    #[must_use]
    pub fn with<F>(mut self, label: &str, f: F) -> Self
    where
        F: Fn(&Dialog, &Event) + 'static,
    {
        self.insert(label, f);
        self
    }

    /// Iterate buttons in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Handler)> {
        self.entries.iter().map(|(l, h)| (l.as_str(), h))
    }

    /// Labels in order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(l, _)| l.as_str()).collect()
    }

    /// Number of buttons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no buttons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ButtonMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.labels()).finish()
    }
}

/// Options a dialog is constructed with.
///
/// Start from [`DialogOptions::default`] and override what you need; the
/// defaults are a 400px wide dialog, 120px below the scroll position, opened
/// immediately, destroyed on close, closed by Escape, with a single "OK"
/// button that closes it.
#[derive(Debug, Clone)]
pub struct DialogOptions {
    /// Wrapper width in pixels.
    pub width: u32,
    /// Distance in pixels from the top of the visible page.
    pub top: i32,
    /// Open as soon as the dialog is constructed.
    pub open_on_create: bool,
    /// Remove the nodes on close instead of hiding them.
    pub destroy_on_close: bool,
    /// Escape key behavior.
    pub escape: Escape,
    /// Initial buttons of the actions panel.
    pub buttons: ButtonMap,
    /// Header markup; `None` or empty means no header.
    pub title: Option<String>,
    /// Body markup.
    pub content: String,
    /// Id of an element to focus after opening.
    pub focus: Option<String>,
    /// Keys this version doesn't recognize. Kept, never read.
    pub extra: Map<String, Value>,
}

impl Default for DialogOptions {
    fn default() -> Self {
        Self {
            width: 400,
            top: 120,
            open_on_create: true,
            destroy_on_close: true,
            escape: Escape::Close,
            buttons: ButtonMap::closing(["OK"]),
            title: None,
            content: String::new(),
            focus: None,
            extra: Map::new(),
        }
    }
}

impl DialogOptions {
    /// Set the wrapper width.
    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the top offset.
    #[must_use]
    pub fn with_top(mut self, top: i32) -> Self {
        self.top = top;
        self
    }

    /// Choose whether construction opens the dialog.
    #[must_use]
    pub fn with_open_on_create(mut self, open: bool) -> Self {
        self.open_on_create = open;
        self
    }

    /// Choose between destroying and hiding on close.
    #[must_use]
    pub fn with_destroy_on_close(mut self, destroy: bool) -> Self {
        self.destroy_on_close = destroy;
        self
    }

    /// Set the Escape key behavior.
    #[must_use]
    pub fn with_escape(mut self, escape: Escape) -> Self {
        self.escape = escape;
        self
    }

    /// Run `f` when Escape is pressed.
    #[must_use]
    pub fn on_escape<F>(self, f: F) -> Self
    where
        F: Fn(&Dialog, &Event) + 'static,
    {
        self.with_escape(Escape::Handler(handler(f)))
    }

    /// Replace the initial buttons.
    #[must_use]
    pub fn with_buttons(mut self, buttons: ButtonMap) -> Self {
        self.buttons = buttons;
        self
    }

    /// Set the header markup.
    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the body markup.
    #[must_use]
    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    /// Focus the element with this id after opening.
    #[must_use]
    pub fn with_focus(mut self, element_id: &str) -> Self {
        self.focus = Some(element_id.to_string());
        self
    }

    /// Store an option this version does not understand.
    #[must_use]
    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        let _previous = self.extra.insert(key.to_string(), value);
        self
    }

    /// The title if it would produce a header.
    pub(crate) fn header_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}
