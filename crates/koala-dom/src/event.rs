//! Events dispatched through the tree.
//!
//! [§ 2 Events](https://dom.spec.whatwg.org/#events)
//!
//! Only the two event types a dialog reacts to are modelled. Dispatch runs
//! the listeners of the target first and then those of each ancestor, the
//! bubbling phase of [§ 2.9 Dispatching events](https://dom.spec.whatwg.org/#dispatching-events).

use crate::NodeId;
use std::rc::Rc;
use strum_macros::Display;

/// `keyCode` of the Escape key.
pub const KEY_ESCAPE: u32 = 27;

/// The event types listeners can register for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EventType {
    /// [UI Events § 3.4.3.1 click](https://w3c.github.io/uievents/#event-type-click)
    Click,
    /// [UI Events § 3.7.4.1 keydown](https://w3c.github.io/uievents/#event-type-keydown)
    KeyDown,
}

/// A dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// What happened.
    pub event_type: EventType,
    /// The node the event was dispatched to.
    pub target: NodeId,
    /// Legacy `keyCode` for keyboard events.
    pub key_code: Option<u32>,
}

impl Event {
    /// A click on `target`.
    #[must_use]
    pub const fn click(target: NodeId) -> Self {
        Self {
            event_type: EventType::Click,
            target,
            key_code: None,
        }
    }

    /// A key press on `target`.
    #[must_use]
    pub const fn key_down(target: NodeId, key_code: u32) -> Self {
        Self {
            event_type: EventType::KeyDown,
            target,
            key_code: Some(key_code),
        }
    }

    /// Whether this is a press of the Escape key.
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.event_type == EventType::KeyDown && self.key_code == Some(KEY_ESCAPE)
    }
}

/// [§ 2.7 Interface EventTarget](https://dom.spec.whatwg.org/#interface-eventtarget)
///
/// An event listener callback. Listeners are shared so dispatch can run them
/// after releasing the document borrow.
pub type Listener = Rc<dyn Fn(&Event)>;
