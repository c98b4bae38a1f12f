//! Document interface implementation.
//!
//! [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
//!
//! A [`Document`] owns the [`DomTree`] plus the window state a widget reads
//! from its host: viewport metrics, the focused element and registered event
//! listeners. Widgets share it through a [`DocumentHandle`].

use crate::event::{Event, EventType, Listener};
use crate::{DomTree, NodeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared, single-threaded access to a document.
pub type DocumentHandle = Rc<RefCell<Document>>;

/// Window and scrolling metrics of the host.
///
/// [CSSOM View § 6](https://drafts.csswg.org/cssom-view/#extensions-to-the-element-interface)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// `document.body.clientWidth`
    pub client_width: u32,
    /// Vertical scroll offset of the page.
    pub scroll_top: u32,
    /// `document.documentElement.scrollWidth`
    pub scroll_width: u32,
    /// `document.documentElement.scrollHeight`
    pub scroll_height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            client_width: 1024,
            scroll_top: 0,
            scroll_width: 1024,
            scroll_height: 768,
        }
    }
}

/// A document with its tree, viewport, focus and listeners.
pub struct Document {
    tree: DomTree,
    viewport: Viewport,
    focused: Option<NodeId>,
    listeners: HashMap<NodeId, Vec<(EventType, Listener)>>,
}

impl Document {
    /// Create an empty HTML document: `<html><head></head><body></body></html>`.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");
        tree.append_child(NodeId::ROOT, html);
        tree.append_child(html, head);
        tree.append_child(html, body);
        Self::from_tree(tree, viewport)
    }

    /// Wrap an existing tree.
    #[must_use]
    pub fn from_tree(tree: DomTree, viewport: Viewport) -> Self {
        Self {
            tree,
            viewport,
            focused: None,
            listeners: HashMap::new(),
        }
    }

    /// Move the document into a shared handle.
    #[must_use]
    pub fn into_handle(self) -> DocumentHandle {
        Rc::new(RefCell::new(self))
    }

    /// The document tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Mutable access to the document tree.
    pub const fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// The body element, if the document has one.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.tree.body()
    }

    /// Current viewport metrics.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update viewport metrics, e.g. after a resize or scroll.
    pub const fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// [HTML § 6.6.4 `focus()`](https://html.spec.whatwg.org/multipage/interaction.html#dom-focus)
    ///
    /// Only connected elements can take focus; anything else is ignored.
    pub fn focus(&mut self, id: NodeId) {
        if self.tree.as_element(id).is_some() && self.tree.is_connected(id) {
            self.focused = Some(id);
        }
    }

    /// The focused element. Focus is dropped once that element leaves the
    /// document.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|&id| self.tree.is_connected(id))
    }

    /// [§ 2.7 `addEventListener()`](https://dom.spec.whatwg.org/#dom-eventtarget-addeventlistener)
    pub fn add_event_listener(&mut self, target: NodeId, event_type: EventType, listener: Listener) {
        self.listeners
            .entry(target)
            .or_default()
            .push((event_type, listener));
    }

    /// Drop every listener registered on `target`.
    pub fn remove_event_listeners(&mut self, target: NodeId) {
        let _removed = self.listeners.remove(&target);
    }

    /// Number of listeners registered on `target`.
    #[must_use]
    pub fn listener_count(&self, target: NodeId) -> usize {
        self.listeners.get(&target).map_or(0, Vec::len)
    }

    /// Listeners for `event` along its propagation path, target first.
    fn propagation_listeners(&self, event: &Event) -> Vec<Listener> {
        std::iter::once(event.target)
            .chain(self.tree.ancestors(event.target))
            .filter_map(|node| self.listeners.get(&node))
            .flatten()
            .filter(|(event_type, _)| *event_type == event.event_type)
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

/// [§ 2.9 Dispatching events](https://dom.spec.whatwg.org/#dispatching-events)
///
/// Runs the listeners on the event's propagation path and returns how many
/// ran. The path is computed up front and the document is not borrowed while
/// listeners execute, so a listener may freely mutate the document (including
/// removing the target).
#[must_use = "the count tells whether anything handled the event"]
pub fn dispatch_event(document: &DocumentHandle, event: &Event) -> usize {
    let listeners = document.borrow().propagation_listeners(event);
    for listener in &listeners {
        listener(event);
    }
    listeners.len()
}
