//! The modal dialog.
//!
//! A dialog owns two top-level nodes appended to `<body>`:
//!
//! ```text
//! div.dialog-overlay
//! div.dialog-wrapper
//!   div.dialog
//!     div.dialog-header        (only with a title)
//!     div.dialog-body
//!       div.dialog-content
//!       div.dialog-actions
//!         button.dialog-button ...
//!   iframe.iefix               (only with the legacy overlay fix)
//! ```
//!
//! The nodes are built once, at construction, and stay hidden until
//! [`Dialog::open`]. Closing either hides them again or removes them for good,
//! depending on [`DialogOptions::destroy_on_close`].

use crate::DialogError;
use crate::host::Host;
use crate::options::{ButtonMap, DialogOptions, Escape, Handler};
use koala_common::warning::warn_once;
use koala_dom::{Document, Event, EventType, Listener, NodeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use strum_macros::Display;

/// Where a dialog is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DialogState {
    /// Built and hidden, never opened.
    Unopened,
    /// Visible.
    Open,
    /// Closed without being destroyed; can be opened again.
    Hidden,
    /// Nodes removed. Terminal.
    Destroyed,
}

/// References to the nodes a live dialog owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogNodes {
    /// Full-page backdrop.
    pub overlay: NodeId,
    /// Positioned element holding the chrome; receives focus and key events.
    pub wrapper: NodeId,
    /// `div.dialog`
    pub container: NodeId,
    /// `div.dialog-header`, created on demand.
    pub header: Option<NodeId>,
    /// `div.dialog-body`
    pub body: NodeId,
    /// `div.dialog-content`
    pub content: NodeId,
    /// `div.dialog-actions`
    pub actions: NodeId,
    /// Legacy `<iframe>` shim.
    pub frame: Option<NodeId>,
}

struct Inner {
    host: Host,
    options: DialogOptions,
    nodes: Option<DialogNodes>,
    /// `None` until first stacked.
    z_index: Option<u32>,
    state: DialogState,
}

/// A modal dialog.
///
/// `Dialog` is a handle: clones refer to the same dialog. The listeners on
/// its nodes hold a handle too, so a dialog nobody else keeps still closes on
/// its buttons and Escape. [`Dialog::destroy`] removes those listeners, which
/// releases the dialog.
#[derive(Clone)]
pub struct Dialog {
    inner: Rc<RefCell<Inner>>,
}

impl Dialog {
    /// Build the dialog's nodes in `host`'s document and open it if
    /// [`DialogOptions::open_on_create`] is set.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::NoBody`] if the document has no `<body>`.
    pub fn new(host: &Host, options: DialogOptions) -> Result<Self, DialogError> {
        let open_on_create = options.open_on_create;
        let dialog = Self {
            inner: Rc::new(RefCell::new(Inner {
                host: host.clone(),
                options,
                nodes: None,
                z_index: None,
                state: DialogState::Unopened,
            })),
        };
        dialog.make_nodes()?;
        if open_on_create {
            dialog.open()?;
        }
        Ok(dialog)
    }

    /// Show the dialog above every other dialog, centered horizontally and
    /// `top` pixels below the current scroll position, and move focus into it.
    ///
    /// Focus goes to the wrapper, then to the element named by
    /// [`DialogOptions::focus`] if the document has one.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::Destroyed`] once the dialog has been destroyed.
    pub fn open(&self) -> Result<(), DialogError> {
        let mut inner = self.inner.borrow_mut();
        let nodes = inner.nodes.ok_or(DialogError::Destroyed)?;
        let host = inner.host.clone();
        let mut document = host.document.borrow_mut();
        let tree = document.tree_mut();

        // Only restack when never stacked or another dialog has been raised since.
        let stack = &host.stack;
        if inner.z_index.is_none_or(|z| z < stack.current()) {
            let overlay_z = stack.allocate();
            tree.set_style_property(nodes.overlay, "z-index", &overlay_z.to_string());
            let wrapper_z = stack.allocate();
            tree.set_style_property(nodes.wrapper, "z-index", &wrapper_z.to_string());
            inner.z_index = Some(wrapper_z);
        }

        let viewport = document.viewport();
        let left = (f64::from(viewport.client_width) - f64::from(inner.options.width)) / 2.0;
        let top = i64::from(viewport.scroll_top) + i64::from(inner.options.top);

        let tree = document.tree_mut();
        tree.set_style_property(nodes.wrapper, "left", &format!("{left}px"));
        tree.set_style_property(nodes.wrapper, "top", &format!("{top}px"));
        tree.set_style_property(nodes.overlay, "display", "block");
        tree.set_style_property(nodes.wrapper, "display", "block");

        document.focus(nodes.wrapper);
        if let Some(target) = inner
            .options
            .focus
            .as_deref()
            .and_then(|id| document.tree().element_by_id(id))
        {
            document.focus(target);
        }

        inner.state = DialogState::Open;
        Ok(())
    }

    /// Close the dialog: destroy it, or hide it when
    /// [`DialogOptions::destroy_on_close`] is off.
    ///
    /// Closing a destroyed dialog does nothing.
    pub fn close(&self) {
        let (state, destroy) = {
            let inner = self.inner.borrow();
            (inner.state, inner.options.destroy_on_close)
        };
        if state == DialogState::Destroyed {
            warn_once("Dialog", "close() called on a destroyed dialog");
            return;
        }
        if destroy {
            self.destroy();
            return;
        }

        let mut inner = self.inner.borrow_mut();
        if let Some(nodes) = inner.nodes {
            let mut document = inner.host.document.borrow_mut();
            let tree = document.tree_mut();
            tree.set_style_property(nodes.overlay, "display", "none");
            tree.set_style_property(nodes.wrapper, "display", "none");
        }
        inner.state = DialogState::Hidden;
    }

    /// Remove the dialog's nodes and listeners from the document and forget
    /// every node reference.
    ///
    /// Destroying twice does nothing the second time.
    pub fn destroy(&self) {
        let mut inner = self.inner.borrow_mut();
        let Some(nodes) = inner.nodes.take() else {
            warn_once("Dialog", "destroy() called on a destroyed dialog");
            return;
        };
        inner.state = DialogState::Destroyed;

        let mut document = inner.host.document.borrow_mut();
        for root in [nodes.wrapper, nodes.overlay] {
            let mut owned = document.tree().descendants(root);
            owned.push(root);
            for node in owned {
                document.remove_event_listeners(node);
            }
            document.tree_mut().detach(root);
        }
    }

    /// Add buttons to the actions panel, after the existing ones or, with
    /// `prepend`, before them. New buttons keep the map's order either way.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::Destroyed`] once the dialog has been destroyed.
    pub fn add_buttons(&self, buttons: &ButtonMap, prepend: bool) -> Result<(), DialogError> {
        let inner = self.inner.borrow();
        let nodes = inner.nodes.ok_or(DialogError::Destroyed)?;
        let mut document = inner.host.document.borrow_mut();

        let made = self.make_buttons(&mut document, buttons);
        let tree = document.tree_mut();
        match tree.first_child(nodes.actions) {
            Some(first) if prepend => {
                for button in made {
                    tree.insert_before(nodes.actions, button, first)?;
                }
            }
            _ => {
                for button in made {
                    tree.append_child(nodes.actions, button);
                }
            }
        }
        Ok(())
    }

    /// Set the header markup, creating the header in front of the body if
    /// the dialog has none yet.
    ///
    /// # Errors
    ///
    /// Returns [`DialogError::Destroyed`] once the dialog has been destroyed.
    pub fn set_title(&self, title: &str) -> Result<(), DialogError> {
        let mut inner = self.inner.borrow_mut();
        let mut nodes = inner.nodes.ok_or(DialogError::Destroyed)?;
        let host = inner.host.clone();
        let mut document = host.document.borrow_mut();
        let tree = document.tree_mut();

        let header = match nodes.header {
            Some(header) => header,
            None => {
                let header = tree.create_element("div");
                tree.set_class_name(header, "dialog-header");
                tree.insert_before(nodes.container, header, nodes.body)?;
                nodes.header = Some(header);
                inner.nodes = Some(nodes);
                header
            }
        };
        tree.set_inner_markup(header, title);
        inner.options.title = Some(title.to_string());
        Ok(())
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> DialogState {
        self.inner.borrow().state
    }

    /// Whether [`Dialog::destroy`] has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.state() == DialogState::Destroyed
    }

    /// The wrapper's `z-index`, 0 until first opened.
    #[must_use]
    pub fn z_index(&self) -> u32 {
        self.inner.borrow().z_index.unwrap_or(0)
    }

    /// The nodes this dialog owns, `None` once destroyed.
    #[must_use]
    pub fn nodes(&self) -> Option<DialogNodes> {
        self.inner.borrow().nodes
    }

    /// The host this dialog was built against.
    #[must_use]
    pub fn host(&self) -> Host {
        self.inner.borrow().host.clone()
    }

    /// Button labels in panel order.
    #[must_use]
    pub fn button_labels(&self) -> Vec<String> {
        self.buttons().into_iter().map(|(label, _)| label).collect()
    }

    /// The first button labelled `label`.
    #[must_use]
    pub fn find_button(&self, label: &str) -> Option<NodeId> {
        self.buttons()
            .into_iter()
            .find(|(l, _)| l == label)
            .map(|(_, id)| id)
    }

    fn buttons(&self) -> Vec<(String, NodeId)> {
        let inner = self.inner.borrow();
        let Some(nodes) = inner.nodes else {
            return Vec::new();
        };
        let document = inner.host.document.borrow();
        let tree = document.tree();
        tree.children(nodes.actions)
            .iter()
            .map(|&id| (tree.inner_markup(id), id))
            .collect()
    }

    fn make_nodes(&self) -> Result<(), DialogError> {
        let mut inner = self.inner.borrow_mut();
        if inner.nodes.is_some() {
            return Ok(());
        }
        let host = inner.host.clone();
        let mut document = host.document.borrow_mut();
        let page = document.body().ok_or(DialogError::NoBody)?;
        let options = &inner.options;

        let tree = document.tree_mut();
        let overlay = tree.create_element("div");
        tree.set_class_name(overlay, "dialog-overlay");
        tree.set_style_property(overlay, "display", "none");
        tree.append_child(page, overlay);

        let header = options.header_title().map(|title| {
            let header = tree.create_element("div");
            tree.set_class_name(header, "dialog-header");
            tree.set_inner_markup(header, title);
            header
        });

        let content = tree.create_element("div");
        tree.set_class_name(content, "dialog-content");
        tree.set_inner_markup(content, &options.content);

        let actions = tree.create_element("div");
        tree.set_class_name(actions, "dialog-actions");
        for button in self.make_buttons(&mut document, &options.buttons) {
            document.tree_mut().append_child(actions, button);
        }

        let tree = document.tree_mut();
        let body = tree.create_element("div");
        tree.set_class_name(body, "dialog-body");
        tree.append_child(body, content);
        tree.append_child(body, actions);

        let container = tree.create_element("div");
        tree.set_class_name(container, "dialog");
        if let Some(header) = header {
            tree.append_child(container, header);
        }
        tree.append_child(container, body);

        let wrapper = tree.create_element("div");
        tree.set_class_name(wrapper, "dialog-wrapper");
        tree.set_style_property(wrapper, "position", "absolute");
        tree.set_style_property(wrapper, "width", &format!("{}px", options.width));
        tree.set_style_property(wrapper, "display", "none");
        tree.set_style_property(wrapper, "outline", "none");
        tree.append_child(wrapper, container);

        if !matches!(options.escape, Escape::Ignore) {
            tree.set_attribute(wrapper, "tabindex", "-1");
            let dialog = self.clone();
            document.add_event_listener(
                wrapper,
                EventType::KeyDown,
                Rc::new(move |event: &Event| {
                    if event.is_escape() {
                        dialog.handle_escape(event);
                    }
                }),
            );
        }
        document.tree_mut().append_child(page, wrapper);

        let frame = host
            .environment
            .needs_overlay_fix()
            .then(|| apply_overlay_fix(&mut document, overlay, wrapper));

        inner.nodes = Some(DialogNodes {
            overlay,
            wrapper,
            container,
            header,
            body,
            content,
            actions,
            frame,
        });
        Ok(())
    }

    /// One detached `button.dialog-button` per entry, each bound to this dialog.
    fn make_buttons(&self, document: &mut Document, buttons: &ButtonMap) -> Vec<NodeId> {
        buttons
            .iter()
            .map(|(label, handler)| {
                let tree = document.tree_mut();
                let button = tree.create_element("button");
                tree.set_class_name(button, "dialog-button");
                tree.set_inner_markup(button, label);
                document.add_event_listener(
                    button,
                    EventType::Click,
                    bind(self.clone(), Rc::clone(handler)),
                );
                button
            })
            .collect()
    }

    fn handle_escape(&self, event: &Event) {
        let escape = self.inner.borrow().options.escape.clone();
        match escape {
            Escape::Close => self.close(),
            Escape::Handler(handler) => handler(self, event),
            Escape::Ignore => {}
        }
    }
}

impl fmt::Debug for Dialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Dialog")
            .field("state", &inner.state)
            .field("z_index", &inner.z_index)
            .field("nodes", &inner.nodes)
            .field("options", &inner.options)
            .finish()
    }
}

/// A listener that runs `handler` with `dialog` as receiver.
fn bind(dialog: Dialog, handler: Handler) -> Listener {
    Rc::new(move |event: &Event| handler(&dialog, event))
}

/// Stretch the overlay over the whole document and put a same-sized
/// `iframe.iefix` in the wrapper. Returns the frame.
fn apply_overlay_fix(document: &mut Document, overlay: NodeId, wrapper: NodeId) -> NodeId {
    let viewport = document.viewport();
    let width = format!("{}px", viewport.scroll_width);
    let height = format!("{}px", viewport.scroll_height);

    let tree = document.tree_mut();
    tree.set_style_property(overlay, "position", "absolute");
    tree.set_style_property(overlay, "width", &width);
    tree.set_style_property(overlay, "height", &height);

    let frame = tree.create_element("iframe");
    tree.set_class_name(frame, "iefix");
    tree.set_style_property(frame, "width", &width);
    tree.set_style_property(frame, "height", &height);
    tree.append_child(wrapper, frame);
    frame
}
