//! Integration tests for the dialog lifecycle, stacking and event handling.

use koala_dialog::{
    ButtonMap, Dialog, DialogError, DialogOptions, DialogState, Environment, Escape, Host,
    StackManager,
};
use koala_dom::{Document, Event, KEY_ESCAPE, NodeId, Viewport, dispatch_event};
use std::cell::Cell;
use std::rc::Rc;

/// Helper: a host on a fresh document with its own stack manager.
fn host_with_viewport(viewport: Viewport) -> Host {
    Host::new(Document::new(viewport).into_handle()).with_stack(Rc::new(StackManager::new()))
}

fn host() -> Host {
    host_with_viewport(Viewport::default())
}

fn style(host: &Host, node: NodeId, property: &str) -> Option<String> {
    host.document
        .borrow()
        .tree()
        .style_property(node, property)
        .map(str::to_string)
}

fn class_of(host: &Host, node: NodeId) -> String {
    host.document.borrow().tree().class_name(node).to_string()
}

fn is_connected(host: &Host, node: NodeId) -> bool {
    host.document.borrow().tree().is_connected(node)
}

fn click(host: &Host, node: NodeId) -> usize {
    dispatch_event(&host.document, &Event::click(node))
}

fn press_escape(host: &Host, node: NodeId) -> usize {
    dispatch_event(&host.document, &Event::key_down(node, KEY_ESCAPE))
}

// ========== construction ==========

#[test]
fn test_construct_builds_tree() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default().with_content("Hi")).unwrap();
    let nodes = dialog.nodes().unwrap();

    let body = host.document.borrow().body().unwrap();
    assert_eq!(
        host.document.borrow().tree().children(body),
        &[nodes.overlay, nodes.wrapper]
    );
    assert_eq!(class_of(&host, nodes.overlay), "dialog-overlay");
    assert_eq!(class_of(&host, nodes.wrapper), "dialog-wrapper");
    assert_eq!(class_of(&host, nodes.container), "dialog");
    assert_eq!(class_of(&host, nodes.body), "dialog-body");
    assert_eq!(class_of(&host, nodes.content), "dialog-content");
    assert_eq!(class_of(&host, nodes.actions), "dialog-actions");
    assert_eq!(nodes.header, None);
    assert_eq!(nodes.frame, None);

    let document = host.document.borrow();
    let tree = document.tree();
    assert_eq!(tree.children(nodes.wrapper), &[nodes.container]);
    assert_eq!(tree.children(nodes.container), &[nodes.body]);
    assert_eq!(tree.children(nodes.body), &[nodes.content, nodes.actions]);
    assert_eq!(tree.inner_markup(nodes.content), "Hi");
    assert_eq!(tree.style_property(nodes.wrapper, "position"), Some("absolute"));
    assert_eq!(tree.style_property(nodes.wrapper, "width"), Some("400px"));
    assert_eq!(tree.style_property(nodes.wrapper, "outline"), Some("none"));
    assert_eq!(dialog.button_labels(), vec!["OK"]);
}

#[test]
fn test_title_creates_header_before_body() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default().with_title("Hello")).unwrap();
    let nodes = dialog.nodes().unwrap();
    let header = nodes.header.unwrap();

    let document = host.document.borrow();
    assert_eq!(document.tree().children(nodes.container), &[header, nodes.body]);
    assert_eq!(document.tree().inner_markup(header), "Hello");
}

#[test]
fn test_open_on_create_false_stays_hidden() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default().with_open_on_create(false)).unwrap();
    let nodes = dialog.nodes().unwrap();

    assert_eq!(dialog.state(), DialogState::Unopened);
    assert_eq!(dialog.z_index(), 0);
    assert_eq!(style(&host, nodes.overlay, "display").as_deref(), Some("none"));
    assert_eq!(style(&host, nodes.wrapper, "display").as_deref(), Some("none"));

    dialog.open().unwrap();
    assert_eq!(dialog.state(), DialogState::Open);
    assert_eq!(style(&host, nodes.overlay, "display").as_deref(), Some("block"));
    assert_eq!(style(&host, nodes.wrapper, "display").as_deref(), Some("block"));
}

#[test]
fn test_construct_without_body_fails() {
    let document = Document::from_tree(koala_dom::DomTree::new(), Viewport::default());
    let host = Host::new(document.into_handle());
    let result = Dialog::new(&host, DialogOptions::default());
    assert!(matches!(result, Err(DialogError::NoBody)));
}

// ========== open: position, focus, stacking ==========

#[test]
fn test_open_positions_wrapper() {
    let host = host_with_viewport(Viewport {
        client_width: 1000,
        scroll_top: 250,
        ..Viewport::default()
    });
    let dialog = Dialog::new(&host, DialogOptions::default()).unwrap();
    let wrapper = dialog.nodes().unwrap().wrapper;

    assert_eq!(style(&host, wrapper, "left").as_deref(), Some("300px"));
    assert_eq!(style(&host, wrapper, "top").as_deref(), Some("370px"));
}

#[test]
fn test_open_uses_current_viewport() {
    let host = host();
    let dialog = Dialog::new(
        &host,
        DialogOptions::default()
            .with_width(301)
            .with_top(10)
            .with_open_on_create(false),
    )
    .unwrap();
    host.document.borrow_mut().set_viewport(Viewport {
        client_width: 800,
        scroll_top: 5,
        ..Viewport::default()
    });

    dialog.open().unwrap();
    let wrapper = dialog.nodes().unwrap().wrapper;
    assert_eq!(style(&host, wrapper, "left").as_deref(), Some("249.5px"));
    assert_eq!(style(&host, wrapper, "top").as_deref(), Some("15px"));
    assert_eq!(style(&host, wrapper, "width").as_deref(), Some("301px"));
}

#[test]
fn test_open_focuses_wrapper_then_target() {
    let host = host();
    let input = {
        let mut document = host.document.borrow_mut();
        let body = document.body().unwrap();
        let tree = document.tree_mut();
        let input = tree.create_element("input");
        tree.set_attribute(input, "id", "name");
        tree.append_child(body, input);
        input
    };

    let dialog = Dialog::new(&host, DialogOptions::default().with_focus("name")).unwrap();
    assert_eq!(host.document.borrow().focused(), Some(input));

    let missing = Dialog::new(&host, DialogOptions::default().with_focus("nope")).unwrap();
    assert_eq!(
        host.document.borrow().focused(),
        Some(missing.nodes().unwrap().wrapper)
    );
    assert_eq!(dialog.state(), DialogState::Open);
}

#[test]
fn test_stacking_latest_open_is_on_top() {
    let host = host();
    let dialogs: Vec<Dialog> = (0..3)
        .map(|_| Dialog::new(&host, DialogOptions::default()).unwrap())
        .collect();

    let indices: Vec<u32> = dialogs.iter().map(Dialog::z_index).collect();
    assert_eq!(indices, vec![3002, 3004, 3006]);

    let first = &dialogs[0];
    let nodes = first.nodes().unwrap();
    assert_eq!(style(&host, nodes.overlay, "z-index").as_deref(), Some("3001"));
    assert_eq!(style(&host, nodes.wrapper, "z-index").as_deref(), Some("3002"));

    // Reopening the bottom dialog raises it above the others.
    first.open().unwrap();
    assert_eq!(first.z_index(), 3008);
    assert!(dialogs.iter().all(|d| d.z_index() <= first.z_index()));
}

#[test]
fn test_reopening_top_dialog_keeps_index() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default().with_destroy_on_close(false)).unwrap();
    let z = dialog.z_index();

    dialog.close();
    dialog.open().unwrap();

    assert_eq!(dialog.z_index(), z);
    assert_eq!(host.stack.current(), z);
}

#[test]
fn test_shared_stack_across_hosts() {
    let stack = Rc::new(StackManager::new());
    let a = host().with_stack(Rc::clone(&stack));
    let b = host().with_stack(Rc::clone(&stack));

    let first = Dialog::new(&a, DialogOptions::default()).unwrap();
    let second = Dialog::new(&b, DialogOptions::default()).unwrap();
    assert!(second.z_index() > first.z_index());
}

#[test]
fn test_stacking_from_zero_base() {
    let host = host().with_stack(Rc::new(StackManager::with_base(0)));
    let a = Dialog::new(&host, DialogOptions::default()).unwrap();
    let b = Dialog::new(&host, DialogOptions::default()).unwrap();

    assert_eq!(a.z_index(), 2);
    assert_eq!(b.z_index(), 4);
    let wrapper = b.nodes().unwrap().wrapper;
    assert_eq!(style(&host, wrapper, "z-index").as_deref(), Some("4"));
}

// ========== close / destroy ==========

#[test]
fn test_close_hides_when_not_destroying() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default().with_destroy_on_close(false)).unwrap();
    let nodes = dialog.nodes().unwrap();

    dialog.close();

    assert_eq!(dialog.state(), DialogState::Hidden);
    assert!(is_connected(&host, nodes.wrapper));
    assert_eq!(style(&host, nodes.overlay, "display").as_deref(), Some("none"));
    assert_eq!(style(&host, nodes.wrapper, "display").as_deref(), Some("none"));

    dialog.open().unwrap();
    assert_eq!(dialog.state(), DialogState::Open);
}

#[test]
fn test_close_destroys_by_default() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default()).unwrap();
    let nodes = dialog.nodes().unwrap();

    dialog.close();

    assert!(dialog.is_destroyed());
    assert_eq!(dialog.nodes(), None);
    assert!(!is_connected(&host, nodes.overlay));
    assert!(!is_connected(&host, nodes.wrapper));
    assert_eq!(host.document.borrow().focused(), None);
}

#[test]
fn test_close_unopened_hides_when_not_destroying() {
    let host = host();
    let dialog = Dialog::new(
        &host,
        DialogOptions::default()
            .with_open_on_create(false)
            .with_destroy_on_close(false),
    )
    .unwrap();
    let nodes = dialog.nodes().unwrap();

    dialog.close();

    assert_eq!(dialog.state(), DialogState::Hidden);
    assert!(is_connected(&host, nodes.wrapper));
    assert_eq!(style(&host, nodes.wrapper, "display").as_deref(), Some("none"));
}

#[test]
fn test_close_unopened_destroys_by_default() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default().with_open_on_create(false)).unwrap();
    let nodes = dialog.nodes().unwrap();

    dialog.close();

    assert_eq!(dialog.state(), DialogState::Destroyed);
    assert!(!is_connected(&host, nodes.overlay));
    assert!(!is_connected(&host, nodes.wrapper));
}

#[test]
fn test_destroy_clears_references_and_listeners() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default().with_destroy_on_close(false)).unwrap();
    let nodes = dialog.nodes().unwrap();
    let ok = dialog.find_button("OK").unwrap();

    dialog.destroy();

    assert_eq!(dialog.nodes(), None);
    assert!(dialog.button_labels().is_empty());
    assert_eq!(host.document.borrow().listener_count(nodes.wrapper), 0);
    assert_eq!(host.document.borrow().listener_count(ok), 0);
    assert_eq!(click(&host, ok), 0);
}

#[test]
fn test_repeated_destroy_and_close_are_no_ops() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default()).unwrap();

    dialog.destroy();
    dialog.destroy();
    dialog.close();

    assert!(dialog.is_destroyed());
    assert!(koala_common::warning::has_warned(
        "Dialog",
        "destroy() called on a destroyed dialog"
    ));
}

#[test]
fn test_operations_after_destroy_report_error() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default()).unwrap();
    dialog.destroy();

    assert!(matches!(dialog.open(), Err(DialogError::Destroyed)));
    assert!(matches!(dialog.set_title("x"), Err(DialogError::Destroyed)));
    assert!(matches!(
        dialog.add_buttons(&ButtonMap::closing(["A"]), false),
        Err(DialogError::Destroyed)
    ));
}

// ========== buttons ==========

#[test]
fn test_add_buttons_append_and_prepend() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default()).unwrap();

    dialog
        .add_buttons(&ButtonMap::new().with("A", |_, _| {}).with("B", |_, _| {}), false)
        .unwrap();
    dialog
        .add_buttons(&ButtonMap::new().with("C", |_, _| {}), true)
        .unwrap();

    assert_eq!(dialog.button_labels(), vec!["C", "OK", "A", "B"]);
}

#[test]
fn test_add_buttons_prepend_into_empty_panel() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default().with_buttons(ButtonMap::new())).unwrap();
    assert!(dialog.button_labels().is_empty());

    dialog
        .add_buttons(&ButtonMap::closing(["X", "Y"]), true)
        .unwrap();
    dialog
        .add_buttons(&ButtonMap::closing(["V", "W"]), true)
        .unwrap();

    assert_eq!(dialog.button_labels(), vec!["V", "W", "X", "Y"]);
}

#[test]
fn test_button_click_runs_handler_with_dialog() {
    let host = host();
    let clicks = Rc::new(Cell::new(0));
    let seen = Rc::clone(&clicks);
    let buttons = ButtonMap::new().with("Count", move |dialog: &Dialog, _: &Event| {
        seen.set(seen.get() + 1);
        assert_eq!(dialog.state(), DialogState::Open);
    });
    let dialog = Dialog::new(&host, DialogOptions::default().with_buttons(buttons)).unwrap();

    let button = dialog.find_button("Count").unwrap();
    assert_eq!(click(&host, button), 1);
    assert_eq!(click(&host, button), 1);
    assert_eq!(clicks.get(), 2);
    assert_eq!(dialog.state(), DialogState::Open);
}

#[test]
fn test_default_ok_button_closes() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default()).unwrap();
    let ok = dialog.find_button("OK").unwrap();

    assert_eq!(click(&host, ok), 1);
    assert!(dialog.is_destroyed());
}

#[test]
fn test_unheld_dialog_closes_on_ok() {
    let host = host();
    let (nodes, ok) = {
        let dialog = Dialog::new(&host, DialogOptions::default()).unwrap();
        (dialog.nodes().unwrap(), dialog.find_button("OK").unwrap())
    };

    assert_eq!(click(&host, ok), 1);
    assert!(!is_connected(&host, nodes.wrapper));
    assert!(!is_connected(&host, nodes.overlay));
    assert_eq!(host.document.borrow().listener_count(ok), 0);
}

#[test]
fn test_unheld_dialog_closes_on_escape() {
    let host = host();
    let nodes = Dialog::new(&host, DialogOptions::default())
        .unwrap()
        .nodes()
        .unwrap();

    assert_eq!(press_escape(&host, nodes.wrapper), 1);
    assert!(!is_connected(&host, nodes.wrapper));
    assert_eq!(host.document.borrow().listener_count(nodes.wrapper), 0);
}

// ========== titles ==========

#[test]
fn test_set_title_creates_single_header() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default()).unwrap();

    dialog.set_title("Hello").unwrap();
    let nodes = dialog.nodes().unwrap();
    let header = nodes.header.unwrap();
    {
        let document = host.document.borrow();
        assert_eq!(document.tree().children(nodes.container), &[header, nodes.body]);
        assert_eq!(document.tree().inner_markup(header), "Hello");
    }

    dialog.set_title("World").unwrap();
    assert_eq!(dialog.nodes().unwrap().header, Some(header));
    let document = host.document.borrow();
    assert_eq!(document.tree().children(nodes.container).len(), 2);
    assert_eq!(document.tree().inner_markup(header), "World");
    assert_eq!(class_of(&host, header), "dialog-header");
}

// ========== escape ==========

#[test]
fn test_escape_closes_by_default() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default()).unwrap();
    let wrapper = dialog.nodes().unwrap().wrapper;

    assert_eq!(
        host.document.borrow().tree().attribute(wrapper, "tabindex"),
        Some("-1")
    );
    assert_eq!(press_escape(&host, wrapper), 1);
    assert!(dialog.is_destroyed());
}

#[test]
fn test_escape_bubbles_from_focused_input() {
    let host = host();
    let dialog = Dialog::new(
        &host,
        DialogOptions::default()
            .with_content("<input>")
            .with_destroy_on_close(false),
    )
    .unwrap();
    let content = dialog.nodes().unwrap().content;
    let input = {
        let mut document = host.document.borrow_mut();
        let tree = document.tree_mut();
        let input = tree.create_element("input");
        tree.append_child(content, input);
        input
    };

    assert_eq!(press_escape(&host, input), 1);
    assert_eq!(dialog.state(), DialogState::Hidden);
}

#[test]
fn test_other_keys_do_nothing() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default()).unwrap();
    let wrapper = dialog.nodes().unwrap().wrapper;

    let _ = dispatch_event(&host.document, &Event::key_down(wrapper, 13));
    assert_eq!(dialog.state(), DialogState::Open);
}

#[test]
fn test_escape_ignored_when_disabled() {
    let host = host();
    let dialog = Dialog::new(&host, DialogOptions::default().with_escape(Escape::Ignore)).unwrap();
    let wrapper = dialog.nodes().unwrap().wrapper;

    assert_eq!(host.document.borrow().tree().attribute(wrapper, "tabindex"), None);
    assert_eq!(press_escape(&host, wrapper), 0);
    assert_eq!(dialog.state(), DialogState::Open);
}

#[test]
fn test_custom_escape_handler_receives_dialog() {
    let host = host();
    let pressed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&pressed);
    let dialog = Dialog::new(
        &host,
        DialogOptions::default().on_escape(move |dialog: &Dialog, event: &Event| {
            assert!(event.is_escape());
            flag.set(true);
            dialog.set_title("Escaped").unwrap();
        }),
    )
    .unwrap();
    let nodes = dialog.nodes().unwrap();

    assert_eq!(press_escape(&host, nodes.wrapper), 1);
    assert!(pressed.get());
    assert_eq!(dialog.state(), DialogState::Open);
    assert!(dialog.nodes().unwrap().header.is_some());
}

// ========== legacy overlay fix ==========

#[test]
fn test_overlay_fix_for_legacy_environment() {
    let host = host_with_viewport(Viewport {
        scroll_width: 1200,
        scroll_height: 3000,
        ..Viewport::default()
    })
    .with_environment(Environment::detect(
        "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1)",
        false,
    ));
    let dialog = Dialog::new(&host, DialogOptions::default()).unwrap();
    let nodes = dialog.nodes().unwrap();
    let frame = nodes.frame.unwrap();

    assert_eq!(style(&host, nodes.overlay, "position").as_deref(), Some("absolute"));
    assert_eq!(style(&host, nodes.overlay, "width").as_deref(), Some("1200px"));
    assert_eq!(style(&host, nodes.overlay, "height").as_deref(), Some("3000px"));
    assert_eq!(class_of(&host, frame), "iefix");
    assert_eq!(style(&host, frame, "height").as_deref(), Some("3000px"));
    assert_eq!(
        host.document.borrow().tree().children(nodes.wrapper),
        &[nodes.container, frame]
    );
}
