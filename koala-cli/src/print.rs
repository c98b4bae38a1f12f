//! Tree printing.

use koala_dom::{DomTree, NodeId, NodeType};
use owo_colors::OwoColorize;

/// One-line description of a node: `<tag class=".." style="..">`, a quoted
/// text node, a comment or `Document`.
#[must_use]
pub fn describe(tree: &DomTree, id: NodeId) -> String {
    let Some(node) = tree.get(id) else {
        return String::from("<missing>");
    };
    match &node.node_type {
        NodeType::Document => String::from("Document"),
        NodeType::Element(data) => {
            let mut attrs: Vec<String> = data
                .attrs
                .iter()
                .map(|(k, v)| {
                    if v.is_empty() {
                        k.clone()
                    } else {
                        format!("{k}=\"{v}\"")
                    }
                })
                .collect();
            attrs.sort();
            if !data.style.is_empty() {
                attrs.push(format!("style=\"{}\"", data.style.css_text()));
            }
            if attrs.is_empty() {
                format!("<{}>", data.tag_name)
            } else {
                format!("<{} {}>", data.tag_name, attrs.join(" "))
            }
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n");
            format!("\"{display}\"")
        }
        NodeType::Comment(data) => format!("<!-- {data} -->"),
    }
}

/// Print `id` and its subtree, two spaces per level.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    let line = describe(tree, id);
    if tree.as_text(id).is_some() {
        println!("{prefix}{}", line.green());
    } else if tree.as_element(id).is_some() {
        println!("{prefix}{}", line.cyan());
    } else {
        println!("{prefix}{line}");
    }
    for &child in tree.children(id) {
        print_tree(tree, child, indent + 1);
    }
}
