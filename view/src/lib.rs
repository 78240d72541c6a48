//! Terminal views of node trees and flattened marker sequences.

use canopy_tree::{Boundary, Node, Value};
use termtree::Tree;

/// Render a node tree for terminal display, one labelled line per
/// node.
pub fn tree_view(node: &Node) -> Tree<String> {
    let mut tree = Tree::new(label(node));
    for child in node.children() {
        tree.push(tree_view(child));
    }
    tree
}

/// Render a flattened sequence as an indented event log: `start`
/// entries open a block, `end` entries close one. A stray `end` never
/// underflows the indentation, mirroring how rebuilding tolerates it.
pub fn sequence_view(entries: &[Node]) -> Vec<String> {
    let mut lines = Vec::with_capacity(entries.len());
    let mut depth = 0usize;
    for entry in entries {
        match entry.boundary() {
            Some(Boundary::Start) => {
                lines.push(line(depth, Some(Boundary::Start), entry));
                depth += 1;
            }
            Some(Boundary::End) => {
                depth = depth.saturating_sub(1);
                lines.push(line(depth, Some(Boundary::End), entry));
            }
            boundary => lines.push(line(depth, boundary, entry)),
        }
    }
    lines
}

fn line(depth: usize, boundary: Option<Boundary>, node: &Node) -> String {
    let indent = "  ".repeat(depth);
    match boundary {
        Some(marker) => format!("{indent}{marker} {}", label(node)),
        None => format!("{indent}{}", label(node)),
    }
}

fn label(node: &Node) -> String {
    let mut label = node.node_type().to_string();
    for (key, value) in node.attributes().iter() {
        label.push(' ');
        label.push_str(key);
        label.push('=');
        label.push_str(&summary(value));
    }
    label
}

fn summary(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Boolean(boolean) => boolean.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(string) => format!("{string:?}"),
        Value::List(list) => format!("[{} items]", list.len()),
        Value::Object(object) => format!("{{{} entries}}", object.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Node {
        Node::new().with_attribute("value", value)
    }

    #[test]
    fn tree_view_single_node() {
        let rendered = tree_view(&text("foo")).to_string();
        assert_eq!(rendered.lines().collect::<Vec<_>>(), ["text value=\"foo\""]);
    }

    #[test]
    fn tree_view_nested() {
        let mut parent = Node::with_type("parent");
        let mut child = text("foo");
        child.add(text("asdf"));
        parent.add(child);
        parent.add(text("bar"));

        let rendered = tree_view(&parent).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            [
                "parent",
                "├── text value=\"foo\"",
                "│   └── text value=\"asdf\"",
                "└── text value=\"bar\"",
            ]
        );
    }

    #[test]
    fn labels_summarize_attributes() {
        let node = Node::with_type("component")
            .with_attribute("name", "A")
            .with_attribute("index", 5)
            .with_attribute("hidden", true);
        assert_eq!(label(&node), "component name=\"A\" index=5 hidden=true");
    }

    #[test]
    fn sequence_view_indents_scopes() {
        let mut parent = Node::with_type("parent");
        parent.add(text("foo"));
        parent.add(Node::with_type("component"));

        let lines = sequence_view(&parent.to_array());
        assert_eq!(
            lines,
            [
                "start parent",
                "  text value=\"foo\"",
                "  startend component",
                "end parent",
            ]
        );
    }

    #[test]
    fn sequence_view_tolerates_stray_end() {
        let entries = vec![
            text("asdf"),
            Node::with_type("parent").with_boundary(Boundary::End),
            text("foo"),
        ];

        let lines = sequence_view(&entries);
        assert_eq!(
            lines,
            ["text value=\"asdf\"", "end parent", "text value=\"foo\""]
        );
    }
}
