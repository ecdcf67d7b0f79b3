//! Tree Node Item Component
//!
//! One row of the flattened tree: connector lines, depth badge (doubles as
//! the expand toggle), editable label and the add/delete actions.

use leptos::prelude::*;

use crate::components::InlineEditInput;
use crate::context::{use_dialogs, TreeData};
use crate::models::FlattenedTreeNode;

/// Horizontal indent per depth level
pub const INDENT_PX: usize = 60;
/// Offset of a connector line inside its indent column
const CONNECTOR_OFFSET_PX: usize = 19;

const DEPTH_BADGES: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// Badge letter for a depth; anything past the last letter reuses it
pub fn depth_badge(depth: usize) -> char {
    DEPTH_BADGES[depth.min(DEPTH_BADGES.len() - 1)]
}

/// One connector segment, positioned by indent column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// Full-height line; `terminal` stops it at the row's middle
    Vertical { depth: usize, terminal: bool },
    /// Short horizontal line from the parent's vertical to the badge
    Elbow { depth: usize },
}

impl Connector {
    fn class(&self) -> &'static str {
        match self {
            Connector::Vertical { terminal: false, .. } => "connector-vert",
            Connector::Vertical { terminal: true, .. } => "connector-vert-terminal",
            Connector::Elbow { .. } => "connector-horiz",
        }
    }

    fn style(&self) -> String {
        match *self {
            Connector::Vertical { depth, .. } => format!("left: {}px;", depth * INDENT_PX + CONNECTOR_OFFSET_PX),
            Connector::Elbow { depth } => format!(
                "left: {}px; width: {}px;",
                depth * INDENT_PX + CONNECTOR_OFFSET_PX,
                INDENT_PX - CONNECTOR_OFFSET_PX - 3
            ),
        }
    }
}

/// Connector lines for a row. Roots get none.
pub fn connector_segments(node: &FlattenedTreeNode) -> Vec<Connector> {
    if node.depth == 0 {
        return Vec::new();
    }
    let parent_depth = node.depth - 1;
    let mut segments: Vec<Connector> = (0..parent_depth)
        .filter(|&d| !node.ancestor_is_last.get(d + 1).copied().unwrap_or(true))
        .map(|depth| Connector::Vertical { depth, terminal: false })
        .collect();
    segments.push(Connector::Vertical { depth: parent_depth, terminal: node.is_last_child });
    segments.push(Connector::Elbow { depth: parent_depth });
    segments
}

/// Confirmation text for deleting a node
pub fn delete_message(node: &FlattenedTreeNode) -> String {
    if node.children_count > 0 {
        format!(
            "Are you sure you want to delete \"{}\" and its {} child node(s)?",
            node.label, node.children_count
        )
    } else {
        format!("Are you sure you want to delete \"{}\"?", node.label)
    }
}

fn badge_class(node: &FlattenedTreeNode) -> String {
    if node.is_loading {
        "depth-badge loading".to_string()
    } else {
        format!("depth-badge d{}", node.depth.min(4))
    }
}

/// A single node row in the tree
#[component]
pub fn TreeNodeItem(node: FlattenedTreeNode) -> impl IntoView {
    let tree = expect_context::<TreeData>();
    let dialogs = use_dialogs();

    let id = node.id.clone();
    let expandable = node.has_children || node.children_count > 0;
    let toggle_title = match (expandable, node.is_expanded) {
        (true, true) => "Collapse".to_string(),
        (true, false) => "Expand".to_string(),
        (false, _) => node.label.clone(),
    };

    let connectors = connector_segments(&node)
        .into_iter()
        .map(|segment| view! { <div class=segment.class() style=segment.style() /> })
        .collect_view();

    let on_toggle = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            tree.toggle_expand(&id);
        }
    };

    let on_save = {
        let id = id.clone();
        Callback::new(move |label: String| tree.update_node_label(&id, &label))
    };

    let on_add_child = {
        let id = id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            let parent = id.clone();
            dialogs.request_text("Enter node name:", move |input| tree.add_node(Some(parent.clone()), input));
        }
    };

    let on_delete = {
        let id = id.clone();
        let message = delete_message(&node);
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            let id = id.clone();
            dialogs.request_confirm("Delete Node", message.clone(), move || tree.delete_node(&id));
        }
    };

    view! {
        <div class="tree-row" style=format!("padding-left: {}px;", node.depth * INDENT_PX)>
            {connectors}

            <button
                class=badge_class(&node)
                title=toggle_title
                aria-expanded=node.is_expanded.to_string()
                on:click=on_toggle
            >
                {if node.is_loading {
                    view! { <span class="spinner" /> }.into_any()
                } else {
                    depth_badge(node.depth).to_string().into_any()
                }}
            </button>

            <div class="node-card">
                <InlineEditInput value=node.label.clone() on_save=on_save class="node-label" />
                {(node.children_count > 0).then(|| view! {
                    <span class="children-count">{node.children_count}</span>
                })}
                <button class="add-child-btn" title="Add child" on:click=on_add_child>"+"</button>
                <button class="delete-btn" title="Delete" on:click=on_delete>"×"</button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TreeNode;
    use crate::tree::flatten_tree;

    fn row<'a>(rows: &'a [FlattenedTreeNode], label: &str) -> &'a FlattenedTreeNode {
        rows.iter().find(|r| r.label == label).unwrap()
    }

    fn sample() -> Vec<FlattenedTreeNode> {
        // a
        // ├─ b
        // │  └─ d
        // │     └─ f
        // └─ c
        //    └─ e
        let f = TreeNode::leaf("f", "f");
        let d = TreeNode::branch("d", "d", vec![f]).expanded();
        let b = TreeNode::branch("b", "b", vec![d]).expanded();
        let e = TreeNode::leaf("e", "e");
        let c = TreeNode::branch("c", "c", vec![e]).expanded();
        flatten_tree(&[TreeNode::branch("a", "a", vec![b, c]).expanded()])
    }

    #[test]
    fn test_badges_saturate() {
        assert_eq!(depth_badge(0), 'A');
        assert_eq!(depth_badge(7), 'H');
        assert_eq!(depth_badge(12), 'H');
    }

    #[test]
    fn test_root_has_no_connectors() {
        let rows = sample();
        assert!(connector_segments(row(&rows, "a")).is_empty());
    }

    #[test]
    fn test_first_level_connectors() {
        let rows = sample();
        assert_eq!(
            connector_segments(row(&rows, "b")),
            vec![Connector::Vertical { depth: 0, terminal: false }, Connector::Elbow { depth: 0 }]
        );
        assert_eq!(
            connector_segments(row(&rows, "c")),
            vec![Connector::Vertical { depth: 0, terminal: true }, Connector::Elbow { depth: 0 }]
        );
    }

    #[test]
    fn test_ancestor_lines_continue_past_open_siblings() {
        let rows = sample();
        // b is not last, so its column keeps running beside d and f
        assert_eq!(
            connector_segments(row(&rows, "f")),
            vec![
                Connector::Vertical { depth: 0, terminal: false },
                Connector::Vertical { depth: 2, terminal: true },
                Connector::Elbow { depth: 2 },
            ]
        );
        // c is last, so nothing runs beside e at depth 0
        assert_eq!(
            connector_segments(row(&rows, "e")),
            vec![Connector::Vertical { depth: 1, terminal: true }, Connector::Elbow { depth: 1 }]
        );
    }

    #[test]
    fn test_delete_message_mentions_descendants() {
        let rows = sample();
        assert_eq!(
            delete_message(row(&rows, "b")),
            "Are you sure you want to delete \"b\" and its 2 child node(s)?"
        );
        assert_eq!(delete_message(row(&rows, "f")), "Are you sure you want to delete \"f\"?");
    }
}
