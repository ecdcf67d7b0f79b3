//! Tree Utilities
//!
//! Pure functions over the recursive `TreeNode` structure. Mutating helpers
//! take the roots by value and hand back the new roots, so unchanged subtrees
//! are moved rather than copied. Nothing here holds state.
//!
//! Cycle protection is NOT enforced here: callers must make sure the drop
//! target of a move is outside the moved subtree (see `TreeState::handle_move`).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::id::generate_id;
use crate::models::{DropPosition, FlattenedTreeNode, NodePatch, TreeNode};

/// Names handed out by the simulated backend
const LAZY_CHILDREN_POOL: [&str; 12] = [
    "Documents",
    "Pictures",
    "Videos",
    "Music",
    "Archive",
    "Backup",
    "Logs",
    "Config",
    "Templates",
    "Scripts",
    "Data",
    "Reports",
];

const LAZY_CHILDREN_MIN: usize = 2;
const LAZY_CHILDREN_MAX: usize = 4;

/// A located node together with the sibling sequence that holds it
#[derive(Debug, Clone, Copy)]
pub struct NodeMatch<'a> {
    pub node: &'a TreeNode,
    pub siblings: &'a [TreeNode],
    pub index: usize,
}

/// Pre-order DFS lookup
pub fn find_node_by_id<'a>(nodes: &'a [TreeNode], id: &str) -> Option<NodeMatch<'a>> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id == id {
            return Some(NodeMatch { node, siblings: nodes, index });
        }
        if let Some(found) = find_node_by_id(&node.children, id) {
            return Some(found);
        }
    }
    None
}

fn find_node_mut<'a>(nodes: &'a mut [TreeNode], id: &str) -> Option<&'a mut TreeNode> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

/// True if `node_id` sits somewhere below `ancestor_id`
pub fn is_descendant(roots: &[TreeNode], node_id: &str, ancestor_id: &str) -> bool {
    find_node_by_id(roots, ancestor_id)
        .is_some_and(|ancestor| find_node_by_id(&ancestor.node.children, node_id).is_some())
}

/// Append `node` as a new root (`parent_id == None`) or as the last child of
/// `parent_id`, expanding that parent. Unknown parent leaves the tree as is.
pub fn insert_node(mut roots: Vec<TreeNode>, parent_id: Option<&str>, node: TreeNode) -> Vec<TreeNode> {
    match parent_id {
        None => roots.push(node),
        Some(parent_id) => {
            if let Some(parent) = find_node_mut(&mut roots, parent_id) {
                parent.children.push(node);
                parent.is_expanded = true;
                parent.has_children = true;
            }
        }
    }
    roots
}

/// Remove `id` together with its subtree
pub fn remove_node(roots: Vec<TreeNode>, id: &str) -> Vec<TreeNode> {
    let mut removed = None;
    detach(roots, id, &mut removed)
}

fn detach(nodes: Vec<TreeNode>, id: &str, removed: &mut Option<TreeNode>) -> Vec<TreeNode> {
    let mut kept = Vec::with_capacity(nodes.len());
    for mut node in nodes {
        if node.id == id {
            if removed.is_none() {
                *removed = Some(node);
            }
            continue;
        }
        let children = std::mem::take(&mut node.children);
        node.children = detach(children, id, removed);
        // Once marked expandable a node keeps the affordance
        node.has_children = !node.children.is_empty() || node.has_children;
        kept.push(node);
    }
    kept
}

/// Overwrite the patched fields of exactly one node
pub fn update_node(mut roots: Vec<TreeNode>, id: &str, patch: &NodePatch) -> Vec<TreeNode> {
    if let Some(node) = find_node_mut(&mut roots, id) {
        patch.apply(node);
    }
    roots
}

/// Relocate the subtree rooted at `active_id` relative to `over_id`.
///
/// `Inside` appends it as the last child of `over_id`; `Before`/`After` make
/// it an immediate sibling of `over_id` at whatever depth `over_id` lives.
/// Returns the input unchanged when `active_id` is unknown or when `over_id`
/// would not exist any more once the active subtree is detached.
pub fn move_node(roots: Vec<TreeNode>, active_id: &str, over_id: &str, position: DropPosition) -> Vec<TreeNode> {
    let Some(active) = find_node_by_id(&roots, active_id) else {
        return roots;
    };
    let target_survives = find_node_by_id(&roots, over_id).is_some()
        && find_node_by_id(std::slice::from_ref(active.node), over_id).is_none();
    if !target_survives {
        return roots;
    }

    let mut detached = None;
    let roots = detach(roots, active_id, &mut detached);
    let Some(node) = detached else {
        return roots;
    };

    match position {
        DropPosition::Inside => insert_node(roots, Some(over_id), node),
        DropPosition::Before | DropPosition::After => {
            let mut roots = roots;
            // Target presence was checked above, so the node always lands
            let _ = place_beside(&mut roots, over_id, node, position == DropPosition::After);
            roots
        }
    }
}

fn place_beside(nodes: &mut Vec<TreeNode>, target_id: &str, node: TreeNode, after: bool) -> Result<(), TreeNode> {
    if let Some(index) = nodes.iter().position(|n| n.id == target_id) {
        let at = if after { index + 1 } else { index };
        nodes.insert(at, node);
        return Ok(());
    }
    let mut node = node;
    for sibling in nodes.iter_mut() {
        match place_beside(&mut sibling.children, target_id, node, after) {
            Ok(()) => return Ok(()),
            Err(back) => node = back,
        }
    }
    Err(node)
}

/// Count of ALL descendants, not just direct children
pub fn count_descendants(node: &TreeNode) -> usize {
    node.children.iter().map(|child| 1 + count_descendants(child)).sum()
}

/// Flatten the whole tree into display order
pub fn flatten_tree(roots: &[TreeNode]) -> Vec<FlattenedTreeNode> {
    flatten_nodes(roots, None, 0, &[])
}

/// Pre-order flatten of `nodes` as if they hung under `parent_id` at `depth`.
/// Only expanded nodes with materialized children are descended into.
pub fn flatten_nodes(
    nodes: &[TreeNode],
    parent_id: Option<&str>,
    depth: usize,
    ancestor_is_last: &[bool],
) -> Vec<FlattenedTreeNode> {
    fn collect(
        nodes: &[TreeNode],
        parent_id: Option<&str>,
        depth: usize,
        ancestor_is_last: &mut Vec<bool>,
        result: &mut Vec<FlattenedTreeNode>,
    ) {
        let last = nodes.len().saturating_sub(1);
        for (index, node) in nodes.iter().enumerate() {
            let is_last_child = index == last;
            result.push(FlattenedTreeNode {
                id: node.id.clone(),
                label: node.label.clone(),
                depth,
                parent_id: parent_id.map(str::to_string),
                index,
                is_expanded: node.is_expanded,
                is_loading: node.is_loading,
                has_children: node.has_children,
                children_count: count_descendants(node),
                is_last_child,
                ancestor_is_last: ancestor_is_last.clone(),
            });

            if node.is_expanded && !node.children.is_empty() {
                ancestor_is_last.push(is_last_child);
                collect(&node.children, Some(&node.id), depth + 1, ancestor_is_last, result);
                ancestor_is_last.pop();
            }
        }
    }

    let mut result = Vec::new();
    collect(nodes, parent_id, depth, &mut ancestor_is_last.to_vec(), &mut result);
    result
}

/// Simulated backend fetch: 2 to 4 fresh children named after the parent,
/// each independently flagged as possibly expandable.
pub fn generate_lazy_children<R: Rng + ?Sized>(parent_label: &str, rng: &mut R) -> Vec<TreeNode> {
    let count = rng.random_range(LAZY_CHILDREN_MIN..=LAZY_CHILDREN_MAX);
    let mut names = LAZY_CHILDREN_POOL.to_vec();
    names.shuffle(rng);
    names
        .into_iter()
        .take(count)
        .map(|name| TreeNode {
            has_children: rng.random_bool(0.5),
            ..TreeNode::leaf(generate_id(), format!("{parent_label}/{name}"))
        })
        .collect()
}
