//! Tree State
//!
//! Canonical tree plus the command logic behind the tree view. Every
//! command runs to completion synchronously; the lazy-load delay is driven
//! by the reactive wrapper in `context.rs`, which calls back into
//! `complete_load` once the timer fires.

use reactive_stores::Store;
use tracing::debug;

use crate::id::generate_id;
use crate::models::{DropPosition, FlattenedTreeNode, NodePatch, TreeNode};
use crate::tree::{find_node_by_id, flatten_tree, insert_node, move_node, remove_node, update_node};

#[derive(Clone, Debug, PartialEq, Store)]
pub struct TreeState {
    pub roots: Vec<TreeNode>,
}

/// A lazy load that has been started and awaits its children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    pub id: String,
    pub label: String,
}

/// What `toggle_expand` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// No node with that id
    Missing,
    /// A load is already in flight for this node
    AlreadyLoading,
    /// Materialized children: `is_expanded` flipped to the carried value
    Toggled(bool),
    /// Node marked loading; children arrive via `complete_load`
    LoadStarted(PendingLoad),
}

impl Default for TreeState {
    fn default() -> Self {
        Self::new(initial_tree())
    }
}

impl TreeState {
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Self { roots }
    }

    fn apply(&mut self, f: impl FnOnce(Vec<TreeNode>) -> Vec<TreeNode>) {
        let roots = std::mem::take(&mut self.roots);
        self.roots = f(roots);
    }

    pub fn flattened(&self) -> Vec<FlattenedTreeNode> {
        flatten_tree(&self.roots)
    }

    /// Insert a new leaf under `parent_id` (or as a root). `input` is the
    /// resolved prompt: cancel or blank text does nothing.
    pub fn add_node(&mut self, parent_id: Option<&str>, input: Option<&str>) -> Option<String> {
        let label = input.map(str::trim).filter(|label| !label.is_empty())?;
        if let Some(parent_id) = parent_id {
            if find_node_by_id(&self.roots, parent_id).is_none() {
                debug!(parent_id, "add under unknown parent ignored");
                return None;
            }
        }
        let id = generate_id();
        let node = TreeNode::leaf(id.clone(), label);
        self.apply(|roots| insert_node(roots, parent_id, node));
        debug!(%id, ?parent_id, "node added");
        Some(id)
    }

    /// Remove a node and its subtree; confirmation happens before this
    pub fn delete_node(&mut self, id: &str) {
        self.apply(|roots| remove_node(roots, id));
        debug!(id, "node deleted");
    }

    /// The inline editor already trimmed and de-duplicated the value
    pub fn update_node_label(&mut self, id: &str, label: &str) {
        self.apply(|roots| update_node(roots, id, &NodePatch::label(label)));
    }

    /// collapsed/unloaded -> loading -> expanded -> collapsed -> expanded ...
    pub fn toggle_expand(&mut self, id: &str) -> ToggleOutcome {
        let Some(found) = find_node_by_id(&self.roots, id) else {
            return ToggleOutcome::Missing;
        };
        let node = found.node;

        if node.is_loading {
            debug!(id, "toggle ignored while loading");
            return ToggleOutcome::AlreadyLoading;
        }

        if node.needs_lazy_load() {
            let pending = PendingLoad { id: node.id.clone(), label: node.label.clone() };
            let patch = NodePatch { is_loading: Some(true), ..Default::default() };
            self.apply(|roots| update_node(roots, id, &patch));
            debug!(id, "lazy load started");
            return ToggleOutcome::LoadStarted(pending);
        }

        let expanded = !node.is_expanded;
        self.apply(|roots| update_node(roots, id, &NodePatch::expanded(expanded)));
        ToggleOutcome::Toggled(expanded)
    }

    /// Attach lazily loaded children. Returns false when the node vanished
    /// or is no longer waiting for this load.
    pub fn complete_load(&mut self, pending: &PendingLoad, children: Vec<TreeNode>) -> bool {
        let still_loading = find_node_by_id(&self.roots, &pending.id).is_some_and(|m| m.node.is_loading);
        if !still_loading {
            debug!(id = %pending.id, "lazy load result discarded");
            return false;
        }
        let patch = NodePatch {
            children: Some(children),
            is_loading: Some(false),
            is_expanded: Some(true),
            ..Default::default()
        };
        self.apply(|roots| update_node(roots, &pending.id, &patch));
        true
    }

    /// Drag-drop move. Refuses to drop a node onto itself or anywhere inside
    /// its own subtree; the algebra leaves that check to us.
    pub fn handle_move(&mut self, active_id: &str, over_id: &str, position: DropPosition) -> bool {
        if active_id == over_id || find_node_by_id(&self.roots, over_id).is_none() {
            return false;
        }
        let Some(active) = find_node_by_id(&self.roots, active_id) else {
            return false;
        };
        if find_node_by_id(&active.node.children, over_id).is_some() {
            debug!(active_id, over_id, "move into own subtree refused");
            return false;
        }
        self.apply(|roots| move_node(roots, active_id, over_id, position));
        debug!(active_id, over_id, ?position, "node moved");
        true
    }
}

/// Demo tree shown on first load
pub fn initial_tree() -> Vec<TreeNode> {
    vec![TreeNode::branch(
        generate_id(),
        "Root",
        vec![
            TreeNode::branch(
                generate_id(),
                "src",
                vec![
                    TreeNode::lazy(generate_id(), "components"),
                    TreeNode::lazy(generate_id(), "utils"),
                    TreeNode::leaf(generate_id(), "App.tsx"),
                ],
            ),
            TreeNode::lazy(generate_id(), "public"),
            TreeNode::leaf(generate_id(), "package.json"),
        ],
    )
    .expanded()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{count_descendants, generate_lazy_children};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn node<'a>(state: &'a TreeState, id: &str) -> &'a TreeNode {
        find_node_by_id(&state.roots, id).unwrap().node
    }

    fn id_of(state: &TreeState, label: &str) -> String {
        state.flattened().into_iter().find(|r| r.label == label).unwrap().id
    }

    fn labels(state: &TreeState) -> Vec<String> {
        state.flattened().into_iter().map(|r| r.label).collect()
    }

    #[test]
    fn test_initial_tree_view() {
        let state = TreeState::default();
        assert_eq!(labels(&state), vec!["Root", "src", "public", "package.json"]);
        let rows = state.flattened();
        assert_eq!(rows[0].children_count, 6);
    }

    #[test]
    fn test_add_node_trims_and_ignores_blank() {
        let mut state = TreeState::default();
        let before = state.clone();
        assert_eq!(state.add_node(None, Some("   ")), None);
        assert_eq!(state.add_node(None, None), None);
        assert_eq!(state, before);

        let id = state.add_node(None, Some("  notes  ")).unwrap();
        assert_eq!(node(&state, &id).label, "notes");
        assert_eq!(state.roots.last().unwrap().id, id);
    }

    #[test]
    fn test_add_child_expands_parent() {
        let mut state = TreeState::default();
        let public = id_of(&state, "public");
        let id = state.add_node(Some(&public), Some("index.html")).unwrap();
        assert!(node(&state, &public).is_expanded);
        assert!(labels(&state).contains(&"index.html".to_string()));
        assert_eq!(node(&state, &id).label, "index.html");
    }

    #[test]
    fn test_add_under_unknown_parent_is_noop() {
        let mut state = TreeState::default();
        let before = state.clone();
        assert_eq!(state.add_node(Some("ghost"), Some("x")), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_added_ids_are_unique() {
        let mut state = TreeState::new(Vec::new());
        let mut ids: Vec<String> = (0..500).filter_map(|i| state.add_node(None, Some(&format!("n{i}")))).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_delete_removes_subtree_from_view() {
        let mut state = TreeState::default();
        let src = id_of(&state, "src");
        state.toggle_expand(&src);
        let before = state.flattened().len();
        let src_count = count_descendants(node(&state, &src));

        state.delete_node(&src);
        assert_eq!(before - state.flattened().len(), 1 + src_count);
        assert!(!labels(&state).contains(&"App.tsx".to_string()));
    }

    #[test]
    fn test_rename() {
        let mut state = TreeState::default();
        let public = id_of(&state, "public");
        state.update_node_label(&public, "static");
        assert_eq!(node(&state, &public).label, "static");
    }

    #[test]
    fn test_toggle_materialized_children_flips() {
        let mut state = TreeState::default();
        let src = id_of(&state, "src");
        assert_eq!(state.toggle_expand(&src), ToggleOutcome::Toggled(true));
        assert!(labels(&state).contains(&"App.tsx".to_string()));
        assert_eq!(state.toggle_expand(&src), ToggleOutcome::Toggled(false));
        assert!(!labels(&state).contains(&"App.tsx".to_string()));
    }

    #[test]
    fn test_toggle_lazy_node_runs_load_cycle() {
        let mut state = TreeState::default();
        let public = id_of(&state, "public");

        let ToggleOutcome::LoadStarted(pending) = state.toggle_expand(&public) else {
            panic!("expected a lazy load");
        };
        let loading = node(&state, &public);
        assert!(loading.is_loading);
        assert!(!loading.is_expanded);
        assert!(loading.children.is_empty());

        // second toggle while in flight is ignored
        assert_eq!(state.toggle_expand(&public), ToggleOutcome::AlreadyLoading);

        let mut rng = SmallRng::seed_from_u64(3);
        let children = generate_lazy_children(&pending.label, &mut rng);
        assert!(state.complete_load(&pending, children));

        let loaded = node(&state, &public);
        assert!(!loaded.is_loading);
        assert!(loaded.is_expanded);
        assert!((2..=4).contains(&loaded.children.len()));
        let first_child_ids: Vec<String> = loaded.children.iter().map(|c| c.id.clone()).collect();

        // collapse then expand reuses the same children
        assert_eq!(state.toggle_expand(&public), ToggleOutcome::Toggled(false));
        assert_eq!(state.toggle_expand(&public), ToggleOutcome::Toggled(true));
        let reused: Vec<String> = node(&state, &public).children.iter().map(|c| c.id.clone()).collect();
        assert_eq!(reused, first_child_ids);
    }

    #[test]
    fn test_complete_load_for_deleted_node_is_dropped() {
        let mut state = TreeState::default();
        let public = id_of(&state, "public");
        let ToggleOutcome::LoadStarted(pending) = state.toggle_expand(&public) else {
            panic!("expected a lazy load");
        };
        state.delete_node(&public);
        let before = state.clone();
        assert!(!state.complete_load(&pending, vec![TreeNode::leaf("x", "x")]));
        assert_eq!(state, before);
    }

    #[test]
    fn test_toggle_unknown_node() {
        let mut state = TreeState::default();
        assert_eq!(state.toggle_expand("ghost"), ToggleOutcome::Missing);
    }

    #[test]
    fn test_handle_move_refuses_self_and_descendants() {
        let mut state = TreeState::default();
        let root = id_of(&state, "Root");
        let src = id_of(&state, "src");
        state.toggle_expand(&src);
        let app = id_of(&state, "App.tsx");
        let before = state.clone();

        for position in [DropPosition::Before, DropPosition::After, DropPosition::Inside] {
            assert!(!state.handle_move(&root, &root, position));
            assert!(!state.handle_move(&root, &src, position));
            assert!(!state.handle_move(&root, &app, position));
            assert!(!state.handle_move(&src, &app, position));
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_handle_move_reparents() {
        let mut state = TreeState::default();
        let src = id_of(&state, "src");
        let package = id_of(&state, "package.json");
        state.toggle_expand(&src);
        let app = id_of(&state, "App.tsx");

        assert!(state.handle_move(&package, &app, DropPosition::Before));
        let children: Vec<&str> = node(&state, &src).children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(children, vec!["components", "utils", "package.json", "App.tsx"]);

        // child moves up to be a sibling of its former parent
        assert!(state.handle_move(&app, &src, DropPosition::After));
        let root_children: Vec<&str> = state.roots[0].children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(root_children, vec!["src", "App.tsx", "public"]);
    }

    #[test]
    fn test_handle_move_unknown_active() {
        let mut state = TreeState::default();
        let src = id_of(&state, "src");
        assert!(!state.handle_move("ghost", &src, DropPosition::Inside));
    }

    #[test]
    fn test_handle_move_unknown_target() {
        let mut state = TreeState::default();
        let before = state.clone();
        let src = id_of(&state, "src");
        for position in [DropPosition::Before, DropPosition::After, DropPosition::Inside] {
            assert!(!state.handle_move(&src, "ghost", position));
        }
        assert_eq!(state, before);
    }
}
