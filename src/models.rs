//! Frontend Models
//!
//! Data structures for the tree and kanban widgets.

use std::collections::HashMap;
use std::fmt;

// ========================
// Tree
// ========================

/// A node in the hierarchical tree; owns its children exclusively
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    pub children: Vec<TreeNode>,
    pub is_expanded: bool,
    /// True only while a lazy load is in flight
    pub is_loading: bool,
    /// Children MAY exist even when `children` is still empty (lazy-load marker)
    pub has_children: bool,
}

impl TreeNode {
    /// Create a collapsed leaf
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
            is_expanded: false,
            is_loading: false,
            has_children: false,
        }
    }

    /// Create a collapsed branch whose children are loaded on first expand
    pub fn lazy(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            has_children: true,
            ..Self::leaf(id, label)
        }
    }

    /// Create a branch with materialized children
    pub fn branch(id: impl Into<String>, label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            has_children: true,
            children,
            ..Self::leaf(id, label)
        }
    }

    pub fn expanded(mut self) -> Self {
        self.is_expanded = true;
        self
    }

    /// A node that declares children but has none loaded yet
    pub fn needs_lazy_load(&self) -> bool {
        !self.is_expanded && self.has_children && self.children.is_empty()
    }
}

/// Display row produced by flattening; recomputed on every tree change
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlattenedTreeNode {
    pub id: String,
    pub label: String,
    pub depth: usize,
    pub parent_id: Option<String>,
    /// Position among siblings
    pub index: usize,
    pub is_expanded: bool,
    pub is_loading: bool,
    pub has_children: bool,
    /// All descendants, not just direct children
    pub children_count: usize,
    pub is_last_child: bool,
    /// For each ancestor depth, whether that ancestor is the last child at its level
    pub ancestor_is_last: Vec<bool>,
}

/// Partial overwrite applied by `update_node`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub children: Option<Vec<TreeNode>>,
    pub is_expanded: Option<bool>,
    pub is_loading: Option<bool>,
    pub has_children: Option<bool>,
}

impl NodePatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self { label: Some(label.into()), ..Default::default() }
    }

    pub fn expanded(is_expanded: bool) -> Self {
        Self { is_expanded: Some(is_expanded), ..Default::default() }
    }

    pub fn apply(&self, node: &mut TreeNode) {
        if let Some(label) = &self.label {
            node.label = label.clone();
        }
        if let Some(children) = &self.children {
            node.children = children.clone();
        }
        if let Some(v) = self.is_expanded {
            node.is_expanded = v;
        }
        if let Some(v) = self.is_loading {
            node.is_loading = v;
        }
        if let Some(v) = self.has_children {
            node.has_children = v;
        }
    }
}

/// Where a dragged node lands relative to the hovered node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropPosition {
    Before,
    After,
    /// Become the last child
    Inside,
}

// ========================
// Kanban
// ========================

/// Kanban card; placement lives in the column lists, not here
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanbanCard {
    pub id: String,
    pub title: String,
}

/// The three fixed lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnId {
    Todo,
    InProgress,
    Done,
}

impl ColumnId {
    /// Display order
    pub const ALL: [ColumnId; 3] = [ColumnId::Todo, ColumnId::InProgress, ColumnId::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::Todo => "todo",
            ColumnId::InProgress => "in-progress",
            ColumnId::Done => "done",
        }
    }

    /// Resolve a drop-target id to a column; card ids yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ColumnId::Todo => "Todo",
            ColumnId::InProgress => "In Progress",
            ColumnId::Done => "Done",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanbanColumnData {
    pub id: ColumnId,
    pub title: String,
    /// Display order and membership
    pub card_ids: Vec<String>,
}

impl KanbanColumnData {
    pub fn new(id: ColumnId, card_ids: Vec<String>) -> Self {
        Self { id, title: id.title().to_string(), card_ids }
    }
}

/// Exactly one column per `ColumnId`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns([KanbanColumnData; 3]);

impl Columns {
    pub fn new(todo: Vec<String>, in_progress: Vec<String>, done: Vec<String>) -> Self {
        Self([
            KanbanColumnData::new(ColumnId::Todo, todo),
            KanbanColumnData::new(ColumnId::InProgress, in_progress),
            KanbanColumnData::new(ColumnId::Done, done),
        ])
    }

    pub fn get(&self, id: ColumnId) -> &KanbanColumnData {
        &self.0[id.slot()]
    }

    pub fn get_mut(&mut self, id: ColumnId) -> &mut KanbanColumnData {
        &mut self.0[id.slot()]
    }

    /// Columns in display order
    pub fn iter(&self) -> impl Iterator<Item = &KanbanColumnData> {
        self.0.iter()
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }
}

pub type CardMap = HashMap<String, KanbanCard>;
