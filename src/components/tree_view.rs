//! Tree View Component
//!
//! Displays the flattened tree with drag-and-drop support.
//! Uses leptos-dragdrop with explicit DropZones between rows: dropping on a
//! row nests the dragged node inside it, dropping on a zone places it as a
//! sibling.

use leptos::prelude::*;
use tracing::debug;

use crate::components::TreeNodeItem;
use crate::context::{use_config, use_dialogs, TreeData};
use crate::models::{DropPosition, FlattenedTreeNode};
use crate::store::TreeState;

use leptos_dragdrop::*;

/// Where a release would put the dragged node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeDropTarget {
    pub over_id: String,
    pub position: DropPosition,
}

impl TreeDropTarget {
    fn new(over_id: &str, position: DropPosition) -> Self {
        Self { over_id: over_id.to_string(), position }
    }
}

/// Target of the zone directly below `rows[index]`. Below an expanded row
/// with visible children the zone sits above its first child.
pub fn zone_after(rows: &[FlattenedTreeNode], index: usize) -> TreeDropTarget {
    let row = &rows[index];
    match rows.get(index + 1) {
        Some(next) if next.parent_id.as_deref() == Some(row.id.as_str()) => {
            TreeDropTarget::new(&next.id, DropPosition::Before)
        }
        _ => TreeDropTarget::new(&row.id, DropPosition::After),
    }
}

type TreeDnd = DndSignals<String, TreeDropTarget>;

/// Tree view component with DnD support
#[component]
pub fn TreeView() -> impl IntoView {
    let config = use_config();
    let tree = TreeData::new(TreeState::default(), &config);
    provide_context(tree);
    let dialogs = use_dialogs();

    let dnd: TreeDnd = create_dnd_signals();
    let handlers = DragHandlers {
        on_start: Some(Callback::new(|active: String| debug!(%active, "tree drag started"))),
        on_over: None,
        on_end: Some(Callback::new(move |(active, target): (String, Option<TreeDropTarget>)| {
            if let Some(target) = target {
                tree.handle_move(&active, &target.over_id, target.position);
            }
        })),
    };
    bind_global_handlers(dnd, handlers);

    let rows = move || {
        let rows = tree.flattened().get();
        (0..rows.len())
            .map(|index| (rows[index].clone(), zone_after(&rows, index)))
            .collect::<Vec<_>>()
    };
    let first_row = move || tree.flattened().with(|rows| rows.first().map(|row| row.id.clone()));

    let on_add_root = move |_| {
        dialogs.request_text("Enter node name:", move |input| tree.add_node(None, input));
    };

    view! {
        <div class="tree-view">
            <div class="view-header">
                <h2>"Tree View"</h2>
                <p class="subtitle">"Drag to reorder or reparent · Double-click to edit · Lazy-loaded children"</p>
            </div>

            <div class="toolbar">
                <button class="add-root-btn" on:click=on_add_root>"+ Add Root Node"</button>
            </div>

            <div class="tree">
                // Drop zone above the first row
                {move || first_row().map(|id| view! {
                    <DropZone dnd=dnd handlers=handlers target=TreeDropTarget::new(&id, DropPosition::Before) />
                })}

                <For
                    each=rows
                    key=|entry| entry.clone()
                    children=move |(node, zone)| {
                        let id = node.id.clone();
                        let target = TreeDropTarget::new(&id, DropPosition::Inside);

                        let on_mousedown = make_on_mousedown(dnd, id.clone());
                        let on_mouseenter = make_on_target_mouseenter(dnd, target.clone(), handlers);
                        let on_mouseleave = make_on_mouseleave(dnd);

                        let dragged_id = id.clone();
                        let row_class = move || {
                            let mut c = String::from("tree-row-wrapper");
                            if dnd.is_dragged(&dragged_id) { c.push_str(" dragging"); }
                            if dnd.is_target(&target) { c.push_str(" drop-target"); }
                            c
                        };

                        view! {
                            <div
                                class=row_class
                                on:mousedown=on_mousedown
                                on:mouseenter=on_mouseenter
                                on:mouseleave=on_mouseleave
                            >
                                <TreeNodeItem node=node />
                            </div>

                            <DropZone dnd=dnd handlers=handlers target=zone />
                        }
                    }
                />

                <Show when=move || tree.flattened().with(Vec::is_empty)>
                    <div class="empty">"No nodes yet. Click \"Add Root Node\" to get started."</div>
                </Show>
            </div>

            <TreeDragOverlay dnd=dnd />
        </div>
    }
}

/// Drop zone component - a horizontal separator for dropping rows
#[component]
fn DropZone(dnd: TreeDnd, handlers: DragHandlers<String, TreeDropTarget>, target: TreeDropTarget) -> impl IntoView {
    let on_mouseenter = make_on_target_mouseenter(dnd, target.clone(), handlers);
    let on_mouseleave = make_on_mouseleave(dnd);

    let zone_class = move || {
        let mut c = String::from("drop-zone");
        if !dnd.is_dragging() { c.push_str(" hidden"); }
        if dnd.is_target(&target) { c.push_str(" active"); }
        c
    };

    view! {
        <div
            class=zone_class
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        />
    }
}

/// Label chip following the pointer while a row is dragged
#[component]
fn TreeDragOverlay(dnd: TreeDnd) -> impl IntoView {
    let tree = expect_context::<TreeData>();
    let active = move || {
        let id = dnd.dragging_id_read.get()?;
        tree.flattened().with(|rows| rows.iter().find(|row| row.id == id).cloned())
    };

    move || {
        active().map(|node| {
            let (x, y) = dnd.pointer_read.get();
            view! {
                <div class="drag-overlay" style=format!("left: {}px; top: {}px;", x + 12, y + 12)>
                    {node.label}
                    {(node.children_count > 0).then(|| view! {
                        <span class="children-count">{format!("+{}", node.children_count)}</span>
                    })}
                </div>
            }
        })
    }
}
