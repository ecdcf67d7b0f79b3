//! Kanban Board Component
//!
//! Three fixed columns sharing one drag context. Hovering a card or a
//! column moves the dragged card there immediately; the release only settles
//! ordering inside the column the drag started in.

use leptos::prelude::*;

use crate::components::KanbanColumn;
use crate::context::KanbanData;
use crate::models::ColumnId;
use crate::store::KanbanState;

use leptos_dragdrop::*;

/// Drag signals keyed by card id; targets are card ids or column ids
pub type KanbanDnd = DndSignals<String, String>;
pub type KanbanHandlers = DragHandlers<String, String>;

#[component]
pub fn KanbanBoard() -> impl IntoView {
    let board = KanbanData::new(KanbanState::default());
    provide_context(board);

    let dnd: KanbanDnd = create_dnd_signals();
    let handlers = KanbanHandlers {
        on_start: Some(Callback::new(move |active: String| board.drag_start(&active))),
        on_over: Some(Callback::new(move |(active, over): (String, String)| board.drag_over(&active, &over))),
        on_end: Some(Callback::new(move |(active, over): (String, Option<String>)| {
            board.drag_end(&active, over.as_deref())
        })),
    };
    bind_global_handlers(dnd, handlers);

    view! {
        <div class="kanban-view">
            <div class="view-header">
                <h2>"Kanban Board"</h2>
                <p class="subtitle">"Drag cards between columns · Double-click to edit"</p>
            </div>

            <div class="kanban-board">
                {ColumnId::ALL
                    .into_iter()
                    .map(|column_id| view! { <KanbanColumn column_id=column_id dnd=dnd handlers=handlers /> })
                    .collect_view()}
            </div>

            // Preview of the active card
            {move || board.active_card().map(|card| {
                let (x, y) = dnd.pointer_read.get();
                view! {
                    <div class="drag-overlay" style=format!("left: {}px; top: {}px;", x + 12, y + 12)>
                        {card.title}
                    </div>
                }
            })}
        </div>
    }
}
