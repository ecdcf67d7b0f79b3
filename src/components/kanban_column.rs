//! Kanban Column Component

use leptos::prelude::*;

use crate::components::kanban_board::{KanbanDnd, KanbanHandlers};
use crate::components::KanbanCardView;
use crate::context::{use_dialogs, KanbanData};
use crate::error::{AppError, AppResult};
use crate::models::{ColumnId, KanbanCard, KanbanColumnData};

use leptos_dragdrop::*;

/// Cards of a column in order. A listed id with no card is a broken board
/// and is reported rather than skipped.
pub fn column_cards(
    column: &KanbanColumnData,
    lookup: impl Fn(&str) -> Option<KanbanCard>,
) -> AppResult<Vec<KanbanCard>> {
    column
        .card_ids
        .iter()
        .map(|id| {
            lookup(id).ok_or_else(|| AppError::MissingCard {
                column: column.id.to_string(),
                card_id: id.clone(),
            })
        })
        .collect()
}

#[component]
pub fn KanbanColumn(column_id: ColumnId, dnd: KanbanDnd, handlers: KanbanHandlers) -> impl IntoView {
    let board = expect_context::<KanbanData>();
    let dialogs = use_dialogs();
    let column = Memo::new(move |_| board.column(column_id));

    let target = column_id.as_str().to_string();
    let on_mouseenter = make_on_target_mouseenter(dnd, target.clone(), handlers);
    let on_mouseleave = make_on_mouseleave(dnd);
    let column_class = move || {
        if dnd.is_target(&target) { "kanban-column drop-target" } else { "kanban-column" }
    };

    let on_add = move |_| {
        dialogs.request_text("Enter card title:", move |input| board.add_card(column_id, input));
    };

    let cards = move || {
        column.with(|column| column_cards(column, |id| board.card(id))).map(|cards| {
            cards
                .into_iter()
                .map(|card| view! { <KanbanCardView card=card dnd=dnd handlers=handlers /> })
                .collect_view()
        })
    };

    view! {
        <div class=column_class>
            <div class="column-header">
                <h3 class="column-title">{column_id.title()}</h3>
                <span class="column-count">{move || column.with(|c| c.card_ids.len())}</span>
                <button
                    class="column-add-btn"
                    title=format!("Add card to {}", column_id.title())
                    on:click=on_add
                >
                    "+"
                </button>
            </div>
            <div class="column-cards">
                {cards}
                // Fills the rest of the column; hovering here means "append"
                <div class="column-drop-area" on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave>
                    <Show when=move || column.with(|c| c.card_ids.is_empty())>
                        "Drop cards here"
                    </Show>
                </div>
            </div>
        </div>
    }
}
