//! Kanban Card Component

use leptos::prelude::*;

use crate::components::kanban_board::{KanbanDnd, KanbanHandlers};
use crate::components::InlineEditInput;
use crate::context::{use_dialogs, KanbanData};
use crate::models::KanbanCard;

use leptos_dragdrop::*;

#[component]
pub fn KanbanCardView(card: KanbanCard, dnd: KanbanDnd, handlers: KanbanHandlers) -> impl IntoView {
    let board = expect_context::<KanbanData>();
    let dialogs = use_dialogs();
    let id = card.id.clone();

    let on_mousedown = make_on_mousedown(dnd, id.clone());
    let on_mouseenter = make_on_target_mouseenter(dnd, id.clone(), handlers);
    let on_mouseleave = make_on_mouseleave(dnd);

    let card_class = {
        let id = id.clone();
        move || if dnd.is_dragged(&id) { "kanban-card dragging" } else { "kanban-card" }
    };

    let on_save = {
        let id = id.clone();
        Callback::new(move |title: String| board.update_card_title(&id, &title))
    };

    let on_delete = {
        let id = id.clone();
        let message = format!("Are you sure you want to delete \"{}\"?", card.title);
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            let id = id.clone();
            dialogs.request_confirm("Delete Card", message.clone(), move || board.delete_card(&id));
        }
    };

    view! {
        <div
            class=card_class
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <InlineEditInput value=card.title.clone() on_save=on_save class="card-title" />
            <button
                class="delete-btn"
                title="Delete card"
                aria-label=format!("Delete {}", card.title)
                on:click=on_delete
            >
                "×"
            </button>
        </div>
    }
}
