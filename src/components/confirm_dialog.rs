//! Confirm Dialog Component
//!
//! Modal yes/no gate in front of destructive commands. Reads the pending
//! request from `DialogContext`; clicking the backdrop or pressing Escape
//! cancels.

use leptos::prelude::*;

use crate::context::use_dialogs;

#[component]
pub fn ConfirmDialog() -> impl IntoView {
    let dialogs = use_dialogs();

    let on_key = window_event_listener(leptos::ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && dialogs.confirm.with_untracked(Option::is_some) {
            dialogs.resolve_confirm(false);
        }
    });
    on_cleanup(move || on_key.remove());

    move || {
        dialogs.confirm.get().map(|request| {
            view! {
                <div class="modal-backdrop" on:click=move |_| dialogs.resolve_confirm(false)>
                    <div class="modal confirm-dialog" on:click=|ev| ev.stop_propagation()>
                        <h3 class="modal-title">{request.title}</h3>
                        <p class="modal-message">{request.message}</p>
                        <div class="modal-actions">
                            <button class="cancel-btn" on:click=move |_| dialogs.resolve_confirm(false)>
                                "Cancel"
                            </button>
                            <button class="confirm-btn danger" on:click=move |_| dialogs.resolve_confirm(true)>
                                "Delete"
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
