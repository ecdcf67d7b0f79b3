//! Prompt Dialog Component
//!
//! Modal single-line text prompt. Submit resolves the pending request with
//! the raw text (callers trim and validate); Cancel, Escape or a backdrop
//! click resolve it with `None`.

use leptos::prelude::*;

use crate::context::use_dialogs;

#[component]
pub fn PromptDialog() -> impl IntoView {
    let dialogs = use_dialogs();
    let (text, set_text) = signal(String::new());
    let input_ref = NodeRef::<leptos::html::Input>::new();

    // Fresh input for every request
    Effect::new(move |_| {
        if dialogs.prompt.with(Option::is_some) {
            set_text.set(String::new());
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
            }
        }
    });

    let on_key = window_event_listener(leptos::ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && dialogs.prompt.with_untracked(Option::is_some) {
            dialogs.resolve_prompt(None);
        }
    });
    on_cleanup(move || on_key.remove());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        dialogs.resolve_prompt(Some(text.get_untracked()));
    };

    move || {
        dialogs.prompt.get().map(|request| {
            view! {
                <div class="modal-backdrop" on:click=move |_| dialogs.resolve_prompt(None)>
                    <form class="modal prompt-dialog" on:click=|ev| ev.stop_propagation() on:submit=on_submit>
                        <h3 class="modal-title">{request.title}</h3>
                        <input
                            node_ref=input_ref
                            type="text"
                            prop:value=move || text.get()
                            on:input=move |ev| set_text.set(event_target_value(&ev))
                        />
                        <div class="modal-actions">
                            <button type="button" class="cancel-btn" on:click=move |_| dialogs.resolve_prompt(None)>
                                "Cancel"
                            </button>
                            <button type="submit" class="confirm-btn">"OK"</button>
                        </div>
                    </form>
                </div>
            }
        })
    }
}
