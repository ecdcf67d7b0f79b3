//! Inline Edit Input Component
//!
//! Double-click a label to edit it in place. Enter or blur saves, Escape
//! cancels.

use leptos::prelude::*;

/// Value to save for an edit, if any: trimmed, non-empty and changed
pub fn commit_edit(draft: &str, current: &str) -> Option<String> {
    let trimmed = draft.trim();
    (!trimmed.is_empty() && trimmed != current).then(|| trimmed.to_string())
}

#[component]
pub fn InlineEditInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_save: Callback<String>,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(String::new());
    let input_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        if editing.get() {
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
                input.select();
            }
        }
    });

    // Enter hides the input, which then blurs; only the first call counts
    let finish = move |save: bool| {
        if !editing.get_untracked() {
            return;
        }
        set_editing.set(false);
        if !save {
            return;
        }
        if let Some(next) = commit_edit(&draft.get_untracked(), &value.get_untracked()) {
            on_save.run(next);
        }
    };

    view! {
        {move || if editing.get() {
            view! {
                <input
                    node_ref=input_ref
                    type="text"
                    class="inline-edit-input"
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                        "Enter" => finish(true),
                        "Escape" => finish(false),
                        _ => {}
                    }
                    on:blur=move |_| finish(true)
                    on:click=|ev| ev.stop_propagation()
                />
            }.into_any()
        } else {
            view! {
                <span
                    class=class.clone()
                    title="Double-click to edit"
                    on:dblclick=move |ev| {
                        ev.stop_propagation();
                        set_draft.set(value.get_untracked());
                        set_editing.set(true);
                    }
                >
                    {move || value.get()}
                </span>
            }.into_any()
        }}
    }
}
