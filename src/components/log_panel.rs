//! Log Panel Component
//!
//! Collapsible footer showing the most recent lines of the in-memory log
//! history. The history is not reactive, so the panel snapshots it when
//! opened and on "Refresh".

use console_logger::LogHistory;
use leptos::prelude::*;

/// Lines shown at once
const VISIBLE_LINES: usize = 50;

/// Up to `limit` most recent lines, newest first
pub fn recent_lines(history: &LogHistory, limit: usize) -> Vec<String> {
    let mut lines = history.lines();
    lines.reverse();
    lines.truncate(limit);
    lines
}

#[component]
pub fn LogPanel() -> impl IntoView {
    let Some(history) = use_context::<LogHistory>() else {
        return ().into_any();
    };
    let history = StoredValue::new(history);
    let (open, set_open) = signal(false);
    let (lines, set_lines) = signal(Vec::<String>::new());

    let refresh = move || set_lines.set(history.with_value(|h| recent_lines(h, VISIBLE_LINES)));
    let on_toggle = move |_| {
        if !open.get_untracked() {
            refresh();
        }
        set_open.update(|o| *o = !*o);
    };

    view! {
        <footer class="log-panel">
            <div class="log-panel-bar">
                <button class="log-toggle" on:click=on_toggle>
                    {move || if open.get() { "Hide log" } else { "Show log" }}
                </button>
                <Show when=move || open.get()>
                    <button class="log-refresh" on:click=move |_| refresh()>"Refresh"</button>
                </Show>
            </div>
            <Show when=move || open.get()>
                <pre class="log-lines">
                    {move || lines.get().join("\n")}
                </pre>
            </Show>
        </footer>
    }
    .into_any()
}
