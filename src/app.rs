//! Treeboard App
//!
//! Main application component: tab bar over the active view, with the
//! shared dialogs mounted once at the root.

use leptos::prelude::*;
use tracing::error;

use console_logger::LogHistory;

use crate::components::{ConfirmDialog, KanbanBoard, LogPanel, PromptDialog, Tab, TabBar, TreeView};
use crate::config::AppConfig;
use crate::context::DialogContext;

/// `history` is `None` when logging could not be installed
#[component]
pub fn App(config: AppConfig, history: Option<LogHistory>) -> impl IntoView {
    let (current_tab, set_current_tab) = signal(Tab::default());
    // Bumped by "Try again" to rebuild the view with fresh state
    let (generation, set_generation) = signal(0u32);

    provide_context(config);
    provide_context(DialogContext::new());
    if let Some(history) = history {
        provide_context(history);
    }

    let active_view = move || {
        generation.track();
        match current_tab.get() {
            Tab::Tree => view! { <TreeView /> }.into_any(),
            Tab::Kanban => view! { <KanbanBoard /> }.into_any(),
        }
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1 class="logo">"Treeboard"</h1>
                <TabBar current_tab=current_tab set_current_tab=set_current_tab />
            </header>

            <main class="main-content">
                <ErrorBoundary fallback=move |errors| {
                    errors.with_untracked(|errors| {
                        for (_, err) in errors.iter() {
                            error!(%err, "view failed to render");
                        }
                    });
                    view! {
                        <div class="error-fallback">
                            <h3>"Something went wrong"</h3>
                            <ul>
                                {move || errors.get()
                                    .into_iter()
                                    .map(|(_, err)| view! { <li>{err.to_string()}</li> })
                                    .collect_view()}
                            </ul>
                            <button on:click=move |_| set_generation.update(|g| *g += 1)>"Try again"</button>
                        </div>
                    }
                }>
                    {active_view}
                </ErrorBoundary>
            </main>

            <LogPanel />

            <ConfirmDialog />
            <PromptDialog />
        </div>
    }
}
