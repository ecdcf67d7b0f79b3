//! Tab Bar Component
//!
//! Switches the main content area between the tree and kanban views.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Tree,
    Kanban,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Tree, Tab::Kanban];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Tree => "Tree View",
            Tab::Kanban => "Kanban Board",
        }
    }
}

/// Tab Bar component
#[component]
pub fn TabBar(current_tab: ReadSignal<Tab>, set_current_tab: WriteSignal<Tab>) -> impl IntoView {
    view! {
        <nav class="tab-bar">
            <For
                each=move || Tab::ALL
                key=|tab| *tab
                children=move |tab| {
                    let tab_class = move || {
                        if current_tab.get() == tab { "tab active" } else { "tab" }
                    };
                    view! {
                        <button class=tab_class on:click=move |_| set_current_tab.set(tab)>
                            {tab.label()}
                        </button>
                    }
                }
            />
        </nav>
    }
}
