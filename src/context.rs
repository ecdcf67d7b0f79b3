//! Application Context
//!
//! Reactive coordinators shared via the Leptos Context API. Each wraps a
//! store owned by the component that created it; disposing that component
//! disposes the store, and any lazy load still waiting on its timer then
//! finds nothing to write to and is dropped.

use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use reactive_stores::Store;
use tracing::{debug, info};

use crate::config::{AppConfig, LazyLoadConfig};
use crate::models::{ColumnId, DropPosition, FlattenedTreeNode, KanbanCard, KanbanColumnData};
use crate::store::{KanbanState, KanbanStateStoreFields, PendingLoad, ToggleOutcome, TreeState, TreeStateStoreFields};
use crate::tree::{flatten_tree, generate_lazy_children};

// ========================
// Tree
// ========================

/// Tree coordinator: commands plus the memoized flattened view
#[derive(Clone, Copy)]
pub struct TreeData {
    store: Store<TreeState>,
    rng: StoredValue<SmallRng>,
    lazy_load: LazyLoadConfig,
    flattened: Memo<Vec<FlattenedTreeNode>>,
}

impl TreeData {
    pub fn new(state: TreeState, config: &AppConfig) -> Self {
        let store = Store::new(state);
        let rng = match config.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let flattened = Memo::new(move |_| flatten_tree(&store.roots().read()));
        Self {
            store,
            rng: StoredValue::new(rng),
            lazy_load: config.lazy_load,
            flattened,
        }
    }

    pub fn flattened(&self) -> Memo<Vec<FlattenedTreeNode>> {
        self.flattened
    }

    pub fn add_node(&self, parent_id: Option<String>, input: Option<String>) {
        self.store.update(|s| {
            s.add_node(parent_id.as_deref(), input.as_deref());
        });
    }

    pub fn delete_node(&self, id: &str) {
        self.store.update(|s| s.delete_node(id));
    }

    pub fn update_node_label(&self, id: &str, label: &str) {
        self.store.update(|s| s.update_node_label(id, label));
    }

    pub fn handle_move(&self, active_id: &str, over_id: &str, position: DropPosition) {
        self.store.update(|s| {
            s.handle_move(active_id, over_id, position);
        });
    }

    /// Expand/collapse; unloaded branches go through the simulated fetch
    pub fn toggle_expand(&self, id: &str) {
        let Some((pending, delay)) = self.begin_toggle(id) else {
            return;
        };
        let tree = *self;
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        spawn_local(async move {
            TimeoutFuture::new(millis).await;
            tree.finish_lazy_load(pending);
        });
    }

    /// Synchronous half of a toggle: the loading flag is set before this
    /// returns, so a second toggle is already guarded.
    pub(crate) fn begin_toggle(&self, id: &str) -> Option<(PendingLoad, Duration)> {
        match self.store.try_update(|s| s.toggle_expand(id))? {
            ToggleOutcome::LoadStarted(pending) => {
                let delay = self.rng.try_update_value(|rng| self.lazy_load.sample_delay(rng))?;
                debug!(id, delay_ms = delay.as_millis() as u64, "lazy load scheduled");
                Some((pending, delay))
            }
            _ => None,
        }
    }

    /// Deliver simulated children. False if the tree was disposed in the
    /// meantime or the node is no longer waiting.
    pub fn finish_lazy_load(&self, pending: PendingLoad) -> bool {
        let Some(children) = self.rng.try_update_value(|rng| generate_lazy_children(&pending.label, rng)) else {
            debug!(id = %pending.id, "tree disposed, lazy load dropped");
            return false;
        };
        let count = children.len();
        match self.store.try_update(|s| s.complete_load(&pending, children)) {
            Some(true) => {
                info!(id = %pending.id, count, "lazy load finished");
                true
            }
            Some(false) => false,
            None => {
                debug!(id = %pending.id, "tree disposed, lazy load dropped");
                false
            }
        }
    }
}

// ========================
// Kanban
// ========================

/// Kanban coordinator
#[derive(Clone, Copy)]
pub struct KanbanData {
    store: Store<KanbanState>,
}

impl KanbanData {
    pub fn new(state: KanbanState) -> Self {
        Self { store: Store::new(state) }
    }

    /// Columns in display order
    pub fn columns(&self) -> Vec<KanbanColumnData> {
        self.store.columns().read().iter().cloned().collect()
    }

    pub fn column(&self, column: ColumnId) -> KanbanColumnData {
        self.store.columns().read().get(column).clone()
    }

    pub fn card(&self, card_id: &str) -> Option<KanbanCard> {
        self.store.cards().read().get(card_id).cloned()
    }

    pub fn active_card(&self) -> Option<KanbanCard> {
        self.store.with(|s| s.active_card().cloned())
    }

    pub fn add_card(&self, column: ColumnId, input: Option<String>) {
        self.store.update(|s| {
            s.add_card(column, input.as_deref());
        });
    }

    pub fn delete_card(&self, card_id: &str) {
        self.store.update(|s| s.delete_card(card_id));
    }

    pub fn update_card_title(&self, card_id: &str, title: &str) {
        self.store.update(|s| s.update_card_title(card_id, title));
    }

    pub fn drag_start(&self, active_id: &str) {
        self.store.update(|s| s.drag_start(active_id));
    }

    pub fn drag_over(&self, active_id: &str, over_id: &str) {
        self.store.update(|s| s.drag_over(active_id, over_id));
    }

    pub fn drag_end(&self, active_id: &str, over_id: Option<&str>) {
        self.store.update(|s| s.drag_end(active_id, over_id));
    }

    /// Throw away all edits and start from the demo board
    pub fn reset(&self) {
        self.store.set(KanbanState::default());
    }
}

// ========================
// Dialogs
// ========================

#[derive(Clone)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub on_confirm: Callback<()>,
}

#[derive(Clone)]
pub struct PromptRequest {
    pub title: String,
    /// `Some(text)` on submit, `None` on cancel
    pub on_resolve: Callback<Option<String>>,
}

/// Confirmation and text-prompt collaborators; at most one of each is open
#[derive(Clone, Copy)]
pub struct DialogContext {
    pub confirm: RwSignal<Option<ConfirmRequest>>,
    pub prompt: RwSignal<Option<PromptRequest>>,
}

impl DialogContext {
    pub fn new() -> Self {
        Self {
            confirm: RwSignal::new(None),
            prompt: RwSignal::new(None),
        }
    }

    pub fn request_confirm(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        on_confirm: impl Fn() + Send + Sync + 'static,
    ) {
        self.confirm.set(Some(ConfirmRequest {
            title: title.into(),
            message: message.into(),
            on_confirm: Callback::new(move |_| on_confirm()),
        }));
    }

    pub fn request_text(&self, title: impl Into<String>, on_resolve: impl Fn(Option<String>) + Send + Sync + 'static) {
        self.prompt.set(Some(PromptRequest {
            title: title.into(),
            on_resolve: Callback::new(on_resolve),
        }));
    }

    /// Close the confirm dialog, running its action only when accepted
    pub fn resolve_confirm(&self, accepted: bool) {
        let Some(request) = self.confirm.try_update(Option::take).flatten() else {
            return;
        };
        if accepted {
            request.on_confirm.run(());
        }
    }

    pub fn resolve_prompt(&self, input: Option<String>) {
        if let Some(request) = self.prompt.try_update(Option::take).flatten() {
            request.on_resolve.run(input);
        }
    }
}

impl Default for DialogContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the dialog context
pub fn use_dialogs() -> DialogContext {
    expect_context::<DialogContext>()
}

/// Get the app config from context
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_default()
}
