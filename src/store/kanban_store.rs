//! Kanban State
//!
//! Card map, the three column lists and the in-flight drag marker.
//! Cross-column placement is committed live during drag-over; drag-end only
//! finalizes ordering inside the column the drag started in.

use reactive_stores::Store;
use tracing::debug;

use crate::id::generate_id;
use crate::kanban::{find_column_for_card, move_card_between_columns, reorder_in_column};
use crate::models::{CardMap, ColumnId, Columns, KanbanCard};

#[derive(Clone, Debug, PartialEq, Store)]
pub struct KanbanState {
    pub cards: CardMap,
    pub columns: Columns,
    /// Card being dragged (drives the preview overlay)
    pub active_card_id: Option<String>,
    /// Column the current drag started in
    pub drag_origin: Option<ColumnId>,
}

impl Default for KanbanState {
    fn default() -> Self {
        let (cards, columns) = initial_board();
        Self::new(cards, columns)
    }
}

impl KanbanState {
    pub fn new(cards: CardMap, columns: Columns) -> Self {
        Self { cards, columns, active_card_id: None, drag_origin: None }
    }

    pub fn active_card(&self) -> Option<&KanbanCard> {
        self.active_card_id.as_ref().and_then(|id| self.cards.get(id))
    }

    /// `input` is the resolved prompt: cancel or blank text does nothing
    pub fn add_card(&mut self, column: ColumnId, input: Option<&str>) -> Option<String> {
        let title = input.map(str::trim).filter(|title| !title.is_empty())?;
        let id = generate_id();
        self.cards.insert(id.clone(), KanbanCard { id: id.clone(), title: title.to_string() });
        self.columns.get_mut(column).card_ids.push(id.clone());
        debug!(%id, %column, "card added");
        Some(id)
    }

    pub fn delete_card(&mut self, card_id: &str) {
        self.cards.remove(card_id);
        if let Some(column) = find_column_for_card(&self.columns, card_id) {
            self.columns.get_mut(column).card_ids.retain(|id| id != card_id);
        }
        debug!(card_id, "card deleted");
    }

    /// Direct overwrite; the inline editor already filtered the value
    pub fn update_card_title(&mut self, card_id: &str, title: &str) {
        if let Some(card) = self.cards.get_mut(card_id) {
            card.title = title.to_string();
        }
    }

    pub fn drag_start(&mut self, active_id: &str) {
        self.active_card_id = Some(active_id.to_string());
        self.drag_origin = find_column_for_card(&self.columns, active_id);
    }

    /// A column id means "append"; a card id means "take that card's slot"
    fn resolve_target(&self, over_id: &str) -> Option<(ColumnId, usize)> {
        if let Some(column) = ColumnId::parse(over_id) {
            return Some((column, self.columns.get(column).card_ids.len()));
        }
        let column = find_column_for_card(&self.columns, over_id)?;
        let card_ids = &self.columns.get(column).card_ids;
        let index = card_ids.iter().position(|id| id == over_id).unwrap_or(card_ids.len());
        Some((column, index))
    }

    /// Live cross-column placement; hovering within the same column does nothing
    pub fn drag_over(&mut self, active_id: &str, over_id: &str) {
        let Some(source) = find_column_for_card(&self.columns, active_id) else {
            return;
        };
        let Some((dest, index)) = self.resolve_target(over_id) else {
            return;
        };
        if source == dest {
            return;
        }
        let columns = std::mem::take(&mut self.columns);
        self.columns = move_card_between_columns(columns, source, dest, active_id, index);
        debug!(active_id, %source, %dest, index, "card moved across columns");
    }

    pub fn drag_end(&mut self, active_id: &str, over_id: Option<&str>) {
        self.active_card_id = None;
        let origin = self.drag_origin.take();
        let Some(over_id) = over_id else {
            return;
        };
        if ColumnId::parse(over_id).is_some() || over_id == active_id {
            return;
        }

        let Some(column) = find_column_for_card(&self.columns, active_id) else {
            return;
        };
        // drag-over already relocated cross-column drops
        if origin.is_some_and(|origin| origin != column) {
            return;
        }
        if find_column_for_card(&self.columns, over_id) != Some(column) {
            return;
        }

        let card_ids = &self.columns.get(column).card_ids;
        let from = card_ids.iter().position(|id| id == active_id);
        let to = card_ids.iter().position(|id| id == over_id);
        if let (Some(from), Some(to)) = (from, to) {
            if from != to {
                let reordered = reorder_in_column(card_ids, from, to);
                self.columns.get_mut(column).card_ids = reordered;
                debug!(active_id, %column, from, to, "card reordered");
            }
        }
    }
}

/// Demo board shown on first load
pub fn initial_board() -> (CardMap, Columns) {
    let cards = [
        ("card-1", "Set up project structure"),
        ("card-2", "Design database schema"),
        ("card-3", "Implement authentication"),
        ("card-4", "Create API endpoints"),
        ("card-5", "Write unit tests"),
        ("card-6", "Deploy to staging"),
    ]
    .into_iter()
    .map(|(id, title)| (id.to_string(), KanbanCard { id: id.to_string(), title: title.to_string() }))
    .collect();

    let ids = |ids: &[&str]| ids.iter().map(|id| id.to_string()).collect::<Vec<_>>();
    let columns = Columns::new(ids(&["card-3", "card-4", "card-5"]), ids(&["card-2"]), ids(&["card-1", "card-6"]));
    (cards, columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(state: &KanbanState, column: ColumnId) -> Vec<&str> {
        state.columns.get(column).card_ids.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_drag_card_over_card_in_other_column() {
        let mut state = KanbanState::default();
        state.drag_start("card-2");
        assert_eq!(state.active_card().unwrap().title, "Design database schema");

        state.drag_over("card-2", "card-4");
        assert!(col(&state, ColumnId::InProgress).is_empty());
        assert_eq!(col(&state, ColumnId::Todo), vec!["card-3", "card-2", "card-4", "card-5"]);

        state.drag_end("card-2", Some("card-4"));
        assert!(state.active_card_id.is_none());
        assert!(col(&state, ColumnId::InProgress).is_empty());
        assert_eq!(col(&state, ColumnId::Todo), vec!["card-3", "card-2", "card-4", "card-5"]);
    }

    #[test]
    fn test_drag_over_column_appends() {
        let mut state = KanbanState::default();
        state.drag_start("card-3");
        state.drag_over("card-3", "done");
        assert_eq!(col(&state, ColumnId::Done), vec!["card-1", "card-6", "card-3"]);
        assert_eq!(col(&state, ColumnId::Todo), vec!["card-4", "card-5"]);
    }

    #[test]
    fn test_drag_over_same_column_does_not_reorder() {
        let mut state = KanbanState::default();
        state.drag_start("card-3");
        state.drag_over("card-3", "card-5");
        assert_eq!(col(&state, ColumnId::Todo), vec!["card-3", "card-4", "card-5"]);
        state.drag_over("card-3", "todo");
        assert_eq!(col(&state, ColumnId::Todo), vec!["card-3", "card-4", "card-5"]);
    }

    #[test]
    fn test_drag_end_reorders_within_column() {
        let mut state = KanbanState::default();
        state.drag_start("card-3");
        state.drag_over("card-3", "card-5");
        state.drag_end("card-3", Some("card-5"));
        assert_eq!(col(&state, ColumnId::Todo), vec!["card-4", "card-5", "card-3"]);

        state.drag_start("card-5");
        state.drag_end("card-5", Some("card-4"));
        assert_eq!(col(&state, ColumnId::Todo), vec!["card-5", "card-4", "card-3"]);
    }

    #[test]
    fn test_drag_end_without_target_keeps_live_move() {
        let mut state = KanbanState::default();
        state.drag_start("card-1");
        state.drag_over("card-1", "in-progress");
        state.drag_end("card-1", None);
        assert_eq!(col(&state, ColumnId::InProgress), vec!["card-2", "card-1"]);
        assert_eq!(col(&state, ColumnId::Done), vec!["card-6"]);
        assert!(state.active_card().is_none());
    }

    #[test]
    fn test_drag_end_without_start_uses_current_column() {
        let mut state = KanbanState::default();
        state.drag_end("card-1", Some("card-6"));
        assert_eq!(col(&state, ColumnId::Done), vec!["card-6", "card-1"]);
    }

    #[test]
    fn test_unknown_cards_are_noops() {
        let mut state = KanbanState::default();
        let before = state.clone();
        state.drag_over("ghost", "card-1");
        state.drag_over("card-1", "ghost");
        state.drag_end("ghost", Some("card-1"));
        state.update_card_title("ghost", "x");
        state.delete_card("ghost");
        assert_eq!(state, before);
    }

    #[test]
    fn test_add_card_appends_and_ignores_blank() {
        let mut state = KanbanState::default();
        assert_eq!(state.add_card(ColumnId::Done, Some("  ")), None);
        assert_eq!(state.add_card(ColumnId::Done, None), None);

        let id = state.add_card(ColumnId::Done, Some(" Ship it ")).unwrap();
        assert_eq!(state.cards[&id].title, "Ship it");
        assert_eq!(col(&state, ColumnId::Done).last().copied(), Some(id.as_str()));
    }

    #[test]
    fn test_delete_card_removes_everywhere() {
        let mut state = KanbanState::default();
        state.delete_card("card-4");
        assert!(!state.cards.contains_key("card-4"));
        assert_eq!(col(&state, ColumnId::Todo), vec!["card-3", "card-5"]);
    }

    #[test]
    fn test_update_title_overwrites() {
        let mut state = KanbanState::default();
        state.update_card_title("card-6", "Deploy to prod");
        assert_eq!(state.cards["card-6"].title, "Deploy to prod");
    }

    #[test]
    fn test_every_listed_card_exists() {
        let mut state = KanbanState::default();
        state.add_card(ColumnId::Todo, Some("new"));
        state.delete_card("card-2");
        for column in state.columns.iter() {
            for id in &column.card_ids {
                assert!(state.cards.contains_key(id));
            }
        }
    }
}
