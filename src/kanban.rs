//! Kanban Utilities
//!
//! Pure reorder/transfer functions over the per-column card id lists.

use crate::models::{ColumnId, Columns};

/// Splice the id at `from` out and back in at `to`. `to` is read against
/// the shortened list; positions past the end append.
pub fn reorder_in_column(card_ids: &[String], from: usize, to: usize) -> Vec<String> {
    let mut result = card_ids.to_vec();
    if from >= result.len() {
        return result;
    }
    let moved = result.remove(from);
    let to = to.min(result.len());
    result.insert(to, moved);
    result
}

/// Take `card_id` out of `source` and insert it into `dest` at `dest_index`
/// (past the end appends). A card not listed in `source` leaves the columns
/// untouched.
pub fn move_card_between_columns(
    mut columns: Columns,
    source: ColumnId,
    dest: ColumnId,
    card_id: &str,
    dest_index: usize,
) -> Columns {
    let source_ids = &mut columns.get_mut(source).card_ids;
    let Some(from) = source_ids.iter().position(|id| id == card_id) else {
        return columns;
    };
    source_ids.remove(from);

    let dest_ids = &mut columns.get_mut(dest).card_ids;
    let at = dest_index.min(dest_ids.len());
    dest_ids.insert(at, card_id.to_string());
    columns
}

/// Which column currently holds `card_id`
pub fn find_column_for_card(columns: &Columns, card_id: &str) -> Option<ColumnId> {
    columns
        .iter()
        .find(|column| column.card_ids.iter().any(|id| id == card_id))
        .map(|column| column.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn s(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn sample() -> Columns {
        Columns::new(s(&["card-3", "card-4", "card-5"]), s(&["card-2"]), s(&["card-1", "card-6"]))
    }

    #[test]
    fn test_reorder_forward_and_backward() {
        let ids = s(&["a", "b", "c", "d"]);
        assert_eq!(reorder_in_column(&ids, 0, 2), s(&["b", "c", "a", "d"]));
        assert_eq!(reorder_in_column(&ids, 3, 0), s(&["d", "a", "b", "c"]));
        assert_eq!(reorder_in_column(&ids, 1, 1), ids);
    }

    #[test]
    fn test_reorder_clamps_and_ignores_bad_source() {
        let ids = s(&["a", "b", "c"]);
        assert_eq!(reorder_in_column(&ids, 0, 99), s(&["b", "c", "a"]));
        assert_eq!(reorder_in_column(&ids, 5, 0), ids);
        assert!(reorder_in_column(&[], 0, 0).is_empty());
    }

    #[test]
    fn test_move_between_columns() {
        let columns = move_card_between_columns(sample(), ColumnId::InProgress, ColumnId::Todo, "card-2", 1);
        assert!(columns.get(ColumnId::InProgress).card_ids.is_empty());
        assert_eq!(columns.get(ColumnId::Todo).card_ids, s(&["card-3", "card-2", "card-4", "card-5"]));
        assert_eq!(columns.get(ColumnId::Done).card_ids, s(&["card-1", "card-6"]));
    }

    #[test]
    fn test_move_past_end_appends() {
        let columns = move_card_between_columns(sample(), ColumnId::Todo, ColumnId::Done, "card-3", 42);
        assert_eq!(columns.get(ColumnId::Done).card_ids, s(&["card-1", "card-6", "card-3"]));
    }

    #[test]
    fn test_move_within_same_column_never_duplicates() {
        let columns = move_card_between_columns(sample(), ColumnId::Todo, ColumnId::Todo, "card-3", 2);
        assert_eq!(columns.get(ColumnId::Todo).card_ids, s(&["card-4", "card-5", "card-3"]));
    }

    #[test]
    fn test_move_from_wrong_source_is_noop() {
        // card-1 lives in done, not todo
        let columns = move_card_between_columns(sample(), ColumnId::Todo, ColumnId::InProgress, "card-1", 0);
        assert_eq!(columns, sample());
        assert_eq!(find_column_for_card(&columns, "card-1"), Some(ColumnId::Done));
    }

    #[test]
    fn test_move_unknown_card_is_noop() {
        let columns = move_card_between_columns(sample(), ColumnId::Todo, ColumnId::Done, "ghost", 0);
        assert_eq!(columns, sample());
    }

    #[test]
    fn test_find_column_for_card() {
        let columns = sample();
        assert_eq!(find_column_for_card(&columns, "card-2"), Some(ColumnId::InProgress));
        assert_eq!(find_column_for_card(&columns, "card-6"), Some(ColumnId::Done));
        assert_eq!(find_column_for_card(&columns, "card-9"), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Reorder(usize, usize, usize),
        Transfer(usize, usize, usize, usize),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..3usize, 0..8usize, 0..8usize).prop_map(|(c, f, t)| Op::Reorder(c, f, t)),
            (0..3usize, 0..3usize, 0..8usize, 0..8usize).prop_map(|(a, b, i, d)| Op::Transfer(a, b, i, d)),
        ]
    }

    fn all_ids(columns: &Columns) -> Vec<String> {
        let mut ids: Vec<String> = columns.iter().flat_map(|c| c.card_ids.clone()).collect();
        ids.sort();
        ids
    }

    proptest! {
        #[test]
        fn prop_card_multiset_is_conserved(ops in prop::collection::vec(arb_op(), 0..40)) {
            let mut columns = sample();
            let expected = all_ids(&columns);
            for op in ops {
                columns = match op {
                    Op::Reorder(c, from, to) => {
                        let col = ColumnId::ALL[c];
                        let ids = reorder_in_column(&columns.get(col).card_ids, from, to);
                        columns.get_mut(col).card_ids = ids;
                        columns
                    }
                    Op::Transfer(a, b, pick, at) => {
                        let source = ColumnId::ALL[a];
                        let ids = &columns.get(source).card_ids;
                        if ids.is_empty() {
                            columns
                        } else {
                            let card = ids[pick % ids.len()].clone();
                            move_card_between_columns(columns, source, ColumnId::ALL[b], &card, at)
                        }
                    }
                };
                prop_assert_eq!(all_ids(&columns), expected.clone());
            }
        }
    }
}
