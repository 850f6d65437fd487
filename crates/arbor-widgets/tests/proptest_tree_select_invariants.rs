//! Property-based invariant tests for filtering, selection and expansion.
//!
//! These tests verify invariants that must hold for any option forest:
//!
//! 1. An empty query makes every id visible.
//! 2. Every visible id is a direct match or an ancestor of one.
//! 3. Every ancestor of a direct match is visible and forced open.
//! 4. Toggling an id twice in multi mode restores the selection.
//! 5. In single mode, selecting a leaf closes and reports exactly that id.
//! 6. `clear_all` always reports an empty list.
//! 7. Apply is enabled exactly when the selection is non-empty.
//! 8. Expansion and selection never affect each other.
//! 9. Rendered rows are always a subset of the visible set.

use std::cell::RefCell;
use std::rc::Rc;

use arbor_widgets::filter::compute_visibility;
use arbor_widgets::selection::{SelectionMode, SelectionValue};
use arbor_widgets::tree_index::{HierarchicalOption, TreeIndex};
use arbor_widgets::tree_select::TreeSelect;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const WORDS: &[&str] = &["apple", "Berry", "cherry", "Date", "elder", "fig", "Grape", "kiwi"];

/// Forest with unique ids `n0`, `n1`, ... and labels drawn from `WORDS`.
fn forest() -> impl Strategy<Value = Vec<HierarchicalOption>> {
    let leaf = (0..WORDS.len()).prop_map(|w| HierarchicalOption::new("", WORDS[w]));
    let tree = leaf.prop_recursive(3, 24, 4, |inner| {
        ((0..WORDS.len()), proptest::collection::vec(inner, 0..4))
            .prop_map(|(w, children)| HierarchicalOption::new("", WORDS[w]).with_children(children))
    });
    proptest::collection::vec(tree, 0..5).prop_map(|mut roots| {
        let mut next = 0usize;
        let mut stack: Vec<&mut HierarchicalOption> = roots.iter_mut().collect();
        while let Some(option) = stack.pop() {
            option.id = format!("n{next}");
            next += 1;
            stack.extend(option.children.iter_mut());
        }
        roots
    })
}

fn query() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        (0..WORDS.len()).prop_map(|w| WORDS[w][..2].to_owned()),
        (0..WORDS.len()).prop_map(|w| WORDS[w].to_uppercase()),
        "[a-z]{1,3}",
    ]
}

fn leaves(index: &TreeIndex) -> Vec<String> {
    index
        .preorder()
        .iter()
        .filter(|id| index.get(id).is_some_and(|n| n.is_leaf()))
        .cloned()
        .collect()
}

fn direct_match(index: &TreeIndex, id: &str, query: &str) -> bool {
    index
        .label(id)
        .is_some_and(|l| l.to_lowercase().contains(&query.to_lowercase()))
}

fn has_matching_descendant(index: &TreeIndex, id: &str, query: &str) -> bool {
    let mut stack: Vec<&str> = index
        .get(id)
        .map(|n| n.child_ids().iter().map(String::as_str).collect())
        .unwrap_or_default();
    while let Some(next) = stack.pop() {
        if direct_match(index, next, query) {
            return true;
        }
        if let Some(node) = index.get(next) {
            stack.extend(node.child_ids().iter().map(String::as_str));
        }
    }
    false
}

// ═════════════════════════════════════════════════════════════════════════
// Filter
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn empty_query_is_identity(options in forest()) {
        let index = TreeIndex::build(&options);
        let vis = compute_visibility(&index, "");
        prop_assert_eq!(vis.visible_ids().len(), index.len());
        for id in index.ids() {
            prop_assert!(vis.is_visible(id));
        }
        prop_assert!(vis.forced_expanded_ids().is_empty());
    }

    #[test]
    fn visible_ids_are_sound(options in forest(), q in query()) {
        prop_assume!(!q.is_empty());
        let index = TreeIndex::build(&options);
        let vis = compute_visibility(&index, &q);
        for id in vis.visible_ids() {
            prop_assert!(
                direct_match(&index, id, &q) || has_matching_descendant(&index, id, &q),
                "{} visible without a match", id
            );
        }
    }

    #[test]
    fn match_ancestors_are_visible_and_forced(options in forest(), q in query()) {
        prop_assume!(!q.is_empty());
        let index = TreeIndex::build(&options);
        let vis = compute_visibility(&index, &q);
        for id in index.ids() {
            if !direct_match(&index, id, &q) {
                continue;
            }
            prop_assert!(vis.is_visible(id));
            for ancestor in index.ancestors(id) {
                prop_assert!(vis.is_visible(ancestor));
                prop_assert_eq!(
                    vis.is_forced_expanded(ancestor),
                    !direct_match(&index, ancestor, &q)
                );
            }
        }
    }

    #[test]
    fn rendered_rows_are_visible(options in forest(), q in query(), expand in proptest::collection::vec(0usize..40, 0..6)) {
        let mut select = TreeSelect::new(options)
            .with_expanded(expand.iter().map(|i| format!("n{i}")));
        select.open();
        select.set_search_query(&q);
        let rendered: Vec<String> = select.rendered_ids().into_iter().map(str::to_owned).collect();
        for id in &rendered {
            prop_assert!(select.visibility().is_visible(id));
        }
        let mut dedup = rendered.clone();
        dedup.sort();
        dedup.dedup();
        prop_assert_eq!(dedup.len(), rendered.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Selection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn double_toggle_restores_selection(options in forest(), picks in proptest::collection::vec(0usize..40, 0..6), target in 0usize..40) {
        let mut select = TreeSelect::new(options).with_mode(SelectionMode::Multi);
        for p in &picks {
            let id = format!("n{p}");
            if !select.value().contains(&id) {
                select.toggle(&id);
            }
        }
        let before = select.value().clone();
        let id = format!("n{target}");
        select.toggle(&id);
        select.toggle(&id);
        let mut a = before.ids().to_vec();
        let mut b = select.value().ids().to_vec();
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn single_select_closes_and_reports_the_leaf(options in forest(), pick in any::<prop::sample::Index>()) {
        let index = TreeIndex::build(&options);
        let leaves = leaves(&index);
        prop_assume!(!leaves.is_empty());
        let leaf = leaves[pick.index(leaves.len())].clone();

        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let mut select = TreeSelect::new(options)
            .on_change(move |v: &SelectionValue| sink.borrow_mut().push(v.clone()));
        select.open();
        select.select(&leaf);

        prop_assert!(!select.is_open());
        let last = log.borrow().last().cloned();
        prop_assert_eq!(last.as_ref().and_then(SelectionValue::single), Some(leaf.as_str()));
    }

    #[test]
    fn clear_all_always_reports_empty(options in forest(), picks in proptest::collection::vec(0usize..40, 0..8)) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let mut select = TreeSelect::new(options)
            .with_mode(SelectionMode::Multi)
            .on_change(move |v: &SelectionValue| sink.borrow_mut().push(v.clone()));
        for p in &picks {
            select.toggle(&format!("n{p}"));
        }
        select.clear_all();
        let last = log.borrow().last().cloned();
        prop_assert_eq!(last, Some(SelectionValue::Multi(Vec::new())));
        prop_assert!(select.value().is_empty());
    }

    #[test]
    fn apply_enabled_iff_non_empty(options in forest(), picks in proptest::collection::vec(0usize..40, 0..8)) {
        let mut select = TreeSelect::new(options)
            .with_mode(SelectionMode::Multi)
            .show_apply_button(true);
        select.open();
        for p in &picks {
            select.toggle(&format!("n{p}"));
            prop_assert_eq!(select.can_apply(), !select.value().is_empty());
            prop_assert_eq!(
                select.footer_view().map(|f| f.apply_enabled),
                Some(!select.value().is_empty())
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Independence of expansion and selection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn expansion_and_selection_are_independent(
        options in forest(),
        ops in proptest::collection::vec((any::<bool>(), 0usize..40), 0..20),
    ) {
        let mut select = TreeSelect::new(options).with_mode(SelectionMode::Multi);
        select.open();
        for (expand, n) in ops {
            let id = format!("n{n}");
            if expand {
                let before = select.value().clone();
                select.toggle_expand(&id);
                prop_assert_eq!(select.value(), &before);
            } else {
                let mut before: Vec<String> = select.expansion().iter().map(str::to_owned).collect();
                select.toggle(&id);
                let mut after: Vec<String> = select.expansion().iter().map(str::to_owned).collect();
                before.sort();
                after.sort();
                prop_assert_eq!(before, after);
            }
        }
    }
}
