#![forbid(unsafe_code)]

//! Hierarchical selection combobox.
//!
//! [`TreeSelect`] composes the [`TreeIndex`], the search filter, the
//! [`ExpansionSet`] and the [`SelectionController`] behind a two-state
//! (closed/open) interaction machine driven by [`Event`]s.
//!
//! # Example
//!
//! ```
//! use arbor_core::event::{Event, KeyCode};
//! use arbor_widgets::tree_index::HierarchicalOption;
//! use arbor_widgets::tree_select::TreeSelect;
//!
//! let mut select = TreeSelect::new(vec![
//!     HierarchicalOption::new("a", "Root 1").child(HierarchicalOption::new("a1", "Child 1")),
//!     HierarchicalOption::new("b", "Root 2"),
//! ]);
//!
//! select.handle_event(&Event::key(KeyCode::Enter)); // open
//! select.handle_event(&Event::key(KeyCode::Enter)); // expand "Root 1"
//! assert!(select.rendered_ids().contains(&"a1"));
//!
//! select.handle_event(&Event::key(KeyCode::Escape));
//! assert!(!select.is_open());
//! assert!(select.expansion().contains("a"));
//! ```

mod view;

pub use view::{
    ChipView, FooterView, TreeGuides, TreeItemView, TreeView, TriggerSummary, TriggerView,
};

use crate::expansion::ExpansionSet;
use crate::filter::{Visibility, compute_visibility};
use crate::search_input::{InputOutcome, SearchInput};
use crate::selection::{SelectionController, SelectionMode, SelectionValue};
use crate::tree_index::{HierarchicalOption, TreeIndex};
use ahash::AHashSet;
use arbor_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use arbor_core::geometry::Rect;
use std::fmt;

/// Trigger size preset. Affects horizontal padding only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum TriggerSize {
    /// Compact.
    Sm,
    /// Default.
    #[default]
    Md,
    /// Roomy.
    Lg,
}

impl TriggerSize {
    /// Horizontal padding in cells on each side of the trigger text.
    #[must_use]
    pub const fn padding(self) -> u16 {
        match self {
            Self::Sm => 0,
            Self::Md => 1,
            Self::Lg => 2,
        }
    }
}

/// Which part of the widget holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusTarget {
    /// The trigger button (always the target after closing).
    #[default]
    Trigger,
    /// The embedded search field.
    Search,
    /// The tree itself (when not searchable).
    Tree,
}

/// Why the popup closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// Escape key.
    Escape,
    /// Tab moved focus away.
    Tab,
    /// Pointer down outside the trigger and popup.
    Outside,
    /// Pointer down on the trigger while open.
    Trigger,
    /// Single-mode selection committed.
    Commit,
    /// Apply step invoked.
    Apply,
    /// Host request.
    Api,
    /// The widget lost focus.
    Blur,
}

impl CloseReason {
    #[cfg(feature = "tracing")]
    const fn as_str(self) -> &'static str {
        match self {
            Self::Escape => "escape",
            Self::Tab => "tab",
            Self::Outside => "outside",
            Self::Trigger => "trigger",
            Self::Commit => "commit",
            Self::Apply => "apply",
            Self::Api => "api",
            Self::Blur => "blur",
        }
    }
}

/// One row of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Row {
    pub(crate) id: String,
    pub(crate) depth: usize,
    pub(crate) is_leaf: bool,
    pub(crate) expanded: bool,
    /// `is_last` flag for every level below the roots, ending with this row's.
    pub(crate) last_chain: Vec<bool>,
}

/// Hierarchical tree-select combobox.
pub struct TreeSelect {
    index: TreeIndex,
    visibility: Visibility,
    expansion: ExpansionSet,
    selection: SelectionController,
    search: SearchInput,
    rows: Vec<Row>,
    is_open: bool,
    cursor: usize,
    offset: usize,
    focus: FocusTarget,
    searchable: bool,
    disabled: bool,
    size: TriggerSize,
    label: Option<String>,
    placeholder: String,
    empty_message: String,
    show_apply_button: bool,
    max_visible_rows: usize,
    guides: TreeGuides,
    trigger_area: Rect,
    popup_area: Rect,
    on_open_change: Option<Box<dyn FnMut(bool)>>,
}

impl fmt::Debug for TreeSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeSelect")
            .field("nodes", &self.index.len())
            .field("is_open", &self.is_open)
            .field("query", &self.search.value())
            .field("selection", &self.selection)
            .field("expanded", &self.expansion.len())
            .field("cursor", &self.cursor)
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}

impl TreeSelect {
    /// Create a single-mode, searchable tree-select over `options`.
    #[must_use]
    pub fn new(options: Vec<HierarchicalOption>) -> Self {
        let index = TreeIndex::build(&options);
        let visibility = compute_visibility(&index, "");
        let mut select = Self {
            index,
            visibility,
            expansion: ExpansionSet::new(),
            selection: SelectionController::new(SelectionMode::Single),
            search: SearchInput::new().with_placeholder("Search..."),
            rows: Vec::new(),
            is_open: false,
            cursor: 0,
            offset: 0,
            focus: FocusTarget::Trigger,
            searchable: true,
            disabled: false,
            size: TriggerSize::default(),
            label: None,
            placeholder: "Select...".to_owned(),
            empty_message: "No results found".to_owned(),
            show_apply_button: false,
            max_visible_rows: 8,
            guides: TreeGuides::default(),
            trigger_area: Rect::default(),
            popup_area: Rect::default(),
            on_open_change: None,
        };
        select.rows = select.collect_rows();
        select
    }

    // --- Builder methods ---

    /// Set the selection cardinality. The current value is coerced.
    #[must_use]
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.selection.set_mode(mode);
        self
    }

    /// Hand the selection to the host (controlled mode).
    #[must_use]
    pub fn with_value(mut self, value: SelectionValue) -> Self {
        self.selection.set_value(Some(value));
        self
    }

    /// Seed the internally owned selection (uncontrolled mode).
    #[must_use]
    pub fn with_default_value(mut self, value: SelectionValue) -> Self {
        self.selection = self.selection.with_default_value(value);
        self
    }

    /// Register the selection change callback.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(&SelectionValue) + 'static) -> Self {
        self.selection = self.selection.on_change(callback);
        self
    }

    /// Register the apply callback (multi mode with the apply button).
    #[must_use]
    pub fn on_apply(mut self, callback: impl FnMut(&[String]) + 'static) -> Self {
        self.selection = self.selection.on_apply(callback);
        self
    }

    /// Register a callback fired on every open/close transition.
    #[must_use]
    pub fn on_open_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_open_change = Some(Box::new(callback));
        self
    }

    /// Enable or disable the search field and filtering.
    #[must_use]
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Suppress opening.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the trigger size preset.
    #[must_use]
    pub fn size(mut self, size: TriggerSize) -> Self {
        self.size = size;
        self
    }

    /// Set the field label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the trigger placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the search field placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search = self.search.with_placeholder(placeholder);
        self
    }

    /// Set the message shown when nothing matches the query.
    #[must_use]
    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Show the "Apply" footer action in multi mode.
    #[must_use]
    pub fn show_apply_button(mut self, show: bool) -> Self {
        self.show_apply_button = show;
        self
    }

    /// Maximum number of tree rows shown at once (at least 1).
    #[must_use]
    pub fn max_visible_rows(mut self, rows: usize) -> Self {
        self.max_visible_rows = rows.max(1);
        self
    }

    /// Set the guide characters used by text rendering.
    #[must_use]
    pub fn with_guides(mut self, guides: TreeGuides) -> Self {
        self.guides = guides;
        self
    }

    /// Seed the expansion set.
    #[must_use]
    pub fn with_expanded<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expansion = ExpansionSet::with_expanded(ids);
        self.rows = self.collect_rows();
        self
    }

    // --- Accessors ---

    /// Whether the popup is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether opening is suppressed.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the search field is active.
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// Current search query (always empty while closed).
    #[must_use]
    pub fn search_query(&self) -> &str {
        self.search.value()
    }

    /// Selection cardinality.
    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// Current selection.
    #[must_use]
    pub fn value(&self) -> &SelectionValue {
        self.selection.value()
    }

    /// The option index.
    #[must_use]
    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    /// Current filter result.
    #[must_use]
    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// Persisted expansion set.
    #[must_use]
    pub fn expansion(&self) -> &ExpansionSet {
        &self.expansion
    }

    /// Whether `id` is effectively expanded (explicitly or by the filter).
    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expansion
            .is_expanded(id, self.visibility.forced_expanded_ids())
    }

    /// Where keyboard focus currently sits.
    #[must_use]
    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    /// Whether the host should route document-level pointer-downs here.
    ///
    /// Only true while open; hosts subscribe on open and drop the
    /// subscription on close.
    #[must_use]
    pub fn wants_outside_pointer(&self) -> bool {
        self.is_open
    }

    /// Ids of the rendered rows, top to bottom.
    #[must_use]
    pub fn rendered_ids(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.id.as_str()).collect()
    }

    /// Id under the keyboard cursor, if any row is rendered.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        if !self.is_open {
            return None;
        }
        self.rows.get(self.cursor).map(|r| r.id.as_str())
    }

    // --- Host updates ---

    /// Replace the option forest. Expansion and selection are kept, stale
    /// ids included.
    pub fn set_options(&mut self, options: &[HierarchicalOption]) {
        let active = self.active_id().map(str::to_owned);
        self.index = TreeIndex::build(options);
        self.visibility = compute_visibility(&self.index, self.filter_query());
        self.refresh_rows(active.as_deref());
    }

    /// Feed a host-controlled value back in. `None` releases control.
    pub fn set_value(&mut self, value: Option<SelectionValue>) {
        self.selection.set_value(value);
    }

    /// Enable or disable the widget. Disabling an open popup closes it.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled && self.is_open {
            self.close(CloseReason::Api);
        }
    }

    /// Report where the host laid out the trigger and popup.
    pub fn set_layout(&mut self, trigger: Rect, popup: Rect) {
        self.trigger_area = trigger;
        self.popup_area = popup;
    }

    // --- Interaction state machine ---

    /// Open the popup. Suppressed while disabled or already open.
    pub fn open(&mut self) -> bool {
        if self.disabled {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "tree_select.open", reason = "disabled-suppressed");
            return false;
        }
        if self.is_open {
            return false;
        }
        self.is_open = true;
        self.focus = if self.searchable {
            FocusTarget::Search
        } else {
            FocusTarget::Tree
        };
        self.visibility = compute_visibility(&self.index, self.filter_query());
        self.rows = self.collect_rows();
        self.cursor = self.first_selected_row().unwrap_or(0);
        self.offset = 0;
        self.ensure_cursor_visible();

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "tree_select.open", reason = "open", rows = self.rows.len());

        if let Some(callback) = self.on_open_change.as_mut() {
            callback(true);
        }
        true
    }

    /// Close the popup, clear the query, and return focus to the trigger.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.is_open {
            return false;
        }
        #[cfg(not(feature = "tracing"))]
        let _ = reason;
        self.is_open = false;
        self.focus = FocusTarget::Trigger;
        if self.search.clear() {
            self.visibility = compute_visibility(&self.index, "");
        }
        self.rows = self.collect_rows();
        self.cursor = 0;
        self.offset = 0;

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "tree_select.close", reason = reason.as_str());

        if let Some(callback) = self.on_open_change.as_mut() {
            callback(false);
        }
        true
    }

    /// Replace the search query and re-run the filter.
    ///
    /// Ignored while closed or when search is disabled.
    pub fn set_search_query(&mut self, query: &str) -> bool {
        if !self.is_open || !self.searchable {
            return false;
        }
        self.search.set_value(query);
        self.on_query_changed();
        true
    }

    /// Flip the persisted expansion of a non-leaf node.
    ///
    /// Selection is untouched. Returns `false` for leaves and unknown ids.
    pub fn toggle_expand(&mut self, id: &str) -> bool {
        self.toggle_expand_from(id, "api")
    }

    /// Select `id` (single mode: replace and close; multi mode: toggle).
    pub fn select(&mut self, id: &str) {
        match self.selection.mode() {
            SelectionMode::Single => {
                self.selection.select(id);
                self.close(CloseReason::Commit);
            }
            SelectionMode::Multi => self.selection.toggle(id),
        }
    }

    /// Toggle `id` in the selection. In single mode this is [`select`](Self::select)
    /// and closes the popup.
    pub fn toggle(&mut self, id: &str) {
        match self.selection.mode() {
            SelectionMode::Single => self.select(id),
            SelectionMode::Multi => self.selection.toggle(id),
        }
    }

    /// Remove a chip. Works open or closed.
    pub fn remove_chip(&mut self, id: &str) -> bool {
        self.selection.remove(id)
    }

    /// Multi mode: empty the selection.
    pub fn clear_all(&mut self) -> bool {
        self.selection.clear_all()
    }

    /// Whether the apply action is enabled right now.
    #[must_use]
    pub fn can_apply(&self) -> bool {
        self.show_apply_button && self.selection.can_apply()
    }

    /// Invoke the apply step, then close. No-op when disabled.
    pub fn apply(&mut self) -> bool {
        if !self.can_apply() || !self.selection.apply() {
            return false;
        }
        self.close(CloseReason::Apply);
        true
    }

    // --- Event handling ---

    /// Handle an input event. Returns `true` if it was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) if key.is_actionable() => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Paste(text) if self.is_open && self.searchable => {
                self.search.insert_text(text);
                self.on_query_changed();
                true
            }
            Event::Focus(false) if self.is_open => self.close(CloseReason::Blur),
            _ => false,
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.is_open {
            return match key.code {
                KeyCode::Enter | KeyCode::Down => self.open(),
                _ => false,
            };
        }

        let editing = self.searchable && !self.search.value().is_empty();
        match key.code {
            KeyCode::Escape => self.close(CloseReason::Escape),
            KeyCode::Tab | KeyCode::BackTab => self.close(CloseReason::Tab),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-(self.max_visible_rows as isize)),
            KeyCode::PageDown => self.move_cursor(self.max_visible_rows as isize),
            KeyCode::Home => self.move_cursor_to(0),
            KeyCode::End => self.move_cursor_to(self.rows.len().saturating_sub(1)),
            KeyCode::Enter => self.activate_cursor(false, "keyboard"),
            KeyCode::Char(' ') if !editing && !key.ctrl() => {
                self.activate_cursor(true, "keyboard")
            }
            KeyCode::Left if !editing => self.navigate_left(),
            KeyCode::Right if !editing => self.navigate_right(),
            _ if self.searchable => match self.search.handle_key(key) {
                InputOutcome::Edited => {
                    self.on_query_changed();
                    true
                }
                InputOutcome::Moved => true,
                InputOutcome::Ignored => false,
            },
            _ => false,
        }
    }

    /// Handle a pointer event using the rects from [`set_layout`](Self::set_layout).
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_pointer_down(event.x, event.y),
            MouseEventKind::Down(_) => {
                if self.is_open && !self.hits_widget(event.x, event.y) {
                    self.close(CloseReason::Outside)
                } else {
                    false
                }
            }
            MouseEventKind::ScrollUp if self.is_open && self.popup_area.contains(event.x, event.y) => {
                self.move_cursor(-1)
            }
            MouseEventKind::ScrollDown
                if self.is_open && self.popup_area.contains(event.x, event.y) =>
            {
                self.move_cursor(1)
            }
            _ => false,
        }
    }

    fn hits_widget(&self, x: u16, y: u16) -> bool {
        self.trigger_area.contains(x, y) || (self.is_open && self.popup_area.contains(x, y))
    }

    fn handle_pointer_down(&mut self, x: u16, y: u16) -> bool {
        if self.trigger_area.contains(x, y) {
            if self.disabled {
                return false;
            }
            let column = x - self.trigger_area.x;
            if let Some(id) = self.chip_remove_hit(column) {
                return self.remove_chip(&id);
            }
            return if self.is_open {
                self.close(CloseReason::Trigger)
            } else {
                self.open()
            };
        }
        if !self.is_open {
            return false;
        }
        if !self.popup_area.contains(x, y) {
            return self.close(CloseReason::Outside);
        }

        let Some(line) = self.popup_area.row_of(y) else {
            return true;
        };
        let column = x - self.popup_area.x;
        match self.popup_lines().get(usize::from(line)) {
            Some(view::PopupLine::Row(row)) => {
                let row = *row;
                self.cursor = row;
                self.activate_cursor(false, "mouse");
            }
            Some(view::PopupLine::Footer) => {
                match view::footer_hit(column, self.show_apply_button) {
                    Some(view::FooterAction::ClearAll) => {
                        self.clear_all();
                    }
                    Some(view::FooterAction::Apply) => {
                        self.apply();
                    }
                    None => {}
                }
            }
            Some(view::PopupLine::Search) => self.focus = FocusTarget::Search,
            Some(view::PopupLine::Empty) | None => {}
        }
        true
    }

    // --- Internals ---

    fn filter_query(&self) -> &str {
        if self.searchable {
            self.search.value()
        } else {
            ""
        }
    }

    fn on_query_changed(&mut self) {
        self.visibility = compute_visibility(&self.index, self.filter_query());
        self.rows = self.collect_rows();
        self.cursor = 0;
        self.offset = 0;
    }

    fn refresh_rows(&mut self, keep: Option<&str>) {
        self.rows = self.collect_rows();
        if let Some(pos) = keep.and_then(|id| self.rows.iter().position(|r| r.id == id)) {
            self.cursor = pos;
        }
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        self.ensure_cursor_visible();
    }

    /// Depth-first list of visible rows whose ancestors are all effectively
    /// expanded.
    fn collect_rows(&self) -> Vec<Row> {
        let forced = self.visibility.forced_expanded_ids();
        let mut rows = Vec::new();
        let mut seen: AHashSet<&str> = AHashSet::new();

        let roots: Vec<&str> = self
            .index
            .roots()
            .iter()
            .map(String::as_str)
            .filter(|id| self.visibility.is_visible(id))
            .collect();
        let mut stack: Vec<(&str, Vec<bool>)> =
            roots.iter().rev().map(|id| (*id, Vec::new())).collect();

        while let Some((id, last_chain)) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let Some(node) = self.index.get(id) else {
                continue;
            };
            let expanded = !node.is_leaf() && self.expansion.is_expanded(id, forced);

            if expanded {
                let children: Vec<&str> = node
                    .child_ids()
                    .iter()
                    .map(String::as_str)
                    .filter(|c| self.visibility.is_visible(c))
                    .collect();
                let count = children.len();
                for (i, child) in children.into_iter().enumerate().rev() {
                    let mut chain = last_chain.clone();
                    chain.push(i + 1 == count);
                    stack.push((child, chain));
                }
            }

            rows.push(Row {
                id: node.id().to_owned(),
                depth: last_chain.len(),
                is_leaf: node.is_leaf(),
                expanded,
                last_chain,
            });
        }
        rows
    }

    fn first_selected_row(&self) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| self.selection.is_selected(&r.id))
    }

    fn move_cursor(&mut self, delta: isize) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        let last = self.rows.len() - 1;
        let target = self.cursor.saturating_add_signed(delta).min(last);
        self.move_cursor_to(target)
    }

    fn move_cursor_to(&mut self, target: usize) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        self.cursor = target.min(self.rows.len() - 1);
        self.ensure_cursor_visible();
        true
    }

    fn ensure_cursor_visible(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.max_visible_rows {
            self.offset = self.cursor + 1 - self.max_visible_rows;
        }
    }

    fn activate_cursor(&mut self, space: bool, source: &str) -> bool {
        let Some(row) = self.rows.get(self.cursor) else {
            return false;
        };
        let id = row.id.clone();
        if !row.is_leaf {
            if space && self.selection.mode() == SelectionMode::Multi {
                return false;
            }
            return self.toggle_expand_from(&id, source);
        }
        self.select(&id);
        true
    }

    fn navigate_left(&mut self) -> bool {
        let Some(row) = self.rows.get(self.cursor) else {
            return false;
        };
        if row.expanded && self.expansion.contains(&row.id) {
            let id = row.id.clone();
            return self.toggle_expand_from(&id, "keyboard");
        }
        let parent = self
            .index
            .get(&row.id)
            .and_then(|n| n.parent_id())
            .and_then(|p| self.rows.iter().position(|r| r.id == p));
        match parent {
            Some(pos) => self.move_cursor_to(pos),
            None => false,
        }
    }

    fn navigate_right(&mut self) -> bool {
        let Some(row) = self.rows.get(self.cursor) else {
            return false;
        };
        if row.is_leaf {
            return false;
        }
        if !row.expanded {
            let id = row.id.clone();
            return self.toggle_expand_from(&id, "keyboard");
        }
        let depth = row.depth;
        let descends = self
            .rows
            .get(self.cursor + 1)
            .is_some_and(|next| next.depth > depth);
        if descends { self.move_cursor(1) } else { false }
    }

    fn toggle_expand_from(&mut self, id: &str, source: &str) -> bool {
        match self.index.get(id) {
            Some(node) if !node.is_leaf() => {}
            _ => return false,
        }
        let active = self.active_id().map(str::to_owned);
        let expanded = self.expansion.toggle(id);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "tree_select.toggle_expand",
            id,
            action = if expanded { "expand" } else { "collapse" },
            source,
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (expanded, source);

        self.refresh_rows(active.as_deref());
        true
    }
}
