#![forbid(unsafe_code)]

//! Presentation for [`TreeSelect`]: accessibility view models and a
//! line-oriented text renderer.
//!
//! The view models mirror the ARIA combobox/tree contract so a host can map
//! them onto whatever element tree it renders. The text renderer produces
//! one `String` per cell row, truncated by display width.

use super::TreeSelect;
use crate::selection::{SelectionMode, SelectionValue};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const CLEAR_ALL_LABEL: &str = "[Clear all]";
const APPLY_LABEL: &str = "[Apply]";

/// Guide character styles for tree rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeGuides {
    /// ASCII guides: `|`, `+--`, `` `-- ``.
    Ascii,
    /// Unicode box-drawing characters (default).
    #[default]
    Unicode,
    /// Bold Unicode box-drawing characters.
    Bold,
    /// Rounded Unicode characters.
    Rounded,
}

impl TreeGuides {
    /// Vertical continuation (ancestor has siblings below).
    #[must_use]
    pub const fn vertical(&self) -> &str {
        match self {
            Self::Ascii => "|   ",
            Self::Unicode | Self::Rounded => "\u{2502}   ",
            Self::Bold => "\u{2503}   ",
        }
    }

    /// Branch guide (item has siblings below).
    #[must_use]
    pub const fn branch(&self) -> &str {
        match self {
            Self::Ascii => "+-- ",
            Self::Unicode | Self::Rounded => "\u{251C}\u{2500}\u{2500} ",
            Self::Bold => "\u{2523}\u{2501}\u{2501} ",
        }
    }

    /// Last-item guide (no siblings below).
    #[must_use]
    pub const fn last(&self) -> &str {
        match self {
            Self::Ascii => "`-- ",
            Self::Unicode => "\u{2514}\u{2500}\u{2500} ",
            Self::Bold => "\u{2517}\u{2501}\u{2501} ",
            Self::Rounded => "\u{2570}\u{2500}\u{2500} ",
        }
    }

    /// Empty indentation (no guide needed).
    #[must_use]
    pub const fn space(&self) -> &str {
        "    "
    }

    /// Guide prefix for a row given its `is_last` chain.
    #[must_use]
    pub fn prefix(&self, last_chain: &[bool]) -> String {
        let depth = last_chain.len();
        let mut out = String::with_capacity(depth * 4);
        for (d, &is_last) in last_chain.iter().enumerate() {
            let guide = if d + 1 == depth {
                if is_last { self.last() } else { self.branch() }
            } else if is_last {
                self.space()
            } else {
                self.vertical()
            };
            out.push_str(guide);
        }
        out
    }
}

/// Accessibility model of the trigger button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerView {
    /// Always `"combobox"`.
    pub role: &'static str,
    /// Always `"tree"`.
    pub aria_haspopup: &'static str,
    /// Mirrors the open state.
    pub aria_expanded: bool,
    /// Whether opening is suppressed.
    pub aria_disabled: bool,
    /// Field label, if any.
    pub label: Option<String>,
    /// What the trigger currently shows.
    pub summary: TriggerSummary,
}

/// Trigger content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerSummary {
    /// Nothing selected.
    Placeholder(String),
    /// Single-mode selection.
    Single {
        /// Selected id.
        id: String,
        /// Node label, or the id itself when stale.
        label: String,
    },
    /// Multi-mode selection, in selection order.
    Chips(Vec<ChipView>),
}

/// One removable chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipView {
    /// Selected id.
    pub id: String,
    /// Node label, or the id itself when stale.
    pub label: String,
    /// Whether the id is missing from the current option tree.
    pub stale: bool,
}

/// Accessibility model of the open popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeView {
    /// Always `"tree"`.
    pub role: &'static str,
    /// Set in multi mode.
    pub aria_multiselectable: bool,
    /// Id of the row under the keyboard cursor.
    pub aria_activedescendant: Option<String>,
    /// Rendered rows, top to bottom.
    pub items: Vec<TreeItemView>,
    /// Present when the filter left nothing visible.
    pub empty_message: Option<String>,
}

/// Accessibility model of one rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItemView {
    /// Node id.
    pub id: String,
    /// Node label.
    pub label: String,
    /// Always `"treeitem"`.
    pub role: &'static str,
    /// 1-based nesting level.
    pub aria_level: usize,
    /// `None` for leaves, otherwise the effective expansion.
    pub aria_expanded: Option<bool>,
    /// Whether the node is selected.
    pub aria_selected: bool,
    /// Whether the keyboard cursor is on this row.
    pub active: bool,
}

/// Footer actions shown in multi mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterView {
    /// "Clear all" is enabled when something is selected.
    pub clear_all_enabled: bool,
    /// Whether the "Apply" action is shown at all.
    pub apply_visible: bool,
    /// "Apply" is enabled when shown and something is selected.
    pub apply_enabled: bool,
}

/// Logical content of one popup line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PopupLine {
    Search,
    Row(usize),
    Empty,
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FooterAction {
    ClearAll,
    Apply,
}

/// Which footer action sits under `column`.
pub(crate) fn footer_hit(column: u16, show_apply: bool) -> Option<FooterAction> {
    let column = usize::from(column);
    let clear_end = CLEAR_ALL_LABEL.width();
    if column < clear_end {
        return Some(FooterAction::ClearAll);
    }
    let apply_start = clear_end + 1;
    if show_apply && column >= apply_start && column < apply_start + APPLY_LABEL.width() {
        return Some(FooterAction::Apply);
    }
    None
}

/// Layout of one chip on the trigger line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChipSlot {
    id: String,
    text: String,
    remove_col: usize,
}

/// Truncate `text` to `max` cells, ending with an ellipsis when cut.
fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_owned();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('\u{2026}');
    out
}

fn pad_to_width(mut text: String, width: usize) -> String {
    let current = text.width();
    if current < width {
        text.push_str(&" ".repeat(width - current));
    }
    text
}

impl TreeSelect {
    /// Field label, if any.
    #[must_use]
    pub fn field_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn display_label(&self, id: &str) -> (String, bool) {
        match self.index.label(id) {
            Some(label) => (label.to_owned(), false),
            None => (id.to_owned(), true),
        }
    }

    /// Accessibility model of the trigger.
    #[must_use]
    pub fn trigger_view(&self) -> TriggerView {
        let summary = match self.selection.value() {
            SelectionValue::Single(Some(id)) => {
                let (label, _) = self.display_label(id);
                TriggerSummary::Single {
                    id: id.clone(),
                    label,
                }
            }
            SelectionValue::Multi(ids) if !ids.is_empty() => TriggerSummary::Chips(
                ids.iter()
                    .map(|id| {
                        let (label, stale) = self.display_label(id);
                        ChipView {
                            id: id.clone(),
                            label,
                            stale,
                        }
                    })
                    .collect(),
            ),
            _ => TriggerSummary::Placeholder(self.placeholder.clone()),
        };

        TriggerView {
            role: "combobox",
            aria_haspopup: "tree",
            aria_expanded: self.is_open,
            aria_disabled: self.disabled,
            label: self.label.clone(),
            summary,
        }
    }

    /// Accessibility model of the popup tree. `None` while closed.
    #[must_use]
    pub fn tree_view(&self) -> Option<TreeView> {
        if !self.is_open {
            return None;
        }
        let items = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| TreeItemView {
                id: row.id.clone(),
                label: self.index.label(&row.id).unwrap_or_default().to_owned(),
                role: "treeitem",
                aria_level: row.depth + 1,
                aria_expanded: (!row.is_leaf).then_some(row.expanded),
                aria_selected: self.selection.is_selected(&row.id),
                active: i == self.cursor,
            })
            .collect();

        Some(TreeView {
            role: "tree",
            aria_multiselectable: self.selection.mode() == SelectionMode::Multi,
            aria_activedescendant: self.active_id().map(str::to_owned),
            items,
            empty_message: self
                .visibility
                .is_empty()
                .then(|| self.empty_message.clone()),
        })
    }

    /// Footer actions. `None` unless open in multi mode.
    #[must_use]
    pub fn footer_view(&self) -> Option<FooterView> {
        if !self.is_open || self.selection.mode() != SelectionMode::Multi {
            return None;
        }
        Some(FooterView {
            clear_all_enabled: !self.selection.value().is_empty(),
            apply_visible: self.show_apply_button,
            apply_enabled: self.can_apply(),
        })
    }

    pub(crate) fn popup_lines(&self) -> Vec<PopupLine> {
        if !self.is_open {
            return Vec::new();
        }
        let mut lines = Vec::new();
        if self.searchable {
            lines.push(PopupLine::Search);
        }
        if self.rows.is_empty() {
            lines.push(PopupLine::Empty);
        } else {
            let end = (self.offset + self.max_visible_rows).min(self.rows.len());
            lines.extend((self.offset..end).map(PopupLine::Row));
        }
        if self.selection.mode() == SelectionMode::Multi {
            lines.push(PopupLine::Footer);
        }
        lines
    }

    fn chip_slots(&self) -> Vec<ChipSlot> {
        let SelectionValue::Multi(ids) = self.selection.value() else {
            return Vec::new();
        };
        let mut col = usize::from(self.size.padding());
        ids.iter()
            .map(|id| {
                let (label, _) = self.display_label(id);
                let text = format!("[{label} \u{00D7}]");
                let width = text.width();
                let slot = ChipSlot {
                    id: id.clone(),
                    text,
                    remove_col: col + width - 2,
                };
                col += width + 1;
                slot
            })
            .collect()
    }

    /// Id of the chip whose remove control sits at `column` of the trigger.
    ///
    /// Controls hidden by truncation or the ellipsis never hit.
    pub(crate) fn chip_remove_hit(&self, column: u16) -> Option<String> {
        let width = usize::from(self.trigger_area.width);
        let pad = usize::from(self.size.padding());
        let chrome = pad * 2 + 2;
        if width <= chrome {
            return None;
        }
        let avail = width - chrome;
        let slots = self.chip_slots();
        let body = slots
            .iter()
            .map(|slot| slot.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let shown = if body.width() > avail {
            truncate_to_width(&body, avail).width().saturating_sub(1)
        } else {
            body.width()
        };
        let limit = pad + shown;
        let column = usize::from(column);
        slots
            .into_iter()
            .find(|slot| slot.remove_col == column && slot.remove_col < limit)
            .map(|slot| slot.id)
    }

    /// Render the trigger line at `width` cells.
    #[must_use]
    pub fn render_trigger(&self, width: u16) -> String {
        let width = usize::from(width);
        let pad = usize::from(self.size.padding());
        let arrow = if self.is_open { "\u{25B4}" } else { "\u{25BE}" };

        let body = match self.trigger_view().summary {
            TriggerSummary::Placeholder(text) => text,
            TriggerSummary::Single { label, .. } => label,
            TriggerSummary::Chips(_) => self
                .chip_slots()
                .into_iter()
                .map(|slot| slot.text)
                .collect::<Vec<_>>()
                .join(" "),
        };

        let chrome = pad * 2 + 2;
        if width <= chrome {
            return truncate_to_width(&format!("{body} {arrow}"), width);
        }
        let body = pad_to_width(truncate_to_width(&body, width - chrome), width - chrome);
        format!("{0}{body} {arrow}{0}", " ".repeat(pad))
    }

    /// Trigger line followed by the popup lines while open.
    #[must_use]
    pub fn render_lines(&self, width: u16) -> Vec<String> {
        let mut lines = vec![self.render_trigger(width)];
        lines.extend(self.render_popup(width));
        lines
    }

    /// Render the popup lines at `width` cells. Empty while closed.
    #[must_use]
    pub fn render_popup(&self, width: u16) -> Vec<String> {
        let width = usize::from(width);
        self.popup_lines()
            .into_iter()
            .map(|line| {
                let text = match line {
                    PopupLine::Search => {
                        if self.search.value().is_empty() {
                            self.search.placeholder().to_owned()
                        } else {
                            self.search.value().to_owned()
                        }
                    }
                    PopupLine::Row(i) => self.render_row(i),
                    PopupLine::Empty => self.empty_message.clone(),
                    PopupLine::Footer => {
                        if self.show_apply_button {
                            format!("{CLEAR_ALL_LABEL} {APPLY_LABEL}")
                        } else {
                            CLEAR_ALL_LABEL.to_owned()
                        }
                    }
                };
                truncate_to_width(&text, width)
            })
            .collect()
    }

    fn render_row(&self, i: usize) -> String {
        let Some(row) = self.rows.get(i) else {
            return String::new();
        };
        let mut line = String::new();
        line.push_str(if i == self.cursor { "> " } else { "  " });
        line.push_str(&self.guides.prefix(&row.last_chain));

        let selected = self.selection.is_selected(&row.id);
        if !row.is_leaf {
            line.push_str(if row.expanded { "\u{25BE} " } else { "\u{25B8} " });
        } else if self.selection.mode() == SelectionMode::Multi {
            line.push_str(if selected { "[x] " } else { "[ ] " });
        }
        line.push_str(self.index.label(&row.id).unwrap_or_default());
        if selected && self.selection.mode() == SelectionMode::Single {
            line.push_str(" \u{2713}");
        }
        line
    }
}
