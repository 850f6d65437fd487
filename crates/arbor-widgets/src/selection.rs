#![forbid(unsafe_code)]

//! Selection state for single- and multi-select trees.
//!
//! [`SelectionController`] is oblivious to whether the host controls the
//! value: every mutation computes the next value from whatever is current,
//! stores it through a [`Controllable`], and notifies `on_change` with the
//! full next value. Ids are never checked against the index or the filter,
//! so a selection survives being filtered out of view and stale ids stay
//! until the host clears them.

use crate::controllable::Controllable;
use std::fmt;

/// Selection cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum SelectionMode {
    /// At most one id; committing a pick closes the popup.
    #[default]
    Single,
    /// Ordered list of ids; the popup stays open between picks.
    Multi,
}

/// Current selection: one optional id or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionValue {
    /// Single-mode value.
    Single(Option<String>),
    /// Multi-mode value, in selection order.
    Multi(Vec<String>),
}

impl SelectionValue {
    /// Empty value for `mode`.
    #[must_use]
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Self::Single(None),
            SelectionMode::Multi => Self::Multi(Vec::new()),
        }
    }

    /// Mode this value belongs to.
    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        match self {
            Self::Single(_) => SelectionMode::Single,
            Self::Multi(_) => SelectionMode::Multi,
        }
    }

    /// Selected ids as a slice (zero or one entry in single mode).
    #[must_use]
    pub fn ids(&self) -> &[String] {
        match self {
            Self::Single(Some(id)) => std::slice::from_ref(id),
            Self::Single(None) => &[],
            Self::Multi(ids) => ids,
        }
    }

    /// The single selected id, if this is a single-mode value.
    #[must_use]
    pub fn single(&self) -> Option<&str> {
        match self {
            Self::Single(id) => id.as_deref(),
            Self::Multi(_) => None,
        }
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids().iter().any(|s| s == id)
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids().len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    /// Coerce into `mode`: a list keeps its first id in single mode, a
    /// single id becomes a one-element list in multi mode.
    #[must_use]
    pub fn into_mode(self, mode: SelectionMode) -> Self {
        match (self, mode) {
            (Self::Multi(ids), SelectionMode::Single) => Self::Single(ids.into_iter().next()),
            (Self::Single(id), SelectionMode::Multi) => Self::Multi(id.into_iter().collect()),
            (value, _) => value,
        }
    }
}

impl From<&str> for SelectionValue {
    fn from(id: &str) -> Self {
        Self::Single(Some(id.to_owned()))
    }
}

impl From<Vec<String>> for SelectionValue {
    fn from(ids: Vec<String>) -> Self {
        Self::Multi(ids)
    }
}

impl From<Vec<&str>> for SelectionValue {
    fn from(ids: Vec<&str>) -> Self {
        Self::Multi(ids.into_iter().map(str::to_owned).collect())
    }
}

/// Called with the full next value on every selection mutation.
pub type ChangeCallback = Box<dyn FnMut(&SelectionValue)>;

/// Called with the current selection when the apply step is invoked.
pub type ApplyCallback = Box<dyn FnMut(&[String])>;

/// Owns selection mutations and change notification.
///
/// Values are stored exactly as supplied and coerced to the current mode
/// on the way out, so switching mode after supplying a value never loses
/// ids.
pub struct SelectionController {
    mode: SelectionMode,
    value: Controllable<SelectionValue>,
    /// `value` coerced to `mode`.
    current: SelectionValue,
    on_change: Option<ChangeCallback>,
    on_apply: Option<ApplyCallback>,
}

impl fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionController")
            .field("mode", &self.mode)
            .field("value", &self.current)
            .field("controlled", &self.value.is_controlled())
            .field("on_change", &self.on_change.is_some())
            .field("on_apply", &self.on_apply.is_some())
            .finish()
    }
}

impl SelectionController {
    /// Uncontrolled controller with an empty selection.
    #[must_use]
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            value: Controllable::uncontrolled(SelectionValue::empty(mode)),
            current: SelectionValue::empty(mode),
            on_change: None,
            on_apply: None,
        }
    }

    /// Seed the internally owned value.
    #[must_use]
    pub fn with_default_value(mut self, value: SelectionValue) -> Self {
        self.value.set(value);
        self.sync();
        self
    }

    /// Hand ownership of the value to the host.
    #[must_use]
    pub fn with_value(mut self, value: SelectionValue) -> Self {
        self.set_value(Some(value));
        self
    }

    /// Register the change callback.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(&SelectionValue) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Register the apply callback.
    #[must_use]
    pub fn on_apply(mut self, callback: impl FnMut(&[String]) + 'static) -> Self {
        self.on_apply = Some(Box::new(callback));
        self
    }

    /// Switch cardinality. The stored value is re-read in the new mode.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        self.sync();
    }

    /// Feed the host value back in. `None` releases control.
    pub fn set_value(&mut self, value: Option<SelectionValue>) {
        self.value.set_external(value);
        self.sync();
    }

    /// Selection cardinality.
    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &SelectionValue {
        &self.current
    }

    /// Whether the host owns the value.
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.value.is_controlled()
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.value().contains(id)
    }

    /// Single mode: make `id` the selection. In multi mode this toggles.
    pub fn select(&mut self, id: &str) {
        match self.mode {
            SelectionMode::Single => {
                self.commit(SelectionValue::Single(Some(id.to_owned())), id);
            }
            SelectionMode::Multi => self.toggle(id),
        }
    }

    /// Multi mode: remove `id` if present, otherwise append it. In single
    /// mode this selects.
    pub fn toggle(&mut self, id: &str) {
        match self.mode {
            SelectionMode::Single => self.select(id),
            SelectionMode::Multi => {
                let mut ids = self.value().ids().to_vec();
                if let Some(pos) = ids.iter().position(|s| s == id) {
                    ids.remove(pos);
                } else {
                    ids.push(id.to_owned());
                }
                self.commit(SelectionValue::Multi(ids), id);
            }
        }
    }

    /// Drop `id` from the selection (chip removal).
    ///
    /// Returns `false` without notifying when `id` was not selected.
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.is_selected(id) {
            return false;
        }
        let next = match self.value() {
            SelectionValue::Single(_) => SelectionValue::Single(None),
            SelectionValue::Multi(ids) => {
                SelectionValue::Multi(ids.iter().filter(|s| *s != id).cloned().collect())
            }
        };
        self.commit(next, id);
        true
    }

    /// Multi mode: reset to an empty list and notify, regardless of the
    /// previous size. No-op in single mode.
    pub fn clear_all(&mut self) -> bool {
        if self.mode != SelectionMode::Multi {
            return false;
        }
        self.commit(SelectionValue::Multi(Vec::new()), "");
        true
    }

    /// Whether the apply step is currently enabled.
    #[must_use]
    pub fn can_apply(&self) -> bool {
        self.mode == SelectionMode::Multi && !self.value().is_empty()
    }

    /// Invoke `on_apply` with the current selection. Leaves the value and
    /// `on_change` untouched. Disabled while the selection is empty.
    pub fn apply(&mut self) -> bool {
        if !self.can_apply() {
            return false;
        }
        let ids = self.value().ids().to_vec();
        if let Some(callback) = self.on_apply.as_mut() {
            callback(&ids);
        }
        true
    }

    fn commit(&mut self, next: SelectionValue, id: &str) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "tree_select.selection",
            mode = ?self.mode,
            id,
            selected_count = next.len(),
            controlled = self.is_controlled(),
        );
        #[cfg(not(feature = "tracing"))]
        let _ = id;

        self.value.set(next.clone());
        self.sync();
        if let Some(callback) = self.on_change.as_mut() {
            callback(&next);
        }
    }

    fn sync(&mut self) {
        self.current = self.value.get().clone().into_mode(self.mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<SelectionValue>>>, impl FnMut(&SelectionValue) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |v: &SelectionValue| sink.borrow_mut().push(v.clone()))
    }

    #[test]
    fn single_select_replaces_and_notifies() {
        let (log, cb) = recorder();
        let mut sel = SelectionController::new(SelectionMode::Single).on_change(cb);
        sel.select("a");
        sel.select("b");
        assert_eq!(sel.value().single(), Some("b"));
        assert_eq!(
            *log.borrow(),
            [SelectionValue::from("a"), SelectionValue::from("b")]
        );
    }

    #[test]
    fn multi_toggle_appends_then_removes() {
        let (log, cb) = recorder();
        let mut sel = SelectionController::new(SelectionMode::Multi).on_change(cb);
        sel.toggle("x");
        sel.toggle("y");
        sel.toggle("x");
        assert_eq!(sel.value().ids(), ["y"]);
        let log = log.borrow();
        assert_eq!(log.len(), 3);
        assert_eq!(log[1].ids(), ["x", "y"]);
    }

    #[test]
    fn clear_all_always_notifies_empty() {
        let (log, cb) = recorder();
        let mut sel = SelectionController::new(SelectionMode::Multi).on_change(cb);
        assert!(sel.clear_all());
        sel.toggle("a");
        assert!(sel.clear_all());
        let log = log.borrow();
        assert_eq!(log[0], SelectionValue::Multi(Vec::new()));
        assert_eq!(log[2], SelectionValue::Multi(Vec::new()));
    }

    #[test]
    fn clear_all_is_noop_in_single_mode() {
        let (log, cb) = recorder();
        let mut sel = SelectionController::new(SelectionMode::Single)
            .with_default_value("a".into())
            .on_change(cb);
        assert!(!sel.clear_all());
        assert_eq!(sel.value().single(), Some("a"));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn apply_is_disabled_when_empty() {
        let applied = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&applied);
        let mut sel = SelectionController::new(SelectionMode::Multi)
            .on_apply(move |ids: &[String]| sink.borrow_mut().push(ids.to_vec()));
        assert!(!sel.can_apply());
        assert!(!sel.apply());
        sel.toggle("a");
        assert!(sel.apply());
        assert_eq!(*applied.borrow(), [vec!["a".to_owned()]]);
        assert_eq!(sel.value().ids(), ["a"]);
    }

    #[test]
    fn controlled_value_is_not_stored() {
        let (log, cb) = recorder();
        let mut sel = SelectionController::new(SelectionMode::Multi)
            .with_value(vec!["a"].into())
            .on_change(cb);
        sel.toggle("b");
        // Callback saw the proposed value, but the host has not fed it back.
        assert_eq!(log.borrow()[0].ids(), ["a", "b"]);
        assert_eq!(sel.value().ids(), ["a"]);
        sel.set_value(Some(vec!["a", "b"].into()));
        assert_eq!(sel.value().ids(), ["a", "b"]);
    }

    #[test]
    fn remove_only_notifies_when_present() {
        let (log, cb) = recorder();
        let mut sel = SelectionController::new(SelectionMode::Multi)
            .with_default_value(vec!["root-2"].into())
            .on_change(cb);
        assert!(!sel.remove("other"));
        assert!(sel.remove("root-2"));
        assert_eq!(*log.borrow(), [SelectionValue::Multi(Vec::new())]);
    }

    #[test]
    fn out_of_mode_values_are_coerced() {
        let sel = SelectionController::new(SelectionMode::Single)
            .with_default_value(vec!["a", "b"].into());
        assert_eq!(sel.value().single(), Some("a"));

        let sel = SelectionController::new(SelectionMode::Multi).with_value("z".into());
        assert_eq!(sel.value().ids(), ["z"]);
    }

    #[test]
    fn set_mode_coerces_value() {
        let mut sel = SelectionController::new(SelectionMode::Single)
            .with_default_value("a".into());
        sel.set_mode(SelectionMode::Multi);
        assert_eq!(sel.mode(), SelectionMode::Multi);
        assert_eq!(*sel.value(), SelectionValue::Multi(vec!["a".to_owned()]));
    }

    #[test]
    fn set_mode_after_value_keeps_every_id() {
        let mut sel = SelectionController::new(SelectionMode::Single)
            .with_value(vec!["a1", "b"].into());
        assert_eq!(sel.value().single(), Some("a1"));
        sel.set_mode(SelectionMode::Multi);
        assert_eq!(sel.value().ids(), ["a1", "b"]);

        let mut sel = SelectionController::new(SelectionMode::Single)
            .with_default_value(vec!["a1", "b"].into());
        sel.set_mode(SelectionMode::Multi);
        assert_eq!(sel.value().ids(), ["a1", "b"]);
        sel.set_mode(SelectionMode::Single);
        assert_eq!(sel.value().single(), Some("a1"));
    }

    #[test]
    fn stale_ids_are_kept() {
        let mut sel = SelectionController::new(SelectionMode::Multi)
            .with_default_value(vec!["gone"].into());
        sel.toggle("new");
        assert_eq!(sel.value().ids(), ["gone", "new"]);
    }
}
