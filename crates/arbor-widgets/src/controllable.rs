#![forbid(unsafe_code)]

//! Controlled/uncontrolled state holder.
//!
//! When the host supplies a value it is the single source of truth and
//! writes are dropped; the host is expected to observe change notifications
//! and feed the next value back in. Without a host value the holder owns
//! the state, seeded from a default.

/// A value that is either host-controlled or internally owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controllable<T> {
    external: Option<T>,
    internal: T,
}

impl<T> Controllable<T> {
    /// Internally owned state seeded with `default`.
    #[must_use]
    pub fn uncontrolled(default: T) -> Self {
        Self {
            external: None,
            internal: default,
        }
    }

    /// Host-controlled state. `fallback` is what reads return if the host
    /// later releases control.
    #[must_use]
    pub fn controlled(value: T, fallback: T) -> Self {
        Self {
            external: Some(value),
            internal: fallback,
        }
    }

    /// Whether the host currently owns the value.
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.external.is_some()
    }

    /// Current value: the host's when controlled, else the internal one.
    #[must_use]
    pub fn get(&self) -> &T {
        self.external.as_ref().unwrap_or(&self.internal)
    }

    /// Write a new value. Ignored while controlled.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set(&mut self, next: T) -> bool {
        if self.external.is_some() {
            return false;
        }
        self.internal = next;
        true
    }

    /// Replace the host value. `None` hands ownership back to the holder.
    pub fn set_external(&mut self, value: Option<T>) {
        self.external = value;
    }
}

impl<T: Default> Default for Controllable<T> {
    fn default() -> Self {
        Self::uncontrolled(T::default())
    }
}
