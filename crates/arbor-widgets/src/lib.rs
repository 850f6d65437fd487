#![forbid(unsafe_code)]

//! Hierarchical selection widgets for Arbor.
//!
//! # Role in Arbor
//! `arbor-widgets` holds the tree-select combobox and the pieces it is
//! built from. Each piece is usable on its own:
//!
//! - [`tree_index`]: flattens a nested option forest into an id-keyed index.
//! - [`filter`]: case-insensitive substring search that keeps the ancestors
//!   of every match visible and forced open.
//! - [`expansion`]: the persisted set of user-expanded nodes.
//! - [`controllable`] and [`selection`]: single/multi selection that the
//!   host may own (controlled) or leave to the widget (uncontrolled).
//! - [`search_input`]: the grapheme-aware search field.
//! - [`tree_select`]: the open/closed interaction machine, keyboard and
//!   pointer handling, accessibility view models and text rendering.
//! - [`config`]: the configuration surface as data, loadable from TOML or
//!   JSON with the `config` feature.
//!
//! # Feature flags
//! - `config`: serde derives plus TOML/JSON loaders.
//! - `tracing`: structured debug events for expansion, selection, open and
//!   close, and a span around every filter pass.

pub mod config;
pub mod controllable;
pub mod expansion;
pub mod filter;
pub mod search_input;
pub mod selection;
pub mod tree_index;
pub mod tree_select;
