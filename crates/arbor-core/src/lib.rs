#![forbid(unsafe_code)]

//! Core: input events and geometry for Arbor widgets.
//!
//! # Role in Arbor
//! `arbor-core` is the input layer. It owns the normalized event types that
//! widgets consume and the rectangle type hosts use to report layout back to
//! widgets (for hit testing and outside-pointer dismissal).
//!
//! Nothing in this crate performs I/O; hosts translate their native input
//! (terminal, browser, test script) into [`event::Event`] values.

pub mod event;
pub mod geometry;
