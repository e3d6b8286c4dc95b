//! `ratatui-table-core` provides a searchable, sortable table view for terminal UIs.
//!
//! The table renders an in-memory set of [`record::Record`]s through a list of
//! [`column::Column`] descriptors. Displayed rows are derived by a pure pipeline
//! ([`pipeline::derive_rows`]): sort on the active column, then keep the rows where any column's
//! text contains the search term.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: all derivation runs synchronously on the caller's thread.
//! - Search and sort state are owned by the view. [`view::TableAction`] only tells the caller
//!   what happened so it can decide whether to redraw.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-table`. Useful entry points:
//! - [`view::TableView`]: the widget.
//! - [`record::records_from_json_str`]: load records from a JSON array.
//! - [`pipeline`]: the sort/filter functions, usable without the widget.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod render;
pub mod viewport;

pub mod collate;
pub mod column;
pub mod error;
pub mod input;
pub mod keymap;
pub mod pipeline;
pub mod record;
pub mod search;
pub mod value;
pub mod view;
