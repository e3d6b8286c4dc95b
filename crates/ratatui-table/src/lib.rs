//! `ratatui-table` is a searchable, sortable table component for ratatui.
//!
//! This is a facade over `ratatui-table-core`. Enable the `crossterm` feature to get
//! [`crossterm_input`] for converting crossterm events.
//!
//! ```no_run
//! use ratatui_table::prelude::*;
//!
//! let mut table = TableView::new();
//! table.set_data(
//!     vec![
//!         Record::new(1).with("name", "Bob"),
//!         Record::new(2).with("name", "alice"),
//!     ],
//!     vec![Column::new("name", "Name")],
//! );
//! table.toggle_sort("name");
//! assert_eq!(table.visible_ids(), vec![RecordId::Integer(2), RecordId::Integer(1)]);
//! ```
pub use ratatui_table_core::collate;
pub use ratatui_table_core::column;
pub use ratatui_table_core::error;
pub use ratatui_table_core::input;
pub use ratatui_table_core::keymap;
pub use ratatui_table_core::pipeline;
pub use ratatui_table_core::record;
pub use ratatui_table_core::render;
pub use ratatui_table_core::search;
pub use ratatui_table_core::theme;
pub use ratatui_table_core::value;
pub use ratatui_table_core::view;
pub use ratatui_table_core::viewport;

#[cfg(feature = "crossterm")]
pub use ratatui_table_core::crossterm_input;

pub mod prelude {
    pub use crate::column::Column;
    pub use crate::error::RecordError;
    pub use crate::input::InputEvent;
    pub use crate::pipeline::SortDirection;
    pub use crate::pipeline::SortState;
    pub use crate::record::Record;
    pub use crate::record::RecordId;
    pub use crate::theme::Theme;
    pub use crate::value::Value;
    pub use crate::view::Focus;
    pub use crate::view::TableAction;
    pub use crate::view::TableView;
    pub use crate::view::TableViewOptions;
}
