//! Reusable TUI widgets.

pub mod form;
pub mod status_bar;

pub use form::{FormRow, RowInput, draw_form, visible_rows};
pub use status_bar::{StatusBarContext, draw_status_bar};
