//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into pixels on
//! the terminal.  No input handling happens here.

pub mod layout;
pub mod popup;
pub mod sheet_widget;
pub mod snap;
pub mod theme;
