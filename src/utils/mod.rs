pub(crate) mod output;
pub(crate) mod terminal;

// Public API - utilities used by commands
pub use output::{clear_transient, emit_line, show_transient, CLEAR_LINE};
pub use terminal::{set_terminal_title, set_terminal_title_and_flush};
