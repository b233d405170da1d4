pub mod command_handlers;

pub use command_handlers::{handle_command, parse_command, Outcome, HELP_TEXT};
