mod error;
mod indented;
mod printer;
mod template;

pub use error::EmitError;
pub use indented::{Event, IndentedText, IndentedTextBuilder};
pub use printer::{EMIT_ERROR_PLACEHOLDER, Printer, escape, escape_char};
pub use template::Arg;
