//! Generates mirror-language declarations for a closure of Java classes.
//!
//! [`driver::MirrorGenerator`] is the entry point: it walks everything the
//! roots reach, settles renames program-wide and renders one compilation
//! unit per class through [`emit::Printer`].

pub mod config;
pub mod driver;
pub mod emit;
pub mod error;
pub mod logging;
pub mod naming;
pub mod tree;

pub use config::{GenerationConfig, GenerationMode};
pub use driver::{GenerationOutput, MirrorGenerator};
pub use error::{MirrorError, Result};
