pub mod ident;
pub mod qualified;
pub mod std_core;

pub use ident::{
    add_backticks_if_needed, add_underscores_if_needed, decimal_width, mangle_class_name,
    synthetic_parameter_name,
};
pub use qualified::QualifiedName;
pub use std_core::is_std_core_name;
