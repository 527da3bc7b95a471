use mirrorgen_java::JavaModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Symbol model error: {0}")]
    Model(#[from] JavaModelError),
    #[error("Unknown root class: {0}")]
    UnknownRoot(String),
    #[error("Class {0} has inappropriate access modifiers and cannot be mirrored")]
    RootNotEligible(String),
    #[error("Expected a class but `{0}` is an interface")]
    InterfaceNotAllowed(String),
    #[error("Class `{class}` declares no method `{method}` with parameters ({params})")]
    MissingOverrideMember {
        class: String,
        method: String,
        params: String,
    },
    #[error("Too many methods in override set for `{0}`: at most 64 are supported")]
    OverrideSetTooLarge(String),
    #[error("Invalid qualified name: `{0}`")]
    InvalidQualifiedName(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MirrorError>;
