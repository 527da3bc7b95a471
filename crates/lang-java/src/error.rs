use thiserror::Error;

#[derive(Error, Debug)]
pub enum JavaModelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate class: {0}")]
    DuplicateClass(String),
    #[error("Invalid type syntax: `{0}`")]
    InvalidType(String),
    #[error("Class `{class}` references unknown supertype `{supertype}`")]
    UnknownSupertype { class: String, supertype: String },
    #[error("Class `{class}` references unknown enclosing class `{enclosing}`")]
    UnknownEnclosing { class: String, enclosing: String },
    #[error("Cyclic inheritance involving `{0}`")]
    CyclicInheritance(String),
}

pub type Result<T> = std::result::Result<T, JavaModelError>;
