use thiserror::Error;

/// A fault while rendering one node. Never escapes [`super::Printer::emit`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    #[error("Text must not contain carriage returns: {0:?}")]
    CarriageReturn(String),
    #[error("Bad template placeholder `{placeholder}` in `{template}`")]
    BadPlaceholder { template: String, placeholder: String },
    #[error("Placeholder `{0}` expects a sequence argument")]
    ExpectedSequence(String),
    #[error("Placeholder `{0}` expects a single argument")]
    ExpectedScalar(String),
    #[error("Invalid declaration: {0}")]
    InvalidNode(String),
    #[error("Variable `{0}` has neither a type nor an initializer")]
    UntypedVariable(String),
}
