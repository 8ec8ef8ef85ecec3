use thiserror::Error;

/// An export option referenced something the form pack does not declare.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("version '{0}' does not exist in this form pack")]
    Version(String),
    #[error("language '{0}' is not declared by this form version")]
    Language(String),
}
