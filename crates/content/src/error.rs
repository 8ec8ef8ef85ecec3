use thiserror::Error;

/// Malformed or conflicting translation declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("translatable column names must not be empty")]
    EmptyColumnName,
    #[error("duplicate translatable column '{0}' in the column table")]
    DuplicateColumn(String),
    #[error("column '{column}' uses language '{language}' which is missing from the declared translations")]
    UndeclaredLanguage { column: String, language: String },
    #[error("column '{column}' has no untranslated slot in the declared translations")]
    MissingNullSlot { column: String },
    #[error("column '{column}' holds {actual} translated values but {expected} translations are declared")]
    TranslationCount {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("column '{column}' holds translated values but the document declares no translations")]
    NoTranslations { column: String },
}
