#![allow(missing_docs)]

pub mod columns;
pub mod content;
pub mod error;
pub mod expand;
pub mod flatten;

pub use columns::{special_columns, ColumnShape, ColumnSpec, SpecialColumn, TranslatableColumns};
pub use content::{FormContent, Row, RowValue, SelectTag, Translations};
pub use error::SchemaError;
pub use expand::{expand_content, expand_content_with, inferred_translations};
pub use flatten::flatten_content;
