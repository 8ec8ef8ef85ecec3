#![allow(missing_docs)]

pub mod error;
pub mod export;
pub mod fields;
pub mod pack;

pub use error::LookupError;
pub use export::{ExportOptions, HeaderLang, Section, VersionSelect};
pub use fields::{build_survey_tree, FieldKind, FormField, FormGroup, SurveyNode};
pub use pack::{FormPack, FormVersion, PackData, Submission, VersionData};
