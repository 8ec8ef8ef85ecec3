use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single sheet row: column name to cell value, in column order.
pub type Row = IndexMap<String, RowValue>;

/// Global ordered language list; `None` is the untranslated slot.
pub type Translations = Vec<Option<String>>;

/// Structured `type` tag for select questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SelectTag {
    SelectOne(String),
    SelectMultiple(String),
}

impl SelectTag {
    /// Parses the spreadsheet shorthand (`"select_one dogs"`). Anything else
    /// is left to the caller untouched.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split_whitespace();
        let tag = match (parts.next(), parts.next(), parts.next()) {
            (Some("select_one"), Some(list), None) => SelectTag::SelectOne(list.to_string()),
            (Some("select_multiple"), Some(list), None) => {
                SelectTag::SelectMultiple(list.to_string())
            }
            _ => return None,
        };
        Some(tag)
    }

    /// The choice list this tag points at.
    pub fn list_name(&self) -> &str {
        match self {
            SelectTag::SelectOne(list) | SelectTag::SelectMultiple(list) => list,
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, SelectTag::SelectMultiple(_))
    }
}

impl fmt::Display for SelectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectTag::SelectOne(list) => write!(f, "select_one {list}"),
            SelectTag::SelectMultiple(list) => write!(f, "select_multiple {list}"),
        }
    }
}

/// One cell of a survey or choices row.
///
/// The untagged representation keeps the wire shape identical to the
/// spreadsheet interchange form: strings stay strings, expanded translations
/// are arrays aligned to the document translations list, and select tags are
/// single-key maps. Cells that are none of these (booleans, numbers) ride
/// along as `Other` and are never touched by the transforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowValue {
    Text(String),
    Translated(Vec<Option<String>>),
    Select(SelectTag),
    Other(Value),
}

impl RowValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RowValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_translated(&self) -> Option<&[Option<String>]> {
        match self {
            RowValue::Translated(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_select(&self) -> Option<&SelectTag> {
        match self {
            RowValue::Select(tag) => Some(tag),
            _ => None,
        }
    }
}

impl From<&str> for RowValue {
    fn from(text: &str) -> Self {
        RowValue::Text(text.to_string())
    }
}

/// A form document in either representation.
///
/// Equality is map equality per row, so comparisons ignore column order the
/// same way the spreadsheet interchange form does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormContent {
    #[serde(default)]
    pub survey: Vec<Row>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Row>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<Translations>,
}

impl FormContent {
    /// All rows of both sheets, survey first. Classification and the
    /// transforms always traverse in this order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.survey.iter().chain(self.choices.iter())
    }
}
