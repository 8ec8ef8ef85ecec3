use indexmap::IndexMap;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::content::{FormContent, Row, RowValue, Translations};
use crate::error::SchemaError;

/// Separator grammar between a base name and its language suffix: one or two
/// colons, optionally padded with whitespace. The language itself is trimmed.
static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*:{1,2}\s*(\S.*?)\s*$").expect("separator pattern"));

/// Whether a base name may stay scalar when it carries no translations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColumnShape {
    /// A lone unsuffixed column keeps its plain string value.
    #[default]
    Scalar,
    /// Always expanded to a translation-indexed list.
    ListOnly,
}

/// One entry of the translatable column table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(default)]
    pub shape: ColumnShape,
}

impl ColumnSpec {
    pub fn scalar(name: &str) -> Self {
        ColumnSpec {
            name: name.to_string(),
            shape: ColumnShape::Scalar,
        }
    }
}

/// A flattened column recognized as translatable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialColumn {
    pub base: String,
    pub language: Option<String>,
}

/// The table of base names whose columns carry translations.
///
/// Validated once when built; bases like `media::image` legitimately contain
/// the separator, so classification tries longer bases first. Reserved
/// metadata namespaces (`bind:…`, `body::…`) are simply absent from the table
/// and therefore never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColumnSpec>", into = "Vec<ColumnSpec>")]
pub struct TranslatableColumns {
    specs: Vec<ColumnSpec>,
}

impl TranslatableColumns {
    pub fn new(mut specs: Vec<ColumnSpec>) -> Result<Self, SchemaError> {
        for (index, spec) in specs.iter().enumerate() {
            if spec.name.is_empty() {
                return Err(SchemaError::EmptyColumnName);
            }
            if specs[..index].iter().any(|other| other.name == spec.name) {
                return Err(SchemaError::DuplicateColumn(spec.name.clone()));
            }
        }
        // Longest base first, so `media::image::English` resolves against
        // `media::image` and never against a hypothetical shorter base.
        specs.sort_by(|a, b| b.name.len().cmp(&a.name.len()));
        Ok(TranslatableColumns { specs })
    }

    pub fn specs(&self) -> &[ColumnSpec] {
        &self.specs
    }

    pub fn shape(&self, base: &str) -> Option<ColumnShape> {
        self.specs
            .iter()
            .find(|spec| spec.name == base)
            .map(|spec| spec.shape)
    }

    /// Decomposes a column key into `(base, language)`. Unmatched keys return
    /// `None`; classification never fails.
    pub fn classify(&self, key: &str) -> Option<SpecialColumn> {
        for spec in &self.specs {
            if key == spec.name {
                return Some(SpecialColumn {
                    base: spec.name.clone(),
                    language: None,
                });
            }
            if let Some(rest) = key.strip_prefix(spec.name.as_str())
                && let Some(captures) = SEPARATOR.captures(rest)
            {
                return Some(SpecialColumn {
                    base: spec.name.clone(),
                    language: Some(captures[1].to_string()),
                });
            }
        }
        None
    }
}

impl Default for TranslatableColumns {
    fn default() -> Self {
        TranslatableColumns::new(vec![
            ColumnSpec::scalar("label"),
            ColumnSpec::scalar("hint"),
            ColumnSpec::scalar("constraint_message"),
            ColumnSpec::scalar("media::image"),
            ColumnSpec::scalar("media::audio"),
            ColumnSpec::scalar("media::video"),
        ])
        .expect("reference column table")
    }
}

impl TryFrom<Vec<ColumnSpec>> for TranslatableColumns {
    type Error = SchemaError;

    fn try_from(specs: Vec<ColumnSpec>) -> Result<Self, SchemaError> {
        TranslatableColumns::new(specs)
    }
}

impl From<TranslatableColumns> for Vec<ColumnSpec> {
    fn from(table: TranslatableColumns) -> Self {
        table.specs
    }
}

/// Scans the whole document and returns every distinct special column key in
/// first-seen order, together with the inferred translations ordering.
///
/// Languages enter the ordering at first encounter and are never sorted. The
/// untranslated (`None`) slot is inferred only when some row carries both the
/// bare base and a suffixed sibling of the same base.
pub fn special_columns(
    content: &FormContent,
    table: &TranslatableColumns,
) -> (IndexMap<String, SpecialColumn>, Translations) {
    let mut special = IndexMap::new();
    let mut ordering: Translations = Vec::new();

    for row in content.rows() {
        for (key, value) in row {
            if !matches!(value, RowValue::Text(_)) {
                continue;
            }
            let Some(column) = table.classify(key) else {
                continue;
            };
            match &column.language {
                Some(language) => {
                    if !ordering
                        .iter()
                        .any(|slot| slot.as_deref() == Some(language.as_str()))
                    {
                        ordering.push(Some(language.clone()));
                    }
                }
                None => {
                    if has_suffixed_sibling(row, table, &column.base)
                        && !ordering.contains(&None)
                    {
                        ordering.push(None);
                    }
                }
            }
            if !special.contains_key(key) {
                special.insert(key.clone(), column);
            }
        }
    }

    (special, ordering)
}

fn has_suffixed_sibling(row: &Row, table: &TranslatableColumns, base: &str) -> bool {
    row.iter().any(|(key, value)| {
        matches!(value, RowValue::Text(_))
            && table
                .classify(key)
                .is_some_and(|column| column.base == base && column.language.is_some())
    })
}
