use serde_json::Value;

use formdeck_content::{Row, RowValue};

use crate::error::LookupError;
use crate::fields::{row_text, FieldKind, FormField, SurveyNode};
use crate::pack::{FormPack, FormVersion, Submission};

/// Which version(s) of the pack to export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VersionSelect {
    #[default]
    Latest,
    Index(usize),
    Named(String),
    All,
}

/// How header labels are resolved for each column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HeaderLang {
    /// The field's machine name (group path concatenated with its own name).
    #[default]
    MachineName,
    /// The field's label in whichever translation is available first,
    /// without consulting the translations list.
    PrimaryLabel,
    /// The label in one named language, machine name when absent.
    Language(String),
}

impl HeaderLang {
    /// `"default"` is a resolution-mode keyword, never a language name.
    pub fn from_token(token: &str) -> Self {
        if token == "default" {
            HeaderLang::PrimaryLabel
        } else {
            HeaderLang::Language(token.to_string())
        }
    }
}

/// Export configuration, validated once at the export boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub version: VersionSelect,
    pub header_lang: HeaderLang,
    /// Language used to translate stored choice names in cell values.
    /// Unset leaves stored names raw.
    pub translation: Option<String>,
    pub include_groups_in_header: bool,
}

/// One exported table: a header row plus one stringified row per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl FormPack {
    /// Walks the selected version(s) and produces header rows and data
    /// matrices. Unknown version or language selectors fail up front; missing
    /// per-submission values render as empty strings.
    pub fn export(&self, options: &ExportOptions) -> Result<Vec<Section>, LookupError> {
        match &options.version {
            VersionSelect::All => self
                .versions()
                .iter()
                .map(|version| {
                    let name = version.version_id().unwrap_or("submissions").to_string();
                    export_version(version, options, name)
                })
                .collect(),
            VersionSelect::Latest => {
                let version = self
                    .latest()
                    .ok_or_else(|| LookupError::Version("latest".to_string()))?;
                Ok(vec![export_version(version, options, "submissions".to_string())?])
            }
            VersionSelect::Index(index) => {
                let version = self
                    .version_at(*index)
                    .ok_or_else(|| LookupError::Version(index.to_string()))?;
                Ok(vec![export_version(version, options, "submissions".to_string())?])
            }
            VersionSelect::Named(name) => {
                let version = self
                    .version_named(name)
                    .ok_or_else(|| LookupError::Version(name.clone()))?;
                Ok(vec![export_version(version, options, "submissions".to_string())?])
            }
        }
    }
}

struct Column<'a> {
    header: String,
    field: Option<&'a FormField>,
}

fn export_version(
    version: &FormVersion,
    options: &ExportOptions,
    name: String,
) -> Result<Section, LookupError> {
    let translations = version.translations();

    let header_position = match &options.header_lang {
        HeaderLang::Language(language) => Some(language_position(translations, language)?),
        _ => None,
    };
    let value_position = options
        .translation
        .as_deref()
        .map(|language| language_position(translations, language))
        .transpose()?;

    let mut columns = Vec::new();
    collect_columns(version.tree(), options, header_position, &mut columns);

    let headers = columns.iter().map(|column| column.header.clone()).collect();
    let rows = version
        .submissions()
        .iter()
        .map(|submission| {
            columns
                .iter()
                .filter_map(|column| column.field)
                .map(|field| cell_value(field, submission, version, value_position))
                .collect()
        })
        .collect();

    Ok(Section { name, headers, rows })
}

fn language_position(
    translations: &[Option<String>],
    language: &str,
) -> Result<usize, LookupError> {
    translations
        .iter()
        .position(|slot| slot.as_deref() == Some(language))
        .ok_or_else(|| LookupError::Language(language.to_string()))
}

fn collect_columns<'a>(
    nodes: &'a [SurveyNode],
    options: &ExportOptions,
    header_position: Option<usize>,
    columns: &mut Vec<Column<'a>>,
) {
    for node in nodes {
        match node {
            SurveyNode::Field(field) => {
                if matches!(field.kind, FieldKind::Note) {
                    continue;
                }
                let header = header_label(
                    field.label.as_ref(),
                    field.header_name(),
                    &options.header_lang,
                    header_position,
                );
                columns.push(Column {
                    header,
                    field: Some(field),
                });
            }
            SurveyNode::Group(group) => {
                // The group contributes a header column but never a data cell.
                if options.include_groups_in_header {
                    let header = header_label(
                        group.label.as_ref(),
                        group.header_name(),
                        &options.header_lang,
                        header_position,
                    );
                    columns.push(Column {
                        header,
                        field: None,
                    });
                }
                collect_columns(&group.children, options, header_position, columns);
            }
        }
    }
}

fn header_label(
    label: Option<&RowValue>,
    machine_name: String,
    header_lang: &HeaderLang,
    header_position: Option<usize>,
) -> String {
    let resolved = match header_lang {
        HeaderLang::MachineName => None,
        HeaderLang::PrimaryLabel => label.and_then(primary_label),
        HeaderLang::Language(_) => label.and_then(|label| match label {
            RowValue::Translated(values) => header_position
                .and_then(|position| values.get(position))
                .and_then(Option::as_deref)
                .map(str::to_string),
            _ => None,
        }),
    };
    resolved.unwrap_or(machine_name)
}

fn primary_label(label: &RowValue) -> Option<String> {
    match label {
        RowValue::Text(text) => Some(text.clone()),
        RowValue::Translated(values) => values.iter().flatten().next().cloned(),
        _ => None,
    }
}

fn cell_value(
    field: &FormField,
    submission: &Submission,
    version: &FormVersion,
    value_position: Option<usize>,
) -> String {
    let stored = submission
        .get(&field.path_name())
        .or_else(|| submission.get(&field.name));
    let Some(stored) = stored else {
        return String::new();
    };
    let text = stringify(stored);

    if let (FieldKind::Select(tag), Some(position)) = (&field.kind, value_position) {
        let list_name = tag.list_name();
        let choices = &version.content().choices;
        if tag.is_multiple() {
            return text
                .split_whitespace()
                .map(|name| {
                    choice_label(choices, list_name, name, position)
                        .unwrap_or_else(|| name.to_string())
                })
                .collect::<Vec<_>>()
                .join(" ");
        }
        return choice_label(choices, list_name, &text, position).unwrap_or(text);
    }
    text
}

fn choice_label(choices: &[Row], list_name: &str, name: &str, position: usize) -> Option<String> {
    choices
        .iter()
        .find(|row| {
            row_text(row, "list_name") == Some(list_name) && row_text(row, "name") == Some(name)
        })
        .and_then(|row| row.get("label"))
        .and_then(|label| match label {
            RowValue::Translated(values) => values.get(position).cloned().flatten(),
            _ => None,
        })
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
