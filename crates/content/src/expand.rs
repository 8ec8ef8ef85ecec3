use indexmap::IndexMap;

use crate::columns::{special_columns, ColumnShape, SpecialColumn, TranslatableColumns};
use crate::content::{FormContent, Row, RowValue, SelectTag, Translations};
use crate::error::SchemaError;

/// Rewrites a flattened document into the expanded representation using the
/// reference column table. Returns a new document; the input is consumed.
///
/// Idempotent: already-expanded values pass through untouched, so feeding the
/// output back in yields an equal document.
pub fn expand_content(content: FormContent) -> Result<FormContent, SchemaError> {
    expand_content_with(content, &TranslatableColumns::default())
}

/// Same as [`expand_content`] with an explicit column table.
pub fn expand_content_with(
    mut content: FormContent,
    table: &TranslatableColumns,
) -> Result<FormContent, SchemaError> {
    let (_, inferred) = special_columns(&content, table);

    // A document-supplied ordering takes precedence; inference only fills the
    // gap, and only when a language-suffixed column actually exists.
    let translations = match (&content.translations, inferred) {
        (Some(explicit), _) => Some(explicit.clone()),
        (None, inferred) if !inferred.is_empty() => Some(inferred),
        (None, _) => None,
    };

    let survey = std::mem::take(&mut content.survey);
    content.survey = expand_rows(survey, table, translations.as_deref())?;
    let choices = std::mem::take(&mut content.choices);
    content.choices = expand_rows(choices, table, translations.as_deref())?;
    content.translations = translations;
    Ok(content)
}

fn expand_rows(
    rows: Vec<Row>,
    table: &TranslatableColumns,
    translations: Option<&[Option<String>]>,
) -> Result<Vec<Row>, SchemaError> {
    rows.into_iter()
        .map(|row| expand_row(row, table, translations))
        .collect()
}

fn expand_row(
    row: Row,
    table: &TranslatableColumns,
    translations: Option<&[Option<String>]>,
) -> Result<Row, SchemaError> {
    // Participating columns hold plain text; anything already structured is
    // passed through so partial or repeated expansion cannot corrupt it.
    let mut groups: IndexMap<String, Vec<(SpecialColumn, String)>> = IndexMap::new();
    for (key, value) in &row {
        if let RowValue::Text(text) = value
            && let Some(column) = table.classify(key)
        {
            groups
                .entry(column.base.clone())
                .or_default()
                .push((column, text.clone()));
        }
    }

    let mut expanded = Row::with_capacity(row.len());
    let mut merged: Vec<String> = Vec::new();
    for (key, value) in row {
        if key == "type"
            && let RowValue::Text(text) = &value
            && let Some(tag) = SelectTag::parse(text)
        {
            expanded.insert(key, RowValue::Select(tag));
            continue;
        }

        let participates = matches!(&value, RowValue::Text(_))
            && table.classify(&key).is_some();
        if !participates {
            expanded.insert(key, value);
            continue;
        }

        let base = table.classify(&key).map(|column| column.base).unwrap_or(key.clone());
        if merged.contains(&base) {
            continue;
        }
        let columns = groups.get(&base).map(Vec::as_slice).unwrap_or(&[]);
        let value = merge_columns(&base, columns, table, translations)?;
        expanded.insert(base.clone(), value);
        merged.push(base);
    }
    Ok(expanded)
}

fn merge_columns(
    base: &str,
    columns: &[(SpecialColumn, String)],
    table: &TranslatableColumns,
    translations: Option<&[Option<String>]>,
) -> Result<RowValue, SchemaError> {
    let shape = table.shape(base).unwrap_or_default();

    // One bare column with no suffixed sibling keeps scalar semantics.
    if let [(column, text)] = columns
        && column.language.is_none()
        && shape == ColumnShape::Scalar
    {
        return Ok(RowValue::Text(text.clone()));
    }

    let Some(translations) = translations else {
        // Only reachable for a lone ListOnly bare column in a document with
        // no translations at all.
        let values = columns.iter().map(|(_, text)| Some(text.clone())).collect();
        return Ok(RowValue::Translated(values));
    };

    let mut values: Vec<Option<String>> = vec![None; translations.len()];
    for (column, text) in columns {
        let position = match &column.language {
            Some(language) => translations
                .iter()
                .position(|slot| slot.as_deref() == Some(language.as_str()))
                .ok_or_else(|| SchemaError::UndeclaredLanguage {
                    column: base.to_string(),
                    language: language.clone(),
                })?,
            None => translations
                .iter()
                .position(Option::is_none)
                .ok_or_else(|| SchemaError::MissingNullSlot {
                    column: base.to_string(),
                })?,
        };
        values[position] = Some(text.clone());
    }
    Ok(RowValue::Translated(values))
}

/// The document-level translations a flattened document would expand to,
/// without transforming it.
pub fn inferred_translations(content: &FormContent) -> Option<Translations> {
    if let Some(explicit) = &content.translations {
        return Some(explicit.clone());
    }
    let (_, inferred) = special_columns(content, &TranslatableColumns::default());
    (!inferred.is_empty()).then_some(inferred)
}
