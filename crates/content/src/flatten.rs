use crate::content::{FormContent, Row, RowValue};
use crate::error::SchemaError;

/// Rewrites an expanded document back into the flattened representation.
/// Structural inverse of [`crate::expand_content`]: translation-indexed lists
/// become one suffixed column per language (`base::language`, bare `base` for
/// the untranslated slot) and select tags collapse to their shorthand string.
///
/// The document keeps its `translations` list, so flattening and re-expanding
/// reproduces the same alignment.
pub fn flatten_content(mut content: FormContent) -> Result<FormContent, SchemaError> {
    let translations = content.translations.clone();
    let survey = std::mem::take(&mut content.survey);
    content.survey = flatten_rows(survey, translations.as_deref())?;
    let choices = std::mem::take(&mut content.choices);
    content.choices = flatten_rows(choices, translations.as_deref())?;
    Ok(content)
}

fn flatten_rows(
    rows: Vec<Row>,
    translations: Option<&[Option<String>]>,
) -> Result<Vec<Row>, SchemaError> {
    rows.into_iter()
        .map(|row| flatten_row(row, translations))
        .collect()
}

fn flatten_row(row: Row, translations: Option<&[Option<String>]>) -> Result<Row, SchemaError> {
    let mut flattened = Row::with_capacity(row.len());
    for (key, value) in row {
        match value {
            RowValue::Select(tag) => {
                flattened.insert(key, RowValue::Text(tag.to_string()));
            }
            RowValue::Translated(values) => {
                let translations =
                    translations.ok_or_else(|| SchemaError::NoTranslations {
                        column: key.clone(),
                    })?;
                if values.len() != translations.len() {
                    return Err(SchemaError::TranslationCount {
                        column: key,
                        expected: translations.len(),
                        actual: values.len(),
                    });
                }
                for (slot, value) in translations.iter().zip(values) {
                    let Some(text) = value else { continue };
                    let column = match slot {
                        Some(language) => format!("{key}::{language}"),
                        None => key.clone(),
                    };
                    flattened.insert(column, RowValue::Text(text));
                }
            }
            other => {
                flattened.insert(key, other);
            }
        }
    }
    Ok(flattened)
}
