use formdeck_content::{FormContent, Row, RowValue, SelectTag};

/// What a data field holds, as far as export cares.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Display-only row, never exported.
    Note,
    Select(SelectTag),
    Other(String),
}

/// One data row of the survey sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: Option<RowValue>,
    pub kind: FieldKind,
    /// Ancestor group names, outermost first.
    pub path: Vec<String>,
}

impl FormField {
    /// Submission lookup key: slash-joined group path.
    pub fn path_name(&self) -> String {
        join_path(&self.path, &self.name, "/")
    }

    /// Header machine name: ancestor group names concatenated with the
    /// field's own name, no separator.
    pub fn header_name(&self) -> String {
        join_path(&self.path, &self.name, "")
    }
}

/// A structural group row and the subtree it nests.
#[derive(Debug, Clone, PartialEq)]
pub struct FormGroup {
    pub name: String,
    pub label: Option<RowValue>,
    pub path: Vec<String>,
    pub children: Vec<SurveyNode>,
}

impl FormGroup {
    pub fn header_name(&self) -> String {
        join_path(&self.path, &self.name, "")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurveyNode {
    Field(FormField),
    Group(FormGroup),
}

fn join_path(path: &[String], name: &str, separator: &str) -> String {
    if path.is_empty() {
        return name.to_string();
    }
    let mut joined = path.join(separator);
    joined.push_str(separator);
    joined.push_str(name);
    joined
}

pub(crate) fn row_text<'a>(row: &'a Row, key: &str) -> Option<&'a str> {
    row.get(key).and_then(RowValue::as_text)
}

enum RowMark {
    BeginGroup,
    EndGroup,
    Field(FieldKind),
}

fn mark(row: &Row) -> RowMark {
    match row.get("type") {
        Some(RowValue::Select(tag)) => RowMark::Field(FieldKind::Select(tag.clone())),
        Some(RowValue::Text(text)) => match text.as_str() {
            "begin group" | "begin_group" => RowMark::BeginGroup,
            "end group" | "end_group" => RowMark::EndGroup,
            "note" => RowMark::Field(FieldKind::Note),
            other => {
                if let Some(tag) = SelectTag::parse(other) {
                    RowMark::Field(FieldKind::Select(tag))
                } else {
                    RowMark::Field(FieldKind::Other(other.to_string()))
                }
            }
        },
        _ => RowMark::Field(FieldKind::Other(String::new())),
    }
}

/// Builds the nested field tree from an expanded survey sheet.
///
/// Tolerant of sheet damage: stray `end group` markers are ignored, groups
/// left open are closed at the end of the sheet, and unnamed data rows are
/// dropped since no submission key can address them.
pub fn build_survey_tree(content: &FormContent) -> Vec<SurveyNode> {
    let mut root: Vec<SurveyNode> = Vec::new();
    let mut stack: Vec<FormGroup> = Vec::new();

    for row in &content.survey {
        match mark(row) {
            RowMark::BeginGroup => {
                let path: Vec<String> = stack.iter().map(|group| group.name.clone()).collect();
                stack.push(FormGroup {
                    name: row_text(row, "name").unwrap_or_default().to_string(),
                    label: row.get("label").cloned(),
                    path,
                    children: Vec::new(),
                });
            }
            RowMark::EndGroup => {
                if let Some(group) = stack.pop() {
                    attach(&mut root, &mut stack, SurveyNode::Group(group));
                }
            }
            RowMark::Field(kind) => {
                let Some(name) = row_text(row, "name") else {
                    continue;
                };
                let field = FormField {
                    name: name.to_string(),
                    label: row.get("label").cloned(),
                    kind,
                    path: stack.iter().map(|group| group.name.clone()).collect(),
                };
                attach(&mut root, &mut stack, SurveyNode::Field(field));
            }
        }
    }

    while let Some(group) = stack.pop() {
        attach(&mut root, &mut stack, SurveyNode::Group(group));
    }
    root
}

fn attach(root: &mut Vec<SurveyNode>, stack: &mut [FormGroup], node: SurveyNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.push(node),
    }
}
