use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use formdeck_content::{expand_content, FormContent, SchemaError};

use crate::fields::{build_survey_tree, SurveyNode};

/// One collected submission, keyed by field path.
pub type Submission = IndexMap<String, Value>;

/// Wire shape of a single form version: the content sheets plus whatever
/// submissions were collected against them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub content: FormContent,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submissions: Vec<Submission>,
}

/// Wire shape of a whole form pack.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_string: Option<String>,
    #[serde(default)]
    pub versions: Vec<VersionData>,
}

/// A normalized snapshot of one form revision.
///
/// Content is expanded on construction, so the field tree and the exporter
/// only ever see the translation-indexed representation.
#[derive(Debug, Clone)]
pub struct FormVersion {
    version_id: Option<String>,
    content: FormContent,
    tree: Vec<SurveyNode>,
    submissions: Vec<Submission>,
}

impl FormVersion {
    pub fn from_data(data: VersionData) -> Result<Self, SchemaError> {
        let content = expand_content(data.content)?;
        let tree = build_survey_tree(&content);
        Ok(FormVersion {
            version_id: data.version,
            content,
            tree,
            submissions: data.submissions,
        })
    }

    pub fn version_id(&self) -> Option<&str> {
        self.version_id.as_deref()
    }

    pub fn content(&self) -> &FormContent {
        &self.content
    }

    pub fn tree(&self) -> &[SurveyNode] {
        &self.tree
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn translations(&self) -> &[Option<String>] {
        self.content.translations.as_deref().unwrap_or_default()
    }
}

/// An ordered sequence of form versions sharing one identity.
#[derive(Debug, Clone)]
pub struct FormPack {
    title: Option<String>,
    id_string: Option<String>,
    versions: Vec<FormVersion>,
}

impl FormPack {
    pub fn from_data(data: PackData) -> Result<Self, SchemaError> {
        let versions = data
            .versions
            .into_iter()
            .map(FormVersion::from_data)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FormPack {
            title: data.title,
            id_string: data.id_string,
            versions,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn id_string(&self) -> Option<&str> {
        self.id_string.as_deref()
    }

    pub fn versions(&self) -> &[FormVersion] {
        &self.versions
    }

    pub fn version_at(&self, index: usize) -> Option<&FormVersion> {
        self.versions.get(index)
    }

    pub fn version_named(&self, name: &str) -> Option<&FormVersion> {
        self.versions
            .iter()
            .find(|version| version.version_id() == Some(name))
    }

    pub fn latest(&self) -> Option<&FormVersion> {
        self.versions.last()
    }
}
