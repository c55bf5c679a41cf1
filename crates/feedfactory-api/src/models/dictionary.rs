//! Categorization ontology stored on the account document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::flex::{lenient, nullable};

/// Language used for category labels when none is requested.
pub const DEFAULT_CATEGORY_LANGUAGE: &str = "nl";

/// The category tree, as found under `categorizationOntology`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Ontology {
    #[serde(rename = "lastModified", deserialize_with = "nullable")]
    pub last_modified: String,
    #[serde(deserialize_with = "nullable")]
    pub categorizations: Vec<Categorization>,
}

/// A node of the category tree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Categorization {
    #[serde(rename = "cnetID", deserialize_with = "nullable")]
    pub cnet_id: String,
    #[serde(rename = "categorization", deserialize_with = "nullable")]
    pub name: String,
    /// Present (and non-empty) only on selectable leaves.
    #[serde(rename = "categorizationId")]
    pub id: Option<String>,
    /// Either a boolean or a non-empty string when set.
    pub deprecated: Value,
    #[serde(rename = "child", deserialize_with = "lenient")]
    pub children: Vec<Categorization>,
    #[serde(rename = "categoryTranslations", deserialize_with = "lenient")]
    pub translations: Vec<CategoryTranslation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryTranslation {
    #[serde(deserialize_with = "nullable")]
    pub lang: String,
    #[serde(deserialize_with = "nullable")]
    pub label: String,
}

impl Categorization {
    /// The category id, if this node is a selectable leaf.
    pub fn category_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn is_deprecated(&self) -> bool {
        match &self.deprecated {
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
            _ => false,
        }
    }

    /// Label in `lang`, falling back to the node name.
    pub fn label_for(&self, lang: &str) -> &str {
        self.translations
            .iter()
            .find(|t| t.lang == lang)
            .map(|t| t.label.as_str())
            .unwrap_or(&self.name)
    }
}

/// A selectable category with its parent's label, for lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatCategory {
    pub id: String,
    #[serde(rename = "cnetId")]
    pub cnet_id: String,
    pub label: String,
    pub parent: String,
}

impl Ontology {
    /// Collects every node carrying a category id, depth first, labelled in
    /// `lang`.
    pub fn flatten(&self, lang: &str) -> Vec<FlatCategory> {
        let mut out = Vec::new();
        collect(&self.categorizations, "", lang, &mut out);
        out
    }
}

fn collect(nodes: &[Categorization], parent: &str, lang: &str, out: &mut Vec<FlatCategory>) {
    for node in nodes {
        let label = node.label_for(lang);
        if let Some(id) = node.category_id() {
            out.push(FlatCategory {
                id: id.to_string(),
                cnet_id: node.cnet_id.clone(),
                label: label.to_string(),
                parent: parent.to_string(),
            });
        }
        collect(&node.children, label, lang, out);
    }
}
