//! Ontology and category output formatting.

use feedfactory_api::models::{Categorization, FlatCategory, Ontology};

use super::helpers::{render_table, truncate_str};

/// Formats the category tree, two spaces of indent per level.
pub fn format_ontology_tree(ontology: &Ontology) -> String {
    let mut out = String::new();
    if !ontology.last_modified.is_empty() {
        out.push_str(&format!("Last modified: {}\n\n", ontology.last_modified));
    }
    for node in &ontology.categorizations {
        push_node(&mut out, node, 0);
    }
    out
}

fn push_node(out: &mut String, node: &Categorization, depth: usize) {
    let deprecated = if node.is_deprecated() {
        " [DEPRECATED]"
    } else {
        ""
    };
    out.push_str(&format!(
        "{}{}  {} (ID: {}){}\n",
        "  ".repeat(depth),
        node.cnet_id,
        node.name,
        node.category_id().unwrap_or("-"),
        deprecated
    ));
    for child in &node.children {
        push_node(out, child, depth + 1);
    }
}

/// Formats selectable categories as a table with a total.
pub fn format_categories_table(categories: &[FlatCategory], use_colors: bool) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|c| {
            vec![
                c.id.clone(),
                c.cnet_id.clone(),
                truncate_str(&c.label, 40),
                truncate_str(&c.parent, 30),
            ]
        })
        .collect();

    let mut out = render_table(&["ID", "CNET_ID", "LABEL", "PARENT"], &rows, use_colors);
    out.push_str(&format!("\nTotal: {} categories\n", categories.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ontology() -> Ontology {
        serde_json::from_value(json!({
            "lastModified": "2026-01-01",
            "categorizations": [{
                "cnetID": "1",
                "categorization": "Music",
                "categoryTranslations": [{"lang": "nl", "label": "Muziek"}],
                "child": [
                    {"cnetID": "1.1", "categorization": "Jazz", "categorizationId": "c-11"},
                    {"cnetID": "1.2", "categorization": "Polka", "categorizationId": "c-12", "deprecated": true}
                ]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_tree_indents_children() {
        let out = format_ontology_tree(&ontology());
        assert_eq!(
            out,
            "Last modified: 2026-01-01\n\n\
             1  Music (ID: -)\n  \
             1.1  Jazz (ID: c-11)\n  \
             1.2  Polka (ID: c-12) [DEPRECATED]\n"
        );
    }

    #[test]
    fn test_categories_table_uses_translated_parent() {
        let categories = ontology().flatten("nl");
        let out = format_categories_table(&categories, false);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("ID"));
        assert!(lines[2].starts_with("c-11"));
        assert!(lines[2].ends_with("Muziek"));
        assert!(out.ends_with("\nTotal: 2 categories\n"));
    }

    #[test]
    fn test_no_categories() {
        assert_eq!(format_categories_table(&[], false), "No categories found.\n");
    }
}
