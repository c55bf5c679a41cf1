//! Per-language text entries and language preference resolution.

use serde::Deserialize;

use super::flex::nullable;

/// Language preference order for displayed text.
pub const PREFERRED_LANGUAGES: [&str; 3] = ["nl", "en", "de"];

/// Title shown when a resource has no usable title.
pub const MISSING_TITLE: &str = "-";

/// Language-specific descriptive text of a resource.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItemDetail {
    #[serde(deserialize_with = "nullable")]
    pub lang: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(rename = "shortdescription", deserialize_with = "nullable")]
    pub short_description: String,
    #[serde(rename = "longdescription", deserialize_with = "nullable")]
    pub long_description: String,
}

/// Returns the first non-empty `field` among `details` in preferred language
/// order, or `None` if no preferred language has one.
pub fn preferred<'a>(
    details: &'a [ItemDetail],
    field: impl Fn(&'a ItemDetail) -> &'a str,
) -> Option<&'a str> {
    PREFERRED_LANGUAGES.iter().find_map(|lang| {
        details
            .iter()
            .filter(|d| d.lang == *lang)
            .map(&field)
            .find(|text| !text.is_empty())
    })
}

/// Best title: preferred language, else the first entry, else `-`.
pub fn title(details: &[ItemDetail]) -> &str {
    preferred(details, |d| d.title.as_str())
        .or_else(|| details.first().map(|d| d.title.as_str()))
        .filter(|t| !t.is_empty())
        .unwrap_or(MISSING_TITLE)
}

/// Best short description: preferred language, else the first entry, else empty.
pub fn short_description(details: &[ItemDetail]) -> &str {
    preferred(details, |d| d.short_description.as_str())
        .or_else(|| details.first().map(|d| d.short_description.as_str()))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(lang: &str, title: &str) -> ItemDetail {
        ItemDetail {
            lang: lang.to_string(),
            title: title.to_string(),
            short_description: format!("{title} short"),
            ..Default::default()
        }
    }

    #[test]
    fn test_title_prefers_nl_over_en() {
        let details = vec![detail("en", "Concert"), detail("nl", "Concert NL")];
        assert_eq!(title(&details), "Concert NL");
    }

    #[test]
    fn test_title_falls_back_to_en_then_de() {
        let details = vec![detail("fr", "Concert FR"), detail("de", "Konzert"), detail("en", "Concert")];
        assert_eq!(title(&details), "Concert");
        let details = vec![detail("de", "Konzert")];
        assert_eq!(title(&details), "Konzert");
    }

    #[test]
    fn test_title_skips_empty_preferred_entry() {
        let details = vec![detail("nl", ""), detail("en", "Concert")];
        assert_eq!(title(&details), "Concert");
    }

    #[test]
    fn test_title_uses_first_entry_for_unknown_languages() {
        let details = vec![detail("fr", "Concert FR"), detail("es", "Concierto")];
        assert_eq!(title(&details), "Concert FR");
    }

    #[test]
    fn test_title_missing() {
        assert_eq!(title(&[]), "-");
        assert_eq!(title(&[detail("fr", "")]), "-");
    }

    #[test]
    fn test_short_description() {
        let details = vec![detail("en", "A"), detail("nl", "B")];
        assert_eq!(short_description(&details), "B short");
        assert_eq!(short_description(&[]), "");
    }
}
