//! The normalized resource model shared by all five resource kinds.

use serde::Deserialize;
use serde_json::Value;

use super::contact::ContactInfo;
use super::flex::{lenient, nullable, string_list};
use super::localized::{self, ItemDetail};

/// An event, location, route, venue or event group as returned by the API.
///
/// Only `id` is required. Every other field tolerates absence, `null`, and
/// shapes other than the expected one by falling back to its empty value.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: String,
    #[serde(default, deserialize_with = "string_list")]
    pub types: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub published: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub offline: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub deleted: bool,
    #[serde(rename = "wfstatus", default, deserialize_with = "nullable")]
    pub workflow_status: String,
    #[serde(rename = "lastupdated", default, deserialize_with = "nullable")]
    pub last_updated: String,
    #[serde(rename = "lastupdatedby", default, deserialize_with = "nullable")]
    pub last_updated_by: String,
    #[serde(rename = "creationdate", default, deserialize_with = "nullable")]
    pub created: String,
    #[serde(default, deserialize_with = "nullable")]
    pub owner: String,
    #[serde(rename = "userorganisation", default, deserialize_with = "nullable")]
    pub user_organisation: String,
    #[serde(rename = "trcid", default, deserialize_with = "nullable")]
    pub trc_id: String,
    #[serde(rename = "externalid", default, deserialize_with = "nullable")]
    pub external_id: String,
    #[serde(rename = "entitytype", default, deserialize_with = "nullable")]
    pub entity_type: String,
    #[serde(default, deserialize_with = "lenient")]
    pub calendar: Option<Calendar>,
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "lenient")]
    pub physical: Option<Physical>,
    #[serde(rename = "contactinfo", default, deserialize_with = "lenient")]
    pub contact_info: Option<ContactInfo>,
    #[serde(default, deserialize_with = "lenient")]
    pub media: Vec<Media>,
    #[serde(default, deserialize_with = "lenient")]
    pub urls: Vec<UrlEntry>,
    #[serde(default, deserialize_with = "string_list")]
    pub markers: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub keywords: Vec<Keyword>,
    #[serde(rename = "trcItemDetails", default, deserialize_with = "lenient")]
    pub details: Vec<ItemDetail>,
}

impl Resource {
    /// Title in the preferred language, or `-`.
    pub fn title(&self) -> &str {
        localized::title(&self.details)
    }

    /// Short description in the preferred language, or empty.
    pub fn short_description(&self) -> &str {
        localized::short_description(&self.details)
    }

    /// City of the location address, or empty.
    pub fn city(&self) -> &str {
        self.location
            .as_ref()
            .and_then(|l| l.address.as_ref())
            .map(|a| a.city.as_str())
            .unwrap_or("")
    }

    /// Date of the first single calendar date, or empty.
    pub fn first_date(&self) -> &str {
        self.calendar
            .as_ref()
            .and_then(|c| c.single_dates.first())
            .map(|d| d.date.as_str())
            .unwrap_or("")
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    /// Primary contact phone, or empty.
    pub fn phone(&self) -> &str {
        self.contact_info.as_ref().map(ContactInfo::phone).unwrap_or("")
    }

    /// Primary contact email, or empty.
    pub fn email(&self) -> &str {
        self.contact_info.as_ref().map(ContactInfo::email).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Calendar {
    #[serde(rename = "calendarType", deserialize_with = "nullable")]
    pub calendar_type: String,
    #[serde(rename = "singleDates", deserialize_with = "lenient")]
    pub single_dates: Vec<SingleDate>,
    #[serde(deserialize_with = "nullable")]
    pub cancelled: bool,
    #[serde(rename = "soldout", deserialize_with = "nullable")]
    pub sold_out: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SingleDate {
    #[serde(deserialize_with = "nullable")]
    pub date: String,
    #[serde(rename = "starttime", deserialize_with = "nullable")]
    pub start_time: String,
    #[serde(rename = "endtime", deserialize_with = "nullable")]
    pub end_time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "lenient")]
    pub address: Option<Address>,
    #[serde(deserialize_with = "nullable")]
    pub label: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(deserialize_with = "nullable")]
    pub street: String,
    #[serde(rename = "housenr", deserialize_with = "nullable")]
    pub house_nr: String,
    #[serde(rename = "zipcode", deserialize_with = "nullable")]
    pub zip_code: String,
    #[serde(deserialize_with = "nullable")]
    pub city: String,
    #[serde(deserialize_with = "nullable")]
    pub country: String,
    #[serde(deserialize_with = "lenient")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub longitude: Option<f64>,
}

/// Route attributes. Values are free text, e.g. `12.5` or `2:30`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Physical {
    #[serde(deserialize_with = "scalar_text")]
    pub distance: String,
    #[serde(deserialize_with = "scalar_text")]
    pub duration: String,
    #[serde(rename = "routetype", deserialize_with = "nullable")]
    pub route_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Media {
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    #[serde(deserialize_with = "nullable")]
    pub main: bool,
    #[serde(rename = "mediatype", deserialize_with = "nullable")]
    pub media_type: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UrlEntry {
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    #[serde(rename = "urltype", deserialize_with = "nullable")]
    pub url_type: String,
    #[serde(deserialize_with = "nullable")]
    pub label: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Keyword {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub label: String,
    #[serde(deserialize_with = "nullable")]
    pub value: String,
}

impl Keyword {
    /// Label if present, else value.
    pub fn display(&self) -> &str {
        if self.label.is_empty() {
            &self.value
        } else {
            &self.label
        }
    }
}

// Distances arrive as strings or numbers depending on the record.
fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Reconciles raw search results into resources.
///
/// # Errors
///
/// Fails only when a result is not an object or lacks an `id`.
pub fn parse_resources(raw: &[Value]) -> Result<Vec<Resource>, serde_json::Error> {
    raw.iter().map(Resource::deserialize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(v: Value) -> Resource {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_minimal_resource() {
        let r = resource(json!({"id": "evt-1"}));
        assert_eq!(r.id, "evt-1");
        assert_eq!(r.title(), "-");
        assert_eq!(r.short_description(), "");
        assert_eq!(r.city(), "");
        assert_eq!(r.first_date(), "");
        assert!(r.markers().is_empty());
        assert!(r.keywords().is_empty());
        assert!(!r.published);
    }

    #[test]
    fn test_missing_id_fails() {
        assert!(serde_json::from_value::<Resource>(json!({"slug": "x"})).is_err());
    }

    #[test]
    fn test_full_resource() {
        let r = resource(json!({
            "id": "evt-1",
            "published": true,
            "wfstatus": "approved",
            "lastupdated": "2026-01-10T09:00:00Z",
            "creationdate": "2025-12-01T08:00:00Z",
            "calendar": {
                "calendarType": "SINGLES",
                "singleDates": [
                    {"date": "2026-02-01", "starttime": "20:00"},
                    {"date": "2026-02-02"}
                ]
            },
            "location": {"label": "TivoliVredenburg", "address": {"city": "Utrecht", "latitude": 52.09}},
            "contactinfo": {"phone": "030-1234567", "mails": [{"email": "info@example.nl"}]},
            "markers": "featured,summer",
            "keywords": [{"id": "k1", "label": "Jazz"}, {"value": "live"}],
            "trcItemDetails": [
                {"lang": "en", "title": "Jazz night"},
                {"lang": "nl", "title": "Jazzavond", "shortdescription": "Een avond jazz"}
            ]
        }));
        assert_eq!(r.title(), "Jazzavond");
        assert_eq!(r.short_description(), "Een avond jazz");
        assert_eq!(r.city(), "Utrecht");
        assert_eq!(r.first_date(), "2026-02-01");
        assert_eq!(r.markers(), ["featured", "summer"]);
        assert_eq!(r.keywords()[0].display(), "Jazz");
        assert_eq!(r.keywords()[1].display(), "live");
        assert_eq!(r.phone(), "030-1234567");
        assert_eq!(r.email(), "info@example.nl");
        assert_eq!(r.workflow_status, "approved");
    }

    #[test]
    fn test_malformed_nested_structures_degrade() {
        let r = resource(json!({
            "id": "loc-1",
            "calendar": "none",
            "location": true,
            "contactinfo": 5,
            "media": {"url": "x"},
            "keywords": "jazz",
            "trcItemDetails": null,
            "wfstatus": null,
            "published": null
        }));
        assert!(r.calendar.is_none());
        assert!(r.location.is_none());
        assert!(r.contact_info.is_none());
        assert!(r.media.is_empty());
        assert!(r.keywords.is_empty());
        assert_eq!(r.title(), "-");
        assert_eq!(r.workflow_status, "");
        assert!(!r.published);
    }

    #[test]
    fn test_location_without_address() {
        let r = resource(json!({"id": "x", "location": {"label": "Somewhere"}}));
        assert_eq!(r.city(), "");
    }

    #[test]
    fn test_physical_distance_as_number_or_string() {
        let r = resource(json!({"id": "r", "physical": {"distance": 12.5, "duration": "3:00", "routetype": "walking"}}));
        let physical = r.physical.unwrap();
        assert_eq!(physical.distance, "12.5");
        assert_eq!(physical.duration, "3:00");
        assert_eq!(physical.route_type, "walking");
    }

    #[test]
    fn test_parse_resources() {
        let raw = vec![json!({"id": "a"}), json!({"id": "b", "markers": ["x"]})];
        let resources = parse_resources(&raw).unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[1].markers(), ["x"]);

        assert!(parse_resources(&[json!("not an object")]).is_err());
    }
}
