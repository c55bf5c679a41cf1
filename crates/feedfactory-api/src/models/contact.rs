//! Contact information attached to a resource.

use serde::de::IgnoredAny;
use serde::Deserialize;

use super::flex::{lenient, nullable};

/// A contact field that is an object, a bare string, or something else.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlexContact<T> {
    Structured(T),
    Text(String),
    Other(IgnoredAny),
}

impl<T> Default for FlexContact<T> {
    fn default() -> Self {
        FlexContact::Other(IgnoredAny)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactPhone {
    #[serde(deserialize_with = "nullable")]
    pub number: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactMail {
    #[serde(deserialize_with = "nullable")]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactUrl {
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    #[serde(rename = "targetLanguage", deserialize_with = "nullable")]
    pub target_language: String,
    #[serde(rename = "urlServiceType", deserialize_with = "nullable")]
    pub url_service_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    #[serde(deserialize_with = "lenient")]
    pub phone: FlexContact<ContactPhone>,
    #[serde(deserialize_with = "lenient")]
    pub mail: FlexContact<ContactMail>,
    #[serde(deserialize_with = "lenient")]
    pub phones: Vec<ContactPhone>,
    #[serde(deserialize_with = "lenient")]
    pub mails: Vec<ContactMail>,
    #[serde(deserialize_with = "lenient")]
    pub urls: Vec<ContactUrl>,
}

impl ContactInfo {
    /// Primary phone number: first of `phones`, else `phone` as object or
    /// string, else empty.
    pub fn phone(&self) -> &str {
        pick(
            self.phones.first().map(|p| p.number.as_str()),
            &self.phone,
            |p| &p.number,
        )
    }

    /// Primary email address, resolved like [`ContactInfo::phone`].
    pub fn email(&self) -> &str {
        pick(
            self.mails.first().map(|m| m.email.as_str()),
            &self.mail,
            |m| &m.email,
        )
    }
}

fn pick<'a, T>(
    first: Option<&'a str>,
    single: &'a FlexContact<T>,
    field: impl Fn(&'a T) -> &'a String,
) -> &'a str {
    if let Some(value) = first.filter(|v| !v.is_empty()) {
        return value;
    }
    match single {
        FlexContact::Structured(inner) => field(inner).as_str(),
        FlexContact::Text(text) => text.as_str(),
        FlexContact::Other(_) => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contact(v: serde_json::Value) -> ContactInfo {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_phone_prefers_phones_array() {
        let c = contact(json!({
            "phones": [{"number": "+31 30 123"}],
            "phone": {"number": "ignored"}
        }));
        assert_eq!(c.phone(), "+31 30 123");
    }

    #[test]
    fn test_phone_from_object() {
        let c = contact(json!({"phone": {"number": "030-1234567"}}));
        assert_eq!(c.phone(), "030-1234567");
    }

    #[test]
    fn test_phone_from_bare_string() {
        let c = contact(json!({"phones": [], "phone": "030-7654321"}));
        assert_eq!(c.phone(), "030-7654321");
    }

    #[test]
    fn test_phone_empty_array_entry_falls_through() {
        let c = contact(json!({"phones": [{"number": ""}], "phone": "030-1"}));
        assert_eq!(c.phone(), "030-1");
    }

    #[test]
    fn test_phone_absent_or_odd() {
        assert_eq!(contact(json!({})).phone(), "");
        assert_eq!(contact(json!({"phone": null})).phone(), "");
        assert_eq!(contact(json!({"phone": 12})).phone(), "");
    }

    #[test]
    fn test_email_variants() {
        assert_eq!(
            contact(json!({"mails": [{"email": "a@example.nl"}]})).email(),
            "a@example.nl"
        );
        assert_eq!(
            contact(json!({"mail": {"email": "b@example.nl"}})).email(),
            "b@example.nl"
        );
        assert_eq!(contact(json!({"mail": "c@example.nl"})).email(), "c@example.nl");
    }

    #[test]
    fn test_urls_degrade_to_empty() {
        let c = contact(json!({"urls": "not-a-list"}));
        assert!(c.urls.is_empty());
    }
}
