//! Resource kinds and the endpoint paths they map to.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// The five resource collections exposed by the FeedFactory API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Event,
    Location,
    Route,
    Venue,
    EventGroup,
}

impl ResourceKind {
    /// All kinds, in display order.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Event,
        ResourceKind::Location,
        ResourceKind::Route,
        ResourceKind::Venue,
        ResourceKind::EventGroup,
    ];

    /// Collection path segment, e.g. `events`.
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Event => "events",
            ResourceKind::Location => "locations",
            ResourceKind::Route => "routes",
            ResourceKind::Venue => "venues",
            ResourceKind::EventGroup => "eventgroups",
        }
    }

    /// Query key carrying export property column ids.
    ///
    /// The venues endpoint only understands the misspelled
    /// `export_properyids`. Do not correct it.
    pub fn property_ids_key(&self) -> &'static str {
        match self {
            ResourceKind::Venue => "export_properyids",
            _ => "export_propertyids",
        }
    }

    /// Singular display noun.
    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Event => "event",
            ResourceKind::Location => "location",
            ResourceKind::Route => "route",
            ResourceKind::Venue => "venue",
            ResourceKind::EventGroup => "event group",
        }
    }

    /// Plural display noun.
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Event => "events",
            ResourceKind::Location => "locations",
            ResourceKind::Route => "routes",
            ResourceKind::Venue => "venues",
            ResourceKind::EventGroup => "event groups",
        }
    }

    /// Prefix of this kind's dictionary keys on the account document
    /// (`{stem}Keywords`, `{stem}Markers`).
    pub fn dictionary_stem(&self) -> &'static str {
        match self {
            ResourceKind::Event => "event",
            ResourceKind::Location => "location",
            ResourceKind::Route => "route",
            ResourceKind::Venue => "venue",
            ResourceKind::EventGroup => "eventGroup",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// Error returned when a string names no known resource kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource type \"{0}\" (expected event, location, route, venue or eventgroup)")]
pub struct UnknownResourceKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "event" | "events" => Ok(ResourceKind::Event),
            "location" | "locations" => Ok(ResourceKind::Location),
            "route" | "routes" => Ok(ResourceKind::Route),
            "venue" | "venues" => Ok(ResourceKind::Venue),
            "eventgroup" | "eventgroups" | "event-group" | "event-groups" => {
                Ok(ResourceKind::EventGroup)
            }
            _ => Err(UnknownResourceKind(s.to_string())),
        }
    }
}

/// Resolves a resource name to its path segment.
///
/// Known kinds map to their collection path; anything else is returned
/// unchanged so callers can reach endpoints this crate does not model.
pub fn resolve_endpoint(input: &str) -> Cow<'_, str> {
    match input.parse::<ResourceKind>() {
        Ok(kind) => Cow::Borrowed(kind.path()),
        Err(_) => Cow::Borrowed(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let paths: Vec<_> = ResourceKind::ALL.iter().map(|k| k.path()).collect();
        assert_eq!(
            paths,
            vec!["events", "locations", "routes", "venues", "eventgroups"]
        );
    }

    #[test]
    fn test_venue_keeps_misspelled_property_key() {
        assert_eq!(ResourceKind::Venue.property_ids_key(), "export_properyids");
        assert_eq!(ResourceKind::Event.property_ids_key(), "export_propertyids");
        assert_eq!(
            ResourceKind::EventGroup.property_ids_key(),
            "export_propertyids"
        );
    }

    #[test]
    fn test_from_str_accepts_singular_and_plural() {
        assert_eq!("event".parse::<ResourceKind>().unwrap(), ResourceKind::Event);
        assert_eq!("Events".parse::<ResourceKind>().unwrap(), ResourceKind::Event);
        assert_eq!("VENUES".parse::<ResourceKind>().unwrap(), ResourceKind::Venue);
        assert_eq!(
            "eventGroup".parse::<ResourceKind>().unwrap(),
            ResourceKind::EventGroup
        );
        assert!("widgets".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_resolve_endpoint() {
        assert_eq!(resolve_endpoint("event"), "events");
        assert_eq!(resolve_endpoint("Venue"), "venues");
        assert_eq!(resolve_endpoint("eventgroups"), "eventgroups");
        assert_eq!(resolve_endpoint("accounts/me"), "accounts/me");
        assert_eq!(resolve_endpoint(""), "");
    }

    #[test]
    fn test_display_nouns() {
        assert_eq!(ResourceKind::EventGroup.to_string(), "event group");
        assert_eq!(ResourceKind::EventGroup.plural(), "event groups");
        assert_eq!(ResourceKind::EventGroup.dictionary_stem(), "eventGroup");
        assert_eq!(ResourceKind::Location.plural(), "locations");
    }
}
