//! Resource output formatting (list tables and detail view).

use feedfactory_api::prelude::{Resource, ResourceKind, SearchResult};

use super::helpers::{capitalize, heading, render_table, truncate_str, yes_no};

/// Dates shown in the detail view before the rest are summarized.
const MAX_DETAIL_DATES: usize = 10;

/// Formats one page of resources as a table followed by a paging footer.
pub fn format_resources_table(
    kind: ResourceKind,
    resources: &[Resource],
    page: &SearchResult,
    use_colors: bool,
) -> String {
    if resources.is_empty() {
        return format!("No {} found.\n", kind.plural());
    }

    let headers = table_headers(kind);
    let rows: Vec<Vec<String>> = resources.iter().map(|r| table_row(kind, r)).collect();

    let mut output = render_table(headers, &rows, use_colors);
    output.push_str(&format!(
        "\nShowing {} of {} {} (page {})\n",
        resources.len(),
        page.hits,
        kind.plural(),
        page.page
    ));
    output
}

fn table_headers(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::Event => &["ID", "TITLE", "CITY", "DATE", "STATUS", "PUBLISHED"],
        ResourceKind::Location | ResourceKind::Venue => {
            &["ID", "TITLE", "CITY", "STATUS", "PUBLISHED"]
        }
        ResourceKind::Route => &["ID", "TITLE", "TYPE", "DISTANCE", "STATUS", "PUBLISHED"],
        ResourceKind::EventGroup => &["ID", "TITLE", "STATUS", "PUBLISHED"],
    }
}

fn table_row(kind: ResourceKind, r: &Resource) -> Vec<String> {
    let id = r.id.clone();
    let status = r.workflow_status.clone();
    let published = yes_no(r.published).to_string();

    match kind {
        ResourceKind::Event => vec![
            id,
            truncate_str(r.title(), 40),
            truncate_str(r.city(), 20),
            r.first_date().to_string(),
            status,
            published,
        ],
        ResourceKind::Location | ResourceKind::Venue => vec![
            id,
            truncate_str(r.title(), 40),
            truncate_str(r.city(), 20),
            status,
            published,
        ],
        ResourceKind::Route => {
            let (route_type, distance) = r
                .physical
                .as_ref()
                .map(|p| (p.route_type.clone(), p.distance.clone()))
                .unwrap_or_default();
            vec![
                id,
                truncate_str(r.title(), 40),
                route_type,
                distance,
                status,
                published,
            ]
        }
        ResourceKind::EventGroup => vec![id, truncate_str(r.title(), 50), status, published],
    }
}

/// Formats every populated section of a resource for the `get` command.
pub fn format_resource_details(kind: ResourceKind, r: &Resource, use_colors: bool) -> String {
    let mut out = String::new();

    let label = heading(&format!("{}:", capitalize(kind.singular())), use_colors);
    out.push_str(&format!("{} {}\n", label, r.title()));
    out.push_str(&format!("ID: {}\n", r.id));
    push_field(&mut out, "Slug", &r.slug);
    push_field(&mut out, "TRC ID", &r.trc_id);
    push_field(&mut out, "External ID", &r.external_id);
    out.push_str(&format!("Status: {}\n", r.workflow_status));
    out.push_str(&format!("Published: {}\n", yes_no(r.published)));
    if r.deleted {
        out.push_str("Deleted: Yes\n");
    }
    push_field(&mut out, "Owner", &r.owner);
    push_field(&mut out, "Organisation", &r.user_organisation);
    push_field(&mut out, "Type", &r.entity_type);

    if !r.details.is_empty() {
        if r.details.len() > 1 {
            out.push_str("\nTitles:\n");
            for d in &r.details {
                out.push_str(&format!("  {}: {}\n", d.lang, d.title));
            }
        }

        out.push_str("\nShort Description:\n");
        for d in r.details.iter().filter(|d| !d.short_description.is_empty()) {
            out.push_str(&format!(
                "  {}: {}\n",
                d.lang,
                truncate_str(&d.short_description, 200)
            ));
        }
    }

    if let Some(address) = r.location.as_ref().and_then(|l| l.address.as_ref()) {
        out.push_str("\nLocation:\n");
        if !address.street.is_empty() {
            let mut line = address.street.clone();
            if !address.house_nr.is_empty() {
                line.push(' ');
                line.push_str(&address.house_nr);
            }
            out.push_str(&format!("  Address: {}\n", line));
        }
        if !address.zip_code.is_empty() || !address.city.is_empty() {
            out.push_str(&format!("  City: {} {}\n", address.zip_code, address.city));
        }
        let (lat, lon) = (
            address.latitude.unwrap_or(0.0),
            address.longitude.unwrap_or(0.0),
        );
        if lat != 0.0 || lon != 0.0 {
            out.push_str(&format!("  Coordinates: {:.6}, {:.6}\n", lat, lon));
        }
    }

    if let Some(calendar) = r.calendar.as_ref().filter(|c| !c.single_dates.is_empty()) {
        out.push_str("\nDates:\n");
        for d in calendar.single_dates.iter().take(MAX_DETAIL_DATES) {
            let mut line = d.date.clone();
            if !d.start_time.is_empty() {
                line.push(' ');
                line.push_str(&d.start_time);
            }
            if !d.end_time.is_empty() {
                line.push_str(" - ");
                line.push_str(&d.end_time);
            }
            out.push_str(&format!("  {}\n", line));
        }
        if calendar.single_dates.len() > MAX_DETAIL_DATES {
            out.push_str(&format!(
                "  ... and {} more dates\n",
                calendar.single_dates.len() - MAX_DETAIL_DATES
            ));
        }
    }

    if let Some(physical) = &r.physical {
        if !physical.route_type.is_empty() {
            out.push_str(&format!("\nRoute Type: {}\n", physical.route_type));
        }
        push_field(&mut out, "Distance", &physical.distance);
        push_field(&mut out, "Duration", &physical.duration);
    }

    if let Some(contact) = &r.contact_info {
        let (phone, email) = (contact.phone(), contact.email());
        if !phone.is_empty() || !email.is_empty() {
            out.push_str("\nContact:\n");
            if !phone.is_empty() {
                out.push_str(&format!("  Phone: {}\n", phone));
            }
            if !email.is_empty() {
                out.push_str(&format!("  Email: {}\n", email));
            }
        }
        if !contact.urls.is_empty() {
            out.push_str("\nContact URLs:\n");
            for u in &contact.urls {
                let label = if u.url_service_type.is_empty() {
                    "url"
                } else {
                    u.url_service_type.as_str()
                };
                out.push_str(&format!("  {}: {}\n", label, u.url));
            }
        }
    }

    if !r.urls.is_empty() {
        out.push_str("\nURLs:\n");
        for u in &r.urls {
            let label = if u.label.is_empty() { &u.url_type } else { &u.label };
            out.push_str(&format!("  {}: {}\n", label, u.url));
        }
    }

    if !r.media.is_empty() {
        out.push_str("\nMedia:\n");
        for m in &r.media {
            let main = if m.main { " (main)" } else { "" };
            out.push_str(&format!("  {}{}: {}\n", m.media_type, main, m.url));
        }
    }

    if !r.types.is_empty() {
        out.push_str(&format!("\nTypes: {}\n", r.types.join(", ")));
    }

    if !r.keywords().is_empty() {
        out.push_str("\nKeywords:\n");
        for k in r.keywords() {
            out.push_str(&format!("  {}\n", k.display()));
        }
    }

    if !r.markers().is_empty() {
        out.push_str(&format!("\nMarkers: {}\n", r.markers().join(", ")));
    }

    out.push('\n');
    push_field(&mut out, "Created", &r.created);
    push_field(&mut out, "Last Updated", &r.last_updated);

    out
}

fn push_field(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        out.push_str(&format!("{}: {}\n", label, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(value: serde_json::Value) -> Resource {
        serde_json::from_value(value).unwrap()
    }

    fn page(hits: u64, page: u32) -> SearchResult {
        SearchResult {
            hits,
            page,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_listing_message_uses_plural() {
        let out = format_resources_table(ResourceKind::EventGroup, &[], &page(0, 0), false);
        assert_eq!(out, "No event groups found.\n");
    }

    #[test]
    fn test_event_table_columns_and_footer() {
        let resources = vec![resource(json!({
            "id": "evt-1",
            "wfstatus": "approved",
            "published": true,
            "trcItemDetails": [{"lang": "nl", "title": "Jazzavond"}],
            "location": {"address": {"city": "Utrecht"}},
            "calendar": {"singleDates": [{"date": "2026-02-14"}]}
        }))];

        let out = format_resources_table(ResourceKind::Event, &resources, &page(42, 1), false);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("ID"));
        assert!(lines[0].contains("CITY"));
        assert!(lines[0].ends_with("PUBLISHED"));
        assert!(lines[2].contains("Jazzavond"));
        assert!(lines[2].contains("Utrecht"));
        assert!(lines[2].contains("2026-02-14"));
        assert!(lines[2].ends_with("Yes"));
        assert!(out.ends_with("\nShowing 1 of 42 events (page 1)\n"));
    }

    #[test]
    fn test_route_table_shows_physical_attributes() {
        let resources = vec![resource(json!({
            "id": "r-1",
            "physical": {"routetype": "walking", "distance": 12.5},
            "trcItemDetails": [{"lang": "en", "title": "Dune walk"}]
        }))];

        let out = format_resources_table(ResourceKind::Route, &resources, &page(1, 0), false);
        assert!(out.lines().next().unwrap().contains("DISTANCE"));
        assert!(out.contains("walking"));
        assert!(out.contains("12.5"));
        assert!(out.contains("Showing 1 of 1 routes (page 0)"));
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let title = "A".repeat(60);
        let resources = vec![resource(json!({
            "id": "v-1",
            "trcItemDetails": [{"lang": "nl", "title": title}]
        }))];

        let out = format_resources_table(ResourceKind::Venue, &resources, &page(1, 0), false);
        assert!(out.contains(&format!("{}...", "A".repeat(37))));
        assert!(!out.contains(&"A".repeat(38)));
    }

    #[test]
    fn test_details_sections() {
        let r = resource(json!({
            "id": "evt-1",
            "slug": "jazzavond",
            "wfstatus": "approved",
            "published": false,
            "trcItemDetails": [
                {"lang": "nl", "title": "Jazzavond", "shortdescription": "Live muziek"},
                {"lang": "en", "title": "Jazz night"}
            ],
            "location": {"address": {"street": "Oudegracht", "housenr": "12", "zipcode": "3511", "city": "Utrecht", "latitude": 52.09, "longitude": 5.12}},
            "contactinfo": {"phone": "030-1234567", "mails": [{"email": "info@example.nl"}]},
            "markers": "featured,summer",
            "keywords": [{"label": "Jazz"}, {"value": "live"}],
            "creationdate": "2026-01-01"
        }));

        let out = format_resource_details(ResourceKind::Event, &r, false);

        assert!(out.starts_with("Event: Jazzavond\nID: evt-1\nSlug: jazzavond\n"));
        assert!(out.contains("Published: No\n"));
        assert!(out.contains("\nTitles:\n  nl: Jazzavond\n  en: Jazz night\n"));
        assert!(out.contains("\nShort Description:\n  nl: Live muziek\n"));
        assert!(out.contains("  Address: Oudegracht 12\n"));
        assert!(out.contains("  City: 3511 Utrecht\n"));
        assert!(out.contains("  Coordinates: 52.090000, 5.120000\n"));
        assert!(out.contains("  Phone: 030-1234567\n"));
        assert!(out.contains("  Email: info@example.nl\n"));
        assert!(out.contains("\nKeywords:\n  Jazz\n  live\n"));
        assert!(out.contains("\nMarkers: featured, summer\n"));
        assert!(out.ends_with("\nCreated: 2026-01-01\n"));
        assert!(!out.contains("Deleted"));
    }

    #[test]
    fn test_details_limits_dates() {
        let dates: Vec<_> = (1..=12)
            .map(|d| json!({"date": format!("2026-03-{:02}", d), "starttime": "20:00"}))
            .collect();
        let r = resource(json!({"id": "evt-2", "calendar": {"singleDates": dates}}));

        let out = format_resource_details(ResourceKind::Event, &r, false);
        assert!(out.contains("  2026-03-01 20:00\n"));
        assert!(out.contains("  2026-03-10 20:00\n"));
        assert!(!out.contains("2026-03-11"));
        assert!(out.contains("  ... and 2 more dates\n"));
    }

    #[test]
    fn test_details_for_event_group_label() {
        let r = resource(json!({"id": "eg-1"}));
        let out = format_resource_details(ResourceKind::EventGroup, &r, false);
        assert!(out.starts_with("Event group: -\n"));
    }
}
