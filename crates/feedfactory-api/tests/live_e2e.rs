//! Read-only E2E tests against the real FeedFactory API.
//!
//! Requires `FF_ACCESS_TOKEN`. Tests skip themselves when it is not set.
//!
//! ## Running
//!
//! ```bash
//! cargo test --package feedfactory-api-rs --features e2e --test live_e2e
//! ```

#![cfg(feature = "e2e")]

use feedfactory_api::prelude::*;

fn live_client() -> Option<FeedFactoryClient> {
    let token = std::env::var("FF_ACCESS_TOKEN").ok()?;
    FeedFactoryClient::new(token).ok()
}

#[tokio::test]
async fn test_account_me() {
    let Some(client) = live_client() else {
        eprintln!("Skipping test: no API token");
        return;
    };

    let body = client.account_me().await.expect("accounts/me should succeed");
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(value.is_object());
}

#[tokio::test]
async fn test_list_every_kind() {
    let Some(client) = live_client() else {
        eprintln!("Skipping test: no API token");
        return;
    };

    let criteria = FilterCriteria {
        page_size: 2,
        sort_field: Some(SortField::Modified),
        ..Default::default()
    };
    let query = criteria.build_query().unwrap();

    for kind in ResourceKind::ALL {
        let page = client
            .list(kind, &query)
            .await
            .unwrap_or_else(|e| panic!("listing {} failed: {}", kind.plural(), e));
        let resources = page.resources().expect("results should reconcile");
        assert!(resources.len() <= 2);
    }
}
