// Sidebar counter tests: one-row probes, stale-on-failure policy.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use opsdeck_api::RecordClient;
use opsdeck_core::{Inventory, SidebarCounts};

fn counter_page(total: u64) -> serde_json::Value {
    json!({
        "page": 1,
        "perPage": 1,
        "totalItems": total,
        "totalPages": total,
        "items": []
    })
}

fn inventory_for(server: &MockServer) -> Inventory {
    let url = server.uri().parse().expect("base url");
    Inventory::new(RecordClient::with_client(reqwest::Client::new(), url))
}

#[tokio::test]
async fn counters_read_total_items_from_one_row_probes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/ma_tickets/records"))
        .and(query_param("perPage", "1"))
        .and(query_param("filter", "status = \"waiting_dev\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(counter_page(4)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/collections/ma_servers/records"))
        .and(query_param("filter", "status = \"online\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(counter_page(12)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/collections/ma_apps/records"))
        .and(query_param("filter", "status = \"running\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(counter_page(31)))
        .mount(&server)
        .await;

    let inventory = inventory_for(&server);
    let counts = inventory.refresh_counts(SidebarCounts::default()).await;

    assert_eq!(
        counts,
        SidebarCounts {
            waiting_tickets: 4,
            online_servers: 12,
            running_apps: 31,
        }
    );
}

#[tokio::test]
async fn failed_probe_keeps_previous_value_and_others_update() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/ma_tickets/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(counter_page(7)))
        .mount(&server)
        .await;
    // Server counter probe rejects.
    Mock::given(method("GET"))
        .and(path("/api/collections/ma_servers/records"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/collections/ma_apps/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(counter_page(29)))
        .mount(&server)
        .await;

    let inventory = inventory_for(&server);
    let prev = SidebarCounts {
        waiting_tickets: 3,
        online_servers: 11,
        running_apps: 28,
    };

    // No error escapes; the failing counter is stale-but-available.
    let counts = inventory.refresh_counts(prev).await;

    assert_eq!(counts.waiting_tickets, 7);
    assert_eq!(counts.online_servers, 11);
    assert_eq!(counts.running_apps, 29);
}
