mod common;

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use encore::ingest::{EventFetcher, FixedDelay};
use encore::models::Borough;
use encore::ticketing::TicketingClient;

fn discovery_body(ids: &[&str], total_pages: u32) -> serde_json::Value {
    json!({
        "_embedded": {
            "events": ids.iter().map(|id| json!({
                "id": id,
                "name": format!("Show {id}"),
                "url": format!("https://tickets.example/{id}"),
                "dates": { "start": { "localDate": "2025-03-15" } },
                "info": "A show",
                "images": [],
                "_embedded": { "venues": [ { "name": "Test Hall" } ] }
            })).collect::<Vec<_>>()
        },
        "page": { "totalPages": total_pages }
    })
}

fn empty_body() -> serde_json::Value {
    json!({ "page": { "totalPages": 0 } })
}

fn fetcher(server: &MockServer, start: (i32, u32, u32), end: (i32, u32, u32)) -> EventFetcher {
    let config = common::ticketing_config(&server.uri(), start, end);
    let client = TicketingClient::new(&config).unwrap();
    EventFetcher::new(client, config, Arc::new(FixedDelay::none()))
}

#[tokio::test]
async fn event_spanning_windows_is_fetched_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events.json"))
        .and(query_param("city", "New York"))
        .and(query_param("startDateTime", "2025-03-01T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_body(&["e1", "e2"], 1)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/events.json"))
        .and(query_param("city", "New York"))
        .and(query_param("startDateTime", "2025-04-01T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_body(&["e2", "e3"], 1)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/events.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
        .mount(&server)
        .await;

    let events = fetcher(&server, (2025, 3, 1), (2025, 5, 1)).fetch_all().await;

    let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(unique, HashSet::from(["e1", "e2", "e3"]));

    // "e2" belongs to both windows; it is attributed to the first one that
    // returned it.
    let e2 = events.iter().find(|e| e.id == "e2").unwrap();
    assert_eq!(e2.borough, Borough::Manhattan);
}

#[tokio::test]
async fn failed_window_is_skipped_and_the_run_continues() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events.json"))
        .and(query_param("city", "New York"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/events.json"))
        .and(query_param("city", "Brooklyn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_body(&["b1"], 1)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/events.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
        .mount(&server)
        .await;

    let events = fetcher(&server, (2025, 3, 1), (2025, 4, 1)).fetch_all().await;

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "b1");
    assert_eq!(events[0].borough, Borough::Brooklyn);
}

#[tokio::test]
async fn page_cap_limits_each_window_to_ten_pages() {
    let server = MockServer::start().await;

    // The upstream claims 50 pages; the 1000-result cap stops each window
    // after 10. One window x five boroughs = 50 requests total.
    Mock::given(method("GET"))
        .and(path("/events.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": { "totalPages": 50 }
        })))
        .expect(50)
        .mount(&server)
        .await;

    let events = fetcher(&server, (2025, 3, 1), (2025, 4, 1)).fetch_all().await;
    assert!(events.is_empty());
}

#[tokio::test]
async fn pagination_accumulates_every_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events.json"))
        .and(query_param("city", "New York"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_body(&["p0"], 2)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/events.json"))
        .and(query_param("city", "New York"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_body(&["p1"], 2)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/events.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
        .mount(&server)
        .await;

    let events = fetcher(&server, (2025, 3, 1), (2025, 4, 1)).fetch_all().await;

    let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["p0", "p1"]);
}

#[tokio::test]
async fn requests_carry_the_configured_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events.json"))
        .and(query_param("classificationName", "music"))
        .and(query_param("stateCode", "NY"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("size", "100"))
        .and(query_param("endDateTime", "2025-04-01T23:59:59Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
        .expect(5)
        .mount(&server)
        .await;

    let events = fetcher(&server, (2025, 3, 1), (2025, 4, 1)).fetch_all().await;
    assert!(events.is_empty());
}
