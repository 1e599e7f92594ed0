//! Tests for pagination module

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::http::{HttpClient, Request};
use crate::json::fields;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = ClientConfig::builder().base_url(server.uri()).build();
    HttpClient::with_config(config).unwrap()
}

fn ids(server: &MockServer, at: &str) -> Pagination<u64> {
    let client = client_for(server);
    let first = client.request(at);
    Pagination::new(client, first, |value| {
        fields::number(&fields::into_object(value)?, "id")
    })
}

fn next_link(server: &MockServer, at: &str, page: u32) -> String {
    format!("<{}/{at}?page={page}>; rel=\"next\"", server.uri())
}

/// Mount a page served when `page` is requested (page 1 has no page param)
async fn mount_page(
    server: &MockServer,
    at: &str,
    page: u32,
    body: serde_json::Value,
    next: Option<u32>,
) {
    let mut template = ResponseTemplate::new(200).set_body_json(body);
    if let Some(next) = next {
        template = template.insert_header("Link", next_link(server, at, next).as_str());
    }

    let mock = Mock::given(method("GET")).and(path(format!("/{at}")));
    let mock = if page == 1 {
        mock.and(query_param_is_missing("page"))
    } else {
        mock.and(query_param("page", page.to_string()))
    };
    mock.respond_with(template).mount(server).await;
}

// ============================================================================
// Link Header Tests
// ============================================================================

#[test]
fn test_parse_links_github_style() {
    let header = r#"<https://api.github.com/repositories/1/issues?page=2>; rel="next", <https://api.github.com/repositories/1/issues?page=5>; rel="last""#;
    let links = parse_links(header);

    assert_eq!(links.len(), 2);
    assert_eq!(
        links[0].uri,
        "https://api.github.com/repositories/1/issues?page=2"
    );
    assert_eq!(links[0].rels, vec!["next".to_string()]);
    assert!(links[1].has_rel("last"));
}

#[test_case(r#"<https://a/2>; rel="next""#, Some("https://a/2"); "quoted rel")]
#[test_case("<https://a/2>; rel=next", Some("https://a/2"); "token rel")]
#[test_case(r#"<https://a/2>; rel="NEXT""#, Some("https://a/2"); "uppercase rel")]
#[test_case(r#"<https://a/9>; rel="last", <https://a/2>; rel="next""#, Some("https://a/2"); "next after last")]
#[test_case(r#"<https://a/2>; rel="next last""#, Some("https://a/2"); "multiple relation types")]
#[test_case(r#"<https://a/?q=a,b>; rel="next""#, Some("https://a/?q=a,b"); "comma inside uri")]
#[test_case(r#"<https://a/1>; title="x, rel=next", <https://a/2>; rel="next""#, Some("https://a/2"); "comma inside quoted param")]
#[test_case(r#"<https://a/1>; rel="prev""#, None; "no next")]
#[test_case(r#"<https://a/1>; rel="nextpage""#, None; "rel prefix is not a match")]
#[test_case("", None; "empty header")]
fn test_find_next(header: &str, expected: Option<&str>) {
    assert_eq!(find_rel([header], "next").as_deref(), expected);
}

#[test]
fn test_parse_links_skips_garbage() {
    let links = parse_links(r#"garbage, <https://a/2>; rel="next""#);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].uri, "https://a/2");
}

#[test]
fn test_parse_links_params() {
    let links = parse_links(r#"<https://a/2>; rel="next"; title="Page \"2\""; anchor"#);

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].param("title"), Some("Page \"2\""));
    assert_eq!(links[0].param("anchor"), Some(""));
    assert_eq!(links[0].param("REL"), Some("next"));
}

#[test]
fn test_parse_links_first_rel_wins() {
    let links = parse_links(r#"<https://a/2>; rel="prev"; rel="next""#);
    assert!(links[0].has_rel("prev"));
    assert!(!links[0].has_rel("next"));
}

#[test]
fn test_find_rel_across_header_values() {
    let headers = [r#"<https://a/1>; rel="prev""#, r#"<https://a/3>; rel="next""#];
    assert_eq!(find_rel(headers, "next"), Some("https://a/3".to_string()));
    assert_eq!(find_rel(headers, "first"), None);
}

// ============================================================================
// Page Fetcher Tests
// ============================================================================

#[tokio::test]
async fn test_fetcher_reads_records_and_next() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "items", 1, json!([{"id": 1}, {"id": 2}]), Some(2)).await;

    let client = client_for(&mock_server);
    let fetcher = PageFetcher::new(client.clone());
    let page = fetcher.fetch(&client.request("items"), 1).await.unwrap();

    assert_eq!(page.len(), 2);
    assert!(!page.is_last());
    let next = page.next.unwrap();
    assert_eq!(next.query_value("page"), Some("2".to_string()));
    assert_eq!(next.url.path(), "/items");
}

#[tokio::test]
async fn test_fetcher_last_page() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "items", 1, json!([]), None).await;

    let client = client_for(&mock_server);
    let page = PageFetcher::new(client.clone())
        .fetch(&client.request("items"), 1)
        .await
        .unwrap();

    assert!(page.is_empty());
    assert!(page.is_last());
}

#[tokio::test]
async fn test_fetcher_resolves_relative_link() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .insert_header("Link", "</items?page=2>; rel=\"next\""),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = PageFetcher::new(client.clone())
        .fetch(&client.request("items"), 1)
        .await
        .unwrap();

    let next = page.next.unwrap();
    assert_eq!(
        next.url.as_str(),
        format!("{}/items?page=2", mock_server.uri())
    );
}

#[tokio::test]
async fn test_fetcher_keeps_request_headers_on_next() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "items", 1, json!([]), Some(2)).await;

    let client = client_for(&mock_server);
    let first = client.request("items").header("X-Trace", "abc");
    let page = PageFetcher::new(client).fetch(&first, 1).await.unwrap();

    assert_eq!(
        page.next.unwrap().headers.get("X-Trace"),
        Some(&"abc".to_string())
    );
}

#[tokio::test]
async fn test_fetcher_error_carries_status_body_and_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API rate limit exceeded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = PageFetcher::new(client.clone())
        .fetch(&client.request("items"), 4)
        .await
        .unwrap_err();

    match err {
        Error::PageFetch { status, body, page } => {
            assert_eq!(status, 403);
            assert_eq!(body, "API rate limit exceeded");
            assert_eq!(page, 4);
        }
        other => panic!("Expected PageFetch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetcher_rejects_object_body_at_root() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "hi"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = PageFetcher::new(client.clone())
        .fetch(&client.request("items"), 1)
        .await
        .unwrap_err();

    assert!(err.is_malformed());
}

#[tokio::test]
async fn test_fetcher_member_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 2,
            "items": [{"id": 10}, {"id": 11}]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = PageFetcher::new(client.clone())
        .with_records(RecordPath::member("items"))
        .fetch(&client.request("search/issues"), 1)
        .await
        .unwrap();

    assert_eq!(page.records, vec![json!({"id": 10}), json!({"id": 11})]);
    assert!(page.is_last());
}

#[test_case(RecordPath::Root; "root records")]
#[test_case(RecordPath::member("items"); "member records")]
#[tokio::test]
async fn test_fetcher_blank_body_is_empty_page(records: RecordPath) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = PageFetcher::new(client.clone())
        .with_records(records)
        .fetch(&client.request("search/issues"), 1)
        .await
        .unwrap();

    assert!(page.is_empty());
    assert!(page.is_last());
}

#[tokio::test]
async fn test_fetcher_blank_body_keeps_link_header() {
    let mock_server = MockServer::start().await;
    let link = next_link(&mock_server, "search/issues", 2);

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(ResponseTemplate::new(200).insert_header("Link", link.as_str()))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = PageFetcher::new(client.clone())
        .with_records(RecordPath::member("items"))
        .fetch(&client.request("search/issues"), 1)
        .await
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(
        page.next.unwrap().query_value("page"),
        Some("2".to_string())
    );
}

#[tokio::test]
async fn test_body_cursor_reads_items_path_without_record_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1}, {"id": 2}],
            "next": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let first = client.request("events");
    let values = Pagination::values(client, first)
        .with_continuation(Continuation::body_cursor("next", "items"))
        .collect_all()
        .await
        .unwrap();

    assert_eq!(values, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[tokio::test]
async fn test_fetcher_body_cursor() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/events?cursor=abc", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1}],
            "pagination": {"next": next}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = PageFetcher::new(client.clone())
        .with_continuation(Continuation::body_cursor("pagination.next", "data"))
        .fetch(&client.request("events"), 1)
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(
        page.next.unwrap().query_value("cursor"),
        Some("abc".to_string())
    );
}

#[test_case(json!(null); "null cursor")]
#[test_case(json!(""); "empty cursor")]
#[test_case(json!(7); "non-string cursor")]
#[tokio::test]
async fn test_fetcher_body_cursor_end(cursor: serde_json::Value) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "pagination": {"next": cursor}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = PageFetcher::new(client.clone())
        .with_continuation(Continuation::body_cursor("pagination.next", "data"))
        .fetch(&client.request("events"), 1)
        .await
        .unwrap();

    assert!(page.is_last());
}

// ============================================================================
// Pagination Sequence Tests
// ============================================================================

#[tokio::test]
async fn test_two_pages_yield_in_order_with_two_gets() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1}, {"id": 2}]))
                .insert_header("Link", next_link(&mock_server, "items", 2).as_str()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 3}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let items = ids(&mock_server, "items").collect_all().await.unwrap();
    assert_eq!(items, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_many_pages_sum_of_records() {
    let mock_server = MockServer::start().await;
    let pages: [&[u64]; 4] = [&[1, 2, 3], &[4], &[5, 6], &[7, 8, 9, 10]];

    for (i, records) in pages.iter().enumerate() {
        let page = i as u32 + 1;
        let body = json!(records.iter().map(|id| json!({"id": id})).collect::<Vec<_>>());
        let next = (page < pages.len() as u32).then_some(page + 1);
        mount_page(&mock_server, "items", page, body, next).await;
    }

    let items = ids(&mock_server, "items").collect_all().await.unwrap();
    assert_eq!(items, (1..=10).collect::<Vec<u64>>());
}

#[tokio::test]
async fn test_single_page_terminates() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "items", 1, json!([{"id": 5}, {"id": 6}]), None).await;

    let mut cursor = ids(&mock_server, "items").cursor();
    assert_eq!(cursor.next().await.unwrap(), Some(5));
    assert_eq!(cursor.next().await.unwrap(), Some(6));
    assert_eq!(cursor.next().await.unwrap(), None);
    assert!(cursor.is_exhausted());
    assert_eq!(cursor.pages_fetched(), 1);

    // Exhausted stays exhausted without further requests
    assert_eq!(cursor.next().await.unwrap(), None);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_pages_are_skipped() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "items", 1, json!([]), Some(2)).await;
    mount_page(&mock_server, "items", 2, json!([]), Some(3)).await;
    mount_page(&mock_server, "items", 3, json!([{"id": 1}]), Some(4)).await;
    mount_page(&mock_server, "items", 4, json!([]), None).await;

    let mut cursor = ids(&mock_server, "items").cursor();
    assert_eq!(cursor.next().await.unwrap(), Some(1));
    assert_eq!(cursor.next().await.unwrap(), None);
    assert_eq!(cursor.pages_fetched(), 4);
}

#[tokio::test]
async fn test_pages_fetched_on_demand() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "items", 1, json!([{"id": 1}, {"id": 2}]), Some(2)).await;
    mount_page(&mock_server, "items", 2, json!([{"id": 3}]), None).await;

    let pagination = ids(&mock_server, "items");

    // Creating a pagination or a cursor performs no I/O
    let mut cursor = pagination.cursor();
    assert!(mock_server.received_requests().await.unwrap().is_empty());

    cursor.next().await.unwrap();
    cursor.next().await.unwrap();
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);

    cursor.next().await.unwrap();
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_restart_refetches_from_first_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1}]))
                .insert_header("Link", next_link(&mock_server, "items", 2).as_str()),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 2}])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let pagination = ids(&mock_server, "items");
    let first = pagination.collect_all().await.unwrap();
    let second = pagination.collect_all().await.unwrap();

    assert_eq!(first, vec![1, 2]);
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_first_page_failure_before_any_element() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut cursor = ids(&mock_server, "items").cursor();
    let err = cursor.next().await.unwrap_err();

    assert!(matches!(err, Error::PageFetch { status: 500, page: 1, .. }));
    assert!(cursor.is_failed());

    // Failed is terminal and makes no further requests
    assert_eq!(cursor.next().await.unwrap(), None);
}

#[tokio::test]
async fn test_later_page_failure_after_previous_page_served() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "items", 1, json!([{"id": 1}, {"id": 2}]), Some(2)).await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut cursor = ids(&mock_server, "items").cursor();
    assert_eq!(cursor.next().await.unwrap(), Some(1));
    assert_eq!(cursor.next().await.unwrap(), Some(2));

    let err = cursor.next().await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert!(matches!(err, Error::PageFetch { page: 2, .. }));
    assert_eq!(cursor.next().await.unwrap(), None);
}

#[tokio::test]
async fn test_mapping_failure_does_not_poison_cursor() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "items",
        1,
        json!([{"id": 1}, {"name": "no id"}, {"id": 3}]),
        None,
    )
    .await;

    let mut cursor = ids(&mock_server, "items").cursor();
    assert_eq!(cursor.next().await.unwrap(), Some(1));
    assert!(cursor.next().await.unwrap_err().is_malformed());
    assert_eq!(cursor.next().await.unwrap(), Some(3));
    assert_eq!(cursor.next().await.unwrap(), None);
}

#[tokio::test]
async fn test_stream_yields_items_then_ends() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "items", 1, json!([{"id": 1}]), Some(2)).await;
    mount_page(&mock_server, "items", 2, json!([{"id": 2}]), None).await;

    let results: Vec<_> = ids(&mock_server, "items").stream().collect().await;
    let items: Vec<u64> = results.into_iter().map(Result::unwrap).collect();

    assert_eq!(items, vec![1, 2]);
}

#[tokio::test]
async fn test_stream_ends_after_fetch_error() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "items", 1, json!([{"id": 1}]), Some(2)).await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let results: Vec<_> = ids(&mock_server, "items").stream().collect().await;

    assert_eq!(results.len(), 2);
    assert_eq!(*results[0].as_ref().unwrap(), 1);
    assert!(results[1].as_ref().unwrap_err().is_transport());
}

#[tokio::test]
async fn test_stream_take_stops_fetching() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "items", 1, json!([{"id": 1}, {"id": 2}]), Some(2)).await;
    mount_page(&mock_server, "items", 2, json!([{"id": 3}]), None).await;

    let items: Vec<_> = ids(&mock_server, "items").stream().take(2).collect().await;

    assert_eq!(items.len(), 2);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_independent_cursors() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "items", 1, json!([{"id": 1}, {"id": 2}]), None).await;

    let pagination = ids(&mock_server, "items");
    let mut a = pagination.cursor();
    let mut b = pagination.cursor();

    assert_eq!(a.next().await.unwrap(), Some(1));
    assert_eq!(a.next().await.unwrap(), Some(2));
    assert_eq!(b.next().await.unwrap(), Some(1));
}

#[tokio::test]
async fn test_values_and_map() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "names", 1, json!(["a", "b"]), None).await;

    let client = client_for(&mock_server);
    let raw = Pagination::values(client.clone(), client.request("names"));
    assert_eq!(raw.collect_all().await.unwrap(), vec![json!("a"), json!("b")]);

    let upper = raw.map(|value| {
        value
            .as_str()
            .map(str::to_uppercase)
            .ok_or_else(|| Error::malformed("$", "expected a string"))
    });
    assert_eq!(upper.collect_all().await.unwrap(), vec!["A", "B"]);
}

#[test]
fn test_pagination_first_request() {
    let first = Request::parse("https://api.example.com/items?per_page=10").unwrap();
    let client = HttpClient::new().unwrap();
    let pagination = Pagination::values(client, first.clone());

    assert_eq!(pagination.first_request(), &first);
    let debug = format!("{:?}", pagination.cursor());
    assert!(debug.contains("fresh"));
}
