use catalog_search::{
    Client, QueryValues, ReqwestTransport, SearchError, TransportError, set_request_id,
    set_timeout,
};
use httpmock::prelude::*;
use std::time::Duration;

const RESULT_BODY: &str = r#"{
    "total_hits": 12,
    "assets": [
        {
            "type": "episode",
            "video_id": "2222333",
            "title_sv": "Avsnitt 1",
            "brand": {"id": "34515", "title_sv": "Solsidan"},
            "season": {"season_number": 1},
            "episode_number": 1
        },
        {
            "type": "series",
            "brand_id": "34515",
            "title_sv": "Solsidan",
            "seasons": [1, 2, 3, 4, 5]
        }
    ]
}"#;

fn client(server: &MockServer) -> Client {
    Client::builder()
        .base_url(server.base_url())
        .build()
        .unwrap()
}

#[test]
fn test_search_over_http() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("site", "cmore.se")
            .query_param("brand_id", "34515")
            .query_param("fields", "title_sv,type")
            .header("x-request-id", "abc-123");
        then.status(200)
            .header("content-type", "application/json; charset=utf-8")
            .body(RESULT_BODY);
    });

    let query = QueryValues::from([
        ("site", "cmore.se"),
        ("brand_id", "34515"),
        ("fields", "title_sv"),
    ]);
    let response = client(&server)
        .search(query, [set_request_id("abc-123")])
        .unwrap();

    mock.assert();
    assert_eq!(response.total_hits, 12);
    assert_eq!(response.hits.len(), 2);

    let episode = response.hits[0].as_asset().unwrap();
    assert_eq!(episode.brand.titles.sv, "Solsidan");
    assert_eq!(episode.season.number, 1);
    assert_eq!(response.hits[0].subset().id, "2222333");

    let series = response.hits[1].as_series().unwrap();
    assert_eq!(series.seasons.len(), 5);
    assert_eq!(response.hits[1].subset().id, "34515");

    assert_eq!(response.meta.status.map(|s| s.as_u16()), Some(200));
    assert_eq!(response.meta.request_url.path(), "/search");
}

#[test]
fn test_base_url_path_is_kept() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v2/search");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"total_hits": 0, "assets": []}"#);
    });

    let client = Client::builder()
        .base_url(server.url("/v2/"))
        .build()
        .unwrap();
    let response = client.search(QueryValues::new(), []).unwrap();

    mock.assert();
    assert_eq!(response.total_hits, 0);
    assert!(response.hits.is_empty());
}

#[test]
fn test_wrapped_reqwest_client_keeps_its_configuration() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .header("user-agent", "catalog-search-tests");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"total_hits": 4}"#);
    });

    let http = reqwest::blocking::Client::builder()
        .user_agent("catalog-search-tests")
        .build()
        .unwrap();
    let client = Client::builder()
        .base_url(server.base_url())
        .transport(ReqwestTransport::with_client(http))
        .build()
        .unwrap();

    let response = client.search(QueryValues::new(), []).unwrap();

    mock.assert();
    assert_eq!(response.total_hits, 4);
}

#[test]
fn test_plain_text_server_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(500)
            .header("content-type", "text/plain; charset=utf-8")
            .body("all is lost!");
    });

    let failure = client(&server)
        .search(QueryValues::from([("site", "cmore.se")]), [])
        .unwrap_err();

    assert!(matches!(failure.error(), SearchError::HttpStatus { .. }));
    assert_eq!(failure.to_string(), "500 Internal Server Error");

    let response = failure.response().unwrap();
    assert_eq!(response.meta.status.map(|s| s.as_u16()), Some(500));
    assert_eq!(response.meta.request_url.query(), Some("site=cmore.se"));
}

#[test]
fn test_api_error_document() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(400)
            .header("content-type", "application/json")
            .body(r#"{"status":"error","code":400,"message":"Invalid parameters: site"}"#);
    });

    let failure = client(&server).search(QueryValues::new(), []).unwrap_err();

    let api_error = failure.error().as_api_error().unwrap();
    assert_eq!(api_error.code, 400);
    assert_eq!(api_error.message, "Invalid parameters: site");
}

#[test]
fn test_request_timeout() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"total_hits": 0}"#)
            .delay(Duration::from_secs(3));
    });

    let failure = client(&server)
        .search(
            QueryValues::new(),
            [set_timeout(Duration::from_millis(200))],
        )
        .unwrap_err();

    assert!(matches!(
        failure.error(),
        SearchError::Transport(TransportError::Timeout)
    ));
    let response = failure.response().unwrap();
    assert_eq!(response.meta.status, None);
}
