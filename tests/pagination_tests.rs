use ezyvet::client::{build_http_client, ApiError, EzyVetClient, PageLimit};
use ezyvet::filter::Filter;
use ezyvet::token_store::AccessToken;
use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client(server: &MockServer) -> EzyVetClient {
    let base_url = Url::parse(&format!("{}/v1", server.uri())).unwrap();
    EzyVetClient::new(build_http_client(5).unwrap(), base_url, AccessToken::new("token"))
}

fn animal(id: u64) -> Value {
    json!({"animal": {"id": id.to_string(), "name": format!("Animal {}", id)}})
}

/// Serves `/v1/animal` as `total` pages of two records each
async fn mount_animals(server: &MockServer, total: Value) {
    let total_pages = match &total {
        Value::String(s) => s.parse::<u64>().unwrap(),
        other => other.as_f64().unwrap() as u64,
    };
    Mock::given(method("GET"))
        .and(path("/v1/animal"))
        .and(header("authorization", "Bearer token"))
        .respond_with(move |request: &Request| {
            let page = request
                .url
                .query_pairs()
                .find(|(k, _)| k == "page")
                .map(|(_, v)| v.parse::<u64>().unwrap())
                .unwrap_or(1);
            if page > total_pages {
                return ResponseTemplate::new(500);
            }
            ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"items_page_total": total.clone(), "items_page": page},
                "items": [animal(page * 10 + 1), animal(page * 10 + 2)]
            }))
        })
        .mount(server)
        .await;
}

fn ids(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|item| item["animal"]["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_single_page_without_page_parameter() {
    let server = MockServer::start().await;
    mount_animals(&server, json!(1)).await;

    let items = client(&server)
        .animals(None, PageLimit::Unlimited)
        .await
        .unwrap();
    assert_eq!(ids(&items), vec!["11", "12"]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query_pairs().all(|(k, _)| k != "page"));
}

#[tokio::test]
async fn test_stops_at_page_total() {
    let server = MockServer::start().await;
    mount_animals(&server, json!(3)).await;

    let items = client(&server)
        .animals(None, PageLimit::Unlimited)
        .await
        .unwrap();
    assert_eq!(ids(&items), vec!["11", "12", "21", "22", "31", "32"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_stops_at_page_limit() {
    let server = MockServer::start().await;
    mount_animals(&server, json!(5)).await;

    let items = client(&server)
        .animals(None, PageLimit::pages(2))
        .await
        .unwrap();
    assert_eq!(ids(&items), vec!["11", "12", "21", "22"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_page_total_as_string() {
    let server = MockServer::start().await;
    mount_animals(&server, json!("2")).await;

    let items = client(&server)
        .animals(None, PageLimit::from_record_count(100))
        .await
        .unwrap();
    assert_eq!(items.len(), 4);
}

#[tokio::test]
async fn test_filter_is_sent_on_every_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/appointment"))
        .and(query_param("active", "1"))
        .and(query_param("type_id", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"items_page_total": 2},
            "items": [{"appointment": {"id": "1"}}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let filter = Filter::new().with("active", 1).with("type_id", "4");
    let items = client(&server)
        .appointments(Some(&filter), PageLimit::Unlimited)
        .await
        .unwrap();
    assert_eq!(items.len(), 2);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[1]
        .url
        .query_pairs()
        .any(|(k, v)| k == "page" && v == "2"));
}

#[tokio::test]
async fn test_non_200_stops_the_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/animal"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    match client(&server).animals(None, PageLimit::Unlimited).await {
        Err(ApiError::UnexpectedStatus {
            path,
            page,
            status,
            body,
        }) => {
            assert_eq!(path, "/animal");
            assert_eq!(page, 1);
            assert_eq!(status.as_u16(), 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failure_on_later_page_discards_items() {
    let server = MockServer::start().await;
    // claims four pages but fails on the second
    Mock::given(method("GET"))
        .and(path("/v1/animal"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/animal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"items_page_total": 4},
            "items": [animal(1)]
        })))
        .mount(&server)
        .await;

    let result = client(&server).animals(None, PageLimit::Unlimited).await;
    assert!(matches!(
        result,
        Err(ApiError::UnexpectedStatus { page: 2, .. })
    ));
}

#[tokio::test]
async fn test_malformed_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/animal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"messages": []})))
        .mount(&server)
        .await;

    let result = client(&server).animals(None, PageLimit::Unlimited).await;
    assert!(matches!(result, Err(ApiError::MalformedPage { page: 1, .. })));
}

async fn mount_body(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v1/animal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn malformed_reason(body: Value) -> String {
    let server = MockServer::start().await;
    mount_body(&server, body).await;
    match client(&server).animals(None, PageLimit::Unlimited).await {
        Err(ApiError::MalformedPage { path, page, reason }) => {
            assert_eq!(path, "/animal");
            assert_eq!(page, 1);
            reason
        }
        other => panic!("expected MalformedPage, got {:?}", other),
    }
}

#[tokio::test]
async fn test_items_must_be_an_array() {
    let reason = malformed_reason(json!({
        "meta": {"items_page_total": 1},
        "items": {"animal": {"id": "1"}}
    }))
    .await;
    assert!(reason.contains("array"), "{}", reason);
}

#[tokio::test]
async fn test_page_total_must_be_present() {
    let reason = malformed_reason(json!({
        "meta": {"items_page": 1},
        "items": [animal(1)]
    }))
    .await;
    assert!(reason.contains("items_page_total"), "{}", reason);
}

#[tokio::test]
async fn test_page_total_must_be_numeric() {
    let reason = malformed_reason(json!({
        "meta": {"items_page_total": "many"},
        "items": [animal(1)]
    }))
    .await;
    assert!(reason.contains("items_page_total"), "{}", reason);
}

#[tokio::test]
async fn test_body_must_be_an_object() {
    let reason = malformed_reason(json!([animal(1)])).await;
    assert!(reason.contains("object"), "{}", reason);
}

#[tokio::test]
async fn test_fractional_page_total() {
    let server = MockServer::start().await;
    mount_animals(&server, json!(2.0)).await;

    let items = client(&server)
        .animals(None, PageLimit::Unlimited)
        .await
        .unwrap();
    assert_eq!(ids(&items), vec!["11", "12", "21", "22"]);
}

#[tokio::test]
async fn test_unreachable_server() {
    // nothing listens on the discard port
    let base_url = Url::parse("http://127.0.0.1:9/v1").unwrap();
    let client = EzyVetClient::new(
        build_http_client(5).unwrap(),
        base_url,
        AccessToken::new("token"),
    );

    match client.animals(None, PageLimit::Unlimited).await {
        Err(ApiError::HttpError(e)) => assert!(e.is_connect() || e.is_request(), "{:?}", e),
        other => panic!("expected HttpError, got {:?}", other),
    }
}
