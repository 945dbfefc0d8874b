//! Integration tests for the banner backend.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::{Config, DEFAULT_CALENDAR_URL};
use crate::errors::AppError;
use crate::holidays::{CalendarFeed, CalendarItem, HolidayReconciler, HolidayTable};
use crate::store::BannerStore;
use crate::{create_router, AppState};

/// Calendar feed that always returns the same titles.
struct FixedFeed(Vec<String>);

#[async_trait]
impl CalendarFeed for FixedFeed {
    async fn fetch(&self, _: NaiveDate, _: NaiveDate) -> Result<Vec<CalendarItem>, AppError> {
        Ok(self
            .0
            .iter()
            .map(|title| CalendarItem {
                title: title.clone(),
                date: None,
            })
            .collect())
    }
}

struct DownFeed;

#[async_trait]
impl CalendarFeed for DownFeed {
    async fn fetch(&self, _: NaiveDate, _: NaiveDate) -> Result<Vec<CalendarItem>, AppError> {
        Err(AppError::FeedUnavailable("Calendar feed timed out".to_string()))
    }
}

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::build(Some("test-api-key".to_string()), Arc::new(FixedFeed(vec![]))).await
    }

    async fn with_feed(feed: Arc<dyn CalendarFeed>) -> Self {
        Self::build(Some("test-api-key".to_string()), feed).await
    }

    async fn build(psk: Option<String>, feed: Arc<dyn CalendarFeed>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let v1_path = temp_dir.path().join("banners_v1.json");
        let v2_path = temp_dir.path().join("banners_v2.json");

        let store = Arc::new(BannerStore::open(&v1_path, &v2_path));
        let reconciler = Arc::new(HolidayReconciler::new(
            feed,
            store.clone(),
            HolidayTable::default(),
            0,
        ));

        let config = Config {
            api_psk: psk.clone(),
            v1_path,
            v2_path,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            calendar_url: DEFAULT_CALENDAR_URL.to_string(),
            lookahead_days: 0,
            feed_timeout: std::time::Duration::from_secs(1),
            reconcile_enabled: false,
            reconcile_hour_utc: 0,
            holidays_path: None,
        };

        let state = AppState {
            store,
            reconciler,
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let mut client_builder = Client::builder();
        if let Some(key) = psk {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert("x-api-key", key.parse().unwrap());
            client_builder = client_builder.default_headers(headers);
        }

        TestFixture {
            client: client_builder.build().unwrap(),
            base_url,
            temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        (resp.status().as_u16(), resp.json().await.unwrap())
    }

    async fn post_json(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        (resp.status().as_u16(), resp.json().await.unwrap())
    }

    async fn patch_json(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .patch(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        (resp.status().as_u16(), resp.json().await.unwrap())
    }

    async fn delete_json(&self, path: &str) -> (u16, Value) {
        let resp = self.client.delete(self.url(path)).send().await.unwrap();
        (resp.status().as_u16(), resp.json().await.unwrap())
    }
}

fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_auth_missing_psk() {
    let fixture = TestFixture::new().await;

    let resp = Client::new()
        .get(fixture.url("/api/v2/banners"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_auth_invalid_psk() {
    let fixture = TestFixture::new().await;

    let resp = Client::new()
        .get(fixture.url("/api/v2/banners"))
        .header("x-api-key", "wrong-key")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_auth_bearer_token() {
    let fixture = TestFixture::new().await;

    let resp = Client::new()
        .get(fixture.url("/api/v1/banners"))
        .bearer_auth("test-api-key")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_auth_disabled_without_psk() {
    let fixture = TestFixture::build(None, Arc::new(FixedFeed(vec![]))).await;

    let resp = Client::new()
        .get(fixture.url("/api/v2/banners"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_list_empty_before_first_use() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/v2/banners").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));

    let (status, body) = fixture.get_json("/api/v1/banners").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_v2_banner_crud() {
    let fixture = TestFixture::new().await;

    // Add
    let (status, body) = fixture
        .post_json(
            "/api/v2/banners",
            json!({
                "id": "maintenance",
                "type": "warning",
                "header": "Scheduled maintenance",
                "content": "The app will be offline Sunday night."
            }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["id"], "maintenance");
    assert_eq!(body["data"]["persistent"], true);
    assert!(body["data"].get("enabled").is_none());

    // Get
    let (status, body) = fixture.get_json("/api/v2/banners/maintenance").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["type"], "warning");

    // Partial edit
    let (status, body) = fixture
        .patch_json(
            "/api/v2/banners/maintenance",
            json!({ "content": "Maintenance moved to Monday.", "enabled": false }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["content"], "Maintenance moved to Monday.");
    assert_eq!(body["data"]["header"], "Scheduled maintenance");
    assert_eq!(body["data"]["type"], "warning");
    assert_eq!(body["data"]["enabled"], false);

    // Rename keeps position
    fixture
        .post_json(
            "/api/v2/banners",
            json!({ "id": "welcome", "type": "general", "header": "Hi", "content": "Welcome" }),
        )
        .await;
    let (status, _) = fixture
        .patch_json(
            "/api/v2/banners/maintenance",
            json!({ "id": "maintenance-monday" }),
        )
        .await;
    assert_eq!(status, 200);
    let (_, body) = fixture.get_json("/api/v2/banners").await;
    assert_eq!(ids(&body), vec!["maintenance-monday", "welcome"]);

    // Delete
    let (status, body) = fixture.delete_json("/api/v2/banners/welcome").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["id"], "welcome");

    let (status, body) = fixture.get_json("/api/v2/banners/welcome").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (_, body) = fixture.get_json("/api/v2/banners").await;
    assert_eq!(ids(&body), vec!["maintenance-monday"]);
}

#[tokio::test]
async fn test_v2_duplicate_id_rejected() {
    let fixture = TestFixture::new().await;
    let banner = json!({ "id": "dup", "type": "update", "header": "h", "content": "c" });

    let (status, _) = fixture.post_json("/api/v2/banners", banner.clone()).await;
    assert_eq!(status, 200);

    let (status, body) = fixture.post_json("/api/v2/banners", banner).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (_, body) = fixture.get_json("/api/v2/banners").await;
    assert_eq!(ids(&body), vec!["dup"]);
}

#[tokio::test]
async fn test_v2_missing_id_rejected() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post_json(
            "/api/v2/banners",
            json!({ "type": "update", "header": "h", "content": "c" }),
        )
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_edit_and_delete_unknown_id() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .patch_json("/api/v2/banners/nope", json!({ "header": "x" }))
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = fixture.delete_json("/api/v1/banners/nope").await;
    assert_eq!(status, 404);

    assert!(!fixture.temp_dir.path().join("banners_v1.json").exists());
    assert!(!fixture.temp_dir.path().join("banners_v2.json").exists());
}

#[tokio::test]
async fn test_v1_banner_crud() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post_json(
            "/api/v1/banners",
            json!({ "id": "legacy", "content": "Please update your app", "type": "alert" }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "Please update your app");
    assert_eq!(
        body["data"]["style"],
        json!({ "color": "#E53E3E", "fontWeight": "bold", "textAlign": "center", "fontSize": 16 })
    );

    // Editing content alone keeps the color
    let (status, body) = fixture
        .patch_json(
            "/api/v1/banners/legacy",
            json!({ "content": "Please update today" }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "Please update today");
    assert_eq!(body["data"]["style"]["color"], "#E53E3E");

    let (status, body) = fixture
        .patch_json("/api/v1/banners/legacy", json!({ "type": "update" }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["style"]["color"], "#48BB78");

    let (status, body) = fixture
        .patch_json("/api/v1/banners/legacy", json!({ "type": "sparkly" }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = fixture.delete_json("/api/v1/banners/legacy").await;
    assert_eq!(status, 200);
    let (_, body) = fixture.get_json("/api/v1/banners").await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_versions_are_independent() {
    let fixture = TestFixture::new().await;

    fixture
        .post_json(
            "/api/v1/banners",
            json!({ "id": "shared", "content": "v1 text", "type": "blue" }),
        )
        .await;
    let (status, _) = fixture
        .post_json(
            "/api/v2/banners",
            json!({ "id": "shared", "type": "blue", "header": "h", "content": "v2 text" }),
        )
        .await;
    assert_eq!(status, 200);

    std::fs::write(fixture.temp_dir.path().join("banners_v2.json"), "{ broken").unwrap();

    let (status, body) = fixture.get_json("/api/v2/banners").await;
    assert_eq!(status, 500);
    assert_eq!(body["error"]["code"], "STORAGE_ERROR");

    let (status, body) = fixture.get_json("/api/v1/banners").await;
    assert_eq!(status, 200);
    assert_eq!(ids(&body), vec!["shared"]);
}

#[tokio::test]
async fn test_reconcile_endpoint_inserts_holiday_banner() {
    let fixture =
        TestFixture::with_feed(Arc::new(FixedFeed(vec!["Chanukah: 6 Candles".to_string()])))
            .await;
    fixture
        .post_json(
            "/api/v2/banners",
            json!({ "id": "welcome", "type": "general", "header": "Hi", "content": "Welcome" }),
        )
        .await;

    let (status, body) = fixture.post_json("/api/holidays/reconcile", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["matched"], "chanukah");
    let inserted = body["data"]["inserted"].as_str().unwrap().to_string();
    assert!(inserted.starts_with("chanukah_"));

    let (_, body) = fixture.get_json(&format!("/api/v2/banners/{}", inserted)).await;
    assert_eq!(body["data"]["type"], "holiday");
    assert_eq!(body["data"]["header"], "Happy Chanukah!");
    assert_eq!(body["data"]["persistent"], true);

    // Second run changes nothing
    let (status, body) = fixture.post_json("/api/holidays/reconcile", json!({})).await;
    assert_eq!(status, 200);
    assert!(body["data"]["inserted"].is_null());
    assert_eq!(body["data"]["deleted"], json!([]));

    let (_, body) = fixture.get_json("/api/v2/banners").await;
    assert_eq!(ids(&body), vec!["welcome".to_string(), inserted]);
}

#[tokio::test]
async fn test_reconcile_endpoint_feed_down() {
    let fixture = TestFixture::with_feed(Arc::new(DownFeed)).await;
    fixture
        .post_json(
            "/api/v2/banners",
            json!({ "id": "welcome", "type": "general", "header": "Hi", "content": "Welcome" }),
        )
        .await;

    let (status, body) = fixture.post_json("/api/holidays/reconcile", json!({})).await;
    assert_eq!(status, 502);
    assert_eq!(body["error"]["code"], "FEED_UNAVAILABLE");

    let (_, body) = fixture.get_json("/api/v2/banners").await;
    assert_eq!(ids(&body), vec!["welcome"]);
}
