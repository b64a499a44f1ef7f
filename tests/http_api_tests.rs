//! JSON API over a real listener, plus the remote store against it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{json, Value};
use ultratrack::adapter::inbound::http::router;
use ultratrack::adapter::outbound::memory::MemoryStore;
use ultratrack::adapter::outbound::remote::RemoteStore;
use ultratrack::application::{RaceService, RaceSettings};
use ultratrack::port::{RaceStore, RaceTracker};

async fn spawn_api() -> (SocketAddr, Arc<RaceService>) {
    let service = Arc::new(RaceService::new(
        Arc::new(MemoryStore::new()),
        RaceSettings::default(),
    ));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(service.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, service)
}

fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{addr}{path}")
}

#[tokio::test]
async fn stats_start_at_zero_with_cors_header() {
    let (addr, _) = spawn_api().await;
    let response = reqwest::get(url(addr, "/stats")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total_km"], 0.0);
    assert_eq!(body["total_laps"], 0);
    assert!(body["updated_at"].is_string());
}

#[tokio::test]
async fn preflight_is_answered() {
    let (addr, _) = spawn_api().await;
    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, url(addr, "/distance"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.headers().contains_key("access-control-allow-methods"));
}

#[tokio::test]
async fn distance_routes_update_the_record() {
    let (addr, service) = spawn_api().await;
    let client = reqwest::Client::new();

    let set: Value = client
        .put(url(addr, "/distance"))
        .json(&json!({ "total_km": 40.0 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(set["total_km"], 40.0);
    assert_eq!(set["total_laps"], 100);

    let inc: Value = client
        .post(url(addr, "/distance/increment"))
        .json(&json!({ "delta_km": 2.0 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(inc["total_km"], 42.0);

    let laps: Value = client
        .post(url(addr, "/distance/laps"))
        .json(&json!({ "laps": 5 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(laps["added_laps"], 5);
    assert_eq!(laps["total_km"], 44.0);

    let put_laps: Value = client
        .put(url(addr, "/distance/laps"))
        .json(&json!({ "laps": 0 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(put_laps["total_km"], 0.0);

    assert_eq!(service.record().await.unwrap().total_km(), 0.0);
}

#[tokio::test]
async fn bad_bodies_are_rejected_with_400() {
    let (addr, service) = spawn_api().await;
    let client = reqwest::Client::new();

    let cases = [
        (reqwest::Method::PUT, "/distance", json!({})),
        (reqwest::Method::PUT, "/distance", json!({ "total_km": -1 })),
        (reqwest::Method::POST, "/distance/increment", json!({ "delta_km": 0 })),
        (reqwest::Method::POST, "/distance/laps", json!({ "laps": 1.5 })),
        (reqwest::Method::POST, "/distance/laps", json!({ "laps": 0 })),
        (
            reqwest::Method::POST,
            "/race-window",
            json!({ "race_start": "2025-10-05T10:00:00+03:00", "race_end": "2025-10-04T10:00:00+03:00" }),
        ),
        (
            reqwest::Method::POST,
            "/race-window",
            json!({ "race_start": "2025-10-04T10:00:00+03:00" }),
        ),
    ];

    for (method, path, body) in cases {
        let response = client
            .request(method.clone(), url(addr, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {path} {body}");
        let error: Value = response.json().await.unwrap();
        assert!(error["error"].is_string());
    }

    let malformed = client
        .put(url(addr, "/distance"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);

    assert_eq!(service.record().await.unwrap().total_km(), 0.0);
}

#[tokio::test]
async fn race_window_round_trips_verbatim() {
    let (addr, _) = spawn_api().await;
    let client = reqwest::Client::new();

    let default: Value = client
        .get(url(addr, "/race-window"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(default["race_start"], "2025-10-04T10:00:00+03:00");

    let body = json!({
        "race_start": "2025-12-31T18:00:00+03:00",
        "race_end": "2026-01-01T18:00:00+03:00",
    });
    let response = client
        .post(url(addr, "/race-window"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored: Value = client
        .get(url(addr, "/race-window"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored["race_start"], body["race_start"]);
    assert_eq!(stored["race_end"], body["race_end"]);
}

#[tokio::test]
async fn reset_and_view() {
    let (addr, service) = spawn_api().await;
    service.set_total_km(185.0).await.unwrap();

    let view: Value = reqwest::get(url(addr, "/view"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["total_km"], 185.0);
    assert_eq!(view["rank"], "2nd");
    assert_eq!(view["next_rank"], "1st");
    assert_eq!(view["ranks"].as_array().unwrap().len(), 4);
    assert!(view["computed_at"].is_string());

    let reset: Value = reqwest::Client::new()
        .post(url(addr, "/reset"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reset["total_km"], 0.0);
}

#[tokio::test]
async fn health_and_mini_app_are_served() {
    let (addr, _) = spawn_api().await;

    let health: Value = reqwest::get(url(addr, "/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health, json!({ "status": "ok", "store": "memory" }));

    let index = reqwest::get(url(addr, "/")).await.unwrap();
    assert_eq!(index.status(), StatusCode::OK);
    assert!(index.text().await.unwrap().contains("app.js"));

    let script = reqwest::get(url(addr, "/app.js")).await.unwrap();
    assert!(script.text().await.unwrap().contains("fetch('view'"));
}

#[tokio::test]
async fn remote_store_shares_state_with_the_api() {
    let (addr, service) = spawn_api().await;
    let remote = RemoteStore::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();

    let record = remote.load_record().await.unwrap().unwrap();
    assert_eq!(record.total_km(), 0.0);

    let bot_side = RaceService::new(Arc::new(remote), RaceSettings::default());
    bot_side.increment_km(3.5).await.unwrap();
    assert_eq!(service.record().await.unwrap().total_km(), 3.5);

    let window = ultratrack::domain::RaceWindow::parse(
        Some("2026-05-01T09:00:00+03:00"),
        Some("2026-05-02T09:00:00+03:00"),
        chrono::Utc::now(),
    )
    .unwrap();
    bot_side
        .set_window(window.race_start().clone(), window.race_end().clone())
        .await
        .unwrap();
    assert_eq!(
        service.window().await.unwrap().race_start().as_str(),
        "2026-05-01T09:00:00+03:00"
    );
}
