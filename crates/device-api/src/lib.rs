//! LAN Device API
//!
//! Resource adapter over the device store plus the HTTP host that serves it.

use axum::{routing::get, Router};
use device_store::{Device, Store};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
mod error;
mod request;
mod resource;
mod response;
mod routes;

pub use crate::config::{Mode, ServerConfig};
pub use error::{InputError, ResourceError};
pub use request::{dispatch, CrudRequest, Operation, Request};
pub use resource::{DeviceResource, Resource};
pub use response::{Payload, Response, Status};

/// Devices the store starts with when seeding is enabled
pub fn demo_devices() -> Vec<Device> {
    ["Device one", "Device two", "Device three"]
        .into_iter()
        .map(|name| Device::new(name, "Switch"))
        .collect()
}

/// Create the application router for any [`Resource`]
pub fn create_router<R>(resource: Arc<R>) -> Router
where
    R: Resource + 'static,
{
    Router::new()
        .route("/status", get(routes::status::status))
        .route(
            "/api/devices",
            get(routes::devices::list::<R>).post(routes::devices::create::<R>),
        )
        .route(
            "/api/devices/:id",
            get(routes::devices::get_one::<R>)
                .patch(routes::devices::update::<R>)
                .put(routes::devices::update::<R>)
                .delete(routes::devices::delete::<R>),
        )
        .with_state(resource)
}

/// Initialize logging for the given mode
pub fn init_logging(mode: Mode) {
    let result = match mode {
        Mode::Debug => tracing::subscriber::set_global_default(
            FmtSubscriber::builder()
                .with_max_level(Level::DEBUG)
                .with_target(true)
                .finish(),
        ),
        Mode::Prod => tracing::subscriber::set_global_default(
            FmtSubscriber::builder()
                .with_max_level(Level::INFO)
                .with_target(true)
                .json()
                .finish(),
        ),
    };

    if let Err(err) = result {
        eprintln!("Failed to set tracing subscriber: {}", err);
    }
}

/// Run the server until Ctrl-C or SIGTERM
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = if config.seed_devices {
        Store::with_devices(demo_devices())
    } else {
        Store::new()
    };
    info!("Device store ready with {} devices", store.len());

    let resource = Arc::new(DeviceResource::new(Arc::new(store)));
    let mut app = create_router(resource);
    if config.mode == Mode::Debug {
        app = app.layer(TraceLayer::new_for_http());
    }

    let addr = config.addr();
    info!("Starting API server on {} ({:?} mode)", addr, config.mode);

    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{self, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> (Router, Arc<Store>) {
        let store = Arc::new(Store::new());
        let resource = Arc::new(DeviceResource::new(store.clone()));
        (create_router(resource), store)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = http::Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn json_body(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let (app, _) = app();
        let (status, body) = send(&app, "GET", "/status", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn test_switch_scenario_over_http() {
        let (app, store) = app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/devices",
            Some(r#"{"name": "Switch A", "type": "Switch"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            json_body(&body),
            json!({"id": "1", "name": "Switch A", "type": "Switch"})
        );

        let (status, _) = send(
            &app,
            "POST",
            "/api/devices",
            Some(r#"{"name": "Switch B", "type": "Switch"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "GET", "/api/devices", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_body(&body),
            json!([
                {"id": "1", "name": "Switch A", "type": "Switch"},
                {"id": "2", "name": "Switch B", "type": "Switch"},
            ])
        );

        let (status, body) = send(&app, "DELETE", "/api/devices/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, body) = send(&app, "GET", "/api/devices/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(&body),
            json!({"error": {"status": 404, "message": "Device for id 1 not found"}})
        );

        let (status, body) = send(
            &app,
            "PATCH",
            "/api/devices/2",
            Some(r#"{"name": "Switch B2", "type": "Switch"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, body) = send(&app, "GET", "/api/devices/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_body(&body),
            json!({"id": "2", "name": "Switch B2", "type": "Switch"})
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_path_id_wins_on_update() {
        let (app, store) = app();
        store.insert(Device::new("a", "Switch"));
        store.insert(Device::new("b", "Switch"));

        let (status, _) = send(
            &app,
            "PUT",
            "/api/devices/2",
            Some(r#"{"id": "1", "name": "b2", "type": "Switch"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(store.get_one("1").unwrap().name, "a");
        assert_eq!(store.get_one("2").unwrap().name, "b2");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (app, store) = app();

        for body in ["{not json", r#"["a"]"#, r#"{"name": 1}"#, ""] {
            let (status, response) = send(&app, "POST", "/api/devices", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
            assert_eq!(
                json_body(&response),
                json!({"error": {"status": 400, "message": "Invalid instance given"}})
            );
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found_over_http() {
        let (app, _) = app();

        let (status, _) = send(&app, "DELETE", "/api/devices/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "PATCH",
            "/api/devices/9",
            Some(r#"{"name": "x", "type": "y"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_concurrent_creates_over_http() {
        let (app, store) = app();

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let app = app.clone();
                tokio::spawn(async move {
                    let body = format!(r#"{{"name": "d{i}", "type": "Switch"}}"#);
                    send(&app, "POST", "/api/devices", Some(body.as_str())).await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            let (status, body) = task.await.unwrap();
            assert_eq!(status, StatusCode::CREATED);
            let id: u64 = json_body(&body)["id"].as_str().unwrap().parse().unwrap();
            ids.push(id);
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=32).collect::<Vec<_>>());
        assert_eq!(store.len(), 32);
    }

    struct FailingResource;

    impl Resource for FailingResource {
        fn list(&self, _request: &Request) -> Result<Response, ResourceError> {
            Err(ResourceError::Other("backend unavailable".into()))
        }

        fn get(&self, _id: &str, request: &Request) -> Result<Response, ResourceError> {
            self.list(request)
        }

        fn create(&self, _candidate: Value, request: &Request) -> Result<Response, ResourceError> {
            self.list(request)
        }

        fn update(&self, _candidate: Value, request: &Request) -> Result<Response, ResourceError> {
            self.list(request)
        }

        fn delete(&self, _id: &str, request: &Request) -> Result<Response, ResourceError> {
            self.list(request)
        }
    }

    #[tokio::test]
    async fn test_unclassified_errors_are_server_errors() {
        let app = create_router(Arc::new(FailingResource));

        let (status, body) = send(&app, "GET", "/api/devices", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(&body),
            json!({"error": {"status": 500, "message": "backend unavailable"}})
        );
    }

    #[test]
    fn test_demo_devices_seed_in_order() {
        let store = Store::with_devices(demo_devices());

        assert_eq!(store.get_one("1").unwrap().name, "Device one");
        assert_eq!(store.get_one("3").unwrap().name, "Device three");
        assert_eq!(store.get_one("3").unwrap().kind, "Switch");
    }
}
