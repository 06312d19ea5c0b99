//! Status Route

/// Liveness probe
pub async fn status() -> &'static str {
    "OK"
}
