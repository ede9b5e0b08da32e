/// Liveness probe for `GET /`.
pub async fn health_handler() -> &'static str {
    "Hello world!"
}
