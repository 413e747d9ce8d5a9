use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Origin plus the `/api` prefix; endpoint paths are appended to it.
    pub base_url: String,
    /// `None` leaves connection setup to the transport.
    pub connect_timeout: Option<Duration>,
    /// `None` leaves request duration to the transport.
    pub request_timeout: Option<Duration>,
    /// Upper bound on concurrent calls issued by one bulk action.
    pub bulk_concurrency: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: None,
            request_timeout: None,
            bulk_concurrency: 8,
        }
    }
}
