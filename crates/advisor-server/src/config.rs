/// Server configuration loaded explicitly from environment variables.
///
/// The model credential is deliberately not part of this struct — it is
/// read only inside the Gemini client component and never travels through
/// server plumbing.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. "0.0.0.0:8080".
    pub bind_addr: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `ADVISOR_BIND_ADDR`: listen address (default "0.0.0.0:8080")
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("ADVISOR_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        Self { bind_addr }
    }
}
