//! Gateway configuration.

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the upstream people API (no trailing slash)
    pub upstream_base_url: String,
    /// Timeout for reading an incoming request body in milliseconds
    pub request_timeout_ms: u64,
    /// Timeout for a single upstream call in milliseconds
    pub upstream_timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            upstream_base_url: "http://localhost:3000".to_string(),
            request_timeout_ms: 5000,   // 5 seconds default
            upstream_timeout_ms: 10000, // 10 seconds default
        }
    }
}

impl GatewayConfig {
    /// Base URL with any trailing slash removed, so joined paths stay clean.
    pub fn upstream_base(&self) -> &str {
        self.upstream_base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = GatewayConfig {
            upstream_base_url: "http://localhost:3000/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.upstream_base(), "http://localhost:3000");
    }
}
