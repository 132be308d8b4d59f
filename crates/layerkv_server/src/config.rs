//! Server configuration.

/// Configuration for the request handler.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum transaction nesting depth (`None` = unlimited).
    pub max_depth: Option<usize>,
    /// Maximum key length in bytes (`usize::MAX` = unlimited).
    pub max_key_len: usize,
    /// Whether deleting a key that does not resolve is a 404.
    pub strict_delete: bool,
    /// Whether the administrative `clear` request is accepted.
    pub allow_clear: bool,
}

impl ServerConfig {
    /// Creates a configuration with default limits.
    pub fn new() -> Self {
        Self {
            max_depth: Some(64),
            max_key_len: usize::MAX,
            strict_delete: false,
            allow_clear: false,
        }
    }

    /// Sets the maximum transaction depth.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the maximum key length.
    pub fn with_max_key_len(mut self, max_key_len: usize) -> Self {
        self.max_key_len = max_key_len;
        self
    }

    /// Sets whether deletes of unknown keys are rejected.
    pub fn with_strict_delete(mut self, strict: bool) -> Self {
        self.strict_delete = strict;
        self
    }

    /// Sets whether `clear` is accepted.
    pub fn with_allow_clear(mut self, allow: bool) -> Self {
        self.allow_clear = allow;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.max_depth, Some(64));
        assert_eq!(config.max_key_len, usize::MAX);
        assert!(!config.strict_delete);
        assert!(!config.allow_clear);
    }

    #[test]
    fn config_builder() {
        let config = ServerConfig::new()
            .with_max_depth(None)
            .with_max_key_len(8)
            .with_strict_delete(true)
            .with_allow_clear(true);

        assert_eq!(config.max_depth, None);
        assert_eq!(config.max_key_len, 8);
        assert!(config.strict_delete);
        assert!(config.allow_clear);
    }
}
