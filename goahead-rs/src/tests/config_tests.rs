//! Tests for configuration loading
//!
//! Loading goes through `MemoryConfigProvider` so the tests never touch the
//! process environment.

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use crate::config::{
        ConfigProvider, EnvConfigProvider, GoAheadConfig, MemoryConfigProvider, DEFAULT_TIMEOUT,
        DEFAULT_USER_AGENT,
    };

    #[test]
    fn test_memory_config_provider() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("URL", "https://goahead.example.com");
        provider.set("TIMEOUT", "  ");

        assert_eq!(provider.get_string("URL").unwrap(), "https://goahead.example.com");
        assert!(provider.get_string("MISSING").is_err());
        assert_eq!(provider.get_optional("TIMEOUT"), None);
        assert_eq!(provider.get_optional("MISSING"), None);
    }

    #[test]
    fn test_env_key_formatting() {
        let provider = EnvConfigProvider::new().with_prefix("GOAHEAD");

        assert_eq!(provider.format_key("url"), "GOAHEAD_URL");
        assert_eq!(provider.format_key("url-ca-file"), "GOAHEAD_URL_CA_FILE");
        assert_eq!(EnvConfigProvider::new().format_key("timeout"), "TIMEOUT");
    }

    #[test]
    fn test_minimal_config() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("URL", "https://goahead.example.com");

        let config = GoAheadConfig::from_provider(&provider).unwrap();

        assert_eq!(config.goahead_url, "https://goahead.example.com");
        assert_eq!(config.ca_file, None);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_full_config() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("URL", "https://goahead.example.com/");
        provider.set("URL_CA_FILE", "/etc/ssl/goahead.pem");
        provider.set("TIMEOUT", "10s");
        provider.set("USER_AGENT", "node-agent/2.1");

        let config = GoAheadConfig::from_provider(&provider).unwrap();

        assert_eq!(config.ca_file, Some(PathBuf::from("/etc/ssl/goahead.pem")));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.user_agent, "node-agent/2.1");
    }

    #[test]
    fn test_from_env() {
        // Only this test touches GOAHEAD_* in the library test process
        std::env::set_var("GOAHEAD_URL", "https://env.goahead.example.com");
        std::env::set_var("GOAHEAD_TIMEOUT", "45s");
        std::env::remove_var("GOAHEAD_URL_CA_FILE");

        let loaded = GoAheadConfig::from_env();

        std::env::remove_var("GOAHEAD_URL");
        std::env::remove_var("GOAHEAD_TIMEOUT");

        let config = loaded.unwrap();
        assert_eq!(config.goahead_url, "https://env.goahead.example.com");
        assert_eq!(config.timeout, Duration::from_secs(45));
        assert_eq!(config.ca_file, None);
    }

    #[test]
    fn test_url_is_required() {
        let provider = MemoryConfigProvider::new();
        let err = GoAheadConfig::from_provider(&provider).unwrap_err();
        assert_eq!(err.kind(), "configuration");
    }

    #[test]
    fn test_invalid_timeout() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("URL", "https://goahead.example.com");
        provider.set("TIMEOUT", "whenever");

        let err = GoAheadConfig::from_provider(&provider).unwrap_err();
        assert!(err.to_string().contains("whenever"));
    }

    #[test]
    fn test_validate_rejects_unusable_urls() {
        assert!(GoAheadConfig::new("goahead.example.com").validate().is_err());
        assert!(GoAheadConfig::new("ftp://goahead.example.com").validate().is_err());
        assert!(GoAheadConfig::new("https://goahead.example.com?x=1").validate().is_err());
        assert!(GoAheadConfig::new("https://goahead.example.com")
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());

        assert!(GoAheadConfig::new("http://10.0.0.5:8080").validate().is_ok());
        assert!(GoAheadConfig::new("https://infra.example.com/goahead").validate().is_ok());
    }
}
