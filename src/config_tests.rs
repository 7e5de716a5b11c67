//! Unit tests for configuration module
//!
//! These tests validate configuration parsing, defaults, and validation.

#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::OlgaGptError;

    // ====== Default Value Tests ======

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.request_timeout_secs, 20);
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.embeddings.model, "text-embedding-3-small");
        assert_eq!(config.embeddings.batch_size, 10);
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert_eq!(config.llm.max_tokens, 300);
        assert_eq!(config.rag.top_k, 5);
        assert_eq!(config.rag.max_sources, 3);
        assert_eq!(config.rag.source_excerpt_chars, 500);
        assert_eq!(config.rag.history_window, 3);
        assert_eq!(config.audit.retention_days, 90);
        assert!(config.media.rules.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fallback_reply_default() {
        let config = AppConfig::default();
        assert_eq!(config.rag.fallback_reply, DEFAULT_FALLBACK_REPLY);
        assert!(config.rag.fallback_reply.starts_with("I'm having trouble"));
    }

    // ====== TOML Parsing Tests ======

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.rag.top_k, 5);
    }

    #[test]
    fn test_media_rules_parse() {
        let config: AppConfig = toml::from_str(
            r#"
            [[media.rules]]
            keywords = ["family", "kids"]
            image = { src = "/images/family.jpg", alt = "Family" }

            [[media.rules]]
            keywords = ["career"]
            timeline = [
                { year = "2023", title = "R&D Group Manager", company = "AT&T Israel" },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(config.media.rules.len(), 2);
        assert_eq!(config.media.rules[0].keywords, vec!["family", "kids"]);
        assert!(config.media.rules[0].image.is_some());
        assert_eq!(config.media.rules[1].timeline.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[rag]\ntop_k = 7\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.rag.top_k, 7);
    }

    #[test]
    fn test_from_missing_file() {
        let result = AppConfig::from_file("/definitely/not/here/config.toml");
        assert!(matches!(result, Err(OlgaGptError::Io(_))));
    }

    // ====== Validation Tests ======

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut config = AppConfig::default();
        config.rag.top_k = 0;
        assert!(matches!(
            config.validate(),
            Err(OlgaGptError::ConfigError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_sources() {
        let mut config = AppConfig::default();
        config.rag.max_sources = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_provider() {
        let mut config = AppConfig::default();
        config.embeddings.provider = "cohere".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cohere"));
    }

    #[test]
    fn test_unknown_backend_fails_to_parse() {
        let result: Result<AppConfig, _> = toml::from_str("[storage]\nbackend = \"firestore\"\n");
        assert!(result.is_err());
    }

    // ====== Accessor Tests ======

    #[test]
    fn test_embedding_api_key_falls_back_to_llm_key() {
        let mut config = AppConfig::default();
        assert_eq!(config.embedding_api_key(), None);

        config.llm.api_key = "sk-llm".to_string();
        assert_eq!(config.embedding_api_key(), Some("sk-llm"));

        config.embeddings.api_key = Some("sk-embed".to_string());
        assert_eq!(config.embedding_api_key(), Some("sk-embed"));
    }

    #[test]
    fn test_request_timeout() {
        let mut config = AppConfig::default();
        config.server.request_timeout_secs = 5;
        assert_eq!(config.request_timeout(), std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_example_config_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.toml");
        let config = AppConfig::from_file(path).unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.media.rules.len(), 3);
        assert!(config.media.rules[0].image.is_some());
        assert_eq!(config.media.rules[1].carousel.as_ref().map(Vec::len), Some(2));
        assert_eq!(
            config.media.rules[2].timeline.as_ref().map(|t| t[0].year.as_str()),
            Some("2023")
        );
    }
}
