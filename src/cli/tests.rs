#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::config::LLMProvider;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_args_default_values() {
        let args = Args::try_parse_from(&["tripflow-rs"]).unwrap();

        assert!(args.config.is_none());
        assert!(args.host.is_none());
        assert!(args.port.is_none());
        assert!(args.llm_provider.is_none());
        assert!(args.amap_api_key.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_short_options() {
        let args = Args::try_parse_from(&["tripflow-rs", "-p", "9090", "-v"]).unwrap();

        assert_eq!(args.port, Some(9090));
        assert!(args.verbose);
    }

    #[test]
    fn test_args_llm_options() {
        let args = Args::try_parse_from(&[
            "tripflow-rs",
            "--llm-provider",
            "deepseek",
            "--llm-api-key",
            "test-key",
            "--llm-api-base-url",
            "https://api.deepseek.com",
            "--model",
            "deepseek-chat",
            "--max-tokens",
            "2048",
            "--temperature",
            "0.5",
            "--max-iterations",
            "6",
        ])
        .unwrap();

        assert_eq!(args.llm_provider, Some("deepseek".to_string()));
        assert_eq!(args.llm_api_key, Some("test-key".to_string()));
        assert_eq!(
            args.llm_api_base_url,
            Some("https://api.deepseek.com".to_string())
        );
        assert_eq!(args.model, Some("deepseek-chat".to_string()));
        assert_eq!(args.max_tokens, Some(2048));
        assert_eq!(args.temperature, Some(0.5));
        assert_eq!(args.max_iterations, Some(6));
    }

    #[test]
    fn test_args_amap_options() {
        let args = Args::try_parse_from(&[
            "tripflow-rs",
            "--amap-api-key",
            "amap-key",
            "--amap-base-url",
            "https://restapi.amap.com/v3",
        ])
        .unwrap();

        assert_eq!(args.amap_api_key, Some("amap-key".to_string()));
        assert_eq!(
            args.amap_base_url,
            Some("https://restapi.amap.com/v3".to_string())
        );
    }

    #[test]
    fn test_into_config_with_overrides() {
        let args = Args::try_parse_from(&[
            "tripflow-rs",
            "--host",
            "127.0.0.1",
            "-p",
            "9090",
            "--llm-provider",
            "moonshot",
            "--model",
            "kimi-k2",
            "--amap-api-key",
            "amap-key",
            "-v",
        ])
        .unwrap();

        let config = args.into_config();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.llm.provider, LLMProvider::Moonshot);
        assert_eq!(config.llm.model, "kimi-k2");
        assert_eq!(config.amap.api_key, "amap-key");
        assert!(config.verbose);
    }

    #[test]
    fn test_into_config_keeps_defaults_without_flags() {
        let args = Args::try_parse_from(&["tripflow-rs"]).unwrap();

        let config = args.into_config();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.planner.weather_retry_attempts, 3);
        assert!(!config.verbose);
    }

    #[test]
    fn test_complex_args_combination() {
        let args = Args::try_parse_from(&[
            "tripflow-rs",
            "-c",
            "/config.toml",
            "--host",
            "0.0.0.0",
            "-p",
            "8000",
            "--llm-provider",
            "ollama",
            "--model",
            "qwen3:32b",
            "--max-tokens",
            "4096",
            "--temperature",
            "0.3",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("/config.toml")));
        assert_eq!(args.host, Some("0.0.0.0".to_string()));
        assert_eq!(args.port, Some(8000));
        assert_eq!(args.llm_provider, Some("ollama".to_string()));
        assert_eq!(args.model, Some("qwen3:32b".to_string()));
        assert_eq!(args.max_tokens, Some(4096));
        assert_eq!(args.temperature, Some(0.3));
        assert!(args.verbose);
    }
}
