//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// RAII guard to ensure environment variable cleanup even under test parallelism.
/// Removes the var on drop, preventing test pollution in parallel execution.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

mod loading {
    use super::*;

    #[test]
    fn default_config_path_ends_with_hexgrid_config_toml() {
        let path = default_config_path().expect("Should have default path");
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("hexgrid") && path_str.ends_with("config.toml"),
            "Path should contain 'hexgrid' and end with 'config.toml', got: {}",
            path_str
        );
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let result = load_config_file("/nonexistent/path/to/hexgrid.toml");
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn parses_valid_toml() {
        let config_path = write_temp(
            "hexgrid_test_config.toml",
            r#"
bytes_per_row = 8
row_wrapping = "wrapping"
view_mode = "code_matrix"
code_type = "octal"
code_case = "lower"
encoding = "utf8"
blink_rate_ms = 0
vertical_scroll_unit = "row"
vertical_scrollbar = "always"
horizontal_scrollbar = "never"
"#,
        );

        let config = load_config_file(&config_path).unwrap().unwrap();

        assert_eq!(config.bytes_per_row, Some(8));
        assert_eq!(config.row_wrapping, Some(RowWrapping::Wrapping));
        assert_eq!(config.view_mode, Some(ViewMode::CodeMatrix));
        assert_eq!(config.code_type, Some(CodeType::Octal));
        assert_eq!(config.code_case, Some(CodeCharactersCase::Lower));
        assert_eq!(config.encoding, Some(TextEncoding::Utf8));
        assert_eq!(config.blink_rate_ms, Some(0));
        assert_eq!(config.vertical_scroll_unit, Some(VerticalScrollUnit::Row));
        assert_eq!(config.vertical_scrollbar, Some(ScrollBarVisibility::Always));
        assert_eq!(config.horizontal_scrollbar, Some(ScrollBarVisibility::Never));
        assert_eq!(config.max_bytes_per_row, None);

        fs::remove_file(config_path).ok();
    }

    #[test]
    fn unknown_encoding_name_falls_back_to_other() {
        let config_path = write_temp("hexgrid_test_encoding.toml", r#"encoding = "cp1252""#);

        let config = load_config_file(&config_path).unwrap().unwrap();
        assert_eq!(config.encoding, Some(TextEncoding::Other));

        fs::remove_file(config_path).ok();
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let config_path = write_temp("hexgrid_test_invalid.toml", "this is not valid TOML ][}{");

        match load_config_file(&config_path) {
            Err(ConfigError::ParseError { path, .. }) => assert_eq!(path, config_path),
            other => panic!("Expected ParseError, got {:?}", other),
        }

        fs::remove_file(config_path).ok();
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let config_path = write_temp("hexgrid_test_unknown.toml", "colour = \"red\"\n");

        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigError::ParseError { .. })
        ));

        fs::remove_file(config_path).ok();
    }

    #[test]
    fn unknown_code_type_is_rejected() {
        let config_path = write_temp("hexgrid_test_code_type.toml", "code_type = \"base64\"\n");

        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigError::ParseError { .. })
        ));

        fs::remove_file(config_path).ok();
    }

    #[test]
    #[serial(hexgrid_config)]
    fn explicit_path_wins_over_env_var() {
        let _guard = EnvGuard::new(CONFIG_ENV_VAR);
        let explicit_path = write_temp("hexgrid_explicit.toml", "bytes_per_row = 4\n");
        let env_path = write_temp("hexgrid_env.toml", "bytes_per_row = 32\n");
        env::set_var(CONFIG_ENV_VAR, &env_path);

        let config = load_config_with_precedence(Some(explicit_path.clone()))
            .unwrap()
            .unwrap();
        assert_eq!(config.bytes_per_row, Some(4));

        fs::remove_file(explicit_path).ok();
        fs::remove_file(env_path).ok();
    }

    #[test]
    #[serial(hexgrid_config)]
    fn env_var_used_without_explicit_path() {
        let _guard = EnvGuard::new(CONFIG_ENV_VAR);
        let env_path = write_temp("hexgrid_env_only.toml", "bytes_per_row = 32\n");
        env::set_var(CONFIG_ENV_VAR, &env_path);

        let config = load_config_with_precedence(None).unwrap().unwrap();
        assert_eq!(config.bytes_per_row, Some(32));

        fs::remove_file(env_path).ok();
    }

    #[test]
    #[serial(hexgrid_config)]
    fn env_var_pointing_nowhere_uses_defaults() {
        let _guard = EnvGuard::new(CONFIG_ENV_VAR);
        env::set_var(CONFIG_ENV_VAR, "/nonexistent/hexgrid/config.toml");

        assert_eq!(load_config_with_precedence(None), Ok(None));
    }
}

mod merging {
    use super::*;

    #[test]
    fn defaults_when_no_file() {
        assert_eq!(merge_config(None), ResolvedConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let config_file = ConfigFile {
            bytes_per_row: Some(8),
            code_type: Some(CodeType::Binary),
            log_file_path: Some(PathBuf::from("/custom/path/to/app.log")),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));

        assert_eq!(resolved.bytes_per_row, 8);
        assert_eq!(resolved.code_type, CodeType::Binary);
        assert_eq!(resolved.log_file_path, PathBuf::from("/custom/path/to/app.log"));
        assert_eq!(resolved.view_mode, ResolvedConfig::default().view_mode);
    }

    #[test]
    fn default_log_path_ends_with_hexgrid_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("hexgrid.log"),
            "Default log path should end with 'hexgrid.log', got: {:?}",
            path
        );
    }

    #[test]
    fn engine_config_carries_resolved_values() {
        let resolved = ResolvedConfig {
            bytes_per_row: 12,
            row_wrapping: RowWrapping::Wrapping,
            code_case: CodeCharactersCase::Lower,
            vertical_scrollbar: ScrollBarVisibility::Never,
            ..ResolvedConfig::default()
        };

        let engine = resolved.engine_config();

        assert_eq!(engine.structure.bytes_per_row, 12);
        assert_eq!(engine.structure.row_wrapping, RowWrapping::Wrapping);
        assert_eq!(engine.code_case, CodeCharactersCase::Lower);
        assert_eq!(engine.vertical_scrollbar, ScrollBarVisibility::Never);
        assert_eq!(engine.vertical_scrollbar_size, 1);
    }

    #[test]
    fn default_resolved_config_matches_engine_defaults() {
        assert_eq!(ResolvedConfig::default().engine_config(), EngineConfig::default());
    }
}

mod precedence {
    use super::*;

    #[test]
    #[serial(hexgrid_code_type)]
    fn env_var_overrides_code_type() {
        let _guard = EnvGuard::new(CODE_TYPE_ENV_VAR);
        env::set_var(CODE_TYPE_ENV_VAR, "dec");

        let result = apply_env_overrides(ResolvedConfig::default());
        assert_eq!(result.code_type, CodeType::Decimal);
    }

    #[test]
    #[serial(hexgrid_code_type)]
    fn invalid_env_value_is_ignored() {
        let _guard = EnvGuard::new(CODE_TYPE_ENV_VAR);
        env::set_var(CODE_TYPE_ENV_VAR, "base64");

        let base = ResolvedConfig::default();
        assert_eq!(apply_env_overrides(base.clone()), base);
    }

    #[test]
    #[serial(hexgrid_code_type)]
    fn no_change_when_env_var_not_set() {
        let _guard = EnvGuard::new(CODE_TYPE_ENV_VAR);

        let base = ResolvedConfig::default();
        assert_eq!(apply_env_overrides(base.clone()), base);
    }

    #[test]
    fn cli_overrides_only_set_flags() {
        let base = ResolvedConfig {
            bytes_per_row: 8,
            ..ResolvedConfig::default()
        };
        let overrides = CliOverrides {
            view_mode: Some(ViewMode::TextPreview),
            ..CliOverrides::default()
        };

        let result = apply_cli_overrides(base.clone(), overrides);

        assert_eq!(result.view_mode, ViewMode::TextPreview);
        assert_eq!(result.bytes_per_row, 8);
        assert_eq!(result.code_type, base.code_type);
    }

    #[test]
    #[serial(hexgrid_code_type)]
    fn full_chain_defaults_file_env_cli() {
        let _guard = EnvGuard::new(CODE_TYPE_ENV_VAR);
        let config_file = ConfigFile {
            code_type: Some(CodeType::Binary),
            bytes_per_row: Some(8),
            code_case: Some(CodeCharactersCase::Lower),
            ..ConfigFile::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.code_type, CodeType::Binary);

        env::set_var(CODE_TYPE_ENV_VAR, "octal");
        let with_env = apply_env_overrides(merged);
        assert_eq!(with_env.code_type, CodeType::Octal);

        let overrides = CliOverrides {
            code_type: Some(CodeType::Hexadecimal),
            ..CliOverrides::default()
        };
        let with_cli = apply_cli_overrides(with_env, overrides);

        assert_eq!(with_cli.code_type, CodeType::Hexadecimal);
        assert_eq!(with_cli.bytes_per_row, 8);
        assert_eq!(with_cli.code_case, CodeCharactersCase::Lower);
    }
}
