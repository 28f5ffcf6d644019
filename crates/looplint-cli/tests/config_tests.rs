use crate::args::CliArgs;
use crate::config::{
    CONFIG_FILE_NAME, LooplintConfig, config_path, load_config, parse_config, resolve_options,
};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_camel_case_config() {
    let config = parse_config(r#"{"testFunctionsOnly": true, "exclude": ["gen/**"]}"#)
        .expect("config parses");
    assert_eq!(
        config,
        LooplintConfig {
            test_functions_only: Some(true),
            exclude: Some(vec!["gen/**".to_string()]),
        }
    );
}

#[test]
fn test_empty_config_is_default() {
    assert_eq!(parse_config("  \n").expect("empty config"), LooplintConfig::default());
    assert_eq!(parse_config("{}").expect("object config"), LooplintConfig::default());
}

#[test]
fn test_unknown_config_key_is_rejected() {
    assert!(parse_config(r#"{"testFunctionOnly": true}"#).is_err());
}

#[test]
fn test_flags_extend_config() {
    let args = CliArgs::parse_from(["gotestlooplint", "--exclude", "b/**"]);
    let config = LooplintConfig {
        test_functions_only: Some(true),
        exclude: Some(vec!["a/**".to_string()]),
    };
    let resolved = resolve_options(&args, Some(&config));
    assert!(resolved.lint.test_functions_only);
    assert_eq!(resolved.exclude, vec!["a/**", "b/**"]);

    let resolved = resolve_options(&args, None);
    assert!(!resolved.lint.test_functions_only);
    assert_eq!(resolved.exclude, vec!["b/**"]);
}

#[test]
fn test_default_config_file_is_optional() {
    let dir = tempfile::tempdir().expect("temp dir");
    let args = CliArgs::parse_from(["gotestlooplint"]);
    assert_eq!(config_path(&args, dir.path()), None);

    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{}").expect("write config");
    assert_eq!(
        config_path(&args, dir.path()),
        Some(dir.path().join(CONFIG_FILE_NAME))
    );
}

#[test]
fn test_explicit_config_path_is_resolved_against_cwd() {
    let args = CliArgs::parse_from(["gotestlooplint", "--config", "conf/lint.json"]);
    let cwd = PathBuf::from("/work");
    assert_eq!(
        config_path(&args, &cwd),
        Some(PathBuf::from("/work/conf/lint.json"))
    );
}

#[test]
fn test_missing_config_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.json");
    let err = load_config(&missing).expect_err("missing file");
    assert!(err.to_string().contains("absent.json"));
}
