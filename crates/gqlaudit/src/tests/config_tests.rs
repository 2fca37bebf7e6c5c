use crate::config::AuditToml;
use crate::config::FailOn;
use crate::config::ScanConfig;
use libgqlaudit::issue::Severity;
use std::io::Write;

#[test]
fn empty_config_uses_defaults() {
    let config = AuditToml::parse("").unwrap();

    assert_eq!(config, AuditToml::default());
    assert_eq!(config.report.fail_on, FailOn::Error);
    assert!(!config.surface.allow_subscriptions);
    assert!(config.scan.exclude.iter().any(|name| name == "node_modules"));
    assert!(config.scan.exclude.iter().any(|name| name == ".venv"));
    assert!(config.scan.extensions.iter().any(|ext| ext == "py"));
    assert_eq!(config.scan.max_files, None);
}

#[test]
fn sections_override_their_own_keys_only() {
    let config = AuditToml::parse(r#"
[scan]
extensions = ["graphql"]
max_files = 50

[surface]
allow_subscriptions = true
scalar_leaf_names = ["sku"]

[report]
fail_on = "warning"
"#).unwrap();

    assert_eq!(config.scan.extensions, vec!["graphql".to_string()]);
    assert_eq!(config.scan.max_files, Some(50));
    assert_eq!(config.scan.exclude, ScanConfig::default().exclude);
    assert!(config.surface.allow_subscriptions);
    assert_eq!(config.surface.scalar_leaf_names, vec!["sku".to_string()]);
    assert_eq!(config.report.fail_on, FailOn::Warning);
}

#[test]
fn unknown_fail_on_is_rejected() {
    assert!(AuditToml::parse("[report]\nfail_on = \"sometimes\"\n").is_err());
}

#[test]
fn explicit_config_file_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gqlaudit.toml");

    let err = AuditToml::load(Some(&missing)).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read config file"));
}

#[test]
fn loads_an_explicit_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[report]\nfail_on = \"never\"").unwrap();

    let config = AuditToml::load(Some(file.path())).unwrap();
    assert_eq!(config.report.fail_on, FailOn::Never);
}

#[test]
fn fail_on_compares_against_the_worst_finding() {
    assert!(FailOn::Error.is_failure(Some(Severity::Error)));
    assert!(!FailOn::Error.is_failure(Some(Severity::Warning)));
    assert!(FailOn::Warning.is_failure(Some(Severity::Error)));
    assert!(FailOn::Advisory.is_failure(Some(Severity::Advisory)));
    assert!(!FailOn::Never.is_failure(Some(Severity::Error)));
    assert!(!FailOn::Advisory.is_failure(None));
}
