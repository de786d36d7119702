use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use eerkit::{EerError, config::ConfigError, render::OutputFormat, validate::RuleSet};
use eerkit_cli::{Args, run};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Collects all .dbcs files from a directory
fn collect_schema_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("dbcs")
                })
                .collect()
        })
        .unwrap_or_default();

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(inputs: Vec<String>, out_dir: &Path, mode: RuleSet) -> Args {
    Args {
        inputs,
        engine: None,
        format: Some(OutputFormat::Dot),
        mode,
        out_dir: Some(out_dir.to_string_lossy().to_string()),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_schemas() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let schemas = collect_schema_files(&fixtures_dir());
    assert!(!schemas.is_empty(), "No schemas found in tests/fixtures/");

    let inputs = schemas
        .iter()
        .map(|path| path.to_string_lossy().to_string())
        .collect();
    let failures =
        run(&args_for(inputs, temp_dir.path(), RuleSet::Strict)).expect("batch should run");

    if !failures.is_empty() {
        eprintln!("\nValid schemas that failed:");
        for failure in &failures {
            eprintln!("  - {}: {}", failure.path.display(), failure.error);
        }
        panic!("{} valid schema(s) failed unexpectedly", failures.len());
    }

    for schema in &schemas {
        let stem = schema.file_stem().unwrap().to_string_lossy();
        let dot_path = temp_dir.path().join(format!("{stem}.dot"));
        let dot = fs::read_to_string(&dot_path)
            .unwrap_or_else(|_| panic!("{} was not written", dot_path.display()));
        assert!(dot.starts_with("graph ER\n{\n"), "{stem}: {dot}");
        assert!(dot.ends_with("}\n"), "{stem}: {dot}");
    }
}

#[test]
fn e2e_smoke_test_error_schemas() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let schemas = collect_schema_files(&fixtures_dir().join("errors"));
    assert!(
        !schemas.is_empty(),
        "No error schemas found in tests/fixtures/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();
    for schema in &schemas {
        let inputs = vec![schema.to_string_lossy().to_string()];
        let failures =
            run(&args_for(inputs, temp_dir.path(), RuleSet::Basic)).expect("batch should run");
        if failures.is_empty() {
            unexpectedly_succeeded.push(schema.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError schemas that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error schema(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    // Nothing is drawn for a schema that does not load
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_batch_continues_past_failures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let fixtures = fixtures_dir();

    let inputs = vec![
        fixtures.join("errors").join("malformed").to_string_lossy().to_string(),
        fixtures.join("university").to_string_lossy().to_string(),
        fixtures.join("missing").to_string_lossy().to_string(),
    ];
    let failures =
        run(&args_for(inputs, temp_dir.path(), RuleSet::Basic)).expect("batch should run");

    let failed: Vec<_> = failures
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(failed, vec!["malformed.dbcs", "missing.dbcs"]);
    assert!(temp_dir.path().join("university.dot").exists());
}

#[test]
fn test_config_overrides_style() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("eerkit.toml");
    fs::write(
        &config_path,
        "[render]\nformat = \"png\"\n\n[style]\nentity_fill = \"gold\"\noverlap = \"false\"\n",
    )
    .unwrap();

    let inputs = vec![fixtures_dir().join("university").to_string_lossy().to_string()];
    let mut args = args_for(inputs, temp_dir.path(), RuleSet::Basic);
    args.config = Some(config_path.to_string_lossy().to_string());

    // The command-line format wins over the configuration file
    let failures = run(&args).expect("batch should run");
    assert!(failures.is_empty());

    let dot = fs::read_to_string(temp_dir.path().join("university.dot")).unwrap();
    assert!(dot.contains("fillcolor=\"gold\""), "{dot}");
    assert!(dot.contains("\toverlap = false\n"), "{dot}");
    assert!(!temp_dir.path().join("university.png").exists());
}

#[test]
fn test_invalid_config_fails_the_batch() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("eerkit.toml");
    fs::write(&config_path, "[style]\nentity_colour = \"gold\"\n").unwrap();

    let inputs = vec![fixtures_dir().join("university").to_string_lossy().to_string()];
    let mut args = args_for(inputs, temp_dir.path(), RuleSet::Basic);
    args.config = Some(config_path.to_string_lossy().to_string());

    let err = run(&args).unwrap_err();
    assert!(
        matches!(err, EerError::Config(ConfigError::Invalid { .. })),
        "{err:?}"
    );
    assert!(err.to_string().contains("entity_colour"), "{err}");
}

#[test]
fn test_missing_config_fails_the_batch() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let inputs = vec![fixtures_dir().join("university").to_string_lossy().to_string()];
    let mut args = args_for(inputs, temp_dir.path(), RuleSet::Basic);
    args.config = Some(temp_dir.path().join("absent.toml").to_string_lossy().to_string());

    let err = run(&args).unwrap_err();
    assert!(matches!(err, EerError::Config(ConfigError::NotFound(_))), "{err:?}");
}
