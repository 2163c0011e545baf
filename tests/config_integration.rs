use std::path::PathBuf;

use marknote::config::{ConfigFlags, OutputFormat, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".marknoterc");
    let content = r#"
# comment
--watch

--format text

--output=notes.txt
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.watch);
    assert_eq!(flags.format, Some(OutputFormat::Text));
    assert_eq!(flags.output, Some(PathBuf::from("notes.txt")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".marknoterc");
    let content = "--watch\n--format text\n--output file.txt\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "marknote".to_string(),
        "--format".to_string(),
        "html".to_string(),
        "--perf".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.watch, "file flags should remain enabled");
    assert!(effective.perf, "cli flags should be applied");
    assert_eq!(
        effective.format,
        Some(OutputFormat::Html),
        "cli should override format"
    );
    assert_eq!(
        effective.output,
        Some(PathBuf::from("file.txt")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "marknote".to_string(),
        "--format=md".to_string(),
        "--width=64".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.format, Some(OutputFormat::Markdown));
    assert_eq!(flags.width, Some(64));
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        watch: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        perf: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&cli);
    assert!(merged.watch);
    assert!(merged.perf);
}

#[test]
fn test_saved_defaults_keep_paths_with_spaces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config");
    let saved = ConfigFlags {
        watch: true,
        output: Some(PathBuf::from("my notes.html")),
        ..ConfigFlags::default()
    };
    marknote::config::save_config_flags(&path, &saved).unwrap();

    let loaded = load_config_flags(&path).unwrap();
    assert_eq!(loaded.output, Some(PathBuf::from("my notes.html")));
    assert!(loaded.watch);
}
