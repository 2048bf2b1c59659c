use std::path::PathBuf;

use etch::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".etchrc");
    let content = r"
# comment
--regex

--log etch.log

--no-watch
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.regex);
    assert!(flags.no_watch);
    assert_eq!(flags.log, Some(PathBuf::from("etch.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".etchrc");
    std::fs::write(&path, "--regex\n--log file.log\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "etch".to_string(),
        "--no-watch".to_string(),
        "--log".to_string(),
        "cli.log".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.regex, "file flags should remain enabled");
    assert!(effective.no_watch, "cli flags should be applied");
    assert_eq!(
        effective.log,
        Some(PathBuf::from("cli.log")),
        "cli should override the log path"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec!["etch".to_string(), "--log=etch.log".to_string()];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.log, Some(PathBuf::from("etch.log")));
}

#[test]
fn test_unknown_tokens_are_ignored() {
    let args = vec![
        "etch".to_string(),
        "notes.txt".to_string(),
        "--save".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags, ConfigFlags::default());
}
