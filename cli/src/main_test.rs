use super::*;

#[test]
fn mask_hides_short_keys_entirely() {
    assert_eq!(mask("abc"), "***");
    assert_eq!(mask("12345678"), "********");
}

#[test]
fn mask_keeps_ends_of_long_keys() {
    assert_eq!(mask("AIzaSyD-secret-1234"), "AIza…1234");
}

#[test]
fn cli_parses_nested_key_command() {
    let cli = Cli::try_parse_from(["explainer-cli", "--key-file", "/tmp/k.json", "key", "set", "abc"]).unwrap();
    assert_eq!(cli.key_file, Some(PathBuf::from("/tmp/k.json")));
    assert!(matches!(cli.command, Command::Key(KeyCommand { command: KeySubcommand::Set { ref key } }) if key == "abc"));
}

#[test]
fn cli_parses_explain_text() {
    let cli = Cli::try_parse_from(["explainer-cli", "--model", "gemini-2.0-flash", "explain", "quantum entanglement"])
        .unwrap();
    assert_eq!(cli.model.as_deref(), Some("gemini-2.0-flash"));
    assert!(matches!(cli.command, Command::Explain { ref text } if text == "quantum entanglement"));
}
