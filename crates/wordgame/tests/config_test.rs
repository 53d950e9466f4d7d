//! Tests for client configuration loading.

use std::io::Write;
use std::time::Duration;

use wordgame::ClientConfig;

#[test]
fn test_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.server_url(), "http://localhost:8080");
    assert_eq!(config.request_timeout(), None);
    assert_eq!(config.win_delay(), Duration::from_millis(300));
    assert_eq!(config.tick_interval(), Duration::from_secs(1));
    assert_eq!(config.log_file().to_str(), Some("wordgame_tui.log"));
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "server_url = \"http://game.example:9000\"").unwrap();
    writeln!(file, "request_timeout_secs = 5").unwrap();

    let config = ClientConfig::from_file(file.path()).unwrap();
    assert_eq!(config.server_url(), "http://game.example:9000");
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    assert_eq!(*config.win_delay_ms(), 300);
    assert_eq!(*config.tick_interval_ms(), 1000);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, ClientConfig::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "win_delay_ms = \"soon\"").unwrap();

    let err = ClientConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_builders() {
    let config = ClientConfig::for_server("http://localhost:3000/")
        .with_request_timeout(Some(Duration::from_millis(200)))
        .with_win_delay_ms(0);
    assert_eq!(config.server_url(), "http://localhost:3000");
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(1)));
    assert!(config.win_delay().is_zero());
}
