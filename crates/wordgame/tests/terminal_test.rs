//! Tests for restoring the terminal after the UI exits.

use wordgame::restore_terminal;

#[test]
fn test_restore_leaves_alternate_screen_and_shows_cursor() {
    let mut out = Vec::new();
    restore_terminal(&mut out).unwrap();
    let written = String::from_utf8(out).unwrap();
    assert!(written.contains("\x1b[?1049l"), "wrote {:?}", written);
    assert!(written.contains("\x1b[?25h"), "wrote {:?}", written);
}

#[test]
fn test_restore_without_raw_mode_is_harmless() {
    let mut out = Vec::new();
    restore_terminal(&mut out).unwrap();
    restore_terminal(&mut out).unwrap();
}
