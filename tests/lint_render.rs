//! Lint: hotkey text (`[X]`) rendered without click registration.
//!
//! Anything that displays a `[X]`-style button through `ClickableList`
//! must go through `push_clickable()` — a plain `push()` draws the text
//! but leaves it un-tappable, which is invisible on desktop and broken on
//! mobile. This test scans the render modules and fails on violations.

use std::fs;
use std::path::Path;

/// True when `s` contains a bracket-key pattern like `[C]`, `[1]`, `[R]`.
fn contains_bracket_key(s: &str) -> bool {
    let bytes = s.as_bytes();
    for window in bytes.windows(3) {
        if window[0] == b'[' && window[2] == b']' && window[1].is_ascii_alphanumeric() {
            return true;
        }
    }
    false
}

/// Lines calling plain `.push(` with bracket-key text in them.
fn find_unclickable_hotkeys(source: &str) -> Vec<(usize, String)> {
    let mut violations = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") {
            continue;
        }
        if !contains_bracket_key(line) {
            continue;
        }
        if line.contains(".push(") && !line.contains("push_clickable(") {
            violations.push((idx + 1, trimmed.to_string()));
        }
    }
    violations
}

#[test]
fn hotkey_text_is_always_clickable() {
    let game_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/game");
    let mut all: Vec<(String, usize, String)> = Vec::new();

    for entry in fs::read_dir(&game_dir).expect("src/game should exist") {
        let path = entry.expect("readable dir entry").path();
        if path.file_name().map(|n| n == "render.rs").unwrap_or(false) {
            let source = fs::read_to_string(&path).expect("readable render module");
            for (line, text) in find_unclickable_hotkeys(&source) {
                all.push((path.display().to_string(), line, text));
            }
        }
    }

    if !all.is_empty() {
        let mut msg = String::from(
            "Hotkey text [X] found in non-clickable push() calls; \
             use push_clickable() so the row is tappable:\n",
        );
        for (file, line, text) in &all {
            msg.push_str(&format!("  {file}:{line}: {text}\n"));
        }
        panic!("{msg}");
    }
}

#[cfg(test)]
mod detector {
    use super::*;

    #[test]
    fn flags_plain_push_with_hotkey() {
        let src = r#"cl.push(Line::from(" [S] Save game"));"#;
        assert_eq!(find_unclickable_hotkeys(src).len(), 1);
    }

    #[test]
    fn accepts_push_clickable() {
        let src = r#"cl.push_clickable(Line::from(" [S] Save game"), MENU_SAVE);"#;
        assert!(find_unclickable_hotkeys(src).is_empty());
    }

    #[test]
    fn ignores_comments_and_plain_text() {
        let src = "// cl.push(Line::from(\" [S] legacy\"));\ncl.push(Line::from(\"no keys here\"));";
        assert!(find_unclickable_hotkeys(src).is_empty());
    }

    #[test]
    fn bracket_key_detection() {
        assert!(contains_bracket_key("[C]"));
        assert!(contains_bracket_key("press [1] to buy"));
        assert!(!contains_bracket_key("[]"));
        assert!(!contains_bracket_key("[OK]"));
        assert!(!contains_bracket_key("plain"));
    }
}
