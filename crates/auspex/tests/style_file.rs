//! Loading self-contained style files through the interpreter.

use std::fs;

use auspex::{Error, FolderConfig, Interpreter};
use tempfile::TempDir;

const CLASSIC: &str = r#"# Classic interpretations
[metadata]
name: Classic
author: W. Lilly
version: 1.4

[planet_meanings]
Sun: Vitality and purpose
Moon: Feeling and habit

[combinations]
Sun+Aries+10: Ambition worn openly.
Sun+Aries+*: Pioneering spirit, eager to lead \
             and quick to act.
Sun+*+1: A strong sense of self.
*+Leo+*: objects are never wildcards
Sun+Nowhere+1: never stored

[aspects]
Trine: Ease and flow
Square: Friction that drives

[aspect_combinations]
Sun+Moon+Conjunct: Will and feeling unite.
Sun+*+Trine: Vitality flows outward.
Sun+Moon+*: aspects are never wildcards
*+*+Trine: objects are never wildcards

[templates]
default_location: The placement colours the whole chart.
"#;

fn load(text: &str) -> (TempDir, Interpreter) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("classic.ais");
    fs::write(&path, text).unwrap();

    let mut interp = Interpreter::new(FolderConfig::new(dir.path()));
    interp.load_style_file(&path).unwrap();
    (dir, interp)
}

#[test]
fn test_combo_chain() {
    let (_dir, interp) = load(CLASSIC);
    assert_eq!(interp.resolve_combo(1, 1, 10), Some("Ambition worn openly."));
    assert_eq!(
        interp.resolve_combo(1, 1, 4),
        Some("Pioneering spirit, eager to lead and quick to act.")
    );
    assert_eq!(interp.resolve_combo(1, 7, 1), Some("A strong sense of self."));
    assert_eq!(
        interp.resolve_combo(2, 5, 3),
        Some("The placement colours the whole chart.")
    );
}

#[test]
fn test_aspect_chain() {
    let (_dir, interp) = load(CLASSIC);
    assert_eq!(interp.resolve_aspect_combo(1, 2, 1), Some("Will and feeling unite."));
    assert_eq!(interp.resolve_aspect_combo(1, 2, 3), None);
    assert_eq!(interp.resolve_aspect_combo(5, 6, 4), None);

    assert_eq!(interp.resolve_aspect(4, 0), Some("Ease and flow"));
    assert_eq!(interp.resolve_aspect(3, 8), Some("Friction that drives"));
}

#[test]
fn test_out_of_range_queries() {
    let (_dir, interp) = load(CLASSIC);
    assert_eq!(interp.resolve_combo(34, 1, 1), None);
    assert_eq!(interp.resolve_combo(1, 13, 1), None);
    assert_eq!(interp.resolve_combo(1, 1, 0), None);
    assert_eq!(interp.resolve_aspect(19, 0), None);
}

#[test]
fn test_metadata_and_registry() {
    let (_dir, interp) = load(CLASSIC);
    let style = interp.current_style().unwrap();
    assert_eq!(style.name(), Some("Classic"));
    assert_eq!(style.version(), Some("1.4"));
    assert!(style.filename().ends_with("classic.ais"));
    assert_eq!(style.combos().len(), 3);

    let keys: Vec<&str> = style.aspect_combos().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, ["1+2+1", "1+*+4"]);
    assert_eq!(interp.styles().current_index(), Some(0));
}

#[test]
fn test_second_file_becomes_current() {
    let (dir, mut interp) = load(CLASSIC);
    let other = dir.path().join("other.ais");
    fs::write(&other, "[combinations]\n1+1+10: Other text\n").unwrap();

    interp.load_style_file(&other).unwrap();
    assert_eq!(interp.styles().len(), 2);
    assert_eq!(interp.resolve_combo(1, 1, 10), Some("Other text"));
    assert_eq!(interp.resolve_combo(1, 1, 4), None);
}

#[test]
fn test_missing_file_keeps_current_style() {
    let (dir, mut interp) = load(CLASSIC);
    let err = interp
        .load_style_file(dir.path().join("absent.ais"))
        .unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
    assert_eq!(interp.resolve_combo(1, 1, 10), Some("Ambition worn openly."));
}
