use lumen::commands;
use lumen::config::ThemeSettings;
use lumen::theme::{ThemeManager, selector};
use lumen_core::{ResolvedAppearance, ThemePreference};
use std::fs;
use tempfile::TempDir;

fn settings(dir: &TempDir, os: ResolvedAppearance) -> ThemeSettings {
    ThemeSettings::default()
        .with_state_file(dir.path().join("profile").join("state.toml"))
        .with_assume_os(os)
}

#[test]
fn test_preference_survives_restart_for_every_option() {
    for option in &selector::THEME_OPTIONS {
        let dir = TempDir::new().unwrap();
        let manager = ThemeManager::init(&settings(&dir, ResolvedAppearance::Dark)).unwrap();
        commands::set(&manager, option.preference, &mut Vec::new()).unwrap();
        drop(manager);

        let restarted = ThemeManager::init(&settings(&dir, ResolvedAppearance::Dark)).unwrap();
        assert_eq!(restarted.context().preference(), option.preference);
    }
}

#[test]
fn test_corrupt_state_file_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let settings = settings(&dir, ResolvedAppearance::Light)
        .with_default_preference(ThemePreference::Dark);
    let state_file = dir.path().join("profile").join("state.toml");
    fs::create_dir_all(state_file.parent().unwrap()).unwrap();
    fs::write(&state_file, "theme = \"blue\"\n").unwrap();

    let manager = ThemeManager::init(&settings).unwrap();
    assert_eq!(manager.context().preference(), ThemePreference::Dark);
    assert!(manager.root().is_dark());
}

#[test]
fn test_other_state_entries_are_kept() {
    let dir = TempDir::new().unwrap();
    let state_file = dir.path().join("profile").join("state.toml");
    fs::create_dir_all(state_file.parent().unwrap()).unwrap();
    fs::write(&state_file, "sidebar = \"open\"\n").unwrap();

    let manager = ThemeManager::init(&settings(&dir, ResolvedAppearance::Light)).unwrap();
    manager.context().set_preference(ThemePreference::Dark);

    let content = fs::read_to_string(&state_file).unwrap();
    assert!(content.contains("sidebar = \"open\""));
    assert!(content.contains("theme = \"dark\""));
}

#[test]
fn test_system_indicator_follows_os() {
    let dir = TempDir::new().unwrap();
    let manager = ThemeManager::init(&settings(&dir, ResolvedAppearance::Light)).unwrap();
    assert!(!selector::shows_system_dark_indicator(&manager.context().state()));

    manager
        .controller()
        .notify_os_preference(ResolvedAppearance::Dark);
    let state = manager.context().state();
    assert!(selector::shows_system_dark_indicator(&state));
    assert_eq!(selector::status_line(&state), "Current: Dark mode (System)");
}
