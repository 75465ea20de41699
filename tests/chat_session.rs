//! End-to-end chat sessions against the command router

use skillmod::bot::{CommandRouter, Tone, User};
use skillmod::core::config::BotConfig;
use tempfile::TempDir;

fn session() -> (TempDir, CommandRouter) {
    let dir = tempfile::tempdir().unwrap();
    let config = BotConfig {
        data_dir: dir.path().to_path_buf(),
        ..BotConfig::default()
    };
    let router = CommandRouter::from_config(config).unwrap();
    (dir, router)
}

#[test]
fn test_full_session() {
    let (_dir, router) = session();
    let alice = User::new("1001", "Alice");

    let reply = router.handle_line(&alice, "/hero Gordon");
    assert_eq!(reply.body, "**Gordon**\n- **DefenseUp** (op113): 25%");

    let reply = router.handle_line(&alice, "/skillmod hero1:Gordon count1:1");
    assert_eq!(reply.tone, Tone::Blue);
    assert!(reply.body.contains("You take -20.0% damage compared to a neutral setup."));

    let reply = router.handle_line(&alice, "/compare team_a:Chenko:4 team_b:Chenko:2,Amane:2");
    assert_eq!(reply.title.as_deref(), Some("Team Comparison"));
    assert!(reply.field("Result").unwrap().value.starts_with("Team B wins"));

    let reply = router.handle_line(&alice, "/help_skillmod");
    assert!(reply.body.contains("/savepreset"));
}

#[test]
fn test_presets_are_per_user_and_persist() {
    let (dir, router) = session();
    let alice = User::new("1001", "Alice");
    let bob = User::new("2002", "Bob");

    router.handle_line(&alice, "/savepreset name:Wall heroes:Saul:2,Gordon:2");
    router.handle_line(&alice, "/savepreset name:Alpha heroes:Chenko:4");

    assert_eq!(
        router.handle_line(&alice, "/listpresets").body,
        "Your presets:\n- Alpha\n- Wall"
    );
    assert!(router.handle_line(&bob, "/listpresets").body.contains("no saved presets"));
    assert!(router.handle_line(&bob, "/loadpreset Wall").is_error());

    // A fresh router over the same directory sees the saved presets
    let config = BotConfig {
        data_dir: dir.path().to_path_buf(),
        ..BotConfig::default()
    };
    let reopened = CommandRouter::from_config(config).unwrap();
    let reply = reopened.handle_line(&alice, "/loadpreset name:Wall");
    assert_eq!(reply.title.as_deref(), Some("Preset: Wall"));
    assert_eq!(reply.field("Team Composition").unwrap().value, "Gordon: 2\nSaul: 2");
}

#[test]
fn test_overwrite_preset() {
    let (_dir, router) = session();
    let alice = User::new("1001", "Alice");

    router.handle_line(&alice, "/savepreset name:Main heroes:Chenko:1");
    router.handle_line(&alice, "/savepreset name:Main heroes:Amane:3");

    let reply = router.handle_line(&alice, "/loadpreset Main");
    assert_eq!(reply.field("Team Composition").unwrap().value, "Amane: 3");
}

#[test]
fn test_corrupt_preset_file_reads_as_empty() {
    let (dir, router) = session();
    std::fs::write(dir.path().join("presets.json"), "{ not json").unwrap();

    let alice = User::new("1001", "Alice");
    assert!(router.handle_line(&alice, "/listpresets").body.contains("no saved presets"));
}

#[test]
fn test_save_does_not_clobber_corrupt_preset_file() {
    let (dir, router) = session();
    let path = dir.path().join("presets.json");
    let original = r#"{"bob": {"Main": "Chenko:4"},}"#;
    std::fs::write(&path, original).unwrap();

    let alice = User::new("1001", "Alice");
    let reply = router.handle_line(&alice, "/savepreset name:X heroes:Amane:1");
    assert!(reply.is_error());
    assert!(reply.body.starts_with("Could not access saved data"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_compact_skillmod_argument() {
    let (_dir, router) = session();
    let alice = User::new("1001", "Alice");

    let compact = router.handle_line(&alice, "!skillmod Chenko:4,Amane:2");
    let slots = router.handle_line(&alice, "/skillmod hero1:Chenko count1:4 hero2:Amane count2:2");
    assert!(!compact.is_error());
    assert_eq!(compact, slots);
}

#[test]
fn test_errors_never_escape() {
    let (_dir, router) = session();
    let alice = User::new("1001", "Alice");

    for line in [
        "",
        "/skillmod hero1:Zed",
        "/compare team_a:Chenko4 team_b:Amane:1",
        "/savepreset",
        "/recommend heroes:Chenko:0",
        "/hero \"Chenko",
    ] {
        assert!(router.handle_line(&alice, line).is_error(), "line {line:?}");
    }
}

#[test]
fn test_custom_catalog_from_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("heroes.toml"),
        r#"
        [[hero]]
        name = "Breaker"
        effects = [{ category = "OppDefenseDown", variant = 301, magnitude = 0.5 }]
        "#,
    )
    .unwrap();

    let config = BotConfig {
        data_dir: dir.path().to_path_buf(),
        catalog_file: Some("heroes.toml".into()),
        ..BotConfig::default()
    };
    let router = CommandRouter::from_config(config).unwrap();
    assert_eq!(router.catalog().len(), 1);

    let reply = router.handle_line(&User::new("1", "x"), "/skillmod hero1:breaker");
    assert!(reply.body.contains("Damage dealt: **1.5000x**"));
}

#[test]
fn test_storage_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, "").unwrap();

    let config = BotConfig {
        data_dir: blocker,
        ..BotConfig::default()
    };
    let router = CommandRouter::from_config(config).unwrap();
    let reply = router.handle_line(&User::new("1", "x"), "/savepreset name:A heroes:Chenko:1");
    assert!(reply.is_error());
    assert!(reply.body.starts_with("Could not access saved data"));
}
