//! Configuration files drive the engine.

use crate::helpers::{assistant_with, stored, voice};
use riva::RivaConfig;
use riva::session::SessionState;

#[test]
fn custom_name_and_greetings_from_toml() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[assistant]
name = "Nova"
name_variants = ["noah"]

[wake]
greetings = ["yo"]
window_secs = 30
"#,
    )
    .unwrap();

    let config = RivaConfig::from_file(&path).expect("load config");
    let mut a = assistant_with(config, SessionState::default());

    assert!(a.handle("hi riva", &voice(0)).is_silent());
    let turn = a.handle("yo noah", &voice(0));
    assert!(turn.replies[0].contains("Nova"));
    assert!(stored(a.store()).is_awake(crate::helpers::at(29)));
    assert!(!stored(a.store()).is_awake(crate::helpers::at(30)));
}

#[test]
fn written_default_config_loads_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("riva").join("config.toml");
    RivaConfig::default().save_to_file(&path).expect("save");
    let loaded = RivaConfig::from_file(&path).expect("load");
    assert_eq!(loaded.assistant.name, "Riva");
    assert_eq!(loaded.wake.greetings, RivaConfig::default().wake.greetings);
    assert!(loaded.wake.window_secs.is_none());
}
