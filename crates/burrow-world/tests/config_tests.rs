use std::io::Write;

use burrow_world::{CaveSettings, SettingsError, load_config_from_path, parse_config};

#[test]
fn empty_config_uses_defaults() {
    let cfg = parse_config("").unwrap();
    let s = CaveSettings::from_config(&cfg).unwrap();
    assert_eq!(s, CaveSettings::default());
    assert_eq!(cfg.runtime.workers, 1);
}

#[test]
fn partial_sections_keep_field_defaults() {
    let cfg = parse_config(
        r#"
        [cave]
        radial_segments = 8
        outer_radius = 20.0

        [collision]
        extent = 250.0
        "#,
    )
    .unwrap();
    let s = CaveSettings::from_config(&cfg).unwrap();
    assert_eq!(s.radial_segments(), 8);
    assert_eq!(s.outer_radius(), 20.0);
    assert_eq!(s.inner_radius(), 10.0);
    assert_eq!(s.collision_extent(), 250.0);
}

#[test]
fn invalid_values_fail_validation() {
    let cfg = parse_config("[cave]\nradial_segments = 0\n").unwrap();
    assert!(matches!(
        CaveSettings::from_config(&cfg),
        Err(SettingsError::Invalid(_))
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    assert!(matches!(
        parse_config("[cave\nfloor_height = 1"),
        Err(SettingsError::Parse(_))
    ));
}

#[test]
fn loads_from_disk() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "[cave]\nfloor_height = 6.0\n[runtime]\nworkers = 3").unwrap();
    let cfg = load_config_from_path(f.path()).unwrap();
    assert_eq!(cfg.cave.floor_height, 6.0);
    assert_eq!(cfg.runtime.workers, 3);

    let missing = f.path().with_extension("missing");
    assert!(matches!(
        load_config_from_path(&missing),
        Err(SettingsError::Io { .. })
    ));
}
