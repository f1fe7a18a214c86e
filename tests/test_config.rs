use std::io::Write;
use std::time::Duration;

use sprite_collector::config::GameConfig;
use sprite_collector::error::ConfigError;

#[test]
fn defaults_match_classic_layout() {
    let c = GameConfig::default();
    assert_eq!((c.canvas_width, c.canvas_height), (800.0, 600.0));
    assert_eq!(c.item_count, 10);
    assert_eq!((c.min_radius, c.max_radius), (10.0, 30.0));
    assert_eq!(c.player_speed, 6.0);
    assert_eq!(c.hit_margin, 15.0);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let c = GameConfig::from_json(r#"{ "item_count": 4, "player_speed": 3.5 }"#).unwrap();
    assert_eq!(c.item_count, 4);
    assert_eq!(c.player_speed, 3.5);
    assert_eq!(c.canvas_width, 800.0);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = GameConfig::from_json("{ item_count: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn inverted_radius_range_is_rejected() {
    let err = GameConfig::from_json(r#"{ "min_radius": 30, "max_radius": 10 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "max_radius", .. }));
}

#[test]
fn zero_sized_canvas_is_rejected() {
    let err = GameConfig::from_json(r#"{ "canvas_width": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "canvas_width", .. }));
    assert!(err.to_string().contains("canvas_width"));
}

#[test]
fn zero_items_or_fps_are_rejected() {
    assert!(GameConfig::from_json(r#"{ "item_count": 0 }"#).is_err());
    assert!(GameConfig::from_json(r#"{ "fps": 0 }"#).is_err());
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "fps": 30 }}"#).unwrap();
    let c = GameConfig::load(file.path()).unwrap();
    assert_eq!(c.fps, 30);
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn frame_duration_follows_fps() {
    let c = GameConfig {
        fps: 50,
        ..GameConfig::default()
    };
    assert_eq!(c.frame_duration(), Duration::from_millis(20));
}

#[test]
fn overflowing_max_radius_is_rejected() {
    // 1e39 does not fit an f32 and parses as infinity.
    let err = GameConfig::from_json(r#"{ "max_radius": 1e39 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "max_radius", .. }));
}

#[test]
fn non_finite_speed_and_margin_are_rejected() {
    let err = GameConfig::from_json(r#"{ "player_speed": 1e39 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "player_speed", .. }));
    let err = GameConfig::from_json(r#"{ "hit_margin": -1 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "hit_margin", .. }));
}

#[test]
fn accepted_configs_spawn_items() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sprite_collector::compute::create_items;

    let c = GameConfig::from_json(r#"{ "min_radius": 5, "max_radius": 1e6 }"#).unwrap();
    let items = create_items(&c, &mut StdRng::seed_from_u64(9));
    assert_eq!(items.len(), 10);
    assert!(items.iter().all(|it| it.radius.is_finite()));
}
