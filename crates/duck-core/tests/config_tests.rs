// Host-side tests for startup configuration and the scene context.

use duck_core::*;

#[test]
fn defaults_build_the_startup_scene() {
    let config = SceneConfig::default();
    let ctx = SceneContext::new(&config);
    assert!(!ctx.params.has_stick);
    assert_eq!(ctx.params.elevation, DEFAULT_ELEVATION_DEG);
    assert_eq!(ctx.params.azimuth, DEFAULT_AZIMUTH_DEG);
    assert!(ctx.scene.is_rendered(NodeId::Water));
    assert!(ctx.scene.is_rendered(NodeId::Sky));
    assert!(!ctx.scene.is_rendered(NodeId::Rod));
    assert!(!ctx.scene.is_rendered(NodeId::Duck));
    assert!(!ctx.scene.duck.is_loaded());
    assert_eq!(ctx.wake_words.words(), &["duck".to_string(), "quack".to_string()]);
}

#[test]
fn overrides_apply_and_clamp() {
    let mut config = SceneConfig::default();
    config.apply_overrides([
        ("elevation", "120"),
        ("azimuth", "-45"),
        ("stick", "on"),
        ("words", " Bird, , Goose "),
        ("lang", "en-GB"),
        ("speech", "0"),
    ]);
    assert_eq!(config.initial.elevation, 90.0);
    assert_eq!(config.initial.azimuth, -45.0);
    assert!(config.initial.has_stick);
    assert_eq!(config.wake_words, vec!["Bird".to_string(), "Goose".to_string()]);
    assert_eq!(config.speech_lang, "en-GB");
    assert!(!config.speech_enabled);

    let ctx = SceneContext::new(&config);
    assert!(ctx.scene.is_rendered(NodeId::Rod));
    assert!(ctx.wake_words.matches("a goose!"));
}

#[test]
fn bad_overrides_are_rejected() {
    let mut config = SceneConfig::default();
    assert_eq!(
        config.apply_override("colour", "red"),
        Err(ConfigError::UnknownKey("colour".into()))
    );
    assert!(matches!(
        config.apply_override("elevation", "high"),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert!(config.apply_override("elevation", "NaN").is_err());
    assert!(config.apply_override("stick", "maybe").is_err());
    assert!(config.apply_override("words", " , ").is_err());
    // nothing changed
    assert_eq!(config.initial, Parameters::default());
    assert_eq!(config.wake_words.len(), 2);
}

#[test]
fn sun_setters_report_new_direction() {
    let mut ctx = SceneContext::new(&SceneConfig::default());
    let events = ctx.set_elevation(45.0);
    let [SceneEvent::SunChanged(dir)] = events.as_slice() else {
        panic!("expected one SunChanged, got {events:?}");
    };
    assert_eq!(*dir, sun_direction(45.0, DEFAULT_AZIMUTH_DEG));
    assert_eq!(ctx.sun_direction(), *dir);

    let events = ctx.set_azimuth(500.0);
    assert_eq!(ctx.params.azimuth, 180.0);
    assert_eq!(
        events.as_slice(),
        &[SceneEvent::SunChanged(sun_direction(45.0, 180.0))]
    );
}

#[test]
fn duck_load_failure_leaves_scene_running() {
    let mut ctx = SceneContext::new(&SceneConfig::default());
    ctx.attach_duck::<&str>(Err("404"));
    assert!(ctx.scene.duck.is_failed());
    assert!(!ctx.scene.is_rendered(NodeId::Duck));
    assert!(ctx.tick(0.5).is_empty());
}

#[test]
fn wake_words_are_case_insensitive() {
    let words = WakeWords::default();
    assert!(words.matches("DUCK"));
    assert!(words.matches("Quack quack"));
    assert!(!words.matches(""));
    assert!(!words.matches("goose"));
}

#[test]
fn fit_height_rests_model_on_origin() {
    let mut mesh = MeshData::cuboid(glam::Vec3::new(2.0, 3.0, 2.0), [1.0; 3]);
    mesh.fit_height(DUCK_TARGET_HEIGHT);
    assert!((mesh.bounds.size().y - DUCK_TARGET_HEIGHT).abs() < 1e-4);
    assert!(mesh.bounds.min.y.abs() < 1e-5);
    assert!(mesh.bounds.center().x.abs() < 1e-5);
}

#[test]
fn shader_composition_prepends_common() {
    let src = compose_shader(WATER_WGSL);
    assert!(src.starts_with(COMMON_WGSL));
    assert!(src.contains("fn fs_water"));
    assert!(src.contains("fn equirect_uv"));
}
