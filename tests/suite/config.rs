//! Config file loading and its effect on playback.

use std::fs;
use std::path::PathBuf;

use tempfile::{TempDir, tempdir};

use crate::common::ms;
use longmul_engine::{ConfigError, LongmulConfig, Operand, Playback};

fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write config");
    (dir, path)
}

fn operand(raw: &str) -> Operand {
    Operand::parse(raw).expect("test fixture must be a valid operand")
}

#[test]
fn playback_uses_configured_timings() {
    let (_dir, path) = write_config(
        r"
[playback]
step_interval_ms = 1000
reveal_delay_ms = 250
autoplay = true
",
    );
    let config = LongmulConfig::load_from(&path)
        .expect("valid config")
        .expect("config exists");
    let mut playback =
        Playback::from_config(&config, operand("23"), operand("45")).expect("valid settings");

    assert!(playback.is_playing());
    assert_eq!(playback.next_action().expect("autoplay").delay, ms(1000));
    playback.tick(ms(1000));
    assert_eq!(playback.next_action().expect("reveal pending").delay, ms(250));
}

#[test]
fn autoplay_off_starts_paused() {
    let (_dir, path) = write_config("[playback]\nautoplay = false\n");
    let config = LongmulConfig::load_from(&path).unwrap().unwrap();
    let playback = Playback::from_config(&config, operand("1"), operand("2")).unwrap();
    assert!(!playback.is_playing());
    assert_eq!(playback.next_action(), None);
}

#[test]
fn invalid_speed_is_rejected() {
    let (_dir, path) = write_config("[playback]\nspeed = 0.0\n");
    let config = LongmulConfig::load_from(&path).unwrap().unwrap();
    let err = Playback::from_config(&config, operand("1"), operand("2")).unwrap_err();
    assert!(matches!(err, ConfigError::Speed { .. }));
}

#[test]
fn empty_random_range_is_rejected() {
    let (_dir, path) = write_config("[random]\nmin = 9\nmax = 1\n");
    let config = LongmulConfig::load_from(&path).unwrap().unwrap();
    let err = Playback::from_config(&config, operand("1"), operand("2")).unwrap_err();
    assert!(matches!(err, ConfigError::RandomRange { min: 9, max: 1 }));
}

#[test]
fn random_range_feeds_randomize() {
    let (_dir, path) = write_config("[random]\nmin = 100\nmax = 999\n");
    let config = LongmulConfig::load_from(&path).unwrap().unwrap();
    let mut playback = Playback::from_config(&config, operand("1"), operand("2")).unwrap();
    for _ in 0..20 {
        let (a, b) = playback.randomize();
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 3);
    }
}

#[test]
fn unknown_keys_do_not_break_loading() {
    let (_dir, path) = write_config("[playback]\ntheme = \"dark\"\n");
    let config = LongmulConfig::load_from(&path).unwrap().unwrap();
    assert!((config.playback().speed - 1.0).abs() < f64::EPSILON);
}
