use std::fs::{self, File};
use std::io::{BufReader, Write};

use trtl_core::TrackerConfig;
use trtl_replay::{load_config, replay};

const RECORDING: &str = r#"# straight north-east leg, then a crab to the south-east
{"type":"seed","lat":41.355,"lon":-88.787,"heading":45}
{"type":"fix","lat":41.356,"lon":-88.786}
{"type":"compass","magneticHeading":48,"variation":-3}
{"type":"tick"}
{"type":"fix","lat":41.357,"lon":-88.785}
{"type":"tick"}
{"type":"fix","lat":41.356,"lon":-88.784}
{"type":"tick"}
{"type":"tick"}
"#;

#[test]
fn test_replay_recording_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leg.jsonl");
    fs::write(&path, RECORDING).unwrap();

    let mut out = Vec::new();
    let summary = replay(
        BufReader::new(File::open(&path).unwrap()),
        &mut out,
        TrackerConfig::default(),
    )
    .unwrap();

    assert_eq!(summary.ticks, 4);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.drifting, 1);
    assert_eq!(summary.rotating, 0);

    let states: Vec<String> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| {
            let v: serde_json::Value = serde_json::from_str(l).unwrap();
            v["state"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(states, vec!["tracking", "tracking", "drifting", "stationary"]);
}

#[test]
fn test_load_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"driftThreshold": 25.0}}"#).unwrap();

    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.drift_threshold, 25.0);
    assert_eq!(config.rotation_threshold, TrackerConfig::default().rotation_threshold);
}

#[test]
fn test_load_invalid_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"rotationThreshold": -3}}"#).unwrap();

    let err = load_config(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("Cannot load config"), "{}", err);
}

#[test]
fn test_load_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_config(Some(dir.path().join("absent.json").as_path())).is_err());
}
