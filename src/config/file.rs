use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub devices: Vec<String>,
    pub report_delay_us: Option<u64>,
    pub stroke_delay_us: Option<u64>,
    pub fast_delay_us: Option<u64>,
    pub move_points: Option<usize>,
    pub pen_pressure: Option<i32>,
    pub eraser_pressure: Option<i32>,
}

pub fn load_from_path(path: &Path) -> Option<FileConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

pub fn load_from_default_paths() -> Option<FileConfig> {
    for path in default_config_paths() {
        if path.exists() {
            if let Some(config) = load_from_path(&path) {
                return Some(config);
            }
        }
    }
    None
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("rm-lamp.toml")];

    if let Ok(home) = std::env::var("HOME") {
        paths.push(PathBuf::from(home).join(".config").join("rm-lamp.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let config: FileConfig = toml::from_str(
            r#"
            devices = ["/dev/input/event3", "/dev/input/event4"]
            report_delay_us = 0
            move_points = 64
            eraser_pressure = 2000
            "#,
        )
        .unwrap();
        assert_eq!(config.devices.len(), 2);
        assert_eq!(config.report_delay_us, Some(0));
        assert_eq!(config.stroke_delay_us, None);
        assert_eq!(config.move_points, Some(64));
        assert_eq!(config.eraser_pressure, Some(2000));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(toml::from_str::<FileConfig>("host = \"10.11.99.1\"").is_err());
    }

    #[test]
    fn test_unparsable_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rm-lamp.toml");
        std::fs::write(&path, "move_points = \"lots\"").unwrap();
        assert!(load_from_path(&path).is_none());
        assert!(load_from_path(&dir.path().join("missing.toml")).is_none());
    }
}
