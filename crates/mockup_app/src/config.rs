use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use studio_logging::{studio_info, studio_warn};

const CONFIG_FILENAME: &str = "studio.ron";

/// Application settings read from `./studio.ron` when present. Every field
/// falls back to its default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Wall-clock milliseconds one simulated composition takes.
    pub tick_interval_ms: u64,
    /// Per-file size cap for both intakes.
    pub max_file_size_mib: u64,
    /// Where downloaded mockups land.
    pub output_dir: PathBuf,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1500,
            max_file_size_mib: mockup_core::DEFAULT_MAX_FILE_SIZE_MIB,
            output_dir: PathBuf::from("./output"),
        }
    }
}

pub fn load() -> StudioConfig {
    load_from(Path::new(CONFIG_FILENAME))
}

fn load_from(path: &Path) -> StudioConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return StudioConfig::default();
        }
        Err(err) => {
            studio_warn!("Failed to read config from {:?}: {}", path, err);
            return StudioConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            studio_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            studio_warn!("Failed to parse config from {:?}: {}", path, err);
            StudioConfig::default()
        }
    }
}
