// This file is part of color-lens and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2025 color-lens contributors

//! Persisted application settings.

use std::path::PathBuf;
use std::time::Duration;
use std::{fs, io};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

lazy_static! {
    pub static ref CONFIG_PATH: PathBuf = directories::ProjectDirs::from("io.colorlens", "", "color-lens")
        .unwrap()
        .config_dir()
        .join("config.toml");
}

const DEFAULT_CAMERA_INDEX: i32 = 0;
const DEFAULT_FPS: u32 = 30;

// needed for serde, as it can't read constants directly
const fn default_fps() -> u32 {
    DEFAULT_FPS
}

const fn default_mirror() -> bool {
    true
}

#[derive(Deserialize, Serialize)]
pub struct PersistedSettings {
    pub camera_index: i32,
    /// flip camera frames horizontally for a selfie-style preview
    #[serde(default = "default_mirror")]
    pub mirror_camera: bool,
    #[serde(default = "default_fps")]
    fps: u32,
    /// last loaded still image, reloaded at startup
    pub image_path: Option<PathBuf>,
}

impl PersistedSettings {
    fn load(self) -> Settings {
        let tick_interval = fps_to_tick_interval(self.fps);
        Settings {
            persisted: self,
            tick_interval,
        }
    }
}

impl Default for PersistedSettings {
    fn default() -> Self {
        PersistedSettings {
            camera_index: DEFAULT_CAMERA_INDEX,
            mirror_camera: default_mirror(),
            fps: DEFAULT_FPS,
            image_path: None,
        }
    }
}

pub struct Settings {
    pub persisted: PersistedSettings,
    /// UI tick period derived from the configured fps
    pub tick_interval: Duration,
}

impl Settings {
    /// Last loaded image path. An empty string a user left in the config
    /// file counts as unset.
    pub fn image_path(&self) -> Option<&PathBuf> {
        self.persisted
            .image_path
            .as_ref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    pub fn load() -> io::Result<Settings> {
        fs::create_dir_all(CONFIG_PATH.as_path().parent().unwrap())?;
        fs::read_to_string(CONFIG_PATH.as_path())
            .and_then(|string| {
                toml::from_str::<PersistedSettings>(&string)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            })
            .map(|settings| settings.load())
    }

    pub fn save(&self) -> Result<(), String> {
        let serialized_config = toml::to_string(&self.persisted).expect("failed to serialize settings");
        fs::write(CONFIG_PATH.as_path(), serialized_config).map_err(|e| format!("{e:?}"))
    }
}

impl Default for Settings {
    fn default() -> Self {
        PersistedSettings::default().load()
    }
}

fn fps_to_tick_interval(fps: u32) -> Duration {
    let millis = 1000u64.div_ceil(fps.max(1) as u64);
    Duration::from_millis(millis)
}
