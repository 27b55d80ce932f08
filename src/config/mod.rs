pub mod camera;
pub mod world;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;
use serde_json::Value;

use camera::CameraConfig;
use world::WorldConfig;

const VIEWER_JSON: &str = include_str!("../assets/viewer.json");

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(error) => write!(f, "配置解析失败: {error}"),
            Self::Io { path, source } => {
                write!(f, "配置文件读取失败: {} ({source})", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(error) => Some(error),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// viewer.json 顶层结构
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub world: WorldConfig,
}

/// 读取内置默认配置
pub fn load_viewer_config() -> Result<ViewerConfig, ConfigError> {
    let config: ViewerConfig = serde_json::from_str(VIEWER_JSON)?;
    Ok(config)
}

/// 内置默认配置叠加用户 JSON 文件（可只写部分字段）。
pub fn load_viewer_config_with(path: Option<&Path>) -> Result<ViewerConfig, ConfigError> {
    let Some(path) = path else {
        return load_viewer_config();
    };

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = merge_json_str(VIEWER_JSON, &content)?;
    info!("已加载配置文件: {}", path.display());
    Ok(config)
}

/// 把 `overlay` 深度合并到 `base` 上再反序列化。
pub fn merge_json_str(base: &str, overlay: &str) -> Result<ViewerConfig, ConfigError> {
    let mut root: Value = serde_json::from_str(base)?;
    let overlay: Value = serde_json::from_str(overlay)?;
    merge_value(&mut root, overlay);
    Ok(serde_json::from_value(root)?)
}

fn merge_value(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_obj), Value::Object(overlay_obj)) => {
            for (key, value) in overlay_obj {
                match base_obj.get_mut(&key) {
                    Some(slot) => merge_value(slot, value),
                    None => {
                        base_obj.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
