use serde::Deserialize;

use crate::core::color::ColorRgba;

/// 场景世界（底图）生成参数
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    pub buildings: u32,
    pub trees: u32,
    /// 装饰物放置时距世界边缘的最小距离
    pub margin: u32,
    pub ground_rgba: ColorRgba,
    /// 地面噪声明暗幅度，0 为纯色
    pub noise_amplitude: f64,
    /// 噪声采样周期（像素）
    pub noise_scale: f64,
    pub palette: SpritePalette,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpritePalette {
    pub tree_canopy: ColorRgba,
    pub tree_trunk: ColorRgba,
    pub shed_wall: ColorRgba,
    pub shed_roof: ColorRgba,
    pub shed_door: ColorRgba,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 3200,
            height: 3200,
            buildings: 10,
            trees: 200,
            margin: 50,
            ground_rgba: ColorRgba::rgba(0, 100, 0, 255),
            noise_amplitude: 0.0,
            noise_scale: 256.0,
            palette: SpritePalette::default(),
        }
    }
}

impl Default for SpritePalette {
    fn default() -> Self {
        Self {
            tree_canopy: ColorRgba::rgba(20, 140, 40, 255),
            tree_trunk: ColorRgba::rgba(101, 67, 33, 255),
            shed_wall: ColorRgba::rgba(160, 120, 80, 255),
            shed_roof: ColorRgba::rgba(120, 40, 30, 255),
            shed_door: ColorRgba::rgba(60, 40, 20, 255),
        }
    }
}
