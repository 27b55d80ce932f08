use serde::Deserialize;

/// 采样矩形缩放到视口时使用的滤波方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleFilter {
    #[default]
    Nearest,
    Triangle,
    CatmullRom,
    Lanczos3,
}

/// 缩放时点击点的落位方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomAnchor {
    /// 点击处的地图点成为新视野中心
    #[default]
    Center,
    /// 点击处的地图点保持在光标下
    Cursor,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub view_width: u32,
    pub view_height: u32,
    /// 光标距视口边缘多少像素内触发滚动
    pub scroll_margin: u32,
    /// 每帧滚动的底图像素数
    pub scroll_speed: u32,
    pub filter: ScaleFilter,
    pub anchor: ZoomAnchor,
    /// true：光标在视口外时不滚动；false：先夹回视口再判断边缘
    pub ignore_outside_cursor: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            view_width: 800,
            view_height: 800,
            scroll_margin: 20,
            scroll_speed: 5,
            filter: ScaleFilter::Nearest,
            anchor: ZoomAnchor::Center,
            ignore_outside_cursor: true,
        }
    }
}
