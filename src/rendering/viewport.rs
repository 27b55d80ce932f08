//! # 视口 / 相机
//!
//! 在固定分辨率的显示窗口与可分级缩放的底图区域之间维护坐标映射：
//!
//! - 10 个离散缩放级别，级别 `i` 的采样尺寸为 `(w >> i, h >> i)`（至少 1 像素）；
//! - 光标靠近视口边缘时逐帧滚动；
//! - 主键放大、副键缩小，以点击处的地图点定位新视野；
//! - 屏幕坐标 → 底图坐标换算。
//!
//! 渲染帧只在滚动、缩放、换底图或 [`Camera::refresh`] 时重新采样，
//! [`Camera::render`] 直接返回缓存。

use image::RgbaImage;
use log::{debug, warn};

use crate::config::camera::{CameraConfig, ScaleFilter, ZoomAnchor};
use crate::core::geometry::{build_level_table, LevelSize, SampleRect, ZOOM_LEVELS};
use crate::core::CoreError;
use crate::rendering::canvas::MapSource;

/// 输入事件中的鼠标按键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// 左键：放大
    Primary,
    /// 右键：缩小
    Secondary,
    Middle,
    Other(u16),
}

impl MouseButton {
    /// 缩放方向：+1 放大，-1 缩小，其它键不缩放
    fn zoom_step(self) -> Option<i32> {
        match self {
            Self::Primary => Some(1),
            Self::Secondary => Some(-1),
            Self::Middle | Self::Other(_) => None,
        }
    }
}

pub struct Camera<S: MapSource> {
    source: S,
    /// 当前底图尺寸，采样矩形按它夹取
    bounds: (u32, u32),
    levels: [LevelSize; ZOOM_LEVELS],
    zoom_level: usize,
    rect: SampleRect,
    view_width: u32,
    view_height: u32,
    scroll_margin: u32,
    scroll_speed: u32,
    filter: ScaleFilter,
    anchor: ZoomAnchor,
    ignore_outside_cursor: bool,
    frame: RgbaImage,
    frame_version: u64,
}

impl<S: MapSource> Camera<S> {
    pub fn new(source: S, config: &CameraConfig) -> Result<Self, CoreError> {
        if config.view_width == 0 || config.view_height == 0 {
            return Err(CoreError::EmptyView {
                width: config.view_width,
                height: config.view_height,
            });
        }
        let (base_w, base_h) = source.dimensions();
        if base_w == 0 || base_h == 0 {
            return Err(CoreError::EmptyMap {
                width: base_w,
                height: base_h,
            });
        }

        let levels = build_level_table(base_w, base_h);
        let mut camera = Self {
            source,
            bounds: (base_w, base_h),
            levels,
            zoom_level: 0,
            rect: SampleRect::at_origin(levels[0]),
            view_width: config.view_width,
            view_height: config.view_height,
            scroll_margin: config.scroll_margin,
            scroll_speed: config.scroll_speed,
            filter: config.filter,
            anchor: config.anchor,
            ignore_outside_cursor: config.ignore_outside_cursor,
            frame: RgbaImage::new(0, 0),
            frame_version: 0,
        };
        camera.scroll(0, 0);

        debug!(
            "视口已创建: 底图 {base_w}x{base_h}，视口 {}x{}，最深级别尺寸 {:?}",
            camera.view_width,
            camera.view_height,
            camera.levels[ZOOM_LEVELS - 1]
        );
        Ok(camera)
    }

    // ── 查询 ─────────────────────────────────────────────────

    pub fn zoom_level(&self) -> usize {
        self.zoom_level
    }

    pub fn max_zoom(&self) -> usize {
        ZOOM_LEVELS - 1
    }

    pub fn sample_rect(&self) -> SampleRect {
        self.rect
    }

    pub fn view_size(&self) -> (u32, u32) {
        (self.view_width, self.view_height)
    }

    pub fn level_size(&self, level: usize) -> Option<LevelSize> {
        self.levels.get(level).copied()
    }

    pub fn level_sizes(&self) -> &[LevelSize; ZOOM_LEVELS] {
        &self.levels
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn scroll_margin(&self) -> u32 {
        self.scroll_margin
    }

    pub fn scroll_speed(&self) -> u32 {
        self.scroll_speed
    }

    pub fn anchor(&self) -> ZoomAnchor {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: ZoomAnchor) {
        self.anchor = anchor;
    }

    /// 每次重新采样加一；纹理持有方据此判断是否需要重新上传
    pub fn frame_version(&self) -> u64 {
        self.frame_version
    }

    /// 缓存的渲染帧，不会触发采样
    pub fn render(&self) -> &RgbaImage {
        &self.frame
    }

    // ── 坐标换算 ─────────────────────────────────────────────

    /// 屏幕坐标 → 底图坐标（浮点比例，不截断）
    pub fn translate_point(&self, screen: [f32; 2]) -> [f64; 2] {
        let x_scale = self.rect.width as f64 / self.view_width as f64;
        let y_scale = self.rect.height as f64 / self.view_height as f64;
        [
            self.rect.x as f64 + screen[0] as f64 * x_scale,
            self.rect.y as f64 + screen[1] as f64 * y_scale,
        ]
    }

    /// 以 `(map_x, map_y)` 为中心、当前级别尺寸的矩形（已夹取）
    pub fn rect_centered_at(&self, map_x: f64, map_y: f64) -> SampleRect {
        SampleRect::centered(map_x, map_y, self.levels[self.zoom_level])
            .clamped(self.bounds.0, self.bounds.1)
    }

    /// 当前级别下让 `map` 点落在屏幕 `screen` 处的矩形（已夹取）
    fn rect_anchored_at(&self, map: [f64; 2], screen: [f32; 2]) -> SampleRect {
        let size = self.levels[self.zoom_level];
        let left = map[0] - screen[0] as f64 * size.width as f64 / self.view_width as f64;
        let top = map[1] - screen[1] as f64 * size.height as f64 / self.view_height as f64;
        SampleRect::from_top_left(left, top, size).clamped(self.bounds.0, self.bounds.1)
    }

    // ── 状态变更 ─────────────────────────────────────────────

    /// 平移采样矩形、夹取并重新采样
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        self.rect = self
            .rect
            .translated(dx, dy)
            .clamped(self.bounds.0, self.bounds.1);
        self.resample();
    }

    /// 鼠标按下：主键放大一级，副键缩小一级；到达边界或其它键时无操作。
    ///
    /// 返回是否发生了缩放。
    pub fn handle_click(&mut self, screen: [f32; 2], button: MouseButton) -> bool {
        let Some(step) = button.zoom_step() else {
            return false;
        };
        let target = self.zoom_level as i32 + step;
        if target < 0 || target > self.max_zoom() as i32 {
            return false;
        }

        let map = self.translate_point(screen);
        let from = self.zoom_level;
        self.zoom_level = target as usize;
        self.rect = match self.anchor {
            ZoomAnchor::Center => self.rect_centered_at(map[0], map[1]),
            ZoomAnchor::Cursor => self.rect_anchored_at(map, screen),
        };
        self.resample();

        debug!(
            "缩放 {from} → {}，锚点 ({:.1}, {:.1})，采样矩形 {:?}",
            self.zoom_level, map[0], map[1], self.rect
        );
        true
    }

    /// 每帧调用：光标靠近视口边缘时滚动
    pub fn tick(&mut self, cursor: [f32; 2]) {
        let Some([x, y]) = self.normalize_cursor(cursor) else {
            return;
        };

        let margin = self.scroll_margin as f32;
        let speed = self.scroll_speed.min(i32::MAX as u32) as i32;
        let (vw, vh) = (self.view_width as f32, self.view_height as f32);

        let mut offset = [0i32; 2];
        if x < margin {
            offset[0] -= speed;
        } else if x > vw - margin {
            offset[0] += speed;
        }
        if y < margin {
            offset[1] -= speed;
        } else if y > vh - margin {
            offset[1] += speed;
        }

        if offset != [0, 0] {
            self.scroll(offset[0], offset[1]);
        }
    }

    /// 视口外或非有限坐标：按配置忽略，或夹回视口内
    fn normalize_cursor(&self, cursor: [f32; 2]) -> Option<[f32; 2]> {
        let [x, y] = cursor;
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let (vw, vh) = (self.view_width as f32, self.view_height as f32);
        let inside = x >= 0.0 && x < vw && y >= 0.0 && y < vh;
        if inside {
            Some(cursor)
        } else if self.ignore_outside_cursor {
            None
        } else {
            Some([x.clamp(0.0, vw), y.clamp(0.0, vh)])
        }
    }

    /// 替换底图句柄；缩放级别、矩形位置与级别尺寸表保持不变。
    ///
    /// 新底图尺寸不同时只按新边界夹取，越界部分渲染为透明。
    pub fn set_source(&mut self, source: S) {
        let bounds = source.dimensions();
        if bounds != self.bounds {
            warn!(
                "底图尺寸变化: {}x{} → {}x{}，级别尺寸表保持不变",
                self.bounds.0, self.bounds.1, bounds.0, bounds.1
            );
        }
        self.source = source;
        self.bounds = bounds;
        self.scroll(0, 0);
    }

    /// 底图被原地重绘后重新采样，几何状态不变
    pub fn refresh(&mut self) {
        self.resample();
    }

    fn resample(&mut self) {
        self.frame = self
            .source
            .sample_scaled(self.rect, self.view_width, self.view_height, self.filter);
        self.frame_version += 1;
    }
}
