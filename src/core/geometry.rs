//! # 视口几何
//!
//! 缩放级别采样尺寸表与采样矩形（[`SampleRect`]）。
//!
//! ## 夹取规则
//!
//! 所有矩形只调整位置、不缩小尺寸：
//!
//! ```text
//! x = max(0, min(x, bounds_w - width))
//! ```
//!
//! 矩形比边界大时位置饱和到原点，矩形向右/下溢出。

/// 缩放级别数量（级别 0..=9）
pub const ZOOM_LEVELS: usize = 10;

/// 某一缩放级别下的采样尺寸（底图像素）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelSize {
    pub width: u32,
    pub height: u32,
}

impl LevelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// 由底图尺寸逐级折半得到的采样尺寸表，每维至少 1 像素。
pub fn build_level_table(base_width: u32, base_height: u32) -> [LevelSize; ZOOM_LEVELS] {
    let mut table = [LevelSize::default(); ZOOM_LEVELS];
    for (level, size) in table.iter_mut().enumerate() {
        *size = LevelSize::new(
            (base_width >> level).max(1),
            (base_height >> level).max(1),
        );
    }
    table
}

/// 底图坐标系中的轴对齐采样矩形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl SampleRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// 原点处、给定级别尺寸的矩形
    pub fn at_origin(size: LevelSize) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// 浮点左上角四舍五入到整数像素
    pub fn from_top_left(x: f64, y: f64, size: LevelSize) -> Self {
        Self::new(round_to_i32(x), round_to_i32(y), size.width, size.height)
    }

    /// 以 `(cx, cy)` 为中心
    pub fn centered(cx: f64, cy: f64, size: LevelSize) -> Self {
        Self::from_top_left(
            cx - size.width as f64 / 2.0,
            cy - size.height as f64 / 2.0,
            size,
        )
    }

    pub fn size(&self) -> LevelSize {
        LevelSize::new(self.width, self.height)
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn center(&self) -> [f64; 2] {
        [
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        ]
    }

    /// 平移（饱和加法，极端偏移不会溢出）
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    /// 按夹取规则把矩形放进 `[0,0]–[bounds_w,bounds_h]`
    pub fn clamped(self, bounds_w: u32, bounds_h: u32) -> Self {
        Self {
            x: clamp_axis(self.x, self.width, bounds_w),
            y: clamp_axis(self.y, self.height, bounds_h),
            ..self
        }
    }

    /// 矩形是否完全落在边界内
    pub fn fits_within(&self, bounds_w: u32, bounds_h: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.right() <= bounds_w as i64
            && self.bottom() <= bounds_h as i64
    }
}

fn clamp_axis(pos: i32, len: u32, bound: u32) -> i32 {
    let max_pos = bound as i64 - len as i64;
    if max_pos <= 0 {
        return 0;
    }
    (pos as i64).clamp(0, max_pos) as i32
}

fn round_to_i32(v: f64) -> i32 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_table_halves_and_never_hits_zero() {
        let table = build_level_table(300, 5);
        assert_eq!(table[0], LevelSize::new(300, 5));
        assert_eq!(table[1], LevelSize::new(150, 2));
        assert_eq!(table[2], LevelSize::new(75, 1));
        assert_eq!(table[3], LevelSize::new(37, 1));
        assert_eq!(table[9], LevelSize::new(1, 1));
        for pair in table.windows(2) {
            assert!(pair[1].width <= pair[0].width);
            assert!(pair[1].height <= pair[0].height);
        }
    }

    #[test]
    fn clamp_keeps_size_and_moves_position() {
        let r = SampleRect::new(-40, 9000, 400, 400).clamped(3200, 3200);
        assert_eq!(r, SampleRect::new(0, 2800, 400, 400));
    }

    #[test]
    fn oversized_rect_saturates_at_origin() {
        let r = SampleRect::new(120, -7, 500, 500).clamped(300, 200);
        assert_eq!(r, SampleRect::new(0, 0, 500, 500));
    }

    #[test]
    fn exact_fit_is_pinned_to_origin() {
        let r = SampleRect::new(5000, 0, 3200, 3200).clamped(3200, 3200);
        assert_eq!((r.x, r.y), (0, 0));
    }

    #[test]
    fn translation_saturates() {
        let r = SampleRect::new(i32::MAX - 1, i32::MIN + 1, 4, 4).translated(10, -10);
        assert_eq!((r.x, r.y), (i32::MAX, i32::MIN));
    }

    #[test]
    fn centered_rounds_top_left() {
        let r = SampleRect::centered(1600.0, 1600.0, LevelSize::new(1600, 1600));
        assert_eq!(r, SampleRect::new(800, 800, 1600, 1600));
        let r = SampleRect::centered(10.6, 10.4, LevelSize::new(3, 3));
        assert_eq!((r.x, r.y), (9, 9));
        assert_eq!(r.center(), [10.5, 10.5]);
    }
}
