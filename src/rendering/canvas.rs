use std::sync::{Arc, PoisonError, RwLock};

use egui::{Color32, ColorImage};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use rayon::prelude::*;

use crate::config::camera::ScaleFilter;
use crate::core::geometry::SampleRect;
use crate::core::world::WorldMap;

/// 视口可读取的底图。
///
/// 视口只持有句柄，不负责底图的分配与释放：
/// 可以是借用（`&RgbaImage`），也可以是调用方会原地重绘的共享句柄
/// （`Arc<RwLock<WorldMap>>`）。
pub trait MapSource {
    /// 底图宽高（像素）
    fn dimensions(&self) -> (u32, u32);

    /// 取 `rect` 范围并缩放到 `out_w × out_h`。
    fn sample_scaled(&self, rect: SampleRect, out_w: u32, out_h: u32, filter: ScaleFilter) -> RgbaImage;
}

impl MapSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn sample_scaled(&self, rect: SampleRect, out_w: u32, out_h: u32, filter: ScaleFilter) -> RgbaImage {
        sample_scaled(self, rect, out_w, out_h, filter)
    }
}

impl MapSource for WorldMap {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn sample_scaled(&self, rect: SampleRect, out_w: u32, out_h: u32, filter: ScaleFilter) -> RgbaImage {
        sample_scaled(&self.image, rect, out_w, out_h, filter)
    }
}

impl<T: MapSource + ?Sized> MapSource for &T {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn sample_scaled(&self, rect: SampleRect, out_w: u32, out_h: u32, filter: ScaleFilter) -> RgbaImage {
        (**self).sample_scaled(rect, out_w, out_h, filter)
    }
}

// 读锁只持有一次采样的时间；写方 panic 留下的毒锁照常读取
impl<T: MapSource + ?Sized> MapSource for Arc<RwLock<T>> {
    fn dimensions(&self) -> (u32, u32) {
        self.read().unwrap_or_else(PoisonError::into_inner).dimensions()
    }

    fn sample_scaled(&self, rect: SampleRect, out_w: u32, out_h: u32, filter: ScaleFilter) -> RgbaImage {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .sample_scaled(rect, out_w, out_h, filter)
    }
}

/// 从 `src` 取 `rect` 并缩放到 `out_w × out_h`。
///
/// 最近邻走 rayon 按行并行；其它滤波交给 `image::imageops::resize`，
/// 但只在矩形完全落在底图内时使用，否则退回最近邻（越界像素透明）。
pub fn sample_scaled(
    src: &RgbaImage,
    rect: SampleRect,
    out_w: u32,
    out_h: u32,
    filter: ScaleFilter,
) -> RgbaImage {
    let filter_type = match filter {
        ScaleFilter::Nearest => None,
        ScaleFilter::Triangle => Some(FilterType::Triangle),
        ScaleFilter::CatmullRom => Some(FilterType::CatmullRom),
        ScaleFilter::Lanczos3 => Some(FilterType::Lanczos3),
    };

    match filter_type {
        Some(ft) if rect.fits_within(src.width(), src.height()) => {
            let sub = imageops::crop_imm(src, rect.x as u32, rect.y as u32, rect.width, rect.height)
                .to_image();
            imageops::resize(&sub, out_w, out_h, ft)
        }
        _ => sample_nearest(src, rect, out_w, out_h),
    }
}

/// 最近邻采样：`sx = rect.x + ox * rect.w / out_w`（整数运算）
pub fn sample_nearest(src: &RgbaImage, rect: SampleRect, out_w: u32, out_h: u32) -> RgbaImage {
    if out_w == 0 || out_h == 0 {
        return RgbaImage::new(out_w, out_h);
    }

    let (sw, sh) = (src.width() as i64, src.height() as i64);
    let ow = out_w as usize;
    let raw = src.as_raw();

    // 预先算好每一列的源 x，行内直接查表
    let columns: Vec<Option<usize>> = (0..out_w as i64)
        .map(|ox| {
            let sx = rect.x as i64 + ox * rect.width as i64 / out_w as i64;
            (sx >= 0 && sx < sw).then_some(sx as usize)
        })
        .collect();

    let mut pixels = vec![0u8; ow * out_h as usize * 4];

    pixels
        .par_chunks_mut(ow * 4)
        .enumerate()
        .for_each(|(oy, row)| {
            let sy = rect.y as i64 + oy as i64 * rect.height as i64 / out_h as i64;
            if sy < 0 || sy >= sh {
                return;
            }
            let row_start = sy as usize * sw as usize;
            for (px, col) in row.chunks_exact_mut(4).zip(&columns) {
                if let Some(sx) = col {
                    let idx = (row_start + sx) * 4;
                    px.copy_from_slice(&raw[idx..idx + 4]);
                }
            }
        });

    RgbaImage::from_raw(out_w, out_h, pixels).unwrap_or_else(|| RgbaImage::new(out_w, out_h))
}

/// 将渲染帧转换为 egui 纹理图像
pub fn frame_to_color_image(frame: &RgbaImage) -> ColorImage {
    let size = [frame.width() as usize, frame.height() as usize];
    let pixels = frame
        .as_raw()
        .par_chunks_exact(4)
        .map(|p| Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
        .collect();
    ColorImage { size, pixels }
}
