//! # 场景世界
//!
//! 生成供视口观察的底图：地面底色（可叠加 Perlin 明暗），
//! 再随机摆放若干小屋与树木。精灵全部按程序绘制，不依赖外部素材。
//!
//! 同一种子生成结果完全一致；[`WorldMap::redraw`] 在原缓冲区内重绘，
//! 尺寸保持不变，供共享底图的视口调用 `refresh` 后重新采样。

use image::RgbaImage;
use log::info;
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::world::{SpritePalette, WorldConfig};
use crate::core::color::ColorRgba;
use crate::core::CoreError;

/// 场景中装饰物的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    Shed,
    Tree,
}

/// 一个已摆放的装饰物（左上角坐标）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: Decoration,
    pub x: u32,
    pub y: u32,
}

const TREE_SIZE: u32 = 32;
const SHED_WIDTH: u32 = 48;
const SHED_HEIGHT: u32 = 40;

#[derive(Debug, Clone)]
pub struct WorldMap {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub image: RgbaImage,
    pub placements: Vec<Placement>,
    config: WorldConfig,
}

impl WorldMap {
    pub fn generate(config: &WorldConfig, seed: u64) -> Result<Self, CoreError> {
        if config.width == 0 || config.height == 0 {
            return Err(CoreError::EmptyMap {
                width: config.width,
                height: config.height,
            });
        }

        let mut world = Self {
            width: config.width,
            height: config.height,
            seed,
            image: RgbaImage::new(config.width, config.height),
            placements: Vec::new(),
            config: config.clone(),
        };
        world.redraw(seed);
        Ok(world)
    }

    /// 用新种子在原缓冲区内重绘整个世界
    pub fn redraw(&mut self, seed: u64) {
        self.seed = seed;
        fill_ground(&mut self.image, &self.config, seed);

        let mut rng = StdRng::seed_from_u64(seed);
        self.placements.clear();
        // 先放小屋再放树，树可以盖住小屋
        for _ in 0..self.config.buildings {
            if let Some((x, y)) = random_position(&mut rng, self.width, self.height, self.config.margin) {
                self.placements.push(Placement { kind: Decoration::Shed, x, y });
            }
        }
        for _ in 0..self.config.trees {
            if let Some((x, y)) = random_position(&mut rng, self.width, self.height, self.config.margin) {
                self.placements.push(Placement { kind: Decoration::Tree, x, y });
            }
        }

        let palette = &self.config.palette;
        for p in &self.placements {
            match p.kind {
                Decoration::Shed => draw_shed(&mut self.image, p.x, p.y, palette),
                Decoration::Tree => draw_tree(&mut self.image, p.x, p.y, palette),
            }
        }

        info!(
            "世界已绘制: {}x{}，小屋 {}，树木 {}，种子 {}",
            self.width, self.height, self.config.buildings, self.config.trees, seed
        );
    }
}

/// 在 `[margin, size - margin]` 内随机取点；世界太小放不下时返回 None
fn random_position(rng: &mut StdRng, width: u32, height: u32, margin: u32) -> Option<(u32, u32)> {
    if width < margin.saturating_mul(2) || height < margin.saturating_mul(2) {
        return None;
    }
    let x = rng.gen_range(margin..=width - margin);
    let y = rng.gen_range(margin..=height - margin);
    Some((x, y))
}

/// 地面：按行并行填充底色，噪声幅度非零时叠加明暗
fn fill_ground(image: &mut RgbaImage, config: &WorldConfig, seed: u64) {
    let w = image.width() as usize;
    let ground = config.ground_rgba;
    let amplitude = config.noise_amplitude;
    let scale = config.noise_scale.max(1.0);
    let perlin = Perlin::new(seed as u32);

    image
        .par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let color = if amplitude > 0.0 {
                    let n = perlin.get([x as f64 / scale, y as f64 / scale]);
                    ground.shaded(1.0 + n * amplitude)
                } else {
                    ground
                };
                px.copy_from_slice(&color.as_array());
            }
        });
}

/// 画一个实心矩形，越界部分裁掉
fn fill_rect(image: &mut RgbaImage, x0: i64, y0: i64, w: u32, h: u32, color: ColorRgba) {
    let x_start = x0.max(0);
    let y_start = y0.max(0);
    let x_end = (x0 + w as i64).min(image.width() as i64);
    let y_end = (y0 + h as i64).min(image.height() as i64);
    for y in y_start..y_end {
        for x in x_start..x_end {
            image.put_pixel(x as u32, y as u32, color.into());
        }
    }
}

fn fill_circle(image: &mut RgbaImage, cx: i64, cy: i64, r: i64, color: ColorRgba) {
    for y in (cy - r).max(0)..(cy + r + 1).min(image.height() as i64) {
        for x in (cx - r).max(0)..(cx + r + 1).min(image.width() as i64) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                image.put_pixel(x as u32, y as u32, color.into());
            }
        }
    }
}

fn draw_tree(image: &mut RgbaImage, x: u32, y: u32, palette: &SpritePalette) {
    let (x, y) = (x as i64, y as i64);
    let half = (TREE_SIZE / 2) as i64;
    fill_rect(image, x + half - 3, y + half, 6, TREE_SIZE / 2, palette.tree_trunk);
    fill_circle(image, x + half, y + half - 2, half - 4, palette.tree_canopy);
}

fn draw_shed(image: &mut RgbaImage, x: u32, y: u32, palette: &SpritePalette) {
    let (x, y) = (x as i64, y as i64);
    let roof_h = SHED_HEIGHT / 3;
    fill_rect(image, x, y + roof_h as i64, SHED_WIDTH, SHED_HEIGHT - roof_h, palette.shed_wall);
    fill_rect(image, x - 4, y, SHED_WIDTH + 8, roof_h, palette.shed_roof);
    fill_rect(
        image,
        x + (SHED_WIDTH / 2) as i64 - 6,
        y + (SHED_HEIGHT - 18) as i64,
        12,
        18,
        palette.shed_door,
    );
}
