use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use eframe::egui;
use image::RgbaImage;
use log::{info, warn};

use crate::config::camera::ScaleFilter;
use crate::config::ViewerConfig;
use crate::core::geometry::SampleRect;
use crate::core::world::WorldMap;
use crate::core::CoreError;
use crate::rendering::canvas::MapSource;
use crate::rendering::viewport::Camera;
use crate::ui::canvas_view::{show_canvas, FrameTexture};
use crate::ui::control_panel::{show_control_panel, PanelInfo};
use crate::ui::status_bar::show_status_bar;

/// 查看器可显示的底图：程序生成的世界（可原地重绘）或从文件载入的图像
#[derive(Clone)]
pub enum ViewerSource {
    World(Arc<RwLock<WorldMap>>),
    Image { path: PathBuf, image: Arc<RgbaImage> },
}

impl ViewerSource {
    pub fn label(&self) -> String {
        match self {
            Self::World(world) => {
                let seed = world.read().unwrap_or_else(PoisonError::into_inner).seed;
                format!("生成世界 (种子 {seed})")
            }
            Self::Image { path, .. } => path.display().to_string(),
        }
    }
}

impl MapSource for ViewerSource {
    fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::World(world) => world.dimensions(),
            Self::Image { image, .. } => image.dimensions(),
        }
    }

    fn sample_scaled(
        &self,
        rect: SampleRect,
        out_w: u32,
        out_h: u32,
        filter: ScaleFilter,
    ) -> RgbaImage {
        match self {
            Self::World(world) => world.sample_scaled(rect, out_w, out_h, filter),
            Self::Image { image, .. } => image.sample_scaled(rect, out_w, out_h, filter),
        }
    }
}

/// 从磁盘载入底图图像
pub fn load_map_image(path: &Path) -> Result<ViewerSource, CoreError> {
    let image = image::open(path)?.to_rgba8();
    info!("已载入底图: {} ({}x{})", path.display(), image.width(), image.height());
    Ok(ViewerSource::Image {
        path: path.to_path_buf(),
        image: Arc::new(image),
    })
}

pub struct ViewerApp {
    config: ViewerConfig,
    camera: Camera<ViewerSource>,
    texture: FrameTexture,
    hover_map: Option<[f64; 2]>,
    last_status: String,
}

impl ViewerApp {
    /// 窗口启动前完成所有可能失败的初始化
    pub fn new(config: ViewerConfig, source: ViewerSource) -> Result<Self, CoreError> {
        let camera = Camera::new(source, &config.camera)?;
        let (w, h) = camera.source().dimensions();
        Ok(Self {
            config,
            camera,
            texture: FrameTexture::default(),
            hover_map: None,
            last_status: format!("底图就绪 ({w}x{h})"),
        })
    }

    pub fn initial_world(config: &ViewerConfig, seed: u64) -> Result<ViewerSource, CoreError> {
        let world = WorldMap::generate(&config.world, seed)?;
        Ok(ViewerSource::World(Arc::new(RwLock::new(world))))
    }

    /// 新底图：尺寸相同则沿用当前缩放与位置，否则重建相机
    fn replace_source(&mut self, source: ViewerSource) {
        let label = source.label();
        if source.dimensions() == self.camera.source().dimensions() {
            self.camera.set_source(source);
            self.last_status = format!("已切换底图: {label}");
            return;
        }

        let anchor = self.camera.anchor();
        match Camera::new(source, &self.config.camera) {
            Ok(mut camera) => {
                camera.set_anchor(anchor);
                self.camera = camera;
                self.texture.invalidate();
                self.last_status = format!("已切换底图: {label}（视口已重置）");
            }
            Err(e) => {
                warn!("底图不可用: {e}");
                self.last_status = format!("底图不可用: {e}");
            }
        }
    }

    fn regenerate_world(&mut self) {
        let seed: u64 = rand::random();
        if let ViewerSource::World(world) = self.camera.source() {
            world
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .redraw(seed);
            self.camera.refresh();
            self.last_status = format!("世界已重绘 (种子 {seed})");
            return;
        }

        match Self::initial_world(&self.config, seed) {
            Ok(source) => self.replace_source(source),
            Err(e) => {
                warn!("世界生成失败: {e}");
                self.last_status = format!("世界生成失败: {e}");
            }
        }
    }

    fn open_map_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("图像", &["png", "jpg", "jpeg", "bmp", "gif", "webp"])
            .pick_file()
        else {
            return;
        };

        match load_map_image(&path) {
            Ok(source) => self.replace_source(source),
            Err(e) => {
                warn!("{e}");
                self.last_status = e.to_string();
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                let label = self.camera.source().label();
                let info = PanelInfo {
                    source_label: &label,
                    map_size: self.camera.source().dimensions(),
                    zoom_level: self.camera.zoom_level(),
                    max_zoom: self.camera.max_zoom(),
                    rect: self.camera.sample_rect(),
                    levels: self.camera.level_sizes(),
                    anchor: self.camera.anchor(),
                };
                let action = show_control_panel(ui, &info);
                if let Some(anchor) = action.anchor {
                    self.camera.set_anchor(anchor);
                }
                if action.regenerate {
                    self.regenerate_world();
                }
                if action.open_map {
                    self.open_map_dialog();
                }
            });

        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .min_height(28.0)
            .show(ctx, |ui| {
                let fps = ctx.input(|i| {
                    if i.stable_dt > 0.0 {
                        1.0 / i.stable_dt
                    } else {
                        0.0
                    }
                });
                show_status_bar(ui, fps, self.hover_map, &self.last_status);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let report = show_canvas(ui, &mut self.camera, &mut self.texture);
            self.hover_map = report.hover_map;
            if report.zoomed {
                let r = self.camera.sample_rect();
                self.last_status = format!(
                    "缩放级别 {} @ ({}, {}) {}x{}",
                    self.camera.zoom_level(),
                    r.x,
                    r.y,
                    r.width,
                    r.height
                );
            }
        });
    }
}
