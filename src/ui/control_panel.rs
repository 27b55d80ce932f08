use egui::{CollapsingHeader, Ui};

use crate::config::camera::ZoomAnchor;
use crate::core::geometry::{LevelSize, SampleRect};

// ── action returned to the app ──────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ControlAction {
    pub regenerate: bool,
    pub open_map: bool,
    pub anchor: Option<ZoomAnchor>,
}

/// 面板展示用的视口快照
pub struct PanelInfo<'a> {
    pub source_label: &'a str,
    pub map_size: (u32, u32),
    pub zoom_level: usize,
    pub max_zoom: usize,
    pub rect: SampleRect,
    pub levels: &'a [LevelSize],
    pub anchor: ZoomAnchor,
}

// ── panel rendering ─────────────────────────────────────────

pub fn show_control_panel(ui: &mut Ui, info: &PanelInfo<'_>) -> ControlAction {
    let mut action = ControlAction::default();

    ui.heading("控制面板");
    ui.separator();

    // ── map ──
    ui.label(format!("底图: {}", info.source_label));
    ui.label(format!("尺寸: {} x {}", info.map_size.0, info.map_size.1));
    ui.horizontal(|ui| {
        if ui.button("🔄 重新生成世界").clicked() {
            action.regenerate = true;
        }
        if ui.button("📂 打开图像…").clicked() {
            action.open_map = true;
        }
    });

    ui.separator();

    // ── zoom ──
    ui.label(format!("缩放级别: {}/{}", info.zoom_level, info.max_zoom));
    ui.add(egui::ProgressBar::new(info.zoom_level as f32 / info.max_zoom.max(1) as f32));
    let r = info.rect;
    ui.label(format!("采样矩形: ({}, {}) {}x{}", r.x, r.y, r.width, r.height));

    ui.label("缩放定位");
    let mut anchor = info.anchor;
    ui.radio_value(&mut anchor, ZoomAnchor::Center, "点击点居中");
    ui.radio_value(&mut anchor, ZoomAnchor::Cursor, "点击点留在光标下");
    if anchor != info.anchor {
        action.anchor = Some(anchor);
    }

    CollapsingHeader::new("级别尺寸表")
        .default_open(false)
        .show(ui, |ui| {
            for (level, size) in info.levels.iter().enumerate() {
                let marker = if level == info.zoom_level { "→" } else { "  " };
                ui.monospace(format!("{marker} {level}: {} x {}", size.width, size.height));
            }
        });

    ui.separator();
    ui.label("左键放大，右键缩小；光标靠近边缘滚动");

    action
}
