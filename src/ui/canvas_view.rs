use egui::{Color32, Event, PointerButton, Pos2, Rect, Sense, Stroke, TextureHandle, TextureOptions, Ui, Vec2};

use crate::rendering::canvas::{frame_to_color_image, MapSource};
use crate::rendering::viewport::{Camera, MouseButton};

/// 视口渲染帧对应的 GPU 纹理，按 `frame_version` 惰性上传
#[derive(Default)]
pub struct FrameTexture {
    handle: Option<TextureHandle>,
    version: Option<u64>,
}

impl FrameTexture {
    pub fn sync<S: MapSource>(&mut self, ctx: &egui::Context, camera: &Camera<S>) -> &TextureHandle {
        let version = camera.frame_version();
        let stale = self.version != Some(version);

        let handle = match self.handle.take() {
            Some(mut handle) => {
                if stale {
                    handle.set(frame_to_color_image(camera.render()), TextureOptions::NEAREST);
                }
                handle
            }
            None => ctx.load_texture(
                "viewport_frame",
                frame_to_color_image(camera.render()),
                TextureOptions::NEAREST,
            ),
        };
        self.version = Some(version);
        self.handle.insert(handle)
    }

    /// 换了新相机后版本号会从头计数，必须强制重新上传
    pub fn invalidate(&mut self) {
        self.version = None;
    }
}

/// 画布上一帧的交互结果
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasReport {
    /// 光标所指的底图坐标
    pub hover_map: Option<[f64; 2]>,
    /// 本帧是否发生了缩放
    pub zoomed: bool,
}

fn map_button(button: PointerButton) -> MouseButton {
    match button {
        PointerButton::Primary => MouseButton::Primary,
        PointerButton::Secondary => MouseButton::Secondary,
        PointerButton::Middle => MouseButton::Middle,
        PointerButton::Extra1 => MouseButton::Other(4),
        PointerButton::Extra2 => MouseButton::Other(5),
    }
}

/// 绘制视口并把本帧输入转交给相机：
/// 按键按下事件 → `handle_click`，光标位置 → `tick`。
pub fn show_canvas<S: MapSource>(
    ui: &mut Ui,
    camera: &mut Camera<S>,
    texture: &mut FrameTexture,
) -> CanvasReport {
    let (vw, vh) = camera.view_size();
    let (rect, response) = ui.allocate_exact_size(Vec2::new(vw as f32, vh as f32), Sense::click());
    let to_local = |p: Pos2| [p.x - rect.left(), p.y - rect.top()];

    let mut report = CanvasReport::default();

    // ── button down → zoom ───────────────────────────────────
    let presses: Vec<(Pos2, PointerButton)> = ui.input(|i| {
        i.events
            .iter()
            .filter_map(|e| match e {
                Event::PointerButton {
                    pos,
                    button,
                    pressed: true,
                    ..
                } if rect.contains(*pos) => Some((*pos, *button)),
                _ => None,
            })
            .collect()
    });
    for (pos, button) in presses {
        report.zoomed |= camera.handle_click(to_local(pos), map_button(button));
    }

    // ── edge scroll ──────────────────────────────────────────
    let pointer = ui.input(|i| i.pointer.latest_pos());
    if let Some(pos) = pointer {
        camera.tick(to_local(pos));
    }
    if response.hovered() {
        ui.ctx().request_repaint();
    }

    // ── frame ────────────────────────────────────────────────
    let handle = texture.sync(ui.ctx(), camera);
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, Color32::from_gray(28));
    painter.image(
        handle.id(),
        rect,
        Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
        Color32::WHITE,
    );
    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::from_gray(120)));

    if let Some(pos) = response.hover_pos() {
        report.hover_map = Some(camera.translate_point(to_local(pos)));
    }

    report
}
