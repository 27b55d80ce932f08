use egui::Ui;

pub fn show_status_bar(ui: &mut Ui, fps: f32, hover_map: Option<[f64; 2]>, message: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(format!("状态: {message}"));
        ui.separator();
        ui.label(format!("FPS: {:.0}", fps));
        ui.separator();
        match hover_map {
            Some([x, y]) => ui.label(format!("地图坐标: ({x:.0}, {y:.0})")),
            None => ui.label("地图坐标: -"),
        };
    });
}
