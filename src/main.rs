use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{error, info};

use worldview::config::camera::ZoomAnchor;
use worldview::config::{load_viewer_config_with, ViewerConfig};
use worldview::ui::app::{load_map_image, ViewerApp};

/// Lian World Viewer: 边缘滚动、点击分级缩放的世界地图查看器
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// 直接查看的底图图像（不指定则程序生成世界）
    #[arg(long)]
    map: Option<PathBuf>,

    /// 世界生成种子（不指定则随机）
    #[arg(long)]
    seed: Option<u64>,

    /// 覆盖内置配置的 JSON 文件（可只写部分字段）
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    view_width: Option<u32>,

    #[arg(long)]
    view_height: Option<u32>,

    #[arg(long, value_enum)]
    anchor: Option<AnchorArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AnchorArg {
    Center,
    Cursor,
}

impl From<AnchorArg> for ZoomAnchor {
    fn from(value: AnchorArg) -> Self {
        match value {
            AnchorArg::Center => ZoomAnchor::Center,
            AnchorArg::Cursor => ZoomAnchor::Cursor,
        }
    }
}

fn apply_overrides(config: &mut ViewerConfig, args: &Args) {
    if let Some(w) = args.view_width {
        config.camera.view_width = w;
    }
    if let Some(h) = args.view_height {
        config.camera.view_height = h;
    }
    if let Some(anchor) = args.anchor {
        config.camera.anchor = anchor.into();
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match load_viewer_config_with(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    apply_overrides(&mut config, &args);

    let source = match &args.map {
        Some(path) => load_map_image(path),
        None => {
            let seed = args.seed.unwrap_or_else(rand::random);
            ViewerApp::initial_world(&config, seed)
        }
    };
    let app = match source.and_then(|source| ViewerApp::new(config.clone(), source)) {
        Ok(app) => app,
        Err(e) => {
            error!("初始化失败: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (vw, vh) = (config.camera.view_width as f32, config.camera.view_height as f32);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Lian World Viewer")
            .with_inner_size([vw + 300.0, vh + 60.0])
            .with_app_id("lian-world-viewer"),
        ..Default::default()
    };

    info!("视口 {}x{}，启动窗口", config.camera.view_width, config.camera.view_height);
    let result = eframe::run_native(
        "Lian World Viewer",
        options,
        Box::new(move |_cc| Box::new(app)),
    );
    if let Err(e) = result {
        error!("窗口运行失败: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
