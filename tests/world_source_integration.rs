//! Integration tests for shared, in-place redrawn map sources.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test world_source_integration
//! ```

use std::sync::{Arc, RwLock};

use image::{Rgba, RgbaImage};

use worldview::config::camera::CameraConfig;
use worldview::config::world::WorldConfig;
use worldview::core::geometry::SampleRect;
use worldview::core::world::WorldMap;
use worldview::rendering::canvas::MapSource;
use worldview::rendering::viewport::{Camera, MouseButton};

fn view(w: u32, h: u32) -> CameraConfig {
    CameraConfig {
        view_width: w,
        view_height: h,
        ..CameraConfig::default()
    }
}

fn small_world() -> WorldConfig {
    WorldConfig {
        width: 640,
        height: 480,
        buildings: 4,
        trees: 40,
        ..WorldConfig::default()
    }
}

#[test]
fn shared_image_changes_show_after_refresh_only() {
    let shared = Arc::new(RwLock::new(RgbaImage::from_pixel(32, 32, Rgba([0, 0, 0, 255]))));
    let mut camera = Camera::new(Arc::clone(&shared), &view(8, 8)).unwrap();
    assert_eq!(*camera.render().get_pixel(0, 0), Rgba([0, 0, 0, 255]));

    {
        let mut map = shared.write().unwrap();
        for px in map.pixels_mut() {
            *px = Rgba([255, 255, 255, 255]);
        }
    }
    // render never resamples
    assert_eq!(*camera.render().get_pixel(0, 0), Rgba([0, 0, 0, 255]));

    let before = camera.sample_rect();
    camera.refresh();
    assert_eq!(*camera.render().get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    assert_eq!(camera.sample_rect(), before);
}

#[test]
fn camera_over_generated_world() {
    let world = WorldMap::generate(&small_world(), 11).unwrap();
    let shared = Arc::new(RwLock::new(world));
    let mut camera = Camera::new(Arc::clone(&shared), &view(160, 120)).unwrap();

    assert_eq!(camera.source().dimensions(), (640, 480));
    assert_eq!(camera.sample_rect(), SampleRect::new(0, 0, 640, 480));

    assert!(camera.handle_click([80.0, 60.0], MouseButton::Primary));
    assert_eq!(camera.sample_rect(), SampleRect::new(160, 120, 320, 240));
    assert_eq!(camera.render().dimensions(), (160, 120));
}

#[test]
fn redraw_then_refresh_updates_frame_and_keeps_geometry() {
    let config = WorldConfig {
        noise_amplitude: 0.0,
        ..small_world()
    };
    let shared = Arc::new(RwLock::new(WorldMap::generate(&config, 1).unwrap()));
    let mut camera = Camera::new(Arc::clone(&shared), &view(640, 480)).unwrap();
    let first = camera.render().clone();
    let rect = camera.sample_rect();
    let version = camera.frame_version();

    shared.write().unwrap().redraw(2);
    camera.refresh();

    assert_eq!(camera.sample_rect(), rect);
    assert_eq!(camera.frame_version(), version + 1);
    assert_ne!(camera.render().as_raw(), first.as_raw());
    assert_eq!(camera.render().as_raw(), shared.read().unwrap().image.as_raw());
}

#[test]
fn borrowed_world_source() {
    let world = WorldMap::generate(&small_world(), 5).unwrap();
    let mut camera = Camera::new(&world, &view(64, 48)).unwrap();
    camera.scroll(10, 10);
    assert_eq!(camera.sample_rect(), SampleRect::new(0, 0, 640, 480));
    assert_eq!(camera.source().seed, 5);
}
