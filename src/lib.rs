//! Lian World Viewer 库。
//!
//! 核心是 [`rendering::viewport::Camera`]：固定分辨率视口与分级缩放底图之间的
//! 坐标映射、边缘滚动与点击缩放。其余模块为它提供底图、配置与界面。

pub mod config;
pub mod core;
pub mod rendering;
pub mod ui;
