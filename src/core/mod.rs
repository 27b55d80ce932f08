pub mod color;
pub mod geometry;
pub mod world;

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CoreError {
    EmptyView { width: u32, height: u32 },
    EmptyMap { width: u32, height: u32 },
    Image(image::ImageError),
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyView { width, height } => {
                write!(f, "视口尺寸非法: {width}x{height}，宽高必须大于 0")
            }
            Self::EmptyMap { width, height } => {
                write!(f, "底图尺寸非法: {width}x{height}，宽高必须大于 0")
            }
            Self::Image(error) => write!(f, "图像加载失败: {error}"),
        }
    }
}

impl Error for CoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Image(error) => Some(error),
            _ => None,
        }
    }
}

impl From<image::ImageError> for CoreError {
    fn from(value: image::ImageError) -> Self {
        Self::Image(value)
    }
}
