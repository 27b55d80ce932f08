use image::Rgba;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "[u8; 4]")]
pub struct ColorRgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<[u8; 4]> for ColorRgba {
    fn from(value: [u8; 4]) -> Self {
        Self {
            r: value[0],
            g: value[1],
            b: value[2],
            a: value[3],
        }
    }
}

impl From<ColorRgba> for Rgba<u8> {
    fn from(value: ColorRgba) -> Self {
        Rgba(value.as_array())
    }
}

impl ColorRgba {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn as_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// 按系数调整亮度（alpha 不变），用于地面噪声明暗
    pub fn shaded(self, factor: f64) -> Self {
        let f = |c: u8| (c as f64 * factor).round().clamp(0.0, 255.0) as u8;
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
            a: self.a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shading_clamps_channels() {
        let c = ColorRgba::rgba(0, 100, 200, 255);
        assert_eq!(c.shaded(2.0), ColorRgba::rgba(0, 200, 255, 255));
        assert_eq!(c.shaded(0.5), ColorRgba::rgba(0, 50, 100, 255));
    }

    #[test]
    fn deserializes_from_array() {
        let c: ColorRgba = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(c, ColorRgba::rgba(1, 2, 3, 4));
    }
}
