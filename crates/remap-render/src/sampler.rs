//! Source-image sampling. Coordinates use the shader convention: uv origin
//! at the bottom-left, clamp-to-edge addressing. Colors are returned as
//! premultiplied [0,1] floats.

use std::str::FromStr;

use glam::Vec2;
use image::RgbaImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    Nearest,
    #[default]
    Bilinear,
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Filter::Nearest),
            "bilinear" | "linear" => Ok(Filter::Bilinear),
            other => Err(format!("unknown filter '{other}'; expected nearest or bilinear")),
        }
    }
}

/// Samples the image at a normalized coordinate.
pub fn sample(image: &RgbaImage, uv: Vec2, filter: Filter) -> [f32; 4] {
    match filter {
        Filter::Nearest => sample_nearest(image, uv),
        Filter::Bilinear => sample_bilinear(image, uv),
    }
}

fn texel(image: &RgbaImage, x: i64, y: i64) -> [f32; 4] {
    let x = x.clamp(0, image.width() as i64 - 1) as u32;
    let y = y.clamp(0, image.height() as i64 - 1) as u32;
    let pixel = image.get_pixel(x, y);
    [
        pixel[0] as f32 / 255.0,
        pixel[1] as f32 / 255.0,
        pixel[2] as f32 / 255.0,
        pixel[3] as f32 / 255.0,
    ]
}

/// Converts a bottom-left uv into continuous pixel coordinates (top-left
/// row order, pixel centres at half-integers).
fn pixel_coords(image: &RgbaImage, uv: Vec2) -> (f32, f32) {
    (
        uv.x * image.width() as f32 - 0.5,
        (1.0 - uv.y) * image.height() as f32 - 0.5,
    )
}

fn sample_nearest(image: &RgbaImage, uv: Vec2) -> [f32; 4] {
    let (fx, fy) = pixel_coords(image, uv);
    texel(image, fx.round() as i64, fy.round() as i64)
}

fn sample_bilinear(image: &RgbaImage, uv: Vec2) -> [f32; 4] {
    let (fx, fy) = pixel_coords(image, uv);
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let mut result = [0.0f32; 4];
    let corners = [
        (texel(image, x0, y0), (1.0 - tx) * (1.0 - ty)),
        (texel(image, x0 + 1, y0), tx * (1.0 - ty)),
        (texel(image, x0, y0 + 1), (1.0 - tx) * ty),
        (texel(image, x0 + 1, y0 + 1), tx * ty),
    ];
    for (color, weight) in corners {
        for channel in 0..4 {
            result[channel] += color[channel] * weight;
        }
    }
    result
}
