//! CPU evaluation of a re-projection: the same stateless per-pixel function
//! a fragment shader would run, applied over an [`image`] buffer with rows
//! fanned out across worker threads. Every output pixel depends only on its
//! own coordinate and the frame's parameters, so rows split freely.

use glam::vec2;
use image::RgbaImage;
use remap_core::Remap;

use crate::sampler::{self, Filter};

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub filter: Filter,
    /// Worker threads; 0 means one per available CPU.
    pub threads: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            threads: 0,
        }
    }
}

/// Re-projects a premultiplied source image into a new premultiplied image
/// of the given dimensions. Out-of-domain pixels come out fully
/// transparent.
pub fn render(
    source: &RgbaImage,
    remap: &Remap,
    width: u32,
    height: u32,
    options: &RenderOptions,
) -> RgbaImage {
    let mut output = RgbaImage::new(width, height);
    if width == 0 || height == 0 || source.width() == 0 || source.height() == 0 {
        return output;
    }

    let threads = match options.threads {
        0 => std::thread::available_parallelism().map_or(1, |n| n.get()),
        n => n,
    };
    let rows_per_band = (height as usize).div_ceil(threads);
    let row_stride = width as usize * 4;

    tracing::debug!(width, height, threads, "rendering re-projection");

    let buffer: &mut [u8] = &mut output;
    std::thread::scope(|scope| {
        for (band_index, band) in buffer.chunks_mut(rows_per_band * row_stride).enumerate() {
            let first_row = band_index * rows_per_band;
            scope.spawn(move || {
                render_band(source, remap, width, height, options.filter, first_row, band);
            });
        }
    });

    output
}

fn render_band(
    source: &RgbaImage,
    remap: &Remap,
    width: u32,
    height: u32,
    filter: Filter,
    first_row: usize,
    band: &mut [u8],
) {
    for (row_offset, row) in band.chunks_mut(width as usize * 4).enumerate() {
        let y = (first_row + row_offset) as u32;
        // Image rows run top-down; uv runs bottom-up.
        let v = 1.0 - (y as f32 + 0.5) / height as f32;
        for x in 0..width as usize {
            let u = (x as f32 + 0.5) / width as f32;
            let rgba = match remap.resolve(vec2(u, v)) {
                Ok(sample) => {
                    let mut color = sampler::sample(source, sample.uv, filter);
                    if sample.alpha < 1.0 {
                        // The color is premultiplied, so the fade scales
                        // every channel alike.
                        for channel in &mut color {
                            *channel *= sample.alpha;
                        }
                    }
                    color
                }
                Err(_) => [0.0; 4],
            };
            for channel in 0..4 {
                row[x * 4 + channel] = (rgba[channel].clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use remap_core::{Projection, RadialFade, Remap, StereoLayout};

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 31 % 256) as u8, (y * 53 % 256) as u8, 128, 255])
        })
    }

    #[test]
    fn equirect_identity_reproduces_the_input() {
        let source = gradient(8, 4);
        let remap = Remap::new(Projection::Equirectangular, Projection::Equirectangular);
        let output = render(&source, &remap, 8, 4, &RenderOptions::default());
        assert_eq!(source.as_raw(), output.as_raw());
    }

    #[test]
    fn thread_count_does_not_change_the_result() {
        let source = gradient(16, 9);
        let remap = Remap {
            fov_out: 1.0,
            ..Remap::new(Projection::Equirectangular, Projection::Fisheye)
        };
        let single = render(&source, &remap, 12, 12, &RenderOptions { threads: 1, ..Default::default() });
        let multi = render(&source, &remap, 12, 12, &RenderOptions { threads: 4, ..Default::default() });
        assert_eq!(single.as_raw(), multi.as_raw());
    }

    #[test]
    fn fisheye_output_corners_are_transparent() {
        let source = gradient(8, 8);
        let remap = Remap {
            fov_out: 1.0,
            ..Remap::new(Projection::Equirectangular, Projection::Fisheye)
        };
        let output = render(&source, &remap, 16, 16, &RenderOptions::default());
        assert_eq!(output.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
        assert_eq!(output.get_pixel(15, 15), &Rgba([0, 0, 0, 0]));
        // The centre still carries content.
        assert_ne!(output.get_pixel(8, 8)[3], 0);
    }

    #[test]
    fn radial_fade_zeroes_alpha_past_the_outer_bound() {
        let source = gradient(16, 16);
        let remap = Remap {
            fov_in: 1.0,
            fov_out: 1.0,
            fade: Some(RadialFade::new(0.2, 0.4)),
            ..Remap::new(Projection::Fisheye, Projection::Fisheye)
        };
        let output = render(&source, &remap, 16, 16, &RenderOptions::default());
        // Just inside the rim: radius ≈ 0.9, past the fade's outer bound.
        assert_eq!(output.get_pixel(15, 8)[3], 0);
        // Dead centre stays opaque.
        assert_eq!(output.get_pixel(8, 8)[3], 255);
    }

    #[test]
    fn stereo_frames_keep_eyes_in_their_halves() {
        let mut source = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
        // Paint the top half (second eye) green.
        for y in 0..4 {
            for x in 0..8 {
                source.put_pixel(x, y, Rgba([0, 255, 0, 255]));
            }
        }
        let remap = Remap {
            stereo: StereoLayout::OverUnder,
            ..Remap::new(Projection::Equirectangular, Projection::Equirectangular)
        };
        let output = render(&source, &remap, 8, 8, &RenderOptions::default());
        assert_eq!(output.get_pixel(4, 1)[1], 255, "top half stays green");
        assert_eq!(output.get_pixel(4, 6)[0], 255, "bottom half stays red");
    }
}
