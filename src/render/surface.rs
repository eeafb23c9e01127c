use image::{Rgba, RgbaImage};
use tracing::debug;

use super::raster::{self, Point};
use super::shader::ShaderProgram;

/// Render context candidates, probed in declaration order. The first
/// one the host supports wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextKind {
    Accelerated,
    Software,
}

pub const CONTEXT_CANDIDATES: [ContextKind; 2] = [ContextKind::Accelerated, ContextKind::Software];

const CLEAR_COLOR: Rgba<u8> = Rgba([16, 16, 24, 255]);
const OVERLAY_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

// overlay banner placement, matching the original's text position
const OVERLAY_X: u32 = 128;
const OVERLAY_Y: u32 = 48;
const OVERLAY_GLYPH_WIDTH: u32 = 10;
const OVERLAY_HEIGHT: u32 = 24;

pub trait Surface: Send {
    fn kind(&self) -> ContextKind;

    /// Clear the frame, fill the triangle list (clip-space positions,
    /// three vertices per triangle) with the program's output color,
    /// then draw the overlay banner.
    fn draw(&mut self, program: &ShaderProgram, positions: &[[f32; 2]], label: &str);

    fn frame(&self) -> &RgbaImage;
}

/// Create the first supported render context.
pub fn create(width: u32, height: u32) -> anyhow::Result<Box<dyn Surface>> {
    for kind in CONTEXT_CANDIDATES {
        match probe(kind, width, height) {
            Some(surface) => {
                debug!("created {kind:?} render context");
                return Ok(surface);
            }
            None => debug!("{kind:?} render context not supported"),
        }
    }

    anyhow::bail!("no supported render context")
}

fn probe(kind: ContextKind, width: u32, height: u32) -> Option<Box<dyn Surface>> {
    match kind {
        // no accelerated backend is linked into this build
        ContextKind::Accelerated => None,
        ContextKind::Software => Some(Box::new(SoftwareSurface::new(width, height))),
    }
}

/// CPU raster target. This is both the fixed-function triangle path and
/// the 2D overlay layer, flattened onto one frame.
pub struct SoftwareSurface {
    frame: RgbaImage,
}

impl SoftwareSurface {
    pub fn new(width: u32, height: u32) -> Self {
        SoftwareSurface {
            frame: RgbaImage::from_pixel(width, height, CLEAR_COLOR),
        }
    }

    /// Clip space is y-up with the origin centered; pixel space is
    /// y-down from the top-left corner.
    fn to_pixel(&self, position: [f32; 2]) -> Point {
        let x = (position[0] * 0.5 + 0.5) * self.frame.width() as f32;
        let y = (0.5 - position[1] * 0.5) * self.frame.height() as f32;
        raster::point(x, y)
    }
}

impl Surface for SoftwareSurface {
    fn kind(&self) -> ContextKind {
        ContextKind::Software
    }

    fn draw(&mut self, program: &ShaderProgram, positions: &[[f32; 2]], label: &str) {
        for pixel in self.frame.pixels_mut() {
            *pixel = CLEAR_COLOR;
        }

        let color = Rgba(program.color);
        for corners in positions.chunks_exact(3) {
            let triangle = [
                self.to_pixel(corners[0]),
                self.to_pixel(corners[1]),
                self.to_pixel(corners[2]),
            ];
            raster::fill_triangle(&mut self.frame, triangle, color);
        }

        debug!("overlay: {label}");
        raster::fill_rect(
            &mut self.frame,
            OVERLAY_X,
            OVERLAY_Y,
            OVERLAY_GLYPH_WIDTH * label.len() as u32,
            OVERLAY_HEIGHT,
            OVERLAY_COLOR,
        );
    }

    fn frame(&self) -> &RgbaImage {
        &self.frame
    }
}
