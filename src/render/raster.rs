// Flat-color triangle fill for the software surface, using the edge
// function test: a sample is inside when all three edge values share
// the sign of the triangle's area.

use image::{Rgba, RgbaImage};

/// A position in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

pub fn point(x: f32, y: f32) -> Point {
    Point { x, y }
}

/// 2D cross product of (b - a) and (p - a). Positive when p lies to
/// the left of the edge a -> b.
#[inline]
fn edge(a: Point, b: Point, p: Point) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Fill one triangle, sampling at pixel centers inside its bounding box
/// clamped to the frame. Either winding works; zero-area triangles are
/// skipped.
pub fn fill_triangle(frame: &mut RgbaImage, corners: [Point; 3], color: Rgba<u8>) {
    let [v0, v1, v2] = corners;

    let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
    let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(frame.width() as i32 - 1);
    let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
    let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(frame.height() as i32 - 1);

    let area = edge(v0, v1, v2);
    if area.abs() < f32::EPSILON {
        return;
    }

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = point(x as f32 + 0.5, y as f32 + 0.5);

            let w0 = edge(v1, v2, p);
            let w1 = edge(v2, v0, p);
            let w2 = edge(v0, v1, p);

            let inside = if area > 0.0 {
                w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
            } else {
                w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
            };

            if inside {
                frame.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Fill an axis-aligned rectangle, clamped to the frame.
pub fn fill_rect(frame: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let x1 = x.saturating_add(width).min(frame.width());
    let y1 = y.saturating_add(height).min(frame.height());

    for py in y.min(frame.height())..y1 {
        for px in x.min(frame.width())..x1 {
            frame.put_pixel(px, py, color);
        }
    }
}
