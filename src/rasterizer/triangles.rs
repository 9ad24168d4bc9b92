use super::*;
use crate::{buffer::DepthBuffer, shader::Shader, target::PixelSink};

/// Rasterize one screen-space triangle, resolving visibility against `depth` and shading covered pixels with
/// `shader`.
///
/// The `x` and `y` of each vertex are in pixels (row 0 at the bottom) and are snapped down to whole pixels first;
/// `z` keeps full precision and larger values are nearer. Every pixel of the triangle's bounding box, clamped to
/// the sink, is tested: pixels with a negative barycentric weight are skipped, the rest are depth-tested against
/// `depth` and, on passing, the depth is stored and the shader's fragment stage is run with the pixel's weights.
///
/// The shader's varyings must already hold this triangle's vertices. If [`Shader::cull`] returns true nothing is
/// rasterized.
///
/// # Panics
///
/// Panics if `depth` and `pixels` are not similarly sized.
pub fn draw_triangle<S, P>(vertices: [Vec3; 3], shader: &S, depth: &mut DepthBuffer, pixels: &mut P) -> DrawStats
where
    S: Shader + ?Sized,
    P: PixelSink + ?Sized,
{
    assert_eq!(
        pixels.size(),
        depth.size(),
        "Target and depth buffers are not similarly sized!"
    );

    let mut stats = DrawStats {
        triangles: 1,
        ..DrawStats::default()
    };
    if shader.cull() {
        stats.culled = 1;
        return stats;
    }

    let [mut a, mut b, mut c] = vertices;
    a.floor_xy();
    b.floor_xy();
    c.floor_xy();

    // The doubled signed area does not depend on the pixel, so degenerate triangles can be rejected up front
    let area = (c.x - a.x) * (b.y - a.y) - (b.x - a.x) * (c.y - a.y);
    if !(area.abs() > DEGENERATE_AREA) {
        stats.degenerate = 1;
        return stats;
    }

    let [width, height] = pixels.size();
    if width == 0 || height == 0 {
        return stats;
    }
    let (max_x, max_y) = ((width - 1) as f32, (height - 1) as f32);

    let min_box_x = a.x.min(b.x).min(c.x).min(max_x).max(0.0) as usize;
    let min_box_y = a.y.min(b.y).min(c.y).min(max_y).max(0.0) as usize;
    let max_box_x = a.x.max(b.x).max(c.x).max(0.0).min(max_x) as usize;
    let max_box_y = a.y.max(b.y).max(c.y).max(0.0).min(max_y) as usize;

    for x in min_box_x..=max_box_x {
        for y in min_box_y..=max_box_y {
            let p = Vec3::new(x as f32, y as f32, 0.0);
            let weights = barycentric(a, b, c, p);
            if !is_inside(weights) {
                continue;
            }

            let z = a.z * weights.x + b.z * weights.y + c.z * weights.z;
            if !depth.test_and_set(x, y, z) {
                continue;
            }

            stats.fragments += 1;
            let fragment = shader.fragment(weights);
            if fragment.discard {
                stats.discarded += 1;
            } else {
                pixels.set_pixel(x, y, fragment.color);
            }
        }
    }

    stats
}
