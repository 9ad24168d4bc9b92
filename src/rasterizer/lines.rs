use crate::{math::Vec3, model::Geometry, target::PixelSink};

/// Draw a 1-pixel line between two pixel positions (inclusive) using integer Bresenham stepping.
///
/// Lines steeper than 45 degrees step along `y`. Endpoints are swapped as needed so that stepping always runs in
/// the positive direction, which makes the pixels of a line independent of the order of its endpoints. Pixels
/// outside the sink are skipped.
pub fn draw_line<P: PixelSink + ?Sized>(from: [i32; 2], to: [i32; 2], color: Vec3, pixels: &mut P) {
    let [mut x0, mut y0] = from;
    let [mut x1, mut y1] = to;

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        core::mem::swap(&mut x0, &mut y0);
        core::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        core::mem::swap(&mut x0, &mut x1);
        core::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let derr2 = (y1 - y0).abs() * 2;
    let y_step = if y1 > y0 { 1 } else { -1 };
    let mut error = 0;
    let mut y = y0;

    for x in x0..=x1 {
        let (px, py) = if steep { (y, x) } else { (x, y) };
        if px >= 0 && py >= 0 {
            pixels.set_pixel(px as usize, py as usize, color);
        }

        error += derr2;
        if error > dx {
            y += y_step;
            error -= dx * 2;
        }
    }
}

/// Draw the edges of every face of `geometry`, mapping model-space `x` and `y` in `[-1, 1]` onto the whole sink.
///
/// No camera, projection or depth test is involved: this is an orthographic view down the model's -z axis.
pub fn draw_wireframe<G, P>(geometry: &G, color: Vec3, pixels: &mut P)
where
    G: Geometry + ?Sized,
    P: PixelSink + ?Sized,
{
    let [width, height] = pixels.size();
    let to_pixel = |v: Vec3| {
        [
            ((v.x + 1.0) * width as f32 * 0.5).floor() as i32,
            ((v.y + 1.0) * height as f32 * 0.5).floor() as i32,
        ]
    };

    for face in 0..geometry.face_count() {
        for slot in 0..3 {
            let from = to_pixel(geometry.position(face, slot));
            let to = to_pixel(geometry.position(face, (slot + 1) % 3));
            draw_line(from, to, color, pixels);
        }
    }
}
