//! Draw the edges of an OBJ model, viewed down its -z axis, into a PNG.
//!
//! Usage: `wireframe [model.obj] [output.png]`

use pinhole::{assets, rasterizer::draw_wireframe, Framebuffer, Vec3};
use std::env;

fn main() -> pinhole::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let model_path = args.next().unwrap_or_else(|| "demos/data/african_head.obj".to_string());
    let output = args.next().unwrap_or_else(|| "wireframe.png".to_string());

    let model = assets::load_model(&model_path)?;
    log::info!("{}: {} faces", model_path, model.faces().len());

    let mut frame = Framebuffer::new([800, 800], [0; 3]);
    draw_wireframe(&model, Vec3::broadcast(255.0), &mut frame);

    frame.save(&output)?;
    Ok(())
}
