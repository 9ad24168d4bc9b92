//! Render a textured model to a PNG.
//!
//! Usage: `render_head [config.ron] [output.png]`. Without a config, the default scene is read from `demos/data`.

use pinhole::{assets::PhongAssets, FlatShader, Framebuffer, RenderConfig, RenderContext, ShadingMode};
use std::{env, time::Instant};

#[tokio::main]
async fn main() -> pinhole::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => RenderConfig::load(path)?,
        None => {
            let mut config = RenderConfig::default();
            config.assets = config.assets.relative_to("demos/data");
            config
        }
    };
    let output = args.next().unwrap_or_else(|| "output.png".to_string());

    let assets = PhongAssets::load(&config.assets).await?;

    let mut ctx = RenderContext::from_config(&config);
    let mut frame = Framebuffer::new(config.size(), [0; 3]);

    let start = Instant::now();
    let stats = match config.shading {
        ShadingMode::Flat => ctx.draw_model(&assets.model, &mut FlatShader::new(), &mut frame)?,
        ShadingMode::Gouraud => {
            ctx.draw_model(&assets.model, &mut assets.gouraud_shader(config.light()), &mut frame)?
        }
        ShadingMode::Phong => ctx.draw_model(
            &assets.model,
            &mut assets.phong_shader(config.light(), config.camera.eye),
            &mut frame,
        )?,
    };
    log::info!(
        "Rendered {} triangles, {} pixels written in {:?}",
        stats.triangles,
        stats.written(),
        start.elapsed()
    );

    frame.save(&output)?;
    log::info!("Saved {}", output);
    Ok(())
}
