use pinhole::{
    assets::{self, PhongAssets},
    Framebuffer, RenderConfig, RenderContext, Sampler, ShadingMode, Texture, Vec3,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

const TRIANGLE_OBJ: &str = "\
# one lit triangle
v -0.5 -0.5 0
v 0.5 -0.5 0
v 0 0.5 0
vt 0 0
vt 1 0
vt 0.5 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";

/// An uncompressed 24-bit TGA, stored bottom row first. `rows` are given top row first, as RGB.
fn tga(width: u16, rows: &[&[[u8; 3]]]) -> Vec<u8> {
    let mut data = vec![0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&(rows.len() as u16).to_le_bytes());
    data.extend_from_slice(&[24, 0]);
    for row in rows.iter().rev() {
        for [r, g, b] in row.iter() {
            data.extend_from_slice(&[*b, *g, *r]);
        }
    }
    data
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pinhole-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_scene(dir: &Path) {
    let white = [255u8; 3];
    fs::write(dir.join("tri.obj"), TRIANGLE_OBJ).unwrap();
    fs::write(dir.join("diffuse.tga"), tga(2, &[&[white, white], &[white, white]])).unwrap();
    fs::write(dir.join("normal.tga"), tga(1, &[&[[128, 128, 255]]])).unwrap();
    fs::write(dir.join("spec.tga"), tga(1, &[&[[0, 0, 0]]])).unwrap();
    fs::write(
        dir.join("scene.ron"),
        r#"(
            width: 64,
            height: 64,
            light_dir: (x: 0.0, y: 0.0, z: 1.0),
            shading: Gouraud,
            assets: (
                model: "tri.obj",
                diffuse: "diffuse.tga",
                normal: "normal.tga",
                specular: "spec.tga",
            ),
        )"#,
    )
    .unwrap();
}

#[test]
fn texture_corners_follow_uv_orientation() {
    let dir = scratch_dir("corners");
    let (red, green, blue, white) = ([255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]);
    let path = dir.join("corners.tga");
    fs::write(&path, tga(2, &[&[red, green], &[blue, white]])).unwrap();

    let texture = assets::load_texture(&path).unwrap();
    assert_eq!(texture.size(), [2, 2]);
    assert_eq!(texture.read([0, 0]), [255, 0, 0, 255]);

    let sampler = texture.nearest();
    // The UV origin is the bottom-left corner
    assert_eq!(sampler.color(0.0, 0.0), Vec3::new(0.0, 0.0, 255.0));
    assert_eq!(sampler.color(1.0, 0.0), Vec3::new(255.0, 255.0, 255.0));
    assert_eq!(sampler.color(0.0, 1.0), Vec3::new(255.0, 0.0, 0.0));
    assert_eq!(sampler.color(1.0, 1.0), Vec3::new(0.0, 255.0, 0.0));

    fs::remove_dir_all(dir).ok();
}

#[test]
fn models_load_from_disk() {
    let dir = scratch_dir("model");
    let path = dir.join("tri.obj");
    fs::write(&path, TRIANGLE_OBJ).unwrap();

    let model = assets::load_model(&path).unwrap();
    assert_eq!(model.faces().len(), 1);
    assert_eq!(model.positions().len(), 3);
    assert_eq!(model.uvs()[2], Vec3::new(0.5, 1.0, 0.0));
    assert_eq!(model.normals(), &[Vec3::FRONT]);

    fs::remove_dir_all(dir).ok();
}

#[cfg(feature = "async")]
#[tokio::test]
async fn scene_loads_and_renders() {
    let dir = scratch_dir("scene");
    write_scene(&dir);

    let config = RenderConfig::load(dir.join("scene.ron")).unwrap();
    assert_eq!(config.shading, ShadingMode::Gouraud);
    assert_eq!(config.assets.model, dir.join("tri.obj"));

    let assets = PhongAssets::load(&config.assets).await.unwrap();
    assert_eq!(assets.diffuse.size(), [2, 2]);
    assert_eq!(assets.normal.size(), [1, 1]);

    let mut ctx = RenderContext::from_config(&config);
    let mut frame = Framebuffer::new(config.size(), [0; 3]);
    let stats = ctx.draw_model(&assets.model, &mut assets.gouraud_shader(config.light()), &mut frame).unwrap();

    assert_eq!(stats.triangles, 1);
    assert!(stats.written() > 0);
    assert_eq!(frame.pixel(32, 30), Some([255; 3]));
    assert_eq!(frame.pixel(1, 1), Some([0; 3]));

    fs::remove_dir_all(dir).ok();
}

#[cfg(feature = "async")]
#[tokio::test]
async fn loading_stops_at_the_first_missing_file() {
    let dir = scratch_dir("missing");
    write_scene(&dir);
    fs::remove_file(dir.join("normal.tga")).unwrap();

    let config = RenderConfig::load(dir.join("scene.ron")).unwrap();
    let err = PhongAssets::load(&config.assets).await.unwrap_err();
    assert!(matches!(err, pinhole::Error::Io(_)), "{}", err);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn blocking_load_reads_every_asset() {
    let dir = scratch_dir("blocking");
    write_scene(&dir);

    let config = RenderConfig::load(dir.join("scene.ron")).unwrap();
    let assets = PhongAssets::load_blocking(&config.assets).unwrap();
    assert_eq!(assets.model.faces().len(), 1);
    assert_eq!(assets.specular.read([0, 0]), [0, 0, 0, 255]);

    fs::remove_dir_all(dir).ok();
}
