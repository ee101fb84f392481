use nalgebra::{Point3, Vector2, Vector3};
use phong_rasterizer::core::color::unpack_rgb;
use phong_rasterizer::core::geometry::Vertex;
use phong_rasterizer::core::math::transform::TransformFactory;
use phong_rasterizer::core::rasterizer::RasterStats;
use phong_rasterizer::pipeline::renderer::Renderer;
use phong_rasterizer::pipeline::settings::{RenderConfig, ShadingMode};
use phong_rasterizer::pipeline::shaders::phong::PhongShader;
use phong_rasterizer::pipeline::shaders::unlit::UnlitShader;
use phong_rasterizer::scene::camera::Camera;
use phong_rasterizer::scene::light::DirectionalLight;
use phong_rasterizer::scene::material::TextureSet;
use phong_rasterizer::scene::mesh::Mesh;
use phong_rasterizer::scene::texture::Texture;

fn flat_triangle(z: f32, color: Vector3<f32>) -> Mesh {
    let normal = Vector3::new(0.0, 0.0, -1.0);
    let vertices = vec![
        Vertex::new(Point3::new(0.0, 2.0, z), normal, Vector2::zeros()).with_color(color),
        Vertex::new(Point3::new(2.0, -2.0, z), normal, Vector2::zeros()).with_color(color),
        Vertex::new(Point3::new(-2.0, -2.0, z), normal, Vector2::zeros()).with_color(color),
    ];
    Mesh::new(vertices, vec![0, 1, 2]).unwrap()
}

fn front_camera(distance: f32) -> Camera {
    Camera::new(
        Point3::new(0.0, 0.0, -distance),
        Vector3::z(),
        90.0,
        1.0,
        0.1,
        100.0,
    )
}

fn draw_in_order(meshes: &[&Mesh], camera: &Camera) -> Renderer {
    let mut renderer = Renderer::new(100, 100);
    renderer.clear(Vector3::zeros());
    let mut stats = RasterStats::default();
    for mesh in meshes {
        renderer.draw_mesh(mesh, camera, &UnlitShader, &mut stats);
    }
    renderer
}

#[test]
fn test_nearest_surface_wins_in_any_order() {
    let camera = front_camera(5.0);
    let red = Vector3::new(1.0, 0.0, 0.0);
    let near = flat_triangle(0.0, red);
    let far = flat_triangle(3.0, Vector3::new(0.0, 0.0, 1.0));

    let a = draw_in_order(&[&near, &far], &camera);
    let b = draw_in_order(&[&far, &near], &camera);

    for renderer in [&a, &b] {
        let c = renderer.framebuffer.get_pixel(50, 50).unwrap();
        assert!((c - red).norm() < 0.01);
    }
    assert_eq!(a.framebuffer.color_buffer(), b.framebuffer.color_buffer());
    assert_eq!(a.framebuffer.depth(50, 50), b.framebuffer.depth(50, 50));
}

#[test]
fn test_offscreen_triangle_draws_nothing() {
    let camera = front_camera(5.0);
    let mut off = flat_triangle(0.0, Vector3::x());
    for v in &mut off.vertices {
        v.position.x += 100.0;
    }

    let mut renderer = Renderer::new(64, 64);
    renderer.clear(Vector3::zeros());
    let mut stats = RasterStats::default();
    renderer.draw_mesh(&off, &camera, &UnlitShader, &mut stats);

    assert_eq!(stats.frustum_rejected, 1);
    assert_eq!(stats.fragments_shaded, 0);
    assert!(renderer.framebuffer.color_buffer().iter().all(|&c| c == 0));
    assert!(renderer.framebuffer.depth_buffer().iter().all(|d| d.is_infinite()));
}

#[test]
fn test_behind_camera_triangle_draws_nothing() {
    let camera = front_camera(5.0);
    let behind = flat_triangle(-10.0, Vector3::x());
    let renderer = draw_in_order(&[&behind], &camera);
    assert!(renderer.framebuffer.color_buffer().iter().all(|&c| c == 0));
}

/// Camera at distance 2 with a 90 degree fov: a 2x2 quad at the origin covers the
/// central half of the viewport, pixels 32..96 on a 128x128 target.
fn checker_setup() -> (Camera, Mesh, Texture) {
    let camera = front_camera(2.0);
    let quad = Mesh::create_quad(2.0, 2.0);
    let checker = Texture::checkerboard(8, 4, [255, 255, 255], [0, 0, 0]).unwrap();
    (camera, quad, checker)
}

fn diffuse_only_config() -> RenderConfig {
    RenderConfig {
        shading_mode: ShadingMode::Diffuse,
        ..RenderConfig::default()
    }
}

#[test]
fn test_checkerboard_quad_reproduces_texels() {
    let (camera, quad, checker) = checker_setup();
    let textures = TextureSet::default().with_diffuse(checker);
    // Head-on light with intensity pi makes the diffuse output equal the albedo.
    let light = DirectionalLight::new(Vector3::z(), std::f32::consts::PI);
    let shader = PhongShader::new(&textures, light, diffuse_only_config());

    let mut renderer = Renderer::new(128, 128);
    renderer.clear(Vector3::new(0.5, 0.5, 0.5));
    let mut stats = RasterStats::default();
    renderer.draw_mesh(&quad, &camera, &shader, &mut stats);
    assert_eq!(stats.frustum_rejected, 0);

    for j in 0..8 {
        for i in 0..8 {
            let x = 36 + 8 * i;
            let y = 36 + 8 * j;
            let expected = if (i + j) % 2 == 0 { 1.0 } else { 0.0 };
            let c = renderer.framebuffer.get_pixel(x, y).unwrap();
            assert!(
                (c - Vector3::repeat(expected)).norm() < 0.01,
                "cell ({}, {}) at pixel ({}, {}) was {:?}",
                i,
                j,
                x,
                y,
                c
            );
        }
    }

    // Outside the quad the background survives.
    let bg = unpack_rgb(renderer.framebuffer.packed_pixel(5, 5).unwrap());
    assert!((bg - Vector3::repeat(0.5)).norm() < 0.01);
}

/// The quad is tilted 60 degrees about X, so its top and bottom edges sit at different
/// depths. Its center (v = 0.5) still projects to the middle row, while a screen-linear
/// v would put the boundary between checker rows about 8.5 rows lower or higher.
#[test]
fn test_tilted_quad_uses_perspective_correct_uv() {
    let camera = front_camera(2.0);
    let quad = Mesh::create_quad(2.0, 2.0)
        .with_world(TransformFactory::rotation_x(60.0_f32.to_radians()));
    let checker = Texture::checkerboard(2, 4, [255, 255, 255], [0, 0, 0]).unwrap();
    let textures = TextureSet::default().with_diffuse(checker);
    let light = DirectionalLight::new(Vector3::z(), std::f32::consts::PI);
    let shader = PhongShader::new(&textures, light, diffuse_only_config());

    let mut renderer = Renderer::new(128, 128);
    renderer.clear(Vector3::repeat(0.5));
    let mut stats = RasterStats::default();
    renderer.draw_mesh(&quad, &camera, &shader, &mut stats);
    assert_eq!(stats.frustum_rejected, 0);

    // Column 48 stays in the left (u < 0.5) half of the checker.
    for y in 58..=62 {
        let c = renderer.framebuffer.get_pixel(48, y).unwrap();
        assert!(c.x > 0.4, "row {} above center should be the white cell, got {:?}", y, c);
    }
    for y in 66..=70 {
        let c = renderer.framebuffer.get_pixel(48, y).unwrap();
        assert!(c.x < 0.1, "row {} below center should be the black cell, got {:?}", y, c);
    }
}

#[test]
fn test_neutral_normal_map_matches_geometric_normal() {
    let (camera, quad, checker) = checker_setup();
    let light = DirectionalLight::new(Vector3::new(0.3, -0.5, 1.0), 7.0);
    let config = RenderConfig::default().with_shading_mode(ShadingMode::ObservedArea);

    let plain = TextureSet::default().with_diffuse(checker.clone());
    let flat_map = Texture::from_rgb8(1, 1, vec![128, 128, 255]).unwrap();
    let mapped = plain.clone().with_normal(flat_map);

    let render = |textures: &TextureSet| {
        let mut renderer = Renderer::new(128, 128);
        renderer.clear(Vector3::zeros());
        let mut stats = RasterStats::default();
        let shader = PhongShader::new(textures, light, config);
        renderer.draw_mesh(&quad, &camera, &shader, &mut stats);
        renderer.framebuffer
    };

    let a = render(&plain);
    let b = render(&mapped);
    for (pa, pb) in a.color_buffer().iter().zip(b.color_buffer()) {
        let diff = (unpack_rgb(*pa) - unpack_rgb(*pb)).abs().max();
        // 8-bit 128 is not exactly 0.5.
        assert!(diff <= 2.0 / 255.0 + 1e-6);
    }
}

#[test]
fn test_max_to_one_through_shading() {
    let (camera, quad, _) = checker_setup();
    let textures = TextureSet::default();
    let light = DirectionalLight::new(Vector3::z(), 50.0);
    let mut renderer = Renderer::new(128, 128);
    renderer.clear(Vector3::zeros());
    let mut stats = RasterStats::default();

    let mut tinted = quad.clone();
    for v in &mut tinted.vertices {
        v.color = Vector3::new(1.0, 0.25, 0.0);
    }
    let shader = PhongShader::new(&textures, light, diffuse_only_config());
    renderer.draw_mesh(&tinted, &camera, &shader, &mut stats);

    let c = renderer.framebuffer.get_pixel(64, 64).unwrap();
    assert!((c.x - 1.0).abs() < 1e-6);
    assert!((c.y - 0.25).abs() < 0.01);
    assert_eq!(c.z, 0.0);
}
