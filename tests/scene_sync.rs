use cgmath::Vector2;
use physicssprites::boundary::WallSide;
use physicssprites::config::{AssetDescriptor, SceneConfig, default_assets};
use physicssprites::demo::Demo;

const EPS: f32 = 1e-3;

fn assert_close(actual: Vector2<f32>, expected: Vector2<f32>) {
    assert!(
        (actual.x - expected.x).abs() < EPS && (actual.y - expected.y).abs() < EPS,
        "expected ({}, {}), got ({}, {})",
        expected.x,
        expected.y,
        actual.x,
        actual.y,
    );
}

fn sprites_match_bodies(demo: &Demo) {
    for (id, object) in demo.registry().iter() {
        let pose = demo.world().pose(object.body).unwrap();
        let sprite = demo.stage().get(object.sprite).unwrap();
        assert_eq!(sprite.position, pose.position, "position of {:?}", id);
        assert_eq!(sprite.rotation, pose.angle, "rotation of {:?}", id);
    }
}

#[test]
fn one_scene_object_per_asset() {
    let demo = Demo::new(&SceneConfig::default(), 800.0, 600.0);

    assert_eq!(demo.registry().len(), default_assets().len());
    assert_eq!(demo.registry().len(), 3);
    assert_eq!(demo.stage().len(), 3);
    // Three boxes plus four walls.
    assert_eq!(demo.world().body_count(), 7);
}

#[test]
fn bodies_start_at_their_descriptor_position() {
    let assets = vec![
        AssetDescriptor::new("a.png", 120.5, 75.25, 200.0, 100.0),
        AssetDescriptor::new("b.png", 640.0, 310.0, 50.0, 80.0),
    ];
    let config = SceneConfig::default().with_assets(assets.clone());
    let demo = Demo::new(&config, 800.0, 600.0);

    for ((_, object), asset) in demo.registry().iter().zip(&assets) {
        let pose = demo.world().pose(object.body).unwrap();
        assert_eq!(pose.position, asset.initial_position);
        assert_eq!(pose.angle, 0.0);
        assert_eq!(demo.world().rect_size(object.body), Some((asset.width, asset.height)));
    }
}

#[test]
fn repeated_render_frames_are_idempotent() {
    let mut demo = Demo::new(&SceneConfig::default(), 800.0, 600.0);
    for _ in 0..30 {
        demo.step_physics();
    }

    for _ in 0..4 {
        assert_eq!(demo.render_frame(), 3);
        sprites_match_bodies(&demo);
    }
}

#[test]
fn sprites_track_bodies_through_a_running_simulation() {
    let config = SceneConfig::default().with_assets(vec![
        AssetDescriptor::new("a.png", 150.0, 180.0, 150.0, 100.0),
        AssetDescriptor::new("b.png", 400.0, 180.0, 150.0, 100.0),
        AssetDescriptor::new("c.png", 650.0, 180.0, 150.0, 100.0),
    ]);
    let mut demo = Demo::new(&config, 800.0, 600.0);

    for _ in 0..120 {
        demo.frame(1.0 / 60.0);
        sprites_match_bodies(&demo);
    }

    // Gravity pulled everything down, walls kept it inside.
    for (_, object) in demo.registry().iter() {
        let position = demo.world().pose(object.body).unwrap().position;
        assert!(position.y > 180.0);
        assert!(position.y < 600.0);
        assert!(position.x > 0.0 && position.x < 800.0);
    }
}

#[test]
fn resize_moves_walls_to_new_edge_midpoints() {
    let mut demo = Demo::new(&SceneConfig::default(), 800.0, 600.0);

    assert!(demo.resize(1024.0, 768.0));

    let expected = [
        (WallSide::Top, Vector2::new(512.0, 0.0)),
        (WallSide::Bottom, Vector2::new(512.0, 768.0)),
        (WallSide::Left, Vector2::new(0.0, 384.0)),
        (WallSide::Right, Vector2::new(1024.0, 384.0)),
    ];
    for (side, center) in expected {
        let wall = demo.boundary().wall(side);
        assert_close(demo.world().pose(wall.body).unwrap().position, center);
    }
}

#[test]
fn successive_resizes_compound_scale() {
    let (w0, h0) = (800.0_f32, 600.0_f32);
    let (w1, h1) = (1000.0_f32, 450.0_f32);
    let (w2, h2) = (500.0_f32, 900.0_f32);
    let mut demo = Demo::new(&SceneConfig::default(), w0, h0);

    demo.resize(w1, h1);
    demo.resize(w2, h2);

    let width_scale = (w1 / w0) * (w2 / w1);
    let height_scale = (h1 / h0) * (h2 / h1);
    for side in [WallSide::Top, WallSide::Bottom] {
        let wall = demo.boundary().wall(side);
        assert!((wall.width - w0 * width_scale).abs() < EPS, "{:?} width {}", side, wall.width);
        assert!((wall.height - 10.0).abs() < EPS);
        let (w, _) = demo.world().rect_size(wall.body).unwrap();
        assert!((w - w2).abs() < EPS);
    }
    for side in [WallSide::Left, WallSide::Right] {
        let wall = demo.boundary().wall(side);
        assert!((wall.height - h0 * height_scale).abs() < EPS, "{:?} height {}", side, wall.height);
        assert!((wall.width - 10.0).abs() < EPS);
    }
}

#[test]
fn resize_leaves_scene_objects_alone() {
    let mut demo = Demo::new(&SceneConfig::default(), 800.0, 600.0);
    let before: Vec<_> = demo.registry().iter().map(|(id, object)| (id, *object)).collect();

    demo.resize(400.0, 300.0);

    let after: Vec<_> = demo.registry().iter().map(|(id, object)| (id, *object)).collect();
    assert_eq!(before, after);
}

#[test]
fn dragged_body_follows_pointer_then_falls() {
    let config = SceneConfig::default()
        .with_assets(vec![AssetDescriptor::new("a.png", 300.0, 180.0, 200.0, 100.0)]);
    let mut demo = Demo::new(&config, 800.0, 600.0);
    let (_, object) = demo.registry().iter().next().map(|(id, o)| (id, *o)).unwrap();

    demo.pointer_moved(Vector2::new(300.0, 180.0));
    demo.pointer_pressed();
    demo.step_physics();
    assert_eq!(demo.pointer().held_body(), Some(object.body));
    for step in 1..=20 {
        let target = Vector2::new(300.0 + step as f32 * 5.0, 180.0 - step as f32 * 2.0);
        demo.pointer_moved(target);
        demo.step_physics();
        assert_close(demo.world().pose(object.body).unwrap().position, target);
    }
    assert_eq!(demo.pointer().held_body(), Some(object.body));

    // Hold still so the release has no throw.
    demo.step_physics();
    let released_at = demo.world().pose(object.body).unwrap().position;
    demo.pointer_released();
    for _ in 0..20 {
        demo.step_physics();
    }

    assert_eq!(demo.pointer().held_body(), None);
    let body = demo.world().body(object.body).unwrap();
    assert!(body.is_dynamic);
    assert!(body.position.y > released_at.y, "body should fall after release");
}

#[test]
fn pointer_leaving_the_surface_drops_the_body() {
    let mut demo = Demo::new(&SceneConfig::default(), 800.0, 600.0);

    demo.pointer_moved(Vector2::new(500.0, 180.0));
    demo.pointer_pressed();
    demo.step_physics();
    assert!(demo.pointer().held_body().is_some());

    demo.pointer_left();
    demo.step_physics();
    assert!(demo.pointer().held_body().is_none());
}

#[test]
fn click_without_moving_lets_the_body_fall() {
    let config = SceneConfig::default()
        .with_assets(vec![AssetDescriptor::new("a.png", 300.0, 180.0, 200.0, 100.0)]);
    let mut demo = Demo::new(&config, 800.0, 600.0);
    let (_, object) = demo.registry().iter().next().map(|(id, o)| (id, *o)).unwrap();

    demo.pointer_moved(Vector2::new(300.0, 180.0));
    demo.pointer_pressed();
    for _ in 0..3 {
        demo.step_physics();
    }
    assert_eq!(demo.pointer().held_body(), Some(object.body));
    demo.pointer_released();
    for _ in 0..120 {
        demo.step_physics();
    }

    let position = demo.world().pose(object.body).unwrap().position;
    assert!(position.y > 300.0, "body hung at {:?}", position);
    assert!(position.y < 600.0);
}

#[test]
fn dragging_into_a_wall_keeps_the_body_inside() {
    let (width, height) = (800.0, 600.0);
    let config = SceneConfig::default()
        .with_assets(vec![AssetDescriptor::new("a.png", 600.0, 300.0, 200.0, 100.0)]);
    let mut demo = Demo::new(&config, width, height);
    let (_, object) = demo.registry().iter().next().map(|(id, o)| (id, *o)).unwrap();

    // Grab left of centre so the pointer target lies past the right wall.
    demo.pointer_moved(Vector2::new(510.0, 300.0));
    demo.pointer_pressed();
    for step in 0..=28 {
        demo.pointer_moved(Vector2::new(510.0 + step as f32 * 10.0, 300.0));
        demo.step_physics();
    }
    for _ in 0..30 {
        demo.step_physics();
    }
    assert_eq!(demo.pointer().held_body(), Some(object.body));

    demo.pointer_released();
    for _ in 0..240 {
        demo.step_physics();
        let position = demo.world().pose(object.body).unwrap().position;
        assert!(position.x > 0.0 && position.x < width, "escaped to {:?}", position);
        assert!(position.y > 0.0 && position.y < height, "escaped to {:?}", position);
    }
}
