//! Per-frame copy of body transforms onto their sprites.

use crate::physics::PhysicsWorld;
use crate::scene::SceneRegistry;
use crate::stage::Stage;

/// Copy every registered body's position and angle onto its sprite.
///
/// This is the only place sprites are moved to follow bodies. Calling it
/// again without a physics step in between writes the same values.
/// Returns how many pairs were synchronized.
pub fn sync_sprites(world: &PhysicsWorld, registry: &SceneRegistry, stage: &mut Stage) -> usize {
    let mut synced = 0;
    for (id, object) in registry.iter() {
        let Some(pose) = world.pose(object.body) else {
            log::warn!("scene object {:?} lost its body, skipping", id);
            continue;
        };
        let Some(sprite) = stage.get_mut(object.sprite) else {
            log::warn!("scene object {:?} lost its sprite, skipping", id);
            continue;
        };
        sprite.position = pose.position;
        sprite.rotation = pose.angle;
        synced += 1;
    }
    synced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AssetDescriptor, BodyMaterial};
    use crate::scene::{SceneObject, create_scene_object};
    use crate::stage::{Sprite, SpriteHandle};
    use cgmath::Vector2;

    #[test]
    fn sprites_follow_bodies_after_a_step() {
        let mut world = PhysicsWorld::new(Vector2::new(0.0, 1000.0), 1.0 / 60.0);
        let mut stage = Stage::new();
        let mut registry = SceneRegistry::new();
        let asset = AssetDescriptor::new("a.png", 300.0, 180.0, 200.0, 100.0);
        let id = create_scene_object(&mut world, &mut stage, &mut registry, &asset, BodyMaterial::default());

        for _ in 0..5 {
            world.step();
        }
        assert_eq!(sync_sprites(&world, &registry, &mut stage), 1);

        let object = registry.get(id).unwrap();
        let pose = world.pose(object.body).unwrap();
        let sprite = stage.get(object.sprite).unwrap();
        assert_eq!(sprite.position, pose.position);
        assert_eq!(sprite.rotation, pose.angle);
        assert!(sprite.position.y > 180.0);
    }

    #[test]
    fn dangling_sprite_is_skipped() {
        let mut world = PhysicsWorld::new(Vector2::new(0.0, 0.0), 1.0 / 60.0);
        let mut stage = Stage::new();
        stage.add_child(Sprite::new("a.png", 1.0, 1.0));
        let mut registry = SceneRegistry::new();
        let body = world.add_static_rect(Vector2::new(0.0, 0.0), 1.0, 1.0);
        registry.insert(SceneObject { body, sprite: SpriteHandle(7) });

        assert_eq!(sync_sprites(&world, &registry, &mut stage), 0);
    }
}
