//! Scene objects: the (body, sprite) pairs that the render bridge keeps in step.

use std::collections::BTreeMap;

use crate::config::{AssetDescriptor, BodyMaterial};
use crate::physics::{BodyHandle, PhysicsWorld};
use crate::stage::{Sprite, SpriteHandle, Stage};

/// Stable key of a scene object. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneObjectId(u32);

/// Non-owning pair of handles into the physics world and the stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub body: BodyHandle,
    pub sprite: SpriteHandle,
}

/// Keyed collection of scene objects, iterated in creation order.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    objects: BTreeMap<SceneObjectId, SceneObject>,
    next_id: u32,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: SceneObject) -> SceneObjectId {
        let id = SceneObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, object);
        id
    }

    pub fn get(&self, id: SceneObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Forget a pair. The body and sprite themselves are left alone.
    pub fn remove(&mut self, id: SceneObjectId) -> Option<SceneObject> {
        self.objects.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SceneObjectId, &SceneObject)> {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    pub fn find_by_body(&self, body: BodyHandle) -> Option<SceneObjectId> {
        self.iter().find(|(_, object)| object.body == body).map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Build a dynamic body and a centered sprite from one asset and register the pair.
pub fn create_scene_object(
    world: &mut PhysicsWorld,
    stage: &mut Stage,
    registry: &mut SceneRegistry,
    asset: &AssetDescriptor,
    material: BodyMaterial,
) -> SceneObjectId {
    let body = world.add_dynamic_rect(asset.initial_position, asset.width, asset.height, material);

    let mut sprite = Sprite::new(asset.src.clone(), asset.width, asset.height).with_anchor(0.5, 0.5);
    sprite.position = asset.initial_position;
    let sprite = stage.add_child(sprite);

    let id = registry.insert(SceneObject { body, sprite });
    log::debug!("scene object {:?} created for {}", id, asset.src);
    id
}
