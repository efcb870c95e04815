use glam::DVec3;
use rustc_hash::FxHashMap;

use orrery_math::{AxisRotation, KM_PER_LY, SpaceCoords};
use orrery_orbit::Orbit;
use orrery_space::{StarField, StarInstance};

use crate::definition::SceneDef;
use crate::error::SceneError;
use crate::object::{Body, FadeOut, ObjectId, SpaceObject, TextureLayer};
use crate::view_center::ViewCenter;

/// The loaded object graph for one resource set.
///
/// Owns the arena of [`SpaceObject`] nodes, the key registry, and the
/// parents-before-children update order fixed at link time. All of it
/// is dropped and rebuilt on reload.
#[derive(Clone, Debug)]
pub struct Scene {
    objects: Vec<SpaceObject>,
    registry: FxHashMap<String, ObjectId>,
    update_order: Vec<ObjectId>,
}

impl Scene {
    /// Parse RON definitions and build the linked scene.
    pub fn load(source: &str) -> Result<Scene, SceneError> {
        Scene::from_def(ron::from_str(source)?)
    }

    /// Build the linked scene from already-parsed definitions.
    ///
    /// This is the whole load lifecycle: validate each body, generate
    /// every star field cache, resolve parent keys, reject cycles, and
    /// fix the update order.
    pub fn from_def(def: SceneDef) -> Result<Scene, SceneError> {
        let mut registry = FxHashMap::default();
        for (index, object) in def.objects.iter().enumerate() {
            if registry.insert(object.key.clone(), ObjectId(index)).is_some() {
                return Err(SceneError::DuplicateKey {
                    key: object.key.clone(),
                });
            }
        }

        let mut objects = Vec::with_capacity(def.objects.len());
        let mut parent_keys = Vec::with_capacity(def.objects.len());
        for object in def.objects {
            let axis_rotation = AxisRotation::from_degrees(
                object.axis_rotation.x_axis,
                object.axis_rotation.z_axis,
                object.axis_rotation.y_axis,
            );

            let body = match (object.orbit, object.star_field) {
                (Some(_), Some(_)) => {
                    return Err(SceneError::ConflictingBody { key: object.key });
                }
                (Some(orbit_def), None) => {
                    let orbit = Orbit::try_from(orbit_def).map_err(|source| SceneError::Orbit {
                        key: object.key.clone(),
                        source,
                    })?;
                    Body::Orbiting(orbit)
                }
                (None, Some(field_def)) => {
                    let field =
                        StarField::try_from(field_def).map_err(|source| SceneError::StarField {
                            key: object.key.clone(),
                            source,
                        })?;
                    // Generate phase: exactly once, here, at load.
                    let cache = field.generate(&axis_rotation);
                    Body::StarField { field, cache }
                }
                (None, None) => Body::Static,
            };

            let fade_out = match object.fade_out {
                Some(def) => FadeOut {
                    start_km: def.start_ly * KM_PER_LY,
                    end_km: def.end_ly * KM_PER_LY,
                },
                None => match body {
                    Body::StarField { .. } => FadeOut::STAR,
                    _ => FadeOut::PLANET,
                },
            };

            let texture_layers = object
                .texture_layers
                .into_iter()
                .map(|layer| TextureLayer {
                    texture: layer.texture,
                    size: layer.size,
                    rgba: layer.rgba,
                    rotation: layer.rotation.to_radians(),
                    blend: layer.blend,
                })
                .collect();

            parent_keys.push(object.parent);
            objects.push(SpaceObject {
                key: object.key,
                parent: None,
                coords: SpaceCoords::from_ly(DVec3::from_array(object.coords_ly)),
                axis_rotation,
                accumulated_rotation: axis_rotation,
                texture_layers,
                fade_out,
                body,
                resolved: SpaceCoords::ZERO,
                last_distance: 0.0,
            });
        }

        link(&mut objects, &parent_keys, &registry)?;
        let update_order = topological_order(&objects);

        // Ancestor rotations are static, so they accumulate once here
        // instead of per tick.
        for &id in &update_order {
            if let Some(parent) = objects[id.0].parent {
                let parent_rotation = objects[parent.0].accumulated_rotation;
                let own = objects[id.0].axis_rotation;
                objects[id.0].accumulated_rotation = parent_rotation.combine(&own);
            }
        }

        log::info!("loaded scene with {} objects", objects.len());
        Ok(Scene {
            objects,
            registry,
            update_order,
        })
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Look up an object handle by its definition key.
    pub fn get(&self, key: &str) -> Option<ObjectId> {
        self.registry.get(key).copied()
    }

    pub fn object(&self, id: ObjectId) -> &SpaceObject {
        &self.objects[id.0]
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SpaceObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| (ObjectId(index), object))
    }

    /// Advance the scene to the given tick.
    ///
    /// Walks nodes parents-before-children, resolving each node's
    /// absolute position: the parent's position plus the node's local
    /// offset (stored coords, or the orbit's position) rotated through
    /// the accumulated ancestor frame. Orbit clamping reads the
    /// parent's most recently resolved view-center distance. A second
    /// pass refreshes every node's distance from the view center.
    pub fn update(&mut self, view_center: &ViewCenter, ticks: i64) {
        for index in 0..self.update_order.len() {
            let id = self.update_order[index];
            let (parent_resolved, parent_rotation, parent_distance) =
                match self.objects[id.0].parent {
                    Some(parent) => {
                        let p = &self.objects[parent.0];
                        (p.resolved, p.accumulated_rotation, p.last_distance)
                    }
                    None => (SpaceCoords::ZERO, AxisRotation::IDENTITY, 0.0),
                };

            let object = &self.objects[id.0];
            let local = match &object.body {
                Body::Orbiting(orbit) => {
                    // The observer's own body ignores clamping; its
                    // rendered offset is zero by subtraction anyway.
                    let vector_km = if view_center.is_centered_on(id) {
                        orbit.position(ticks)
                    } else {
                        orbit.position_clamped(ticks, parent_distance)
                    };
                    SpaceCoords::from_km(parent_rotation.rotate(vector_km))
                }
                _ => {
                    if parent_rotation == AxisRotation::IDENTITY {
                        // Exact fixed-point path; no f64 round trip.
                        object.coords
                    } else {
                        SpaceCoords::from_km(parent_rotation.rotate(object.coords.as_km()))
                    }
                }
            };

            self.objects[id.0].resolved = parent_resolved + local;
        }

        let origin = self.view_center_position(view_center);
        for object in &mut self.objects {
            object.last_distance = object.resolved.distance(&origin);
        }
    }

    /// Absolute position of the observer for the given view center.
    pub fn view_center_position(&self, view_center: &ViewCenter) -> SpaceCoords {
        match view_center.object {
            Some(id) => self.objects[id.0].resolved + view_center.offset,
            None => view_center.offset,
        }
    }

    /// The node's offset from the view center, in kilometers. Zero —
    /// exactly — for the body the center rides on.
    pub fn position(&self, id: ObjectId, view_center: &ViewCenter) -> DVec3 {
        self.objects[id.0]
            .resolved
            .relative_to(&self.view_center_position(view_center))
    }

    /// Replay a star field node's cached stars against the current
    /// view center. `None` for nodes that are not star fields.
    pub fn star_instances(
        &self,
        id: ObjectId,
        view_center: &ViewCenter,
    ) -> Option<Vec<StarInstance>> {
        match &self.objects[id.0].body {
            Body::StarField { cache, .. } => Some(cache.replay(self.position(id, view_center))),
            _ => None,
        }
    }

    /// The star field parameters of a node, if it is one.
    pub fn star_field(&self, id: ObjectId) -> Option<&StarField> {
        match &self.objects[id.0].body {
            Body::StarField { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Fade-out brightness of a node at its last resolved distance.
    pub fn fade_brightness(&self, id: ObjectId) -> f32 {
        let object = &self.objects[id.0];
        object.fade_out.brightness(object.last_distance)
    }
}

/// Resolve parent keys against the registry and reject cycles.
fn link(
    objects: &mut [SpaceObject],
    parent_keys: &[Option<String>],
    registry: &FxHashMap<String, ObjectId>,
) -> Result<(), SceneError> {
    for (index, parent_key) in parent_keys.iter().enumerate() {
        if let Some(key) = parent_key {
            let parent = registry
                .get(key)
                .copied()
                .ok_or_else(|| SceneError::UnknownParent {
                    object: objects[index].key.clone(),
                    parent: key.clone(),
                })?;
            objects[index].parent = Some(parent);
        }
    }

    // Walking any node's ancestry must terminate at a root without
    // revisiting the node; checked here so queries never have to.
    for index in 0..objects.len() {
        let mut current = objects[index].parent;
        let mut steps = 0;
        while let Some(parent) = current {
            if parent.0 == index || steps >= objects.len() {
                return Err(SceneError::ParentCycle {
                    key: objects[index].key.clone(),
                });
            }
            current = objects[parent.0].parent;
            steps += 1;
        }
    }
    Ok(())
}

/// Parents-before-children order, by ancestry depth.
fn topological_order(objects: &[SpaceObject]) -> Vec<ObjectId> {
    let depth = |mut id: usize| {
        let mut depth = 0;
        while let Some(parent) = objects[id].parent {
            depth += 1;
            id = parent.0;
        }
        depth
    };
    let mut order: Vec<ObjectId> = (0..objects.len()).map(ObjectId).collect();
    order.sort_by_key(|id| depth(id.0));
    order
}
