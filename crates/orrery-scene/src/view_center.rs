use rustc_hash::FxHashMap;

use orrery_math::SpaceCoords;

use crate::object::ObjectId;

/// The active coordinate origin for one rendered space.
///
/// All positions handed to the render boundary are expressed relative
/// to whichever view center is current. An unanchored center sits at
/// the scene's absolute origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewCenter {
    /// The object the observer is attached to, if any.
    pub object: Option<ObjectId>,
    /// Observer offset from that object (or from the origin).
    pub offset: SpaceCoords,
}

impl ViewCenter {
    /// A view center riding on the given object.
    pub fn on(object: ObjectId) -> Self {
        Self {
            object: Some(object),
            offset: SpaceCoords::ZERO,
        }
    }

    /// Whether this center is anchored on the given object.
    pub fn is_centered_on(&self, id: ObjectId) -> bool {
        self.object == Some(id)
    }
}

/// Registry mapping a space identifier (for example a dimension name)
/// to its active view center.
///
/// Bounded lifecycle: created when a resource set loads, cleared when
/// it unloads, and passed by reference to render-boundary callers.
/// There is no global fallback.
#[derive(Clone, Debug, Default)]
pub struct ViewCenterRegistry {
    centers: FxHashMap<String, ViewCenter>,
}

impl ViewCenterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace the view center for a space.
    pub fn set(&mut self, space: impl Into<String>, center: ViewCenter) {
        self.centers.insert(space.into(), center);
    }

    pub fn get(&self, space: &str) -> Option<&ViewCenter> {
        self.centers.get(space)
    }

    /// Drop every registered center; called on unload.
    pub fn clear(&mut self) {
        self.centers.clear();
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut registry = ViewCenterRegistry::new();
        registry.set("overworld", ViewCenter::on(ObjectId(3)));
        assert_eq!(
            registry.get("overworld").and_then(|c| c.object),
            Some(ObjectId(3))
        );
        assert!(registry.get("nether").is_none());
    }

    #[test]
    fn test_replace_existing_center() {
        let mut registry = ViewCenterRegistry::new();
        registry.set("overworld", ViewCenter::on(ObjectId(1)));
        registry.set("overworld", ViewCenter::on(ObjectId(2)));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("overworld").unwrap().is_centered_on(ObjectId(2)));
    }

    #[test]
    fn test_clear_empties_registry() {
        let mut registry = ViewCenterRegistry::new();
        registry.set("a", ViewCenter::default());
        registry.set("b", ViewCenter::default());
        registry.clear();
        assert!(registry.is_empty());
    }
}
