//! The catalogue: single owner of every object and gatekeeper of all
//! cross-object operations.
//!
//! Objects live in an arena of generational slots. The catalogue keeps the
//! display order as a list of [`ObjectId`]s and a name index for O(1)
//! lookups; parent and satellite links are ids into the same arena, so
//! dropping the catalogue releases everything without reference cycles.

use std::collections::HashMap;

use log::debug;

use crate::error::{CatalogueError, CatalogueResult};
use crate::kind::ObjectKind;
use crate::object::{CelestialObject, ObjectId, Orbit, Satellite};
use crate::sort::SortKey;

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    object: Option<CelestialObject>,
}

/// Named, ordered collection of celestial objects.
#[derive(Debug, Clone)]
pub struct Catalogue {
    name: String,
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<ObjectId>,
    index: HashMap<String, ObjectId>,
}

impl Catalogue {
    /// Create an empty catalogue
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of objects in the catalogue
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Insert a newly constructed object at the end of the catalogue.
    ///
    /// # Errors
    /// Returns [`CatalogueError::LinkedObject`] if the object has a parent or
    /// satellites (its links would point into another arena), and
    /// [`CatalogueError::DuplicateName`] if the name is taken. The catalogue is
    /// unchanged on error.
    pub fn add_object(&mut self, object: CelestialObject) -> CatalogueResult<ObjectId> {
        if object.is_linked() {
            return Err(CatalogueError::LinkedObject(object.name().to_string()));
        }
        if self.index.contains_key(object.name()) {
            return Err(CatalogueError::DuplicateName(object.name().to_string()));
        }

        let name = object.name().to_string();
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.object = Some(object);
                ObjectId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    object: Some(object),
                });
                ObjectId {
                    index,
                    generation: 0,
                }
            }
        };

        debug!("Catalogue '{}': added '{}'", self.name, name);
        self.order.push(id);
        self.index.insert(name, id);
        Ok(id)
    }

    /// Resolve an id, returning `None` for ids of removed objects.
    pub fn get(&self, id: ObjectId) -> Option<&CelestialObject> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.object.as_ref())
    }

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut CelestialObject> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.object.as_mut())
    }

    /// Id of the object named `name`.
    pub fn id_of(&self, name: &str) -> CatalogueResult<ObjectId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| CatalogueError::NotFound(name.to_string()))
    }

    /// Exact-match lookup by name.
    pub fn get_object(&self, name: &str) -> CatalogueResult<&CelestialObject> {
        let id = self.id_of(name)?;
        self.get(id)
            .ok_or_else(|| CatalogueError::NotFound(name.to_string()))
    }

    /// Positional lookup in the current order.
    pub fn get_object_at(&self, index: usize) -> CatalogueResult<&CelestialObject> {
        self.order
            .get(index)
            .and_then(|id| self.get(*id))
            .ok_or(CatalogueError::IndexOutOfRange {
                index,
                len: self.order.len(),
            })
    }

    /// Objects in the current order
    pub fn objects(&self) -> impl Iterator<Item = &CelestialObject> + '_ {
        self.order.iter().filter_map(|id| self.get(*id))
    }

    /// Object names in the current order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.objects().map(CelestialObject::name)
    }

    /// Object bound by a satellite, if it is still in the catalogue.
    pub fn member_object(&self, satellite: &Satellite) -> Option<&CelestialObject> {
        self.get(satellite.object())
    }

    fn name_of(&self, id: ObjectId) -> String {
        self.get(id)
            .map(|o| o.name().to_string())
            .unwrap_or_else(|| format!("{id:?}"))
    }

    /// Make `parent` the parent of `child` with the default orbit.
    pub fn add_member(&mut self, parent: &str, child: &str) -> CatalogueResult<()> {
        self.add_member_with_orbit(parent, child, Orbit::default())
    }

    /// Make `parent` the parent of `child` with the given orbit.
    pub fn add_member_with_orbit(
        &mut self,
        parent: &str,
        child: &str,
        orbit: Orbit,
    ) -> CatalogueResult<()> {
        let parent = self.id_of(parent)?;
        let child = self.id_of(child)?;
        self.add_member_by_id(parent, child, orbit)
    }

    /// Establish parenthood of `parent` over `child`.
    ///
    /// Checked in order, before anything is mutated:
    /// 1. `child` already has a parent: [`CatalogueError::AlreadyParented`]
    /// 2. `child` is `parent`: [`CatalogueError::SelfParentParadox`]
    /// 3. `child` appears in `parent`'s ancestor chain: [`CatalogueError::CyclicParentage`]
    pub fn add_member_by_id(
        &mut self,
        parent: ObjectId,
        child: ObjectId,
        orbit: Orbit,
    ) -> CatalogueResult<()> {
        let parent_obj = self
            .get(parent)
            .ok_or_else(|| CatalogueError::NotFound(format!("{parent:?}")))?;
        let child_obj = self
            .get(child)
            .ok_or_else(|| CatalogueError::NotFound(format!("{child:?}")))?;

        if let Some(current) = child_obj.parent() {
            let (current_name, current_kind) = self
                .get(current)
                .map(|p| (p.name().to_string(), p.kind()))
                .unwrap_or_else(|| (format!("{current:?}"), ObjectKind::Unassigned));
            return Err(CatalogueError::AlreadyParented {
                child: child_obj.name().to_string(),
                parent: current_name,
                parent_kind: current_kind,
            });
        }

        if parent == child {
            return Err(CatalogueError::SelfParentParadox(
                child_obj.name().to_string(),
            ));
        }

        // The parent chain is acyclic, so this walk ends at a root.
        let mut cursor = parent_obj.parent();
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(CatalogueError::CyclicParentage {
                    parent: parent_obj.name().to_string(),
                    child: child_obj.name().to_string(),
                });
            }
            cursor = self.get(ancestor).and_then(CelestialObject::parent);
        }

        debug!(
            "Catalogue '{}': '{}' now orbits '{}'",
            self.name,
            child_obj.name(),
            parent_obj.name()
        );

        if let Some(p) = self.get_mut(parent) {
            p.push_member(Satellite::new(child, orbit));
        }
        if let Some(c) = self.get_mut(child) {
            c.set_parent(Some(parent));
        }
        Ok(())
    }

    /// Logical parent of the object named `name`.
    pub fn parent_of(&self, name: &str) -> CatalogueResult<Option<&CelestialObject>> {
        let object = self.get_object(name)?;
        Ok(object.parent().and_then(|id| self.get(id)))
    }

    /// Topmost ancestor of the object named `name` (the object itself if unparented).
    pub fn root_of(&self, name: &str) -> CatalogueResult<&CelestialObject> {
        let mut current = self.get_object(name)?;
        while let Some(parent) = current.parent().and_then(|id| self.get(id)) {
            current = parent;
        }
        Ok(current)
    }

    /// Unbind `child` from its parent so it can be re-parented.
    ///
    /// Returns the removed satellite, or `None` if `child` had no parent.
    pub fn detach_member(&mut self, child: &str) -> CatalogueResult<Option<Satellite>> {
        let child_id = self.id_of(child)?;
        let Some(parent_id) = self.get(child_id).and_then(CelestialObject::parent) else {
            return Ok(None);
        };

        let satellite = self
            .get_mut(parent_id)
            .and_then(|parent| parent.take_member(child_id));
        if let Some(c) = self.get_mut(child_id) {
            c.set_parent(None);
        }
        debug!("Catalogue '{}': detached '{}'", self.name, child);
        Ok(satellite)
    }

    /// Remove an object from the catalogue.
    ///
    /// The binding from its parent is dropped and its former satellites become
    /// unparented roots. The returned object carries no links.
    pub fn remove_object(&mut self, name: &str) -> CatalogueResult<CelestialObject> {
        let id = self.id_of(name)?;
        self.detach_member(name)?;

        let slot = &mut self.slots[id.index as usize];
        let mut object = slot
            .object
            .take()
            .ok_or_else(|| CatalogueError::NotFound(name.to_string()))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);

        for satellite in object.unlink() {
            if let Some(child) = self.get_mut(satellite.object()) {
                child.set_parent(None);
            }
        }

        self.order.retain(|other| *other != id);
        self.index.remove(name);
        debug!("Catalogue '{}': removed '{}'", self.name, name);
        Ok(object)
    }

    /// Objects whose kind matches `kind` under the subtype rules, in current order.
    pub fn subselect(&self, kind: ObjectKind) -> Vec<&CelestialObject> {
        self.objects()
            .filter(|object| object.kind().matches_query(kind))
            .collect()
    }

    /// Stable ascending sort by `key`.
    ///
    /// # Errors
    /// Returns [`CatalogueError::UnsupportedSortKey`] for keys that cannot order
    /// a whole catalogue; the order is unchanged.
    pub fn sort(&mut self, key: SortKey) -> CatalogueResult<()> {
        let compare = key.comparator()?;

        let new_order: Vec<ObjectId> = {
            let mut keyed: Vec<(ObjectId, &CelestialObject)> = self
                .order
                .iter()
                .filter_map(|id| self.get(*id).map(|object| (*id, object)))
                .collect();
            keyed.sort_by(|a, b| compare(a.1, b.1));
            keyed.into_iter().map(|(id, _)| id).collect()
        };

        self.order = new_order;
        self.rebuild_index();
        debug!("Catalogue '{}': sorted by {}", self.name, key);
        Ok(())
    }

    fn rebuild_index(&mut self) {
        let index: HashMap<String, ObjectId> = self
            .order
            .iter()
            .filter_map(|id| self.get(*id).map(|o| (o.name().to_string(), *id)))
            .collect();
        self.index = index;
    }

    /// Child names and orbits of the object named `name`, in binding order.
    pub fn members_of(&self, name: &str) -> CatalogueResult<Vec<(String, Orbit)>> {
        let object = self.get_object(name)?;
        Ok(object
            .get_all_members()
            .iter()
            .map(|s| (self.name_of(s.object()), s.orbit()))
            .collect())
    }
}
