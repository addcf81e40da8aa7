//! Diagram records: entities, attributes and the registry that owns them.
//!
//! Attributes refer to their owner through an [`EntityId`] rather than a
//! pointer. Lookups go through [`Diagram`], which is the only owner of both
//! record kinds.

use crate::geometry::{Measurer, Point, Rect, Segment, Vec2, centered_offset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeId(pub usize);

/// Any item that can be hit, marked or dragged on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRef {
    Entity(EntityId),
    Attribute(AttributeId),
}

/// Interaction capabilities of a scene item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemFlags {
    /// Item follows pointer drags.
    pub movable: bool,
    /// Item can be marked by click or rubber band.
    pub selectable: bool,
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self {
            movable: true,
            selectable: true,
        }
    }
}

/// Attribute marker fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    White,
    Black,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    /// Top-left corner in scene coordinates.
    pub position: Point,
    pub size: Vec2,
    /// Top-left of the name label, relative to `position`.
    pub label_offset: Vec2,
    /// Owned attributes in creation order.
    pub attributes: Vec<AttributeId>,
    pub flags: ItemFlags,
}

impl Entity {
    pub fn new(name: &str, position: Point, size: Vec2, measurer: &dyn Measurer) -> Self {
        let mut entity = Self {
            name: String::new(),
            position,
            size,
            label_offset: Vec2::ZERO,
            attributes: Vec::new(),
            flags: ItemFlags::default(),
        };
        entity.set_name(name, measurer);
        entity
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    /// Anchor point for attribute connectors.
    pub fn base_center(&self) -> Point {
        self.rect().base_center()
    }

    pub fn label_position(&self) -> Point {
        self.position + self.label_offset
    }

    /// Replace the display name and re-center the label.
    pub fn set_name(&mut self, name: &str, measurer: &dyn Measurer) {
        self.name = name.to_string();
        self.label_offset = centered_offset(self.size, measurer.measure(&self.name));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub unique: bool,
    pub owner: EntityId,
    pub center: Point,
    pub radius: f32,
    /// Top-left of the name label, relative to `center`.
    pub label_offset: Vec2,
    pub connector: Segment,
    pub flags: ItemFlags,
}

impl Attribute {
    pub fn fill(&self) -> Fill {
        if self.unique { Fill::Black } else { Fill::White }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_radius(self.center, self.radius)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.center.distance(p) <= self.radius
    }

    pub fn label_position(&self) -> Point {
        self.center + self.label_offset
    }
}

/// Registry of every entity and attribute in the scene.
///
/// Ids are indices into the backing vectors. Nothing is ever removed, so an id
/// handed out once stays valid for the lifetime of the diagram.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    entities: Vec<Entity>,
    attributes: Vec<Attribute>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    /// Geometry edits through this reference must be followed by
    /// [`Diagram::refresh_entity_connectors`].
    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.0)
    }

    pub fn attribute(&self, id: AttributeId) -> Option<&Attribute> {
        self.attributes.get(id.0)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().enumerate().map(|(i, e)| (EntityId(i), e))
    }

    pub fn attributes(&self) -> impl Iterator<Item = (AttributeId, &Attribute)> {
        self.attributes
            .iter()
            .enumerate()
            .map(|(i, a)| (AttributeId(i), a))
    }

    pub fn insert_entity(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.entities.len());
        self.entities.push(entity);
        id
    }

    /// First construction phase: register the attribute record.
    ///
    /// The connector is left degenerate at the attribute center until
    /// [`Diagram::attach_attribute`] runs. Returns `None` if `owner` is unknown.
    pub fn insert_attribute(
        &mut self,
        owner: EntityId,
        name: &str,
        center: Point,
        radius: f32,
        label_offset: Vec2,
    ) -> Option<AttributeId> {
        self.entity(owner)?;
        let id = AttributeId(self.attributes.len());
        self.attributes.push(Attribute {
            name: name.to_string(),
            unique: false,
            owner,
            center,
            radius,
            label_offset,
            connector: Segment::new(center, center),
            flags: ItemFlags::default(),
        });
        Some(id)
    }

    /// Second construction phase: record ownership and compute the connector.
    pub fn attach_attribute(&mut self, id: AttributeId) -> bool {
        let Some(owner) = self.attribute(id).map(|a| a.owner) else {
            return false;
        };
        let Some(entity) = self.entity_mut(owner) else {
            return false;
        };
        if !entity.attributes.contains(&id) {
            entity.attributes.push(id);
        }
        self.refresh_connector(id)
    }

    /// Create an attribute owned by `owner` centered at `center`.
    pub fn add_attribute(
        &mut self,
        owner: EntityId,
        name: &str,
        center: Point,
        radius: f32,
        label_offset: Vec2,
    ) -> Option<AttributeId> {
        let id = self.insert_attribute(owner, name, center, radius, label_offset)?;
        self.attach_attribute(id);
        Some(id)
    }

    /// Recompute one connector from the attribute center to its owner's base.
    pub fn refresh_connector(&mut self, id: AttributeId) -> bool {
        let Some(owner) = self.attribute(id).map(|a| a.owner) else {
            return false;
        };
        let Some(end) = self.entity(owner).map(Entity::base_center) else {
            return false;
        };
        let attr = &mut self.attributes[id.0];
        attr.connector = Segment::new(attr.center, end);
        true
    }

    pub fn refresh_entity_connectors(&mut self, id: EntityId) {
        let owned = match self.entity(id) {
            Some(e) => e.attributes.clone(),
            None => return,
        };
        for attr in owned {
            self.refresh_connector(attr);
        }
    }

    /// Flip the unique flag, returning the new state.
    pub fn toggle_unique(&mut self, id: AttributeId) -> Option<bool> {
        let attr = self.attributes.get_mut(id.0)?;
        attr.unique = !attr.unique;
        Some(attr.unique)
    }

    pub fn rename_entity(&mut self, id: EntityId, name: &str, measurer: &dyn Measurer) -> bool {
        match self.entity_mut(id) {
            Some(entity) => {
                entity.set_name(name, measurer);
                true
            }
            None => false,
        }
    }

    /// Move an entity and keep its attributes' connectors attached.
    pub fn move_entity(&mut self, id: EntityId, delta: Vec2) -> bool {
        match self.entity_mut(id) {
            Some(entity) => entity.position += delta,
            None => return false,
        }
        self.refresh_entity_connectors(id);
        true
    }

    pub fn move_attribute(&mut self, id: AttributeId, delta: Vec2) -> bool {
        match self.attributes.get_mut(id.0) {
            Some(attr) => attr.center += delta,
            None => return false,
        }
        self.refresh_connector(id)
    }

    /// Replace an item's interaction capabilities.
    pub fn set_flags(&mut self, item: ItemRef, flags: ItemFlags) -> bool {
        let slot = match item {
            ItemRef::Entity(id) => self.entities.get_mut(id.0).map(|e| &mut e.flags),
            ItemRef::Attribute(id) => self.attributes.get_mut(id.0).map(|a| &mut a.flags),
        };
        match slot {
            Some(slot) => {
                *slot = flags;
                true
            }
            None => false,
        }
    }

    pub fn flags(&self, item: ItemRef) -> Option<ItemFlags> {
        match item {
            ItemRef::Entity(id) => self.entity(id).map(|e| e.flags),
            ItemRef::Attribute(id) => self.attribute(id).map(|a| a.flags),
        }
    }

    pub fn bounds(&self, item: ItemRef) -> Option<Rect> {
        match item {
            ItemRef::Entity(id) => self.entity(id).map(Entity::rect),
            ItemRef::Attribute(id) => self.attribute(id).map(Attribute::bounds),
        }
    }

    /// Topmost item under `p`. Attributes sit above entities and later items
    /// above earlier ones.
    pub fn item_at(&self, p: Point) -> Option<ItemRef> {
        let attribute = self
            .attributes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, a)| a.contains(p));
        if let Some((i, _)) = attribute {
            return Some(ItemRef::Attribute(AttributeId(i)));
        }
        self.entities
            .iter()
            .enumerate()
            .rev()
            .find(|(_, e)| e.rect().contains(p))
            .map(|(i, _)| ItemRef::Entity(EntityId(i)))
    }

    /// Every item, entities first, in creation order.
    pub fn items(&self) -> impl Iterator<Item = ItemRef> + '_ {
        self.entities()
            .map(|(id, _)| ItemRef::Entity(id))
            .chain(self.attributes().map(|(id, _)| ItemRef::Attribute(id)))
    }
}
