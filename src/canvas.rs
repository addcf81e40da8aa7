//! Canvas controller: the diagram plus everything the user is doing with it.
//!
//! [`Canvas`] is the single entry point for user-level operations. The egui
//! front-end translates pointer and button events into calls on it, and the
//! integration tests drive it directly with a fixed-size [`Measurer`].
//!
//! # Example
//!
//! ```rust,ignore
//! let ctx = AppContext::new(AppConfig::default())?;
//! let mut canvas = Canvas::new(&ctx);
//! let e1 = canvas.add_entity_at(Point::new(100.0, 100.0), &measurer);
//! let a1 = canvas.add_attribute_to_selection().unwrap();
//! canvas.click_attribute(a1);
//! ```

use tracing::{debug, info};

use crate::config::{AppConfig, AppContext};
use crate::geometry::{Measurer, Point, Rect, Vec2};
use crate::model::{AttributeId, Diagram, Entity, EntityId, ItemFlags, ItemRef};
use crate::rename::{RenameEditor, RenameState};
use crate::selection::Selection;

#[derive(Debug, Clone)]
pub struct Canvas {
    config: AppConfig,
    diagram: Diagram,
    pub selection: Selection,
    rename: RenameState,
    viewport: Rect,
}

impl Canvas {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            viewport: ctx.config.scene_rect(),
            config: ctx.config.clone(),
            diagram: Diagram::new(),
            selection: Selection::new(),
            rename: RenameState::Idle,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Read-only view of the scene; every mutation goes through `Canvas`.
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Record the scene area currently visible in the window.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn selected_entity(&self) -> Option<EntityId> {
        self.selection.selected_entity
    }

    // ── Entities ────────────────────────────────────────────────────────

    /// Create a default-named entity with its top-left at `position` and select it.
    pub fn add_entity_at(&mut self, position: Point, measurer: &dyn Measurer) -> EntityId {
        let entity = Entity::new(
            &self.config.default_entity_name,
            position,
            self.config.entity_size,
            measurer,
        );
        let id = self.diagram.insert_entity(entity);
        self.selection.select_entity(id);
        info!(entity = id.0, x = position.x, y = position.y, "entity created");
        id
    }

    pub fn add_entity_at_viewport_center(&mut self, measurer: &dyn Measurer) -> EntityId {
        self.add_entity_at(self.viewport.center(), measurer)
    }

    pub fn click_entity(&mut self, id: EntityId) {
        if self.diagram.entity(id).is_some() {
            self.selection.select_entity(id);
            debug!(entity = id.0, "entity selected");
        }
    }

    // ── Attributes ──────────────────────────────────────────────────────

    /// Add a default-named attribute to the selected entity.
    ///
    /// Returns `None` when nothing is selected.
    pub fn add_attribute_to_selection(&mut self) -> Option<AttributeId> {
        let Some(owner) = self.selection.selected_entity else {
            debug!("add attribute ignored: no entity selected");
            return None;
        };
        let entity = self.diagram.entity(owner)?;
        let center = entity.position + self.config.attribute_offset;
        let name = format!(
            "{}{}",
            self.config.attribute_prefix,
            entity.attributes.len() + 1
        );
        let id = self.diagram.add_attribute(
            owner,
            &name,
            center,
            self.config.attribute_radius,
            self.config.attribute_label_offset,
        )?;
        debug!(entity = owner.0, attribute = id.0, %name, "attribute added");
        Some(id)
    }

    /// Left-click on an attribute flips its unique marker.
    pub fn click_attribute(&mut self, id: AttributeId) -> Option<bool> {
        let unique = self.diagram.toggle_unique(id)?;
        debug!(attribute = id.0, unique, "attribute toggled");
        Some(unique)
    }

    // ── Rename editing ──────────────────────────────────────────────────

    pub fn rename_editor(&self) -> Option<&RenameEditor> {
        self.rename.editor()
    }

    pub fn rename_editor_mut(&mut self) -> Option<&mut RenameEditor> {
        self.rename.editor_mut()
    }

    /// Open the inline editor over `id`, discarding any edit already open.
    pub fn begin_rename(&mut self, id: EntityId) {
        let Some(entity) = self.diagram.entity(id) else {
            return;
        };
        let editor = RenameEditor::new(id, &entity.name, entity.size.x, entity.position);
        if let Some(previous) = self.rename.open(editor) {
            debug!(entity = previous.entity.0, "pending rename discarded");
        }
        self.selection.select_entity(id);
        debug!(entity = id.0, "rename started");
    }

    /// Apply the edited text and close the editor. No-op when idle.
    pub fn finish_rename(&mut self, measurer: &dyn Measurer) {
        let Some(editor) = self.rename.close() else {
            return;
        };
        if self.diagram.rename_entity(editor.entity, &editor.text, measurer) {
            info!(entity = editor.entity.0, name = %editor.text, "entity renamed");
        }
    }

    /// Close the editor without applying its text.
    pub fn cancel_rename(&mut self) {
        if let Some(editor) = self.rename.close() {
            debug!(entity = editor.entity.0, "rename cancelled");
        }
    }

    // ── Scene-level marking and dragging ────────────────────────────────

    pub fn item_at(&self, p: Point) -> Option<ItemRef> {
        self.diagram.item_at(p)
    }

    /// Pointer press on an item: mark it alone, or toggle it when `additive`.
    ///
    /// Pressing an already marked item keeps the group so it can be dragged.
    pub fn press_item(&mut self, item: ItemRef, additive: bool) {
        if !self.diagram.flags(item).is_some_and(|f| f.selectable) {
            return;
        }
        if additive {
            self.selection.toggle_mark(item);
        } else if !self.selection.is_marked(item) {
            self.selection.mark_only(item);
        }
    }

    /// Move `item`, or the whole marked group if `item` is part of it.
    pub fn drag_item(&mut self, item: ItemRef, delta: Vec2) {
        if delta.is_zero() {
            return;
        }
        let targets = if self.selection.is_marked(item) {
            self.selection.marked.clone()
        } else {
            vec![item]
        };
        // Entities first so attribute connectors see their owner's final position.
        let (entities, attributes): (Vec<_>, Vec<_>) = targets
            .into_iter()
            .filter(|&t| self.diagram.flags(t).is_some_and(|f| f.movable))
            .partition(|t| matches!(t, ItemRef::Entity(_)));
        for target in entities.into_iter().chain(attributes) {
            match target {
                ItemRef::Entity(id) => self.diagram.move_entity(id, delta),
                ItemRef::Attribute(id) => self.diagram.move_attribute(id, delta),
            };
        }
    }

    /// Change what an item allows; marks on items that become unselectable are dropped.
    pub fn set_item_flags(&mut self, item: ItemRef, flags: ItemFlags) -> bool {
        if !self.diagram.set_flags(item, flags) {
            return false;
        }
        if !flags.selectable {
            self.selection.marked.retain(|&m| m != item);
        }
        true
    }

    pub fn clear_marks(&mut self) {
        self.selection.clear_marks();
    }

    pub fn begin_rubber_band(&mut self, p: Point) {
        self.selection.start_rect(p);
    }

    pub fn update_rubber_band(&mut self, p: Point) {
        self.selection.update_rect(p);
    }

    pub fn finish_rubber_band(&mut self) {
        self.selection.finish_rect(&self.diagram);
        debug!(marked = self.selection.marked.len(), "rubber band finished");
    }
}
