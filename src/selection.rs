//! Selection management for the canvas.
//!
//! Two independent kinds of selection exist:
//!
//! - the **selected entity**, a single optional entity that receives
//!   "Add Attribute", and
//! - the **marked items**, a scene-level multi-selection built by clicking
//!   (Ctrl+click toggles) or by dragging a rubber band over empty canvas.
//!   Marked items are highlighted and move together when one of them is
//!   dragged.
//!
//! # Usage
//!
//! ```rust,ignore
//! use erdsketch::selection::Selection;
//!
//! let mut sel = Selection::new();
//! sel.start_rect(Point::new(10.0, 20.0));
//! sel.update_rect(Point::new(100.0, 120.0));
//! sel.finish_rect(&diagram);
//! ```

use crate::geometry::{Point, Rect};
use crate::model::{Diagram, EntityId, ItemRef};

/// Rubber-band rectangle in scene coordinates.
#[derive(Debug, Clone, Copy)]
pub struct SelectionRect {
    pub start: Point,
    pub end: Point,
}

impl SelectionRect {
    /// Create a new selection rectangle starting at the given point.
    pub fn new(p: Point) -> Self {
        Self { start: p, end: p }
    }

    pub fn update(&mut self, p: Point) {
        self.end = p;
    }

    /// Get the normalized (min-max) rectangle bounds.
    pub fn normalized(&self) -> Rect {
        Rect::from_min_max(
            Point::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
            Point::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
        )
    }

    pub fn width(&self) -> f32 {
        (self.end.x - self.start.x).abs()
    }

    pub fn height(&self) -> f32 {
        (self.end.y - self.start.y).abs()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// The entity "Add Attribute" applies to.
    pub selected_entity: Option<EntityId>,
    /// Highlighted items in marking order.
    pub marked: Vec<ItemRef>,
    /// Active rubber band, if any.
    pub selection_rect: Option<SelectionRect>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_entity(&mut self, id: EntityId) {
        self.selected_entity = Some(id);
    }

    pub fn is_marked(&self, item: ItemRef) -> bool {
        self.marked.contains(&item)
    }

    /// Mark a single item, clearing any previous marks.
    pub fn mark_only(&mut self, item: ItemRef) {
        self.marked.clear();
        self.marked.push(item);
    }

    /// Toggle an item's mark (add if not marked, remove if marked).
    pub fn toggle_mark(&mut self, item: ItemRef) {
        if let Some(pos) = self.marked.iter().position(|&i| i == item) {
            self.marked.remove(pos);
        } else {
            self.marked.push(item);
        }
    }

    /// Clear marks and any rubber band. The selected entity is kept.
    pub fn clear_marks(&mut self) {
        self.marked.clear();
        self.selection_rect = None;
    }

    pub fn start_rect(&mut self, p: Point) {
        self.selection_rect = Some(SelectionRect::new(p));
    }

    pub fn update_rect(&mut self, p: Point) {
        if let Some(rect) = &mut self.selection_rect {
            rect.update(p);
        }
    }

    /// Finish the rubber band and mark every selectable item overlapping it.
    ///
    /// Bands smaller than 3 units in both directions count as a click and
    /// leave the marks untouched.
    pub fn finish_rect(&mut self, diagram: &Diagram) {
        let Some(rect) = self.selection_rect.take() else {
            return;
        };
        if rect.width() < 3.0 && rect.height() < 3.0 {
            return;
        }
        let band = rect.normalized();
        self.marked = diagram
            .items()
            .filter(|&item| diagram.flags(item).is_some_and(|f| f.selectable))
            .filter(|&item| diagram.bounds(item).is_some_and(|b| b.intersects(band)))
            .collect();
    }
}
