//! Inline rename editing.
//!
//! The editor is a small state machine: `Idle` until an entity is
//! double-clicked, `Editing` until the edit is confirmed or loses focus. Only
//! one edit can be open; opening another replaces the first and drops its text.

use crate::geometry::Point;
use crate::model::EntityId;

/// An open text field over an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct RenameEditor {
    pub entity: EntityId,
    /// Current contents of the text field.
    pub text: String,
    /// Field width in scene units (the entity width).
    pub width: f32,
    /// Top-left of the field in scene coordinates.
    pub anchor: Point,
    focus_requested: bool,
}

impl RenameEditor {
    pub fn new(entity: EntityId, text: &str, width: f32, anchor: Point) -> Self {
        Self {
            entity,
            text: text.to_string(),
            width,
            anchor,
            focus_requested: true,
        }
    }

    /// Returns true exactly once, on the first frame the field is shown.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RenameState {
    #[default]
    Idle,
    Editing(RenameEditor),
}

impl RenameState {
    pub fn is_editing(&self) -> bool {
        matches!(self, RenameState::Editing(_))
    }

    pub fn editor(&self) -> Option<&RenameEditor> {
        match self {
            RenameState::Editing(editor) => Some(editor),
            RenameState::Idle => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut RenameEditor> {
        match self {
            RenameState::Editing(editor) => Some(editor),
            RenameState::Idle => None,
        }
    }

    /// Open `editor`, returning the one it replaced (uncommitted).
    pub fn open(&mut self, editor: RenameEditor) -> Option<RenameEditor> {
        match std::mem::replace(self, RenameState::Editing(editor)) {
            RenameState::Editing(previous) => Some(previous),
            RenameState::Idle => None,
        }
    }

    /// Close the editor and hand back its final state.
    pub fn close(&mut self) -> Option<RenameEditor> {
        match std::mem::take(self) {
            RenameState::Editing(editor) => Some(editor),
            RenameState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_is_requested_once() {
        let mut editor = RenameEditor::new(EntityId(0), "x", 120.0, Point::ORIGIN);
        assert!(editor.take_focus_request());
        assert!(!editor.take_focus_request());
    }

    #[test]
    fn open_replaces_previous_editor() {
        let mut state = RenameState::default();
        assert!(state.open(RenameEditor::new(EntityId(0), "a", 1.0, Point::ORIGIN)).is_none());
        let replaced = state
            .open(RenameEditor::new(EntityId(1), "b", 1.0, Point::ORIGIN))
            .unwrap();
        assert_eq!(replaced.entity, EntityId(0));
        assert_eq!(state.editor().unwrap().entity, EntityId(1));
        assert!(state.close().is_some());
        assert!(!state.is_editing());
        assert!(state.close().is_none());
    }
}
