//! Canvas UI: draws the diagram and turns pointer input into canvas operations.
//!
//! Each frame runs in three steps so nothing stale is ever drawn:
//!
//! 1. the canvas response is reduced to a `PointerFrame` in scene coordinates,
//! 2. the frame (and any toolbar command) is applied through the model's hit test,
//! 3. the updated diagram is painted, followed by the rename field overlay.

#![cfg(feature = "egui")]

use eframe::egui::{self, Align2, Color32, Pos2, Rect, Sense, Stroke, StrokeKind};

use crate::canvas::Canvas;
use crate::geometry::{self, Measurer, Point};
use crate::model::{Fill, ItemRef};

use super::measure::{PainterMeasurer, font_px};

const ENTITY_FILL: Color32 = Color32::from_rgb(0xE0, 0xE0, 0xE0);
const MARK_STROKE: Color32 = Color32::from_rgb(0, 120, 255);

/// Toolbar actions forwarded into the canvas for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasCommand {
    NewEntity,
    AddAttribute,
}

/// What the current pointer drag is doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragMode {
    #[default]
    None,
    /// Moving the item the drag started on, or its marked group.
    Item(ItemRef),
    /// Drawing the rubber-band rectangle.
    RubberBand,
}

/// Per-window interaction state that is not part of the scene.
#[derive(Debug, Clone, Default)]
pub struct CanvasView {
    pub drag_mode: DragMode,
}

#[derive(Debug, Clone, Copy)]
enum Interaction {
    Press { item: ItemRef, additive: bool },
    Click { item: ItemRef, additive: bool },
    DoubleClick(ItemRef),
    Drag { item: ItemRef, delta: geometry::Vec2 },
}

/// Pointer input for one frame, already converted to scene coordinates.
#[derive(Debug, Clone, Copy, Default)]
struct PointerFrame {
    /// Where the button went down; the hit test for clicks and drags uses it.
    press: Option<Point>,
    pointer: Option<Point>,
    drag_started: bool,
    dragged: bool,
    drag_stopped: bool,
    clicked: bool,
    double_clicked: bool,
    delta: geometry::Vec2,
    additive: bool,
}

impl PointerFrame {
    fn from_response(ui: &egui::Ui, resp: &egui::Response, origin: Pos2) -> Self {
        let (press, additive) = ui.input(|i| {
            (
                i.pointer.press_origin(),
                i.modifiers.ctrl || i.modifiers.command,
            )
        });
        let pointer = resp.interact_pointer_pos();
        let delta = resp.drag_delta();
        Self {
            press: press.or(pointer).map(|p| to_scene(origin, p)),
            pointer: pointer.map(|p| to_scene(origin, p)),
            drag_started: resp.drag_started(),
            dragged: resp.dragged(),
            drag_stopped: resp.drag_stopped(),
            clicked: resp.clicked(),
            double_clicked: resp.double_clicked(),
            delta: geometry::Vec2::new(delta.x, delta.y),
            additive,
        }
    }
}

fn to_screen(origin: Pos2, p: Point) -> Pos2 {
    Pos2::new(origin.x + p.x, origin.y + p.y)
}

fn to_scene(origin: Pos2, p: Pos2) -> Point {
    Point::new(p.x - origin.x, p.y - origin.y)
}

fn screen_rect(origin: Pos2, r: geometry::Rect) -> Rect {
    Rect::from_min_max(to_screen(origin, r.min), to_screen(origin, r.max))
}

/// Render the canvas into the remaining space of `ui` and handle its input.
pub fn canvas_ui(
    canvas: &mut Canvas,
    view: &mut CanvasView,
    command: Option<CanvasCommand>,
    ui: &mut egui::Ui,
) {
    let avail = ui.available_rect_before_wrap();
    let origin = avail.min;
    canvas.set_viewport(geometry::Rect::from_min_size(
        Point::ORIGIN,
        geometry::Vec2::new(avail.width(), avail.height()),
    ));

    let painter = ui.painter_at(avail);
    let entity_font = font_px(canvas.config().entity_font_size);
    let attribute_font = font_px(canvas.config().attribute_font_size);
    let measurer = PainterMeasurer::new(&painter, entity_font.clone());

    match command {
        Some(CanvasCommand::NewEntity) => {
            canvas.add_entity_at_viewport_center(&measurer);
        }
        Some(CanvasCommand::AddAttribute) => {
            canvas.add_attribute_to_selection();
        }
        None => {}
    }

    let resp = ui.interact(avail, ui.id().with("erd_canvas"), Sense::click_and_drag());
    handle_pointer(canvas, view, PointerFrame::from_response(ui, &resp, origin));

    paint_scene(canvas, &painter, origin, &entity_font, &attribute_font);
    show_rename_editor(canvas, ui, origin, &measurer);
}

/// Route one frame of pointer input to the item under the press point.
fn handle_pointer(canvas: &mut Canvas, view: &mut CanvasView, frame: PointerFrame) {
    let hit = frame.press.and_then(|p| canvas.item_at(p));
    let additive = frame.additive;

    if frame.drag_started {
        match (hit, frame.press) {
            (Some(item), _) => {
                apply_interaction(canvas, Interaction::Press { item, additive });
                view.drag_mode = DragMode::Item(item);
            }
            (None, Some(p)) => {
                canvas.begin_rubber_band(p);
                view.drag_mode = DragMode::RubberBand;
            }
            (None, None) => {}
        }
    }
    if frame.dragged {
        match view.drag_mode {
            DragMode::Item(item) => {
                let delta = frame.delta;
                apply_interaction(canvas, Interaction::Drag { item, delta });
            }
            DragMode::RubberBand => {
                if let Some(p) = frame.pointer {
                    canvas.update_rubber_band(p);
                }
            }
            DragMode::None => {}
        }
    }
    if frame.drag_stopped {
        if view.drag_mode == DragMode::RubberBand {
            canvas.finish_rubber_band();
        }
        view.drag_mode = DragMode::None;
    }
    if frame.clicked {
        match hit {
            Some(item) => apply_interaction(canvas, Interaction::Click { item, additive }),
            None => canvas.clear_marks(),
        }
    }
    if frame.double_clicked {
        if let Some(item) = hit {
            apply_interaction(canvas, Interaction::DoubleClick(item));
        }
    }
}

fn apply_interaction(canvas: &mut Canvas, interaction: Interaction) {
    match interaction {
        Interaction::Press { item, additive } => {
            canvas.press_item(item, additive);
            if let ItemRef::Entity(id) = item {
                canvas.click_entity(id);
            }
        }
        Interaction::Click { item, additive } => {
            canvas.press_item(item, additive);
            match item {
                ItemRef::Entity(id) => canvas.click_entity(id),
                ItemRef::Attribute(id) => {
                    canvas.click_attribute(id);
                }
            }
        }
        Interaction::DoubleClick(ItemRef::Entity(id)) => canvas.begin_rename(id),
        Interaction::DoubleClick(ItemRef::Attribute(_)) => {}
        Interaction::Drag { item, delta } => canvas.drag_item(item, delta),
    }
}

fn paint_scene(
    canvas: &Canvas,
    painter: &egui::Painter,
    origin: Pos2,
    entity_font: &egui::FontId,
    attribute_font: &egui::FontId,
) {
    painter.rect_filled(painter.clip_rect(), 0.0, Color32::WHITE);
    let outline = Stroke::new(1.0, Color32::BLACK);

    for (_, entity) in canvas.diagram().entities() {
        let r = screen_rect(origin, entity.rect());
        painter.rect_filled(r, 0.0, ENTITY_FILL);
        painter.rect_stroke(r, 0.0, outline, StrokeKind::Inside);
        painter.text(
            to_screen(origin, entity.label_position()),
            Align2::LEFT_TOP,
            &entity.name,
            entity_font.clone(),
            Color32::BLACK,
        );
    }

    for (_, attr) in canvas.diagram().attributes() {
        painter.line_segment(
            [
                to_screen(origin, attr.connector.start),
                to_screen(origin, attr.connector.end),
            ],
            outline,
        );
    }

    for (_, attr) in canvas.diagram().attributes() {
        let center = to_screen(origin, attr.center);
        let fill = match attr.fill() {
            Fill::White => Color32::WHITE,
            Fill::Black => Color32::BLACK,
        };
        painter.circle_filled(center, attr.radius, fill);
        painter.circle_stroke(center, attr.radius, Stroke::new(1.5, Color32::BLACK));
        painter.text(
            to_screen(origin, attr.label_position()),
            Align2::LEFT_TOP,
            &attr.name,
            attribute_font.clone(),
            Color32::BLACK,
        );
    }

    for &item in &canvas.selection.marked {
        if let Some(bounds) = canvas.diagram().bounds(item) {
            painter.rect_stroke(
                screen_rect(origin, bounds).expand(2.0),
                2.0,
                Stroke::new(1.5, MARK_STROKE),
                StrokeKind::Outside,
            );
        }
    }

    if let Some(band) = &canvas.selection.selection_rect {
        let r = screen_rect(origin, band.normalized());
        painter.rect_filled(r, 0.0, Color32::from_rgba_unmultiplied(0, 120, 255, 30));
        painter.rect_stroke(r, 0.0, Stroke::new(1.0, MARK_STROKE), StrokeKind::Outside);
    }
}

/// Text field over the entity being renamed. Enter or focus loss commits.
fn show_rename_editor(
    canvas: &mut Canvas,
    ui: &egui::Ui,
    origin: Pos2,
    measurer: &dyn Measurer,
) {
    let ctx = ui.ctx().clone();
    let Some(editor) = canvas.rename_editor_mut() else {
        return;
    };
    let mut commit = false;
    egui::Area::new(egui::Id::new("entity_rename_editor"))
        .fixed_pos(to_screen(origin, editor.anchor))
        .order(egui::Order::Foreground)
        .show(&ctx, |ui| {
            let field = egui::TextEdit::singleline(&mut editor.text).desired_width(editor.width);
            let resp = ui.add(field);
            if editor.take_focus_request() {
                resp.request_focus();
            }
            if resp.lost_focus() {
                commit = true;
            }
        });
    if commit {
        canvas.finish_rename(measurer);
    }
}
