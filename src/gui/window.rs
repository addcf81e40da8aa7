#![cfg(feature = "egui")]

use eframe::egui;
use tracing::info;

use crate::canvas::Canvas;
use crate::config::AppContext;
use crate::error::{Error, Result};

use super::ui::{CanvasCommand, CanvasView, canvas_ui};

/// Top-level window: "New Entity" and "Add Attribute" stacked above the canvas.
pub struct MainWindow {
    canvas: Canvas,
    view: CanvasView,
}

impl MainWindow {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            canvas: Canvas::new(ctx),
            view: CanvasView::default(),
        }
    }
}

impl eframe::App for MainWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut command = None;
        egui::TopBottomPanel::top("commands").show(ctx, |ui| {
            ui.vertical_centered_justified(|ui| {
                if ui.button("New Entity").clicked() {
                    command = Some(CanvasCommand::NewEntity);
                }
                if ui.button("Add Attribute").clicked() {
                    command = Some(CanvasCommand::AddAttribute);
                }
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            canvas_ui(&mut self.canvas, &mut self.view, command, ui);
        });
    }
}

/// Open the native window and block until it is closed.
pub fn run(ctx: AppContext) -> Result<()> {
    let config = &ctx.config;
    let viewport = egui::ViewportBuilder::default()
        .with_title(config.window_title.clone())
        .with_inner_size([config.window_size.x, config.window_size.y]);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let title = config.window_title.clone();
    let dark = config.dark_mode;
    info!(%title, "opening window");
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(if dark {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(MainWindow::new(&ctx)))
        }),
    )
    .map_err(|e| Error::gui(e.to_string()))
}
