//! The egui application run by the render driver.

use std::sync::Arc;

use crossbeam_channel::Receiver;
use eframe::egui::{
    self, Align2, Color32, Event, FontId, MouseWheelUnit, PointerButton, Pos2, Rect, Sense, Stroke,
};
use winit::event_loop::EventLoopBuilder;

use crate::snapshot::{GameSnapshot, SharedSnapshot};

use super::driver::{FrameReady, ReadyLatch};
use super::scene::{BACKGROUND_COLOR, Primitive, build_scene};
use super::stats::PlayerStatTable;
use super::view::{ViewTransform, WHEEL_STEP};

/// Window title.
pub const WINDOW_TITLE: &str = "Underworld";
/// Initial window position.
const WINDOW_POSITION: [f32; 2] = [120.0, 120.0];
/// Initial window size.
const WINDOW_SIZE: [f32; 2] = [800.0, 600.0];
/// Board canvas share of the window width; the stat table gets the rest.
const CANVAS_SHARE: f32 = 2.0 / 3.0;
/// Points scrolled per wheel notch for pixel-precise wheels.
const POINTS_PER_NOTCH: f32 = 50.0;

/// Render-driver state: everything here lives on the render thread only.
struct VisualizerApp {
    shared: SharedSnapshot,
    frames: Receiver<FrameReady>,
    snapshot: Arc<GameSnapshot>,
    stats: PlayerStatTable,
    view: ViewTransform,
}

impl VisualizerApp {
    fn new(shared: SharedSnapshot, frames: Receiver<FrameReady>) -> Self {
        let snapshot = shared.load();
        let stats = PlayerStatTable::new(&snapshot);
        Self {
            shared,
            frames,
            snapshot,
            stats,
            view: ViewTransform::default(),
        }
    }

    /// Pick up a new snapshot if the engine finished a turn since the last frame.
    fn poll_frames(&mut self) {
        if self.frames.try_iter().count() == 0 {
            return;
        }
        self.snapshot = self.shared.load();
        self.stats.refresh(&self.snapshot);
    }

    fn handle_input(&mut self, ctx: &egui::Context, canvas: Rect) {
        let (events, hover) = ctx.input(|i| (i.events.clone(), i.pointer.hover_pos()));
        let local = |p: Pos2| p - canvas.min.to_vec2();

        for event in events {
            match event {
                Event::MouseWheel { unit, delta, .. } => {
                    if let Some(pos) = hover.filter(|p| canvas.contains(*p)) {
                        self.view.scroll(wheel_delta(unit, delta.y), local(pos));
                    }
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Secondary,
                    pressed,
                    ..
                } => {
                    if !pressed {
                        self.view.end_drag();
                    } else if canvas.contains(pos) {
                        self.view.begin_drag(local(pos));
                    }
                }
                Event::PointerMoved(pos) => {
                    self.view.pointer_moved(local(pos));
                }
                _ => {}
            }
        }
    }

    fn canvas_ui(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let canvas = response.rect;
        self.handle_input(ui.ctx(), canvas);

        painter.rect_filled(canvas, 0.0, BACKGROUND_COLOR);
        let offset = canvas.min.to_vec2();
        for primitive in build_scene(&self.snapshot) {
            match primitive.to_screen(&self.view) {
                Primitive::Fill { rect, color } => {
                    painter.rect_filled(rect.translate(offset), 0.0, color);
                }
                Primitive::Outlined {
                    rect,
                    fill,
                    stroke,
                    stroke_width,
                } => {
                    painter.rect(
                        rect.translate(offset),
                        0.0,
                        fill,
                        Stroke::new(stroke_width, stroke),
                    );
                }
                Primitive::Glyph {
                    rect,
                    glyph,
                    color,
                    size,
                } => {
                    if size >= 1.0 {
                        painter.text(
                            rect.translate(offset).center(),
                            Align2::CENTER_CENTER,
                            glyph,
                            FontId::proportional(size),
                            color,
                        );
                    }
                }
            }
        }
    }

    fn stats_ui(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::both().show(ui, |ui| {
            egui::Grid::new("player_stats").striped(true).show(ui, |ui| {
                ui.label("");
                for col in 0..self.stats.column_count() {
                    ui.strong(self.stats.header(col).unwrap_or_default());
                }
                ui.end_row();

                for row in 0..self.stats.row_count() {
                    ui.strong(self.stats.attribute(row).unwrap_or_default());
                    for col in 0..self.stats.column_count() {
                        ui.label(self.stats.value(row, col).unwrap_or_default());
                    }
                    ui.end_row();
                }
            });
        });
    }
}

impl eframe::App for VisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_frames();

        let table_width = ctx.screen_rect().width() * (1.0 - CANVAS_SHARE);
        egui::SidePanel::right("player_stats_panel")
            .resizable(false)
            .exact_width(table_width)
            .show(ctx, |ui| self.stats_ui(ui));
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::TRANSPARENT))
            .show(ctx, |ui| self.canvas_ui(ui));
    }
}

/// Convert an egui wheel event to wheel units, [`WHEEL_STEP`] per notch.
fn wheel_delta(unit: MouseWheelUnit, delta: f32) -> f32 {
    match unit {
        MouseWheelUnit::Line | MouseWheelUnit::Page => delta * WHEEL_STEP,
        MouseWheelUnit::Point => delta / POINTS_PER_NOTCH * WHEEL_STEP,
    }
}

/// The render driver runs off the main thread; let winit accept that.
fn allow_any_thread<T>(builder: &mut EventLoopBuilder<T>) {
    #[cfg(target_os = "linux")]
    {
        use winit::platform::wayland::EventLoopBuilderExtWayland;
        use winit::platform::x11::EventLoopBuilderExtX11;

        if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            EventLoopBuilderExtWayland::with_any_thread(builder, true);
        } else {
            EventLoopBuilderExtX11::with_any_thread(builder, true);
        }
    }
    #[cfg(not(target_os = "linux"))]
    let _ = builder;
}

/// Open the window and run its event loop until the user closes it.
///
/// Trips `ready` once the window exists. Runs on the render-driver thread.
pub(crate) fn run_window(shared: SharedSnapshot, frames: Receiver<FrameReady>, ready: ReadyLatch) {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_position(WINDOW_POSITION)
            .with_inner_size(WINDOW_SIZE),
        event_loop_builder: Some(Box::new(allow_any_thread)),
        ..Default::default()
    };

    let app = VisualizerApp::new(shared, frames);
    let result = eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            ready.signal(Arc::new(cc.egui_ctx.clone()));
            Ok(Box::new(app))
        }),
    );
    if let Err(e) = result {
        tracing::error!("visualizer window failed: {e}");
    }
}
