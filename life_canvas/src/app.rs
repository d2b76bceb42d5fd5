// app.rs - egui host: draws the engine as outlined squares and paces generations

use std::time::{Duration, Instant};

use eframe::egui;
use egui::{Color32, Painter, Pos2, Rect, Stroke};
use life_engine::{Engine, LifeResult, Params, Presenter, Scheduler, Step, patterns, seed};
use tracing::{info, warn};

use crate::layout::CellLayout;

/// Draws one generation with an egui painter. Never touches the engine's cells.
struct CanvasPresenter<'p> {
    painter: &'p Painter,
    origin: Pos2,
    layout: CellLayout,
    outline: Color32,
    live: Color32,
}

impl Presenter for CanvasPresenter<'_> {
    fn present(&mut self, engine: &Engine) -> LifeResult<()> {
        let grid = engine.grid();
        let stroke = Stroke::new(self.layout.line_width(), self.outline);
        for row in 0..grid.rows() {
            for (column, &alive) in grid.row(row).iter().enumerate() {
                if let Some(rect) = self.layout.outline(self.origin, row, column) {
                    self.painter.rect_stroke(rect, 0.0, stroke);
                }
                if alive {
                    if let Some(rect) = self.layout.fill(self.origin, row, column) {
                        self.painter.rect_filled(rect, 0.0, self.live);
                    }
                }
            }
        }
        Ok(())
    }
}

pub struct LifeApp {
    scheduler: Scheduler,
    params: Params,
    pub live_color: Color32,
    pub outline_color: Color32,
    pub background: Color32,
    pub selected_pattern: usize,
    status: Option<String>,
}

impl LifeApp {
    pub fn new(scheduler: Scheduler, params: Params) -> Self {
        Self {
            scheduler,
            params,
            live_color: Color32::WHITE,
            outline_color: Color32::WHITE,
            background: Color32::BLACK,
            selected_pattern: 0,
            status: None,
        }
    }

    /// Same dimensions, fresh clock seed.
    fn reseed(&mut self) {
        self.params.seed = seed::clock_seed();
        match Engine::from_params(&self.params) {
            Ok(engine) => {
                info!(seed = self.params.seed, "reseeded");
                self.scheduler.replace_engine(engine);
                self.status = Some(format!("Seed: {}", self.params.seed));
            }
            Err(err) => self.report(err.to_string()),
        }
    }

    /// Replace the engine with the selected pattern centred on a dead grid.
    fn apply_selected_pattern(&mut self) {
        let Some(pattern) = patterns::PATTERNS.get(self.selected_pattern) else {
            return;
        };
        let engine = self.scheduler.engine();
        let (height, width) = pattern.extent();
        let offset = (
            engine.row_count().saturating_sub(height) / 2,
            engine.column_count().saturating_sub(width) / 2,
        );
        match Engine::from_pattern(self.params.rows, self.params.columns, pattern, offset) {
            Ok(engine) => {
                self.scheduler.replace_engine(engine);
                self.status = Some(format!("Pattern: {}", pattern.name));
            }
            Err(err) => self.report(format!("{} does not fit: {err}", pattern.name)),
        }
    }

    fn report(&mut self, message: String) {
        warn!("{message}");
        self.status = Some(message);
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = if self.scheduler.is_running() { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                let running = !self.scheduler.is_running();
                self.scheduler.set_running(running);
            }

            if ui.button("⏭ Step").clicked() {
                self.scheduler.set_running(false);
                self.scheduler.step();
            }

            if ui.button("🎲 Reseed").clicked() {
                self.reseed();
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                self.scheduler.set_running(false);
                self.apply_selected_pattern();
            }

            ui.separator();

            ui.label(format!("Generation: {}", self.scheduler.engine().generation()));
        });

        ui.horizontal(|ui| {
            ui.label("Speed:");
            let mut speed = 1000.0 / self.scheduler.pacing().as_millis().max(1) as f32;
            if ui
                .add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec"))
                .changed()
            {
                self.scheduler
                    .set_pacing(Duration::from_millis((1000.0 / speed) as u64));
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Outline:");
            ui.color_edit_button_srgba(&mut self.outline_color);
            ui.label("Background:");
            ui.color_edit_button_srgba(&mut self.background);
        });
    }

    fn statistics(&self, ui: &mut egui::Ui) {
        let engine = self.scheduler.engine();
        let total = engine.row_count() * engine.column_count();
        let live = engine.live_count();
        ui.horizontal(|ui| {
            ui.label(format!("Live cells: {live}"));
            ui.label(format!("Dead cells: {}", total - live));
            ui.label(format!(
                "Population: {:.1}%",
                live as f32 / total as f32 * 100.0
            ));
            if let Some(status) = &self.status {
                ui.separator();
                ui.label(status.as_str());
            }
        });
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));
        egui::TopBottomPanel::bottom("statistics").show(ctx, |ui| self.statistics(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            // Layout follows the panel, so window resizes rescale the grid.
            let available = ui.available_size();
            let (response, painter) = ui.allocate_painter(available, egui::Sense::hover());
            let origin = response.rect.min;

            let engine = self.scheduler.engine();
            let (rows, columns) = (engine.row_count(), engine.column_count());
            let layout = CellLayout::fit(available, rows, columns);

            painter.rect_filled(
                Rect::from_min_size(origin, layout.extent(rows, columns)),
                0.0,
                self.background,
            );

            if let Some(pos) = response.hover_pos() {
                if let Some((row, column)) = layout.cell_at(origin, pos, rows, columns) {
                    let alive = engine.is_alive(row as i64, column as i64).unwrap_or(false);
                    response.clone().on_hover_text(format!(
                        "({row}, {column}) {}",
                        if alive { "alive" } else { "dead" }
                    ));
                }
            }

            let mut presenter = CanvasPresenter {
                painter: &painter,
                origin,
                layout,
                outline: self.outline_color,
                live: self.live_color,
            };

            match self.scheduler.frame_paced(&mut presenter, Instant::now()) {
                Ok(Step::Advanced { .. }) => ctx.request_repaint(),
                Ok(Step::Waiting { remaining }) => ctx.request_repaint_after(remaining),
                Ok(Step::CycleDetected { generation }) => {
                    self.status = Some(format!("Repeats at generation {generation}"));
                    ctx.request_repaint();
                }
                Ok(Step::Paused) => {}
                Err(err) => warn!("frame failed: {err}"),
            }
        });
    }
}
