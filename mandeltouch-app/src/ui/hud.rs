use eframe::egui;

use crate::app::{MandelTouchApp, HUD_CORNER_RADIUS, HUD_MARGIN};

impl MandelTouchApp {
    /// Top-left overlay with the view parameters and the last render time.
    pub(crate) fn show_hud(&self, ctx: &egui::Context) {
        if !self.show_hud {
            return;
        }
        let view = &self.state.viewport;
        let scheduler = &self.state.scheduler;

        egui::Area::new(egui::Id::new("hud_params"))
            .anchor(egui::Align2::LEFT_TOP, [HUD_MARGIN, HUD_MARGIN])
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(160))
                    .inner_margin(egui::Margin::same(8))
                    .corner_radius(HUD_CORNER_RADIUS)
                    .show(ui, |ui| {
                        ui.style_mut().visuals.override_text_color =
                            Some(egui::Color32::from_rgb(220, 220, 220));
                        ui.style_mut().spacing.item_spacing.y = 2.0;

                        ui.label(format!(
                            "Center: {:.10} {:+.10}i",
                            view.center.re, view.center.im
                        ));
                        ui.label(format!("Zoom: {:.3e}", view.zoom));
                        ui.label(format!("Iterations: {}", view.max_iterations));
                        match scheduler.last_stats() {
                            Some(stats) => ui.label(format!(
                                "{:.1} ms ({}x{}, {:?})",
                                stats.elapsed.as_secs_f64() * 1000.0,
                                stats.width,
                                stats.height,
                                scheduler.mode(),
                            )),
                            None => ui.label("Rendering..."),
                        };
                        ui.label(format!("Frames: {}", scheduler.frames_rendered()));
                    });
            });
    }
}
