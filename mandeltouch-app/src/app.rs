use std::time::Duration;

use eframe::egui;
use tracing::{error, info};

use mandeltouch_render::DisplaySurface;

use crate::config::AppConfig;
use crate::context::{AppContext, Clock};
use crate::gesture::Gestures;
use crate::input::{collect_events, InputEvent};
use crate::surface::EguiSurface;

pub(crate) const HUD_MARGIN: f32 = 8.0;
pub(crate) const HUD_CORNER_RADIUS: f32 = 6.0;

pub(crate) struct MandelTouchApp {
    pub(crate) state: AppContext,
    gestures: Gestures,
    surface: EguiSurface,
    clock: Clock,
    frame_interval: Duration,
    pub(crate) show_hud: bool,
}

impl MandelTouchApp {
    pub(crate) fn new(egui_ctx: &egui::Context, config: AppConfig) -> mandeltouch_render::Result<Self> {
        egui_ctx.set_visuals(egui::Visuals::dark());

        let viewport = config.start_viewport();
        let width = config.window_width.max(1.0) as u32;
        let height = config.window_height.max(1.0) as u32;

        let mut state = AppContext::new(viewport, width, height, config.render_mode(), config.gestures);
        state.show_tap_marker = config.show_tap_marker;

        info!(
            width,
            height,
            zoom = viewport.zoom,
            max_iterations = viewport.max_iterations,
            mode = ?config.render_mode(),
            "Session ready"
        );

        Ok(Self {
            state,
            gestures: Gestures::new(),
            surface: EguiSurface::new(egui_ctx, width, height)?,
            clock: Clock::new(),
            frame_interval: Duration::from_millis(config.frame_interval_ms),
            show_hud: config.show_hud,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.surface.width(), self.surface.height()) {
            return;
        }
        if let Err(e) = self.surface.resize(width, height) {
            error!("Surface resize failed: {e}");
            return;
        }
        self.state.resize(width, height);
    }

    /// Apply this frame's events. Returns `true` when the app should close.
    fn dispatch(&mut self, events: Vec<InputEvent>, now_ms: u64) -> bool {
        let mut quit = false;
        for event in events {
            match event {
                InputEvent::Resize { width, height } => self.resize(width, height),
                InputEvent::Quit | InputEvent::KeyEscape => quit = true,
                _ => self.gestures.handle(&mut self.state, event, now_ms),
            }
        }
        quit
    }
}

// ---------------------------------------------------------------------------
// eframe::App
// ---------------------------------------------------------------------------

impl eframe::App for MandelTouchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let quit = egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                // The buffer is sized in physical pixels, one texel per screen pixel.
                let available = ui.available_size();
                let ppp = ctx.pixels_per_point();
                let width = (available.x * ppp).round().max(1.0) as u32;
                let height = (available.y * ppp).round().max(1.0) as u32;

                let (response, painter) =
                    ui.allocate_painter(available, egui::Sense::click_and_drag());

                let now_ms = self.clock.now_ms();
                let mut events = vec![InputEvent::Resize { width, height }];
                events.extend(collect_events(
                    ctx,
                    response.rect,
                    self.gestures.touch.is_active(),
                ));
                let quit = self.dispatch(events, now_ms);

                self.gestures.tick(&mut self.state, now_ms);
                let state = &mut self.state;
                state
                    .scheduler
                    .tick(&mut state.viewport, &mut self.surface, &mut state.marker, now_ms);

                if let Some(texture) = self.surface.texture() {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    painter.image(texture.id(), response.rect, uv, egui::Color32::WHITE);
                }
                quit
            })
            .inner;

        self.show_hud(ctx);

        if quit {
            info!("Closing");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        ctx.request_repaint_after(self.frame_interval);
    }
}

/// Install logging, load the config, and run the window until it closes.
pub(crate) fn run() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting mandeltouch");

    let config = AppConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("mandeltouch")
            .with_inner_size([config.window_width, config.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        "mandeltouch",
        options,
        Box::new(move |cc| {
            let app = MandelTouchApp::new(&cc.egui_ctx, config)?;
            Ok(Box::new(app))
        }),
    )
}
