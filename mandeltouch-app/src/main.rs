mod app;
mod config;
mod context;
mod gesture;
mod input;
mod surface;
mod ui;

fn main() -> eframe::Result {
    app::run()
}
