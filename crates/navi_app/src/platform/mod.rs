mod app;
pub(crate) mod config;
mod effects;
mod input;
pub(crate) mod logging;
mod render;

pub use app::run_app;
