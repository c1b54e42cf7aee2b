pub mod app;
pub mod bootstrap;
pub mod config;
pub mod presets;
pub mod server;
pub mod services;

pub use bootstrap::init_foundation;
