// Configuration module
// Public interface for configuration loading

pub mod loader;
pub mod settings;

pub use loader::load_config;
pub use settings::Config;
