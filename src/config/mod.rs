pub mod loader;
pub mod parameters;
pub mod settings;
pub mod types;
