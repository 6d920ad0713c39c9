pub mod components;
pub mod config;
pub mod error;
pub mod geometry;
pub mod rendering;
pub mod systems;
pub mod utils;

// Re-export all commonly used items for easy access
pub use config::ViewerConfig;
pub use error::{ ConfigError, ShaderStage, ViewerError };
pub use rendering::{ render_frame, RenderSession };
