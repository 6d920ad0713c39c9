pub mod input_handlers;
pub mod light_input;

// Re-export the main types for easy access
pub use input_handlers::{ LightInputHandler, PointerDragHandler };
pub use light_input::{ Axis, LightInputFields };
