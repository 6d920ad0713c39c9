pub mod kiss_surface;

pub use kiss_surface::*;
