pub mod surface_model;
pub mod trackball;

pub use surface_model::SurfaceModel;
pub use trackball::TrackballRotator;
