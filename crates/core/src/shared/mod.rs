pub mod bounding_box;
pub mod camera_properties;
pub mod cascade_resolver;
pub mod constants;
pub mod error;
pub mod frame;
