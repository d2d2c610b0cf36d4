pub mod vector;
pub mod direction;
pub mod point;
pub mod axis;
pub mod frame;
pub mod plane;
pub mod transform;
pub mod conversion;
pub mod spline;
pub mod bounding_box;
