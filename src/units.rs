// For simulating. Double precision reference, not the reduced precision of the hardware pipeline.
pub type Real = f64;
pub type Point = cgmath::Point2<Real>;
pub type Vector = cgmath::Vector2<Real>;
