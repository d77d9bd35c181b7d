pub mod angle;
pub mod bounds;
pub mod coord;
