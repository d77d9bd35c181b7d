pub mod container;
pub mod geometry;
