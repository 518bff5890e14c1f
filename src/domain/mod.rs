pub mod ai;
pub mod entity;
pub mod geometry;
pub mod physics;
pub mod random;
