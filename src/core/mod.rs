pub mod cursor;
pub mod geometry;
pub mod shared;
pub mod topology;
