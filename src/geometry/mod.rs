//! Geometric primitives for the layout simulation.
//!
//! All positions, velocities and forces are expressed as [`Vector2`] values in
//! an unbounded 2D plane. Vectors are plain `Copy` values and are always
//! passed and returned by value.

mod vector;

pub use vector::Vector2;
