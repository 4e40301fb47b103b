//! Hull growth algorithms.
//!
//! This module contains the pieces of concave hull extraction, leaves first:
//!
//! - **Curvature**: circumsphere sharpness of a candidate face
//! - **Frontier**: the ordered candidate set and the greedy growth step
//! - **Hull**: seeding (inward, outward, directional) and surface output
//!
//! Long passes can report through [`Progress`].

pub mod curvature;
pub mod frontier;
pub mod hull;
mod progress;

pub use curvature::{circumcurvature, face_curvature, DEGENERATE_CURVATURE};
pub use frontier::{Frontier, GrowOptions, GrowthMode, GrowthState, GrowthSummary};
pub use hull::ConcaveHull;
pub use progress::Progress;
