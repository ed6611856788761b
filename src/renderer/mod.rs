//! WebGPU rendering module
//!
//! Draws the whole frame in the fragment shader using signed distance
//! fields: the ball as a filled circle, the barrier as the two rectangles
//! flanking the gap.

pub mod sdf_pipeline;

pub use sdf_pipeline::SdfRenderState;
