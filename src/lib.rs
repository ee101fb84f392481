//! A single-threaded CPU rasterizer.
//!
//! Meshes run through a vertex stage (world, view and projection transforms plus the
//! perspective divide), are rasterized with edge functions into a depth-tested
//! [`core::framebuffer::FrameBuffer`], and every visible pixel is shaded with a
//! Lambert + Phong model that can use diffuse, normal, gloss and specular maps.

pub mod core;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod scene;

pub use error::{RenderError, Result};
