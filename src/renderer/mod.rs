//! Render sink
//!
//! `frame` turns the session into draw data; `canvas` paints it in the browser.

pub mod frame;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use frame::{Overlay, RenderFrame, Rgba};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
