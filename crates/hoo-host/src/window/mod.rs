//! Native host: winit window as the drawing surface, redraw requests as the
//! refresh scheduling primitive.

mod runtime;

pub use runtime::{Runtime, WindowConfig, WindowSurfaces};
