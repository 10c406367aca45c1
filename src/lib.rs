//! Layered material shader composition.

#[macro_use]
mod macros;

pub mod io;
pub mod material;
pub mod shader;
