//! Multi-scale grid crafting resolution engine.
//!
//! A workbench owns a 5×5 input grid plus one output slot. Mutating an
//! input recomputes a non-destructive preview of the best craft; a
//! rising edge on the external trigger signal commits it, consuming
//! ingredients and stacking the result into the output slot.

mod bench;
mod consume;
mod grid;
mod persist;
mod recipe;
mod resolve;

pub use bench::*;
pub use consume::*;
pub use grid::*;
pub use persist::*;
pub use recipe::*;
pub use resolve::*;
