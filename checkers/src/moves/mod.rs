mod base;
mod make;

pub mod notation;

pub use base::*;
pub use make::{Make, Notation};
