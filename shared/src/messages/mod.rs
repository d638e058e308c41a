mod player;
mod presentation;

pub use player::*;
pub use presentation::*;
