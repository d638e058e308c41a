pub mod data;
pub mod frame;
pub mod keyboard;
