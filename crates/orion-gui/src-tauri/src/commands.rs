pub mod common;
pub mod window;
