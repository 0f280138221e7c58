pub mod gesture;
pub mod handler;

pub use handler::{Command, InputHandler};
