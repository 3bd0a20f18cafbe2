pub mod handler;

pub use handler::{InputHandler, KeyAction, NameKey, MAX_NAME_LEN};
