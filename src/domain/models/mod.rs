mod action;
mod author;
mod backend;
mod document;
mod error;
mod event;
mod message;
mod quiz;
mod renderer;
mod slash_commands;

pub use action::*;
pub use author::*;
pub use backend::*;
pub use document::*;
pub use error::*;
pub use event::*;
pub use message::*;
pub use quiz::*;
pub use renderer::*;
pub use slash_commands::*;
