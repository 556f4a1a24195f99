mod types;
mod commands;
mod config;
mod handlers;
mod error;
mod source;
mod state;
mod keyboard;

pub use types::*;
pub use commands::*;
pub use config::*;
pub use handlers::*;
pub use error::*;
pub use source::*;
pub use state::*;
pub use keyboard::*;
