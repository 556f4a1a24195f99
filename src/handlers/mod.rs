mod board;
mod callback;
mod command;

pub use board::*;
pub use callback::*;
pub use command::*;
