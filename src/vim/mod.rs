mod command;
mod input;
mod mode;

pub use command::{Command, parse_command};
pub use input::InputBuffer;
pub use mode::{ModeAction, VimMode};
