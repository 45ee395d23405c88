pub mod commands;
pub mod handlers;

pub use commands::{CliArgs, Commands, GenerateArgs};
pub use handlers::{handle_generate, handle_init_config};
