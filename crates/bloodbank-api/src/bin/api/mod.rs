pub mod cli;
pub mod signals;

pub use cli::Args;
pub use signals::shutdown_signal;
