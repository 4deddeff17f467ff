pub mod cli;
pub mod config;
pub mod server;

pub use cli::*;
pub use config::*;
pub use server::*;
