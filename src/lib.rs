pub mod cli;
pub mod config;
pub mod llm;
pub mod planner;
pub mod server;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use server::serve;
