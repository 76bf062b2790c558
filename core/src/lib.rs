pub mod cli;
pub mod config;
pub mod interpreter;

// Re-export the embedding API
pub use config::{Config, ConfigError};
pub use interpreter::{run, InterpretError, InterpretResult, Program, ReaderInput, VM};
