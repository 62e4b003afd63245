pub mod cli;
pub mod config;
pub mod error;
pub mod identifier;
pub mod knowledge;
pub mod logging;
pub mod normalizer;
pub mod recognizer;
pub mod report;
pub mod scanner;
