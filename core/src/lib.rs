pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod llm;
