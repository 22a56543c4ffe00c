//! payload-embed - Build-time generator that embeds a text payload into a C++ header

pub mod config;
pub mod error;
pub mod types;

pub mod embed;
pub mod store;

pub use config::Config;
pub use embed::{embed_file, Embedder};
pub use error::{Error, Result};
pub use types::*;
