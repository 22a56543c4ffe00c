//! Payload chunking and header generation

mod chunker;
mod embedder;
mod generator;
pub mod literal;
mod reconstruct;

pub use chunker::{chunk_count, chunk_text, Chunker};
pub use embedder::{embed_file, Embedder};
pub use generator::{render, GeneratedUnit, RenderOptions};
pub use literal::find_collision;
pub use reconstruct::{extract_literals, reconstruct};
