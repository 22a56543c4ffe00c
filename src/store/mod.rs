//! Asset input and header output on disk

mod asset;
mod output;

pub use asset::{read_asset, strip_leading_bom};
pub use output::{read_existing, write_atomic};
