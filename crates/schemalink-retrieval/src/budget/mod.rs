//! Token-budget packing of fused chunks.

pub mod packer;

pub use packer::{pack, PackedContext};
