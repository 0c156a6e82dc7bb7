//! Prompt assembly.

pub mod assembler;
pub mod templates;

pub use assembler::PromptAssembler;
pub use templates::{render, Segment, Slot, SlotValues};
