//! Reasoning-engine adapters. The rest of the workspace only sees
//! [`IReasoningEngine`](schemalink_core::traits::IReasoningEngine).

pub mod openai;
pub mod wire;

pub use openai::{OpenAiCompatibleEngine, OpenAiEngineConfig};
