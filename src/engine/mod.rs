pub mod client;
mod eval;
mod gen;

pub use client::{CliLlmClient, JudgeResponse, LlmClient};
pub use eval::EvalEngine;
pub use gen::GenEngine;
