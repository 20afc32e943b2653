//! Wardrobe LLM - Provider abstraction and usage budget
//!
//! This crate provides the LLM plumbing for the wardrobe assistant:
//! - Provider: `LlmProvider` trait, OpenAI implementation and a mock
//! - Cost: per-model rate table and cost estimation from token usage
//! - Usage: rolling hourly/daily counters and a monthly cost ceiling that
//!   gate every outbound model call

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod completion;
pub mod cost;
pub mod error;
pub mod message;
pub mod mock;
pub mod openai;
pub mod provider;
pub mod usage;
pub mod util;

pub use completion::{CompletionRequest, CompletionResponse, ResponseFormat, TokenUsage};
pub use cost::{CostEstimator, CostRecord, ModelRates, RateTable, DEFAULT_MODEL};
pub use error::{Error, Result};
pub use message::{Message, MessageRole};
pub use mock::MockProvider;
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use provider::LlmProvider;
pub use usage::{
    BoundaryCrossings, Clock, DenialReason, ManualClock, RequestOutcome, SystemClock,
    UsageLimits, UsageSnapshot, UsageTracker, UsageWindow,
};
