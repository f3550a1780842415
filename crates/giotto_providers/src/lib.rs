//! Concrete provider backends for the giotto bot.
//!
//! Content generation (OpenAI, Gemini), image generation (OpenAI, local
//! placeholder cards), and publishing (Twitter/X, no-op). Each backend
//! implements the matching `giotto_interface` trait, so the scheduler never
//! depends on any of them directly.

#![forbid(unsafe_code)]

mod card;
mod gemini;
mod noop;
mod openai;
mod prompt;
mod storage;
mod twitter;

pub use card::PlaceholderCardProvider;
pub use gemini::GeminiContentProvider;
pub use noop::NoOpPublisher;
pub use openai::{OpenAiContentProvider, OpenAiImageProvider};
pub use prompt::{PromptSettings, strip_hashtags, truncate_preserving_hashtags};
pub use twitter::TwitterPublisher;
