//! Built-in fallback texts for degraded content providers.

use crate::ContentStyle;

/// Quotes used when the content provider fails.
const FALLBACK_QUOTES: &[&str] = &[
    "Strength isn't knowing everything; it's knowing when you don't know enough. #IgnorantStrength #Wisdom #Growth",
    "The wisest person admits their ignorance and grows from it. #Humility #Learning #Strength",
    "True power comes from embracing what you don't understand. #IgnorantStrength #Mindset #Growth",
    "In uncertainty, we find our greatest opportunities for growth. #Uncertainty #Strength #Learning",
    "The courage to say 'I don't know' is the beginning of wisdom. #Courage #Wisdom #IgnorantStrength",
];

/// Stories used when the content provider fails.
const FALLBACK_STORIES: &[&str] = &[
    "She opened the old music box. Instead of a ballerina, a tiny dragon emerged, yawned, and asked for coffee. 'Mondays,' it muttered. #TinyTales #Fantasy #MondayMood",
    "The last library on Earth had one visitor daily - a robot learning to read bedtime stories to mechanical children. #SciFi #Hope #Books",
    "He found a vending machine selling 'Lost Memories' for $1.50. His childhood summers cost extra. #Memory #Mystery #Life",
    "The time traveler's biggest problem wasn't paradoxes - it was remembering which century required which social media platform. #TimeTravel #Comedy #SocialMedia",
    "Every night at 3 AM, the houseplants gossiped about their owners. Tonight, they planned an intervention. #Plants #Humor #Mystery",
];

/// A deterministic pool of locally available post texts.
///
/// Selection is by index, not randomness, so a cycle degraded by a provider
/// outage produces the same text given the same history state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPool {
    texts: Vec<String>,
}

impl FallbackPool {
    /// Build a pool from custom texts.
    ///
    /// An empty list falls back to the built-in quote pool so selection is
    /// always possible.
    pub fn new(texts: Vec<String>) -> Self {
        if texts.is_empty() {
            return Self::quotes();
        }
        Self { texts }
    }

    /// The built-in quote pool.
    pub fn quotes() -> Self {
        Self {
            texts: FALLBACK_QUOTES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The built-in story pool.
    pub fn stories() -> Self {
        Self {
            texts: FALLBACK_STORIES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The built-in pool matching a content style.
    pub fn for_style(style: ContentStyle) -> Self {
        match style {
            ContentStyle::Quote => Self::quotes(),
            ContentStyle::Story => Self::stories(),
        }
    }

    /// Pick a text deterministically from a seed (e.g. records posted so far).
    pub fn select(&self, seed: usize) -> &str {
        &self.texts[seed % self.texts.len()]
    }

    /// Number of texts in the pool.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Check whether the pool is empty (never true for constructed pools).
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}
