//! Prompt construction and post-text shaping.

use derive_getters::Getters;
use giotto_core::ContentStyle;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Settings controlling what the content and image providers are asked for.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct PromptSettings {
    /// Account theme woven into every prompt.
    #[builder(default = default_theme())]
    #[serde(default = "default_theme")]
    theme: String,

    /// Longer description of the theme, given to the model as context.
    #[builder(default = default_description())]
    #[serde(default = "default_description")]
    description: String,

    /// Whether the bot posts quotes or micro-stories.
    #[builder(default)]
    #[serde(default)]
    style: ContentStyle,

    /// Visual style requested from the image model.
    #[builder(default = default_image_style())]
    #[serde(default = "default_image_style")]
    image_style: String,

    /// Character limit for generated posts.
    #[builder(default = default_max_length())]
    #[serde(default = "default_max_length")]
    max_length: usize,

    /// Sampling temperature for text generation.
    #[builder(default = default_temperature())]
    #[serde(default = "default_temperature")]
    temperature: f32,
}

fn default_theme() -> String {
    "ignorant strength".to_string()
}

fn default_description() -> String {
    "Finding power in not knowing everything: embracing uncertainty, \
     learning from failure, and drawing strength from humility."
        .to_string()
}

fn default_image_style() -> String {
    "minimalist, inspirational".to_string()
}

fn default_max_length() -> usize {
    200
}

fn default_temperature() -> f32 {
    0.8
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PromptSettings {
    /// System prompt matching the configured content style.
    pub fn system_prompt(&self) -> String {
        match self.style {
            ContentStyle::Quote => {
                "You are a wise philosopher who creates inspiring quotes about \
                 finding strength in humility and growth through not knowing."
                    .to_string()
            }
            ContentStyle::Story => {
                "You are a creative storyteller who writes engaging, concise \
                 stories that capture readers' imagination in just a few \
                 sentences, ranging from fantasy to slice-of-life, humor to \
                 mystery."
                    .to_string()
            }
        }
    }

    /// User prompt for a generation request.
    pub fn user_prompt(&self, topic_hint: &str) -> String {
        let what = match self.style {
            ContentStyle::Quote => "an inspirational quote",
            ContentStyle::Story => "a complete micro-story",
        };

        format!(
            "Write {what} that embodies the concept of \"{theme}\".\n\n\
             Theme description: {description}\n\n\
             Topic hint: {topic_hint}\n\n\
             Requirements:\n\
             - Maximum {max} characters\n\
             - Thought-provoking and suitable for social media\n\
             - End with two or three relevant hashtags\n\n\
             Return only the text with hashtags, nothing else.",
            what = what,
            theme = self.theme,
            description = self.description.trim(),
            topic_hint = topic_hint,
            max = self.max_length,
        )
    }

    /// Prompt for the image model, built from already-cleaned post text.
    pub fn image_prompt(&self, text: &str) -> String {
        format!(
            "Create a {style} image that visually represents this text: \
             \"{text}\". Use calming, powerful colors, a clean modern \
             aesthetic, and minimal or no text overlay. The image should be \
             suitable for social media sharing.",
            style = self.image_style,
            text = text,
        )
    }
}

/// Remove hashtag words from post text.
///
/// Used before the text reaches an image prompt or a rendered card.
pub fn strip_hashtags(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| !word.starts_with('#'))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate text to a character limit, keeping trailing hashtags intact when
/// enough room remains for a meaningful body.
pub fn truncate_preserving_hashtags(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let tag_start = words
        .iter()
        .rposition(|w| !w.starts_with('#'))
        .map(|i| i + 1)
        .unwrap_or(0);

    if tag_start < words.len() {
        let body = words[..tag_start].join(" ");
        let hashtags = words[tag_start..].join(" ");
        let tag_chars = hashtags.chars().count();

        if max_chars > tag_chars + 1 {
            let available = max_chars - tag_chars - 1;
            if available > 50 {
                return format!("{} {}", truncate_at_word(&body, available), hashtags);
            }
        }
    }

    format!("{}...", truncate_at_word(text, max_chars.saturating_sub(3)))
}

/// Cut text to at most `max_chars` characters at a word boundary.
fn truncate_at_word(text: &str, max_chars: usize) -> &str {
    if text.chars().count() <= max_chars {
        return text.trim_end();
    }

    let byte_limit = text
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let slice = &text[..byte_limit];

    match slice.rfind(' ') {
        Some(space) => slice[..space].trim_end(),
        None => slice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        let text = "Short and sweet. #Tiny";
        assert_eq!(truncate_preserving_hashtags(text, 200), text);
    }

    #[test]
    fn truncation_preserves_trailing_hashtags() {
        let body = "word ".repeat(60);
        let text = format!("{body}#Wisdom #Growth");
        let out = truncate_preserving_hashtags(&text, 120);

        assert!(out.chars().count() <= 120);
        assert!(out.ends_with("#Wisdom #Growth"));
        assert!(!out.contains("  "));
    }

    #[test]
    fn truncation_without_hashtags_adds_ellipsis() {
        let text = "word ".repeat(60);
        let out = truncate_preserving_hashtags(&text, 80);

        assert!(out.chars().count() <= 80);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn truncation_cuts_at_word_boundaries() {
        let text = format!("{} {}", "a".repeat(70), "b".repeat(70));
        let out = truncate_preserving_hashtags(&text, 100);
        assert!(out.starts_with(&"a".repeat(70)));
        assert!(!out.contains('b'));
    }

    #[test]
    fn strip_hashtags_removes_tag_words_only() {
        let text = "The plants plotted quietly. #Plants #Humor";
        assert_eq!(strip_hashtags(text), "The plants plotted quietly.");
    }

    #[test]
    fn prompts_mention_theme_and_limit() {
        let settings = PromptSettings::default();
        let prompt = settings.user_prompt("growth");
        assert!(prompt.contains("ignorant strength"));
        assert!(prompt.contains("200 characters"));
        assert!(prompt.contains("growth"));
    }

    #[test]
    fn story_style_changes_system_prompt() {
        let quote = PromptSettings::default();
        let story = PromptSettings::builder()
            .style(giotto_core::ContentStyle::Story)
            .build();
        assert_ne!(quote.system_prompt(), story.system_prompt());
    }
}
