//! Local placeholder-card rendering.
//!
//! When image generation degrades, the bot still posts with a simple text
//! card rendered as SVG. No network, no fonts, no raster pipeline: the card
//! is deterministic and always available.

use crate::prompt::strip_hashtags;
use crate::storage::write_atomic;
use async_trait::async_trait;
use giotto_core::{MediaArtifact, MediaType};
use giotto_error::ProviderError;
use giotto_interface::MediaProvider;
use std::path::PathBuf;

const CARD_SIZE: u32 = 1080;
const MARGIN: u32 = 100;
const FONT_SIZE: u32 = 48;
const LINE_HEIGHT: u32 = 58;
const WRAP_CHARS: usize = 36;

const BACKGROUND: &str = "rgb(25,35,50)";
const TEXT_COLOR: &str = "rgb(255,255,255)";
const BORDER_COLOR: &str = "rgb(100,110,130)";

/// Media provider that renders the post text onto a fixed-size SVG card.
#[derive(Debug, Clone)]
pub struct PlaceholderCardProvider {
    output_dir: PathBuf,
}

impl PlaceholderCardProvider {
    /// Create a provider writing cards under the given directory.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl MediaProvider for PlaceholderCardProvider {
    #[tracing::instrument(skip(self, text))]
    async fn create_image(
        &self,
        text: &str,
        output_hint: &str,
    ) -> Result<MediaArtifact, ProviderError> {
        let display = strip_hashtags(text);
        let svg = render_card(&display);

        let path = self.output_dir.join(format!("{output_hint}_card.svg"));
        write_atomic(&path, svg.as_bytes()).await?;

        tracing::info!(path = %path.display(), "Rendered placeholder card");
        Ok(MediaArtifact::new(path, MediaType::Svg))
    }

    fn provider_name(&self) -> &'static str {
        "placeholder"
    }
}

/// Render display text into a centered SVG card.
fn render_card(text: &str) -> String {
    let lines = wrap_words(text, WRAP_CHARS);
    let block_height = lines.len() as u32 * LINE_HEIGHT;
    let start_y = (CARD_SIZE.saturating_sub(block_height)) / 2 + FONT_SIZE;

    let mut spans = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = start_y + i as u32 * LINE_HEIGHT;
        spans.push_str(&format!(
            r#"  <text x="{x}" y="{y}" text-anchor="middle" font-family="sans-serif" font-size="{size}" fill="{color}">{line}</text>
"#,
            x = CARD_SIZE / 2,
            y = y,
            size = FONT_SIZE,
            color = TEXT_COLOR,
            line = escape_xml(line),
        ));
    }

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">
  <rect width="{size}" height="{size}" fill="{background}"/>
  <rect x="{margin}" y="{margin}" width="{inner}" height="3" fill="{border}"/>
  <rect x="{margin}" y="{bottom}" width="{inner}" height="3" fill="{border}"/>
{spans}</svg>
"#,
        size = CARD_SIZE,
        background = BACKGROUND,
        margin = MARGIN / 2,
        inner = CARD_SIZE - MARGIN,
        bottom = CARD_SIZE - MARGIN / 2 - 3,
        border = BORDER_COLOR,
        spans = spans,
    )
}

/// Greedy word wrap to a character budget per line.
fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn wrap_respects_budget() {
        let lines = wrap_words("one two three four five six seven", 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.join(" "), "one two three four five six seven");
    }

    #[test]
    fn wrap_keeps_overlong_word_on_its_own_line() {
        let lines = wrap_words("tiny extraordinarily-long-word tiny", 10);
        assert_eq!(lines[1], "extraordinarily-long-word");
    }

    #[test]
    fn card_escapes_markup() {
        let svg = render_card("a < b & c");
        assert!(svg.contains("a &lt; b &amp; c"));
    }

    #[tokio::test]
    async fn card_is_written_without_hashtags() {
        let dir = TempDir::new().unwrap();
        let provider = PlaceholderCardProvider::new(dir.path());

        let artifact = provider
            .create_image("The dragon asked for coffee. #TinyTales #Fantasy", "post_1")
            .await
            .unwrap();

        assert_eq!(*artifact.media_type(), MediaType::Svg);
        let svg = tokio::fs::read_to_string(artifact.path()).await.unwrap();
        assert!(svg.contains("The dragon asked for coffee."));
        assert!(!svg.contains("#TinyTales"));
        assert!(!artifact.path().with_extension("tmp").exists());
    }
}
