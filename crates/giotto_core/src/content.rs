//! Generated content types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The kind of text the bot generates and posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStyle {
    /// Short inspirational quotes.
    #[default]
    Quote,
    /// Micro-fiction stories.
    Story,
}

/// Media formats the bot produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    /// Raster image from an image-generation API.
    Png,
    /// Locally rendered placeholder card.
    Svg,
}

impl MediaType {
    /// MIME type for upload requests.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }
}

/// A media file produced for a post.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MediaArtifact {
    /// Location of the file on disk.
    path: PathBuf,
    /// Format of the file.
    media_type: MediaType,
}

impl MediaArtifact {
    /// Create a media artifact.
    pub fn new(path: impl Into<PathBuf>, media_type: MediaType) -> Self {
        Self {
            path: path.into(),
            media_type,
        }
    }
}

/// Text plus optional media, ready for the publish step.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PostContent {
    /// The post text.
    text: String,
    /// Accompanying media, when generation (or its fallback) produced one.
    media: Option<MediaArtifact>,
}

impl PostContent {
    /// Text-only content.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            media: None,
        }
    }

    /// Content with a media attachment.
    pub fn with_media(text: impl Into<String>, media: MediaArtifact) -> Self {
        Self {
            text: text.into(),
            media: Some(media),
        }
    }
}
