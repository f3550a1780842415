//! Twitter/X publisher.

use async_trait::async_trait;
use giotto_core::{MediaArtifact, PostContent, RemotePostId};
use giotto_error::{PublishError, PublishErrorKind};
use giotto_interface::Publisher;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

const TWEET_URL: &str = "https://api.x.com/2/tweets";
const MEDIA_UPLOAD_URL: &str = "https://api.x.com/2/media/upload";
const VERIFY_URL: &str = "https://api.x.com/2/users/me";

/// Publishes posts through the Twitter/X v2 API.
///
/// Media is uploaded first when present; an upload failure degrades the post
/// to text-only rather than failing the cycle, matching the platform's
/// optional-media semantics.
#[derive(Debug, Clone)]
pub struct TwitterPublisher {
    client: Client,
    bearer_token: String,
}

impl TwitterPublisher {
    /// Create a publisher from an OAuth 2.0 user-context bearer token.
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            bearer_token: bearer_token.into(),
        }
    }

    /// Upload one media file, returning the platform media id.
    async fn upload_media(&self, artifact: &MediaArtifact) -> Result<String, PublishError> {
        let bytes = tokio::fs::read(artifact.path()).await.map_err(|e| {
            PublishError::new(PublishErrorKind::MediaUpload(format!(
                "read {}: {}",
                artifact.path().display(),
                e
            )))
        })?;

        let file_name = artifact
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "media".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(artifact.media_type().mime_type())
            .map_err(|e| PublishError::new(PublishErrorKind::MediaUpload(e.to_string())))?;

        let form = Form::new()
            .part("media", part)
            .text("media_category", "tweet_image");

        let response = self
            .client
            .post(MEDIA_UPLOAD_URL)
            .bearer_auth(&self.bearer_token)
            .multipart(form)
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let parsed: MediaUploadResponse = response
            .json()
            .await
            .map_err(|e| PublishError::new(PublishErrorKind::MediaUpload(e.to_string())))?;

        debug!(media_id = %parsed.data.id, "Media uploaded");
        Ok(parsed.data.id)
    }
}

#[async_trait]
impl Publisher for TwitterPublisher {
    #[instrument(skip(self, content), fields(text_len = content.text().len()))]
    async fn publish(&self, content: &PostContent) -> Result<RemotePostId, PublishError> {
        let media_ids = match content.media() {
            Some(artifact) => match self.upload_media(artifact).await {
                Ok(id) => Some(vec![id]),
                Err(e) => {
                    warn!(error = %e, "Media upload failed, posting text-only");
                    None
                }
            },
            None => None,
        };

        let request = TweetRequest {
            text: content.text(),
            media: media_ids.map(|media_ids| TweetMedia { media_ids }),
        };

        let response = self
            .client
            .post(TWEET_URL)
            .bearer_auth(&self.bearer_token)
            .json(&request)
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            let err = error_from_response(response).await;
            error!(error = %err, "Tweet creation failed");
            return Err(err);
        }

        let parsed: TweetResponse = response.json().await.map_err(|e| {
            PublishError::new(PublishErrorKind::Api {
                status: 200,
                message: format!("unparseable response: {}", e),
            })
        })?;

        debug!(tweet_id = %parsed.data.id, "Tweet posted");
        Ok(RemotePostId(parsed.data.id))
    }

    #[instrument(skip(self))]
    async fn verify_connection(&self) -> Result<(), PublishError> {
        let response = self
            .client
            .get(VERIFY_URL)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        debug!("Twitter credentials verified");
        Ok(())
    }

    fn platform_name(&self) -> &'static str {
        "twitter"
    }
}

/// Map a transport-level failure (connect, DNS, timeout) to a network error.
fn map_transport(e: reqwest::Error) -> PublishError {
    PublishError::new(PublishErrorKind::Network(e.to_string()))
}

/// Classify a non-success response into the publish failure taxonomy.
async fn error_from_response(response: reqwest::Response) -> PublishError {
    let status = response.status().as_u16();
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    let message = response.text().await.unwrap_or_default();

    PublishError::new(classify(status, retry_after, message))
}

fn classify(status: u16, retry_after: Option<u64>, message: String) -> PublishErrorKind {
    match status {
        401 | 403 => PublishErrorKind::Authentication(message),
        429 => PublishErrorKind::RateLimited {
            retry_after_seconds: retry_after,
        },
        _ => PublishErrorKind::Api { status, message },
    }
}

#[derive(Debug, Serialize)]
struct TweetRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<TweetMedia>,
}

#[derive(Debug, Serialize)]
struct TweetMedia {
    media_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TweetResponse {
    data: TweetData,
}

#[derive(Debug, Deserialize)]
struct TweetData {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MediaUploadResponse {
    data: MediaUploadData,
}

#[derive(Debug, Deserialize)]
struct MediaUploadData {
    id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_and_forbidden_are_authentication() {
        let err = PublishError::new(classify(401, None, "bad token".to_string()));
        assert!(err.is_authentication());

        let err = PublishError::new(classify(403, None, "suspended".to_string()));
        assert!(err.is_authentication());
    }

    #[test]
    fn too_many_requests_is_rate_limited_with_retry_hint() {
        let kind = classify(429, Some(900), String::new());
        assert_eq!(
            kind,
            PublishErrorKind::RateLimited {
                retry_after_seconds: Some(900)
            }
        );
    }

    #[test]
    fn other_statuses_are_generic_api_failures() {
        let err = PublishError::new(classify(503, None, "over capacity".to_string()));
        assert!(!err.is_authentication());
        assert!(!err.is_rate_limited());
        assert!(!err.is_network());
    }

    #[test]
    fn text_only_request_omits_media_key() {
        let request = TweetRequest {
            text: "hello",
            media: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"text":"hello"}"#);
    }

    #[test]
    fn request_with_media_includes_ids() {
        let request = TweetRequest {
            text: "hello",
            media: Some(TweetMedia {
                media_ids: vec!["77".to_string()],
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["media"]["media_ids"][0], "77");
    }
}
