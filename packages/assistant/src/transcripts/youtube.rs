//! YouTube transcript retrieval.
//!
//! Reads the caption track list embedded in the public watch page, picks a
//! track in the preferred language, and downloads its timed-text XML.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::{AssistantError, Result};
use crate::traits::transcript::TranscriptService;
use crate::types::source::TranscriptEntry;

lazy_static! {
    static ref VIDEO_ID: Regex = Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap();
    static ref TIMED_TEXT: Regex =
        Regex::new(r#"(?s)<text start="([^"]*)"(?:\s+dur="([^"]*)")?[^>]*>(.*?)</text>"#).unwrap();
    static ref NUMERIC_ENTITY: Regex = Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").unwrap();
}

/// Transcript service backed by public YouTube caption tracks.
///
/// # Example
///
/// ```rust,ignore
/// use travel_assistant::transcripts::YouTubeTranscriptService;
///
/// let service = YouTubeTranscriptService::new().with_language("fr");
/// let entries = service.fetch("https://www.youtube.com/watch?v=pfdb6u4HDoQ").await?;
/// ```
pub struct YouTubeTranscriptService {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl Default for YouTubeTranscriptService {
    fn default() -> Self {
        Self::new()
    }
}

impl YouTubeTranscriptService {
    /// Create a service preferring English captions.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            base_url: "https://www.youtube.com".to_string(),
            language: "en".to_string(),
        }
    }

    /// Set the preferred caption language (ISO code, e.g. "en", "fr").
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Set a custom base URL (for tests and proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_text(&self, url: &str, video_id: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header("Accept-Language", format!("{},en;q=0.8", self.language))
            .header("Cookie", "CONSENT=YES+cb")
            .send()
            .await
            .map_err(|e| AssistantError::unavailable(video_id, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::unavailable(video_id, format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| AssistantError::unavailable(video_id, e.to_string()))
    }
}

#[async_trait]
impl TranscriptService for YouTubeTranscriptService {
    async fn fetch(&self, identifier: &str) -> Result<Vec<TranscriptEntry>> {
        let video_id = video_id(identifier)
            .ok_or_else(|| AssistantError::unavailable(identifier, "not a YouTube video id or URL"))?;

        debug!(video_id = %video_id, "Fetching caption tracks");
        let watch_url = format!("{}/watch?v={}", self.base_url, video_id);
        let html = self.get_text(&watch_url, &video_id).await?;

        let tracks = caption_tracks(&html);
        let track = select_track(&tracks, &self.language)
            .ok_or_else(|| AssistantError::unavailable(&video_id, "no transcript available"))?;

        let xml = self.get_text(&track.base_url, &video_id).await?;
        let entries = parse_timed_text(&xml);
        if entries.is_empty() {
            warn!(video_id = %video_id, "Caption track is empty");
            return Err(AssistantError::unavailable(&video_id, "transcript is empty"));
        }

        debug!(video_id = %video_id, entries = entries.len(), language = %track.language_code, "Fetched transcript");
        Ok(entries)
    }

    fn name(&self) -> &str {
        "youtube"
    }
}

/// Resolve a bare video id or any common YouTube URL form to the video id.
pub fn video_id(identifier: &str) -> Option<String> {
    let identifier = identifier.trim();
    if VIDEO_ID.is_match(identifier) {
        return Some(identifier.to_string());
    }

    let url = Url::parse(identifier).ok()?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

    let candidate = match host {
        "youtu.be" => url.path_segments()?.next().map(str::to_string),
        "youtube.com" | "music.youtube.com" | "youtube-nocookie.com" => {
            let mut segments = url.path_segments()?;
            match segments.next() {
                Some("watch") => url
                    .query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned()),
                Some("shorts") | Some("embed") | Some("live") | Some("v") => {
                    segments.next().map(str::to_string)
                }
                _ => None,
            }
        }
        _ => None,
    }?;

    VIDEO_ID.is_match(&candidate).then_some(candidate)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Pull the `captionTracks` array out of the watch page's player response.
///
/// The deserializer stops after the array, so the rest of the page is ignored.
fn caption_tracks(html: &str) -> Vec<CaptionTrack> {
    const KEY: &str = "\"captionTracks\":";

    let Some(start) = html.find(KEY).map(|i| i + KEY.len()) else {
        return Vec::new();
    };

    let mut deserializer = serde_json::Deserializer::from_str(&html[start..]);
    Vec::<CaptionTrack>::deserialize(&mut deserializer).unwrap_or_else(|e| {
        warn!(error = %e, "Unparseable caption track list");
        Vec::new()
    })
}

/// Prefer a manual track in the language, then a generated one, then anything.
fn select_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    let matches_lang = |t: &&CaptionTrack| t.language_code.eq_ignore_ascii_case(language);

    tracks
        .iter()
        .filter(matches_lang)
        .find(|t| !t.is_generated())
        .or_else(|| tracks.iter().find(matches_lang))
        .or_else(|| tracks.first())
}

/// Parse timed-text XML into entries, in document order.
fn parse_timed_text(xml: &str) -> Vec<TranscriptEntry> {
    TIMED_TEXT
        .captures_iter(xml)
        .filter_map(|caps| {
            let start = caps.get(1)?.as_str().parse::<f64>().ok()?;
            let duration = caps
                .get(2)
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .unwrap_or(0.0);
            // Caption bodies are entity-escaped twice
            let text = decode_entities(&decode_entities(caps.get(3)?.as_str()));
            let text = text.trim();
            (!text.is_empty()).then(|| TranscriptEntry::new(text, start, duration))
        })
        .collect()
}

fn decode_entities(s: &str) -> String {
    let named = s
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ");

    let numeric = NUMERIC_ENTITY.replace_all(&named, |caps: &regex::Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    // Ampersand last so "&amp;lt;" decodes one level per pass
    numeric.replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_id_forms() {
        let id = Some("pfdb6u4HDoQ".to_string());
        assert_eq!(video_id("pfdb6u4HDoQ"), id);
        assert_eq!(video_id("https://www.youtube.com/watch?v=pfdb6u4HDoQ"), id);
        assert_eq!(video_id("https://youtube.com/watch?feature=share&v=pfdb6u4HDoQ"), id);
        assert_eq!(video_id("https://m.youtube.com/watch?v=pfdb6u4HDoQ&t=42"), id);
        assert_eq!(video_id("https://youtu.be/pfdb6u4HDoQ?si=abc"), id);
        assert_eq!(video_id("https://www.youtube.com/shorts/pfdb6u4HDoQ"), id);
        assert_eq!(video_id("https://www.youtube.com/embed/pfdb6u4HDoQ"), id);
    }

    #[test]
    fn test_invalid_video_ids() {
        assert_eq!(video_id("not a video"), None);
        assert_eq!(video_id("https://vimeo.com/12345678901"), None);
        assert_eq!(video_id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(video_id(""), None);
    }

    #[test]
    fn test_caption_tracks_from_player_response() {
        let html = r#"<script>var ytInitialPlayerResponse = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=fr","name":{"runs":[{"text":"French"}]},"languageCode":"fr"},{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en&kind=asr","name":{"runs":[{"text":"English (auto)"}]},"languageCode":"en","kind":"asr"}],"audioTracks":[]}}};</script>"#;

        let tracks = caption_tracks(html);
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].language_code, "fr");
        assert!(tracks[0].base_url.contains("&lang=fr"));
        assert!(tracks[1].is_generated());

        let en = select_track(&tracks, "en").unwrap();
        assert_eq!(en.language_code, "en");

        let fallback = select_track(&tracks, "de").unwrap();
        assert_eq!(fallback.language_code, "fr");
    }

    #[test]
    fn test_caption_tracks_with_brackets_in_names() {
        let html = r#"{"captionTracks":[{"baseUrl":"https://example.com/t?a=[1]","name":{"simpleText":"English ] {auto} \"quoted\""},"languageCode":"en"}],"translationLanguages":[{"languageCode":"de"}]}"#;

        let tracks = caption_tracks(html);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].base_url, "https://example.com/t?a=[1]");
        assert_eq!(tracks[0].language_code, "en");
    }

    #[test]
    fn test_truncated_caption_tracks_are_empty() {
        let html = r#"{"captionTracks":[{"baseUrl":"https://example.com/t","languageCode":"en""#;
        assert!(caption_tracks(html).is_empty());
    }

    #[test]
    fn test_no_caption_tracks() {
        assert!(caption_tracks("<html>no captions here</html>").is_empty());
        assert!(select_track(&[], "en").is_none());
    }

    #[test]
    fn test_parse_timed_text() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0.5" dur="2.1">Visit the Eiffel Tower</text><text start="2.6" dur="1.4">at sunset.</text><text start="4.0" dur="1.0">   </text><text start="5.0">rock &amp;amp; roll &amp;#39;n&amp;#39; more</text></transcript>"#;

        let entries = parse_timed_text(xml);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], TranscriptEntry::new("Visit the Eiffel Tower", 0.5, 2.1));
        assert_eq!(entries[1].text, "at sunset.");
        assert_eq!(entries[2].text, "rock & roll 'n' more");
        assert_eq!(entries[2].duration, 0.0);
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt;b&gt; &quot;c&quot;"), "a <b> \"c\"");
        assert_eq!(decode_entities("caf&#233; &#x41;"), "café A");
    }

    #[tokio::test]
    async fn test_invalid_identifier_is_unavailable() {
        let service = YouTubeTranscriptService::new().with_base_url("http://127.0.0.1:9");
        let err = service.fetch("definitely not a video").await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::SourceUnavailable);
    }
}
