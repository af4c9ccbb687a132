//! Input bounds for inference calls.
//!
//! Hosted models reject or silently drop input past their context size.
//! Summarization chunk-and-reduces oversized text; answering truncates it.

use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;

use tracing::debug;

use crate::error::{AssistantError, Result};

/// Reduce passes attempted before falling back to truncation.
pub const MAX_REDUCE_ROUNDS: usize = 3;

/// Chunk summaries in flight at once during a reduce pass.
pub const CHUNK_CONCURRENCY: usize = 4;

/// Truncate to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Split text into whitespace-delimited chunks of at most `max_chars` characters.
///
/// Words longer than the bound are split mid-word.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { word_len + 1 };
        if current_len + needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Summarize `text` without ever sending more than `max_chars` in one call.
///
/// Oversized input is split into chunks, up to [`CHUNK_CONCURRENCY`] chunks
/// summarized at once, and the partial summaries joined in chunk order and
/// fed back in until they fit. If reduction stops shrinking the text, or the
/// round limit is hit, the remainder is truncated. Blank input fails without
/// calling the backend.
pub async fn summarize_bounded<F, Fut>(text: &str, max_chars: usize, mut summarize: F) -> Result<String>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    if text.trim().is_empty() {
        return Err(AssistantError::inference("no text to summarize"));
    }

    let mut current = text.to_string();

    for round in 0..MAX_REDUCE_ROUNDS {
        let len = current.chars().count();
        if len <= max_chars {
            return summarize(current).await;
        }

        let chunks = chunk_text(&current, max_chars);
        debug!(round, chars = len, chunks = chunks.len(), "Reducing oversized input");

        let partials: Vec<String> = stream::iter(chunks)
            .map(&mut summarize)
            .buffered(CHUNK_CONCURRENCY)
            .try_collect()
            .await?;

        let reduced = partials.join("\n");
        let shrank = reduced.chars().count() < len;
        current = reduced;
        if !shrank {
            break;
        }
    }

    summarize(truncate_chars(&current, max_chars).to_string()).await
}
