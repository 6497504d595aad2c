mod summarizer;

use std::sync::Arc;

use crate::db::Repository;
use crate::error::Result;
use crate::services::PageFetcher;

pub use summarizer::Summarizer;

/// Produces a summary for a URL and stores it. Runs detached from the
/// request that scheduled it; every failure is logged and swallowed.
pub struct SummaryGenerator {
    fetcher: PageFetcher,
    summarizer: Option<Summarizer>,
}

impl SummaryGenerator {
    pub fn new(claude_api_key: Option<String>) -> Self {
        Self {
            fetcher: PageFetcher::new(),
            summarizer: claude_api_key.map(Summarizer::new),
        }
    }

    /// Fetch the page, summarize it, and store the result for `id`.
    pub async fn run(&self, repository: &Repository, id: i64, url: &str) -> Result<()> {
        let Some(text) = self.fetcher.fetch_text(url).await? else {
            tracing::debug!("No readable content at {}, skipping summary {}", url, id);
            return Ok(());
        };

        let summary = match &self.summarizer {
            Some(summarizer) => summarizer.generate_summary(url, &text).await?,
            None => excerpt(&text),
        };

        repository.set_generated_summary(id, summary).await?;
        tracing::debug!("Stored generated summary for {}", id);
        Ok(())
    }

    /// Schedule generation for a freshly created record. The task outcome is
    /// never awaited by the caller.
    pub fn spawn(self: &Arc<Self>, repository: Arc<Repository>, id: i64, url: String) {
        let generator = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = generator.run(&repository, id, &url).await {
                tracing::warn!("Summary generation failed for {} ({}): {}", id, url, e);
            }
        });
    }
}

/// Extractive fallback when no API key is configured: the first ~500 chars
/// of page text, cut at a sentence boundary where possible.
fn excerpt(text: &str) -> String {
    if text.len() <= 500 {
        return text.to_string();
    }
    let mut end = 500;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let head = &text[..end];
    match head.rfind(['.', '!', '?']) {
        Some(pos) => head[..=pos].to_string(),
        None => head.to_string(),
    }
}
