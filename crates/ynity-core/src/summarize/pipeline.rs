//! Chunk -> summarize -> merge summarization job.
//!
//! Chunks are summarized strictly one after another, then the partial
//! summaries are merged by a final call. Every call shares the same
//! rate-limit policy: sleep for the hinted duration and retry the same
//! request. Any other failure ends the job with no partial result.

use std::time::Duration;

use tracing::{debug, info, warn};

use ynity_types::config::SummarizerConfig;
use ynity_types::error::{CompletionError, SummarizeError};
use ynity_types::summary::{JobPhase, SummarizationJob, SummaryMode};

use super::backoff::retry_after;
use super::chunker::chunk_text;
use super::completion::CompletionClient;

/// Texts shorter than this (in characters) are rejected before any call.
pub const MIN_SOURCE_CHARS: usize = 50;

/// Separator placed between partial summaries in the merge prompt.
pub const MERGE_DELIMITER: &str = "\n\n---\n\n";

/// Used when the configured default wait is negative, NaN or too large.
const FALLBACK_RETRY: Duration = Duration::from_secs(5);

/// System prompt sent with every summarization call.
const SYSTEM_PROMPT: &str =
    "You are an expert in academic synthesis. Summarize with headings, bullet points and examples.";

/// Tunables for one pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub chunk_size: usize,
    pub default_retry: Duration,
    /// `None` retries rate-limited calls forever.
    pub max_rate_limit_retries: Option<u32>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&SummarizerConfig::default())
    }
}

impl From<&SummarizerConfig> for PipelineSettings {
    fn from(config: &SummarizerConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            default_retry: Duration::try_from_secs_f64(config.default_retry_secs)
                .unwrap_or(FALLBACK_RETRY),
            max_rate_limit_retries: config.max_rate_limit_retries,
        }
    }
}

/// Summarizes long documents through a rate-limited completion backend.
pub struct SummarizationPipeline<C: CompletionClient> {
    client: C,
    settings: PipelineSettings,
}

impl<C: CompletionClient> SummarizationPipeline<C> {
    pub fn new(client: C, settings: PipelineSettings) -> Self {
        Self { client, settings }
    }

    /// Summarize `text` in the given mode.
    #[tracing::instrument(
        name = "summarize",
        skip(self, text),
        fields(source_chars = text.chars().count())
    )]
    pub async fn summarize(&self, text: &str, mode: SummaryMode) -> Result<String, SummarizeError> {
        if text.chars().count() < MIN_SOURCE_CHARS {
            return Err(SummarizeError::Validation(
                "Text too short to summarize".to_string(),
            ));
        }

        let mut job = SummarizationJob::new(text, mode);
        match self.run(&mut job).await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                let phase = job.phase;
                job.phase = JobPhase::Failed;
                warn!(%phase, error = %e, "Summarization failed");
                Err(SummarizeError::Upstream(e))
            }
        }
    }

    async fn run(&self, job: &mut SummarizationJob<'_>) -> Result<String, CompletionError> {
        job.phase = JobPhase::Chunking;
        job.chunks = chunk_text(job.source, self.settings.chunk_size);
        info!(chunks = job.chunks.len(), mode = %job.mode, "Text split into chunks");

        for i in 0..job.chunks.len() {
            job.phase = JobPhase::SummarizingChunk(i);
            debug!(chunk = i + 1, total = job.chunks.len(), "Summarizing chunk");
            let prompt = chunk_prompt(job.mode, job.chunks[i]);
            let partial = self.call_with_backoff(&prompt, job.phase).await?;
            job.partial_summaries.push(partial);
        }

        job.phase = JobPhase::Merging;
        let merged = self
            .call_with_backoff(&merge_prompt(&job.partial_summaries), job.phase)
            .await?;

        job.final_summary = Some(merged.clone());
        job.phase = JobPhase::Done;
        Ok(merged)
    }

    /// One completion call, retried for as long as the backend rate-limits it.
    async fn call_with_backoff(
        &self,
        prompt: &str,
        phase: JobPhase,
    ) -> Result<String, CompletionError> {
        let mut retries: u32 = 0;
        loop {
            match self.client.complete(SYSTEM_PROMPT, prompt).await {
                Ok(text) => return Ok(text),
                Err(CompletionError::RateLimited { detail }) => {
                    if let Some(max) = self.settings.max_rate_limit_retries {
                        if retries >= max {
                            return Err(CompletionError::RateLimited { detail });
                        }
                    }
                    retries += 1;
                    let wait = retry_after(&detail, self.settings.default_retry);
                    warn!(%phase, wait_secs = wait.as_secs_f64(), retries, "Rate limited, backing off");
                    tokio::time::sleep(wait).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Prompt for one chunk: the mode's instruction followed by the chunk text.
pub fn chunk_prompt(mode: SummaryMode, chunk: &str) -> String {
    format!("{}\n\nSummary of this part:\n\n{chunk}", mode.instruction())
}

/// Prompt for the final merge of all partial summaries.
pub fn merge_prompt(partials: &[String]) -> String {
    format!(
        "Merge these partial summaries into one clear, coherent, structured summary:\n\
         \n\
         {}\n\
         \n\
         Expected format:\n\
         - Introduction\n\
         - Structured key points\n\
         - Concrete example\n\
         - Short conclusion\n",
        partials.join(MERGE_DELIMITER)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCompletion;

    fn long_text(chars: usize) -> String {
        "abcdefghij".repeat(chars / 10 + 1)[..chars].to_string()
    }

    fn pipeline(client: MockCompletion, chunk_size: usize) -> SummarizationPipeline<MockCompletion> {
        SummarizationPipeline::new(
            client,
            PipelineSettings {
                chunk_size,
                ..PipelineSettings::default()
            },
        )
    }

    #[tokio::test]
    async fn test_short_text_is_rejected_without_calls() {
        let client = MockCompletion::default();
        let result = pipeline(client.clone(), 7000)
            .summarize(&long_text(49), SummaryMode::Long)
            .await;
        assert!(matches!(result, Err(SummarizeError::Validation(_))));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fifty_chars_is_accepted() {
        let client = MockCompletion::default().then_ok("part").then_ok("final");
        let result = pipeline(client.clone(), 7000)
            .summarize(&long_text(50), SummaryMode::Long)
            .await
            .unwrap();
        assert_eq!(result, "final");
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_chunks_summarized_in_order_then_merged() {
        let client = MockCompletion::default()
            .then_ok("P1")
            .then_ok("P2")
            .then_ok("P3")
            .then_ok("MERGED");
        let text = format!("{}{}{}", "a".repeat(100), "b".repeat(100), "c".repeat(20));
        let result = pipeline(client.clone(), 100)
            .summarize(&text, SummaryMode::Bullets)
            .await
            .unwrap();

        assert_eq!(result, "MERGED");
        let prompts = client.prompts();
        assert_eq!(prompts.len(), 4);
        assert!(prompts[0].ends_with(&"a".repeat(100)));
        assert!(prompts[1].ends_with(&"b".repeat(100)));
        assert!(prompts[2].ends_with(&"c".repeat(20)));
        assert!(prompts[3].contains("P1\n\n---\n\nP2\n\n---\n\nP3"));
        assert!(prompts[3].contains("Short conclusion"));
    }

    #[tokio::test]
    async fn test_mode_instruction_in_every_chunk_prompt() {
        let client = MockCompletion::default();
        pipeline(client.clone(), 60)
            .summarize(&long_text(150), SummaryMode::Flash)
            .await
            .unwrap();
        let prompts = client.prompts();
        assert_eq!(prompts.len(), 4);
        for prompt in &prompts[..3] {
            assert!(prompt.starts_with(SummaryMode::Flash.instruction()));
        }
    }

    #[tokio::test]
    async fn test_unknown_mode_uses_long_template() {
        let unknown = MockCompletion::default();
        let long = MockCompletion::default();
        let text = long_text(80);
        pipeline(unknown.clone(), 7000)
            .summarize(&text, SummaryMode::from_keyword("unknown"))
            .await
            .unwrap();
        pipeline(long.clone(), 7000)
            .summarize(&text, SummaryMode::Long)
            .await
            .unwrap();
        assert_eq!(unknown.prompts(), long.prompts());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_waits_hinted_durations_then_succeeds() {
        let client = MockCompletion::default()
            .then_rate_limited("rate_limit_exceeded: Please try again in 2s")
            .then_rate_limited("rate_limit_exceeded: Please try again in 1s")
            .then_ok("chunk summary")
            .then_ok("merged");

        let start = tokio::time::Instant::now();
        let result = pipeline(client.clone(), 7000)
            .summarize(&long_text(60), SummaryMode::Short)
            .await
            .unwrap();

        assert_eq!(result, "merged");
        assert!(start.elapsed() >= Duration::from_secs(3));
        assert!(start.elapsed() < Duration::from_secs(4));
        let prompts = client.prompts();
        // Three attempts at the single chunk, then the merge
        assert_eq!(prompts.len(), 4);
        assert_eq!(prompts[0], prompts[1]);
        assert_eq!(prompts[1], prompts[2]);
        assert!(prompts[3].contains("chunk summary"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_without_hint_waits_default() {
        let client = MockCompletion::default()
            .then_rate_limited("rate_limit_exceeded")
            .then_ok("chunk")
            .then_ok("merged");
        let start = tokio::time::Instant::now();
        pipeline(client, 7000)
            .summarize(&long_text(60), SummaryMode::Long)
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_merge_call_is_also_retried() {
        let client = MockCompletion::default()
            .then_ok("chunk")
            .then_rate_limited("try again in 0.5s")
            .then_ok("merged");
        let result = pipeline(client.clone(), 7000)
            .summarize(&long_text(60), SummaryMode::Long)
            .await
            .unwrap();
        assert_eq!(result, "merged");
        assert_eq!(client.call_count(), 3);
    }

    #[tokio::test]
    async fn test_other_error_is_fatal_with_raw_detail() {
        let client = MockCompletion::default()
            .then_ok("P1")
            .then_fail(r#"{"error":"invalid_api_key"}"#);
        let result = pipeline(client.clone(), 50)
            .summarize(&long_text(150), SummaryMode::Long)
            .await;

        match result {
            Err(SummarizeError::Upstream(CompletionError::Upstream(detail))) => {
                assert!(detail.contains("invalid_api_key"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
        // Stops at the failing chunk; no merge
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_ceiling_when_configured() {
        let client = MockCompletion::default()
            .then_rate_limited("try again in 1s")
            .then_rate_limited("try again in 1s")
            .then_rate_limited("try again in 1s");
        let pipeline = SummarizationPipeline::new(
            client.clone(),
            PipelineSettings {
                max_rate_limit_retries: Some(2),
                ..PipelineSettings::default()
            },
        );
        let result = pipeline.summarize(&long_text(60), SummaryMode::Long).await;
        assert!(matches!(
            result,
            Err(SummarizeError::Upstream(CompletionError::RateLimited { .. }))
        ));
        assert_eq!(client.call_count(), 3);
    }

    #[test]
    fn test_unusable_configured_retry_falls_back() {
        for secs in [f64::INFINITY, f64::NAN, -1.0, 1e30] {
            let config = SummarizerConfig {
                default_retry_secs: secs,
                ..SummarizerConfig::default()
            };
            assert_eq!(PipelineSettings::from(&config).default_retry, FALLBACK_RETRY);
        }
    }

    #[test]
    fn test_merge_prompt_joins_with_delimiter() {
        let prompt = merge_prompt(&["one".to_string(), "two".to_string()]);
        assert!(prompt.contains("one\n\n---\n\ntwo"));
        assert!(prompt.contains("Introduction"));
        assert!(prompt.contains("Concrete example"));
    }
}
