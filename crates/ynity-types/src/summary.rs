//! Summarization mode and job types.
//!
//! A `SummarizationJob` is ephemeral: it lives on the call stack of a single
//! summarization request and is never persisted.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Prompt template family used for each chunk of a summarization job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    /// 20-30 lines of bullet points.
    Short,
    /// 50-70 structured lines.
    Medium,
    /// Detailed academic synthesis.
    #[default]
    Long,
    Bullets,
    /// I/II/III outline with A/B/C sub-points.
    Plan,
    /// Question -> answer flashcard pairs.
    Flash,
    /// Five-line executive brief.
    Elevator,
}

impl SummaryMode {
    pub const ALL: [SummaryMode; 7] = [
        SummaryMode::Short,
        SummaryMode::Medium,
        SummaryMode::Long,
        SummaryMode::Bullets,
        SummaryMode::Plan,
        SummaryMode::Flash,
        SummaryMode::Elevator,
    ];

    /// Resolve a mode keyword, falling back to [`SummaryMode::Long`] for
    /// anything unrecognized.
    pub fn from_keyword(keyword: &str) -> Self {
        keyword.parse().unwrap_or_default()
    }

    /// Instruction placed ahead of the text in every chunk prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            SummaryMode::Short => "Write a clear summary of 20-30 lines as bullet points.",
            SummaryMode::Medium => {
                "Write a structured summary of 50-70 lines: introduction, key points, example, conclusion."
            }
            SummaryMode::Long => {
                "Write a detailed, university-style synthesis with headings, bullet points and examples."
            }
            SummaryMode::Bullets => "Summarize using bullet points only.",
            SummaryMode::Plan => "Write a detailed outline (I/II/III with A/B/C sub-points).",
            SummaryMode::Flash => "Create 8 flashcards (Question -> Answer) from the text.",
            SummaryMode::Elevator => "Summarize in 5 lines for a CEO.",
        }
    }
}

impl fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryMode::Short => write!(f, "short"),
            SummaryMode::Medium => write!(f, "medium"),
            SummaryMode::Long => write!(f, "long"),
            SummaryMode::Bullets => write!(f, "bullets"),
            SummaryMode::Plan => write!(f, "plan"),
            SummaryMode::Flash => write!(f, "flash"),
            SummaryMode::Elevator => write!(f, "elevator"),
        }
    }
}

impl FromStr for SummaryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(SummaryMode::Short),
            "medium" => Ok(SummaryMode::Medium),
            "long" => Ok(SummaryMode::Long),
            "bullets" => Ok(SummaryMode::Bullets),
            "plan" => Ok(SummaryMode::Plan),
            "flash" => Ok(SummaryMode::Flash),
            "elevator" => Ok(SummaryMode::Elevator),
            other => Err(format!("invalid summary mode: '{other}'")),
        }
    }
}

/// Progress of a summarization job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    Init,
    Chunking,
    SummarizingChunk(usize),
    Merging,
    Done,
    Failed,
}

impl fmt::Display for JobPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobPhase::Init => write!(f, "init"),
            JobPhase::Chunking => write!(f, "chunking"),
            JobPhase::SummarizingChunk(i) => write!(f, "summarizing_chunk({i})"),
            JobPhase::Merging => write!(f, "merging"),
            JobPhase::Done => write!(f, "done"),
            JobPhase::Failed => write!(f, "failed"),
        }
    }
}

/// In-flight state of one summarization request.
///
/// `partial_summaries[i]` is the summary of `chunks[i]`.
#[derive(Debug, Clone)]
pub struct SummarizationJob<'a> {
    pub source: &'a str,
    pub mode: SummaryMode,
    pub chunks: Vec<&'a str>,
    pub partial_summaries: Vec<String>,
    pub final_summary: Option<String>,
    pub phase: JobPhase,
}

impl<'a> SummarizationJob<'a> {
    pub fn new(source: &'a str, mode: SummaryMode) -> Self {
        Self {
            source,
            mode,
            chunks: Vec::new(),
            partial_summaries: Vec::new(),
            final_summary: None,
            phase: JobPhase::Init,
        }
    }
}
