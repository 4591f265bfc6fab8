// Humanize Session
// Detection -> report -> working copy -> interactive rewrite

use crossterm::style::Color;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::models::{AggregateResult, RewriteSummary, SourceDocument};
use super::config_store::SegmentationConfig;
use super::detection::detect_chunks;
use super::providers::{DetectionError, TextDetector};
use super::rewriter::{paint, rewrite_phrases, RewriteError};
use super::text_processor::segment_text;
use super::workspace::{WorkingCopy, WorkspaceError};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Detection failed")]
    Detection(#[from] DetectionError),
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
    #[error("Terminal I/O failed")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub aggregate: AggregateResult,
    /// `None` when the session only reported.
    pub working_copy: Option<PathBuf>,
    pub rewrite: Option<RewriteSummary>,
}

pub struct SessionOptions<'a> {
    pub segmentation: &'a SegmentationConfig,
    /// Directory the working copy is created in.
    pub workdir: &'a Path,
    pub report_only: bool,
    /// ANSI colors in the report and prompts; set only when stdout is a terminal.
    pub color: bool,
}

/// Run one document through detection and, unless reporting only, the
/// rewrite loop.
pub async fn humanize_document<D, R, W>(
    detector: &D,
    source: &SourceDocument,
    options: SessionOptions<'_>,
    input: R,
    mut output: W,
) -> Result<SessionOutcome, SessionError>
where
    D: TextDetector,
    R: BufRead,
    W: Write,
{
    let chunks = segment_text(
        &source.content,
        options.segmentation.max_chars,
        options.segmentation.mode,
    );
    let segmented = chunks.len() > 1;
    info!(
        path = %source.path.display(),
        chars = source.char_count(),
        chunks = chunks.len(),
        mode = ?options.segmentation.mode,
        "session.segmented"
    );

    if segmented {
        writeln!(output, "Uh oh! The file is too big. We need to segment it.\n")?;
    }

    let mut progress_err: Option<io::Error> = None;
    let aggregate = detect_chunks(detector, &chunks, |i, n| {
        if segmented && progress_err.is_none() {
            if let Err(e) = writeln!(output, "[{}/{}] Sending current segment", i, n) {
                progress_err = Some(e);
            }
        }
    })
    .await?;
    if let Some(e) = progress_err {
        return Err(e.into());
    }

    writeln!(
        output,
        "\nAI Percentage (%): {}",
        paint(&aggregate.ai_percentage.to_string(), Color::Red, options.color)
    )?;
    info!(
        ai_percentage = aggregate.ai_percentage,
        flagged = aggregate.phrases.len(),
        "session.detected"
    );

    if options.report_only {
        for (i, phrase) in aggregate.phrases.iter().enumerate() {
            let index = format!("[{}]", i + 1);
            writeln!(output, "{} {}", paint(&index, Color::Yellow, options.color), phrase)?;
        }
        return Ok(SessionOutcome {
            aggregate,
            working_copy: None,
            rewrite: None,
        });
    }

    let working_copy = WorkingCopy::create(&source.path, &source.content, options.workdir)?;
    let summary = rewrite_phrases(
        &aggregate.phrases,
        &working_copy,
        input,
        &mut output,
        options.color,
    )?;

    writeln!(output, "\nSaved to {}", working_copy.path().display())?;
    if summary.input_exhausted {
        writeln!(
            output,
            "Input ended early; {} of {} sentences rewritten.",
            summary.applied,
            aggregate.phrases.len()
        )?;
    }
    info!(
        applied = summary.applied,
        occurrences = summary.occurrences,
        input_exhausted = summary.input_exhausted,
        "session.finished"
    );

    Ok(SessionOutcome {
        aggregate,
        working_copy: Some(working_copy.path().to_path_buf()),
        rewrite: Some(summary),
    })
}
