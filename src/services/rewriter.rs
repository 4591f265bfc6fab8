// Interactive Rewriter
// Prompts for a replacement per flagged phrase and applies it to the working copy

use crossterm::style::{style, Color, Stylize};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::RewriteSummary;
use super::workspace::{WorkingCopy, WorkspaceError};

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("Terminal I/O failed")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
}

/// `text` in `color` when `enabled`, plain otherwise.
pub(crate) fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        style(text).with(color).to_string()
    } else {
        text.to_string()
    }
}

/// Walk the user through every phrase in order.
///
/// Each answer is written to disk before the next prompt, so an abort keeps
/// the edits made so far. Closed input ends the session early. `color` adds
/// ANSI styling to the prompts and should only be set for a terminal.
pub fn rewrite_phrases<R, W>(
    phrases: &[String],
    working_copy: &WorkingCopy,
    mut input: R,
    mut output: W,
    color: bool,
) -> Result<RewriteSummary, RewriteError>
where
    R: BufRead,
    W: Write,
{
    let mut summary = RewriteSummary::default();
    if phrases.is_empty() {
        return Ok(summary);
    }

    let total = phrases.len();
    writeln!(output, "Rewrite these sentences in your own words")?;

    for (i, phrase) in phrases.iter().enumerate() {
        if phrase.is_empty() {
            warn!(index = i + 1, "rewrite.empty_phrase_skipped");
            continue;
        }

        let counter = format!("[{}/{}] ", i + 1, total);
        write!(output, "\n{}", paint(&counter, Color::Yellow, color))?;
        writeln!(output, "{}", paint(phrase, Color::Blue, color))?;
        write!(output, "{}", paint("Humanized: ", Color::Green, color))?;
        output.flush()?;
        summary.prompted += 1;

        let Some(replacement) = read_answer(&mut input)? else {
            summary.input_exhausted = true;
            warn!(remaining = total - i, "rewrite.input_closed");
            writeln!(output)?;
            break;
        };

        let occurrences = working_copy.replace_all(phrase, &replacement)?;
        if occurrences == 0 {
            warn!(index = i + 1, "rewrite.phrase_not_found");
        }
        summary.applied += 1;
        summary.occurrences += occurrences;
        info!(index = i + 1, total, occurrences, "rewrite.applied");
    }

    Ok(summary)
}

/// One line without its terminator; `None` once input is closed.
fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}
