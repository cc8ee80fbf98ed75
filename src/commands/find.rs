//! `integrations-finder find` command.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::cli::FindArgs;
use crate::pipeline::{IntegrationsFinder, ResolutionOutcome};
use crate::ports::browser::Browser;
use crate::worker::ResolutionWorker;

/// One resolved input, as printed by `--json`.
#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    input: &'a str,
    #[serde(flatten)]
    outcome: &'a ResolutionOutcome,
}

/// How the single-input presentation may interact with the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserChoice {
    /// Open without asking.
    Open,
    /// Ask on the terminal.
    Ask,
    /// Do nothing.
    Skip,
}

/// Execute the `find` command.
///
/// Every input is resolved concurrently in the background; outcomes are
/// printed in input order.
///
/// # Errors
///
/// Returns the failure reason for a single failed input, or a summary when
/// any of several inputs failed.
pub async fn run(args: &FindArgs, finder: IntegrationsFinder) -> Result<(), String> {
    let finder = Arc::new(finder);
    let worker = ResolutionWorker::new(Arc::clone(&finder));

    let pending: Vec<_> = args.inputs.iter().map(|input| worker.submit(input.as_str())).collect();
    let mut outcomes = Vec::with_capacity(pending.len());
    for resolution in pending {
        let input = resolution.input().to_string();
        outcomes.push((input, resolution.outcome().await));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        return print_json(&outcomes, &mut out);
    }

    if let [(_, outcome)] = outcomes.as_slice() {
        let choice = if args.open {
            BrowserChoice::Open
        } else if args.no_prompt || !io::stdin().is_terminal() {
            BrowserChoice::Skip
        } else {
            BrowserChoice::Ask
        };
        let stdin = io::stdin();
        return present_single(
            outcome,
            choice,
            finder.context().browser.as_ref(),
            &mut stdin.lock(),
            &mut out,
        );
    }

    present_many(&outcomes, &mut out)
}

/// Prints one outcome, offering to open its URL.
///
/// # Errors
///
/// Returns the outcome's report when the resolution failed.
pub fn present_single<R: BufRead, W: Write>(
    outcome: &ResolutionOutcome,
    choice: BrowserChoice,
    browser: &dyn Browser,
    input: &mut R,
    out: &mut W,
) -> Result<(), String> {
    if !outcome.success {
        return Err(outcome.report.clone());
    }

    if let Some(url) = &outcome.integrations_url {
        write_out(out, &format!("\nQuick access URL: {url}"))?;
        if outcome.is_branch {
            write_out(out, "\n⚠️  WARNING: This integrations version appears to be a development branch!")?;
            write_out(out, "   You are working with an unofficial/unreleased development version.")?;
        }

        let open = match choice {
            BrowserChoice::Open => true,
            BrowserChoice::Skip => false,
            BrowserChoice::Ask => confirm(input, out, "\nOpen URL in browser? (y/N): ")?,
        };
        if open {
            if let Err(e) = browser.open(url) {
                warn!("could not open browser: {e}");
            }
        }
    }

    write_out(out, &format!("\n{}", outcome.report))
}

fn present_many<W: Write>(outcomes: &[(String, ResolutionOutcome)], out: &mut W) -> Result<(), String> {
    let mut failed = 0;
    for (input, outcome) in outcomes {
        if !outcome.success {
            failed += 1;
        }
        write_out(out, &format!("== {input}\n{}\n", outcome.report))?;
    }
    summarize(failed, outcomes.len())
}

fn print_json<W: Write>(outcomes: &[(String, ResolutionOutcome)], out: &mut W) -> Result<(), String> {
    let entries: Vec<JsonEntry<'_>> =
        outcomes.iter().map(|(input, outcome)| JsonEntry { input, outcome }).collect();
    let json = serde_json::to_string_pretty(&entries)
        .map_err(|e| format!("Failed to serialize outcomes: {e}"))?;
    write_out(out, &json)?;
    summarize(outcomes.iter().filter(|(_, o)| !o.success).count(), outcomes.len())
}

fn summarize(failed: usize, total: usize) -> Result<(), String> {
    if failed == 0 {
        Ok(())
    } else {
        Err(format!("{failed} of {total} resolutions failed"))
    }
}

/// Asks a yes/no question; anything but `y`/`yes` (or end of input) is no.
fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<bool, String> {
    write!(out, "{question}").and_then(|()| out.flush()).map_err(|e| e.to_string())?;
    let mut answer = String::new();
    input.read_line(&mut answer).map_err(|e| format!("Failed to read answer: {e}"))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn write_out<W: Write>(out: &mut W, text: &str) -> Result<(), String> {
    writeln!(out, "{text}").map_err(|e| format!("Failed to write output: {e}"))
}
