//! Terminal front end

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::io::{BufRead, Write};
use tracing::info;

use crate::error::{FinanceError, Result};
use crate::orchestrator::{QueryOrchestrator, QueryOutcome};

/// Prompt shown when no tickers are passed on the command line
pub const PROMPT: &str = "Enter ONE or TWO stocks separated by comma (ex: AAPL or TSLA,MSFT): ";

/// Runs a single query read from the command line or standard input
#[derive(Debug)]
pub struct TerminalApp {
    orchestrator: QueryOrchestrator,
}

impl TerminalApp {
    pub fn new(orchestrator: QueryOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Run against the process stdin and stdout
    pub async fn run(&self, tickers: Option<String>) -> Result<Option<QueryOutcome>> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        self.run_with(tickers, &mut stdin.lock(), &mut stdout).await
    }

    /// Run with explicit input and output streams
    ///
    /// Returns `None` without calling the agent when the input is blank.
    pub async fn run_with<R, W>(
        &self,
        tickers: Option<String>,
        input: &mut R,
        out: &mut W,
    ) -> Result<Option<QueryOutcome>>
    where
        R: BufRead,
        W: Write,
    {
        let line = match tickers {
            Some(line) => line,
            None => {
                write!(out, "{PROMPT}").map_err(FinanceError::Io)?;
                out.flush().map_err(FinanceError::Io)?;
                let mut line = String::new();
                input.read_line(&mut line).map_err(FinanceError::Io)?;
                line
            }
        };

        let line = line.trim();
        if line.is_empty() {
            info!("No tickers given, exiting");
            return Ok(None);
        }

        let outcome = self.orchestrator.run(line).await?;
        write!(out, "{}", render_outcome(&outcome)).map_err(FinanceError::Io)?;
        out.flush().map_err(FinanceError::Io)?;
        Ok(Some(outcome))
    }
}

/// Format an outcome for the terminal
pub fn render_outcome(outcome: &QueryOutcome) -> String {
    let mut text = format!("\n===== ANALYSIS =====\n\n{}\n\n", outcome.analysis);
    text.push_str(&format!("Saved markdown: {}\n", outcome.report_path.display()));

    if !outcome.charts.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Chart", "Path"]);
        for chart in &outcome.charts {
            table.add_row(vec![chart.caption(), chart.path.display().to_string()]);
        }
        text.push_str(&format!("\n{table}\n"));
    }

    for step in &outcome.skipped {
        text.push_str(&format!("Warning: {} skipped: {}\n", step.step, step.error));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::tests::{StubAgent, market, orchestrator};
    use std::io::Cursor;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_prompts_and_runs_query() {
        let dir = tempfile::tempdir().unwrap();
        let agent = Arc::new(StubAgent::replying("## AAPL"));
        let app = TerminalApp::new(orchestrator(agent.clone(), market(), dir.path()));

        let mut input = Cursor::new(b" aapl \n".to_vec());
        let mut out = Vec::new();
        let outcome = app.run_with(None, &mut input, &mut out).await.unwrap().unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with(PROMPT));
        assert!(printed.contains("===== ANALYSIS =====\n\n## AAPL"));
        assert!(printed.contains("AAPL Daily Returns"));
        assert!(printed.contains("AAPL Trading Volume"));
        assert_eq!(outcome.symbols.len(), 1);
        assert!(agent.prompts.lock().unwrap()[0].ends_with("aapl"));
    }

    #[tokio::test]
    async fn test_empty_input_exits() {
        let dir = tempfile::tempdir().unwrap();
        let agent = Arc::new(StubAgent::replying("unused"));
        let app = TerminalApp::new(orchestrator(agent.clone(), market(), dir.path()));

        let mut input = Cursor::new(b"   \n".to_vec());
        let mut out = Vec::new();
        let outcome = app.run_with(None, &mut input, &mut out).await.unwrap();

        assert!(outcome.is_none());
        assert!(agent.prompts.lock().unwrap().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_argument_skips_prompt_and_prints_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let agent = Arc::new(StubAgent::replying("nothing"));
        let app = TerminalApp::new(orchestrator(agent, market(), dir.path()));

        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();
        app.run_with(Some("ZZZZINVALID".to_string()), &mut input, &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(!printed.contains(PROMPT));
        assert!(printed.contains("Saved markdown:"));
        assert!(printed.contains("Warning: ZZZZINVALID returns skipped: No price data for ZZZZINVALID"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_output_failure_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let agent = Arc::new(StubAgent::replying("unused"));
        let app = TerminalApp::new(orchestrator(agent.clone(), market(), dir.path()));

        let mut input = Cursor::new(b"AAPL\n".to_vec());
        let err = app
            .run_with(None, &mut input, &mut ClosedPipe)
            .await
            .unwrap_err();

        assert!(
            matches!(err, FinanceError::Io(ref io) if io.kind() == std::io::ErrorKind::BrokenPipe),
            "unexpected error: {err}"
        );
        assert!(agent.prompts.lock().unwrap().is_empty());
    }
}
