//! One query, end to end
//!
//! Both front ends drive [`QueryOrchestrator::run`]: parse the ticker list,
//! ask the agent, save its text as a report, then draw the charts. Chart
//! failures are recorded and skipped; agent and report failures abort.

use agent_core::Agent;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::charts::{ChartArtifact, ChartKind, ChartRenderer};
use crate::error::{FinanceError, Result};
use crate::prompts;
use crate::report::ReportWriter;
use crate::symbol::{Symbol, parse_symbols};

/// A chart step that failed and was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedStep {
    /// Which step, e.g. `comparison` or `AAPL returns`
    pub step: String,
    /// Error text of the failure
    pub error: String,
}

/// Everything a front end needs to show for a query
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub symbols: Vec<Symbol>,
    pub analysis: String,
    pub report_path: PathBuf,
    pub charts: Vec<ChartArtifact>,
    pub skipped: Vec<SkippedStep>,
}

impl QueryOutcome {
    /// True when every chart step succeeded
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Runs the analyze, report, chart pipeline for one input line
pub struct QueryOrchestrator {
    agent: Arc<dyn Agent>,
    renderer: ChartRenderer,
    reports: ReportWriter,
}

impl QueryOrchestrator {
    pub fn new(agent: Arc<dyn Agent>, renderer: ChartRenderer, reports: ReportWriter) -> Self {
        Self {
            agent,
            renderer,
            reports,
        }
    }

    pub fn renderer(&self) -> &ChartRenderer {
        &self.renderer
    }

    pub fn reports(&self) -> &ReportWriter {
        &self.reports
    }

    /// Run a query
    ///
    /// The prompt embeds `user_input` verbatim. Steps run strictly in
    /// sequence; the comparison chart is only drawn for more than one symbol.
    pub async fn run(&self, user_input: &str) -> Result<QueryOutcome> {
        let symbols = parse_symbols(user_input);
        info!(input = %user_input, symbols = symbols.len(), "Running query");

        let prompt = prompts::analysis_query(user_input)?;
        let response = self
            .agent
            .run(prompt)
            .await
            .map_err(|e| FinanceError::Agent(e.to_string()))?;
        info!(
            agent = %response.agent,
            status = ?response.status,
            iterations = response.iterations,
            tokens = response.usage.total(),
            "Agent finished"
        );
        let analysis = response.into_text();

        let report_path = self.reports.write(&analysis).await?;

        let mut charts = Vec::new();
        let mut skipped = Vec::new();

        if symbols.len() > 1 {
            match self.renderer.render_comparison(&symbols).await {
                Ok(artifact) => charts.push(artifact),
                Err(e) => skip(&mut skipped, ChartKind::Comparison.as_str().to_string(), &e),
            }
        }

        for symbol in &symbols {
            match self.renderer.render_returns(symbol).await {
                Ok(artifact) => charts.push(artifact),
                Err(e) => {
                    skip(&mut skipped, format!("{symbol} {}", ChartKind::Returns), &e);
                    continue;
                }
            }
            match self.renderer.render_volume(symbol).await {
                Ok(artifact) => charts.push(artifact),
                Err(e) => skip(&mut skipped, format!("{symbol} {}", ChartKind::Volume), &e),
            }
        }

        info!(
            report = %report_path.display(),
            charts = charts.len(),
            skipped = skipped.len(),
            "Query complete"
        );

        Ok(QueryOutcome {
            symbols,
            analysis,
            report_path,
            charts,
            skipped,
        })
    }
}

fn skip(skipped: &mut Vec<SkippedStep>, step: String, error: &FinanceError) {
    warn!(step = %step, error = %error, "Chart step skipped");
    skipped.push(SkippedStep {
        step,
        error: error.to_string(),
    });
}

impl std::fmt::Debug for QueryOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryOrchestrator")
            .field("agent", &self.agent.name())
            .field("renderer", &self.renderer)
            .field("reports", &self.reports)
            .finish()
    }
}
