//! Finance Agent CLI
//!
//! Runs one analysis in the terminal or serves the web dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables (or put them in .env)
//! export NEBIUS_API_KEY="your-key"
//!
//! # Analyze from the terminal
//! cargo run --bin finance-agent -p agent-finance -- ask TSLA,MSFT
//!
//! # Serve the web form on http://127.0.0.1:8501
//! cargo run --bin finance-agent -p agent-finance -- serve
//! ```

use agent_finance::platforms::{TerminalApp, serve};
use agent_finance::{
    ChartRenderer, DashboardConfig, FinanceAgent, QueryOrchestrator, ReportWriter,
    YahooFinanceClient,
};
use agent_utils::LogFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "finance-agent")]
#[command(about = "AI finance agent with price charts and markdown reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory for charts and reports
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Model served by the LLM endpoint
    #[arg(long, global = true)]
    model: Option<String>,

    /// Log output format (pretty or json)
    #[arg(long, global = true, env = "LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze tickers once; prompts for them when none are given
    Ask {
        /// Tickers, e.g. `AAPL` or `TSLA,MSFT`
        tickers: Vec<String>,
    },
    /// Serve the web dashboard
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8501")]
        addr: String,
    },
}

impl Cli {
    fn config(&self) -> anyhow::Result<DashboardConfig> {
        let mut config = DashboardConfig::from_env()?;
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

fn build_orchestrator(config: &DashboardConfig, prefix: &str) -> anyhow::Result<QueryOrchestrator> {
    let yahoo = Arc::new(YahooFinanceClient::with_settings(
        config.history_days,
        config.request_timeout,
    )?);
    let agent = FinanceAgent::from_config(config, yahoo.clone())?;

    Ok(QueryOrchestrator::new(
        Arc::new(agent),
        ChartRenderer::new(yahoo, &config.output_dir, config.chart_width, config.chart_height),
        ReportWriter::with_prefix(&config.output_dir, prefix),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    agent_utils::load_dotenv();

    let cli = Cli::parse();
    agent_utils::init_tracing_with(cli.log_format, "info");

    let config = cli.config()?;
    info!(model = %config.model, output_dir = %config.output_dir.display(), "Starting finance-agent");

    match cli.command {
        Commands::Ask { tickers } => {
            let orchestrator = build_orchestrator(&config, ReportWriter::TERMINAL_PREFIX)?;
            let line = (!tickers.is_empty()).then(|| tickers.join(","));
            TerminalApp::new(orchestrator).run(line).await?;
        }
        Commands::Serve { addr } => {
            let orchestrator = build_orchestrator(&config, ReportWriter::WEB_PREFIX)?;
            println!("Dashboard running at http://{addr}");
            serve(orchestrator, &addr).await?;
        }
    }

    Ok(())
}
