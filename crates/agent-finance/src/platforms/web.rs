//! Web form front end
//!
//! `GET /` shows the ticker form, `POST /analyze` runs one query and renders
//! the analysis with its charts. Chart files are served from `/reports`.

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use minijinja::{Environment, Value, context};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::{FinanceError, Result};
use crate::orchestrator::{QueryOrchestrator, QueryOutcome};

const LAYOUT: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AI Finance Agent</title>
<style>
body { font-family: sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
pre.analysis { white-space: pre-wrap; background: #f6f8fa; padding: 1rem; }
figure { margin: 1.5rem 0; }
figure img { max-width: 100%; }
.warning { color: #9a6700; }
.error { color: #cf222e; }
</style>
</head>
<body>
<h1>AI Finance Agent Dashboard</h1>
{% block body %}{% endblock %}
</body>
</html>
"#;

const INDEX: &str = r#"{% extends "layout.html" %}
{% block body %}
<form method="post" action="/analyze">
  <label for="stocks">Enter stocks (comma separated)</label>
  <input id="stocks" name="stocks" placeholder="AAPL,MSFT" value="{{ stocks }}">
  <button type="submit">Run Analysis</button>
</form>
{% endblock %}
"#;

const RESULT: &str = r#"{% extends "layout.html" %}
{% block body %}
<p><a href="/">New analysis</a></p>
<pre class="analysis">{{ analysis }}</pre>
{% for chart in charts %}
<figure>
  <img src="/reports/{{ chart.file }}?v={{ version }}" alt="{{ chart.caption }}">
  <figcaption>{{ chart.caption }}</figcaption>
</figure>
{% endfor %}
{% for step in skipped %}
<p class="warning">Skipped {{ step.step }}: {{ step.error }}</p>
{% endfor %}
<p>Report saved: <code>{{ report }}</code></p>
{% endblock %}
"#;

const ERROR: &str = r#"{% extends "layout.html" %}
{% block body %}
<p class="error">{{ message }}</p>
<p><a href="/">Back</a></p>
{% endblock %}
"#;

/// Shared state of the web front end
///
/// The mutex keeps one query in flight so the output directory has a
/// single writer.
#[derive(Clone)]
pub struct WebState {
    orchestrator: Arc<Mutex<QueryOrchestrator>>,
}

impl WebState {
    pub fn new(orchestrator: QueryOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(Mutex::new(orchestrator)),
        }
    }
}

/// Submitted form fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub stocks: String,
}

#[derive(Serialize)]
struct ChartView {
    file: String,
    caption: String,
}

/// Build the router for `orchestrator`
pub fn router(orchestrator: QueryOrchestrator) -> Router {
    let reports_dir = orchestrator.renderer().output_dir().to_path_buf();

    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze))
        .nest_service("/reports", ServeDir::new(reports_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(WebState::new(orchestrator))
}

/// Listen on `addr` until the process is stopped
pub async fn serve(orchestrator: QueryOrchestrator, addr: &str) -> Result<()> {
    let app = router(orchestrator);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Dashboard listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> std::result::Result<Html<String>, WebError> {
    Ok(Html(render("index.html", INDEX, context! { stocks => "" })?))
}

async fn analyze(
    State(state): State<WebState>,
    Form(form): Form<AnalyzeForm>,
) -> std::result::Result<Html<String>, WebError> {
    let stocks = form.stocks.trim();
    if stocks.is_empty() {
        return index().await;
    }

    let outcome = {
        let orchestrator = state.orchestrator.lock().await;
        orchestrator.run(stocks).await?
    };
    Ok(Html(render_outcome(&outcome)?))
}

fn render_outcome(outcome: &QueryOutcome) -> Result<String> {
    let charts: Vec<ChartView> = outcome
        .charts
        .iter()
        .map(|chart| ChartView {
            file: chart.file_name(),
            caption: chart.caption(),
        })
        .collect();

    render(
        "result.html",
        RESULT,
        context! {
            analysis => &outcome.analysis,
            charts => charts,
            skipped => &outcome.skipped,
            report => outcome.report_path.display().to_string(),
            version => chart_version(outcome),
        },
    )
}

/// Query string tying chart URLs to one run, since chart files are rewritten in place
fn chart_version(outcome: &QueryOutcome) -> String {
    outcome
        .report_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn render(name: &str, source: &str, ctx: Value) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("layout.html", LAYOUT)?;
    let page = env.template_from_named_str(name, source)?.render(ctx)?;
    Ok(page)
}

/// Failure of a web request, rendered as an error page
#[derive(Debug)]
pub struct WebError(FinanceError);

impl From<FinanceError> for WebError {
    fn from(err: FinanceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            FinanceError::Agent(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!(status = %status, error = %self.0, "Request failed");

        let message = self.0.to_string();
        match render("error.html", ERROR, context! { message => &message }) {
            Ok(page) => (status, Html(page)).into_response(),
            Err(_) => (status, message).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::tests::symbol;
    use crate::charts::{ChartArtifact, ChartKind, ChartRenderer};
    use crate::orchestrator::tests::{StubAgent, market};
    use std::path::PathBuf;
    use crate::report::ReportWriter;

    fn state(agent: StubAgent, dir: &std::path::Path) -> WebState {
        WebState::new(QueryOrchestrator::new(
            Arc::new(agent),
            ChartRenderer::new(Arc::new(market()), dir, 400, 300),
            ReportWriter::with_prefix(dir, ReportWriter::WEB_PREFIX),
        ))
    }

    fn form(stocks: &str) -> Form<AnalyzeForm> {
        Form(AnalyzeForm {
            stocks: stocks.to_string(),
        })
    }

    #[tokio::test]
    async fn test_index_has_form() {
        let Html(page) = index().await.unwrap();
        assert!(page.contains(r#"<form method="post" action="/analyze">"#));
        assert!(page.contains(r#"name="stocks""#));
        assert!(page.contains("Run Analysis"));
    }

    #[tokio::test]
    async fn test_analyze_renders_charts_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(StubAgent::replying("AAPL beats MSFT"), dir.path());

        let Html(page) = analyze(State(state), form("AAPL,MSFT")).await.unwrap();

        assert!(page.contains("AAPL beats MSFT"));
        assert!(page.contains(r#"src="/reports/comparison.png?v=dashboard_"#));
        assert!(page.contains(r#"src="/reports/MSFT_volume.png?v=dashboard_"#));
        assert!(page.contains("Normalized Performance"));
        assert!(page.contains("dashboard_"));
        assert!(!page.contains("Skipped"));

        let reports: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".md"))
            .collect();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].starts_with("dashboard_"));
    }

    #[tokio::test]
    async fn test_analyze_escapes_agent_text_and_shows_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(StubAgent::replying("<script>alert(1)</script>"), dir.path());

        let Html(page) = analyze(State(state), form("ZZZZINVALID")).await.unwrap();

        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("Skipped ZZZZINVALID returns: No price data for ZZZZINVALID"));
    }

    #[tokio::test]
    async fn test_blank_form_shows_index() {
        let dir = tempfile::tempdir().unwrap();
        let agent = StubAgent::replying("unused");
        let state = state(agent, dir.path());

        let Html(page) = analyze(State(state), form("  ")).await.unwrap();
        assert!(page.contains("Run Analysis"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_agent_failure_is_bad_gateway() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(StubAgent::failing("Rate limit exceeded"), dir.path());

        let err = analyze(State(state), form("AAPL")).await.unwrap_err();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_other_failures_are_internal() {
        let response = WebError::from(FinanceError::Config("bad".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_chart_urls_change_with_each_report() {
        let outcome = |report: &str| QueryOutcome {
            symbols: vec![symbol("AAPL")],
            analysis: String::new(),
            report_path: PathBuf::from("reports").join(report),
            charts: vec![ChartArtifact {
                kind: ChartKind::Volume,
                symbols: vec![symbol("AAPL")],
                path: PathBuf::from("reports/AAPL_volume.png"),
            }],
            skipped: Vec::new(),
        };

        let first = render_outcome(&outcome("dashboard_20250314_092653.md")).unwrap();
        let second = render_outcome(&outcome("dashboard_20250314_092715.md")).unwrap();

        assert!(first.contains(r#"src="/reports/AAPL_volume.png?v=dashboard_20250314_092653""#));
        assert!(second.contains(r#"src="/reports/AAPL_volume.png?v=dashboard_20250314_092715""#));
    }
}
