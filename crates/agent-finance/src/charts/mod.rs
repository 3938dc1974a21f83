//! PNG chart rendering
//!
//! Charts land at deterministic paths under the output directory:
//! `comparison.png`, `{SYMBOL}_returns.png` and `{SYMBOL}_volume.png`.
//! Rendering again overwrites the previous file, so repeated runs for the
//! same tickers always point at the latest chart.

mod draw;
pub mod fonts;

use crate::api::PriceSeriesFetcher;
use crate::error::{FinanceError, Result};
use crate::symbol::Symbol;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// The three chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Normalized closes of several symbols
    Comparison,
    /// Daily returns of one symbol
    Returns,
    /// Daily volume of one symbol
    Volume,
}

impl ChartKind {
    /// Short lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Comparison => "comparison",
            Self::Returns => "returns",
            Self::Volume => "volume",
        }
    }

    /// Chart title; per-symbol kinds prefix the ticker
    pub fn title(self, symbol: Option<&str>) -> String {
        match (self, symbol) {
            (Self::Comparison, _) => "1Y Normalized Performance Comparison".to_string(),
            (Self::Returns, Some(s)) => format!("{s} Daily Returns"),
            (Self::Volume, Some(s)) => format!("{s} Trading Volume"),
            (Self::Returns, None) => "Daily Returns".to_string(),
            (Self::Volume, None) => "Trading Volume".to_string(),
        }
    }

    /// File name under the output directory
    pub fn file_name(self, symbol: Option<&Symbol>) -> String {
        match (self, symbol) {
            (Self::Comparison, _) => "comparison.png".to_string(),
            (kind, Some(s)) => format!("{s}_{}.png", kind.as_str()),
            (kind, None) => format!("{}.png", kind.as_str()),
        }
    }

    /// Caption shown next to the image in the front ends
    pub fn caption(self, symbol: Option<&Symbol>) -> String {
        match self {
            Self::Comparison => "Normalized Performance".to_string(),
            _ => self.title(symbol.map(Symbol::as_str)),
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chart written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartArtifact {
    pub kind: ChartKind,
    pub symbols: Vec<Symbol>,
    pub path: PathBuf,
}

impl ChartArtifact {
    /// Caption for display
    pub fn caption(&self) -> String {
        self.kind.caption(self.symbols.first())
    }

    /// File name component of the path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Renders charts from freshly fetched price history
///
/// Every operation fetches its own data; nothing is shared between calls.
#[derive(Clone)]
pub struct ChartRenderer {
    fetcher: Arc<dyn PriceSeriesFetcher>,
    output_dir: PathBuf,
    size: (u32, u32),
}

impl ChartRenderer {
    /// Create a renderer writing `width`x`height` PNGs into `output_dir`
    pub fn new(
        fetcher: Arc<dyn PriceSeriesFetcher>,
        output_dir: impl Into<PathBuf>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            fetcher,
            output_dir: output_dir.into(),
            size: (width, height),
        }
    }

    /// Output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path a chart of `kind` for `symbol` is written to
    pub fn path_for(&self, kind: ChartKind, symbol: Option<&Symbol>) -> PathBuf {
        self.output_dir.join(kind.file_name(symbol))
    }

    /// Plot every symbol's closes rebased to 100 on one axes
    ///
    /// The first fetch error aborts the whole chart.
    pub async fn render_comparison(&self, symbols: &[Symbol]) -> Result<ChartArtifact> {
        let mut series = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            series.push(self.fetcher.fetch(symbol).await?);
        }

        let path = self.prepare(ChartKind::Comparison, None).await?;
        let (target, size) = (path.clone(), self.size);
        draw_blocking(ChartKind::Comparison, move || {
            draw::comparison(&target, size, &series)
        })
        .await?;
        info!(path = %path.display(), symbols = symbols.len(), "Rendered comparison chart");

        Ok(ChartArtifact {
            kind: ChartKind::Comparison,
            symbols: symbols.to_vec(),
            path,
        })
    }

    /// Plot day-over-day returns for one symbol
    pub async fn render_returns(&self, symbol: &Symbol) -> Result<ChartArtifact> {
        let series = self.fetcher.fetch(symbol).await?;

        let path = self.prepare(ChartKind::Returns, Some(symbol)).await?;
        let (target, size) = (path.clone(), self.size);
        draw_blocking(ChartKind::Returns, move || draw::returns(&target, size, &series)).await?;
        info!(symbol = %symbol, path = %path.display(), "Rendered returns chart");

        Ok(ChartArtifact {
            kind: ChartKind::Returns,
            symbols: vec![symbol.clone()],
            path,
        })
    }

    /// Plot daily volume bars for one symbol
    pub async fn render_volume(&self, symbol: &Symbol) -> Result<ChartArtifact> {
        let series = self.fetcher.fetch(symbol).await?;

        let path = self.prepare(ChartKind::Volume, Some(symbol)).await?;
        let (target, size) = (path.clone(), self.size);
        draw_blocking(ChartKind::Volume, move || draw::volume(&target, size, &series)).await?;
        info!(symbol = %symbol, path = %path.display(), "Rendered volume chart");

        Ok(ChartArtifact {
            kind: ChartKind::Volume,
            symbols: vec![symbol.clone()],
            path,
        })
    }

    async fn prepare(&self, kind: ChartKind, symbol: Option<&Symbol>) -> Result<PathBuf> {
        fonts::ensure_registered()?;
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| FinanceError::render(kind.as_str(), e))?;
        Ok(self.path_for(kind, symbol))
    }
}

/// Run a drawing routine on the blocking pool
async fn draw_blocking<F>(kind: ChartKind, routine: F) -> Result<()>
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    tokio::task::spawn_blocking(routine)
        .await
        .map_err(|e| FinanceError::render(kind.as_str(), e))?
}

impl std::fmt::Debug for ChartRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartRenderer")
            .field("output_dir", &self.output_dir)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
