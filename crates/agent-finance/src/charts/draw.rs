//! Plotters drawing routines
//!
//! Each function owns its bitmap for the duration of the call. The backend
//! is dropped on every exit path, so a failed draw never leaks into the next.

use super::ChartKind;
use super::fonts::FONT_FAMILY;
use crate::error::{FinanceError, Result};
use crate::series::PriceSeries;
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use std::path::Path;

const TITLE_SIZE: u32 = 26;
const LABEL_SIZE: u32 = 16;
const LINE_WIDTH: u32 = 2;

fn render_error(kind: ChartKind) -> impl Fn(&dyn std::fmt::Display) -> FinanceError {
    move |e: &dyn std::fmt::Display| FinanceError::render(kind.as_str(), e)
}

/// Overall date span, with the end pushed one day out so the last point
/// (or bar) has room and a single-day series still has a non-empty axis
fn date_axis(spans: impl Iterator<Item = (NaiveDate, NaiveDate)>) -> Option<(NaiveDate, NaiveDate)> {
    spans
        .reduce(|(s0, e0), (s1, e1)| (s0.min(s1), e0.max(e1)))
        .map(|(start, end)| (start, end + Duration::days(1)))
}

/// Value span padded by 5% so lines do not sit on the frame
fn value_axis(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !lo.is_finite() {
        return (-1.0, 1.0);
    }
    let pad = if (hi - lo).abs() < f64::EPSILON {
        lo.abs().max(1.0) * 0.05
    } else {
        (hi - lo) * 0.05
    };
    (lo - pad, hi + pad)
}

fn month_label(date: &NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

fn volume_label(value: &f64) -> String {
    match *value {
        v if v >= 1e9 => format!("{:.1}B", v / 1e9),
        v if v >= 1e6 => format!("{:.1}M", v / 1e6),
        v if v >= 1e3 => format!("{:.0}K", v / 1e3),
        v => format!("{v:.0}"),
    }
}

fn percent_label(value: &f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// One line per series, each rebased to 100 on its own first date
pub(super) fn comparison_lines(series: &[PriceSeries]) -> Vec<(&str, Vec<(NaiveDate, f64)>)> {
    series
        .iter()
        .map(|s| (s.symbol().as_str(), s.normalized()))
        .collect()
}

/// Runs of defined returns; an absent value ends the current run
pub(super) fn return_segments(returns: &[(NaiveDate, Option<f64>)]) -> Vec<Vec<(NaiveDate, f64)>> {
    let mut segments: Vec<Vec<(NaiveDate, f64)>> = vec![Vec::new()];
    for (date, value) in returns {
        match value {
            Some(v) => {
                if let Some(segment) = segments.last_mut() {
                    segment.push((*date, *v));
                }
            }
            None => segments.push(Vec::new()),
        }
    }
    segments.retain(|seg| !seg.is_empty());
    segments
}

/// Normalized closes of every series on one axes, with a legend
pub(super) fn comparison(path: &Path, size: (u32, u32), series: &[PriceSeries]) -> Result<()> {
    let fail = render_error(ChartKind::Comparison);
    let lines = comparison_lines(series);

    let Some((start, end)) = date_axis(series.iter().map(PriceSeries::date_range)) else {
        return Err(fail(&"no series to plot"));
    };
    let (lo, hi) = value_axis(lines.iter().flat_map(|(_, points)| points.iter().map(|p| p.1)));

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| fail(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(ChartKind::Comparison.title(None), (FONT_FAMILY, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(start..end, lo..hi)
        .map_err(|e| fail(&e))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Growth Index (100 = start)")
        .x_label_formatter(&month_label)
        .label_style((FONT_FAMILY, LABEL_SIZE))
        .draw()
        .map_err(|e| fail(&e))?;

    for (idx, (symbol, points)) in lines.into_iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(LINE_WIDTH)))
            .map_err(|e| fail(&e))?
            .label(symbol)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT_FAMILY, LABEL_SIZE))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| fail(&e))?;

    root.present().map_err(|e| fail(&e))?;
    Ok(())
}

/// Day-over-day returns as a line; the undefined first point is a gap
pub(super) fn returns(path: &Path, size: (u32, u32), series: &PriceSeries) -> Result<()> {
    let fail = render_error(ChartKind::Returns);
    let returns = series.daily_returns();
    let segments = return_segments(&returns);

    let Some((start, end)) = date_axis(std::iter::once(series.date_range())) else {
        return Err(fail(&"empty series"));
    };
    let (lo, hi) = value_axis(returns.iter().filter_map(|(_, v)| *v));

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| fail(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            ChartKind::Returns.title(Some(series.symbol().as_str())),
            (FONT_FAMILY, TITLE_SIZE),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(start..end, lo..hi)
        .map_err(|e| fail(&e))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .x_label_formatter(&month_label)
        .y_label_formatter(&percent_label)
        .label_style((FONT_FAMILY, LABEL_SIZE))
        .draw()
        .map_err(|e| fail(&e))?;

    for segment in segments {
        chart
            .draw_series(LineSeries::new(segment, BLUE.stroke_width(1)))
            .map_err(|e| fail(&e))?;
    }

    root.present().map_err(|e| fail(&e))?;
    Ok(())
}

/// Daily volume as one bar per trading day
pub(super) fn volume(path: &Path, size: (u32, u32), series: &PriceSeries) -> Result<()> {
    let fail = render_error(ChartKind::Volume);
    let volumes = series.volumes();

    let Some((start, end)) = date_axis(std::iter::once(series.date_range())) else {
        return Err(fail(&"empty series"));
    };
    let max = volumes.iter().map(|(_, v)| *v).max().unwrap_or(0) as f64;
    let top = if max > 0.0 { max * 1.05 } else { 1.0 };

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| fail(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            ChartKind::Volume.title(Some(series.symbol().as_str())),
            (FONT_FAMILY, TITLE_SIZE),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(start..end, 0.0..top)
        .map_err(|e| fail(&e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Date")
        .x_label_formatter(&month_label)
        .y_label_formatter(&volume_label)
        .label_style((FONT_FAMILY, LABEL_SIZE))
        .draw()
        .map_err(|e| fail(&e))?;

    let bar_style = BLUE.mix(0.6).filled();
    chart
        .draw_series(volumes.into_iter().map(|(date, v)| {
            let next = date + Duration::days(1);
            Rectangle::new([(date, 0.0), (next, v as f64)], bar_style)
        }))
        .map_err(|e| fail(&e))?;

    root.present().map_err(|e| fail(&e))?;
    Ok(())
}
