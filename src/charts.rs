//! PNG charts for the report: a colored scatter plot and a grouped-mean bar chart.

use anyhow::Result;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use tracing::info;

use crate::analysis::types::GroupedMean;
use crate::output::ensure_parent_dir;
use crate::records::{EnrichedVehicle, NumericColumn};

/// Bar colors, assigned by position and cycled.
pub const BAR_COLORS: [RGBColor; 3] = [
    RGBColor(0x4C, 0xAF, 0x50),
    RGBColor(0x21, 0x96, 0xF3),
    RGBColor(0xFF, 0xC1, 0x07),
];

/// Viridis stops used for the scatter color scale.
const GRADIENT: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const SCATTER_SIZE: (u32, u32) = (1000, 600);
const BAR_SIZE: (u32, u32) = (800, 500);
const LEGEND_WIDTH: u32 = 130;

/// Which columns the scatter plot draws and how they are labelled.
#[derive(Debug, Clone)]
pub struct ScatterSpec {
    pub x: NumericColumn,
    pub y: NumericColumn,
    pub color: NumericColumn,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_label: String,
}

impl Default for ScatterSpec {
    fn default() -> Self {
        Self {
            x: NumericColumn::Horsepower,
            y: NumericColumn::Mpg,
            color: NumericColumn::FullModelYear,
            title: "Fuel economy (MPG) by horsepower".to_string(),
            x_label: "Horsepower".to_string(),
            y_label: "Miles per gallon".to_string(),
            color_label: "Model year".to_string(),
        }
    }
}

/// Maps `t` in `[0, 1]` onto the color scale. Out-of-range values are clamped.
pub fn gradient(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (GRADIENT.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(GRADIENT.len() - 2);
    let frac = scaled - i as f64;

    let (r0, g0, b0) = GRADIENT[i];
    let (r1, g1, b1) = GRADIENT[i + 1];
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;

    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Axis range covering every finite value with a 5% margin on each side.
pub fn padded_range(values: &[f64]) -> Range<f64> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

/// Scatter of `spec.x` against `spec.y`, colored by `spec.color`, with a color
/// bar legend on the right. Rows with a non-finite coordinate are not drawn.
#[tracing::instrument(skip(table, spec), fields(rows = table.len(), path = %path.display()))]
pub fn render_scatter(table: &[EnrichedVehicle], spec: &ScatterSpec, path: &Path) -> Result<()> {
    let points: Vec<(f64, f64, f64)> = table
        .iter()
        .map(|row| (spec.x.value(row), spec.y.value(row), spec.color.value(row)))
        .filter(|(x, y, _)| x.is_finite() && y.is_finite())
        .collect();

    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let cs: Vec<f64> = points.iter().map(|p| p.2).collect();
    let color_range = padded_range(&cs);
    let normalize = |c: f64| (c - color_range.start) / (color_range.end - color_range.start);

    ensure_parent_dir(path)?;
    let root = BitMapBackend::new(path, SCATTER_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (plot_area, legend_area) = root.split_horizontally((SCATTER_SIZE.0 - LEGEND_WIDTH) as i32);

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(&spec.title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(padded_range(&xs), padded_range(&ys))?;
    chart
        .configure_mesh()
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .draw()?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y, c)| Circle::new((x, y), 4, gradient(normalize(c)).mix(0.6).filled())),
    )?;

    let mut legend = ChartBuilder::on(&legend_area)
        .margin_top(55)
        .margin_bottom(60)
        .margin_right(10)
        .right_y_label_area_size(70)
        .build_cartesian_2d(0f64..1f64, color_range.clone())?;
    legend
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(0)
        .y_desc(spec.color_label.as_str())
        .draw()?;

    let steps = 64;
    let step = (color_range.end - color_range.start) / steps as f64;
    legend.draw_series((0..steps).map(|i| {
        let lo = color_range.start + step * i as f64;
        Rectangle::new(
            [(0.0, lo), (1.0, lo + step)],
            gradient(i as f64 / (steps - 1) as f64).filled(),
        )
    }))?;

    root.present()?;
    info!(path = %path.display(), points = points.len(), "Scatter chart saved");
    Ok(())
}

/// One bar per group of `grouped`, in its sorted order.
#[tracing::instrument(skip(grouped), fields(groups = grouped.groups.len(), path = %path.display()))]
pub fn render_bar_chart(grouped: &GroupedMean, path: &Path) -> Result<()> {
    let keys: Vec<&str> = grouped.groups.iter().map(|g| g.key.as_str()).collect();
    let bars = (keys.len() as u32).max(1);

    let top = grouped
        .groups
        .iter()
        .map(|g| g.mean)
        .filter(|m| m.is_finite())
        .fold(0.0, f64::max);
    let y_max = if top > 0.0 { top * 1.1 } else { 1.0 };

    ensure_parent_dir(path)?;
    let root = BitMapBackend::new(path, BAR_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Average {} by {}", grouped.target, grouped.group_by),
            ("sans-serif", 24),
        )
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..bars).into_segmented(), 0f64..y_max)?;

    let label = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => keys.get(*i as usize).map(|k| k.to_string()).unwrap_or_default(),
        _ => String::new(),
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(grouped.group_by.as_str())
        .y_desc(format!("Average {}", grouped.target))
        .x_label_formatter(&label)
        .draw()?;

    chart.draw_series(grouped.groups.iter().enumerate().map(|(i, g)| {
        let color = BAR_COLORS[i % BAR_COLORS.len()];
        let mean = if g.mean.is_finite() { g.mean } else { 0.0 };
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i as u32), 0.0),
                (SegmentValue::Exact(i as u32 + 1), mean),
            ],
            color.filled(),
        );
        bar.set_margin(0, 0, 20, 20);
        bar
    }))?;

    root.present()?;
    info!(path = %path.display(), bars = grouped.groups.len(), "Bar chart saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(gradient(0.0), RGBColor(68, 1, 84));
        assert_eq!(gradient(1.0), RGBColor(253, 231, 37));
        assert_eq!(gradient(-3.0), gradient(0.0));
        assert_eq!(gradient(7.0), gradient(1.0));
        assert_eq!(gradient(f64::NAN), gradient(0.0));
    }

    #[test]
    fn test_gradient_hits_inner_stops() {
        assert_eq!(gradient(0.5), RGBColor(33, 145, 140));
        assert_eq!(gradient(0.25), RGBColor(59, 82, 139));
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(&[]), 0.0..1.0);
        assert_eq!(padded_range(&[5.0, 5.0]), 4.5..5.5);

        let range = padded_range(&[0.0, 10.0, f64::INFINITY, f64::NAN]);
        assert_eq!(range, -0.5..10.5);
    }

    #[test]
    fn test_bar_colors_fixed_by_position() {
        assert_eq!(BAR_COLORS[0], RGBColor(0x4C, 0xAF, 0x50));
        assert_eq!(BAR_COLORS[1], RGBColor(0x21, 0x96, 0xF3));
        assert_eq!(BAR_COLORS[2], RGBColor(0xFF, 0xC1, 0x07));
    }
}
