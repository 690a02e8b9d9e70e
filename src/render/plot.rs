use std::path::Path;

use log::warn;
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{ChartData, ChartRenderer};
use crate::color::BandColors;
use crate::config::ChartStyle;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Bar chart on a log frequency axis (PNG via plotters)
// ---------------------------------------------------------------------------

pub struct PlottersRenderer {
    pub size: (u32, u32),
    pub style: ChartStyle,
}

impl PlottersRenderer {
    pub fn new(size: (u32, u32), style: ChartStyle) -> Self {
        Self { size, style }
    }

    fn band_colors(&self, bound_count: usize) -> BandColors {
        let fill = rgb(self.style.bar_fill);
        if self.style.color_by_band {
            BandColors::new(bound_count, fill)
        } else {
            BandColors::uniform(fill)
        }
    }

    /// Font sizes scale with the canvas so the 300 dpi output stays legible.
    fn font(&self, base: f64) -> f64 {
        base * (self.size.1 as f64 / 800.0).max(0.5)
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

fn backend_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Backend(err.to_string())
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, chart: &ChartData, path: &Path) -> Result<(), RenderError> {
        if chart.bars.is_empty() {
            return Err(RenderError::EmptyDataset);
        }
        let n = chart.bars.len() as i32;
        let (y_lo, y_hi) = chart.y_range();
        let colors = self.band_colors(chart.bounds.len());
        let edge = rgb(self.style.bar_edge);

        let root = BitMapBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(backend_err)?;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&self.style.title, ("sans-serif", self.font(14.0 * 1.4)))
            .margin(self.font(10.0) as u32)
            .x_label_area_size(self.font(40.0) as u32)
            .y_label_area_size(self.font(70.0) as u32)
            .build_cartesian_2d((0..n).into_segmented(), (y_lo..y_hi).log_scale())
            .map_err(backend_err)?;

        let symbols: Vec<&str> = chart.bars.iter().map(|b| b.symbol.as_str()).collect();
        ctx.configure_mesh()
            .x_desc(self.style.x_desc.as_str())
            .y_desc(self.style.y_desc.as_str())
            .x_labels(symbols.len())
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => symbols
                    .get(*i as usize)
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|v| format!("{v:.0e}"))
            .axis_desc_style(("sans-serif", self.font(12.0 * 1.4)))
            .label_style(("sans-serif", self.font(10.0 * 1.4)))
            .bold_line_style(BLACK.mix(0.2))
            .light_line_style(BLACK.mix(0.05))
            .draw()
            .map_err(backend_err)?;

        // Bars with a positive frequency; anything else has no place on a log axis.
        let drawable: Vec<(i32, &super::Bar)> = chart
            .bars
            .iter()
            .enumerate()
            .filter_map(|(i, bar)| {
                if bar.frequency_hz > 0.0 {
                    Some((i as i32, bar))
                } else {
                    warn!(
                        "{}: frequency {} Hz cannot be drawn on a log axis, skipping bar",
                        bar.symbol, bar.frequency_hz
                    );
                    None
                }
            })
            .collect();

        let gap = (self.size.0 as f64 / chart.bars.len() as f64 * 0.1) as u32;
        ctx.draw_series(drawable.iter().map(|(i, bar)| {
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(*i), y_lo),
                    (SegmentValue::Exact(*i + 1), bar.frequency_hz),
                ],
                colors.color_for(bar.band).filled(),
            );
            rect.set_margin(0, 0, gap, gap);
            rect
        }))
        .map_err(backend_err)?;
        ctx.draw_series(drawable.iter().map(|(i, bar)| {
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(*i), y_lo),
                    (SegmentValue::Exact(*i + 1), bar.frequency_hz),
                ],
                edge.stroke_width(2),
            );
            rect.set_margin(0, 0, gap, gap);
            rect
        }))
        .map_err(backend_err)?;

        let bound_style = rgb(self.style.bound_color)
            .mix(self.style.bound_alpha)
            .stroke_width(self.font(1.5).max(1.0) as u32);
        ctx.draw_series(chart.bounds.iter().map(|&b| {
            PathElement::new(
                vec![(SegmentValue::Exact(0), b), (SegmentValue::Last, b)],
                bound_style,
            )
        }))
        .map_err(backend_err)?;

        let label_style = TextStyle::from(("sans-serif", self.font(8.0 * 1.4)).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        ctx.draw_series(drawable.iter().filter_map(|(i, bar)| {
            bar.annotation.as_ref().map(|text| {
                Text::new(
                    text.clone(),
                    (SegmentValue::CenterOf(*i), bar.frequency_hz * 1.05),
                    label_style.clone(),
                )
            })
        }))
        .map_err(backend_err)?;

        root.present().map_err(backend_err)?;
        Ok(())
    }
}
