use chrono::prelude::*;
use gloo_utils::window;
use plotters::{
    chart::ChartBuilder,
    prelude::{IntoDrawingArea, SVGBackend},
    series::LineSeries,
    style::{Color, IntoFont, Palette, Palette99, RGBColor, TextStyle, WHITE},
};
use wasm_bindgen::JsValue;

use crate::Theme;

pub const COLOR_BODY_WEIGHT: usize = 1;

pub const OPACITY_LINE: f64 = 0.9;

pub const WIDTH_LINE: u32 = 2;

pub const FONT: (&str, u32) = ("Roboto", 11);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

#[derive(Clone, Copy, Default)]
struct Bounds {
    min: f32,
    max: f32,
}

impl Bounds {
    fn min_with_margin(self) -> f32 {
        if self.min <= f32::EPSILON {
            return self.min;
        }
        self.min - self.margin()
    }

    fn max_with_margin(self) -> f32 {
        self.max + self.margin()
    }

    fn margin(self) -> f32 {
        if (self.max - self.min).abs() > f32::EPSILON {
            return (self.max - self.min) * 0.1;
        }
        0.1
    }
}

/// Render a line chart of the given values within the interval as SVG.
///
/// Returns `Ok(None)` if there is nothing to plot.
#[allow(clippy::missing_errors_doc)]
pub fn plot_line(
    values: &[(NaiveDate, f32)],
    interval: &Interval,
    color: usize,
    theme: &Theme,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let mut values = values
        .iter()
        .filter(|(date, _)| *date >= interval.first && *date <= interval.last)
        .copied()
        .collect::<Vec<_>>();
    values.sort_by_key(|e| e.0);

    let Some(bounds) = determine_y_bounds(&values) else {
        return Ok(None);
    };

    let mut result = String::new();

    {
        let root = SVGBackend::with_string(&mut result, (chart_width(), 200)).into_drawing_area();
        let (color_fg, background_color) = colors(theme);

        root.fill(&background_color)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10f32)
            .x_label_area_size(30f32)
            .y_label_area_size(40f32)
            .build_cartesian_2d(
                interval.first..interval.last,
                bounds.min_with_margin()..bounds.max_with_margin(),
            )?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .set_all_tick_mark_size(3u32)
            .axis_style(color_fg.mix(0.3))
            .bold_line_style(color_fg.mix(0.05))
            .light_line_style(color_fg.mix(0.0))
            .label_style(TextStyle::from(FONT.into_font()).color(&color_fg))
            .x_labels(2)
            .y_labels(6)
            .draw()?;

        chart.draw_series(LineSeries::new(
            values.iter().map(|(x, y)| (*x, *y)),
            Palette99::pick(color)
                .mix(OPACITY_LINE)
                .stroke_width(WIDTH_LINE),
        ))?;

        root.present()?;
    }

    Ok(Some(result))
}

fn colors(theme: &Theme) -> (RGBColor, RGBColor) {
    let dark = RGBColor(20, 22, 26);
    match theme {
        Theme::System | Theme::Light => (dark, WHITE),
        Theme::Dark => (WHITE, dark),
    }
}

fn determine_y_bounds(values: &[(NaiveDate, f32)]) -> Option<Bounds> {
    if values.is_empty() || values.iter().all(|(_, v)| *v == 0.0) {
        return None;
    }

    let min = values.iter().map(|(_, v)| *v).fold(f32::MAX, f32::min);
    let max = values.iter().map(|(_, v)| *v).fold(0., f32::max);

    Some(Bounds { min, max })
}

fn chart_width() -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    u32::min(
        u32::max(
            window()
                .inner_width()
                .unwrap_or(JsValue::UNDEFINED)
                .as_f64()
                .unwrap_or(420.) as u32
                - 20,
            300,
        ),
        960,
    )
}
