//! Chart rasterisation for the `plot_series` tool.
//!
//! A pure function of its inputs: a sequence of numeric values in
//! chronological order goes in, PNG bytes come out. Rendering uses the
//! plotters bitmap backend into an in-memory RGB buffer, which is then
//! PNG-encoded. No text is drawn on the image; titles and axis context
//! travel alongside it in the tool payload.

use plotters::prelude::*;
use thiserror::Error;

/// Rendered image width in pixels.
const WIDTH: u32 = 1000;
/// Rendered image height in pixels.
const HEIGHT: u32 = 600;

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Connected line with point markers.
    Line,
    /// One bar per observation.
    Bar,
}

impl ChartKind {
    /// Parses a chart-kind selector. Only `line` and `bar` are accepted.
    ///
    /// # Errors
    ///
    /// Returns the rejected selector text.
    pub fn parse(kind: &str) -> Result<Self, String> {
        match kind {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            other => Err(format!(
                "Invalid chart_type '{other}': must be 'line' or 'bar'"
            )),
        }
    }

    /// The selector string this kind parses from.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
        }
    }
}

/// Errors produced while rendering a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// No values were supplied.
    #[error("cannot render a chart with no data points")]
    Empty,
    /// The drawing backend failed.
    #[error("chart drawing failed: {0}")]
    Draw(String),
    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Renders `values` (already in chronological order) as a PNG image.
///
/// # Errors
///
/// Returns [`ChartError::Empty`] for an empty input, or a drawing/encoding
/// error from the backend.
pub fn render(values: &[f64], kind: ChartKind) -> Result<Vec<u8>, ChartError> {
    if values.is_empty() {
        return Err(ChartError::Empty);
    }

    let mut rgb = vec![0_u8; (WIDTH * HEIGHT * 3) as usize];
    draw(&mut rgb, values, kind)?;
    encode_png(&rgb)
}

#[allow(clippy::cast_precision_loss)] // point counts are far below 2^52
fn draw(rgb: &mut [u8], values: &[f64], kind: ChartKind) -> Result<(), ChartError> {
    let root = BitMapBackend::with_buffer(rgb, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Draw(e.to_string()))?;

    let (mut y_min, mut y_max) = value_bounds(values);
    if (y_max - y_min).abs() < f64::EPSILON {
        // Flat series: pad the range so the axis has height.
        y_min -= 1.0;
        y_max += 1.0;
    }
    let pad = (y_max - y_min) * 0.05;

    let x_max = values.len() as f64;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(-0.5..x_max - 0.5, (y_min - pad)..(y_max + pad))
        .map_err(|e| ChartError::Draw(e.to_string()))?;

    let steel_blue = RGBColor(70, 130, 180);

    match kind {
        ChartKind::Line => {
            chart
                .draw_series(LineSeries::new(
                    values.iter().enumerate().map(|(i, v)| (i as f64, *v)),
                    steel_blue.stroke_width(2),
                ))
                .map_err(|e| ChartError::Draw(e.to_string()))?;
            chart
                .draw_series(
                    values
                        .iter()
                        .enumerate()
                        .map(|(i, v)| Circle::new((i as f64, *v), 3, steel_blue.filled())),
                )
                .map_err(|e| ChartError::Draw(e.to_string()))?;
        }
        ChartKind::Bar => {
            let baseline = y_min - pad;
            chart
                .draw_series(values.iter().enumerate().map(|(i, v)| {
                    Rectangle::new(
                        [(i as f64 - 0.35, baseline), (i as f64 + 0.35, *v)],
                        steel_blue.mix(0.7).filled(),
                    )
                }))
                .map_err(|e| ChartError::Draw(e.to_string()))?;
        }
    }

    root.present()
        .map_err(|e| ChartError::Draw(e.to_string()))?;
    Ok(())
}

fn value_bounds(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(*v), max.max(*v))
    })
}

fn encode_png(rgb: &[u8]) -> Result<Vec<u8>, ChartError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, WIDTH, HEIGHT);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgb)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// First eight bytes of every PNG stream.
    const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn line_chart_is_png() {
        let values = [1.0, 2.5, 2.0, 3.5, 3.0];
        let bytes = render(&values, ChartKind::Line).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn bar_chart_is_png() {
        let values = [300.1, 301.2, 302.7];
        let bytes = render(&values, ChartKind::Bar).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn flat_series_renders() {
        let values = [5.0, 5.0, 5.0];
        assert!(render(&values, ChartKind::Line).is_ok());
    }

    #[test]
    fn single_point_renders() {
        assert!(render(&[42.0], ChartKind::Bar).is_ok());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(render(&[], ChartKind::Line), Err(ChartError::Empty)));
    }

    #[test]
    fn chart_kind_parsing() {
        assert_eq!(ChartKind::parse("line").unwrap(), ChartKind::Line);
        assert_eq!(ChartKind::parse("bar").unwrap(), ChartKind::Bar);
        assert!(ChartKind::parse("pie").is_err());
    }
}
