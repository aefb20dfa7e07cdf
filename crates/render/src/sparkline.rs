/// Intensity ramp, lowest to highest.
const SPARK_CHARS: [char; 5] = ['▁', '▂', '▃', '▅', '▇'];

/// How many recent points a panel sparkline shows.
pub const DEFAULT_WIDTH: usize = 20;

/// Map a series into a glyph string, one glyph per point, scaled to the
/// series' own min..max range.
///
/// A constant series has zero span; the 1.0 floor pins everything to the
/// lowest glyph instead of dividing by zero. Only the most recent `width`
/// points are rendered, oldest-first.
pub fn render(values: &[f64], width: usize) -> String {
    if values.is_empty() {
        return String::new();
    }

    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if hi > lo { hi - lo } else { 1.0 };

    let window = &values[values.len().saturating_sub(width)..];
    window
        .iter()
        .map(|v| {
            let bucket = ((v - lo) / span * (SPARK_CHARS.len() - 1) as f64) as usize;
            SPARK_CHARS[bucket.min(SPARK_CHARS.len() - 1)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_is_empty_string() {
        assert_eq!(render(&[], DEFAULT_WIDTH), "");
    }

    #[test]
    fn constant_series_uses_lowest_glyph() {
        assert_eq!(render(&[50.0, 50.0, 50.0], DEFAULT_WIDTH), "▁▁▁");
    }

    #[test]
    fn ramp_spans_the_glyph_range() {
        let spark = render(&[0.0, 25.0, 50.0, 75.0, 100.0], DEFAULT_WIDTH);
        assert_eq!(spark.chars().next(), Some('▁'));
        assert_eq!(spark.chars().last(), Some('▇'));
    }

    #[test]
    fn only_recent_points_are_rendered() {
        let values: Vec<f64> = (0..30).map(f64::from).collect();
        let spark = render(&values, DEFAULT_WIDTH);
        assert_eq!(spark.chars().count(), DEFAULT_WIDTH);
    }

    #[test]
    fn render_is_deterministic() {
        let values = [10.0, 90.0, 40.0];
        assert_eq!(render(&values, 20), render(&values, 20));
    }
}
