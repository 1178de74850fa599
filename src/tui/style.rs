//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

/// Line colors, cycled when a tier has more nodes than entries.
pub const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
];
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;

pub fn series_color(i: usize) -> Color {
    SERIES_COLORS[i % SERIES_COLORS.len()]
}

/// Computes Y-axis bounds from chart data points with 10% padding.
pub fn auto_bounds_y<'a>(series: impl IntoIterator<Item = &'a [(f64, f64)]>) -> [f64; 2] {
    let (min, max) = series
        .into_iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_default_bounds() {
        assert_eq!(auto_bounds_y(std::iter::empty()), [0.0, 1.0]);
    }

    #[test]
    fn bounds_pad_the_data_range() {
        let a = [(0.0, 200.0), (1.0, 300.0)];
        let [lo, hi] = auto_bounds_y([&a[..]]);
        assert!(lo < 200.0 && hi > 300.0);
    }
}
