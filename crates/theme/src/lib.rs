pub mod colors;
pub mod status;

pub use colors::Color;
pub use status::StatusLevel;

use agro_config::ThemeConfig;
use agro_core::{Line, Metric, Tone};

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings.  Calling
/// [`Theme::from_config`] is infallible — invalid color strings fall back to
/// safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub good:   Color,
    pub warn:   Color,
    pub bad:    Color,
    pub accent: Color,
    /// One color per entry of [`Metric::ALL`].
    pub series: [Color; 5],
    /// When `false`, [`Theme::paint`] leaves text uncolored.
    pub enabled: bool,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig, enabled: bool) -> Self {
        let parse = |hex: &str, fallback: Color| Color::from_hex(hex).unwrap_or(fallback);
        Self {
            good:   parse(&cfg.good, Color::GREEN),
            warn:   parse(&cfg.warn, Color::YELLOW),
            bad:    parse(&cfg.bad, Color::RED),
            accent: parse(&cfg.accent, Color::TEAL),
            series: [
                parse(&cfg.temperature, Color::RED),
                parse(&cfg.humidity, Color::GREEN),
                parse(&cfg.soil_moisture, Color::TEAL),
                parse(&cfg.water_tank, Color::TEAL),
                parse(&cfg.battery, Color::YELLOW),
            ],
            enabled,
        }
    }

    pub fn status_color(&self, level: StatusLevel) -> Color {
        match level {
            StatusLevel::Good => self.good,
            StatusLevel::Warn => self.warn,
            StatusLevel::Bad  => self.bad,
        }
    }

    pub fn series_color(&self, metric: Metric) -> Color {
        let idx = Metric::ALL.iter().position(|&m| m == metric).unwrap_or(0);
        self.series[idx]
    }

    /// Colour for a semantic tone; `None` means the terminal default.
    pub fn tone_color(&self, tone: Tone) -> Option<Color> {
        match tone {
            Tone::Plain          => None,
            Tone::Muted          => Some(Color::GREY),
            Tone::Accent         => Some(self.accent),
            Tone::Good           => Some(self.good),
            Tone::Warn           => Some(self.warn),
            Tone::Bad            => Some(self.bad),
            Tone::Series(metric) => Some(self.series_color(metric)),
        }
    }

    /// Render a panel line, colouring each span by its tone.
    pub fn render_line(&self, line: &Line) -> String {
        line.spans
            .iter()
            .map(|span| match self.tone_color(span.tone) {
                Some(color) => self.paint(color, &span.text),
                None        => span.text.clone(),
            })
            .collect()
    }

    /// Paint `text` with `color` if colors are enabled.
    pub fn paint(&self, color: Color, text: &str) -> String {
        if self.enabled {
            color.paint(text)
        } else {
            text.to_string()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_hex_falls_back() {
        let cfg = ThemeConfig { bad: "not a color".into(), ..ThemeConfig::default() };
        let theme = Theme::from_config(&cfg, true);
        assert_eq!(theme.bad, Color::RED);
    }

    #[test]
    fn series_colors_follow_metric_order() {
        let theme = Theme::default();
        assert_eq!(
            theme.series_color(Metric::SoilMoisture).to_rgb8(),
            (0x25, 0x63, 0xeb)
        );
        assert_eq!(theme.series_color(Metric::Battery).to_rgb8(), (0xea, 0xb3, 0x08));
    }

    #[test]
    fn render_line_colours_toned_spans_only() {
        let theme = Theme::default();
        let line = Line::new().push("a", Tone::Plain).push("b", Tone::Bad);
        assert_eq!(theme.render_line(&line), format!("a{}", Color::RED.paint("b")));
    }

    #[test]
    fn disabled_theme_does_not_paint() {
        let theme = Theme::from_config(&ThemeConfig::default(), false);
        assert_eq!(theme.paint(theme.accent, "plain"), "plain");
    }
}
