use crate::chart::Metric;
use crate::state::DashState;

/// Every dashboard panel implements this trait.
///
/// Panels are purely reactive: they receive a read-only view of `DashState`
/// and return styled lines. Turning a [`Tone`] into an actual colour is left
/// to the theme, so panels never see escape codes.
pub trait Panel: Send + Sync + std::fmt::Debug {
    /// Unique string identifier, e.g. `"sensors"` or `"chart"`.
    fn id(&self) -> &str;

    /// Heading drawn above the panel body.
    fn title(&self, _state: &DashState) -> String {
        self.id().to_string()
    }

    /// Render the panel body for the current state.
    fn render(&self, state: &DashState) -> Vec<Line>;
}

/// Semantic colour of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    Muted,
    Accent,
    Good,
    Warn,
    Bad,
    Series(Metric),
}

/// A run of text sharing one tone.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self { text: text.into(), tone }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Plain)
    }
}

/// One rendered line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn push(mut self, text: impl Into<String>, tone: Tone) -> Self {
        self.spans.push(Span::new(text, tone));
        self
    }

    /// Text with tones stripped.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Line { spans: vec![Span::plain(text)] }
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Line { spans: vec![Span::plain(text)] }
    }
}
