/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const GREEN:  Self = Self { r: 0.086, g: 0.639, b: 0.290, a: 1.0 }; // #16a34a
    pub const YELLOW: Self = Self { r: 0.918, g: 0.702, b: 0.031, a: 1.0 }; // #eab308
    pub const RED:    Self = Self { r: 0.863, g: 0.149, b: 0.149, a: 1.0 }; // #dc2626
    pub const TEAL:   Self = Self { r: 0.0,   g: 0.475, b: 0.420, a: 1.0 }; // #00796b
    pub const GREY:   Self = Self { r: 0.459, g: 0.459, b: 0.459, a: 1.0 }; // #757575

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: 1.0,
            }),
            8 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: byte(&hex[6..8])? as f32 / 255.0,
            }),
            _ => None,
        }
    }

    /// 8-bit RGB channels, alpha dropped.
    #[inline]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (c(self.r), c(self.g), c(self.b))
    }

    /// 24-bit ANSI foreground escape for terminals.
    pub fn ansi_fg(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("\x1b[38;2;{r};{g};{b}m")
    }

    /// Wrap `text` in this colour, resetting afterwards.
    pub fn paint(self, text: &str) -> String {
        format!("{}{text}\x1b[0m", self.ansi_fg())
    }
}
