//! RGBA colours with CSS parsing.
//!
//! ## Supported Color Formats
//!
//! - **Hex**: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - **RGB**: `rgb(r, g, b)`, `rgba(r, g, b, a)`, `rgb(r g b / a)`
//! - **HSL**: `hsl(h, s%, l%)`, `hsla(h, s%, l%, a)`
//! - **Named**: CSS colour names like `red`, `aliceblue`, `rebeccapurple`
//! - **Terminal palette**: `ansired`, `ansibrightblue`, ... (the 16 ANSI colours)
//! - **Special**: `transparent`

use std::fmt;

use crate::error::{CssError, Result};

/// An RGBA colour, optionally pinned to an entry of the terminal's 16-colour
/// palette.
///
/// # Examples
///
/// ```
/// use cellcss::types::RgbaColor;
///
/// let red = RgbaColor::rgb(255, 0, 0);
/// assert_eq!(RgbaColor::parse("#f00").unwrap(), red);
/// assert_eq!(RgbaColor::parse("coral").unwrap(), RgbaColor::rgb(255, 127, 80));
/// assert_eq!(red.to_string(), "#ff0000");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RgbaColor {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0.0 = transparent, 1.0 = opaque).
    pub a: f32,
    /// ANSI palette index (0-15) when the colour names a terminal colour.
    pub ansi: Option<u8>,
}

impl Default for RgbaColor {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

static NAMED_COLORS: phf::Map<&'static str, (u8, u8, u8)> = phf::phf_map! {
    "black" => (0, 0, 0),
    "white" => (255, 255, 255),
    "red" => (255, 0, 0),
    "green" => (0, 128, 0),
    "blue" => (0, 0, 255),
    "yellow" => (255, 255, 0),
    "cyan" => (0, 255, 255),
    "aqua" => (0, 255, 255),
    "magenta" => (255, 0, 255),
    "fuchsia" => (255, 0, 255),
    "aliceblue" => (240, 248, 255),
    "antiquewhite" => (250, 235, 215),
    "aquamarine" => (127, 255, 212),
    "azure" => (240, 255, 255),
    "beige" => (245, 245, 220),
    "bisque" => (255, 228, 196),
    "blanchedalmond" => (255, 235, 205),
    "blueviolet" => (138, 43, 226),
    "brown" => (165, 42, 42),
    "burlywood" => (222, 184, 135),
    "cadetblue" => (95, 158, 160),
    "chartreuse" => (127, 255, 0),
    "chocolate" => (210, 105, 30),
    "coral" => (255, 127, 80),
    "cornflowerblue" => (100, 149, 237),
    "cornsilk" => (255, 248, 220),
    "crimson" => (220, 20, 60),
    "darkblue" => (0, 0, 139),
    "darkcyan" => (0, 139, 139),
    "darkgoldenrod" => (184, 134, 11),
    "darkgray" => (169, 169, 169),
    "darkgrey" => (169, 169, 169),
    "darkgreen" => (0, 100, 0),
    "darkkhaki" => (189, 183, 107),
    "darkmagenta" => (139, 0, 139),
    "darkolivegreen" => (85, 107, 47),
    "darkorange" => (255, 140, 0),
    "darkorchid" => (153, 50, 204),
    "darkred" => (139, 0, 0),
    "darksalmon" => (233, 150, 122),
    "darkseagreen" => (143, 188, 143),
    "darkslateblue" => (72, 61, 139),
    "darkslategray" => (47, 79, 79),
    "darkslategrey" => (47, 79, 79),
    "darkturquoise" => (0, 206, 209),
    "darkviolet" => (148, 0, 211),
    "deeppink" => (255, 20, 147),
    "deepskyblue" => (0, 191, 255),
    "dimgray" => (105, 105, 105),
    "dimgrey" => (105, 105, 105),
    "dodgerblue" => (30, 144, 255),
    "firebrick" => (178, 34, 34),
    "floralwhite" => (255, 250, 240),
    "forestgreen" => (34, 139, 34),
    "gainsboro" => (220, 220, 220),
    "ghostwhite" => (248, 248, 255),
    "gold" => (255, 215, 0),
    "goldenrod" => (218, 165, 32),
    "gray" => (128, 128, 128),
    "grey" => (128, 128, 128),
    "greenyellow" => (173, 255, 47),
    "honeydew" => (240, 255, 240),
    "hotpink" => (255, 105, 180),
    "indianred" => (205, 92, 92),
    "indigo" => (75, 0, 130),
    "ivory" => (255, 255, 240),
    "khaki" => (240, 230, 140),
    "lavender" => (230, 230, 250),
    "lavenderblush" => (255, 240, 245),
    "lawngreen" => (124, 252, 0),
    "lemonchiffon" => (255, 250, 205),
    "lightblue" => (173, 216, 230),
    "lightcoral" => (240, 128, 128),
    "lightcyan" => (224, 255, 255),
    "lightgoldenrodyellow" => (250, 250, 210),
    "lightgray" => (211, 211, 211),
    "lightgrey" => (211, 211, 211),
    "lightgreen" => (144, 238, 144),
    "lightpink" => (255, 182, 193),
    "lightsalmon" => (255, 160, 122),
    "lightseagreen" => (32, 178, 170),
    "lightskyblue" => (135, 206, 250),
    "lightslategray" => (119, 136, 153),
    "lightslategrey" => (119, 136, 153),
    "lightsteelblue" => (176, 196, 222),
    "lightyellow" => (255, 255, 224),
    "lime" => (0, 255, 0),
    "limegreen" => (50, 205, 50),
    "linen" => (250, 240, 230),
    "maroon" => (128, 0, 0),
    "mediumaquamarine" => (102, 205, 170),
    "mediumblue" => (0, 0, 205),
    "mediumorchid" => (186, 85, 211),
    "mediumpurple" => (147, 112, 219),
    "mediumseagreen" => (60, 179, 113),
    "mediumslateblue" => (123, 104, 238),
    "mediumspringgreen" => (0, 250, 154),
    "mediumturquoise" => (72, 209, 204),
    "mediumvioletred" => (199, 21, 133),
    "midnightblue" => (25, 25, 112),
    "mintcream" => (245, 255, 250),
    "mistyrose" => (255, 228, 225),
    "moccasin" => (255, 228, 181),
    "navajowhite" => (255, 222, 173),
    "navy" => (0, 0, 128),
    "oldlace" => (253, 245, 230),
    "olive" => (128, 128, 0),
    "olivedrab" => (107, 142, 35),
    "orange" => (255, 165, 0),
    "orangered" => (255, 69, 0),
    "orchid" => (218, 112, 214),
    "palegoldenrod" => (238, 232, 170),
    "palegreen" => (152, 251, 152),
    "paleturquoise" => (175, 238, 238),
    "palevioletred" => (219, 112, 147),
    "papayawhip" => (255, 239, 213),
    "peachpuff" => (255, 218, 185),
    "peru" => (205, 133, 63),
    "pink" => (255, 192, 203),
    "plum" => (221, 160, 221),
    "powderblue" => (176, 224, 230),
    "purple" => (128, 0, 128),
    "rebeccapurple" => (102, 51, 153),
    "rosybrown" => (188, 143, 143),
    "royalblue" => (65, 105, 225),
    "saddlebrown" => (139, 69, 19),
    "salmon" => (250, 128, 114),
    "sandybrown" => (244, 164, 96),
    "seagreen" => (46, 139, 87),
    "seashell" => (255, 245, 238),
    "sienna" => (160, 82, 45),
    "silver" => (192, 192, 192),
    "skyblue" => (135, 206, 235),
    "slateblue" => (106, 90, 205),
    "slategray" => (112, 128, 144),
    "slategrey" => (112, 128, 144),
    "snow" => (255, 250, 250),
    "springgreen" => (0, 255, 127),
    "steelblue" => (70, 130, 180),
    "tan" => (210, 180, 140),
    "teal" => (0, 128, 128),
    "thistle" => (216, 191, 216),
    "tomato" => (255, 99, 71),
    "turquoise" => (64, 224, 208),
    "violet" => (238, 130, 238),
    "wheat" => (245, 222, 179),
    "whitesmoke" => (245, 245, 245),
    "yellowgreen" => (154, 205, 50),};

/// The 16 terminal palette colours with the RGB values used when a true
/// colour is needed.
const ANSI_COLORS: [(&str, (u8, u8, u8)); 16] = [
    ("ansiblack", (0, 0, 0)),
    ("ansired", (205, 0, 0)),
    ("ansigreen", (0, 205, 0)),
    ("ansiyellow", (205, 205, 0)),
    ("ansiblue", (0, 0, 238)),
    ("ansimagenta", (205, 0, 205)),
    ("ansicyan", (0, 205, 205)),
    ("ansigray", (229, 229, 229)),
    ("ansibrightblack", (127, 127, 127)),
    ("ansibrightred", (255, 0, 0)),
    ("ansibrightgreen", (0, 255, 0)),
    ("ansibrightyellow", (255, 255, 0)),
    ("ansibrightblue", (92, 92, 255)),
    ("ansibrightmagenta", (255, 0, 255)),
    ("ansibrightcyan", (0, 255, 255)),
    ("ansiwhite", (255, 255, 255)),
];

fn invalid(value: &str) -> CssError {
    CssError::InvalidValue {
        property: "color".to_string(),
        value: value.to_string(),
    }
}

impl RgbaColor {
    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Returns a fully transparent color.
    pub fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0.0)
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            a: 1.0,
            ansi: None,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a,
            ansi: None,
        }
    }

    /// One of the 16 terminal palette colours. Indices above 15 wrap.
    pub fn ansi(index: u8) -> Self {
        let (_, (r, g, b)) = ANSI_COLORS[usize::from(index % 16)];
        Self {
            ansi: Some(index % 16),
            ..Self::rgb(r, g, b)
        }
    }

    /// Returns a copy of this color with the specified alpha value.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Returns true if the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// The `#rrggbb` form of the colour, ignoring alpha and palette pinning.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse a color string in any of the supported formats.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(invalid(input));
        }

        let lower = input.to_ascii_lowercase();

        if lower == "transparent" {
            return Ok(Self::transparent());
        }

        if let Some(hex) = lower.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(|| invalid(input));
        }

        if lower.starts_with("rgb") {
            return Self::parse_rgb_func(&lower).ok_or_else(|| invalid(input));
        }

        if lower.starts_with("hsl") {
            return Self::parse_hsl_func(&lower).ok_or_else(|| invalid(input));
        }

        if let Some(index) = ANSI_COLORS.iter().position(|(name, _)| *name == lower) {
            return Ok(Self::ansi(index as u8));
        }

        NAMED_COLORS
            .get(lower.as_str())
            .map(|&(r, g, b)| Self::rgb(r, g, b))
            .ok_or_else(|| invalid(input))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()?;

        match digits.as_slice() {
            [r, g, b] => Some(Self::rgb(r * 17, g * 17, b * 17)),
            [r, g, b, a] => Some(Self::rgba(r * 17, g * 17, b * 17, f32::from(a * 17) / 255.0)),
            [r1, r2, g1, g2, b1, b2] => Some(Self::rgb(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
            [r1, r2, g1, g2, b1, b2, a1, a2] => Some(Self::rgba(
                r1 * 16 + r2,
                g1 * 16 + g2,
                b1 * 16 + b2,
                f32::from(a1 * 16 + a2) / 255.0,
            )),
            _ => None,
        }
    }

    /// Splits the arguments of a colour function on commas, whitespace and
    /// the `/` alpha separator.
    fn function_args(input: &str) -> Option<Vec<&str>> {
        let start = input.find('(')?;
        let end = input.rfind(')')?;
        if end < start {
            return None;
        }
        Some(
            input[start + 1..end]
                .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .collect(),
        )
    }

    fn parse_rgb_func(input: &str) -> Option<Self> {
        let parts = Self::function_args(input)?;
        if parts.len() < 3 {
            return None;
        }

        let channel = |s: &str| -> Option<u8> {
            if let Some(pct) = s.strip_suffix('%') {
                let value: f32 = pct.parse().ok()?;
                return Some((value.clamp(0.0, 100.0) * 2.55).round() as u8);
            }
            let value: f32 = s.parse().ok()?;
            if !(0.0..=255.0).contains(&value) {
                return None;
            }
            Some(value.round() as u8)
        };

        let a = match parts.get(3) {
            Some(alpha) => Self::parse_alpha(alpha)?,
            None => 1.0,
        };

        Some(Self::rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a))
    }

    fn parse_hsl_func(input: &str) -> Option<Self> {
        let parts = Self::function_args(input)?;
        if parts.len() < 3 {
            return None;
        }

        let h: f32 = parts[0].trim_end_matches("deg").parse().ok()?;
        let s = Self::parse_percentage(parts[1])?;
        let l = Self::parse_percentage(parts[2])?;
        let a = match parts.get(3) {
            Some(alpha) => Self::parse_alpha(alpha)?,
            None => 1.0,
        };

        Some(Self::from_hsl(h, s, l, a))
    }

    fn parse_alpha(s: &str) -> Option<f32> {
        match s.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().ok().map(|v| v / 100.0),
            None => s.parse().ok(),
        }
    }

    fn parse_percentage(s: &str) -> Option<f32> {
        s.trim_end_matches('%').parse::<f32>().ok().map(|v| v / 100.0)
    }

    /// Creates an RgbaColor from HSL values (hue in degrees, saturation and
    /// lightness in `0.0..=1.0`).
    pub fn from_hsl(h: f32, s: f32, l: f32, a: f32) -> Self {
        let h = h.rem_euclid(360.0) / 360.0;
        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                Self::hue_to_rgb(p, q, h + 1.0 / 3.0),
                Self::hue_to_rgb(p, q, h),
                Self::hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Self::rgba(
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            a,
        )
    }

    fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }

        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }
}

impl fmt::Display for RgbaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ansi {
            Some(index) => f.write_str(ANSI_COLORS[usize::from(index)].0),
            None => f.write_str(&self.to_hex()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== HEX FORMAT TESTS ====================

    #[test]
    fn test_hex_3_digit() {
        assert_eq!(RgbaColor::parse("#f00").unwrap(), RgbaColor::rgb(255, 0, 0));
        assert_eq!(RgbaColor::parse("#abc").unwrap(), RgbaColor::rgb(0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn test_hex_4_digit() {
        let color = RgbaColor::parse("#f008").unwrap();
        assert_eq!(color, RgbaColor::rgba(255, 0, 0, 0x88 as f32 / 255.0));
    }

    #[test]
    fn test_hex_6_and_8_digit() {
        assert_eq!(RgbaColor::parse("#9932CC").unwrap(), RgbaColor::rgb(0x99, 0x32, 0xCC));
        assert_eq!(
            RgbaColor::parse("#ff000080").unwrap(),
            RgbaColor::rgba(255, 0, 0, 0x80 as f32 / 255.0)
        );
    }

    #[test]
    fn test_invalid_hex() {
        assert!(RgbaColor::parse("#gg0000").is_err());
        assert!(RgbaColor::parse("#ff00000").is_err());
        assert!(RgbaColor::parse("#ff").is_err());
    }

    // ==================== FUNCTIONS ====================

    #[test]
    fn test_rgb_forms() {
        assert_eq!(RgbaColor::parse("rgb(255, 128, 64)").unwrap(), RgbaColor::rgb(255, 128, 64));
        assert_eq!(RgbaColor::parse("rgb(255,128,64)").unwrap(), RgbaColor::rgb(255, 128, 64));
        assert_eq!(
            RgbaColor::parse("rgba(255, 0, 0, 0.5)").unwrap(),
            RgbaColor::rgba(255, 0, 0, 0.5)
        );
        assert_eq!(
            RgbaColor::parse("rgb(255 0 0 / 50%)").unwrap(),
            RgbaColor::rgba(255, 0, 0, 0.5)
        );
    }

    #[test]
    fn test_invalid_rgb() {
        assert!(RgbaColor::parse("rgb(256, 0, 0)").is_err());
        assert!(RgbaColor::parse("rgb(-1, 0, 0)").is_err());
        assert!(RgbaColor::parse("rgb(255, 0)").is_err());
    }

    #[test]
    fn test_hsl() {
        assert_eq!(RgbaColor::parse("hsl(0, 100%, 50%)").unwrap(), RgbaColor::rgb(255, 0, 0));
        assert_eq!(RgbaColor::parse("hsl(120,100%,50%)").unwrap(), RgbaColor::rgb(0, 255, 0));
        let color = RgbaColor::parse("hsla(240, 100%, 50%, 0.5)").unwrap();
        assert_eq!((color.r, color.g, color.b), (0, 0, 255));
        assert!((color.a - 0.5).abs() < 0.01);
    }

    // ==================== NAMES ====================

    #[test]
    fn test_named_colors_case_insensitive() {
        assert_eq!(RgbaColor::parse("Red").unwrap(), RgbaColor::rgb(255, 0, 0));
        assert_eq!(RgbaColor::parse("AliceBlue").unwrap(), RgbaColor::rgb(240, 248, 255));
        assert!(RgbaColor::parse("redd").is_err());
    }

    #[test]
    fn test_ansi_names_keep_palette_index() {
        let color = RgbaColor::parse("ansiyellow").unwrap();
        assert_eq!(color.ansi, Some(3));
        assert_eq!(color.to_string(), "ansiyellow");
    }

    #[test]
    fn test_transparent_and_empty() {
        assert!(RgbaColor::parse("transparent").unwrap().is_transparent());
        assert!(RgbaColor::parse("  ").is_err());
    }
}
