//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use crate::Palette;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Piece palette and UI colours.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Piece colours for cell values 1..=7 (stored at index value - 1).
    pub pieces: [Color; 7],
    /// Board background.
    pub bg: Color,
    /// Grid / border.
    pub div_line: Color,
    /// Text (score, lines).
    pub main_fg: Color,
    /// Highlight / titles.
    pub title: Color,
    /// Secondary text (controls help).
    pub inactive_fg: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    /// Classic palette: one vivid colour per piece on a black board.
    pub fn classic() -> Self {
        Self {
            pieces: [
                parse_hex("#FF0D72").unwrap(), // T
                parse_hex("#0DC2FF").unwrap(), // O
                parse_hex("#0DFF72").unwrap(), // L
                parse_hex("#F538FF").unwrap(), // J
                parse_hex("#FF8E0D").unwrap(), // I
                parse_hex("#FFE138").unwrap(), // S
                parse_hex("#3877FF").unwrap(), // Z
            ],
            bg: parse_hex("#000000").unwrap(),
            div_line: parse_hex("#3F444F").unwrap(),
            main_fg: parse_hex("#ABB2BF").unwrap(),
            title: parse_hex("#E5C07B").unwrap(),
            inactive_fg: parse_hex("#5C6370").unwrap(),
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Falls back to the classic palette if path is None or the file is missing.
    pub fn load(path: Option<&Path>, palette: Palette) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default_for_palette(palette)),
        };
        let s = std::fs::read_to_string(path)?;
        let map = parse_theme_file(&s);
        let mut theme = Self::from_map(&map);
        theme.apply_palette(palette);
        Ok(theme)
    }

    fn default_for_palette(palette: Palette) -> Self {
        let mut t = Self::classic();
        t.apply_palette(palette);
        t
    }

    /// Override piece colours for high-contrast or colorblind play.
    pub fn apply_palette(&mut self, palette: Palette) {
        match palette {
            Palette::Normal => {}
            Palette::HighContrast => {
                self.pieces = [
                    parse_hex("#FF00FF").unwrap(), // magenta
                    parse_hex("#FFFF00").unwrap(), // yellow
                    parse_hex("#FF8800").unwrap(), // orange
                    parse_hex("#0088FF").unwrap(), // blue
                    parse_hex("#00FFFF").unwrap(), // cyan
                    parse_hex("#00FF00").unwrap(), // green
                    parse_hex("#FF0000").unwrap(), // red
                ];
            }
            Palette::Colorblind => {
                // Okabe-Ito style set; no red/green pair carries meaning alone.
                self.pieces = [
                    parse_hex("#CC79A7").unwrap(), // reddish purple
                    parse_hex("#F0E442").unwrap(), // yellow
                    parse_hex("#E69F00").unwrap(), // orange
                    parse_hex("#0072B2").unwrap(), // blue
                    parse_hex("#56B4E9").unwrap(), // sky blue
                    parse_hex("#009E73").unwrap(), // bluish green
                    parse_hex("#D55E00").unwrap(), // vermillion
                ];
            }
        }
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            map.get(key)
                .and_then(|v| parse_hex(v.trim_matches('"').trim_matches('\'').trim()).ok())
        };
        let fallback = Self::classic();
        let keys = [
            "net_box", "cpu_box", "mem_box", "proc_box", "temp_end", "title", "hi_fg",
        ];
        let mut pieces = fallback.pieces;
        for (slot, key) in pieces.iter_mut().zip(keys) {
            if let Some(c) = get(key) {
                *slot = c;
            }
        }
        Self {
            pieces,
            bg: get("main_bg").unwrap_or(fallback.bg),
            div_line: get("div_line").unwrap_or(fallback.div_line),
            main_fg: get("main_fg").unwrap_or(fallback.main_fg),
            title: get("title").unwrap_or(fallback.title),
            inactive_fg: get("inactive_fg").unwrap_or(fallback.inactive_fg),
        }
    }

    /// Colour for a board cell value (1..=7); 0 is the background.
    #[inline]
    pub fn cell_color(&self, cell: blockdrop::Cell) -> Color {
        match cell {
            0 => self.bg,
            v => self.pieces[(usize::from(v) - 1) % self.pieces.len()],
        }
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(stripped) = line.strip_prefix("theme[") {
            if let Some(end) = stripped.find(']') {
                let key = stripped[..end].trim();
                let rest = stripped[end + 1..].trim();
                if let Some(eq) = rest.find('=') {
                    let value = rest[eq + 1..]
                        .trim()
                        .trim_matches('"')
                        .trim_matches('\'')
                        .to_string();
                    if !value.is_empty() {
                        map.insert(key.to_string(), value);
                    }
                }
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let channel = |digits: &str| {
        u8::from_str_radix(digits, 16).map_err(|_| ThemeError::InvalidHex(s.to_string()))
    };
    let (r, g, b) = match s.len() {
        6 => (channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?),
        3 => (
            channel(&s[0..1])? * 17,
            channel(&s[1..2])? * 17,
            channel(&s[2..3])? * 17,
        ),
        _ => return Err(ThemeError::InvalidHex(s.to_string())),
    };
    Ok(Color::Rgb(r, g, b))
}
