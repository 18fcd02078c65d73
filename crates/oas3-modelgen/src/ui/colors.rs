use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

#[derive(Debug, Clone, Copy)]
struct Palette {
  timestamp: Color,
  primary: Color,
  accent: Color,
  success: Color,
  label: Color,
  value: Color,
}

const DARK: Palette = Palette {
  timestamp: Color::Rgb { r: 118, g: 166, b: 166 },
  primary: Color::Rgb { r: 191, g: 126, b: 4 },
  accent: Color::Rgb { r: 166, g: 84, b: 55 },
  success: Color::Rgb { r: 118, g: 166, b: 166 },
  label: Color::Rgb { r: 217, g: 164, b: 4 },
  value: Color::Rgb { r: 242, g: 211, b: 56 },
};

const LIGHT: Palette = Palette {
  timestamp: Color::Rgb { r: 92, g: 62, b: 38 },
  primary: Color::Rgb { r: 70, g: 42, b: 25 },
  accent: Color::Rgb { r: 211, g: 99, b: 70 },
  success: Color::Rgb { r: 34, g: 142, b: 90 },
  label: Color::Rgb { r: 176, g: 103, b: 66 },
  value: Color::Rgb { r: 199, g: 146, b: 76 },
};

/// Terminal colours for progress lines and tables. Every colour is
/// [`Color::Reset`] when colouring is off.
#[derive(Debug, Clone, Copy)]
pub struct Colors {
  palette: Option<Palette>,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    let palette = match (enabled, theme) {
      (false, _) => None,
      (true, Theme::Dark) => Some(DARK),
      (true, Theme::Light) => Some(LIGHT),
    };
    Self { palette }
  }

  fn pick(&self, select: fn(&Palette) -> Color) -> Color {
    self.palette.as_ref().map_or(Color::Reset, select)
  }

  pub fn timestamp(&self) -> Color {
    self.pick(|palette| palette.timestamp)
  }

  pub fn primary(&self) -> Color {
    self.pick(|palette| palette.primary)
  }

  pub fn accent(&self) -> Color {
    self.pick(|palette| palette.accent)
  }

  pub fn success(&self) -> Color {
    self.pick(|palette| palette.success)
  }

  pub fn label(&self) -> Color {
    self.pick(|palette| palette.label)
  }

  pub fn value(&self) -> Color {
    self.pick(|palette| palette.value)
  }
}

/// Converts a crossterm colour for use in comfy-table cells.
pub fn table_color(color: Color) -> ComfyColor {
  match color {
    Color::Reset => ComfyColor::Reset,
    Color::Black => ComfyColor::Black,
    Color::DarkGrey => ComfyColor::DarkGrey,
    Color::Red => ComfyColor::Red,
    Color::DarkRed => ComfyColor::DarkRed,
    Color::Green => ComfyColor::Green,
    Color::DarkGreen => ComfyColor::DarkGreen,
    Color::Yellow => ComfyColor::Yellow,
    Color::DarkYellow => ComfyColor::DarkYellow,
    Color::Blue => ComfyColor::Blue,
    Color::DarkBlue => ComfyColor::DarkBlue,
    Color::Magenta => ComfyColor::Magenta,
    Color::DarkMagenta => ComfyColor::DarkMagenta,
    Color::Cyan => ComfyColor::Cyan,
    Color::DarkCyan => ComfyColor::DarkCyan,
    Color::White => ComfyColor::White,
    Color::Grey => ComfyColor::Grey,
    Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
    Color::AnsiValue(value) => ComfyColor::AnsiValue(value),
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => std::env::var("COLORFGBG")
      .ok()
      .as_deref()
      .and_then(theme_from_colorfgbg)
      .unwrap_or(Theme::Dark),
  }
}

/// `COLORFGBG` ends with the background palette index; 8 and above are light.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
  let background = value.split(';').next_back()?.parse::<u8>().ok()?;
  Some(if background >= 8 { Theme::Light } else { Theme::Dark })
}
