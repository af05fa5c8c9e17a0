use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};

/// Named palettes selectable from config
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    #[default]
    Colored,
    Plain,
}

/// Styling for one kind of output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
}

impl Style {
    pub const fn plain() -> Self {
        Self {
            color: None,
            bold: false,
        }
    }

    pub const fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            bold: false,
        }
    }

    pub const fn bold() -> Self {
        Self {
            color: None,
            bold: true,
        }
    }

    /// Render `text` with this style.
    pub fn paint(&self, text: &str) -> String {
        if self.color.is_none() && !self.bold {
            return text.to_string();
        }

        let mut styled = text.normal();
        if let Some(color) = self.color {
            styled = styled.color(color);
        }
        if self.bold {
            styled = styled.bold();
        }
        styled.to_string()
    }
}

/// Output styles, one per role in the report.
///
/// The reporter takes whatever theme it is given and never looks at the
/// terminal itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Banner frame and the exit prompt
    pub banner: Style,
    /// `OS:`, `User:` and friends
    pub label: Style,
    /// `Temp Folder:`
    pub path: Style,
    /// Deleted file count
    pub info: Style,
    /// Sizes
    pub success: Style,
    /// Errors and cancellation
    pub error: Style,
}

impl Theme {
    pub fn colored() -> Self {
        Self {
            banner: Style::color(Color::Cyan),
            label: Style::bold(),
            path: Style::color(Color::Yellow),
            info: Style::color(Color::Blue),
            success: Style::color(Color::Green),
            error: Style::color(Color::Red),
        }
    }

    pub fn plain() -> Self {
        Self {
            banner: Style::plain(),
            label: Style::plain(),
            path: Style::plain(),
            info: Style::plain(),
            success: Style::plain(),
            error: Style::plain(),
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Colored => Self::colored(),
            ThemeName::Plain => Self::plain(),
        }
    }

    /// Whether any role carries styling
    pub fn is_styled(&self) -> bool {
        [
            self.banner,
            self.label,
            self.path,
            self.info,
            self.success,
            self.error,
        ]
        .iter()
        .any(|style| *style != Style::plain())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}
