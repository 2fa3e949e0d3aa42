use serde::{Deserialize, Serialize};

/// Physical page layout used by the print flow and the screen page shells.
///
/// Lengths are inches, font size is points, line height is unitless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    #[serde(default = "default_width")]
    pub width_in: f64,
    #[serde(default = "default_height")]
    pub height_in: f64,
    #[serde(default)]
    pub margins_in: Margins,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size_pt: f64,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

fn default_width() -> f64 {
    8.5
}

fn default_height() -> f64 {
    11.0
}

fn default_font_family() -> String {
    "'Courier New','Courier Prime','Noto Serif Telugu','Noto Serif Devanagari',monospace"
        .to_string()
}

fn default_font_size() -> f64 {
    12.0
}

fn default_line_height() -> f64 {
    1.15
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 1.0,
            right: 1.0,
            bottom: 1.0,
            left: 1.5,
        }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width_in: default_width(),
            height_in: default_height(),
            margins_in: Margins::default(),
            font_family: default_font_family(),
            font_size_pt: default_font_size(),
            line_height: default_line_height(),
        }
    }
}

impl PageGeometry {
    /// Width between the left and right margins
    pub fn content_width_in(&self) -> f64 {
        (self.width_in - self.margins_in.left - self.margins_in.right).max(0.0)
    }

    /// Height between the top and bottom margins
    pub fn content_height_in(&self) -> f64 {
        (self.height_in - self.margins_in.top - self.margins_in.bottom).max(0.0)
    }
}
