//! Style descriptors handed to toolkit elements at construction time.
//!
//! The toolkit never interprets fills or fonts itself; it passes these records
//! to a renderer together with the target size. All descriptors deserialize
//! from the `[theme]` section of the configuration file.

use super::color::Color;
use serde::{Deserialize, Serialize};

/// How an area is filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FillStyle {
    /// A single color.
    Solid { color: Color },
    /// Left-to-right gradient.
    HorizontalGradient { from: Color, to: Color },
    /// Top-to-bottom gradient.
    VerticalGradient { from: Color, to: Color },
    /// Top-left to bottom-right gradient.
    DiagonalGradient { from: Color, to: Color },
}

impl FillStyle {
    pub const fn solid(color: Color) -> Self {
        FillStyle::Solid { color }
    }

    /// The color at the start of the fill.
    pub fn primary_color(&self) -> Color {
        match self {
            FillStyle::Solid { color } => *color,
            FillStyle::HorizontalGradient { from, .. }
            | FillStyle::VerticalGradient { from, .. }
            | FillStyle::DiagonalGradient { from, .. } => *from,
        }
    }
}

impl Default for FillStyle {
    fn default() -> Self {
        FillStyle::solid(Color::from_argb32(0xff202020))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Font face, weight and size in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontStyle {
    pub face: String,
    pub weight: FontWeight,
    pub size: u32,
}

impl Default for FontStyle {
    fn default() -> Self {
        FontStyle {
            face: "Helvetica".to_string(),
            weight: FontWeight::Normal,
            size: 15,
        }
    }
}

/// Width and color of margins, borders and box spacers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarginStyle {
    pub width: i32,
    pub color: Color,
}

impl Default for MarginStyle {
    fn default() -> Self {
        MarginStyle {
            width: 1,
            color: Color::BLACK,
        }
    }
}

/// Look of one menu item, in each of its three states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuItemStyle {
    pub fill: FillStyle,
    pub highlighted_fill: FillStyle,
    pub font: FontStyle,
    pub enabled_text_color: Color,
    pub highlighted_text_color: Color,
    pub disabled_text_color: Color,
    pub width: i32,
    pub height: i32,
    pub bezel_width: i32,
}

impl Default for MenuItemStyle {
    fn default() -> Self {
        MenuItemStyle {
            fill: FillStyle::VerticalGradient {
                from: Color::from_argb32(0xffc2c0c5),
                to: Color::from_argb32(0xff828085),
            },
            highlighted_fill: FillStyle::solid(Color::from_argb32(0xffffffff)),
            font: FontStyle::default(),
            enabled_text_color: Color::from_argb32(0xff000000),
            highlighted_text_color: Color::from_argb32(0xff000000),
            disabled_text_color: Color::from_argb32(0xff808080),
            width: 200,
            height: 22,
            bezel_width: 1,
        }
    }
}

/// Look of a menu: the border around it, the spacers between items and the
/// items themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct MenuStyle {
    pub border: MarginStyle,
    pub margin: MarginStyle,
    pub item: MenuItemStyle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fill_style_tagged_deserialize() {
        let fill: FillStyle =
            toml::from_str("type = \"horizontal_gradient\"\nfrom = \"#000000\"\nto = \"#ffffff\"")
                .unwrap();
        assert_eq!(
            fill,
            FillStyle::HorizontalGradient { from: Color::BLACK, to: Color::WHITE }
        );
        assert_eq!(fill.primary_color(), Color::BLACK);
    }

    #[test]
    fn test_menu_style_partial_uses_defaults() {
        let style: MenuStyle = toml::from_str(
            r##"
            [item]
            height = 30

            [item.font]
            weight = "bold"
            "##,
        )
        .unwrap();
        assert_eq!(style.item.height, 30);
        assert_eq!(style.item.width, MenuItemStyle::default().width);
        assert_eq!(style.item.font.weight, FontWeight::Bold);
        assert_eq!(style.item.font.face, "Helvetica");
        assert_eq!(style.border, MarginStyle::default());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<MarginStyle, _> = toml::from_str("width = 2\nstyle = \"dotted\"");
        assert!(result.is_err());
    }
}
