//! # Elements
//!
//! The headless stand-in for a rendered view element: a named bag of
//! animatable properties plus a little non-animated style.

use crate::animation::Property;
use crate::error::MotionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of an element in the `Stage` arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An sRGB color with alpha.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(literal: &str) -> Result<Self, MotionError> {
        let invalid = || MotionError::InvalidColor(literal.to_string());
        let hex = literal.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 | 8 => {
                let a = if hex.len() == 8 { channel(&hex[6..8])? } else { 255 };
                Ok(Self {
                    r: channel(&hex[0..2])?,
                    g: channel(&hex[2..4])?,
                    b: channel(&hex[4..6])?,
                    a,
                })
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = MotionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// How an element is positioned relative to the page.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Positioning {
    #[default]
    Static,
    /// Pinned to the viewport, used by the overlay morph.
    Fixed,
}

/// Viewport-relative rectangle of an element, captured at click time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Whether layout has produced a usable rectangle.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn approx_eq(&self, other: &BoundingBox, tolerance: f32) -> bool {
        (self.top - other.top).abs() <= tolerance
            && (self.left - other.left).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

/// Animated property values of one element.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ElementProps {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub rotation: f32,
    pub blur: f32,
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
    pub border_radius: f32,
}

impl Default for ElementProps {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            blur: 0.0,
            top: 0.0,
            left: 0.0,
            width: 0.0,
            height: 0.0,
            border_radius: 0.0,
        }
    }
}

impl ElementProps {
    pub fn get(&self, property: Property) -> f32 {
        match property {
            Property::Opacity => self.opacity,
            Property::X => self.x,
            Property::Y => self.y,
            Property::Scale => self.scale,
            Property::Rotation => self.rotation,
            Property::Blur => self.blur,
            Property::Top => self.top,
            Property::Left => self.left,
            Property::Width => self.width,
            Property::Height => self.height,
            Property::BorderRadius => self.border_radius,
        }
    }

    pub fn set(&mut self, property: Property, value: f32) {
        let slot = match property {
            Property::Opacity => &mut self.opacity,
            Property::X => &mut self.x,
            Property::Y => &mut self.y,
            Property::Scale => &mut self.scale,
            Property::Rotation => &mut self.rotation,
            Property::Blur => &mut self.blur,
            Property::Top => &mut self.top,
            Property::Left => &mut self.left,
            Property::Width => &mut self.width,
            Property::Height => &mut self.height,
            Property::BorderRadius => &mut self.border_radius,
        };
        *slot = value;
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.top, self.left, self.width, self.height)
    }
}

/// One view element.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Element {
    pub name: String,
    pub props: ElementProps,
    pub background: Option<Color>,
    pub positioning: Positioning,
    pub z_index: i32,
    /// Unmounted elements are kept in the arena but not rendered.
    pub mounted: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            props: ElementProps::default(),
            background: None,
            positioning: Positioning::Static,
            z_index: 0,
            mounted: true,
        }
    }

    pub fn with_box(mut self, bounds: BoundingBox) -> Self {
        self.props.top = bounds.top;
        self.props.left = bounds.left;
        self.props.width = bounds.width;
        self.props.height = bounds.height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_forms() {
        assert_eq!(Color::from_hex("#0a0a0a").unwrap(), Color::rgb(10, 10, 10));
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::rgb(255, 255, 255));
        let translucent = Color::from_hex("#00000080").unwrap();
        assert_eq!(translucent.a, 128);
        assert_eq!(translucent.to_string(), "#00000080");
    }

    #[test]
    fn test_color_rejects_garbage() {
        assert!(Color::from_hex("0a0a0a").is_err());
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_props_get_set_roundtrip_by_property() {
        let mut props = ElementProps::default();
        props.set(Property::BorderRadius, 24.0);
        props.set(Property::Opacity, 0.25);
        assert_eq!(props.get(Property::BorderRadius), 24.0);
        assert_eq!(props.get(Property::Opacity), 0.25);
        assert_eq!(props.get(Property::Scale), 1.0);
    }
}
