//! # Animation Primitives
//!
//! Easing curves, animatable properties and the `Tween` vars builder that
//! timelines are assembled from.
//!
//! ## Key Types
//! - `EasingType`: uniform easing enum evaluated through `keyframe`.
//! - `Property`: the numeric element properties a tween may drive.
//! - `Tween`: property targets plus optional duration/easing overrides.

use keyframe::{CanTween, EasingFunction};
use serde::{Deserialize, Serialize};

// Define our own enum to store easing types uniformly
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseOutQuart,
    /// Slight overshoot past the target before settling.
    BackOut,
}

impl EasingFunction for EasingType {
    fn y(&self, x: f64) -> f64 {
        match self {
            EasingType::Linear => keyframe::functions::Linear.y(x),
            EasingType::EaseIn => keyframe::functions::EaseIn.y(x),
            EasingType::EaseOut => keyframe::functions::EaseOut.y(x),
            EasingType::EaseInOut => keyframe::functions::EaseInOut.y(x),
            EasingType::EaseInCubic => keyframe::functions::EaseInCubic.y(x),
            EasingType::EaseOutCubic => keyframe::functions::EaseOutCubic.y(x),
            EasingType::EaseInOutCubic => keyframe::functions::EaseInOutCubic.y(x),
            EasingType::EaseOutQuart => keyframe::functions::EaseOutQuart.y(x),
            // keyframe has no back curves
            EasingType::BackOut => {
                const C1: f64 = 1.70158;
                const C3: f64 = C1 + 1.0;
                let t = x - 1.0;
                1.0 + C3 * t * t * t + C1 * t * t
            }
        }
    }
}

impl EasingType {
    pub fn eval(&self, x: f32) -> f32 {
        self.y(x as f64) as f32
    }
}

/// Interpolates between two property values at eased progress `t`.
///
/// `t >= 1.0` returns `to` exactly so finished tweens never drift.
pub fn interpolate(from: f32, to: f32, t: f64, easing: EasingType) -> f32 {
    if t >= 1.0 {
        return to;
    }
    let eased = easing.y(t.max(0.0));
    f32::ease(from, to, eased)
}

/// Numeric element properties that tweens can drive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    X,
    Y,
    Scale,
    Rotation,
    Blur,
    Top,
    Left,
    Width,
    Height,
    BorderRadius,
}

/// The vars of one tween: target values, plus duration/easing overrides.
///
/// Missing duration or easing fall back to the owning timeline's defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tween {
    pub props: Vec<(Property, f32)>,
    pub duration: Option<f64>,
    pub easing: Option<EasingType>,
}

impl Tween {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or replaces) the target value of a property.
    pub fn prop(mut self, property: Property, value: f32) -> Self {
        if let Some(slot) = self.props.iter_mut().find(|(p, _)| *p == property) {
            slot.1 = value;
        } else {
            self.props.push((property, value));
        }
        self
    }

    pub fn opacity(self, value: f32) -> Self {
        self.prop(Property::Opacity, value)
    }

    pub fn x(self, value: f32) -> Self {
        self.prop(Property::X, value)
    }

    pub fn y(self, value: f32) -> Self {
        self.prop(Property::Y, value)
    }

    pub fn scale(self, value: f32) -> Self {
        self.prop(Property::Scale, value)
    }

    pub fn rotation(self, value: f32) -> Self {
        self.prop(Property::Rotation, value)
    }

    pub fn blur(self, value: f32) -> Self {
        self.prop(Property::Blur, value)
    }

    pub fn border_radius(self, value: f32) -> Self {
        self.prop(Property::BorderRadius, value)
    }

    /// Targets all four geometry properties of a box.
    pub fn geometry(self, top: f32, left: f32, width: f32, height: f32) -> Self {
        self.prop(Property::Top, top)
            .prop(Property::Left, left)
            .prop(Property::Width, width)
            .prop(Property::Height, height)
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds.max(0.0));
        self
    }

    pub fn ease(mut self, easing: EasingType) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            EasingType::Linear,
            EasingType::EaseIn,
            EasingType::EaseOut,
            EasingType::EaseInOut,
            EasingType::EaseInCubic,
            EasingType::EaseOutCubic,
            EasingType::EaseInOutCubic,
            EasingType::EaseOutQuart,
            EasingType::BackOut,
        ] {
            assert!(easing.eval(0.0).abs() < 1e-4, "{:?} at 0", easing);
            assert!((easing.eval(1.0) - 1.0).abs() < 1e-4, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (1..100)
            .map(|i| EasingType::BackOut.eval(i as f32 / 100.0))
            .fold(0.0f32, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_interpolate_lands_exactly() {
        assert_eq!(interpolate(0.3, 1.0, 1.0, EasingType::EaseInOut), 1.0);
        assert_eq!(interpolate(0.3, 1.0, 2.5, EasingType::Linear), 1.0);
        let mid = interpolate(0.0, 10.0, 0.5, EasingType::Linear);
        assert!((mid - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_tween_prop_replaces_existing() {
        let tween = Tween::new().opacity(0.0).y(20.0).opacity(1.0);
        assert_eq!(tween.props, vec![(Property::Opacity, 1.0), (Property::Y, 20.0)]);
    }
}
