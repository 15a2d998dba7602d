//! # Configuration
//!
//! Timing knobs for the orchestrator, overlays and scroll navigation.
//! Every field has a default, so a partial JSON document only overrides
//! what it names.

use crate::animation::EasingType;
use crate::element::Color;
use crate::error::Result;
use crate::stage::Viewport;
use crate::timeline::{TimelineOptions, TweenDefaults};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Pause between a section transition's last tween and its callback.
    pub settle_delay_ms: u64,
    /// Background applied to hidden section containers at startup.
    pub resting_background: Color,
    pub viewport: Viewport,
    pub sections: SectionTransitionConfig,
    pub overlay: OverlayConfig,
    pub navigation: NavigationConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 500,
            resting_background: Color::rgb(0x0a, 0x0a, 0x0a),
            viewport: Viewport::default(),
            sections: SectionTransitionConfig::default(),
            overlay: OverlayConfig::default(),
            navigation: NavigationConfig::default(),
        }
    }
}

impl MotionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn settle_delay_secs(&self) -> f64 {
        self.settle_delay_ms as f64 / 1000.0
    }
}

/// Root-container fades wrapped around the per-section choreography.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionTransitionConfig {
    pub container_exit_duration: f64,
    /// How far the container fade-out reaches back into the exit tweens.
    pub container_exit_overlap: f64,
    pub container_entrance_duration: f64,
    pub exit_easing: EasingType,
    pub entrance_easing: EasingType,
    pub default_duration: f64,
}

impl Default for SectionTransitionConfig {
    fn default() -> Self {
        Self {
            container_exit_duration: 0.6,
            container_exit_overlap: 0.4,
            container_entrance_duration: 0.5,
            exit_easing: EasingType::EaseIn,
            entrance_easing: EasingType::EaseOut,
            default_duration: 0.8,
        }
    }
}

impl SectionTransitionConfig {
    pub fn timeline_options(&self) -> TimelineOptions {
        TimelineOptions {
            defaults: TweenDefaults {
                duration: self.default_duration,
                easing: EasingType::EaseOutCubic,
            },
            delay: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub open_duration: f64,
    pub open_easing: EasingType,
    pub close_duration: f64,
    pub close_easing: EasingType,
    /// Corner radius of the card the overlay grows out of.
    pub initial_radius: f32,
    pub z_index: i32,
    pub content_duration: f64,
    pub content_stagger: f64,
    /// Vertical offset content slides in from.
    pub content_offset: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            open_duration: 0.8,
            open_easing: EasingType::EaseOutCubic,
            close_duration: 0.7,
            close_easing: EasingType::EaseInOutCubic,
            initial_radius: 24.0,
            z_index: 50,
            content_duration: 0.5,
            content_stagger: 0.1,
            content_offset: 30.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Accumulated wheel delta needed to move one section.
    pub wheel_threshold: f32,
    /// Drop wheel/key input while a transition is still animating.
    pub block_while_transitioning: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            wheel_threshold: 50.0,
            block_while_transitioning: true,
        }
    }
}
