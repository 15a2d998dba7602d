//! # folio-motion
//!
//! Headless choreography engine for a scroll-driven portfolio page.
//!
//! A `Stage` holds the view elements and is advanced one frame at a time
//! with `Stage::tick`. On top of it:
//! - `Timeline` sequences tweens with overlap-capable offsets and a single
//!   completion signal.
//! - `SectionOrchestrator` drives Hero → About → Work transitions.
//! - `OverlayController` morphs a clicked card into a full-viewport overlay
//!   and back.
//! - `Page` wires all of it together with scroll and keyboard input.

pub mod animation;
mod animator;
pub mod config;
pub mod element;
pub mod error;
pub mod layout;
pub mod navigator;
pub mod orchestrator;
pub mod overlay;
pub mod page;
pub mod registry;
pub mod sections;
pub mod stage;
pub mod timeline;

pub use animation::{EasingType, Property, Tween};
pub use config::MotionConfig;
pub use element::{BoundingBox, Color, Element, ElementId};
pub use error::MotionError;
pub use orchestrator::{initialize_animations, SectionOrchestrator};
pub use overlay::{OverlayController, OverlayPhase, OverlayVariant};
pub use page::{Page, PageContent};
pub use registry::{ElementProvider, ElementRegistry};
pub use stage::{Stage, Viewport};
pub use timeline::{PlayState, Position, Timeline, TimelineHandle, TimelineOptions};
