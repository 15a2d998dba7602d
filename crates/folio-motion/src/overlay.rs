//! # Overlay Morph
//!
//! Grows a clicked card's rectangle into a full-viewport overlay and shrinks
//! it back on close.
//!
//! ## Phases
//! `Closed → Opening → (Revealing) → Open → (Concealing) → Closing → Closed`
//!
//! The bracketed phases only exist for the project-modal variant, whose
//! title/type/line content staggers in after the geometry morph finishes and
//! fades out (last item first) before the reverse morph starts. Phases are
//! advanced by `update`, which polls timeline handles once per frame.
//!
//! The overlay holds the document scroll lock from `open` until the reverse
//! morph completes, and always releases it exactly once.

use crate::animation::{Property, Tween};
use crate::config::OverlayConfig;
use crate::element::{BoundingBox, ElementId, Positioning};
use crate::stage::Stage;
use crate::timeline::{Callback, Position, Timeline, TimelineHandle, TimelineOptions};
use tracing::{debug, warn};

/// Text elements layered over the morphing box of the project modal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentElements {
    pub title: Option<ElementId>,
    pub kind: Option<ElementId>,
    pub line: Option<ElementId>,
}

impl ContentElements {
    fn in_order(&self) -> Vec<ElementId> {
        [self.title, self.kind, self.line].into_iter().flatten().collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayVariant {
    /// Card grid overlay: geometry morph only.
    WorkCard,
    /// Project modal: geometry morph, then a content stagger.
    ProjectModal(ContentElements),
}

/// One open→close cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlaySession {
    pub source: BoundingBox,
    /// Identifier of the content rendered inside, e.g. a project index.
    pub content: usize,
    pub is_open: bool,
}

#[derive(Clone, Debug, Default)]
pub enum OverlayPhase {
    #[default]
    Closed,
    Opening(TimelineHandle),
    Revealing(TimelineHandle),
    Open,
    Concealing(TimelineHandle),
    Closing(TimelineHandle),
}

impl OverlayPhase {
    pub fn name(&self) -> &'static str {
        match self {
            OverlayPhase::Closed => "closed",
            OverlayPhase::Opening(_) => "opening",
            OverlayPhase::Revealing(_) => "revealing",
            OverlayPhase::Open => "open",
            OverlayPhase::Concealing(_) => "concealing",
            OverlayPhase::Closing(_) => "closing",
        }
    }
}

pub struct OverlayController {
    variant: OverlayVariant,
    overlay: ElementId,
    config: OverlayConfig,
    session: Option<OverlaySession>,
    phase: OverlayPhase,
    holds_scroll_lock: bool,
    on_closed: Option<Callback>,
}

impl OverlayController {
    pub fn new(variant: OverlayVariant, overlay: ElementId, config: OverlayConfig) -> Self {
        Self {
            variant,
            overlay,
            config,
            session: None,
            phase: OverlayPhase::Closed,
            holds_scroll_lock: false,
            on_closed: None,
        }
    }

    pub fn session(&self) -> Option<&OverlaySession> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> &OverlayPhase {
        &self.phase
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn overlay(&self) -> ElementId {
        self.overlay
    }

    fn timeline(&self) -> Timeline {
        Timeline::new(TimelineOptions::default())
    }

    /// Starts the morph from `source` to the full viewport.
    ///
    /// A missing rectangle (layout not ready), an already active session or
    /// a scroll lock held by another overlay make this a no-op.
    pub fn open(&mut self, stage: &mut Stage, source: Option<BoundingBox>, content: usize) -> bool {
        let Some(source) = source else {
            debug!("no source geometry yet, overlay stays closed");
            return false;
        };
        if self.session.is_some() {
            warn!(phase = self.phase.name(), "overlay already active, ignoring open");
            return false;
        }
        if stage.scroll_lock().is_locked() {
            warn!("scroll lock held by another overlay, ignoring open");
            return false;
        }
        if stage.element(self.overlay).is_none() {
            debug!(overlay = %self.overlay, "overlay element absent");
            return false;
        }

        stage.set(
            [self.overlay],
            &Tween::new()
                .geometry(source.top, source.left, source.width, source.height)
                .border_radius(self.config.initial_radius)
                .opacity(1.0),
        );
        stage.set_positioning(self.overlay, Positioning::Fixed, self.config.z_index);
        stage.set_mounted(self.overlay, true);
        if let OverlayVariant::ProjectModal(content) = &self.variant {
            let offset = self.config.content_offset;
            stage.set(content.in_order(), &Tween::new().opacity(0.0).y(offset));
        }

        stage.scroll_lock_mut().lock();
        self.holds_scroll_lock = true;

        let viewport = stage.viewport();
        let mut timeline = self.timeline();
        timeline.add(
            [self.overlay],
            Tween::new()
                .geometry(0.0, 0.0, viewport.width, viewport.height)
                .border_radius(0.0)
                .duration(self.config.open_duration)
                .ease(self.config.open_easing),
            Position::End,
        );

        debug!(content, ?source, "opening overlay");
        self.session = Some(OverlaySession {
            source,
            content,
            is_open: true,
        });
        self.phase = OverlayPhase::Opening(stage.play(timeline));
        true
    }

    /// Reverses the overlay back into its source rectangle.
    ///
    /// `on_closed` fires once the overlay is torn down. Calling `close` while
    /// already closing keeps the first callback and ignores this one.
    pub fn close<F>(&mut self, stage: &mut Stage, on_closed: F) -> bool
    where
        F: FnOnce() + 'static,
    {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.is_open {
            return false;
        }
        session.is_open = false;
        self.on_closed = Some(Box::new(on_closed));

        match std::mem::take(&mut self.phase) {
            OverlayPhase::Opening(morph) => {
                // reverse from wherever the box is right now
                stage.kill(&morph);
                self.start_reverse_morph(stage);
            }
            OverlayPhase::Revealing(reveal) => {
                stage.kill(&reveal);
                self.start_conceal(stage);
            }
            OverlayPhase::Open => self.start_conceal(stage),
            other => self.phase = other,
        }
        debug!(phase = self.phase.name(), "closing overlay");
        true
    }

    fn start_conceal(&mut self, stage: &mut Stage) {
        let items = match &self.variant {
            OverlayVariant::ProjectModal(content) => content.in_order(),
            OverlayVariant::WorkCard => Vec::new(),
        };
        if items.is_empty() {
            self.start_reverse_morph(stage);
            return;
        }

        let mut timeline = self.timeline();
        timeline.stagger(
            items.into_iter().rev(),
            Tween::new()
                .opacity(0.0)
                .y(self.config.content_offset)
                .duration(self.config.content_duration)
                .ease(crate::EasingType::EaseIn),
            self.config.content_stagger,
            Position::End,
        );
        self.phase = OverlayPhase::Concealing(stage.play(timeline));
    }

    fn start_reverse_morph(&mut self, stage: &mut Stage) {
        let Some(source) = self.session.as_ref().map(|s| s.source) else {
            return;
        };
        let mut timeline = self.timeline();
        timeline.add(
            [self.overlay],
            Tween::new()
                .geometry(source.top, source.left, source.width, source.height)
                .border_radius(self.config.initial_radius)
                .duration(self.config.close_duration)
                .ease(self.config.close_easing),
            Position::End,
        );
        self.phase = OverlayPhase::Closing(stage.play(timeline));
    }

    fn start_reveal(&mut self, stage: &mut Stage) {
        let items = match &self.variant {
            OverlayVariant::ProjectModal(content) => content.in_order(),
            OverlayVariant::WorkCard => Vec::new(),
        };
        if items.is_empty() {
            self.phase = OverlayPhase::Open;
            return;
        }

        let mut timeline = self.timeline();
        timeline.stagger(
            items,
            Tween::new()
                .opacity(1.0)
                .y(0.0)
                .duration(self.config.content_duration)
                .ease(crate::EasingType::EaseOutCubic),
            self.config.content_stagger,
            Position::End,
        );
        self.phase = OverlayPhase::Revealing(stage.play(timeline));
    }

    fn teardown(&mut self, stage: &mut Stage) {
        stage.set_mounted(self.overlay, false);
        stage.set_positioning(self.overlay, Positioning::Static, 0);
        if self.holds_scroll_lock {
            stage.scroll_lock_mut().unlock();
            self.holds_scroll_lock = false;
        }
        self.session = None;
        self.phase = OverlayPhase::Closed;
        debug!("overlay closed");
        if let Some(callback) = self.on_closed.take() {
            callback();
        }
    }

    /// Advances the phase machine. Call once per frame after `Stage::tick`.
    pub fn update(&mut self, stage: &mut Stage) {
        // Killed handles advance like completed ones.
        let finished = match &self.phase {
            OverlayPhase::Opening(h)
            | OverlayPhase::Revealing(h)
            | OverlayPhase::Concealing(h)
            | OverlayPhase::Closing(h) => !h.is_active(),
            OverlayPhase::Closed | OverlayPhase::Open => false,
        };
        if !finished {
            return;
        }

        match std::mem::take(&mut self.phase) {
            OverlayPhase::Opening(_) => self.start_reveal(stage),
            OverlayPhase::Revealing(_) => self.phase = OverlayPhase::Open,
            OverlayPhase::Concealing(_) => self.start_reverse_morph(stage),
            OverlayPhase::Closing(_) => self.teardown(stage),
            other => self.phase = other,
        }
    }

    /// Keeps a fully open overlay covering the viewport after a resize.
    pub fn handle_viewport_resize(&mut self, stage: &mut Stage) {
        if matches!(self.phase, OverlayPhase::Open | OverlayPhase::Revealing(_)) {
            let viewport = stage.viewport();
            stage.set(
                [self.overlay],
                &Tween::new().geometry(0.0, 0.0, viewport.width, viewport.height),
            );
        }
    }

    /// Current geometry of the overlay element.
    pub fn geometry(&self, stage: &Stage) -> Option<BoundingBox> {
        stage.element(self.overlay).map(|e| e.props.bounding_box())
    }

    /// Corner radius of the overlay element.
    pub fn radius(&self, stage: &Stage) -> Option<f32> {
        stage.get(self.overlay, Property::BorderRadius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::stage::Viewport;

    fn stage_with_overlay() -> (Stage, ElementId) {
        let mut stage = Stage::new(Viewport {
            width: 1000.0,
            height: 800.0,
        });
        let overlay = stage.add_element(Element::new("overlay"));
        stage.set_mounted(overlay, false);
        (stage, overlay)
    }

    #[test]
    fn test_open_positions_at_source_synchronously() {
        let (mut stage, overlay) = stage_with_overlay();
        let mut controller =
            OverlayController::new(OverlayVariant::WorkCard, overlay, OverlayConfig::default());
        let source = BoundingBox::new(120.0, 80.0, 320.0, 240.0);

        assert!(controller.open(&mut stage, Some(source), 3));
        assert_eq!(controller.geometry(&stage), Some(source));
        let element = stage.element(overlay).unwrap();
        assert!(element.mounted);
        assert_eq!(element.positioning, Positioning::Fixed);
        assert_eq!(element.z_index, 50);
        assert!(stage.scroll_lock().is_locked());
        assert_eq!(controller.session().unwrap().content, 3);
    }

    #[test]
    fn test_open_without_geometry_is_noop() {
        let (mut stage, overlay) = stage_with_overlay();
        let mut controller =
            OverlayController::new(OverlayVariant::WorkCard, overlay, OverlayConfig::default());
        assert!(!controller.open(&mut stage, None, 0));
        assert!(!stage.scroll_lock().is_locked());
        assert!(!stage.element(overlay).unwrap().mounted);
        assert!(matches!(controller.phase(), OverlayPhase::Closed));
    }

    #[test]
    fn test_second_open_keeps_first_session() {
        let (mut stage, overlay) = stage_with_overlay();
        let mut controller =
            OverlayController::new(OverlayVariant::WorkCard, overlay, OverlayConfig::default());
        let first = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        assert!(controller.open(&mut stage, Some(first), 0));
        assert!(!controller.open(&mut stage, Some(BoundingBox::new(5.0, 5.0, 50.0, 50.0)), 1));
        assert_eq!(controller.session().unwrap().source, first);
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let (mut stage, overlay) = stage_with_overlay();
        let mut controller =
            OverlayController::new(OverlayVariant::WorkCard, overlay, OverlayConfig::default());
        assert!(!controller.close(&mut stage, || {}));
        assert_eq!(stage.scroll_lock().history(), (0, 0));
    }
}
