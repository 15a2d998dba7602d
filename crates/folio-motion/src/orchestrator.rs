//! # Section Orchestrator
//!
//! Builds and plays the single timeline that carries the page from one
//! section to another.
//!
//! ## Responsibilities
//! - **Validation**: out-of-range or same-section requests are no-ops.
//! - **Composition**: current section's exit, its container fade-out, the
//!   target container fade-in, then the target section's entrance.
//! - **Settle**: the caller's callback fires a fixed delay after the last
//!   tween, giving the view a buffer before it re-renders.
//! - **Cancellation**: a new request kills the in-flight transition; the
//!   killed transition's callback never fires.

use crate::animation::Tween;
use crate::config::{MotionConfig, SectionTransitionConfig};
use crate::element::{Color, ElementId};
use crate::error::MotionError;
use crate::registry::{ElementProvider, ElementRegistry};
use crate::sections::{default_sections, SectionChoreography};
use crate::stage::Stage;
use crate::timeline::{Position, Timeline, TimelineHandle};
use tracing::{debug, warn};

/// Opacity above which a non-current container counts as still showing.
const STRAY_OPACITY: f32 = 0.001;

/// Puts the three section containers into their resting state: hero
/// opaque, about and work transparent over `background`.
///
/// All three handles must be present; otherwise nothing is touched.
pub fn initialize_animations(
    stage: &mut Stage,
    hero: Option<ElementId>,
    about: Option<ElementId>,
    work: Option<ElementId>,
    background: Color,
) -> bool {
    let (Some(hero), Some(about), Some(work)) = (hero, about, work) else {
        debug!("section roots not mounted yet, skipping initialization");
        return false;
    };
    if [hero, about, work].iter().any(|&id| stage.element(id).is_none()) {
        debug!("section roots detached, skipping initialization");
        return false;
    }

    stage.set([about, work], &Tween::new().opacity(0.0));
    stage.set_background(about, background);
    stage.set_background(work, background);
    stage.set([hero], &Tween::new().opacity(1.0));
    true
}

pub struct SectionOrchestrator {
    elements: ElementRegistry,
    sections: Vec<Box<dyn SectionChoreography>>,
    transition: SectionTransitionConfig,
    settle_delay: f64,
    background: Color,
    active: Option<TimelineHandle>,
}

impl SectionOrchestrator {
    /// Orchestrator over the built-in Hero/About/Work sections.
    pub fn new(provider: &dyn ElementProvider, config: &MotionConfig) -> Self {
        Self::with_sections(provider, default_sections(), config)
    }

    pub fn with_sections(
        provider: &dyn ElementProvider,
        sections: Vec<Box<dyn SectionChoreography>>,
        config: &MotionConfig,
    ) -> Self {
        Self {
            elements: provider.get_elements(),
            sections,
            transition: config.sections.clone(),
            settle_delay: config.settle_delay_secs(),
            background: config.resting_background,
            active: None,
        }
    }

    pub fn elements(&self) -> &ElementRegistry {
        &self.elements
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn section_name(&self, index: usize) -> Option<&'static str> {
        self.sections.get(index).map(|s| s.name())
    }

    fn validate(&self, index: usize) -> Result<usize, MotionError> {
        if index < self.sections.len() {
            Ok(index)
        } else {
            Err(MotionError::InvalidSectionIndex {
                index,
                count: self.sections.len(),
            })
        }
    }

    /// Applies the resting state to the registered section roots.
    pub fn initialize(&self, stage: &mut Stage) -> bool {
        let [hero, about, work] = self.elements.roots();
        initialize_animations(stage, hero, about, work, self.background)
    }

    pub fn is_transitioning(&self) -> bool {
        self.active.as_ref().is_some_and(TimelineHandle::is_active)
    }

    /// Kills the in-flight transition, if any. Its callback never fires.
    pub fn cancel(&mut self, stage: &mut Stage) -> bool {
        match self.active.take() {
            Some(handle) if handle.is_active() => {
                debug!(reason = %MotionError::TransitionInterrupted, timeline = handle.id.0, "cancelling transition");
                stage.kill(&handle)
            }
            _ => false,
        }
    }

    /// Transitions from `current` to `target`.
    ///
    /// Returns `None` (and never calls `on_complete`) when either index is
    /// out of range or both are equal.
    pub fn navigate_to_section<F>(
        &mut self,
        stage: &mut Stage,
        current: usize,
        target: usize,
        on_complete: F,
    ) -> Option<TimelineHandle>
    where
        F: FnOnce() + 'static,
    {
        let (current, target) = match (self.validate(current), self.validate(target)) {
            (Ok(current), Ok(target)) => (current, target),
            (Err(err), _) | (_, Err(err)) => {
                warn!(%err, "navigation rejected");
                return None;
            }
        };
        if current == target {
            debug!(section = current, "already at section, nothing to do");
            return None;
        }

        self.cancel(stage);

        let mut timeline = Timeline::new(self.transition.timeline_options());
        let elements = &self.elements;

        // Exit
        let leaving = &self.sections[current];
        leaving.exit(&mut timeline, elements, target);
        let fade_out = Tween::new()
            .opacity(0.0)
            .duration(self.transition.container_exit_duration)
            .ease(self.transition.exit_easing);
        timeline.add(
            leaving.root(elements),
            fade_out.clone(),
            Position::Relative(-self.transition.container_exit_overlap),
        );

        // Containers left showing by an interrupted transition go too.
        let strays: Vec<ElementId> = self
            .sections
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != current && i != target)
            .filter_map(|(_, s)| s.root(elements))
            .filter(|&id| stage.get(id, crate::Property::Opacity).unwrap_or(0.0) > STRAY_OPACITY)
            .collect();
        if !strays.is_empty() {
            debug!(count = strays.len(), "fading out stray section containers");
            timeline.add(strays, fade_out, Position::WithPrevious(0.0));
        }

        // Entrance
        let entering = &self.sections[target];
        timeline.add(
            entering.root(elements),
            Tween::new()
                .opacity(1.0)
                .duration(self.transition.container_entrance_duration)
                .ease(self.transition.entrance_easing),
            Position::End,
        );
        entering.entrance(stage, &mut timeline, elements);

        timeline.settle(self.settle_delay).on_complete(on_complete);

        debug!(
            from = leaving.name(),
            to = entering.name(),
            tweens = timeline.tweens().len(),
            duration = timeline.duration(),
            "navigating between sections"
        );

        let handle = stage.play(timeline);
        self.active = Some(handle.clone());
        Some(handle)
    }
}
