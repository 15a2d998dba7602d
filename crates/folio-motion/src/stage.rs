//! # Stage
//!
//! Arena-based storage for view elements plus the per-frame driver.
//!
//! ## Responsibilities
//! - **Element Storage**: `Vec<Option<Element>>` arena with `ElementId` indices
//!   and slot reuse after removal.
//! - **Animation**: owns the animator; `play`, `set`, `kill` and `tick` are
//!   the only ways properties change over time.
//! - **Shared Page State**: viewport size and the document scroll lock.

use crate::animation::{Property, Tween};
use crate::animator::{Animator, PropertySink};
use crate::element::{BoundingBox, Color, Element, ElementId, Positioning};
use crate::error::MotionError;
use crate::timeline::{Timeline, TimelineHandle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{trace, warn};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
        }
    }
}

/// The document-level "scroll enabled" toggle.
///
/// A single global flag: locking twice does not nest.
#[derive(Debug, Default)]
pub struct ScrollLock {
    locked: bool,
    lock_count: u64,
    unlock_count: u64,
}

impl ScrollLock {
    pub fn lock(&mut self) {
        self.locked = true;
        self.lock_count += 1;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
        self.unlock_count += 1;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// (disable calls, enable calls) issued so far.
    pub fn history(&self) -> (u64, u64) {
        (self.lock_count, self.unlock_count)
    }
}

#[derive(Default)]
struct ElementArena {
    elements: Vec<Option<Element>>,
    free_indices: Vec<usize>,
}

impl PropertySink for ElementArena {
    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0).and_then(|e| e.as_mut())
    }
}

#[derive(Default)]
pub struct Stage {
    arena: ElementArena,
    animator: Animator,
    viewport: Viewport,
    scroll_lock: ScrollLock,
}

impl Stage {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    // ============ Elements ============

    pub fn add_element(&mut self, element: Element) -> ElementId {
        if let Some(index) = self.arena.free_indices.pop() {
            self.arena.elements[index] = Some(element);
            ElementId(index)
        } else {
            self.arena.elements.push(Some(element));
            ElementId(self.arena.elements.len() - 1)
        }
    }

    /// Detaches an element. Tweens still targeting it are dropped on the
    /// next tick.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.arena.elements.get_mut(id.0).and_then(Option::take);
        if removed.is_some() {
            self.arena.free_indices.push(id.0);
        }
        removed
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.arena.elements.get(id.0).and_then(|e| e.as_ref())
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.arena.element_mut(id)
    }

    pub fn try_element(&self, id: ElementId) -> Result<&Element, MotionError> {
        self.element(id)
            .ok_or_else(|| MotionError::MissingElement(id.to_string()))
    }

    pub fn get(&self, id: ElementId, property: Property) -> Option<f32> {
        self.element(id).map(|e| e.props.get(property))
    }

    /// Looks an element up by the name it was mounted with.
    pub fn find(&self, name: &str) -> Option<ElementId> {
        self.arena
            .elements
            .iter()
            .position(|e| e.as_ref().is_some_and(|e| e.name == name))
            .map(ElementId)
    }

    pub fn bounding_box(&self, id: ElementId) -> Option<BoundingBox> {
        self.element(id)
            .map(|e| e.props.bounding_box())
            .filter(BoundingBox::has_area)
    }

    pub fn set_background(&mut self, id: ElementId, color: Color) {
        if let Some(element) = self.element_mut(id) {
            element.background = Some(color);
        }
    }

    pub fn set_positioning(&mut self, id: ElementId, positioning: Positioning, z_index: i32) {
        if let Some(element) = self.element_mut(id) {
            element.positioning = positioning;
            element.z_index = z_index;
        }
    }

    pub fn set_mounted(&mut self, id: ElementId, mounted: bool) {
        if let Some(element) = self.element_mut(id) {
            element.mounted = mounted;
        }
    }

    /// All live elements in arena order.
    pub fn snapshot(&self) -> Vec<(ElementId, Element)> {
        self.arena
            .elements
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.clone().map(|e| (ElementId(i), e)))
            .collect()
    }

    // ============ Animation ============

    /// Applies property values immediately, outside any timeline.
    ///
    /// Live tweens on the same element/property pairs are halted first so
    /// they cannot overwrite the value on the next frame.
    pub fn set<I>(&mut self, targets: I, tween: &Tween)
    where
        I: IntoIterator<Item = ElementId>,
    {
        let targets: Vec<ElementId> = targets.into_iter().collect();
        let pairs: BTreeSet<(ElementId, Property)> = targets
            .iter()
            .flat_map(|&id| tween.props.iter().map(move |&(p, _)| (id, p)))
            .collect();
        self.animator.halt(&pairs);

        for id in targets {
            let Some(element) = self.element_mut(id) else {
                trace!(element = %id, "set skipped, element absent");
                continue;
            };
            for &(property, value) in &tween.props {
                element.props.set(property, value);
            }
        }
    }

    pub fn play(&mut self, timeline: Timeline) -> TimelineHandle {
        self.animator.play(timeline)
    }

    pub fn kill(&mut self, handle: &TimelineHandle) -> bool {
        self.animator.kill(handle)
    }

    /// The plan behind a live timeline, for inspection.
    pub fn timeline(&self, handle: &TimelineHandle) -> Option<&Timeline> {
        self.animator.timeline(handle)
    }

    pub fn is_animating(&self, id: ElementId) -> bool {
        self.animator.is_animating(id)
    }

    pub fn live_timelines(&self) -> usize {
        self.animator.live_count()
    }

    /// Seconds since the stage was created.
    pub fn now(&self) -> f64 {
        self.animator.now()
    }

    /// Advances all live timelines by `dt` seconds, then fires the
    /// completion callbacks of those that finished.
    pub fn tick(&mut self, dt: f64) {
        if !dt.is_finite() {
            warn!(dt, "ignoring non-finite frame delta");
            return;
        }
        let callbacks = self.animator.tick(dt, &mut self.arena);
        for callback in callbacks {
            callback();
        }
    }

    // ============ Page State ============

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    pub fn scroll_lock_mut(&mut self) -> &mut ScrollLock {
        &mut self.scroll_lock
    }
}
