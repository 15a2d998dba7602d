//! # Animator
//!
//! Runtime side of timelines. Each played `Timeline` is flattened into one
//! track per (element, property) and advanced on every frame tick.
//!
//! Invariants:
//! - A track captures its start value the first time it becomes active,
//!   so cascading tweens on one element pick up where the last one left off.
//! - At most one live timeline drives a given (element, property) pair.
//!   Playing a new timeline (or an immediate set) strips the pair from every
//!   older timeline; the element keeps its current interpolated value.
//! - A killed timeline never fires its callback.

use crate::animation::{interpolate, EasingType, Property};
use crate::element::{Element, ElementId};
use crate::timeline::{Callback, PlayState, Timeline, TimelineHandle, TimelineId};
use std::collections::BTreeSet;
use tracing::trace;

/// Element storage the animator writes into.
pub(crate) trait PropertySink {
    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element>;
}

#[derive(Debug)]
struct Track {
    element: ElementId,
    property: Property,
    to: f32,
    start: f64,
    duration: f64,
    easing: EasingType,
    from: Option<f32>,
    done: bool,
}

impl Track {
    fn end(&self) -> f64 {
        self.start + self.duration
    }

    fn progress(&self, local: f64) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            ((local - self.start) / self.duration).clamp(0.0, 1.0)
        }
    }
}

struct LiveTimeline {
    handle: TimelineHandle,
    started_at: f64,
    finish_at: f64,
    timeline: Timeline,
    tracks: Vec<Track>,
    callback: Option<Callback>,
}

#[derive(Default)]
pub(crate) struct Animator {
    clock: f64,
    next_id: u64,
    live: Vec<LiveTimeline>,
}

impl Animator {
    pub fn now(&self) -> f64 {
        self.clock
    }

    pub fn play(&mut self, mut timeline: Timeline) -> TimelineHandle {
        let pairs = timeline.targets();
        self.halt(&pairs);

        let id = TimelineId(self.next_id);
        self.next_id += 1;
        let handle = TimelineHandle::new(id);

        let tracks = timeline
            .tweens()
            .iter()
            .flat_map(|spec| {
                spec.targets.iter().flat_map(move |&element| {
                    spec.props.iter().map(move |&(property, to)| Track {
                        element,
                        property,
                        to,
                        start: spec.start,
                        duration: spec.duration,
                        easing: spec.easing,
                        from: None,
                        done: false,
                    })
                })
            })
            .collect();

        let callback = timeline.take_callback();
        trace!(
            timeline = id.0,
            tweens = timeline.tweens().len(),
            duration = timeline.duration(),
            "playing timeline"
        );

        self.live.push(LiveTimeline {
            handle: handle.clone(),
            started_at: self.clock,
            finish_at: timeline.total_duration(),
            timeline,
            tracks,
            callback,
        });
        handle
    }

    /// Removes every live track driving one of `pairs`, wherever it sits.
    pub fn halt(&mut self, pairs: &BTreeSet<(ElementId, Property)>) {
        if pairs.is_empty() {
            return;
        }
        for live in &mut self.live {
            let before = live.tracks.len();
            live.tracks
                .retain(|t| !pairs.contains(&(t.element, t.property)));
            let halted = before - live.tracks.len();
            if halted > 0 {
                trace!(timeline = live.handle.id.0, halted, "halted overlapping tracks");
            }
        }
    }

    /// Drops a live timeline without firing its callback.
    pub fn kill(&mut self, handle: &TimelineHandle) -> bool {
        let Some(pos) = self.live.iter().position(|l| l.handle.id == handle.id) else {
            return false;
        };
        let live = self.live.remove(pos);
        live.handle.state.set(PlayState::Killed);
        trace!(timeline = handle.id.0, "killed timeline");
        true
    }

    pub fn timeline(&self, handle: &TimelineHandle) -> Option<&Timeline> {
        self.live
            .iter()
            .find(|l| l.handle.id == handle.id)
            .map(|l| &l.timeline)
    }

    pub fn is_animating(&self, element: ElementId) -> bool {
        self.live
            .iter()
            .any(|l| l.tracks.iter().any(|t| t.element == element && !t.done))
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Advances the clock and returns the callbacks of timelines that
    /// finished; the caller invokes them once it holds no borrows.
    pub fn tick(&mut self, dt: f64, sink: &mut dyn PropertySink) -> Vec<Callback> {
        self.clock += dt.max(0.0);
        let now = self.clock;

        for live in &mut self.live {
            let local = now - live.started_at;
            live.tracks.retain_mut(|track| {
                if track.done || local < track.start {
                    return true;
                }
                let Some(element) = sink.element_mut(track.element) else {
                    trace!(element = %track.element, "element detached mid-animation, dropping track");
                    return false;
                };
                let from = *track
                    .from
                    .get_or_insert_with(|| element.props.get(track.property));
                let value = interpolate(from, track.to, track.progress(local), track.easing);
                element.props.set(track.property, value);
                if local >= track.end() {
                    track.done = true;
                }
                true
            });
        }

        let mut finished = Vec::new();
        let mut i = 0;
        while i < self.live.len() {
            let live = &self.live[i];
            let local = now - live.started_at;
            let settled = live.tracks.iter().all(|t| t.done) && local >= live.finish_at;
            if settled {
                let mut live = self.live.remove(i);
                live.handle.state.set(PlayState::Completed);
                trace!(timeline = live.handle.id.0, at = now, "timeline complete");
                if let Some(callback) = live.callback.take() {
                    finished.push(callback);
                }
            } else {
                i += 1;
            }
        }
        finished
    }
}
