//! # Timeline
//!
//! A sequenced, time-based description of property interpolations. A
//! `Timeline` is only a plan: it is built fresh for each navigation or
//! overlay event, handed to `Stage::play`, and driven by the animator from
//! then on.
//!
//! ## Responsibilities
//! - **Placement**: resolves `Position` offsets against the previously
//!   appended tween (negative offsets overlap it).
//! - **Stagger**: expands one tween over an ordered target sequence.
//! - **Completion**: one terminal callback, optionally deferred by a settle
//!   delay past the latest-finishing tween.
//!
//! ## Key Types
//! - `Timeline`, `TimelineOptions`, `Position`, `TweenSpec`.
//! - `TimelineHandle`: the completion signal returned by `Stage::play`.

use crate::animation::{EasingType, Property, Tween};
use crate::element::ElementId;
use std::cell::Cell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// Where a tween starts, in seconds of timeline-local time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Position {
    /// Append at the end of everything appended so far.
    End,
    /// Absolute start time.
    At(f64),
    /// Offset from the end of the previously appended tween.
    Relative(f64),
    /// Offset from the start of the previously appended tween.
    WithPrevious(f64),
}

/// Fallback duration and easing for tweens that do not set their own.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TweenDefaults {
    pub duration: f64,
    pub easing: EasingType,
}

impl Default for TweenDefaults {
    fn default() -> Self {
        Self {
            duration: 0.5,
            easing: EasingType::EaseOut,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TimelineOptions {
    pub defaults: TweenDefaults,
    /// Shifts every tween by this many seconds.
    pub delay: f64,
}

/// One resolved tween entry.
#[derive(Clone, Debug, PartialEq)]
pub struct TweenSpec {
    pub targets: Vec<ElementId>,
    pub props: Vec<(Property, f32)>,
    pub start: f64,
    pub duration: f64,
    pub easing: EasingType,
}

impl TweenSpec {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    pub fn targets_element(&self, id: ElementId) -> bool {
        self.targets.contains(&id)
    }

    pub fn animates(&self, property: Property) -> bool {
        self.props.iter().any(|(p, _)| *p == property)
    }
}

pub(crate) type Callback = Box<dyn FnOnce()>;

pub struct Timeline {
    options: TimelineOptions,
    tweens: Vec<TweenSpec>,
    /// (start, end) of the last appended tween.
    previous: Option<(f64, f64)>,
    settle: f64,
    on_complete: Option<Callback>,
}

impl Timeline {
    pub fn new(options: TimelineOptions) -> Self {
        Self {
            options,
            tweens: Vec::new(),
            previous: None,
            settle: 0.0,
            on_complete: None,
        }
    }

    fn resolve(&self, position: Position) -> f64 {
        let start = match position {
            Position::End => self.duration().max(self.options.delay),
            Position::At(t) => t + self.options.delay,
            Position::Relative(offset) => match self.previous {
                Some((_, end)) => end + offset,
                None => self.options.delay + offset,
            },
            Position::WithPrevious(offset) => match self.previous {
                Some((start, _)) => start + offset,
                None => self.options.delay + offset,
            },
        };
        start.max(0.0)
    }

    /// Appends one tween over `targets`.
    ///
    /// Absent targets (an empty iterator, e.g. a `None` handle) append
    /// nothing and leave the previous-tween anchor untouched.
    pub fn add<I>(&mut self, targets: I, tween: Tween, position: Position) -> &mut Self
    where
        I: IntoIterator<Item = ElementId>,
    {
        let targets: Vec<ElementId> = targets.into_iter().collect();
        if targets.is_empty() || tween.is_empty() {
            return self;
        }

        let start = self.resolve(position);
        let spec = TweenSpec {
            targets,
            props: tween.props,
            start,
            duration: tween.duration.unwrap_or(self.options.defaults.duration),
            easing: tween.easing.unwrap_or(self.options.defaults.easing),
        };
        self.previous = Some((spec.start, spec.end()));
        self.tweens.push(spec);
        self
    }

    /// Appends the same tween once per target, each starting `each` seconds
    /// after the one before, in iteration order.
    ///
    /// Afterwards the previous-tween anchor spans the whole stagger group.
    pub fn stagger<I>(&mut self, targets: I, tween: Tween, each: f64, position: Position) -> &mut Self
    where
        I: IntoIterator<Item = ElementId>,
    {
        let targets: Vec<ElementId> = targets.into_iter().collect();
        if targets.is_empty() || tween.is_empty() {
            return self;
        }

        let first = self.resolve(position);
        let mut group_end = first;
        for (i, target) in targets.into_iter().enumerate() {
            let spec = TweenSpec {
                targets: vec![target],
                props: tween.props.clone(),
                start: first + each * i as f64,
                duration: tween.duration.unwrap_or(self.options.defaults.duration),
                easing: tween.easing.unwrap_or(self.options.defaults.easing),
            };
            group_end = group_end.max(spec.end());
            self.tweens.push(spec);
        }
        self.previous = Some((first, group_end));
        self
    }

    /// Registers the terminal callback. A later registration replaces it.
    pub fn on_complete<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnOnce() + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Defers the terminal callback by `delay` seconds past the natural end.
    pub fn settle(&mut self, delay: f64) -> &mut Self {
        self.settle = delay.max(0.0);
        self
    }

    /// End time of the latest-finishing tween.
    pub fn duration(&self) -> f64 {
        self.tweens.iter().map(TweenSpec::end).fold(0.0, f64::max)
    }

    /// Time at which the completion callback fires.
    pub fn total_duration(&self) -> f64 {
        self.duration() + self.settle
    }

    pub fn settle_delay(&self) -> f64 {
        self.settle
    }

    pub fn tweens(&self) -> &[TweenSpec] {
        &self.tweens
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Every (element, property) pair this timeline drives.
    pub fn targets(&self) -> BTreeSet<(ElementId, Property)> {
        self.tweens
            .iter()
            .flat_map(|t| {
                t.targets
                    .iter()
                    .flat_map(move |&id| t.props.iter().map(move |&(p, _)| (id, p)))
            })
            .collect()
    }

    pub(crate) fn take_callback(&mut self) -> Option<Callback> {
        self.on_complete.take()
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("tweens", &self.tweens.len())
            .field("duration", &self.duration())
            .field("settle", &self.settle)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayState {
    Active,
    Completed,
    Killed,
}

/// Identifier of a timeline once it is playing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimelineId(pub u64);

/// Completion signal of a playing timeline.
///
/// Cheap to clone; every clone observes the same state.
#[derive(Clone, Debug)]
pub struct TimelineHandle {
    pub id: TimelineId,
    pub(crate) state: Rc<Cell<PlayState>>,
}

impl TimelineHandle {
    pub(crate) fn new(id: TimelineId) -> Self {
        Self {
            id,
            state: Rc::new(Cell::new(PlayState::Active)),
        }
    }

    pub fn state(&self) -> PlayState {
        self.state.get()
    }

    pub fn is_active(&self) -> bool {
        self.state() == PlayState::Active
    }

    pub fn is_complete(&self) -> bool {
        self.state() == PlayState::Completed
    }

    pub fn is_killed(&self) -> bool {
        self.state() == PlayState::Killed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<ElementId> {
        (0..n).map(ElementId).collect()
    }

    #[test]
    fn test_relative_offsets_overlap_previous() {
        let mut tl = Timeline::new(TimelineOptions::default());
        let e = ids(3);
        tl.add([e[0]], Tween::new().opacity(0.0).duration(2.0), Position::End);
        tl.add([e[1]], Tween::new().opacity(0.0).duration(1.0), Position::Relative(-1.5));
        tl.add([e[2]], Tween::new().opacity(0.0).duration(1.0), Position::Relative(-0.5));

        let starts: Vec<f64> = tl.tweens().iter().map(|t| t.start).collect();
        assert_eq!(starts, vec![0.0, 0.5, 1.0]);
        // latest-finishing tween is the first one
        assert_eq!(tl.duration(), 2.0);
    }

    #[test]
    fn test_negative_start_is_clamped() {
        let mut tl = Timeline::new(TimelineOptions::default());
        tl.add([ElementId(0)], Tween::new().y(10.0).duration(0.2), Position::End);
        tl.add([ElementId(1)], Tween::new().y(10.0), Position::Relative(-1.0));
        assert_eq!(tl.tweens()[1].start, 0.0);
    }

    #[test]
    fn test_absent_targets_append_nothing() {
        let mut tl = Timeline::new(TimelineOptions::default());
        tl.add([ElementId(0)], Tween::new().opacity(1.0).duration(1.0), Position::End);
        tl.add(None, Tween::new().opacity(1.0).duration(5.0), Position::End);
        tl.add([ElementId(1)], Tween::new().opacity(1.0).duration(1.0), Position::Relative(-0.5));

        assert_eq!(tl.tweens().len(), 2);
        assert_eq!(tl.tweens()[1].start, 0.5);
    }

    #[test]
    fn test_stagger_offsets_in_order() {
        let mut tl = Timeline::new(TimelineOptions::default());
        tl.stagger(ids(4), Tween::new().scale(1.0).duration(0.5), 0.1, Position::At(1.0));

        let starts: Vec<f64> = tl.tweens().iter().map(|t| t.start).collect();
        for (i, start) in starts.iter().enumerate() {
            assert!((start - (1.0 + 0.1 * i as f64)).abs() < 1e-9);
            assert_eq!(tl.tweens()[i].targets, vec![ElementId(i)]);
        }
        tl.add([ElementId(9)], Tween::new().opacity(0.0), Position::Relative(0.0));
        assert!((tl.tweens()[4].start - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_defaults_and_delay_apply() {
        let options = TimelineOptions {
            defaults: TweenDefaults {
                duration: 0.75,
                easing: EasingType::Linear,
            },
            delay: 0.25,
        };
        let mut tl = Timeline::new(options);
        tl.add([ElementId(0)], Tween::new().opacity(0.0), Position::End);
        let spec = &tl.tweens()[0];
        assert_eq!(spec.start, 0.25);
        assert_eq!(spec.duration, 0.75);
        assert_eq!(spec.easing, EasingType::Linear);
    }

    #[test]
    fn test_settle_extends_total_duration_only() {
        let mut tl = Timeline::new(TimelineOptions::default());
        tl.add([ElementId(0)], Tween::new().opacity(0.0).duration(1.0), Position::End);
        tl.settle(0.5);
        assert_eq!(tl.duration(), 1.0);
        assert_eq!(tl.total_duration(), 1.5);
    }

    #[test]
    fn test_targets_lists_pairs() {
        let mut tl = Timeline::new(TimelineOptions::default());
        tl.add(ids(2), Tween::new().opacity(0.0).y(4.0), Position::End);
        let pairs = tl.targets();
        assert_eq!(pairs.len(), 4);
        assert!(pairs.contains(&(ElementId(1), Property::Y)));
    }
}
