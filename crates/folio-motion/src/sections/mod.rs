//! # Section Choreographies
//!
//! Each full-viewport section knows how to append its own exit and entrance
//! tweens onto a shared timeline. Sections hold no state between calls; a
//! section is `visible` or `hidden` at rest and everything in between is
//! interpolation.
//!
//! ## Key Types
//! - `SectionChoreography`: the exit/entrance contract.
//! - `Hero`, `About`, `Work`: the three built-in sections.

mod about;
mod hero;
mod work;

pub use about::About;
pub use hero::Hero;
pub use work::Work;

use crate::element::ElementId;
use crate::registry::ElementRegistry;
use crate::stage::Stage;
use crate::timeline::Timeline;

pub trait SectionChoreography {
    fn name(&self) -> &'static str;

    /// The section's root container.
    fn root(&self, elements: &ElementRegistry) -> Option<ElementId>;

    /// Appends tweens that move the section's sub-elements to their hidden
    /// state. `target` is the section being navigated to; exits are
    /// currently direction-agnostic.
    fn exit(&self, timeline: &mut Timeline, elements: &ElementRegistry, target: usize);

    /// Resets the sub-elements to their hidden pose immediately, then
    /// appends tweens that bring them to rest.
    fn entrance(&self, stage: &mut Stage, timeline: &mut Timeline, elements: &ElementRegistry);
}

/// Hero, About, Work in section order.
pub fn default_sections() -> Vec<Box<dyn SectionChoreography>> {
    vec![Box::new(Hero), Box::new(About), Box::new(Work)]
}
