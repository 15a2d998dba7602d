//! # Section Registry
//!
//! Typed handles to every element the section choreographies touch,
//! populated once by the view layer when the page mounts and read-only
//! afterwards. Any slot may be absent; sequences are kept in declaration
//! order because stagger timing depends on it.

use crate::element::ElementId;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeroElements {
    pub root: Option<ElementId>,
    pub glass_container: Option<ElementId>,
    pub title: Option<ElementId>,
    pub subtitle: Option<ElementId>,
    pub description: Option<ElementId>,
    pub cta: Option<ElementId>,
    pub socials: Vec<ElementId>,
    pub scroll_indicator: Option<ElementId>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AboutElements {
    pub root: Option<ElementId>,
    pub glass_container: Option<ElementId>,
    pub title: Option<ElementId>,
    pub side_content: Option<ElementId>,
    pub image: Option<ElementId>,
    pub stat_items: Vec<ElementId>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkElements {
    pub root: Option<ElementId>,
    pub glass_container: Option<ElementId>,
    pub title: Option<ElementId>,
    pub subtitle: Option<ElementId>,
    pub cards: Vec<ElementId>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementRegistry {
    pub hero: HeroElements,
    pub about: AboutElements,
    pub work: WorkElements,
}

impl ElementRegistry {
    /// Section root containers in section order.
    pub fn roots(&self) -> [Option<ElementId>; 3] {
        [self.hero.root, self.about.root, self.work.root]
    }
}

/// Supplies the registry for the page's current render tree.
pub trait ElementProvider {
    fn get_elements(&self) -> ElementRegistry;
}

impl ElementProvider for ElementRegistry {
    fn get_elements(&self) -> ElementRegistry {
        self.clone()
    }
}

impl<F> ElementProvider for F
where
    F: Fn() -> ElementRegistry,
{
    fn get_elements(&self) -> ElementRegistry {
        self()
    }
}
