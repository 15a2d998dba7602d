//! # Page
//!
//! One mounted portfolio page: stage, section orchestrator, both overlay
//! controllers and the scroll navigator wired together the way the view
//! layer uses them.
//!
//! ## Responsibilities
//! - **Mounting**: creates every section element, lays the work cards out
//!   and fills the `ElementRegistry` once.
//! - **View State**: tracks the current section, updated only by the
//!   orchestrator's completion callback.
//! - **Input**: wheel and key input become navigations unless the scroll
//!   lock is held or a transition is still running.
//! - **Frame Loop**: `frame(dt)` ticks the stage and then the overlays.

use crate::config::MotionConfig;
use crate::element::{BoundingBox, Element, ElementId};
use crate::error::MotionError;
use crate::layout::CardGridLayout;
use crate::navigator::{NavKey, ScrollNavigator};
use crate::orchestrator::SectionOrchestrator;
use crate::overlay::{ContentElements, OverlayController, OverlayVariant};
use crate::registry::{AboutElements, ElementRegistry, HeroElements, WorkElements};
use crate::stage::Stage;
use crate::timeline::TimelineHandle;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info};

/// Counts of repeated elements to mount.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PageContent {
    pub socials: usize,
    pub stats: usize,
    pub projects: usize,
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            socials: 3,
            stats: 4,
            projects: 6,
        }
    }
}

pub struct Page {
    pub stage: Stage,
    pub orchestrator: SectionOrchestrator,
    pub work_overlay: OverlayController,
    pub project_modal: OverlayController,
    navigator: ScrollNavigator,
    block_while_transitioning: bool,
    current: Rc<Cell<usize>>,
    card_boxes: Vec<BoundingBox>,
}

fn mount(stage: &mut Stage, name: impl Into<String>) -> Option<ElementId> {
    Some(stage.add_element(Element::new(name)))
}

impl Page {
    pub fn mount(config: MotionConfig, content: PageContent) -> Result<Self, MotionError> {
        Self::mount_with_layout(config, content, &CardGridLayout::default())
    }

    pub fn mount_with_layout(
        config: MotionConfig,
        content: PageContent,
        layout: &CardGridLayout,
    ) -> Result<Self, MotionError> {
        let mut stage = Stage::new(config.viewport);
        let viewport = config.viewport;
        let full = BoundingBox::new(0.0, 0.0, viewport.width, viewport.height);

        let root = |stage: &mut Stage, name: &str| {
            Some(stage.add_element(Element::new(name).with_box(full)))
        };
        let hero_root = root(&mut stage, "heroRef");
        let about_root = root(&mut stage, "aboutRef");
        let work_root = root(&mut stage, "workRef");

        let hero = HeroElements {
            root: hero_root,
            glass_container: mount(&mut stage, "heroGlassContainer"),
            title: mount(&mut stage, "heroTitle"),
            subtitle: mount(&mut stage, "heroSubtitle"),
            description: mount(&mut stage, "heroDescription"),
            cta: mount(&mut stage, "heroCta"),
            socials: (0..content.socials)
                .map(|i| stage.add_element(Element::new(format!("heroSocial{i}"))))
                .collect(),
            scroll_indicator: mount(&mut stage, "heroScrollIndicator"),
        };
        let about = AboutElements {
            root: about_root,
            glass_container: mount(&mut stage, "aboutGlassContainer"),
            title: mount(&mut stage, "aboutTitle"),
            side_content: mount(&mut stage, "aboutSideContent"),
            image: mount(&mut stage, "aboutImage"),
            stat_items: (0..content.stats)
                .map(|i| stage.add_element(Element::new(format!("aboutStatItem{i}"))))
                .collect(),
        };

        let card_boxes = layout.compute(viewport, content.projects)?;
        let work = WorkElements {
            root: work_root,
            glass_container: mount(&mut stage, "workGlassContainer"),
            title: mount(&mut stage, "workTitle"),
            subtitle: mount(&mut stage, "workSubtitle"),
            cards: card_boxes
                .iter()
                .enumerate()
                .map(|(i, &bounds)| {
                    stage.add_element(Element::new(format!("workCard{i}")).with_box(bounds))
                })
                .collect(),
        };

        let registry = ElementRegistry { hero, about, work };
        let orchestrator = SectionOrchestrator::new(&registry, &config);
        orchestrator.initialize(&mut stage);

        let work_overlay_el = stage.add_element(Element::new("workOverlay"));
        let modal_el = stage.add_element(Element::new("projectModal"));
        let modal_content = ContentElements {
            title: mount(&mut stage, "projectModalTitle"),
            kind: mount(&mut stage, "projectModalType"),
            line: mount(&mut stage, "projectModalLine"),
        };
        for id in [work_overlay_el, modal_el] {
            stage.set_mounted(id, false);
        }

        let work_overlay =
            OverlayController::new(OverlayVariant::WorkCard, work_overlay_el, config.overlay.clone());
        let project_modal = OverlayController::new(
            OverlayVariant::ProjectModal(modal_content),
            modal_el,
            config.overlay.clone(),
        );

        info!(
            sections = orchestrator.section_count(),
            projects = card_boxes.len(),
            "page mounted"
        );

        Ok(Self {
            stage,
            orchestrator,
            work_overlay,
            project_modal,
            navigator: ScrollNavigator::new(&config.navigation),
            block_while_transitioning: config.navigation.block_while_transitioning,
            current: Rc::new(Cell::new(0)),
            card_boxes,
        })
    }

    pub fn current_section(&self) -> usize {
        self.current.get()
    }

    pub fn elements(&self) -> &ElementRegistry {
        self.orchestrator.elements()
    }

    /// Navigates from the current section to `target`; the current section
    /// changes only once the transition has settled.
    pub fn go_to(&mut self, target: usize) -> Option<TimelineHandle> {
        let from = self.current.get();
        let current = self.current.clone();
        self.orchestrator
            .navigate_to_section(&mut self.stage, from, target, move || current.set(target))
    }

    fn input_blocked(&self) -> bool {
        if self.stage.scroll_lock().is_locked() {
            return true;
        }
        self.block_while_transitioning && self.orchestrator.is_transitioning()
    }

    pub fn wheel(&mut self, delta_y: f32) -> Option<TimelineHandle> {
        if self.input_blocked() {
            self.navigator.reset();
            return None;
        }
        let count = self.orchestrator.section_count();
        let target = self.navigator.on_wheel(delta_y, self.current_section(), count)?;
        debug!(target, "wheel navigation");
        self.go_to(target)
    }

    pub fn key(&mut self, key: NavKey) -> Option<TimelineHandle> {
        if self.input_blocked() {
            return None;
        }
        let count = self.orchestrator.section_count();
        let target = self.navigator.on_key(key, self.current_section(), count)?;
        debug!(?key, target, "key navigation");
        self.go_to(target)
    }

    /// Bounding box of a work card as the click layer would capture it.
    pub fn card_box(&self, index: usize) -> Option<BoundingBox> {
        let id = *self.elements().work.cards.get(index)?;
        self.stage.bounding_box(id)
    }

    pub fn card_count(&self) -> usize {
        self.card_boxes.len()
    }

    pub fn open_work_card(&mut self, index: usize) -> bool {
        let source = self.card_box(index);
        self.work_overlay.open(&mut self.stage, source, index)
    }

    pub fn open_project(&mut self, index: usize) -> bool {
        let source = self.card_box(index);
        self.project_modal.open(&mut self.stage, source, index)
    }

    pub fn close_overlays<F>(&mut self, on_closed: F) -> bool
    where
        F: FnOnce() + Clone + 'static,
    {
        let work = self.work_overlay.close(&mut self.stage, on_closed.clone());
        let modal = self.project_modal.close(&mut self.stage, on_closed);
        work || modal
    }

    /// Advances one frame.
    pub fn frame(&mut self, dt: f64) {
        self.stage.tick(dt);
        self.work_overlay.update(&mut self.stage);
        self.project_modal.update(&mut self.stage);
    }

    pub fn resize(&mut self, viewport: crate::stage::Viewport) {
        self.stage.resize_viewport(viewport);
        self.work_overlay.handle_viewport_resize(&mut self.stage);
        self.project_modal.handle_viewport_resize(&mut self.stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Property;

    #[test]
    fn test_mount_fills_registry_and_rests_on_hero() {
        let page = Page::mount(MotionConfig::default(), PageContent::default()).unwrap();
        let elements = page.elements();

        assert_eq!(elements.hero.socials.len(), 3);
        assert_eq!(elements.about.stat_items.len(), 4);
        assert_eq!(elements.work.cards.len(), 6);

        let [hero, about, work] = elements.roots().map(Option::unwrap);
        assert_eq!(page.stage.get(hero, Property::Opacity), Some(1.0));
        assert_eq!(page.stage.get(about, Property::Opacity), Some(0.0));
        assert_eq!(page.stage.get(work, Property::Opacity), Some(0.0));
        assert!(page.card_box(5).is_some());
        assert!(page.card_box(6).is_none());
    }
}
