use folio_motion::sections::{About, Hero, SectionChoreography};
use folio_motion::{
    initialize_animations, Color, ElementId, MotionConfig, Page, PageContent, Property, Stage,
    Timeline, TimelineOptions,
};
use std::cell::Cell;
use std::rc::Rc;

const FRAME: f64 = 1.0 / 60.0;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn page() -> Page {
    init_logging();
    Page::mount(MotionConfig::default(), PageContent::default()).expect("page mounts")
}

fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
    let count = Rc::new(Cell::new(0));
    let inner = count.clone();
    (count, move || inner.set(inner.get() + 1))
}

/// Ticks until `seconds` have elapsed; returns the stage time at which
/// `count` first became non-zero.
fn run(page: &mut Page, seconds: f64, count: &Rc<Cell<u32>>) -> Option<f64> {
    let mut fired_at = None;
    let frames = (seconds / FRAME).ceil() as usize;
    for _ in 0..frames {
        page.frame(FRAME);
        if fired_at.is_none() && count.get() > 0 {
            fired_at = Some(page.stage.now());
        }
    }
    fired_at
}

fn opacity(page: &Page, id: Option<ElementId>) -> f32 {
    page.stage.get(id.unwrap(), Property::Opacity).unwrap()
}

#[test]
fn every_valid_pair_completes_exactly_once_after_settle() {
    for current in 0..3 {
        for target in 0..3 {
            if current == target {
                continue;
            }
            let mut page = page();
            let (count, callback) = counter();

            let started = page.stage.now();
            let handle = page
                .orchestrator
                .navigate_to_section(&mut page.stage, current, target, callback)
                .expect("valid navigation");
            let total = page.stage.timeline(&handle).unwrap().total_duration();
            let natural = page.stage.timeline(&handle).unwrap().duration();
            assert!((total - natural - 0.5).abs() < 1e-9);

            let fired_at = run(&mut page, total + 1.0, &count).expect("callback fired");
            assert_eq!(count.get(), 1, "{current} -> {target}");
            assert!(fired_at - started >= total - 1e-9, "{current} -> {target} fired early");
            assert!(handle.is_complete());
        }
    }
}

#[test]
fn same_or_out_of_range_target_is_a_noop() {
    let mut page = page();
    let before = page.stage.snapshot();

    for (current, target) in [(0, 0), (1, 1), (0, 3), (2, usize::MAX)] {
        let (count, callback) = counter();
        let handle =
            page.orchestrator
                .navigate_to_section(&mut page.stage, current, target, callback);
        assert!(handle.is_none());
        run(&mut page, 3.0, &count);
        assert_eq!(count.get(), 0);
    }

    assert_eq!(page.stage.snapshot(), before);
    assert_eq!(page.stage.live_timelines(), 0);
}

#[test]
fn initialize_is_idempotent() {
    let mut stage = Stage::default();
    let roots: Vec<ElementId> = ["hero", "about", "work"]
        .iter()
        .map(|name| stage.add_element(folio_motion::Element::new(*name)))
        .collect();
    let bg = Color::rgb(10, 10, 10);

    assert!(initialize_animations(&mut stage, Some(roots[0]), Some(roots[1]), Some(roots[2]), bg));
    let once = stage.snapshot();
    assert!(initialize_animations(&mut stage, Some(roots[0]), Some(roots[1]), Some(roots[2]), bg));
    assert_eq!(stage.snapshot(), once);

    let opaque: Vec<_> = roots
        .iter()
        .filter(|&&id| stage.get(id, Property::Opacity) == Some(1.0))
        .collect();
    assert_eq!(opaque, vec![&roots[0]]);
}

#[test]
fn newer_navigation_cancels_pending_callback() {
    let mut page = page();
    let (first, first_cb) = counter();
    let (second, second_cb) = counter();

    let a = page
        .orchestrator
        .navigate_to_section(&mut page.stage, 0, 1, first_cb)
        .unwrap();
    run(&mut page, 0.6, &first);
    assert!(a.is_active());

    let b = page
        .orchestrator
        .navigate_to_section(&mut page.stage, 0, 2, second_cb)
        .unwrap();
    assert!(a.is_killed());

    let total = page.stage.timeline(&b).unwrap().total_duration();
    run(&mut page, total + 1.0, &second);
    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
}

#[test]
fn cancelling_during_settle_still_suppresses_callback() {
    let mut page = page();
    let (count, callback) = counter();

    let handle = page
        .orchestrator
        .navigate_to_section(&mut page.stage, 0, 1, callback)
        .unwrap();
    let natural = page.stage.timeline(&handle).unwrap().duration();
    run(&mut page, natural + 0.2, &count);
    assert_eq!(count.get(), 0, "still inside the settle delay");

    assert!(page.orchestrator.cancel(&mut page.stage));
    run(&mut page, 2.0, &count);
    assert_eq!(count.get(), 0);
}

#[test]
fn interrupted_transition_leaves_one_opaque_section() {
    let mut page = page();
    let [hero, about, work] = page.elements().roots();
    let (count, first_cb) = counter();

    page.orchestrator
        .navigate_to_section(&mut page.stage, 0, 1, first_cb)
        .unwrap();
    run(&mut page, 1.95, &count);
    let half = opacity(&page, about);
    assert!(half > 0.05 && half < 0.95, "about container mid fade-in, got {half}");

    // the caller still believes hero is current
    let (done, second_cb) = counter();
    let handle = page
        .orchestrator
        .navigate_to_section(&mut page.stage, 0, 2, second_cb)
        .unwrap();
    let total = page.stage.timeline(&handle).unwrap().total_duration();
    run(&mut page, total + 0.5, &done);

    assert_eq!(done.get(), 1);
    assert_eq!(opacity(&page, hero), 0.0);
    assert_eq!(opacity(&page, about), 0.0);
    assert_eq!(opacity(&page, work), 1.0);
}

#[test]
fn hero_to_work_builds_expected_timeline() {
    let mut page = page();
    let elements = page.elements().clone();
    let (count, callback) = counter();

    let started = page.stage.now();
    let handle = page
        .orchestrator
        .navigate_to_section(&mut page.stage, 0, 2, callback)
        .unwrap();
    let timeline = page.stage.timeline(&handle).unwrap();
    let tweens = timeline.tweens();

    let hero_root = elements.hero.root.unwrap();
    let work_root = elements.work.root.unwrap();

    let hero_exit: Vec<_> = tweens
        .iter()
        .filter(|t| t.targets_element(elements.hero.title.unwrap()))
        .collect();
    assert_eq!(hero_exit.len(), 1);
    assert!(hero_exit[0].props.contains(&(Property::Opacity, 0.0)));

    let fade_out = tweens
        .iter()
        .find(|t| t.targets_element(hero_root))
        .expect("hero container fade-out");
    assert!(fade_out.props.contains(&(Property::Opacity, 0.0)));

    let fade_in = tweens
        .iter()
        .find(|t| t.targets_element(work_root))
        .expect("work container fade-in");
    assert!(fade_in.props.contains(&(Property::Opacity, 1.0)));
    assert!(fade_in.start >= fade_out.end() - 1e-9);

    let work_children: Vec<ElementId> = elements
        .work
        .cards
        .iter()
        .copied()
        .chain([
            elements.work.title.unwrap(),
            elements.work.subtitle.unwrap(),
            elements.work.glass_container.unwrap(),
        ])
        .collect();
    let work_entrance: Vec<_> = tweens
        .iter()
        .filter(|t| work_children.iter().any(|&id| t.targets_element(id)))
        .collect();
    assert_eq!(work_entrance.len(), 3 + elements.work.cards.len());
    for tween in &work_entrance {
        assert!(tween.start >= fade_in.start);
    }

    // About is untouched by a Hero -> Work transition.
    let about_ids: Vec<ElementId> = elements
        .about
        .stat_items
        .iter()
        .copied()
        .chain(elements.about.title)
        .chain(elements.about.root)
        .collect();
    assert!(!tweens
        .iter()
        .any(|t| about_ids.iter().any(|&id| t.targets_element(id))));

    let total = timeline.total_duration();
    let fired_at = run(&mut page, total + 1.0, &count).unwrap();
    assert_eq!(count.get(), 1);
    assert!(fired_at - started >= total - 1e-9);

    assert_eq!(opacity(&page, elements.work.root), 1.0);
    assert_eq!(opacity(&page, elements.hero.root), 0.0);
    assert_eq!(opacity(&page, elements.work.title), 1.0);
    assert_eq!(page.stage.get(elements.work.title.unwrap(), Property::Y), Some(0.0));
}

#[test]
fn missing_handles_are_skipped() {
    let mut page = page();
    let mut elements = page.elements().clone();
    elements.about.stat_items.clear();
    elements.about.title = None;

    let mut about_tl = Timeline::new(TimelineOptions::default());
    About.entrance(&mut page.stage, &mut about_tl, &elements);
    assert!(about_tl.tweens().iter().all(|t| !t.targets.is_empty()));
    // glass container, side content, image
    assert_eq!(about_tl.tweens().len(), 3);

    let full = page.elements().clone();
    let mut hero_tl = Timeline::new(TimelineOptions::default());
    Hero.entrance(&mut page.stage, &mut hero_tl, &elements);
    let mut hero_full_tl = Timeline::new(TimelineOptions::default());
    Hero.entrance(&mut page.stage, &mut hero_full_tl, &full);
    assert_eq!(hero_tl.tweens(), hero_full_tl.tweens());
}

#[test]
fn page_view_state_follows_completion() {
    let mut page = page();
    let idle = Rc::new(Cell::new(0));

    assert!(page.key(folio_motion::navigator::NavKey::ArrowDown).is_some());
    assert_eq!(page.current_section(), 0);
    // input is dropped while the transition runs
    assert!(page.wheel(500.0).is_none());

    run(&mut page, 6.0, &idle);
    assert_eq!(page.current_section(), 1);

    assert!(page.wheel(30.0).is_none());
    assert!(page.wheel(30.0).is_some());
    run(&mut page, 6.0, &idle);
    assert_eq!(page.current_section(), 2);

    assert!(page.key(folio_motion::navigator::NavKey::ArrowDown).is_none());
}
