use super::SectionChoreography;
use crate::animation::{EasingType, Tween};
use crate::element::ElementId;
use crate::registry::ElementRegistry;
use crate::stage::Stage;
use crate::timeline::{Position, Timeline};

/// Project grid section.
#[derive(Copy, Clone, Debug, Default)]
pub struct Work;

impl SectionChoreography for Work {
    fn name(&self) -> &'static str {
        "work"
    }

    fn root(&self, elements: &ElementRegistry) -> Option<ElementId> {
        elements.work.root
    }

    fn exit(&self, timeline: &mut Timeline, elements: &ElementRegistry, _target: usize) {
        let work = &elements.work;

        timeline
            .stagger(
                work.cards.iter().copied(),
                Tween::new().opacity(0.0).y(60.0).scale(0.95).duration(0.5).ease(EasingType::EaseIn),
                0.05,
                Position::End,
            )
            .add(
                work.title,
                Tween::new().opacity(0.0).y(-50.0).duration(0.7).ease(EasingType::EaseInCubic),
                Position::Relative(-0.4),
            )
            .add(
                work.subtitle,
                Tween::new().opacity(0.0).y(-30.0).duration(0.6).ease(EasingType::EaseInCubic),
                Position::Relative(-0.55),
            )
            .add(
                work.glass_container,
                Tween::new()
                    .opacity(0.0)
                    .scale(0.95)
                    .blur(10.0)
                    .duration(0.9)
                    .ease(EasingType::EaseInOutCubic),
                Position::Relative(-0.5),
            );
    }

    fn entrance(&self, stage: &mut Stage, timeline: &mut Timeline, elements: &ElementRegistry) {
        let work = &elements.work;

        stage.set(work.glass_container, &Tween::new().opacity(0.0).scale(0.95).blur(10.0));
        stage.set(work.title, &Tween::new().opacity(0.0).y(-50.0));
        stage.set(work.subtitle, &Tween::new().opacity(0.0).y(-30.0));
        stage.set(work.cards.iter().copied(), &Tween::new().opacity(0.0).y(60.0).scale(0.95));

        timeline
            .add(
                work.glass_container,
                Tween::new()
                    .opacity(1.0)
                    .scale(1.0)
                    .blur(0.0)
                    .duration(1.0)
                    .ease(EasingType::EaseOutCubic),
                Position::Relative(-0.2),
            )
            .add(
                work.title,
                Tween::new().opacity(1.0).y(0.0).duration(0.9).ease(EasingType::EaseOutQuart),
                Position::Relative(-0.8),
            )
            .add(
                work.subtitle,
                Tween::new().opacity(1.0).y(0.0).duration(0.8).ease(EasingType::EaseOutQuart),
                Position::Relative(-0.7),
            )
            .stagger(
                work.cards.iter().copied(),
                Tween::new().opacity(1.0).y(0.0).scale(1.0).duration(0.7).ease(EasingType::EaseOutCubic),
                0.08,
                Position::Relative(-0.5),
            );
    }
}
