use super::SectionChoreography;
use crate::animation::{EasingType, Tween};
use crate::element::ElementId;
use crate::registry::ElementRegistry;
use crate::stage::Stage;
use crate::timeline::{Position, Timeline};

/// Landing section: glass panel with title, subtitle, blurb, call to action
/// and social links.
#[derive(Copy, Clone, Debug, Default)]
pub struct Hero;

impl SectionChoreography for Hero {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn root(&self, elements: &ElementRegistry) -> Option<ElementId> {
        elements.hero.root
    }

    fn exit(&self, timeline: &mut Timeline, elements: &ElementRegistry, _target: usize) {
        let hero = &elements.hero;

        timeline
            .add(
                hero.scroll_indicator,
                Tween::new().opacity(0.0).y(20.0).duration(0.4).ease(EasingType::EaseIn),
                Position::End,
            )
            .add(
                hero.title,
                Tween::new().opacity(0.0).y(-80.0).duration(0.9).ease(EasingType::EaseInCubic),
                Position::Relative(-0.3),
            )
            .add(
                hero.subtitle,
                Tween::new().opacity(0.0).y(-60.0).duration(0.8).ease(EasingType::EaseInCubic),
                Position::Relative(-0.75),
            )
            .add(
                hero.description,
                Tween::new().opacity(0.0).y(-40.0).duration(0.7).ease(EasingType::EaseInCubic),
                Position::Relative(-0.65),
            )
            .add(
                hero.cta,
                Tween::new().opacity(0.0).scale(0.9).duration(0.5).ease(EasingType::EaseIn),
                Position::Relative(-0.55),
            )
            .stagger(
                hero.socials.iter().copied(),
                Tween::new().opacity(0.0).y(20.0).duration(0.4).ease(EasingType::EaseIn),
                0.05,
                Position::Relative(-0.45),
            )
            .add(
                hero.glass_container,
                Tween::new()
                    .opacity(0.0)
                    .scale(0.92)
                    .blur(12.0)
                    .duration(1.0)
                    .ease(EasingType::EaseInOutCubic),
                Position::Relative(-0.6),
            );
    }

    fn entrance(&self, stage: &mut Stage, timeline: &mut Timeline, elements: &ElementRegistry) {
        let hero = &elements.hero;

        stage.set(hero.glass_container, &Tween::new().opacity(0.0).scale(0.92).blur(12.0));
        stage.set(hero.title, &Tween::new().opacity(0.0).y(80.0));
        stage.set(hero.subtitle, &Tween::new().opacity(0.0).y(60.0));
        stage.set(hero.description, &Tween::new().opacity(0.0).y(40.0));
        stage.set(hero.cta, &Tween::new().opacity(0.0).scale(0.9));
        stage.set(hero.socials.iter().copied(), &Tween::new().opacity(0.0).y(20.0));
        stage.set(hero.scroll_indicator, &Tween::new().opacity(0.0).y(20.0));

        timeline
            .add(
                hero.glass_container,
                Tween::new()
                    .opacity(1.0)
                    .scale(1.0)
                    .blur(0.0)
                    .duration(1.2)
                    .ease(EasingType::EaseOutCubic),
                Position::Relative(-0.2),
            )
            .add(
                hero.title,
                Tween::new().opacity(1.0).y(0.0).duration(1.0).ease(EasingType::EaseOutQuart),
                Position::Relative(-0.9),
            )
            .add(
                hero.subtitle,
                Tween::new().opacity(1.0).y(0.0).duration(0.9).ease(EasingType::EaseOutQuart),
                Position::Relative(-0.75),
            )
            .add(
                hero.description,
                Tween::new().opacity(1.0).y(0.0).duration(0.8).ease(EasingType::EaseOutCubic),
                Position::Relative(-0.65),
            )
            .add(
                hero.cta,
                Tween::new().opacity(1.0).scale(1.0).duration(0.6).ease(EasingType::BackOut),
                Position::Relative(-0.5),
            )
            .stagger(
                hero.socials.iter().copied(),
                Tween::new().opacity(1.0).y(0.0).duration(0.5).ease(EasingType::EaseOutCubic),
                0.08,
                Position::Relative(-0.4),
            )
            .add(
                hero.scroll_indicator,
                Tween::new().opacity(1.0).y(0.0).duration(0.6).ease(EasingType::EaseOut),
                Position::Relative(-0.2),
            );
    }
}
