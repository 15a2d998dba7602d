use super::SectionChoreography;
use crate::animation::{EasingType, Tween};
use crate::element::ElementId;
use crate::registry::ElementRegistry;
use crate::stage::Stage;
use crate::timeline::{Position, Timeline};

/// Biography section: title, side text, portrait and stat badges.
#[derive(Copy, Clone, Debug, Default)]
pub struct About;

impl SectionChoreography for About {
    fn name(&self) -> &'static str {
        "about"
    }

    fn root(&self, elements: &ElementRegistry) -> Option<ElementId> {
        elements.about.root
    }

    fn exit(&self, timeline: &mut Timeline, elements: &ElementRegistry, _target: usize) {
        let about = &elements.about;

        // badges leave last-to-first
        timeline
            .stagger(
                about.stat_items.iter().rev().copied(),
                Tween::new().opacity(0.0).scale(0.8).duration(0.4).ease(EasingType::EaseIn),
                0.06,
                Position::End,
            )
            .add(
                about.title,
                Tween::new().opacity(0.0).x(-60.0).duration(0.8).ease(EasingType::EaseInCubic),
                Position::Relative(-0.3),
            )
            .add(
                about.side_content,
                Tween::new().opacity(0.0).x(60.0).duration(0.8).ease(EasingType::EaseInCubic),
                Position::Relative(-0.7),
            )
            .add(
                about.image,
                Tween::new().opacity(0.0).scale(0.9).duration(0.7).ease(EasingType::EaseIn),
                Position::Relative(-0.6),
            )
            .add(
                about.glass_container,
                Tween::new()
                    .opacity(0.0)
                    .y(40.0)
                    .blur(10.0)
                    .duration(0.9)
                    .ease(EasingType::EaseInOutCubic),
                Position::Relative(-0.5),
            );
    }

    fn entrance(&self, stage: &mut Stage, timeline: &mut Timeline, elements: &ElementRegistry) {
        let about = &elements.about;

        stage.set(about.glass_container, &Tween::new().opacity(0.0).y(40.0).blur(10.0));
        stage.set(about.title, &Tween::new().opacity(0.0).x(-60.0));
        stage.set(about.side_content, &Tween::new().opacity(0.0).x(60.0));
        stage.set(about.image, &Tween::new().opacity(0.0).scale(0.9));
        stage.set(about.stat_items.iter().copied(), &Tween::new().opacity(0.0).scale(0.8));

        timeline
            .add(
                about.glass_container,
                Tween::new()
                    .opacity(1.0)
                    .y(0.0)
                    .blur(0.0)
                    .duration(1.0)
                    .ease(EasingType::EaseOutCubic),
                Position::Relative(-0.2),
            )
            .add(
                about.title,
                Tween::new().opacity(1.0).x(0.0).duration(0.9).ease(EasingType::EaseOutQuart),
                Position::Relative(-0.8),
            )
            .add(
                about.side_content,
                Tween::new().opacity(1.0).x(0.0).duration(0.9).ease(EasingType::EaseOutQuart),
                Position::Relative(-0.8),
            )
            .add(
                about.image,
                Tween::new().opacity(1.0).scale(1.0).duration(0.8).ease(EasingType::EaseOutCubic),
                Position::Relative(-0.7),
            )
            .stagger(
                about.stat_items.iter().copied(),
                Tween::new().opacity(1.0).scale(1.0).duration(0.5).ease(EasingType::BackOut),
                0.1,
                Position::Relative(-0.4),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::timeline::TimelineOptions;

    #[test]
    fn test_stat_items_stagger_in_declaration_order() {
        let mut stage = Stage::default();
        let items: Vec<ElementId> = (0..3)
            .map(|i| stage.add_element(Element::new(format!("stat{i}"))))
            .collect();
        let elements = ElementRegistry {
            about: crate::registry::AboutElements {
                stat_items: items.clone(),
                ..Default::default()
            },
            ..Default::default()
        };

        let mut tl = Timeline::new(TimelineOptions::default());
        About.entrance(&mut stage, &mut tl, &elements);

        let order: Vec<ElementId> = tl.tweens().iter().map(|t| t.targets[0]).collect();
        assert_eq!(order, items);
        assert!(tl.tweens().windows(2).all(|w| w[0].start < w[1].start));
    }

    #[test]
    fn test_exit_reverses_stat_items() {
        let items = vec![ElementId(4), ElementId(5), ElementId(6)];
        let elements = ElementRegistry {
            about: crate::registry::AboutElements {
                stat_items: items,
                ..Default::default()
            },
            ..Default::default()
        };

        let mut tl = Timeline::new(TimelineOptions::default());
        About.exit(&mut tl, &elements, 0);
        let order: Vec<ElementId> = tl.tweens().iter().map(|t| t.targets[0]).collect();
        assert_eq!(order, vec![ElementId(6), ElementId(5), ElementId(4)]);
    }
}
