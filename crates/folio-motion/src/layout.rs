//! # Layout
//!
//! Flexbox layout of the work section via `taffy`, producing the card
//! rectangles that overlay morphs start from.

use crate::element::BoundingBox;
use crate::error::MotionError;
use crate::stage::Viewport;
use serde::{Deserialize, Serialize};
use taffy::prelude::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardGridLayout {
    pub columns: usize,
    pub gap: f32,
    pub padding: f32,
    /// Height reserved above the grid for title and subtitle.
    pub header_height: f32,
    /// Card height divided by card width.
    pub aspect_ratio: f32,
}

impl Default for CardGridLayout {
    fn default() -> Self {
        Self {
            columns: 3,
            gap: 24.0,
            padding: 64.0,
            header_height: 180.0,
            aspect_ratio: 0.75,
        }
    }
}

fn layout_err(err: impl std::fmt::Display) -> MotionError {
    MotionError::Layout(err.to_string())
}

impl CardGridLayout {
    fn card_size(&self, viewport: Viewport) -> (f32, f32) {
        let columns = self.columns.max(1) as f32;
        let inner = viewport.width - 2.0 * self.padding - self.gap * (columns - 1.0);
        // whole pixels so float error never wraps the last column
        let width = (inner / columns).floor().max(0.0);
        (width, width * self.aspect_ratio)
    }

    /// Viewport-relative rectangles of `count` cards, in declaration order.
    pub fn compute(&self, viewport: Viewport, count: usize) -> Result<Vec<BoundingBox>, MotionError> {
        let mut tree: TaffyTree<()> = TaffyTree::new();
        let (card_width, card_height) = self.card_size(viewport);

        let cards = (0..count)
            .map(|_| {
                tree.new_leaf(Style {
                    size: Size {
                        width: Dimension::length(card_width),
                        height: Dimension::length(card_height),
                    },
                    flex_shrink: 0.0,
                    ..Default::default()
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(layout_err)?;

        let grid = tree
            .new_with_children(
                Style {
                    display: Display::Flex,
                    flex_direction: FlexDirection::Row,
                    flex_wrap: FlexWrap::Wrap,
                    gap: Size {
                        width: LengthPercentage::length(self.gap),
                        height: LengthPercentage::length(self.gap),
                    },
                    ..Default::default()
                },
                &cards,
            )
            .map_err(layout_err)?;

        let header = tree
            .new_leaf(Style {
                size: Size {
                    width: Dimension::percent(1.0),
                    height: Dimension::length(self.header_height),
                },
                flex_shrink: 0.0,
                ..Default::default()
            })
            .map_err(layout_err)?;

        let padding = LengthPercentage::length(self.padding);
        let root = tree
            .new_with_children(
                Style {
                    display: Display::Flex,
                    flex_direction: FlexDirection::Column,
                    size: Size {
                        width: Dimension::length(viewport.width),
                        height: Dimension::length(viewport.height),
                    },
                    padding: Rect {
                        left: padding,
                        right: padding,
                        top: padding,
                        bottom: padding,
                    },
                    ..Default::default()
                },
                &[header, grid],
            )
            .map_err(layout_err)?;

        tree.compute_layout(
            root,
            Size {
                width: AvailableSpace::Definite(viewport.width),
                height: AvailableSpace::Definite(viewport.height),
            },
        )
        .map_err(layout_err)?;

        let grid_origin = tree.layout(grid).map_err(layout_err)?.location;
        cards
            .iter()
            .map(|&card| {
                let layout = tree.layout(card).map_err(layout_err)?;
                Ok(BoundingBox::new(
                    grid_origin.y + layout.location.y,
                    grid_origin.x + layout.location.x,
                    layout.size.width,
                    layout.size.height,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_wrap_into_columns() {
        let layout = CardGridLayout::default();
        let viewport = Viewport {
            width: 1200.0,
            height: 900.0,
        };
        let boxes = layout.compute(viewport, 4).unwrap();
        assert_eq!(boxes.len(), 4);

        // floor((1200 - 128 - 48) / 3)
        let width = 341.0;
        assert!((boxes[0].width - width).abs() < 0.5);
        assert!((boxes[0].left - 64.0).abs() < 0.5);
        assert!((boxes[0].top - (64.0 + 180.0)).abs() < 0.5);
        assert!((boxes[1].left - (64.0 + width + 24.0)).abs() < 0.5);
        assert!((boxes[1].top - boxes[0].top).abs() < 0.5);

        // fourth card wraps to a second row
        assert!((boxes[3].left - 64.0).abs() < 0.5);
        assert!(boxes[3].top > boxes[0].top + boxes[0].height);
    }

    #[test]
    fn test_no_cards() {
        let boxes = CardGridLayout::default().compute(Viewport::default(), 0).unwrap();
        assert!(boxes.is_empty());
    }
}
