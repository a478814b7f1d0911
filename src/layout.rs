//! Declarative table of chrome regions and the hit-testing over it.
//!
//! Regions are registered once at startup. A screen point maps to at most one
//! region; groups are scanned in [`RegionGroup`] order and the first match wins.

use std::collections::HashSet;

use egui::{Pos2, pos2};

use crate::command::{ActionId, Payload};
use crate::config::PaletteConfig;
use crate::geometry::Shape;
use crate::state::SelectionState;

const COLOR_BOX: f32 = 30.0;
const COLOR_MARGIN: f32 = 10.0;
const ROW_START_X: f32 = 20.0;
const FIRST_ROW_Y: f32 = 20.0;
const SECOND_ROW_Y: f32 = 80.0;
const CUSTOM_GAP: f32 = 20.0;
const CUSTOM_WIDTH: f32 = 60.0;
const BRUSH_OFFSET: f32 = 100.0;
const BRUSH_PITCH: f32 = 40.0;
const BRUSH_HIT_RADIUS: f32 = 20.0;
const BUTTON_WIDTH: f32 = 80.0;
const BUTTON_HEIGHT: f32 = 30.0;
const BUTTON_MARGIN: f32 = 10.0;
const HISTORY_GAP: f32 = 20.0;
const HISTORY_WIDTH: f32 = 60.0;

/// Region groups in hit-test scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionGroup {
    Colors,
    CustomColor,
    BrushSizes,
    Tools,
    Effects,
    History,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub group: RegionGroup,
    pub shape: Shape,
    pub action: ActionId,
    pub payload: Option<Payload>,
}

/// Packs fixed-size boxes left to right on one row
struct RowPacker {
    x: f32,
    y: f32,
}

impl RowPacker {
    fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn next_rect(&mut self, width: f32, height: f32, margin: f32) -> Shape {
        let shape = Shape::rect(self.x, self.y, width, height);
        self.x += width + margin;
        shape
    }

    fn skip(&mut self, dx: f32) {
        self.x += dx;
    }
}

#[derive(Debug, Clone, Default)]
pub struct Layout {
    regions: Vec<Region>,
    chrome_height: f32,
}

impl Layout {
    pub fn new(chrome_height: f32) -> Self {
        Self {
            regions: Vec::new(),
            chrome_height,
        }
    }

    /// The control strip of the palette tool, packed from `config`
    pub fn standard(config: &PaletteConfig) -> Self {
        let mut layout = Self::new(config.chrome_height);

        let mut row = RowPacker::new(ROW_START_X, FIRST_ROW_Y);
        for (i, entry) in config.colors.iter().enumerate() {
            let shape = row.next_rect(COLOR_BOX, COLOR_BOX, COLOR_MARGIN);
            layout.register_region(
                RegionGroup::Colors,
                shape,
                ActionId::SelectColor(i),
                Some(Payload::Color(entry.color())),
            );
        }

        row.skip(CUSTOM_GAP);
        let custom = row.next_rect(CUSTOM_WIDTH, COLOR_BOX, 0.0);
        layout.register_region(RegionGroup::CustomColor, custom, ActionId::SelectCustomColor, None);

        let brush_y = FIRST_ROW_Y + COLOR_BOX / 2.0;
        let brush_x = custom.bounds().min.x + BRUSH_OFFSET;
        for (i, width) in config.brush_sizes.iter().enumerate() {
            let center = pos2(brush_x + i as f32 * BRUSH_PITCH, brush_y);
            layout.register_region(
                RegionGroup::BrushSizes,
                Shape::circle(center, BRUSH_HIT_RADIUS),
                ActionId::SelectBrush(i),
                Some(Payload::BrushWidth(*width)),
            );
        }

        // Effects, undo/redo and the tool buttons share the second row.
        let mut row = RowPacker::new(ROW_START_X, SECOND_ROW_Y);
        for effect in &config.effects {
            let shape = row.next_rect(BUTTON_WIDTH, BUTTON_HEIGHT, BUTTON_MARGIN);
            layout.register_region(
                RegionGroup::Effects,
                shape,
                ActionId::ApplyEffect(*effect),
                Some(Payload::Effect(*effect)),
            );
        }

        row.skip(HISTORY_GAP);
        for action in [ActionId::Undo, ActionId::Redo] {
            let shape = row.next_rect(HISTORY_WIDTH, BUTTON_HEIGHT, BUTTON_MARGIN);
            layout.register_region(RegionGroup::History, shape, action, None);
        }

        row.skip(HISTORY_GAP);
        for action in [ActionId::SelectBrushTool, ActionId::SelectEraser, ActionId::Clear, ActionId::Save] {
            let shape = row.next_rect(BUTTON_WIDTH, BUTTON_HEIGHT, BUTTON_MARGIN);
            layout.register_region(RegionGroup::Tools, shape, action, None);
        }

        layout
    }

    /// Add a region. The table stays ordered by group, preserving insertion order within a group.
    pub fn register_region(&mut self, group: RegionGroup, shape: Shape, action: ActionId, payload: Option<Payload>) {
        let at = self.regions.partition_point(|r| r.group <= group);
        self.regions.insert(
            at,
            Region {
                group,
                shape,
                action,
                payload,
            },
        );
    }

    /// First region containing `point`, scanning groups in order
    pub fn hit_test(&self, point: Pos2) -> Option<ActionId> {
        self.regions
            .iter()
            .find(|region| region.shape.contains(point))
            .map(|region| region.action)
    }

    /// Actions whose regions get a selection outline
    pub fn highlight_state(&self, selection: &SelectionState) -> HashSet<ActionId> {
        let mut highlighted = HashSet::new();
        for region in &self.regions {
            let lit = match (region.action, region.payload) {
                (ActionId::SelectColor(_), Some(Payload::Color(color))) => color == selection.color,
                (ActionId::SelectBrush(i), _) => i == selection.brush_index,
                (ActionId::SelectBrushTool, _) => !selection.eraser,
                (ActionId::SelectEraser, _) => selection.eraser,
                (ActionId::ApplyEffect(effect), _) => effect == selection.effect,
                _ => false,
            };
            if lit {
                highlighted.insert(region.action);
            }
        }
        highlighted
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Region bound to `action`, if any
    pub fn region_for(&self, action: ActionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.action == action)
    }

    pub fn chrome_height(&self) -> f32 {
        self.chrome_height
    }

    /// True if `point` lies in the control strip rather than on the canvas
    pub fn in_chrome(&self, point: Pos2) -> bool {
        point.y < self.chrome_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Effect;

    fn layout() -> Layout {
        Layout::standard(&PaletteConfig::default())
    }

    #[test]
    fn test_color_packing() {
        let layout = layout();
        assert_eq!(layout.hit_test(pos2(20.0, 20.0)), Some(ActionId::SelectColor(0)));
        assert_eq!(layout.hit_test(pos2(65.0, 35.0)), Some(ActionId::SelectColor(1)));
        assert_eq!(layout.hit_test(pos2(55.0, 35.0)), None);
        assert_eq!(layout.hit_test(pos2(20.0 + 11.0 * 40.0 + 5.0, 25.0)), Some(ActionId::SelectColor(11)));
    }

    #[test]
    fn test_custom_and_brush_positions() {
        let layout = layout();
        let custom = layout.region_for(ActionId::SelectCustomColor).unwrap();
        assert_eq!(custom.shape.bounds().min, pos2(520.0, 20.0));
        assert_eq!(layout.hit_test(pos2(620.0, 35.0)), Some(ActionId::SelectBrush(0)));
        assert_eq!(layout.hit_test(pos2(700.0, 40.0)), Some(ActionId::SelectBrush(2)));
    }

    #[test]
    fn test_second_row() {
        let layout = layout();
        assert_eq!(layout.hit_test(pos2(25.0, 90.0)), Some(ActionId::ApplyEffect(Effect::Normal)));
        assert_eq!(layout.hit_test(pos2(300.0, 90.0)), Some(ActionId::ApplyEffect(Effect::Grayscale)));
        assert_eq!(layout.hit_test(pos2(410.0, 90.0)), Some(ActionId::Undo));
        assert_eq!(layout.hit_test(pos2(480.0, 90.0)), Some(ActionId::Redo));
        assert_eq!(layout.hit_test(pos2(560.0, 90.0)), Some(ActionId::SelectBrushTool));
        assert_eq!(layout.hit_test(pos2(700.0, 90.0)), Some(ActionId::SelectEraser));
        let save = layout.region_for(ActionId::Save).unwrap();
        assert!(save.shape.bounds().max.x <= 1024.0);
    }

    #[test]
    fn test_static_regions_do_not_overlap() {
        let layout = layout();
        let regions = layout.regions();
        for (i, a) in regions.iter().enumerate() {
            for b in &regions[i + 1..] {
                assert!(!a.shape.overlaps(&b.shape), "{:?} overlaps {:?}", a.action, b.action);
            }
        }
    }

    #[test]
    fn test_registration_keeps_scan_order() {
        let mut layout = Layout::new(120.0);
        layout.register_region(RegionGroup::History, Shape::rect(0.0, 0.0, 10.0, 10.0), ActionId::Undo, None);
        layout.register_region(RegionGroup::Colors, Shape::rect(0.0, 0.0, 10.0, 10.0), ActionId::SelectColor(0), None);
        assert_eq!(layout.hit_test(pos2(5.0, 5.0)), Some(ActionId::SelectColor(0)));
    }

    #[test]
    fn test_highlight_follows_selection() {
        let layout = layout();
        let mut selection = SelectionState::new(image::Rgb([255, 0, 0]), 2, 10);
        let lit = layout.highlight_state(&selection);
        assert!(lit.contains(&ActionId::SelectColor(2)));
        assert!(lit.contains(&ActionId::SelectBrush(2)));
        assert!(lit.contains(&ActionId::SelectBrushTool));
        assert!(lit.contains(&ActionId::ApplyEffect(Effect::Normal)));
        assert!(!lit.contains(&ActionId::SelectEraser));

        selection.eraser = true;
        selection.effect = Effect::Blur;
        let lit = layout.highlight_state(&selection);
        assert!(lit.contains(&ActionId::SelectEraser));
        assert!(!lit.contains(&ActionId::SelectBrushTool));
        assert!(lit.contains(&ActionId::ApplyEffect(Effect::Blur)));
    }
}
