use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, pos2, vec2};
use image::Rgb;

use crate::command::{ActionId, Payload};
use crate::geometry::Shape;
use crate::palette::PaletteController;

const STRIP_FILL: Color32 = Color32::from_gray(220);
const BUTTON_FILL: Color32 = Color32::from_gray(200);
const OUTLINE: Color32 = Color32::BLACK;
const ACTIVE_OUTLINE: Color32 = Color32::from_rgb(220, 0, 0);
const MAX_BRUSH_PREVIEW: f32 = 18.0;

fn to_color32(Rgb([r, g, b]): Rgb<u8>) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Paint the control strip with its top-left corner at `origin`
pub fn control_strip(painter: &Painter, origin: Pos2, ctl: &PaletteController) {
    let layout = ctl.layout();
    let selection = ctl.selection();
    let highlighted = ctl.highlighted();
    let offset = origin.to_vec2();

    let strip = Rect::from_min_size(origin, vec2(painter.clip_rect().width(), layout.chrome_height()));
    painter.rect_filled(strip, 0.0, STRIP_FILL);
    painter.line_segment(
        [strip.left_bottom(), strip.right_bottom()],
        Stroke::new(2.0, OUTLINE),
    );

    for region in layout.regions() {
        let lit = highlighted.contains(&region.action);
        match (region.action, region.shape) {
            (ActionId::SelectBrush(_), Shape::Circle { center, radius }) => {
                let center = center + offset;
                let width = match region.payload {
                    Some(Payload::BrushWidth(width)) => width as f32,
                    _ => 1.0,
                };
                let preview = (width / 2.0).clamp(1.0, MAX_BRUSH_PREVIEW);
                painter.circle_filled(center, preview, OUTLINE);
                if lit {
                    painter.circle_stroke(center, radius - 1.0, Stroke::new(1.0, OUTLINE));
                }
            }
            (action, shape) => {
                let rect = shape.bounds().translate(offset);
                let fill = match (action, region.payload) {
                    (_, Some(Payload::Color(color))) => to_color32(color),
                    (ActionId::SelectCustomColor, _) => to_color32(selection.custom_color),
                    _ => BUTTON_FILL,
                };
                painter.rect_filled(rect, 0.0, fill);
                painter.rect_stroke(rect, 0.0, Stroke::new(1.0, OUTLINE));

                match action {
                    ActionId::SelectColor(_) => {}
                    ActionId::SelectCustomColor => {
                        painter.text(
                            pos2(rect.min.x, rect.max.y + 12.0),
                            Align2::LEFT_CENTER,
                            action.label(),
                            FontId::proportional(12.0),
                            OUTLINE,
                        );
                    }
                    _ => {
                        painter.text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            action.label(),
                            FontId::proportional(12.0),
                            OUTLINE,
                        );
                    }
                }

                if lit {
                    let outline = if matches!(action, ActionId::SelectColor(_)) { OUTLINE } else { ACTIVE_OUTLINE };
                    painter.rect_stroke(rect.expand(2.0), 0.0, Stroke::new(2.0, outline));
                }
            }
        }
    }
}
