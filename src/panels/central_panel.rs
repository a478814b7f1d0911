use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, TextureHandle, pos2, vec2};

use crate::palette::StatusMessage;

/// Paint the canvas texture below the chrome, plus any status message over it
pub fn central_panel(painter: &Painter, canvas_rect: Rect, texture: &TextureHandle, status: Option<&StatusMessage>) {
    painter.image(
        texture.id(),
        canvas_rect,
        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
        Color32::WHITE,
    );

    if let Some(status) = status {
        let color = if status.is_error {
            Color32::from_rgb(200, 0, 0)
        } else {
            Color32::BLACK
        };
        let galley_pos: Pos2 = canvas_rect.center();
        let backdrop = Rect::from_center_size(galley_pos, vec2(canvas_rect.width() * 0.8, 40.0));
        painter.rect_filled(backdrop, 4.0, Color32::from_white_alpha(220));
        painter.text(galley_pos, Align2::CENTER_CENTER, &status.text, FontId::proportional(20.0), color);
    }
}
