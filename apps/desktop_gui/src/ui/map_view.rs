//! Pan/zoom canvas for the current map.

use client_core::Point;
use eframe::egui;

/// Pointer activity on the canvas, already mapped to viewport terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasInput {
    DragStart(Point),
    DragMove(Point),
    DragEnd,
    /// Browser convention: negative scrolls up.
    Wheel(f32),
}

fn to_point(pos: egui::Pos2) -> Point {
    Point::new(pos.x, pos.y)
}

/// Where the image lands inside `canvas`: contain-fit, then `scale` about the
/// canvas center, then `offset`.
pub fn image_rect(
    canvas: egui::Rect,
    image_size: egui::Vec2,
    (scale, offset): (f32, Point),
) -> egui::Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return egui::Rect::from_center_size(canvas.center(), egui::Vec2::ZERO);
    }
    let fit = (canvas.width() / image_size.x).min(canvas.height() / image_size.y);
    let size = image_size * fit * scale;
    let center = canvas.center() + egui::vec2(offset.x, offset.y);
    egui::Rect::from_center_size(center, size)
}

/// Paints the map (when a texture is available) and collects canvas input.
pub fn show_canvas(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    transform: (f32, Point),
    interactive: bool,
) -> (egui::Rect, Vec<CanvasInput>) {
    let sense = if interactive {
        egui::Sense::click_and_drag()
    } else {
        egui::Sense::hover()
    };
    let (canvas, response) = ui.allocate_exact_size(ui.available_size(), sense);
    let painter = ui.painter_at(canvas);
    painter.rect_filled(
        canvas,
        egui::CornerRadius::same(12),
        ui.visuals().extreme_bg_color,
    );

    if let Some(texture) = texture {
        let rect = image_rect(canvas, texture.size_vec2(), transform);
        painter.image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    let mut inputs = Vec::new();
    if !interactive {
        return (canvas, inputs);
    }

    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            inputs.push(CanvasInput::DragStart(to_point(pos)));
        }
    } else if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            inputs.push(CanvasInput::DragMove(to_point(pos)));
        }
    }
    if response.drag_stopped() {
        inputs.push(CanvasInput::DragEnd);
    }
    if response.hovered() {
        let scroll_y = ui.input(|i| i.raw_scroll_delta.y);
        if scroll_y != 0.0 {
            // egui reports wheel-up as positive.
            inputs.push(CanvasInput::Wheel(-scroll_y));
        }
    }

    if response.dragged() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    } else if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }

    (canvas, inputs)
}
