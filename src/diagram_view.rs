//! Force diagram drawn from the free-body vectors of the current scenario

use curve_physics::ForceDiagram;
use egui::{Align2, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use glam::DVec2;

use crate::theme::Palette;

/// Screen-space arrow for a force, y flipped so up stays up
pub fn screen_vector(force: DVec2, pixels_per_newton: f64) -> Vec2 {
    let scaled = force * pixels_per_newton;
    Vec2::new(scaled.x as f32, -scaled.y as f32)
}

/// Scale that fits the largest force into `max_length` pixels
pub fn fit_scale(diagram: &ForceDiagram, max_length: f32) -> f64 {
    let largest = diagram.max_magnitude();
    if largest > 0.0 {
        max_length as f64 / largest
    } else {
        0.0
    }
}

pub fn show(ui: &mut Ui, diagram: &ForceDiagram, palette: &Palette) {
    let size = egui::vec2(ui.available_width(), 320.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;

    let car_center = Pos2::new(rect.center().x - rect.width() * 0.15, rect.center().y + 20.0);
    let theta = diagram.bank_angle as f32;
    // Road runs up toward the outside of the curve (left), centre is to the right
    let along = Vec2::new(theta.cos(), theta.sin());
    let up = Vec2::new(theta.sin(), -theta.cos());

    let road_half = rect.width().min(480.0) * 0.45;
    let road_base = car_center - up * 14.0;
    painter.line_segment(
        [road_base - along * road_half, road_base + along * road_half],
        Stroke::new(4.0, palette.road),
    );

    let car = [
        car_center + along * 28.0 - up * 12.0,
        car_center - along * 28.0 - up * 12.0,
        car_center - along * 28.0 + up * 12.0,
        car_center + along * 28.0 + up * 12.0,
    ];
    painter.add(Shape::convex_polygon(
        car.to_vec(),
        palette.overlay,
        Stroke::new(1.0, palette.text),
    ));

    let scale = fit_scale(diagram, rect.height() * 0.4);
    let font = FontId::proportional(12.0);
    let arrows = [
        ("W", diagram.weight, palette.weight),
        ("N", diagram.normal, palette.normal),
        ("f", diagram.friction, palette.friction),
        ("F_c", diagram.required_centripetal, palette.centripetal),
        ("net", diagram.net(), palette.net),
    ];
    for (label, force, color) in arrows {
        if force.length() <= f64::EPSILON {
            continue;
        }
        let vector = screen_vector(force, scale);
        painter.arrow(car_center, vector, Stroke::new(2.5, color));
        painter.text(
            car_center + vector * 1.05,
            Align2::CENTER_CENTER,
            label,
            font.clone(),
            color,
        );
    }

    painter.text(
        rect.right_bottom() - egui::vec2(8.0, 8.0),
        Align2::RIGHT_BOTTOM,
        "centre of curve →",
        font.clone(),
        palette.subtext,
    );

    let legend_origin = rect.right_top() + egui::vec2(-8.0, 8.0);
    for (row, (label, force, color)) in arrows.iter().enumerate() {
        painter.text(
            legend_origin + egui::vec2(0.0, row as f32 * 16.0),
            Align2::RIGHT_TOP,
            format!("{label}: {:.2} N", force.length()),
            font.clone(),
            *color,
        );
    }

    let (verdict, color) = if diagram.is_slipping {
        ("Slipping: the road cannot supply the turn", palette.warning)
    } else {
        ("Holding the curve", palette.normal)
    };
    painter.text(
        rect.left_top() + egui::vec2(8.0, 8.0),
        Align2::LEFT_TOP,
        verdict,
        font,
        color,
    );
}
