//! Swept charts of a computed quantity against one input

use curve_physics::{compute, Banking, ComputationResult, Quantity, ScenarioInputs};
use egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui};

use crate::config::{SweepConfig, SweepRange};
use crate::theme::Palette;

/// Evenly spaced samples from `start` to `end`, both endpoints included
pub fn linspace(range: SweepRange) -> impl Iterator<Item = f64> {
    let SweepRange {
        start,
        end,
        samples,
    } = range;
    let step = if samples > 1 {
        (end - start) / (samples - 1) as f64
    } else {
        0.0
    };
    (0..samples).map(move |i| {
        if i + 1 == samples && samples > 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}

/// Input swept along the x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepAxis {
    Velocity,
    Angle,
    CentripetalForce,
}

impl SweepAxis {
    /// Axis that best illustrates how `quantity` behaves
    pub fn for_quantity(quantity: Quantity) -> Self {
        match quantity {
            Quantity::CentripetalForce | Quantity::Friction => SweepAxis::Velocity,
            Quantity::NormalForce => SweepAxis::Angle,
            // Both are solved from the entered force, so the curve passes through the result
            Quantity::Velocity | Quantity::Angle => SweepAxis::CentripetalForce,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SweepAxis::Velocity => "Velocity (m/s)",
            SweepAxis::Angle => "Angle (degrees)",
            SweepAxis::CentripetalForce => "Centripetal Force (N)",
        }
    }

    fn range(&self, sweeps: &SweepConfig) -> SweepRange {
        match self {
            SweepAxis::Velocity => sweeps.velocity,
            SweepAxis::Angle => sweeps.angle,
            SweepAxis::CentripetalForce => sweeps.centripetal_force,
        }
    }

    fn apply(&self, base: &ScenarioInputs, x: f64) -> ScenarioInputs {
        let mut inputs = *base;
        match self {
            SweepAxis::Velocity => {
                inputs.velocity = x;
                inputs.centripetal_force = None;
            }
            SweepAxis::Angle => inputs.banking = Banking::Banked { angle_degrees: x },
            SweepAxis::CentripetalForce => inputs.centripetal_force = Some(x),
        }
        inputs
    }
}

fn value_label(quantity: Quantity) -> &'static str {
    match quantity {
        Quantity::CentripetalForce => "Centripetal Force (N)",
        Quantity::NormalForce => "Normal Force (N)",
        Quantity::Velocity => "Velocity (m/s)",
        Quantity::Angle => "Angle (degrees)",
        Quantity::Friction => "Friction Force (N)",
    }
}

/// Sampled curve ready for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<[f64; 2]>,
    /// First x at which the car starts slipping, for friction charts
    pub slip_onset: Option<f64>,
    /// Samples where the quantity is undefined
    pub skipped: usize,
}

impl Series {
    /// Sample `quantity` across the axis that suits it
    pub fn sample(quantity: Quantity, base: &ScenarioInputs, sweeps: &SweepConfig) -> Self {
        let axis = SweepAxis::for_quantity(quantity);
        let mut points = Vec::with_capacity(axis.range(sweeps).samples);
        let mut slip_onset = None;
        let mut skipped = 0;

        for x in linspace(axis.range(sweeps)) {
            match compute(quantity, &axis.apply(base, x)) {
                Ok(result) => {
                    if let ComputationResult::Friction {
                        is_slipping: true, ..
                    } = result
                    {
                        slip_onset.get_or_insert(x);
                    }
                    points.push([x, result.display_value()]);
                }
                Err(e) => {
                    log::debug!("{} undefined at x={:.3}: {}", quantity.label(), x, e);
                    skipped += 1;
                }
            }
        }

        Self {
            title: format!("{} vs {}", quantity.label(), axis_name(axis)),
            x_label: axis.label(),
            y_label: value_label(quantity),
            points,
            slip_onset,
            skipped,
        }
    }

    /// (min, max) of x and y over the sampled points
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let first = self.points.first()?;
        let mut x = [first[0], first[0]];
        let mut y = [first[1], first[1]];
        for point in &self.points {
            x = [x[0].min(point[0]), x[1].max(point[0])];
            y = [y[0].min(point[1]), y[1].max(point[1])];
        }
        Some((x, y))
    }
}

fn axis_name(axis: SweepAxis) -> &'static str {
    match axis {
        SweepAxis::Velocity => "Velocity",
        SweepAxis::Angle => "Angle",
        SweepAxis::CentripetalForce => "Centripetal Force",
    }
}

const MARGIN_LEFT: f32 = 70.0;
const MARGIN_BOTTOM: f32 = 36.0;
const MARGIN: f32 = 12.0;

/// Draw the series into the remaining width of `ui`
pub fn show(ui: &mut Ui, series: &Series, palette: &Palette) {
    ui.label(egui::RichText::new(&series.title).strong());

    let size = egui::vec2(ui.available_width(), 280.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;

    let Some((x_range, y_range)) = series.bounds() else {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "No defined values in this range",
            FontId::proportional(14.0),
            palette.subtext,
        );
        return;
    };

    let plot = egui::Rect::from_min_max(
        Pos2::new(rect.left() + MARGIN_LEFT, rect.top() + MARGIN),
        Pos2::new(rect.right() - MARGIN, rect.bottom() - MARGIN_BOTTOM),
    );
    // Flat series still need a non-zero span
    let y_span = if y_range[1] > y_range[0] {
        y_range[1] - y_range[0]
    } else {
        1.0
    };
    let x_span = (x_range[1] - x_range[0]).max(f64::EPSILON);

    let to_screen = |x: f64, y: f64| {
        Pos2::new(
            plot.left() + ((x - x_range[0]) / x_span) as f32 * plot.width(),
            plot.bottom() - ((y - y_range[0]) / y_span) as f32 * plot.height(),
        )
    };

    let axis_stroke = Stroke::new(1.0, palette.overlay);
    painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis_stroke);
    painter.line_segment([plot.left_bottom(), plot.left_top()], axis_stroke);

    let font = FontId::proportional(11.0);
    painter.text(
        plot.left_top(),
        Align2::RIGHT_TOP,
        format!("{:.1} ", y_range[1]),
        font.clone(),
        palette.subtext,
    );
    painter.text(
        plot.left_bottom(),
        Align2::RIGHT_BOTTOM,
        format!("{:.1} ", y_range[0]),
        font.clone(),
        palette.subtext,
    );
    painter.text(
        plot.left_bottom() + egui::vec2(0.0, 4.0),
        Align2::LEFT_TOP,
        format!("{:.1}", x_range[0]),
        font.clone(),
        palette.subtext,
    );
    painter.text(
        plot.right_bottom() + egui::vec2(0.0, 4.0),
        Align2::RIGHT_TOP,
        format!("{:.1}", x_range[1]),
        font.clone(),
        palette.subtext,
    );
    painter.text(
        Pos2::new(plot.center().x, rect.bottom() - 4.0),
        Align2::CENTER_BOTTOM,
        series.x_label,
        font.clone(),
        palette.text,
    );
    painter.text(
        Pos2::new(rect.left() + 2.0, plot.center().y),
        Align2::LEFT_CENTER,
        series.y_label,
        font.clone(),
        palette.text,
    );

    if let Some(onset) = series.slip_onset {
        let top = to_screen(onset, y_range[1]);
        let bottom = to_screen(onset, y_range[0]);
        painter.line_segment([top, bottom], Stroke::new(1.0, palette.warning));
        painter.text(
            top,
            Align2::LEFT_TOP,
            format!(" slips above {onset:.1}"),
            font.clone(),
            palette.warning,
        );
    }

    let line: Vec<Pos2> = series
        .points
        .iter()
        .map(|[x, y]| to_screen(*x, *y))
        .collect();
    painter.add(Shape::line(line, Stroke::new(2.0, palette.accent)));

    if let Some(hover) = response.hover_pos() {
        let nearest = series.points.iter().min_by(|a, b| {
            let da = (to_screen(a[0], a[1]).x - hover.x).abs();
            let db = (to_screen(b[0], b[1]).x - hover.x).abs();
            da.total_cmp(&db)
        });
        if let Some([x, y]) = nearest {
            let at = to_screen(*x, *y);
            painter.circle_filled(at, 4.0, palette.accent);
            painter.text(
                at + egui::vec2(6.0, -6.0),
                Align2::LEFT_BOTTOM,
                format!("({x:.2}, {y:.2})"),
                font,
                Color32::WHITE,
            );
        }
    }

    if series.skipped > 0 {
        ui.small(format!(
            "{} sample(s) skipped where the value is undefined",
            series.skipped
        ));
    }
}
