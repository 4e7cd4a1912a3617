use curve_physics::{compute, ComputationResult, DomainError, ForceDiagram, Quantity};
use egui::{Context, RichText, Ui, ViewportId};
use std::time::Duration;
use egui_wgpu::Renderer;
use egui_winit::State;
use wgpu::{Device, TextureFormat};
use winit::{event::WindowEvent, window::Window};

use crate::chart::{self, Series};
use crate::config::{AppConfig, Bounds, InputConfig, RangeConfig, RoadKind, SweepConfig};
use crate::diagram_view;
use crate::equation::{describe_error, describe_result, equation_for};
use crate::theme::Palette;

pub struct UiState {
    pub inputs: InputConfig,
    pub ranges: RangeConfig,
    pub sweeps: SweepConfig,
    pub quantity: Quantity,
    pub auto_calculate: bool,
    pub show_chart: bool,
    pub show_diagram: bool,
    pub palette: Palette,

    pub outcome: Option<Result<ComputationResult, DomainError>>,
    pub series: Option<Series>,
    pub diagram: Option<Result<ForceDiagram, DomainError>>,
    pub inputs_dirty: bool,
}

impl UiState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            inputs: config.inputs.clone(),
            ranges: config.ranges.clone(),
            sweeps: config.sweeps.clone(),
            quantity: config.inputs.quantity.into(),
            auto_calculate: config.inputs.auto_calculate,
            show_chart: true,
            show_diagram: true,
            palette: Palette::mocha(),
            outcome: None,
            series: None,
            diagram: None,
            inputs_dirty: true,
        }
    }

    /// Run the selected calculation and refresh the chart and diagram
    pub fn calculate(&mut self) {
        let scenario = self.inputs.scenario_for(self.quantity);
        let outcome = compute(self.quantity, &scenario);

        match &outcome {
            Ok(result) => log::debug!("{}: {}", self.quantity.label(), describe_result(result)),
            Err(e) => log::info!("{} rejected: {}", self.quantity.label(), e.kind()),
        }

        self.outcome = Some(outcome);
        self.series = self
            .show_chart
            .then(|| Series::sample(self.quantity, &scenario, &self.sweeps));
        self.diagram = self
            .show_diagram
            .then(|| ForceDiagram::new(&self.inputs.scenario_for(Quantity::Friction)));
        self.inputs_dirty = false;
    }
}

pub struct Gui {
    context: Context,
    state: State,
    renderer: Renderer,
}

impl Gui {
    pub fn new(device: &Device, output_color_format: TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        context.set_visuals(egui::Visuals::dark());
        let id = context.viewport_id();

        let state = State::new(
            context.clone(),
            id,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = Renderer::new(
            device,
            output_color_format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                predictable_texture_filtering: false,
            },
        );

        Self {
            context,
            state,
            renderer,
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    pub fn render(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
        view: &wgpu::TextureView,
        ui_state: &mut UiState,
    ) -> Duration {
        let raw_input = self.state.take_egui_input(window);

        let full_output = self.context.run(raw_input, |ctx| {
            ui(ctx, ui_state);
        });

        // Animations and popups ask for follow-up frames through the root viewport
        let repaint_after = full_output
            .viewport_output
            .get(&ViewportId::ROOT)
            .map_or(Duration::MAX, |viewport| viewport.repaint_delay);

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let clipped_primitives = self
            .context
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let size = window.inner_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Egui Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(ui_state.palette.clear_color()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        // egui-wgpu renders into a 'static pass
        let mut render_pass = render_pass.forget_lifetime();

        self.renderer
            .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        drop(render_pass);

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        repaint_after
    }
}

/// Number input limited to `bounds`; returns true when the value changed
fn bounded_input(ui: &mut Ui, label: &str, value: &mut f64, bounds: Bounds, unit: &str) -> bool {
    ui.horizontal(|ui| {
        ui.label(label);
        let speed = ((bounds.max - bounds.min) / 1000.0).max(0.01);
        ui.add(
            egui::DragValue::new(value)
                .range(bounds.min..=bounds.max)
                .speed(speed)
                .suffix(unit),
        )
        .changed()
    })
    .inner
}

fn input_panel(ui: &mut Ui, state: &mut UiState) {
    ui.heading("Input Values");
    let ranges = state.ranges.clone();
    let inputs = &mut state.inputs;
    let mut changed = false;

    changed |= bounded_input(ui, "Mass of the car", &mut inputs.mass, ranges.mass, " kg");
    changed |= bounded_input(ui, "Radius of the curve", &mut inputs.radius, ranges.radius, " m");
    changed |= bounded_input(
        ui,
        "Velocity of the car",
        &mut inputs.velocity,
        ranges.velocity,
        " m/s",
    );
    changed |= bounded_input(
        ui,
        "Centripetal force",
        &mut inputs.centripetal_force,
        ranges.centripetal_force,
        " N",
    );

    ui.separator();
    ui.heading("Scenario");
    ui.horizontal(|ui| {
        changed |= ui.radio_value(&mut inputs.road, RoadKind::Flat, "Flat").changed();
        changed |= ui
            .radio_value(&mut inputs.road, RoadKind::Banked, "Banked")
            .changed();
    });
    ui.add_enabled_ui(inputs.road == RoadKind::Banked, |ui| {
        changed |= ui
            .add(
                egui::Slider::new(&mut inputs.angle, ranges.angle.min..=ranges.angle.max)
                    .text("Angle (degrees)"),
            )
            .changed();
    });
    changed |= ui
        .checkbox(&mut inputs.include_friction, "Include friction")
        .changed();
    ui.add_enabled_ui(inputs.include_friction, |ui| {
        changed |= ui
            .add(
                egui::Slider::new(
                    &mut inputs.friction_coefficient,
                    ranges.friction_coefficient.min..=ranges.friction_coefficient.max,
                )
                .text("Friction coefficient (μ_s)"),
            )
            .changed();
    });

    ui.separator();
    ui.heading("Select What to Calculate:");
    let previous = state.quantity;
    egui::ComboBox::from_label("What would you like to calculate?")
        .selected_text(state.quantity.label())
        .show_ui(ui, |ui| {
            for quantity in Quantity::ALL {
                ui.selectable_value(&mut state.quantity, quantity, quantity.label());
            }
        });
    if previous != state.quantity {
        state.outcome = None;
        changed = true;
    }

    ui.separator();
    changed |= ui.checkbox(&mut state.show_chart, "Show chart").changed();
    changed |= ui
        .checkbox(&mut state.show_diagram, "Show force diagram")
        .changed();
    ui.checkbox(&mut state.auto_calculate, "Calculate automatically");

    if changed {
        state.inputs_dirty = true;
    }

    let button = format!("Calculate {}", state.quantity.label());
    if ui.button(button).clicked() || (state.auto_calculate && state.inputs_dirty) {
        state.calculate();
    }
}

fn result_panel(ui: &mut Ui, state: &UiState) {
    let palette = state.palette;
    let equation = equation_for(state.quantity);

    ui.heading(equation.heading);
    ui.label(RichText::new(equation.display).size(24.0).monospace());
    ui.collapsing("LaTeX", |ui| {
        ui.code(equation.latex);
    });

    ui.add_space(8.0);
    match &state.outcome {
        Some(Ok(result)) if result.quantity() == state.quantity => {
            ui.label(RichText::new(describe_result(result)).size(18.0).strong());
        }
        Some(Err(e)) => {
            ui.colored_label(palette.warning, describe_error(state.quantity, e));
        }
        _ => {
            ui.label("Press calculate to see the result.");
        }
    }

    if state.show_chart {
        if let Some(series) = &state.series {
            ui.separator();
            chart::show(ui, series, &palette);
        }
    }

    if state.show_diagram {
        ui.separator();
        ui.label(RichText::new("Force Diagram").strong());
        match &state.diagram {
            Some(Ok(diagram)) => diagram_view::show(ui, diagram, &palette),
            Some(Err(e)) => {
                ui.colored_label(palette.warning, format!("No force diagram: {e}"));
            }
            None => {}
        }
    }
}

fn ui(ctx: &Context, state: &mut UiState) {
    egui::SidePanel::left("inputs")
        .resizable(false)
        .default_width(320.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| input_panel(ui, state));
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Car on a Banked Curve Problem Solver");
        ui.separator();
        egui::ScrollArea::vertical().show(ui, |ui| result_panel(ui, state));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_follows_config() {
        let state = UiState::new(&AppConfig::default());
        assert_eq!(state.quantity, Quantity::CentripetalForce);
        assert!(state.inputs_dirty);
        assert!(state.outcome.is_none());
    }

    #[test]
    fn test_calculate_centripetal_force() {
        let mut state = UiState::new(&AppConfig::default());
        state.calculate();

        assert_eq!(
            state.outcome,
            Some(Ok(ComputationResult::CentripetalForce(18000.0)))
        );
        assert!(!state.inputs_dirty);
        assert_eq!(state.series.as_ref().map(|s| s.points.len()), Some(100));
        assert!(matches!(state.diagram, Some(Ok(_))));
    }

    #[test]
    fn test_velocity_uses_entered_force() {
        let mut state = UiState::new(&AppConfig::default());
        state.quantity = Quantity::Velocity;
        state.calculate();

        let text = match &state.outcome {
            Some(Ok(result)) => describe_result(result),
            other => panic!("unexpected outcome {other:?}"),
        };
        assert_eq!(text, "The velocity of the car is: 15.81 m/s");
    }

    #[test]
    fn test_vertical_bank_is_reported() {
        let mut state = UiState::new(&AppConfig::default());
        state.quantity = Quantity::NormalForce;
        state.inputs.angle = 90.0;
        state.calculate();

        assert_eq!(state.outcome, Some(Err(DomainError::UndefinedNormalForce)));
        assert_eq!(state.diagram, Some(Err(DomainError::UndefinedNormalForce)));
    }

    #[test]
    fn test_hidden_views_are_not_computed() {
        let mut state = UiState::new(&AppConfig::default());
        state.show_chart = false;
        state.show_diagram = false;
        state.calculate();

        assert!(state.series.is_none());
        assert!(state.diagram.is_none());
    }
}
