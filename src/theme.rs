//! Catppuccin Mocha colours for the calculator

use catppuccin::PALETTE;
use egui::Color32;

fn color32(color: &catppuccin::Color) -> Color32 {
    Color32::from_rgb(color.rgb.r, color.rgb.g, color.rgb.b)
}

/// Colours used by the charts and the force diagram
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub base: Color32,
    pub text: Color32,
    pub subtext: Color32,
    pub overlay: Color32,
    pub road: Color32,
    pub accent: Color32,
    pub warning: Color32,
    pub weight: Color32,
    pub normal: Color32,
    pub friction: Color32,
    pub centripetal: Color32,
    pub net: Color32,
}

impl Palette {
    pub fn mocha() -> Self {
        let colors = &PALETTE.mocha.colors;
        Self {
            base: color32(&colors.base),
            text: color32(&colors.text),
            subtext: color32(&colors.subtext0),
            overlay: color32(&colors.overlay1),
            road: color32(&colors.surface2),
            accent: color32(&colors.blue),
            warning: color32(&colors.red),
            weight: color32(&colors.peach),
            normal: color32(&colors.green),
            friction: color32(&colors.yellow),
            centripetal: color32(&colors.mauve),
            net: color32(&colors.sky),
        }
    }

    /// Surface clear colour in linear space for the wgpu pass
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = egui::Rgba::from(self.base).to_array();
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}
