//! Heat-layer rendering options.

use serde::{Deserialize, Serialize};

/// One colour stop of the heat gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Intensity at which this colour applies, in [0, 1].
    pub stop: f64,
    /// CSS-style hex colour.
    pub color: String,
}

impl GradientStop {
    pub fn new(stop: f64, color: impl Into<String>) -> Self {
        Self {
            stop,
            color: color.into(),
        }
    }
}

/// Configuration handed to the map surface alongside the points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatLayerOptions {
    /// Point radius in pixels.
    #[serde(default = "default_radius")]
    pub radius: u32,

    /// Blur radius in pixels.
    #[serde(default = "default_blur")]
    pub blur: u32,

    /// Zoom level at which points reach full intensity.
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,

    /// Intensity mapped to the top of the gradient.
    #[serde(default = "default_max")]
    pub max: f64,

    /// Colour stops, ascending.
    #[serde(default = "default_gradient")]
    pub gradient: Vec<GradientStop>,
}

fn default_radius() -> u32 {
    150
}

fn default_blur() -> u32 {
    100
}

fn default_max_zoom() -> u8 {
    16
}

fn default_max() -> f64 {
    1.0
}

fn default_gradient() -> Vec<GradientStop> {
    vec![
        GradientStop::new(0.2, "#00FFFF"),
        GradientStop::new(0.4, "#00FF00"),
        GradientStop::new(0.7, "#FFFF00"),
        GradientStop::new(1.0, "#FF0000"),
    ]
}

impl Default for HeatLayerOptions {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            blur: default_blur(),
            max_zoom: default_max_zoom(),
            max: default_max(),
            gradient: default_gradient(),
        }
    }
}

/// Radius and blur for a map zoom level.
///
/// Closer zoom levels need smaller blobs so neighbouring locations stay
/// distinguishable.
pub fn radius_blur_for_zoom(zoom: u8) -> (u32, u32) {
    match zoom {
        0..=14 => (150, 100),
        15 => (80, 60),
        16 => (40, 30),
        _ => (25, 20),
    }
}

impl HeatLayerOptions {
    /// Copy of these options with radius and blur adjusted for `zoom`.
    pub fn at_zoom(&self, zoom: u8) -> Self {
        let (radius, blur) = radius_blur_for_zoom(zoom);
        Self {
            radius,
            blur,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_table() {
        assert_eq!(radius_blur_for_zoom(3), (150, 100));
        assert_eq!(radius_blur_for_zoom(14), (150, 100));
        assert_eq!(radius_blur_for_zoom(15), (80, 60));
        assert_eq!(radius_blur_for_zoom(16), (40, 30));
        assert_eq!(radius_blur_for_zoom(17), (25, 20));
        assert_eq!(radius_blur_for_zoom(19), (25, 20));
    }

    #[test]
    fn at_zoom_keeps_gradient() {
        let base = HeatLayerOptions::default();
        let zoomed = base.at_zoom(16);
        assert_eq!(zoomed.radius, 40);
        assert_eq!(zoomed.blur, 30);
        assert_eq!(zoomed.gradient, base.gradient);
        assert_eq!(zoomed.max_zoom, 16);
    }
}
