use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{Intent, Metric};

// ---------------------------------------------------------------------------
// Continuous colour ramps
// ---------------------------------------------------------------------------

/// Sequential ramps for bar charts and value shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    Reds,
    Greens,
    Blues,
    Oranges,
}

impl Ramp {
    fn hue(self) -> f32 {
        match self {
            Ramp::Reds => 0.0,
            Ramp::Greens => 130.0,
            Ramp::Blues => 215.0,
            Ramp::Oranges => 32.0,
        }
    }

    /// Colour at position `t` in [0, 1]; light at 0, saturated at 1.
    pub fn at(self, t: f64) -> Color32 {
        let t = t.clamp(0.0, 1.0) as f32;
        let lightness = 0.85 - 0.45 * t;
        let hsl = Hsl::new(self.hue(), 0.72, lightness);
        to_color32(hsl)
    }
}

/// Ramp matching a metric's colour intent: red scales where higher is worse,
/// green where higher is better, blue otherwise.
pub fn ramp_for(metric: Metric) -> Ramp {
    match metric.intent() {
        Intent::HigherIsWorse => Ramp::Reds,
        Intent::HigherIsBetter => Ramp::Greens,
        Intent::Neutral => Ramp::Blues,
    }
}

/// Diverging scale for correlation cells: blue at -1, near-white at 0,
/// red at +1.
pub fn diverging(r: f64) -> Color32 {
    let r = r.clamp(-1.0, 1.0) as f32;
    let (hue, strength) = if r >= 0.0 { (0.0, r) } else { (215.0, -r) };
    let hsl = Hsl::new(hue, 0.70, 0.92 - 0.42 * strength);
    to_color32(hsl)
}

/// Colour for a trailing delta on a metric card: green when the movement is
/// an improvement for this metric's intent, red when it is a deterioration.
pub fn delta_color(metric: Metric, signum: f64) -> Color32 {
    if signum == 0.0 {
        return Color32::GRAY;
    }
    let worsening = match metric.intent() {
        Intent::HigherIsWorse => signum > 0.0,
        Intent::HigherIsBetter => signum < 0.0,
        Intent::Neutral => return Color32::GRAY,
    };
    if worsening {
        Color32::from_rgb(200, 60, 50)
    } else {
        Color32::from_rgb(40, 140, 70)
    }
}

fn to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_darkens_with_t() {
        let light = Ramp::Reds.at(0.0);
        let dark = Ramp::Reds.at(1.0);
        let sum = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(sum(light) > sum(dark));
    }

    #[test]
    fn diverging_endpoints_differ_in_hue() {
        let neg = diverging(-1.0);
        let pos = diverging(1.0);
        assert!(pos.r() > pos.b());
        assert!(neg.b() > neg.r());
    }

    #[test]
    fn delta_color_follows_intent() {
        // rising emissions: bad → red-ish
        let c = delta_color(Metric::Co2Emissions, 1.0);
        assert!(c.r() > c.g());
        // rising renewables: good → green-ish
        let c = delta_color(Metric::RenewableEnergy, 1.0);
        assert!(c.g() > c.r());
    }
}
