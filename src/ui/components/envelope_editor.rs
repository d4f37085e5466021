use egui::{Ui, Rect, Stroke, Vec2, Pos2, Color32};
use crate::core::oscillator::Envelope;

/// Rate used only to draw the curve, not to render audio
const DRAW_RATE: u32 = 1000;

/// ADSR sliders with a drawing of the resulting gain curve
pub struct EnvelopeEditor {
    envelope: Envelope,
    duration: f32,
    width: f32,
    height: f32,
}

impl EnvelopeEditor {
    pub fn new(envelope: &Envelope, duration: f32) -> Self {
        Self {
            envelope: *envelope,
            duration,
            width: 240.0,
            height: 80.0,
        }
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Returns the edited envelope when any slider moved
    pub fn show(&self, ui: &mut Ui) -> Option<Envelope> {
        let mut env = self.envelope;
        let mut changed = false;

        ui.vertical(|ui| {
            changed |= ui.add(egui::Slider::new(&mut env.attack, 0.0..=1.0).text("Attack (s)")).changed();
            changed |= ui.add(egui::Slider::new(&mut env.decay, 0.0..=1.0).text("Decay (s)")).changed();
            changed |= ui.add(egui::Slider::new(&mut env.sustain, 0.0..=1.0).text("Sustain")).changed();
            changed |= ui.add(egui::Slider::new(&mut env.release, 0.0..=1.0).text("Release (s)")).changed();
        });

        let (rect, _response) = ui.allocate_exact_size(Vec2::new(self.width, self.height), egui::Sense::hover());
        if ui.is_rect_visible(rect) {
            let stroke = Stroke::new(1.5, Color32::from_rgb(0, 200, 200));
            ui.painter().add(egui::Shape::line(self.curve_points(&env, rect), stroke));
        }

        changed.then_some(env)
    }

    fn curve_points(&self, env: &Envelope, rect: Rect) -> Vec<Pos2> {
        let len = crate::core::oscillator::sample_count(self.duration, DRAW_RATE).max(2);
        let curve = env.curve(len, DRAW_RATE);

        let left = rect.left();
        let bottom = rect.bottom() - 2.0;
        let width = rect.width();
        let height = rect.height() - 4.0;
        let last = (len - 1) as f32;

        curve
            .iter()
            .enumerate()
            .map(|(i, gain)| Pos2::new(left + width * i as f32 / last, bottom - height * gain))
            .collect()
    }
}
