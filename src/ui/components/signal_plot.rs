use egui::{Color32, Ui};
use egui_plot::{HLine, Line, Plot, PlotPoints};

/// What the points of a [`SignalPlot`] represent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Samples against time in seconds
    Waveform,
    /// One period of an oscillator against phase
    Cycle,
    /// Normalized magnitude against frequency in Hz
    Spectrum,
}

impl SignalKind {
    /// Y range kept visible whatever the data holds
    pub fn y_bounds(self) -> (f64, f64) {
        match self {
            SignalKind::Waveform | SignalKind::Cycle => (-1.0, 1.0),
            SignalKind::Spectrum => (0.0, 1.0),
        }
    }

    pub fn x_label(self) -> &'static str {
        match self {
            SignalKind::Waveform => "s",
            SignalKind::Cycle => "cycle",
            SignalKind::Spectrum => "Hz",
        }
    }

    fn color(self) -> Color32 {
        match self {
            SignalKind::Waveform | SignalKind::Cycle => Color32::from_rgb(0, 188, 212),
            SignalKind::Spectrum => Color32::from_rgb(255, 170, 0),
        }
    }

    /// Bipolar signals get a reference line at 0; spectra are filled down to it.
    fn has_zero_line(self) -> bool {
        !matches!(self, SignalKind::Spectrum)
    }
}

/// Read-only plot of `[x, y]` points from a rendered or analyzed buffer
pub struct SignalPlot {
    points: Vec<[f32; 2]>,
    kind: SignalKind,
    height: f32,
}

impl SignalPlot {
    pub fn new(points: Vec<[f32; 2]>, kind: SignalKind) -> Self {
        Self {
            points,
            kind,
            height: 100.0,
        }
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn show(self, ui: &mut Ui, id_source: impl std::hash::Hash) {
        let (y_min, y_max) = self.kind.y_bounds();
        let kind = self.kind;
        let compact = kind == SignalKind::Cycle;

        Plot::new(id_source)
            .height(self.height)
            .include_y(y_min)
            .include_y(y_max)
            .x_axis_label(kind.x_label())
            .show_axes([!compact, !compact])
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                if kind.has_zero_line() {
                    plot_ui.hline(HLine::new(0.0).color(Color32::DARK_GRAY));
                }

                let plot_points = PlotPoints::from_iter(
                    self.points.iter().map(|[x, y]| [*x as f64, *y as f64])
                );
                let line = Line::new(plot_points).color(kind.color());
                plot_ui.line(if kind.has_zero_line() { line } else { line.fill(0.0) });
            });
    }
}
