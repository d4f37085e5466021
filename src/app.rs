use eframe::egui;

use crate::config::Config;
use crate::ui::panels::{LibraryPanel, ResynthPanel, TonePanel};

// Main app state
pub struct ToneSmithApp {
    current_tab: Tab,
    tone: TonePanel,
    library: LibraryPanel,
    resynth: ResynthPanel,
    should_exit: bool,
}

#[derive(PartialEq)]
enum Tab {
    Tone,
    Library,
    Resynth,
}

impl ToneSmithApp {
    pub fn new(config: &Config) -> Self {
        log::info!("Creating ToneSmithApp instance");
        Self {
            current_tab: Tab::Tone,
            tone: TonePanel::new(config.tone.clone(), config.tone_state()),
            library: LibraryPanel::new(config.library.clone(), config.library_output_dir.clone()),
            resynth: ResynthPanel::new(config.resynth_config()),
            should_exit: false,
        }
    }
}

impl eframe::App for ToneSmithApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("ToneSmith");
                ui.label("🎵");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("❌ Exit").clicked() {
                        self.should_exit = true;
                    }
                });
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.current_tab, Tab::Tone, "Tone Generator");
                ui.selectable_value(&mut self.current_tab, Tab::Library, "Note Library");
                ui.selectable_value(&mut self.current_tab, Tab::Resynth, "Re-synthesize");
            });

            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match self.current_tab {
                Tab::Tone => self.tone.show(ui),
                Tab::Library => self.library.show(ui),
                Tab::Resynth => self.resynth.show(ui),
            });
        });

        if self.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // Worker threads and playback report through channels, keep polling them
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

/// Open the main window and block until it closes
pub fn run(config: Config) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 820.0])
            .with_title("ToneSmith"),
        ..Default::default()
    };

    eframe::run_native(
        "ToneSmith",
        options,
        Box::new(move |_cc| Ok(Box::new(ToneSmithApp::new(&config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))
}
