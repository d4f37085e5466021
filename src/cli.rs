use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use tonesmith::audio::PreviewPlayer;
use tonesmith::config::Config;
use tonesmith::tools::{self, generate_library, ToneGeneratorState};
use tonesmith::Waveform;

/// Synthesizer tone and sample-library utilities
#[derive(Parser)]
#[command(name = "tonesmith", version)]
#[command(about = "Generate tones, note libraries and re-synthesized recordings")]
pub struct Cli {
    /// Read settings from this JSON file instead of the user config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the desktop window (default)
    Gui,

    /// Render one note with an ADSR envelope to a float WAV
    Tone(ToneArgs),

    /// Render every piano key for the chosen waveforms
    Library(LibraryArgs),

    /// Replace each WAV in a folder with a synthetic tone at its pitch
    Resynth(ResynthArgs),

    /// Write the fade-out demonstration file
    FadeDemo {
        /// Output file
        #[arg(long, default_value = tools::fade_demo::DEFAULT_FILE_NAME)]
        output: PathBuf,
    },

    /// Print the effective configuration as JSON
    Config,
}

#[derive(Debug, Args)]
pub struct ToneArgs {
    /// Note name, e.g. "A4" or "C#3"
    #[arg(long, default_value = "A4")]
    pub note: String,

    #[arg(long, default_value = "sine")]
    pub waveform: Waveform,

    /// Add the feedback echo
    #[arg(long)]
    pub echo: bool,

    #[arg(long)]
    pub attack: Option<f32>,

    #[arg(long)]
    pub decay: Option<f32>,

    #[arg(long)]
    pub sustain: Option<f32>,

    #[arg(long)]
    pub release: Option<f32>,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Also play the tone on the default output device
    #[arg(long)]
    pub play: bool,
}

#[derive(Debug, Args)]
pub struct LibraryArgs {
    /// Comma separated, e.g. "sine,square"
    #[arg(long, value_delimiter = ',', default_value = "sine")]
    pub waveforms: Vec<Waveform>,

    /// Skip the fade-out
    #[arg(long)]
    pub no_fade: bool,

    /// Add the single-tap echo
    #[arg(long)]
    pub echo: bool,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ResynthArgs {
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[arg(long)]
    pub waveform: Option<Waveform>,

    /// Fraction of each file to fade out
    #[arg(long)]
    pub fade: Option<f32>,
}

pub fn tone(args: ToneArgs, config: &Config) -> Result<()> {
    let mut state = ToneGeneratorState {
        waveform: args.waveform,
        note: args.note,
        echo_enabled: args.echo,
        ..config.tone_state()
    };
    if let Some(dir) = args.output_dir {
        state.output_dir = dir;
    }
    let env = &mut state.envelope;
    env.attack = args.attack.unwrap_or(env.attack);
    env.decay = args.decay.unwrap_or(env.decay);
    env.sustain = args.sustain.unwrap_or(env.sustain);
    env.release = args.release.unwrap_or(env.release);

    let path = state.generate_wav(&config.tone).context("Failed to generate tone")?;
    println!("Saved to {}", path.display());

    if args.play {
        let samples = state.render(&config.tone)?;
        let length = Duration::from_secs_f32(config.tone.duration.max(0.0));
        let mut player = PreviewPlayer::new();
        player.play(samples, config.tone.sample_rate)?;
        player.wait(length + Duration::from_secs(2))?;
    }
    Ok(())
}

pub fn library(args: LibraryArgs, config: &Config) -> Result<()> {
    let mut request = config.library_request(args.waveforms, !args.no_fade, args.echo);
    if let Some(dir) = args.output_dir {
        request.output_dir = dir;
    }

    let report = generate_library(&request, &config.library, |p| {
        if p.done % 88 == 0 || p.done == p.total {
            println!("{}/{} {}", p.done, p.total, p.path.display());
        }
    })
    .context("Failed to generate note library")?;

    println!("Notes generated successfully: {} files in {}", report.files_written, report.output_dir.display());
    Ok(())
}

pub fn resynth(args: ResynthArgs, config: &Config) -> Result<()> {
    let mut job = config.resynth_config();
    if let Some(dir) = args.input_dir {
        job.input_dir = dir;
    }
    if let Some(dir) = args.output_dir {
        job.output_dir = dir;
    }
    if let Some(waveform) = args.waveform {
        job.waveform = waveform;
    }
    if let Some(fade) = args.fade {
        job.fade_fraction = fade;
    }

    let report = tools::resynth::run(&job, |_, _, _| {})
        .with_context(|| format!("Failed to re-synthesize {}", job.input_dir.display()))?;

    for outcome in &report.processed {
        println!("{} -> {} ({:.1} Hz)", outcome.input.display(), outcome.output.display(), outcome.frequency);
    }
    println!("Processed {} files, skipped {}", report.processed.len(), report.skipped.len());
    Ok(())
}

pub fn fade_demo(output: PathBuf) -> Result<()> {
    tools::fade_demo::write_fade_demo(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Saved to {}", output.display());
    Ok(())
}
