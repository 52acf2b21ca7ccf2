use anyhow::Result;
use clap::Parser;
use spectroscope::{load_audio_file, render_analysis, PlotConfig, SpectrumAnalyzer};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spectroscope")]
#[command(about = "Plot the waveform and spectrum of an audio file", long_about = None)]
struct Args {
    /// Input audio file (.wav or .mp3)
    input: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "spectrum.png")]
    output: PathBuf,

    /// Upper frequency bound of the spectrum panel in Hz
    #[arg(long, default_value = "1000")]
    max_freq: f64,

    /// Fail on sample counts that are not a power of two instead of zero-padding
    #[arg(long)]
    strict: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    log::info!("Loading {}...", args.input.display());
    let audio = load_audio_file(&args.input)?;
    log::info!(
        "Decoded {} samples ({:.2} s, {} Hz, {} channel(s))",
        audio.samples.len(),
        audio.duration_secs(),
        audio.sample_rate,
        audio.channels
    );

    log::info!("Applying the transform...");
    let analyzer = SpectrumAnalyzer::new(f64::from(audio.sample_rate));
    let spectrum = if args.strict {
        analyzer.analyze(&audio.samples)?
    } else {
        analyzer.analyze_padded(&audio.samples)
    };
    if let Some((frequency, magnitude)) = spectrum.peak() {
        log::info!("Spectral peak: {:.1} Hz (magnitude {:.4})", frequency, magnitude);
    }

    let time = analyzer.time_axis(audio.samples.len());
    let config = PlotConfig {
        max_frequency: Some(args.max_freq),
        ..Default::default()
    };
    let image = render_analysis(&time, &audio.samples, &spectrum, &config);
    image.save(&args.output)?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}
