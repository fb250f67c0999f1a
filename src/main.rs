use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use beeminder_base::hive::{analyze, AnalysisConfig, Capture};

#[derive(Parser)]
#[command(name = "hive-processor")]
#[command(about = "BeeMinder capture processor - turns raw sensor captures into hive-health reports")]
struct Args {
    /// Capture file received from a sensor node (12-byte header + raw PCM)
    capture: PathBuf,

    /// Output JSON report path
    #[arg(long, short, default_value = "report.json")]
    output: PathBuf,

    /// Analysis config JSON; omitted fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// FFT window length in samples (overrides config)
    #[arg(long)]
    window_size: Option<usize>,

    /// Capture sample rate in Hz (overrides config)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Also dump the capture's audio segment as a mono 16-bit WAV
    #[arg(long)]
    export_wav: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => AnalysisConfig::default(),
    };
    if let Some(window_size) = args.window_size {
        config.window_size = window_size;
    }
    if let Some(sample_rate) = args.sample_rate {
        config.sample_rate = sample_rate;
    }

    info!("Processing capture: {}", args.capture.display());
    let file = File::open(&args.capture)
        .with_context(|| format!("opening capture {}", args.capture.display()))?;
    let capture = Capture::read_from(BufReader::new(file))
        .with_context(|| format!("decoding capture {}", args.capture.display()))?;

    if let Some(wav_path) = &args.export_wav {
        export_wav(&capture.samples, config.sample_rate, wav_path)
            .with_context(|| format!("writing {}", wav_path.display()))?;
        info!("Audio segment written to: {}", wav_path.display());
    }

    let report = analyze(&capture, &config);

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    std::fs::write(&args.output, json)
        .with_context(|| format!("writing report {}", args.output.display()))?;

    info!("Report summary:");
    info!("  weight: {}", report.weight);
    info!("  humidity: {} ({:?})", report.humidity, report.humidity_flag);
    info!(
        "  temperature: {} ({:?})",
        report.temperature, report.temperature_flag
    );
    info!("  queen present: {}", report.bee_flags.queen_present);
    info!("  multiple queens: {}", report.bee_flags.multiple_queen);
    info!("  possible mites: {}", report.bee_flags.possible_mites);
    info!(
        "  age bands: 3-day {:?}, 6-day {:?}, 9-day {:?}",
        report.bee_flags.three_day_band,
        report.bee_flags.six_day_band,
        report.bee_flags.nine_day_band
    );
    info!("Report written to: {}", args.output.display());

    Ok(())
}

fn export_wav(samples: &[i16], sample_rate: u32, path: &Path) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
