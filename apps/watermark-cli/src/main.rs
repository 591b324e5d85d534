use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use watermark_ops::{init_tracing, persist_frame, save_png};
use watermark_stamper::WatermarkStamper;
use watermark_types::{config::WatermarkConfig, PixelBuffer};

/// Stamps a watermark label onto a synthetic RGB frame.
#[derive(Debug, Parser)]
#[command(name = "watermark", version)]
struct Args {
    /// Config file; defaults to $WATERMARK_CONFIG, then configs/dev.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides `stamp.label` from the config.
    #[arg(long)]
    label: Option<String>,
    #[arg(long, default_value_t = 1920)]
    width: u32,
    #[arg(long, default_value_t = 1080)]
    height: u32,
    #[arg(long, default_value_t = 12345)]
    pts: i64,
    /// Write the stamped frame to this PNG path instead of `ops.output_dir`.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print the stamp report as JSON on stdout.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.clone());
    if let Some(label) = &args.label {
        config.stamp.label = label.clone();
    }
    config.validate()?;
    init_tracing(&config.ops)?;

    let mut stamper = WatermarkStamper::from_config(&config.stamp)?;
    stamper.start();

    let frame = PixelBuffer::new(args.width, args.height, args.pts)?;
    let (stamped, report) = stamper.stamp_with_report(&frame);

    stamper.stop();

    if let Some(path) = &args.output {
        save_png(path, &stamped)?;
        info!("Stamped frame written to {:?}", path);
    } else if let Some(dir) = &config.ops.output_dir {
        persist_frame(dir, &stamped)?;
    }

    if args.json {
        let doc = serde_json::to_string_pretty(&report).context("serialize stamp report")?;
        println!("{doc}");
    } else {
        info!(
            "Stamped {} glyph(s), skipped {}, wrote {} pixel(s)",
            report.glyphs_drawn, report.skipped, report.pixels_written
        );
    }
    Ok(())
}

fn load_config(explicit: Option<PathBuf>) -> WatermarkConfig {
    let from_env = env::var("WATERMARK_CONFIG").ok().map(PathBuf::from);
    let path = explicit
        .or(from_env)
        .unwrap_or_else(|| PathBuf::from("configs/dev.toml"));
    match WatermarkConfig::from_file(&path) {
        Ok(cfg) => {
            if let Err(err) = cfg.validate() {
                eprintln!(
                    "Invalid config in '{}': {err}. Falling back to internal defaults.",
                    path.display()
                );
                WatermarkConfig::default()
            } else {
                cfg
            }
        }
        Err(err) => {
            eprintln!(
                "Failed to load config from '{}': {err}. Falling back to internal defaults.",
                path.display()
            );
            WatermarkConfig::default()
        }
    }
}
