use clap::{Parser, Subcommand};
use coinscan::tools::{
    bench_limit_from_env, dataset_iter, dataset_root_from_env, detect_coins, grayscale_stats,
    load_rgb, render_overlay, smoke_from_env,
};
use coinscan::{Detector, DetectorConfig};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cointool", version, about = "CoinScan CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run coin detection on a single image
    Detect {
        #[arg(long)]
        image: PathBuf,
    },
    /// Print stage-level stats and boxes for an image
    Stages {
        #[arg(long)]
        image: PathBuf,
        /// Run the pure stages row-parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Detect coins and write the image with box overlays
    Render {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Iterate a dataset and run detection once per image
    Batch {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        smoke: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Detect { image } => detect_cmd(&image),
        Command::Stages { image, parallel } => stages_cmd(&image, parallel),
        Command::Render { image, output } => render_cmd(&image, &output),
        Command::Batch { root, limit, smoke } => batch_cmd(root, limit, smoke),
    }
}

fn detect_cmd(image: &Path) {
    match load_rgb(image) {
        Ok((pixels, width, height)) => {
            println!("Image: {} ({}x{})", image.display(), width, height);
            match detect_coins(&pixels, width, height) {
                Ok(boxes) => {
                    println!("Found {} coins", boxes.len());
                    for (i, b) in boxes.iter().enumerate() {
                        println!(
                            "  Coin {}: x {}..{}, y {}..{} ({}x{} px)",
                            i,
                            b.min_x,
                            b.max_x,
                            b.min_y,
                            b.max_y,
                            b.width(),
                            b.height()
                        );
                    }
                }
                Err(err) => eprintln!("Detection failed: {err}"),
            }
        }
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
        }
    }
}

fn stages_cmd(image: &Path, parallel: bool) {
    let (pixels, width, height) = match load_rgb(image) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return;
        }
    };

    println!("Image: {} ({}x{})", image.display(), width, height);
    let stats = grayscale_stats(&pixels);
    println!(
        "RGB byte range: {}-{}, average: {}",
        stats.min, stats.max, stats.avg
    );

    let config = if parallel {
        DetectorConfig::parallel()
    } else {
        DetectorConfig::default()
    };
    let detector = Detector::with_config(config);

    let start = Instant::now();
    match detector.detect_with_telemetry(&pixels, width, height) {
        Ok((boxes, telemetry)) => {
            println!(
                "Contrast boundaries: [{}..{}]",
                telemetry.contrast_low, telemetry.contrast_high
            );
            println!("Edge pixels after threshold: {}", telemetry.edge_pixels);
            println!("Foreground after closing: {}", telemetry.closed_pixels);
            println!(
                "Components: {} (in {:.1} ms)",
                telemetry.components_found,
                start.elapsed().as_secs_f64() * 1000.0
            );
            for (i, b) in boxes.iter().enumerate() {
                println!(
                    "  Box {}: x {}..{}, y {}..{}",
                    i, b.min_x, b.max_x, b.min_y, b.max_y
                );
            }
        }
        Err(err) => eprintln!("Detection failed: {err}"),
    }
}

fn render_cmd(image: &Path, output: &Path) {
    let (pixels, width, height) = match load_rgb(image) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return;
        }
    };

    let boxes = match detect_coins(&pixels, width, height) {
        Ok(boxes) => boxes,
        Err(err) => {
            eprintln!("Detection failed: {err}");
            return;
        }
    };

    println!("Found {} coins", boxes.len());
    match render_overlay(&pixels, width, height, &boxes, output) {
        Ok(()) => println!("Wrote overlay to {}", output.display()),
        Err(err) => eprintln!("Failed to write {}: {}", output.display(), err),
    }
}

fn batch_cmd(root: Option<PathBuf>, limit: Option<usize>, smoke: bool) {
    let root = root.unwrap_or_else(dataset_root_from_env);
    let limit = limit.or_else(bench_limit_from_env);
    let smoke = smoke || smoke_from_env();

    let mut total_images = 0usize;
    let mut total_coins = 0usize;
    let mut failures = 0usize;
    let start = Instant::now();

    for path in dataset_iter(&root, limit, smoke) {
        let (pixels, width, height) = match load_rgb(&path) {
            Ok(result) => result,
            Err(err) => {
                eprintln!("Skipping {}: {}", path.display(), err);
                failures += 1;
                continue;
            }
        };
        total_images += 1;
        match detect_coins(&pixels, width, height) {
            Ok(boxes) => {
                println!("{}: {} coins", path.display(), boxes.len());
                total_coins += boxes.len();
            }
            Err(err) => {
                eprintln!("{}: detection failed: {}", path.display(), err);
                failures += 1;
            }
        }
    }

    println!(
        "Processed {} images, {} coins, {} failures in {:.2}s",
        total_images,
        total_coins,
        failures,
        start.elapsed().as_secs_f64()
    );
}
