//! # Bug CLI
//!
//! Command-line interface for Braille Unicode Graphics.
//!
//! ## Usage
//!
//! ```bash
//! # Print an image as Braille text
//! bug encode gopher.png
//!
//! # Save to a file, with a darker cutoff
//! bug encode --threshold 60 --out gopher.bug gopher.png
//!
//! # Light-on-dark rendering
//! bug encode --invert gopher.jpg
//!
//! # Turn Braille text back into a PNG
//! bug decode gopher.bug --png gopher.png
//! ```

use clap::{Parser, Subcommand};
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

use bug::{
    BugError, PixelBuffer, Threshold,
    codec::{self, Encoder, format::Registry},
};

/// Bug - Braille Unicode Graphics converter
#[derive(Parser, Debug)]
#[command(name = "bug")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an image (PNG, JPEG, GIF or BUG) to Braille text
    Encode {
        /// Image file to convert
        image: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(long, short, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Luminance cutoff; darker pixels become dots. Negative inverts.
        #[arg(long, default_value_t = Threshold::DEFAULT.value(), allow_negative_numbers = true)]
        threshold: i32,

        /// Swap set and clear dots
        #[arg(long)]
        invert: bool,
    },

    /// Convert Braille text back to a PNG
    Decode {
        /// BUG text file
        input: PathBuf,

        /// PNG file to write
        #[arg(long, value_name = "FILE")]
        png: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), BugError> {
    match command {
        Commands::Encode {
            image,
            out,
            threshold,
            invert,
        } => {
            let mut threshold: Threshold = threshold.into();
            if invert {
                threshold = threshold.inverse();
            }

            let bytes = std::fs::read(&image)?;
            let (picture, format) = Registry::with_bug().decode(&bytes)?;
            let (width, height) = picture.dimensions();
            info!(
                "Decoded {} as {} ({}x{})",
                image.display(),
                format,
                width,
                height
            );

            // Render fully before touching the output so a failure leaves no partial file.
            let mut encoder = Encoder::new(Vec::new()).with_threshold(threshold);
            encoder.encode_picture(picture)?;
            let text = encoder.into_inner()?;

            match out {
                Some(path) => {
                    std::fs::write(&path, &text)?;
                    info!("Saved to {}", path.display());
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&text)?;
                    stdout.flush()?;
                }
            }
        }
        Commands::Decode { input, png } => {
            let file = std::fs::File::open(&input)?;
            let buffer = codec::decode(std::io::BufReader::new(file))?;
            info!(
                "Decoded {} ({}x{} cells)",
                input.display(),
                buffer.cell_width(),
                buffer.cell_height()
            );

            save_png(&png, &buffer)?;
            info!("Saved to {}", png.display());
        }
    }

    Ok(())
}

/// Save a buffer as a grayscale PNG: dots black, background white.
fn save_png(path: &Path, buffer: &PixelBuffer) -> Result<(), BugError> {
    use image::{GrayImage, Luma};

    let raw = buffer.raw();
    let img = GrayImage::from_fn(raw.width(), raw.height(), |x, y| {
        let is_dot = raw.get_pixel(x, y).0[0] != 0;
        Luma([if is_dot { 0u8 } else { 255u8 }])
    });

    img.save(path)
        .map_err(|e| BugError::Image(format!("Failed to save PNG: {}", e)))?;

    Ok(())
}
