// Command-line flags. Defaults reproduce the fixed paths and sizes of the plain app.

use crate::gesture::{MAX_STRIPS, MIN_STRIPS};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "glitch-split", about = "Interactive RGB-split glitch over a still image")]
pub struct Args {
    /// Image to glitch; a white disc is used when the file does not exist
    #[arg(long, default_value = "image.png")]
    pub input: PathBuf,

    /// Where ENTER saves the glitched frame (PNG)
    #[arg(long, default_value = "glitched_output.png")]
    pub output: PathBuf,

    /// Empty border around the image in the window, in pixels
    #[arg(long, default_value_t = 100)]
    pub padding: usize,

    /// Initial number of glitch strips
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(MIN_STRIPS as u64..=MAX_STRIPS as u64))]
    pub strips: u64,

    /// Frame rate cap
    #[arg(long, default_value_t = 60)]
    pub fps: usize,

    /// Seed for strip placement/offsets (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}
