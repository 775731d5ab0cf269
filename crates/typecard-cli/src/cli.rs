//! CLI argument definitions using Clap v4

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use typecard::{Background, RenderRequest};

/// Typecard - render short styled text into a tightly cropped PNG
#[derive(Parser, Debug)]
#[command(name = "typecard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Text to render; `__` toggles bold on and off
    #[arg(short = 't', long, default_value = typecard::DEFAULT_TEXT)]
    pub text: String,

    /// Font family, one of the catalog's allow-listed names
    #[arg(short = 'f', long, default_value = typecard::DEFAULT_FONT_FAMILY)]
    pub font: String,

    /// Base font size in pixels
    #[arg(
        short = 's',
        long = "font-size",
        default_value_t = typecard::DEFAULT_FONT_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub font_size: u32,

    /// Background: `transparent`, `#rrggbb[aa]`, `rgb(...)`, `rgba(...)`, or a color name
    #[arg(short = 'b', long = "background-color", default_value = "transparent")]
    pub background_color: Background,

    /// Supersampling factor
    #[arg(
        long,
        default_value_t = typecard::DEFAULT_SCALE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub scale: u32,

    /// TOML font catalog (overrides TYPECARD_CATALOG)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Directory that relative font paths resolve against
    #[arg(long = "font-dir")]
    pub font_dir: Option<PathBuf>,

    /// Output file; PNG goes to stdout when omitted
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print the allow-listed font families and exit
    #[arg(long = "list-fonts")]
    pub list_fonts: bool,
}

impl Cli {
    pub fn to_request(&self) -> RenderRequest {
        RenderRequest {
            text: self.text.clone(),
            font_family: self.font.clone(),
            font_size: self.font_size,
            background: self.background_color,
            scale: self.scale,
        }
    }

    /// Default log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
