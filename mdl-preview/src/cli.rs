//! Root CLI structure for mdl-preview

use clap::Parser;
use std::path::PathBuf;
use studio_render::BackgroundPreset;
use studio_render::options::DEFAULT_SIZE;

#[derive(Parser, Debug)]
#[command(name = "mdl-preview")]
#[command(about = "Render a static preview image of a studio model", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Model file to render (.mdl)
    pub input: PathBuf,

    /// Image to write; .png writes PNG, anything else writes TGA
    pub output: PathBuf,

    /// Image width in pixels (values below 1 are treated as 1)
    #[arg(long, default_value_t = DEFAULT_SIZE, allow_negative_numbers = true)]
    pub width: i32,

    /// Image height in pixels (values below 1 are treated as 1)
    #[arg(long, default_value_t = DEFAULT_SIZE, allow_negative_numbers = true)]
    pub height: i32,

    /// Background: blue (b, 0), green (g, 1) or transparent (t, 2)
    #[arg(long, default_value = "blue")]
    pub background: BackgroundPreset,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_defaults() {
        let cli = Cli::try_parse_from(["mdl-preview", "in.mdl", "out.tga"]).unwrap();
        assert_eq!(cli.width, 256);
        assert_eq!(cli.height, 256);
        assert_eq!(cli.background, BackgroundPreset::Blue);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_all_options() {
        let cli = Cli::try_parse_from([
            "mdl-preview",
            "in.mdl",
            "out.png",
            "--width",
            "-4",
            "--height",
            "64",
            "--background",
            "t",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.width, -4);
        assert_eq!(cli.height, 64);
        assert_eq!(cli.background, BackgroundPreset::Transparent);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Cli::try_parse_from(["mdl-preview", "in.mdl"]).is_err());
        assert!(Cli::try_parse_from(["mdl-preview", "a", "b", "--width", "wide"]).is_err());
        assert!(Cli::try_parse_from(["mdl-preview", "a", "b", "--background", "red"]).is_err());
        assert!(Cli::try_parse_from(["mdl-preview", "a", "b", "-q", "-v"]).is_err());
    }
}
