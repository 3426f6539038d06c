//! Command line definition.

use std::path::PathBuf;

use auspex::domain::{Aspect, House, Object, Sign};
use auspex::ObjectFileKind;
use clap::{Args, Parser, Subcommand};

use crate::output::OutputMode;

#[derive(Debug, Parser)]
#[command(name = "auspex", version, about = "Browse and query interpretation styles")]
pub struct Cli {
    /// Directory holding `styles/` (default: ~/.astrolog/interpretations)
    #[arg(long, global = true, env = "AUSPEX_BASE_DIR", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputMode::Auto)]
    pub output: OutputMode,

    /// Log loader decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List style folders; the active one is marked with `*`
    List,

    /// Meaning of an object in a sign and house
    Combo {
        #[arg(value_parser = parse_object)]
        object: Object,
        #[arg(value_parser = parse_sign)]
        sign: Sign,
        #[arg(value_parser = parse_house)]
        house: House,
        #[command(flatten)]
        source: Source,
    },

    /// Meaning of two objects in aspect
    AspectCombo {
        #[arg(value_parser = parse_object)]
        first: Object,
        #[arg(value_parser = parse_object)]
        second: Object,
        #[arg(value_parser = parse_aspect)]
        aspect: Aspect,
        #[command(flatten)]
        source: Source,
    },

    /// General meaning of an aspect
    Aspect {
        #[arg(value_parser = parse_aspect)]
        aspect: Aspect,
        /// Orb in degrees; accepted for completeness
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        orb: i32,
        #[command(flatten)]
        source: Source,
    },

    /// Path of a per-object data file in the active style folder
    Path {
        /// signs, aspects or midpoints
        kind: ObjectFileKind,
        #[arg(value_parser = parse_object)]
        object: Object,
    },

    /// Install a style package (manual steps only)
    Install {
        package: PathBuf,
    },

    /// Move loose style files into style folders (manual steps only)
    Migrate,
}

/// Where the queried style comes from. Without either flag the active
/// style folder is used.
#[derive(Debug, Args)]
#[group(multiple = false)]
pub struct Source {
    /// Activate this style folder (directory or display name)
    #[arg(long, value_name = "NAME")]
    pub style: Option<String>,

    /// Load a self-contained style file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

fn parse_object(s: &str) -> Result<Object, String> {
    Object::parse(s).ok_or_else(|| format!("unknown object '{s}'"))
}

fn parse_sign(s: &str) -> Result<Sign, String> {
    Sign::parse(s).ok_or_else(|| format!("unknown sign '{s}'"))
}

fn parse_house(s: &str) -> Result<House, String> {
    House::parse(s).ok_or_else(|| format!("house must be 1-12, got '{s}'"))
}

fn parse_aspect(s: &str) -> Result<Aspect, String> {
    Aspect::parse(s).ok_or_else(|| format!("unknown aspect '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_combo_accepts_names_and_ids() {
        let cli = Cli::try_parse_from(["auspex", "combo", "sun", "5", "10", "--style", "modern"])
            .unwrap();
        match cli.command {
            Command::Combo {
                object,
                sign,
                house,
                source,
            } => {
                assert_eq!(object.id(), 1);
                assert_eq!(sign.name(), "Leo");
                assert_eq!(house.id(), 10);
                assert_eq!(source.style.as_deref(), Some("modern"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_house() {
        assert!(Cli::try_parse_from(["auspex", "combo", "sun", "aries", "13"]).is_err());
    }

    #[test]
    fn test_style_and_file_conflict() {
        let result = Cli::try_parse_from([
            "auspex", "aspect", "trine", "--style", "modern", "--file", "x.ais",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_path_kind() {
        let cli = Cli::try_parse_from(["auspex", "path", "midpoints", "Venus"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Path {
                kind: ObjectFileKind::Midpoints,
                ..
            }
        ));
    }
}
