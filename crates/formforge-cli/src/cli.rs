//! Command-line definitions.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use formforge::{FormForgeError, Result};
use formforge_config::{
    ExhaustiveConfig, FormConfig, GreedyConfig, ReferenceItem, StrategyConfig,
};

/// FormForge - shorten a beta-tested exam form while keeping it reliable
#[derive(Parser, Debug)]
#[command(name = "formforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Run configuration (TOML, or YAML for .yaml/.yml)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Suppress the banner and log output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove items until the form reaches its target length
    Run(RunArgs),

    /// Print Cronbach's alpha of the full form
    Alpha(InputArgs),
}

#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Response log (candidate, item, response)
    #[arg(long)]
    pub responses: Option<PathBuf>,

    /// Blueprint (domain, min, max)
    #[arg(long)]
    pub blueprint: Option<PathBuf>,

    /// Answer keys (item, key)
    #[arg(long)]
    pub keys: Option<PathBuf>,

    /// Domain map (item, domain)
    #[arg(long)]
    pub domains: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Number of items on the final form
    #[arg(long, short)]
    pub target_length: Option<usize>,

    /// Search strategy
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Subset cap for the exhaustive strategy
    #[arg(long)]
    pub max_subsets: Option<u64>,

    /// Report format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub inputs: InputArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Greedy backward elimination with an unchecked first item
    Greedy,
    /// Greedy backward elimination that checks every item
    GreedyChecked,
    /// Best legal subset by full enumeration
    Exhaustive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Step-by-step narrative
    #[default]
    Text,
    /// Full result as JSON
    Json,
}

/// Loads the configuration file, if any, with table paths resolved against
/// its directory.
pub fn base_config(path: Option<&Path>) -> Result<FormConfig> {
    let Some(path) = path else {
        return Ok(FormConfig::default());
    };
    let config = FormConfig::load(path).map_err(|e| {
        FormForgeError::Config(format!("{}: {e}", path.display()))
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let inputs = config.inputs.relative_to(base);
    Ok(config.with_inputs(inputs))
}

impl InputArgs {
    /// Replaces configured table paths with those given on the command line.
    pub fn apply(&self, mut config: FormConfig) -> FormConfig {
        let inputs = &mut config.inputs;
        if let Some(path) = &self.responses {
            inputs.responses = path.clone();
        }
        if let Some(path) = &self.blueprint {
            inputs.blueprint = path.clone();
        }
        if let Some(path) = &self.keys {
            inputs.keys = path.clone();
        }
        if let Some(path) = &self.domains {
            inputs.domains = path.clone();
        }
        config
    }
}

impl RunArgs {
    /// Layers the command-line options over `config`.
    ///
    /// `--max-subsets` only applies to the exhaustive strategy and is
    /// rejected for the greedy ones.
    pub fn apply(&self, config: FormConfig) -> Result<FormConfig> {
        let mut config = self.inputs.apply(config);
        if let Some(target) = self.target_length {
            config = config.with_target_length(target);
        }

        let strategy = match self.strategy {
            Some(StrategyArg::Greedy) => Some(greedy(ReferenceItem::FirstItem)),
            Some(StrategyArg::GreedyChecked) => Some(greedy(ReferenceItem::Checked)),
            Some(StrategyArg::Exhaustive) => {
                Some(StrategyConfig::Exhaustive(ExhaustiveConfig::default()))
            }
            None => None,
        };
        if let Some(strategy) = strategy {
            config = config.with_strategy(strategy);
        }

        if let Some(limit) = self.max_subsets {
            match &mut config.strategy {
                StrategyConfig::Exhaustive(exhaustive) => exhaustive.max_subsets = limit,
                StrategyConfig::GreedyBackward(_) => {
                    return Err(FormForgeError::Config(
                        "--max-subsets requires the exhaustive strategy".to_string(),
                    ));
                }
            }
        }
        Ok(config)
    }
}

fn greedy(reference: ReferenceItem) -> StrategyConfig {
    StrategyConfig::GreedyBackward(GreedyConfig { reference })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "formforge",
            "run",
            "--target-length",
            "75",
            "--strategy",
            "greedy-checked",
            "--format",
            "json",
        ])
        .unwrap();

        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.target_length, Some(75));
        assert_eq!(args.strategy, Some(StrategyArg::GreedyChecked));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_flags_override_config() {
        let args = RunArgs {
            target_length: Some(40),
            strategy: Some(StrategyArg::Exhaustive),
            max_subsets: Some(500),
            inputs: InputArgs {
                keys: Some(PathBuf::from("other_keys.csv")),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = FormConfig::default().with_target_length(75);

        let config = args.apply(config).unwrap();

        assert_eq!(config.target_length().unwrap(), 40);
        assert_eq!(
            config.strategy,
            StrategyConfig::Exhaustive(ExhaustiveConfig { max_subsets: 500 })
        );
        assert_eq!(config.inputs.keys, PathBuf::from("other_keys.csv"));
        assert_eq!(config.inputs.domains, PathBuf::from("alt_domains.csv"));
    }

    #[test]
    fn test_max_subsets_rejected_for_greedy() {
        for strategy in [None, Some(StrategyArg::Greedy), Some(StrategyArg::GreedyChecked)] {
            let args = RunArgs {
                strategy,
                max_subsets: Some(10),
                ..Default::default()
            };
            assert!(matches!(
                args.apply(FormConfig::default()),
                Err(FormForgeError::Config(_))
            ));
        }
    }

    #[test]
    fn test_max_subsets_applies_to_configured_exhaustive() {
        let args = RunArgs {
            max_subsets: Some(10),
            ..Default::default()
        };
        let config = FormConfig::default()
            .with_strategy(StrategyConfig::Exhaustive(ExhaustiveConfig::default()));

        let config = args.apply(config).unwrap();
        assert_eq!(
            config.strategy,
            StrategyConfig::Exhaustive(ExhaustiveConfig { max_subsets: 10 })
        );
    }

    #[test]
    fn test_config_paths_resolve_against_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("form.toml");
        fs::write(
            &path,
            "target_length = 3\n[inputs]\nresponses = \"beta/responses.csv\"\n",
        )
        .unwrap();

        let config = base_config(Some(&path)).unwrap();

        assert_eq!(config.target_length().unwrap(), 3);
        assert_eq!(
            config.inputs.responses,
            dir.path().join("beta/responses.csv")
        );
        assert_eq!(config.inputs.keys, dir.path().join("alt_keys.csv"));
    }

    #[test]
    fn test_bad_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("form.toml");
        fs::write(&path, "target_length = \"many\"").unwrap();

        assert!(matches!(
            base_config(Some(&path)),
            Err(FormForgeError::Config(_))
        ));
    }

    #[test]
    fn test_no_config_file() {
        let config = base_config(None).unwrap();
        assert!(config.target_length.is_none());
    }
}
