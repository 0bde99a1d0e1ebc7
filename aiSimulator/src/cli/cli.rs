use std::path::PathBuf;
use clap::{Args as ClapArgs, Parser, Subcommand};
use crate::ai::learning::constants::{DEFAULT_EXPLORATION_RATE, DEFAULT_LEARNING_RATE};
use crate::config::constants::{
    DEFAULT_CHECKPOINT_DIR, DEFAULT_EPISODES, DEFAULT_EVALUATION_GAMES, DEFAULT_EXPORT_PATH,
    DEFAULT_MODEL_PATH,
};
use crate::config::training_config::TrainingConfig;
use crate::core::errors::NimError;
use crate::core::game_state::Piles;

#[derive(Parser)]
#[command(author, version, about = "Nim played by a self-taught Q-learning agent", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(long, global = true, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, global = true, help = "Log every Q-value update at debug level", default_value_t = false)]
    debug_logging: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Train a model through self-play
    Train(TrainArgs),
    /// Play against a trained model
    Play(PlayArgs),
    /// Print the trained model's move for a position
    Suggest(SuggestArgs),
    /// Measure a trained model against a random opponent and perfect play
    Evaluate(EvaluateArgs),
    /// Write every Q-value of a model to CSV
    Export(ExportArgs),
}

#[derive(ClapArgs)]
pub struct TrainArgs {
    #[arg(long, help = "JSON training config; flags given explicitly override it")]
    config: Option<PathBuf>,

    #[arg(short = 'n', long, default_value_t = DEFAULT_EPISODES)]
    episodes: usize,

    #[arg(short, long, default_value_t = DEFAULT_LEARNING_RATE)]
    alpha: f64,

    #[arg(short, long, default_value_t = DEFAULT_EXPLORATION_RATE)]
    epsilon: f64,

    #[arg(short = 'p', long, default_value = "1,3,5,7", help = "Starting piles, comma separated")]
    piles: Piles,

    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    #[arg(long, help = "Random seed for reproducible training")]
    seed: Option<u64>,

    #[arg(short = 'i', long, default_value_t = 0, help = "Episodes between checkpoints (0 disables)")]
    checkpoint_interval: usize,

    #[arg(short, long, default_value = DEFAULT_CHECKPOINT_DIR)]
    checkpoint_dir: PathBuf,

    #[arg(long, default_value_t = false, help = "Continue training the model at --model if it exists")]
    resume: bool,
}

#[derive(ClapArgs)]
pub struct PlayArgs {
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    #[arg(short = 'p', long, default_value = "1,3,5,7")]
    piles: Piles,

    #[arg(long, default_value_t = false, help = "Let the AI make the first move")]
    ai_first: bool,
}

#[derive(ClapArgs)]
pub struct SuggestArgs {
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    #[arg(short = 'p', long)]
    piles: Piles,

    #[arg(long, default_value_t = 3, help = "Also list this many ranked moves")]
    top: usize,
}

#[derive(ClapArgs)]
pub struct EvaluateArgs {
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    #[arg(short = 'p', long, default_value = "1,3,5,7")]
    piles: Piles,

    #[arg(short = 'g', long, default_value_t = DEFAULT_EVALUATION_GAMES)]
    games: usize,

    #[arg(long)]
    seed: Option<u64>,
}

#[derive(ClapArgs)]
pub struct ExportArgs {
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    #[arg(short, long, default_value = DEFAULT_EXPORT_PATH)]
    output: PathBuf,
}

// Add getter methods for all fields
impl Args {
    pub fn subcommand(&self) -> &Command {
        &self.command
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }
}

impl TrainArgs {
    /// Build the training config: file values first, then flags that were set.
    pub fn to_config(&self, matches: &clap::ArgMatches) -> Result<TrainingConfig, NimError> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::load_from_file(path)?,
            None => TrainingConfig::default(),
        };
        let explicit = |id: &str| {
            self.config.is_none()
                || matches.value_source(id) == Some(clap::parser::ValueSource::CommandLine)
        };

        if explicit("episodes") { config.episodes = self.episodes; }
        if explicit("alpha") { config.alpha = self.alpha; }
        if explicit("epsilon") { config.epsilon = self.epsilon; }
        if explicit("piles") { config.starting_piles = self.piles.clone(); }
        if explicit("model") { config.model_path = self.model.clone(); }
        if explicit("seed") { config.seed = self.seed.or(config.seed); }
        if explicit("checkpoint_interval") { config.checkpoint_interval = self.checkpoint_interval; }
        if explicit("checkpoint_dir") { config.checkpoint_dir = self.checkpoint_dir.clone(); }
        if explicit("resume") { config.resume = self.resume || config.resume; }

        config.validate()?;
        Ok(config)
    }
}

impl PlayArgs {
    pub fn model(&self) -> &PathBuf {
        &self.model
    }

    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    pub fn ai_first(&self) -> bool {
        self.ai_first
    }
}

impl SuggestArgs {
    pub fn model(&self) -> &PathBuf {
        &self.model
    }

    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    pub fn top(&self) -> usize {
        self.top
    }
}

impl EvaluateArgs {
    pub fn model(&self) -> &PathBuf {
        &self.model
    }

    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    pub fn games(&self) -> usize {
        self.games
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl ExportArgs {
    pub fn model(&self) -> &PathBuf {
        &self.model
    }

    pub fn output(&self) -> &PathBuf {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};

    fn parse(argv: &[&str]) -> (Args, clap::ArgMatches) {
        let matches = Args::command().try_get_matches_from(argv).unwrap();
        let args = Args::from_arg_matches(&matches).unwrap();
        (args, matches)
    }

    #[test]
    fn train_flags_become_config() {
        let (args, matches) = parse(&["nim-ai", "train", "-n", "25", "--piles", "2,2", "--seed", "4"]);
        let Command::Train(train) = args.subcommand() else { panic!("expected train") };
        let (_, sub_matches) = matches.subcommand().unwrap();
        let config = train.to_config(sub_matches).unwrap();
        assert_eq!(config.episodes, 25);
        assert_eq!(config.starting_piles, Piles::from([2, 2]));
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.alpha, DEFAULT_LEARNING_RATE);
    }

    #[test]
    fn invalid_piles_are_rejected_by_validation() {
        let (args, matches) = parse(&["nim-ai", "train", "--piles", "0,2"]);
        let Command::Train(train) = args.subcommand() else { panic!("expected train") };
        let (_, sub_matches) = matches.subcommand().unwrap();
        assert!(train.to_config(sub_matches).is_err());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let (args, _) = parse(&["nim-ai", "suggest", "--piles", "1,2", "--debug-logging"]);
        assert!(args.debug_logging());
        assert!(matches!(args.subcommand(), Command::Suggest(_)));
    }
}
