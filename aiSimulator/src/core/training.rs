use std::path::{Path, PathBuf};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use crate::ai::learning::q_table::{QTable, TableSummary};
use crate::config::constants::{PROGRESS_BAR_TEMPLATE, PROGRESS_TICK_INTERVAL};
use crate::config::training_config::TrainingConfig;
use crate::core::episode::run_episode;
use crate::core::errors::NimError;
use crate::core::game_state::{Piles, Player};
use crate::utils::logging::{self, OperationCategory, TrainingType};

/// Aggregate results of a batch of self-play episodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingStats {
    pub episodes: usize,
    pub first_player_wins: usize,
    pub second_player_wins: usize,
    pub total_moves: usize,
}

impl TrainingStats {
    fn record(&mut self, winner: Player, moves: usize) {
        self.episodes += 1;
        self.total_moves += moves;
        match winner {
            Player::First => self.first_player_wins += 1,
            Player::Second => self.second_player_wins += 1,
        }
    }

    pub fn first_player_win_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.first_player_wins as f64 / self.episodes as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub stats: TrainingStats,
    pub summary: TableSummary,
    pub model_path: PathBuf,
    pub checkpoints: Vec<PathBuf>,
}

/// Run `episodes` self-play games on `table`. `after_episode` is called with
/// the 1-based episode number once each game has been learned from.
pub fn train_episodes<F>(
    table: &mut QTable,
    starting_piles: &Piles,
    episodes: usize,
    mut after_episode: F,
) -> Result<TrainingStats, NimError>
where
    F: FnMut(usize, &QTable) -> Result<(), NimError>,
{
    let mut stats = TrainingStats::default();
    for episode in 1..=episodes {
        let outcome = run_episode(table, starting_piles)?;
        stats.record(outcome.winner, outcome.moves);
        after_episode(episode, table)?;
    }
    Ok(stats)
}

/// Train an in-memory table with no file output or progress display.
pub fn train_table(table: &mut QTable, starting_piles: &Piles, episodes: usize) -> Result<TrainingStats, NimError> {
    train_episodes(table, starting_piles, episodes, |_, _| Ok(()))
}

fn initial_table(config: &TrainingConfig) -> Result<QTable, NimError> {
    let mut table = if config.resume && config.model_path.exists() {
        let mut table = QTable::load_from_file(&config.model_path)?;
        if table.learning_rate() != config.alpha || table.exploration_rate() != config.epsilon {
            warn!(
                saved_alpha = table.learning_rate(),
                saved_epsilon = table.exploration_rate(),
                alpha = config.alpha,
                epsilon = config.epsilon,
                "resumed model used different rates, continuing with configured ones"
            );
        }
        table.set_learning_rate(config.alpha)?;
        table.set_exploration_rate(config.epsilon)?;
        info!(episodes = table.episodes_trained(), "resuming from existing model");
        table
    } else {
        if config.resume {
            info!(path = %config.model_path.display(), "no model to resume from, starting fresh");
        }
        QTable::new(config.alpha, config.epsilon)?
    };

    if let Some(seed) = config.seed {
        table = table.with_seed(seed);
    }
    Ok(table)
}

fn checkpoint_run_dir(checkpoint_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    checkpoint_dir.join(timestamp)
}

fn progress_bar(episodes: usize) -> ProgressBar {
    let bar = ProgressBar::new(episodes as u64);
    match ProgressStyle::with_template(PROGRESS_BAR_TEMPLATE) {
        Ok(style) => bar.set_style(style),
        Err(e) => warn!("invalid progress bar template: {}", e),
    }
    bar
}

/// Train a model as described by `config` and write it to `config.model_path`.
pub fn run_training(config: &TrainingConfig) -> Result<TrainingReport, NimError> {
    config.validate()?;
    let _timing = logging::start_timing("run_training",
        OperationCategory::Training { subcategory: TrainingType::Run });

    info!(
        episodes = config.episodes,
        alpha = config.alpha,
        epsilon = config.epsilon,
        piles = %config.starting_piles,
        "starting self-play training"
    );

    let mut table = initial_table(config)?;

    let run_dir = if config.checkpoint_interval > 0 {
        let dir = checkpoint_run_dir(&config.checkpoint_dir);
        std::fs::create_dir_all(&dir)?;
        Some(dir)
    } else {
        None
    };

    let bar = progress_bar(config.episodes);
    let mut checkpoints = Vec::new();

    let stats = train_episodes(&mut table, &config.starting_piles, config.episodes, |episode, table| {
        if episode as u64 % PROGRESS_TICK_INTERVAL == 0 || episode == config.episodes {
            bar.set_position(episode as u64);
        }

        if let Some(dir) = &run_dir {
            if episode % config.checkpoint_interval == 0 {
                let _timing = logging::start_timing("save_checkpoint",
                    OperationCategory::Training { subcategory: TrainingType::Checkpoint });
                let path = dir.join(format!("checkpoint_{}.json", episode));
                table.save_to_file(&path)?;
                checkpoints.push(path);
            }
        }
        Ok(())
    });
    bar.finish_and_clear();
    let stats = stats?;

    table.save_to_file(&config.model_path)?;

    let summary = table.summary();
    info!(
        first_player_wins = stats.first_player_wins,
        second_player_wins = stats.second_player_wins,
        average_moves = stats.total_moves as f64 / stats.episodes as f64,
        "training finished: {}", summary
    );

    Ok(TrainingReport {
        stats,
        summary,
        model_path: config.model_path.clone(),
        checkpoints,
    })
}
