use std::error::Error;
use std::io;

use clap::{CommandFactory, FromArgMatches};
use tracing::info;

use nim_ai::ai::learning::constants::set_debug_q_updates;
use nim_ai::ai::TrainedPolicy;
use nim_ai::analysis::evaluation::{evaluate_against_random, optimal_agreement};
use nim_ai::cli::cli::{Args, Command};
use nim_ai::cli::play::play_game;
use nim_ai::config::constants::PERCENT_CONVERSION;
use nim_ai::core::game_state::Player;
use nim_ai::core::training::run_training;
use nim_ai::utils::csv_export::export_q_values;
use nim_ai::utils::logging;

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Parse command line arguments, keeping the matches to tell explicit flags from defaults
    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches)?;

    logging::init_logging(args.enable_timing(), args.debug_logging());
    set_debug_q_updates(args.debug_logging());

    let result = run(&args, &matches);
    logging::print_timing_report();
    result
}

fn run(args: &Args, matches: &clap::ArgMatches) -> Result<(), Box<dyn Error + Send + Sync>> {
    match args.subcommand() {
        Command::Train(train) => {
            let sub_matches = matches
                .subcommand_matches("train")
                .ok_or("missing train arguments")?;
            let config = train.to_config(sub_matches)?;
            let report = run_training(&config)?;

            println!("Nim Q-learning training complete");
            println!("Episodes: {} (first player won {:.1}%)",
                     report.stats.episodes,
                     report.stats.first_player_win_rate() * PERCENT_CONVERSION);
            println!("Table: {}", report.summary);
            if !report.checkpoints.is_empty() {
                println!("Checkpoints written: {}", report.checkpoints.len());
            }
            println!("Model saved to {}", report.model_path.display());
        },
        Command::Play(play) => {
            let policy = TrainedPolicy::load(play.model())?;
            let human = if play.ai_first() { Player::Second } else { Player::First };
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout();
            play_game(&policy, play.piles(), human, &mut input, &mut out)?;
        },
        Command::Suggest(suggest) => {
            let policy = TrainedPolicy::load(suggest.model())?;
            let action = policy.choose_move(suggest.piles())?;
            println!("Best move for {}: {}", suggest.piles(), action);
            if suggest.top() > 0 {
                policy.table().print_top_actions(suggest.piles(), suggest.top());
            }
        },
        Command::Evaluate(evaluate) => {
            let policy = TrainedPolicy::load(evaluate.model())?;
            let report = evaluate_against_random(&policy, evaluate.piles(), evaluate.games(), evaluate.seed())?;
            let agreement = optimal_agreement(&policy, evaluate.piles())?;

            println!("Against a random opponent: {}", report);
            println!("Perfect-play agreement: {}/{} winning positions ({:.1}%)",
                     agreement.optimal_choices,
                     agreement.winning_positions,
                     agreement.agreement() * PERCENT_CONVERSION);
        },
        Command::Export(export) => {
            let policy = TrainedPolicy::load(export.model())?;
            let rows = export_q_values(policy.table(), export.output())?;
            info!(rows, "export complete");
            println!("Wrote {} Q-values to {}", rows, export.output().display());
        },
    }
    Ok(())
}
