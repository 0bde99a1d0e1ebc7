use std::path::PathBuf;

use nim_ai::analysis::evaluation::{optimal_agreement, reachable_positions};
use nim_ai::core::training::train_table;
use nim_ai::{
    engine, run_training, GameState, InvalidMoveError, ModelLoadError, Move, NimError, Piles, Player,
    QTable, TrainedPolicy, TrainingConfig,
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("nim_ai_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn two_single_piles_teach_both_sides() {
    let mut table = QTable::new(0.5, 0.1).unwrap().with_seed(42);
    train_table(&mut table, &Piles::from([1, 1]), 1000).unwrap();

    // The player facing one object left always wins by taking it
    assert!(table.best_future_reward(&Piles::from([0, 1])) > 0.0);
    assert!(table.best_future_reward(&Piles::from([1, 0])) > 0.0);

    // Either opening move hands the opponent the win
    assert!(table.get_q_value(&Piles::from([1, 1]), Move::new(0, 1)) < 0.0);
    assert!(table.get_q_value(&Piles::from([1, 1]), Move::new(1, 1)) < 0.0);
}

#[test]
fn learns_the_winning_reply_from_two_one() {
    let mut table = QTable::new(0.5, 0.2).unwrap().with_seed(7);
    train_table(&mut table, &Piles::from([2, 1]), 3000).unwrap();

    assert_eq!(table.choose_move(&Piles::from([2, 1])).unwrap(), Move::new(0, 1));
    let winning = table.get_q_value(&Piles::from([2, 1]), Move::new(0, 1));
    for losing in [Move::new(0, 2), Move::new(1, 1)] {
        assert!(winning > table.get_q_value(&Piles::from([2, 1]), losing));
    }
}

#[test]
fn untrained_table_takes_the_whole_pile() {
    let mut table = QTable::default();
    assert_eq!(table.choose_action(&Piles::from([3]), false).unwrap(), Move::new(0, 3));
}

#[test]
fn greedy_choice_on_cleared_piles_is_an_error() {
    let mut table = QTable::default();
    assert!(matches!(
        table.choose_action(&Piles::from([0, 0]), false),
        Err(NimError::EmptyActionSet(_))
    ));
}

#[test]
fn saved_model_plays_identically_after_reload() {
    let dir = scratch_dir("reload");
    let path = dir.join("model.json");
    let piles = Piles::from([1, 2, 3]);

    let mut table = QTable::new(0.5, 0.3).unwrap().with_seed(3);
    train_table(&mut table, &piles, 500).unwrap();
    table.save_to_file(&path).unwrap();

    let policy = TrainedPolicy::load(&path).unwrap();
    assert_eq!(policy.table(), &table);
    assert_eq!(policy.table().episodes_trained(), 500);
    for position in reachable_positions(&piles) {
        assert_eq!(policy.choose_move(&position).unwrap(), table.choose_move(&position).unwrap());
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn trained_policy_plays_small_games_perfectly() {
    let piles = Piles::from([1, 2, 3]);
    let mut table = QTable::new(0.5, 0.3).unwrap().with_seed(5);
    train_table(&mut table, &piles, 20_000).unwrap();

    let report = optimal_agreement(&TrainedPolicy::from_source(table), &piles).unwrap();
    assert!(report.winning_positions > 0);
    assert!(report.agreement() > 0.8, "agreement {}", report.agreement());
}

#[test]
fn run_training_writes_model_checkpoints_and_resumes() {
    let dir = scratch_dir("run");
    let config = TrainingConfig {
        episodes: 100,
        starting_piles: Piles::from([1, 3]),
        model_path: dir.join("model.json"),
        seed: Some(9),
        checkpoint_interval: 50,
        checkpoint_dir: dir.join("checkpoints"),
        ..TrainingConfig::default()
    };

    let report = run_training(&config).unwrap();
    assert_eq!(report.stats.episodes, 100);
    assert_eq!(report.checkpoints.len(), 2);
    assert!(report.checkpoints.iter().all(|p| p.exists()));
    assert!(config.model_path.exists());

    let resumed = TrainingConfig { resume: true, checkpoint_interval: 0, ..config.clone() };
    run_training(&resumed).unwrap();
    assert_eq!(QTable::load_from_file(&config.model_path).unwrap().episodes_trained(), 200);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn run_training_rejects_invalid_config() {
    let config = TrainingConfig { alpha: 1.5, ..TrainingConfig::default() };
    assert!(matches!(run_training(&config), Err(NimError::InvalidConfig(_))));
}

#[test]
fn broken_model_files_are_reported() {
    let dir = scratch_dir("broken");

    let missing = TrainedPolicy::load(dir.join("missing.json"));
    assert!(matches!(missing, Err(ModelLoadError::Io { .. })));

    let truncated = dir.join("truncated.json");
    std::fs::write(&truncated, "{\"format_version\": 1, \"entries\": [").unwrap();
    assert!(matches!(TrainedPolicy::load(&truncated), Err(ModelLoadError::Malformed { .. })));

    let illegal = dir.join("illegal.json");
    std::fs::write(
        &illegal,
        r#"{"format_version": 1, "learning_rate": 0.5, "exploration_rate": 0.1,
            "entries": [{"piles": [1, 2], "pile": 1, "count": 3, "value": 0.5}]}"#,
    )
    .unwrap();
    assert!(matches!(TrainedPolicy::load(&illegal), Err(ModelLoadError::Invalid { .. })));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn illegal_moves_leave_the_state_untouched() {
    let state = GameState::initial([1, 3, 5, 7]);
    let snapshot = state.clone();

    assert!(matches!(
        engine::apply_move(&state, Move::new(4, 1)),
        Err(InvalidMoveError::InvalidPile { .. })
    ));
    assert!(matches!(
        engine::apply_move(&state, Move::new(0, 2)),
        Err(InvalidMoveError::InvalidCount { .. })
    ));
    assert_eq!(state, snapshot);

    let next = engine::apply_move(&state, Move::new(3, 7)).unwrap();
    assert_eq!(next.piles(), &Piles::from([1, 3, 5, 0]));
    assert_eq!(next.current_player(), Player::Second);
    assert_eq!(state, snapshot);
}
