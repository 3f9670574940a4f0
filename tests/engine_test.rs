//! Tests for the game engine: validation, history, scoring.

use proptest::prelude::*;
use tictactoe_arena::{
    Difficulty, GameEngine, GameStatus, Mode, MoveError, MoveOrigin, Player, Position,
    Square, LINES,
};

fn pvp() -> GameEngine {
    GameEngine::with_config(Mode::PlayerVsPlayer, Difficulty::Easy)
}

/// X wins the top row: X0 O3 X1 O4 X2.
const X_WINS: [usize; 5] = [0, 3, 1, 4, 2];

fn play_all(engine: &mut GameEngine, moves: &[usize]) {
    for &index in moves {
        engine
            .apply_move(index, MoveOrigin::Human)
            .expect("scripted move is legal");
    }
}

#[test]
fn rejects_out_of_range_index() {
    let mut engine = pvp();
    assert_eq!(
        engine.apply_move(9, MoveOrigin::Human),
        Err(MoveError::OutOfBounds(9))
    );
    assert_eq!(engine.ply(), 0);
    assert_eq!(engine.history_len(), 1);
}

#[test]
fn rejects_occupied_square_without_mutation() {
    let mut engine = pvp();
    engine.apply_move(4, MoveOrigin::Human).unwrap();

    let board = *engine.board();
    let scores = engine.scores();

    assert_eq!(
        engine.apply_move(4, MoveOrigin::Human),
        Err(MoveError::SquareOccupied(Position::Center))
    );
    assert_eq!(*engine.board(), board);
    assert_eq!(engine.scores(), scores);
    assert_eq!(engine.ply(), 1);
    // Still O's turn: the rejected move consumed nothing.
    assert_eq!(engine.current_player(), Player::O);
}

#[test]
fn rejects_moves_after_terminal_state() {
    let mut engine = pvp();
    play_all(&mut engine, &X_WINS);

    assert!(matches!(engine.status(), GameStatus::Won(_)));
    for index in 0..9 {
        assert!(matches!(
            engine.apply_move(index, MoveOrigin::Human),
            Err(MoveError::SquareOccupied(_)) | Err(MoveError::GameOver)
        ));
    }
    assert_eq!(engine.history_len(), 6);
}

#[test]
fn pvc_rejects_human_move_on_computer_ply() {
    let mut engine = GameEngine::with_config(Mode::PlayerVsComputer, Difficulty::Easy);
    engine.apply_move(0, MoveOrigin::Human).unwrap();

    // Ply 1 belongs to O, the computer.
    assert_eq!(engine.current_player(), Player::O);
    assert_eq!(
        engine.apply_move(4, MoveOrigin::Human),
        Err(MoveError::NotYourTurn)
    );
    assert!(engine.apply_move(4, MoveOrigin::Computer).is_ok());
}

#[test]
fn turn_order_follows_cursor_parity() {
    let mut engine = pvp();
    assert_eq!(engine.current_player(), Player::X);

    engine.apply_move(0, MoveOrigin::Human).unwrap();
    assert_eq!(engine.current_player(), Player::O);

    engine.undo().unwrap();
    assert_eq!(engine.current_player(), Player::X);

    engine.redo().unwrap();
    assert_eq!(engine.current_player(), Player::O);
}

#[test]
fn jump_is_idempotent_and_reads_recorded_board() {
    let mut engine = pvp();
    play_all(&mut engine, &[0, 3, 1]);

    engine.jump_to(2).unwrap();
    let once = *engine.board();
    engine.jump_to(2).unwrap();
    assert_eq!(*engine.board(), once);
    assert_eq!(engine.board(), engine.board_at(2).unwrap());

    assert!(engine.jump_to(4).is_err());
    assert_eq!(engine.ply(), 2);
}

#[test]
fn new_move_after_undo_discards_redo_branch() {
    let mut engine = pvp();
    play_all(&mut engine, &[0, 3, 1]);
    assert_eq!(engine.history_len(), 4);

    engine.undo().unwrap();
    engine.undo().unwrap();
    assert!(engine.can_redo());

    // Branch off: O plays elsewhere.
    engine.apply_move(8, MoveOrigin::Human).unwrap();
    assert!(!engine.can_redo());
    assert_eq!(engine.history_len(), 3);
    assert_eq!(engine.board().get(Position::BottomRight), Square::Occupied(Player::O));
    assert!(engine.board().is_empty(Position::TopCenter));
}

#[test]
fn win_credits_exactly_the_winner() {
    let mut engine = pvp();
    play_all(&mut engine, &X_WINS);

    assert_eq!(engine.scores().wins(Player::X), 1);
    assert_eq!(engine.scores().wins(Player::O), 0);
}

#[test]
fn draw_credits_nobody() {
    let mut engine = pvp();
    // X O X / X O O / O X X with no completed line.
    play_all(&mut engine, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    assert!(engine.is_draw());
    assert!(engine.scores().is_blank());
}

#[test]
fn reset_game_keeps_scores_and_reset_scores_keeps_game() {
    let mut engine = pvp();
    play_all(&mut engine, &X_WINS);
    assert_eq!(engine.scores().wins(Player::X), 1);

    engine.reset_game();
    assert_eq!(engine.history_len(), 1);
    assert_eq!(engine.ply(), 0);
    assert_eq!(engine.scores().wins(Player::X), 1);

    engine.apply_move(4, MoveOrigin::Human).unwrap();
    engine.reset_scores();
    assert!(engine.scores().is_blank());
    assert_eq!(engine.ply(), 1);
}

#[test]
fn mode_and_difficulty_changes_restart_the_game() {
    let mut engine = pvp();
    play_all(&mut engine, &X_WINS);

    engine.set_mode(Mode::PlayerVsComputer);
    assert_eq!(engine.mode(), Mode::PlayerVsComputer);
    assert_eq!(engine.history_len(), 1);
    assert_eq!(engine.scores().wins(Player::X), 1);

    engine.apply_move(0, MoveOrigin::Human).unwrap();
    engine.set_difficulty(Difficulty::Boss);
    assert_eq!(engine.difficulty(), Difficulty::Boss);
    assert_eq!(engine.history_len(), 1);
}

fn completed_lines(engine: &GameEngine, player: Player) -> usize {
    LINES
        .iter()
        .filter(|line| {
            line.iter()
                .all(|pos| engine.board().get(*pos) == Square::Occupied(player))
        })
        .count()
}

proptest! {
    /// Arbitrary input sequences never corrupt the engine: rejected moves
    /// change nothing, history grows only with accepted moves, and the two
    /// players can never both hold a completed line.
    #[test]
    fn random_sequences_hold_invariants(
        indices in proptest::collection::vec(0usize..12, 0..40)
    ) {
        let mut engine = pvp();
        let mut accepted = 0;

        for index in indices {
            let board = *engine.board();
            let ply = engine.ply();
            let scores = engine.scores();

            match engine.apply_move(index, MoveOrigin::Human) {
                Ok(_) => accepted += 1,
                Err(_) => {
                    prop_assert_eq!(*engine.board(), board);
                    prop_assert_eq!(engine.ply(), ply);
                    prop_assert_eq!(engine.scores(), scores);
                }
            }
        }

        prop_assert_eq!(engine.history_len(), accepted + 1);

        let x_lines = completed_lines(&engine, Player::X);
        let o_lines = completed_lines(&engine, Player::O);
        prop_assert!(x_lines == 0 || o_lines == 0);

        if engine.status().is_over() {
            for index in 0..9 {
                prop_assert!(engine.apply_move(index, MoveOrigin::Human).is_err());
            }
        }
    }
}
