// Whole-game scenarios driven through the public engine API.

use std::cell::RefCell;
use std::rc::Rc;

use connect_four::ai::{Agent, RandomAgent, ScriptedAgent};
use connect_four::game::{
    Board, Engine, GameOutcome, MoveError, NoDelay, Occupant, Player, Position, PositionError,
    Snapshot, CELL_COUNT,
};

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).unwrap()
}

fn without_score(mut snapshot: Snapshot) -> Snapshot {
    snapshot.wins = 0;
    snapshot.losses = 0;
    snapshot.draws = 0;
    snapshot
}

mod placement {
    use super::*;

    #[test]
    fn piece_lands_on_top_of_stack() {
        for k in 0..=5 {
            // k pieces of alternating colour at the bottom of column 6.
            let mut board = Board::new();
            for i in 0..k {
                let occupant = if i % 2 == 0 {
                    Occupant::Computer
                } else {
                    Occupant::Human
                };
                board.set(pos(6 - i, 6), occupant);
            }

            let mut engine = Engine::new(ScriptedAgent::boxed(&[1])).with_board(board).unwrap();
            engine.play(6, &mut NoDelay).unwrap();

            assert_eq!(engine.board().get(pos(6 - k, 6)), Occupant::Human, "k = {k}");
            assert_eq!(engine.board().column_height(6), k + 1);
            assert_eq!(engine.winner(), None);
        }
    }

    #[test]
    fn full_column_is_rejected_without_change() {
        let mut engine = Engine::new(ScriptedAgent::boxed(&[2, 2, 2]));
        for _ in 0..3 {
            engine.play(2, &mut NoDelay).unwrap();
        }
        assert_eq!(engine.board().column_height(2), 6);

        let before = engine.snapshot();
        assert_eq!(engine.on_column_chosen(2), Err(MoveError::ColumnFull(2)));
        assert_eq!(engine.snapshot(), before);
        assert!(engine.falling().is_none());
    }

    #[test]
    fn random_games_keep_grid_invariants() {
        for seed in 0..20 {
            let mut engine = Engine::new(Box::new(RandomAgent::from_seed(seed)));
            let mut human = RandomAgent::from_seed(seed + 1_000);

            while engine.outcome().is_none() {
                let column = human.select_column(engine.board()).unwrap();
                engine.on_column_chosen(column).unwrap();
                while engine.falling().is_some() {
                    let snapshot = engine.snapshot();
                    assert_eq!(snapshot.cells.len(), CELL_COUNT);
                    for (i, cell) in snapshot.cells.iter().enumerate() {
                        assert_eq!(cell.index, i + 1);
                    }
                    engine.advance();
                }
            }

            let score = engine.score();
            assert_eq!(score.wins + score.losses + score.draws, 1);
            if engine.outcome() == Some(GameOutcome::Draw) {
                assert!(engine.board().is_full());
            }
        }
    }
}

mod win_detection {
    use super::*;

    #[test]
    fn vertical_win_on_fourth_piece() {
        let mut engine = Engine::new(ScriptedAgent::boxed(&[1, 2, 1]));
        for _ in 0..3 {
            engine.play(4, &mut NoDelay).unwrap();
            assert_eq!(engine.winner(), None, "three in a column is not a win");
        }

        engine.play(4, &mut NoDelay).unwrap();
        assert_eq!(engine.winner(), Some(Player::Human));
        assert_eq!(engine.board().column_height(4), 4);
        assert_eq!(engine.score().wins, 1);
    }

    #[test]
    fn horizontal_win_in_third_row() {
        // Columns 2-5 hold three pieces each; the human already has row 3 in
        // columns 2, 3 and 4.
        let mut board = Board::new();
        let layout = [
            (3, ["H", "H", "H", "."]),
            (4, ["C", "C", "H", "C"]),
            (5, ["H", "H", "C", "H"]),
            (6, ["C", "C", "H", "C"]),
        ];
        for (row, cells) in layout {
            for (i, cell) in cells.iter().enumerate() {
                let occupant = match *cell {
                    "H" => Occupant::Human,
                    "C" => Occupant::Computer,
                    _ => Occupant::Empty,
                };
                board.set(pos(row, i + 2), occupant);
            }
        }

        let mut engine = Engine::new(ScriptedAgent::boxed(&[])).with_board(board).unwrap();
        engine.play(5, &mut NoDelay).unwrap();

        assert_eq!(engine.board().get(pos(3, 5)), Occupant::Human);
        assert_eq!(engine.winner(), Some(Player::Human));
        assert_eq!(engine.score().wins, 1);
        assert_eq!(engine.score().losses, 0);
    }

    #[test]
    fn wrapped_run_is_not_a_win() {
        // After the drop the human holds indices 7, 8, 9 and 10: the last
        // cell of row 1 and the first three of row 2. That is not a line.
        let rows = [
            ".......", "HHHCCHC", "CHCHCHC", "CHCHCHC", "HCHCHCH", "HCHCHCH",
        ];
        let mut board = Board::new();
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                let occupant = match ch {
                    'H' => Occupant::Human,
                    'C' => Occupant::Computer,
                    _ => Occupant::Empty,
                };
                board.set(pos(r + 1, c + 1), occupant);
            }
        }

        let mut engine = Engine::new(ScriptedAgent::boxed(&[1])).with_board(board).unwrap();
        engine.play(7, &mut NoDelay).unwrap();

        for index in 7..=10 {
            assert_eq!(engine.board().cell(index).unwrap().occupant, Occupant::Human);
        }
        assert_eq!(engine.board().get(pos(1, 1)), Occupant::Computer);
        assert_eq!(engine.winner(), None);
        assert!(engine.is_human_turn());
    }

    #[test]
    fn prepared_win_is_not_scored_again() {
        // The computer already holds the bottom row in columns 1-4.
        let mut board = Board::new();
        for col in 1..=4 {
            board.set(pos(6, col), Occupant::Computer);
        }
        for col in 1..=3 {
            board.set(pos(5, col), Occupant::Human);
        }

        let mut engine = Engine::new(ScriptedAgent::boxed(&[5])).with_board(board).unwrap();
        assert_eq!(engine.winner(), Some(Player::Computer));
        assert_eq!(engine.play(7, &mut NoDelay), Err(MoveError::GameOver));
        assert_eq!(engine.score().losses, 0);
        assert_eq!(engine.board().column_height(7), 0);
    }

    #[test]
    fn unsettled_position_is_refused() {
        let mut board = Board::new();
        board.set(pos(2, 4), Occupant::Human);
        let result = Engine::new(ScriptedAgent::boxed(&[])).with_board(board);
        assert_eq!(result.err(), Some(PositionError::FloatingPiece { row: 2, col: 4 }));
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn finished_game_ignores_input() {
        let mut engine = Engine::new(ScriptedAgent::boxed(&[1, 1, 1]));
        for col in [3, 4, 5, 6] {
            engine.play(col, &mut NoDelay).unwrap();
        }
        assert_eq!(engine.winner(), Some(Player::Human));

        let before = engine.snapshot();
        for col in 1..=7 {
            assert_eq!(engine.on_column_chosen(col), Err(MoveError::GameOver));
        }
        engine.advance();
        assert_eq!(engine.snapshot(), before);
        assert!(!before.is_human_turn);
    }

    #[test]
    fn reset_behaves_like_a_fresh_engine() {
        let opening = [3, 3, 1, 6];
        let replies = [2, 7, 7, 1];

        let mut fresh = Engine::new(ScriptedAgent::boxed(&replies));
        for col in opening {
            fresh.play(col, &mut NoDelay).unwrap();
        }

        // First game: a quick human win, then the same opening after a reset.
        let mut moves = vec![1, 1, 1];
        moves.extend_from_slice(&replies);
        let mut reused = Engine::new(ScriptedAgent::boxed(&moves));
        for col in [4, 5, 6, 7] {
            reused.play(col, &mut NoDelay).unwrap();
        }
        reused.reset_game();
        for col in opening {
            reused.play(col, &mut NoDelay).unwrap();
        }

        assert_eq!(without_score(reused.snapshot()), without_score(fresh.snapshot()));
        assert_eq!(reused.score().wins, 1);
        assert_eq!(fresh.score().wins, 0);
    }

    #[test]
    fn observers_see_every_fall_step() {
        let log: Rc<RefCell<Vec<Snapshot>>> = Rc::default();
        let sink = Rc::clone(&log);

        let mut engine = Engine::new(ScriptedAgent::boxed(&[1]));
        engine.add_observer(move |s: &Snapshot| sink.borrow_mut().push(s.clone()));
        engine.play(4, &mut NoDelay).unwrap();

        let log = log.borrow();
        // Human piece: six occupy and six clear edges, then the commit.
        let human_column: Vec<Occupant> = log
            .iter()
            .take(13)
            .map(|s| {
                (1..=6)
                    .map(|row| s.cell(pos(row, 4)).unwrap().occupant)
                    .find(|o| *o != Occupant::Empty)
                    .unwrap_or(Occupant::Empty)
            })
            .collect();
        for (i, occupant) in human_column.iter().enumerate() {
            let expected = if i % 2 == 0 { Occupant::Human } else { Occupant::Empty };
            assert_eq!(*occupant, expected, "edge {i}");
        }
        assert!(log[..12].iter().all(|s| s.is_drop_in_progress));
        assert!(!log[12].is_drop_in_progress);

        let last = log.last().unwrap();
        assert!(last.is_human_turn);
        assert_eq!(last.cell(pos(6, 1)).unwrap().occupant, Occupant::Computer);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut engine = Engine::new(ScriptedAgent::boxed(&[2]));
        engine.play(1, &mut NoDelay).unwrap();

        let json = engine.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["cells"].as_array().unwrap().len(), 42);
        assert_eq!(value["cells"][35]["occupant"], "human");
        assert_eq!(value["cells"][36]["occupant"], "computer");
        assert_eq!(value["headers"].as_array().unwrap().len(), 7);
        assert_eq!(value["is_human_turn"], true);
        assert_eq!(value["winner"], serde_json::Value::Null);
    }
}
