#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use ndarray::{array, aview1};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use unordered_pair::UnorderedPair;

    use crate::builder::{BoardBuilder, BuilderInvalidReason};
    use crate::challenge::{Challenge, ChallengeProgress, CHALLENGE_STAGES};
    use crate::generator::{GeneratorConfig, GeneratorError, StageGenerator};
    use crate::grid::{classify_position, oblique_to_cartesian, snap_to_grid, GridPositionState, GridSettings, Oblique, Position};
    use crate::layout::{placements, BoardScale};
    use crate::location::Location;
    use crate::solver::{PressSolver, SolverFailure};
    use crate::stage::{Stage, StageCollection, StageDefinition, StageWarning, StarCondition};
    use crate::{Board, BoardError, CellMatrix, CellState, Orientation, PatternError, Side};

    const CHALLENGE: [&str; 4] = ["0212120", "2121212", "1212121", "0000010"];
    const CHALLENGE_TARGET: [&str; 4] = ["0211110", "1111111", "1111111", "0000010"];

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn challenge_board() -> Board {
        Board::from(&CellMatrix::parse(&CHALLENGE, true).unwrap())
    }

    fn position_at(oblique: (f64, f64), cell_size: f64) -> Position {
        let p = oblique_to_cartesian(Oblique { x: oblique.0 * cell_size, y: oblique.1 * cell_size });
        Position::new(p.x, p.y, 0.)
    }

    fn assert_close(a: Position, b: Position) {
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9 && a.z == b.z, "{:?} != {:?}", a, b);
    }

    #[test]
    fn challenge_board_indexing() {
        init_logger();
        let board = challenge_board();

        // one tile per non-'0' character
        assert_eq!(board.size(), CHALLENGE.iter().flat_map(|row| row.chars()).filter(|c| *c != '0').count());
        assert_eq!(board.size(), 20);
        assert_eq!(board.state().len(), board.size());

        // the lone tile of the bottom row comes first
        assert_eq!(board.tile(0).unwrap().location, Location(5, 3));
        assert_eq!(board.tile(1).unwrap().location, Location(0, 2));
        assert_eq!(board.tile(19).unwrap().location, Location(5, 0));
        assert!(board.tile(20).is_none());

        assert_eq!(board.state_string(), "11010101010101001010");
        assert_eq!(board.is_front(0), Some(true));
        assert_eq!(board.is_front(2), Some(false));
        assert_eq!(board.is_front(20), None);
        assert_eq!(board.dims(), (7, 4));
        assert_eq!(format!("{}", board), "0212120
2121212
1212121
0000010
");
    }

    #[test]
    fn challenge_board_adjacency() {
        let board = challenge_board();

        // downward tile below the board's right arm looks up
        let tile = board.tile(0).unwrap();
        assert_eq!(tile.orientation, Orientation::Downward);
        assert_eq!(tile.neighbors, [None, None, Some(6)]);

        let tile = board.tile(6).unwrap();
        assert_eq!(tile.orientation, Orientation::Upward);
        assert_eq!(tile.neighbors, [Some(7), Some(5), Some(0)]);

        // left edge of the board
        assert_eq!(board.tile(1).unwrap().neighbors, [Some(2), None, Some(8)]);
        assert_eq!(board.tile(8).unwrap().neighbors, [Some(9), None, Some(1)]);

        // top row: upward tiles look down, downward tiles have nothing above
        let tile = board.tile(15).unwrap();
        assert!(tile.is_upward());
        assert_eq!(tile.neighbors, [Some(16), None, Some(9)]);
        assert_eq!(board.tile(16).unwrap().neighbor(Side::Base), None);

        // 16 edges within rows, 8 across them
        assert_eq!(board.edges().count(), 24);
        assert!(board.edges().any(|edge| edge == UnorderedPair(6, 0)));
        assert_eq!(board.neighbors_of(6).collect::<Vec<_>>(), vec![7, 5, 0]);
    }

    #[test]
    fn parity_flag() {
        let down = CellMatrix::parse(&["11", "11"], true).unwrap();
        assert_eq!(down.orientation_at(Location(0, 0)), Orientation::Downward);
        assert_eq!(down.orientation_at(Location(1, 0)), Orientation::Upward);
        assert_eq!(down.orientation_at(Location(0, 1)), Orientation::Upward);

        let up = CellMatrix::parse(&["11", "11"], false).unwrap();
        assert_eq!(up.orientation_at(Location(0, 0)), Orientation::Upward);

        // a downward tile on the top row and the upward one below it share an edge
        let board = Board::from(&down);
        let top_left = board.tile_at(Location(0, 0)).unwrap();
        let below = board.tile_at(Location(0, 1)).unwrap();
        assert_eq!(top_left.neighbor(Side::Base), None);
        assert_eq!(below.neighbor(Side::Base), None);

        let board = Board::from(&up);
        let top_left = board.tile_at(Location(0, 0)).unwrap();
        let below = board.tile_at(Location(0, 1)).unwrap();
        assert_eq!(top_left.neighbor(Side::Base), Some(below.index));
        assert_eq!(below.neighbor(Side::Base), Some(top_left.index));

        // the flag pins the top row whatever the height
        let single = CellMatrix::parse(&["1"], true).unwrap();
        assert_eq!(single.orientation_at(Location(0, 0)), Orientation::Downward);

        let column = CellMatrix::parse(&["1", "1", "1"], true).unwrap();
        assert_eq!(column.orientation_at(Location(0, 0)), Orientation::Downward);
        assert_eq!(column.orientation_at(Location(0, 1)), Orientation::Upward);
        assert_eq!(column.orientation_at(Location(0, 2)), Orientation::Downward);

        // bottom row first: rows 2, 1, 0 become tiles 0, 1, 2
        let board = Board::from(&column);
        assert_eq!(board.tile(0).unwrap().neighbors, [None, None, Some(1)]);
        assert_eq!(board.tile(1).unwrap().neighbors, [None, None, Some(0)]);
        assert_eq!(board.tile(2).unwrap().neighbors, [None, None, None]);
    }

    #[test]
    fn pattern_errors() {
        assert_eq!(
            CellMatrix::parse(&["012", "0a1"], true),
            Err(PatternError::InvalidCharacter { row: 1, column: 1, found: 'a' }),
        );
        assert!(matches!(
            CellMatrix::parse(&["012", "01"], true),
            Err(PatternError::ShapeMismatch { found_height: 2, .. }),
        ));
        assert!(matches!(
            CellMatrix::parse_with_dims(&["012"], 3, 2, true),
            Err(PatternError::ShapeMismatch { height: 2, width: 3, found_height: 1, .. }),
        ));
        assert!(CellMatrix::parse::<&str>(&[], true).is_err());
        assert_eq!(CellState::try_from('2'), Ok(CellState::Back));
        assert_eq!(CellState::try_from('x'), Err('x'));
    }

    #[test]
    fn target_bits_follow_tile_order() {
        let initial = CellMatrix::parse(&CHALLENGE, true).unwrap();
        let target = CellMatrix::parse(&CHALLENGE_TARGET, true).unwrap();
        assert!(initial.same_occupancy(&target));

        let board = Board::from(&initial);
        let bits = target.bits();
        assert_eq!(bits.len(), board.size());
        for tile in board.tiles() {
            assert_eq!(bits[tile.index], target.get(tile.location) == Some(CellState::Front));
        }

        let shifted = CellMatrix::parse(&["0211111", "1111111", "1111111", "0000010"], true).unwrap();
        assert!(!initial.same_occupancy(&shifted));
        assert!(!board.matches_pattern(shifted.bits().view()));
    }

    #[test]
    fn single_tile_flip() {
        let mut board = Board::from(&CellMatrix::parse(&["1"], true).unwrap());
        assert!(board.matches_pattern(aview1(&[true])));

        board.flip_tile(0).unwrap();
        assert!(!board.matches_pattern(aview1(&[true])));
        assert!(board.matches_pattern(aview1(&[false])));
        // initial face is history, not live state
        assert!(board.tile(0).unwrap().initially_front);

        assert!(!board.matches_pattern(aview1(&[false, false])));
        assert!(!board.matches_pattern(aview1(&[])));
    }

    #[test]
    fn out_of_range_edits_leave_board_alone() {
        let mut board = challenge_board();
        let before = board.state_string();

        assert_eq!(board.flip_tile(20), Err(BoardError::IndexOutOfRange { index: 20, size: 20 }));
        assert_eq!(board.set_tile_state(usize::MAX, false), Err(BoardError::IndexOutOfRange { index: usize::MAX, size: 20 }));
        assert!(board.press(42).is_err());
        assert_eq!(board.state_string(), before);

        assert_eq!(board.reset_to(aview1(&[true; 3])), Err(BoardError::LengthMismatch { expected: 20, found: 3 }));
        assert_eq!(board.state_string(), before);
    }

    #[test]
    fn set_and_reset() {
        let mut board = challenge_board();
        board.set_tile_state(1, false).unwrap();
        board.set_tile_state(2, true).unwrap();
        assert_eq!(&board.state_string()[..4], "1011");

        board.reset_to(CellMatrix::parse(&CHALLENGE_TARGET, true).unwrap().bits().view()).unwrap();
        assert_eq!(board.state_string(), "11111111111111101111");

        board.reset();
        assert_eq!(board.state_string(), "11010101010101001010");
    }

    #[test]
    fn press_turns_over_neighbors() {
        let mut board = challenge_board();
        board.press(6).unwrap();

        assert_eq!(format!("{}", board), "0212120
2121212
1212212
0000020
");

        board.press(6).unwrap();
        assert_eq!(format!("{}", board), CHALLENGE.join("\n") + "\n");
    }

    #[test]
    fn press_skips_missing_neighbors() {
        let mut board = Board::from(&CellMatrix::parse(&["0110"], true).unwrap());
        assert_eq!(board.size(), 2);

        let tile = board.tile(0).unwrap();
        assert_eq!(tile.neighbors, [Some(1), None, None]);
        assert_eq!(board.tile(1).unwrap().neighbors, [None, Some(0), None]);

        board.press(0).unwrap();
        assert_eq!(board.state_string(), "00");
        assert_eq!(format!("{}", board), "0220\n");
    }

    #[test]
    fn builder_edits() {
        let board = BoardBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(2).unwrap()))
            .set_cell(Location(0, 0), CellState::Front)
            .set_cell(Location(1, 0), CellState::Back)
            .set_cell(Location(1, 1), CellState::Front)
            .invert_cell(Location(0, 0))
            .invert_cell(Location(2, 1))
            .build()
            .unwrap();

        assert_eq!(format!("{}", board), "220
010
");
        assert_eq!(board.size(), 3);

        let board = BoardBuilder::from_rows(&CHALLENGE, true)
            .drop_location(Location(5, 3))
            .build()
            .unwrap();
        assert_eq!(board.size(), 19);
        assert_eq!(board.tile(0).unwrap().location, Location(0, 2));
    }

    #[test]
    fn builder_invalid() {
        let mut builder = BoardBuilder::with_dims((NonZero::new(2).unwrap(), NonZero::new(2).unwrap()));
        builder.set_cell(Location(2, 0), CellState::Front)
            .set_cell(Location(0, 0), CellState::Front);
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::FeatureOutOfBounds]));
        assert!(builder.build().is_err());

        let builder = BoardBuilder::from_rows(&["01", "3"], true);
        assert_eq!(
            builder.is_valid(),
            Some(&vec![BuilderInvalidReason::Pattern(PatternError::InvalidCharacter { row: 1, column: 0, found: '3' })]),
        );
    }

    #[test]
    fn solve_small_boards() {
        let board = Board::from(&CellMatrix::parse(&["1"], true).unwrap());
        assert_eq!(board.presses_to(aview1(&[false])), Ok(vec![0]));
        assert_eq!(board.presses_to(aview1(&[true])), Ok(vec![]));
        assert_eq!(
            board.presses_to(aview1(&[true, true])),
            Err(SolverFailure::LengthMismatch { expected: 1, found: 2 }),
        );

        // both presses of a domino turn both tiles over
        let board = Board::from(&CellMatrix::parse(&["12"], true).unwrap());
        assert_eq!(board.presses_to(aview1(&[false, true])).map(|presses| presses.len()), Ok(1));
        assert_eq!(PressSolver::from(&board).solve(aview1(&[true, true])), Err(SolverFailure::Inconsistent));
        assert!(!board.can_reach(aview1(&[true, true])));
    }

    #[test]
    fn solve_minimal_after_presses() {
        init_logger();
        let mut pressed = challenge_board();
        pressed.press(3).unwrap();
        pressed.press(10).unwrap();
        let target = pressed.state().to_owned();

        let mut board = challenge_board();
        let presses = board.presses_to(target.view()).unwrap();
        assert_eq!(presses.len(), 2);

        for index in presses {
            board.press(index).unwrap();
        }
        assert!(board.matches_pattern(target.view()));
    }

    #[test]
    fn snapping() {
        let cell = 2.;

        // vertices stay put
        let vertex = position_at((1., 1.), cell);
        assert_close(snap_to_grid(vertex, cell), vertex);
        assert_close(snap_to_grid(Position::new(0., 0., 3.), cell), Position::new(0., 0., 3.));

        // points near a vertex go to it
        assert_close(snap_to_grid(position_at((0.1, 0.1), cell), cell), position_at((0., 0.), cell));
        assert_close(snap_to_grid(position_at((0.9, 0.9), cell), cell), position_at((1., 1.), cell));
        assert_close(snap_to_grid(position_at((0.1, 0.9), cell), cell), position_at((0., 1.), cell));
        assert_close(snap_to_grid(position_at((0.9, 0.1), cell), cell), position_at((1., 0.), cell));

        // everything else goes to the centroid of its triangle
        assert_close(snap_to_grid(position_at((0.3, 0.3), cell), cell), position_at((1. / 3., 1. / 3.), cell));
        assert_close(snap_to_grid(position_at((0.7, 0.6), cell), cell), position_at((2. / 3., 2. / 3.), cell));
        assert_close(snap_to_grid(position_at((-0.6, 2.35), cell), cell), position_at((-2. / 3., 7. / 3.), cell));

        // depth passes through
        let mut deep = position_at((0.3, 0.3), cell);
        deep.z = -5.;
        assert_eq!(snap_to_grid(deep, cell).z, -5.);
    }

    #[test]
    fn classification() {
        let cell = 2.;
        let eps = 1e-4;

        assert_eq!(classify_position(position_at((1. / 3. + eps, 1. / 3. + eps), cell), cell), GridPositionState::UpwardCenter);
        assert_eq!(classify_position(position_at((2. / 3., 2. / 3.), cell), cell), GridPositionState::DownwardCenter);
        assert_eq!(classify_position(position_at((0., 0.), cell), cell), GridPositionState::Vertex);
        assert_eq!(classify_position(position_at((3., -2.), cell), cell), GridPositionState::Vertex);
        assert_eq!(classify_position(position_at((0.1, 0.8), cell), cell), GridPositionState::Vertex);

        let settings = GridSettings::default();
        assert_eq!(settings.cell_size, 2.);
        assert_eq!(settings.classify(position_at((4. + 1. / 3., 1. / 3.), 2.)), GridPositionState::UpwardCenter);
        assert_eq!(settings.vertices().count(), 41 * 41);
    }

    #[test]
    fn layout_matches_grid() {
        // bottom left triangle points up, so placements land on the lattice of cell size `tile_unit`
        let matrix = CellMatrix::parse(&["11"], false).unwrap();
        let height = 3f64.sqrt();
        let out = placements(&matrix, Position::new(1.5, height / 2., 0.), 3., height);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].orientation, Orientation::Upward);
        assert_eq!(out[1].orientation, Orientation::Downward);
        assert!((out[0].scale - 1.).abs() < 1e-9);
        assert_close(out[0].position, Position::new(1., height / 3., 0.));
        assert_close(out[1].position, Position::new(2., 2. * height / 3., 0.));

        assert_eq!(classify_position(out[0].position, 2.), GridPositionState::UpwardCenter);
        assert_eq!(classify_position(out[1].position, 2.), GridPositionState::DownwardCenter);

        // a wide board is centred vertically
        let scale = BoardScale::fit((4., 1.), 4., 4.);
        assert!((scale.tile_unit - 1.).abs() < 1e-9);
        assert!((scale.origin.y - 1.5).abs() < 1e-9);
        assert_eq!(scale.origin.x, 0.);
    }

    #[test]
    fn layout_follows_tile_order() {
        let matrix = CellMatrix::parse(&CHALLENGE, true).unwrap();
        let board = Board::from(&matrix);
        let out = placements(&matrix, Position::default(), 12., 12.);

        assert_eq!(out.len(), board.size());
        for (placement, tile) in out.iter().zip(board.tiles()) {
            assert_eq!(placement.index, tile.index);
            assert_eq!(placement.orientation, tile.orientation);
            assert_eq!(placement.front, tile.initially_front);
        }
        // bottom row tile sits lowest
        assert!(out.iter().skip(1).all(|p| p.position.y > out[0].position.y));
    }

    fn challenge_definition() -> StageDefinition {
        StageDefinition {
            stage_id: 1,
            width: 7,
            height: 4,
            initial_pattern: CHALLENGE.map(String::from).to_vec(),
            target_pattern: CHALLENGE_TARGET.map(String::from).to_vec(),
            is_top_left_triangle_downward: true,
            star_condition: StarCondition { to_get_3_stars: 5, to_get_2_stars: 10 },
        }
    }

    #[test]
    fn stage_json() {
        let json = r#"{"stages": [{
            "stageId": 3,
            "width": 2,
            "height": 1,
            "initialPattern": ["12"],
            "targetPattern": ["21"],
            "isTopLeftTriangleDownward": false,
            "starCondition": {"toGet3Stars": 1, "toGet2Stars": 2}
        }]}"#;

        let collection = StageCollection::from_json(json).unwrap();
        let stage = collection.stage_by_id(3).unwrap();
        assert_eq!(stage.initial_pattern, vec!["12"]);
        assert!(!stage.is_top_left_triangle_downward);
        assert_eq!(stage.star_condition, StarCondition { to_get_3_stars: 1, to_get_2_stars: 2 });
        assert!(collection.validate_all());
        assert!(collection.stage_by_id(1).is_none());

        let again = StageCollection::from_json(&collection.to_json().unwrap()).unwrap();
        assert_eq!(again, collection);

        assert!(StageCollection::from_json("{\"stages\": 3}").is_err());
    }

    #[test]
    fn stage_validation() {
        let definition = challenge_definition();
        assert!(definition.validate().is_ok());
        assert_eq!(definition.validate_consistency().unwrap(), vec![]);

        let mut bad = definition.clone();
        bad.star_condition = StarCondition { to_get_3_stars: 10, to_get_2_stars: 10 };
        assert!(bad.validate().is_err());

        let mut bad = definition.clone();
        bad.target_pattern[1] = "111111".into();
        assert!(bad.validate_patterns().is_err());

        let mut bad = definition.clone();
        bad.initial_pattern[0] = "0212129".into();
        assert!(Stage::new(bad).is_err());

        let collection = StageCollection { stages: vec![definition.clone(), definition.clone()] };
        assert!(!collection.validate_ids());
        let collection = StageCollection { stages: vec![StageDefinition { stage_id: 0, ..definition }] };
        assert!(!collection.validate_ids());
    }

    #[test]
    fn stage_occupancy_mismatch_is_a_warning() {
        let mut definition = challenge_definition();
        definition.target_pattern[0] = "1211110".into();

        let stage = Stage::new(definition).unwrap();
        assert_eq!(stage.warnings(), &[StageWarning::OccupancyMismatch]);
        assert!(!stage.is_cleared());
    }

    #[test]
    fn stage_session() {
        let definition = StageDefinition {
            stage_id: 2,
            width: 2,
            height: 1,
            initial_pattern: vec!["12".into()],
            target_pattern: vec!["21".into()],
            is_top_left_triangle_downward: false,
            star_condition: StarCondition { to_get_3_stars: 1, to_get_2_stars: 3 },
        };

        let mut stage = Stage::new(definition).unwrap();
        assert!(stage.warnings().is_empty());
        assert!(!stage.is_cleared());

        stage.press(1).unwrap();
        assert!(stage.is_cleared());
        assert_eq!(stage.moves(), 1);
        assert_eq!(stage.rating(), 3);

        stage.press(0).unwrap();
        stage.press(0).unwrap();
        assert!(stage.is_cleared());
        assert_eq!(stage.rating(), 2);
        stage.press(0).unwrap();
        stage.press(0).unwrap();
        assert_eq!(stage.rating(), 1);

        assert!(stage.press(2).is_err());
        assert_eq!(stage.moves(), 5);

        stage.retry();
        assert_eq!(stage.moves(), 0);
        assert_eq!(stage.board().state_string(), "10");
        assert_eq!(stage.target(), array![false, true]);
    }

    #[test]
    fn generated_stages_are_solvable() {
        init_logger();
        let generator = StageGenerator::default();
        let mut rng = StdRng::seed_from_u64(20250807);

        for _ in 0..5 {
            let definition = generator.generate(&mut rng).unwrap();
            assert_eq!(definition.stage_id, -1);
            assert!(definition.validate().is_ok());
            assert_eq!(definition.validate_consistency().unwrap(), vec![]);

            let three = definition.star_condition.to_get_3_stars;
            assert!(three >= 1);
            assert!(definition.star_condition.to_get_2_stars >= 2 * three);

            let mut stage = Stage::new(definition).unwrap();
            let presses = stage.board().presses_to(stage.target()).unwrap();
            assert!(presses.len() as u32 <= three);

            for index in presses {
                stage.press(index).unwrap();
            }
            assert!(stage.is_cleared());
            assert_eq!(stage.rating(), 3);
        }
    }

    #[test]
    fn generator_rejects_bad_template() {
        let generator = StageGenerator::new(GeneratorConfig {
            template: vec!["01x".into()],
            ..GeneratorConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            generator.generate(&mut rng),
            Err(GeneratorError::Template(BuilderInvalidReason::Pattern(PatternError::InvalidCharacter {
                row: 0,
                column: 2,
                found: 'x',
            }))),
        );

        // nothing to press, so no stage
        let generator = StageGenerator::new(GeneratorConfig {
            template: vec!["000".into(), "000".into()],
            ..GeneratorConfig::default()
        });
        assert_eq!(generator.generate(&mut rng), Err(GeneratorError::NoTiles));
    }

    #[test]
    fn generator_without_inversion_keeps_template() {
        let generator = StageGenerator::new(GeneratorConfig {
            invert_chance: 0.,
            press_chance: 1.,
            ..GeneratorConfig::default()
        });
        let definition = generator.generate(&mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(generator.config().press_chance, 1.);

        assert_eq!(definition.initial_pattern, CHALLENGE.map(String::from).to_vec());
        assert_eq!(definition.star_condition.to_get_3_stars, 20);
        assert_eq!(definition.star_condition.to_get_2_stars, 40);
    }

    #[test]
    fn challenge_run() {
        init_logger();
        let mut rng = StdRng::seed_from_u64(4);
        let mut challenge = Challenge::start(StageGenerator::default(), &mut rng).unwrap();

        assert_eq!(challenge.total_stages(), CHALLENGE_STAGES);
        assert_eq!(challenge.current_stage_number(), 1);
        assert_eq!(challenge.total_stars(), 0);
        assert!(!challenge.is_complete());

        for (played, stars) in [3, 2, 1].into_iter().enumerate() {
            let stage = challenge.current_stage().clone();
            assert_eq!((stage.width, stage.height), (7, 4));
            assert!(stage.validate().is_ok());

            assert_eq!(challenge.on_stage_complete(stars, &mut rng), Ok(ChallengeProgress::NextStage));
            assert_eq!(challenge.current_stage_number(), played + 2);
        }

        assert_eq!(challenge.on_stage_complete(3, &mut rng), Ok(ChallengeProgress::Complete { total_stars: 9 }));
        assert!(challenge.is_complete());
        assert_eq!(challenge.stage_stars(), &[3, 2, 1, 3]);
        assert_eq!(challenge.current_stage_number(), CHALLENGE_STAGES);

        // a finished run records nothing more
        assert_eq!(challenge.on_stage_complete(3, &mut rng), Ok(ChallengeProgress::Complete { total_stars: 9 }));
        assert_eq!(challenge.stage_stars().len(), CHALLENGE_STAGES);
    }

    #[test]
    fn challenge_stars_come_from_stage_rating() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut challenge = Challenge::with_stages(StageGenerator::default(), 1, &mut rng).unwrap();

        let mut stage = Stage::new(challenge.current_stage().clone()).unwrap();
        for index in stage.board().presses_to(stage.target()).unwrap() {
            stage.press(index).unwrap();
        }
        assert!(stage.is_cleared());

        assert_eq!(
            challenge.on_stage_complete(stage.rating(), &mut rng),
            Ok(ChallengeProgress::Complete { total_stars: 3 }),
        );
    }
}
