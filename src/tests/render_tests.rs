#[cfg(test)]
mod tests {
    use crate::components::{ClearedRows, GameState, Phase};
    use crate::game::GRID_HEIGHT;
    use crate::grid::Grid;
    use crate::lifecycle::end_game;
    use crate::queue::PieceQueue;
    use crate::render::{RenderSink, Snapshot, present_system};
    use crate::shapes::PieceType;
    use crate::tests::test_utils::{create_running_world, create_test_world, lock_cell};

    struct Recorder {
        frames: Vec<Snapshot>,
        fail: bool,
    }

    impl RenderSink for Recorder {
        type Error = String;

        fn present(&mut self, snapshot: &Snapshot) -> Result<(), String> {
            if self.fail {
                return Err("sink closed".to_string());
            }
            self.frames.push(snapshot.clone());
            Ok(())
        }
    }

    #[test]
    fn test_idle_snapshot() {
        let mut world = create_test_world();
        let snapshot = Snapshot::capture(&mut world);

        assert!(snapshot.show_start);
        assert!(!snapshot.show_game_over);
        assert!(snapshot.cells.iter().flatten().all(Option::is_none));
        assert_eq!(snapshot.lines_text, "Lines: 0");
        assert_eq!(snapshot.rate_text, "Rate: 1.0");
        assert!(snapshot.cleared_rows.is_empty());
    }

    #[test]
    fn test_queue_matches_upcoming() {
        let mut world = create_test_world();
        let upcoming = world.resource::<PieceQueue>().upcoming();
        let snapshot = Snapshot::capture(&mut world);

        for ((piece, mask), expected) in snapshot.queue.iter().zip(upcoming) {
            assert_eq!(*piece, expected);
            assert_eq!(*mask, expected.mask());
        }
    }

    #[test]
    fn test_cells_skip_hidden_rows() {
        let mut world = create_running_world();
        {
            let mut grid = world.resource_mut::<Grid>();
            lock_cell(&mut grid, 3, GRID_HEIGHT - 1);
            lock_cell(&mut grid, 6, 0);
        }
        let snapshot = Snapshot::capture(&mut world);

        assert_eq!(snapshot.cells[19][3], Some(PieceType::O));
        assert_eq!(snapshot.cells.iter().flatten().flatten().count(), 1);
        assert!(!snapshot.show_start);
    }

    #[test]
    fn test_stats_text() {
        let mut world = create_running_world();
        {
            let mut state = world.resource_mut::<GameState>();
            state.lines = 12;
            state.drop_rate = 2.0;
        }
        let snapshot = Snapshot::capture(&mut world);
        assert_eq!(snapshot.lines_text, "Lines: 12");
        assert_eq!(snapshot.rate_text, "Rate: 2.0");
    }

    #[test]
    fn test_game_over_flag() {
        let mut world = create_running_world();
        end_game(&mut world);
        let snapshot = Snapshot::capture(&mut world);
        assert!(snapshot.show_game_over);
        assert!(!snapshot.show_start);
        assert_eq!(world.resource::<GameState>().phase, Phase::GameOver);
    }

    #[test]
    fn test_cleared_rows_are_drained_once() {
        let mut world = create_running_world();
        world
            .resource_mut::<ClearedRows>()
            .rows
            .extend([GRID_HEIGHT - 1, GRID_HEIGHT - 2, 1]);

        let first = Snapshot::capture(&mut world);
        let second = Snapshot::capture(&mut world);

        // Hidden rows are dropped and the rest shifted to visible indices
        assert_eq!(first.cleared_rows, vec![19, 18]);
        assert!(second.cleared_rows.is_empty());
    }

    #[test]
    fn test_present_system_forwards_snapshot_and_errors() {
        let mut world = create_running_world();
        let mut sink = Recorder {
            frames: Vec::new(),
            fail: false,
        };
        present_system(&mut world, &mut sink).unwrap();
        assert_eq!(sink.frames.len(), 1);

        sink.fail = true;
        assert_eq!(
            present_system(&mut world, &mut sink),
            Err("sink closed".to_string())
        );
    }
}
