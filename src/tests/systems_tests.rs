#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::{ClearedRows, GameState, Input, Key, Phase};
    use crate::game::GRID_HEIGHT;
    use crate::grid::Grid;
    use crate::lifecycle::frame_system;
    use crate::piece::ActivePiece;
    use crate::queue::PieceQueue;
    use crate::shapes::PieceType;
    use crate::systems::{
        gravity_system, lock_in_system, paint_system, rotation_system, shift_system, spawn_system,
    };
    use crate::tests::test_utils::{
        active, create_running_world, fill_row, lock_cell, set_active,
    };

    const BOTTOM: usize = GRID_HEIGHT - 1;

    // An O piece's cells sit at mask columns 1-2 and rows 1-2
    fn o_at(x: i32, y: i32) -> ActivePiece {
        ActivePiece {
            piece: PieceType::O,
            rotation: 0,
            x,
            y,
        }
    }

    fn block_spawn_area(grid: &mut Grid) {
        for y in 0..4 {
            lock_cell(grid, 4, y);
            lock_cell(grid, 5, y);
        }
    }

    #[test]
    fn test_spawn_system_takes_queue_head() {
        let mut world = create_running_world();
        let head = world.resource::<PieceQueue>().upcoming()[0];

        assert!(spawn_system(&mut world));

        let piece = active(&world).expect("piece should have spawned");
        assert_eq!(piece, ActivePiece::spawn(head));
    }

    #[test]
    fn test_spawn_system_keeps_existing_piece() {
        let mut world = create_running_world();
        set_active(&mut world, o_at(2, 7));
        let queue = world.resource::<PieceQueue>().upcoming();

        assert!(spawn_system(&mut world));

        assert_eq!(active(&world), Some(o_at(2, 7)));
        assert_eq!(world.resource::<PieceQueue>().upcoming(), queue);
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut world = create_running_world();
        block_spawn_area(&mut world.resource_mut::<Grid>());

        assert!(!spawn_system(&mut world));

        assert_eq!(world.resource::<GameState>().phase, Phase::GameOver);
        assert!(active(&world).is_some());
    }

    #[test]
    fn test_blocked_spawn_frame_paints_piece_over_free_cells() {
        let mut world = create_running_world();
        block_spawn_area(&mut world.resource_mut::<Grid>());

        frame_system(&mut world, 1.0);

        assert_eq!(world.resource::<GameState>().phase, Phase::GameOver);
        let piece = active(&world).expect("blocked piece stays active");
        let grid = world.resource::<Grid>();
        for (dx, dy) in piece.mask().cells() {
            let x = usize::try_from(piece.x + dx).unwrap();
            let y = usize::try_from(piece.y + dy).unwrap();
            assert!(grid.cell(x, y).piece.is_some());
        }
        for y in 0..4 {
            assert!(grid.cell(4, y).locked);
            assert_eq!(grid.cell(4, y).piece, Some(PieceType::O));
        }
        // No drop happened on the blocked frame
        assert_eq!(piece.y, 0);
    }

    #[test]
    fn test_rotation_system_uses_pressed_keys() {
        let mut world = create_running_world();
        set_active(&mut world, ActivePiece::spawn(PieceType::T));

        rotation_system(&mut world);
        assert_eq!(active(&world).map(|p| p.rotation), Some(0));

        world.resource_mut::<Input>().press(Key::RotateCw);
        rotation_system(&mut world);
        assert_eq!(active(&world).map(|p| p.rotation), Some(1));

        // Held without a new press does nothing
        world.resource_mut::<Input>().end_frame();
        rotation_system(&mut world);
        assert_eq!(active(&world).map(|p| p.rotation), Some(1));

        world.resource_mut::<Input>().press(Key::RotateCcw);
        rotation_system(&mut world);
        assert_eq!(active(&world).map(|p| p.rotation), Some(0));
    }

    #[test]
    fn test_shift_system_moves_on_first_press() {
        let mut world = create_running_world();
        set_active(&mut world, o_at(3, 5));
        world.resource_mut::<Input>().press(Key::Right);

        shift_system(&mut world, 0.0);
        assert_eq!(active(&world).map(|p| p.x), Some(4));

        // Next move waits for the shift interval
        shift_system(&mut world, 0.05);
        assert_eq!(active(&world).map(|p| p.x), Some(4));
        shift_system(&mut world, 0.06);
        assert_eq!(active(&world).map(|p| p.x), Some(5));
    }

    #[test]
    fn test_shift_system_stops_at_wall() {
        let mut world = create_running_world();
        // O occupies columns x+1..=x+2, so x = -1 touches the left wall
        set_active(&mut world, o_at(-1, 5));
        world.resource_mut::<Input>().press(Key::Left);

        shift_system(&mut world, 0.0);
        assert_eq!(active(&world).map(|p| p.x), Some(-1));
    }

    #[test]
    fn test_gravity_system_drops_after_interval() {
        let mut world = create_running_world();
        set_active(&mut world, o_at(3, 5));

        gravity_system(&mut world, 0.6);
        assert_eq!(active(&world).map(|p| p.y), Some(5));
        gravity_system(&mut world, 0.6);
        assert_eq!(active(&world).map(|p| p.y), Some(6));
    }

    #[test]
    fn test_gravity_system_fast_drop_while_down_held() {
        let mut world = create_running_world();
        set_active(&mut world, o_at(3, 5));
        world.resource_mut::<Input>().press(Key::Down);

        gravity_system(&mut world, 0.06);
        assert_eq!(active(&world).map(|p| p.y), Some(6));

        world.resource_mut::<Input>().release(Key::Down);
        gravity_system(&mut world, 0.06);
        assert_eq!(active(&world).map(|p| p.y), Some(6));
    }

    #[test]
    fn test_gravity_system_locks_resting_piece() {
        let mut world = create_running_world();
        // Cells on the two bottom rows
        set_active(&mut world, o_at(3, 19));

        gravity_system(&mut world, 1.5);

        assert!(active(&world).is_none());
        let grid = world.resource::<Grid>();
        for (x, y) in [(4, BOTTOM - 1), (5, BOTTOM - 1), (4, BOTTOM), (5, BOTTOM)] {
            assert!(grid.cell(x, y).locked);
            assert_eq!(grid.cell(x, y).piece, Some(PieceType::O));
        }
        assert_eq!(world.resource::<GameState>().phase, Phase::Running);
    }

    #[test]
    fn test_lock_in_clears_rows_and_reports_them() {
        let mut world = create_running_world();
        {
            let mut grid = world.resource_mut::<Grid>();
            fill_row(&mut grid, BOTTOM, &[4, 5]);
            fill_row(&mut grid, BOTTOM - 1, &[4, 5]);
            lock_cell(&mut grid, 0, BOTTOM - 2);
        }
        set_active(&mut world, o_at(3, 19));

        lock_in_system(&mut world);

        assert_eq!(world.resource::<GameState>().lines, 2);
        assert_eq!(world.resource::<ClearedRows>().rows, vec![BOTTOM, BOTTOM - 1]);
        let grid = world.resource::<Grid>();
        assert!(grid.cell(0, BOTTOM).locked);
        assert!(!grid.cell(1, BOTTOM).locked);
        assert!(!grid.cell(0, BOTTOM - 2).locked);
    }

    #[test]
    fn test_lock_in_hidden_rows_ends_game() {
        let mut world = create_running_world();
        // Rows 0 and 1 are above the visible field
        set_active(&mut world, o_at(3, -1));

        lock_in_system(&mut world);

        assert_eq!(world.resource::<GameState>().phase, Phase::GameOver);
        assert!(world.resource::<Grid>().cell(4, 0).locked);
    }

    #[test]
    fn test_lock_in_overflow_still_clears_rows() {
        let mut world = create_running_world();
        {
            let mut grid = world.resource_mut::<Grid>();
            for row in 2..GRID_HEIGHT {
                fill_row(&mut grid, row, &[4]);
            }
        }
        // An upright I reaching from row 1 down into row 4 fills column 4 of rows 2-4
        set_active(
            &mut world,
            ActivePiece {
                piece: PieceType::I,
                rotation: 0,
                x: 3,
                y: 1,
            },
        );

        lock_in_system(&mut world);

        assert_eq!(world.resource::<GameState>().lines, 3);
        assert_eq!(world.resource::<GameState>().phase, Phase::GameOver);
    }

    #[test]
    fn test_lock_in_without_active_piece_is_noop() {
        let mut world = create_running_world();
        lock_in_system(&mut world);
        assert_eq!(world.resource::<GameState>().phase, Phase::Running);
        assert!(world.resource::<ClearedRows>().rows.is_empty());
    }

    #[test]
    fn test_paint_system_marks_active_cells_unlocked() {
        let mut world = create_running_world();
        set_active(&mut world, o_at(3, 5));

        paint_system(&mut world);

        let grid = world.resource::<Grid>();
        assert_eq!(grid.cell(4, 6).piece, Some(PieceType::O));
        assert!(!grid.cell(4, 6).locked);
        assert_eq!(grid.cell(3, 6).piece, None);
    }
}
