#![warn(clippy::all, clippy::pedantic)]

// Playing field dimensions
pub const GRID_WIDTH: usize = 10;
pub const VISIBLE_HEIGHT: usize = 20;
pub const GRID_HEIGHT: usize = 22; // Two hidden rows above the visible field
pub const VISIBLE_ROW_OFFSET: usize = GRID_HEIGHT - VISIBLE_HEIGHT;

// Shape masks are 4x4
pub const MASK_SIZE: usize = 4;

// Number of upcoming pieces shown to the player
pub const QUEUE_LEN: usize = 3;

// Spawn origin (top-left of the 4x4 box)
pub const SPAWN_X: i32 = GRID_WIDTH as i32 / 2 - 2;
pub const SPAWN_Y: i32 = 0;

// Default timing, in moves per second
pub const INITIAL_DROP_RATE: f32 = 1.0;
pub const FAST_DROP_RATE: f32 = 20.0;
pub const SHIFT_RATE: f32 = 10.0;

// Rate progression
pub const LINES_PER_RATE_STEP: u32 = 10;
pub const RATE_STEP: f32 = 1.0;

// Wall kick nudges tried in order when a rotation does not fit: right, down, left, up
pub const KICK_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
