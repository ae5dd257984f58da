/// Number of dice in a hand
pub const DICE_COUNT: usize = 5;

/// Number of faces on a die
pub const FACE_COUNT: usize = 6;

/// Balance granted when a session is created
pub const STARTING_BALANCE: u64 = 100;

/// Stake debited when a round starts
pub const BET: u64 = 10;

/// Period between re-samples while a roll is animating
pub const ROLL_TICK_MS: u64 = 100;

/// How long a roll animates before the dice freeze
pub const ROLL_DURATION_MS: u64 = 1_000;

/// Dice board: one column per die, one row per face (30 cells)
pub const BOARD_WIDTH: u32 = DICE_COUNT as u32;
pub const BOARD_HEIGHT: u32 = FACE_COUNT as u32;

/// Default Game of Life grid (36 cells)
pub const LIFE_WIDTH: u32 = 6;
pub const LIFE_HEIGHT: u32 = 6;

/// Cell states written to the board buffer
pub const CELL_OFF: u32 = 0;
pub const CELL_ON: u32 = 1;
pub const CELL_HELD: u32 = 2;
