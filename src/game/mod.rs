pub mod direction;
pub mod game_state;
pub mod grid;
pub mod is_terminal;
pub mod merge;
pub mod palette;
pub mod spawn;
