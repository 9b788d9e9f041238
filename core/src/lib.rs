pub mod game_state;
pub mod grid;
pub mod layout;
pub mod perft;
pub mod rules;
pub mod types;

pub use game_state::*;
pub use grid::Grid;
pub use layout::{layouts, Layout, LayoutError};
pub use perft::{perft, perft_detailed, perft_divide, PerftResults};
pub use types::*;
