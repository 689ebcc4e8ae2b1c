mod player;
mod rank;
pub mod raw;

pub use player::*;
pub use rank::*;
