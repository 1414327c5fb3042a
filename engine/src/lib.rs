pub mod card;
pub mod constants;
pub mod deck;
pub mod error;
pub mod game;
pub mod player;
pub mod random;
pub mod round;
pub mod snapshot;
pub mod turn;
