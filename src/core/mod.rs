pub mod game;
pub mod season;
pub mod source;
pub mod team;
