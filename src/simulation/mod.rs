pub mod season_generator;
