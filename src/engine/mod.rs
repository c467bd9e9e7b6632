pub mod board;
pub mod config;
pub mod link;
pub mod movement_tree;
pub mod planner;
pub mod strategy;
pub mod tictactoe;
