// 局の進行を制御するモジュール
mod engine;
mod wall;

pub use self::{
    engine::{Game, GameRecord, Phase},
    wall::{RandomSource, SeededSource, Wall, WallView},
};
