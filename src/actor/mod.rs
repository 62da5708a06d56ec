// Actorトレイトを実装する構造体のモジュール (プレイヤー, bot)
mod nop;
mod random;

pub use self::{nop::Nop, random::RandomAgent};

use crate::model::*;

// エージェント
// 状態機械から各状態のイベントを受け取り, 応答を返す.
// イベントは座席ごとに非公開情報が伏せられた複製であり, 共有状態への参照は渡らない.
// 応答は現在の状態に関係するものだけが消費される.
pub trait Actor: ActorClone + Send {
    // 対局開始時に自席が通知される
    fn init(&mut self, _seat: Seat) {}

    // イベントへの応答
    fn act(&mut self, event: &Event) -> Reply;

    fn name(&self) -> &str {
        "Actor"
    }
}

impl std::fmt::Debug for dyn Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Box<dyn Actor>の複製用
pub trait ActorClone {
    fn clone_box(&self) -> Box<dyn Actor>;
}

impl<T> ActorClone for T
where
    T: 'static + Actor + Clone,
{
    fn clone_box(&self) -> Box<dyn Actor> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Actor> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
