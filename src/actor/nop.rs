use super::*;

// 常に応答しないエージェント
// 打牌要求は状態機械側のデフォルト(ツモ切り)で処理される.
#[derive(Clone, Default)]
pub struct Nop;

impl Actor for Nop {
    fn act(&mut self, _event: &Event) -> Reply {
        Reply::None
    }

    fn name(&self) -> &str {
        "Nop"
    }
}
