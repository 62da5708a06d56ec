use super::*;

// (ロンの支払い, ツモ・子の支払い, ツモ・親の支払い)
pub type Points = (Point, Point, Point);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Yaku {
    pub name: String,
    pub han: usize,
}

// 手役評価の結果
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScoreContext {
    pub yakus: Vec<Yaku>, // 役一覧 (ドラを含む)
    pub fu: usize,        // 符数
    pub han: usize,       // 飜数 (ドラを含む), 役満の場合は0
    pub yakuman: usize,   // 役満倍率 (0: 通常役, 1: 役満, 2: 二倍役満, ...)
    pub score: Score,     // 和了得点 (本場・供託を含まない)
    pub points: Points,   // 支払い得点の内訳
    pub title: String,    // 満貫, 跳満, ...
}

// 和了情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinContext {
    pub seat: Seat,                  // 和了者
    pub hand: String,                // 手牌表記 (和了牌・副露を含む)
    pub winning_tile: Tile,          // 和了牌
    pub is_dealer: bool,             // 親番フラグ
    pub is_drawn: bool,              // ツモフラグ
    pub is_riichi: bool,             // 立直フラグ
    pub pao: Option<Seat>,           // 責任払いの対象
    pub delta_scores: [Point; SEAT], // この和了による点数変動
    pub score_context: ScoreContext,
}
