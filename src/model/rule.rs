use super::*;

// ゲーム設定
// 列挙値の意味はコメントの通り. デフォルトは一般的な四人東南戦.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub origin_points: Score,        // 配給原点
    pub rank_points: [f64; SEAT],    // 順位点 (1000点単位)
    pub red_fives: [usize; 3],       // 赤5の枚数 (萬・筒・索)
    pub kuitan: bool,                // 喰いタンあり
    pub kuikae_level: usize,         // 0: 喰い替えなし, 1: スジ喰い替えあり, 2: 現物喰い替えもあり
    pub game_count: usize,           // 0: 一局, 1: 東風, 2: 東南, 4: 一荘
    pub interrupted_draws: bool,     // 途中流局あり (四風連打,四開槓,四家立直,九種九牌)
    pub nagashi_mangan: bool,        // 流し満貫あり
    pub noten_declaration: bool,     // ノーテン宣言あり
    pub noten_penalty: bool,         // ノーテン罰符あり
    pub max_simultaneous_win: usize, // 最大同時和了数 (1: 頭ハネ, 2: ダブロンまで, 3: トリロンまで)
    pub consecutive_mode: usize,     // 連荘方式 (0: なし, 1: 和了連荘, 2: テンパイ連荘, 3: ノーテン連荘)
    pub bust_ends_game: bool,        // トビ終了あり
    pub oralas_stop: bool,           // オーラス止めあり
    pub extension_mode: usize,       // 延長戦方式 (0: なし, 1: サドンデス, 2: 連荘優先サドンデス, 3: 4局固定)
    pub ippatsu: bool,               // 一発あり
    pub ura_dora: bool,              // 裏ドラあり
    pub kan_dora: bool,              // カンドラあり
    pub kan_ura: bool,               // カン裏あり
    pub kan_dora_delayed: bool,      // カンドラ後乗せ (明槓・加槓の打牌後にめくる)
    pub riichi_without_tsumo: bool,  // ツモ番なしリーチあり
    pub ankan_after_riichi_level: usize, // リーチ後暗槓許可レベル (0: なし, 1: 牌姿不変, 2: 待ち不変)
    pub yakuman_composition: bool,   // 役満の複合あり
    pub double_yakuman: bool,        // ダブル役満あり
    pub counted_yakuman: bool,       // 数え役満あり
    pub yakuman_pao: bool,           // 役満の包あり
    pub round_up_mangan: bool,       // 切り上げ満貫あり
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            origin_points: 25000,
            rank_points: [20.0, 10.0, -10.0, -20.0],
            red_fives: [1, 1, 1],
            kuitan: true,
            kuikae_level: 0,
            game_count: 2,
            interrupted_draws: true,
            nagashi_mangan: true,
            noten_declaration: false,
            noten_penalty: true,
            max_simultaneous_win: 2,
            consecutive_mode: 2,
            bust_ends_game: true,
            oralas_stop: true,
            extension_mode: 1,
            ippatsu: true,
            ura_dora: true,
            kan_dora: true,
            kan_ura: true,
            kan_dora_delayed: true,
            riichi_without_tsumo: false,
            ankan_after_riichi_level: 2,
            yakuman_composition: true,
            double_yakuman: true,
            counted_yakuman: true,
            yakuman_pao: true,
            round_up_mangan: false,
        }
    }
}

impl Rule {
    // game_countに対応する最終の場 (東:0, 南:1, 西:2, 北:3)
    pub fn last_round(&self) -> usize {
        match self.game_count {
            0 | 1 => 0,
            2 => 1,
            _ => 3,
        }
    }
}

#[test]
fn test_rule_default() {
    let rule = Rule::default();
    assert_eq!(rule.origin_points, 25000);
    assert_eq!(rule.red_fives, [1, 1, 1]);
    assert_eq!(rule.max_simultaneous_win, 2);
    assert_eq!(rule.last_round(), 1);

    // serdeの部分指定でデフォルトが補完される
    let rule: Rule = serde_json::from_str(r#"{"game_count": 1}"#).unwrap();
    assert_eq!(rule.game_count, 1);
    assert!(rule.kuitan);
}
