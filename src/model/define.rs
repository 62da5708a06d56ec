use std::fmt;

// 型エイリアス
pub type Seat = usize; // 座席 (0:東家スタート, 反時計回り)
pub type Type = usize; // 牌の種別部分 (萬子,筒子,索子,字牌)
pub type Tnum = usize; // 牌の数字部分 (1~9, 0:赤5 の10種)
pub type Index = usize; // その他Index
pub type Score = i32; // 持ち点
pub type Point = i32; // 点数変動

// Number
pub const SEAT: usize = 4; // 座席の数
pub const TYPE: usize = 4; // 牌の種別部分の数
pub const TNUM: usize = 10; // 牌の数字部分の数
pub const TILE: usize = 4; // 同種の牌の数

// Type Index
pub const TM: usize = 0; // Type: Manzu (萬子)
pub const TP: usize = 1; // Type: Pinzu (筒子)
pub const TS: usize = 2; // Type: Souzu (索子)
pub const TZ: usize = 3; // Type: Zihai (字牌)

// Tnum Index
pub const WE: usize = 1; // Wind:    East  (東)
pub const WS: usize = 2; // Wind:    South (南)
pub const WW: usize = 3; // Wind:    West  (西)
pub const WN: usize = 4; // Wind:    North (北)
pub const DW: usize = 5; // Doragon: White (白)
pub const DG: usize = 6; // Doragon: Green (發)
pub const DR: usize = 7; // Doragon: Red   (中)
pub const UK: usize = 8; // 伏せ牌 ("_")

// [EngineError]
// 牌・面子・手牌の各レイヤーは同期的にエラーを発生させる
// 状態機械は不正な応答を「応答なし」として扱い, 内部不変条件の違反のみを致命的とみなす
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    InvalidNotation(String),    // 牌・面子表記の構文エラー
    InvariantViolation(String), // 牌数の超過など内部不変条件の違反
    IllegalAction(String),      // 現在の状態で許可されていない操作
    InvalidReply(String),       // 合法手に含まれない応答
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNotation(m) => write!(f, "invalid notation: {}", m),
            Self::InvariantViolation(m) => write!(f, "invariant violation: {}", m),
            Self::IllegalAction(m) => write!(f, "illegal action: {}", m),
            Self::InvalidReply(m) => write!(f, "invalid reply: {}", m),
        }
    }
}

impl std::error::Error for EngineError {}

pub type Res<T = ()> = Result<T, EngineError>;

#[inline]
pub fn err_notation<T>(m: impl fmt::Display) -> Res<T> {
    Err(EngineError::InvalidNotation(m.to_string()))
}

#[inline]
pub fn err_invariant<T>(m: impl fmt::Display) -> Res<T> {
    Err(EngineError::InvariantViolation(m.to_string()))
}

#[inline]
pub fn err_action<T>(m: impl fmt::Display) -> Res<T> {
    Err(EngineError::IllegalAction(m.to_string()))
}
