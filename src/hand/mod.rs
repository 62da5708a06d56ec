// 手牌の解析と点数計算を行うモジュール
mod evaluate;
mod parse;
mod point;
mod shanten;
mod win;
mod yaku;

pub use self::{
    evaluate::{count_dora, create_dora_table, evaluate_hand},
    parse::{is_kokushi_win, win_decompositions, Set, SetKind, WinDecomp, WinForm},
    point::{calc_points, win_score},
    shanten::{shanten, shanten_chiitoi, shanten_kokushi, shanten_standard, waits},
    win::{is_agari, is_tenpai, tenpai_discards, winning_tiles},
    yaku::{Yaku as YakuDefine, YakuContext, YakuFlags, YakuOptions, YAKU_LIST},
};
