use std::fmt;

use super::parse::{Set, SetKind, WinDecomp, WinForm};
use crate::model::*;

use SetKind::*;

// 特殊条件による役のフラグ (状況から決まり, 手牌の形とは独立)
#[derive(Debug, Default, Clone)]
pub struct YakuFlags {
    pub menzentsumo: bool,
    pub riichi: bool,
    pub double_riichi: bool,
    pub ippatsu: bool,
    pub haitei: bool,  // 海底摸月
    pub houtei: bool,  // 河底撈魚
    pub rinshan: bool, // 嶺上開花
    pub chankan: bool, // 槍槓
    pub tenho: bool,   // 天和
    pub chiho: bool,   // 地和
}

// 役判定に関係するルール設定の抜粋
#[derive(Debug, Clone, Copy)]
pub struct YakuOptions {
    pub kuitan: bool,
    pub double_yakuman: bool,
    pub yakuman_composition: bool,
}

impl From<&Rule> for YakuOptions {
    fn from(rule: &Rule) -> Self {
        Self {
            kuitan: rule.kuitan,
            double_yakuman: rule.double_yakuman,
            yakuman_composition: rule.yakuman_composition,
        }
    }
}

// 面子種別のカウント
#[derive(Debug, Default)]
struct SetCounts {
    shuntsu: usize,       // 門前の順子
    koutsu: usize,        // 門前の刻子
    ankan: usize,
    shuntsu_total: usize, // 順子 + チー
    koutsu_total: usize,  // 刻子 + ポン + 槓
    ankou_total: usize,   // 暗刻 (ロンで完成した刻子は明刻扱い)
    kantsu_total: usize,
    tis: [usize; TYPE],   // 種別ごとの面子数
    nis: [usize; TNUM],   // 数牌の数字ごとの面子数
}

// 和了形1通りに対する役判定コンテキスト
#[derive(Debug)]
pub struct YakuContext {
    counts: TileTable, // 純手牌 (和了牌を含む, 正規化済)
    decomp: WinDecomp,
    pair_tile: Tile,
    win_tile: Tile, // 正規化済
    is_drawn: bool,
    is_open: bool,
    prevalent_wind: Tnum,
    seat_wind: Tnum,
    flags: YakuFlags,
    opts: YakuOptions,
    cnt: SetCounts,
    iipeiko_count: usize,
    yakuhai: TileRow, // 役牌面子のカウント (雀頭は含まない)
}

impl YakuContext {
    pub fn new(
        counts: TileTable,
        decomp: WinDecomp,
        win_tile: Tile,
        prevalent_wind: Tnum,
        seat_wind: Tnum,
        is_drawn: bool,
        flags: YakuFlags,
        opts: YakuOptions,
    ) -> Self {
        let mut counts = counts;
        for row in &mut counts {
            row[0] = 0; // 赤5は通常5として扱う
        }
        let win_tile = win_tile.to_normal();
        let cnt = count_sets(&decomp, win_tile, is_drawn);
        let pair_tile = decomp
            .sets
            .iter()
            .find(|s| s.0 == Pair)
            .map(|s| s.1)
            .unwrap_or(Z8);
        let iipeiko_count = count_iipeiko(&decomp.sets);
        let yakuhai = count_yakuhai(&decomp.sets);
        let is_open = decomp.sets.iter().any(|s| matches!(s.0, Chi | Pon | Minkan));

        Self {
            counts,
            decomp,
            pair_tile,
            win_tile,
            is_drawn,
            is_open,
            prevalent_wind,
            seat_wind,
            flags,
            opts,
            cnt,
            iipeiko_count,
            yakuhai,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    // (役一覧, 飜数, 役満倍率)
    // 役満が成立している場合は役満のみを返し飜数は0.
    pub fn calc_yaku(&self) -> (Vec<&'static Yaku>, usize, usize) {
        let mut yaku = vec![];
        for y in YAKU_LIST {
            if (y.func)(self) {
                yaku.push(y);
            }
        }

        let yakuman: Vec<&Yaku> = yaku.iter().copied().filter(|y| y.han_close >= 13).collect();
        if !yakuman.is_empty() {
            let mut total = 0;
            let mut max = 0;
            for y in &yakuman {
                let mut m = y.han_close - 12;
                if !self.opts.double_yakuman {
                    m = 1;
                }
                total += m;
                max = max.max(m);
            }
            let multiple = if self.opts.yakuman_composition {
                total
            } else {
                max
            };
            (yakuman, 0, multiple)
        } else {
            let mut han = 0;
            for y in &yaku {
                han += if self.is_open { y.han_open } else { y.han_close };
            }
            (yaku, han, 0)
        }
    }

    // 符計算
    pub fn calc_fu(&self) -> usize {
        match self.decomp.form {
            WinForm::Chiitoi => return 25,
            WinForm::Kokushi => return 20,
            WinForm::Standard => {}
        }
        if is_pinfu(self) {
            return if self.is_drawn { 20 } else { 30 };
        }

        // 副底
        let mut fu = 20;

        // 和了り方
        fu += if self.is_drawn {
            2
        } else if !self.is_open {
            10
        } else {
            0
        };

        // 面子と雀頭
        for (i, &Set(kind, t)) in self.decomp.sets.iter().enumerate() {
            let minko = kind == Koutsu && i == self.decomp.win_set && !self.is_drawn;
            fu += match kind {
                Pair => {
                    let mut f = 0;
                    if t.is_dragon() {
                        f += 2;
                    }
                    if t.0 == TZ && t.1 == self.prevalent_wind {
                        f += 2;
                    }
                    if t.0 == TZ && t.1 == self.seat_wind {
                        f += 2;
                    }
                    f
                }
                Koutsu if minko => {
                    if t.is_end() {
                        4
                    } else {
                        2
                    }
                }
                Koutsu => {
                    if t.is_end() {
                        8
                    } else {
                        4
                    }
                }
                Pon => {
                    if t.is_end() {
                        4
                    } else {
                        2
                    }
                }
                Minkan => {
                    if t.is_end() {
                        16
                    } else {
                        8
                    }
                }
                Ankan => {
                    if t.is_end() {
                        32
                    } else {
                        16
                    }
                }
                _ => 0,
            };
        }

        // 待ちの形
        let Set(kind, base) = self.decomp.sets[self.decomp.win_set];
        let wt = self.win_tile;
        match kind {
            Pair => fu += 2, // タンキ待ち
            Shuntsu => {
                let kanchan = wt.1 == base.1 + 1;
                let penchan =
                    (base.1 == 1 && wt.1 == 3) || (base.1 == 7 && wt.1 == 7);
                if kanchan || penchan {
                    fu += 2;
                }
            }
            _ => {} // シャンポン待ち
        }

        let fu = (fu + 9) / 10 * 10;
        if fu == 20 {
            30 // 喰い平和形
        } else {
            fu
        }
    }
}

fn count_sets(decomp: &WinDecomp, win_tile: Tile, is_drawn: bool) -> SetCounts {
    let mut cnt = SetCounts::default();
    for (i, &Set(kind, t)) in decomp.sets.iter().enumerate() {
        match kind {
            Pair => {}
            Shuntsu => cnt.shuntsu += 1,
            Koutsu => cnt.koutsu += 1,
            Ankan => cnt.ankan += 1,
            _ => {}
        }
        match kind {
            Shuntsu | Chi => cnt.shuntsu_total += 1,
            Koutsu | Pon | Minkan | Ankan => cnt.koutsu_total += 1,
            Pair => {}
        }
        if matches!(kind, Minkan | Ankan) {
            cnt.kantsu_total += 1;
        }
        // ロンで完成した刻子は明刻扱い
        if (kind == Koutsu && !(i == decomp.win_set && !is_drawn)) || kind == Ankan {
            cnt.ankou_total += 1;
        }

        cnt.tis[t.0] += 1;
        if t.is_suit() {
            cnt.nis[t.1] += 1;
        }
    }
    cnt
}

fn count_iipeiko(sets: &[Set]) -> usize {
    let mut n = 0;
    let mut seen = TileTable::default();
    for &Set(kind, t) in sets {
        if kind == Shuntsu {
            seen[t.0][t.1] += 1;
            if seen[t.0][t.1] == 2 {
                n += 1;
            }
        }
    }
    n
}

fn count_yakuhai(sets: &[Set]) -> TileRow {
    let mut tr = TileRow::default();
    for &Set(kind, t) in sets {
        if matches!(kind, Koutsu | Pon | Minkan | Ankan) && t.is_honor() {
            tr[t.1] += 1;
        }
    }
    tr
}

pub struct Yaku {
    pub id: usize,                      // 役ID
    pub name: &'static str,             // 名称
    pub func: fn(&YakuContext) -> bool, // 判定関数
    pub han_close: usize,               // 門前の飜数 (13以上は役満)
    pub han_open: usize,                // 副露時の飜数 (食い下がり, 0は門前限定)
}

impl fmt::Debug for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.name, self.han_close, self.han_open)
    }
}

macro_rules! yaku {
    ($id: expr, $n: expr, $f: expr, $c: expr, $o: expr) => {
        Yaku {
            id: $id,
            name: $n,
            func: $f,
            han_close: $c,
            han_open: $o,
        }
    };
}

pub const YAKU_LIST: &[Yaku] = &[
    yaku!(11, "場風 東", is_bakaze_e, 1, 1),
    yaku!(11, "場風 南", is_bakaze_s, 1, 1),
    yaku!(11, "場風 西", is_bakaze_w, 1, 1),
    yaku!(11, "場風 北", is_bakaze_n, 1, 1),
    yaku!(10, "自風 東", is_jikaze_e, 1, 1),
    yaku!(10, "自風 南", is_jikaze_s, 1, 1),
    yaku!(10, "自風 西", is_jikaze_w, 1, 1),
    yaku!(10, "自風 北", is_jikaze_n, 1, 1),
    yaku!(7, "役牌 白", is_haku, 1, 1),
    yaku!(8, "役牌 發", is_hatsu, 1, 1),
    yaku!(9, "役牌 中", is_chun, 1, 1),
    yaku!(12, "断幺九", is_tanyao, 1, 1),
    yaku!(14, "平和", is_pinfu, 1, 0),
    yaku!(13, "一盃口", is_iipeiko, 1, 0),
    yaku!(28, "二盃口", is_ryanpeiko, 3, 0),
    yaku!(16, "一気通貫", is_ittsu, 2, 1),
    yaku!(17, "三色同順", is_sanshoku_doujun, 2, 1),
    yaku!(19, "三色同刻", is_sanshoku_doukou, 2, 2),
    yaku!(15, "混全帯幺九", is_chanta, 2, 1),
    yaku!(26, "純全帯幺九", is_junchan, 3, 2),
    yaku!(24, "混老頭", is_honroutou, 2, 2),
    yaku!(41, "清老頭", is_chinroutou, 13, 13),
    yaku!(21, "対々和", is_toitoi, 2, 2),
    yaku!(22, "三暗刻", is_sanankou, 2, 2),
    yaku!(38, "四暗刻", is_suuankou, 13, 0),
    yaku!(48, "四暗刻単騎", is_suuankou_tanki, 14, 0),
    yaku!(20, "三槓子", is_sankantsu, 2, 2),
    yaku!(44, "四槓子", is_suukantsu, 13, 13),
    yaku!(27, "混一色", is_honitsu, 3, 2),
    yaku!(29, "清一色", is_chinitsu, 6, 5),
    yaku!(23, "小三元", is_shousangen, 2, 2),
    yaku!(37, "大三元", is_daisangen, 13, 13),
    yaku!(43, "小四喜", is_shousuushii, 13, 13),
    yaku!(50, "大四喜", is_daisuushii, 14, 14),
    yaku!(40, "緑一色", is_ryuuiisou, 13, 13),
    yaku!(39, "字一色", is_tsuuiisou, 13, 13),
    yaku!(45, "九蓮宝燈", is_chuuren, 13, 0),
    yaku!(47, "純正九蓮宝燈", is_junsei_chuuren, 14, 0),
    yaku!(42, "国士無双", is_kokushi, 13, 0),
    yaku!(49, "国士無双１３面", is_kokushi_13, 14, 0),
    yaku!(25, "七対子", is_chiitoi, 2, 0),
    yaku!(1, "門前清自摸和", is_menzentsumo, 1, 0),
    yaku!(2, "立直", is_riichi, 1, 0),
    yaku!(18, "両立直", is_double_riichi, 2, 0),
    yaku!(30, "一発", is_ippatsu, 1, 0),
    yaku!(5, "海底摸月", is_haitei, 1, 1),
    yaku!(6, "河底撈魚", is_houtei, 1, 1),
    yaku!(4, "嶺上開花", is_rinshan, 1, 1),
    yaku!(3, "槍槓", is_chankan, 1, 1),
    yaku!(35, "天和", is_tenho, 13, 13),
    yaku!(36, "地和", is_chiho, 13, 13),
];

// [役の排他関係]
// * 役満が成立する場合, 役満以外はすべて無視される
// * 一盃口/二盃口, 混全/純全, 混老頭/清老頭, 混一色/清一色,
//   三暗刻/四暗刻/四暗刻単騎, 三槓子/四槓子, 小四喜/大四喜,
//   九蓮宝燈/純正九蓮宝燈, 国士無双/国士無双１３面 は判定条件が排他

// 場風
fn is_bakaze_e(ctx: &YakuContext) -> bool {
    ctx.prevalent_wind == WE && ctx.yakuhai[WE] >= 1
}
fn is_bakaze_s(ctx: &YakuContext) -> bool {
    ctx.prevalent_wind == WS && ctx.yakuhai[WS] >= 1
}
fn is_bakaze_w(ctx: &YakuContext) -> bool {
    ctx.prevalent_wind == WW && ctx.yakuhai[WW] >= 1
}
fn is_bakaze_n(ctx: &YakuContext) -> bool {
    ctx.prevalent_wind == WN && ctx.yakuhai[WN] >= 1
}

// 自風
fn is_jikaze_e(ctx: &YakuContext) -> bool {
    ctx.seat_wind == WE && ctx.yakuhai[WE] >= 1
}
fn is_jikaze_s(ctx: &YakuContext) -> bool {
    ctx.seat_wind == WS && ctx.yakuhai[WS] >= 1
}
fn is_jikaze_w(ctx: &YakuContext) -> bool {
    ctx.seat_wind == WW && ctx.yakuhai[WW] >= 1
}
fn is_jikaze_n(ctx: &YakuContext) -> bool {
    ctx.seat_wind == WN && ctx.yakuhai[WN] >= 1
}

// 三元牌
fn is_haku(ctx: &YakuContext) -> bool {
    ctx.yakuhai[DW] >= 1
}
fn is_hatsu(ctx: &YakuContext) -> bool {
    ctx.yakuhai[DG] >= 1
}
fn is_chun(ctx: &YakuContext) -> bool {
    ctx.yakuhai[DR] >= 1
}

// 断幺九 (喰いタンなしの場合は門前限定)
fn is_tanyao(ctx: &YakuContext) -> bool {
    if ctx.decomp.form == WinForm::Kokushi {
        return false;
    }
    if !ctx.opts.kuitan && ctx.is_open {
        return false;
    }

    for &Set(kind, t) in &ctx.decomp.sets {
        match kind {
            Shuntsu | Chi => {
                if t.1 == 1 || t.1 == 7 {
                    return false;
                }
            }
            _ => {
                if t.is_end() {
                    return false;
                }
            }
        }
    }
    !ctx.decomp.sets.is_empty()
}

// 平和
fn is_pinfu(ctx: &YakuContext) -> bool {
    if ctx.cnt.shuntsu != 4 || ctx.is_open {
        return false;
    }

    let pt = ctx.pair_tile;
    if pt.is_dragon() || (pt.0 == TZ && (pt.1 == ctx.prevalent_wind || pt.1 == ctx.seat_wind)) {
        return false;
    }

    // 両面待ちのみ
    let Set(kind, base) = ctx.decomp.sets[ctx.decomp.win_set];
    if kind != Shuntsu {
        return false;
    }
    let wt = ctx.win_tile;
    (wt.1 == base.1 && base.1 != 7) || (wt.1 == base.1 + 2 && wt.1 != 3)
}

// 一盃口
fn is_iipeiko(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeiko_count == 1
}

// 二盃口
fn is_ryanpeiko(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeiko_count == 2
}

// 一気通貫
fn is_ittsu(ctx: &YakuContext) -> bool {
    if ctx.cnt.shuntsu_total < 3 {
        return false;
    }
    let mut f147 = [[false; 3]; TYPE];
    for &Set(kind, t) in &ctx.decomp.sets {
        if matches!(kind, Shuntsu | Chi) && matches!(t.1, 1 | 4 | 7) {
            f147[t.0][t.1 / 3] = true;
        }
    }
    (0..TZ).any(|ti| f147[ti].iter().all(|&b| b))
}

// 三色同順
fn is_sanshoku_doujun(ctx: &YakuContext) -> bool {
    if ctx.cnt.shuntsu_total < 3 {
        return false;
    }
    for n in 1..=7 {
        let mut mps = [false; 3];
        for &Set(kind, t) in &ctx.decomp.sets {
            if matches!(kind, Shuntsu | Chi) && t.1 == n {
                mps[t.0] = true;
            }
        }
        if mps.iter().all(|&b| b) {
            return true;
        }
    }
    false
}

// 三色同刻
fn is_sanshoku_doukou(ctx: &YakuContext) -> bool {
    if ctx.cnt.koutsu_total < 3 {
        return false;
    }
    for n in 1..=9 {
        let mut mps = [false; 3];
        for &Set(kind, t) in &ctx.decomp.sets {
            if matches!(kind, Koutsu | Pon | Minkan | Ankan) && t.is_suit() && t.1 == n {
                mps[t.0] = true;
            }
        }
        if mps.iter().all(|&b| b) {
            return true;
        }
    }
    false
}

// 混全帯幺九
fn is_chanta(ctx: &YakuContext) -> bool {
    if ctx.cnt.shuntsu_total == 0 || ctx.decomp.sets.is_empty() {
        return false;
    }
    let mut has_honor = false;
    for &Set(kind, t) in &ctx.decomp.sets {
        match kind {
            Shuntsu | Chi => {
                if t.1 != 1 && t.1 != 7 {
                    return false;
                }
            }
            _ => {
                if t.is_honor() {
                    has_honor = true;
                } else if !t.is_terminal() {
                    return false;
                }
            }
        }
    }
    has_honor
}

// 純全帯幺九
fn is_junchan(ctx: &YakuContext) -> bool {
    if ctx.cnt.shuntsu_total == 0 || ctx.decomp.sets.is_empty() {
        return false;
    }
    for &Set(kind, t) in &ctx.decomp.sets {
        match kind {
            Shuntsu | Chi => {
                if t.1 != 1 && t.1 != 7 {
                    return false;
                }
            }
            _ => {
                if !t.is_terminal() {
                    return false;
                }
            }
        }
    }
    true
}

// 混老頭
fn is_honroutou(ctx: &YakuContext) -> bool {
    if ctx.cnt.shuntsu_total != 0 || ctx.decomp.sets.is_empty() {
        return false;
    }
    let mut has_honor = false;
    let mut has_terminal = false;
    for &Set(_, t) in &ctx.decomp.sets {
        if t.is_honor() {
            has_honor = true;
        } else if t.is_terminal() {
            has_terminal = true;
        } else {
            return false;
        }
    }
    has_honor && has_terminal
}

// 清老頭
fn is_chinroutou(ctx: &YakuContext) -> bool {
    if ctx.cnt.shuntsu_total != 0 || ctx.decomp.sets.is_empty() {
        return false;
    }
    ctx.decomp.sets.iter().all(|&Set(_, t)| t.is_terminal())
}

// 対々和
fn is_toitoi(ctx: &YakuContext) -> bool {
    ctx.cnt.koutsu_total == 4
}

// 三暗刻
fn is_sanankou(ctx: &YakuContext) -> bool {
    ctx.cnt.ankou_total == 3
}

// 四暗刻 (ツモまたは単騎以外のロンでは成立しない)
fn is_suuankou(ctx: &YakuContext) -> bool {
    ctx.cnt.ankou_total == 4 && ctx.decomp.sets[ctx.decomp.win_set].0 != Pair
}

// 四暗刻単騎
fn is_suuankou_tanki(ctx: &YakuContext) -> bool {
    ctx.cnt.ankou_total == 4 && ctx.decomp.sets[ctx.decomp.win_set].0 == Pair
}

// 三槓子
fn is_sankantsu(ctx: &YakuContext) -> bool {
    ctx.cnt.kantsu_total == 3
}

// 四槓子
fn is_suukantsu(ctx: &YakuContext) -> bool {
    ctx.cnt.kantsu_total == 4
}

// 混一色
fn is_honitsu(ctx: &YakuContext) -> bool {
    let tis = &ctx.cnt.tis;
    let suits = (0..TZ).filter(|&ti| tis[ti] > 0).count();
    !ctx.decomp.sets.is_empty() && suits == 1 && tis[TZ] > 0
}

// 清一色
fn is_chinitsu(ctx: &YakuContext) -> bool {
    let tis = &ctx.cnt.tis;
    let suits = (0..TZ).filter(|&ti| tis[ti] > 0).count();
    !ctx.decomp.sets.is_empty() && suits == 1 && tis[TZ] == 0
}

// 小三元
fn is_shousangen(ctx: &YakuContext) -> bool {
    let y = &ctx.yakuhai;
    y[DW] + y[DG] + y[DR] == 2 && ctx.pair_tile.is_dragon()
}

// 大三元
fn is_daisangen(ctx: &YakuContext) -> bool {
    let y = &ctx.yakuhai;
    y[DW] + y[DG] + y[DR] == 3
}

// 小四喜
fn is_shousuushii(ctx: &YakuContext) -> bool {
    let y = &ctx.yakuhai;
    y[WE] + y[WS] + y[WW] + y[WN] == 3 && ctx.pair_tile.is_wind()
}

// 大四喜
fn is_daisuushii(ctx: &YakuContext) -> bool {
    let y = &ctx.yakuhai;
    y[WE] + y[WS] + y[WW] + y[WN] == 4
}

// 緑一色
fn is_ryuuiisou(ctx: &YakuContext) -> bool {
    if ctx.decomp.sets.is_empty() {
        return false;
    }
    for &Set(kind, t) in &ctx.decomp.sets {
        match kind {
            Shuntsu | Chi => {
                if t.0 != TS || t.1 != 2 {
                    return false; // 順子は索子の234のみ
                }
            }
            _ => {
                if t.is_honor() {
                    if t.1 != DG {
                        return false;
                    }
                } else if t.0 != TS || !matches!(t.1, 2 | 3 | 4 | 6 | 8) {
                    return false;
                }
            }
        }
    }
    true
}

// 字一色
fn is_tsuuiisou(ctx: &YakuContext) -> bool {
    let n = ctx.decomp.sets.len();
    (n == 5 || n == 7) && ctx.decomp.sets.iter().all(|s| s.1.is_honor())
}

// 九蓮宝燈 (和了牌を抜いた形が1112345678999+1枚)
fn is_chuuren(ctx: &YakuContext) -> bool {
    let wt = ctx.win_tile;
    is_chuuren_shape(ctx) && matches!(ctx.counts[wt.0][wt.1], 1 | 3)
}

// 純正九蓮宝燈 (和了前が1112345678999の9面待ち)
fn is_junsei_chuuren(ctx: &YakuContext) -> bool {
    let wt = ctx.win_tile;
    is_chuuren_shape(ctx) && matches!(ctx.counts[wt.0][wt.1], 2 | 4)
}

fn is_chuuren_shape(ctx: &YakuContext) -> bool {
    // 副露(暗槓を含む)のない4面子1雀頭のみ
    if ctx.decomp.form != WinForm::Standard {
        return false;
    }
    if !ctx
        .decomp
        .sets
        .iter()
        .all(|s| matches!(s.0, Pair | Shuntsu | Koutsu))
    {
        return false;
    }

    let ti = match (0..TZ).find(|&ti| ctx.cnt.tis[ti] == 5) {
        Some(ti) => ti,
        None => return false,
    };
    let row = &ctx.counts[ti];
    if row[1] < 3 || row[9] < 3 {
        return false;
    }
    (2..9).all(|ni| row[ni] >= 1)
}

// 国士無双
fn is_kokushi(ctx: &YakuContext) -> bool {
    ctx.decomp.form == WinForm::Kokushi && ctx.counts[ctx.win_tile.0][ctx.win_tile.1] != 2
}

// 国士無双十三面待ち
fn is_kokushi_13(ctx: &YakuContext) -> bool {
    ctx.decomp.form == WinForm::Kokushi && ctx.counts[ctx.win_tile.0][ctx.win_tile.1] == 2
}

// 七対子
fn is_chiitoi(ctx: &YakuContext) -> bool {
    ctx.decomp.form == WinForm::Chiitoi
}

// 特殊条件の役
fn is_menzentsumo(ctx: &YakuContext) -> bool {
    ctx.flags.menzentsumo
}
fn is_riichi(ctx: &YakuContext) -> bool {
    ctx.flags.riichi && !ctx.flags.double_riichi
}
fn is_double_riichi(ctx: &YakuContext) -> bool {
    ctx.flags.double_riichi
}
fn is_ippatsu(ctx: &YakuContext) -> bool {
    ctx.flags.ippatsu
}
fn is_haitei(ctx: &YakuContext) -> bool {
    ctx.flags.haitei
}
fn is_houtei(ctx: &YakuContext) -> bool {
    ctx.flags.houtei
}
fn is_rinshan(ctx: &YakuContext) -> bool {
    ctx.flags.rinshan
}
fn is_chankan(ctx: &YakuContext) -> bool {
    ctx.flags.chankan
}
fn is_tenho(ctx: &YakuContext) -> bool {
    ctx.flags.tenho
}
fn is_chiho(ctx: &YakuContext) -> bool {
    ctx.flags.chiho
}
