use crate::model::*;
use crate::util::misc::cartesian_product;

use SetKind::*;

// 和了形を構成する面子・雀頭の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetKind {
    Pair,    // 雀頭
    Shuntsu, // 順子 (門前)
    Koutsu,  // 刻子 (門前)
    Chi,     // チー
    Pon,     // ポン
    Minkan,  // 明槓 (大明槓 + 加槓)
    Ankan,   // 暗槓
}

// 面子1つ. 順子・チーの場合は先頭の牌. 牌は正規化済 (赤5は5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Set(pub SetKind, pub Tile);

impl Set {
    // 和了牌を含みうるか (純手牌から構成された面子のみ)
    fn holds(&self, t: Tile) -> bool {
        let Set(kind, base) = *self;
        match kind {
            Shuntsu => base.0 == t.0 && base.1 <= t.1 && t.1 <= base.1 + 2,
            Koutsu | Pair => base == t,
            _ => false,
        }
    }

    #[inline]
    pub fn is_closed_triplet(&self) -> bool {
        matches!(self.0, Koutsu | Ankan)
    }
}

// 和了形の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinForm {
    Standard, // 4面子1雀頭
    Chiitoi,  // 七対子
    Kokushi,  // 国士無双
}

// 和了形1通り
// win_setは和了牌が完成させた面子の位置 (国士は常に0で未使用)
#[derive(Debug, Clone)]
pub struct WinDecomp {
    pub sets: Vec<Set>,
    pub win_set: usize,
    pub form: WinForm,
}

// 赤5の重複カウントを除いた正規化テーブル
fn normalize(counts: &TileTable) -> TileTable {
    let mut tt = *counts;
    for row in &mut tt {
        row[0] = 0;
    }
    tt
}

// [完成形判定]

// 各牌種の枚数を3で割った余りと, 余り別の牌種数
fn row_mods(tt: &TileTable) -> ([usize; TYPE], [usize; 3]) {
    let mut mods = [0; TYPE];
    for ti in 0..TYPE {
        mods[ti] = tt[ti][1..].iter().sum::<usize>() % 3;
    }
    let mut cnts = [0; 3];
    for ti in 0..TYPE {
        cnts[mods[ti]] += 1;
    }
    (mods, cnts)
}

// 行が面子のみで構成されているか
fn is_sets(row: &TileRow, ti: Type) -> bool {
    let (mut n0, mut n1);
    n0 = row[1];
    n1 = row[2];
    for i in 1..8 {
        let n2 = row[i + 2];
        let n = n0 % 3;
        if (ti == TZ && n != 0) || n1 < n || n2 < n {
            return false;
        }
        n0 = n1 - n;
        n1 = n2 - n;
    }
    n0 % 3 == 0 && n1 % 3 == 0
}

// 行が面子+雀頭で構成されている場合の雀頭候補
// 面子の数字和は3の倍数なので余りから候補を絞れる
fn pair_candidates(row: &TileRow, ti: Type) -> Vec<Tnum> {
    let mut sum = 0;
    for i in 1..TNUM {
        sum += i * row[i];
    }
    let mut res = vec![];
    let mut row = *row;
    for i in 1..4 {
        let ni = 3 * i - sum % 3;
        if ni > 9 || row[ni] < 2 {
            continue;
        }
        row[ni] -= 2;
        if is_sets(&row, ti) {
            res.push(ni);
        }
        row[ni] += 2;
    }
    res
}

// 純手牌が4面子1雀頭(副露を除く)で完成している場合の雀頭リスト
fn possible_pairs(tt: &TileTable) -> Vec<Tile> {
    let (mods, cnts) = row_mods(tt);
    if cnts[1] != 0 || cnts[2] != 1 {
        return vec![];
    }

    let mut res = vec![];
    for ti in 0..TYPE {
        if mods[ti] == 2 {
            let pairs = pair_candidates(&tt[ti], ti);
            if pairs.is_empty() {
                return vec![];
            }
            res = pairs.iter().map(|&ni| Tile(ti, ni)).collect();
        } else if !is_sets(&tt[ti], ti) {
            return vec![];
        }
    }
    res
}

// [分解]

// 行を順子と刻子に分解
// 三連刻は刻子3つと順子3つの2通りの分割を返す (四連刻は分割の形に影響しない)
fn split_row(row: &TileRow, ti: Type) -> Vec<Vec<Set>> {
    let mut sets = vec![];
    let (mut n0, mut n1);
    n0 = row[1];
    n1 = row[2];
    for i in 1..8 {
        let n2 = row[i + 2];
        if n0 >= 3 {
            sets.push(Set(Koutsu, Tile(ti, i)));
        }
        let n = n0 % 3;
        for _ in 0..n {
            sets.push(Set(Shuntsu, Tile(ti, i)));
        }
        n0 = n1 - n;
        n1 = n2 - n;
    }
    if n0 >= 3 {
        sets.push(Set(Koutsu, Tile(ti, 8)));
    }
    if n1 >= 3 {
        sets.push(Set(Koutsu, Tile(ti, 9)));
    }

    if ti == TZ || sets.len() < 3 {
        return vec![sets];
    }

    // 三連刻チェック
    let (mut start, mut run) = (0, 0);
    for &Set(kind, t) in &sets {
        if kind == Koutsu {
            if start + run == t.1 {
                run += 1;
                if run == 3 {
                    break;
                }
            } else {
                start = t.1;
                run = 1;
            }
        }
    }
    if run != 3 {
        return vec![sets];
    }

    // 刻子3連続を順子3つに読み替えた分割
    let mut alt = vec![];
    for &s in &sets {
        let Set(kind, t) = s;
        if kind == Koutsu && start <= t.1 && t.1 < start + 3 {
            continue;
        }
        alt.push(s);
    }
    for _ in 0..3 {
        alt.push(Set(Shuntsu, Tile(ti, start)));
    }

    vec![sets, alt]
}

// 純手牌(和了牌を含む14-3n枚)の4面子1雀頭分解をすべて列挙
fn parse_standard(tt: &TileTable) -> Vec<Vec<Set>> {
    let pairs = possible_pairs(tt);
    if pairs.is_empty() {
        return vec![];
    }

    let pair_ti = pairs[0].0;
    let mut splits_list = vec![];

    // 雀頭を含む行: 雀頭候補ごとに残りを分解
    let mut with_pair = vec![];
    let mut row = tt[pair_ti];
    for pair in pairs {
        row[pair.1] -= 2;
        let mut splits = split_row(&row, pair_ti);
        row[pair.1] += 2;
        for sp in &mut splits {
            sp.push(Set(Pair, pair));
        }
        with_pair.append(&mut splits);
    }
    splits_list.push(with_pair);

    // 雀頭を含まない行
    for ti in 0..TYPE {
        if ti != pair_ti {
            splits_list.push(split_row(&tt[ti], ti));
        }
    }

    // 各行の分割の直積
    let mut res = vec![];
    for combo in cartesian_product(&splits_list) {
        let mut sets: Vec<Set> = vec![];
        for part in combo {
            sets.extend(part.iter().copied());
        }
        res.push(sets);
    }
    res
}

// 七対子分解 (副露なしの場合のみ)
fn parse_chiitoi(tt: &TileTable) -> Option<Vec<Set>> {
    let mut sets = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            match tt[ti][ni] {
                0 => {}
                2 => sets.push(Set(Pair, Tile(ti, ni))),
                _ => return None,
            }
        }
    }
    if sets.len() == 7 {
        Some(sets)
    } else {
        None
    }
}

// 国士無双判定
pub fn is_kokushi_win(tt: &TileTable) -> bool {
    let mut total = 0;
    for ti in 0..TZ {
        if tt[ti][1] == 0 || tt[ti][9] == 0 {
            return false;
        }
        for ni in 2..9 {
            if tt[ti][ni] != 0 {
                return false;
            }
        }
        total += tt[ti][1] + tt[ti][9];
    }
    for ni in WE..=DR {
        if tt[TZ][ni] == 0 {
            return false;
        }
        total += tt[TZ][ni];
    }
    total == 14
}

// 副露をSetに変換
fn meld_sets(melds: &[Meld]) -> Vec<Set> {
    melds
        .iter()
        .map(|m| {
            let t = Tile(m.tile_type, m.min_num());
            match m.meld_type {
                MeldType::Chi => Set(Chi, t),
                MeldType::Pon => Set(Pon, Tile(m.tile_type, m.num())),
                MeldType::Minkan | MeldType::Kakan => Set(Minkan, Tile(m.tile_type, m.num())),
                MeldType::Ankan => Set(Ankan, Tile(m.tile_type, m.num())),
            }
        })
        .collect()
}

// 和了形の全列挙
// countsは和了牌を含む純手牌. 和了牌の所属先ごとに別の分解として展開する.
pub fn win_decompositions(counts: &TileTable, melds: &[Meld], win_tile: Tile) -> Vec<WinDecomp> {
    let tt = normalize(counts);
    let wt = win_tile.to_normal();
    let mut res = vec![];

    for sets in parse_standard(&tt) {
        let mut sets = sets;
        sets.extend(meld_sets(melds));
        if sets.len() != 5 {
            continue;
        }

        // 和了牌の所属する面子ごとに分解を分岐 (同一形はまとめる)
        let mut seen: Vec<Set> = vec![];
        for i in 0..sets.len() {
            if !sets[i].holds(wt) || seen.contains(&sets[i]) {
                continue;
            }
            seen.push(sets[i]);
            res.push(WinDecomp {
                sets: sets.clone(),
                win_set: i,
                form: WinForm::Standard,
            });
        }
    }

    if melds.is_empty() {
        if let Some(sets) = parse_chiitoi(&tt) {
            let win_set = sets.iter().position(|s| s.1 == wt).unwrap_or(0);
            res.push(WinDecomp {
                sets,
                win_set,
                form: WinForm::Chiitoi,
            });
        }
        if is_kokushi_win(&tt) {
            res.push(WinDecomp {
                sets: vec![],
                win_set: 0,
                form: WinForm::Kokushi,
            });
        }
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decomps(closed: &str, melds: &[&str], win: &str) -> Vec<WinDecomp> {
        let tiles = tiles_from_str(closed).unwrap();
        let counts = tiles_to_table(&tiles).unwrap();
        let melds: Vec<Meld> = melds.iter().map(|m| Meld::parse(m).unwrap()).collect();
        win_decompositions(&counts, &melds, Tile::parse(win).unwrap())
    }

    #[test]
    fn test_standard_decomposition() {
        // 平和形: 和了牌m1は123の順子にのみ所属
        let v = decomps("m123456p234s56788", &[], "m1");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].sets.len(), 5);
        assert_eq!(v[0].sets[v[0].win_set], Set(Shuntsu, Tile(TM, 1)));

        // 刻子を完成させる和了
        let v = decomps("m123456p234s55888", &[], "s8");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].sets[v[0].win_set], Set(Koutsu, Tile(TS, 8)));
    }

    #[test]
    fn test_multiple_placements() {
        // m5は順子345と雀頭55のどちらにも所属しうる
        let v = decomps("m34555p123s123456", &[], "m5");
        assert_eq!(v.len(), 2);
        let kinds: Vec<SetKind> = v.iter().map(|d| d.sets[d.win_set].0).collect();
        assert!(kinds.contains(&Shuntsu));
        assert!(kinds.contains(&Pair));
    }

    #[test]
    fn test_sanrenkou_split() {
        // 二盃口にも対々和にも取れる形
        let v = decomps("m11122233344455", &[], "m5");
        assert!(!v.is_empty());
        let has_shuntsu = v
            .iter()
            .any(|d| d.sets.iter().any(|s| s.0 == Shuntsu));
        let has_koutsu = v
            .iter()
            .any(|d| d.sets.iter().filter(|s| s.0 == Koutsu).count() >= 4);
        assert!(has_shuntsu && has_koutsu);
    }

    #[test]
    fn test_chiitoi_kokushi() {
        let v = decomps("m1122334455z1177", &[], "z7");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].form, WinForm::Chiitoi);
        assert_eq!(v[0].sets[v[0].win_set], Set(Pair, Tile(TZ, 7)));

        let v = decomps("m19p19s19z12345677", &[], "z7");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].form, WinForm::Kokushi);

        // 副露があると七対子・国士は不成立
        let v = decomps("m1122334455z77", &["z111="], "z7");
        assert!(v.is_empty());
    }

    #[test]
    fn test_nine_gates_shape() {
        // 九蓮宝燈形は通常の4面子1雀頭として分解される
        let v = decomps("m11123456789999", &[], "m9");
        assert!(!v.is_empty());
        for d in &v {
            assert_eq!(d.form, WinForm::Standard);
        }
    }

    #[test]
    fn test_meld_merge() {
        let v = decomps("m123p456s789z11", &["z222="], "z1");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].sets.len(), 5);
        assert!(v[0].sets.iter().any(|s| *s == Set(Pon, Tile(TZ, 2))));
        assert_eq!(v[0].sets[v[0].win_set], Set(Pair, Tile(TZ, 1)));
    }
}
