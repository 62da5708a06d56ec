use crate::model::*;

// シャンテン数計算
// 一般形・七対子・国士無双の3形式の最小値を返す. -1は和了形.

// (面子, 塔子, 孤立牌)
type Block = [isize; 3];

// 面子・塔子・孤立牌の数から一般形のシャンテン数を算出
// あふれた分は面子→塔子→孤立牌の順に押し出して切り詰める
fn formula(mut m: isize, mut d: isize, mut g: isize, pair: bool) -> isize {
    let n = if pair { 4 } else { 5 };
    if m > 4 {
        d += m - 4;
        m = 4;
    }
    if m + d > 4 {
        g += m + d - 4;
        d = 4 - m;
    }
    if m + d + g > n {
        g = n - m - d;
    }
    if pair {
        d += 1;
    }
    13 - m * 3 - d * 2 - g
}

// 数牌1行を塔子と孤立牌のみに分解 (位置nから先に面子を取らない場合の評価)
fn count_partials(row: &TileRow) -> Block {
    let mut n_pai = 0;
    let mut n_dazi = 0;
    let mut n_guli = 0;
    for n in 1..=9 {
        n_pai += row[n] as isize;
        if n <= 7 && row[n + 1] == 0 && row[n + 2] == 0 {
            n_dazi += n_pai / 2;
            n_guli += n_pai % 2;
            n_pai = 0;
        }
    }
    n_dazi += n_pai / 2;
    n_guli += n_pai % 2;
    [0, n_dazi, n_guli]
}

// 数牌1行の分解候補
// a: 孤立牌(次いで塔子)を最小化する分解, b: 面子(次いで塔子)を最大化する分解
struct RowCand {
    a: Block,
    b: Block,
}

fn decompose_row(row: &mut TileRow, n: usize) -> RowCand {
    if n > 9 {
        let base = count_partials(row);
        return RowCand { a: base, b: base };
    }

    let mut max = decompose_row(row, n + 1);

    // 順子を取り出す
    if n <= 7 && row[n] > 0 && row[n + 1] > 0 && row[n + 2] > 0 {
        row[n] -= 1;
        row[n + 1] -= 1;
        row[n + 2] -= 1;
        let mut r = decompose_row(row, n);
        row[n] += 1;
        row[n + 1] += 1;
        row[n + 2] += 1;
        r.a[0] += 1;
        r.b[0] += 1;
        merge(&mut max, &r);
    }

    // 刻子を取り出す
    if row[n] >= 3 {
        row[n] -= 3;
        let mut r = decompose_row(row, n);
        row[n] += 3;
        r.a[0] += 1;
        r.b[0] += 1;
        merge(&mut max, &r);
    }

    max
}

fn merge(max: &mut RowCand, r: &RowCand) {
    if r.a[2] < max.a[2] || (r.a[2] == max.a[2] && r.a[1] < max.a[1]) {
        max.a = r.a;
    }
    if r.b[0] > max.b[0] || (r.b[0] == max.b[0] && r.b[1] > max.b[1]) {
        max.b = r.b;
    }
}

// 字牌行の寄与 (刻子は面子, 対子は塔子, 1枚は孤立牌)
fn honor_block(row: &TileRow) -> Block {
    let mut z = [0; 3];
    for n in WE..=DR {
        match row[n] {
            0 => {}
            1 => z[2] += 1,
            2 => z[1] += 1,
            _ => z[0] += 1,
        }
    }
    z
}

// 雀頭を固定した場合の一般形シャンテン数
fn standard_with_pair(counts: &TileTable, n_melds: usize, pair: bool) -> isize {
    let mut rows = *counts;
    let z = honor_block(&rows[TZ]);
    let m = decompose_row(&mut rows[TM], 1);
    let p = decompose_row(&mut rows[TP], 1);
    let s = decompose_row(&mut rows[TS], 1);

    let mut min = 13;
    for mm in [&m.a, &m.b] {
        for pp in [&p.a, &p.b] {
            for ss in [&s.a, &s.b] {
                let mut x = [n_melds as isize, 0, 0];
                for i in 0..3 {
                    x[i] += mm[i] + pp[i] + ss[i] + z[i];
                }
                min = min.min(formula(x[0], x[1], x[2], pair));
            }
        }
    }
    min
}

// 一般形 (4面子1雀頭)
pub fn shanten_standard(counts: &TileTable, n_melds: usize) -> isize {
    let mut counts = *counts;
    let mut min = standard_with_pair(&counts, n_melds, false);

    // 対子を持つ牌種それぞれを雀頭として試す
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if counts[ti][ni] >= 2 {
                counts[ti][ni] -= 2;
                min = min.min(standard_with_pair(&counts, n_melds, true));
                counts[ti][ni] += 2;
            }
        }
    }
    min
}

// 七対子 (副露があると成立しない)
pub fn shanten_chiitoi(counts: &TileTable) -> isize {
    let mut n_pairs = 0;
    let mut n_kinds = 0;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            match counts[ti][ni] {
                0 => {}
                1 => n_kinds += 1,
                _ => n_pairs += 1,
            }
        }
    }

    let n_pairs = n_pairs.min(7);
    let n_kinds = n_kinds.min(7 - n_pairs);
    13 - (n_pairs as isize) * 2 - n_kinds as isize
}

// 国士無双 (副露があると成立しない)
pub fn shanten_kokushi(counts: &TileTable) -> isize {
    let mut n_kinds = 0;
    let mut has_pair = false;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if ti != TZ && ni != 1 && ni != 9 {
                continue;
            }
            if ni > DR && ti == TZ {
                continue;
            }
            if counts[ti][ni] > 0 {
                n_kinds += 1;
                if counts[ti][ni] >= 2 {
                    has_pair = true;
                }
            }
        }
    }
    13 - n_kinds - has_pair as isize
}

// 3形式の最小シャンテン数
pub fn shanten(hand: &Hand) -> isize {
    let counts = hand.counts();
    let n_melds = hand.melds().len();
    let mut min = shanten_standard(counts, n_melds);
    if n_melds == 0 {
        min = min.min(shanten_chiitoi(counts));
        min = min.min(shanten_kokushi(counts));
    }
    min
}

// 有効牌の列挙
// シャンテン数を厳密に減らす牌を返す. ツモ状態(打牌待ち)ではNone.
// 赤5は列挙しない (通常5が両方を代表する).
pub fn waits(hand: &Hand) -> Option<Vec<Tile>> {
    if hand.drawn().is_some() {
        return None;
    }

    let base = shanten(hand);
    let mut counts = *hand.counts();
    let n_melds = hand.melds().len();

    let mut v = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if ti == TZ && ni > DR {
                continue;
            }
            if counts[ti][ni] >= TILE {
                continue;
            }
            counts[ti][ni] += 1;
            let mut x = shanten_standard(&counts, n_melds);
            if n_melds == 0 {
                x = x.min(shanten_chiitoi(&counts));
                x = x.min(shanten_kokushi(&counts));
            }
            counts[ti][ni] -= 1;
            if x < base {
                v.push(Tile(ti, ni));
            }
        }
    }
    Some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(exp: &str) -> isize {
        shanten(&Hand::from_str(exp).unwrap())
    }

    fn wt(exp: &str) -> Vec<String> {
        waits(&Hand::from_str(exp).unwrap())
            .unwrap()
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    #[test]
    fn test_shanten_standard() {
        assert_eq!(sh("m123p456s789z11122"), -1); // 和了形
        assert_eq!(sh("m123p456s789z1122"), 0); // シャンポン待ち
        assert_eq!(sh("m123p456s78z11222"), 0); // 両面待ち
        assert_eq!(sh("m12p456s789z11222"), 0); // ペンチャン待ち
        assert_eq!(sh("m135p246s579z1234"), 5); // 塔子3つのバラバラ形
        assert_eq!(sh("m123p456s789z2,z111="), 0);
        assert_eq!(sh("m123p456s789z11,z222="), -1); // ツモ和了形
        // 6対子は一般形では3シャンテン
        let counts = *Hand::from_str("m1199p1199s1199z1").unwrap().counts();
        assert_eq!(shanten_standard(&counts, 0), 3);
    }

    #[test]
    fn test_shanten_chiitoi() {
        assert_eq!(shanten_chiitoi(Hand::from_str("m1199p1199s1199z1").unwrap().counts()), 0);
        assert_eq!(sh("m1199p1199s1199z1"), 0); // 七対子聴牌が最小
        assert_eq!(sh("m11p22s33z1122m445"), 0);
        assert_eq!(sh("m1122334455667m7"), -1); // 七対子和了形
        // 同種4枚は1対子としてしか数えない
        assert_eq!(shanten_chiitoi(Hand::from_str("m1111p22s33z11223").unwrap().counts()), 2);
    }

    #[test]
    fn test_shanten_kokushi() {
        assert_eq!(sh("m19p19s19z1234567"), 0); // 13面待ち
        assert_eq!(sh("m19p19s19z123456m1"), 0);
        assert_eq!(sh("m19p19s19z1234567m1"), -1);
        assert_eq!(sh("m19p19s19z123456m2"), 1);
        let counts = *Hand::from_str("m23p456s789z11345").unwrap().counts();
        assert_eq!(shanten_kokushi(&counts), 8);
    }

    #[test]
    fn test_shanten_bounds() {
        // どの手牌でも -1 以上
        for exp in ["m123p456s789z11122", "m1199p1199s1199z1", "m135p246s579z1234"] {
            assert!(sh(exp) >= -1);
        }
    }

    #[test]
    fn test_waits() {
        assert_eq!(wt("m123p456s789z1122"), ["z1", "z2"]);
        assert_eq!(wt("m12p456s789z11222"), ["m3"]);
        assert_eq!(wt("m123p456s789z2,z111="), ["z2"]);
        // 純正九蓮宝燈は9面待ち
        assert_eq!(
            wt("m1112345678999"),
            ["m1", "m2", "m3", "m4", "m5", "m6", "m7", "m8", "m9"]
        );
        // 国士13面待ち
        assert_eq!(wt("m19p19s19z1234567").len(), 13);

        // ツモ状態ではNone
        assert!(waits(&Hand::from_str("m123p456s789z11222").unwrap()).is_none());

        // 赤5は列挙されない
        let v = wt("m34p456s789z11222");
        assert_eq!(v, ["m2", "m5"]);
    }

    #[test]
    fn test_waits_strictness() {
        // 有効牌はシャンテン数を厳密に減らし, それ以外は減らさない
        let hand = Hand::from_str("m135p246s579z1234").unwrap();
        let base = shanten(&hand);
        let ws = waits(&hand).unwrap();
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if ti == TZ && ni > DR {
                    continue;
                }
                let t = Tile(ti, ni);
                let mut counts = *hand.counts();
                if counts[ti][ni] >= TILE {
                    continue;
                }
                counts[ti][ni] += 1;
                let x = shanten_standard(&counts, 0)
                    .min(shanten_chiitoi(&counts))
                    .min(shanten_kokushi(&counts));
                if ws.contains(&t) {
                    assert!(x < base, "{} should improve", t);
                } else {
                    assert!(x >= base, "{} should not improve", t);
                }
            }
        }
    }
}
