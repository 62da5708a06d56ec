use serde::{de, ser};

use super::*;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(pub Type, pub Tnum); // (種別インデックス, 数字インデックス)
pub const Z8: Tile = Tile(TZ, UK); // 伏せ牌

impl Tile {
    // 牌表記("m1","p0","z7","_")のパース
    pub fn parse(s: &str) -> Res<Self> {
        if s == "_" {
            return Ok(Z8);
        }

        let cs: Vec<char> = s.chars().collect();
        if cs.len() != 2 {
            return err_notation(format!("tile '{}'", s));
        }
        let ti = tile_type_from_char(cs[0])?;
        let ni = match cs[1].to_digit(10) {
            Some(n) => n as usize,
            None => return err_notation(format!("tile '{}'", s)),
        };
        if ti == TZ && !(1..=7).contains(&ni) {
            return err_notation(format!("tile '{}'", s));
        }

        Ok(Self(ti, ni))
    }

    // 赤5の場合,通常の5を返却. それ以外の場合はコピーをそのまま返却.
    #[inline]
    pub fn to_normal(self) -> Self {
        if self.0 != TZ && self.1 == 0 {
            Self(self.0, 5)
        } else {
            self
        }
    }

    #[inline]
    pub fn is_red5(&self) -> bool {
        self.0 != TZ && self.1 == 0
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // 字牌
    #[inline]
    pub fn is_honor(&self) -> bool {
        self.0 == TZ
    }

    // 1,9牌
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.0 != TZ && (self.1 == 1 || self.1 == 9)
    }

    // 么九牌
    #[inline]
    pub fn is_end(&self) -> bool {
        self.0 == TZ || self.1 == 1 || self.1 == 9
    }

    // 中張牌
    #[inline]
    pub fn is_simple(&self) -> bool {
        !self.is_end() && self != &Z8
    }

    // 風牌
    #[inline]
    pub fn is_wind(&self) -> bool {
        self.0 == TZ && (WE..=WN).contains(&self.1)
    }

    // 三元牌
    #[inline]
    pub fn is_dragon(&self) -> bool {
        self.0 == TZ && (DW..=DR).contains(&self.1)
    }
}

// ドラ表示牌が指すドラ
// 数牌は次の数字(9→1, 赤5表示は6), 風牌は東→南→西→北→東, 三元牌は白→發→中→白
pub fn dora_from_indicator(t: Tile) -> Res<Tile> {
    if t.0 == TZ {
        let ni = match t.1 {
            WN => WE,
            DR => DW,
            n if (1..=7).contains(&n) => n + 1,
            _ => return err_notation(format!("dora indicator '{}'", t)),
        };
        Ok(Tile(TZ, ni))
    } else {
        let ni = match t.1 {
            0 => 6,
            9 => 1,
            n if n <= 8 => n + 1,
            _ => return err_notation(format!("dora indicator '{}'", t)),
        };
        Ok(Tile(t.0, ni))
    }
}

pub fn tile_type_from_char(c: char) -> Res<Type> {
    Ok(match c {
        'm' => TM,
        'p' => TP,
        's' => TS,
        'z' => TZ,
        _ => return err_notation(format!("tile type '{}'", c)),
    })
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Z8 {
            write!(f, "_")
        } else {
            write!(f, "{}{}", ['m', 'p', 's', 'z'][self.0], self.1)
        }
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 != other.0 {
            return self.0.cmp(&other.0);
        }

        // 赤5は4.5に変換して通常5の直前に並べる
        let a = if self.is_red5() { 9 } else { self.1 * 2 };
        let b = if other.is_red5() { 9 } else { other.1 * 2 };
        a.cmp(&b)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Tile::parse(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// [TileTable]
// hand[ti][ni]は牌の所持数. hand[ti][5]は赤5を含む5の合計, hand[ti][0]はそのうちの赤5の数.
pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

// 赤5を通常5と区別せずに数えた所持数
pub fn count_tile(tt: &TileTable, t: Tile) -> usize {
    if t.1 == 5 {
        tt[t.0][5] - tt[t.0][0]
    } else {
        tt[t.0][t.1]
    }
}

pub fn inc_tile(tt: &mut TileTable, t: Tile) -> Res {
    tt[t.0][t.1] += 1;
    if t.is_red5() {
        // 0は赤5のフラグなので本来の5も加算
        tt[t.0][5] += 1;
    }
    if tt[t.0][t.to_normal().1] > TILE {
        return err_invariant(format!("5th tile '{}'", t));
    }
    Ok(())
}

pub fn dec_tile(tt: &mut TileTable, t: Tile) -> Res {
    let n = t.to_normal();
    if tt[t.0][t.1] == 0 || tt[n.0][n.1] == 0 {
        return err_invariant(format!("tile '{}' not found", t));
    }
    tt[t.0][t.1] -= 1;
    if t.is_red5() {
        tt[t.0][5] -= 1;
    }
    if tt[t.0][5] < tt[t.0][0] {
        return err_invariant(format!("red5 count exceeds 5s in {}", ['m', 'p', 's', 'z'][t.0]));
    }
    Ok(())
}

// 牌表記の連続("m123p05z11"など)をパース
pub fn tiles_from_str(exp: &str) -> Res<Vec<Tile>> {
    let mut tiles = vec![];
    let mut ti = None;
    for c in exp.chars() {
        match c {
            'm' | 'p' | 's' | 'z' => ti = Some(tile_type_from_char(c)?),
            '0'..='9' => {
                let ti = match ti {
                    Some(ti) => ti,
                    None => return err_notation(format!("digit before tile type in '{}'", exp)),
                };
                let ni = c.to_digit(10).unwrap() as usize;
                if ti == TZ && !(1..=7).contains(&ni) {
                    return err_notation(format!("honor 'z{}'", ni));
                }
                tiles.push(Tile(ti, ni));
            }
            _ => return err_notation(format!("char '{}' in '{}'", c, exp)),
        }
    }
    Ok(tiles)
}

// TileTableを牌のリストに展開 (赤5は通常5より先に列挙)
pub fn tiles_from_table(tt: &TileTable) -> Vec<Tile> {
    let mut tiles = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            for c in 0..tt[ti][ni] {
                if ti != TZ && ni == 5 && c < tt[ti][0] {
                    tiles.push(Tile(ti, 0)); // 赤5
                } else {
                    tiles.push(Tile(ti, ni));
                }
            }
        }
    }
    tiles
}

pub fn tiles_to_table(tiles: &[Tile]) -> Res<TileTable> {
    let mut tt = TileTable::default();
    for &t in tiles {
        inc_tile(&mut tt, t)?;
    }
    Ok(tt)
}

#[test]
fn test_tile_notation() {
    for s in ["m1", "m0", "p9", "s5", "z1", "z7", "_"] {
        assert_eq!(Tile::parse(s).unwrap().to_string(), s);
    }
    for s in ["z0", "z8", "z9", "m", "x1", "m10", ""] {
        assert!(Tile::parse(s).is_err(), "'{}' should be invalid", s);
    }

    assert_eq!(Tile(TM, 0).to_normal(), Tile(TM, 5));
    assert!(Tile(TZ, DG).is_dragon());
    assert!(!Tile(TZ, WE).is_dragon());
    assert!(Tile(TS, 9).is_end() && !Tile(TS, 9).is_honor());
}

#[test]
fn test_tile_order() {
    let mut v = tiles_from_str("m9m0m1m5").unwrap();
    v.sort();
    assert_eq!(v, tiles_from_str("m1m0m5m9").unwrap());
}

#[test]
fn test_dora_from_indicator() {
    let dora = |s: &str| dora_from_indicator(Tile::parse(s).unwrap()).unwrap().to_string();
    assert_eq!(dora("m9"), "m1");
    assert_eq!(dora("z4"), "z1");
    assert_eq!(dora("z7"), "z5");
    assert_eq!(dora("m0"), "m6");
    assert_eq!(dora("s4"), "s5");
    assert!(dora_from_indicator(Z8).is_err());
}

#[test]
fn test_tile_table() {
    let tiles = tiles_from_str("p34777s1230567z66").unwrap();
    let tt = tiles_to_table(&tiles).unwrap();
    assert_eq!(count_tile(&tt, Tile(TS, 5)), 1); // s0は通常5として数えない
    assert_eq!(tt[TS][0], 1);
    assert_eq!(tt[TS][5], 2);

    let mut sorted = tiles.clone();
    sorted.sort();
    assert_eq!(tiles_from_table(&tt), sorted);

    assert!(tiles_to_table(&tiles_from_str("z11111").unwrap()).is_err());
}
