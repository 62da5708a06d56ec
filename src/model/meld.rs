use serde::{de, ser};

use super::*;

// 鳴いた牌の相対方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Shimocha, // '+' 下家
    Toimen,   // '=' 対面
    Kamicha,  // '-' 上家
}

impl Direction {
    pub fn from_char(c: char) -> Res<Self> {
        Ok(match c {
            '+' => Self::Shimocha,
            '=' => Self::Toimen,
            '-' => Self::Kamicha,
            _ => return err_notation(format!("direction '{}'", c)),
        })
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Shimocha => '+',
            Self::Toimen => '=',
            Self::Kamicha => '-',
        }
    }

    // 基準座席から見た相対方向の座席
    pub fn seat_from(self, seat: Seat) -> Seat {
        let d = match self {
            Self::Shimocha => 1,
            Self::Toimen => 2,
            Self::Kamicha => 3,
        };
        (seat + d) % SEAT
    }

    // targetが基準座席から見てどの方向か (同座席は不可)
    pub fn of_seat(seat: Seat, target: Seat) -> Res<Self> {
        Ok(match (target + SEAT - seat) % SEAT {
            1 => Self::Shimocha,
            2 => Self::Toimen,
            3 => Self::Kamicha,
            _ => return err_action(format!("seat {} relative to itself", seat)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Chi,
    Pon,
    Minkan, // 大明槓
    Kakan,  // 加槓
    Ankan,  // 暗槓
}

// 副露面子. numsは表記順の数字(0は赤5). 加槓の追加牌はaddedに分離して保持.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meld {
    pub tile_type: Type,
    pub nums: Vec<Tnum>,
    pub meld_type: MeldType,
    pub from: Option<Direction>, // 暗槓はNone
    pub called: Option<usize>,   // numsにおける鳴いた牌の位置
    pub added: Option<Tnum>,     // 加槓で追加した牌
}

impl Meld {
    // 面子表記のパースと正規化
    // チー: 鳴いた牌の直後に方向(上家からのみ), 残り2枚は昇順
    // ポン・明槓: 鳴いた牌を方向付きで末尾に, 残りは赤5を先頭に昇順
    // 暗槓: 方向なし4枚, 加槓: ポン表記の方向の後に追加牌
    pub fn parse(exp: &str) -> Res<Self> {
        let mut cs = exp.chars();
        let ti = match cs.next() {
            Some(c) => tile_type_from_char(c)?,
            None => return err_notation("empty meld"),
        };

        let mut nums: Vec<Tnum> = vec![];
        let mut dir = None;
        let mut dir_pos = 0;
        for c in cs {
            match c {
                '0'..='9' => {
                    let ni = c.to_digit(10).unwrap() as usize;
                    if ti == TZ && !(1..=7).contains(&ni) {
                        return err_notation(format!("honor in meld '{}'", exp));
                    }
                    nums.push(ni);
                }
                '+' | '=' | '-' => {
                    if dir.is_some() || nums.is_empty() {
                        return err_notation(format!("meld '{}'", exp));
                    }
                    dir = Some(Direction::from_char(c)?);
                    dir_pos = nums.len() - 1;
                }
                _ => return err_notation(format!("char '{}' in meld '{}'", c, exp)),
            }
        }

        Self::build(ti, nums, dir, dir_pos).map_err(|_| {
            EngineError::InvalidNotation(format!("meld '{}'", exp))
        })
    }

    fn build(ti: Type, nums: Vec<Tnum>, dir: Option<Direction>, dir_pos: usize) -> Res<Self> {
        let norm = |n: Tnum| if n == 0 { 5 } else { n };
        let same = |ns: &[Tnum]| ns.iter().all(|&n| norm(n) == norm(ns[0]));

        match (nums.len(), dir) {
            // 暗槓
            (4, None) => {
                if !same(&nums) {
                    return err_notation("ankan tiles differ");
                }
                let mut nums = nums;
                nums.sort_unstable(); // 0(赤5)が先頭に来る
                Ok(Self {
                    tile_type: ti,
                    nums,
                    meld_type: MeldType::Ankan,
                    from: None,
                    called: None,
                    added: None,
                })
            }
            // ポン または チー
            (3, Some(d)) => {
                if same(&nums) {
                    Ok(Self::canonical_triplet(ti, nums, MeldType::Pon, d, dir_pos, None))
                } else {
                    Self::canonical_chi(ti, nums, d, dir_pos)
                }
            }
            (4, Some(d)) => {
                if !same(&nums) {
                    return err_notation("kan tiles differ");
                }
                if dir_pos == 2 {
                    // 加槓: 方向の後に追加牌
                    let mut nums = nums;
                    let added = nums.pop().unwrap();
                    Ok(Self::canonical_triplet(ti, nums, MeldType::Kakan, d, 2, Some(added)))
                } else if dir_pos == 3 {
                    // 大明槓
                    Ok(Self::canonical_triplet(ti, nums, MeldType::Minkan, d, 3, None))
                } else {
                    err_notation("kan direction position")
                }
            }
            _ => err_notation("meld shape"),
        }
    }

    // ポン・槓の正規形: 鳴いた牌を末尾に, 手出し分は赤5を先に
    fn canonical_triplet(
        ti: Type,
        mut nums: Vec<Tnum>,
        mt: MeldType,
        d: Direction,
        dir_pos: usize,
        added: Option<Tnum>,
    ) -> Self {
        let called = nums.remove(dir_pos);
        nums.sort_unstable(); // 0(赤5)が先頭に来る
        nums.push(called);
        let called_idx = nums.len() - 1;
        Self {
            tile_type: ti,
            nums,
            meld_type: mt,
            from: Some(d),
            called: Some(called_idx),
            added,
        }
    }

    // チーの正規形: 数字順に並べ, 鳴いた牌の位置を保持
    fn canonical_chi(ti: Type, nums: Vec<Tnum>, d: Direction, dir_pos: usize) -> Res<Self> {
        if ti == TZ || nums.len() != 3 {
            return err_notation("chi shape");
        }
        if nums.iter().filter(|&&n| n == 0).count() > 1 {
            return err_notation("chi with two red5");
        }

        let norm = |n: Tnum| if n == 0 { 5 } else { n };
        let called = nums[dir_pos];
        let mut sorted = nums.clone();
        sorted.sort_unstable_by_key(|&n| norm(n));
        let ns: Vec<Tnum> = sorted.iter().map(|&n| norm(n)).collect();
        if ns[0] + 1 != ns[1] || ns[1] + 1 != ns[2] {
            return err_notation("chi not consecutive");
        }

        let called_idx = sorted
            .iter()
            .position(|&n| n == called)
            .unwrap();
        Ok(Self {
            tile_type: ti,
            nums: sorted,
            meld_type: MeldType::Chi,
            from: Some(d),
            called: Some(called_idx),
            added: None,
        })
    }

    // [構築用ヘルパー] 合法手の列挙で正規形の面子を直接生成する

    pub fn chi(ti: Type, called: Tnum, consumed: [Tnum; 2]) -> Self {
        let nums = vec![consumed[0], consumed[1], called];
        Self::canonical_chi(ti, nums, Direction::Kamicha, 2).unwrap()
    }

    pub fn pon(ti: Type, called: Tnum, consumed: [Tnum; 2], d: Direction) -> Self {
        let nums = vec![consumed[0], consumed[1], called];
        Self::canonical_triplet(ti, nums, MeldType::Pon, d, 2, None)
    }

    pub fn minkan(ti: Type, called: Tnum, consumed: [Tnum; 3], d: Direction) -> Self {
        let nums = vec![consumed[0], consumed[1], consumed[2], called];
        Self::canonical_triplet(ti, nums, MeldType::Minkan, d, 3, None)
    }

    pub fn ankan(ti: Type, nums: [Tnum; 4]) -> Self {
        let mut nums = nums.to_vec();
        nums.sort_unstable();
        Self {
            tile_type: ti,
            nums,
            meld_type: MeldType::Ankan,
            from: None,
            called: None,
            added: None,
        }
    }

    pub fn kakan(pon: &Meld, added: Tnum) -> Self {
        Self {
            tile_type: pon.tile_type,
            nums: pon.nums.clone(),
            meld_type: MeldType::Kakan,
            from: pon.from,
            called: pon.called,
            added: Some(added),
        }
    }

    // 面子を構成する全牌 (加槓の追加牌を含む)
    pub fn tiles(&self) -> Vec<Tile> {
        let mut v: Vec<Tile> = self.nums.iter().map(|&n| Tile(self.tile_type, n)).collect();
        if let Some(n) = self.added {
            v.push(Tile(self.tile_type, n));
        }
        v
    }

    // 鳴いた牌
    pub fn called_tile(&self) -> Option<Tile> {
        self.called.map(|i| Tile(self.tile_type, self.nums[i]))
    }

    // チーの最小数字 (赤5は5として扱う)
    pub fn min_num(&self) -> Tnum {
        let n = self.nums[0];
        if n == 0 {
            5
        } else {
            n
        }
    }

    // ポン・槓の対象牌の数字 (正規化済)
    pub fn num(&self) -> Tnum {
        let n = self.nums[self.nums.len() - 1];
        if n == 0 {
            5
        } else {
            n
        }
    }

    #[inline]
    pub fn is_kan(&self) -> bool {
        matches!(self.meld_type, MeldType::Minkan | MeldType::Kakan | MeldType::Ankan)
    }

    // 面子としての門前判定 (暗槓のみ門前を崩さない)
    #[inline]
    pub fn is_open(&self) -> bool {
        self.from.is_some()
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ['m', 'p', 's', 'z'][self.tile_type])?;
        for (i, n) in self.nums.iter().enumerate() {
            write!(f, "{}", n)?;
            if self.called == Some(i) {
                if let Some(d) = self.from {
                    write!(f, "{}", d.to_char())?;
                }
            }
        }
        if let Some(n) = self.added {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

impl ser::Serialize for Meld {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct MeldVisitor;

impl<'de> de::Visitor<'de> for MeldVisitor {
    type Value = Meld;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("meld symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Meld::parse(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Meld {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(MeldVisitor)
    }
}

// 面子表記の検証と正規化. 不正な表記はNone.
pub fn valid_meld(exp: &str) -> Option<String> {
    Meld::parse(exp).ok().map(|m| m.to_string())
}

#[test]
fn test_meld_parse() {
    // 正規形はそのまま
    for s in ["m123-", "m1-23", "z222=", "m0555+", "p055=5", "s0555", "z2222", "m4444-"] {
        assert_eq!(valid_meld(s).as_deref(), Some(s), "'{}'", s);
    }

    // 正規化 (チーは鳴いた牌の直後に方向が付く)
    assert_eq!(valid_meld("m231-").as_deref(), Some("m1-23"));
    assert_eq!(valid_meld("m3-21").as_deref(), Some("m123-"));
    assert_eq!(valid_meld("s550=").as_deref(), Some("s550="));
    assert_eq!(valid_meld("m55+5").as_deref(), Some("m555+"));
    assert_eq!(valid_meld("s5550").as_deref(), Some("s0555"));

    // 不正な表記
    for s in ["m111", "m12-", "m135-", "z123-", "z888=", "m1234-", "m55=55", "x111+", ""] {
        assert_eq!(valid_meld(s), None, "'{}' should be invalid", s);
    }

    // 冪等性
    for s in ["m231-", "s550=", "m55+5"] {
        let c = valid_meld(s).unwrap();
        assert_eq!(valid_meld(&c).unwrap(), c);
    }
}

#[test]
fn test_meld_accessors() {
    let m = Meld::parse("m34-0").unwrap();
    assert_eq!(m.meld_type, MeldType::Chi);
    assert_eq!(m.min_num(), 3);
    assert_eq!(m.called_tile(), Some(Tile(TM, 4)));
    assert!(m.is_open() && !m.is_kan());

    let m = Meld::parse("z2222").unwrap();
    assert_eq!(m.meld_type, MeldType::Ankan);
    assert!(!m.is_open() && m.is_kan());
    assert_eq!(m.num(), 2);

    let m = Meld::parse("p055=5").unwrap();
    assert_eq!(m.meld_type, MeldType::Kakan);
    assert_eq!(m.tiles().len(), 4);
    assert_eq!(m.from, Some(Direction::Toimen));
}
