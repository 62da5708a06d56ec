use super::*;

// ツモ状態. 打牌義務の有無を表し, 鳴き直後はClaimになる.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Drawn {
    Tile(Tile),
    Claim, // チー・ポンの直後
}

// 手牌
// closedは純手牌(ツモ牌を含む)の枚数表, hiddenは伏せ牌('_')の枚数.
// 純手牌 + 3×副露数は常に13(打牌後)または14(ツモ・鳴き直後).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    closed: TileTable,
    hidden: usize,
    melds: Vec<Meld>,
    drawn: Option<Drawn>,
    riichi: bool,
}

impl Hand {
    pub fn new() -> Self {
        Self {
            closed: TileTable::default(),
            hidden: 0,
            melds: vec![],
            drawn: None,
            riichi: false,
        }
    }

    // 手牌表記のパース
    // 純手牌(+ツモ牌) [*] [,面子...] [,] の形式. 末尾のカンマは鳴き直後の打牌待ちを表す.
    pub fn from_str(exp: &str) -> Res<Self> {
        let mut hand = Self::new();
        let parts: Vec<&str> = exp.split(',').collect();

        let mut closed_part = parts[0];
        if let Some(s) = closed_part.strip_suffix('*') {
            hand.riichi = true;
            closed_part = s;
        }

        // 表記順を保持してパース (最後の1枚がツモ牌になりうる)
        let mut entries = vec![];
        let mut ti = None;
        for c in closed_part.chars() {
            match c {
                'm' | 'p' | 's' | 'z' => ti = Some(tile_type_from_char(c)?),
                '_' => entries.push(Z8),
                '0'..='9' => {
                    let ti = match ti {
                        Some(ti) => ti,
                        None => return err_notation(format!("digit before type in '{}'", exp)),
                    };
                    let ni = c.to_digit(10).unwrap() as usize;
                    if ti == TZ && !(1..=7).contains(&ni) {
                        return err_notation(format!("honor 'z{}'", ni));
                    }
                    entries.push(Tile(ti, ni));
                }
                _ => return err_notation(format!("char '{}' in '{}'", c, exp)),
            }
        }

        let mut claim = false;
        for (i, p) in parts.iter().enumerate().skip(1) {
            if p.is_empty() {
                if i != parts.len() - 1 {
                    return err_notation(format!("empty meld in '{}'", exp));
                }
                claim = true;
            } else {
                hand.melds.push(Meld::parse(p)?);
            }
        }

        let total = entries.len() + 3 * hand.melds.len();
        match (total, claim) {
            (13, false) => {}
            (14, false) => {
                hand.drawn = Some(Drawn::Tile(entries.pop().unwrap()));
            }
            (14, true) => {
                hand.drawn = Some(Drawn::Claim);
            }
            _ => return err_invariant(format!("hand size {} in '{}'", total, exp)),
        }

        for t in entries {
            hand.add_closed(t)?;
        }
        if let Some(Drawn::Tile(t)) = hand.drawn {
            hand.add_closed(t)?;
        }

        Ok(hand)
    }

    // 配牌(13枚)から手牌を構築
    pub fn from_tiles(tiles: &[Tile]) -> Res<Self> {
        if tiles.len() != 13 {
            return err_invariant(format!("deal of {} tiles", tiles.len()));
        }
        let mut hand = Self::new();
        for &t in tiles {
            hand.add_closed(t)?;
        }
        Ok(hand)
    }

    fn add_closed(&mut self, t: Tile) -> Res {
        if t == Z8 {
            self.hidden += 1;
            Ok(())
        } else {
            inc_tile(&mut self.closed, t)
        }
    }

    fn remove_closed(&mut self, t: Tile) -> Res {
        if t == Z8 {
            if self.hidden == 0 {
                return err_invariant("no hidden tile");
            }
            self.hidden -= 1;
            Ok(())
        } else {
            dec_tile(&mut self.closed, t)
        }
    }

    // 純手牌の枚数 (伏せ牌を含む)
    pub fn closed_count(&self) -> usize {
        let mut n = self.hidden;
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                n += self.closed[ti][ni];
            }
        }
        n
    }

    #[inline]
    pub fn counts(&self) -> &TileTable {
        &self.closed
    }

    #[inline]
    pub fn melds(&self) -> &[Meld] {
        &self.melds
    }

    #[inline]
    pub fn drawn(&self) -> Option<Drawn> {
        self.drawn
    }

    pub fn drawn_tile(&self) -> Option<Tile> {
        match self.drawn {
            Some(Drawn::Tile(t)) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn is_riichi(&self) -> bool {
        self.riichi
    }

    // 門前判定 (暗槓は門前を崩さない)
    pub fn is_menzen(&self) -> bool {
        self.melds.iter().all(|m| m.from.is_none())
    }

    // [状態遷移]

    pub fn draw(&mut self, t: Tile, check: bool) -> Res {
        if check {
            if self.drawn.is_some() {
                return err_action("draw with pending discard");
            }
            if self.closed_count() + 3 * self.melds.len() != 13 {
                return err_action("draw on incomplete hand");
            }
        }
        self.add_closed(t)?;
        self.drawn = Some(Drawn::Tile(t));
        Ok(())
    }

    pub fn discard(&mut self, t: Tile, riichi_declare: bool, check: bool) -> Res {
        if check {
            if self.drawn.is_none() {
                return err_action("discard without draw");
            }
            if riichi_declare {
                if self.riichi {
                    return err_action("riichi declared twice");
                }
                if !self.is_menzen() {
                    return err_action("riichi on open hand");
                }
            } else if self.riichi && self.drawn_tile() != Some(t) {
                return err_action("discard other than drawn tile after riichi");
            }
        }
        self.remove_closed(t)?;
        self.drawn = None;
        self.riichi |= riichi_declare;
        Ok(())
    }

    // チー・ポン・大明槓
    pub fn call(&mut self, m: &Meld, check: bool) -> Res {
        let mt = m.meld_type;
        if !matches!(mt, MeldType::Chi | MeldType::Pon | MeldType::Minkan) {
            return err_action(format!("call with meld '{}'", m));
        }
        if check {
            if self.drawn.is_some() {
                return err_action("call with pending discard");
            }
            if self.riichi {
                return err_action("call after riichi");
            }
            if mt == MeldType::Chi && m.from != Some(Direction::Kamicha) {
                return err_action("chi not from kamicha");
            }
        }

        for (i, &n) in m.nums.iter().enumerate() {
            if m.called == Some(i) {
                continue;
            }
            self.remove_closed(Tile(m.tile_type, n))?;
        }
        self.drawn = if mt == MeldType::Minkan {
            None // 嶺上牌のツモが続く
        } else {
            Some(Drawn::Claim)
        };
        self.melds.push(m.clone());
        Ok(())
    }

    // 暗槓・加槓
    pub fn kan(&mut self, m: &Meld, check: bool) -> Res {
        if check && self.drawn_tile().is_none() {
            return err_action("kan without draw");
        }
        match m.meld_type {
            MeldType::Ankan => {
                for &n in &m.nums {
                    self.remove_closed(Tile(m.tile_type, n))?;
                }
                self.melds.push(m.clone());
            }
            MeldType::Kakan => {
                let added = match m.added {
                    Some(n) => n,
                    None => return err_action(format!("kakan without added tile '{}'", m)),
                };
                let pos = self.melds.iter().position(|x| {
                    x.meld_type == MeldType::Pon
                        && x.tile_type == m.tile_type
                        && x.num() == m.num()
                });
                let pos = match pos {
                    Some(p) => p,
                    None => return err_action(format!("kakan without pon '{}'", m)),
                };
                self.remove_closed(Tile(m.tile_type, added))?;
                self.melds[pos] = m.clone();
            }
            _ => return err_action(format!("kan with meld '{}'", m)),
        }
        self.drawn = None;
        Ok(())
    }

    // [合法手の列挙]

    // 打牌可能な牌の一覧. (牌, ツモ切り)の組で返却.
    // 鳴き直後は喰い替えルールに応じて禁止牌を除外する.
    pub fn legal_discards(&self, kuikae_level: usize) -> Option<Vec<(Tile, bool)>> {
        let drawn = self.drawn?;

        if let Drawn::Tile(t) = drawn {
            if self.riichi {
                return Some(vec![(t, true)]);
            }
        }

        let deny = if drawn == Drawn::Claim {
            self.melds
                .last()
                .map(|m| deny_for(m, kuikae_level))
                .unwrap_or_default()
        } else {
            vec![]
        };
        let drawn_tile = self.drawn_tile();

        let mut v = vec![];
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if self.closed[ti][ni] == 0 || deny.contains(&(ti, ni)) {
                    continue;
                }
                let red = if ni == 5 { self.closed[ti][0] } else { 0 };
                let mut plain = self.closed[ti][ni] - red;
                let mut red = red;
                // ツモ牌そのものは手出しの選択肢から1枚除外
                match drawn_tile {
                    Some(d) if d == Tile(ti, 0) && ni == 5 => red -= 1,
                    Some(d) if d == Tile(ti, ni) => plain -= 1,
                    _ => {}
                }
                if red > 0 {
                    v.push((Tile(ti, 0), false));
                }
                if plain > 0 {
                    v.push((Tile(ti, ni), false));
                }
            }
        }
        if let Some(t) = drawn_tile {
            v.push((t, true));
        }

        Some(v)
    }

    // 上家の捨て牌に対するチー候補
    pub fn legal_chi(&self, t: Tile, kuikae_level: usize) -> Option<Vec<Meld>> {
        if self.drawn.is_some() {
            return None;
        }
        let mut v = vec![];
        if self.riichi || t.is_honor() || t == Z8 {
            return Some(v);
        }

        let ti = t.0;
        let n = t.to_normal().1;
        let pairs: [(i32, i32); 3] = [
            (n as i32 - 2, n as i32 - 1),
            (n as i32 - 1, n as i32 + 1),
            (n as i32 + 1, n as i32 + 2),
        ];
        for (a, b) in pairs {
            if a < 1 || b > 9 {
                continue;
            }
            let (a, b) = (a as usize, b as usize);
            for va in self.num_variants(ti, a) {
                for vb in self.num_variants(ti, b) {
                    let m = Meld::chi(ti, t.1, [va, vb]);
                    if self.kuikae_viable(&m, kuikae_level) {
                        v.push(m);
                    }
                }
            }
        }
        Some(v)
    }

    // 指定の数字として使える手牌中の表記(赤5は0)の一覧
    fn num_variants(&self, ti: Type, ni: Tnum) -> Vec<Tnum> {
        let mut v = vec![];
        let red = if ni == 5 { self.closed[ti][0] } else { 0 };
        if red > 0 {
            v.push(0);
        }
        if self.closed[ti][ni] - red > 0 {
            v.push(ni);
        }
        v
    }

    // 鳴いた後に打牌可能な牌が残るかどうか
    fn kuikae_viable(&self, m: &Meld, level: usize) -> bool {
        if level >= 2 {
            return true;
        }
        let deny = deny_for(m, level);

        let mut consumed = TileTable::default();
        for (i, &nu) in m.nums.iter().enumerate() {
            if m.called == Some(i) {
                continue;
            }
            let t = Tile(m.tile_type, nu).to_normal();
            consumed[t.0][t.1] += 1;
        }

        for ti in 0..TYPE {
            for ni in 1..TNUM {
                let left = self.closed[ti][ni] - consumed[ti][ni];
                if left > 0 && !deny.contains(&(ti, ni)) {
                    return true;
                }
            }
        }
        false
    }

    // 捨て牌に対するポン候補 (赤5の組み合わせを列挙)
    pub fn legal_pon(&self, t: Tile, d: Direction) -> Option<Vec<Meld>> {
        if self.drawn.is_some() {
            return None;
        }
        let mut v = vec![];
        if self.riichi || t == Z8 {
            return Some(v);
        }

        let ti = t.0;
        let n = t.to_normal().1;
        let red = if n == 5 { self.closed[ti][0] } else { 0 };
        let plain = self.closed[ti][n] - red;

        if plain >= 2 {
            v.push(Meld::pon(ti, t.1, [n, n], d));
        }
        if plain >= 1 && red >= 1 {
            v.push(Meld::pon(ti, t.1, [0, n], d));
        }
        if red >= 2 {
            v.push(Meld::pon(ti, t.1, [0, 0], d));
        }
        Some(v)
    }

    // 槓の候補
    // target指定あり: 捨て牌に対する大明槓
    // target指定なし: ツモ番における暗槓・加槓 (リーチ中はツモ牌の暗槓のみ)
    pub fn legal_kan(&self, target: Option<(Tile, Direction)>) -> Option<Vec<Meld>> {
        let mut v = vec![];

        if let Some((t, d)) = target {
            if self.drawn.is_some() {
                return None;
            }
            if self.riichi || t == Z8 {
                return Some(v);
            }
            let ti = t.0;
            let n = t.to_normal().1;
            if self.closed[ti][n] == 3 {
                let red = if n == 5 { self.closed[ti][0] } else { 0 };
                let mut consumed = [n; 3];
                for c in consumed.iter_mut().take(red) {
                    *c = 0;
                }
                v.push(Meld::minkan(ti, t.1, consumed, d));
            }
            return Some(v);
        }

        let drawn = match self.drawn_tile() {
            Some(t) => t,
            None => return None,
        };

        // 暗槓
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if self.closed[ti][ni] != TILE {
                    continue;
                }
                let dn = drawn.to_normal();
                if self.riichi && (ti, ni) != (dn.0, dn.1) {
                    continue;
                }
                let red = if ni == 5 { self.closed[ti][0] } else { 0 };
                let mut nums = [ni; 4];
                for nu in nums.iter_mut().take(red) {
                    *nu = 0;
                }
                v.push(Meld::ankan(ti, nums));
            }
        }

        // 加槓
        if !self.riichi {
            for m in &self.melds {
                if m.meld_type != MeldType::Pon {
                    continue;
                }
                let (ti, n) = (m.tile_type, m.num());
                let red = if n == 5 { self.closed[ti][0] } else { 0 };
                let plain = self.closed[ti][n] - red;
                if red > 0 {
                    v.push(Meld::kakan(m, 0));
                }
                if plain > 0 {
                    v.push(Meld::kakan(m, n));
                }
            }
        }

        Some(v)
    }

    // 他家公開用に純手牌を伏せた複製
    pub fn masked(&self) -> Self {
        let mut hand = self.clone();
        hand.hidden = hand.closed_count();
        hand.closed = TileTable::default();
        if let Some(Drawn::Tile(_)) = hand.drawn {
            hand.drawn = Some(Drawn::Tile(Z8));
        }
        hand
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

// 喰い替え禁止牌 (正規化した牌種)
// level 0: 現物とスジ, level 1: 現物のみ
fn deny_for(m: &Meld, level: usize) -> Vec<(Type, Tnum)> {
    if level >= 2 {
        return vec![];
    }
    let called = match m.called_tile() {
        Some(t) => t.to_normal(),
        None => return vec![],
    };

    let mut deny = vec![(called.0, called.1)];
    if level == 0 && m.meld_type == MeldType::Chi {
        // 両面チーのスジ喰い替え
        let lo = m.min_num();
        let n = called.1;
        if n == lo && n + 3 <= 9 {
            deny.push((called.0, n + 3));
        }
        if n == lo + 2 && n >= 4 {
            deny.push((called.0, n - 3));
        }
    }
    deny
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let drawn_tile = self.drawn_tile();

        let mut hidden = self.hidden;
        if drawn_tile == Some(Z8) {
            hidden -= 1;
        }
        write!(f, "{}", "_".repeat(hidden))?;

        // 純手牌をツモ牌を除いて種別ごとに列挙 (赤5は通常5の前)
        let mut last_type = None;
        for ti in 0..TYPE {
            let mut red = self.closed[ti][0];
            let mut skip_plain = TileRow::default();
            match drawn_tile {
                Some(d) if d == Tile(ti, 0) => red -= 1,
                Some(d) if d.0 == ti && d.1 != 0 && d != Z8 => skip_plain[d.1] = 1,
                _ => {}
            }
            let mut digits = vec![];
            for ni in 1..TNUM {
                let r = if ni == 5 { red } else { 0 };
                let plain = self.closed[ti][ni]
                    - (if ni == 5 { self.closed[ti][0] } else { 0 })
                    - skip_plain[ni];
                for _ in 0..r {
                    digits.push(0);
                }
                for _ in 0..plain {
                    digits.push(ni);
                }
            }
            if !digits.is_empty() {
                write!(f, "{}", ['m', 'p', 's', 'z'][ti])?;
                for d in digits {
                    write!(f, "{}", d)?;
                }
                last_type = Some(ti);
            }
        }

        // ツモ牌は末尾に追記 (直前と同種別なら数字のみ)
        if let Some(t) = drawn_tile {
            if t == Z8 {
                write!(f, "_")?;
            } else if last_type == Some(t.0) {
                write!(f, "{}", t.1)?;
            } else {
                write!(f, "{}", t)?;
            }
        }

        if self.riichi {
            write!(f, "*")?;
        }
        for m in &self.melds {
            write!(f, ",{}", m)?;
        }
        if self.drawn == Some(Drawn::Claim) {
            write!(f, ",")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(exp: &str) -> Hand {
        Hand::from_str(exp).unwrap()
    }

    #[test]
    fn test_hand_round_trip() {
        for exp in [
            "m123p456s789z1122",
            "m123p456s789z11222",
            "m055p456s789z1122",
            "m123p456s789z2,z111=",
            "m123456p456z22,s789-,",
            "m123p456s789z1122*",
            "m055z11222,p406-,s777+",
            "_____________",
            "____________m5",
        ] {
            assert_eq!(h(exp).to_string(), exp, "round trip of '{}'", exp);
        }
    }

    #[test]
    fn test_hand_normalize() {
        // ツモ牌は末尾へ, 赤5は通常5の前へ, 面子は正規形へ
        assert_eq!(h("m505p456s789z11223").to_string(), "m055p456s789z11223");
        assert_eq!(
            h("m123p456s789z11,z222=").drawn(),
            Some(Drawn::Tile(Tile(TZ, 1)))
        );
        assert_eq!(
            h("m11234p456z22,s978-").to_string(),
            "m11234p456z22,s789-"
        );
    }

    #[test]
    fn test_hand_errors() {
        assert!(Hand::from_str("m12345").is_err()); // 枚数不足
        assert!(Hand::from_str("m111122223333444455").is_err());
        assert!(Hand::from_str("m11111p456s789z112").is_err()); // 5枚目
        assert!(Hand::from_str("z88888888888888").is_err());
        assert!(Hand::from_str("m123p456s789z1122,").is_err()); // 13枚で打牌待ちは不整合
    }

    #[test]
    fn test_draw_discard() {
        let mut hand = h("m123p456s789z1122");
        assert!(hand.discard(Tile(TZ, 1), false, true).is_err()); // ツモなし
        hand.draw(Tile(TM, 9), true).unwrap();
        assert!(hand.draw(Tile(TM, 9), true).is_err()); // 二重ツモ
        assert_eq!(hand.to_string(), "m123p456s789z1122m9");
        hand.discard(Tile(TZ, 2), false, true).unwrap();
        assert_eq!(hand.to_string(), "m1239p456s789z112");

        // リーチ後はツモ切りのみ
        let mut hand = h("m123p456s789z1122*");
        hand.draw(Tile(TM, 9), true).unwrap();
        assert!(hand.discard(Tile(TZ, 1), false, true).is_err());
        hand.discard(Tile(TM, 9), false, true).unwrap();

        // リーチ宣言は門前のみ
        let mut hand = h("m123s789z1122,p456-");
        hand.draw(Tile(TM, 9), true).unwrap();
        assert!(hand.discard(Tile(TM, 9), true, true).is_err());
    }

    #[test]
    fn test_call_kan() {
        let mut hand = h("m1123p456s78z1122");
        let m = Meld::parse("s789-").unwrap();
        hand.call(&m, true).unwrap();
        assert_eq!(hand.drawn(), Some(Drawn::Claim));
        assert_eq!(hand.to_string(), "m1123p456z1122,s789-,");
        hand.discard(Tile(TZ, 2), false, true).unwrap();
        assert_eq!(hand.to_string(), "m1123p456z112,s789-");

        // 大明槓は打牌せず嶺上ツモ待ち
        let mut hand = h("m123p456s7z112,z222=");
        let m = Meld::parse("z1111-").unwrap();
        assert!(hand.call(&m, true).is_err()); // z1は2枚しかない

        let mut hand = h("m123p456s7z111,z222=");
        hand.call(&m, true).unwrap();
        assert_eq!(hand.drawn(), None);

        // 暗槓は4枚目が必要
        let mut hand = h("m123p456s789z11222");
        assert!(hand.kan(&Meld::parse("z2222").unwrap(), true).is_err());

        // 加槓は既存のポンを置き換える
        let mut hand = h("m1234p445s789,z222=");
        hand.draw(Tile(TZ, 2), true).unwrap();
        hand.kan(&Meld::parse("z222=2").unwrap(), true).unwrap();
        assert_eq!(hand.drawn(), None);
        assert_eq!(hand.melds()[0].meld_type, MeldType::Kakan);
    }

    #[test]
    fn test_legal_discards() {
        let mut hand = h("m123p456s789z1122");
        assert_eq!(hand.legal_discards(0), None);
        hand.draw(Tile(TM, 1), true).unwrap();
        let v = hand.legal_discards(0).unwrap();
        // 手出し11種 + ツモ切り
        assert_eq!(v.len(), 12);
        assert!(v.contains(&(Tile(TM, 1), false)));
        assert!(v.contains(&(Tile(TM, 1), true)));

        // リーチ後はツモ切りのみ
        let mut hand = h("m123p456s789z1122*");
        hand.draw(Tile(TM, 9), true).unwrap();
        assert_eq!(hand.legal_discards(0).unwrap(), vec![(Tile(TM, 9), true)]);

        // 赤5と通常5は別の選択肢
        let mut hand = h("m055p456s789z1122");
        hand.draw(Tile(TZ, 2), true).unwrap();
        let v = hand.legal_discards(0).unwrap();
        assert!(v.contains(&(Tile(TM, 0), false)));
        assert!(v.contains(&(Tile(TM, 5), false)));
    }

    #[test]
    fn test_kuikae() {
        // m4をチーした後, m4(現物)とm7(スジ)は打牌不可
        let mut hand = h("m456789p456s78z11");
        let m = Meld::parse("m4-56").unwrap();
        hand.call(&m, true).unwrap();
        let v = hand.legal_discards(0).unwrap();
        assert!(!v.iter().any(|&(t, _)| t == Tile(TM, 4)));
        assert!(!v.iter().any(|&(t, _)| t == Tile(TM, 7)));
        assert!(v.iter().any(|&(t, _)| t == Tile(TM, 8)));

        // レベル1では現物のみ禁止
        let v = hand.legal_discards(1).unwrap();
        assert!(!v.iter().any(|&(t, _)| t == Tile(TM, 4)));
        assert!(v.iter().any(|&(t, _)| t == Tile(TM, 7)));

        // レベル2では制限なし
        let v = hand.legal_discards(2).unwrap();
        assert!(v.iter().any(|&(t, _)| t == Tile(TM, 4)));
    }

    #[test]
    fn test_legal_chi() {
        let hand = h("m2346789p46z1122");
        let v = hand.legal_chi(Tile(TM, 5), 0).unwrap();
        // 34, 46, 67の3通り
        let tokens: Vec<String> = v.iter().map(|m| m.to_string()).collect();
        assert_eq!(tokens, vec!["m345-", "m45-6", "m5-67"]);

        // 赤5所持時は赤入りの変化形も列挙
        let hand = h("m340567p456z1122");
        let v = hand.legal_chi(Tile(TM, 6), 0).unwrap();
        let tokens: Vec<String> = v.iter().map(|m| m.to_string()).collect();
        assert_eq!(v.len(), 4);
        for s in ["m406-", "m456-", "m06-7", "m56-7"] {
            assert!(tokens.contains(&s.to_string()), "missing {}", s);
        }

        // 字牌はチー不可
        let hand = h("m123p456s789z1122");
        assert!(hand.legal_chi(Tile(TZ, 1), 0).unwrap().is_empty());
    }

    #[test]
    fn test_legal_pon_kan() {
        let hand = h("m055p456s789z1122");
        let v = hand.legal_pon(Tile(TM, 5), Direction::Toimen).unwrap();
        // 赤+通常の1通りのみ (通常5は1枚)
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].to_string(), "m055=");

        let hand = h("m555p456s789z1122");
        let v = hand.legal_pon(Tile(TM, 0), Direction::Shimocha).unwrap();
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].to_string(), "m550+");

        // 大明槓
        let hand = h("m555p456s789z1122");
        let v = hand
            .legal_kan(Some((Tile(TM, 5), Direction::Kamicha)))
            .unwrap();
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].to_string(), "m5555-");

        // 暗槓・加槓
        let mut hand = h("m5550p456s78z1,z222=");
        hand.draw(Tile(TZ, 2), true).unwrap();
        let v = hand.legal_kan(None).unwrap();
        assert!(v.iter().any(|m| m.to_string() == "m0555"));
        assert!(v.iter().any(|m| m.to_string() == "z222=2"));

        // リーチ後はポン不可
        let hand = h("m055p456s789z1122*");
        assert!(hand
            .legal_pon(Tile(TM, 5), Direction::Toimen)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_masked() {
        let hand = h("m123p456s789z2,z111=");
        assert_eq!(hand.masked().to_string(), "__________,z111=");

        let mut hand = h("m123p456s789z1122");
        hand.draw(Tile(TM, 9), true).unwrap();
        assert_eq!(hand.masked().to_string(), "______________");
        assert_eq!(Hand::from_str(&hand.masked().to_string()).unwrap().drawn(), Some(Drawn::Tile(Z8)));
    }
}
