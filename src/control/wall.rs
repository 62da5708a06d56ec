use rand::prelude::*;

use crate::model::*;

// 乱数源
// [0,1)の一様乱数を返す能力のみを要求し, 牌山の構築時に注入する.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

// rand::StdRngによる標準実装. シード値から再現可能な系列を生成する.
pub struct SeededSource(StdRng);

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self(SeedableRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededSource {
    fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

// 牌山の読み取りインターフェース (観戦表示用)
pub trait WallView {
    fn live_count(&self) -> usize;
    fn dora_indicators(&self) -> Vec<Tile>;
    fn ura_indicators(&self) -> Option<Vec<Tile>>;
}

// 牌山
// tilesの先頭14枚が王牌: 0..4が嶺上牌, 4+2iがドラ表示牌, 5+2iが裏ドラ表示牌.
// 通常のツモは反対側(末尾)から取る.
#[derive(Debug)]
pub struct Wall {
    tiles: Vec<Tile>,
    drawn_live: usize,                // 通常ツモの枚数
    drawn_kan: usize,                 // 嶺上ツモの枚数
    indicators: Vec<Option<Tile>>,    // めくり済みドラ表示牌 (Noneはカンドラなし時の空スロット)
    ura_count: usize,                 // 公開予定の裏ドラ表示牌の数
    kan_pending: bool,                // 嶺上ツモ後, 新ドラ公開待ち
    closed: bool,
    ura_enabled: bool,
    kan_dora_enabled: bool,
    kan_ura_enabled: bool,
}

const DEAD_WALL: usize = 14;
const WALL_TOTAL: usize = 136;

impl Wall {
    pub fn new(rule: &Rule, rng: &mut dyn RandomSource) -> Self {
        // 全136牌を生成し, 赤5の置き換えを行う
        let mut pool = vec![];
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if ti == TZ && ni > DR {
                    break;
                }
                for c in 0..TILE {
                    let ni = if ti != TZ && ni == 5 && c < rule.red_fives[ti] {
                        0
                    } else {
                        ni
                    };
                    pool.push(Tile(ti, ni));
                }
            }
        }

        // rand() * 残り枚数 のインデックスを引き抜いてシャッフル
        let mut tiles = Vec::with_capacity(WALL_TOTAL);
        while !pool.is_empty() {
            let i = (rng.next_f64() * pool.len() as f64) as usize;
            tiles.push(pool.remove(i.min(pool.len() - 1)));
        }

        let first = tiles[4];
        Self {
            tiles,
            drawn_live: 0,
            drawn_kan: 0,
            indicators: vec![Some(first)],
            ura_count: 1,
            kan_pending: false,
            closed: false,
            ura_enabled: rule.ura_dora,
            kan_dora_enabled: rule.kan_dora,
            kan_ura_enabled: rule.kan_ura,
        }
    }

    // 通常のツモ
    pub fn draw(&mut self) -> Res<Tile> {
        if self.closed {
            return err_action("draw from closed wall");
        }
        if self.kan_pending {
            return err_action("draw before kan dora reveal");
        }
        if self.live_count() == 0 {
            return err_action("draw from exhausted wall");
        }
        let t = self.tiles[WALL_TOTAL - 1 - self.drawn_live];
        self.drawn_live += 1;
        Ok(t)
    }

    // 嶺上牌のツモ
    pub fn kan_draw(&mut self) -> Res<Tile> {
        if self.closed {
            return err_action("kan draw from closed wall");
        }
        if self.kan_pending {
            return err_action("kan draw before kan dora reveal");
        }
        if self.live_count() == 0 {
            return err_action("kan draw from exhausted wall");
        }
        if self.indicators.len() >= 5 {
            return err_action("kan draw after 4 kans");
        }

        let t = self.tiles[self.drawn_kan];
        self.drawn_kan += 1;
        if self.kan_dora_enabled {
            self.kan_pending = true;
        } else {
            // カンドラなしでも開槓の枠は消費する (表示数は不変)
            self.indicators.push(None);
        }
        Ok(t)
    }

    // 槓ドラをめくる
    pub fn reveal_kan_dora(&mut self) -> Res<Tile> {
        if !self.kan_pending {
            return err_action("kan dora reveal without kan draw");
        }
        self.kan_pending = false;
        let idx = 4 + 2 * self.indicators.len();
        let t = self.tiles[idx];
        self.indicators.push(Some(t));
        if self.ura_enabled && self.kan_ura_enabled {
            self.ura_count += 1;
        }
        Ok(t)
    }

    // 局終了時に牌山を閉じる. 裏ドラはこれ以降のみ参照できる.
    pub fn close(&mut self) {
        self.closed = true;
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl WallView for Wall {
    // 残りツモ可能枚数 (王牌は含まない)
    fn live_count(&self) -> usize {
        WALL_TOTAL - DEAD_WALL - self.drawn_live - self.drawn_kan
    }

    fn dora_indicators(&self) -> Vec<Tile> {
        self.indicators.iter().filter_map(|&t| t).collect()
    }

    fn ura_indicators(&self) -> Option<Vec<Tile>> {
        if !self.closed || !self.ura_enabled {
            return None;
        }
        Some((0..self.ura_count).map(|i| self.tiles[5 + 2 * i]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(rule: &Rule, seed: u64) -> Wall {
        let mut rng = SeededSource::new(seed);
        Wall::new(rule, &mut rng)
    }

    #[test]
    fn test_wall_construction() {
        let rule = Rule::default();
        let w = wall(&rule, 0);
        assert_eq!(w.live_count(), 122);
        assert_eq!(w.dora_indicators().len(), 1);
        assert_eq!(w.ura_indicators(), None); // close前は非公開

        // 全136牌: 各牌4枚, 赤5は各色1枚
        let mut counts = TileTable::default();
        for &t in &w.tiles {
            inc_tile(&mut counts, t).unwrap();
        }
        assert_eq!(counts[TM][0], 1);
        assert_eq!(counts[TM][5], 4);
        assert_eq!(counts[TZ][DR], 4);
    }

    #[test]
    fn test_shuffle_determinism() {
        let rule = Rule::default();
        let w1 = wall(&rule, 42);
        let w2 = wall(&rule, 42);
        assert_eq!(w1.tiles, w2.tiles);

        let w3 = wall(&rule, 43);
        assert_ne!(w1.tiles, w3.tiles);
    }

    #[test]
    fn test_draw_exhaustion() {
        let rule = Rule::default();
        let mut w = wall(&rule, 1);
        for _ in 0..122 {
            w.draw().unwrap();
        }
        assert_eq!(w.live_count(), 0);
        assert!(w.draw().is_err());
        assert!(w.kan_draw().is_err());
    }

    #[test]
    fn test_kan_dora_flow() {
        let rule = Rule::default();
        let mut w = wall(&rule, 2);

        w.kan_draw().unwrap();
        assert!(w.kan_draw().is_err()); // 開槓前の連続カンは不可
        assert!(w.draw().is_err()); // 開槓前のツモも不可
        w.reveal_kan_dora().unwrap();
        assert_eq!(w.dora_indicators().len(), 2);

        w.kan_draw().unwrap();
        w.reveal_kan_dora().unwrap();
        w.kan_draw().unwrap();
        w.reveal_kan_dora().unwrap();
        w.kan_draw().unwrap();
        w.reveal_kan_dora().unwrap();
        assert_eq!(w.dora_indicators().len(), 5);

        // 5つ目の開槓は不可
        assert!(w.kan_draw().is_err());

        // 嶺上ツモも残りツモ数を減らす
        assert_eq!(w.live_count(), 122 - 4);
    }

    #[test]
    fn test_kan_dora_disabled() {
        let mut rule = Rule::default();
        rule.kan_dora = false;
        let mut w = wall(&rule, 3);

        // カンドラなしでも4回の嶺上ツモは可能, 表示牌は増えない
        for _ in 0..4 {
            w.kan_draw().unwrap();
        }
        assert_eq!(w.dora_indicators().len(), 1);
        assert!(w.kan_draw().is_err());
    }

    #[test]
    fn test_ura_dora() {
        let rule = Rule::default();
        let mut w = wall(&rule, 4);
        assert_eq!(w.ura_indicators(), None);
        w.close();
        assert_eq!(w.ura_indicators().unwrap().len(), 1);
        assert!(w.draw().is_err()); // closeの後はツモ不可

        // 裏ドラなしの場合はclose後もNone
        let mut rule2 = Rule::default();
        rule2.ura_dora = false;
        let mut w = wall(&rule2, 4);
        w.close();
        assert_eq!(w.ura_indicators(), None);

        // カンの分だけカン裏も増える
        let mut w = wall(&rule, 5);
        w.kan_draw().unwrap();
        w.reveal_kan_dora().unwrap();
        w.close();
        assert_eq!(w.ura_indicators().unwrap().len(), 2);

        // カン裏なしの場合は増えない
        let mut rule3 = Rule::default();
        rule3.kan_ura = false;
        let mut w = wall(&rule3, 5);
        w.kan_draw().unwrap();
        w.reveal_kan_dora().unwrap();
        w.close();
        assert_eq!(w.ura_indicators().unwrap().len(), 1);
    }

    #[test]
    fn test_wall_accounting() {
        // 通常ツモ + 嶺上ツモ + 王牌残り = 136
        let rule = Rule::default();
        let mut w = wall(&rule, 6);
        for _ in 0..52 {
            w.draw().unwrap();
        }
        w.kan_draw().unwrap();
        w.reveal_kan_dora().unwrap();
        assert_eq!(w.live_count(), 136 - DEAD_WALL - 52 - 1);
        assert_eq!(w.dora_indicators().len(), 2);
    }
}
