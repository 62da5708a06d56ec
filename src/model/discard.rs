use std::collections::HashSet;

use super::*;

// 捨て牌1枚分の情報
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sute {
    pub tile: Tile,
    pub tsumogiri: bool,                // ツモ切り ('_')
    pub riichi: bool,                   // リーチ宣言牌 ('*')
    pub claimed: Option<Direction>,     // 鳴かれた場合の相対方向
}

// 河. フリテン判定用に正規化した牌種の集合を併せて保持する.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscardPile {
    pile: Vec<Sute>,
    #[serde(skip)]
    seen: HashSet<(Type, Tnum)>,
}

impl DiscardPile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discard(&mut self, tile: Tile, tsumogiri: bool, riichi: bool) -> Res {
        if tile == Z8 {
            return err_action("discard of hidden tile");
        }
        let n = tile.to_normal();
        self.seen.insert((n.0, n.1));
        self.pile.push(Sute {
            tile,
            tsumogiri,
            riichi,
            claimed: None,
        });
        Ok(())
    }

    // 直前の捨て牌が鳴かれたことを記録
    pub fn mark_called(&mut self, d: Direction) -> Res {
        match self.pile.last_mut() {
            Some(s) => {
                s.claimed = Some(d);
                Ok(())
            }
            None => err_action("call on empty discard pile"),
        }
    }

    // フリテン判定用の正規化済み所在チェック
    pub fn contains(&self, tile: Tile) -> bool {
        let n = tile.to_normal();
        self.seen.contains(&(n.0, n.1))
    }

    #[inline]
    pub fn sutes(&self) -> &[Sute] {
        &self.pile
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pile.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pile.is_empty()
    }
}

impl fmt::Display for Sute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tile)?;
        if self.tsumogiri {
            write!(f, "_")?;
        }
        if self.riichi {
            write!(f, "*")?;
        }
        if let Some(d) = self.claimed {
            write!(f, "{}", d.to_char())?;
        }
        Ok(())
    }
}

impl fmt::Display for DiscardPile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v: Vec<String> = self.pile.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", v.join(","))
    }
}

#[test]
fn test_discard_pile() {
    let mut he = DiscardPile::new();
    he.discard(Tile::parse("m1").unwrap(), false, false).unwrap();
    he.discard(Tile::parse("p0").unwrap(), true, false).unwrap();
    he.discard(Tile::parse("z7").unwrap(), false, true).unwrap();
    he.mark_called(Direction::Toimen).unwrap();

    assert_eq!(he.to_string(), "m1,p0_,z7*=");
    assert_eq!(he.len(), 3);

    // 赤5は通常5に正規化して照合
    assert!(he.contains(Tile::parse("p5").unwrap()));
    assert!(he.contains(Tile::parse("p0").unwrap()));
    assert!(!he.contains(Tile::parse("m5").unwrap()));

    assert!(DiscardPile::new().mark_called(Direction::Kamicha).is_err());
}
