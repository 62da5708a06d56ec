use super::shanten::{shanten, waits};
use crate::model::*;

// 和了・聴牌まわりの問い合わせ
// シャンテン計算を唯一の判定器として使い, 判定間の食い違いを避ける.

// 和了形判定 (14枚状態)
pub fn is_agari(hand: &Hand) -> bool {
    shanten(hand) == -1
}

// 聴牌判定 (13枚状態)
pub fn is_tenpai(hand: &Hand) -> bool {
    shanten(hand) == 0
}

// 和了牌の一覧 (13枚状態, 聴牌していなければ空)
pub fn winning_tiles(hand: &Hand) -> Vec<Tile> {
    if hand.drawn().is_some() {
        return vec![];
    }
    if shanten(hand) != 0 {
        return vec![];
    }
    waits(hand).unwrap_or_default()
}

// 聴牌となる打牌と待ちの一覧 (ツモ番14枚状態)
// リーチ宣言可能な打牌の判定に使用する. 待ちの全てを自分で使い切っている
// 打牌(空聴)は除外する.
pub fn tenpai_discards(hand: &Hand, kuikae_level: usize) -> Vec<(Tile, Vec<Tile>)> {
    let discards = match hand.legal_discards(kuikae_level) {
        Some(v) => v,
        None => return vec![],
    };

    let mut res: Vec<(Tile, Vec<Tile>)> = vec![];
    for (t, _) in discards {
        if res.iter().any(|(d, _)| *d == t) {
            continue; // ツモ切りと手出しの重複
        }
        let mut h = hand.clone();
        if h.discard(t, false, false).is_err() {
            continue;
        }
        let ws = winning_tiles(&h);
        if ws.is_empty() {
            continue;
        }
        // 待ち牌が場に残っているか (自分で4枚使い切っていないか)
        let counts = h.counts();
        if ws.iter().all(|w| counts[w.0][w.1] >= TILE) {
            continue;
        }
        res.push((t, ws));
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agari_tenpai() {
        assert!(is_agari(&Hand::from_str("m123p456s789z11122").unwrap()));
        assert!(!is_agari(&Hand::from_str("m123p456s789z11123").unwrap()));
        assert!(is_tenpai(&Hand::from_str("m123p456s789z1122").unwrap()));
        assert!(!is_tenpai(&Hand::from_str("m123p456s789z1234").unwrap()));
    }

    #[test]
    fn test_winning_tiles() {
        let ws = winning_tiles(&Hand::from_str("m123p456s789z1122").unwrap());
        let ws: Vec<String> = ws.iter().map(|t| t.to_string()).collect();
        assert_eq!(ws, ["z1", "z2"]);

        assert!(winning_tiles(&Hand::from_str("m123p456s789z1234").unwrap()).is_empty());
    }

    #[test]
    fn test_tenpai_discards() {
        let mut hand = Hand::from_str("m123p456s789z1122").unwrap();
        hand.draw(Tile(TM, 9), true).unwrap();
        let v = tenpai_discards(&hand, 0);
        // m9切りのみがシャンポン聴牌を維持
        assert_eq!(v.len(), 1);
        assert!(v.iter().any(|(t, ws)| *t == Tile(TM, 9) && ws.len() == 2));

        // 聴牌が取れない手
        let mut hand = Hand::from_str("m135p579s139z1234").unwrap();
        hand.draw(Tile(TZ, 5), true).unwrap();
        assert!(tenpai_discards(&hand, 0).is_empty());
    }
}
