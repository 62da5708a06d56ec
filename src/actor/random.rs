use rand::prelude::*;

use super::*;
use crate::hand::{shanten, tenpai_discards, winning_tiles};

// イベントから自分の手牌を追跡し, 合法手からランダムに選択するエージェント
// 対局テストのドライバとして使用する. 和了宣言の最終的な妥当性検証
// (フリテン・役の有無)は状態機械側に任せる.
#[derive(Clone)]
pub struct RandomAgent {
    seat: Seat,
    rng: StdRng,
    hand: Hand,
    call_rate: f64, // 鳴き・カン・リーチを試みる確率
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            seat: 0,
            rng: SeedableRng::seed_from_u64(seed),
            hand: Hand::new(),
            call_rate: 0.3,
        }
    }

    fn chance(&mut self) -> bool {
        self.rng.gen::<f64>() < self.call_rate
    }

    // ツモ番の応答 (ツモ・嶺上ツモ共通)
    fn turn_reply(&mut self) -> Reply {
        if shanten(&self.hand) == -1 {
            return Reply::Hule;
        }

        if let Some(kans) = self.hand.legal_kan(None) {
            if !kans.is_empty() && self.chance() {
                let i = self.rng.gen_range(0..kans.len());
                return Reply::gang(kans[i].clone());
            }
        }

        if self.hand.is_menzen() && !self.hand.is_riichi() && self.chance() {
            let tenpais = tenpai_discards(&self.hand, 0);
            if !tenpais.is_empty() {
                let i = self.rng.gen_range(0..tenpais.len());
                return Reply::dapai(tenpais[i].0, false, true);
            }
        }

        self.random_discard()
    }

    fn random_discard(&mut self) -> Reply {
        match self.hand.legal_discards(0) {
            Some(v) if !v.is_empty() => {
                let (tile, tsumogiri) = v[self.rng.gen_range(0..v.len())];
                Reply::dapai(tile, tsumogiri, false)
            }
            _ => Reply::None,
        }
    }

    // 他家の打牌への応答
    fn claim_reply(&mut self, seat: Seat, tile: Tile) -> Reply {
        if winning_tiles(&self.hand)
            .iter()
            .any(|w| *w == tile.to_normal())
        {
            return Reply::Hule;
        }

        if !self.chance() {
            return Reply::None;
        }
        let d = match Direction::of_seat(self.seat, seat) {
            Ok(d) => d,
            Err(_) => return Reply::None,
        };

        if let Some(kans) = self.hand.legal_kan(Some((tile, d))) {
            if !kans.is_empty() && self.chance() {
                return Reply::fulou(kans[0].clone());
            }
        }
        if let Some(pons) = self.hand.legal_pon(tile, d) {
            if !pons.is_empty() {
                return Reply::fulou(pons[0].clone());
            }
        }
        if d == Direction::Kamicha {
            if let Some(chis) = self.hand.legal_chi(tile, 0) {
                if !chis.is_empty() {
                    let i = self.rng.gen_range(0..chis.len());
                    return Reply::fulou(chis[i].clone());
                }
            }
        }
        Reply::None
    }
}

impl Actor for RandomAgent {
    fn init(&mut self, seat: Seat) {
        self.seat = seat;
    }

    fn act(&mut self, event: &Event) -> Reply {
        match event {
            Event::Qipai(e) => {
                // 自分の配牌のみ見える
                match Hand::from_str(&e.hands[self.seat]) {
                    Ok(h) => self.hand = h,
                    Err(_) => self.hand = Hand::new(),
                }
                Reply::None
            }
            Event::Zimo(e) => {
                if e.seat == self.seat {
                    let _ = self.hand.draw(e.tile, false);
                    self.turn_reply()
                } else {
                    Reply::None
                }
            }
            Event::Gangzimo(e) => {
                if e.seat == self.seat {
                    let _ = self.hand.draw(e.tile, false);
                    self.turn_reply()
                } else {
                    Reply::None
                }
            }
            Event::Dapai(e) => {
                if e.seat == self.seat {
                    let _ = self.hand.discard(e.tile, e.riichi, false);
                    Reply::None
                } else {
                    self.claim_reply(e.seat, e.tile)
                }
            }
            Event::Fulou(e) => {
                if e.seat == self.seat {
                    let _ = self.hand.call(&e.meld, false);
                    self.random_discard()
                } else {
                    Reply::None
                }
            }
            Event::Gang(e) => {
                if e.seat == self.seat {
                    let _ = self.hand.kan(&e.meld, false);
                    Reply::None
                } else if e.meld.meld_type == MeldType::Kakan {
                    // 槍槓
                    let added = Tile(e.meld.tile_type, e.meld.added.unwrap_or(0));
                    if winning_tiles(&self.hand)
                        .iter()
                        .any(|w| *w == added.to_normal())
                    {
                        Reply::Hule
                    } else {
                        Reply::None
                    }
                } else {
                    Reply::None
                }
            }
            _ => Reply::None,
        }
    }

    fn name(&self) -> &str {
        "RandomAgent"
    }
}
