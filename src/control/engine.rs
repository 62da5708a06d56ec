use super::wall::{RandomSource, SeededSource, Wall, WallView};
use crate::actor::Actor;
use crate::hand::{
    evaluate_hand, shanten, tenpai_discards, win_decompositions, winning_tiles, SetKind, YakuFlags,
};
use crate::listener::Listener;
use crate::model::*;
use crate::warn;
use serde::Serialize;

// 状態機械の状態
// Kaijuが初期状態, Jiejuが終端. 各状態はイベントの配信と応答の解決を1単位で行う.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Kaiju,
    Qipai,
    Zimo,
    Dapai,
    Fulou,
    Gang,
    Gangzimo,
    Hule,
    Pingju,
    Last,
    Jieju,
    Done,
}

// 対局記録
// 局ごとのイベント列(先頭はqipai, 末尾はhuleまたはpingju)と最終結果を持つ.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub rule: Rule,
    pub qijia: Seat,
    pub rounds: Vec<Vec<Event>>,
    pub result: Option<EventJieju>,
}

// 責任払いの記録 (対象の役満名と支払い責任者)
#[derive(Debug, Clone, Copy)]
struct Pao {
    liable: Seat,
    yakuman: &'static str,
}

// 局の終わり方
#[derive(Debug, Clone)]
enum RoundResult {
    Tsumo,
    Ron(Vec<Seat>), // 頭ハネ順
    Draw(DrawType),
}

pub struct Game {
    rule: Rule,
    actors: [Box<dyn Actor>; SEAT],
    listeners: Vec<Box<dyn Listener>>,
    rng: Box<dyn RandomSource + Send>,

    // 半荘を通じた状態
    phase: Phase,
    paused: bool,
    qijia: Seat,
    round: usize,      // 場風 (東:0, 南:1, 西:2, 北:3)
    dealer_num: usize, // 起家から数えた局数 (0..3)
    honba: usize,
    riichi_sticks: usize,
    scores: [Score; SEAT],
    extension: bool, // 延長戦中
    record: GameRecord,

    // 局ごとの状態
    wall: Option<Wall>,
    hands: [Hand; SEAT],
    piles: [DiscardPile; SEAT],
    riichi_state: [usize; SEAT], // 0:なし 1:リーチ 2:ダブルリーチ
    riichi_pending: Option<Seat>,
    ippatsu: [bool; SEAT],
    furiten: [bool; SEAT],      // 自分の河によるフリテン
    furiten_stuck: [bool; SEAT], // リーチ後見逃しの永続フリテン
    furiten_temp: [bool; SEAT], // 見逃しの一時フリテン (次の自摸で解除)
    waits: [Vec<Tile>; SEAT],
    n_kans: [usize; SEAT],
    rinshan: [bool; SEAT],
    pao: [Option<Pao>; SEAT],
    first_go: bool, // 鳴きのない最初の一巡
    turn: Seat,
    last_discard: Option<(Seat, Tile)>,
    pending_discard: Option<DapaiReply>,
    pending_meld: Option<Meld>, // Fulou/Gangで処理する面子 (実行者はturn)
    pending_kan_dora: usize,    // 打牌後にめくる槓ドラの数
    suukaikan_armed: bool,
    last_kan_ankan: bool,
    result: Option<RoundResult>,
    chankan_tile: Option<Tile>,
    dealer_continues: bool,
}

impl Game {
    pub fn new(
        rule: Rule,
        actors: [Box<dyn Actor>; SEAT],
        listeners: Vec<Box<dyn Listener>>,
        seed: u64,
    ) -> Self {
        Self::with_rng(rule, actors, listeners, Box::new(SeededSource::new(seed)))
    }

    pub fn with_rng(
        rule: Rule,
        actors: [Box<dyn Actor>; SEAT],
        listeners: Vec<Box<dyn Listener>>,
        rng: Box<dyn RandomSource + Send>,
    ) -> Self {
        let scores = [rule.origin_points; SEAT];
        let record = GameRecord {
            rule: rule.clone(),
            qijia: 0,
            rounds: vec![],
            result: None,
        };
        Self {
            rule,
            actors,
            listeners,
            rng,
            phase: Phase::Kaiju,
            paused: false,
            qijia: 0,
            round: 0,
            dealer_num: 0,
            honba: 0,
            riichi_sticks: 0,
            scores,
            extension: false,
            record,
            wall: None,
            hands: Default::default(),
            piles: Default::default(),
            riichi_state: [0; SEAT],
            riichi_pending: None,
            ippatsu: [false; SEAT],
            furiten: [false; SEAT],
            furiten_stuck: [false; SEAT],
            furiten_temp: [false; SEAT],
            waits: Default::default(),
            n_kans: [0; SEAT],
            rinshan: [false; SEAT],
            pao: [None; SEAT],
            first_go: true,
            turn: 0,
            last_discard: None,
            pending_discard: None,
            pending_meld: None,
            pending_kan_dora: 0,
            suukaikan_armed: false,
            last_kan_ankan: false,
            result: None,
            chankan_tile: None,
            dealer_continues: false,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }

    #[inline]
    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    #[inline]
    pub fn scores(&self) -> [Score; SEAT] {
        self.scores
    }

    // 次回のstepをスキップさせる停止フック
    pub fn stop(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    // 終端まで同期実行
    pub fn run(&mut self) {
        while !self.is_finished() && !self.paused {
            self.step();
        }
    }

    // 状態機械を1状態進める
    pub fn step(&mut self) {
        if self.paused {
            return;
        }
        match self.phase {
            Phase::Kaiju => self.do_kaiju(),
            Phase::Qipai => self.do_qipai(),
            Phase::Zimo => self.do_zimo(),
            Phase::Dapai => self.do_dapai(),
            Phase::Fulou => self.do_fulou(),
            Phase::Gang => self.do_gang(),
            Phase::Gangzimo => self.do_gangzimo(),
            Phase::Hule => self.do_hule(),
            Phase::Pingju => self.do_pingju(),
            Phase::Last => self.do_last(),
            Phase::Jieju => self.do_jieju(),
            Phase::Done => {}
        }
    }

    #[inline]
    fn dealer(&self) -> Seat {
        (self.qijia + self.dealer_num) % SEAT
    }

    #[inline]
    fn prevalent_wind(&self) -> Tnum {
        self.round % SEAT + 1
    }

    #[inline]
    fn seat_wind(&self, seat: Seat) -> Tnum {
        (seat + SEAT - self.dealer()) % SEAT + 1
    }

    #[inline]
    fn wall_mut(&mut self) -> &mut Wall {
        self.wall.as_mut().unwrap()
    }

    fn live_count(&self) -> usize {
        self.wall.as_ref().map(|w| w.live_count()).unwrap_or(0)
    }

    // イベントを配信して全席の応答を回収する
    // Listenerには伏せなしのイベントを, Actorには各座席用に伏せた複製を渡す.
    fn broadcast(&mut self, event: Event) -> [Reply; SEAT] {
        for l in &mut self.listeners {
            l.on_event(&event);
        }
        let mut replies: [Reply; SEAT] = Default::default();
        for s in 0..SEAT {
            replies[s] = self.actors[s].act(&event.masked_for(s));
        }
        if !matches!(event, Event::Kaiju(_) | Event::Jieju(_)) {
            if let Some(round) = self.record.rounds.last_mut() {
                round.push(event);
            }
        }
        replies
    }

    // [Kaiju] 対局開始
    fn do_kaiju(&mut self) {
        self.qijia = (self.rng.next_f64() * SEAT as f64) as usize % SEAT;
        self.record.qijia = self.qijia;
        for s in 0..SEAT {
            self.actors[s].init(s);
        }
        self.broadcast(Event::Kaiju(EventKaiju {
            qijia: self.qijia,
            rule: self.rule.clone(),
        }));
        self.phase = Phase::Qipai;
    }

    // [Qipai] 配牌
    fn do_qipai(&mut self) {
        let mut wall = Wall::new(&self.rule, self.rng.as_mut());

        // 親から順に13枚ずつ
        let dealer = self.dealer();
        let mut hands: [Hand; SEAT] = Default::default();
        for i in 0..SEAT {
            let s = (dealer + i) % SEAT;
            let mut tiles = vec![];
            for _ in 0..13 {
                tiles.push(wall.draw().unwrap());
            }
            hands[s] = Hand::from_tiles(&tiles).unwrap();
        }

        let dora_indicator = wall.dora_indicators()[0];
        self.wall = Some(wall);
        self.hands = hands;
        self.piles = Default::default();
        self.riichi_state = [0; SEAT];
        self.riichi_pending = None;
        self.ippatsu = [false; SEAT];
        self.furiten = [false; SEAT];
        self.furiten_stuck = [false; SEAT];
        self.furiten_temp = [false; SEAT];
        self.n_kans = [0; SEAT];
        self.rinshan = [false; SEAT];
        self.pao = [None; SEAT];
        self.first_go = true;
        self.turn = dealer;
        self.last_discard = None;
        self.pending_discard = None;
        self.pending_meld = None;
        self.pending_kan_dora = 0;
        self.suukaikan_armed = false;
        self.last_kan_ankan = false;
        self.result = None;
        self.chankan_tile = None;
        self.dealer_continues = false;
        for s in 0..SEAT {
            self.waits[s] = winning_tiles(&self.hands[s]);
        }

        self.record.rounds.push(vec![]);
        let hand_strs = [
            self.hands[0].to_string(),
            self.hands[1].to_string(),
            self.hands[2].to_string(),
            self.hands[3].to_string(),
        ];
        self.broadcast(Event::Qipai(EventQipai {
            round: self.round,
            dealer,
            honba: self.honba,
            riichi_sticks: self.riichi_sticks,
            dora_indicator,
            hands: hand_strs,
            scores: self.scores,
        }));
        self.phase = Phase::Zimo;
    }

    // [Zimo] ツモ
    fn do_zimo(&mut self) {
        let turn = self.turn;
        let tile = self.wall_mut().draw().unwrap();
        self.hands[turn].draw(tile, true).unwrap();
        if !self.hands[turn].is_riichi() {
            self.furiten_temp[turn] = false;
        }

        let live_count = self.live_count();
        let replies = self.broadcast(Event::Zimo(EventZimo {
            seat: turn,
            tile,
            live_count,
        }));
        self.handle_turn_reply(replies[turn].clone(), true);
    }

    // [Gangzimo] 嶺上ツモ
    fn do_gangzimo(&mut self) {
        let turn = self.turn;
        let tile = self.wall_mut().kan_draw().unwrap();
        self.hands[turn].draw(tile, true).unwrap();
        self.rinshan[turn] = true;

        // 暗槓は常に即めくり. 明槓・加槓は後乗せでない場合のみここでめくる.
        if self.last_kan_ankan || !self.rule.kan_dora_delayed {
            self.reveal_pending_kan_dora();
        }

        let replies = self.broadcast(Event::Gangzimo(EventGangzimo { seat: turn, tile }));
        self.handle_turn_reply(replies[turn].clone(), false);
    }

    // 不正な応答は「応答なし」として扱い, 記録だけ残す
    fn reject_reply(&self, seat: Seat, what: impl std::fmt::Display) {
        let err = EngineError::InvalidReply(format!("seat {}: {}", seat, what));
        warn!("{}", err);
    }

    // ツモ番の応答処理 (Zimo/Gangzimo共通)
    fn handle_turn_reply(&mut self, reply: Reply, allow_daopai: bool) {
        let turn = self.turn;
        match reply {
            Reply::Hule => {
                if self.allow_tsumo() {
                    self.result = Some(RoundResult::Tsumo);
                    self.phase = Phase::Hule;
                    return;
                }
                self.reject_reply(turn, "tsumo declaration");
            }
            Reply::Daopai => {
                if allow_daopai && self.allow_kyuushu() {
                    self.result = Some(RoundResult::Draw(DrawType::Kyuushukyuuhai));
                    self.phase = Phase::Pingju;
                    return;
                }
                self.reject_reply(turn, "kyuushu declaration");
            }
            Reply::Gang { meld } => {
                if self.allow_kan(&meld) {
                    self.pending_meld = Some(meld);
                    self.phase = Phase::Gang;
                    return;
                }
                self.reject_reply(turn, format!("kan '{}'", meld));
            }
            Reply::Dapai(d) => {
                if self.allow_discard(&d) {
                    self.pending_discard = Some(d);
                    self.phase = Phase::Dapai;
                    return;
                }
                self.reject_reply(turn, format!("discard '{}'", d.tile));
            }
            Reply::None | Reply::Fulou { .. } => {}
        }

        // デフォルト: ツモ切り
        let tile = self.hands[turn].drawn_tile().unwrap();
        self.pending_discard = Some(DapaiReply {
            tile,
            tsumogiri: true,
            riichi: false,
        });
        self.phase = Phase::Dapai;
    }

    // [Dapai] 打牌と他家の応答解決
    fn do_dapai(&mut self) {
        let turn = self.turn;
        let d = self.pending_discard.take().unwrap();
        let mut tsumogiri = d.tsumogiri;
        if self.hands[turn].drawn_tile() == Some(d.tile) {
            // ツモ牌と同じ表記の牌が1枚しかなければ自動的にツモ切り
            let counts = self.hands[turn].counts();
            let t = d.tile;
            let exact = if t.is_red5() {
                counts[t.0][0]
            } else if t.1 == 5 {
                counts[t.0][5] - counts[t.0][0]
            } else {
                counts[t.0][t.1]
            };
            if exact == 1 {
                tsumogiri = true;
            }
        } else {
            tsumogiri = false; // ツモ牌以外はツモ切りになりえない
        }

        if d.riichi {
            self.riichi_state[turn] = if self.first_go && self.piles[turn].is_empty() {
                2 // ダブルリーチ
            } else {
                1
            };
            self.riichi_pending = Some(turn);
            if self.rule.ippatsu {
                self.ippatsu[turn] = true;
            }
        } else {
            self.ippatsu[turn] = false;
        }

        self.hands[turn].discard(d.tile, d.riichi, true).unwrap();
        self.piles[turn].discard(d.tile, tsumogiri, d.riichi).unwrap();
        self.rinshan[turn] = false;
        self.last_discard = Some((turn, d.tile));
        if self.piles[turn].len() >= 2 {
            self.first_go = false;
        }

        // 手牌が13枚に戻ったので待ちとフリテンを更新
        self.waits[turn] = winning_tiles(&self.hands[turn]);
        self.furiten[turn] = self.waits[turn]
            .iter()
            .any(|&w| self.piles[turn].contains(w));

        let replies = self.broadcast(Event::Dapai(EventDapai {
            seat: turn,
            tile: d.tile,
            tsumogiri,
            riichi: d.riichi,
        }));

        // 打牌後にめくる槓ドラ
        self.reveal_pending_kan_dora();

        self.resolve_claims(&replies, d.tile);
    }

    // 打牌に対する応答の優先順位解決 (ロン > カン・ポン > チー)
    fn resolve_claims(&mut self, replies: &[Reply; SEAT], tile: Tile) {
        let turn = self.turn;

        // ロンの検証 (放銃者から近い順)
        let mut rons = vec![];
        for i in 1..SEAT {
            let s = (turn + i) % SEAT;
            if replies[s] == Reply::Hule && self.allow_ron(s, tile, false) {
                rons.push(s);
            }
        }

        if rons.len() == 3 && self.rule.max_simultaneous_win == 2 {
            // 三家和
            self.result = Some(RoundResult::Draw(DrawType::Sanchahou));
            self.phase = Phase::Pingju;
            return;
        }
        if !rons.is_empty() {
            rons.truncate(self.rule.max_simultaneous_win);
            self.riichi_pending = None; // ロンされたリーチ宣言は不成立
            self.result = Some(RoundResult::Ron(rons));
            self.phase = Phase::Hule;
            return;
        }

        // リーチ宣言の成立 (供託化)
        if let Some(s) = self.riichi_pending.take() {
            self.scores[s] -= 1000;
            self.riichi_sticks += 1;
        }

        // 途中流局
        if self.rule.interrupted_draws {
            if self.check_suufonrenda() {
                self.result = Some(RoundResult::Draw(DrawType::Suufonrenda));
                self.phase = Phase::Pingju;
                return;
            }
            if (0..SEAT).all(|s| self.riichi_state[s] > 0) {
                self.result = Some(RoundResult::Draw(DrawType::Suuchariichi));
                self.phase = Phase::Pingju;
                return;
            }
            if self.suukaikan_armed {
                self.result = Some(RoundResult::Draw(DrawType::Suukaikan));
                self.phase = Phase::Pingju;
                return;
            }
        }

        // 見逃しフリテン (鳴かれた場合も含め, 和了牌が通過した時点で成立)
        for s in 0..SEAT {
            if s != turn && self.waits[s].iter().any(|&w| w == tile.to_normal()) {
                if self.riichi_state[s] > 0 {
                    self.furiten_stuck[s] = true;
                } else {
                    self.furiten_temp[s] = true;
                }
            }
        }

        // 鳴きの解決 (カン > ポン > チー, チーは下家のみ)
        if self.live_count() > 0 {
            for i in 1..SEAT {
                let s = (turn + i) % SEAT;
                if let Reply::Fulou { meld } = &replies[s] {
                    if matches!(meld.meld_type, MeldType::Minkan | MeldType::Pon)
                        && self.allow_call(s, meld, tile)
                    {
                        self.turn = s;
                        self.pending_meld = Some(meld.clone());
                        self.phase = Phase::Fulou;
                        return;
                    }
                }
            }
            let shimocha = (turn + 1) % SEAT;
            if let Reply::Fulou { meld } = &replies[shimocha] {
                if meld.meld_type == MeldType::Chi && self.allow_call(shimocha, meld, tile) {
                    self.turn = shimocha;
                    self.pending_meld = Some(meld.clone());
                    self.phase = Phase::Fulou;
                    return;
                }
            }
        }

        // 荒牌平局または次のツモへ
        if self.live_count() == 0 {
            self.collect_noten_declarations(replies);
            self.result = Some(RoundResult::Draw(DrawType::Ryuukyoku));
            self.phase = Phase::Pingju;
        } else {
            self.turn = (turn + 1) % SEAT;
            self.phase = Phase::Zimo;
        }
    }

    // ノーテン宣言ありの場合, 最終打牌への応答でdaopaiを受け付ける
    fn collect_noten_declarations(&mut self, replies: &[Reply; SEAT]) {
        if !self.rule.noten_declaration {
            return;
        }
        for s in 0..SEAT {
            if s != self.turn && replies[s] != Reply::Daopai && self.riichi_state[s] == 0 {
                self.waits[s] = vec![]; // 宣言なしはノーテン扱い
            }
        }
    }

    // [Fulou] チー・ポン・大明槓の成立
    fn do_fulou(&mut self) {
        let caller = self.turn;
        let meld = self.pending_meld.take().unwrap();
        let (discarder, _) = self.last_discard.unwrap();

        self.piles[discarder]
            .mark_called(Direction::of_seat(discarder, caller).unwrap())
            .unwrap();
        self.hands[caller].call(&meld, true).unwrap();
        self.ippatsu = [false; SEAT];
        self.first_go = false;
        self.check_pao(caller, &meld);

        let is_minkan = meld.meld_type == MeldType::Minkan;
        let replies = self.broadcast(Event::Fulou(EventFulou {
            seat: caller,
            meld,
        }));

        if is_minkan {
            self.n_kans[caller] += 1;
            self.arm_suukaikan();
            if self.rule.kan_dora {
                self.pending_kan_dora += 1;
            }
            self.last_kan_ankan = false;
            self.phase = Phase::Gangzimo;
            return;
        }

        // 鳴いた本人は打牌で応答する
        match &replies[caller] {
            Reply::Dapai(d) if !d.riichi && self.allow_discard(d) => {
                self.pending_discard = Some(*d);
            }
            _ => {
                // 応答が無効な場合は打牌可能な最初の牌
                let v = self.hands[caller]
                    .legal_discards(self.rule.kuikae_level)
                    .unwrap_or_default();
                match v.first() {
                    Some(&(tile, tsumogiri)) => {
                        self.pending_discard = Some(DapaiReply {
                            tile,
                            tsumogiri,
                            riichi: false,
                        });
                    }
                    None => {
                        // 喰い替え禁止で打牌不能は検証済みのため到達しない
                        warn!("seat {}: no legal discard after call", caller);
                    }
                }
            }
        }
        self.phase = Phase::Dapai;
    }

    // [Gang] 暗槓・加槓の宣言と槍槓の解決
    fn do_gang(&mut self) {
        let turn = self.turn;
        let meld = self.pending_meld.take().unwrap();
        let is_kakan = meld.meld_type == MeldType::Kakan;
        let added = meld.added.map(|n| Tile(meld.tile_type, n));

        self.hands[turn].kan(&meld, true).unwrap();
        self.n_kans[turn] += 1;
        let is_ankan = meld.meld_type == MeldType::Ankan;

        let replies = self.broadcast(Event::Gang(EventGang { seat: turn, meld }));

        // 槍槓 (加槓のみ)
        if is_kakan {
            let tile = added.unwrap();
            let mut rons = vec![];
            for i in 1..SEAT {
                let s = (turn + i) % SEAT;
                if replies[s] == Reply::Hule && self.allow_ron(s, tile, true) {
                    rons.push(s);
                }
            }
            if !rons.is_empty() {
                rons.truncate(self.rule.max_simultaneous_win.max(1));
                self.chankan_tile = Some(tile);
                self.result = Some(RoundResult::Ron(rons));
                self.phase = Phase::Hule;
                return;
            }
        }

        // 槓が成立したので一発は消える
        self.ippatsu = [false; SEAT];
        self.first_go = false;
        self.arm_suukaikan();

        // 加槓を見逃した席のフリテン
        if is_kakan {
            let tile = added.unwrap();
            for s in 0..SEAT {
                if s != turn && self.waits[s].iter().any(|&w| w == tile.to_normal()) {
                    if self.riichi_state[s] > 0 {
                        self.furiten_stuck[s] = true;
                    } else {
                        self.furiten_temp[s] = true;
                    }
                }
            }
        }

        // 前の槓の後乗せ分はこの宣言の時点でめくる
        self.reveal_pending_kan_dora();
        if self.rule.kan_dora {
            self.pending_kan_dora += 1;
        }
        self.last_kan_ankan = is_ankan;
        self.phase = Phase::Gangzimo;
    }

    fn reveal_pending_kan_dora(&mut self) {
        while self.pending_kan_dora > 0 {
            self.pending_kan_dora -= 1;
            let indicator = self.wall_mut().reveal_kan_dora().unwrap();
            self.broadcast(Event::Kaigang(EventKaigang { indicator }));
        }
    }

    // 4回目の槓の成立で四開槓を予約 (1人で4回の場合を除く)
    fn arm_suukaikan(&mut self) {
        let total: usize = self.n_kans.iter().sum();
        if total == 4 && self.n_kans.iter().all(|&n| n < 4) {
            self.suukaikan_armed = true;
        }
    }

    // [Hule] 和了の精算
    fn do_hule(&mut self) {
        self.wall_mut().close();
        let result = self.result.take().unwrap();

        let (winners, is_drawn) = match &result {
            RoundResult::Tsumo => (vec![self.turn], true),
            RoundResult::Ron(seats) => (seats.clone(), false),
            _ => unreachable!(),
        };

        let dora_indicators = self.wall.as_ref().unwrap().dora_indicators();
        let any_riichi = winners.iter().any(|&s| self.riichi_state[s] > 0);
        let ura_indicators = if any_riichi {
            self.wall.as_ref().unwrap().ura_indicators()
        } else {
            None
        };

        let scores_before = self.scores;
        let mut total_delta = [0; SEAT];
        let mut contexts = vec![];
        let mut is_first = true;
        for &winner in &winners {
            let win_tile = if is_drawn {
                self.hands[winner].drawn_tile().unwrap()
            } else {
                self.chankan_tile
                    .unwrap_or_else(|| self.last_discard.unwrap().1)
            };
            let chankan = !is_drawn && self.chankan_tile.is_some();
            let ctx = self
                .evaluate_win(winner, win_tile, is_drawn, chankan, true)
                .unwrap();

            let pao = self.applicable_pao(winner, &ctx);
            let delta = if is_drawn {
                self.distribute_tsumo(winner, &ctx)
            } else {
                self.distribute_ron(winner, &ctx, pao, is_first)
            };
            for s in 0..SEAT {
                total_delta[s] += delta[s];
                self.scores[s] += delta[s];
            }
            is_first = false;

            let mut hand_str = self.hands[winner].to_string();
            if !is_drawn {
                // ロン牌を含めた形で記録
                let mut h = self.hands[winner].clone();
                let _ = h.draw(win_tile, false);
                hand_str = h.to_string();
            }
            contexts.push(WinContext {
                seat: winner,
                hand: hand_str,
                winning_tile: win_tile,
                is_dealer: winner == self.dealer(),
                is_drawn,
                is_riichi: self.riichi_state[winner] > 0,
                pao: pao.map(|p| p.liable),
                delta_scores: delta,
                score_context: ctx,
            });
        }

        // 供託はすべて清算済み
        self.riichi_sticks = 0;
        self.dealer_continues =
            self.rule.consecutive_mode >= 1 && winners.contains(&self.dealer());
        self.honba = if winners.contains(&self.dealer()) {
            self.honba + 1
        } else {
            0
        };

        self.broadcast(Event::Hule(EventHule {
            contexts,
            dora_indicators,
            ura_indicators,
            scores: scores_before,
            delta_scores: total_delta,
        }));
        self.phase = Phase::Last;
    }

    // ロンの点数移動 (本場・供託は最初の和了者のみ)
    fn distribute_ron(
        &self,
        winner: Seat,
        ctx: &ScoreContext,
        pao: Option<Pao>,
        is_first: bool,
    ) -> [Point; SEAT] {
        // 通常のロンも槍槓もturnが放銃者 (ロンではturnを動かさない)
        let discarder = self.turn;
        let mut delta = [0; SEAT];
        let mut payment = ctx.points.0;
        if is_first {
            payment += self.honba as Point * 300;
            delta[winner] += self.riichi_sticks as Point * 1000;
        }

        // 責任払いが成立している場合は責任者が全額を支払う
        let payer = pao.map(|p| p.liable).unwrap_or(discarder);
        delta[payer] -= payment;
        delta[winner] += payment;
        delta
    }

    // ツモの点数移動
    // 包が成立していても和了者は全席から通常の支払いを取り立てる.
    // 責任者の負担は自身の子方(または親方)の支払い分そのもの.
    fn distribute_tsumo(&self, winner: Seat, ctx: &ScoreContext) -> [Point; SEAT] {
        let dealer = self.dealer();
        let mut delta = [0; SEAT];
        delta[winner] += self.riichi_sticks as Point * 1000;

        for s in 0..SEAT {
            if s == winner {
                continue;
            }
            let share = if winner == dealer {
                ctx.points.1
            } else if s == dealer {
                ctx.points.2
            } else {
                ctx.points.1
            };
            let share = share + self.honba as Point * 100;
            delta[s] -= share;
            delta[winner] += share;
        }
        delta
    }

    // [Pingju] 流局の精算
    fn do_pingju(&mut self) {
        self.wall_mut().close();
        let draw_type = match self.result.take() {
            Some(RoundResult::Draw(t)) => t,
            _ => unreachable!(),
        };

        let mut hands: [Option<String>; SEAT] = Default::default();
        let mut delta = [0; SEAT];
        let mut nagashi = [0; SEAT];

        match draw_type {
            DrawType::Ryuukyoku => {
                let tenpai: Vec<bool> = (0..SEAT).map(|s| !self.waits[s].is_empty()).collect();
                for s in 0..SEAT {
                    if tenpai[s] {
                        hands[s] = Some(self.hands[s].to_string());
                    }
                }

                // 流し満貫の判定が罰符より優先
                let nagashi_seats: Vec<Seat> = if self.rule.nagashi_mangan {
                    (0..SEAT).filter(|&s| self.is_nagashi(s)).collect()
                } else {
                    vec![]
                };
                if !nagashi_seats.is_empty() {
                    let dealer = self.dealer();
                    for &s in &nagashi_seats {
                        if s == dealer {
                            nagashi[s] = 12000;
                            for p in 0..SEAT {
                                delta[p] += if p == s { 12000 } else { -4000 };
                            }
                        } else {
                            nagashi[s] = 8000;
                            for p in 0..SEAT {
                                delta[p] += if p == s {
                                    8000
                                } else if p == dealer {
                                    -4000
                                } else {
                                    -2000
                                };
                            }
                        }
                    }
                } else if self.rule.noten_penalty {
                    let n = tenpai.iter().filter(|&&b| b).count();
                    let (pay, recv) = match n {
                        1 => (1000, 3000),
                        2 => (1500, 1500),
                        3 => (3000, 1000),
                        _ => (0, 0),
                    };
                    for s in 0..SEAT {
                        delta[s] = if tenpai[s] { recv } else { -pay };
                    }
                }

                self.dealer_continues = match self.rule.consecutive_mode {
                    0 | 1 => false,
                    2 => tenpai[self.dealer()],
                    _ => true,
                };
            }
            DrawType::Kyuushukyuuhai => {
                hands[self.turn] = Some(self.hands[self.turn].to_string());
                self.dealer_continues = true;
            }
            DrawType::Suuchariichi => {
                for s in 0..SEAT {
                    hands[s] = Some(self.hands[s].to_string());
                }
                self.dealer_continues = true;
            }
            DrawType::Sanchahou => {
                for s in 0..SEAT {
                    if s != self.turn {
                        hands[s] = Some(self.hands[s].to_string());
                    }
                }
                self.dealer_continues = true;
            }
            DrawType::Suufonrenda | DrawType::Suukaikan => {
                self.dealer_continues = true;
            }
        }

        for s in 0..SEAT {
            self.scores[s] += delta[s];
        }
        self.honba += 1;

        self.broadcast(Event::Pingju(EventPingju {
            draw_type,
            hands,
            delta_scores: delta,
            nagashi_scores: nagashi,
        }));
        self.phase = Phase::Last;
    }

    // 流し満貫: 捨て牌がすべて么九牌で一度も鳴かれていない
    fn is_nagashi(&self, seat: Seat) -> bool {
        let pile = &self.piles[seat];
        !pile.is_empty()
            && pile
                .sutes()
                .iter()
                .all(|s| s.tile.is_end() && s.claimed.is_none())
    }

    // [Last] 次局の決定または終局
    fn do_last(&mut self) {
        // トビ終了
        if self.rule.bust_ends_game && self.scores.iter().any(|&s| s < 0) {
            self.phase = Phase::Jieju;
            return;
        }
        // 一局戦
        if self.rule.game_count == 0 {
            self.phase = Phase::Jieju;
            return;
        }

        let last_round = self.rule.last_round();
        let is_all_last = self.round == last_round && self.dealer_num == SEAT - 1;

        // オーラス止め: 親が連荘条件を満たし1位で規定点以上なら終局
        if is_all_last && self.dealer_continues && self.rule.oralas_stop {
            let dealer = self.dealer();
            if self.rank_of(dealer) == 0 && self.scores[dealer] >= 30000 {
                self.phase = Phase::Jieju;
                return;
            }
        }

        if !self.dealer_continues {
            self.dealer_num += 1;
            if self.dealer_num == SEAT {
                self.dealer_num = 0;
                self.round += 1;
            }
        }

        // 延長戦 (サドンデス)
        if self.extension {
            let target = 30000;
            let sudden_death = self.rule.extension_mode != 3;
            if sudden_death && self.scores.iter().any(|&s| s >= target) {
                self.phase = Phase::Jieju;
                return;
            }
            if self.round > last_round + 1 {
                self.phase = Phase::Jieju;
                return;
            }
        } else if self.round > last_round {
            if self.rule.extension_mode > 0 && self.scores.iter().all(|&s| s < 30000) {
                self.extension = true;
            } else {
                self.phase = Phase::Jieju;
                return;
            }
        }

        self.phase = Phase::Qipai;
    }

    // [Jieju] 終局
    fn do_jieju(&mut self) {
        // 供託の残りはトップ取り (順位は変わらない)
        if self.riichi_sticks > 0 {
            let rank = self.ranks();
            let top = (0..SEAT).find(|&s| rank[s] == 0).unwrap();
            self.scores[top] += self.riichi_sticks as Point * 1000;
            self.riichi_sticks = 0;
        }

        let rank = self.ranks();
        let points = self.rank_point_strings(&rank);
        let ev = EventJieju {
            scores: self.scores,
            rank,
            points,
        };
        self.record.result = Some(ev.clone());
        self.broadcast(Event::Jieju(ev));
        self.phase = Phase::Done;
    }

    // 順位 (同点は起家に近い方が上位)
    fn ranks(&self) -> [usize; SEAT] {
        let mut order: Vec<Seat> = (0..SEAT).collect();
        order.sort_by_key(|&s| (-self.scores[s], (s + SEAT - self.qijia) % SEAT));
        let mut rank = [0; SEAT];
        for (r, &s) in order.iter().enumerate() {
            rank[s] = r;
        }
        rank
    }

    fn rank_of(&self, seat: Seat) -> usize {
        self.ranks()[seat]
    }

    // 順位点込みのポイント (1位は他3人の補数で帳尻を合わせる)
    fn rank_point_strings(&self, rank: &[usize; SEAT]) -> [String; SEAT] {
        let mut pts = [0.0f64; SEAT];
        let mut top = 0;
        for s in 0..SEAT {
            if rank[s] == 0 {
                top = s;
            } else {
                pts[s] = (self.scores[s] - 30000) as f64 / 1000.0 + self.rule.rank_points[rank[s]];
            }
        }
        pts[top] = -(0..SEAT).filter(|&s| s != top).map(|s| pts[s]).sum::<f64>();

        let mut res: [String; SEAT] = Default::default();
        for s in 0..SEAT {
            res[s] = if pts[s].fract() == 0.0 {
                format!("{:.0}", pts[s])
            } else {
                format!("{:.1}", pts[s])
            };
        }
        res
    }

    // [検証]

    // ツモ和了の検証
    fn allow_tsumo(&self) -> bool {
        let turn = self.turn;
        let t = match self.hands[turn].drawn_tile() {
            Some(t) => t,
            None => return false,
        };
        if shanten(&self.hands[turn]) != -1 {
            return false;
        }
        self.evaluate_win(turn, t, true, false, false).is_some()
    }

    // ロンの検証 (フリテンと役の有無)
    fn allow_ron(&self, seat: Seat, tile: Tile, chankan: bool) -> bool {
        if !self.waits[seat].contains(&tile.to_normal()) {
            return false;
        }
        if self.furiten[seat] || self.furiten_stuck[seat] || self.furiten_temp[seat] {
            return false;
        }
        self.evaluate_win(seat, tile, false, chankan, false).is_some()
    }

    // 九種九牌の検証
    fn allow_kyuushu(&self) -> bool {
        if !self.rule.interrupted_draws || !self.first_go || !self.piles[self.turn].is_empty() {
            return false;
        }
        let counts = self.hands[self.turn].counts();
        let mut kinds = 0;
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if counts[ti][ni] > 0 && Tile(ti, ni).is_end() {
                    kinds += 1;
                }
            }
        }
        kinds >= 9
    }

    // 暗槓・加槓の検証
    fn allow_kan(&self, meld: &Meld) -> bool {
        let turn = self.turn;
        if self.live_count() == 0 || self.n_kans.iter().sum::<usize>() >= 4 {
            return false;
        }
        let legal = match self.hands[turn].legal_kan(None) {
            Some(v) => v,
            None => return false,
        };
        if !legal.contains(meld) {
            return false;
        }

        // リーチ後の暗槓は待ちが変わらない場合のみ
        if self.hands[turn].is_riichi() {
            if meld.meld_type != MeldType::Ankan || self.rule.ankan_after_riichi_level == 0 {
                return false;
            }
            let drawn = self.hands[turn].drawn_tile().unwrap();
            if meld.num() != drawn.to_normal().1 || meld.tile_type != drawn.0 {
                return false;
            }
            if !self.ankan_keeps_waits(meld) {
                return false;
            }
        }
        true
    }

    // リーチ後の暗槓が待ち(レベル2)・牌姿(レベル1)を変えないか
    fn ankan_keeps_waits(&self, meld: &Meld) -> bool {
        let turn = self.turn;
        let drawn = self.hands[turn].drawn_tile().unwrap();

        // 暗槓前の待ち
        let mut before = self.hands[turn].clone();
        if before.discard(drawn, false, false).is_err() {
            return false;
        }
        let waits_before = winning_tiles(&before);

        // 暗槓後の待ち
        let mut after = self.hands[turn].clone();
        if after.kan(meld, false).is_err() {
            return false;
        }
        let waits_after = winning_tiles(&after);
        if waits_before != waits_after {
            return false;
        }

        if self.rule.ankan_after_riichi_level == 1 {
            // 牌姿不変: どの和了形でも槓材が刻子として使われていること
            let kan_tile = Tile(meld.tile_type, meld.num());
            for &w in &waits_before {
                let mut counts = *before.counts();
                counts[w.0][w.1] += 1;
                for decomp in win_decompositions(&counts, before.melds(), w) {
                    let in_shuntsu = decomp.sets.iter().any(|s| {
                        matches!(s.0, SetKind::Shuntsu)
                            && s.1 .0 == kan_tile.0
                            && s.1 .1 <= kan_tile.1
                            && kan_tile.1 <= s.1 .1 + 2
                    });
                    if in_shuntsu {
                        return false;
                    }
                }
            }
        }
        true
    }

    // 打牌の検証 (リーチ宣言の条件を含む)
    fn allow_discard(&self, d: &DapaiReply) -> bool {
        let turn = self.turn;
        let legal = match self.hands[turn].legal_discards(self.rule.kuikae_level) {
            Some(v) => v,
            None => return false,
        };
        if !legal.iter().any(|&(t, _)| t == d.tile) {
            return false;
        }

        if d.riichi {
            if self.hands[turn].is_riichi() || !self.hands[turn].is_menzen() {
                return false;
            }
            if self.scores[turn] < 1000 {
                return false;
            }
            if !self.rule.riichi_without_tsumo && self.live_count() < SEAT {
                return false;
            }
            // 宣言牌で聴牌が取れること
            if !tenpai_discards(&self.hands[turn], self.rule.kuikae_level)
                .iter()
                .any(|(t, _)| *t == d.tile)
            {
                return false;
            }
        }
        true
    }

    // 鳴きの検証
    fn allow_call(&self, seat: Seat, meld: &Meld, tile: Tile) -> bool {
        let d = match Direction::of_seat(seat, self.turn) {
            Ok(d) => d,
            Err(_) => return false,
        };
        if meld.from != Some(d) {
            return false;
        }
        let legal = match meld.meld_type {
            MeldType::Chi => {
                if d != Direction::Kamicha {
                    return false;
                }
                self.hands[seat].legal_chi(tile, self.rule.kuikae_level)
            }
            MeldType::Pon => self.hands[seat].legal_pon(tile, d),
            MeldType::Minkan => {
                if self.n_kans.iter().sum::<usize>() >= 4 {
                    return false;
                }
                self.hands[seat].legal_kan(Some((tile, d)))
            }
            _ => return false,
        };
        legal.map(|v| v.contains(meld)).unwrap_or(false)
    }

    // 四風連打: 4人の第一打が同じ風牌
    fn check_suufonrenda(&self) -> bool {
        if (0..SEAT).any(|s| !self.hands[s].melds().is_empty()) {
            return false;
        }
        if (0..SEAT).any(|s| self.piles[s].len() != 1) {
            return false;
        }
        let first = self.piles[0].sutes()[0].tile;
        first.is_wind()
            && (1..SEAT).all(|s| self.piles[s].sutes()[0].tile == first)
    }

    // 責任払いの記録
    // 大三元の3組目, 大四喜の4組目, 四槓子の4回目を鳴かせた席が責任を負う.
    fn check_pao(&mut self, caller: Seat, meld: &Meld) {
        if !self.rule.yakuman_pao {
            return;
        }
        let discarder = self.last_discard.map(|(s, _)| s).unwrap_or(self.turn);
        let t = Tile(meld.tile_type, meld.num());

        let exposed = |pred: &dyn Fn(Tile) -> bool| {
            self.hands[caller]
                .melds()
                .iter()
                .filter(|m| pred(Tile(m.tile_type, m.num())))
                .count()
        };

        if t.is_dragon() && exposed(&|x: Tile| x.is_dragon()) == 3 {
            self.pao[caller] = Some(Pao {
                liable: discarder,
                yakuman: "大三元",
            });
        }
        if t.is_wind() && exposed(&|x: Tile| x.is_wind()) == 4 {
            self.pao[caller] = Some(Pao {
                liable: discarder,
                yakuman: "大四喜",
            });
        }
        if meld.meld_type == MeldType::Minkan && self.n_kans[caller] == 3 {
            // この明槓で4回目
            self.pao[caller] = Some(Pao {
                liable: discarder,
                yakuman: "四槓子",
            });
        }
    }

    // 和了に責任払いが適用されるか
    fn applicable_pao(&self, winner: Seat, ctx: &ScoreContext) -> Option<Pao> {
        let pao = self.pao[winner]?;
        if ctx.yakuman > 0 && ctx.yakus.iter().any(|y| y.name == pao.yakuman) {
            Some(pao)
        } else {
            None
        }
    }

    // [評価]

    fn evaluate_win(
        &self,
        seat: Seat,
        win_tile: Tile,
        is_drawn: bool,
        chankan: bool,
        scoring: bool,
    ) -> Option<ScoreContext> {
        let hand = &self.hands[seat];
        let counts = if is_drawn {
            *hand.counts()
        } else {
            let mut c = *hand.counts();
            if inc_tile(&mut c, win_tile).is_err() {
                return None;
            }
            c
        };

        let flags = self.build_flags(seat, is_drawn, chankan);
        let wall = self.wall.as_ref()?;
        let ura = if scoring && self.riichi_state[seat] > 0 {
            wall.ura_indicators()
        } else {
            None
        };
        evaluate_hand(
            &counts,
            hand.melds(),
            &wall.dora_indicators(),
            ura.as_deref(),
            win_tile,
            is_drawn,
            seat == self.dealer(),
            self.prevalent_wind(),
            self.seat_wind(seat),
            &flags,
            &self.rule,
        )
    }

    fn build_flags(&self, seat: Seat, is_drawn: bool, chankan: bool) -> YakuFlags {
        let riichi = self.riichi_state[seat];
        let live = self.live_count();
        let first_draw = self.first_go && self.piles[seat].is_empty();
        YakuFlags {
            menzentsumo: is_drawn && self.hands[seat].is_menzen(),
            riichi: riichi == 1,
            double_riichi: riichi == 2,
            ippatsu: self.ippatsu[seat] && self.rule.ippatsu,
            haitei: is_drawn && live == 0 && !self.rinshan[seat],
            houtei: !is_drawn && live == 0 && !chankan,
            rinshan: is_drawn && self.rinshan[seat],
            chankan,
            tenho: is_drawn && first_draw && seat == self.dealer(),
            chiho: is_drawn && first_draw && seat != self.dealer(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Nop, RandomAgent};

    fn nops() -> [Box<dyn Actor>; SEAT] {
        [
            Box::new(Nop),
            Box::new(Nop),
            Box::new(Nop),
            Box::new(Nop),
        ]
    }

    fn randoms(seed: u64) -> [Box<dyn Actor>; SEAT] {
        [
            Box::new(RandomAgent::new(seed)),
            Box::new(RandomAgent::new(seed + 1)),
            Box::new(RandomAgent::new(seed + 2)),
            Box::new(RandomAgent::new(seed + 3)),
        ]
    }

    fn run_capped(game: &mut Game) {
        let mut steps = 0;
        while !game.is_finished() {
            game.step();
            steps += 1;
            assert!(steps < 100_000, "game did not terminate");
        }
    }

    // 記録された局が仕様通りの形をしているか
    fn check_record(record: &GameRecord) {
        assert!(!record.rounds.is_empty());
        for round in &record.rounds {
            assert!(matches!(round.first(), Some(Event::Qipai(_))));
            assert!(matches!(
                round.last(),
                Some(Event::Hule(_)) | Some(Event::Pingju(_))
            ));
        }
        assert!(record.result.is_some());
    }

    #[test]
    fn test_nop_game() {
        // 全員ツモ切りの対局: 和了なしで完走し, 点数の総和が保存される
        let mut game = Game::new(Rule::default(), nops(), vec![], 1);
        run_capped(&mut game);

        check_record(game.record());
        let total: Score = game.scores().iter().sum();
        assert_eq!(total, 4 * 25000);
        for round in &game.record().rounds {
            assert!(matches!(round.last(), Some(Event::Pingju(_))));
        }
    }

    #[test]
    fn test_random_game() {
        let mut game = Game::new(Rule::default(), randoms(7), vec![], 7);
        run_capped(&mut game);

        check_record(game.record());
        let total: Score = game.scores().iter().sum();
        assert_eq!(total, 4 * 25000);
    }

    #[test]
    fn test_determinism() {
        // 同一シード・同一エージェントなら記録が完全に一致する
        let mut g1 = Game::new(Rule::default(), randoms(11), vec![], 11);
        let mut g2 = Game::new(Rule::default(), randoms(11), vec![], 11);
        run_capped(&mut g1);
        run_capped(&mut g2);
        assert_eq!(g1.record(), g2.record());
    }

    #[test]
    fn test_stop_resume() {
        let mut game = Game::new(Rule::default(), nops(), vec![], 3);
        game.step(); // Kaiju
        game.stop();
        let phase = game.phase();
        game.step();
        assert_eq!(game.phase(), phase); // 停止中は進まない
        game.resume();
        run_capped(&mut game);
        assert!(game.is_finished());
    }

    // 三家和の解決: 3人が同時にロンし, 上限2なら流局
    fn setup_triple_ron(max_win: usize) -> Game {
        let mut rule = Rule::default();
        rule.max_simultaneous_win = max_win;
        let mut game = Game::new(rule.clone(), nops(), vec![], 5);
        let mut rng = SeededSource::new(5);
        game.wall = Some(Wall::new(&rule, &mut rng));
        game.turn = 0;
        game.hands[0] = Hand::from_str("m123p456s789z1123").unwrap();
        for s in 1..SEAT {
            game.hands[s] = Hand::from_str("m19p19s19z1234567").unwrap();
            game.waits[s] = winning_tiles(&game.hands[s]);
        }
        game
    }

    #[test]
    fn test_sanchahou() {
        let mut game = setup_triple_ron(2);
        let replies = [Reply::None, Reply::Hule, Reply::Hule, Reply::Hule];
        let honba = game.honba;
        game.resolve_claims(&replies, Tile(TZ, 1));
        assert!(matches!(
            game.result,
            Some(RoundResult::Draw(DrawType::Sanchahou))
        ));
        assert_eq!(game.phase(), Phase::Pingju);

        // 流局処理で本場が増え, 点数は動かない
        game.record.rounds.push(vec![]);
        let scores = game.scores();
        game.step();
        assert_eq!(game.honba, honba + 1);
        assert_eq!(game.scores(), scores);
    }

    #[test]
    fn test_triple_ron_allowed() {
        let mut game = setup_triple_ron(3);
        let replies = [Reply::None, Reply::Hule, Reply::Hule, Reply::Hule];
        game.resolve_claims(&replies, Tile(TZ, 1));
        match &game.result {
            Some(RoundResult::Ron(seats)) => assert_eq!(seats, &vec![1, 2, 3]),
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn test_atama_hane() {
        // 上限1では放銃者に最も近い席のみが和了
        let mut game = setup_triple_ron(1);
        let replies = [Reply::None, Reply::None, Reply::Hule, Reply::Hule];
        game.resolve_claims(&replies, Tile(TZ, 1));
        match &game.result {
            Some(RoundResult::Ron(seats)) => assert_eq!(seats, &vec![2]),
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn test_ron_payment() {
        let mut game = Game::new(Rule::default(), nops(), vec![], 5);
        game.turn = 0;
        game.honba = 2;
        game.riichi_sticks = 1;

        let ctx = ScoreContext {
            yakus: vec![],
            fu: 30,
            han: 3,
            yakuman: 0,
            score: 3900,
            points: (3900, 1000, 2000),
            title: String::new(),
        };
        let delta = game.distribute_ron(2, &ctx, None, true);
        assert_eq!(delta[0], -(3900 + 600));
        assert_eq!(delta[2], 3900 + 600 + 1000);
        assert_eq!(delta.iter().sum::<Point>(), 1000);

        // 2人目の和了者には本場・供託がつかない
        let delta = game.distribute_ron(3, &ctx, None, false);
        assert_eq!(delta[0], -3900);
        assert_eq!(delta[3], 3900);
    }

    #[test]
    fn test_tsumo_payment() {
        let mut game = Game::new(Rule::default(), nops(), vec![], 5);
        game.honba = 1;

        // 子(席2)のツモ: 親は席0
        let ctx = ScoreContext {
            yakus: vec![],
            fu: 30,
            han: 2,
            yakuman: 0,
            score: 2000,
            points: (2000, 500, 1000),
            title: String::new(),
        };
        let delta = game.distribute_tsumo(2, &ctx);
        assert_eq!(delta[0], -(1000 + 100));
        assert_eq!(delta[1], -(500 + 100));
        assert_eq!(delta[3], -(500 + 100));
        assert_eq!(delta[2], 2000 + 300);
        assert_eq!(delta.iter().sum::<Point>(), 0);
    }

    #[test]
    fn test_pao_payment() {
        let mut game = Game::new(Rule::default(), nops(), vec![], 5);
        game.turn = 0;

        let ctx = ScoreContext {
            yakus: vec![],
            fu: 30,
            han: 0,
            yakuman: 1,
            score: 32000,
            points: (32000, 8000, 16000),
            title: String::new(),
        };
        let pao = Some(Pao {
            liable: 3,
            yakuman: "大三元",
        });

        // ロン: 放銃者ではなく責任者が全額を支払う
        let delta = game.distribute_ron(1, &ctx, pao, true);
        assert_eq!(delta[0], 0);
        assert_eq!(delta[3], -32000);
        assert_eq!(delta[1], 32000);

        // ツモ: 親・非責任者も通常の支払いを行い, 和了者は通常通り受け取る
        let delta = game.distribute_tsumo(1, &ctx);
        assert_eq!(delta[0], -16000); // 親の支払い
        assert_eq!(delta[2], -8000);
        assert_eq!(delta[3], -8000); // 責任者は自身の子方の支払い分
        assert_eq!(delta[1], 32000);
        assert_eq!(delta.iter().sum::<Point>(), 0);
    }

    #[test]
    fn test_rank_points() {
        let mut game = Game::new(Rule::default(), nops(), vec![], 5);
        game.qijia = 0;
        game.scores = [40000, 30000, 20000, 10000];
        let rank = game.ranks();
        assert_eq!(rank, [0, 1, 2, 3]);
        let pts = game.rank_point_strings(&rank);
        assert_eq!(pts, ["50", "10", "-20", "-40"].map(String::from));

        // 同点は起家に近い方が上位
        game.scores = [25000; SEAT];
        game.qijia = 2;
        let rank = game.ranks();
        assert_eq!(rank, [2, 3, 0, 1]);
    }
}

