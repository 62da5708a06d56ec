use super::*;

// 局の進行イベント
// 座席ごとの配信時にはmasked_forで他家の非公開牌を伏せる
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Kaiju(EventKaiju),       // 対局開始
    Qipai(EventQipai),       // 配牌
    Zimo(EventZimo),         // ツモ
    Dapai(EventDapai),       // 打牌
    Fulou(EventFulou),       // チー・ポン・大明槓
    Gang(EventGang),         // 暗槓・加槓
    Gangzimo(EventGangzimo), // 嶺上ツモ
    Kaigang(EventKaigang),   // 槓ドラ公開
    Hule(EventHule),         // 和了
    Pingju(EventPingju),     // 流局
    Jieju(EventJieju),       // 対局終了
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventKaiju {
    pub qijia: Seat, // 起家
    pub rule: Rule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventQipai {
    pub round: usize,              // 場風 (東:0, 南:1, 西:2, 北:3)
    pub dealer: Seat,              // 親の座席
    pub honba: usize,              // 本場
    pub riichi_sticks: usize,      // 供託リーチ棒
    pub dora_indicator: Tile,      // ドラ表示牌
    pub hands: [String; SEAT],     // 配牌 (他家は伏せ牌)
    pub scores: [Score; SEAT],     // 持ち点
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventZimo {
    pub seat: Seat,
    pub tile: Tile, // 他家にはZ8
    pub live_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventDapai {
    pub seat: Seat,
    pub tile: Tile,
    pub tsumogiri: bool,
    pub riichi: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFulou {
    pub seat: Seat,
    pub meld: Meld,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventGang {
    pub seat: Seat,
    pub meld: Meld,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventGangzimo {
    pub seat: Seat,
    pub tile: Tile, // 他家にはZ8
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventKaigang {
    pub indicator: Tile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventHule {
    pub contexts: Vec<WinContext>,        // 和了情報 (ダブロンは2要素)
    pub dora_indicators: Vec<Tile>,       // ドラ表示牌
    pub ura_indicators: Option<Vec<Tile>>, // 裏ドラ表示牌 (リーチ者がいなければNone)
    pub scores: [Score; SEAT],            // 変動前の持ち点
    pub delta_scores: [Point; SEAT],      // 供託・本場を含む合計変動
}

// 流局理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawType {
    Kyuushukyuuhai, // 九種九牌
    Suufonrenda,    // 四風連打
    Suukaikan,      // 四開槓
    Suuchariichi,   // 四家立直
    Sanchahou,      // 三家和
    Ryuukyoku,      // 荒牌平局
}

impl fmt::Display for DrawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DrawType::Kyuushukyuuhai => "九種九牌",
                DrawType::Suufonrenda => "四風連打",
                DrawType::Suukaikan => "四開槓",
                DrawType::Suuchariichi => "四家立直",
                DrawType::Sanchahou => "三家和",
                DrawType::Ryuukyoku => "荒牌平局",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPingju {
    pub draw_type: DrawType,
    pub hands: [Option<String>; SEAT],       // 公開される手牌 (聴牌者・宣言者)
    pub delta_scores: [Point; SEAT],         // ノーテン罰符・流し満貫による変動
    pub nagashi_scores: [Point; SEAT],       // 流し満貫の得点 (該当者がいなければ全て0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventJieju {
    pub scores: [Score; SEAT],  // 最終持ち点
    pub rank: [usize; SEAT],    // 順位 (0が1位)
    pub points: [String; SEAT], // 順位点込みのポイント
}

impl Event {
    // 指定座席向けに非公開情報を伏せた複製
    pub fn masked_for(&self, seat: Seat) -> Event {
        let mut ev = self.clone();
        match &mut ev {
            Event::Qipai(e) => {
                for s in 0..SEAT {
                    if s != seat {
                        let hand = Hand::from_str(&e.hands[s]).unwrap_or_default();
                        e.hands[s] = hand.masked().to_string();
                    }
                }
            }
            Event::Zimo(e) => {
                if e.seat != seat {
                    e.tile = Z8;
                }
            }
            Event::Gangzimo(e) => {
                if e.seat != seat {
                    e.tile = Z8;
                }
            }
            _ => {}
        }
        ev
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::Kaiju(_) => "kaiju",
            Event::Qipai(_) => "qipai",
            Event::Zimo(_) => "zimo",
            Event::Dapai(_) => "dapai",
            Event::Fulou(_) => "fulou",
            Event::Gang(_) => "gang",
            Event::Gangzimo(_) => "gangzimo",
            Event::Kaigang(_) => "kaigang",
            Event::Hule(_) => "hule",
            Event::Pingju(_) => "pingju",
            Event::Jieju(_) => "jieju",
        }
    }
}

#[test]
fn test_event_masking() {
    let ev = Event::Zimo(EventZimo {
        seat: 1,
        tile: Tile(TM, 5),
        live_count: 69,
    });
    match ev.masked_for(1) {
        Event::Zimo(e) => assert_eq!(e.tile, Tile(TM, 5)),
        _ => panic!(),
    }
    match ev.masked_for(0) {
        Event::Zimo(e) => assert_eq!(e.tile, Z8),
        _ => panic!(),
    }
}

#[test]
fn test_event_serde() {
    let ev = Event::Dapai(EventDapai {
        seat: 2,
        tile: Tile(TP, 0),
        tsumogiri: true,
        riichi: false,
    });
    let js = serde_json::to_value(&ev).unwrap();
    assert_eq!(js["type"], "dapai");
    assert_eq!(js["tile"], "p0");
    let back: Event = serde_json::from_value(js).unwrap();
    assert_eq!(back, ev);
}
