use super::*;

// エージェントの応答
// 状態機械は現在の状態に関係する応答のみを消費し, それ以外は無視する.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Reply {
    #[default]
    None, // 応答なし (打牌要求に対してはツモ切り)
    Daopai,                // 九種九牌の流局宣言
    Hule,                  // ロン・ツモの和了宣言
    Gang { meld: Meld },   // 暗槓・加槓
    Fulou { meld: Meld },  // チー・ポン・大明槓
    Dapai(DapaiReply),     // 打牌
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DapaiReply {
    pub tile: Tile,
    pub tsumogiri: bool,
    pub riichi: bool, // リーチ宣言
}

impl Reply {
    #[inline]
    pub fn dapai(tile: Tile, tsumogiri: bool, riichi: bool) -> Self {
        Self::Dapai(DapaiReply {
            tile,
            tsumogiri,
            riichi,
        })
    }

    #[inline]
    pub fn fulou(meld: Meld) -> Self {
        Self::Fulou { meld }
    }

    #[inline]
    pub fn gang(meld: Meld) -> Self {
        Self::Gang { meld }
    }
}

#[test]
fn test_reply_serde() {
    let r = Reply::fulou(Meld::parse("m123-").unwrap());
    let js = serde_json::to_value(&r).unwrap();
    assert_eq!(js["type"], "fulou");
    let back: Reply = serde_json::from_value(js).unwrap();
    assert_eq!(back, r);

    assert_eq!(Reply::default(), Reply::None);
}
