use super::parse::win_decompositions;
use super::point::{calc_points, win_score};
use super::yaku::{YakuContext, YakuFlags, YakuOptions};
use crate::model::*;

// ドラ表示牌のリストからドラ評価テーブルを作成
pub fn create_dora_table(indicators: &[Tile]) -> TileTable {
    let mut dt = TileTable::default();
    for &ind in indicators {
        if let Ok(d) = dora_from_indicator(ind) {
            dt[d.0][d.1] += 1;
        }
    }
    dt
}

// 手牌と副露に含まれるドラの数
pub fn count_dora(counts: &TileTable, melds: &[Meld], indicators: &[Tile]) -> usize {
    let dt = create_dora_table(indicators);
    let mut n = 0;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            n += dt[ti][ni] * counts[ti][ni];
        }
    }
    for m in melds {
        for t in m.tiles() {
            let t = t.to_normal();
            n += dt[t.0][t.1];
        }
    }
    n
}

// 赤ドラ (牌表記の0) の数
fn count_red_dora(counts: &TileTable, melds: &[Meld]) -> usize {
    let mut n = counts[TM][0] + counts[TP][0] + counts[TS][0];
    for m in melds {
        for t in m.tiles() {
            if t.is_red5() {
                n += 1;
            }
        }
    }
    n
}

// 手牌評価
// 和了形である場合, 最も支払いが大きくなる解釈のScoreContextを返す.
// 同点の場合は飜数, 次いで符数が高いものを採用する. 無役や和了形でない場合はNone.
pub fn evaluate_hand(
    counts: &TileTable,             // 純手牌 (和了牌を含む)
    melds: &[Meld],                 // 副露
    dora_indicators: &[Tile],       // ドラ表示牌
    ura_indicators: Option<&[Tile]>, // 裏ドラ表示牌 (非公開ならNone)
    win_tile: Tile,                 // 和了牌
    is_drawn: bool,                 // ツモ和了
    is_dealer: bool,                // 親番
    prevalent_wind: Tnum,           // 場風 (東:1, 南:2, 西:3, 北:4)
    seat_wind: Tnum,                // 自風 (同上)
    flags: &YakuFlags,
    rule: &Rule,
) -> Option<ScoreContext> {
    let decomps = win_decompositions(counts, melds, win_tile);
    if decomps.is_empty() {
        return None;
    }

    let n_dora = count_dora(counts, melds, dora_indicators);
    let n_red = count_red_dora(counts, melds);
    let n_ura = if flags.riichi || flags.double_riichi {
        ura_indicators
            .map(|ind| count_dora(counts, melds, ind))
            .unwrap_or(0)
    } else {
        0
    };

    let opts = YakuOptions::from(rule);
    let mut results: Vec<ScoreContext> = vec![];
    for decomp in decomps {
        let ctx = YakuContext::new(
            *counts,
            decomp,
            win_tile,
            prevalent_wind,
            seat_wind,
            is_drawn,
            flags.clone(),
            opts,
        );
        let fu = ctx.calc_fu();
        let (yakus, mut han, yakuman) = ctx.calc_yaku();
        if yakus.is_empty() {
            continue; // 無役
        }

        let mut yakus: Vec<Yaku> = yakus
            .iter()
            .map(|y| {
                let han = if y.han_close >= 13 {
                    y.han_close - 12 // 役満は倍率を入れる
                } else if ctx.is_open() {
                    y.han_open
                } else {
                    y.han_close
                };
                Yaku {
                    name: y.name.to_string(),
                    han,
                }
            })
            .collect();

        if yakuman == 0 {
            han += n_dora + n_red + n_ura;
            for (name, n) in [("ドラ", n_dora), ("赤ドラ", n_red), ("裏ドラ", n_ura)] {
                if n != 0 {
                    yakus.push(Yaku {
                        name: name.to_string(),
                        han: n,
                    });
                }
            }
        }

        let (points, title) = calc_points(is_dealer, fu, han, yakuman, rule);
        let score = win_score(is_dealer, is_drawn, points);
        results.push(ScoreContext {
            yakus,
            fu,
            han: if yakuman > 0 { 0 } else { han },
            yakuman,
            score,
            points,
            title,
        });
    }

    // 複数の解釈から最高得点を採用
    results.sort_by_key(|r| (r.score, r.han, r.fu));
    results.pop()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 手牌表記から評価 (最後の牌が和了牌)
    fn eval(
        closed: &str,
        melds: &[&str],
        win: &str,
        is_drawn: bool,
        prevalent: Tnum,
        seat: Tnum,
        flags: YakuFlags,
        rule: &Rule,
    ) -> Option<ScoreContext> {
        let tiles = tiles_from_str(closed).unwrap();
        let counts = tiles_to_table(&tiles).unwrap();
        let melds: Vec<Meld> = melds.iter().map(|m| Meld::parse(m).unwrap()).collect();
        evaluate_hand(
            &counts,
            &melds,
            &[],
            None,
            Tile::parse(win).unwrap(),
            is_drawn,
            seat == WE,
            prevalent,
            seat,
            &flags,
            rule,
        )
    }

    fn has_yaku(ctx: &ScoreContext, name: &str) -> bool {
        ctx.yakus.iter().any(|y| y.name == name)
    }

    #[test]
    fn test_seat_wind_pon() {
        // 南家がz2ポンの手をツモ和了: 自風のみ1飜, 平和は不成立
        let rule = Rule::default();
        let ctx = eval(
            "m123p456s789z11",
            &["z222="],
            "z1",
            true,
            WE,
            WS,
            YakuFlags::default(),
            &rule,
        )
        .unwrap();
        assert!(has_yaku(&ctx, "自風 南"));
        assert!(!has_yaku(&ctx, "平和"));
        assert!(!has_yaku(&ctx, "門前清自摸和"));
        assert_eq!(ctx.han, 1);
        assert_eq!(ctx.fu, 30); // 20 + ツモ2 + 明刻4 + 場風雀頭2 + タンキ2
    }

    #[test]
    fn test_pinfu() {
        let rule = Rule::default();
        let mut flags = YakuFlags::default();

        // 門前ロンの平和は30符
        let ctx = eval(
            "m234p456s456789z33",
            &[],
            "s9",
            false,
            WE,
            WS,
            flags.clone(),
            &rule,
        )
        .unwrap();
        assert!(has_yaku(&ctx, "平和"));
        assert_eq!(ctx.fu, 30);
        assert_eq!(ctx.han, 1);

        // ツモの平和は20符2飜
        flags.menzentsumo = true;
        let ctx = eval(
            "m234p456s456789z33",
            &[],
            "s9",
            true,
            WE,
            WS,
            flags,
            &rule,
        )
        .unwrap();
        assert!(has_yaku(&ctx, "平和"));
        assert!(has_yaku(&ctx, "門前清自摸和"));
        assert_eq!(ctx.fu, 20);
        assert_eq!(ctx.han, 2);

        // カンチャンロンは平和にならず無役
        let ctx = eval(
            "m234p456s456789z33",
            &[],
            "s5",
            false,
            WE,
            WS,
            YakuFlags::default(),
            &rule,
        );
        assert!(ctx.is_none());
    }

    #[test]
    fn test_tanyao_kuitan() {
        let mut rule = Rule::default();
        let flags = YakuFlags::default();

        // 喰いタンあり: 副露でも断幺九が成立
        let ctx = eval(
            "m234p456s333m88",
            &["p678-"],
            "m8",
            false,
            WE,
            WS,
            flags.clone(),
            &rule,
        )
        .unwrap();
        assert!(has_yaku(&ctx, "断幺九"));

        // 喰いタンなし: 無役
        rule.kuitan = false;
        let ctx = eval(
            "m234p456s333m88",
            &["p678-"],
            "m8",
            false,
            WE,
            WS,
            flags,
            &rule,
        );
        assert!(ctx.is_none());
    }

    #[test]
    fn test_best_interpretation() {
        // 二盃口と七対子の両方に取れる手は二盃口(3飜)を採用
        let rule = Rule::default();
        let mut flags = YakuFlags::default();
        flags.menzentsumo = true;
        let ctx = eval(
            "m112233p445566z44",
            &[],
            "z4",
            true,
            WE,
            WS,
            flags,
            &rule,
        )
        .unwrap();
        assert!(has_yaku(&ctx, "二盃口"));
        assert!(!has_yaku(&ctx, "七対子"));
    }

    #[test]
    fn test_chuuren() {
        let rule = Rule::default();

        // 純正九蓮宝燈はダブル役満
        let ctx = eval(
            "m11123456789999",
            &[],
            "m9",
            false,
            WE,
            WS,
            YakuFlags::default(),
            &rule,
        )
        .unwrap();
        assert!(has_yaku(&ctx, "純正九蓮宝燈"));
        assert_eq!(ctx.yakuman, 2);
        assert_eq!(ctx.points.0, 64000);

        // ダブル役満なしの場合は1倍
        let mut rule2 = Rule::default();
        rule2.double_yakuman = false;
        let ctx = eval(
            "m11123456789999",
            &[],
            "m9",
            false,
            WE,
            WS,
            YakuFlags::default(),
            &rule2,
        )
        .unwrap();
        assert_eq!(ctx.yakuman, 1);

        // 通常の九蓮宝燈 (純正でない形からの和了)
        let ctx = eval(
            "m11122345678999",
            &[],
            "m3",
            false,
            WE,
            WS,
            YakuFlags::default(),
            &rule,
        )
        .unwrap();
        assert!(has_yaku(&ctx, "九蓮宝燈"));
        assert_eq!(ctx.yakuman, 1);
    }

    #[test]
    fn test_suuankou_ron_vs_tsumo() {
        let rule = Rule::default();

        // シャンポンロンは四暗刻にならず三暗刻止まり
        let ctx = eval(
            "m111222333p99s111",
            &[],
            "s1",
            false,
            WE,
            WS,
            YakuFlags::default(),
            &rule,
        )
        .unwrap();
        assert_eq!(ctx.yakuman, 0);
        assert!(has_yaku(&ctx, "三暗刻"));

        // 同じ形でもツモなら四暗刻
        let mut flags = YakuFlags::default();
        flags.menzentsumo = true;
        let ctx = eval(
            "m111222333p99s111",
            &[],
            "s1",
            true,
            WE,
            WS,
            flags,
            &rule,
        )
        .unwrap();
        assert!(has_yaku(&ctx, "四暗刻"));
        assert_eq!(ctx.yakuman, 1);

        // タンキロンは四暗刻単騎
        let ctx = eval(
            "m111222333s111p99",
            &[],
            "p9",
            false,
            WE,
            WS,
            YakuFlags::default(),
            &rule,
        )
        .unwrap();
        assert!(has_yaku(&ctx, "四暗刻単騎"));
        assert_eq!(ctx.yakuman, 2);
    }

    #[test]
    fn test_dora_counting() {
        let rule = Rule::default();
        let tiles = tiles_from_str("m123p406s789z111z22").unwrap();
        let counts = tiles_to_table(&tiles).unwrap();
        let flags = YakuFlags {
            menzentsumo: true,
            ..Default::default()
        };
        // ドラ表示m1 → ドラm2, 赤5が1枚
        let ctx = evaluate_hand(
            &counts,
            &[],
            &[Tile(TM, 1)],
            None,
            Tile(TZ, 1),
            true,
            false,
            WE,
            WS,
            &flags,
            &rule,
        )
        .unwrap();
        assert!(has_yaku(&ctx, "ドラ"));
        assert!(has_yaku(&ctx, "赤ドラ"));
        assert_eq!(ctx.han, 1 + 1 + 1); // 門前清自摸和 + ドラ + 赤ドラ
    }

    #[test]
    fn test_kokushi_double() {
        let rule = Rule::default();

        // 13面待ちはダブル役満
        let ctx = eval(
            "m19p19s19z1234567z1",
            &[],
            "z1",
            false,
            WE,
            WS,
            YakuFlags::default(),
            &rule,
        )
        .unwrap();
        assert!(has_yaku(&ctx, "国士無双１３面"));
        assert_eq!(ctx.yakuman, 2);

        // 単騎待ちはシングル
        let ctx = eval(
            "m199p19s19z1234567",
            &[],
            "m1",
            false,
            WE,
            WS,
            YakuFlags::default(),
            &rule,
        )
        .unwrap();
        assert!(has_yaku(&ctx, "国士無双"));
        assert_eq!(ctx.yakuman, 1);
    }
}
