use crate::model::*;

// 100点未満の切り上げ
fn ceil100(n: Point) -> Point {
    (n + 99) / 100 * 100
}

// 基本点の計算
// 通常役は min(符 × 2^(2+飜), 2000). 6飜以上は固定の基本点.
fn base_points(fu: usize, han: usize, yakuman: usize, rule: &Rule) -> Point {
    if yakuman > 0 {
        return (8000 * yakuman) as Point;
    }

    match han {
        0 => 0,
        1..=5 => {
            let mut base = fu * 2usize.pow(2 + han as u32);
            if rule.round_up_mangan && base >= 1920 {
                base = 2000; // 切り上げ満貫
            }
            base.min(2000) as Point
        }
        6..=7 => 3000,
        8..=10 => 4000,
        11..=12 => 6000,
        _ => {
            if rule.counted_yakuman {
                8000 // 数え役満
            } else {
                6000
            }
        }
    }
}

fn score_title(base: Point, yakuman: usize) -> String {
    match yakuman {
        0 => match base {
            2000 => "満貫",
            3000 => "跳満",
            4000 => "倍満",
            6000 => "三倍満",
            8000 => "数え役満",
            _ => "",
        },
        1 => "役満",
        2 => "二倍役満",
        3 => "三倍役満",
        4 => "四倍役満",
        5 => "五倍役満",
        6 => "六倍役満",
        _ => "N倍役満",
    }
    .to_string()
}

// 支払い内訳の計算
// 返り値は(ロンの支払い, ツモ・子の支払い, ツモ・親の支払い)とタイトル
pub fn calc_points(
    is_dealer: bool,
    fu: usize,
    han: usize,
    yakuman: usize,
    rule: &Rule,
) -> (Points, String) {
    let base = base_points(fu, han, yakuman, rule);
    let title = score_title(base, yakuman);
    let points = if is_dealer {
        (ceil100(base * 6), ceil100(base * 2), 0)
    } else {
        (ceil100(base * 4), ceil100(base), ceil100(base * 2))
    };
    (points, title)
}

// 和了者の収入 (本場・供託を除く)
pub fn win_score(is_dealer: bool, is_drawn: bool, points: Points) -> Score {
    if is_drawn {
        if is_dealer {
            points.1 * 3
        } else {
            points.1 * 2 + points.2
        }
    } else {
        points.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_table() {
        let rule = Rule::default();

        // 子のロン
        assert_eq!(calc_points(false, 30, 1, 0, &rule).0 .0, 1000);
        assert_eq!(calc_points(false, 30, 2, 0, &rule).0 .0, 2000);
        assert_eq!(calc_points(false, 30, 3, 0, &rule).0 .0, 3900);
        assert_eq!(calc_points(false, 40, 4, 0, &rule).0 .0, 8000); // 満貫に到達
        assert_eq!(calc_points(false, 25, 2, 0, &rule).0 .0, 1600); // 七対子

        // 親のロン
        assert_eq!(calc_points(true, 30, 1, 0, &rule).0 .0, 1500);
        assert_eq!(calc_points(true, 30, 4, 0, &rule).0 .0, 11600);

        // 子のツモ
        let (p, _) = calc_points(false, 30, 2, 0, &rule);
        assert_eq!((p.1, p.2), (500, 1000));
        assert_eq!(win_score(false, true, p), 2000);

        // 親のツモ
        let (p, _) = calc_points(true, 30, 2, 0, &rule);
        assert_eq!(p.1, 1000);
        assert_eq!(win_score(true, true, p), 3000);
    }

    #[test]
    fn test_limits() {
        let rule = Rule::default();
        let t = |han| calc_points(false, 30, han, 0, &rule);

        assert_eq!(t(5).0 .0, 8000);
        assert_eq!(t(5).1, "満貫");
        assert_eq!(t(6).0 .0, 12000);
        assert_eq!(t(6).1, "跳満");
        assert_eq!(t(8).0 .0, 16000);
        assert_eq!(t(8).1, "倍満");
        assert_eq!(t(11).0 .0, 24000);
        assert_eq!(t(11).1, "三倍満");
        assert_eq!(t(13).0 .0, 32000);
        assert_eq!(t(13).1, "数え役満");

        // 数え役満なしでは三倍満止まり
        let mut rule2 = Rule::default();
        rule2.counted_yakuman = false;
        assert_eq!(calc_points(false, 30, 13, 0, &rule2).0 .0, 24000);

        // 役満
        let (p, title) = calc_points(false, 30, 0, 1, &rule);
        assert_eq!(p.0, 32000);
        assert_eq!(title, "役満");
        let (p, title) = calc_points(true, 30, 0, 2, &rule);
        assert_eq!(p.0, 96000);
        assert_eq!(title, "二倍役満");
    }

    #[test]
    fn test_round_up_mangan() {
        let mut rule = Rule::default();
        assert_eq!(calc_points(false, 30, 4, 0, &rule).0 .0, 7700);
        assert_eq!(calc_points(false, 60, 3, 0, &rule).0 .0, 7700);

        rule.round_up_mangan = true;
        assert_eq!(calc_points(false, 30, 4, 0, &rule).0 .0, 8000);
        assert_eq!(calc_points(false, 60, 3, 0, &rule).0 .0, 8000);
        // 1920未満は影響なし
        assert_eq!(calc_points(false, 30, 3, 0, &rule).0 .0, 3900);
    }
}
