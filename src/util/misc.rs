// 複数のリストから要素を1つずつ選ぶ組み合わせ(直積)をすべて返却
pub fn cartesian_product<T>(vv: &[Vec<T>]) -> Vec<Vec<&T>> {
    let lens: Vec<usize> = vv.iter().map(|l| l.len()).collect();
    if lens.iter().any(|&l| l == 0) {
        return vec![];
    }

    let mut idxs = vec![0; vv.len()];
    let mut res = vec![];
    loop {
        let mut v = vec![];
        for (i1, &i2) in idxs.iter().enumerate() {
            v.push(&vv[i1][i2]);
        }
        res.push(v);

        // increment idxs
        let mut i = idxs.len();
        loop {
            if i == 0 {
                return res;
            }
            i -= 1;
            if idxs[i] < lens[i] - 1 {
                idxs[i] += 1;
                for idx in &mut idxs[i + 1..] {
                    *idx = 0;
                }
                break;
            }
        }
    }
}

#[test]
fn test_cartesian_product() {
    let vv = vec![vec![0, 1], vec![2], vec![3, 4]];
    let res = cartesian_product(&vv);
    assert_eq!(res.len(), 4);
    assert_eq!(res[0], vec![&0, &2, &3]);
    assert_eq!(res[3], vec![&1, &2, &4]);

    let vv = vec![vec![0, 1], vec![]];
    assert!(cartesian_product(&vv).is_empty());
}
