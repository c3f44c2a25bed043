mod common;

use balanced_forest::{tree_sort, AvlOps, LlrbOps, RbOps};
use common::*;
use forest_util::{Fuzzer, TraceOp};

const SEEDS: [[u8; 32]; 4] = [[1; 32], [7; 32], [42; 32], [200; 32]];

#[test]
fn fuzzer_trace_matrix() {
    init_logger();
    for seed in SEEDS {
        let mut fuzzer = Fuzzer::new(Some(seed));
        let ops = fuzzer.trace(2_000, (0, 150), 0.6);

        let rb = replay::<RbOps>(&ops);
        let avl = replay::<AvlOps>(&ops);
        let llrb = replay::<LlrbOps>(&ops);

        assert_eq!(contents(&rb), contents(&avl), "seed {seed:?}");
        assert_eq!(contents(&rb), contents(&llrb), "seed {seed:?}");
        assert_eq!(rb.total(), avl.total());
        assert_eq!(rb.total(), llrb.total());
    }
}

#[test]
fn fuzzer_delete_heavy_trace_matrix() {
    for seed in SEEDS {
        let mut fuzzer = Fuzzer::new(Some(seed));
        let mut ops = fuzzer.trace(500, (-40, 40), 1.0);
        ops.extend(fuzzer.trace(1_500, (-40, 40), 0.3));

        replay::<RbOps>(&ops);
        replay::<AvlOps>(&ops);
        replay::<LlrbOps>(&ops);
    }
}

#[test]
fn shuffled_teardown_matrix() {
    let mut fuzzer = Fuzzer::new(Some([5; 32]));
    for n in [1, 2, 3, 10, 64, 300] {
        let mut inserted: Vec<i64> = (0..n).collect();
        fuzzer.shuffle(&mut inserted);
        let mut deleted = inserted.clone();
        fuzzer.shuffle(&mut deleted);

        delete_everything::<RbOps>(&inserted, &deleted);
        delete_everything::<AvlOps>(&inserted, &deleted);
        delete_everything::<LlrbOps>(&inserted, &deleted);
    }
}

#[test]
fn interleaved_duplicates_matrix() {
    let ops: Vec<TraceOp> = (0..300)
        .flat_map(|i| {
            let k = i % 17;
            if i % 5 == 4 {
                vec![TraceOp::Delete(k)]
            } else {
                vec![TraceOp::Insert(k), TraceOp::Insert(k)]
            }
        })
        .collect();

    let rb = replay::<RbOps>(&ops);
    let avl = replay::<AvlOps>(&ops);
    let llrb = replay::<LlrbOps>(&ops);
    assert_eq!(contents(&rb), contents(&avl));
    assert_eq!(contents(&rb), contents(&llrb));
}

#[test]
fn tree_sort_matrix() {
    let mut fuzzer = Fuzzer::new(Some([11; 32]));
    let input: Vec<i64> = (0..400).map(|_| fuzzer.random_int(-50, 50)).collect();
    let mut expected = input.clone();
    expected.sort();

    assert_eq!(tree_sort::<RbOps, _>(&input), expected);
    assert_eq!(tree_sort::<AvlOps, _>(&input), expected);
    assert_eq!(tree_sort::<LlrbOps, _>(&input), expected);
}
