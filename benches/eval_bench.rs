use criterion::{criterion_group, criterion_main, Criterion, black_box};
use kpbot::board::Board;

fn bench_eval(c: &mut Criterion) {
    let kp = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3").unwrap();
    c.bench_function("eval_kp_vs_k", |ben| {
        ben.iter(|| {
            let v = kpbot::search::eval::evaluate(black_box(&kp));
            black_box(v)
        })
    });
    let kq = Board::from_fen("k7/8/1Q6/8/8/8/8/4K3").unwrap();
    c.bench_function("eval_kq_vs_k", |ben| {
        ben.iter(|| {
            let v = kpbot::search::eval::evaluate(black_box(&kq));
            black_box(v)
        })
    });
}

criterion_group!(benches, bench_eval);
criterion_main!(benches);
