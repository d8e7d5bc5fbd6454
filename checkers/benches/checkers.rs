use checkers::{movegen, Board, Color, Coord, Make, Move};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const BOARDS: [(&str, &str); 5] = [
    (
        "initial",
        "1b1b1b1b/b1b1b1b1/1b1b1b1b/8/8/w1w1w1w1/1w1w1w1w/w1w1w1w1",
    ),
    (
        "middle",
        "1b1b1b2/b1b3b1/3b1b1b/b1w5/3w1w2/w1w3w1/3w1w1w/8",
    ),
    ("captures", "8/8/1b1b1b2/2w1w1w1/1b1b1b2/2w1w1w1/8/8"),
    ("crowned", "1B3B2/8/3W4/8/5W2/8/1B3W2/8"),
    ("endgame", "8/8/3b4/8/8/4W3/8/8"),
];

fn boards() -> impl Iterator<Item = (&'static str, Board)> {
    BOARDS
        .iter()
        .map(|&(name, diagram)| (name, Board::from_diagram(diagram).unwrap()))
}

fn bench_gen_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_moves");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(movegen::gen_all(&board, Color::White).len()))
        });
    }
}

fn bench_has_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_moves");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(movegen::has_legal_moves(&board, Color::Black)))
        });
    }
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut cnt = 0;
                for src in board.color(Color::White) {
                    for dst in Coord::iter() {
                        if board.is_valid_move(src, dst) {
                            cnt += 1;
                        }
                    }
                }
                black_box(cnt)
            })
        });
    }
}

fn bench_make_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_move");
    for (name, board) in boards() {
        let moves: Vec<Move> = movegen::gen_all(&board, Color::White).to_vec();
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in &moves {
                    let _ = black_box(mv.make(&board));
                }
            })
        });
    }
}

criterion_group!(
    benches,
    bench_gen_moves,
    bench_has_moves,
    bench_validate,
    bench_make_move
);
criterion_main!(benches);
