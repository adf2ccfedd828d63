use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sudoku_solver::backtracking::BacktrackingSolver;
use sudoku_solver::csp::CspSolver;
use sudoku_solver::dlx::DlxSolver;
use sudoku_solver::grid::{EXAMPLE, Grid, HARD_SEVENTEEN};
use sudoku_solver::solver::Solver;

fn bench_example(c: &mut Criterion) {
    let puzzle = Grid::new(EXAMPLE);

    let mut group = c.benchmark_group("example - 30 clues");

    group.bench_function("dlx", |b| {
        b.iter(|| {
            let mut solver = DlxSolver::new(black_box(puzzle));
            black_box(solver.solve());
        });
    });

    group.bench_function("backtracking", |b| {
        b.iter(|| {
            let mut solver = BacktrackingSolver::new(black_box(puzzle));
            black_box(solver.solve());
        });
    });

    group.bench_function("csp", |b| {
        b.iter(|| {
            let mut solver = CspSolver::new(black_box(puzzle));
            black_box(solver.solve());
        });
    });

    group.finish();
}

fn bench_seventeen_clues(c: &mut Criterion) {
    let puzzle = Grid::new(HARD_SEVENTEEN);

    let mut group = c.benchmark_group("hard - 17 clues");
    group.sample_size(50);

    group.bench_function("dlx", |b| {
        b.iter(|| {
            let mut solver = DlxSolver::new(black_box(puzzle));
            black_box(solver.solve());
        });
    });

    group.bench_function("csp", |b| {
        b.iter(|| {
            let mut solver = CspSolver::new(black_box(puzzle));
            black_box(solver.solve());
        });
    });

    group.finish();
}

fn bench_network_construction(c: &mut Criterion) {
    let puzzle = Grid::new(EXAMPLE);

    c.bench_function("dlx construction", |b| {
        b.iter(|| {
            black_box(DlxSolver::new(black_box(puzzle)));
        });
    });
}

criterion_group!(
    benches,
    bench_example,
    bench_seventeen_clues,
    bench_network_construction
);

criterion_main!(benches);
