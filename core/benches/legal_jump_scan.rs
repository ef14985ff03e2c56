//! Cost of the terminal-state scan on the builtin boards.
//!
//! ```bash
//! cargo bench --package pegjump-core --bench legal_jump_scan
//! ```

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use pegjump_core::{Board, Catalog};

fn legal_jump_scan(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let mut group = c.benchmark_group("has_any_legal_jump");

    for level in catalog.iter() {
        let (board, _) = Board::initialize(&level.board_setup).unwrap();
        group.bench_function(level.name.as_str(), |b| {
            b.iter(|| black_box(&board).has_any_legal_jump())
        });
    }

    group.finish();
}

fn legal_targets_everywhere(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let english = catalog.iter().max_by_key(|level| level.board_setup.len()).unwrap();
    let (board, _) = Board::initialize(&english.board_setup).unwrap();

    c.bench_function("legal_targets/all_cells", |b| {
        b.iter(|| {
            board
                .iter_cells()
                .map(|(pos, _)| black_box(&board).legal_targets(pos).len())
                .sum::<usize>()
        })
    });
}

criterion_group!(benches, legal_jump_scan, legal_targets_everywhere);
criterion_main!(benches);
