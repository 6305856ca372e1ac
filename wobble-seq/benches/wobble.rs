use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wobble_seq::{common_enzymes, rank_edits, AlignedSequence, CodonTables, WobbleCutDetector};

fn random_dna(len: usize) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut state: u64 = 42;
    for _ in 0..len {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        seq.push(bases[((state >> 33) % 4) as usize]);
    }
    seq
}

fn random_coding(codons: usize) -> AlignedSequence {
    AlignedSequence::new(random_dna(codons * 3)).unwrap()
}

fn bench_detect_cuts(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_cuts");
    let tables = CodonTables::default();
    let detector = WobbleCutDetector::new(&tables);
    let enzymes = common_enzymes();

    for &codons in &[100, 1_000, 10_000] {
        let target = random_coding(codons);
        group.bench_with_input(BenchmarkId::new("all_enzymes", codons), &target, |b, target| {
            b.iter(|| {
                enzymes
                    .iter()
                    .map(|e| detector.detect_cuts(black_box(target), e).len())
                    .sum::<usize>()
            })
        });
    }
    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let tables = CodonTables::default();
    let target = random_coding(1_000);
    let enzyme = common_enzymes()
        .into_iter()
        .find(|e| e.len() == 4)
        .unwrap();
    let edits = WobbleCutDetector::new(&tables).detect_cuts(&target, &enzyme);

    c.bench_function("rank_edits", |b| {
        b.iter(|| {
            let mut edits = edits.clone();
            rank_edits(black_box(&mut edits), &tables);
            edits
        })
    });
}

fn bench_degenerate_expansion(c: &mut Criterion) {
    let tables = CodonTables::default();
    let target = random_coding(300);
    let enzyme = wobble_seq::RestrictionEnzyme::new("BsaJI", "CCNNGG").unwrap();

    c.bench_function("degenerate_site", |b| {
        b.iter(|| WobbleCutDetector::new(&tables).detect_cuts(black_box(&target), &enzyme))
    });
}

criterion_group!(benches, bench_detect_cuts, bench_rank, bench_degenerate_expansion);
criterion_main!(benches);
