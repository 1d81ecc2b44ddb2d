use rand::{Rng, SeedableRng};
use rect_packer_core::prelude::*;

fn run(cfg: &PackerConfig, seq: &[(u32, u32)]) -> Vec<Rect> {
    let mut bin = Bin::new(cfg.clone()).unwrap();
    let mut out = Vec::new();
    for (w, h) in seq.iter().copied() {
        if let Ok(r) = bin.insert(w, h) {
            out.push(r);
        }
    }
    out
}

#[test]
fn identical_sequences_yield_identical_placements() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let mut seq: Vec<(u32, u32)> = Vec::new();
    for _ in 0..120 {
        seq.push((rng.gen_range(4..=64), rng.gen_range(4..=64)));
    }

    let cfg = PackerConfig::builder().with_dimensions(512, 512).build();
    let f1 = run(&cfg, &seq);
    let f2 = run(&cfg, &seq);

    assert!(!f1.is_empty());
    assert_eq!(f1.len(), f2.len());
    for (a, b) in f1.iter().zip(f2.iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn shelf_runs_are_repeatable_too() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(17);
    let mut seq: Vec<(u32, u32)> = Vec::new();
    for _ in 0..80 {
        seq.push((rng.gen_range(4..=32), rng.gen_range(4..=32)));
    }

    let cfg = PackerConfig::builder()
        .with_dimensions(256, 256)
        .strategy(Strategy::Shelf)
        .build();
    assert_eq!(run(&cfg, &seq), run(&cfg, &seq));
}
