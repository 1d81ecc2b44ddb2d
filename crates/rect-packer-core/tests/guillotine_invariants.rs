use rand::{Rng, SeedableRng};
use rect_packer_core::packer::Packer;
use rect_packer_core::packer::guillotine::GuillotinePacker;
use rect_packer_core::prelude::*;

fn disjoint(rects: &[Rect]) -> bool {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects[i].intersects(&rects[j]) {
                return false;
            }
        }
    }
    true
}

#[test]
fn random_stream_disjoint_and_contained() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let mut bin = Bin::with_dimensions(512, 512).unwrap();
    let mut failures = 0usize;
    for _ in 0..400 {
        let w = rng.gen_range(4..=96);
        let h = rng.gen_range(4..=96);
        match bin.insert(w, h) {
            Ok(r) => {
                assert_eq!((r.w, r.h), (w, h));
                assert!(r.x + r.w <= bin.width());
                assert!(r.y + r.h <= bin.height());
            }
            Err(PackError::OutOfSpace) => failures += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert!(disjoint(bin.placed()));
    // the stream's cumulative area far exceeds the canvas
    assert!(failures > 0);
    assert!(bin.stats().used_area <= bin.stats().total_area);
}

#[test]
fn free_space_is_conserved() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let cfg = PackerConfig::builder().with_dimensions(256, 256).build();
    let mut p = GuillotinePacker::new(&cfg);
    let mut placed: Vec<Rect> = Vec::new();
    for _ in 0..200 {
        let w = rng.gen_range(2..=48);
        let h = rng.gen_range(2..=48);
        if let Some(r) = p.pack(w, h) {
            placed.push(r);
        }
        let free = p.free_rects();
        assert!(disjoint(free));
        for f in free {
            for r in &placed {
                assert!(!f.intersects(r));
            }
        }
        let free_area: u64 = free.iter().map(Rect::area).sum();
        let used_area: u64 = placed.iter().map(Rect::area).sum();
        assert_eq!(free_area + used_area, 256 * 256);
    }
    assert!(!placed.is_empty());
}

#[test]
fn every_heuristic_combination_upholds_invariants() {
    let choices = [
        FitChoice::BestAreaFit,
        FitChoice::BestShortSideFit,
        FitChoice::BestLongSideFit,
        FitChoice::WorstAreaFit,
        FitChoice::WorstShortSideFit,
        FitChoice::WorstLongSideFit,
    ];
    let splits = [
        SplitRule::SquarerLeftover,
        SplitRule::ShorterLeftoverAxis,
        SplitRule::LongerLeftoverAxis,
        SplitRule::MinimizeArea,
        SplitRule::MaximizeArea,
        SplitRule::ShorterAxis,
        SplitRule::LongerAxis,
    ];
    for choice in choices {
        for split in splits {
            let mut rng = rand::rngs::StdRng::seed_from_u64(9);
            let cfg = PackerConfig::builder()
                .with_dimensions(128, 128)
                .choice(choice)
                .split(split)
                .build();
            let mut bin = Bin::new(cfg).unwrap();
            for _ in 0..80 {
                let w = rng.gen_range(2..=32);
                let h = rng.gen_range(2..=32);
                let _ = bin.insert(w, h);
            }
            assert!(
                disjoint(bin.placed()),
                "overlap with {choice:?}/{split:?}"
            );
            for r in bin.placed() {
                assert!(r.x + r.w <= 128 && r.y + r.h <= 128);
            }
        }
    }
}
