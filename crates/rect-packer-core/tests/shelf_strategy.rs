use rand::{Rng, SeedableRng};
use rect_packer_core::prelude::*;

fn shelf_bin(w: u32, h: u32, policy: ShelfPolicy) -> Bin {
    Bin::new(
        PackerConfig::builder()
            .with_dimensions(w, h)
            .strategy(Strategy::Shelf)
            .shelf_policy(policy)
            .build(),
    )
    .unwrap()
}

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
fn rows_fill_left_to_right_then_open_below() {
    let mut bin = shelf_bin(64, 64, ShelfPolicy::FirstFit);
    assert_eq!(bin.insert(10, 10).unwrap(), Rect::new(0, 0, 10, 10));
    assert_eq!(bin.insert(20, 10).unwrap(), Rect::new(10, 0, 20, 10));
    // taller than the row: a new shelf opens below
    assert_eq!(bin.insert(5, 20).unwrap(), Rect::new(0, 10, 5, 20));
    // first-fit goes back to the remaining span of the first row
    assert_eq!(bin.insert(8, 6).unwrap(), Rect::new(30, 0, 8, 6));
}

#[test]
fn next_fit_never_returns_to_earlier_rows() {
    let mut bin = shelf_bin(64, 64, ShelfPolicy::NextFit);
    assert_eq!(bin.insert(10, 10).unwrap(), Rect::new(0, 0, 10, 10));
    assert_eq!(bin.insert(5, 20).unwrap(), Rect::new(0, 10, 5, 20));
    // the first row still has room but next-fit only looks at the last shelf
    assert_eq!(bin.insert(8, 6).unwrap(), Rect::new(5, 10, 8, 6));
}

#[test]
fn shelf_exhaustion() {
    let mut bin = shelf_bin(32, 32, ShelfPolicy::FirstFit);
    for _ in 0..4 {
        bin.insert(16, 16).unwrap();
    }
    assert!(matches!(bin.insert(16, 16), Err(PackError::OutOfSpace)));
    assert_eq!(bin.stats().occupancy, 1.0);
}

#[test]
fn random_stream_stays_disjoint() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(23);
    let mut bin = shelf_bin(256, 256, ShelfPolicy::FirstFit);
    for _ in 0..300 {
        let w = rng.gen_range(2..=40);
        let h = rng.gen_range(2..=40);
        let _ = bin.insert(w, h);
    }
    assert!(disjoint(bin.placed()));
    for r in bin.placed() {
        assert!(r.x + r.w <= 256 && r.y + r.h <= 256);
    }
}
