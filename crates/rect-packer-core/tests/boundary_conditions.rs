use rect_packer_core::packer::Packer;
use rect_packer_core::packer::guillotine::GuillotinePacker;
use rect_packer_core::prelude::*;

#[test]
fn first_insert_lands_top_left() {
    let mut bin = Bin::with_dimensions(1024, 1024).unwrap();
    let a = bin.insert(80, 60).unwrap();
    assert_eq!(a, Rect::new(0, 0, 80, 60));
    let b = bin.insert(80, 60).unwrap();
    assert!(!a.intersects(&b));
    // best-area-fit takes the narrow column left by the first split
    assert_eq!(b, Rect::new(0, 60, 80, 60));
}

#[test]
fn exact_fill_then_reject() {
    let mut bin = Bin::with_dimensions(10, 10).unwrap();
    assert_eq!(bin.insert(10, 10).unwrap(), Rect::new(0, 0, 10, 10));
    assert!(!bin.can_insert(1, 1));
    assert!(matches!(bin.insert(1, 1), Err(PackError::OutOfSpace)));
    assert_eq!(bin.stats().occupancy, 1.0);
}

#[test]
fn oversize_request_fails_without_mutation() {
    let cfg = PackerConfig::builder().with_dimensions(5, 5).build();
    let mut p = GuillotinePacker::new(&cfg);
    assert!(p.pack(6, 1).is_none());
    assert_eq!(p.free_rects(), &[Rect::new(0, 0, 5, 5)]);

    let mut bin = Bin::new(cfg).unwrap();
    assert!(matches!(bin.insert(6, 1), Err(PackError::OutOfSpace)));
    assert!(bin.placed().is_empty());
    assert_eq!(bin.insert(5, 5).unwrap(), Rect::new(0, 0, 5, 5));
}

#[test]
fn zero_dimensions_rejected() {
    let mut bin = Bin::with_dimensions(64, 64).unwrap();
    assert!(matches!(
        bin.insert(0, 4),
        Err(PackError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        bin.insert(4, 0),
        Err(PackError::InvalidDimensions { .. })
    ));
    assert!(bin.placed().is_empty());
    assert!(!bin.can_insert(0, 4));

    let cfg = PackerConfig {
        width: 0,
        height: 16,
        ..PackerConfig::default()
    };
    assert!(matches!(
        Bin::new(cfg),
        Err(PackError::InvalidDimensions { .. })
    ));
}

#[test]
fn reset_restores_full_canvas() {
    let mut bin = Bin::with_dimensions(10, 10).unwrap();
    bin.insert(10, 10).unwrap();
    assert!(matches!(bin.insert(1, 1), Err(PackError::OutOfSpace)));
    bin.reset();
    assert!(bin.placed().is_empty());
    assert_eq!(bin.insert(10, 10).unwrap(), Rect::new(0, 0, 10, 10));
}

#[test]
fn item_matching_canvas_edge_fits() {
    let mut bin = Bin::with_dimensions(100, 40).unwrap();
    let r = bin.insert(100, 1).unwrap();
    assert_eq!(r, Rect::new(0, 0, 100, 1));
    assert!(bin.can_insert(100, 39));
    assert!(!bin.can_insert(100, 40));
}
