use crate::config::{PackerConfig, Strategy};
use crate::error::{PackError, Result};
use crate::model::{BinStats, Rect};
use crate::packer::{Packer, guillotine::GuillotinePacker, shelf::ShelfPacker};
use tracing::debug;

/// A fixed-size container accepting a stream of rectangle placements.
///
/// Construction is the only initialization point: a `Bin` always starts from
/// a single free region covering the whole canvas, so insertion before
/// initialization is unrepresentable. Placements are returned by value and
/// never referenced by the bin afterwards.
///
/// A `Bin` is not internally synchronized; give each thread its own instance
/// or serialize access externally.
pub struct Bin {
    cfg: PackerConfig,
    strategy: Box<dyn Packer + Send>,
    placed: Vec<Rect>,
}

impl Bin {
    /// Creates a bin for the configured canvas. Rejects zero dimensions.
    pub fn new(cfg: PackerConfig) -> Result<Self> {
        cfg.validate()?;
        let strategy = make_strategy(&cfg);
        Ok(Self {
            cfg,
            strategy,
            placed: Vec::new(),
        })
    }

    /// Creates a bin with default policies for a `width` x `height` canvas.
    pub fn with_dimensions(width: u32, height: u32) -> Result<Self> {
        Self::new(PackerConfig {
            width,
            height,
            ..PackerConfig::default()
        })
    }

    /// Places a `w` x `h` rectangle and returns where it landed.
    ///
    /// Fails with `OutOfSpace` when no free region can hold it; the bin is
    /// left untouched so the caller may skip the item, stop, or start over
    /// with a larger canvas. Zero dimensions are rejected up front.
    pub fn insert(&mut self, w: u32, h: u32) -> Result<Rect> {
        if w == 0 || h == 0 {
            return Err(PackError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        match self.strategy.pack(w, h) {
            Some(rect) => {
                debug!(x = rect.x, y = rect.y, w, h, "insert");
                self.placed.push(rect);
                Ok(rect)
            }
            None => {
                debug!(w, h, "no fit");
                Err(PackError::OutOfSpace)
            }
        }
    }

    /// Returns true if a `w` x `h` rectangle currently fits somewhere.
    pub fn can_insert(&self, w: u32, h: u32) -> bool {
        w > 0 && h > 0 && self.strategy.can_pack(w, h)
    }

    /// Forgets all placements and restores the single full-canvas free
    /// region, as if the bin had just been constructed.
    pub fn reset(&mut self) {
        self.strategy = make_strategy(&self.cfg);
        self.placed.clear();
    }

    pub fn width(&self) -> u32 {
        self.cfg.width
    }

    pub fn height(&self) -> u32 {
        self.cfg.height
    }

    /// Rectangles placed so far, in insertion order.
    pub fn placed(&self) -> &[Rect] {
        &self.placed
    }

    /// Computes occupancy statistics for this bin.
    pub fn stats(&self) -> BinStats {
        let total_area = self.cfg.width as u64 * self.cfg.height as u64;
        let used_area: u64 = self.placed.iter().map(Rect::area).sum();
        let occupancy = if total_area > 0 {
            used_area as f64 / total_area as f64
        } else {
            0.0
        };
        BinStats {
            num_placed: self.placed.len(),
            total_area,
            used_area,
            occupancy,
        }
    }
}

fn make_strategy(cfg: &PackerConfig) -> Box<dyn Packer + Send> {
    match cfg.strategy {
        Strategy::Guillotine => Box::new(GuillotinePacker::new(cfg)),
        Strategy::Shelf => Box::new(ShelfPacker::new(cfg)),
    }
}
