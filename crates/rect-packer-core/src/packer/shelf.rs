use super::Packer;
use crate::config::{PackerConfig, ShelfPolicy};
use crate::model::Rect;
use tracing::trace;

#[derive(Clone, Debug)]
struct Shelf {
    y: u32,
    h: u32,
    /// Free spans as (x, w), kept sorted and coalesced.
    segs: Vec<(u32, u32)>,
}

/// Shelf packer: fills the canvas in horizontal rows. A new shelf opens
/// below the last one when no existing row can take the rectangle.
pub struct ShelfPacker {
    width: u32,
    height: u32,
    policy: ShelfPolicy,
    shelves: Vec<Shelf>,
    next_y: u32,
}

impl ShelfPacker {
    pub fn new(cfg: &PackerConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
            policy: cfg.shelf_policy,
            shelves: Vec::new(),
            next_y: 0,
        }
    }

    fn choose(&self, w: u32, h: u32) -> Option<Rect> {
        let fit_in = |sh: &Shelf| -> Option<Rect> {
            if h > sh.h {
                return None;
            }
            sh.segs
                .iter()
                .find(|(_, sw)| *sw >= w)
                .map(|(sx, _)| Rect::new(*sx, sh.y, w, h))
        };
        match self.policy {
            ShelfPolicy::FirstFit => {
                for sh in &self.shelves {
                    if let Some(r) = fit_in(sh) {
                        return Some(r);
                    }
                }
            }
            ShelfPolicy::NextFit => {
                if let Some(sh) = self.shelves.last() {
                    if let Some(r) = fit_in(sh) {
                        return Some(r);
                    }
                }
            }
        }
        // Open a new shelf below the last one.
        if w <= self.width && h <= self.height.saturating_sub(self.next_y) {
            return Some(Rect::new(0, self.next_y, w, h));
        }
        None
    }

    fn consume(&mut self, slot: &Rect) {
        if let Some(sh) = self
            .shelves
            .iter_mut()
            .find(|s| s.y == slot.y && s.h >= slot.h)
        {
            consume_from_shelf(sh, slot);
        } else {
            let mut sh = Shelf {
                y: slot.y,
                h: slot.h,
                segs: vec![(0, self.width)],
            };
            consume_from_shelf(&mut sh, slot);
            self.shelves.push(sh);
            self.next_y = self.next_y.max(slot.y + slot.h);
        }
    }
}

impl Packer for ShelfPacker {
    fn can_pack(&self, w: u32, h: u32) -> bool {
        w > 0 && h > 0 && self.choose(w, h).is_some()
    }

    fn pack(&mut self, w: u32, h: u32) -> Option<Rect> {
        if w == 0 || h == 0 {
            return None;
        }
        let slot = self.choose(w, h)?;
        self.consume(&slot);
        trace!(
            x = slot.x,
            y = slot.y,
            shelves = self.shelves.len(),
            "placed rectangle"
        );
        Some(slot)
    }
}

fn consume_from_shelf(sh: &mut Shelf, slot: &Rect) {
    let mut i = 0;
    while i < sh.segs.len() {
        let (sx, sw) = sh.segs[i];
        if slot.x >= sx && slot.x + slot.w <= sx + sw {
            sh.segs.remove(i);
            let left_w = slot.x - sx;
            let right_x = slot.x + slot.w;
            let right_w = (sx + sw) - right_x;
            if left_w > 0 {
                sh.segs.push((sx, left_w));
            }
            if right_w > 0 {
                sh.segs.push((right_x, right_w));
            }
            break;
        }
        i += 1;
    }
    merge_shelf_segments(sh);
}

fn merge_shelf_segments(sh: &mut Shelf) {
    sh.segs.sort_by_key(|(x, _)| *x);
    let mut out: Vec<(u32, u32)> = Vec::new();
    for (x, w) in sh.segs.drain(..) {
        if let Some((lx, lw)) = out.last_mut() {
            if *lx + *lw == x {
                *lw += w;
                continue;
            }
        }
        out.push((x, w));
    }
    sh.segs = out;
}
