use super::Packer;
use crate::config::{FitChoice, PackerConfig, SplitRule};
use crate::model::Rect;
use tracing::trace;

/// Guillotine packer: tracks the unoccupied area as a set of disjoint free
/// rectangles, seeded with the whole canvas. Each placement consumes one free
/// rectangle and splits the remainder into at most two residuals along a
/// single cut.
pub struct GuillotinePacker {
    free: Vec<Rect>,
    choice: FitChoice,
    split: SplitRule,
}

impl GuillotinePacker {
    pub fn new(cfg: &PackerConfig) -> Self {
        Self {
            free: vec![Rect::new(0, 0, cfg.width, cfg.height)],
            choice: cfg.choice,
            split: cfg.split,
        }
    }

    /// Free regions currently tracked. Pairwise disjoint after every `pack`.
    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    fn score(choice: FitChoice, fr: &Rect, w: u32, h: u32) -> i64 {
        let area_fit = fr.area() as i64 - (w as i64 * h as i64);
        let leftover_w = fr.w as i64 - w as i64;
        let leftover_h = fr.h as i64 - h as i64;
        let short_fit = leftover_w.min(leftover_h);
        let long_fit = leftover_w.max(leftover_h);
        match choice {
            FitChoice::BestAreaFit => area_fit,
            FitChoice::BestShortSideFit => short_fit,
            FitChoice::BestLongSideFit => long_fit,
            FitChoice::WorstAreaFit => -area_fit,
            FitChoice::WorstShortSideFit => -short_fit,
            FitChoice::WorstLongSideFit => -long_fit,
        }
    }

    /// Index of the free rectangle to place into. Ties on the choice score
    /// fall through to smallest leftover width, then smallest leftover
    /// height, then lowest (y, x), so identical insert sequences always pick
    /// the same region.
    fn choose(&self, w: u32, h: u32) -> Option<usize> {
        let mut best: Option<(usize, (i64, i64, i64, u32, u32))> = None;
        for (i, fr) in self.free.iter().enumerate() {
            if fr.w < w || fr.h < h {
                continue;
            }
            let key = (
                Self::score(self.choice, fr, w, h),
                fr.w as i64 - w as i64,
                fr.h as i64 - h as i64,
                fr.y,
                fr.x,
            );
            match best {
                Some((_, best_key)) if best_key <= key => {}
                _ => best = Some((i, key)),
            }
        }
        best.map(|(i, _)| i)
    }

    fn split(&self, fr: &Rect, placed: &Rect) -> (Option<Rect>, Option<Rect>) {
        // Leftover widths/heights to the right of and below the placement.
        let w_right = (fr.x + fr.w).saturating_sub(placed.x + placed.w);
        let h_bottom = (fr.y + fr.h).saturating_sub(placed.y + placed.h);

        let split_horizontal = match self.split {
            SplitRule::SquarerLeftover => {
                squarer_cut_is_horizontal(fr, placed, w_right, h_bottom)
            }
            SplitRule::ShorterLeftoverAxis => h_bottom < w_right,
            SplitRule::LongerLeftoverAxis => h_bottom > w_right,
            SplitRule::MinimizeArea => {
                (w_right as u64 * fr.h as u64) <= (fr.w as u64 * h_bottom as u64)
            }
            SplitRule::MaximizeArea => {
                (w_right as u64 * fr.h as u64) >= (fr.w as u64 * h_bottom as u64)
            }
            SplitRule::ShorterAxis => fr.h < fr.w,
            SplitRule::LongerAxis => fr.h > fr.w,
        };

        // Form the two residuals: bottom and right. Widths/heights depend on
        // which axis carries the full cut.
        let mut bottom = Rect::new(fr.x, placed.y + placed.h, 0, h_bottom);
        let mut right = Rect::new(placed.x + placed.w, fr.y, w_right, 0);
        if split_horizontal {
            bottom.w = fr.w;
            right.h = placed.h;
        } else {
            bottom.w = placed.w;
            right.h = fr.h;
        }
        let r1 = if bottom.w > 0 && bottom.h > 0 {
            Some(bottom)
        } else {
            None
        };
        let r2 = if right.w > 0 && right.h > 0 {
            Some(right)
        } else {
            None
        };
        (r1, r2)
    }

    /// Drop free rectangles fully contained in another, so the set cannot
    /// grow with redundant entries across many insertions.
    fn prune_free_list(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let mut swallowed = false;
            let mut j = i + 1;
            while j < self.free.len() {
                if self.free[j].contains(&self.free[i]) {
                    swallowed = true;
                    break;
                }
                if self.free[i].contains(&self.free[j]) {
                    self.free.remove(j);
                    continue;
                }
                j += 1;
            }
            if swallowed {
                self.free.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Coalesce free rectangles that share an edge and line up exactly,
    /// either side by side or stacked. Repeats until no pair merges.
    fn merge_free_list(&mut self) {
        let mut merged = true;
        while merged {
            merged = false;
            'outer: for i in 0..self.free.len() {
                for j in i + 1..self.free.len() {
                    let a = self.free[i];
                    let b = self.free[j];
                    if a.y == b.y && a.h == b.h {
                        if a.x + a.w == b.x {
                            self.free[i] = Rect::new(a.x, a.y, a.w + b.w, a.h);
                            self.free.remove(j);
                            merged = true;
                            break 'outer;
                        } else if b.x + b.w == a.x {
                            self.free[i] = Rect::new(b.x, a.y, a.w + b.w, a.h);
                            self.free.remove(j);
                            merged = true;
                            break 'outer;
                        }
                    }
                    if a.x == b.x && a.w == b.w {
                        if a.y + a.h == b.y {
                            self.free[i] = Rect::new(a.x, a.y, a.w, a.h + b.h);
                            self.free.remove(j);
                            merged = true;
                            break 'outer;
                        } else if b.y + b.h == a.y {
                            self.free[i] = Rect::new(a.x, b.y, a.w, a.h + b.h);
                            self.free.remove(j);
                            merged = true;
                            break 'outer;
                        }
                    }
                }
            }
        }
    }
}

impl Packer for GuillotinePacker {
    fn can_pack(&self, w: u32, h: u32) -> bool {
        w > 0 && h > 0 && self.choose(w, h).is_some()
    }

    fn pack(&mut self, w: u32, h: u32) -> Option<Rect> {
        if w == 0 || h == 0 {
            return None;
        }
        let idx = self.choose(w, h)?;
        let fr = self.free.swap_remove(idx);
        let placed = Rect::new(fr.x, fr.y, w, h);
        let (a, b) = self.split(&fr, &placed);
        if let Some(r) = a {
            self.free.push(r);
        }
        if let Some(r) = b {
            self.free.push(r);
        }
        self.prune_free_list();
        self.merge_free_list();
        trace!(
            x = placed.x,
            y = placed.y,
            free = self.free.len(),
            "placed rectangle"
        );
        Some(placed)
    }
}

/// Compares the two candidate cuts by the aspect of the worse residual in
/// each pair; the cut whose residuals stay closer to square wins. Degenerate
/// residuals count as ideal. Ties fall to the horizontal cut.
fn squarer_cut_is_horizontal(fr: &Rect, placed: &Rect, w_right: u32, h_bottom: u32) -> bool {
    let horizontal = aspect(fr.w, h_bottom).max(aspect(w_right, placed.h));
    let vertical = aspect(placed.w, h_bottom).max(aspect(w_right, fr.h));
    horizontal <= vertical
}

fn aspect(w: u32, h: u32) -> f64 {
    if w == 0 || h == 0 {
        1.0
    } else {
        w.max(h) as f64 / w.min(h) as f64
    }
}
