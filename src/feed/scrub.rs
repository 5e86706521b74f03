//! Pointer/touch scrub selection for the strip and drawer views.

/// Continuous pointer position mapped to a discrete post index.
///
/// The container extent divides evenly into one band per post; the selected
/// index tracks the pointer only while it is down. On release the last
/// selection is frozen and stays until the next press, which is the
/// intended feel of the strip view rather than a side effect.
#[derive(Debug)]
pub struct StripScrub {
    len: usize,
    engaged: bool,
    selected: usize,
}

impl StripScrub {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            engaged: false,
            selected: 0,
        }
    }

    /// Pointer down / touch start. Selection starts tracking immediately.
    pub fn press(&mut self, offset: f64, extent: f64) -> usize {
        self.engaged = true;
        self.track(offset, extent)
    }

    /// Pointer movement. Ignored unless the pointer is down.
    pub fn track(&mut self, offset: f64, extent: f64) -> usize {
        if self.engaged {
            self.selected = band_index(offset, extent, self.len);
        }
        self.selected
    }

    /// Pointer up / touch end. Freezes the last selection.
    pub fn release(&mut self) -> usize {
        self.engaged = false;
        self.selected
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Keeps the selection valid when the post list changes length.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

/// `floor(offset / band)` clamped to a valid index, where the band is the
/// extent divided evenly across `len` posts.
pub fn band_index(offset: f64, extent: f64, len: usize) -> usize {
    if len == 0 || extent <= 0.0 {
        return 0;
    }
    let band = extent / len as f64;
    let idx = (offset / band).floor();
    if idx < 0.0 {
        0
    } else {
        (idx as usize).min(len - 1)
    }
}

/// Active-post selection for the vertically offset drawer stack.
///
/// Each post sits at baseline offset `index * item_offset`. The active post
/// minimizes distance from the viewport center, discounted by two
/// square-root-shaped bias terms that pull selection toward the first post
/// near the top of the scroll range and the last post near the bottom.
/// Scrolling to the absolute top or bottom overrides the scoring entirely.
#[derive(Debug, Clone, Copy)]
pub struct DrawerSelect {
    /// Baseline vertical spacing between stacked posts, in pixels.
    pub item_offset: f64,
    /// Viewport height in pixels.
    pub viewport: f64,
    /// Strength of the endpoint bias terms, in pixels.
    pub bias: f64,
}

impl DrawerSelect {
    pub fn active_index(&self, len: usize, scroll_top: f64, max_scroll: f64) -> usize {
        if len == 0 {
            return 0;
        }
        let last = len - 1;

        let t = if max_scroll <= 0.0 {
            0.0
        } else {
            (scroll_top / max_scroll).clamp(0.0, 1.0)
        };
        if t <= 0.0 {
            return 0;
        }
        if t >= 1.0 {
            return last;
        }

        let center = scroll_top + self.viewport / 2.0;
        let mut best = 0;
        let mut best_score = f64::INFINITY;
        for i in 0..len {
            let item_center = i as f64 * self.item_offset + self.item_offset / 2.0;
            let mut score = (item_center - center).abs();
            if i == 0 {
                score -= (1.0 - t).sqrt() * self.bias;
            }
            if i == last {
                score -= t.sqrt() * self.bias;
            }
            if score < best_score {
                best_score = score;
                best = i;
            }
        }
        best
    }
}
