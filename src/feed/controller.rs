use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::Post;

/// Posts revealed per page and per load-more step.
pub const PAGE_SIZE: usize = 10;

/// Suggested polling interval for periodic refresh.
pub const REFRESH_INTERVAL_SECS: u64 = 30;

/// Distance from the bottom, in pixels, at which load-more should trigger.
pub const LOAD_MORE_THRESHOLD_PX: f64 = 200.0;

/// Outcome of a periodic refresh, reported to the rendering layer.
#[derive(Debug, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// How many previously unknown posts were prepended.
    pub new_count: usize,
}

/// Scroll measurements taken just before new posts render, used to keep the
/// viewport visually still when items are inserted above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnchor {
    pub content_height: f64,
    pub offset: f64,
}

impl ScrollAnchor {
    /// The offset to restore after render so the content the user was
    /// looking at stays put.
    pub fn compensated_offset(&self, new_content_height: f64) -> f64 {
        self.offset + (new_content_height - self.content_height)
    }
}

/// Merge/pagination engine shared by all feed views.
///
/// Holds the known superset of posts in display order, how many of them are
/// revealed, and the id set used to recognize newly arrived posts. All
/// transitions take already-fetched post lists; the controller performs no
/// network or timer work itself.
pub struct FeedController {
    all_posts: Vec<Post>,
    displayed_count: usize,
    known_ids: HashSet<String>,
    page_size: usize,
    loading_more: bool,
    new_posts_pending: bool,
}

impl FeedController {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            all_posts: Vec::new(),
            displayed_count: 0,
            known_ids: HashSet::new(),
            page_size,
            loading_more: false,
            new_posts_pending: false,
        }
    }

    /// Initial load: adopt the fetched list as-is and reveal the first page.
    pub fn initialize(&mut self, posts: Vec<Post>) {
        self.known_ids = posts.iter().map(|p| p.id.clone()).collect();
        self.displayed_count = self.page_size.min(posts.len());
        self.all_posts = posts;
        self.loading_more = false;
        self.new_posts_pending = false;
    }

    /// Initial load for randomized views: Fisher-Yates shuffle first.
    pub fn initialize_shuffled<R: Rng>(&mut self, mut posts: Vec<Post>, rng: &mut R) {
        posts.shuffle(rng);
        self.initialize(posts);
    }

    /// Periodic refresh: prepend posts whose ids were not seen before,
    /// keeping everything already rendered visible and in order.
    pub fn refresh(&mut self, fetched: Vec<Post>) -> RefreshOutcome {
        self.merge_new(fetched, None::<&mut rand::rngs::ThreadRng>)
    }

    /// Refresh for randomized views: the batch of new posts is shuffled
    /// before it is prepended; known posts keep their order.
    pub fn refresh_shuffled<R: Rng>(&mut self, fetched: Vec<Post>, rng: &mut R) -> RefreshOutcome {
        self.merge_new(fetched, Some(rng))
    }

    fn merge_new<R: Rng>(&mut self, fetched: Vec<Post>, rng: Option<&mut R>) -> RefreshOutcome {
        let mut new_posts: Vec<Post> = fetched
            .iter()
            .filter(|p| !self.known_ids.contains(&p.id))
            .cloned()
            .collect();

        if new_posts.is_empty() {
            self.clamp_displayed();
            return RefreshOutcome { new_count: 0 };
        }

        if let Some(rng) = rng {
            new_posts.shuffle(rng);
        }

        let new_count = new_posts.len();
        new_posts.extend(self.all_posts.drain(..));
        self.all_posts = new_posts;

        // Grow the reveal window by the insertion size so nothing that was
        // visible disappears below the pagination cut.
        self.displayed_count = (self.displayed_count + new_count).min(self.all_posts.len());
        self.known_ids = fetched.into_iter().map(|p| p.id).collect();
        self.new_posts_pending = true;

        RefreshOutcome { new_count }
    }

    /// Starts a load-more step. Returns false (no-op) when one is already
    /// running or everything is revealed; the caller applies its UX delay
    /// and then calls [`complete_load_more`](Self::complete_load_more).
    pub fn begin_load_more(&mut self) -> bool {
        if self.loading_more || self.displayed_count >= self.all_posts.len() {
            return false;
        }
        self.loading_more = true;
        true
    }

    pub fn complete_load_more(&mut self) {
        if !self.loading_more {
            return;
        }
        self.displayed_count = (self.displayed_count + self.page_size).min(self.all_posts.len());
        self.loading_more = false;
    }

    /// Whether the current scroll position is close enough to the bottom to
    /// warrant revealing another page.
    pub fn near_bottom(scroll_top: f64, viewport_height: f64, content_height: f64) -> bool {
        content_height - (scroll_top + viewport_height) <= LOAD_MORE_THRESHOLD_PX
    }

    /// Manual refresh (scroll-to-top action): behaves like an initial load.
    pub fn manual_refresh(&mut self, fetched: Vec<Post>) {
        self.initialize(fetched);
    }

    /// Dismisses the new-post affordance without other state changes.
    pub fn dismiss_new_posts(&mut self) {
        self.new_posts_pending = false;
    }

    pub fn has_new_posts(&self) -> bool {
        self.new_posts_pending
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn displayed_count(&self) -> usize {
        self.displayed_count
    }

    pub fn total_count(&self) -> usize {
        self.all_posts.len()
    }

    /// The slice of posts currently revealed, front of the list first.
    pub fn visible_posts(&self) -> &[Post] {
        &self.all_posts[..self.displayed_count]
    }

    pub fn all_posts(&self) -> &[Post] {
        &self.all_posts
    }

    fn clamp_displayed(&mut self) {
        self.displayed_count = self.displayed_count.min(self.all_posts.len());
    }
}

impl Default for FeedController {
    fn default() -> Self {
        Self::new()
    }
}
