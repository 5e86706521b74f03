//! Client-side feed state machines, kept free of I/O so every view layout
//! (linear feed, grid, strip, drawer) shares one merge/pagination engine
//! instead of carrying its own copy.

pub mod controller;
pub mod scrub;

pub use controller::{FeedController, RefreshOutcome, ScrollAnchor};
pub use scrub::{DrawerSelect, StripScrub};
