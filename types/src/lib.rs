//! Shared vocabulary for the arena website: game identifiers, the named
//! static content blocks, visualizer parameters and the composed page body.

pub mod game;
pub mod page;

pub use game::{GameId, WidgetParams, WIDGET_HEIGHT, WIDGET_WIDTH};
pub use page::{ContentBlock, PageBody};

/// Cache key holding the id of the game shown on the front page.
pub const SPLASH_GAME_KEY: &str = "l:splash";
