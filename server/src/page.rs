use crate::{
    cache::{resolve_last_game_id, Cache},
    content::StaticContent,
    widget::{escape_html, Visualizer},
};
use arena_types::{ContentBlock, PageBody, WidgetParams};
use std::sync::Arc;
use tracing::debug;

/// Target of the recent games link unless configured otherwise.
pub const DEFAULT_GAMES_HREF: &str = "games.php";

/// Composes the front page body.
///
/// Rendering only reads from its inputs: the cache is consulted once per call
/// and nothing is written back.
#[derive(Clone)]
pub struct PageRenderer {
    content: StaticContent,
    visualizer: Arc<dyn Visualizer>,
    games_href: String,
}

impl PageRenderer {
    pub fn new(content: StaticContent, visualizer: Arc<dyn Visualizer>) -> Self {
        Self {
            content,
            visualizer,
            games_href: DEFAULT_GAMES_HREF.to_string(),
        }
    }

    pub fn with_games_href(mut self, games_href: impl Into<String>) -> Self {
        self.games_href = games_href.into();
        self
    }

    pub fn render(&self, logged_in: bool, cache: Option<&dyn Cache>) -> PageBody {
        let lead_block = ContentBlock::for_session(logged_in);
        let game_id = resolve_last_game_id(cache);
        debug!(%lead_block, %game_id, cache = cache.is_some(), "rendering front page");

        let widget = self.visualizer.render(&WidgetParams::front_page(game_id));
        PageBody {
            lead_block,
            lead: self.content.include(lead_block).to_string(),
            competition: self.content.include(ContentBlock::Competition).to_string(),
            widget,
            link: self.recent_games_link(),
        }
    }

    fn recent_games_link(&self) -> String {
        format!(
            "<p>Browse other <a href=\"{}\">recent games here</a>.</p>",
            escape_html(&self.games_href)
        )
    }
}
