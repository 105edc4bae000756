use arena_types::WidgetParams;

/// Replay prefix used when none is configured.
pub const DEFAULT_REPLAY_BASE: &str = "/replays";

/// Renders the markup embedding a game visualization.
pub trait Visualizer: Send + Sync {
    fn render(&self, params: &WidgetParams) -> String;
}

/// Embeds the browser visualizer, which fetches its replay from
/// `{replay_base}/{game_id}.replaygz`.
#[derive(Clone, Debug)]
pub struct EmbedVisualizer {
    replay_base: String,
}

impl EmbedVisualizer {
    pub fn new(replay_base: impl Into<String>) -> Self {
        let replay_base = replay_base.into();
        Self {
            replay_base: replay_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn replay_url(&self, game_id: &str) -> String {
        format!("{}/{}.replaygz", self.replay_base, game_id)
    }
}

impl Default for EmbedVisualizer {
    fn default() -> Self {
        Self::new(DEFAULT_REPLAY_BASE)
    }
}

impl Visualizer for EmbedVisualizer {
    fn render(&self, params: &WidgetParams) -> String {
        let game_id = escape_html(&params.game_id);
        let replay = escape_html(&self.replay_url(&params.game_id));
        format!(
            concat!(
                "<div class=\"visualizer\" id=\"visualizer\" data-game-id=\"{game_id}\" ",
                "data-interactive=\"{interactive}\" data-replay=\"{replay}\" ",
                "style=\"width: {width}px; height: {height}px\"></div>\n",
                "<script src=\"/visualizer/visualizer.js\"></script>"
            ),
            game_id = game_id,
            interactive = params.interactive,
            replay = replay,
            width = params.width,
            height = params.height,
        )
    }
}

/// Escapes text for use inside HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
