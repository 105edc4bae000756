use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};

/// Width (in pixels) of the front page visualizer.
pub const WIDGET_WIDTH: u32 = 550;

/// Height (in pixels) of the front page visualizer.
pub const WIDGET_HEIGHT: u32 = 550;

/// Identifier of a finished game.
///
/// `GameId(0)` is the placeholder shown when no game is known.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl GameId {
    pub const NONE: GameId = GameId(0);
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GameId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(GameId)
    }
}

/// Arguments handed to the visualizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetParams {
    pub game_id: String,
    /// Second positional flag of the visualizer call. Always `false` on the
    /// front page.
    pub interactive: bool,
    pub width: u32,
    pub height: u32,
}

impl WidgetParams {
    /// Parameters used by the front page: a fixed 550x550, non-interactive embed.
    pub fn front_page(game_id: GameId) -> Self {
        Self {
            game_id: game_id.to_string(),
            interactive: false,
            width: WIDGET_WIDTH,
            height: WIDGET_HEIGHT,
        }
    }
}
