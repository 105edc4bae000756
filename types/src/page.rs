use std::fmt;

/// Named static content included on the front page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentBlock {
    /// Shown to callers with a valid session.
    Announcement,
    /// Shown to everyone else.
    Splash,
    /// Always shown.
    Competition,
}

impl ContentBlock {
    pub const ALL: [ContentBlock; 3] = [
        ContentBlock::Announcement,
        ContentBlock::Splash,
        ContentBlock::Competition,
    ];

    /// Name the content is authored under (`{name}.md`).
    pub fn name(&self) -> &'static str {
        match self {
            ContentBlock::Announcement => "competition-Announcement",
            ContentBlock::Splash => "competition-Splash",
            ContentBlock::Competition => "competition",
        }
    }

    /// Lead block for a caller.
    pub fn for_session(logged_in: bool) -> Self {
        if logged_in {
            ContentBlock::Announcement
        } else {
            ContentBlock::Splash
        }
    }
}

impl fmt::Display for ContentBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Body of the front page, in render order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageBody {
    /// Which lead block was selected.
    pub lead_block: ContentBlock,
    pub lead: String,
    pub competition: String,
    pub widget: String,
    pub link: String,
}

impl PageBody {
    pub fn sections(&self) -> [&str; 4] {
        [&self.lead, &self.competition, &self.widget, &self.link]
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PageBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in self.sections() {
            writeln!(f, "{section}")?;
        }
        Ok(())
    }
}
