use arena_types::ContentBlock;
use pulldown_cmark::{html, Options, Parser};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {block} content from {}", path.display())]
    Read {
        block: ContentBlock,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no content provided for {0}")]
    Missing(ContentBlock),
}

/// Pre-rendered HTML for every [ContentBlock].
#[derive(Clone, Debug)]
pub struct StaticContent {
    blocks: BTreeMap<ContentBlock, String>,
}

impl StaticContent {
    /// Reads `{dir}/{name}.md` for every block and renders it.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ContentError> {
        let dir = dir.as_ref();
        let mut blocks = BTreeMap::new();
        for block in ContentBlock::ALL {
            let path = dir.join(format!("{}.md", block.name()));
            let markdown =
                std::fs::read_to_string(&path).map_err(|source| ContentError::Read {
                    block,
                    path: path.clone(),
                    source,
                })?;
            info!(%block, path = %path.display(), "loaded content");
            blocks.insert(block, render_markdown(&markdown));
        }
        Ok(Self { blocks })
    }

    /// Renders the given markdown sources. Every block must be present.
    pub fn from_markdown<'a, I>(sources: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = (ContentBlock, &'a str)>,
    {
        let blocks: BTreeMap<_, _> = sources
            .into_iter()
            .map(|(block, markdown)| (block, render_markdown(markdown)))
            .collect();
        if let Some(missing) = ContentBlock::ALL
            .into_iter()
            .find(|block| !blocks.contains_key(block))
        {
            return Err(ContentError::Missing(missing));
        }
        Ok(Self { blocks })
    }

    /// HTML for `block`.
    pub fn include(&self, block: ContentBlock) -> &str {
        self.blocks.get(&block).map(String::as_str).unwrap_or_default()
    }
}

/// Renders markdown into HTML.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
