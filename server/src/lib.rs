//! Front page of the arena website.
//!
//! [Site] ties the front page renderer to its collaborators and [Api] serves
//! it over HTTP.

use arena_types::{PageBody, SPLASH_GAME_KEY};
use axum::{
    extract::State as AxumState,
    http::HeaderMap,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use std::sync::Arc;
use thiserror::Error;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod auth;
pub mod cache;
pub mod config;
pub mod content;
pub mod page;
pub mod widget;

pub use auth::{Authenticator, SessionStore};
pub use cache::{Cache, MemoryCache};
pub use config::{Config, ConfigError, RateLimitConfig, ValidatedConfig};
pub use content::{ContentError, StaticContent};
pub use page::PageRenderer;
pub use widget::{EmbedVisualizer, Visualizer};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("invalid rate limit: {0:?}")]
    RateLimit(RateLimitConfig),
}

/// Everything needed to answer a front page request.
pub struct Site {
    title: String,
    authenticator: Arc<dyn Authenticator>,
    cache: Option<Arc<dyn Cache>>,
    renderer: PageRenderer,
}

impl Site {
    pub fn new(
        title: impl Into<String>,
        authenticator: Arc<dyn Authenticator>,
        cache: Option<Arc<dyn Cache>>,
        renderer: PageRenderer,
    ) -> Self {
        Self {
            title: title.into(),
            authenticator,
            cache,
            renderer,
        }
    }

    /// Builds the site described by `config`, loading content from disk.
    pub fn from_config(config: &ValidatedConfig) -> Result<Self, Error> {
        let content = StaticContent::load(&config.content_dir)?;
        let visualizer = Arc::new(EmbedVisualizer::new(config.replay_base.clone()));
        let renderer =
            PageRenderer::new(content, visualizer).with_games_href(config.games_href.clone());

        let sessions = SessionStore::with_tokens(
            config.session.cookie.clone(),
            config.session.tokens.iter().cloned(),
        );

        let cache: Option<Arc<dyn Cache>> = if config.cache.enabled {
            let cache = MemoryCache::new();
            if let Some(game_id) = config.cache.splash_game_id {
                cache.set(SPLASH_GAME_KEY, game_id.to_string());
                info!(%game_id, "seeded splash game");
            }
            Some(Arc::new(cache))
        } else {
            info!("cache disabled");
            None
        };

        Ok(Self::new(
            config.title.clone(),
            Arc::new(sessions),
            cache,
            renderer,
        ))
    }

    pub fn render(&self, headers: &HeaderMap) -> PageBody {
        let logged_in = self.authenticator.is_logged_in(headers);
        self.renderer.render(logged_in, self.cache.as_deref())
    }

    /// Wraps `body` in a minimal HTML document.
    pub fn document(&self, body: &PageBody) -> String {
        format!(
            concat!(
                "<!DOCTYPE html>\n",
                "<html>\n",
                "<head><meta charset=\"utf-8\"><title>{}</title></head>\n",
                "<body>\n{}</body>\n",
                "</html>\n"
            ),
            widget::escape_html(&self.title),
            body
        )
    }
}

pub struct Api {
    site: Arc<Site>,
    rate_limit: Option<RateLimitConfig>,
}

impl Api {
    pub fn new(site: Arc<Site>) -> Self {
        Self {
            site,
            rate_limit: None,
        }
    }

    pub fn with_rate_limit(mut self, rate_limit: Option<RateLimitConfig>) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn router(&self) -> Result<Router, Error> {
        let mut router = Router::new()
            .route("/", get(index))
            .route("/index.php", get(index))
            .layer(TraceLayer::new_for_http())
            .with_state(self.site.clone());

        // Configure Rate Limiting
        if let Some(limit) = self.rate_limit {
            let governor_conf = GovernorConfigBuilder::default()
                .per_millisecond(limit.period_ms)
                .burst_size(limit.burst)
                .key_extractor(SmartIpKeyExtractor)
                .finish()
                .ok_or(Error::RateLimit(limit))?;
            router = router.layer(GovernorLayer {
                config: Arc::new(governor_conf),
            });
        }

        Ok(router)
    }
}

async fn index(AxumState(site): AxumState<Arc<Site>>, headers: HeaderMap) -> impl IntoResponse {
    let body = site.render(&headers);
    Html(site.document(&body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_types::ContentBlock;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const ANNOUNCEMENT: &str = "Welcome back, contestant";
    const SPLASH: &str = "Write a bot and join";

    struct TestContext {
        cache: MemoryCache,
        sessions: SessionStore,
        router: Router,
    }

    impl TestContext {
        fn new() -> Self {
            let content = StaticContent::from_markdown([
                (ContentBlock::Announcement, ANNOUNCEMENT),
                (ContentBlock::Splash, SPLASH),
                (ContentBlock::Competition, "## Rules"),
            ])
            .unwrap();
            let renderer = PageRenderer::new(content, Arc::new(EmbedVisualizer::default()));
            let cache = MemoryCache::new();
            let sessions = SessionStore::default();
            let site = Site::new(
                "Arena",
                Arc::new(sessions.clone()),
                Some(Arc::new(cache.clone())),
                renderer,
            );
            let router = Api::new(Arc::new(site)).router().unwrap();
            Self {
                cache,
                sessions,
                router,
            }
        }

        async fn get(&self, uri: &str, cookie: Option<&str>) -> (StatusCode, String) {
            let mut request = Request::builder().uri(uri);
            if let Some(cookie) = cookie {
                request = request.header(header::COOKIE, cookie);
            }
            let res = self
                .router
                .clone()
                .oneshot(request.body(Body::empty()).unwrap())
                .await
                .unwrap();
            let status = res.status();
            let bytes = res.into_body().collect().await.unwrap().to_bytes();
            (status, String::from_utf8(bytes.to_vec()).unwrap())
        }
    }

    #[tokio::test]
    async fn test_visitor_gets_splash() {
        let ctx = TestContext::new();
        let (status, html) = ctx.get("/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Arena</title>"));
        assert!(html.contains(SPLASH));
        assert!(!html.contains(ANNOUNCEMENT));
        assert!(html.contains("<h2>Rules</h2>"));
        assert!(html.contains("data-game-id=\"0\""));
    }

    #[tokio::test]
    async fn test_logged_in_gets_announcement() {
        let ctx = TestContext::new();
        ctx.sessions.insert("secret");

        let (_, html) = ctx.get("/index.php", Some("theme=dark; session=secret")).await;
        assert!(html.contains(ANNOUNCEMENT));
        assert!(!html.contains(SPLASH));

        let (_, html) = ctx.get("/", Some("session=forged")).await;
        assert!(html.contains(SPLASH));
    }

    #[tokio::test]
    async fn test_featured_game_follows_cache() {
        let ctx = TestContext::new();
        ctx.cache.set(SPLASH_GAME_KEY, "42");
        let (_, html) = ctx.get("/", None).await;
        assert!(html.contains("data-game-id=\"42\""));
        assert!(html.contains("data-replay=\"/replays/42.replaygz\""));

        ctx.cache.set(SPLASH_GAME_KEY, "0");
        let (_, html) = ctx.get("/", None).await;
        assert!(html.contains("data-game-id=\"0\""));
    }

    #[tokio::test]
    async fn test_link_follows_widget() {
        let ctx = TestContext::new();
        let (_, html) = ctx.get("/", None).await;
        let widget = html.find("class=\"visualizer\"").unwrap();
        let link = html.find("recent games here").unwrap();
        assert!(widget < link);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let ctx = TestContext::new();
        let (status, _) = ctx.get("/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_site_without_cache() {
        let content = StaticContent::from_markdown(
            ContentBlock::ALL.map(|block| (block, block.name())),
        )
        .unwrap();
        let site = Site::new(
            "Arena",
            Arc::new(SessionStore::default()),
            None,
            PageRenderer::new(content, Arc::new(EmbedVisualizer::default())),
        );
        let body = site.render(&HeaderMap::new());
        assert_eq!(body.lead_block, ContentBlock::Splash);
        assert!(body.widget.contains("data-game-id=\"0\""));
    }

    #[test]
    fn test_invalid_rate_limit() {
        let ctx_site = {
            let content = StaticContent::from_markdown(
                ContentBlock::ALL.map(|block| (block, block.name())),
            )
            .unwrap();
            Site::new(
                "Arena",
                Arc::new(SessionStore::default()),
                None,
                PageRenderer::new(content, Arc::new(EmbedVisualizer::default())),
            )
        };
        let limit = RateLimitConfig {
            period_ms: 0,
            burst: 0,
        };
        let err = Api::new(Arc::new(ctx_site))
            .with_rate_limit(Some(limit))
            .router()
            .err()
            .unwrap();
        assert!(matches!(err, Error::RateLimit(_)));
    }
}
