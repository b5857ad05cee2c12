//! Blog server: server-rendered views plus the optional live channel.

mod lifecycle;
mod live;
mod response;
mod route;

use route::Route;
use response::types;

use crate::{
    config::{SiteConfig, cfg},
    core::{is_shutdown, register_server},
    debug,
    embed::serve::{LIVE_JS, LiveVars, STYLE_CSS},
    log,
    markdown::MarkdownOptions,
    page,
    post::{
        ContentError, ContentFetcher, DocumentStore, ObjectBackend, ObjectStore, SiteFetcher,
        fs::FsDocumentStore,
    },
    utils::PATH_SEGMENT,
    view::clock::ClockTick,
};
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tiny_http::{Request, Server};
use tokio::runtime::{Handle, Runtime};

/// Request handler threads.
const REQUEST_THREADS: usize = 4;

/// Everything a request handler needs.
struct ServeContext<D, O> {
    config: Arc<SiteConfig>,
    fetcher: ContentFetcher<D, O>,
    options: MarkdownOptions,
    runtime: Handle,
    /// 0 when the live channel is off.
    live_port: u16,
}

type SiteContext = ServeContext<FsDocumentStore, ObjectBackend>;

/// What to send back for one request.
#[derive(Debug, PartialEq)]
enum Reply {
    Html { status: u16, body: String },
    Asset { content_type: &'static str, body: String },
    Redirect(String),
}

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    runtime: Runtime,
    context: Arc<SiteContext>,
    live: Option<live::LiveServer>,
}

/// Bind the HTTP server and, when enabled, the live channel.
pub fn bind_server() -> Result<BoundServer> {
    let config = cfg();
    let runtime = lifecycle::build_runtime()?;
    let fetcher = SiteFetcher::from_config(&config)?;
    let options = config.render.markdown_options();

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    register_server(Arc::clone(&server));

    let live = if config.serve.live {
        let live = live::start(
            config.serve.interface,
            config.serve.live_port,
            fetcher.clone(),
            options.clone(),
            runtime.handle().clone(),
        )?;
        debug!("live"; "ws://{}:{}", config.serve.interface, live.port());
        Some(live)
    } else {
        None
    };

    log!("serve"; "http://{}{}", addr, config.site.collection_path());

    let context = Arc::new(ServeContext {
        live_port: live.as_ref().map_or(0, live::LiveServer::port),
        runtime: runtime.handle().clone(),
        config,
        fetcher,
        options,
    });

    Ok(BoundServer {
        server,
        addr,
        runtime,
        context,
        live,
    })
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the request loop (blocking).
    pub fn run(self) -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(REQUEST_THREADS)
            .build()?;

        for request in self.server.incoming_requests() {
            let context = Arc::clone(&self.context);
            pool.spawn(move || {
                if let Err(e) = handle_request(request, &context) {
                    log!("serve"; "request error: {e}");
                }
            });
        }

        lifecycle::wait_for_shutdown(self.live.map(live::LiveServer::into_handle));
        drop(pool);
        self.runtime.shutdown_timeout(Duration::from_secs(1));
        Ok(())
    }
}

/// Handle a single HTTP request
fn handle_request<D: DocumentStore, O: ObjectStore>(
    request: Request,
    context: &ServeContext<D, O>,
) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }

    let route = Route::parse(request.url(), &context.config.site.collection);
    match reply(route, context) {
        Reply::Html { status, body } => response::respond_html(request, status, body),
        Reply::Asset { content_type, body } => {
            response::respond_asset(request, content_type, &body)
        }
        Reply::Redirect(location) => response::respond_redirect(request, &location),
    }
}

fn reply<D: DocumentStore, O: ObjectStore>(route: Route, context: &ServeContext<D, O>) -> Reply {
    let config = &context.config;
    match route {
        Route::Home => Reply::Redirect(format!(
            "/{}",
            percent_encoding::utf8_percent_encode(&config.site.collection, PATH_SEGMENT)
        )),
        Route::List { show } => match context.runtime.block_on(context.fetcher.list()) {
            Ok(posts) => ok(page::list_page(config, &posts, show, &ClockTick::now())),
            Err(e) => failure(config, &e),
        },
        Route::Category { tag } => {
            match context.runtime.block_on(context.fetcher.list_tagged(&tag)) {
                Ok(posts) => ok(page::category_page(config, &tag, &posts)),
                Err(e) => failure(config, &e),
            }
        }
        Route::Post { slug } => {
            let rendered = context
                .runtime
                .block_on(context.fetcher.fetch_rendered(&slug, &context.options));
            match rendered {
                Ok((post, document)) => ok(page::detail_page(
                    config,
                    &post,
                    &document.html,
                    &document.headings,
                )),
                Err(e) => failure(config, &e),
            }
        }
        Route::LiveJs => Reply::Asset {
            content_type: types::JAVASCRIPT,
            body: LIVE_JS.render(&LiveVars {
                live_port: context.live_port,
            }),
        },
        Route::StyleCss => Reply::Asset {
            content_type: types::CSS,
            body: STYLE_CSS.to_string(),
        },
        Route::NotFound => Reply::Html {
            status: 404,
            body: page::not_found_page(config),
        },
    }
}

fn ok(body: String) -> Reply {
    Reply::Html { status: 200, body }
}

/// Map a content error to a status page.
fn failure(config: &SiteConfig, error: &ContentError) -> Reply {
    match error {
        ContentError::NotFound(_) => Reply::Html {
            status: 404,
            body: page::not_found_page(config),
        },
        ContentError::Fetch(_) => {
            log!("serve"; "{}", error);
            Reply::Html {
                status: 502,
                body: page::error_page(config, &error.to_string()),
            }
        }
        ContentError::Render(_) => {
            log!("serve"; "{}", error);
            Reply::Html {
                status: 500,
                body: page::error_page(config, &error.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::memory::{MemoryDocumentStore, MemoryObjectStore};
    use crate::post::test_post;

    fn context(runtime: &Runtime) -> ServeContext<MemoryDocumentStore, MemoryObjectStore> {
        let documents = MemoryDocumentStore::new([
            test_post("1", "hello", &["Rust"]),
            test_post("2", "broken", &["Go"]),
            test_post("3", "third", &["Rust"]),
            test_post("4", "fourth", &["Rust"]),
        ]);
        let objects = MemoryObjectStore::new()
            .with_blob("hello.md", "# Hello\n\n## Setup\n")
            .with_blob("third.md", "# Third\n");
        ServeContext {
            config: Arc::new(SiteConfig::default()),
            fetcher: ContentFetcher::new(documents, objects),
            options: MarkdownOptions::default(),
            runtime: runtime.handle().clone(),
            live_port: 0,
        }
    }

    fn html(reply: Reply) -> (u16, String) {
        match reply {
            Reply::Html { status, body } => (status, body),
            other => panic!("expected html, got {other:?}"),
        }
    }

    #[test]
    fn test_home_redirects_to_collection() {
        let runtime = lifecycle::build_runtime().unwrap();
        let context = context(&runtime);
        assert_eq!(reply(Route::Home, &context), Reply::Redirect("/blogs".into()));
    }

    #[test]
    fn test_detail_and_failures() {
        let runtime = lifecycle::build_runtime().unwrap();
        let context = context(&runtime);

        let (status, body) = html(reply(Route::Post { slug: "hello".into() }, &context));
        assert_eq!(status, 200);
        assert!(body.contains(r#"data-id="setup""#));

        let (status, body) = html(reply(Route::Post { slug: "ghost".into() }, &context));
        assert_eq!(status, 404);
        assert!(body.contains("Post not found"));

        let (status, _) = html(reply(Route::Post { slug: "broken".into() }, &context));
        assert_eq!(status, 502);
    }

    #[test]
    fn test_list_and_category() {
        let runtime = lifecycle::build_runtime().unwrap();
        let context = context(&runtime);

        let (status, body) = html(reply(Route::List { show: None }, &context));
        assert_eq!(status, 200);
        assert_eq!(body.matches(r#"<article class="card">"#).count(), 3);
        assert!(body.contains("?show=4"));

        let (_, body) = html(reply(Route::Category { tag: "Rust".into() }, &context));
        assert_eq!(body.matches(r#"<article class="card">"#).count(), 3);
    }

    #[test]
    fn test_assets() {
        let runtime = lifecycle::build_runtime().unwrap();
        let context = context(&runtime);
        match reply(Route::LiveJs, &context) {
            Reply::Asset { content_type, body } => {
                assert_eq!(content_type, types::JAVASCRIPT);
                assert!(!body.contains("__FOLIO_LIVE_PORT__"));
            }
            other => panic!("unexpected {other:?}"),
        }
        let (status, _) = html(reply(Route::NotFound, &context));
        assert_eq!(status, 404);
    }
}
