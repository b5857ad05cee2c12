//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `page` - HTML page shell (layout.html)
//! - `serve` - Assets served under `/_folio/` (live.js, style.css)
//!
//! # Usage
//!
//! ```ignore
//! use embed::serve::{LIVE_JS, LiveVars};
//!
//! let js = LIVE_JS.render(&LiveVars { live_port: 35729 });
//! ```

mod template;

pub use template::{Template, TemplateVars, fill};

/// URL prefix reserved for embedded assets.
pub const ASSET_PREFIX: &str = "/_folio/";

pub mod page {
    use super::{Template, TemplateVars, fill};

    /// Variables for layout.html.
    ///
    /// Values are inserted in a single pass, so markers inside titles, the
    /// footer or post content are left alone.
    pub struct LayoutVars<'a> {
        pub lang: &'a str,
        pub title: &'a str,
        pub site_title: &'a str,
        pub home: &'a str,
        pub view: &'a str,
        pub footer: &'a str,
        pub scripts: &'a str,
        pub body: &'a str,
    }

    impl TemplateVars for LayoutVars<'_> {
        fn apply(&self, content: &str) -> String {
            fill(
                content,
                &[
                    ("__FOLIO_LANG__", self.lang),
                    ("__FOLIO_TITLE__", self.title),
                    ("__FOLIO_SITE_TITLE__", self.site_title),
                    ("__FOLIO_HOME__", self.home),
                    ("__FOLIO_VIEW__", self.view),
                    ("__FOLIO_FOOTER__", self.footer),
                    ("__FOLIO_SCRIPTS__", self.scripts),
                    ("__FOLIO_BODY__", self.body),
                ],
            )
        }
    }

    /// Page shell shared by every view.
    pub const LAYOUT_HTML: Template<LayoutVars<'static>> =
        Template::new(include_str!("page/layout.html"));
}

pub mod serve {
    use super::{Template, TemplateVars, fill};

    /// Variables for live.js.
    pub struct LiveVars {
        pub live_port: u16,
    }

    impl TemplateVars for LiveVars {
        fn apply(&self, content: &str) -> String {
            let port = self.live_port.to_string();
            fill(content, &[("__FOLIO_LIVE_PORT__", port.as_str())])
        }
    }

    /// Live channel client: scroll reporting, active heading, in-page navigation, clock.
    pub const LIVE_JS: Template<LiveVars> = Template::new(include_str!("serve/live.js"));
    pub const LIVE_JS_PATH: &str = "/_folio/live.js";

    /// The one stylesheet.
    pub const STYLE_CSS: &str = include_str!("serve/style.css");
    pub const STYLE_CSS_PATH: &str = "/_folio/style.css";
}
