//! Configuration section definitions.
//!
//! Each module corresponds to a section in `folio.toml`:
//!
//! | Module    | TOML Section      | Purpose                             |
//! |-----------|-------------------|-------------------------------------|
//! | `site`    | `[site]`          | Title, tagline, collection path     |
//! | `store`   | `[store]`         | Document and object store locations |
//! | `render`  | `[render]`        | Markdown options                    |
//! | `slug`    | `[render.slug]`   | Heading anchor slugs                |
//! | `listing` | `[listing]`       | List view pagination                |
//! | `serve`   | `[serve]`         | HTTP server and live channel        |

mod listing;
mod render;
mod serve;
mod site;
mod slug;
mod store;

pub use listing::ListingConfig;
pub use render::RenderConfig;
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;
pub use slug::{SlugCase, SlugConfig, SlugMode, SlugSeparator};
pub use store::{ObjectLocation, StoreConfig};
