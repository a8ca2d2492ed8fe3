//! ick Engine
//!
//! Rich markup rendering: literal HTML mixed with `<ick-*/>` component
//! tags, unfolded through a component registry.
//!
//! # Example
//!
//! ```rust,ignore
//! use ick_engine::{Engine, Config};
//!
//! let engine = Engine::new(Config::default());
//! engine.register("ick-bold", Bold::default)?;
//! let (html, _) = engine.render_to_string("Hello <ick-bold Text=World/>")?;
//! ```

mod config;
mod engine;
mod logging;

pub use config::{Config, ConfigError, MAX_DEPTH_LIMIT};
pub use engine::Engine;
pub use logging::init_tracing;

pub use ick_dom as dom;
pub use ick_markup as markup;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
