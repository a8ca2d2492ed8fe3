//! Engine - Main entry point

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use ick_markup::{
    Component, Composer, Registry, RegistryEntry, RegistryError, RenderError, RenderReport,
    Renderer, RequiredAssets,
};

use crate::{Config, ConfigError};

/// The ick rendering engine: a component registry plus render settings
#[derive(Debug)]
pub struct Engine {
    config: Config,
    registry: Registry,
}

impl Engine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        tracing::info!("ick engine {} initialized, max depth {}", crate::VERSION, config.max_depth);
        Self {
            config,
            registry: Registry::new(),
        }
    }

    /// Create an engine from a config file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::new(Config::load(path)?))
    }

    /// Get engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register a component under an `ick-` tag name
    pub fn register<T, F>(&self, name: &str, constructor: F) -> Result<Arc<RegistryEntry>, RegistryError>
    where
        T: Component,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.registry.register(name, constructor)
    }

    pub fn renderer(&self) -> Renderer<'_> {
        Renderer::new(&self.registry).with_config(self.config.render_config())
    }

    /// Render a composer into `out`
    pub fn render(&self, out: &mut dyn Write, composer: &mut dyn Composer) -> Result<RenderReport, RenderError> {
        self.renderer().render(out, composer)
    }

    /// Unfold rich markup into `out`
    pub fn render_markup(&self, out: &mut dyn Write, markup: &str) -> Result<RenderReport, RenderError> {
        self.renderer().render_markup(out, markup)
    }

    /// Unfold rich markup into a string, inline diagnostics included
    pub fn render_to_string(&self, markup: &str) -> Result<(String, RenderReport), RenderError> {
        let mut out = Vec::new();
        let report = self.render_markup(&mut out, markup)?;
        Ok((String::from_utf8_lossy(&out).into_owned(), report))
    }

    /// Stylesheets required by registered components
    pub fn assets(&self) -> &RequiredAssets {
        self.registry.assets()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
