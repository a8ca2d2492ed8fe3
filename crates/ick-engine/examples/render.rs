//! Render a small page of rich markup
//!
//! Run with: cargo run -p ick-engine --example render

use ick_engine::markup::{Bindings, Component, Composer, HtmlString, RenderError, RequiredAssets, Scope, Tag};
use ick_engine::{init_tracing, Config, Engine};

#[derive(Default)]
struct Alert {
    level: String,
    body: HtmlString,
}

impl Composer for Alert {
    fn build_tag(&mut self) -> Option<Tag> {
        let mut tag = Tag::new("div");
        let level = format!("alert-{}", self.level);
        tag.attrs_mut()
            .add_class("alert")
            .set_class_if(!self.level.is_empty(), &level, "");
        Some(tag)
    }

    fn render_content(&mut self, out: &mut Scope<'_, '_>) -> Result<(), RenderError> {
        out.unfold(self.body.as_str())
    }
}

impl Component for Alert {
    fn bindings() -> Bindings<Self> {
        Bindings::new()
            .field("Level", |a: &mut Alert, v: String| a.level = v)
            .field("Body", |a: &mut Alert, v: HtmlString| a.body = v)
    }

    fn require_assets(assets: &RequiredAssets) {
        assets.require_css_style("alert", ".alert{padding:1em}\n.alert-warn{color:#a60}");
    }
}

#[derive(Default)]
struct Em {
    text: String,
}

impl Composer for Em {
    fn build_tag(&mut self) -> Option<Tag> {
        Some(Tag::new("em"))
    }

    fn render_content(&mut self, out: &mut Scope<'_, '_>) -> Result<(), RenderError> {
        out.write_str(&self.text)
    }
}

impl Component for Em {
    fn bindings() -> Bindings<Self> {
        Bindings::new().field("Text", |e: &mut Em, v: String| e.text = v)
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::load("ick.toml")?;
    init_tracing(&config.log_filter);

    let engine = Engine::new(config);
    engine.register("ick-alert", Alert::default)?;
    engine.register("ick-em", Em::default)?;

    let markup = r#"<h1>Status</h1>
<ick-alert Level=warn Body="Disk is <ick-em Text=almost/> full"/>
<ick-missing/>"#;

    let (html, report) = engine.render_to_string(markup)?;

    println!("<style>\n{}</style>", engine.assets().css_style());
    println!("{html}");

    for diagnostic in &report.diagnostics {
        tracing::warn!("{diagnostic}");
    }
    println!("\n{} components rendered", report.tree.len());

    Ok(())
}
