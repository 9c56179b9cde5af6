//! Project homepage rendering.
//!
//! The page is a tera template: the parsed host fills the title and the
//! project summary link, and the fetched title fragment is inlined at its
//! slot. The built-in template reproduces the forge's stock project page;
//! operators may replace it with their own template directory.

use std::path::Path;

use tera::{Context, Tera};
use thiserror::Error;

/// Template name looked up for the project page.
const PAGE_NAME: &str = "page.html";

/// The stock project page, compiled into the binary.
const PAGE_TEMPLATE: &str = include_str!("../templates/page.html.tera");

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("template directory has no `{PAGE_NAME}` template")]
    MissingPageTemplate,
}

/// Everything the page template needs for one request.
#[derive(Clone, Debug)]
pub struct PageContext {
    pub group_name: String,
    pub domain: String,
    /// Base URL of the forge theme, ending in a slash.
    pub themeroot: String,
    /// The fetched title fragment; `None` omits the slot entirely.
    pub fragment: Option<String>,
    /// Entity-escape the fragment instead of inlining it verbatim.
    pub escape_fragment: bool,
}

/// Renders the project page from a tera template set.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Renderer over the built-in stock template.
    pub fn embedded() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        // Escaping is opt-in per fragment, not blanket autoescape; URLs
        // and prose pass through untouched.
        tera.autoescape_on(vec![]);
        tera.add_raw_template(PAGE_NAME, PAGE_TEMPLATE)?;
        Ok(Self { tera })
    }

    /// Renderer over an operator-provided template directory.
    ///
    /// The directory must contain a `page.html` template; any other
    /// templates it holds are loaded alongside for inclusion.
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        let glob = format!("{}/**/*.html", dir.display());
        let mut tera = Tera::new(&glob)?;
        tera.autoescape_on(vec![]);
        if !tera.get_template_names().any(|name| name == PAGE_NAME) {
            return Err(RenderError::MissingPageTemplate);
        }
        Ok(Self { tera })
    }

    /// Render the full HTML document for one request.
    ///
    /// With `escape_fragment` off (the default configuration) the fragment
    /// bytes appear verbatim at the slot; the endpoint serves trusted HTML
    /// from the forge itself. With it on, the fragment is entity-escaped.
    pub fn render_page(&self, page: &PageContext) -> Result<String, RenderError> {
        let fragment = page.fragment.as_ref().map(|f| {
            if page.escape_fragment {
                tera::escape_html(f)
            } else {
                f.clone()
            }
        });

        let mut ctx = Context::new();
        ctx.insert("group_name", &page.group_name);
        ctx.insert("domain", &page.domain);
        ctx.insert("themeroot", &page.themeroot);
        ctx.insert("fragment", &fragment);

        Ok(self.tera.render(PAGE_NAME, &ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(fragment: Option<&str>) -> PageContext {
        PageContext {
            group_name: "geometry".into(),
            domain: "r-forge.r-project.org".into(),
            themeroot: "http://r-forge.r-project.org/themes/rforge/".into(),
            fragment: fragment.map(str::to_string),
            escape_fragment: false,
        }
    }

    #[test]
    fn fragment_appears_verbatim_at_its_slot() {
        let renderer = Renderer::embedded().unwrap();
        let fragment = "<h1>The <em>geometry</em> package</h1>";
        let html = renderer.render_page(&context(Some(fragment))).unwrap();

        let slot = html
            .split("<!-- project title fragment -->")
            .nth(1)
            .unwrap()
            .split("<!-- end of project title fragment -->")
            .next()
            .unwrap();
        assert!(slot.contains(fragment));
    }

    #[test]
    fn missing_fragment_still_renders_a_complete_page() {
        let renderer = Renderer::embedded().unwrap();
        let html = renderer.render_page(&context(None)).unwrap();

        assert!(html.contains("<title>geometry</title>"));
        assert!(html.contains("Qhull in R"));
        assert!(html.ends_with("</html>\n"));
        assert!(!html.contains("<h1>The"));
    }

    #[test]
    fn escaped_fragment_has_no_raw_markup() {
        let renderer = Renderer::embedded().unwrap();
        let mut ctx = context(Some("<script>alert(1)</script>"));
        ctx.escape_fragment = true;
        let html = renderer.render_page(&ctx).unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;&#x2F;script&gt;"));
    }

    #[test]
    fn summary_link_targets_the_parsed_host() {
        let renderer = Renderer::embedded().unwrap();
        let html = renderer.render_page(&context(None)).unwrap();

        assert!(html.contains("http://r-forge.r-project.org/projects/geometry/"));
    }

    #[test]
    fn stylesheet_comes_from_the_themeroot() {
        let renderer = Renderer::embedded().unwrap();
        let html = renderer.render_page(&context(None)).unwrap();

        assert!(
            html.contains("href=\"http://r-forge.r-project.org/themes/rforge/styles/estilo1.css\"")
        );
    }
}
