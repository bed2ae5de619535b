//! Noise stripping, main-region selection, and image reference handling.
//!
//! Removal and attribute rewriting run through `lol_html`; parsing and
//! region selection run through `scraper`. Parsed documents never outlive
//! [`extract`], so nothing here is held across an `.await`.

use std::sync::LazyLock;

use lol_html::{RewriteStrSettings, element, rewrite_str};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::error::FetchError;

/// Elements removed from the whole document before region selection.
pub const NOISE_SELECTOR: &str = "script, style, nav, footer, header, aside, iframe";

/// Wrappers dropped while their contents are kept as markup, so fallback
/// images inside `<noscript>` are parsed as elements.
pub const UNWRAP_SELECTOR: &str = "noscript";

/// Prefix of inline image payloads, which are never mirrored.
const INLINE_IMAGE_PREFIX: &str = "data:";

#[allow(clippy::expect_used)]
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector"));

#[allow(clippy::expect_used)]
static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").expect("img selector"));

#[allow(clippy::expect_used)]
static DEFAULT_STRATEGIES: LazyLock<Vec<RegionStrategy>> = LazyLock::new(|| {
    ["article", "main", "body"]
        .into_iter()
        .map(|tag| RegionStrategy::selector(tag, tag).expect("region selector"))
        .chain(std::iter::once(RegionStrategy::whole_document()))
        .collect()
});

/// One way of locating a page's main content.
#[derive(Debug, Clone)]
pub struct RegionStrategy {
    name: String,
    selector: Option<Selector>,
}

impl RegionStrategy {
    /// Strategy matching the first element for a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Html`] if `css` is not a valid selector.
    pub fn selector(name: impl Into<String>, css: &str) -> Result<Self, FetchError> {
        let selector = Selector::parse(css)
            .map_err(|e| FetchError::html(format!("invalid selector {css:?}: {e}")))?;
        Ok(Self {
            name: name.into(),
            selector: Some(selector),
        })
    }

    /// Strategy that always matches, returning the document's root element.
    #[must_use]
    pub fn whole_document() -> Self {
        Self {
            name: "document".to_string(),
            selector: None,
        }
    }

    /// Name reported in logs when this strategy wins.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn locate<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        match &self.selector {
            Some(selector) => document.select(selector).next(),
            None => Some(document.root_element()),
        }
    }
}

/// Ordered list of region strategies; the first that matches wins.
#[derive(Debug, Clone)]
pub struct ContentLocator {
    strategies: Vec<RegionStrategy>,
}

impl Default for ContentLocator {
    /// `article`, then `main`, then `body`, then the whole document.
    fn default() -> Self {
        Self {
            strategies: DEFAULT_STRATEGIES.clone(),
        }
    }
}

impl ContentLocator {
    /// Creates a locator trying `strategies` in order.
    ///
    /// The whole-document strategy is appended if absent so that location
    /// never fails.
    #[must_use]
    pub fn new(strategies: impl IntoIterator<Item = RegionStrategy>) -> Self {
        let mut strategies: Vec<_> = strategies.into_iter().collect();
        if !strategies.iter().any(|s| s.selector.is_none()) {
            strategies.push(RegionStrategy::whole_document());
        }
        Self { strategies }
    }

    /// Returns the first matching region and the winning strategy's name.
    fn locate<'a>(&self, document: &'a Html) -> (ElementRef<'a>, &str) {
        self.strategies
            .iter()
            .find_map(|s| s.locate(document).map(|el| (el, s.name())))
            .unwrap_or_else(|| (document.root_element(), "document"))
    }
}

/// Main content pulled from a page, ready for image mirroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    /// Page title with whitespace collapsed; empty if the page has none.
    pub title: String,
    /// Serialized HTML of the selected region, noise already removed.
    pub region_html: String,
    /// Qualifying image references in the region, in document order.
    ///
    /// One element per `<img>` that [`rewrite_image_sources`] will touch,
    /// so duplicates are kept.
    pub image_sources: Vec<String>,
}

/// Strips noise, reads the title, and selects the main region.
///
/// # Errors
///
/// Returns [`FetchError::Html`] if the noise-removal rewrite fails.
pub fn extract(html: &str, locator: &ContentLocator) -> Result<ExtractedContent, FetchError> {
    let cleaned = strip_noise(html)?;
    let document = Html::parse_document(&cleaned);

    let title = document
        .select(&TITLE)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default();

    let (region, strategy) = locator.locate(&document);
    let image_sources = region
        .select(&IMG)
        .filter_map(|img| {
            let el = img.value();
            qualifying_source(el.attr("src"), el.attr("data-src")).map(ToString::to_string)
        })
        .collect::<Vec<_>>();

    debug!(strategy, images = image_sources.len(), "selected content region");
    Ok(ExtractedContent {
        title,
        region_html: region.html(),
        image_sources,
    })
}

/// Removes every element matching [`NOISE_SELECTOR`], with its contents,
/// and unwraps [`UNWRAP_SELECTOR`] elements.
///
/// # Errors
///
/// Returns [`FetchError::Html`] if the rewriter rejects the input.
pub fn strip_noise(html: &str) -> Result<String, FetchError> {
    let element_content_handlers = vec![
        element!(NOISE_SELECTOR, |el| {
            el.remove();
            Ok(())
        }),
        element!(UNWRAP_SELECTOR, |el| {
            el.remove_and_keep_content();
            Ok(())
        }),
    ];
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers,
            ..RewriteStrSettings::default()
        },
    )
    .map_err(FetchError::html)
}

/// Replaces the `src` of each qualifying `<img>` with the next entry of
/// `replacements`, in document order.
///
/// `data-src` is left as is. Qualifying images beyond the end of
/// `replacements` are untouched.
///
/// # Errors
///
/// Returns [`FetchError::Html`] if the rewriter rejects the input.
pub fn rewrite_image_sources(html: &str, replacements: &[String]) -> Result<String, FetchError> {
    let mut next = replacements.iter();
    let element_content_handlers = vec![element!("img", |el| {
        let src = el.get_attribute("src");
        let data_src = el.get_attribute("data-src");
        if qualifying_source(src.as_deref(), data_src.as_deref()).is_some() {
            if let Some(replacement) = next.next() {
                el.set_attribute("src", replacement)?;
            }
        }
        Ok(())
    })];
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers,
            ..RewriteStrSettings::default()
        },
    )
    .map_err(FetchError::html)
}

/// Picks `src`, falling back to `data-src`, skipping empty and inline values.
fn qualifying_source<'a>(src: Option<&'a str>, data_src: Option<&'a str>) -> Option<&'a str> {
    [src, data_src]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .filter(|s| !s.starts_with(INLINE_IMAGE_PREFIX))
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
