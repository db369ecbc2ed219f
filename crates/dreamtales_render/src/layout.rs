//! Pagination of a wrapped story.

use crate::{wrap_text, RenderConfig};

/// One positioned element on a page.
///
/// Vertical positions are PDF coordinates: measured up from the bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutItem {
    /// Title line
    Title {
        /// Line text
        text: String,
        /// Baseline position
        baseline: f32,
    },
    /// Reserved illustration box, spanning the content width
    Image {
        /// Bottom edge of the box
        bottom: f32,
        /// Box height
        height: f32,
    },
    /// Body text line; empty for paragraph breaks
    BodyLine {
        /// Line text
        text: String,
        /// Baseline position
        baseline: f32,
    },
}

/// Elements placed on one page, top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    items: Vec<LayoutItem>,
}

impl PageLayout {
    /// All placed elements.
    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    /// Text of the body lines on this page.
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            LayoutItem::BodyLine { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether the illustration box is on this page.
    pub fn has_image(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, LayoutItem::Image { .. }))
    }
}

struct Cursor<'a> {
    config: &'a RenderConfig,
    pages: Vec<PageLayout>,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            pages: vec![PageLayout::default()],
            y: config.top(),
        }
    }

    /// Moves down by `height`, breaking the page first if the new position
    /// would fall below the bottom margin. Returns the new position.
    fn advance(&mut self, height: f32) -> f32 {
        let page_has_items = self.pages.last().is_some_and(|p| !p.items.is_empty());
        if self.y - height < *self.config.margin() && page_has_items {
            self.pages.push(PageLayout::default());
            self.y = self.config.top();
        }
        self.y -= height;
        self.y
    }

    fn skip(&mut self, height: f32) {
        self.y -= height;
    }

    fn place(&mut self, item: LayoutItem) {
        if let Some(page) = self.pages.last_mut() {
            page.items.push(item);
        }
    }
}

/// Lay out a storybook.
///
/// The title comes first, then the illustration box when `has_image` is set,
/// then the body wrapped at [`RenderConfig::wrap_width`]. A new page starts
/// whenever the next baseline would fall below the bottom margin. The result
/// depends only on the inputs.
///
/// ```
/// use dreamtales_render::{layout, RenderConfig};
///
/// let config = RenderConfig::default();
/// let pages = layout(&config, "Short", "Goodnight, moon.", false);
/// assert_eq!(pages.len(), 1);
/// assert_eq!(pages[0].body_lines().collect::<Vec<_>>(), vec!["Goodnight, moon."]);
/// ```
pub fn layout(
    config: &RenderConfig,
    title: &str,
    body: &str,
    has_image: bool,
) -> Vec<PageLayout> {
    let mut cursor = Cursor::new(config);

    for line in wrap_text(title, config.title_wrap_width()) {
        let baseline = cursor.advance(config.title_line_height());
        cursor.place(LayoutItem::Title {
            text: line,
            baseline,
        });
    }

    if has_image {
        let height = *config.image_height();
        let bottom = cursor.advance(height);
        cursor.place(LayoutItem::Image { bottom, height });
        cursor.skip(*config.line_height() * 0.5);
    }

    for line in wrap_text(body, *config.wrap_width()) {
        let baseline = cursor.advance(*config.line_height());
        cursor.place(LayoutItem::BodyLine {
            text: line,
            baseline,
        });
    }

    tracing::debug!(pages = cursor.pages.len(), "Laid out storybook");
    cursor.pages
}
