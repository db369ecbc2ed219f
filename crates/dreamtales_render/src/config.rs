//! Page geometry.

use derive_getters::Getters;
use dreamtales_error::{ConfigError, DreamTalesResult};
use serde::{Deserialize, Serialize};

/// Storybook page settings, in PDF points unless noted.
///
/// Defaults describe an A4 portrait page.
///
/// ```toml
/// [render]
/// wrap_width = 75
/// line_height = 16.0
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct RenderConfig {
    /// Maximum body line length in characters
    #[serde(default = "default_wrap_width")]
    #[builder(default = "default_wrap_width()")]
    wrap_width: usize,

    /// Page width
    #[serde(default = "default_page_width")]
    #[builder(default = "default_page_width()")]
    page_width: f32,

    /// Page height
    #[serde(default = "default_page_height")]
    #[builder(default = "default_page_height()")]
    page_height: f32,

    /// Margin on all four sides
    #[serde(default = "default_margin")]
    #[builder(default = "default_margin()")]
    margin: f32,

    /// Title font size
    #[serde(default = "default_title_font_size")]
    #[builder(default = "default_title_font_size()")]
    title_font_size: f32,

    /// Body font size
    #[serde(default = "default_body_font_size")]
    #[builder(default = "default_body_font_size()")]
    body_font_size: f32,

    /// Distance between body baselines
    #[serde(default = "default_line_height")]
    #[builder(default = "default_line_height()")]
    line_height: f32,

    /// Height reserved for the illustration on the first page
    #[serde(default = "default_image_height")]
    #[builder(default = "default_image_height()")]
    image_height: f32,
}

fn default_wrap_width() -> usize {
    75
}

fn default_page_width() -> f32 {
    595.0
}

fn default_page_height() -> f32 {
    842.0
}

fn default_margin() -> f32 {
    56.0
}

fn default_title_font_size() -> f32 {
    22.0
}

fn default_body_font_size() -> f32 {
    12.0
}

fn default_line_height() -> f32 {
    16.0
}

fn default_image_height() -> f32 {
    300.0
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            wrap_width: default_wrap_width(),
            page_width: default_page_width(),
            page_height: default_page_height(),
            margin: default_margin(),
            title_font_size: default_title_font_size(),
            body_font_size: default_body_font_size(),
            line_height: default_line_height(),
            image_height: default_image_height(),
        }
    }
}

impl RenderConfig {
    /// Creates a new builder.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    /// Distance between title baselines.
    pub fn title_line_height(&self) -> f32 {
        self.title_font_size * 1.4
    }

    /// Highest baseline position on a page.
    pub fn top(&self) -> f32 {
        self.page_height - self.margin
    }

    /// Usable width between the side margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Title wrap width in characters, scaled from the body width.
    pub fn title_wrap_width(&self) -> usize {
        let scaled = self.wrap_width as f32 * self.body_font_size / self.title_font_size;
        (scaled.floor() as usize).max(1)
    }

    /// Checks that a page can hold at least a title line, the image and one
    /// body line.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive sizes or when the margins leave no
    /// room for content.
    pub fn validate(&self) -> DreamTalesResult<()> {
        if self.wrap_width == 0 {
            return Err(ConfigError::new("render.wrap_width must be at least 1").into());
        }
        let sizes = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("title_font_size", self.title_font_size),
            ("body_font_size", self.body_font_size),
            ("line_height", self.line_height),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::new(format!("render.{} must be positive", name)).into());
            }
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) || !(self.image_height >= 0.0) {
            return Err(ConfigError::new(
                "render.margin and render.image_height must not be negative",
            )
            .into());
        }
        if self.content_width() <= 0.0 {
            return Err(ConfigError::new("render.margin leaves no horizontal space").into());
        }
        let needed = self.title_line_height() + self.image_height + self.line_height;
        if self.page_height - 2.0 * self.margin < needed {
            return Err(ConfigError::new(format!(
                "page height {} cannot fit title, image and one line ({} needed)",
                self.page_height, needed
            ))
            .into());
        }
        Ok(())
    }
}
