//! PDF output via `lopdf`.

use crate::{layout, sanitize, LayoutItem, PageLayout, RenderConfig};
use dreamtales_core::StoryDocument;
use dreamtales_error::{DreamTalesResult, RenderError, RenderErrorKind};
use dreamtales_interface::DocumentRenderer;
use image::{imageops::FilterType, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

/// Longest side, in pixels, of an embedded illustration.
const MAX_IMAGE_PIXELS: u32 = 768;

const BODY_FONT: &str = "F1";
const TITLE_FONT: &str = "F2";
const IMAGE_NAME: &str = "Im1";

/// Renders storybooks as PDF with the standard Helvetica fonts.
///
/// The illustration, when present and decodable, is embedded as an RGB image
/// on the first page. Bytes that do not decode are dropped with a warning and
/// the book is rendered without a picture.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    config: RenderConfig,
}

impl PdfRenderer {
    /// Create a renderer with validated page settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the geometry is unusable.
    pub fn new(config: RenderConfig) -> DreamTalesResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Page settings in use.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn write_pdf(
        &self,
        title: &str,
        pages: &[PageLayout],
        image: Option<&RgbImage>,
    ) -> DreamTalesResult<Vec<u8>> {
        let config = &self.config;
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let body_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let title_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });

        let mut xobjects = Dictionary::new();
        let mut image_size = None;
        if let Some(image) = image {
            let (width, height) = image.dimensions();
            let image_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => i64::from(width),
                    "Height" => i64::from(height),
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8_i64,
                },
                image.as_raw().clone(),
            ));
            xobjects.set(IMAGE_NAME, image_id);
            image_size = Some((width as f32, height as f32));
        }

        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                BODY_FONT => body_font_id,
                TITLE_FONT => title_font_id,
            },
            "XObject" => xobjects,
        });

        let mut kids = Vec::with_capacity(pages.len());
        for page in pages {
            let content = Content {
                operations: self.page_operations(page, image_size),
            };
            let encoded = content
                .encode()
                .map_err(|e| RenderError::new(RenderErrorKind::Pdf(e.to_string())))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::from(page_id));
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    (*config.page_width()).into(),
                    (*config.page_height()).into(),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(encode_text(title)),
            "Producer" => Object::string_literal("DreamTales"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| RenderError::new(RenderErrorKind::Pdf(e.to_string())))?;
        Ok(buffer)
    }

    fn page_operations(
        &self,
        page: &PageLayout,
        image_size: Option<(f32, f32)>,
    ) -> Vec<Operation> {
        let config = &self.config;
        let mut operations = Vec::new();

        for item in page.items() {
            match item {
                LayoutItem::Title { text, baseline } => {
                    push_text(
                        &mut operations,
                        TITLE_FONT,
                        *config.title_font_size(),
                        *config.margin(),
                        *baseline,
                        text,
                    );
                }
                LayoutItem::BodyLine { text, baseline } => {
                    if !text.is_empty() {
                        push_text(
                            &mut operations,
                            BODY_FONT,
                            *config.body_font_size(),
                            *config.margin(),
                            *baseline,
                            text,
                        );
                    }
                }
                LayoutItem::Image { bottom, height } => {
                    let Some((width_px, height_px)) = image_size else {
                        continue;
                    };
                    let box_width = config.content_width();
                    let scale = (box_width / width_px).min(height / height_px);
                    let (draw_width, draw_height) = (width_px * scale, height_px * scale);
                    let x = config.margin() + (box_width - draw_width) / 2.0;
                    let y = bottom + (height - draw_height) / 2.0;

                    operations.push(Operation::new("q", vec![]));
                    operations.push(Operation::new(
                        "cm",
                        vec![
                            draw_width.into(),
                            0.0_f32.into(),
                            0.0_f32.into(),
                            draw_height.into(),
                            x.into(),
                            y.into(),
                        ],
                    ));
                    operations.push(Operation::new("Do", vec![IMAGE_NAME.into()]));
                    operations.push(Operation::new("Q", vec![]));
                }
            }
        }

        operations
    }
}

impl DocumentRenderer for PdfRenderer {
    #[tracing::instrument(skip(self, document), fields(title = %document.title, body_chars = document.body.len(), has_image = document.image.is_some()))]
    fn render(&self, document: &StoryDocument) -> DreamTalesResult<Vec<u8>> {
        let title = sanitize(&document.title);
        let body = sanitize(&document.body);

        let image = match document.image.as_deref() {
            Some(bytes) => match decode_image(bytes) {
                Ok(image) => Some(image),
                Err(e) => {
                    tracing::warn!(error = %e, "Rendering storybook without illustration");
                    None
                }
            },
            None => None,
        };

        let pages = layout(&self.config, &title, &body, image.is_some());
        let pdf = self.write_pdf(&title, &pages, image.as_ref())?;

        tracing::info!(pages = pages.len(), bytes = pdf.len(), "Rendered storybook");
        Ok(pdf)
    }
}

fn decode_image(bytes: &[u8]) -> DreamTalesResult<RgbImage> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| RenderError::new(RenderErrorKind::ImageDecode(e.to_string())))?;

    let image = if image.width() > MAX_IMAGE_PIXELS || image.height() > MAX_IMAGE_PIXELS {
        image.resize(MAX_IMAGE_PIXELS, MAX_IMAGE_PIXELS, FilterType::Triangle)
    } else {
        image
    };
    Ok(image.to_rgb8())
}

fn push_text(
    operations: &mut Vec<Operation>,
    font: &str,
    size: f32,
    x: f32,
    baseline: f32,
    text: &str,
) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new("Tf", vec![font.into(), size.into()]));
    operations.push(Operation::new("Td", vec![x.into(), baseline.into()]));
    operations.push(Operation::new(
        "Tj",
        vec![Object::string_literal(encode_text(text))],
    ));
    operations.push(Operation::new("ET", vec![]));
}

/// WinAnsi bytes for already sanitized text.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
