//! End-to-end PDF rendering tests.

use dreamtales_core::StoryDocument;
use dreamtales_interface::DocumentRenderer;
use dreamtales_render::{PdfRenderer, RenderConfig};
use image::{ImageFormat, Rgb, RgbImage};
use lopdf::Document;
use std::io::Cursor;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([240, 200, 120]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn story_with_words(words: usize) -> String {
    (0..words)
        .map(|i| if i % 60 == 59 { "dream.\n\n" } else { "dream " })
        .collect()
}

fn page_count(pdf: &[u8]) -> usize {
    Document::load_mem(pdf).unwrap().get_pages().len()
}

#[test]
fn test_short_story_renders_single_page() {
    let renderer = PdfRenderer::default();
    let document = StoryDocument::new("A Sleepy Bunny", "The bunny yawned and fell asleep.");

    let pdf = renderer.render(&document).unwrap();

    assert!(pdf.starts_with(b"%PDF-1.5"));
    assert_eq!(page_count(&pdf), 1);
}

#[test]
fn test_long_story_renders_multiple_pages() {
    let renderer = PdfRenderer::default();
    let document = StoryDocument::new("A Very Long Night", story_with_words(2000));

    let pdf = renderer.render(&document).unwrap();

    assert!(page_count(&pdf) > 1);
}

#[test]
fn test_embeds_illustration() {
    let renderer = PdfRenderer::default();
    let document = StoryDocument::new("A Sleepy Bunny", "Goodnight.").with_image(png_bytes(32, 24));

    let pdf = renderer.render(&document).unwrap();
    let doc = Document::load_mem(&pdf).unwrap();

    let has_image = doc.objects.values().any(|object| {
        object
            .as_stream()
            .ok()
            .and_then(|stream| stream.dict.get(b"Subtype").ok())
            .and_then(|subtype| subtype.as_name().ok())
            .is_some_and(|name| name == b"Image")
    });
    assert!(has_image);
}

#[test]
fn test_undecodable_image_still_renders() {
    let renderer = PdfRenderer::default();
    let document = StoryDocument::new("A Sleepy Bunny", "Goodnight.")
        .with_image(b"<html>not an image</html>".to_vec());

    let with_garbage = renderer.render(&document).unwrap();
    let without = renderer
        .render(&StoryDocument::new("A Sleepy Bunny", "Goodnight."))
        .unwrap();

    assert_eq!(page_count(&with_garbage), 1);
    assert_eq!(with_garbage.len(), without.len());
}

#[test]
fn test_large_images_are_downscaled() {
    let renderer = PdfRenderer::default();
    let document = StoryDocument::new("Big", "Picture.").with_image(png_bytes(1024, 1024));

    let pdf = renderer.render(&document).unwrap();
    let doc = Document::load_mem(&pdf).unwrap();

    let width = doc
        .objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .find_map(|stream| stream.dict.get(b"Width").ok()?.as_i64().ok());
    assert_eq!(width, Some(768));
}

#[test]
fn test_non_latin_text_renders() {
    let renderer = PdfRenderer::default();
    let document = StoryDocument::new(
        "\u{201C}Luna\u{2019}s\u{201D} Night",
        "The owl said \u{2014} hoo \u{1F989}\u{2026} and the caf\u{e9} closed.",
    );

    assert!(renderer.render(&document).is_ok());
}

#[test]
fn test_new_rejects_invalid_geometry() {
    let config = RenderConfig::default().with_page_height(50.0);
    assert!(PdfRenderer::new(config).is_err());
}

#[test]
fn test_mime_type() {
    assert_eq!(PdfRenderer::default().mime_type(), "application/pdf");
}
