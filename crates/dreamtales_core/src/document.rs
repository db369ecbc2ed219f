//! Input to the document renderer.

/// Content of one storybook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDocument {
    /// Title printed at the top of the first page
    pub title: String,
    /// Story text
    pub body: String,
    /// Encoded illustration bytes (PNG, JPEG, ...), if one was fetched
    pub image: Option<Vec<u8>>,
}

impl StoryDocument {
    /// Create a document without an illustration.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            image: None,
        }
    }

    /// Attach illustration bytes.
    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }
}
