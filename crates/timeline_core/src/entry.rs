/// One historical record on the timeline.
///
/// `date` is a display label only and is never parsed as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimelineEntry {
    pub date: String,
    pub content: String,
    pub source: String,
    pub image: Option<String>,
}

impl TimelineEntry {
    pub fn new(
        date: impl Into<String>,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            content: content.into(),
            source: source.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// `folded_query` must already be lowercased.
    pub(crate) fn matches_folded(&self, folded_query: &str) -> bool {
        [&self.date, &self.content, &self.source]
            .iter()
            .any(|field| field.to_lowercase().contains(folded_query))
    }
}
