//! Initial content for newly created blocks.

use pagebuilder_document::{BlockKind, Content};

/// Supplies the content a block starts with. Must not depend on document state.
pub trait ContentProvider {
    fn default_content(&self, kind: BlockKind) -> Content;
}

/// The stock content shipped with the palette
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultContent;

impl ContentProvider for DefaultContent {
    fn default_content(&self, kind: BlockKind) -> Content {
        default_content(kind)
    }
}

pub fn default_content(kind: BlockKind) -> Content {
    match kind {
        BlockKind::Header => Content::new()
            .with("eyebrow", "Health • Mental Training")
            .with("title", "The Power of Positive Self-Talk During Workouts")
            .with("author", "Your Name")
            .with("readingTime", "8 min read")
            .with("publishDate", "October 6, 2025")
            .with(
                "lede",
                "Mental strategies for motivation and performance – discover how the voice in your head \
                 can make you stronger, faster, and more confident in every workout.",
            ),

        BlockKind::Text => Content::new().with(
            "html",
            "<p>Have you ever noticed the voice in your head during a tough workout? \
             That internal conversation is called <strong>self-talk</strong>.</p>",
        ),

        BlockKind::Image => Content::new()
            .with("src", "https://placehold.co/800x400/png")
            .with("alt", "Placeholder image")
            .with("caption", ""),

        BlockKind::ProductCard => Content::new()
            .with("image", "https://placehold.co/300/png")
            .with("title", "Your Product Name")
            .with("description", "Describe benefits and features here.")
            .with("buttonText", "Shop Now")
            .with("buttonLink", "#"),

        BlockKind::Heading => Content::new().with("text", "Heading Text").with("level", "h2"),

        BlockKind::Subheading => Content::new().with("text", "Subheading Text"),

        BlockKind::Divider => Content::new().with("style", "line"),

        BlockKind::Card => Content::new()
            .with("title", "Card Title")
            .with("backgroundColor", "white"),

        BlockKind::Callout => Content::new()
            .with("text", "Important information goes here")
            .with("color", "blue")
            .with("icon", "info"),

        BlockKind::TwoColumn => Content::new()
            .with("leftColumnRatio", 50)
            .with("rightColumnRatio", 50)
            .with("gap", "md"),
    }
}
