use crate::stylesheet::STYLESHEET;
use chrono::Datelike;
use pagebuilder_common::presentation::{
    self, callout_color, callout_icon, column_gap, css_color, display_text, divider_variant, heading_level,
    is_unexpected_shape,
};
use pagebuilder_common::{walk_block, walk_sequence, Visitor};
use pagebuilder_document::{Block, BlockKind, ColumnSide, Document};
use std::borrow::Cow;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Block {block_id}: field {field:?} is not text")]
    UnexpectedValue { block_id: String, field: String },

    #[error("Compilation error: {0}")]
    Generic(String),
}

impl From<String> for CompileError {
    fn from(s: String) -> Self {
        CompileError::Generic(s)
    }
}

impl From<&str> for CompileError {
    fn from(s: &str) -> Self {
        CompileError::Generic(s.to_string())
    }
}

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Add `data-block-id` to the root element of every block
    pub annotate_ids: bool,
    /// Emit the text block's `html` field as markup instead of escaping it
    pub trust_text_html: bool,
    pub include_footer: bool,
    /// Fail on a field of unexpected shape instead of rendering it empty
    pub strict: bool,
    /// Page title; defaults to "<site name> Blog"
    pub title: Option<String>,
    /// Footer year; defaults to the current year
    pub year: Option<i32>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            annotate_ids: false,
            trust_text_html: false,
            include_footer: true,
            strict: false,
            title: None,
            year: None,
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a document to a complete HTML page
pub fn compile_to_html(document: &Document, options: CompileOptions) -> Result<String, CompileError> {
    let mut compiler = HtmlCompiler::new(options);
    let ctx = &mut compiler.ctx;

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(document, ctx);

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line("<article class=\"blog-container\">");
    ctx.indent();

    compiler.visit_document(document);

    let ctx = &mut compiler.ctx;
    ctx.dedent();
    ctx.add_line("</article>");

    if ctx.options.include_footer {
        let year = ctx.options.year.unwrap_or_else(|| chrono::Local::now().year());
        let site = escape_html(&document.site_settings.site_name);
        ctx.add_line(&format!("<footer class=\"site-footer\"><p>© {} {}</p></footer>", year, site));
    }

    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    info!(blocks = compiler.blocks, "compiled page");
    compiler.finish()
}

/// Compile only the blocks, without the surrounding page
pub fn compile_blocks(document: &Document, options: CompileOptions) -> Result<String, CompileError> {
    let mut compiler = HtmlCompiler::new(options);
    compiler.visit_document(document);
    compiler.finish()
}

fn compile_head(document: &Document, ctx: &mut Context) {
    let title = match &ctx.options.title {
        Some(title) => title.clone(),
        None if document.site_settings.site_name.is_empty() => "Blog".to_string(),
        None => format!("{} Blog", document.site_settings.site_name),
    };

    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(&title)));
    ctx.add_line("<meta name=\"description\" content=\"Generated with Pagebuilder\">");

    ctx.add_line("<style>");
    ctx.indent();
    for line in STYLESHEET.lines().filter(|l| !l.trim().is_empty()) {
        ctx.add_line(line);
    }
    ctx.dedent();
    ctx.add_line("</style>");

    ctx.dedent();
    ctx.add_line("</head>");
}

struct HtmlCompiler {
    ctx: Context,
    error: Option<CompileError>,
    blocks: usize,
}

impl HtmlCompiler {
    fn new(options: CompileOptions) -> Self {
        Self {
            ctx: Context::new(options),
            error: None,
            blocks: 0,
        }
    }

    fn finish(self) -> Result<String, CompileError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.ctx.get_output()),
        }
    }

    /// A content field as text. Strings and numbers render; anything else
    /// renders empty (or fails the compile in strict mode).
    fn field<'b>(&mut self, block: &'b Block, name: &str) -> Option<Cow<'b, str>> {
        let value = block.content.get(name)?;
        if is_unexpected_shape(value) {
            debug!(block_id = %block.id, field = name, "field has unexpected shape, rendering empty");
            if self.ctx.options.strict && self.error.is_none() {
                self.error = Some(CompileError::UnexpectedValue {
                    block_id: block.id.to_string(),
                    field: name.to_string(),
                });
            }
        }
        display_text(value)
    }

    /// Escaped, non-empty text of a field
    fn text(&mut self, block: &Block, name: &str) -> Option<String> {
        self.field(block, name).filter(|s| !s.is_empty()).map(|s| escape_html(&s))
    }

    fn text_or(&mut self, block: &Block, name: &str, fallback: &str) -> String {
        // records the strict-mode error for a bad shape
        self.field(block, name);
        escape_html(&presentation::text_or(block.content.get(name), fallback))
    }

    /// `<tag class="..."` plus the block id when annotating, without the closing `>`
    fn open_tag(&self, block: &Block, tag: &str, class: &str) -> String {
        let mut open = format!("<{} class=\"{}\"", tag, class);
        if self.ctx.options.annotate_ids {
            open.push_str(&format!(" data-block-id=\"{}\"", escape_html(block.id.as_str())));
        }
        open
    }

    fn compile_header(&mut self, block: &Block) {
        let open = self.open_tag(block, "header", "header component");
        let eyebrow = self.text(block, "eyebrow");
        let title = self.text_or(block, "title", "Untitled");
        let author = self.text(block, "author");
        let date = self.text(block, "publishDate");
        let reading = self.text(block, "readingTime");
        let lede = self.text(block, "lede");

        let ctx = &mut self.ctx;
        ctx.add_line(&format!("{}>", open));
        ctx.indent();
        if let Some(eyebrow) = eyebrow {
            ctx.add_line(&format!("<div class=\"header-eyebrow\">{}</div>", eyebrow));
        }
        ctx.add_line(&format!("<h1>{}</h1>", title));
        ctx.add_line("<div class=\"header-meta\">");
        ctx.indent();
        if let Some(author) = author {
            ctx.add_line(&format!("<span>By {}</span>", author));
        }
        for meta in [date, reading].into_iter().flatten() {
            ctx.add_line(&format!("<span>{}</span>", meta));
        }
        ctx.dedent();
        ctx.add_line("</div>");
        if let Some(lede) = lede {
            ctx.add_line(&format!("<p class=\"header-lede\">{}</p>", lede));
        }
        ctx.dedent();
        ctx.add_line("</header>");
    }

    fn compile_heading(&mut self, block: &Block) {
        let level = heading_level(block.content.get("level"));
        let tag = format!("h{}", level);
        let open = self.open_tag(block, &tag, "component");
        let text = self.text_or(block, "text", "Heading");
        self.ctx.add_line(&format!("{}>{}</{}>", open, text, tag));
    }

    fn compile_subheading(&mut self, block: &Block) {
        let open = self.open_tag(block, "div", "subheading component");
        let text = self.text_or(block, "text", "Subheading");
        self.ctx.add_line(&format!("{}>{}</div>", open, text));
    }

    fn compile_text(&mut self, block: &Block) {
        let open = self.open_tag(block, "div", "component");
        let html = match self.field(block, "html") {
            Some(html) if self.ctx.options.trust_text_html => html.into_owned(),
            Some(html) => escape_html(&html),
            None => String::new(),
        };
        self.ctx.add_line(&format!("{}>{}</div>", open, html));
    }

    fn compile_image(&mut self, block: &Block) {
        let open = self.open_tag(block, "figure", "component");
        let src = self.text(block, "src").unwrap_or_default();
        let alt = self.text(block, "alt").unwrap_or_default();
        let caption = self.text(block, "caption");

        let ctx = &mut self.ctx;
        ctx.add_line(&format!("{}>", open));
        ctx.indent();
        ctx.add_line(&format!("<img src=\"{}\" alt=\"{}\" />", src, alt));
        if let Some(caption) = caption {
            ctx.add_line(&format!("<figcaption>{}</figcaption>", caption));
        }
        ctx.dedent();
        ctx.add_line("</figure>");
    }

    fn compile_divider(&mut self, block: &Block) {
        let class = match divider_variant(self.field(block, "style").as_deref()) {
            Some(style) => format!("divider divider-{} component", style),
            None => "divider component".to_string(),
        };
        let open = self.open_tag(block, "hr", &class);
        self.ctx.add_line(&format!("{} />", open));
    }

    fn compile_callout(&mut self, block: &Block) {
        let color = callout_color(self.field(block, "color").as_deref());
        let icon = callout_icon(self.field(block, "icon").as_deref());
        let text = self.text_or(block, "text", "Important information");
        let open = self.open_tag(block, "div", &format!("callout callout-{} component", color));

        let ctx = &mut self.ctx;
        ctx.add_line(&format!("{}>", open));
        ctx.indent();
        ctx.add_line(&format!("<span class=\"callout-icon\">{}</span> {}", icon, text));
        ctx.dedent();
        ctx.add_line("</div>");
    }

    fn compile_product_card(&mut self, block: &Block) {
        let open = self.open_tag(block, "div", "product-card component");
        let image = self.text(block, "image");
        let title = self.text(block, "title");
        let description = self.text(block, "description");
        let button = self.text(block, "buttonText").zip(self.text(block, "buttonLink"));

        let ctx = &mut self.ctx;
        ctx.add_line(&format!("{}>", open));
        ctx.indent();
        if let Some(image) = image {
            let alt = title.clone().unwrap_or_else(|| "Product".to_string());
            ctx.add_line(&format!("<img src=\"{}\" alt=\"{}\" />", image, alt));
        }
        ctx.add_line("<div class=\"product-card-content\">");
        ctx.indent();
        if let Some(title) = title {
            ctx.add_line(&format!("<h3 class=\"product-card-title\">{}</h3>", title));
        }
        if let Some(description) = description {
            ctx.add_line(&format!("<p class=\"product-card-description\">{}</p>", description));
        }
        if let Some((text, link)) = button {
            ctx.add_line(&format!("<a href=\"{}\" class=\"product-card-button\">{}</a>", link, text));
        }
        ctx.dedent();
        ctx.add_line("</div>");
        ctx.dedent();
        ctx.add_line("</div>");
    }

    fn compile_card(&mut self, block: &Block, depth: usize) {
        let mut open = self.open_tag(block, "div", "card component");
        if let Some(color) = self.field(block, "backgroundColor").as_deref().and_then(css_color) {
            open.push_str(&format!(" style=\"background-color: {};\"", color));
        }
        let title = self.text(block, "title");

        self.ctx.add_line(&format!("{}>", open));
        self.ctx.indent();
        if let Some(title) = title {
            self.ctx.add_line(&format!("<div class=\"card-title\">{}</div>", title));
        }
        walk_block(self, block, depth);
        self.ctx.dedent();
        self.ctx.add_line("</div>");
    }

    fn compile_two_column(&mut self, block: &Block, depth: usize) {
        let class = match column_gap(self.field(block, "gap").as_deref()) {
            Some(gap) => format!("two-column gap-{} component", gap),
            None => "two-column component".to_string(),
        };
        let open = self.open_tag(block, "div", &class);

        self.ctx.add_line(&format!("{}>", open));
        self.ctx.indent();
        walk_block(self, block, depth);
        self.ctx.dedent();
        self.ctx.add_line("</div>");
    }
}

impl Visitor for HtmlCompiler {
    fn visit_block(&mut self, block: &Block, depth: usize) {
        self.blocks += 1;
        match block.kind {
            BlockKind::Header => self.compile_header(block),
            BlockKind::Heading => self.compile_heading(block),
            BlockKind::Subheading => self.compile_subheading(block),
            BlockKind::Text => self.compile_text(block),
            BlockKind::Image => self.compile_image(block),
            BlockKind::Divider => self.compile_divider(block),
            BlockKind::Callout => self.compile_callout(block),
            BlockKind::ProductCard => self.compile_product_card(block),
            BlockKind::Card => self.compile_card(block, depth),
            BlockKind::TwoColumn => self.compile_two_column(block, depth),
        }
    }

    fn visit_column(&mut self, _parent: &Block, side: ColumnSide, children: &[Block], depth: usize) {
        self.ctx.add_line(&format!("<div class=\"column column-{}\">", side));
        self.ctx.indent();
        walk_sequence(self, children, depth);
        self.ctx.dedent();
        self.ctx.add_line("</div>");
    }

    fn visit_card_children(&mut self, _card: &Block, children: &[Block], depth: usize) {
        self.ctx.add_line("<div class=\"card-content\">");
        self.ctx.indent();
        walk_sequence(self, children, depth);
        self.ctx.dedent();
        self.ctx.add_line("</div>");
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
