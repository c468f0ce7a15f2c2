//! Pagination of a [`Report`] onto A4 pages.
//!
//! Positions are in millimetres measured from the top-left corner of the page.
//! Text `y` is the baseline.

use anyhow::{Result, bail};
use printpdf::image_crate::ImageDecoder;
use printpdf::image_crate::codecs::png::PngDecoder;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::report::document::{Block, Report};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 10.0;
pub const MAX_IMAGE_WIDTH: f32 = 190.0;

const HEADER_HEIGHT: f32 = 20.0;
const FOOTER_HEIGHT: f32 = 15.0;
const CONTENT_TOP: f32 = MARGIN + HEADER_HEIGHT;
const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - FOOTER_HEIGHT;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const PT_TO_MM: f32 = 0.3528;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    Courier,
}

impl Font {
    /// Average glyph width as a fraction of the font size.
    fn width_factor(&self) -> f32 {
        match self {
            Font::Courier => 0.6,
            Font::HelveticaBold => 0.58,
            Font::Helvetica | Font::HelveticaOblique => 0.52,
        }
    }
}

/// Font, size, color and line advance used for a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub font: Font,
    pub size: f32,
    pub color: (f32, f32, f32),
    pub line_height: f32,
}

impl Style {
    pub const TITLE: Style = Style::new(Font::HelveticaBold, 14.0, 10.0);
    pub const HEADING: Style = Style::new(Font::HelveticaBold, 12.0, 10.0);
    pub const BODY: Style = Style::new(Font::Helvetica, 10.0, 5.0);
    pub const MONO: Style = Style::new(Font::Courier, 10.0, 5.0);
    pub const MONO_SMALL: Style = Style::new(Font::Courier, 8.0, 5.0);
    pub const FOOTER: Style = Style {
        color: (0.5, 0.5, 0.5),
        ..Style::new(Font::HelveticaOblique, 8.0, 5.0)
    };
    pub const ERROR: Style = Style {
        color: (1.0, 0.0, 0.0),
        ..Style::new(Font::HelveticaOblique, 10.0, 10.0)
    };

    pub const fn new(font: Font, size: f32, line_height: f32) -> Self {
        Self {
            font,
            size,
            color: (0.0, 0.0, 0.0),
            line_height,
        }
    }

    fn char_width(&self) -> f32 {
        self.size * PT_TO_MM * self.font.width_factor()
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width()
    }
}

/// A PNG read from disk, ready to embed.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

impl EmbeddedImage {
    /// Reads and validates a PNG file.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let (width_px, height_px) = PngDecoder::new(Cursor::new(bytes.as_slice()))?.dimensions();
        if width_px == 0 || height_px == 0 {
            bail!("image {} has no pixels", path.display());
        }
        Ok(Self {
            path: path.to_path_buf(),
            bytes,
            width_px,
            height_px,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Text {
        x: f32,
        y: f32,
        text: String,
        style: Style,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: EmbeddedImage,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub number: usize,
    pub items: Vec<Item>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            Item::Text { text, .. } => Some(text.as_str()),
            Item::Image { .. } => None,
        })
    }
}

/// Flows content down the page, opening a new page when it runs out of room.
///
/// The current style lives on a stack: [`DocumentBuilder::with_style`] pushes a
/// style for the duration of a closure, so nothing set inside a section can
/// outlive it.
pub struct DocumentBuilder {
    title: String,
    pages: Vec<Vec<Item>>,
    cursor: f32,
    styles: Vec<Style>,
}

impl DocumentBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            pages: vec![Vec::new()],
            cursor: CONTENT_TOP,
            styles: vec![Style::BODY],
        }
    }

    pub fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or(Style::BODY)
    }

    pub fn with_style<R>(&mut self, style: Style, f: impl FnOnce(&mut Self) -> R) -> R {
        self.styles.push(style);
        let out = f(self);
        self.styles.pop();
        out
    }

    pub fn page_break(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = CONTENT_TOP;
    }

    fn ensure_room(&mut self, height: f32) {
        if self.cursor + height > CONTENT_BOTTOM && self.cursor > CONTENT_TOP {
            self.page_break();
        }
    }

    fn push(&mut self, item: Item) {
        if let Some(page) = self.pages.last_mut() {
            page.push(item);
        }
    }

    /// Writes one line, hard-wrapping it when it is wider than the content area.
    pub fn line(&mut self, text: &str) {
        let style = self.style();
        let max_chars = ((CONTENT_WIDTH / style.char_width()) as usize).max(1);
        let chars: Vec<char> = text.chars().collect();

        if chars.is_empty() {
            self.gap(style.line_height);
            return;
        }
        for chunk in chars.chunks(max_chars) {
            self.ensure_room(style.line_height);
            self.cursor += style.line_height;
            self.push(Item::Text {
                x: MARGIN,
                y: self.cursor - style.line_height * 0.25,
                text: chunk.iter().collect(),
                style,
            });
        }
    }

    /// Writes every line of `text`.
    pub fn paragraph(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    pub fn gap(&mut self, height: f32) {
        self.cursor = (self.cursor + height).min(CONTENT_BOTTOM);
    }

    /// Places an image at the left margin, at most [`MAX_IMAGE_WIDTH`] wide and
    /// never taller than one page of content.
    pub fn image(&mut self, image: EmbeddedImage) {
        let aspect = image.height_px as f32 / image.width_px as f32;
        let mut width = MAX_IMAGE_WIDTH.min(CONTENT_WIDTH);
        let mut height = width * aspect;
        let max_height = CONTENT_BOTTOM - CONTENT_TOP;
        if height > max_height {
            height = max_height;
            width = height / aspect;
        }

        self.ensure_room(height);
        let y = self.cursor;
        self.cursor += height;
        self.push(Item::Image {
            x: MARGIN,
            y,
            width,
            height,
            image,
        });
    }

    /// Adds the title header and the `Page n/N` footer to every page.
    pub fn finish(self) -> Vec<Page> {
        let total = self.pages.len();
        let title_x = centered_x(&self.title, &Style::TITLE);

        self.pages
            .into_iter()
            .enumerate()
            .map(|(i, body)| {
                let footer = format!("Page {}/{}", i + 1, total);
                let mut items = Vec::with_capacity(body.len() + 2);
                items.push(Item::Text {
                    x: title_x,
                    y: MARGIN + Style::TITLE.line_height,
                    text: self.title.clone(),
                    style: Style::TITLE,
                });
                items.extend(body);
                items.push(Item::Text {
                    x: centered_x(&footer, &Style::FOOTER),
                    y: PAGE_HEIGHT - MARGIN,
                    text: footer,
                    style: Style::FOOTER,
                });
                Page {
                    number: i + 1,
                    items,
                }
            })
            .collect()
    }
}

fn centered_x(text: &str, style: &Style) -> f32 {
    ((PAGE_WIDTH - style.text_width(text)) / 2.0).max(MARGIN)
}

/// Text shown in place of an image that could not be loaded.
pub fn missing_image_line(path: &Path) -> String {
    format!("Error: image not found - {}", path.display())
}

/// Lays out every section of `report` in order.
///
/// Images are read from disk here. One that is missing or not a valid PNG is
/// replaced by a red error line and the rest of the report is unaffected.
pub fn layout(report: &Report) -> Vec<Page> {
    let mut doc = DocumentBuilder::new(&report.title);

    doc.with_style(Style::FOOTER, |d| {
        d.line(&format!(
            "Generated on {}",
            report.generated_at.format("%Y-%m-%d %H:%M")
        ))
    });

    for section in &report.sections {
        doc.with_style(Style::HEADING, |d| d.line(&section.title));

        for block in &section.blocks {
            match block {
                Block::Table(text) => doc.with_style(Style::MONO_SMALL, |d| d.paragraph(text)),
                Block::Text(text) => doc.with_style(Style::MONO, |d| d.paragraph(text)),
                Block::KeyValues(pairs) => doc.with_style(Style::MONO, |d| {
                    for (key, value) in pairs {
                        d.line(&format!("{} : {}", key, value));
                    }
                }),
                Block::Image(path) => match EmbeddedImage::load(path) {
                    Ok(image) => doc.image(image),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Image unavailable, writing placeholder");
                        doc.with_style(Style::ERROR, |d| d.line(&missing_image_line(path)));
                    }
                },
            }
            doc.gap(5.0);
        }
    }

    doc.finish()
}
