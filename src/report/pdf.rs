//! Renders laid-out pages to a PDF file with `printpdf`.

use anyhow::{Result, anyhow};
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Rgb,
};
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;
use tracing::{debug, info};

use crate::output::ensure_parent_dir;
use crate::report::layout::{Font, Item, PAGE_HEIGHT, PAGE_WIDTH, Page};

const IMAGE_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;

struct Fonts {
    helvetica: IndirectFontRef,
    helvetica_bold: IndirectFontRef,
    helvetica_oblique: IndirectFontRef,
    courier: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self> {
        let add = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| anyhow!("failed to register builtin font: {:?}", e))
        };
        Ok(Self {
            helvetica: add(BuiltinFont::Helvetica)?,
            helvetica_bold: add(BuiltinFont::HelveticaBold)?,
            helvetica_oblique: add(BuiltinFont::HelveticaOblique)?,
            courier: add(BuiltinFont::Courier)?,
        })
    }

    fn get(&self, font: Font) -> &IndirectFontRef {
        match font {
            Font::Helvetica => &self.helvetica,
            Font::HelveticaBold => &self.helvetica_bold,
            Font::HelveticaOblique => &self.helvetica_oblique,
            Font::Courier => &self.courier,
        }
    }
}

/// Writes `pages` to a PDF at `path`, one A4 page each.
#[tracing::instrument(skip(pages), fields(pages = pages.len(), path = %path.display()))]
pub fn write_pdf(pages: &[Page], title: &str, path: &Path) -> Result<()> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let fonts = Fonts::load(&doc)?;

    for (i, page) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_page(&layer, page, &fonts)?;
        debug!(page = page.number, items = page.items.len(), "Page rendered");
    }

    ensure_parent_dir(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    doc.save(&mut writer)
        .map_err(|e| anyhow!("failed to save PDF {}: {:?}", path.display(), e))?;

    info!(path = %path.display(), pages = pages.len(), "PDF report saved");
    Ok(())
}

fn draw_page(layer: &PdfLayerReference, page: &Page, fonts: &Fonts) -> Result<()> {
    for item in &page.items {
        match item {
            Item::Text { x, y, text, style } => {
                let (r, g, b) = style.color;
                layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
                layer.use_text(
                    text.as_str(),
                    style.size,
                    Mm(*x),
                    Mm(PAGE_HEIGHT - *y),
                    fonts.get(style.font),
                );
            }
            Item::Image {
                x,
                y,
                width,
                height,
                image,
            } => {
                let decoder = PngDecoder::new(Cursor::new(image.bytes.as_slice()))?;
                let pdf_image = Image::try_from(decoder)?;

                let natural_width = image.width_px as f32 / IMAGE_DPI * MM_PER_INCH;
                let natural_height = image.height_px as f32 / IMAGE_DPI * MM_PER_INCH;
                pdf_image.add_to_layer(
                    layer.clone(),
                    ImageTransform {
                        translate_x: Some(Mm(*x)),
                        translate_y: Some(Mm(PAGE_HEIGHT - *y - *height)),
                        scale_x: Some(*width / natural_width),
                        scale_y: Some(*height / natural_height),
                        dpi: Some(IMAGE_DPI),
                        ..Default::default()
                    },
                );
            }
        }
    }
    Ok(())
}
