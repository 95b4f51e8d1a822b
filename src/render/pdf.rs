//! PDF backend built on `pdf-writer`
//!
//! A thin drawing surface: pages of filled and stroked rectangles, single
//! lines of Helvetica text, and one optional embedded image. Layout decisions
//! live in [`super::document`]; this module only serializes them.

use chrono::{Datelike, NaiveDateTime, Timelike};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use pdf_writer::{Content, Date, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use std::io::Write;

use super::fonts::{self, ALL_STYLES};
use super::logo::LogoImage;
use crate::error::{ReportError, ReportResult};
use crate::models::{FontStyle, Rgb};

const PRODUCER: &str = "reportity";
const LOGO_NAME: Name<'static> = Name(b"Im1");
/// Ids 1 and 2 are the catalog and the page tree
const FIRST_FONT_ID: i32 = 3;

/// Handle to an embedded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHandle(Ref);

/// An in-progress PDF document
pub struct PdfDocument {
    pdf: Pdf,
    next_id: i32,
    tree_id: Ref,
    font_ids: [Ref; 4],
    width: f32,
    height: f32,
    /// Finished pages: (page id, content id)
    pages: Vec<(Ref, Ref)>,
    current: Option<Content>,
    image: Option<Ref>,
}

impl PdfDocument {
    /// Start a document whose pages are `width`×`height` points
    pub fn new(width: f32, height: f32) -> Self {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let tree_id = Ref::new(2);
        pdf.catalog(catalog_id).pages(tree_id);

        let font_ids: [Ref; 4] =
            std::array::from_fn(|slot| Ref::new(FIRST_FONT_ID + slot as i32));
        for (id, style) in font_ids.iter().zip(ALL_STYLES) {
            let mut font = pdf.type1_font(*id);
            font.base_font(fonts::base_font(style));
            let mut encoding = font.encoding_custom();
            encoding.base_encoding(Name(b"WinAnsiEncoding"));
            let mut differences = encoding.differences();
            for (slot, glyph) in fonts::TURKISH_DIFFERENCES {
                differences.consecutive(slot, [Name(glyph)]);
            }
        }

        Self {
            pdf,
            next_id: FIRST_FONT_ID + font_ids.len() as i32,
            tree_id,
            font_ids,
            width,
            height,
            pages: Vec::new(),
            current: None,
            image: None,
        }
    }

    fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Pages started so far
    pub fn page_count(&self) -> usize {
        self.pages.len() + usize::from(self.current.is_some())
    }

    /// Close the current page (if any) and start a new one
    pub fn begin_page(&mut self) {
        self.flush_page();
        self.current = Some(Content::new());
    }

    fn content(&mut self) -> ReportResult<&mut Content> {
        self.current
            .as_mut()
            .ok_or_else(|| ReportError::Backend("drawing before the first page".into()))
    }

    /// Fill a rectangle whose lower-left corner is (`x`, `y`)
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) -> ReportResult<()> {
        let (r, g, b) = color.to_unit();
        let content = self.content()?;
        content.set_fill_rgb(r, g, b);
        content.rect(x, y, w, h);
        content.fill_nonzero();
        Ok(())
    }

    /// Outline a rectangle
    pub fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgb,
        line_width: f32,
    ) -> ReportResult<()> {
        let (r, g, b) = color.to_unit();
        let content = self.content()?;
        content.set_stroke_rgb(r, g, b);
        content.set_line_width(line_width);
        content.rect(x, y, w, h);
        content.stroke();
        Ok(())
    }

    /// Restrict following drawing to a rectangle until [`Self::end_clip`]
    pub fn begin_clip(&mut self, x: f32, y: f32, w: f32, h: f32) -> ReportResult<()> {
        let content = self.content()?;
        content.save_state();
        content.rect(x, y, w, h);
        content.clip_nonzero();
        content.end_path();
        Ok(())
    }

    pub fn end_clip(&mut self) -> ReportResult<()> {
        self.content()?.restore_state();
        Ok(())
    }

    /// Draw one line of text with its baseline starting at (`x`, `y`)
    pub fn text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        style: FontStyle,
        size: f32,
        color: Rgb,
    ) -> ReportResult<()> {
        if text.is_empty() || size <= 0.0 {
            return Ok(());
        }
        let (r, g, b) = color.to_unit();
        let encoded = fonts::encode_cp1254(text);
        let content = self.content()?;
        content.set_fill_rgb(r, g, b);
        content.begin_text();
        content.set_font(fonts::resource_name(style), size);
        content.next_line(x, y);
        content.show(Str(&encoded));
        content.end_text();
        Ok(())
    }

    /// Embed an image once; it becomes available on every page
    pub fn embed_image(&mut self, logo: &LogoImage) -> ReportResult<ImageHandle> {
        let image_id = self.alloc();
        let mask_id = match &logo.alpha {
            Some(alpha) => {
                let mask_id = self.alloc();
                let data = deflate(alpha)?;
                let mut mask = self.pdf.image_xobject(mask_id, &data);
                mask.filter(Filter::FlateDecode);
                mask.width(dimension(logo.width)?);
                mask.height(dimension(logo.height)?);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                mask.finish();
                Some(mask_id)
            }
            None => None,
        };

        let data = deflate(&logo.rgb)?;
        let mut image = self.pdf.image_xobject(image_id, &data);
        image.filter(Filter::FlateDecode);
        image.width(dimension(logo.width)?);
        image.height(dimension(logo.height)?);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        self.image = Some(image_id);
        Ok(ImageHandle(image_id))
    }

    /// Paint an embedded image into the box with lower-left (`x`, `y`)
    pub fn draw_image(
        &mut self,
        handle: ImageHandle,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    ) -> ReportResult<()> {
        if self.image != Some(handle.0) {
            return Err(ReportError::Backend("image was not embedded in this document".into()));
        }
        let content = self.content()?;
        content.save_state();
        content.transform([w, 0.0, 0.0, h, x, y]);
        content.x_object(LOGO_NAME);
        content.restore_state();
        Ok(())
    }

    fn flush_page(&mut self) {
        if let Some(content) = self.current.take() {
            let page_id = self.alloc();
            let content_id = self.alloc();
            self.pdf.stream(content_id, &content.finish());
            self.pages.push((page_id, content_id));
        }
    }

    /// Write the page tree and info dictionary, and return the file bytes
    pub fn finish(mut self, title: &str, created: NaiveDateTime) -> ReportResult<Vec<u8>> {
        self.flush_page();
        if self.pages.is_empty() {
            return Err(ReportError::Backend("document has no pages".into()));
        }

        let page_ids: Vec<Ref> = self.pages.iter().map(|(page, _)| *page).collect();
        let count = i32::try_from(page_ids.len())
            .map_err(|_| ReportError::Backend("too many pages".into()))?;
        self.pdf
            .pages(self.tree_id)
            .kids(page_ids.iter().copied())
            .count(count);

        let media_box = Rect::new(0.0, 0.0, self.width, self.height);
        for (page_id, content_id) in &self.pages {
            let mut page = self.pdf.page(*page_id);
            page.media_box(media_box);
            page.parent(self.tree_id);
            page.contents(*content_id);
            {
                let mut resources = page.resources();
                let mut font_dict = resources.fonts();
                for (slot, style) in ALL_STYLES.iter().enumerate() {
                    font_dict.pair(fonts::resource_name(*style), self.font_ids[slot]);
                }
                font_dict.finish();
                if let Some(image_id) = self.image {
                    resources.x_objects().pair(LOGO_NAME, image_id);
                }
            }
            page.finish();
        }

        let info_id = self.alloc();
        let mut info = self.pdf.document_info(info_id);
        if !title.is_empty() {
            info.title(TextStr(title));
        }
        info.producer(TextStr(PRODUCER));
        info.creation_date(pdf_date(created));
        info.finish();

        Ok(self.pdf.finish())
    }
}

fn dimension(value: u32) -> ReportResult<i32> {
    i32::try_from(value).map_err(|_| ReportError::Backend(format!("image dimension {} too large", value)))
}

fn deflate(data: &[u8]) -> ReportResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| ReportError::Backend(format!("Failed to compress image: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| ReportError::Backend(format!("Failed to compress image: {}", e)))
}

fn pdf_date(at: NaiveDateTime) -> Date {
    Date::new(u16::try_from(at.year()).unwrap_or(1970))
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
}
