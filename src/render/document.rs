//! Document renderer
//!
//! Lays a [`Grid`] out on A4 pages: timestamp, title and optional logo on the
//! first page, then the table at full content width with the header row
//! repeated at the top of every page.

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use super::fonts::{text_width, wrap_text};
use super::logo::load_logo;
use super::pdf::PdfDocument;
use crate::error::{ReportError, ReportResult};
use crate::models::{Alignment, Cell, CellHeight, FontStyle, Grid, Rgb, Row};

/// A4 portrait, in points
pub const A4: (f32, f32) = (595.0, 842.0);
pub const MARGIN: f32 = 36.0;
/// Tables wider than this many columns go landscape
pub const LANDSCAPE_THRESHOLD: usize = 7;

const CELL_PADDING: f32 = 2.0;
const LINE_SPACING: f32 = 1.2;
const BORDER_WIDTH: f32 = 0.5;
const PARAGRAPH_SPACING: f32 = 1.5;

const TIMESTAMP_SIZE: f32 = 11.0;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TITLE_SIZE: f32 = 15.0;
/// Height of the blank line between the title block and the table
const SPACER_HEIGHT: f32 = 18.0;

const LOGO_X: f32 = 20.0;
const LOGO_TOP_OFFSET: f32 = 20.0;
const LOGO_GAP: f32 = 6.0;

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Page width and height in points
    pub fn page_size(self) -> (f32, f32) {
        match self {
            Orientation::Portrait => A4,
            Orientation::Landscape => (A4.1, A4.0),
        }
    }
}

/// Landscape iff there are more than seven columns
pub fn choose_orientation(column_count: usize) -> Orientation {
    if column_count > LANDSCAPE_THRESHOLD {
        Orientation::Landscape
    } else {
        Orientation::Portrait
    }
}

/// Wrapped text and final height of one row
#[derive(Debug, Clone, PartialEq)]
struct RowLayout {
    height: f32,
    lines: Vec<Vec<String>>,
}

impl RowLayout {
    fn measure(row: &Row, column_width: f32, max_height: f32) -> Self {
        let available = (column_width - 2.0 * CELL_PADDING).max(1.0);
        let mut height: f32 = 0.0;
        let mut lines = Vec::with_capacity(row.cells.len());

        for cell in &row.cells {
            let wrapped = wrap_text(cell.text(), cell.style(), cell.size(), available);
            let content = wrapped.len() as f32 * cell.size() * LINE_SPACING + 2.0 * CELL_PADDING;
            let cell_height = match cell.height_rule() {
                CellHeight::Fixed(h) => h,
                CellHeight::Minimum(h) => h.max(content),
            };
            height = height.max(cell_height);
            lines.push(wrapped);
        }

        Self {
            height: height.min(max_height),
            lines,
        }
    }
}

/// Split body rows into pages
///
/// `first_space` is the room under the header on the first page and
/// `page_space` the room under the header on every later page. A row that
/// does not fit moves to the next page, unless it already starts a
/// continuation page.
fn paginate(heights: &[f32], first_space: f32, page_space: f32) -> Vec<Vec<usize>> {
    let mut pages: Vec<Vec<usize>> = vec![Vec::new()];
    let mut remaining = first_space;

    for (index, &height) in heights.iter().enumerate() {
        let starts_continuation = pages.len() > 1 && pages.last().map_or(false, Vec::is_empty);
        if height > remaining && !starts_continuation {
            pages.push(Vec::new());
            remaining = page_space;
        }
        if let Some(page) = pages.last_mut() {
            page.push(index);
        }
        remaining -= height;
    }

    pages
}

/// Renders grids into finished PDF bytes
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    timestamp: NaiveDateTime,
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer {
    /// Renderer stamped with the local clock
    pub fn new() -> Self {
        Self {
            timestamp: Local::now().naive_local(),
        }
    }

    /// Renderer stamped with a fixed time
    pub fn at(timestamp: NaiveDateTime) -> Self {
        Self { timestamp }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Lay out `grid` and serialize it
    ///
    /// The logo is loaded before anything is drawn; any failure aborts the
    /// whole render and no bytes are returned.
    pub fn render(&self, grid: &Grid, title: &str, logo_path: &str) -> ReportResult<Vec<u8>> {
        let column_count = grid.column_count();
        if column_count == 0 {
            return Err(ReportError::Schema("cannot render a table with no columns".into()));
        }
        let header = grid
            .header()
            .ok_or_else(|| ReportError::Backend("grid has no header row".into()))?;

        let logo = load_logo(logo_path)?;

        let orientation = choose_orientation(column_count);
        let (width, height) = orientation.page_size();
        let column_width = (width - 2.0 * MARGIN) / column_count as f32;
        let mut doc = PdfDocument::new(width, height);

        let header_layout = RowLayout::measure(header, column_width, height - 2.0 * MARGIN);
        let body_max = (height - 2.0 * MARGIN - header_layout.height).max(1.0);
        let body: Vec<RowLayout> = grid
            .body()
            .iter()
            .map(|row| RowLayout::measure(row, column_width, body_max))
            .collect();

        doc.begin_page();
        let mut cursor = self.draw_preamble(&mut doc, title)?;

        if let Some(logo) = &logo {
            let handle = doc.embed_image(logo)?;
            let (logo_w, logo_h) = logo.fitted_size();
            let logo_y = height - LOGO_TOP_OFFSET - logo_h;
            doc.draw_image(handle, LOGO_X, logo_y, logo_w, logo_h)?;
            cursor = cursor.min(logo_y - LOGO_GAP);
        }

        let heights: Vec<f32> = body.iter().map(|r| r.height).collect();
        let mut first_space = cursor - header_layout.height - MARGIN;
        let first_row = heights.first().copied().unwrap_or(0.0);
        if first_space < first_row {
            // The header and first row must share a page
            doc.begin_page();
            cursor = height - MARGIN;
            first_space = body_max;
        }
        let pages = paginate(&heights, first_space, body_max);

        debug!(
            ?orientation,
            columns = column_count,
            rows = body.len(),
            pages = pages.len(),
            "laid out document"
        );

        for (page_index, rows) in pages.iter().enumerate() {
            if page_index > 0 {
                doc.begin_page();
                cursor = height - MARGIN;
            }
            draw_row(&mut doc, header, &header_layout, cursor, column_width)?;
            cursor -= header_layout.height;

            for &index in rows {
                draw_row(&mut doc, &grid.body()[index], &body[index], cursor, column_width)?;
                cursor -= body[index].height;
            }
        }

        doc.finish(title, self.timestamp)
    }

    /// Timestamp, title and spacer; returns the cursor below them
    fn draw_preamble(&self, doc: &mut PdfDocument, title: &str) -> ReportResult<f32> {
        let width = doc.width();
        let mut cursor = doc.height() - MARGIN;

        let stamp = self.timestamp.format(TIMESTAMP_FORMAT).to_string();
        let stamp_width = text_width(&stamp, FontStyle::Italic, TIMESTAMP_SIZE);
        doc.text(
            width - MARGIN - stamp_width,
            cursor - TIMESTAMP_SIZE,
            &stamp,
            FontStyle::Italic,
            TIMESTAMP_SIZE,
            Rgb::BLACK,
        )?;
        cursor -= TIMESTAMP_SIZE * PARAGRAPH_SPACING;

        let lines = wrap_text(title, FontStyle::Bold, TITLE_SIZE, width - 2.0 * MARGIN);
        let line_count = lines.len();
        for (drawn, line) in lines.into_iter().enumerate() {
            if cursor - TITLE_SIZE < MARGIN {
                debug!(drawn, line_count, "title truncated at the bottom margin");
                break;
            }
            let line_width = text_width(&line, FontStyle::Bold, TITLE_SIZE);
            doc.text(
                (width - line_width) / 2.0,
                cursor - TITLE_SIZE,
                &line,
                FontStyle::Bold,
                TITLE_SIZE,
                Rgb::BLACK,
            )?;
            cursor -= TITLE_SIZE * PARAGRAPH_SPACING;
        }

        Ok(cursor - SPACER_HEIGHT)
    }
}

/// Draw one row with its top edge at `top`
fn draw_row(
    doc: &mut PdfDocument,
    row: &Row,
    layout: &RowLayout,
    top: f32,
    column_width: f32,
) -> ReportResult<()> {
    let bottom = top - layout.height;

    for (index, (cell, lines)) in row.cells.iter().zip(&layout.lines).enumerate() {
        let x = MARGIN + index as f32 * column_width;
        doc.fill_rect(x, bottom, column_width, layout.height, cell.fill())?;
        doc.stroke_rect(x, bottom, column_width, layout.height, Rgb::BLACK, BORDER_WIDTH)?;

        if lines.iter().all(String::is_empty) {
            continue;
        }

        doc.begin_clip(x, bottom, column_width, layout.height)?;
        draw_cell_text(doc, cell, lines, x, top, column_width, layout.height)?;
        doc.end_clip()?;
    }

    Ok(())
}

/// Vertically centered block of lines inside a cell
fn draw_cell_text(
    doc: &mut PdfDocument,
    cell: &Cell,
    lines: &[String],
    x: f32,
    top: f32,
    width: f32,
    height: f32,
) -> ReportResult<()> {
    let size = cell.size();
    let leading = size * LINE_SPACING;
    let block = lines.len() as f32 * leading;
    let block_top = top - ((height - block) / 2.0).max(CELL_PADDING);

    for (i, line) in lines.iter().enumerate() {
        let line_width = text_width(line, cell.style(), size);
        let line_x = match cell.align() {
            Alignment::Left => x + CELL_PADDING,
            Alignment::Center => x + (width - line_width) / 2.0,
            Alignment::Right => x + width - CELL_PADDING - line_width,
        };
        let baseline = block_top - i as f32 * leading - size;
        doc.text(line_x, baseline, line, cell.style(), size, cell.color())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RowKind;
    use chrono::NaiveDate;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 31)
            .unwrap()
            .and_hms_opt(23, 59, 1)
            .unwrap()
    }

    fn grid(columns: usize, rows: usize) -> Grid {
        let mut grid = Grid::new(columns);
        grid.push(
            RowKind::Header,
            (0..columns)
                .map(|c| Cell::new(format!("H{}", c), 10.0).height(CellHeight::Fixed(55.0)))
                .collect(),
        );
        for r in 0..rows {
            grid.push(
                RowKind::Data,
                (0..columns)
                    .map(|c| Cell::new(format!("{}:{}", r, c), 10.0).height(CellHeight::Minimum(35.0)))
                    .collect(),
            );
        }
        grid
    }

    fn page_count(bytes: &[u8]) -> usize {
        bytes
            .windows(12)
            .filter(|w| w.starts_with(b"/Type /Page") && w[11] != b's')
            .count()
    }

    #[test]
    fn test_orientation_threshold() {
        assert_eq!(choose_orientation(1), Orientation::Portrait);
        assert_eq!(choose_orientation(7), Orientation::Portrait);
        assert_eq!(choose_orientation(8), Orientation::Landscape);
        assert_eq!(Orientation::Landscape.page_size(), (842.0, 595.0));
    }

    #[test]
    fn test_paginate_fills_pages_in_order() {
        let heights = vec![100.0; 7];
        let pages = paginate(&heights, 250.0, 300.0);
        assert_eq!(pages, vec![vec![0, 1], vec![2, 3, 4], vec![5, 6]]);
    }

    #[test]
    fn test_paginate_empty_body_is_one_page() {
        assert_eq!(paginate(&[], 100.0, 100.0), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_paginate_oversized_row_does_not_loop() {
        let pages = paginate(&[500.0, 500.0], 100.0, 400.0);
        assert_eq!(pages, vec![vec![], vec![0], vec![1]]);
    }

    #[test]
    fn test_row_height_grows_with_wrapped_text() {
        let mut g = Grid::new(1);
        g.push(
            RowKind::Data,
            vec![Cell::new("word ".repeat(60), 10.0).height(CellHeight::Minimum(35.0))],
        );
        let layout = RowLayout::measure(&g.rows()[0], 100.0, 1000.0);
        assert!(layout.height > 35.0);
        assert!(layout.lines[0].len() > 1);
    }

    #[test]
    fn test_fixed_height_does_not_grow() {
        let mut g = Grid::new(1);
        g.push(
            RowKind::Header,
            vec![Cell::new("word ".repeat(60), 10.0).height(CellHeight::Fixed(55.0))],
        );
        let layout = RowLayout::measure(&g.rows()[0], 100.0, 1000.0);
        assert_eq!(layout.height, 55.0);
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = DocumentRenderer::at(stamp())
            .render(&grid(3, 4), "Quarterly", "")
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_render_breaks_pages_and_is_deterministic() {
        let renderer = DocumentRenderer::at(stamp());
        let first = renderer.render(&grid(2, 60), "Long", "").unwrap();
        let second = renderer.render(&grid(2, 60), "Long", "").unwrap();

        assert!(page_count(&first) > 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_long_title_stays_on_page() {
        let title = "word ".repeat(2000);
        let bytes = DocumentRenderer::at(stamp())
            .render(&grid(3, 2), &title, "")
            .unwrap();

        let negative = bytes
            .windows(2)
            .filter(|w| matches!(w[0], b' ' | b'\n' | b'[') && w[1] == b'-')
            .count();
        assert_eq!(negative, 0);
        // title page, then the table starts on a fresh page
        assert_eq!(page_count(&bytes), 2);
    }

    #[test]
    fn test_render_zero_columns_is_schema_error() {
        let err = DocumentRenderer::at(stamp())
            .render(&Grid::new(0), "", "")
            .unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_render_missing_logo_fails_whole_render() {
        let err = DocumentRenderer::at(stamp())
            .render(&grid(2, 1), "", "/nope/logo.jpg")
            .unwrap_err();
        assert!(err.is_resource());
    }
}
