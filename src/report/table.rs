//! Table builder
//!
//! Turns a descriptor and a record slice into a styled [`Grid`]: one header
//! row, one row per record, and the summary row when a summary field is set.

use tracing::debug;

use super::descriptor::ReportDescriptor;
use crate::models::{Alignment, Cell, CellHeight, FontStyle, Grid, Rgb, RowKind};

/// Column count at which the font reaches its floor
const FONT_CEILING: i64 = 25;
pub const MIN_FONT_SIZE: f32 = 6.0;
pub const MAX_FONT_SIZE: f32 = 15.0;

pub const HEADER_HEIGHT: f32 = 55.0;
pub const ROW_MIN_HEIGHT: f32 = 35.0;

pub const HEADER_BACKGROUND: Rgb = Rgb::BROWN;
pub const HEADER_TEXT: Rgb = Rgb::WHITE;
/// Background of the first data row and every other one after it
pub const ROW_BACKGROUND_FIRST: Rgb = Rgb::ALICE_BLUE;
pub const ROW_BACKGROUND_SECOND: Rgb = Rgb::LIGHT_GRAY;
pub const SUMMARY_BACKGROUND: Rgb = Rgb::GRAY;

/// Line-break marker accepted inside cell text
pub const LINE_BREAK_MARKER: &str = "<br />";

/// Font size for a table with `column_count` columns
///
/// `(25 - columns) / 2` in whole points, clamped to 6..=15.
pub fn font_size_for(column_count: usize) -> f32 {
    let columns = i64::try_from(column_count).unwrap_or(i64::MAX);
    let size = FONT_CEILING.saturating_sub(columns) / 2;
    (size as f32).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

/// Replace the line-break marker with a newline
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace(LINE_BREAK_MARKER, "\n")
}

/// Builds the styled grid for one render call
#[derive(Debug, Clone, Copy)]
pub struct TableBuilder {
    column_count: usize,
    font_size: f32,
}

impl TableBuilder {
    pub fn new(column_count: usize) -> Self {
        Self {
            column_count,
            font_size: font_size_for(column_count),
        }
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Build the whole grid, accumulating the summary along the way
    pub fn build<T>(&self, descriptor: &mut ReportDescriptor<'_, T>, records: &[T]) -> Grid {
        let mut grid = Grid::new(self.column_count);

        grid.push(RowKind::Header, self.header_row(&descriptor.headers()));
        for row in self.data_rows(records, descriptor) {
            grid.push(RowKind::Data, row);
        }
        if let Some(row) = self.summary_row(descriptor) {
            grid.push(RowKind::Summary, row);
        }

        debug!(
            columns = self.column_count,
            rows = grid.len(),
            font_size = self.font_size,
            "built table grid"
        );
        grid
    }

    /// One centered cell per header label on the header background
    pub fn header_row(&self, headers: &[String]) -> Vec<Cell> {
        headers
            .iter()
            .map(|label| {
                Cell::new(normalize_line_breaks(label), self.font_size)
                    .font_style(FontStyle::Bold)
                    .text_color(HEADER_TEXT)
                    .alignment(Alignment::Center)
                    .background(HEADER_BACKGROUND)
                    .height(CellHeight::Fixed(HEADER_HEIGHT))
            })
            .collect()
    }

    /// One row per record, in input order
    ///
    /// Backgrounds alternate by position only, starting with
    /// [`ROW_BACKGROUND_FIRST`]. Every value also passes through the
    /// descriptor's summary accumulation.
    pub fn data_rows<T>(
        &self,
        records: &[T],
        descriptor: &mut ReportDescriptor<'_, T>,
    ) -> Vec<Vec<Cell>> {
        let mut second = false;
        let mut rows = Vec::with_capacity(records.len());

        for record in records {
            let background = if second {
                ROW_BACKGROUND_SECOND
            } else {
                ROW_BACKGROUND_FIRST
            };

            let values = descriptor.read_row(record);
            let mut cells = Vec::with_capacity(values.len());
            for (column, value) in values.iter().enumerate() {
                descriptor.accumulate(column, value);
                cells.push(
                    Cell::new(normalize_line_breaks(&value.display_text()), self.font_size)
                        .alignment(Alignment::Center)
                        .background(background)
                        .height(CellHeight::Minimum(ROW_MIN_HEIGHT)),
                );
            }
            rows.push(cells);
            second = !second;
        }

        rows
    }

    /// Filler cells, then the total label and the total
    ///
    /// With a single column the label and total share one cell.
    pub fn summary_row<T>(&self, descriptor: &ReportDescriptor<'_, T>) -> Option<Vec<Cell>> {
        let (label, total) = descriptor.finalize_summary()?;
        let height = CellHeight::Minimum(ROW_MIN_HEIGHT);

        let summary_cell = |text: String| {
            Cell::new(normalize_line_breaks(&text), self.font_size)
                .font_style(FontStyle::BoldItalic)
                .alignment(Alignment::Center)
                .background(SUMMARY_BACKGROUND)
                .height(height)
        };

        if self.column_count < 2 {
            return Some(vec![summary_cell(format!("{}\n{}", label, total))]);
        }

        let mut cells: Vec<Cell> = (0..self.column_count.saturating_sub(2))
            .map(|_| Cell::blank(SUMMARY_BACKGROUND, height))
            .collect();
        cells.push(summary_cell(label));
        cells.push(summary_cell(total.to_string()));
        Some(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportOptions;
    use crate::models::{FieldKind, Schema};

    struct Sale {
        region: &'static str,
        amount: Option<f64>,
        note: &'static str,
    }

    fn schema() -> Schema<Sale> {
        Schema::new()
            .field("region", FieldKind::Text, |s: &Sale| s.region.into())
            .field("note", FieldKind::Text, |s: &Sale| s.note.into())
            .field("amount", FieldKind::Decimal, |s: &Sale| s.amount.into())
    }

    fn sales() -> Vec<Sale> {
        vec![
            Sale { region: "North", amount: Some(10.25), note: "first<br />line" },
            Sale { region: "North", amount: None, note: "" },
            Sale { region: "South", amount: Some(4.75), note: "" },
        ]
    }

    #[test]
    fn test_font_size_clamps() {
        assert_eq!(font_size_for(0), 12.0);
        assert_eq!(font_size_for(1), 12.0);
        assert_eq!(font_size_for(3), 11.0);
        assert_eq!(font_size_for(13), 6.0);
        assert_eq!(font_size_for(25), 6.0);
        assert_eq!(font_size_for(200), 6.0);
    }

    #[test]
    fn test_font_size_is_non_increasing() {
        let sizes: Vec<f32> = (0..40).map(font_size_for).collect();
        assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
        assert!(sizes.iter().all(|s| (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(s)));
    }

    #[test]
    fn test_header_row_style() {
        let builder = TableBuilder::new(2);
        let row = builder.header_row(&["Region".to_string(), "Amount".to_string()]);

        assert_eq!(row.len(), 2);
        assert!(row.iter().all(|c| c.fill() == HEADER_BACKGROUND));
        assert!(row.iter().all(|c| c.color() == HEADER_TEXT));
        assert!(row.iter().all(|c| c.height_rule() == CellHeight::Fixed(HEADER_HEIGHT)));
    }

    #[test]
    fn test_rows_alternate_by_position() {
        let schema = schema();
        let mut descriptor = ReportDescriptor::new(&schema, &ReportOptions::default()).unwrap();
        let builder = TableBuilder::new(descriptor.column_count());

        let records: Vec<Sale> = (0..5)
            .map(|_| Sale { region: "Same", amount: Some(1.0), note: "" })
            .collect();
        let rows = builder.data_rows(&records, &mut descriptor);

        let fills: Vec<Rgb> = rows.iter().map(|r| r[0].fill()).collect();
        assert_eq!(
            fills,
            vec![
                ROW_BACKGROUND_FIRST,
                ROW_BACKGROUND_SECOND,
                ROW_BACKGROUND_FIRST,
                ROW_BACKGROUND_SECOND,
                ROW_BACKGROUND_FIRST,
            ]
        );
    }

    #[test]
    fn test_line_break_marker_is_normalized() {
        let schema = schema();
        let mut descriptor = ReportDescriptor::new(&schema, &ReportOptions::default()).unwrap();
        let builder = TableBuilder::new(descriptor.column_count());

        let rows = builder.data_rows(&sales(), &mut descriptor);
        assert_eq!(rows[0][1].text(), "first\nline");
        assert_eq!(rows[1][2].text(), "");
    }

    #[test]
    fn test_build_with_summary() {
        let schema = schema();
        let options = ReportOptions::default()
            .with_summary("amount")
            .with_header("amount", "Amount");
        let mut descriptor = ReportDescriptor::new(&schema, &options).unwrap();
        let builder = TableBuilder::new(descriptor.column_count());

        let grid = builder.build(&mut descriptor, &sales());
        assert_eq!(grid.len(), 5);
        assert!(grid.rows().iter().all(|r| r.cells.len() == 3));

        let summary = grid.summary().unwrap();
        assert_eq!(summary.cells[0].text(), "");
        assert_eq!(summary.cells[1].text(), "Total Amount");
        assert_eq!(summary.cells[2].text(), "15.00");
        assert!(summary.cells.iter().all(|c| c.fill() == SUMMARY_BACKGROUND));
    }

    #[test]
    fn test_build_without_summary() {
        let schema = schema();
        let mut descriptor = ReportDescriptor::new(&schema, &ReportOptions::default()).unwrap();
        let builder = TableBuilder::new(descriptor.column_count());

        let grid = builder.build(&mut descriptor, &sales());
        assert_eq!(grid.len(), 4);
        assert!(grid.summary().is_none());
    }

    #[test]
    fn test_empty_records_still_have_header_and_summary() {
        let schema = schema();
        let options = ReportOptions::default().with_summary("amount");
        let mut descriptor = ReportDescriptor::new(&schema, &options).unwrap();
        let builder = TableBuilder::new(descriptor.column_count());

        let grid = builder.build(&mut descriptor, &[]);
        assert!(grid.header().is_some());
        assert_eq!(grid.summary().unwrap().cells[2].text(), "0");
    }

    #[test]
    fn test_single_column_summary_fits_one_cell() {
        let schema: Schema<Sale> =
            Schema::new().field("amount", FieldKind::Decimal, |s: &Sale| s.amount.into());
        let options = ReportOptions::default().with_summary("amount");
        let mut descriptor = ReportDescriptor::new(&schema, &options).unwrap();
        let builder = TableBuilder::new(1);

        let grid = builder.build(&mut descriptor, &sales());
        let summary = grid.summary().unwrap();
        assert_eq!(summary.cells.len(), 1);
        assert_eq!(summary.cells[0].text(), "Total amount\n15.00");
    }
}
