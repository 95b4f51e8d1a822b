//! Styled cells and the backend-agnostic grid
//!
//! The grid is what the table builder hands to a document backend: rows of
//! immutable cells, each carrying its own text, font, colours and height rule.

use std::fmt;

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    /// `#A52A2A`
    pub const BROWN: Rgb = Rgb(0xA5, 0x2A, 0x2A);
    /// `#F0F8FF`
    pub const ALICE_BLUE: Rgb = Rgb(0xF0, 0xF8, 0xFF);
    /// `#D3D3D3`
    pub const LIGHT_GRAY: Rgb = Rgb(0xD3, 0xD3, 0xD3);
    /// `#808080`
    pub const GRAY: Rgb = Rgb(0x80, 0x80, 0x80);

    /// Components as 0.0..=1.0 floats
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Font weight and slant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }
}

/// Horizontal text alignment inside a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Height rule of a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellHeight {
    /// Exactly this tall; overflowing text is clipped
    Fixed(f32),
    /// At least this tall; grows with wrapped text
    Minimum(f32),
}

impl CellHeight {
    pub fn points(self) -> f32 {
        match self {
            CellHeight::Fixed(h) | CellHeight::Minimum(h) => h,
        }
    }
}

/// One styled table cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    text: String,
    font_style: FontStyle,
    font_size: f32,
    text_color: Rgb,
    alignment: Alignment,
    background: Rgb,
    height: CellHeight,
}

impl Cell {
    /// Create a cell with black regular text on white
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_style: FontStyle::Regular,
            font_size,
            text_color: Rgb::BLACK,
            alignment: Alignment::Center,
            background: Rgb::WHITE,
            height: CellHeight::Minimum(0.0),
        }
    }

    /// An empty filler cell
    pub fn blank(background: Rgb, height: CellHeight) -> Self {
        Self::new("", 0.0).background(background).height(height)
    }

    pub fn font_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }

    pub fn text_color(mut self, color: Rgb) -> Self {
        self.text_color = color;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn background(mut self, color: Rgb) -> Self {
        self.background = color;
        self
    }

    pub fn height(mut self, height: CellHeight) -> Self {
        self.height = height;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> FontStyle {
        self.font_style
    }

    pub fn size(&self) -> f32 {
        self.font_size
    }

    pub fn color(&self) -> Rgb {
        self.text_color
    }

    pub fn align(&self) -> Alignment {
        self.alignment
    }

    pub fn fill(&self) -> Rgb {
        self.background
    }

    pub fn height_rule(&self) -> CellHeight {
        self.height
    }
}

/// Role of a row within the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Data,
    Summary,
}

/// One grid row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

/// Rows of styled cells, all of the same width
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    column_count: usize,
    rows: Vec<Row>,
}

impl Grid {
    /// Create an empty grid of the given width
    pub fn new(column_count: usize) -> Self {
        Self {
            column_count,
            rows: Vec::new(),
        }
    }

    /// Append a row
    ///
    /// # Panics
    ///
    /// Panics if the row does not have exactly `column_count` cells.
    pub fn push(&mut self, kind: RowKind, cells: Vec<Cell>) {
        assert_eq!(
            cells.len(),
            self.column_count,
            "{:?} row has {} cells, grid has {} columns",
            kind,
            cells.len(),
            self.column_count
        );
        self.rows.push(Row { kind, cells });
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The header row, if one was pushed first
    pub fn header(&self) -> Option<&Row> {
        self.rows.first().filter(|r| r.kind == RowKind::Header)
    }

    /// Everything after the header
    pub fn body(&self) -> &[Row] {
        match self.header() {
            Some(_) => &self.rows[1..],
            None => &self.rows,
        }
    }

    /// The trailing summary row, if any
    pub fn summary(&self) -> Option<&Row> {
        self.rows.last().filter(|r| r.kind == RowKind::Summary)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
