//! Document rendering
//!
//! Page layout ([`document`]) over a `pdf-writer` backend ([`pdf`]), with the
//! Helvetica metrics used for wrapping ([`fonts`]) and logo decoding
//! ([`logo`]).

pub mod document;
pub mod fonts;
pub mod logo;
pub mod pdf;

pub use document::{choose_orientation, DocumentRenderer, Orientation};
pub use logo::{load_logo, LogoFormat, LogoImage};
pub use pdf::PdfDocument;
