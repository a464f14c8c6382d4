pub mod client;
pub mod errors;

pub use client::{decode_pdf, fetch_pdf, parse_pdf};
pub use errors::PdfError;
