//! Page layout for the cuenta de cobro document.
//!
//! Layout produces in-memory [`Page`]s made of text and line operations;
//! turning them into PDF bytes is left to [`crate::pdf::PdfWriter`].

pub mod canvas;
mod cuenta;
pub mod dates;
pub mod metrics;

pub use canvas::{Canvas, DrawOp, Font, Page};
pub use cuenta::{DocumentLayout, PAGE_HEIGHT, PAGE_WIDTH};
