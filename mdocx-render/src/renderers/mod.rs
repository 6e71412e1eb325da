//! Built-in renderer implementations

pub mod docx;
pub mod html;
pub mod json;
