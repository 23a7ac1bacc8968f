//! Format implementations
//!
//! Every format serializes the assembled report IR (see ../ir).

pub mod docx;
pub mod icons;
pub mod json;
pub mod treeviz;

pub use docx::{DocxFormat, DocxOptions};
pub use json::JsonFormat;
pub use treeviz::TreevizFormat;
