//! ISO-3361 listing
//!
//! 国コード一覧テキストをASCIIへ転写・整形し、
//! パートナーエリア表（partnerAreas.json）と突き合わせるツール

pub mod cli;
pub mod encoding;
pub mod error;
pub mod listing;
pub mod partner_areas;
pub mod report;
pub mod translit;

pub use error::{ListingError, Result};
pub use listing::run_list;
