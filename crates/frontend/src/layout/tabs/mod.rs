//! Tab management
//!
//! - `page`: `TabPage`, the wrapper that shows/hides a tab's content
//! - `registry`: tab key -> view
//! - `tab_labels`: tab keys, titles and access levels

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::tab_label_for_key;
