pub mod api_utils;
pub mod components;
pub mod config;
pub mod confirm;
pub mod date_utils;
pub mod export;
pub mod icons;
pub mod modal_frame;
pub mod modal_stack;
pub mod page_frame;
pub mod storage;
pub mod toast;
