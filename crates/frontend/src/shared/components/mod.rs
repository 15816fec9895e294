pub mod date_input;
pub mod export_bar;
pub mod form_select;
pub mod month_selector;
pub mod stat_card;
pub mod staff_selector;

pub use date_input::DateInput;
pub use export_bar::ExportBar;
pub use form_select::FormSelect;
pub use month_selector::MonthSelector;
pub use stat_card::{StatCard, StatTone};
pub use staff_selector::StaffSelector;
