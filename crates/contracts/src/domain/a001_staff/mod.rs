pub mod aggregate;

pub use aggregate::{Staff, StaffDto, StaffForm, StaffStatus, StaffStatusPatch};
