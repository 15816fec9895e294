//! Wire types and pure client logic of the staff & expense dashboard.
//!
//! Nothing here touches the DOM, so all of it is tested natively.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
