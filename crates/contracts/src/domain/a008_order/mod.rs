pub mod aggregate;

pub use aggregate::{build_order_rows, Order, OrderItem, OrderRow};
