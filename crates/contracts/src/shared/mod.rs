pub mod export;
pub mod money;
pub mod period;
pub mod resource_cache;
pub mod selection;
pub mod validation;
