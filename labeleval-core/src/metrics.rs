pub mod aggregate;
mod confusion;
mod context;
pub mod derived;
mod metric;
mod metric_registry;
pub mod ranking;

pub use confusion::*;
pub use context::*;
pub use metric::*;
pub use metric_registry::*;
