pub mod countries;
pub mod error;
pub mod models;
pub mod port;
pub mod projection;
pub mod style;
pub mod topo;

pub use error::MapError;
