//! Ports - the interfaces the domain needs from infrastructure

mod store;
mod translator;

pub use store::{capacity_stop, KeyValueStore};
pub use translator::Translator;
