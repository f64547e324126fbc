pub mod action;
pub mod catalog;
pub mod flow;
pub mod identifier;
pub mod matching;
pub mod models;

pub use action::{ActionError, ActionSimulator, Latency, NoLatency, TimerLatency};
pub use catalog::{CatalogConfig, CatalogError, CatalogFactory, CatalogRegistry, CatalogSource};
pub use flow::{Event, FlowError, RegistrationFlow, Route, Screen};
pub use identifier::IdentifierAssigner;
pub use models::*;
