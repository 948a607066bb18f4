//! Guides-on-map refresh controller.
//!
//! [`GuidesManager`] watches the map viewport, decides when to ask the guides
//! service for a fresh set, retries failures within a small attempt budget and
//! turns the answer into map marks and gallery items.

pub mod api;
pub mod config;
pub mod gallery;
pub mod manager;
pub mod record;
pub mod render;
pub mod state;
pub mod stats;
pub mod url;

pub use api::*;
pub use config::*;
pub use gallery::*;
pub use manager::*;
pub use record::*;
pub use render::*;
pub use state::*;
pub use stats::*;
