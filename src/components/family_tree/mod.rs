mod component;
pub mod connectors;
pub mod data;
pub mod layout;
mod render;
mod state;
pub mod types;
pub mod viewport;

pub use component::FamilyTreeCanvas;
pub use data::{FetchConfig, load_family};
pub use types::{FamilyNode, TreeData};
