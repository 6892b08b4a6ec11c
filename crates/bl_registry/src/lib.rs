pub mod dataset;
pub mod registry;

pub use registry::StaticRegistry;

pub mod prelude {
    pub use super::dataset::{reference_articles, reference_narratives};
    pub use super::registry::StaticRegistry;
}
