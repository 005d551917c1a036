//! Lifecycle history of an archive unit or object group: fetch, keep the
//! finished events, page through them.

mod columns;
mod fetcher;
mod normalizer;
mod pagination;
mod view;

pub use columns::{load_field_config, load_translations, LifecycleFieldConfig, Translations};
pub use fetcher::{HttpLifecycleSource, LifecycleFetcher, LifecycleResult};
pub use view::LifecycleView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleType {
    Unit,
    ObjectGroup,
}

impl LifecycleType {
    pub fn as_path(self) -> &'static str {
        match self {
            LifecycleType::Unit => "unit",
            LifecycleType::ObjectGroup => "objectgroup",
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            LifecycleType::Unit => "Archive unit",
            LifecycleType::ObjectGroup => "Object group",
        }
    }
}
