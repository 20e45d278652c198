#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dates;
pub mod dump;
pub mod editor;
pub mod generation;
pub mod history;
pub mod interchange;
pub mod ir;
pub mod layout;
pub mod normalize;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{load_config, Config, DataConfig, HistoryConfig, LayoutConfig};
pub use editor::{search_persons, FamilyPatch, FamilyTreeEditor, PersonPatch};
pub use interchange::FamilyTreeData;
pub use ir::{FamilyUnit, Person, Snapshot};
pub use layout::{bounds, compute_layout, derive_edges, EdgeSet, OverrideMap};
pub use normalize::normalize;
pub use render::render_svg;
pub use theme::Theme;
