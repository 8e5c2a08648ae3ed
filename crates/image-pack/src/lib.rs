pub mod compose;
pub mod constants;
pub mod layout;
pub mod pack;
mod options;
mod stats;
mod types;

pub use compose::{compose_pages, flatten_on_background};
pub use layout::{OrderingPolicy, PageGeometry, ShelfPacker, plan_pages};
pub use options::*;
pub use pack::{OutputTarget, PackOutput, discover_images, export, load_images, pack};
pub use stats::calculate_statistics;
pub use types::*;
