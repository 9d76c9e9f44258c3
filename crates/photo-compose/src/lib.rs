pub mod compose;
pub mod constants;
pub mod layout;
mod options;
mod preview;
mod stats;
mod types;

pub use compose::{compose_collage, compose_letterbox, load_image, load_multiple_images, save_image};
pub use options::*;
pub use preview::{generate_collage_preview, generate_letterbox_preview};
pub use stats::{calculate_statistics, letterbox_statistics};
pub use types::*;
