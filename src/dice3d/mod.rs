pub mod animator;
pub mod faces;
pub mod pixel_font;
pub mod systems;
pub mod types;

pub use animator::*;
pub use faces::*;
pub use systems::*;
pub use types::*;
