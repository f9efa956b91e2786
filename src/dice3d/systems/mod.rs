pub mod dice;
pub mod input;
pub mod setup;

pub use dice::*;
pub use input::*;
pub use setup::*;
