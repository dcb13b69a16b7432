pub mod error;
pub mod indicators;
pub mod reference;
pub mod roster;
pub mod traits;
pub mod types;

pub use error::*;
pub use indicators::*;
pub use reference::*;
pub use roster::*;
pub use traits::*;
pub use types::*;
