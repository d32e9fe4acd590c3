pub mod explain;
pub mod predict;
pub mod system;
pub mod teams;

pub use explain::*;
pub use predict::*;
pub use system::*;
pub use teams::*;
