pub mod prediction;
pub mod request;
pub mod team;

pub use prediction::*;
pub use request::*;
pub use team::*;
