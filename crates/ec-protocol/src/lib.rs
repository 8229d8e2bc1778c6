pub mod advice;
pub mod emissions;
pub mod event;
pub mod extraction;

pub use advice::*;
pub use emissions::*;
pub use event::*;
pub use extraction::*;
