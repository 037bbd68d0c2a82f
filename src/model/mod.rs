//! Plain data carried through a dispatch run.

pub mod courier;
pub mod order;

pub use courier::*;
pub use order::*;
