//! Ports (trait boundaries) for external collaborators.
//!
//! The training loop reports to observers through this trait; adapters live
//! in [`crate::pipeline::observers`].

pub mod observer;

pub use observer::Observer;
