//! Renderer-control protocol: the status enum, the controller capability set,
//! and the no-op default controller.

pub mod default;
pub mod protocol;
