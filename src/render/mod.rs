//! Render-job driver and the frame producer seam it drives.

pub mod frame;
pub mod job;
