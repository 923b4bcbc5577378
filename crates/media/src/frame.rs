//! This module exports everything that has to do with captured frames.

pub mod data_url;
pub mod screen_data;
pub mod snapshot;

mod dimensions;

pub use dimensions::*;
pub use screen_data::{ScreenDataError, decode_screen_data, placeholder};
pub use snapshot::{SnapshotError, SurfaceSnapshot};
