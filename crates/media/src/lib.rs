//! This library contains all of the functionality for handling captured
//! emulator frames: their `data:` URL encoding, raw surface snapshots, and
//! decoding them back into images.

pub mod frame;
