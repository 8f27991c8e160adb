//! Small helpers shared between the studio model decoder, the software
//! renderer and the preview CLI.

pub mod debug;
