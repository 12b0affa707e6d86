//! Face-element locator orchestrator.

mod core;

pub use core::{FACE_CANDIDATES, FACE_KEYWORDS, FaceMatch, find_face};
