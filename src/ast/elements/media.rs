//! Image and animation elements
//!
//! Both hold filename references; bytes are supplied by an external asset
//! resolver at parse time when one is configured, and are never serialized.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageNode {
    pub filename: String,
    /// Resolved image bytes, when a resolver was available.
    #[serde(skip)]
    pub data: Option<Vec<u8>>,
    /// Draw a frame around the image.
    pub draw_frame: bool,
    /// The referenced file is temporary and owned by this document.
    pub temp_file: bool,
}

impl ImageNode {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            data: None,
            draw_frame: true,
            temp_file: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimationNode {
    /// Frame filenames in playback order.
    pub frames: Vec<String>,
    /// Resolved bytes per frame, parallel to `frames`, when a resolver was
    /// available.
    #[serde(skip)]
    pub frame_data: Option<Vec<Vec<u8>>>,
    /// Frames per second; absent means the viewer default.
    pub frame_rate: Option<u32>,
}

impl AnimationNode {
    pub fn new(frames: Vec<String>) -> Self {
        Self {
            frames,
            frame_data: None,
            frame_rate: None,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
