//! Normalized file-backed waveform reference

use serde::{Deserialize, Serialize};

/// An owned, normalized view of a file-backed waveform.
///
/// Built by the effect gate from a caller-supplied
/// [`FileHandle`](haptic_api::FileHandle) after applying its default/clamp
/// rules, so the device layer never has to re-inspect loose offset/length
/// values. The descriptor is still owned by the resource-manager
/// collaborator; the core forwards it and never closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSegment {
    /// Raw descriptor, validated non-negative
    pub fd: i32,

    /// Byte offset, clamped non-negative
    pub offset: i64,

    /// Byte length; `None` means "to end of file"
    pub length: Option<i64>,
}

impl FileSegment {
    pub fn new(fd: i32, offset: i64, length: Option<i64>) -> Self {
        Self { fd, offset, length }
    }
}
