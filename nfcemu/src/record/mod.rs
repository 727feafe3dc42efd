// nfcemu/src/record/mod.rs
//! Tag record codec: the fixed 0x21C-byte image, its two layouts, and
//! the variant classification heuristic.

pub mod date;
pub mod flags;
pub mod layout;
mod views;

pub use views::{LogicalView, LogicalViewMut, RawView};

use crate::constants::{TAG_RECORD_LEN, VARIANT_MARKER_LOGICAL};
use crate::{Error, Result};

/// Fixed-size backing buffer of one record image.
pub type RecordBytes = [u8; TAG_RECORD_LEN];

/// The two interpretations of a record image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    /// Cipher-text-like image; only the identification block is readable.
    Raw,
    /// Plain-text-like image with the full settings and app-data fields.
    Logical,
}

/// Classify a record image from its variant marker byte.
///
/// Best-effort heuristic: a raw image whose byte at the marker offset
/// happens to be 0x02 is misclassified as logical. The format carries no
/// stronger discriminant.
pub fn classify(bytes: &RecordBytes) -> Variant {
    if bytes[layout::logical::VARIANT_MARKER] == VARIANT_MARKER_LOGICAL {
        Variant::Logical
    } else {
        Variant::Raw
    }
}

/// A loaded tag record: one byte image plus its classified variant.
#[derive(Debug, Clone)]
pub struct TagRecord {
    bytes: Box<RecordBytes>,
    variant: Variant,
}

/// A record image viewed through its classified layout.
pub enum View<'a> {
    /// The image classified as cipher-text-like.
    Raw(RawView<'a>),
    /// The image classified as plain-text-like.
    Logical(LogicalView<'a>),
}

impl TagRecord {
    /// Take ownership of a record image, classifying it.
    pub fn from_bytes(bytes: Box<RecordBytes>) -> Self {
        let variant = classify(&bytes);
        Self { bytes, variant }
    }

    /// Build a record from a byte slice of exactly the record extent.
    pub fn try_from_slice(data: &[u8]) -> Result<Self> {
        if data.len() != TAG_RECORD_LEN {
            return Err(Error::InvalidLength {
                expected: TAG_RECORD_LEN,
                actual: data.len(),
            });
        }
        let mut bytes = Box::new([0u8; TAG_RECORD_LEN]);
        bytes.copy_from_slice(data);
        Ok(Self::from_bytes(bytes))
    }

    /// Variant assigned at classification time.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Whether the image was classified as decrypted.
    pub fn is_logical(&self) -> bool {
        self.variant == Variant::Logical
    }

    /// The full image, for persistence.
    pub fn as_bytes(&self) -> &RecordBytes {
        &self.bytes
    }

    /// View the image through its classified layout.
    pub fn view(&self) -> View<'_> {
        match self.variant {
            Variant::Raw => View::Raw(RawView { bytes: &self.bytes }),
            Variant::Logical => View::Logical(LogicalView { bytes: &self.bytes }),
        }
    }

    /// Logical-layout view, if the image was classified as decrypted.
    pub fn logical(&self) -> Option<LogicalView<'_>> {
        match self.variant {
            Variant::Logical => Some(LogicalView { bytes: &self.bytes }),
            Variant::Raw => None,
        }
    }

    /// Mutable logical-layout view, if the image was classified as
    /// decrypted.
    pub fn logical_mut(&mut self) -> Option<LogicalViewMut<'_>> {
        match self.variant {
            Variant::Logical => Some(LogicalViewMut {
                bytes: &mut self.bytes,
            }),
            Variant::Raw => None,
        }
    }
}
