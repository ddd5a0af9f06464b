//! Contains the Error and Result type used by the encoder and decoder.
use std::fmt::Display;

use crate::Tag;

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur decoding, encoding or constructing NBT data.
#[derive(Debug, Clone)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

/// Category of an [`Error`].
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Any other error. Users should not match on this variant and should
    /// instead use a wildcard `_`. Errors in this category may be moved to new
    /// variants.
    Other,

    /// A type code outside the tag registry appeared on the wire.
    InvalidTag,

    /// A tag name did not match any tag in the registry.
    UnknownTagName,

    /// An end tag appeared where it is not allowed: named, at the document
    /// root, or as a list member.
    UnexpectedEndTag,

    /// The members of a list were not all of one type.
    HeterogeneousList,

    /// Expected unicode data but was not valid. Contained bytes are the
    /// invalid unicode data.
    Nonunicode(Vec<u8>),

    /// A length was negative, did not fit its length prefix, or exceeded a
    /// configured ceiling.
    LengthOutOfRange,

    /// Nesting exceeded the configured depth ceiling.
    DepthLimit,

    /// EOF that occurred part way through some NBT value.
    UnexpectedEof,

    /// An I/O failure other than EOF from the underlying reader or writer.
    Io,
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// True if the input ended part way through a value.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, ErrorKind::UnexpectedEof)
    }

    pub(crate) fn bespoke(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Other,
        }
    }

    pub(crate) fn invalid_tag(t: u8) -> Self {
        // 0x1f is the first byte of the gzip magic number. NBT found in the
        // wild is often gzip or zlib compressed, and decompressing is the
        // caller's job, so give them a hint.
        let msg = if t == 0x1f {
            format!("invalid nbt tag value: {}, input looks gzip compressed", t)
        } else {
            format!("invalid nbt tag value: {}", t)
        };
        Self {
            msg,
            kind: ErrorKind::InvalidTag,
        }
    }

    pub(crate) fn unknown_tag_name(name: &str) -> Self {
        Self {
            msg: format!("unknown nbt tag name: {}", name),
            kind: ErrorKind::UnknownTagName,
        }
    }

    pub(crate) fn root_end_tag() -> Self {
        Self {
            msg: "unexpected end tag at document root".into(),
            kind: ErrorKind::UnexpectedEndTag,
        }
    }

    pub(crate) fn end_value() -> Self {
        Self {
            msg: "end tag is a marker and cannot be written as a value".into(),
            kind: ErrorKind::UnexpectedEndTag,
        }
    }

    pub(crate) fn list_of_end(size: i32) -> Self {
        Self {
            msg: format!(
                "unexpected list of type 'end' with {} elements, which is not supported",
                size
            ),
            kind: ErrorKind::UnexpectedEndTag,
        }
    }

    pub(crate) fn heterogeneous_list(expected: Tag, found: Tag) -> Self {
        Self {
            msg: format!(
                "list elements must all be one type: expected {}, found {}",
                expected, found
            ),
            kind: ErrorKind::HeterogeneousList,
        }
    }

    pub(crate) fn nonunicode(d: Vec<u8>) -> Self {
        Self {
            msg: format!(
                "invalid string, non-unicode: {}",
                String::from_utf8_lossy(&d),
            ),
            kind: ErrorKind::Nonunicode(d),
        }
    }

    pub(crate) fn negative_size(size: i32) -> Self {
        Self {
            msg: format!("size was negative: {}", size),
            kind: ErrorKind::LengthOutOfRange,
        }
    }

    pub(crate) fn seq_too_long(size: usize, max: usize) -> Self {
        Self {
            msg: format!(
                "size ({}) greater than max sequence length ({})",
                size, max
            ),
            kind: ErrorKind::LengthOutOfRange,
        }
    }

    pub(crate) fn len_too_large() -> Self {
        Self {
            msg: "len too large".into(),
            kind: ErrorKind::LengthOutOfRange,
        }
    }

    pub(crate) fn string_too_long(len: usize) -> Self {
        Self {
            msg: format!("string of {} bytes exceeds nbt maximum of 65535", len),
            kind: ErrorKind::LengthOutOfRange,
        }
    }

    pub(crate) fn depth_limit(limit: usize) -> Self {
        Self {
            msg: format!("depth limit ({}) exceeded", limit),
            kind: ErrorKind::DepthLimit,
        }
    }

    pub(crate) fn unexpected_eof() -> Self {
        Self {
            msg: "eof: unexpectedly ran out of input".into(),
            kind: ErrorKind::UnexpectedEof,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self {
                msg: e.to_string(),
                kind: ErrorKind::UnexpectedEof,
            },
            _ => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Io,
            },
        }
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::bespoke(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Error::bespoke(msg.to_string())
    }
}
