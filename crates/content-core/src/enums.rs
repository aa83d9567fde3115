#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferKind {
    /// Characters handed to the last `set_text`.
    Original,
    /// Append-only storage for everything inserted since.
    Add,
}

/// A line terminator. `CrLf` is a single delimiter, never two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineDelimiter {
    Cr,
    Lf,
    CrLf,
}

impl LineDelimiter {
    /// The delimiter conventionally written by the host platform.
    #[inline]
    #[must_use]
    pub fn platform() -> Self {
        if cfg!(windows) {
            LineDelimiter::CrLf
        } else {
            LineDelimiter::Lf
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LineDelimiter::Cr => "\r",
            LineDelimiter::Lf => "\n",
            LineDelimiter::CrLf => "\r\n",
        }
    }

    /// Length in characters.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            LineDelimiter::Cr | LineDelimiter::Lf => 1,
            LineDelimiter::CrLf => 2,
        }
    }
}

impl std::fmt::Display for LineDelimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineDelimiter::Cr => write!(f, "CR"),
            LineDelimiter::Lf => write!(f, "LF"),
            LineDelimiter::CrLf => write!(f, "CRLF"),
        }
    }
}

impl std::str::FromStr for LineDelimiter {
    type Err = crate::errors::ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cr" => Ok(LineDelimiter::Cr),
            "lf" => Ok(LineDelimiter::Lf),
            "crlf" => Ok(LineDelimiter::CrLf),
            _ => Err(crate::errors::ContentError::InvalidArgument(
                "line delimiter must be one of cr, lf, crlf",
            )),
        }
    }
}
