//! Text decoding and the encoding header of TDD files.
//!
//! Only the encodings every host can decode without tables are supported:
//! UTF-8, ISO-8859-1 and US-ASCII.

use tdd_lexer::chars::is_whitespace;

use crate::LoaderError;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Encoding {
    Utf8,
    Latin1,
    Ascii,
}

impl Encoding {
    /// Look up an encoding by one of its usual names, ignoring case.
    pub fn from_name(name: &str) -> Result<Encoding, LoaderError> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Ok(Encoding::Latin1),
            "us-ascii" | "ascii" => Ok(Encoding::Ascii),
            _ => Err(LoaderError::UnsupportedEncoding(name.to_owned())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Latin1 => "ISO-8859-1",
            Encoding::Ascii => "US-ASCII",
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<String, LoaderError> {
        let invalid = || LoaderError::Decode {
            encoding: self.name().to_owned(),
        };
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| invalid()),
            Encoding::Latin1 => Ok(latin1(bytes)),
            Encoding::Ascii if bytes.is_ascii() => Ok(latin1(bytes)),
            Encoding::Ascii => Err(invalid()),
        }
    }
}

/// Decode `bytes` with the encoding called `encoding`.
pub fn decode(bytes: &[u8], encoding: &str) -> Result<String, LoaderError> {
    Encoding::from_name(encoding)?.decode(bytes)
}

/// `text` without a leading byte order mark.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}

/// Decode a TDD file, honoring an `#encoding: X` (or `#charset: X`) header
/// comment at its start. Without the header `default_encoding` is used.
pub fn load_tdd(bytes: &[u8], default_encoding: &str) -> Result<String, LoaderError> {
    let header = detect_encoding(bytes);
    if let Some(name) = &header {
        tracing::debug!(encoding = %name, "encoding header");
    }
    decode(bytes, header.as_deref().unwrap_or(default_encoding))
}

/// The encoding named by the header comment, if there is one.
///
/// The header may follow whitespace and a UTF-8 byte order mark. Bytes are
/// read as ISO-8859-1, which every supported encoding agrees with for the
/// header's characters.
pub fn detect_encoding(bytes: &[u8]) -> Option<String> {
    let ws = |b: u8| is_whitespace(char::from(b));

    let mut p = bytes.iter().position(|&b| !ws(b))?;
    if bytes[p] != b'#' {
        if !bytes[p..].starts_with(b"\xEF\xBB\xBF#") {
            return None;
        }
        p += 3;
    }
    p = skip_inline_whitespace(bytes, p + 1);

    let keyword_len = bytes[p..]
        .iter()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    let keyword = bytes[p..p + keyword_len].to_ascii_lowercase();
    if keyword != b"encoding" && keyword != b"charset" {
        return None;
    }
    p = skip_inline_whitespace(bytes, p + keyword_len);
    if bytes.get(p) != Some(&b':') {
        return None;
    }
    p = skip_inline_whitespace(bytes, p + 1);

    let name_len = bytes[p..].iter().take_while(|&&b| !ws(b)).count();
    if name_len == 0 {
        return None;
    }
    Some(latin1(&bytes[p..p + name_len]))
}

fn skip_inline_whitespace(bytes: &[u8], from: usize) -> usize {
    let skipped = bytes[from..]
        .iter()
        .take_while(|&&b| b != b'\n' && b != b'\r' && is_whitespace(char::from(b)))
        .count();
    from + skipped
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
