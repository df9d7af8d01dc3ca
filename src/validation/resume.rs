//! Résumé attachment checks
//!
//! Shared by the up-front validator, which only checks the encoding, and by
//! the form builder, which decodes the file and checks it again before it
//! leaves the process.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::models::ResumeUpload;

/// Largest accepted résumé after decoding
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

/// PDF, legacy Word and OOXML Word
pub const ALLOWED_RESUME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

pub const MSG_RESUME_REQUIRED: &str = "Resume file is required";
pub const MSG_RESUME_UNDECODABLE: &str = "Resume file could not be decoded";
pub const MSG_RESUME_TOO_LARGE: &str = "Resume file must be smaller than 10MB";
pub const MSG_RESUME_TYPE: &str = "Resume must be a PDF or Word document";

/// Padded and unpadded input both decode, and non-zero trailing bits are
/// ignored. URL-safe symbols are mapped onto this alphabet beforehand.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Symbols checked per step by `check_resume_encoding`. A multiple of 4.
const CHECK_CHUNK_SYMBOLS: usize = 4096;

/// Why a résumé payload could not be turned into bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeDecodeError {
    TooLarge(usize),
    Malformed,
}

/// Decoded size of a base64 payload, computed without decoding it.
pub fn decoded_len(encoded: &str) -> usize {
    let symbols = encoded
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b'=')
        .count();
    symbols * 3 / 4
}

/// The payload's symbols in the standard alphabet, whitespace dropped.
fn standard_symbols(encoded: &str) -> impl Iterator<Item = u8> + '_ {
    encoded
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|b| match b {
            b'-' => b'+',
            b'_' => b'/',
            other => other,
        })
}

fn check_size(encoded: &str) -> Result<usize, ResumeDecodeError> {
    let size = decoded_len(encoded);
    if size > MAX_RESUME_BYTES {
        return Err(ResumeDecodeError::TooLarge(size));
    }
    Ok(size)
}

/// Decodes a base64 payload, refusing anything over `MAX_RESUME_BYTES`
/// before allocating for it.
pub fn decode_resume(encoded: &str) -> Result<Vec<u8>, ResumeDecodeError> {
    check_size(encoded)?;

    let compact: Vec<u8> = standard_symbols(encoded).collect();
    LENIENT_BASE64
        .decode(compact)
        .map_err(|_| ResumeDecodeError::Malformed)
}

/// Checks that a payload would decode, using a fixed buffer instead of
/// holding the whole file. Returns the decoded size.
///
/// Accepts exactly what `decode_resume` accepts.
pub fn check_resume_encoding(encoded: &str) -> Result<usize, ResumeDecodeError> {
    check_size(encoded)?;

    let mut symbols = standard_symbols(encoded).peekable();
    let mut chunk = Vec::with_capacity(CHECK_CHUNK_SYMBOLS);
    let mut out = [0u8; CHECK_CHUNK_SYMBOLS / 4 * 3];
    let mut decoded = 0;

    loop {
        chunk.clear();
        chunk.extend(symbols.by_ref().take(CHECK_CHUNK_SYMBOLS));
        let last = symbols.peek().is_none();

        // Padding may only close the payload
        if !last && chunk.contains(&b'=') {
            return Err(ResumeDecodeError::Malformed);
        }

        decoded += LENIENT_BASE64
            .decode_slice(&chunk, &mut out)
            .map_err(|_| ResumeDecodeError::Malformed)?;

        if last {
            return Ok(decoded);
        }
    }
}

pub fn is_allowed_resume_type(mime_type: Option<&str>) -> bool {
    mime_type.is_some_and(|t| ALLOWED_RESUME_TYPES.contains(&t))
}

/// Appends every problem with the résumé to `errors`.
pub fn validate_resume(resume: Option<&ResumeUpload>, errors: &mut Vec<String>) {
    let Some((resume, data)) = resume.and_then(|r| {
        r.data
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| (r, d))
    }) else {
        errors.push(MSG_RESUME_REQUIRED.to_string());
        return;
    };

    match check_resume_encoding(data) {
        Ok(_) => {}
        Err(ResumeDecodeError::TooLarge(_)) => errors.push(MSG_RESUME_TOO_LARGE.to_string()),
        Err(ResumeDecodeError::Malformed) => errors.push(MSG_RESUME_UNDECODABLE.to_string()),
    }

    if !is_allowed_resume_type(resume.mime_type.as_deref()) {
        errors.push(MSG_RESUME_TYPE.to_string());
    }
}
