//! Unicode normalization of file names.
//!
//! macOS stores file names in NFD (decomposed) form while Windows and Linux
//! usually use NFC (composed). Two files called `café.txt` on different
//! volumes can therefore carry different bytes, and would never share a
//! by-name duplicate group unless both names are normalized first.
//!
//! ```
//! use dupereview::scanner::path_utils::{names_equal, normalize_name};
//!
//! let nfc = "café.txt";          // é is U+00E9
//! let nfd = "cafe\u{0301}.txt";  // e + combining accent
//!
//! assert_eq!(normalize_name(nfd), nfc);
//! assert!(names_equal(nfc, nfd));
//! ```

use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

/// Normalize a file name to NFC (composed) form.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    normalize_name_cow(name).into_owned()
}

/// Normalize a file name to NFC, borrowing when it already is.
#[must_use]
pub fn normalize_name_cow(name: &str) -> Cow<'_, str> {
    if unicode_normalization::is_nfc(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(name.nfc().collect())
    }
}

/// Check if two file names are equal after NFC normalization.
#[must_use]
pub fn names_equal(a: &str, b: &str) -> bool {
    normalize_name_cow(a) == normalize_name_cow(b)
}
