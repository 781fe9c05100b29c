use crate::constants::{FILENAME_REPLACEMENT, RESERVED_FILENAME_CHARS};

/// Replace every character that is not allowed in a file name with `-`
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if RESERVED_FILENAME_CHARS.contains(&c) {
                FILENAME_REPLACEMENT
            } else {
                c
            }
        })
        .collect()
}
