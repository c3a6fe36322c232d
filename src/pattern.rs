//! Path pattern compiler.
//!
//! A pattern such as `/p/:lang/doc` compiles to the segments
//! `["p", ":lang", "doc"]`. Concrete request paths go through the exact same
//! tokenizer, so `/p/go/doc` becomes `["p", "go", "doc"]`.
//!
//! Segment kinds are decided by the first character only:
//!
//! | Segment   | Matches                                  |
//! |-----------|------------------------------------------|
//! | `doc`     | the identical segment                    |
//! | `:lang`   | any single segment, captured as `lang`   |
//! | `*path`   | the rest of the path, captured as `path` |

/// Splits `pattern` on `/`, dropping empty pieces.
///
/// Compilation stops right after the first segment starting with `*`:
/// anything following a wildcard is never produced.
pub(crate) fn compile(pattern: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    for item in pattern.split('/').filter(|s| !s.is_empty()) {
        parts.push(item);
        if is_catch_all(item) {
            break;
        }
    }
    parts
}

/// `:name` or `*name`.
pub(crate) fn is_wild(part: &str) -> bool {
    part.starts_with(':') || part.starts_with('*')
}

pub(crate) fn is_catch_all(part: &str) -> bool {
    part.starts_with('*')
}
