//! Path string normalization.
//!
//! Collapses `.`/`..`/repeated separators into a canonical segment sequence
//! without touching the filesystem. Tree operations use this to compare
//! source and destination before doing any work.

/// Normalize a path string.
///
/// Splits on `/` (backslashes are converted first on Windows), then resolves
/// segments left to right with a stack: ordinary segments push, `.` is
/// dropped, `..` pops the preceding real segment or survives as a leading
/// segment when there is nothing left to consume. The result is joined with
/// `separator`, defaulting to the platform separator.
///
/// Pure and total: no I/O, no errors, and idempotent —
/// `normalize(normalize(p)) == normalize(p)`. Empty input stays empty.
pub fn normalize(path: &str, separator: Option<&str>) -> String {
    let mut input = path.to_string();
    if cfg!(windows) {
        input = input.replace('\\', "/");
    }

    // Collapse runs of separators so the split below never yields interior
    // empty segments; a leading or trailing empty segment survives and keeps
    // the root prefix / directory suffix intact.
    let mut collapsed = String::with_capacity(input.len());
    let mut prev_sep = false;
    for ch in input.chars() {
        if ch == '/' {
            if prev_sep {
                continue;
            }
            prev_sep = true;
        } else {
            prev_sep = false;
        }
        collapsed.push(ch);
    }

    let mut stack: Vec<&str> = Vec::new();
    for segment in collapsed.split('/') {
        match segment {
            "." => {}
            ".." => match stack.last() {
                // Nothing to consume: the path escapes its relative root.
                None | Some(&"..") => stack.push(".."),
                Some(_) => {
                    stack.pop();
                }
            },
            other => stack.push(other),
        }
    }

    let sep = separator.unwrap_or(if cfg!(windows) { "\\" } else { "/" });
    stack.join(sep)
}
