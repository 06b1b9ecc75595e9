//! Path shortening for fixed-width terminal output.

/// Placeholder for an elided path segment.
pub const ELLIPSIS: &str = "...";

/// Shorten `path` towards `max_len` characters by eliding segments from the
/// middle outwards. The first and last segments are always kept, so the
/// result may still be longer than `max_len`.
///
/// Segments are split on `\` if the path contains one, otherwise on `/`.
pub fn shorten_path(path: &str, max_len: usize) -> String {
    let separator = if path.contains('\\') { '\\' } else { '/' };
    shorten_path_with(path, max_len, separator)
}

/// [`shorten_path`] with an explicit separator.
pub fn shorten_path_with(path: &str, max_len: usize, separator: char) -> String {
    let mut parts: Vec<&str> = path.split(separator).collect();
    let last = parts.len() as isize - 1;
    let start = last / 2;

    let sep = separator.to_string();
    let mut output = parts.join(&sep);

    // Index walks start, start, start+1, start-1, start+2, start-2, ...
    let mut index = start;
    let mut half_steps: isize = 0;
    let mut lean: isize = 1;

    while output.chars().count() >= max_len && index > 0 && index < last {
        parts[index as usize] = ELLIPSIS;
        output = parts.join(&sep);

        half_steps += 1;
        lean = -lean;
        index = start + (half_steps / 2) * lean;
    }

    output
}
