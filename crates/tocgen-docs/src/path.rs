//! Relative path helpers.
//!
//! Every path handled by tocgen is relative to the tree root, uses `/` as
//! separator, and has no leading or trailing slash. The root directory is
//! the empty string. Parent lookup is plain truncation at the last `/`, so
//! tree walks never touch the filesystem.

/// Directory containing `path` (`""` for top-level entries).
///
/// `"guides/setup.md"` → `"guides"`, `"setup.md"` → `""`.
#[must_use]
pub fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(parent, _)| parent)
}

/// Last segment of `path`.
#[must_use]
pub fn file_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// Join a directory and a relative name.
#[must_use]
pub fn join(dir: &str, name: &str) -> String {
    let name = name.trim_matches('/');
    match (dir.is_empty(), name.is_empty()) {
        (true, _) => name.to_owned(),
        (false, true) => dir.to_owned(),
        (false, false) => format!("{dir}/{name}"),
    }
}

/// Number of segments in a directory path (root is 0).
#[must_use]
pub fn depth(dir: &str) -> usize {
    if dir.is_empty() {
        0
    } else {
        dir.matches('/').count() + 1
    }
}

/// Build ancestor chain for a directory path.
///
/// Returns ancestors from root to the path itself.
/// E.g., `"domain/billing/api"` → `["", "domain", "domain/billing", "domain/billing/api"]`
#[must_use]
pub fn ancestor_chain(dir: &str) -> Vec<String> {
    let mut ancestors = vec![String::new()];

    if !dir.is_empty() {
        let mut current = String::new();
        for part in dir.split('/') {
            current = join(&current, part);
            ancestors.push(current.clone());
        }
    }

    ancestors
}

/// Move a directory up by `levels` segments, stopping at the root.
#[must_use]
pub fn move_up(dir: &str, levels: usize) -> &str {
    let mut current = dir;
    for _ in 0..levels {
        if current.is_empty() {
            break;
        }
        current = parent_dir(current);
    }
    current
}

/// Path of `path` relative to `ancestor`, if `path` lies inside it.
///
/// Returns `Some("")` when both are equal.
#[must_use]
pub fn strip_dir<'a>(path: &'a str, ancestor: &str) -> Option<&'a str> {
    if ancestor.is_empty() {
        return Some(path);
    }
    let rest = path.strip_prefix(ancestor)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix('/')
    }
}

/// Resolve `.` and `..` segments and strip redundant slashes.
///
/// Returns `None` if the path escapes the root.
#[must_use]
pub fn normalize(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}

/// Link from a document located in `from_dir` to the root-relative `target`.
///
/// `relative_link("a/b", "a/c/x.md")` → `"../c/x.md"`.
#[must_use]
pub fn relative_link(from_dir: &str, target: &str) -> String {
    let from: Vec<&str> = from_dir.split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = target.split('/').filter(|s| !s.is_empty()).collect();

    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = std::iter::repeat_n("..", from.len() - common).collect();
    parts.extend(&to[common..]);
    parts.join("/")
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
///
/// Replaces `-` and `_` with spaces, then capitalizes the first letter of each word.
///
/// # Examples
///
/// ```
/// use tocgen_docs::path::titlecase_from_slug;
///
/// assert_eq!(titlecase_from_slug("setup-guide"), "Setup Guide");
/// assert_eq!(titlecase_from_slug("my_page"), "My Page");
/// ```
#[must_use]
pub fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        capitalize_first_into(word, &mut result);
    }
    result
}

/// Capitalize the first character of a word, appending to `buf`.
fn capitalize_first_into(word: &str, buf: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        buf.extend(first.to_uppercase());
        buf.push_str(chars.as_str());
    }
}
