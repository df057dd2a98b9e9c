//! Object key normalization.
//!
//! Keys arrive from callers in loose form (`/folder//file.png/`); requests
//! must carry `bucket/folder/file.png`. Normalization collapses slash runs
//! first so that stripping a single leading and trailing slash is enough to
//! guarantee the result never starts or ends with `/`.

/// Collapse runs of `/` to one, then strip one leading and one trailing
/// slash. Idempotent: normalizing a normalized key is a no-op.
pub(crate) fn normalize_key(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !prev_slash {
                collapsed.push('/');
            }
            prev_slash = true;
        } else {
            collapsed.push(c);
            prev_slash = false;
        }
    }

    let stripped = collapsed.strip_prefix('/').unwrap_or(&collapsed);
    let stripped = stripped.strip_suffix('/').unwrap_or(stripped);
    stripped.to_string()
}

/// Full in-bucket object path: `{bucket}/{normalized key}`.
///
/// An empty key yields just the bucket so the result never carries a
/// trailing slash.
pub(crate) fn object_path(bucket: &str, path: &str) -> String {
    let key = normalize_key(path);
    if key.is_empty() {
        bucket.to_string()
    } else {
        format!("{bucket}/{key}")
    }
}
