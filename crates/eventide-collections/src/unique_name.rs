/// Returns `base` if `exists(base)` is false, otherwise the first of `base2`,
/// `base3`, ... that is free.
///
/// This is how callers keep [`NamedElementList`](crate::NamedElementList)
/// names unique, since the list itself does not.
pub fn unique_name(base: &str, exists: impl Fn(&str) -> bool) -> String {
    if !exists(base) {
        return base.to_string();
    }
    let mut suffix = 2usize;
    loop {
        let candidate = format!("{base}{suffix}");
        if !exists(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
