//! Standard-library exclusion rules applied to every candidate target.

/// Package prefixes whose types never appear in a report.
pub const EXCLUDED_PACKAGES: [&str; 8] = [
    "java.lang",
    "java.util",
    "java.io",
    "java.math",
    "java.time",
    "java.text",
    "java.nio",
    "java.net",
];

const PRIMITIVE_TYPES: [&str; 8] = [
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

/// Whether `name` starts with one of the excluded package prefixes.
pub fn is_excluded_package(name: &str) -> bool {
    EXCLUDED_PACKAGES.iter().any(|prefix| name.starts_with(prefix))
}

pub fn is_primitive(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

/// Decide whether a dependency on `target` from `source` is suppressed.
///
/// Empty names, `void`, primitives, excluded packages and self-references
/// are all suppressed.
pub fn should_exclude(target: &str, source: &str) -> bool {
    let target = target.trim();
    target.is_empty()
        || target == "void"
        || is_primitive(target)
        || is_excluded_package(target)
        || target == source
}
