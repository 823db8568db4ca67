//! # Serialization Tags
//!
//! A field's external name comes from its serialization tag: the text
//! before the first `,` option separator. `"name,omitempty"` is addressed
//! as `name`. A tag of exactly `-`, an empty name, or no tag at all leaves
//! the field with no external name, so no document key can match it.

/// Separator between the name and the options of a tag.
const OPTION_SEPARATOR: char = ',';

/// Tag value that excludes a field from serialization.
const EXCLUDED: &str = "-";

/// The external name encoded in `tag`, or `None` if the tag makes the
/// field unaddressable.
pub fn tag_name(tag: &str) -> Option<&str> {
    if tag == EXCLUDED {
        return None;
    }
    let name = tag
        .split_once(OPTION_SEPARATOR)
        .map_or(tag, |(name, _options)| name);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
