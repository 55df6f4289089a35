//! Short node identifiers for generated diagrams.
//!
//! An identifier is `{abbreviation}_{method}` where the abbreviation is the
//! uppercase letters of the simple class name. Identifiers are deterministic
//! but not unique: `ProductController.save` and `PriceCalculator.save` both
//! map to `PC_save`.

use crate::annotator::simple_class_name;

/// Identifier returned when the owner or the signature is missing.
pub const UNKNOWN_ID: &str = "UNKNOWN_ID";

const UNKNOWN_ABBREVIATION: &str = "UNK";
const UNKNOWN_METHOD_PART: &str = "UNKNOWN_METHOD_PART_FOR_ID";
const SIGNATURE_TERMINATORS: [char; 4] = ['(', '<', ':', '\\'];

/// Derives the diagram identifier for a method.
///
/// ```
/// use callmap_graph::make_id;
///
/// assert_eq!(make_id("com.example.ProductController", "updateStock(Long): void"), "PC_updateStock");
/// assert_eq!(make_id("product", "save()"), "P_save");
/// ```
#[must_use]
pub fn make_id(owner: &str, signature: &str) -> String {
    if owner.is_empty() || signature.is_empty() {
        return UNKNOWN_ID.to_owned();
    }

    let abbreviation = class_abbreviation(simple_class_name(owner));
    let method = method_name(signature);
    if method.is_empty() {
        return format!("{abbreviation}_{UNKNOWN_METHOD_PART}");
    }
    format!("{abbreviation}_{method}")
}

/// Abbreviates a simple class name to its ASCII uppercase letters.
///
/// Names without uppercase letters fall back to their first character,
/// uppercased; an empty name yields `UNK`.
#[must_use]
pub fn class_abbreviation(simple_name: &str) -> String {
    let capitals: String = simple_name
        .chars()
        .filter(char::is_ascii_uppercase)
        .collect();
    if !capitals.is_empty() {
        return capitals;
    }
    simple_name.chars().next().map_or_else(
        || UNKNOWN_ABBREVIATION.to_owned(),
        |first| first.to_uppercase().collect(),
    )
}

/// Returns the method name portion of a signature: everything before the
/// first `(`, `<`, `:` or `\`, trimmed.
#[must_use]
pub fn method_name(signature: &str) -> &str {
    signature
        .split(SIGNATURE_TERMINATORS)
        .next()
        .map_or("", str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("com.example.ProductController", "updateStock(Long): void", "PC_updateStock")]
    #[case("Product", "getName()", "P_getName")]
    #[case("", "x()", "UNKNOWN_ID")]
    #[case("Product", "", "UNKNOWN_ID")]
    #[case("product", "save()", "P_save")]
    #[case("com.example.", "save()", "UNK_save")]
    #[case("com.example.OrderService", "find<T>(Class<T>)", "OS_find")]
    #[case("com.example.OrderService", " total : int", "OS_total")]
    #[case("com.example.OrderService", "(anonymous)", "OS_UNKNOWN_METHOD_PART_FOR_ID")]
    #[case("com.example.HTTPClient", "send\\n", "HTTPC_send")]
    fn make_id_is_deterministic(
        #[case] owner: &str,
        #[case] signature: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(make_id(owner, signature), expected);
    }

    #[test]
    fn distinct_classes_can_share_an_identifier() {
        assert_eq!(
            make_id("a.ProductController", "save()"),
            make_id("b.PriceCalculator", "save()")
        );
    }
}
