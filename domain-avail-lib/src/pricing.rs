//! Flat minimum registration price estimates.

/// Display price for registering `domain`, or empty when there is no estimate.
///
/// Only available domains get a price.
pub fn minimum_cost(domain: &str, is_available: bool) -> &'static str {
    if !is_available {
        return "";
    }

    if domain.ends_with(".ai") {
        "$200"
    } else if domain.ends_with(".com") {
        "$10"
    } else if domain.ends_with(".io") {
        "$50"
    } else {
        ""
    }
}

/// Numeric value of a display price such as "$50".
pub fn price_value(cost: &str) -> Option<u32> {
    cost.replace('$', "").trim().parse().ok()
}
