//! Reserved unit names and SI prefixes.
//!
//! CellML reserves the names of the SI base and derived units (plus a few
//! conveniences such as `dimensionless` and both `litre`/`liter` spellings).
//! User-defined units must not reuse them, and unit references may resolve
//! to them without any declaration being in scope.

/// The reserved standard unit names, in alphabetical order.
pub const STANDARD_UNIT_NAMES: [&str; 34] = [
    "ampere",
    "becquerel",
    "candela",
    "celsius",
    "coulomb",
    "dimensionless",
    "farad",
    "gram",
    "gray",
    "henry",
    "hertz",
    "joule",
    "katal",
    "kelvin",
    "kilogram",
    "liter",
    "litre",
    "lumen",
    "lux",
    "meter",
    "metre",
    "mole",
    "newton",
    "ohm",
    "pascal",
    "radian",
    "second",
    "siemens",
    "sievert",
    "steradian",
    "tesla",
    "volt",
    "watt",
    "weber",
];

/// Returns `true` when `name` is a reserved standard unit name.
pub fn is_standard_unit(name: &str) -> bool {
    STANDARD_UNIT_NAMES.binary_search(&name).is_ok()
}

/// Returns `true` when `name` is an SI prefix usable on a unit reference.
pub fn is_si_prefix(name: &str) -> bool {
    matches!(
        name,
        "yotta"
            | "zetta"
            | "exa"
            | "peta"
            | "tera"
            | "giga"
            | "mega"
            | "kilo"
            | "hecto"
            | "deca"
            | "deci"
            | "centi"
            | "milli"
            | "micro"
            | "nano"
            | "pico"
            | "femto"
            | "atto"
            | "zepto"
            | "yocto"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        // Binary search relies on the table staying alphabetical.
        let mut sorted = STANDARD_UNIT_NAMES;
        sorted.sort_unstable();
        assert_eq!(sorted, STANDARD_UNIT_NAMES);
    }

    #[test]
    fn recognizes_standard_units() {
        assert!(is_standard_unit("second"));
        assert!(is_standard_unit("ampere"));
        assert!(is_standard_unit("weber"));
        assert!(is_standard_unit("litre"));
        assert!(is_standard_unit("liter"));
    }

    #[test]
    fn rejects_non_standard_names() {
        assert!(!is_standard_unit(""));
        assert!(!is_standard_unit("Second"));
        assert!(!is_standard_unit("fortnight"));
        assert!(!is_standard_unit("metres_per_second"));
    }

    #[test]
    fn recognizes_si_prefixes() {
        assert!(is_si_prefix("micro"));
        assert!(is_si_prefix("yotta"));
        assert!(is_si_prefix("yocto"));
        assert!(!is_si_prefix("Micro"));
        assert!(!is_si_prefix("house"));
        assert!(!is_si_prefix(""));
    }
}
