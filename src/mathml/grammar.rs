//! Element and attribute tables for MathML 2.0 content markup.

/// Returns `true` when `name` is a MathML 2.0 content-markup element.
pub(super) fn is_mathml_element(name: &str) -> bool {
    matches!(
        name,
        // Structure
        "math" | "semantics" | "annotation" | "annotation-xml"
        // Token elements
        | "cn" | "ci" | "csymbol" | "sep"
        // Constructors and qualifiers
        | "apply" | "interval" | "inverse" | "condition" | "declare" | "lambda"
        | "compose" | "ident" | "domain" | "codomain" | "image"
        | "domainofapplication" | "piecewise" | "piece" | "otherwise"
        | "lowlimit" | "uplimit" | "bvar" | "degree" | "logbase"
        | "momentabout"
        // Arithmetic, algebra, and logic
        | "quotient" | "factorial" | "divide" | "max" | "min" | "minus"
        | "plus" | "power" | "rem" | "times" | "root" | "gcd" | "lcm"
        | "and" | "or" | "xor" | "not" | "implies" | "forall" | "exists"
        | "abs" | "conjugate" | "arg" | "real" | "imaginary" | "floor"
        | "ceiling"
        // Relations
        | "eq" | "neq" | "gt" | "lt" | "geq" | "leq" | "equivalent"
        | "approx" | "factorof"
        // Calculus
        | "int" | "diff" | "partialdiff" | "divergence" | "grad" | "curl"
        | "laplacian"
        // Set theory
        | "set" | "list" | "union" | "intersect" | "in" | "notin"
        | "subset" | "prsubset" | "notsubset" | "notprsubset" | "setdiff"
        | "card" | "cartesianproduct"
        // Sequences and series
        | "sum" | "product" | "limit" | "tendsto"
        // Elementary functions
        | "exp" | "ln" | "log"
        | "sin" | "cos" | "tan" | "sec" | "csc" | "cot"
        | "sinh" | "cosh" | "tanh" | "sech" | "csch" | "coth"
        | "arcsin" | "arccos" | "arctan" | "arcsec" | "arccsc" | "arccot"
        | "arcsinh" | "arccosh" | "arctanh" | "arcsech" | "arccsch"
        | "arccoth"
        // Statistics
        | "mean" | "sdev" | "variance" | "median" | "mode" | "moment"
        // Linear algebra
        | "vector" | "matrix" | "matrixrow" | "determinant" | "transpose"
        | "selector" | "vectorproduct" | "scalarproduct" | "outerproduct"
        // Constants and symbol sets
        | "integers" | "reals" | "rationals" | "naturalnumbers" | "complexes"
        | "primes" | "exponentiale" | "imaginaryi" | "notanumber" | "true"
        | "false" | "emptyset" | "pi" | "eulergamma" | "infinity"
    )
}

/// Returns `true` when `attribute` is declared for `element`.
///
/// The common attribute set covers what the DTD declares on every content
/// element; the per-element arms add the handful of extras.
pub(super) fn is_allowed_attribute(element: &str, attribute: &str) -> bool {
    if matches!(
        attribute,
        "id" | "class" | "style" | "xref" | "other" | "definitionURL" | "encoding"
    ) {
        return true;
    }
    match element {
        "cn" => matches!(attribute, "type" | "base"),
        "ci" | "csymbol" => attribute == "type",
        "math" => matches!(attribute, "macros" | "display" | "mode" | "overflow" | "altimg" | "alttext"),
        "annotation" | "annotation-xml" => attribute == "name",
        "interval" | "tendsto" => attribute == "closure",
        "set" | "list" => attribute == "order",
        "declare" => matches!(attribute, "type" | "scope" | "nargs" | "occurrence"),
        _ => false,
    }
}
