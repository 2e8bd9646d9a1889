//! Registration-time regex safety checks for logtrawl.
//!
//! Provides protection against ReDoS (catastrophic backtracking) by
//! rejecting pathological pattern shapes before they ever reach
//! [`crate::search::Pattern::new`]'s compiled form. Performance exclusions
//! (binary files, huge archives) are the caller's concern; this module only
//! guards against patterns whose regex *engine cost* is unbounded.

/// Maximum accepted pattern source length, in bytes.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Maximum accepted group nesting depth.
pub const MAX_NESTING_DEPTH: usize = 5;

/// Validates a regex pattern for potential ReDoS vulnerabilities.
///
/// Checks for:
/// 1. Pattern length limits
/// 2. Excessive nesting depth
/// 3. Known dangerous patterns (e.g., `(a+)+`, `(.*)*`)
///
/// # Example
///
/// ```
/// use logtrawl::security::validate_regex_pattern;
///
/// assert!(validate_regex_pattern("fn\\s+\\w+").is_ok());
/// assert!(validate_regex_pattern("hello.*world").is_ok());
/// assert!(validate_regex_pattern("(a+)+$").is_err());
/// assert!(validate_regex_pattern("(.*)*").is_err());
/// ```
pub fn validate_regex_pattern(pattern: &str) -> Result<(), &'static str> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err("pattern exceeds maximum length");
    }

    if count_nesting_depth(pattern) > MAX_NESTING_DEPTH {
        return Err("excessive nesting depth");
    }

    if has_dangerous_quantifier_nesting(pattern) {
        return Err("nested quantifiers can cause exponential backtracking");
    }

    Ok(())
}

/// Counts the maximum nesting depth of groups in a pattern.
fn count_nesting_depth(pattern: &str) -> usize {
    let mut max_depth: usize = 0;
    let mut current_depth: usize = 0;
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '(' => {
                current_depth += 1;
                max_depth = max_depth.max(current_depth);
            }
            ')' => {
                current_depth = current_depth.saturating_sub(1);
            }
            '[' => {
                while let Some(c) = chars.next() {
                    if c == '\\' {
                        chars.next();
                    } else if c == ']' {
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    max_depth
}

/// Detects dangerous patterns with nested quantifiers.
///
/// Patterns like `(a+)+`, `(.*)*`, `(a*)*` can cause exponential
/// backtracking (ReDoS).
fn has_dangerous_quantifier_nesting(pattern: &str) -> bool {
    let dangerous_patterns = [
        r"(\w+)+",
        r"(.*)+",
        r"(.+)+",
        r"(\d+)+",
        r"(\s+)+",
        r"([^x]+)+",
        r"(\w*)*",
        r"(.*)*",
        r"(.+)*",
        r"(\d*)*",
        r"(\s*)*",
        r"(a|a)+",
        r"(a|aa)+",
        r"(.*|.*)+",
    ];

    let pattern_lower = pattern.to_lowercase();

    for dangerous in dangerous_patterns {
        if pattern_lower.contains(&dangerous.to_lowercase()) {
            return true;
        }
    }

    // Heuristic: a quantifier immediately after a group that itself
    // contains a quantifier, e.g. (x+)+ or (x*)+.
    if let Ok(re) = regex::Regex::new(r"\([^)]*[+*][^)]*\)[+*?]") {
        if re.is_match(pattern) {
            return true;
        }
    }

    false
}
