//! Ordinal placeholder substitution.
//!
//! Message text carries positional tokens `%1`, `%2`, … that are replaced by
//! caller-supplied argument strings at lookup time. The token number selects
//! the argument (`%1` → `args[0]`), so a translation is free to reorder
//! arguments relative to the source sentence.
//!
//! # Invariants
//!
//! 1. **Single pass**: the template is scanned left to right exactly once.
//!    Substituted argument text is never rescanned, so an argument that
//!    itself contains `%1` comes through verbatim.
//!
//! 2. **Total**: no input panics or errors. A token without a matching
//!    argument stays in the output verbatim; a `%` that does not form a
//!    token passes through unchanged.

/// Replace `%N` tokens in `template` with `args[N - 1]`.
///
/// Tokens whose ordinal exceeds `args.len()` are left verbatim rather than
/// failing; a catalog/call-site mismatch must never take down the UI.
///
/// # Example
///
/// ```
/// use soi_i18n::format::format;
///
/// assert_eq!(format("Units Produced: %1 / %2", &["3", "5"]), "Units Produced: 3 / 5");
/// assert_eq!(format("Kills: %1", &[]), "Kills: %1");
/// assert_eq!(format("100% done", &["x"]), "100% done");
/// ```
#[must_use]
pub fn format(template: &str, args: &[&str]) -> String {
    substitute(template, args).text
}

/// Result of a substitution pass, with the count of recognized tokens that
/// had no matching argument. The resolver feeds the count into its
/// diagnostic counters; `format` discards it.
pub(crate) struct Substitution {
    pub text: String,
    pub unsubstituted: u64,
}

pub(crate) fn substitute(template: &str, args: &[&str]) -> Substitution {
    let mut out = String::with_capacity(template.len());
    let mut unsubstituted = 0u64;
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let digits = after
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            // Stray percent sign, not a token.
            out.push('%');
            rest = after;
            continue;
        }
        let (number, tail) = after.split_at(digits);
        match number.parse::<usize>() {
            Ok(n) if n >= 1 => match args.get(n - 1) {
                Some(arg) => out.push_str(arg),
                None => {
                    unsubstituted += 1;
                    out.push('%');
                    out.push_str(number);
                }
            },
            // %0, or a digit run too long for usize: not a token.
            _ => {
                out.push('%');
                out.push_str(number);
            }
        }
        rest = tail;
    }
    out.push_str(rest);

    Substitution { text: out, unsubstituted }
}

/// Distinct ordinals referenced by `text`, sorted ascending.
///
/// Used by the lint pass to compare the placeholders of a source string
/// against its translation.
#[must_use]
pub fn ordinals(text: &str) -> Vec<u32> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find('%') {
        let after = &rest[pos + 1..];
        let digits = after
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            rest = after;
            continue;
        }
        let (number, tail) = after.split_at(digits);
        if let Ok(n) = number.parse::<u32>() {
            if n >= 1 {
                found.push(n);
            }
        }
        rest = tail;
    }
    found.sort_unstable();
    found.dedup();
    found
}
