/// Canonicalize free text for comparison: drop numeric characters, collapse
/// whitespace runs into single spaces, trim the ends, and lower-case.
///
/// The same function must run over the job description and every resume, or
/// their term vectors stop being comparable. Pure and idempotent.
///
/// Numeric stripping covers every char for which [`char::is_numeric`] holds,
/// so non-ASCII digits and numeric letters are removed as well.
///
/// # Examples
///
/// ```
/// use cvrank::normalize::normalize;
///
/// assert_eq!(
///     normalize("  Senior   Developer,\t10 years "),
///     "senior developer, years"
/// );
/// ```
pub fn normalize(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !c.is_numeric()).collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
