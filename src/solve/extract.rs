//! Heuristic extraction of an arithmetic expression from free text.
//!
//! Question text arrives noisy (typed by students, produced by OCR, or
//! echoed back by a model), so this is a scanner, not a parser: it finds the
//! longest run of expression-looking characters and leaves judging the run
//! to the evaluator. It never fails on malformed input — it only returns
//! `None`.

/// Characters that may appear inside a candidate expression.
///
/// Spaces are included so that `12 + 4` survives as one run; the run is
/// trimmed before use.
fn is_expression_char(c: char) -> bool {
    c.is_ascii_digit()
        || matches!(
            c,
            '.' | '+' | '-' | '*' | '/' | '%' | '(' | ')' | '^' | '|' | '&' | '<' | '>' | ' '
        )
}

/// Extract the most plausible arithmetic expression from `text`.
///
/// Scans for maximal runs of expression characters, keeps the longest run
/// (ties broken by first occurrence), and discards it unless it contains at
/// least one digit. The caret is normalized to `**` since users write `2^10`
/// for exponentiation.
///
/// # Example
///
/// ```
/// use studyforge_llm::solve::extract_expression;
///
/// assert_eq!(extract_expression("solve 12+4*3 please"), Some("12+4*3".to_string()));
/// assert_eq!(extract_expression("no numbers here"), None);
/// ```
pub fn extract_expression(text: &str) -> Option<String> {
    let mut best: Option<&str> = None;
    let mut run_start: Option<usize> = None;

    for (idx, c) in text.char_indices() {
        if is_expression_char(c) {
            run_start.get_or_insert(idx);
        } else if let Some(start) = run_start.take() {
            let run = &text[start..idx];
            if run.len() > best.map_or(0, str::len) {
                best = Some(run);
            }
        }
    }
    if let Some(start) = run_start {
        let run = &text[start..];
        if run.len() > best.map_or(0, str::len) {
            best = Some(run);
        }
    }

    let candidate = best?.trim();
    if !candidate.contains(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(candidate.replace('^', "**"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_expression_from_prose() {
        assert_eq!(
            extract_expression("solve 12+4*3 please"),
            Some("12+4*3".to_string())
        );
    }

    #[test]
    fn no_digits_means_none() {
        assert_eq!(extract_expression("no numbers here"), None);
        assert_eq!(extract_expression("(())"), None);
        assert_eq!(extract_expression(""), None);
    }

    #[test]
    fn longest_run_wins() {
        // "2+2" (len 3) loses to "100*3-1" (len 7).
        assert_eq!(
            extract_expression("either 2+2 or maybe 100*3-1 instead"),
            Some("100*3-1".to_string())
        );
    }

    #[test]
    fn ties_break_to_first_occurrence() {
        assert_eq!(
            extract_expression("a 1+2 b 3+4 c"),
            Some("1+2".to_string())
        );
    }

    #[test]
    fn caret_normalized_to_double_star() {
        assert_eq!(
            extract_expression("what is 2^10?"),
            Some("2**10".to_string())
        );
    }

    #[test]
    fn spaced_expression_survives_as_one_run() {
        assert_eq!(
            extract_expression("compute 12 + 4 * 3 now"),
            Some("12 + 4 * 3".to_string())
        );
    }

    #[test]
    fn run_at_end_of_text_is_considered() {
        assert_eq!(extract_expression("answer: 7*6"), Some("7*6".to_string()));
    }

    #[test]
    fn unicode_text_does_not_panic() {
        assert_eq!(
            extract_expression("何ですか 3+4 です"),
            Some("3+4".to_string())
        );
    }
}
