/// Return the contents of the last parenthesized group in `location`.
///
/// A group is `(` followed by one or more characters other than `)` and a
/// closing `)`, i.e. the pattern `\(([^)]+)\)`.  Groups are matched left to
/// right without overlap, so `"A (B (C) D)"` yields `"B (C"`.  An empty
/// `()` is not a group.  The contents are returned verbatim, untrimmed.
pub fn extract_city(location: &str) -> Option<&str> {
    let mut last = None;
    let mut pos = 0;

    while let Some(open) = location[pos..].find('(').map(|i| pos + i) {
        let body_start = open + 1;
        let Some(close) = location[body_start..].find(')').map(|i| body_start + i) else {
            break;
        };
        if close == body_start {
            // "()" – retry from the next character.
            pos = body_start;
            continue;
        }
        last = Some(&location[body_start..close]);
        pos = close + 1;
    }

    last
}
