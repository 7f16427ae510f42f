//! Collapsing repeated section headings.

/// Heading every per-chunk summary carries.
pub const DETAILS_HEADING: &str = "## Details";

/// Keep the first occurrence of `heading` and strip every later one.
///
/// Text around the removed headings is kept in its original order. Any
/// occurrence counts, including one embedded in prose.
pub fn dedupe_heading(text: &str, heading: &str) -> String {
    if heading.is_empty() {
        return text.to_string();
    }

    let Some(first) = text.find(heading) else {
        return text.to_string();
    };

    let split = first + heading.len();
    let mut remaining = text[split..].to_string();

    // Search again from the start after every removal: dropping a heading
    // can splice its neighbors into a new one ("## De" + "tails").
    while let Some(pos) = remaining.find(heading) {
        remaining.replace_range(pos..pos + heading.len(), "");
    }

    let mut out = String::with_capacity(split + remaining.len());
    out.push_str(&text[..split]);
    out.push_str(&remaining);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_heading_is_noop() {
        let text = "## Overview\nNothing detailed here.";
        assert_eq!(dedupe_heading(text, DETAILS_HEADING), text);
    }

    #[test]
    fn test_single_heading_unchanged() {
        let text = "## Overview\nA.\n## Details\n- one\n- two";
        assert_eq!(dedupe_heading(text, DETAILS_HEADING), text);
    }

    #[test]
    fn test_later_headings_removed_content_kept() {
        let text = "intro ## Details\n- a\nmid1 ## Details\n- b\nmid2 ## Details\n- c";
        let out = dedupe_heading(text, DETAILS_HEADING);

        assert_eq!(out, "intro ## Details\n- a\nmid1 \n- b\nmid2 \n- c");
        assert_eq!(out.matches(DETAILS_HEADING).count(), 1);
    }

    #[test]
    fn test_combined_chunk_summaries() {
        let combined = [
            "## Overview\nPart one.\n## Details\n- budget approved",
            "## Overview\nPart two.\n## Details\n- hiring resumes",
        ]
        .join(" ");

        let out = dedupe_heading(&combined, DETAILS_HEADING);

        assert_eq!(out.matches(DETAILS_HEADING).count(), 1);
        assert_eq!(out.matches("## Overview").count(), 2);
        let budget = out.find("- budget approved").unwrap();
        let hiring = out.find("- hiring resumes").unwrap();
        assert!(budget < hiring);
    }

    #[test]
    fn test_idempotent() {
        let text = "a ## Details b ## Details c ## Details## Details d";
        let once = dedupe_heading(text, DETAILS_HEADING);
        let twice = dedupe_heading(&once, DETAILS_HEADING);
        assert_eq!(once, twice);
        assert_eq!(once.matches(DETAILS_HEADING).count(), 1);
    }

    #[test]
    fn test_spliced_heading_is_also_removed() {
        let text = "x ## Details y ## De## Detailstails z";
        let out = dedupe_heading(text, DETAILS_HEADING);
        assert_eq!(out.matches(DETAILS_HEADING).count(), 1);
        assert_eq!(out, "x ## Details y  z");
    }

    #[test]
    fn test_heading_inside_prose_is_stripped() {
        // Known edge: a later mention in prose is treated as a heading.
        let text = "## Details\n- The \"## Details\" section lists items";
        let out = dedupe_heading(text, DETAILS_HEADING);
        assert_eq!(out, "## Details\n- The \"\" section lists items");
    }
}
