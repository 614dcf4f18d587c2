//! Cleanup of raw model output

const FENCE: &str = "```";

/// Remove one leading markdown fence opener (with or without a
/// language tag) and one trailing bare closer.
///
/// Surrounding whitespace is trimmed before and after. Text without
/// fences only loses that whitespace.
pub fn strip_code_fences(raw: &str) -> String
{   let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE)
    {   // The opener runs to the end of its line: "```", "```html", ...
        text = match rest.find('\n')
        {   Some(end) if is_language_tag(&rest[..end]) => {
              &rest[end + 1..]
            }
          , None if is_language_tag(rest) => ""
          , _ => strip_inline_html_tag(rest)
        };
    }

    // Idempotent only with at most one fence on each side.
    if let Some(rest) = text.strip_suffix(FENCE)
    {   text = rest;
    }

    text.trim().to_string()
}

/// "```html<!DOCTYPE ..." with the document on the opener's line
fn strip_inline_html_tag(rest: &str) -> &str
{   match rest.get(..4)
    {   Some(tag)
          if tag.eq_ignore_ascii_case("html")
            && rest[4..].starts_with('<') => &rest[4..]
      , _ => rest
    }
}

fn is_language_tag(tag: &str) -> bool
{   tag.trim()
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '+')
}
