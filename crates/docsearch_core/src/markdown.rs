use url::Url;

use crate::{ResultsView, SearchReply};

const LOADING_TEXT: &str = "Searching GitHub docs...";
const SLOW_WARNING_TEXT: &str =
    "Request is taking longer than expected. GitHub API might be under heavy load.";
const NO_RESULTS_TEXT: &str = "No results found. Try a different query.";
const STRIPPED_EXTENSIONS: &[&str] = &[".md", ".markdown", ".html", ".htm"];

/// Renders the results document shown by the interactive flow.
pub fn render_markdown(view: &ResultsView) -> String {
    let mut markdown = String::from("# Search Results\n\n");

    let reply = match &view.reply {
        Some(reply) if !view.loading => reply,
        _ => {
            markdown.push_str(LOADING_TEXT);
            if view.slow_warning {
                markdown.push_str("\n\n> ");
                markdown.push_str(SLOW_WARNING_TEXT);
            }
            return markdown;
        }
    };

    match reply {
        SearchReply::Failed { message } | SearchReply::NoResults { message } => {
            markdown.push_str("## Error\n\n");
            markdown.push_str(message);
        }
        SearchReply::Answer { answer, .. } if answer.is_empty() => {
            markdown.push_str(NO_RESULTS_TEXT);
        }
        SearchReply::Answer { answer, sources } => {
            markdown.push_str("## Answer\n\n");
            markdown.push_str(answer);
            markdown.push_str("\n\n");

            let listed = visible_sources(answer, sources);
            if !listed.is_empty() {
                markdown.push_str("## Sources\n\n");
                for url in listed {
                    markdown.push_str(&format!("- [{}]({})\n", source_title(url), url));
                }
            }
        }
    }
    markdown
}

/// Sources worth listing under an answer: those not already quoted in it.
pub fn visible_sources<'a>(answer: &str, sources: &'a [String]) -> Vec<&'a str> {
    sources
        .iter()
        .map(String::as_str)
        .filter(|url| !answer.contains(url))
        .collect()
}

/// Best-effort human title for a docs URL, derived from its last path segment.
///
/// Falls back to the URL itself when it does not parse or has no segment.
pub fn source_title(url: &str) -> String {
    derive_title(url).unwrap_or_else(|| url.to_string())
}

fn derive_title(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()?;

    let stem = STRIPPED_EXTENSIONS
        .iter()
        .find_map(|ext| strip_suffix_ignore_case(segment, ext))
        .unwrap_or(segment);

    let title = stem
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    if !value.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = value.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Text placed on the clipboard by the headless flow.
pub fn format_clipboard_answer(answer: &str, sources: &[String]) -> String {
    if sources.is_empty() {
        return answer.to_string();
    }
    let list = sources
        .iter()
        .map(|url| format!("- {url}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{answer}\n\nSources:\n{list}")
}
