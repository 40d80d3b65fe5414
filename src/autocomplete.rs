use crate::context::SessionState;
use crate::vfs::normalize;

/// Tab completion.
///
/// The first word completes against command names; any later word
/// completes against filesystem entries relative to the current directory.
/// One match is returned whole, several collapse to their longest common
/// prefix, none leaves the input alone.
pub fn complete(session: &SessionState, input: &str) -> String {
    // byte offset just past the last whitespace char, which may be multi-byte
    let token_start = input
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8());
    match token_start {
        None => {
            let names = session.commands().get_command_names();
            let matches: Vec<&str> = names
                .iter()
                .map(String::as_str)
                .filter(|name| name.starts_with(input))
                .collect();
            resolve(input, &matches)
        }
        Some(start) if input[..start].trim().is_empty() => input.to_string(),
        Some(start) => {
            let (head, token) = input.split_at(start);
            let candidates = path_candidates(session, token);
            let matches: Vec<&str> = candidates.iter().map(String::as_str).collect();
            format!("{}{}", head, resolve(token, &matches))
        }
    }
}

fn resolve(typed: &str, matches: &[&str]) -> String {
    match matches {
        [] => typed.to_string(),
        [only] => only.to_string(),
        many => longest_common_prefix(many),
    }
}

// entries of the token's directory part whose names extend its last segment
fn path_candidates(session: &SessionState, token: &str) -> Vec<String> {
    let (dir_part, prefix) = match token.rfind('/') {
        Some(idx) => token.split_at(idx + 1),
        None => ("", token),
    };
    let dir = normalize(session.cwd(), if dir_part.is_empty() { "." } else { dir_part });
    session
        .vfs()
        .list(&dir)
        .unwrap_or_default()
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .map(|name| format!("{}{}", dir_part, name))
        .collect()
}

pub fn longest_common_prefix(words: &[&str]) -> String {
    let Some((first, rest)) = words.split_first() else {
        return String::new();
    };
    let mut end = first.len();
    for word in rest {
        end = first
            .char_indices()
            .zip(word.chars())
            .take_while(|((_, a), b)| a == b)
            .map(|((i, a), _)| i + a.len_utf8())
            .last()
            .unwrap_or(0)
            .min(end);
    }
    first[..end].to_string()
}
