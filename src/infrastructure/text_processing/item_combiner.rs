use super::fixed_size_splitter::split_fixed_size;

/// Minimum word count a closed chunk needs before any of it is carried into the next one.
const MIN_WORDS_FOR_OVERLAP: usize = 4;

/// Greedily packs pre-split items (paragraphs or sentences) into chunks of at most
/// `max_size` characters, seeding each new chunk with a word-aligned tail of the last one.
/// Items that alone exceed `max_size` are cut with the fixed-size window.
pub(crate) fn combine_into_chunks(items: &[String], max_size: usize, overlap: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for item in items {
        if !current.is_empty() && char_len(&current) + 1 + char_len(item) > max_size {
            push_trimmed(&mut chunks, &current);

            current = match overlap_tail(&current, overlap) {
                Some(tail) => format!("{} {}", tail, item),
                None => item.clone(),
            };
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(item);
        }

        if char_len(&current) > max_size {
            let mut pieces = split_fixed_size(&current, max_size, overlap);
            current = pieces.pop().unwrap_or_default();
            chunks.extend(pieces);
        }
    }

    push_trimmed(&mut chunks, &current);
    chunks
}

/// Trailing words of `closed` whose lengths (plus one separator each) first reach `overlap`.
fn overlap_tail(closed: &str, overlap: usize) -> Option<String> {
    if overlap == 0 || char_len(closed) <= overlap {
        return None;
    }

    let words: Vec<&str> = closed.split_whitespace().collect();
    if words.len() < MIN_WORDS_FOR_OVERLAP {
        return None;
    }

    let mut total = 0;
    let mut start = words.len();
    for (idx, word) in words.iter().enumerate().rev() {
        total += char_len(word) + 1;
        if total >= overlap {
            start = idx;
            break;
        }
    }

    if start == words.len() {
        return None;
    }

    Some(words[start..].join(" "))
}

fn push_trimmed(chunks: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn overlap_tail_takes_words_until_length_reached() {
        let tail = overlap_tail("one two three four five six", 8);
        assert_eq!(tail.as_deref(), Some("five six"));
    }

    #[test]
    fn overlap_tail_requires_more_than_three_words() {
        assert_eq!(overlap_tail("alpha beta gamma", 2), None);
    }

    #[test]
    fn overlap_tail_disabled_when_overlap_is_zero() {
        assert_eq!(overlap_tail("one two three four five", 0), None);
    }

    #[test]
    fn combine_packs_items_until_limit() {
        let chunks = combine_into_chunks(&items(&["aaaa", "bbbb", "cccc"]), 9, 0);
        assert_eq!(chunks, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn combine_seeds_next_chunk_with_overlap() {
        let chunks = combine_into_chunks(&items(&["one two three four", "five six"]), 20, 5);
        assert_eq!(chunks, vec!["one two three four", "four five six"]);
    }

    #[test]
    fn combine_cuts_oversized_item_with_fixed_window() {
        let chunks = combine_into_chunks(&items(&["abcdefghijkl"]), 5, 0);
        assert_eq!(chunks, vec!["abcde", "fghij", "kl"]);
    }
}
