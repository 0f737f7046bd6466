use crate::application::ports::TextSplitter;

use super::item_combiner::combine_into_chunks;

pub struct SentenceSplitter {
    max_chunk_size: usize,
    chunk_overlap: usize,
}

impl SentenceSplitter {
    pub fn new(max_chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            max_chunk_size,
            chunk_overlap,
        }
    }
}

impl TextSplitter for SentenceSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let sentences: Vec<String> = split_into_sentences(text)
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        if sentences.is_empty() {
            return sentences;
        }

        combine_into_chunks(&sentences, self.max_chunk_size, self.chunk_overlap)
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Splits on `.`, `!` and `?`. A terminator followed by whitespace and an uppercase letter
/// always ends a sentence; a period followed by whitespace ends one unless the abbreviation
/// flag is set. A letter directly followed by a period sets the flag (`e.g.`, `Dr.`); it stays
/// set until the next whitespace, so `"It rains. then"` is kept as one sentence.
fn split_into_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut in_abbreviation = false;

    for (idx, &c) in chars.iter().enumerate() {
        current.push(c);

        if is_terminator(c) {
            match chars.get(idx + 1) {
                Some(next) if next.is_whitespace() => {
                    let followed_by_capital = chars
                        .get(idx + 2)
                        .is_some_and(|after| after.is_uppercase());

                    if followed_by_capital {
                        sentences.push(std::mem::take(&mut current));
                        in_abbreviation = false;
                        continue;
                    }

                    if c == '.' && !in_abbreviation {
                        sentences.push(std::mem::take(&mut current));
                        continue;
                    }
                }
                Some(_) => {}
                None => {
                    sentences.push(std::mem::take(&mut current));
                    break;
                }
            }
        }

        if c.is_alphabetic() && chars.get(idx + 1) == Some(&'.') {
            in_abbreviation = true;
        } else if c.is_whitespace() {
            in_abbreviation = false;
        }
    }

    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::split_into_sentences;

    #[test]
    fn splits_on_terminator_before_capital() {
        let sentences = split_into_sentences("It rains. The end! Why? Because.");
        assert_eq!(
            sentences,
            vec!["It rains.", " The end!", " Why?", " Because."]
        );
    }

    #[test]
    fn keeps_abbreviation_before_lowercase_word() {
        let sentences = split_into_sentences("Use e.g. this one. Then stop.");
        assert_eq!(sentences, vec!["Use e.g. this one.", " Then stop."]);
    }

    #[test]
    fn keeps_any_word_ending_period_before_lowercase_word() {
        let sentences = split_into_sentences("It rains. then more");
        assert_eq!(sentences, vec!["It rains. then more"]);
    }

    #[test]
    fn splits_period_after_non_letter_before_lowercase() {
        let sentences = split_into_sentences("Version 2. next part");
        assert_eq!(sentences, vec!["Version 2.", " next part"]);
    }

    #[test]
    fn keeps_text_without_terminator_as_one_sentence() {
        let sentences = split_into_sentences("no punctuation here");
        assert_eq!(sentences, vec!["no punctuation here"]);
    }
}
