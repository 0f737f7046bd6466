use ragserve::application::ports::TextSplitter;
use ragserve::domain::{ChunkingOptions, ChunkingStrategy};
use ragserve::infrastructure::text_processing::{
    FixedSizeSplitter, ParagraphSplitter, SentenceSplitter, TextSplitterFactory, chunk_text,
};

const DEFAULT_SIZE: usize = 1000;
const DEFAULT_OVERLAP: usize = 100;

fn options(strategy: ChunkingStrategy, max: usize, overlap: usize) -> ChunkingOptions {
    ChunkingOptions::new(strategy, max, overlap)
}

#[test]
fn given_two_short_paragraphs_when_chunking_by_paragraph_then_returns_each_paragraph() {
    let chunks = chunk_text(
        "Para one.\n\nPara two.",
        &options(ChunkingStrategy::Paragraph, DEFAULT_SIZE, DEFAULT_OVERLAP),
    );

    assert_eq!(chunks, vec!["Para one.", "Para two."]);
}

#[test]
fn given_padded_paragraphs_and_blank_runs_when_chunking_by_paragraph_then_trims_and_drops_empties() {
    let splitter = ParagraphSplitter::new(DEFAULT_SIZE, DEFAULT_OVERLAP);

    let chunks = splitter.split("  A  \n\n\n\n B \n\n");

    assert_eq!(chunks, vec!["A", "B"]);
}

#[test]
fn given_oversized_paragraph_when_chunking_by_paragraph_then_combines_and_cuts_with_window() {
    let splitter = ParagraphSplitter::new(12, 0);

    let chunks = splitter.split("aaaa bbbb\n\ncccc dddd eeee ffff gggg");

    assert_eq!(chunks, vec!["aaaa bbbb", "cccc dddd ee", "ee ffff gggg"]);
}

#[test]
fn given_four_sentences_when_chunking_by_sentence_then_packs_up_to_limit() {
    let splitter = SentenceSplitter::new(40, 0);

    let chunks =
        splitter.split("First sentence. Second sentence! Third sentence? Fourth sentence.");

    assert_eq!(
        chunks,
        vec![
            "First sentence. Second sentence!",
            "Third sentence? Fourth sentence."
        ]
    );
}

#[test]
fn given_sentence_overlap_when_chunking_then_next_chunk_starts_with_previous_tail() {
    let splitter = SentenceSplitter::new(40, 10);

    let chunks =
        splitter.split("First sentence. Second sentence! Third sentence? Fourth sentence.");

    assert_eq!(
        chunks,
        vec![
            "First sentence. Second sentence!",
            "sentence! Third sentence?",
            "Fourth sentence."
        ]
    );
}

#[test]
fn given_single_short_sentence_when_chunking_by_sentence_then_returns_it_trimmed() {
    let splitter = SentenceSplitter::new(DEFAULT_SIZE, DEFAULT_OVERLAP);

    let chunks = splitter.split("  Just one sentence here.  ");

    assert_eq!(chunks, vec!["Just one sentence here."]);
}

#[test]
fn given_ten_chars_when_chunking_fixed_size_with_overlap_then_advances_by_stride() {
    let chunks = chunk_text(
        "abcdefghij",
        &options(ChunkingStrategy::FixedSize, 4, 1),
    );

    assert_eq!(chunks, vec!["abcd", "defg", "ghij"]);
}

#[test]
fn given_overlap_when_chunking_fixed_size_then_consecutive_chunks_share_overlap_chars() {
    let overlap = 3;
    let splitter = FixedSizeSplitter::new(8, overlap);

    let chunks = splitter.split("abcdefghijklmnopqrst");

    assert_eq!(chunks, vec!["abcdefgh", "fghijklm", "klmnopqr", "pqrst"]);
    for pair in chunks.windows(2) {
        let tail: String = pair[0].chars().skip(pair[0].chars().count() - overlap).collect();
        assert!(pair[1].starts_with(&tail));
    }
}

#[test]
fn given_tiny_final_window_when_chunking_fixed_size_then_merges_into_previous_chunk() {
    let splitter = FixedSizeSplitter::new(8, 0);

    let chunks = splitter.split("abcdefghijklmnopq");

    assert_eq!(chunks, vec!["abcdefgh", "ijklmnop q"]);
}

#[test]
fn given_text_within_limit_when_chunking_fixed_size_then_returns_single_trimmed_chunk() {
    let splitter = FixedSizeSplitter::new(100, 10);

    let chunks = splitter.split("  short text  ");

    assert_eq!(chunks, vec!["short text"]);
}

#[test]
fn given_overlap_not_smaller_than_size_when_chunking_fixed_size_then_still_terminates() {
    let splitter = FixedSizeSplitter::new(4, 4);

    let chunks = splitter.split("abcdefghij");

    assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
}

#[test]
fn given_multibyte_text_when_chunking_fixed_size_then_counts_characters() {
    let splitter = FixedSizeSplitter::new(2, 0);

    let chunks = splitter.split("ééééé");

    assert_eq!(chunks, vec!["éé", "éé", "é"]);
}

#[test]
fn given_empty_or_blank_text_when_chunking_with_any_strategy_then_returns_no_chunks() {
    for strategy in [
        ChunkingStrategy::Paragraph,
        ChunkingStrategy::Sentence,
        ChunkingStrategy::FixedSize,
    ] {
        let opts = options(strategy, DEFAULT_SIZE, DEFAULT_OVERLAP);
        assert!(chunk_text("", &opts).is_empty(), "{strategy} on empty");
        assert!(chunk_text(" \n\n \t ", &opts).is_empty(), "{strategy} on blank");
    }
}

#[test]
fn given_unknown_strategy_name_when_chunking_then_falls_back_to_paragraph() {
    let strategy = ChunkingStrategy::from("semantic-magic");

    let chunks = chunk_text(
        "Para one.\n\nPara two.",
        &options(strategy, DEFAULT_SIZE, DEFAULT_OVERLAP),
    );

    assert_eq!(strategy, ChunkingStrategy::Paragraph);
    assert_eq!(chunks, vec!["Para one.", "Para two."]);
}

#[test]
fn given_long_prose_when_chunking_with_each_strategy_then_chunks_are_non_blank_and_bounded() {
    let paragraph = "Rust guarantees memory safety without a garbage collector. \
                     Ownership rules are checked at compile time. Borrowing lets code \
                     share data without copying it.";
    let text = vec![paragraph; 6].join("\n\n");
    let max = 120;

    for strategy in [
        ChunkingStrategy::Paragraph,
        ChunkingStrategy::Sentence,
        ChunkingStrategy::FixedSize,
    ] {
        let splitter = TextSplitterFactory::create(&options(strategy, max, 20));

        let chunks = splitter.split(&text);

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(!chunk.trim().is_empty());
            // Fixed-size tails may absorb up to a quarter window plus a separator.
            assert!(chunk.chars().count() <= max + max / 4 + 1, "{strategy}: {chunk}");
        }
    }
}

#[test]
fn given_same_input_when_chunking_twice_then_output_is_identical() {
    let opts = options(ChunkingStrategy::Sentence, 30, 8);
    let text = "One small step. Another small step. A giant leap for all. Done now.";

    assert_eq!(chunk_text(text, &opts), chunk_text(text, &opts));
}
