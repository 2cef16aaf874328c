use booldex_core::tokenizer::tokenize;

#[test]
fn it_lowercases_and_splits_on_punctuation() {
    let toks = tokenize("Running, RUNNER's run! The café's menu.");
    for w in ["running", "runner", "s", "run", "the", "café", "menu"] {
        assert!(toks.contains(w), "missing {w}");
    }
    assert!(!toks.iter().any(|t| t.contains(|c: char| c.is_ascii_punctuation())));
}

#[test]
fn it_keeps_stopwords_and_does_not_stem() {
    let toks = tokenize("The quick brown fox and the lazy dogs");
    assert!(toks.contains("the"));
    assert!(toks.contains("and"));
    assert!(toks.contains("dogs"));
    assert!(!toks.contains("dog"));
}

#[test]
fn digits_and_underscores_are_word_characters() {
    let toks = tokenize("rfc_2616 section 14.9");
    assert!(toks.contains("rfc_2616"));
    assert!(toks.contains("14"));
    assert!(toks.contains("9"));
}
