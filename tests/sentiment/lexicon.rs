use headline_sentiment::{Lexicon, NsError, SentimentLabel, SentimentScorer, sentiment};

#[test]
fn init_is_idempotent() {
    let a = sentiment::init();
    let b = sentiment::init();
    assert!(std::ptr::eq(a, b));
    assert!(sentiment::is_initialized());
    assert!(!a.is_empty());
}

#[test]
fn builtin_lexicon_covers_market_vocabulary() {
    let lex = Lexicon::builtin();
    for word in ["beats", "misses", "upgrade", "downgrade", "bankruptcy", "rally"] {
        assert!(lex.contains(word), "{word}");
    }
    assert!(lex.get("plunge").is_some_and(|v| v < 0.0));
    assert!(lex.get("surge").is_some_and(|v| v > 0.0));
}

#[test]
fn vader_text_layout_parses() {
    let text = "moon\t3.0\t0.5\t[3, 3, 3]\n\nRug-Pull\t-3.4\t0.4\t[-3, -4]\n";

    let lex = Lexicon::from_vader_text(text).unwrap();

    assert_eq!(lex.len(), 2);
    assert_eq!(lex.get("moon"), Some(3.0));
    assert_eq!(lex.get("rug-pull"), Some(-3.4));
}

#[test]
fn vader_text_without_valence_is_rejected() {
    let err = Lexicon::from_vader_text("fine\t0.8\nbroken line\n").unwrap_err();
    match err {
        NsError::Data(msg) => assert!(msg.contains("line 2"), "{msg}"),
        other => panic!("expected Data error, got {other:?}"),
    }
}

#[test]
fn scorer_over_a_custom_lexicon() {
    let mut lex = Lexicon::default();
    lex.insert("Moon", 3.0);
    let lex: &'static Lexicon = Box::leak(Box::new(lex));
    let scorer = SentimentScorer::with_lexicon(lex);

    assert_eq!(scorer.score("to the moon").label, SentimentLabel::Positive);
    assert_eq!(scorer.score("good news").compound, 0.0);
}
