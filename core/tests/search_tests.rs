use posindex::{
    evaluate, extract_phrase, search, Direction, DocumentSource, IndexBuilder, InMemoryCorpus, MatchRecord,
    PhraseExtractor, PositionalIndex, ProximityQuery, ReadPolicy, SearchOutcome,
};

fn corpus() -> InMemoryCorpus {
    let mut c = InMemoryCorpus::new();
    c.push("d1.txt", "the cat sat on the mat cat ran");
    c.push("d2.txt", "Ran, cat! ran\ncat ran the end");
    c.push("d3.txt", "nothing to see here");
    c.push("d4.txt", "");
    c
}

fn build(c: &InMemoryCorpus) -> PositionalIndex {
    IndexBuilder::build(c, ReadPolicy::Strict).unwrap().index
}

#[test]
fn end_to_end_cat_ran() {
    let c = corpus();
    let idx = build(&c);
    let hits: Vec<MatchRecord> = search(&idx, "cat", "ran", 1)
        .into_iter()
        .filter(|m| m.doc_id == 1)
        .collect();
    assert_eq!(hits, vec![MatchRecord { doc_id: 1, first_pos: 7, second_pos: 8, direction: Direction::XThenY }]);

    let text = c.open(1).unwrap();
    assert_eq!(extract_phrase(text, 7, 8).unwrap(), "cat ran");
}

#[test]
fn forward_matches_precede_backward_matches() {
    let idx = build(&corpus());
    // d2 tokens: ran=1 cat=2 ran=3 cat=4 ran=5 the=6 end=7
    let hits = search(&idx, "cat", "ran", 1);
    let expected = vec![
        MatchRecord { doc_id: 1, first_pos: 7, second_pos: 8, direction: Direction::XThenY },
        MatchRecord { doc_id: 2, first_pos: 2, second_pos: 3, direction: Direction::XThenY },
        MatchRecord { doc_id: 2, first_pos: 4, second_pos: 5, direction: Direction::XThenY },
        MatchRecord { doc_id: 2, first_pos: 1, second_pos: 2, direction: Direction::YThenX },
        MatchRecord { doc_id: 2, first_pos: 3, second_pos: 4, direction: Direction::YThenX },
    ];
    assert_eq!(hits, expected);
}

#[test]
fn no_match_at_distance() {
    let idx = build(&corpus());
    assert!(search(&idx, "cat", "mat", 5).is_empty());
    let q = ProximityQuery::new("cat", "mat", 5).unwrap();
    assert_eq!(evaluate(&idx, &q), SearchOutcome::NoMatches);
}

#[test]
fn absent_term_yields_nothing() {
    let idx = build(&corpus());
    for y in ["cat", "ran", "dog"] {
        for k in 1..4 {
            assert!(search(&idx, "dog", y, k).is_empty());
            assert!(search(&idx, y, "dog", k).is_empty());
        }
    }
    let q = ProximityQuery::new("Cat", "Dog", 1).unwrap();
    assert_eq!(evaluate(&idx, &q), SearchOutcome::TermAbsent { term: "dog".into() });
    assert!(evaluate(&idx, &q).matches().is_empty());
}

#[test]
fn same_term_both_ways() {
    let mut c = InMemoryCorpus::new();
    c.push("a.txt", "la la la");
    let idx = build(&c);
    let hits = search(&idx, "la", "la", 1);
    assert_eq!(hits.len(), 4);
    assert_eq!(hits.iter().filter(|m| m.direction == Direction::XThenY).count(), 2);
}

#[test]
fn forward_and_backward_are_symmetric() {
    let idx = build(&corpus());
    let terms: Vec<String> = idx.terms().map(String::from).collect();
    let mut compared = 0;
    for x in &terms {
        for y in &terms {
            for k in 1..6 {
                let forward: Vec<_> = search(&idx, x, y, k)
                    .into_iter()
                    .filter(|m| m.direction == Direction::XThenY)
                    .map(|m| (m.doc_id, m.first_pos, m.second_pos))
                    .collect();
                let backward: Vec<_> = search(&idx, y, x, k)
                    .into_iter()
                    .filter(|m| m.direction == Direction::YThenX)
                    .map(|m| (m.doc_id, m.first_pos, m.second_pos))
                    .collect();
                let mut forward_sorted = forward.clone();
                forward_sorted.sort_unstable();
                let mut backward_sorted = backward;
                backward_sorted.sort_unstable();
                assert_eq!(forward_sorted, backward_sorted, "x={x} y={y} k={k}");
                compared += forward_sorted.len();
            }
        }
    }
    assert!(compared > 0);
}

#[test]
fn build_is_deterministic_and_monotonic() {
    let a = build(&corpus());
    let b = build(&corpus());
    assert_eq!(a, b);
    for term in a.terms() {
        for (_, positions) in a.postings(term).unwrap() {
            assert!(!positions.is_empty());
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{term}: {positions:?}");
        }
    }
    assert_eq!(a.document_count("cat"), 2);
    assert_eq!(a.position_count("ran", 2), 3);
}

#[test]
fn phrases_through_extractor() {
    let mut c = corpus();
    let idx = build(&c);
    let missing = c.push_missing("gone.txt");
    let strict = PhraseExtractor::new(&c, ReadPolicy::Strict);
    let lenient = PhraseExtractor::new(&c, ReadPolicy::Lenient);

    let hit = search(&idx, "cat", "ran", 1)[3];
    assert_eq!(strict.phrase_for(&hit).unwrap().as_deref(), Some("Ran cat"));

    let gone = MatchRecord { doc_id: missing, first_pos: 1, second_pos: 2, direction: Direction::XThenY };
    assert_eq!(lenient.phrase_for(&gone).unwrap(), None);
    assert!(format!("{:#}", strict.phrase_for(&gone).unwrap_err()).contains("gone.txt"));
}

#[test]
fn match_records_serialize_with_snake_case_direction() {
    let m = MatchRecord { doc_id: 3, first_pos: 4, second_pos: 6, direction: Direction::YThenX };
    let json = serde_json::to_value(m).unwrap();
    assert_eq!(json["direction"], "y_then_x");
    assert_eq!(json["first_pos"], 4);
}
