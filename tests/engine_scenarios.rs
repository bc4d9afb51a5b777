use autocorrect_core::core::lexicon::Lexicon;
use autocorrect_core::{AutocorrectEngine, CorrectionPolicy, EngineConfig, TouchZone, WordSource, WordSourceFormat};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn engine_with(words: &[(&str, u64)], policy: CorrectionPolicy) -> Arc<AutocorrectEngine> {
    let mut lexicon = Lexicon::new();
    for &(word, freq) in words {
        lexicon.insert(word, freq);
    }
    let mut config = EngineConfig { policy, ..Default::default() };
    config.loader.ready_threshold = 1;
    AutocorrectEngine::with_lexicon(config, lexicon)
}

fn engine(words: &[&str]) -> Arc<AutocorrectEngine> {
    let weighted: Vec<(&str, u64)> = words.iter().map(|&w| (w, 1)).collect();
    engine_with(&weighted, CorrectionPolicy::default())
}

#[test]
fn known_words_are_never_corrected() {
    let words = ["привет", "приказ", "продам", "hello", "help", "hell"];
    let engine = engine(&words);
    for word in words {
        assert_eq!(engine.correct(word, -1), None, "{word}");
    }
}

#[test]
fn too_short_input_gives_nothing() {
    let engine = engine(&["да", "hello"]);
    for input in ["", "д", "h"] {
        assert_eq!(engine.correct(input, -1), None);
        assert!(engine.suggest_prefix(input).is_empty());
    }
}

#[test]
fn misspelled_privet_is_corrected() {
    let engine = engine(&["привет", "приказ", "продам"]);
    assert_eq!(engine.correct("превет", -1), Some("привет".to_string()));
}

#[test]
fn case_is_preserved() {
    let engine = engine(&["привет", "приказ", "продам"]);
    assert_eq!(engine.correct("Превет", -1), Some("Привет".to_string()));
    assert_eq!(engine.correct("ПРЕВЕТ", -1), Some("ПРИВЕТ".to_string()));
}

#[test]
fn missing_letter_is_restored() {
    let engine = engine(&["hello", "helps", "hells"]);
    assert_eq!(engine.correct("helo", -1), Some("hello".to_string()));
}

#[test]
fn same_length_neighbour_substitution_outranks_insertion() {
    // "help" and "hell" are one neighbour substitution away; "hell" sorts first.
    let engine = engine(&["hello", "help", "hell"]);
    assert_eq!(engine.correct("helo", -1), Some("hell".to_string()));
}

#[test]
fn prefix_suggestions_rank_by_frequency() {
    let engine = engine_with(
        &[("привет", 5), ("приказ", 9), ("продам", 2), ("пробег", 1)],
        CorrectionPolicy::default(),
    );
    assert_eq!(engine.suggest_prefix("пр"), vec!["приказ", "привет", "продам"]);
    assert_eq!(engine.suggest_prefix("при"), vec!["приказ", "привет"]);
}

#[test]
fn frequency_decides_between_equal_edits() {
    let words = [("cart", 3), ("card", 90)];
    let plain = engine_with(&words, CorrectionPolicy::keyboard_distance());
    let weighted = engine_with(&words, CorrectionPolicy::frequency_aware());
    // "carf": f neighbours both t and d, so only frequency separates them.
    assert_eq!(plain.correct("carf", -1), Some("card".to_string()));
    assert_eq!(weighted.correct("carf", -1), Some("card".to_string()));

    let words = [("cart", 90), ("card", 3)];
    let plain = engine_with(&words, CorrectionPolicy::keyboard_distance());
    let weighted = engine_with(&words, CorrectionPolicy::frequency_aware());
    assert_eq!(plain.correct("carf", -1), Some("card".to_string()));
    assert_eq!(weighted.correct("carf", -1), Some("cart".to_string()));
}

#[test]
fn undo_round_trip() {
    let engine = engine(&["привет"]);
    engine.record_correction("Превет", "Привет", 5);
    assert_eq!(engine.last_correction(Some("Привет")).unwrap().original_word, "Превет");

    engine.clear_correction("Привет");
    assert_eq!(engine.last_correction(Some("Привет")), None);
}

#[test]
fn every_correction_is_keyed_for_undo() {
    let engine = engine(&["привет", "hello"]);
    engine.correct("превет", 6);
    engine.correct("hrllo", 12);

    assert_eq!(engine.last_correction(Some("привет")).unwrap().text_position, 0);
    assert_eq!(engine.last_correction(Some("HELLO")).unwrap().original_word, "hrllo");
    assert_eq!(engine.last_correction(None).unwrap().corrected_word, "hello");
}

#[test]
fn touch_zones_pick_the_intended_key() {
    let engine = engine(&["мама", "мася"]);
    let centred = [TouchZone::Center; 4];
    assert_eq!(engine.correct_with_touch_zones("маса", &centred, -1), None);

    let low = [TouchZone::Center, TouchZone::Center, TouchZone::Bottom, TouchZone::Center];
    assert_eq!(engine.correct_with_touch_zones("маса", &low, -1), Some("мама".to_string()));

    let last_low = [TouchZone::Center, TouchZone::Center, TouchZone::Center, TouchZone::Bottom];
    assert_eq!(engine.correct_with_touch_zones("маса", &last_low, -1), Some("мася".to_string()));
}

#[test]
fn background_load_makes_engine_ready() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.txt");
    std::fs::write(&path, "1 привет 5\n2 приказ 9\n3 продам 2\n4 пробег 1\nbroken line\n").unwrap();

    let mut config = EngineConfig::default();
    config.loader.format = WordSourceFormat::Columns { word_column: 1, frequency_column: 2 };
    let engine = AutocorrectEngine::open(config);
    engine.start_loading(WordSource::Path(path)).unwrap();

    let report = engine.wait_until_loaded().unwrap();
    assert_eq!(report.words_inserted, 4);
    assert_eq!(report.lines_skipped, 1);
    assert!(engine.is_ready());
    assert_eq!(engine.loaded_words_count(), 4);
    assert_eq!(engine.suggest_prefix("пр"), vec!["приказ", "привет", "продам"]);
    assert_eq!(engine.correct("превет", -1), Some("привет".to_string()));
}

#[test]
fn missing_source_keeps_engine_silent() {
    let engine = AutocorrectEngine::open(EngineConfig::default());
    engine.start_loading(WordSource::Path("/nonexistent/words.txt".into())).unwrap();

    assert!(engine.wait_until_loaded().is_err());
    assert!(!engine.is_ready());
    assert!(engine.load_failure().is_some());
    assert_eq!(engine.correct("превет", -1), None);
    assert!(engine.suggest_prefix("пр").is_empty());
}

#[test]
fn snapshot_short_circuits_the_next_start() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("lexicon.bin");
    let mut config = EngineConfig { snapshot_path: Some(snapshot.clone()), ..Default::default() };
    config.loader.ready_threshold = 3;

    let first = AutocorrectEngine::open(config.clone());
    first.start_loading(WordSource::Text("привет\nприказ\nпродам\n".to_string())).unwrap();
    first.close().unwrap();
    assert!(snapshot.exists());

    let second = AutocorrectEngine::open(config);
    assert!(second.is_ready());
    assert_eq!(second.loaded_words_count(), 3);
    assert!(second.is_known("продам"));

    second.start_loading(WordSource::Text("пробег\n".to_string())).unwrap();
    assert!(second.wait_until_loaded().unwrap().short_circuited);
    assert!(!second.is_known("пробег"));
}

#[test]
fn retried_load_clears_the_earlier_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.txt");
    let engine = AutocorrectEngine::open(EngineConfig::default());

    engine.start_loading(WordSource::Path(path.clone())).unwrap();
    assert!(engine.wait_until_loaded().is_err());
    assert!(engine.load_failure().is_some());

    std::fs::write(&path, "привет\nприказ\n").unwrap();
    engine.start_loading(WordSource::Path(path)).unwrap();
    engine.wait_until_loaded().unwrap();
    assert!(engine.is_ready());
    assert_eq!(engine.load_failure(), None);
}
