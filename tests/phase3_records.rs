//! Phase 3 tests: corpus records, output formats, output directories, config.

use std::path::Path;

use inverted_index::{
    clear_output, parse_record, Corpus, Document, Formatter, IndexConfig, IndexError,
    IndexReader, IndexWriter, InvertedIndex, OutputFormat, Posting, WordPosting, SUCCESS_MARKER,
};

// ==================== Helpers ====================

fn entry(word: &str, postings: &[(&str, u32)]) -> WordPosting {
    WordPosting {
        word: word.to_string(),
        postings: postings.iter().map(|&(d, c)| Posting::new(d, c)).collect(),
    }
}

fn sample_index() -> InvertedIndex {
    InvertedIndex::from_words(vec![
        entry("cat", &[("doc1", 1)]),
        entry("dog", &[("doc2", 1)]),
        entry("sat", &[("doc1", 1), ("doc2", 1)]),
    ])
    .unwrap()
}

fn read_parts(dir: &Path) -> String {
    let mut parts: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.file_name().unwrap().to_string_lossy().starts_with("part-"))
        .collect();
    parts.sort();
    parts
        .iter()
        .map(|p| std::fs::read_to_string(p).unwrap())
        .collect()
}

// ==================== Input Record Tests ====================

#[test]
fn test_parse_record() {
    let doc = parse_record("(doc1, the cat sat)", 1).unwrap();
    assert_eq!(doc, Document::new("doc1", "the cat sat"));
}

#[test]
fn test_parse_record_trims_and_splits_on_first_comma() {
    let doc = parse_record("  ( books/a.txt ,  Hello, World )  ", 1).unwrap();
    assert_eq!(doc.id, "books/a.txt");
    assert_eq!(doc.text, "Hello, World");
}

#[test]
fn test_parse_record_empty_text() {
    let doc = parse_record("(doc1,)", 1).unwrap();
    assert_eq!(doc.id, "doc1");
    assert!(doc.text.is_empty());
}

#[test]
fn test_parse_record_malformed() {
    for line in ["garbage", "(doc1 no comma)", "(, text)", "(doc1, text", "doc1, text)"] {
        match parse_record(line, 7) {
            Err(IndexError::MalformedInputLine { line_number, line: l }) => {
                assert_eq!(line_number, 7);
                assert_eq!(l, line);
            }
            other => panic!("expected malformed error for {:?}, got {:?}", line, other),
        }
    }
}

#[test]
fn test_corpus_recovers_from_malformed_lines() {
    let corpus = Corpus::from_lines(["(doc1, the cat)", "garbage", "", "   ", "(doc2, dog)"]);
    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.malformed, 1);
    assert_eq!(corpus.blank, 2);
    assert!(corpus.documents[1].is_empty());
    assert_eq!(corpus.documents[2].id, "doc2");
}

#[test]
fn test_corpus_counts_blank_lines_apart_from_malformed() {
    let corpus = Corpus::from_lines(["(doc1, cat)", "", "   ", "\t"]);
    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.malformed, 0);
    assert_eq!(corpus.blank, 3);
}

#[test]
fn test_corpus_read_directory_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b.txt"), "(doc2, dog)\n").unwrap();
    std::fs::write(dir.path().join("a.txt"), "(doc1, cat)\ngarbage\n").unwrap();
    std::fs::write(dir.path().join("_SUCCESS"), "").unwrap();
    std::fs::write(dir.path().join(".hidden"), "(doc9, hidden)\n").unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();

    let corpus = Corpus::read(dir.path()).unwrap();
    let names: Vec<String> = corpus
        .sources
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.malformed, 1);
    assert_eq!(corpus.documents[0].id, "doc1");
    assert_eq!(corpus.documents[2].id, "doc2");
}

#[test]
fn test_corpus_read_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.txt");
    std::fs::write(&path, "(doc1, cat)\n(doc2, dog)\n").unwrap();
    let corpus = Corpus::read(&path).unwrap();
    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.sources, vec![path]);
}

#[test]
fn test_corpus_read_missing_location() {
    let dir = tempfile::tempdir().unwrap();
    let err = Corpus::read(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, IndexError::ResourceUnavailable { .. }));
}

// ==================== Formatter Tests ====================

#[test]
fn test_format_text_record() {
    let formatter = Formatter::default();
    let line = formatter
        .format(&entry("sat", &[("doc1", 1), ("doc2", 1)]))
        .unwrap();
    assert_eq!(line, "sat\t(doc1,1), (doc2,1)");
}

#[test]
fn test_format_custom_separator() {
    let formatter = Formatter::text(" -> ");
    let line = formatter.format(&entry("cat", &[("doc1", 3)])).unwrap();
    assert_eq!(line, "cat -> (doc1,3)");
    assert_eq!(formatter.parse(&line).unwrap(), entry("cat", &[("doc1", 3)]));
}

#[test]
fn test_format_does_not_reorder() {
    // Formatting renders postings exactly as given.
    let line = Formatter::default()
        .format(&entry("w", &[("b", 1), ("a", 1)]))
        .unwrap();
    assert_eq!(line, "w\t(b,1), (a,1)");
}

#[test]
fn test_format_json_record() {
    let formatter = Formatter::json();
    let record = entry("sat", &[("doc1", 2), ("doc2", 1)]);
    let line = formatter.format(&record).unwrap();
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["word"], "sat");
    assert_eq!(value["postings"][0]["document_id"], "doc1");
    assert_eq!(value["postings"][0]["count"], 2);
    assert_eq!(formatter.parse(&line).unwrap(), record);
}

#[test]
fn test_parse_text_with_odd_document_ids() {
    let formatter = Formatter::default();
    let record = entry("word", &[("dir/a (1).txt", 4), ("x)", 2)]);
    let line = formatter.format(&record).unwrap();
    assert_eq!(formatter.parse(&line).unwrap(), record);
}

#[test]
fn test_format_text_rejects_unrepresentable_ids() {
    let formatter = Formatter::default();
    for id in ["a, b", "line\nbreak", "cr\r"] {
        let err = formatter.format(&entry("cat", &[(id, 1)])).unwrap_err();
        assert!(matches!(err, IndexError::MalformedIndexRecord(_)), "{:?}", id);
    }
    // A bare comma still round-trips.
    let record = entry("cat", &[("a,b", 1)]);
    let line = formatter.format(&record).unwrap();
    assert_eq!(formatter.parse(&line).unwrap(), record);
}

#[test]
fn test_format_json_accepts_any_id() {
    let formatter = Formatter::json();
    let record = entry("cat", &[("a, b\nc", 1)]);
    let line = formatter.format(&record).unwrap();
    assert!(!line.contains('\n'));
    assert_eq!(formatter.parse(&line).unwrap(), record);
}

#[test]
fn test_parse_malformed_records() {
    let formatter = Formatter::default();
    for line in ["no separator", "w\t", "w\t(doc1)", "w\t(doc1,x)", "w\tdoc1,1"] {
        let err = formatter.parse(line).unwrap_err();
        assert!(matches!(err, IndexError::MalformedIndexRecord(_)), "{:?}", line);
    }
    let err = Formatter::json().parse("{not json").unwrap_err();
    assert!(matches!(err, IndexError::MalformedIndexRecord(_)));
}

// ==================== Writer / Reader Tests ====================

#[test]
fn test_write_creates_parts_and_marker() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index");

    let summary = IndexWriter::new(Formatter::default(), 1)
        .write(&sample_index(), &out)
        .unwrap();
    assert_eq!(summary.records, 3);
    assert_eq!(summary.parts.len(), 1);
    assert!(out.join(SUCCESS_MARKER).is_file());
    assert_eq!(
        read_parts(&out),
        "cat\t(doc1,1)\ndog\t(doc2,1)\nsat\t(doc1,1), (doc2,1)\n"
    );
}

#[test]
fn test_write_range_partitions_preserve_order() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index");

    let summary = IndexWriter::new(Formatter::default(), 2)
        .write(&sample_index(), &out)
        .unwrap();
    assert_eq!(summary.parts.len(), 2);
    assert!(out.join("part-00000").is_file());
    assert!(out.join("part-00001").is_file());
    assert_eq!(
        read_parts(&out),
        "cat\t(doc1,1)\ndog\t(doc2,1)\nsat\t(doc1,1), (doc2,1)\n"
    );
}

#[test]
fn test_write_more_partitions_than_words() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index");

    let summary = IndexWriter::new(Formatter::default(), 5)
        .write(&sample_index(), &out)
        .unwrap();
    assert_eq!(summary.parts.len(), 5);
    assert_eq!(std::fs::read_to_string(out.join("part-00004")).unwrap(), "");

    let back = IndexReader::default().read(&out).unwrap();
    assert_eq!(back, sample_index());
}

#[test]
fn test_write_empty_index() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index");
    IndexWriter::new(Formatter::default(), 1)
        .write(&InvertedIndex::new(), &out)
        .unwrap();
    assert!(IndexReader::default().read(&out).unwrap().is_empty());
}

#[test]
fn test_write_refuses_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index");
    std::fs::create_dir(&out).unwrap();

    let err = IndexWriter::new(Formatter::default(), 1)
        .write(&sample_index(), &out)
        .unwrap_err();
    assert!(matches!(err, IndexError::OutputAlreadyExists(_)));
}

#[test]
fn test_write_unrepresentable_id_leaves_no_marker() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index");
    let index = InvertedIndex::from_words(vec![
        entry("cat", &[("a, b", 1)]),
        entry("dog", &[("doc2", 1)]),
    ])
    .unwrap();

    let err = IndexWriter::new(Formatter::default(), 1)
        .write(&index, &out)
        .unwrap_err();
    assert!(matches!(err, IndexError::MalformedIndexRecord(_)));
    assert!(!out.join(SUCCESS_MARKER).exists());
    assert!(matches!(
        IndexReader::default().read(&out),
        Err(IndexError::IncompleteOutput(_))
    ));

    // The same index is fine as JSON lines.
    let json_out = dir.path().join("json");
    IndexWriter::new(Formatter::json(), 1)
        .write(&index, &json_out)
        .unwrap();
    assert_eq!(
        IndexReader::new(Formatter::json()).read(&json_out).unwrap(),
        index
    );
}

#[test]
fn test_write_refuses_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index");
    std::fs::write(&out, "old").unwrap();

    let err = IndexWriter::new(Formatter::default(), 1)
        .write(&sample_index(), &out)
        .unwrap_err();
    assert!(matches!(err, IndexError::OutputAlreadyExists(_)));
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "old");
}

#[test]
fn test_write_creates_missing_parents() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("runs").join("2024").join("index");

    IndexWriter::new(Formatter::default(), 2)
        .write(&sample_index(), &out)
        .unwrap();
    assert!(out.join(SUCCESS_MARKER).is_file());
    assert_eq!(IndexReader::default().read(&out).unwrap(), sample_index());
}

#[test]
fn test_clear_output_then_write() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index");
    let writer = IndexWriter::new(Formatter::default(), 1);

    writer.write(&sample_index(), &out).unwrap();
    assert!(clear_output(&out).unwrap());
    assert!(!out.exists());
    assert!(!clear_output(&out).unwrap());
    writer.write(&sample_index(), &out).unwrap();
}

#[test]
fn test_clear_output_removes_plain_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index");
    std::fs::write(&out, "old").unwrap();
    assert!(clear_output(&out).unwrap());
    assert!(!out.exists());
}

#[test]
fn test_read_back_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index");
    IndexWriter::new(Formatter::json(), 2)
        .write(&sample_index(), &out)
        .unwrap();

    let back = IndexReader::new(Formatter::json()).read(&out).unwrap();
    assert_eq!(back, sample_index());
}

#[test]
fn test_reader_rejects_missing_marker() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index");
    IndexWriter::new(Formatter::default(), 1)
        .write(&sample_index(), &out)
        .unwrap();
    std::fs::remove_file(out.join(SUCCESS_MARKER)).unwrap();

    let err = IndexReader::default().read(&out).unwrap_err();
    assert!(matches!(err, IndexError::IncompleteOutput(_)));
}

#[test]
fn test_reader_rejects_out_of_order_parts() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index");
    std::fs::create_dir(&out).unwrap();
    std::fs::write(out.join("part-00000"), "dog\t(doc2,1)\ncat\t(doc1,1)\n").unwrap();
    std::fs::write(out.join(SUCCESS_MARKER), "").unwrap();

    let err = IndexReader::default().read(&out).unwrap_err();
    assert!(matches!(err, IndexError::MalformedIndexRecord(_)));
}

// ==================== Config Tests ====================

#[test]
fn test_config_defaults() {
    let config = IndexConfig::default();
    assert!(config.builtin_stop_words);
    assert!(!config.clear_output);
    assert_eq!(config.partitions, 1);
    assert_eq!(config.format, OutputFormat::Text);
    assert_eq!(config.separator, "\t");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_from_toml() {
    let config = IndexConfig::from_toml_str(
        r#"
        input = "corpus"
        output = "out"
        builtin_stop_words = false
        partitions = 4
        shards = 2
        threads = 3
        format = "json"
        separator = " -> "
        "#,
    )
    .unwrap();
    assert_eq!(config.input.as_deref(), Some(Path::new("corpus")));
    assert_eq!(config.output().unwrap(), Path::new("out"));
    assert!(!config.builtin_stop_words);
    assert_eq!(config.partitions, 4);
    assert_eq!(config.shards, 2);
    assert_eq!(config.threads, 3);
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.formatter(), Formatter::new(OutputFormat::Json, " -> "));
    assert_eq!(config.writer().partitions(), 4);
    assert_eq!(config.pipeline().unwrap().shards(), 2);
}

#[test]
fn test_config_rejects_unknown_keys() {
    let err = IndexConfig::from_toml_str("inputt = \"x\"").unwrap_err();
    assert!(matches!(err, IndexError::InvalidConfig(_)));
}

#[test]
fn test_config_validation() {
    let bad = [
        IndexConfig {
            partitions: 0,
            ..IndexConfig::default()
        },
        IndexConfig {
            shards: 0,
            ..IndexConfig::default()
        },
        IndexConfig {
            separator: String::new(),
            ..IndexConfig::default()
        },
        IndexConfig {
            separator: "x".into(),
            ..IndexConfig::default()
        },
        IndexConfig {
            separator: "\n".into(),
            ..IndexConfig::default()
        },
    ];
    for config in bad {
        assert!(matches!(config.validate(), Err(IndexError::InvalidConfig(_))));
    }
}

#[test]
fn test_config_requires_locations() {
    let config = IndexConfig::default();
    assert!(matches!(config.input(), Err(IndexError::InvalidConfig(_))));
    assert!(matches!(config.output(), Err(IndexError::InvalidConfig(_))));
}

#[test]
fn test_config_stop_words_sources() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stop.txt");
    std::fs::write(&path, "cat\n").unwrap();

    let config = IndexConfig {
        stop_words_file: Some(path.clone()),
        builtin_stop_words: false,
        ..IndexConfig::default()
    };
    let set = config.stop_words().unwrap();
    assert_eq!(set.len(), 1);

    let config = IndexConfig {
        stop_words_file: Some(path),
        ..IndexConfig::default()
    };
    let set = config.stop_words().unwrap();
    assert!(set.len() > 1);
}

#[test]
fn test_config_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.toml");
    std::fs::write(&path, "partitions = 2\n").unwrap();
    assert_eq!(IndexConfig::load(&path).unwrap().partitions, 2);

    let err = IndexConfig::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, IndexError::ResourceUnavailable { .. }));
}
