use byteorder::{BigEndian, WriteBytesExt};
use flate2::{write::GzEncoder, Compression};
use stardict::index::{Index, Location};
use stardict::*;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::TempDir;

const HELLO: &str = "@hello/hə'ləʊ/\n*noun\n-a greeting\n=Hello there+used as a greeting\n";
const WORLD: &str = "@world\n*noun\n-the earth, with all its countries and peoples\n";
const GREET: &str = "@greet\n*verb\n-to say HELLO to someone\n";

fn loc(offset: u32, size: u32) -> Location {
    Location { offset, size }
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Index and uncompressed definition data for the given entries
fn build(entries: &[(&str, &[u8])]) -> (Vec<u8>, Vec<u8>) {
    let mut idx = Vec::new();
    let mut dict = Vec::new();

    for (word, definition) in entries {
        idx.extend(word.as_bytes());
        idx.push(0);
        idx.write_u32::<BigEndian>(dict.len() as u32).unwrap();
        idx.write_u32::<BigEndian>(definition.len() as u32).unwrap();
        dict.extend(*definition);
    }

    (idx, dict)
}

fn sample() -> (Vec<u8>, Vec<u8>) {
    build(&[
        ("world", WORLD.as_bytes()),
        ("hello", HELLO.as_bytes()),
        ("greet", GREET.as_bytes()),
    ])
}

fn from_raw(idx: &[u8], dict: &[u8]) -> StarDict {
    let reader = Compressed::new(Cursor::new(gzip(dict))).unwrap();
    StarDict::from_existing(Metadata::default(), Index::from_bytes(idx).unwrap(), Box::new(reader))
}

fn in_memory(entries: &[(&str, &str)]) -> StarDict {
    let entries: Vec<(&str, &[u8])> = entries.iter().map(|&(w, d)| (w, d.as_bytes())).collect();
    let (idx, dict) = build(&entries);
    from_raw(&idx, &dict)
}

fn write_files(dir: &Path, stem: &str, idx: &[u8], dict: &[u8]) {
    let ifo = format!("StarDict's dict ifo file\nversion=2.4.2\nbookname=Sample\nwordcount=3\nidxfilesize={}\n", idx.len());
    fs::write(dir.join(format!("{stem}.ifo")), ifo).unwrap();
    fs::write(dir.join(format!("{stem}.idx")), idx).unwrap();
    fs::write(dir.join(format!("{stem}.dict.dz")), gzip(dict)).unwrap();
    fs::write(dir.join(format!("{stem}.dict")), dict).unwrap();
}

fn sample_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let (idx, dict) = sample();
    write_files(dir.path(), "sample", &idx, &dict);
    dir
}

fn initialized(dir: &TempDir) -> StarDict {
    let mut dict = StarDict::new(DictionaryConfig::from_stem("sample", dir.path(), "sample"));
    dict.initialize().unwrap();
    dict
}

// Initialization

#[test]
fn lookups_before_initialize() {
    let dir = sample_dir();
    let dict = StarDict::new(DictionaryConfig::from_stem("sample", dir.path(), "sample"));

    assert!(!dict.is_initialized());
    assert_eq!(dict.word_count(), 0);
    assert!(matches!(dict.lookup_exact("hello"), Err(DictError::NotInitialized)));
    assert!(matches!(dict.lookup_prefix("h", 5), Err(DictError::NotInitialized)));
    assert!(matches!(dict.random_words(1), Err(DictError::NotInitialized)));
    assert!(matches!(dict.search_definitions("hello", 5), Err(DictError::NotInitialized)));
}

#[test]
fn initialize_from_files() {
    let dir = sample_dir();
    let dict = initialized(&dir);

    assert!(dict.is_initialized());
    assert_eq!(dict.word_count(), 3);
    assert_eq!(dict.metadata().unwrap().bookname(), Some("Sample"));
    assert_eq!(dict.lookup_exact("world").unwrap().as_deref(), Some(WORLD));

    let status = dict.status();
    assert_eq!(status.path, dir.path());
    assert!(status.initialized);
    assert_eq!(status.word_count, 3);
}

#[test]
fn missing_index_file() {
    let dir = sample_dir();
    fs::remove_file(dir.path().join("sample.idx")).unwrap();
    let mut dict = StarDict::new(DictionaryConfig::from_stem("sample", dir.path(), "sample"));

    assert!(matches!(dict.initialize(), Err(InitError::Io { .. })));
    assert!(!dict.is_initialized());
    assert!(matches!(dict.lookup_exact("hello"), Err(DictError::NotInitialized)));
}

#[test]
fn truncated_index_fails_initialization() {
    let dir = sample_dir();
    let (mut idx, _) = sample();
    idx.extend(b"zzz\0\x00\x00\x00");
    fs::write(dir.path().join("sample.idx"), idx).unwrap();
    let mut dict = StarDict::new(DictionaryConfig::from_stem("sample", dir.path(), "sample"));

    let err = dict.initialize().unwrap_err();
    assert!(matches!(err, InitError::CorruptIndex(IndexError::TruncatedRecord { remaining: 3, .. })));
    assert_eq!(dict.word_count(), 0);
}

#[test]
fn failed_reinitialization_resets_dictionary() {
    let dir = sample_dir();
    let mut dict = initialized(&dir);
    fs::remove_file(dir.path().join("sample.dict.dz")).unwrap();

    assert!(dict.initialize().is_err());
    assert!(!dict.is_initialized());
}

#[test]
fn unsupported_definition_file() {
    let dir = sample_dir();
    let mut config = DictionaryConfig::from_stem("sample", dir.path(), "sample");
    config.dict = "sample.ifo".into();

    assert!(matches!(StarDict::new(config).initialize(), Err(InitError::UnsupportedFormat(_))));
}

#[test]
fn definition_file_not_gzipped() {
    let dir = sample_dir();
    let (_, dict) = sample();
    fs::write(dir.path().join("sample.dict.dz"), dict).unwrap();
    let mut dict = StarDict::new(DictionaryConfig::from_stem("sample", dir.path(), "sample"));

    assert!(matches!(dict.initialize(), Err(InitError::InvalidData { .. })));
}

#[test]
fn uncompressed_definition_file() {
    let dir = sample_dir();
    let mut config = DictionaryConfig::from_stem("sample", dir.path(), "sample");
    config.dict = "sample.dict".into();
    let mut dict = StarDict::new(config);
    dict.initialize().unwrap();

    assert_eq!(dict.lookup_exact("greet").unwrap().as_deref(), Some(GREET));
}

// Exact lookup

#[test]
fn exact_lookup() {
    let dict = in_memory(&[("apple", "red"), ("banana", "yellow"), ("cherry", "dark red")]);

    assert_eq!(dict.lookup_exact("banana").unwrap().as_deref(), Some("yellow"));
    assert_eq!(dict.lookup_exact("zzz").unwrap(), None);
    assert_eq!(dict.lookup_exact("Banana").unwrap(), None);
}

#[test]
fn exact_lookup_is_idempotent() {
    let dir = sample_dir();
    let dict = initialized(&dir);

    let first = dict.lookup_exact("hello").unwrap();
    let second = dict.lookup_exact("hello").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some(HELLO));
}

#[test]
fn decompression_cache_disabled() {
    let dir = sample_dir();
    let mut config = DictionaryConfig::from_stem("sample", dir.path(), "sample");
    config.cache_decompressed = false;
    let mut dict = StarDict::new(config);
    dict.initialize().unwrap();

    assert_eq!(dict.lookup_exact("hello").unwrap().as_deref(), Some(HELLO));
    assert_eq!(dict.lookup_exact("world").unwrap().as_deref(), Some(WORLD));
}

#[test]
fn parsed_lookup() {
    let dir = sample_dir();
    let dict = initialized(&dir);
    let entry = dict.lookup("hello").unwrap().unwrap();

    assert_eq!(entry.word, "hello");
    assert_eq!(entry.pronunciation.as_deref(), Some("hə'ləʊ"));
    assert_eq!(entry.parts_of_speech[0].definitions[0].text, "a greeting");
    assert!(dict.lookup("nothing").unwrap().is_none());
}

#[test]
fn unparsable_definition_is_no_entry() {
    let dict = in_memory(&[("plain", "just some text without markup")]);

    assert!(dict.lookup_exact("plain").unwrap().is_some());
    assert!(dict.lookup("plain").unwrap().is_none());
}

#[test]
fn invalid_utf8_is_replaced() {
    let (idx, dict) = build(&[("broken", b"caf\xE9 au lait".as_slice())]);
    let dict = from_raw(&idx, &dict);
    let definition = dict.lookup_exact("broken").unwrap().unwrap();

    assert_eq!(definition, "caf\u{FFFD} au lait");
}

#[test]
fn location_beyond_data() {
    let (idx, _) = build(&[("far", [0u8; 64].as_slice())]);
    let reader = Compressed::new(Cursor::new(gzip(b"short"))).unwrap();
    let dict = StarDict::from_existing(Metadata::default(), Index::from_bytes(&idx).unwrap(), Box::new(reader));

    match dict.lookup_exact("far") {
        Err(DictError::Range { offset: 0, size: 64, available: 5 }) => {}
        other => panic!("expected a range error, got {:?}", other),
    }
}

#[test]
fn concurrent_lookups() {
    let dir = sample_dir();
    let dict = initialized(&dir);

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..10 {
                    assert_eq!(dict.lookup_exact("greet").unwrap().as_deref(), Some(GREET));
                }
            });
        }
    });
}

// Prefix, random and reverse search

#[test]
fn prefix_lookup() {
    let dict = in_memory(&[("apple", "a"), ("application", "b"), ("apricot", "c"), ("banana", "d")]);

    assert_eq!(dict.lookup_prefix("ap", 2).unwrap(), vec!["apple", "application"]);
    assert_eq!(dict.lookup_prefix("ap", 10).unwrap(), vec!["apple", "application", "apricot"]);
    assert!(dict.lookup_prefix("z", 10).unwrap().is_empty());
}

#[test]
fn random_words_come_from_index() {
    let dir = sample_dir();
    let dict = initialized(&dir);
    let words = dict.random_words(20).unwrap();

    assert_eq!(words.len(), 20);
    assert!(words.iter().all(|w| ["hello", "world", "greet"].contains(&w.as_str())));
    assert!(dict.random_words(0).unwrap().is_empty());
}

#[test]
fn random_words_of_empty_dictionary() {
    let dict = in_memory(&[]);

    assert_eq!(dict.word_count(), 0);
    assert!(dict.random_words(3).unwrap().is_empty());
}

#[test]
fn search_in_definitions() {
    let dir = sample_dir();
    let dict = initialized(&dir);

    // Index order: greet, hello, world
    assert_eq!(dict.search_definitions("hello", 10).unwrap(), vec!["greet", "hello"]);
    assert_eq!(dict.search_definitions("HeLLo", 1).unwrap(), vec!["greet"]);
    assert_eq!(dict.search_definitions("Earth", 10).unwrap(), vec!["world"]);
    assert!(dict.search_definitions("hello", 0).unwrap().is_empty());
    assert!(dict.search_definitions("nowhere", 10).unwrap().is_empty());
}

#[test]
fn search_skips_broken_entries() {
    let (mut idx, dict) = build(&[("good", b"a fine definition".as_slice())]);
    idx.extend(b"bad\0\x00\x00\x10\x00\x00\x00\x00\x05");
    let dict = from_raw(&idx, &dict);

    assert_eq!(dict.search_definitions("fine", 10).unwrap(), vec!["good"]);
}

// Uncompressed dict reader

#[test]
fn correct_position() {
    let reader = Cursor::new("Ignore me: important");
    let dict = Uncompressed::new(reader).unwrap();
    let def = dict.fetch_definition(loc(11, 9)).unwrap();

    assert_eq!(def, "important");
}

#[test]
fn seeking_to_start() {
    let reader = Cursor::new("abcdefg");
    let dict = Uncompressed::new(reader).unwrap();
    let def = dict.fetch_definition(loc(0, 3)).unwrap();

    assert_eq!(def, "abc");
}

#[test]
fn seeking_beyond_file() {
    let reader = Cursor::new("xyz is too short ;)");
    let dict = Uncompressed::new(reader).unwrap();

    assert!(matches!(dict.fetch_definition(loc(66642, 18)), Err(DictError::Range { .. })));
}

#[test]
fn length_too_large() {
    let reader = Cursor::new("blablablup");
    let dict = Uncompressed::new(reader).unwrap();

    assert!(matches!(dict.fetch_definition(loc(0, MAX_BYTES_FOR_BUFFER + 1)), Err(DictError::MemoryError)));
}

// Compressed dict reader

#[test]
fn wrong_file_id() {
    let data = Cursor::new(vec![0x1F, 0x8C]);
    assert!(matches!(Compressed::new(data), Err(DictError::Decompression(_))));
}

#[test]
fn corrupt_gzip_stream() {
    // The gzip trailer ends with CRC32 and size of the uncompressed data
    let mut data = gzip(b"some definitions");
    let crc = data.len() - 8;
    data[crc] ^= 0xFF;
    let dict = Compressed::new(Cursor::new(data)).unwrap();

    assert!(matches!(dict.fetch_definition(loc(0, 4)), Err(DictError::Decompression(_))));
}

#[test]
fn multiple_gzip_members() {
    let data = [gzip(b"first "), gzip(b"second")].concat();
    let dict = Compressed::new(Cursor::new(data)).unwrap();

    assert_eq!(dict.fetch_definition(loc(3, 6)).unwrap(), "st sec");
}

#[test]
fn fetch_last_byte() {
    let dict = Compressed::new(Cursor::new(gzip(b"abcdef"))).unwrap().with_cache(false);

    assert_eq!(dict.fetch_definition(loc(5, 1)).unwrap(), "f");
    assert!(matches!(dict.fetch_definition(loc(5, 2)), Err(DictError::Range { .. })));
}

#[test]
fn offset_near_u32_max() {
    let dict = Compressed::new(Cursor::new(gzip(b"abcdef"))).unwrap();

    assert!(matches!(
        dict.fetch_definition(loc(u32::MAX, 1)),
        Err(DictError::Range { offset: u32::MAX, size: 1, available: 6 })
    ));
    assert!(matches!(dict.fetch_bytes(loc(u32::MAX - 2, 4)), Err(DictError::Range { .. })));
}
