use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use marc21::{
    encode_record, ControlField, ErrorKind, Field, MarcReader, Record, ReaderOptions,
    SharedMarcReader,
};

fn record_bytes(id: &str) -> Vec<u8> {
    let mut record = Record::new();
    record.append_field(ControlField::new("001", id).unwrap());
    encode_record(&mut record)
}

fn control_number(record: &Record) -> String {
    record
        .get_field("001")
        .and_then(Field::as_control)
        .map(|f| f.data().to_string())
        .unwrap_or_default()
}

fn stream(ids: &[&str], separator: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for id in ids {
        out.extend(record_bytes(id));
        out.extend_from_slice(separator);
    }
    out
}

#[test]
fn reads_records_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&stream(&["r1", "r2", "r3"], b"\r\n")).unwrap();
    file.flush().unwrap();

    let reader = MarcReader::open(file.path()).unwrap();
    let records: Vec<Record> = reader.collect::<Result<_, _>>().unwrap();
    let ids: Vec<String> = records.iter().map(control_number).collect();
    assert_eq!(ids, ["r1", "r2", "r3"]);
    assert!(records.iter().all(|r| r.warnings().is_empty()));
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.mrc");
    let err = MarcReader::open(&path).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidFile);
    assert!(err.to_string().contains("absent.mrc"));
}

#[test]
fn noise_between_records_is_stripped() {
    let mut bytes = b"\n\n".to_vec();
    bytes.extend(stream(&["a", "b"], b"\x00\r\n\x00"));
    let mut reader = MarcReader::from_bytes(bytes);

    let first = reader.next_raw().unwrap().unwrap();
    assert_eq!(first, record_bytes("a"));
    let second = reader.next_record().unwrap().unwrap();
    assert_eq!(control_number(&second), "b");
    assert!(reader.next_raw().unwrap().is_none());
    assert!(reader.next_record().is_none());
}

#[test]
fn trailing_garbage_becomes_a_damaged_record() {
    let mut bytes = stream(&["ok"], b"");
    bytes.extend_from_slice(b"xyz");
    let results: Vec<_> = MarcReader::from_bytes(bytes).collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].as_ref().unwrap().warnings().is_empty());
    let tail = results[1].as_ref().unwrap();
    assert!(tail.is_empty());
    assert_eq!(tail.warnings()[0].kind(), ErrorKind::MissingLength);
}

#[test]
fn records_span_read_boundaries() {
    let bytes = stream(&["alpha", "beta", "gamma"], b"\n");
    for chunk_size in [1, 7, 40, 4096] {
        let options = ReaderOptions {
            chunk_size,
            ..ReaderOptions::default()
        };
        let reader = MarcReader::with_options(Cursor::new(bytes.clone()), options);
        let ids: Vec<String> = reader
            .map(|r| control_number(&r.unwrap()))
            .collect();
        assert_eq!(ids, ["alpha", "beta", "gamma"], "chunk_size {chunk_size}");
    }
}

#[test]
fn default_options() {
    let options = ReaderOptions::default();
    assert_eq!(options.max_record_length, 99_999);
    assert_eq!(options.chunk_size, 16 * 1024);
    let reader = MarcReader::from_bytes(Vec::new());
    assert_eq!(reader.options(), &options);
}

#[test]
fn over_long_chunk_is_cut() {
    let options = ReaderOptions {
        max_record_length: 30,
        ..ReaderOptions::default()
    };
    let bytes = record_bytes("0123456789");
    assert!(bytes.len() > 31);
    let mut reader = MarcReader::with_options(Cursor::new(bytes), options);
    let first = reader.next_raw().unwrap().unwrap();
    assert_eq!(first.len(), 31);
    assert_eq!(first.last(), Some(&0x1d));
    assert!(reader.next_raw().unwrap().is_some());
}

#[test]
fn shared_reader_hands_each_record_to_one_worker() {
    let ids: Vec<String> = (0..200).map(|i| format!("rec{i:03}")).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let options = ReaderOptions {
        chunk_size: 64,
        ..ReaderOptions::default()
    };
    let shared = SharedMarcReader::new(MarcReader::with_options(
        Cursor::new(stream(&id_refs, b"\n")),
        options,
    ));
    let decoded = AtomicUsize::new(0);

    let mut seen: Vec<String> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let mut mine = Vec::new();
                    while let Some(record) = shared.next_record() {
                        let record = record.unwrap();
                        assert!(record.warnings().is_empty());
                        decoded.fetch_add(1, Ordering::Relaxed);
                        mine.push(control_number(&record));
                    }
                    mine
                })
            })
            .collect();
        workers
            .into_iter()
            .flat_map(|worker| worker.join().unwrap())
            .collect()
    });

    seen.sort();
    assert_eq!(seen, ids);
    assert_eq!(decoded.load(Ordering::Relaxed), 200);
    assert!(shared.next_raw().unwrap().is_none());
}
