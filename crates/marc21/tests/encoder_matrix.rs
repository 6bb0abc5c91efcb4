use marc21::{
    decode_record, encode_record, ControlField, DataField, ErrorKind, Field, Record,
    RecordEncoder, Subfield,
};

fn sample_record() -> Record {
    let mut record = Record::with_leader("01234cam a2200289 a 4500");
    record.append_field(ControlField::new("001", "ocm01047729").unwrap());
    record.append_field(ControlField::new("008", "830208s1851    nyu           000 1 eng  ").unwrap());
    record.append_field(
        DataField::new(
            "245",
            [
                Subfield::new('a', "Moby Dick, or, The whale /"),
                Subfield::new('c', "by Herman Melville."),
            ],
            Some("1"),
            Some("0"),
        )
        .unwrap(),
    );
    record.append_field(
        DataField::new(
            "650",
            [
                Subfield::new('a', "Whaling ships"),
                Subfield::new('v', "Fiction."),
            ],
            None,
            Some("0"),
        )
        .unwrap(),
    );
    record
}

fn ascii_number(bytes: &[u8]) -> usize {
    std::str::from_utf8(bytes).unwrap().parse().unwrap()
}

#[test]
fn directory_offsets_are_contiguous() {
    let record = sample_record();
    let directory = RecordEncoder::new().build_directory(&record);
    assert_eq!(directory.entries.len(), 4);
    assert_eq!(directory.entries[0].offset, 0);
    for pair in directory.entries.windows(2) {
        assert_eq!(pair[1].offset, pair[0].offset + pair[0].length);
    }
    let body: usize = directory.fields.iter().map(Vec::len).sum();
    assert_eq!(directory.base_address, 24 + 12 * 4 + 1);
    assert_eq!(directory.total_length, directory.base_address + body + 1);
}

#[test]
fn raw_layout_matches_directory() {
    let mut record = sample_record();
    let raw = encode_record(&mut record);
    let base = 24 + 12 * 4 + 1;

    assert_eq!(ascii_number(&raw[0..5]), raw.len());
    assert_eq!(ascii_number(&raw[12..17]), base);
    assert_eq!(raw[base - 1], 0x1e);
    assert_eq!(raw.last(), Some(&0x1d));

    for entry in raw[24..base - 1].chunks(12) {
        let length = ascii_number(&entry[3..7]);
        let offset = ascii_number(&entry[7..12]);
        assert_eq!(raw[base + offset + length - 1], 0x1e, "{:?}", &entry[..3]);
    }
}

#[test]
fn leader_fixed_positions_are_overwritten() {
    let mut record = sample_record();
    record.set_leader("99999cam a9999999 a 9999");
    let raw = encode_record(&mut record);
    let leader = record.leader();
    assert_eq!(&leader[10..12], "22");
    assert_eq!(&leader[20..24], "4500");
    assert_eq!(&leader[5..10], "cam a");
    assert_eq!(&leader[17..20], " a ");
    assert_eq!(&raw[..24], leader.as_bytes());
    assert!(record.warnings().is_empty());
}

#[test]
fn attached_empty_fields_vanish() {
    let mut record = sample_record();
    record.append_field(ControlField::new("003", "").unwrap());
    record.append_field(
        DataField::new("500", [Subfield::new('a', ""), Subfield::new('5', "")], None, None)
            .unwrap(),
    );
    record.append_field(DataField::new("590", Vec::<Subfield>::new(), None, None).unwrap());
    assert_eq!(record.len(), 7);

    let raw = encode_record(&mut record);
    let decoded = decode_record(&raw).unwrap();
    assert_eq!(decoded.len(), 4);
    assert!(decoded.get_field("003").is_none());
    assert!(decoded.get_field("500").is_none());
    assert!(decoded.get_field("590").is_none());
}

#[test]
fn empty_subfields_are_not_written() {
    let mut record = Record::new();
    record.append_field(
        DataField::new(
            "245",
            [
                Subfield::new('a', "Title"),
                Subfield::new('b', ""),
                Subfield::new('c', "Author"),
            ],
            Some("0"),
            Some("0"),
        )
        .unwrap(),
    );
    let raw = encode_record(&mut record);
    assert!(raw.ends_with(b"00\x1faTitle\x1fcAuthor\x1e\x1d"));
}

#[test]
fn lengths_count_bytes_not_characters() {
    let mut record = Record::new();
    record.append_field(ControlField::new("001", "é").unwrap());
    let directory = RecordEncoder::new().build_directory(&record);
    assert_eq!(directory.entries[0].length, 3);

    let raw = encode_record(&mut record);
    assert_eq!(&raw[24..36], b"001000300000");
    assert_eq!(raw.len(), 24 + 12 + 1 + 3 + 1);
}

#[test]
fn overlong_leader_is_truncated_with_warning() {
    let mut record = sample_record();
    record.set_leader("00000cam a2200000 a 4500 trailing junk");
    let raw = encode_record(&mut record);
    assert_eq!(record.leader().len(), 24);
    assert_eq!(&raw[..24], record.leader().as_bytes());

    let warning = record.warnings().last().unwrap();
    assert_eq!(warning.kind(), ErrorKind::LeaderTooLong);
    assert_eq!(
        warning.message(),
        "Input leader was too long; truncated to 24 characters"
    );
    assert!(decode_record(&raw).unwrap().warnings().is_empty());
}

#[test]
fn short_leader_is_padded() {
    let mut record = Record::with_leader("");
    record.append_field(ControlField::new("001", "x").unwrap());
    let raw = encode_record(&mut record);
    assert_eq!(record.leader(), "00040     2200037   4500");
    assert_eq!(raw.len(), 40);
}

#[test]
fn empty_record_encodes_to_bare_frame() {
    let mut record = Record::new();
    let raw = encode_record(&mut record);
    assert_eq!(raw.len(), 26);
    assert_eq!(&raw[..5], b"00026");
    assert_eq!(&raw[12..17], b"00025");
    assert_eq!(&raw[24..], b"\x1e\x1d");
    let decoded = decode_record(&raw).unwrap();
    assert!(decoded.is_empty());
    assert!(decoded.warnings().is_empty());
}

#[test]
fn to_raw_delegates_to_encoder() {
    let mut a = sample_record();
    let mut b = sample_record();
    assert_eq!(a.to_raw(), RecordEncoder::new().encode(&mut b));
}

#[test]
fn multibyte_leader_still_encodes_24_bytes() {
    let mut record = Record::with_leader(format!("0000é{}", " ".repeat(18)));
    record.append_field(ControlField::new("001", "id").unwrap());
    let raw = encode_record(&mut record);

    assert_eq!(record.leader(), "00041     2200037   4500");
    assert_eq!(&raw[..24], record.leader().as_bytes());
    let kinds: Vec<_> = record.warnings().iter().map(|w| w.kind()).collect();
    assert_eq!(kinds, [ErrorKind::LeaderNotAscii]);

    let decoded = decode_record(&raw).unwrap();
    assert!(decoded.warnings().is_empty(), "{:?}", decoded.warnings());
    assert_eq!(
        decoded.get_field("001").and_then(Field::as_control).map(|f| f.data()),
        Some("id")
    );
}

#[test]
fn field_too_long_for_directory_is_dropped_with_warning() {
    let mut record = Record::new();
    record.append_field(ControlField::new("001", "id").unwrap());
    record.append_field(
        DataField::new("505", [Subfield::new('a', "x".repeat(10_000))], Some("0"), None).unwrap(),
    );
    record.append_field(DataField::new("650", [Subfield::new('a', "Cats")], None, Some("0")).unwrap());
    let raw = encode_record(&mut record);

    let warning = record.warnings().last().unwrap();
    assert_eq!(warning.kind(), ErrorKind::FieldTooLong);
    assert_eq!(warning.kind().code(), -24);
    assert_eq!(
        warning.message(),
        r#"Field "505" (10005 bytes at offset 3) does not fit the directory and was not written"#
    );
    assert_eq!(record.len(), 3);

    let decoded = decode_record(&raw).unwrap();
    assert!(decoded.warnings().is_empty(), "{:?}", decoded.warnings());
    let tags: Vec<String> = decoded.fields().map(|f| f.tag().to_string()).collect();
    assert_eq!(tags, ["001", "650"]);
}
