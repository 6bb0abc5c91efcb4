use marc21::{
    decode_record, encode_record, ControlField, DataField, Field, Record, RecordEncoder, Subfield,
};
use proptest::prelude::*;

fn arb_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .,:;/()'éøü-]{1,24}"
}

fn arb_control() -> impl Strategy<Value = Field> {
    (1u16..=9, arb_text()).prop_map(|(n, data)| {
        ControlField::new(&format!("{n:03}"), data).unwrap().into()
    })
}

fn arb_subfield() -> impl Strategy<Value = Subfield> {
    (
        prop::sample::select(vec!['a', 'b', 'c', 'x', 'v', '0', '2', '6']),
        arb_text(),
    )
        .prop_map(|(code, data)| Subfield::new(code, data))
}

fn arb_indicator() -> impl Strategy<Value = char> {
    prop::sample::select(vec![' ', '0', '1', '2', '4', '7'])
}

fn arb_data() -> impl Strategy<Value = Field> {
    (
        10u16..=999,
        arb_indicator(),
        arb_indicator(),
        prop::collection::vec(arb_subfield(), 1..6),
    )
        .prop_map(|(n, ind1, ind2, subfields)| {
            DataField::new(
                &format!("{n:03}"),
                subfields,
                Some(&ind1.to_string()),
                Some(&ind2.to_string()),
            )
            .unwrap()
            .into()
        })
}

fn arb_record() -> impl Strategy<Value = Record> {
    prop::collection::vec(prop_oneof![arb_control(), arb_data()], 0..20).prop_map(|fields| {
        let mut record = Record::with_leader("00000nam a2200000 a 4500");
        for field in fields {
            record.append_field(field);
        }
        record
    })
}

proptest! {
    #[test]
    fn decode_inverts_encode(record in arb_record()) {
        let mut original = record.clone();
        let raw = encode_record(&mut original);
        let decoded = decode_record(&raw).unwrap();

        prop_assert!(decoded.warnings().is_empty(), "{:?}", decoded.warnings());
        prop_assert_eq!(decoded.len(), record.len());
        for (left, right) in decoded.fields().zip(record.fields()) {
            prop_assert_eq!(left, right);
        }
        prop_assert_eq!(decoded.leader(), original.leader());
    }

    #[test]
    fn directory_is_contiguous(record in arb_record()) {
        let directory = RecordEncoder::new().build_directory(&record);
        let mut expected = 0;
        for (entry, body) in directory.entries.iter().zip(&directory.fields) {
            prop_assert_eq!(entry.offset, expected);
            prop_assert_eq!(entry.length, body.len());
            expected += entry.length;
        }
        prop_assert_eq!(directory.total_length, directory.base_address + expected + 1);
    }

    #[test]
    fn terminated_input_never_fails(mut bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        bytes.push(0x1d);
        prop_assert!(decode_record(&bytes).is_ok());
    }

    #[test]
    fn unterminated_input_always_fails(mut bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        if bytes.last() == Some(&0x1d) {
            bytes.push(b'x');
        }
        prop_assert!(decode_record(&bytes).is_err());
    }

    #[test]
    fn re_encoding_is_stable(record in arb_record()) {
        let mut once = record.clone();
        let first = encode_record(&mut once);
        let mut decoded = decode_record(&first).unwrap();
        prop_assert_eq!(encode_record(&mut decoded), first);
    }
}
