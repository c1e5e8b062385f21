use std::io::Cursor;

use mindwave_core::{
    DataPointReader, PacketFramer, Reading, ReaderError, StreamByteSource, encode_packet,
    parse_payload,
};

fn stream(bytes: Vec<u8>) -> StreamByteSource<Cursor<Vec<u8>>> {
    StreamByteSource::with_chunk_size(Cursor::new(bytes), 7)
}

fn valid_payloads() -> Vec<Vec<u8>> {
    vec![
        vec![0x02, 0x00],
        vec![0x80, 0x02, 0x12, 0x34],
        vec![0x04, 0x40, 0x05, 0x20],
        vec![0x16, 0x80],
    ]
}

#[test]
fn resync_after_corrupted_packet_yields_every_valid_payload() {
    let mut corrupted = encode_packet(&[0x04, 0x25, 0x05, 0x35]).unwrap();
    corrupted[4] ^= 0x40;
    let mut bytes = corrupted;
    for payload in valid_payloads() {
        bytes.extend(encode_packet(&payload).unwrap());
    }

    let mut framer = PacketFramer::new(stream(bytes));
    let mut framed = Vec::new();
    loop {
        match framer.next_payload() {
            Ok(payload) => framed.push(payload),
            Err(err) if err.is_end_of_stream() => break,
            Err(err) => panic!("unexpected source error: {err}"),
        }
    }

    assert_eq!(framed, valid_payloads());
    assert_eq!(framer.stats().packets_rejected, 1);
}

#[test]
fn noise_between_packets_is_skipped() {
    let mut bytes = vec![0x00, 0xAA, 0x10, 0xFF];
    bytes.extend(encode_packet(&[0x04, 0x25]).unwrap());
    bytes.extend([0x13, 0x37]);
    bytes.extend(encode_packet(&[0x05, 0x35]).unwrap());

    let mut reader = DataPointReader::new(stream(bytes));
    reader.start().unwrap();
    let first = reader.read_next_data_point().unwrap();
    let second = reader.read_next_data_point().unwrap();
    assert!(matches!(first.reading, Reading::Attention(a) if a.level == 0x25));
    assert!(matches!(second.reading, Reading::Meditation(m) if m.level == 0x35));
    assert_eq!(reader.stats().bytes_skipped, 6);
}

#[test]
fn end_to_end_payload_decodes_in_order() {
    let payload = [0x02, 0x55, 0x04, 0x25, 0x80, 0x02, 0x60, 0x00];
    let mut reader = DataPointReader::new(stream(encode_packet(&payload).unwrap()));

    let points: Vec<_> = (0..3)
        .map(|_| reader.read_next_data_point().unwrap())
        .collect();
    assert!(matches!(points[0].reading, Reading::PoorSignalLevel(s) if s.noise == 0x55));
    assert!(matches!(points[1].reading, Reading::Attention(a) if a.level == 0x25));
    assert!(matches!(points[2].reading, Reading::Raw(r) if r.value == 0x6000));
    assert!(reader.read_next_data_point().unwrap_err().is_end_of_stream());
}

#[test]
fn decoder_preserves_row_order() {
    let rows: [&[u8]; 5] = [
        &[0x16, 0x01],
        &[0x04, 0x02],
        &[0x80, 0x02, 0x00, 0x03],
        &[0x05, 0x04],
        &[0x02, 0x05],
    ];
    let payload: Vec<u8> = rows.concat();
    let kinds: Vec<_> = parse_payload(&payload)
        .unwrap()
        .iter()
        .map(|p| p.reading.kind())
        .collect();
    assert_eq!(kinds, ["blink", "attention", "raw", "meditation", "poor_signal_level"]);
}

#[test]
fn unknown_row_code_is_an_explicit_error() {
    let mut reader = DataPointReader::new(stream(encode_packet(&[0x99]).unwrap()));
    let err = reader.read_next_data_point().unwrap_err();
    assert!(matches!(err, ReaderError::Decode(_)));
    assert!(err.to_string().contains("unknown row code 0x99"));
}

#[test]
fn contact_threshold_through_the_pipeline() {
    let bytes = [encode_packet(&[0x02, 199]).unwrap(), encode_packet(&[0x02, 200]).unwrap()]
        .concat();
    let mut reader = DataPointReader::new(stream(bytes));
    let Reading::PoorSignalLevel(first) = reader.read_next_data_point().unwrap().reading else {
        panic!("expected poor signal level");
    };
    let Reading::PoorSignalLevel(second) = reader.read_next_data_point().unwrap().reading else {
        panic!("expected poor signal level");
    };
    assert!(first.has_skin_contact());
    assert!(!second.has_skin_contact());
}
