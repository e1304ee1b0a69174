use bytes::Buf;
use float64_array_le::{ArrayBuffer, Error, Float64ArrayLE, Source, float64_array_le};
use proptest::prelude::*;

#[test]
fn test_of_with_scenario_values_has_expected_layout() {
    let arr = float64_array_le![1.5, -2.25, 0];
    assert_eq!(arr.len(), 3);
    assert_eq!(arr.to_vec(), vec![1.5, -2.25, 0.0]);
    assert_eq!(arr.byte_length(), 24);
}

#[test]
fn test_from_map_with_doubling_callback_returns_doubled_values() {
    let arr = Float64ArrayLE::from_map(&[1, 2, 3], |v, _| v * 2.0).unwrap();
    assert_eq!(arr.to_vec(), vec![2.0, 4.0, 6.0]);
}

#[test]
fn test_from_buffer_with_sixteen_bytes_returns_two_elements() {
    let buf = ArrayBuffer::new(16);
    assert_eq!(Float64ArrayLE::from_buffer(buf.clone()).unwrap().len(), 2);
    assert_eq!(Float64ArrayLE::from_buffer_offset(buf, 8).unwrap().len(), 1);
}

#[test]
fn test_from_buffer_with_external_bytes_decodes_little_endian() {
    let mut raw = Vec::new();
    raw.extend_from_slice(&3.25f64.to_le_bytes());
    raw.extend_from_slice(&(-1.0f64).to_le_bytes());
    let arr = Float64ArrayLE::from_buffer(ArrayBuffer::from(raw)).unwrap();
    assert_eq!(arr.to_vec(), vec![3.25, -1.0]);
}

#[test]
fn test_from_buffer_view_shares_memory_with_other_views() {
    let buf = ArrayBuffer::new(32);
    let mut first = Float64ArrayLE::from_buffer_view(buf.clone(), 0, 2).unwrap();
    let second = Float64ArrayLE::from_buffer_view(buf.clone(), 8, 3).unwrap();
    first.set(1, 7.0).unwrap();
    assert_eq!(second.get(0), Some(7.0));
    assert_eq!(&buf.to_bytes()[8..16], &7.0f64.to_le_bytes());
}

#[test]
fn test_construct_with_insufficient_buffer_propagates_storage_error() {
    let err = Float64ArrayLE::construct(Source::BufferViewSized(ArrayBuffer::new(16), 8, 4))
        .unwrap_err();
    assert_eq!(
        err,
        Error::InsufficientBuffer {
            byte_offset: 8,
            length: 4,
            byte_length: 16
        }
    );
}

#[test]
fn test_from_source_with_length_returns_invalid_argument() {
    assert!(matches!(
        Float64ArrayLE::from_source(42usize),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn test_from_source_result_does_not_alias_source() {
    let mut src = Float64ArrayLE::of(&[1.0, 2.0]);
    let mut out = Float64ArrayLE::from_source(&src).unwrap();
    out.set(0, 100.0).unwrap();
    assert_eq!(src.get(0), Some(1.0));
    src.set(1, -5.0).unwrap();
    assert_eq!(out.get(1), Some(2.0));
}

#[test]
fn test_write_to_with_sink_produces_readable_little_endian_doubles() {
    let arr = Float64ArrayLE::of(&[std::f64::consts::PI, f64::MIN_POSITIVE]);
    let mut sink = Vec::new();
    arr.write_to(&mut sink);
    let mut reader = sink.as_slice();
    assert_eq!(reader.get_f64_le(), std::f64::consts::PI);
    assert_eq!(reader.get_f64_le(), f64::MIN_POSITIVE);
    assert!(!reader.has_remaining());
}

proptest! {
    #[test]
    fn test_with_length_with_any_length_is_zeroed(n in 0usize..256) {
        let arr = Float64ArrayLE::with_length(n);
        prop_assert_eq!(arr.len(), n);
        prop_assert!(arr.iter().all(|v| v == 0.0));
    }

    #[test]
    fn test_of_with_finite_values_reads_back(values in proptest::collection::vec(-1e300f64..1e300, 0..64)) {
        let arr = Float64ArrayLE::of(&values);
        prop_assert_eq!(arr.len(), values.len());
        prop_assert_eq!(arr.to_vec(), values);
    }

    #[test]
    fn test_from_map_with_collection_matches_callback(values in proptest::collection::vec(-1e6f64..1e6, 0..64)) {
        let f = |v: f64, i: usize| v * 3.0 - i as f64;
        let arr = Float64ArrayLE::from_map(&values, f).unwrap();
        prop_assert_eq!(arr.len(), values.len());
        for (i, v) in values.iter().enumerate() {
            prop_assert_eq!(arr.get(i), Some(f(*v, i)));
        }
    }

    #[test]
    fn test_from_source_with_iterable_matches_drained_sequence(values in proptest::collection::vec(any::<i32>(), 0..64)) {
        let arr = Float64ArrayLE::from_source(Source::iterable(values.clone())).unwrap();
        let expected: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
        prop_assert_eq!(arr.to_vec(), expected);
    }

    #[test]
    fn test_to_bytes_with_any_value_round_trips_through_le_bytes(x in any::<f64>()) {
        let bytes = Float64ArrayLE::of(&[x]).to_bytes();
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes);
        prop_assert_eq!(f64::from_le_bytes(raw).to_bits(), x.to_bits());
    }
}
