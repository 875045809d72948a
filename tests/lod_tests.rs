use std::borrow::Cow;
use telemetry_chart::decimation::{decimate, decimate_into, stride_for};

#[test]
fn test_under_budget_is_borrowed_unchanged() {
    let points: Vec<u32> = (0..100).collect();
    let out = decimate(&points, 100);
    assert!(matches!(out, Cow::Borrowed(_)));
    assert_eq!(&*out, &points[..]);
}

#[test]
fn test_fixed_stride_keeps_last_point() {
    let points: Vec<u32> = (0..10).collect();
    // stride ceil(10/4) = 3 -> 0,3,6,9; 9 is already the last point.
    assert_eq!(&*decimate(&points, 4), &[0, 3, 6, 9]);

    let points: Vec<u32> = (0..11).collect();
    // 0,3,6,9 then the skipped last point.
    assert_eq!(&*decimate(&points, 4), &[0, 3, 6, 9, 10]);
}

#[test]
fn test_output_bounded_by_budget_plus_one() {
    let points: Vec<u32> = (0..5_000).collect();
    for max in [1, 2, 7, 100, 1_999, 2_000, 4_999] {
        let out = decimate(&points, max);
        assert!(out.len() <= max + 1, "max {max} gave {}", out.len());
        assert_eq!(out.last(), points.last());
        assert_eq!(out.first(), points.first());
    }
}

#[test]
fn test_zero_budget_behaves_like_one() {
    let points: Vec<u32> = (0..10).collect();
    assert_eq!(&*decimate(&points, 0), &*decimate(&points, 1));
    assert_eq!(&*decimate(&points, 0), &[0, 9]);
    assert_eq!(stride_for(10, 0), 10);
}

#[test]
fn test_empty_and_single_inputs() {
    let empty: Vec<u32> = Vec::new();
    assert!(decimate(&empty, 10).is_empty());
    assert_eq!(&*decimate(&[7u32], 0), &[7]);
}

#[test]
fn test_decimate_into_reuses_buffer() {
    let points: Vec<u32> = (0..1_000).collect();
    let mut buf = vec![42; 3];
    decimate_into(&points, 10, &mut buf);
    assert_eq!(buf.len(), 11);
    assert_eq!(buf[0], 0);
    assert_eq!(*buf.last().unwrap(), 999);
    assert_eq!(&*decimate(&points, 10), &buf[..]);
}
