use super::*;
use std::error::Error as _;

fn not_found() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "gone")
}

#[test]
fn scan_error_exposes_kind_and_path() {
    let open = ScanError::open(Path::new("/tmp/a"), not_found());
    assert_eq!(open.kind(), ErrorKind::Open);
    assert_eq!(open.path(), Path::new("/tmp/a"));
    assert_eq!(open.to_string(), "open /tmp/a: gone");

    let read = ScanError::read(Path::new("/tmp/b"), not_found());
    assert_eq!(read.kind(), ErrorKind::Read);
    assert_eq!(read.to_string(), "read /tmp/b: gone");
    assert!(read.source().is_some(), "io error should be the source");
}

#[test]
fn empty_aggregate_collapses_to_none() {
    assert!(AggregatedError::default().into_option().is_none());
}

#[test]
fn aggregate_keeps_arrival_order_and_joins_lines() {
    let mut agg = AggregatedError::default();
    agg.push(ScanError::open(Path::new("x"), not_found()));
    agg.push(ScanError::read(Path::new("y"), not_found()));

    let agg = agg.into_option().expect("two errors collected");
    assert_eq!(agg.len(), 2);
    assert!(!agg.is_empty());
    assert_eq!(agg.to_string(), "open x: gone\nread y: gone");

    let paths: Vec<_> = agg.errors().iter().map(|e| e.path().to_path_buf()).collect();
    assert_eq!(paths, vec![PathBuf::from("x"), PathBuf::from("y")]);

    assert_eq!(agg.into_errors().len(), 2);
}
