use crate::ParserError;
use crate::common::types::Vector3;
use crate::placement::reader::PlacementReader;
use crate::placement::types::{INNER_STRIDE, OUTER_STRIDE};

const OUTER: &str = "building_01
10.0, 0.0, -5.5
1,0,0,0,1,0,0,0,1
1,1.0,1.0,1.0
elements\\hall.txt
0
";

const INNER: &str = "chair
0,0,0
0,0,-1,0,1,0,1,0,0
0,2,2,2
meshes/chair.obj
table
1,2,3
1,0,0,0,1,0,0,0,1
1,1,1
meshes/table.obj


";

#[test]
fn outer_records() -> Result<(), ParserError> {
    let records = PlacementReader::parse_records(OUTER, OUTER_STRIDE)?;
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.id, "building_01");
    assert_eq!(record.position, Vector3::new(10.0, 0.0, -5.5));
    assert_eq!(record.rotation, [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    assert_eq!(record.scale_flag.as_deref(), Some("1"));
    assert_eq!(record.scale, Vector3::new(1.0, 1.0, 1.0));
    assert_eq!(record.reference_path(), "elements/hall.txt");
    assert_eq!(record.trailing.as_deref(), Some("0"));
    Ok(())
}

#[test]
fn inner_records_tolerate_trailing_blank_lines() -> Result<(), ParserError> {
    let records = PlacementReader::parse_records(INNER, INNER_STRIDE)?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].scale, Vector3::new(2.0, 2.0, 2.0));
    assert_eq!(records[1].scale_flag, None);
    assert_eq!(records[1].trailing, None);
    assert_eq!(records[1].reference, "meshes/table.obj");
    Ok(())
}

#[test]
fn truncated_record_is_an_error() {
    let truncated = "chair\n0,0,0\n1,0,0,0,1,0,0,0,1\n";
    assert!(PlacementReader::parse_records(truncated, INNER_STRIDE).is_err());
}

#[test]
fn malformed_rotation_is_an_error() {
    let record = "chair\n0,0,0\n1,0,0,0,1,0\n1,1,1\nchair.obj\n";
    assert!(matches!(
        PlacementReader::parse_records(record, INNER_STRIDE),
        Err(ParserError::FormatError { .. })
    ));
}

#[test]
fn empty_file_has_no_records() -> Result<(), ParserError> {
    assert!(PlacementReader::parse_records("\n\n", OUTER_STRIDE)?.is_empty());
    Ok(())
}
