use std::path::Path;

use itertools::Itertools;

use crate::ParserError;
use crate::common::types::Vector3;
use crate::placement::types::{INNER_STRIDE, OUTER_STRIDE, PlacementRecord};

pub struct PlacementReader {}

impl PlacementReader {
    pub fn parse_outer_file(path: &Path) -> Result<Vec<PlacementRecord>, ParserError> {
        Self::parse_records(&std::fs::read_to_string(path)?, OUTER_STRIDE)
    }

    pub fn parse_inner_file(path: &Path) -> Result<Vec<PlacementRecord>, ParserError> {
        Self::parse_records(&std::fs::read_to_string(path)?, INNER_STRIDE)
    }

    /// Fixed-stride records: id, position, rotation, (flagged) scale, reference and, for the outer
    /// stride, one trailing field. Trailing blank lines are tolerated, a truncated record is not.
    pub fn parse_records(content: &str, stride: usize) -> Result<Vec<PlacementRecord>, ParserError> {
        if stride != OUTER_STRIDE && stride != INNER_STRIDE {
            return Err(ParserError::format(format!("Unsupported placement stride {stride}")));
        }

        let lines = content.lines().map(str::trim).collect_vec();
        let used = lines
            .iter()
            .rposition(|line| !line.is_empty())
            .map_or(0, |last| last + 1);

        if used % stride != 0 {
            return Err(ParserError::format(format!(
                "{used} placement lines are not a multiple of the record stride {stride}"
            )));
        }

        lines[..used]
            .chunks_exact(stride)
            .map(Self::parse_record)
            .collect()
    }

    fn parse_record(record: &[&str]) -> Result<PlacementRecord, ParserError> {
        let position = parse_csv(record[1])?;
        let [px, py, pz] = position.as_slice() else {
            return Err(ParserError::format(format!("Position needs 3 values: {}", record[1])));
        };

        let rotation: [f64; 9] = parse_csv(record[2])?
            .try_into()
            .map_err(|_| ParserError::format(format!("Rotation needs 9 values: {}", record[2])))?;

        let (scale_flag, scale) = parse_scale(record[3])?;

        if record[4].is_empty() {
            return Err(ParserError::format(format!("Placement {} references no file", record[0])));
        }

        Ok(PlacementRecord {
            id: record[0].to_string(),
            position: Vector3::new(*px, *py, *pz),
            rotation,
            scale_flag,
            scale,
            reference: record[4].to_string(),
            trailing: record.get(5).map(|field| field.to_string()),
        })
    }
}

fn parse_csv(line: &str) -> Result<Vec<f64>, ParserError> {
    line.split(',')
        .map(str::trim)
        .map(|value| {
            value
                .parse::<f64>()
                .map_err(|_| ParserError::format(format!("`{value}` is not a number in: {line}")))
        })
        .collect()
}

/// `flag,x,y,z` or plain `x,y,z`.
fn parse_scale(line: &str) -> Result<(Option<String>, Vector3), ParserError> {
    let fields = line.split(',').map(str::trim).collect_vec();
    let (flag, values) = match fields.len() {
        4 => (Some(fields[0].to_string()), &fields[1..]),
        3 => (None, &fields[..]),
        _ => return Err(ParserError::format(format!("Scale needs 3 values and an optional flag: {line}"))),
    };

    let values = parse_csv(&values.join(","))?;
    Ok((flag, Vector3::new(values[0], values[1], values[2])))
}
