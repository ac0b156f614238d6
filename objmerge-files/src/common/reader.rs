use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::ParserError;
use crate::common::types::{Position, Vector2, Vector3};

/// Reads every line of a text asset, dropping comment lines (those starting with `#`) and trailing
/// whitespace. Blank lines and ordering are preserved.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>, ParserError> {
    let mut lines = Vec::new();
    for line_res in reader.lines() {
        let line = line_res?;
        if line.starts_with('#') {
            continue;
        }

        lines.push(line.trim_end().to_string());
    }

    Ok(lines)
}

pub fn read_file_lines(path: &Path) -> Result<Vec<String>, ParserError> {
    read_lines(BufReader::new(File::open(path)?))
}

pub fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| line.trim_end().to_string())
        .collect()
}

/// Splits a record into its keyword and the (trimmed) remainder.
pub fn split_keyword(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    }
}

/// Whether the first whitespace-delimited token of `line` is exactly `keyword`.
/// Notably, `vn 0 1 0` does not match `v`.
pub fn has_keyword(line: &str, keyword: &str) -> bool {
    split_keyword(line).0 == keyword
}

pub fn lines_with_keyword<'a>(lines: &'a [String], keyword: &'a str) -> impl Iterator<Item = &'a String> + 'a {
    lines.iter().filter(move |line| has_keyword(line, keyword))
}

/// Returns the argument of the one and only `keyword` line, e.g. the library name of `mtllib`.
pub fn mandatory_token<'a>(lines: &'a [String], keyword: &'static str) -> Result<&'a str, ParserError> {
    let mut arguments = lines_with_keyword(lines, keyword).map(|line| split_keyword(line).1);

    match (arguments.next(), arguments.next()) {
        (Some(argument), None) if !argument.is_empty() => Ok(argument),
        (Some(_), None) => Err(ParserError::format(format!("`{}` line without an argument", keyword))),
        (None, _) => Err(ParserError::MissingToken { prefix: keyword, found: 0 }),
        (Some(_), Some(_)) => Err(ParserError::MissingToken {
            prefix: keyword,
            found: 2 + arguments.count(),
        }),
    }
}

fn parse_floats<const N: usize>(line: &str) -> Result<[f64; N], ParserError> {
    let (keyword, rest) = split_keyword(line);
    let mut values = [0.0; N];
    let mut tokens = rest.split_whitespace();

    for value in values.iter_mut() {
        let token = tokens
            .next()
            .ok_or_else(|| ParserError::format(format!("`{}` record needs {} components: {}", keyword, N, line)))?;
        *value = token
            .parse()
            .map_err(|_| ParserError::format(format!("`{token}` is not a number in: {line}")))?;
    }

    Ok(values)
}

pub fn parse_vector3(line: &str) -> Result<Vector3, ParserError> {
    parse_floats::<3>(line).map(Vector3::from)
}

/// A `v` record, keeping any tokens after the third coordinate.
pub fn parse_position(line: &str) -> Result<Position, ParserError> {
    let point = parse_vector3(line)?;
    let trailing = split_keyword(line).1.split_whitespace().skip(3).collect::<Vec<_>>().join(" ");
    Ok(Position { point, trailing })
}

/// Texture coordinates may carry an optional third (`w`) component, which is ignored.
pub fn parse_vector2(line: &str) -> Result<Vector2, ParserError> {
    let [x, y] = parse_floats::<2>(line)?;
    Ok(Vector2 { x, y })
}
