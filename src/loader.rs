//! Plain-text point lists.
//!
//! One point per line, as whitespace separated integers; the last two
//! integers on a line are its `x` and `y`, so an index or a `2->`
//! style prefix is tolerated. Blank lines, `#` and `//` comments, and
//! lines with fewer than two integers are skipped.

use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::{debug, trace};

use crate::{Error, Point2D, Result};

/// Fewest distinct points that make a shape.
pub const MIN_POINTS: usize = 3;

/// Parse distinct points, in order of first appearance.
///
/// Fails with [`Error::TooManyPoints`] as soon as more than
/// `max_points` distinct points were read, and with
/// [`Error::TooFewPoints`] if fewer than [`MIN_POINTS`] were found.
pub fn parse_points<R: BufRead>(reader: R, max_points: usize) -> Result<Vec<Point2D>> {
    let mut seen = HashSet::new();
    let mut points = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        let line = line.replace("->", " ");
        let numbers: Vec<i32> = line
            .split_whitespace()
            .filter_map(|token| token.parse().ok())
            .collect();
        let p = match numbers.as_slice() {
            [.., x, y] => Point2D::new(*x, *y),
            _ => {
                trace!("skipping line {}: {line:?}", number + 1);
                continue;
            }
        };

        if seen.insert(p) {
            points.push(p);
            if points.len() > max_points {
                return Err(Error::TooManyPoints {
                    found: points.len(),
                    max: max_points,
                });
            }
        }
    }

    if points.len() < MIN_POINTS {
        return Err(Error::TooFewPoints {
            found: points.len(),
            min: MIN_POINTS,
        });
    }
    debug!("parsed {} distinct points", points.len());
    Ok(points)
}

pub fn parse_points_str(text: &str, max_points: usize) -> Result<Vec<Point2D>> {
    parse_points(text.as_bytes(), max_points)
}

pub fn load_points_file<P: AsRef<Path>>(path: P, max_points: usize) -> Result<Vec<Point2D>> {
    let file = File::open(path.as_ref())?;
    parse_points(BufReader::new(file), max_points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_pairs() {
        let points = parse_points_str("1 2\n3 4\n5 6\n", 100).unwrap();
        assert_eq!(
            points,
            vec![Point2D::new(1, 2), Point2D::new(3, 4), Point2D::new(5, 6)]
        );
    }

    #[test]
    fn prefixes_comments_and_noise() {
        let text = "\
            # exported shape\n\
            // another comment\n\
            x y\n\
            \n\
            2->123 456\n\
            7\t-8   9\n\
            header only 5\n\
            10 11\n";
        let points = parse_points_str(text, 100).unwrap();
        assert_eq!(
            points,
            vec![Point2D::new(123, 456), Point2D::new(-8, 9), Point2D::new(10, 11)]
        );
    }

    #[test]
    fn duplicates_are_dropped() {
        let points = parse_points_str("1 1\n2 2\n1 1\n3 3\n2 2\n", 100).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], Point2D::new(3, 3));
    }

    #[test]
    fn too_few_points() {
        match parse_points_str("1 1\n1 1\n2 2\n", 100) {
            Err(Error::TooFewPoints { found: 2, min: 3 }) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn too_many_points() {
        let text: String = (0..10).map(|i| format!("{i} {i}\n")).collect();
        match parse_points_str(&text, 5) {
            Err(Error::TooManyPoints { found: 6, max: 5 }) => {}
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(parse_points_str(&text, 10).unwrap().len(), 10);
    }

    #[test]
    fn points_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# car outline").unwrap();
        for (i, (x, y)) in [(0, 0), (40, 0), (40, 20), (0, 20)].iter().enumerate() {
            writeln!(file, "{i}->{x} {y}").unwrap();
        }
        file.flush().unwrap();

        let points = load_points_file(file.path(), 10).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[2], Point2D::new(40, 20));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_points_file("/nonexistent/shape.txt", 10).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
