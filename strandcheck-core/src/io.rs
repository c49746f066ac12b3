use std::ffi::OsStr;
use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use log::{info, warn};

use crate::consts::{FORWARD_COLUMN, REVERSE_COLUMN, STDIN_PATH};
use crate::errors::RecordParseError;
use crate::models::StrandCountObservation;

///
/// Column layout of a strand count file.
///
/// Both layouts start with `total fwd rev unmapped secondary supplementary`;
/// they differ in where the label sits.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordLayout {
    /// `total fwd rev unmapped sec supp label [...]`. The label is a file name
    /// or a chunk label such as `1M`.
    #[default]
    Sample,
    /// `total fwd rev unmapped sec supp low_mapq filename`.
    Summary,
}

impl RecordLayout {
    pub fn min_columns(&self) -> usize {
        match self {
            RecordLayout::Sample => 7,
            RecordLayout::Summary => 8,
        }
    }

    pub fn label_column(&self) -> usize {
        match self {
            RecordLayout::Sample => 6,
            RecordLayout::Summary => 7,
        }
    }
}

impl FromStr for RecordLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sample" => Ok(RecordLayout::Sample),
            "summary" => Ok(RecordLayout::Summary),
            _ => Err(format!("Invalid record layout: {}", s)),
        }
    }
}

impl Display for RecordLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordLayout::Sample => write!(f, "sample"),
            RecordLayout::Summary => write!(f, "summary"),
        }
    }
}

///
/// Get a reader for either a gzip'd or a plain text file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Same as [`get_dynamic_reader`], but `-` reads from standard input.
///
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path_str == STDIN_PATH {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        get_dynamic_reader(Path::new(file_path_str))
    }
}

///
/// Parse a single, already trimmed, non-empty record.
///
/// # Arguments
///
/// - line: the record text
/// - line_num: 1-based line number, used for error reporting
/// - layout: where the label column sits
///
pub fn parse_record(
    line: &str,
    line_num: usize,
    layout: RecordLayout,
) -> Result<StrandCountObservation, RecordParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < layout.min_columns() {
        return Err(RecordParseError::TooFewColumns {
            line: line_num,
            expected: layout.min_columns(),
            found: parts.len(),
        });
    }

    let parse_count = |column: usize| {
        parts[column]
            .parse::<u64>()
            .map_err(|_| RecordParseError::InvalidCount {
                line: line_num,
                column: column + 1,
                value: parts[column].to_string(),
            })
    };

    let forward = parse_count(FORWARD_COLUMN)?;
    let reverse = parse_count(REVERSE_COLUMN)?;
    if forward.checked_add(reverse).is_none() {
        return Err(RecordParseError::CountOverflow {
            line: line_num,
            forward,
            reverse,
        });
    }
    let label = parts[layout.label_column()];

    Ok(StrandCountObservation::new(forward, reverse, label))
}

///
/// Lazy iterator over the records of a count file. Blank lines are skipped.
/// Once the underlying reader fails the iterator is exhausted.
///
pub struct CountRecords<R: BufRead> {
    lines: Lines<R>,
    layout: RecordLayout,
    line_num: usize,
    done: bool,
}

impl<R: BufRead> CountRecords<R> {
    pub fn new(reader: R, layout: RecordLayout) -> Self {
        CountRecords {
            lines: reader.lines(),
            layout,
            line_num: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for CountRecords<R> {
    type Item = Result<StrandCountObservation, RecordParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let line = self.lines.next()?;
            self.line_num += 1;

            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    self.done = true;
                    return Some(Err(RecordParseError::Io {
                        line: self.line_num,
                        source,
                    }));
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            return Some(parse_record(trimmed, self.line_num, self.layout));
        }
    }
}

///
/// Read every record of a count file. Stops at the first malformed record.
///
/// # Arguments
///
/// - path: path to a plain or gzip'd count file, or `-` for stdin
/// - layout: column layout of the file
///
pub fn read_observations(path: &str, layout: RecordLayout) -> Result<Vec<StrandCountObservation>> {
    let reader = get_dynamic_reader_w_stdin(path)?;

    let observations = CountRecords::new(reader, layout)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to parse count file: {}", path))?;

    if observations.is_empty() {
        warn!("No count records found in {}", path);
    } else {
        info!("Read {} count records from {}", observations.len(), path);
    }

    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::{Cursor, Write};

    use flate2::Compression;
    use flate2::write::GzEncoder;

    #[fixture]
    fn sample_lines() -> &'static str {
        "4000000 3117 37696 3959187 0 0 /data/ss/1-1/1-1_1.fq.gz\n\
         \n\
         4000000 37696 3117 3959187 0 0 /data/ss/1-2/1-2_1.fq.gz\n"
    }

    #[rstest]
    fn test_parse_sample_layout(sample_lines: &str) {
        let records = CountRecords::new(Cursor::new(sample_lines), RecordLayout::Sample)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(
            records,
            vec![
                StrandCountObservation::new(3117, 37696, "/data/ss/1-1/1-1_1.fq.gz"),
                StrandCountObservation::new(37696, 3117, "/data/ss/1-2/1-2_1.fq.gz"),
            ]
        );
    }

    #[rstest]
    fn test_parse_incremental_labels() {
        let input = "1000000 3117 37696 959187 0 0 1M /data/x.fq.gz\n\
                     2000000 6234 75392 1918374 0 0 2M /data/x.fq.gz\n";
        let labels: Vec<String> = CountRecords::new(Cursor::new(input), RecordLayout::Sample)
            .map(|r| r.unwrap().label)
            .collect();

        assert_eq!(labels, vec!["1M".to_string(), "2M".to_string()]);
    }

    #[rstest]
    fn test_parse_summary_layout() {
        let input = "4000000 3117 37696 3959187 0 0 100 /data/sample_1.fq.gz";
        let obs = parse_record(input, 1, RecordLayout::Summary).unwrap();

        assert_eq!(obs, StrandCountObservation::new(3117, 37696, "/data/sample_1.fq.gz"));
    }

    #[rstest]
    fn test_too_few_columns_reports_line_number() {
        let input = "4000000 3117 37696 3959187 0 0 a.fq.gz\n\n4000000 1 2\n";
        let results: Vec<_> = CountRecords::new(Cursor::new(input), RecordLayout::Sample).collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(RecordParseError::TooFewColumns {
                line,
                expected,
                found,
            }) => {
                assert_eq!(*line, 3);
                assert_eq!(*expected, 7);
                assert_eq!(*found, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[rstest]
    #[case("4000000 -5 37696 0 0 0 a.fq.gz", 2)]
    #[case("4000000 3117 many 0 0 0 a.fq.gz", 3)]
    #[case("4000000 3.5 37696 0 0 0 a.fq.gz", 2)]
    fn test_invalid_counts(#[case] line: &str, #[case] bad_column: usize) {
        let err = parse_record(line, 4, RecordLayout::Sample).unwrap_err();

        assert_eq!(err.line(), 4);
        match err {
            RecordParseError::InvalidCount { column, .. } => assert_eq!(column, bad_column),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[rstest]
    fn test_counts_overflowing_total_are_rejected() {
        let input = "0 18446744073709551615 1 0 0 0 big\n";
        let results: Vec<_> = CountRecords::new(Cursor::new(input), RecordLayout::Sample).collect();

        assert_eq!(results.len(), 1);
        match &results[0] {
            Err(RecordParseError::CountOverflow {
                line,
                forward,
                reverse,
            }) => {
                assert_eq!(*line, 1);
                assert_eq!(*forward, u64::MAX);
                assert_eq!(*reverse, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[rstest]
    fn test_invalid_utf8_stops_with_io_error() {
        let mut input = b"4000000 3117 37696 3959187 0 0 a.fq.gz\n".to_vec();
        input.extend_from_slice(&[b'1', b' ', 0xff, 0xfe, b'\n']);
        input.extend_from_slice(b"4000000 37696 3117 3959187 0 0 b.fq.gz\n");

        let mut records = CountRecords::new(Cursor::new(input), RecordLayout::Sample);

        assert!(matches!(records.next(), Some(Ok(_))));
        match records.next() {
            Some(Err(RecordParseError::Io { line, .. })) => assert_eq!(line, 2),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(records.next().is_none());
    }

    #[rstest]
    fn test_dash_selects_stdin() {
        // opening stdin must not touch the filesystem
        assert!(get_dynamic_reader_w_stdin(STDIN_PATH).is_ok());
        assert!(get_dynamic_reader(Path::new(STDIN_PATH)).is_err());
    }

    #[rstest]
    fn test_summary_layout_needs_eight_columns() {
        let err = parse_record("4000000 3117 37696 3959187 0 0 a.fq.gz", 1, RecordLayout::Summary)
            .unwrap_err();
        assert!(matches!(err, RecordParseError::TooFewColumns { expected: 8, .. }));
    }

    #[rstest]
    fn test_layout_from_str() {
        assert_eq!(RecordLayout::from_str("sample").unwrap(), RecordLayout::Sample);
        assert_eq!(RecordLayout::from_str("Summary").unwrap(), RecordLayout::Summary);
        assert!(RecordLayout::from_str("bed").is_err());
    }

    #[rstest]
    fn test_read_observations_plain_and_gzipped(sample_lines: &str) {
        let dir = tempfile::tempdir().unwrap();

        let plain = dir.path().join("sample.counts.txt");
        std::fs::write(&plain, sample_lines).unwrap();

        let gzipped = dir.path().join("sample.counts.txt.gz");
        let mut encoder = GzEncoder::new(File::create(&gzipped).unwrap(), Compression::default());
        encoder.write_all(sample_lines.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let from_plain = read_observations(plain.to_str().unwrap(), RecordLayout::Sample).unwrap();
        let from_gz = read_observations(gzipped.to_str().unwrap(), RecordLayout::Sample).unwrap();

        assert_eq!(from_plain.len(), 2);
        assert_eq!(from_plain, from_gz);
    }

    #[rstest]
    fn test_read_observations_missing_file() {
        let result = read_observations("does/not/exist.counts.txt", RecordLayout::Sample);
        assert!(result.is_err());
    }

    #[rstest]
    fn test_read_observations_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.counts.txt");
        std::fs::write(&path, "4000000 3117 37696 3959187 0 0 a.fq.gz\n4000000 x 1 0 0 0 b\n").unwrap();

        let err = read_observations(path.to_str().unwrap(), RecordLayout::Sample).unwrap_err();
        let parse_err = err.downcast_ref::<RecordParseError>().unwrap();
        assert_eq!(parse_err.line(), 2);
    }
}
