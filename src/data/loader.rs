use std::path::Path;

use csv::StringRecord;

use super::error::{DataError, FieldError};
use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Source columns
// ---------------------------------------------------------------------------

pub const COL_TITLE: &str = "Series_Title";
pub const COL_GENRE: &str = "Genre";
pub const COL_YEAR: &str = "Released_Year";
pub const COL_RATING: &str = "IMDB_Rating";
pub const COL_REVENUE: &str = "Gross";
pub const COL_VOTES: &str = "No_of_Votes";

/// Every column the source table must carry, in record field order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_TITLE,
    COL_GENRE,
    COL_YEAR,
    COL_RATING,
    COL_REVENUE,
    COL_VOTES,
];

/// Positions of the required columns inside a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    title: usize,
    genre: usize,
    year: usize,
    rating: usize,
    revenue: usize,
    votes: usize,
}

impl ColumnIndex {
    /// Locate the required columns, or report all of the missing ones.
    fn resolve(headers: &StringRecord) -> Result<Self, Vec<String>> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let found: Vec<Option<usize>> = REQUIRED_COLUMNS.iter().map(|&c| find(c)).collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .zip(&found)
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let idx: Vec<usize> = found.into_iter().flatten().collect();
        Ok(ColumnIndex {
            title: idx[0],
            genre: idx[1],
            year: idx[2],
            rating: idx[3],
            revenue: idx[4],
            votes: idx[5],
        })
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean the movie table at `path`.
///
/// Rows with any missing or unparsable required field are dropped and
/// counted in [`Dataset::dropped_rows`]; only a missing file, a missing
/// column or a structurally broken file fails the whole load.
pub fn load_csv(path: &Path) -> Result<Dataset, DataError> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| DataError::from_csv(path.to_path_buf(), e))?;
    read_records(reader, path)
}

/// Shared body of [`load_csv`], generic over the byte source so tests can
/// feed in-memory tables.
pub fn read_records<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<Dataset, DataError> {
    let headers = reader
        .headers()
        .map_err(|e| DataError::from_csv(path.to_path_buf(), e))?
        .clone();

    let columns = ColumnIndex::resolve(&headers).map_err(|missing| DataError::Malformed {
        path: path.to_path_buf(),
        missing,
    })?;

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(|e| DataError::from_csv(path.to_path_buf(), e))?;
        match parse_row(&row, &columns) {
            Ok(record) => records.push(record),
            Err(reason) => {
                log::debug!("{}: dropping row {}: {reason}", path.display(), row_no + 1);
                dropped += 1;
            }
        }
    }

    log::info!(
        "Loaded {} movies from {} ({} rows dropped)",
        records.len(),
        path.display(),
        dropped
    );

    Ok(Dataset::from_records(records, dropped))
}

// ---------------------------------------------------------------------------
// Row coercion
// ---------------------------------------------------------------------------

fn parse_row(row: &StringRecord, columns: &ColumnIndex) -> Result<Record, FieldError> {
    let title = parse_text(row, columns.title, COL_TITLE)?;
    let genre = parse_text(row, columns.genre, COL_GENRE)?;
    let year = parse_year(field(row, columns.year, COL_YEAR)?)?;
    let rating = parse_rating(field(row, columns.rating, COL_RATING)?)?;
    let revenue = parse_revenue(field(row, columns.revenue, COL_REVENUE)?)?;
    let votes = parse_votes(field(row, columns.votes, COL_VOTES)?)?;

    Ok(Record {
        title,
        genre,
        year,
        rating,
        revenue,
        votes,
    })
}

/// Trimmed, non-empty cell content.
fn field<'r>(
    row: &'r StringRecord,
    idx: usize,
    column: &'static str,
) -> Result<&'r str, FieldError> {
    match row.get(idx).map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(FieldError::Missing { column }),
    }
}

fn parse_text(row: &StringRecord, idx: usize, column: &'static str) -> Result<String, FieldError> {
    field(row, idx, column).map(str::to_string)
}

fn parse_f64(raw: &str, column: &'static str) -> Result<f64, FieldError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FieldError::Unparsable {
            column,
            raw: raw.to_string(),
        })
}

/// Parse a whole number that may have been written as a float (`"1994.0"`).
fn parse_whole(raw: &str, column: &'static str) -> Result<f64, FieldError> {
    let v = parse_f64(raw, column)?;
    if v.fract() != 0.0 {
        return Err(FieldError::Unparsable {
            column,
            raw: raw.to_string(),
        });
    }
    Ok(v)
}

fn out_of_range(column: &'static str, raw: &str) -> FieldError {
    FieldError::OutOfRange {
        column,
        raw: raw.to_string(),
    }
}

fn parse_year(raw: &str) -> Result<i32, FieldError> {
    if let Ok(y) = raw.parse::<i32>() {
        return Ok(y);
    }
    let v = parse_whole(raw, COL_YEAR)?;
    if v < i32::MIN as f64 || v > i32::MAX as f64 {
        return Err(out_of_range(COL_YEAR, raw));
    }
    Ok(v as i32)
}

fn parse_rating(raw: &str) -> Result<f64, FieldError> {
    let v = parse_f64(raw, COL_RATING)?;
    if !(0.0..=10.0).contains(&v) {
        return Err(out_of_range(COL_RATING, raw));
    }
    Ok(v)
}

/// Strip surrounding whitespace, a leading `$` and thousands separators.
/// Everything else is left for the number parser to accept or reject.
pub fn clean_numeric(raw: &str) -> String {
    let s = raw.trim();
    let s = s.strip_prefix('$').unwrap_or(s).trim_start();
    s.replace(',', "")
}

fn parse_revenue(raw: &str) -> Result<f64, FieldError> {
    let cleaned = clean_numeric(raw);
    if cleaned.is_empty() {
        return Err(FieldError::Unparsable {
            column: COL_REVENUE,
            raw: raw.to_string(),
        });
    }
    let v = parse_f64(&cleaned, COL_REVENUE).map_err(|_| FieldError::Unparsable {
        column: COL_REVENUE,
        raw: raw.to_string(),
    })?;
    if v < 0.0 {
        return Err(out_of_range(COL_REVENUE, raw));
    }
    Ok(v)
}

fn parse_votes(raw: &str) -> Result<u64, FieldError> {
    if let Ok(n) = raw.parse::<u64>() {
        return Ok(n);
    }
    let v = parse_whole(raw, COL_VOTES)?;
    if v < 0.0 || v > u64::MAX as f64 {
        return Err(out_of_range(COL_VOTES, raw));
    }
    Ok(v as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Poster_Link,Series_Title,Released_Year,Certificate,Runtime,Genre,IMDB_Rating,Overview,No_of_Votes,Gross\n";

    fn load_str(body: &str) -> Result<Dataset, DataError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(body.as_bytes());
        read_records(reader, Path::new("inline.csv"))
    }

    fn table(rows: &[&str]) -> String {
        let mut s = HEADER.to_string();
        for r in rows {
            s.push_str(r);
            s.push('\n');
        }
        s
    }

    #[test]
    fn projects_the_six_required_columns() {
        let ds = load_str(&table(&[
            "p,The Godfather,1972,A,175 min,\"Crime, Drama\",9.2,x,1620367,\"134,966,411\"",
        ]))
        .unwrap();
        assert_eq!(ds.len(), 1);
        let r = &ds.records()[0];
        assert_eq!(r.title, "The Godfather");
        assert_eq!(r.genre, "Crime, Drama");
        assert_eq!(r.year, 1972);
        assert_eq!(r.rating, 9.2);
        assert_eq!(r.revenue, 134_966_411.0);
        assert_eq!(r.votes, 1_620_367);
    }

    #[test]
    fn gross_with_thousands_separators() {
        assert_eq!(clean_numeric("1,234,567"), "1234567");
        assert_eq!(parse_revenue("1,234,567"), Ok(1_234_567.0));
        assert_eq!(parse_revenue(" $2,500.50 "), Ok(2500.5));
    }

    #[test]
    fn gross_keeps_scientific_notation() {
        assert_eq!(parse_revenue("1e6"), Ok(1_000_000.0));
    }

    #[test]
    fn gross_with_stray_text_is_unparsable() {
        for raw in ["$1.2M", "12 (2019)", "approx. 500", "1,2a"] {
            assert!(
                matches!(parse_revenue(raw), Err(FieldError::Unparsable { .. })),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn row_with_suffixed_gross_is_dropped() {
        let ds = load_str(&table(&[
            "p,Kept,2001,A,1,Drama,8.1,x,10,\"1,500\"",
            "p,Suffixed,2001,A,1,Drama,8.1,x,10,$1.2M",
        ]))
        .unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].revenue, 1_500.0);
        assert_eq!(ds.dropped_rows(), 1);
    }

    #[test]
    fn unparsable_rating_drops_the_row() {
        let ds = load_str(&table(&[
            "p,Good,2001,A,1,Drama,8.1,x,10,100",
            "p,Bad,2002,A,1,Drama,N/A,x,10,100",
        ]))
        .unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].title, "Good");
        assert_eq!(ds.dropped_rows(), 1);
    }

    #[test]
    fn any_missing_field_drops_the_row() {
        let ds = load_str(&table(&[
            "p,,2001,A,1,Drama,8.1,x,10,100",
            "p,No Genre,2001,A,1,,8.1,x,10,100",
            "p,No Year,PG,A,1,Drama,8.1,x,10,100",
            "p,No Gross,2001,A,1,Drama,8.1,x,10,",
            "p,No Votes,2001,A,1,Drama,8.1,x,,100",
            "p,Short Row,2001",
            "p,Kept,1994.0,A,1,Drama,8.1,x,10,100",
        ]))
        .unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].year, 1994);
        assert_eq!(ds.dropped_rows(), 6);
    }

    #[test]
    fn out_of_range_values_are_dropped() {
        assert!(matches!(parse_rating("10.5"), Err(FieldError::OutOfRange { .. })));
        assert!(matches!(parse_rating("-1"), Err(FieldError::OutOfRange { .. })));
        assert!(matches!(parse_revenue("-5"), Err(FieldError::OutOfRange { .. })));
        assert!(parse_votes("-3").is_err());
        assert!(parse_votes("12.5").is_err());
    }

    #[test]
    fn retained_records_are_fully_numeric() {
        let ds = load_str(&table(&[
            "p,A,2001,A,1,Drama,9.0,x,10,\"1,000\"",
            "p,B,1999,A,1,Comedy,nan,x,10,100",
            "p,C,1999,A,1,Comedy,7.5,x,10,inf",
            "p,D,1988,A,1,Comedy,6.0,x,20,0",
        ]))
        .unwrap();
        assert_eq!(ds.len(), 2);
        for r in ds.records() {
            assert!(r.rating.is_finite() && (0.0..=10.0).contains(&r.rating));
            assert!(r.revenue.is_finite() && r.revenue >= 0.0);
        }
    }

    #[test]
    fn missing_columns_are_malformed() {
        let err = load_str("Series_Title,Genre,IMDB_Rating\nA,Drama,8.0\n").unwrap_err();
        match err {
            DataError::Malformed { missing, .. } => {
                assert_eq!(missing, vec!["Released_Year", "Gross", "No_of_Votes"]);
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(&dir.path().join("movies.csv")).unwrap_err();
        assert!(matches!(err, DataError::Unavailable { .. }));
    }

    #[test]
    fn loads_from_disk_and_reports_year_bounds() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            table(&[
                "p,A,2001,A,1,Drama,9.2,x,10,100",
                "p,B,2020,A,1,Action,6.5,x,10,500",
            ])
            .as_bytes(),
        )
        .unwrap();
        let ds = load_csv(file.path()).unwrap();
        let bounds = ds.year_bounds().unwrap();
        assert_eq!((bounds.min(), bounds.max()), (2001, 2020));
    }
}
