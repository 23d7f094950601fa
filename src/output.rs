use crate::error::ScrapeError;
use crate::records::ResultSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Header row of the output file
pub const CSV_HEADER: [&str; 2] = ["Scholarship Name", "URL"];

/// Write the finalized result set as CSV.
///
/// Called only after the ResultSet is frozen, so a fatal failure upstream
/// never leaves a partial output file behind. An empty set still produces a
/// file with just the header row.
pub fn write_csv<P: AsRef<Path>>(path: P, results: &ResultSet) -> Result<(), ScrapeError> {
    let path = path.as_ref();

    let write_all = || -> io::Result<()> {
        let file = File::create(path)?;
        let mut w = BufWriter::new(file);

        write_row(&mut w, &CSV_HEADER)?;
        for record in results.iter() {
            write_row(&mut w, &[record.name.as_str(), record.url.as_str()])?;
        }
        w.flush()
    };

    write_all().map_err(|source| ScrapeError::OutputIo {
        path: path.display().to_string(),
        source,
    })?;

    ::log::info!("wrote {} records to {}", results.len(), path.display());
    Ok(())
}

fn write_row<W: Write>(w: &mut W, row: &[&str]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, ",")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Record;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("scholar-scrape-test-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_header_and_rows() {
        let mut results = ResultSet::new();
        results.insert(Record::new(
            "Gates Scholarship",
            "https://example.com/scholarships/gates",
        ));

        let path = temp_path("rows.csv");
        write_csv(&path, &results).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("Scholarship Name,URL"));
        assert_eq!(
            lines.next(),
            Some("Gates Scholarship,https://example.com/scholarships/gates")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_fields_with_commas_and_quotes_are_escaped() {
        let mut results = ResultSet::new();
        results.insert(Record::new(
            r#"Jack, Jill & "Friends" Fund"#,
            "https://example.com/scholarships/jack-jill",
        ));

        let path = temp_path("quoting.csv");
        write_csv(&path, &results).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(contents.contains(r#""Jack, Jill & ""Friends"" Fund""#));
    }

    #[test]
    fn test_empty_set_still_writes_header() {
        let path = temp_path("empty.csv");
        write_csv(&path, &ResultSet::new()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(contents, "Scholarship Name,URL\n");
    }
}
