//! # Tiktoken Vocabulary IO

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use base64::{Engine, prelude::BASE64_STANDARD};

use crate::{
    errors::{RBResult, RankBpeError},
    types::TokenType,
    vocab::RankTable,
};

/// Load a [`RankTable`] from a base64 vocab file.
///
/// Lines are:
/// ```terminaloutput
/// {BASE64 SPAN} {RANK}
/// ```
///
/// ## Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_base64_rank_table_path<T, P>(path: P) -> RBResult<RankTable<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    log::debug!("loading rank table from {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    read_base64_rank_table(reader)
}

/// Read a [`RankTable`] from a base64 vocab line reader.
///
/// ## Arguments
/// * `reader` - the line reader.
pub fn read_base64_rank_table<T, R>(reader: R) -> RBResult<RankTable<T>>
where
    T: TokenType,
    R: BufRead,
{
    let table = RankTable::from_pairs(read_base64_span_pairs(reader)?)?;
    log::debug!("loaded {} ranks", table.len());
    Ok(table)
}

/// Read ``(span, rank)`` pairs from a base64 vocab line reader.
///
/// Blank lines are skipped. Duplicates are not checked here;
/// see [`RankTable::from_pairs`].
///
/// ## Arguments
/// * `reader` - the line reader.
pub fn read_base64_span_pairs<T, R>(reader: R) -> RBResult<Vec<(Vec<u8>, T)>>
where
    T: TokenType,
    R: BufRead,
{
    let mut pairs = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let s = line.trim_end();
        if s.is_empty() {
            continue;
        }
        let lineno = idx + 1;

        let Some((span, rank)) = s.split_once(' ') else {
            return Err(RankBpeError::Parse(format!(
                "line {lineno}: expected \"{{BASE64}} {{RANK}}\""
            )));
        };

        let span = BASE64_STANDARD
            .decode(span)
            .map_err(|e| RankBpeError::Parse(format!("line {lineno}: {e}")))?;

        let rank: u64 = rank
            .trim()
            .parse()
            .map_err(|e: core::num::ParseIntError| {
                RankBpeError::Parse(format!("line {lineno}: {e}"))
            })?;
        let token = T::from_u64(rank).ok_or(RankBpeError::TokenOutOfRange { rank })?;

        pairs.push((span, token));
    }

    Ok(pairs)
}

/// Save a [`RankTable`] to a base64 vocab file.
///
/// ## Arguments
/// * `table` - the table to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_base64_rank_table_path<T: TokenType, P: AsRef<Path>>(
    table: &RankTable<T>,
    path: P,
) -> RBResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_base64_rank_table(table, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a [`RankTable`] to a [`Write`] writer, sorted by rank.
///
/// ## Arguments
/// * `table` - the table to save.
/// * `writer` - the writer to target.
pub fn write_base64_rank_table<T, W>(
    table: &RankTable<T>,
    writer: &mut W,
) -> RBResult<()>
where
    T: TokenType,
    W: Write,
{
    for (span, rank) in table.sorted_pairs() {
        writeln!(writer, "{} {}", BASE64_STANDARD.encode(span), rank)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_save_load_tiktoken() {
        type T = u32;

        let table: RankTable<T> = RankTable::from_pairs([
            ("apple".as_bytes().to_vec(), 300),
            ("banana".as_bytes().to_vec(), 301),
            ("pear".as_bytes().to_vec(), 302),
        ])
        .unwrap();

        tempdir::TempDir::new("vocab_test")
            .and_then(|dir| {
                let path = dir.path().join("vocab.tiktoken");

                save_base64_rank_table_path(&table, &path).expect("Failed to save vocab");

                let loaded: RankTable<T> =
                    load_base64_rank_table_path(&path).expect("Failed to load vocab");

                assert_eq!(&loaded, &table);

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_write_sorted() {
        let table: RankTable<u32> =
            RankTable::from_pairs([(b"b".to_vec(), 1), (b"a".to_vec(), 0)]).unwrap();
        let mut buf = Vec::new();
        write_base64_rank_table(&table, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "YQ== 0\nYg== 1\n");
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let text = "YQ== 0\n\nYg== 1\r\n";
        let pairs: Vec<(Vec<u8>, u32)> = read_base64_span_pairs(Cursor::new(text)).unwrap();
        assert_eq!(pairs, vec![(b"a".to_vec(), 0), (b"b".to_vec(), 1)]);
    }

    #[test]
    fn test_read_errors() {
        let err = read_base64_span_pairs::<u32, _>(Cursor::new("YQ==\n")).unwrap_err();
        assert!(matches!(err, RankBpeError::Parse(msg) if msg.starts_with("line 1")));

        let err = read_base64_span_pairs::<u32, _>(Cursor::new("YQ== 0\n!!! 1\n")).unwrap_err();
        assert!(matches!(err, RankBpeError::Parse(msg) if msg.starts_with("line 2")));

        let err = read_base64_span_pairs::<u32, _>(Cursor::new("YQ== x\n")).unwrap_err();
        assert!(matches!(err, RankBpeError::Parse(_)));

        let err = read_base64_span_pairs::<u16, _>(Cursor::new("YQ== 70000\n")).unwrap_err();
        assert!(matches!(err, RankBpeError::TokenOutOfRange { rank: 70000 }));

        let err = read_base64_rank_table::<u32, _>(Cursor::new("YQ== 0\nYQ== 1\n")).unwrap_err();
        assert!(matches!(err, RankBpeError::VocabConflict(_)));
    }
}
