use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use super::is_content_document;
use crate::error::{Context, Error, Result};
use crate::hyphen::Dictionary;
use crate::options::HyphenateOptions;
use crate::transform::html::{ScanStats, hyphenate_html};

/// What happened to one archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "snake_case"))]
pub enum EntryAction {
    /// Content document run through the scanner.
    Hyphenated(ScanStats),
    /// Copied byte for byte.
    Copied { bytes: u64 },
    /// Directory entry recreated.
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct EntryReport {
    pub name: String,
    pub action: EntryAction,
}

/// Per-entry summary of an archive rewrite, in archive order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct TransformReport {
    pub entries: Vec<EntryReport>,
}

impl TransformReport {
    /// Number of hyphenated content documents.
    pub fn documents(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.action, EntryAction::Hyphenated(_)))
            .count()
    }

    /// Scan statistics summed over all content documents.
    pub fn totals(&self) -> ScanStats {
        let mut totals = ScanStats::default();
        for entry in &self.entries {
            if let EntryAction::Hyphenated(stats) = entry.action {
                totals += stats;
            }
        }
        totals
    }
}

/// Hyphenate an EPUB file on disk, writing the result to `output`.
///
/// `output` is created or truncated. If the run fails, a partially written
/// file is left behind.
///
/// # Example
///
/// ```no_run
/// use epub_hyph::{hyphenate_epub_file, Dictionary, HyphenateOptions};
///
/// let dict = Dictionary::open("hyph-pl.tex")?;
/// let report = hyphenate_epub_file("book.epub", "book.1.epub", &dict, &HyphenateOptions::new())?;
/// println!("{} documents hyphenated", report.documents());
/// # Ok::<(), epub_hyph::Error>(())
/// ```
pub fn hyphenate_epub_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    dict: &Dictionary,
    options: &HyphenateOptions,
) -> Result<TransformReport> {
    let source = File::open(input).context("cannot open input epub")?;
    let dest = File::create(output).context("cannot create output epub")?;
    hyphenate_epub(BufReader::new(source), BufWriter::new(dest), dict, options)
}

/// Copy an EPUB archive from `reader` to `writer`, hyphenating its content documents.
///
/// Entries keep their order, name, compression method, modification time
/// and permissions. Checksums are recomputed from the written data.
pub fn hyphenate_epub<R: Read + Seek, W: Write + Seek>(
    reader: R,
    writer: W,
    dict: &Dictionary,
    options: &HyphenateOptions,
) -> Result<TransformReport> {
    let mut archive = ZipArchive::new(reader).context("cannot open input epub")?;
    let mut zip = ZipWriter::new(writer);
    let mut report = TransformReport::default();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).context("cannot open zip subfile")?;
        let name = entry.name().to_string();

        let mut file_options = SimpleFileOptions::default()
            .compression_method(entry.compression())
            .large_file(entry.size() >= u64::from(u32::MAX));
        if let Some(modified) = entry.last_modified() {
            file_options = file_options.last_modified_time(modified);
        }
        if let Some(mode) = entry.unix_mode() {
            file_options = file_options.unix_permissions(mode);
        }

        if entry.is_dir() {
            tracing::debug!(entry = %name, "directory");
            zip.add_directory(name.as_str(), file_options)
                .context("cannot create zip header")?;
            report.entries.push(EntryReport {
                name,
                action: EntryAction::Directory,
            });
            continue;
        }

        zip.start_file(name.as_str(), file_options)
            .context("cannot create zip header")?;

        let action = if is_content_document(&name) {
            tracing::info!(entry = %name, "hyphenating");
            let stats = hyphenate_html(&mut entry, &mut zip, dict, options).map_err(|e| {
                Error::Entry {
                    name: name.clone(),
                    source: Box::new(e),
                }
            })?;
            EntryAction::Hyphenated(stats)
        } else {
            tracing::info!(entry = %name, "copying");
            let bytes = io::copy(&mut entry, &mut zip).context("cannot write subfile in zip")?;
            EntryAction::Copied { bytes }
        };
        report.entries.push(EntryReport { name, action });
    }

    let mut out = zip.finish().context("cannot close zip")?;
    out.flush().context("cannot close zip")?;

    let totals = report.totals();
    tracing::info!(
        entries = report.entries.len(),
        documents = report.documents(),
        soft_hyphens = totals.soft_hyphens,
        "archive written"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use zip::CompressionMethod;

    fn build_archive(entries: &[(&str, &[u8], CompressionMethod)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data, method) in entries {
            zip.start_file(*name, SimpleFileOptions::default().compression_method(*method))
                .unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    fn dict() -> Dictionary {
        "\\patterns{\n1k1\n1l\n2jk\n}\n".parse().unwrap()
    }

    #[test]
    fn test_report_counts() {
        let input = build_archive(&[
            ("mimetype", b"application/epub+zip", CompressionMethod::Stored),
            ("OEBPS/ch1.xhtml", b"<body>kolejka kolejka</body>", CompressionMethod::Deflated),
            ("OEBPS/ch2.html", b"<body>ten</body>", CompressionMethod::Deflated),
        ]);

        let mut output = Cursor::new(Vec::new());
        let report = hyphenate_epub(
            Cursor::new(input),
            &mut output,
            &dict(),
            &HyphenateOptions::default(),
        )
        .unwrap();

        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.documents(), 2);
        assert_eq!(
            report.entries[0].action,
            EntryAction::Copied { bytes: 20 }
        );
        let totals = report.totals();
        assert_eq!(totals.words, 3);
        assert_eq!(totals.hyphenated_words, 2);
        assert_eq!(totals.soft_hyphens, 4);
    }

    #[test]
    fn test_directories_recreated() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.add_directory("OEBPS/", SimpleFileOptions::default()).unwrap();
        zip.start_file("OEBPS/a.xhtml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<body>kolejka</body>").unwrap();
        let input = zip.finish().unwrap().into_inner();

        let mut output = Cursor::new(Vec::new());
        let report = hyphenate_epub(
            Cursor::new(input),
            &mut output,
            &dict(),
            &HyphenateOptions::default(),
        )
        .unwrap();
        assert_eq!(report.entries[0].action, EntryAction::Directory);

        let mut archive = ZipArchive::new(Cursor::new(output.into_inner())).unwrap();
        assert!(archive.by_index(0).unwrap().is_dir());
        let mut text = String::new();
        archive
            .by_name("OEBPS/a.xhtml")
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "<body>ko&shy;lej&shy;ka</body>");
    }

    #[test]
    fn test_invalid_document_names_entry() {
        let input = build_archive(&[(
            "OEBPS/bad.xhtml",
            b"<body>\xff</body>",
            CompressionMethod::Deflated,
        )]);
        let mut output = Cursor::new(Vec::new());
        let err = hyphenate_epub(
            Cursor::new(input),
            &mut output,
            &dict(),
            &HyphenateOptions::default(),
        )
        .unwrap_err();

        match err {
            Error::Entry { name, source } => {
                assert_eq!(name, "OEBPS/bad.xhtml");
                assert!(matches!(*source, Error::InvalidEncoding { offset: 6 }));
            }
            other => panic!("expected Entry error, got {other:?}"),
        }
    }

    #[test]
    fn test_not_a_zip() {
        let mut output = Cursor::new(Vec::new());
        let err = hyphenate_epub(
            Cursor::new(b"not an archive".to_vec()),
            &mut output,
            &dict(),
            &HyphenateOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Zip { context: "cannot open input epub", .. }));
    }
}
