//! EPUB container source.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use super::{BookMetadata, DocumentItem, DocumentSource};
use crate::config::check_epub_extension;
use crate::error::{Error, Result};

/// Media types of narratable content documents.
const DOCUMENT_MEDIA_TYPES: [&str; 2] = ["application/xhtml+xml", "text/html"];

/// Content documents of an EPUB, in manifest order.
///
/// The EPUB 3 navigation document (`properties="nav"`) is skipped; the NCX
/// is never a content document.
pub struct EpubSource<R: Read + Seek> {
    archive: ZipArchive<R>,
    metadata: BookMetadata,
    /// Archive paths of content documents.
    documents: Vec<String>,
}

impl EpubSource<File> {
    /// Open an EPUB file from disk. The path must end in `.epub`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        check_epub_extension(path)?;
        Self::from_reader(File::open(path)?)
    }
}

impl<R: Read + Seek> EpubSource<R> {
    /// Read an EPUB from any seekable byte source.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let opf_path = find_opf_path(&mut archive)?;
        let opf_dir = Path::new(&opf_path)
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();

        let opf_content = read_archive_file(&mut archive, &opf_path)?;
        let package = parse_opf(&opf_content)?;

        let documents = package
            .manifest
            .iter()
            .filter(|item| item.is_content_document())
            .map(|item| resolve_path(&opf_dir, &item.href))
            .collect();

        Ok(Self {
            archive,
            metadata: package.metadata,
            documents,
        })
    }

    /// Archive paths of the content documents, in the order they are served.
    pub fn document_paths(&self) -> &[String] {
        &self.documents
    }
}

impl<R: Read + Seek> DocumentSource for EpubSource<R> {
    fn metadata(&self) -> &BookMetadata {
        &self.metadata
    }

    fn document_count(&self) -> usize {
        self.documents.len()
    }

    fn load_document(&mut self, index: usize) -> Result<DocumentItem> {
        let href = self.documents.get(index).cloned().ok_or_else(|| {
            Error::InvalidInput(format!(
                "document index {index} out of range ({} documents)",
                self.documents.len()
            ))
        })?;
        let content = read_archive_file_bytes(&mut self.archive, &href)?;
        Ok(DocumentItem { href, content })
    }
}

struct ManifestItem {
    href: String,
    media_type: String,
    properties: Option<String>,
}

impl ManifestItem {
    fn is_content_document(&self) -> bool {
        let is_nav = self
            .properties
            .as_deref()
            .is_some_and(|props| props.split_ascii_whitespace().any(|p| p == "nav"));
        DOCUMENT_MEDIA_TYPES.contains(&self.media_type.as_str()) && !is_nav
    }
}

struct Package {
    metadata: BookMetadata,
    /// Manifest items in declaration order.
    manifest: Vec<ManifestItem>,
}

fn find_opf_path<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String> {
    let container = read_archive_file(archive, "META-INF/container.xml")?;

    let mut reader = Reader::from_str(&container);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"rootfile" => {
                if let Some(path) = attr_value(&e, b"full-path")? {
                    return Ok(path);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }

    Err(Error::InvalidEpub("No rootfile found in container.xml".into()))
}

/// Dublin Core element currently being read inside `<metadata>`.
#[derive(Clone, Copy)]
enum DcField {
    Title,
    Creator,
    Language,
}

fn parse_opf(content: &str) -> Result<Package> {
    // Untrimmed, so spaces around entity references survive; values are trimmed
    // once complete
    let mut reader = Reader::from_str(content);

    let mut metadata = BookMetadata::default();
    let mut manifest = Vec::new();

    let mut in_metadata = false;
    let mut current: Option<DcField> = None;
    let mut buf_text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"metadata" => in_metadata = true,
                    b"title" if in_metadata => current = Some(DcField::Title),
                    b"creator" if in_metadata => current = Some(DcField::Creator),
                    b"language" if in_metadata => current = Some(DcField::Language),
                    b"item" => manifest.extend(parse_manifest_item(&e)?),
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                let name = e.name();
                if local_name(name.as_ref()) == b"item" {
                    manifest.extend(parse_manifest_item(&e)?);
                }
            }
            Ok(Event::Text(e)) => {
                if current.is_some() {
                    buf_text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if current.is_some() {
                    buf_text.push_str(resolve_entity(&String::from_utf8_lossy(e.as_ref())));
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                if local_name(name.as_ref()) == b"metadata" {
                    in_metadata = false;
                }
                if let Some(field) = current.take() {
                    let value = std::mem::take(&mut buf_text).trim().to_string();
                    match field {
                        DcField::Title => metadata.titles.push(value),
                        DcField::Creator => metadata.creators.push(value),
                        DcField::Language => {
                            metadata.language.get_or_insert(value);
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }

    Ok(Package { metadata, manifest })
}

fn parse_manifest_item(e: &BytesStart<'_>) -> Result<Option<ManifestItem>> {
    let (Some(href), Some(media_type)) = (attr_value(e, b"href")?, attr_value(e, b"media-type")?)
    else {
        return Ok(None);
    };
    Ok(Some(ManifestItem {
        href,
        media_type,
        properties: attr_value(e, b"properties")?,
    }))
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key {
            return Ok(Some(String::from_utf8(attr.value.to_vec())?));
        }
    }
    Ok(None)
}

fn resolve_entity(entity: &str) -> &'static str {
    match entity {
        "apos" => "'",
        "quot" => "\"",
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        _ => "",
    }
}

fn read_archive_file<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let bytes = read_archive_file_bytes(archive, path)?;
    Ok(String::from_utf8(strip_bom(&bytes).to_vec())?)
}

fn read_archive_file_bytes<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<Vec<u8>> {
    match archive.by_name(path) {
        Ok(mut file) => {
            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            return Ok(contents);
        }
        Err(zip::result::ZipError::FileNotFound) => {}
        Err(e) => return Err(e.into()),
    }

    // Manifest hrefs are URL-encoded; archive entry names usually are not
    let decoded = percent_encoding::percent_decode_str(path)
        .decode_utf8()
        .map_err(|_| Error::InvalidEpub(format!("Invalid UTF-8 in path: {}", path)))?;

    let mut file = archive.by_name(&decoded)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data)
}

fn resolve_path(base: &str, href: &str) -> String {
    if base.is_empty() {
        href.to_string()
    } else {
        format!("{}/{}", base, href)
    }
}

/// Local part of a possibly namespaced XML name.
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>Moby Dick</dc:title>
    <dc:title>or, The Whale</dc:title>
    <dc:creator>Herman Melville</dc:creator>
    <dc:language>en</dc:language>
  </metadata>
  <manifest>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
    <item id="ch2" href="text/ch2.xhtml" media-type="application/xhtml+xml"/>
    <item id="css" href="style.css" media-type="text/css"/>
    <item id="ch1" href="text/ch1.xhtml" media-type="application/xhtml+xml"/>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
  </manifest>
  <spine toc="ncx"><itemref idref="ch1"/><itemref idref="ch2"/></spine>
</package>"#;

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"dc:title"), b"title");
        assert_eq!(local_name(b"title"), b"title");
    }

    #[test]
    fn test_parse_opf_metadata() {
        let package = parse_opf(OPF).unwrap();
        assert_eq!(package.metadata.titles, vec!["Moby Dick", "or, The Whale"]);
        assert_eq!(package.metadata.title(), "Moby Dick");
        assert_eq!(package.metadata.author(), "Herman Melville");
        assert_eq!(package.metadata.language.as_deref(), Some("en"));
    }

    #[test]
    fn test_parse_opf_manifest_order() {
        let package = parse_opf(OPF).unwrap();
        let docs: Vec<_> = package
            .manifest
            .iter()
            .filter(|item| item.is_content_document())
            .map(|item| item.href.as_str())
            .collect();
        assert_eq!(docs, vec!["text/ch2.xhtml", "text/ch1.xhtml"]);
    }

    #[test]
    fn test_parse_opf_entities() {
        let opf = r#"<package><metadata><dc:title>Pride &amp; Prejudice</dc:title></metadata></package>"#;
        let package = parse_opf(opf).unwrap();
        assert_eq!(package.metadata.title(), "Pride & Prejudice");
        assert_eq!(package.metadata.author(), "Unknown");
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(resolve_path("OEBPS", "ch1.xhtml"), "OEBPS/ch1.xhtml");
        assert_eq!(resolve_path("", "ch1.xhtml"), "ch1.xhtml");
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom(b"\xEF\xBB\xBF<a/>"), b"<a/>");
        assert_eq!(strip_bom(b"<a/>"), b"<a/>");
    }

    #[test]
    fn test_open_rejects_non_epub() {
        assert!(matches!(
            EpubSource::<File>::open("book.mobi"),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
