//! XML Persistence
//!
//! File layout:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <contacts placeholder="none">
//! <contact>
//! 	<first_name>Ada</first_name>
//! 	<last_name>Lovelace</last_name>
//! 	<phone_number>555</phone_number>
//! 	<notes>math</notes>
//! </contact>
//! </contacts>
//! ```
//!
//! Reading is a single forward pass over quick-xml events keyed on element
//! local names. Writing always emits all four fields of every contact and
//! replaces the whole file.
//!
//! The `placeholder="none"` root attribute marks files whose empty fields are
//! written as empty elements. Only unmarked files get `" - "` mapped to an
//! empty field on read.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::config::PlaceholderMode;
use crate::domain::{ContactDraft, ContactField, ContactFields};
use crate::error::{Result, StoreError};

/// Token written in place of an empty field by the legacy writer
pub const PLACEHOLDER: &str = " - ";

const ROOT: &str = "contacts";
const ROOT_NAME: &[u8] = b"contacts";
const MARKER_ATTR: &str = "placeholder";
const MARKER_VALUE: &str = "none";
const CONTACT: &[u8] = b"contact";

/// Element names the reader cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Name {
    Contact,
    Field(ContactField),
    Other,
}

impl Name {
    fn classify(local: &[u8]) -> Self {
        if local == CONTACT {
            return Name::Contact;
        }
        ContactField::from_name(local).map_or(Name::Other, Name::Field)
    }
}

/// Owned view of one reader event, detached from the read buffer
#[derive(Debug)]
enum Token {
    Start(Name),
    End(Name),
    Empty(Name),
    Text(String),
    Eof,
    Skip,
}

#[derive(Debug)]
enum ReadState {
    ExpectContactOrEnd,
    NewContact(ContactDraft),
    AccumulateField(ContactDraft, ContactField, String),
}

/// Streaming reader yielding one [`ContactDraft`] per `<contact>` element
///
/// After the first error the iterator is exhausted; drafts already yielded
/// stay valid, so callers can keep a partial load.
pub struct ContactReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    state: ReadState,
    placeholder: PlaceholderMode,
    marked: bool,
    done: bool,
}

impl<R: BufRead> ContactReader<R> {
    pub fn new(input: R, placeholder: PlaceholderMode) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            buf: Vec::new(),
            state: ReadState::ExpectContactOrEnd,
            placeholder,
            marked: false,
            done: false,
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        self.buf.clear();
        let position = self.reader.buffer_position() as u64;
        let xml_err = |source: quick_xml::Error| StoreError::Xml { position, source };

        let token = match self.reader.read_event_into(&mut self.buf).map_err(xml_err)? {
            Event::Start(e) if e.local_name().as_ref() == ROOT_NAME => {
                let marker = e.try_get_attribute(MARKER_ATTR).map_err(|err| xml_err(err.into()))?;
                self.marked = marker.is_some_and(|attr| attr.value.as_ref() == MARKER_VALUE.as_bytes());
                Token::Skip
            }
            Event::Start(e) => Token::Start(Name::classify(e.local_name().as_ref())),
            Event::End(e) => Token::End(Name::classify(e.local_name().as_ref())),
            Event::Empty(e) => Token::Empty(Name::classify(e.local_name().as_ref())),
            Event::Text(t) => Token::Text(t.unescape().map_err(|e| xml_err(e.into()))?.into_owned()),
            Event::CData(c) => Token::Text(String::from_utf8_lossy(&c).into_owned()),
            Event::Eof => Token::Eof,
            _ => Token::Skip,
        };
        Ok(token)
    }

    fn finish_field(&self, text: String) -> String {
        if self.placeholder == PlaceholderMode::Normalize && !self.marked && text == PLACEHOLDER {
            String::new()
        } else {
            text
        }
    }

    /// Advance the state machine by one token, returning a completed contact
    fn step(&mut self, token: Token) -> Option<ContactDraft> {
        let state = std::mem::replace(&mut self.state, ReadState::ExpectContactOrEnd);

        let (next, emitted) = match (state, token) {
            (ReadState::ExpectContactOrEnd, Token::Start(Name::Contact)) => {
                (ReadState::NewContact(ContactDraft::default()), None)
            }
            (ReadState::ExpectContactOrEnd, Token::Empty(Name::Contact)) => {
                (ReadState::ExpectContactOrEnd, Some(ContactDraft::default()))
            }
            (ReadState::ExpectContactOrEnd, _) => (ReadState::ExpectContactOrEnd, None),

            (ReadState::NewContact(draft), Token::Start(Name::Field(field))) => {
                (ReadState::AccumulateField(draft, field, String::new()), None)
            }
            // A nested <contact> restarts the record
            (ReadState::NewContact(_), Token::Start(Name::Contact)) => {
                (ReadState::NewContact(ContactDraft::default()), None)
            }
            (ReadState::NewContact(draft), Token::End(Name::Contact)) => {
                (ReadState::ExpectContactOrEnd, Some(draft))
            }
            (ReadState::NewContact(draft), _) => (ReadState::NewContact(draft), None),

            (ReadState::AccumulateField(draft, field, mut text), Token::Text(chunk)) => {
                text.push_str(&chunk);
                (ReadState::AccumulateField(draft, field, text), None)
            }
            (ReadState::AccumulateField(mut draft, field, text), Token::End(Name::Field(end)))
                if end == field =>
            {
                *draft.field_mut(field) = self.finish_field(text);
                (ReadState::NewContact(draft), None)
            }
            (ReadState::AccumulateField(mut draft, field, text), Token::End(Name::Contact)) => {
                *draft.field_mut(field) = self.finish_field(text);
                (ReadState::ExpectContactOrEnd, Some(draft))
            }
            (state @ ReadState::AccumulateField(..), _) => (state, None),
        };

        self.state = next;
        emitted
    }
}

impl<R: BufRead> Iterator for ContactReader<R> {
    type Item = Result<ContactDraft>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let token = match self.next_token() {
                Ok(token) => token,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };

            if let Token::Eof = token {
                self.done = true;
                if !matches!(self.state, ReadState::ExpectContactOrEnd) {
                    tracing::debug!("contacts file ended inside an unterminated <contact>, dropping it");
                }
                return None;
            }

            if let Some(draft) = self.step(token) {
                return Some(Ok(draft));
            }
        }
        None
    }
}

/// Open the contacts file for streaming
pub fn open_file(path: &Path, placeholder: PlaceholderMode) -> Result<ContactReader<BufReader<File>>> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    Ok(ContactReader::new(BufReader::new(file), placeholder))
}

/// Read every contact, failing on the first malformed event
pub fn read_contacts<R: BufRead>(input: R, placeholder: PlaceholderMode) -> Result<Vec<ContactDraft>> {
    ContactReader::new(input, placeholder).collect()
}

/// Value actually written for a field
fn stored_value(field: ContactField, value: &str, placeholder: PlaceholderMode) -> &str {
    let empty = match field {
        ContactField::PhoneNumber => value.trim().is_empty(),
        _ => value.is_empty(),
    };
    if placeholder == PlaceholderMode::Legacy && empty {
        PLACEHOLDER
    } else {
        value
    }
}

/// Serialize the full collection
pub fn write_contacts<'a, W, C, I>(mut out: W, contacts: I, placeholder: PlaceholderMode) -> io::Result<()>
where
    W: Write,
    C: ContactFields + 'a,
    I: IntoIterator<Item = &'a C>,
{
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    match placeholder {
        PlaceholderMode::Normalize => writeln!(out, r#"<{} {}="{}">"#, ROOT, MARKER_ATTR, MARKER_VALUE)?,
        PlaceholderMode::Legacy => writeln!(out, "<{}>", ROOT)?,
    }
    for contact in contacts {
        writeln!(out, "<contact>")?;
        for field in ContactField::ALL {
            let value = stored_value(field, contact.field(field), placeholder);
            writeln!(out, "\t<{name}>{}</{name}>", escape(value), name = field.as_str())?;
        }
        writeln!(out, "</contact>")?;
    }
    writeln!(out, "</{}>", ROOT)?;
    out.flush()
}

/// Render the collection to a string, exactly as [`write_file`] would store it
pub fn render_contacts<'a, C, I>(contacts: I, placeholder: PlaceholderMode) -> String
where
    C: ContactFields + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let mut buf = Vec::new();
    write_contacts(&mut buf, contacts, placeholder).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("escaped field text is valid UTF-8")
}

/// Sibling temp file the save goes through before the rename
fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| "contacts.xml".as_ref()));
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_temp<'a, C, I>(tmp: &Path, contacts: I, placeholder: PlaceholderMode) -> io::Result<()>
where
    C: ContactFields + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let mut writer = BufWriter::new(File::create(tmp)?);
    write_contacts(&mut writer, contacts, placeholder)?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}

/// Rewrite the contacts file: temp file, then rename over the target
pub fn write_file<'a, C, I>(path: &Path, contacts: I, placeholder: PlaceholderMode) -> Result<()>
where
    C: ContactFields + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let tmp = temp_path(path);
    if let Err(err) = write_temp(&tmp, contacts, placeholder) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::io(&tmp, err));
    }
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_CONTACT: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<contacts placeholder=\"none\">\n<contact>\n\t<first_name>A</first_name>\n\t<last_name>B</last_name>\n\t<phone_number>555</phone_number>\n\t<notes>n</notes>\n</contact>\n</contacts>\n";

    fn read(xml: &str, mode: PlaceholderMode) -> Vec<ContactDraft> {
        read_contacts(xml.as_bytes(), mode).expect("well-formed input")
    }

    #[test]
    fn test_read_single_contact() {
        let drafts = read(ONE_CONTACT, PlaceholderMode::Normalize);
        assert_eq!(drafts, vec![ContactDraft::new("A", "B", "555", "n")]);
    }

    #[test]
    fn test_write_matches_file_layout() {
        let drafts = vec![ContactDraft::new("A", "B", "555", "n")];
        assert_eq!(render_contacts(&drafts, PlaceholderMode::Normalize), ONE_CONTACT);
    }

    #[test]
    fn test_empty_collection_has_bare_root() {
        let drafts: Vec<ContactDraft> = Vec::new();
        let xml = render_contacts(&drafts, PlaceholderMode::Normalize);
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<contacts placeholder=\"none\">\n</contacts>\n"
        );
        assert!(read(&xml, PlaceholderMode::Normalize).is_empty());
    }

    #[test]
    fn test_legacy_writes_placeholder_for_empty_fields() {
        let drafts = vec![ContactDraft::new("A", "", "   ", "")];
        let xml = render_contacts(&drafts, PlaceholderMode::Legacy);
        assert!(xml.contains("\n<contacts>\n"));
        assert!(xml.contains("<last_name> - </last_name>"));
        assert!(xml.contains("<phone_number> - </phone_number>"));
        assert!(xml.contains("<notes> - </notes>"));

        // Legacy reads the token back verbatim
        let back = read(&xml, PlaceholderMode::Legacy);
        assert_eq!(back, vec![ContactDraft::new("A", PLACEHOLDER, PLACEHOLDER, PLACEHOLDER)]);
    }

    #[test]
    fn test_legacy_keeps_blank_names() {
        // Only the phone column treats whitespace as empty
        let drafts = vec![ContactDraft::new(" ", "B", "1", "n")];
        let xml = render_contacts(&drafts, PlaceholderMode::Legacy);
        assert!(xml.contains("<first_name> </first_name>"));
    }

    #[test]
    fn test_normalize_reads_placeholder_as_empty() {
        let xml = "<contacts><contact><first_name>A</first_name><notes> - </notes></contact></contacts>";
        let drafts = read(xml, PlaceholderMode::Normalize);
        assert_eq!(drafts[0].notes, "");
    }

    #[test]
    fn test_normalize_keeps_literal_dash_value() {
        let drafts = vec![ContactDraft::new("A", PLACEHOLDER, "1", "n")];
        let xml = render_contacts(&drafts, PlaceholderMode::Normalize);
        assert_eq!(read(&xml, PlaceholderMode::Normalize), drafts);

        // A legacy file read after it still gets the token mapped
        let legacy = render_contacts(&[ContactDraft::new("A", "", "1", "n")], PlaceholderMode::Legacy);
        let mut reader = ContactReader::new(legacy.as_bytes(), PlaceholderMode::Normalize);
        assert_eq!(reader.next().unwrap().unwrap().last_name, "");
    }

    #[test]
    fn test_unterminated_contact_is_dropped() {
        let xml = "<contacts><contact><first_name>A</first_name></contact><contact><first_name>B</first_name>";
        let drafts = read(xml, PlaceholderMode::Normalize);
        assert_eq!(drafts, vec![ContactDraft::new("A", "", "", "")]);
    }

    #[test]
    fn test_normalize_round_trips_empty_fields() {
        let drafts = vec![ContactDraft::new("", "Solo", "", "")];
        let xml = render_contacts(&drafts, PlaceholderMode::Normalize);
        assert!(xml.contains("<first_name></first_name>"));
        assert_eq!(read(&xml, PlaceholderMode::Normalize), drafts);
    }

    #[test]
    fn test_missing_children_default_to_empty() {
        let xml = "<contacts><contact><last_name>Only</last_name></contact></contacts>";
        let drafts = read(xml, PlaceholderMode::Normalize);
        assert_eq!(drafts, vec![ContactDraft::new("", "Only", "", "")]);
    }

    #[test]
    fn test_escaped_text_round_trips() {
        let drafts = vec![ContactDraft::new("Tom & Jerry", "<Cat>", "+1 (555)", "a \"quoted\" note")];
        let xml = render_contacts(&drafts, PlaceholderMode::Normalize);
        assert!(xml.contains("Tom &amp; Jerry"));
        assert_eq!(read(&xml, PlaceholderMode::Normalize), drafts);
    }

    #[test]
    fn test_cdata_and_split_text_are_joined() {
        let xml = "<contacts><contact><notes>one<![CDATA[ & two]]> three</notes></contact></contacts>";
        let drafts = read(xml, PlaceholderMode::Normalize);
        assert_eq!(drafts[0].notes, "one & two three");
    }

    #[test]
    fn test_unknown_elements_and_namespaces() {
        let xml = r#"<c:contacts xmlns:c="urn:x"><c:contact><c:first_name>A</c:first_name><email>x@y</email></c:contact><junk/></c:contacts>"#;
        let drafts = read(xml, PlaceholderMode::Normalize);
        assert_eq!(drafts, vec![ContactDraft::new("A", "", "", "")]);
    }

    #[test]
    fn test_empty_contact_element() {
        let drafts = read("<contacts><contact/></contacts>", PlaceholderMode::Normalize);
        assert_eq!(drafts, vec![ContactDraft::default()]);
    }

    #[test]
    fn test_empty_document_yields_nothing() {
        assert!(read("", PlaceholderMode::Normalize).is_empty());
    }

    #[test]
    fn test_malformed_input_keeps_earlier_contacts() {
        let xml = "<contacts><contact><first_name>A</first_name></contact><contact><first_name>B</last_name></contact></contacts>";
        let results: Vec<_> = ContactReader::new(xml.as_bytes(), PlaceholderMode::Normalize).collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().first_name, "A");
        assert!(matches!(results[1], Err(StoreError::Xml { .. })));
        assert!(read_contacts(xml.as_bytes(), PlaceholderMode::Normalize).is_err());
    }

    #[test]
    fn test_write_file_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.xml");
        fs::write(&path, "old contents").unwrap();

        let drafts = vec![ContactDraft::new("A", "B", "555", "n")];
        write_file(&path, &drafts, PlaceholderMode::Normalize).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), ONE_CONTACT);
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_write_file_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("contacts.xml");
        let drafts: Vec<ContactDraft> = Vec::new();
        let err = write_file(&path, &drafts, PlaceholderMode::Normalize).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
