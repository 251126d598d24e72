//! Output file writer

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{InventoryError, Result};

/// Filename value that means "no output file"
pub const NO_FILE_SENTINEL: &str = "None";

/// Writes responses as `<filename>.txt` under a base directory
#[derive(Debug, Clone, Default)]
pub struct ResultWriter {
    base_dir: PathBuf,
}

impl ResultWriter {
    /// Writer rooted at `base_dir`; the default roots at the working directory
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Output path for `filename`, or `None` when no file should be written
    #[must_use]
    pub fn target(&self, filename: Option<&str>) -> Option<PathBuf> {
        match filename {
            None | Some(NO_FILE_SENTINEL) | Some("") => None,
            Some(name) => Some(self.base_dir.join(format!("{name}.txt"))),
        }
    }

    /// Serialize `data` to the file named by `filename`, overwriting it
    ///
    /// Keys are sorted and nested values indented by four spaces. Returns
    /// the path written, or `None` when `filename` is absent.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn write<T: Serialize>(&self, data: &T, filename: Option<&str>) -> Result<Option<PathBuf>> {
        let Some(path) = self.target(filename) else {
            debug!("no output filename given, skipping write");
            return Ok(None);
        };

        let rendered = render(data)?;
        write_file(&path, &rendered)?;
        info!(path = %path.display(), bytes = rendered.len(), "wrote response");
        Ok(Some(path))
    }
}

/// Pretty JSON with sorted keys and a four-space indent, no trailing newline
///
/// Non-ASCII characters are written as `\uXXXX` escapes.
///
/// # Errors
/// Returns an error if `data` cannot be represented as JSON.
pub fn render<T: Serialize>(data: &T) -> Result<String> {
    let value = sort_keys(serde_json::to_value(data).map_err(InventoryError::Serialize)?);

    let mut buf = Vec::new();
    let formatter = AsciiFormatter(PrettyFormatter::with_indent(b"    "));
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(InventoryError::Serialize)?;

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Pretty printing with every non-ASCII character escaped as UTF-16 units
struct AsciiFormatter<'a>(PrettyFormatter<'a>);

impl Formatter for AsciiFormatter<'_> {
    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }

    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k, sort_keys(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| InventoryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_sorted_four_space() {
        let rendered = render(&json!({"b": 2, "a": 1})).unwrap();
        assert_eq!(rendered, "{\n    \"a\": 1,\n    \"b\": 2\n}");
    }

    #[test]
    fn test_render_nested_sorting() {
        let rendered = render(&json!([{"z": {"y": 1, "x": 2}}])).unwrap();
        assert_eq!(
            rendered,
            "[\n    {\n        \"z\": {\n            \"x\": 2,\n            \"y\": 1\n        }\n    }\n]"
        );
    }

    #[test]
    fn test_render_escapes_non_ascii() {
        let rendered = render(&json!({"descr": "café"})).unwrap();
        assert_eq!(rendered, "{\n    \"descr\": \"caf\\u00e9\"\n}");
    }

    #[test]
    fn test_render_escapes_surrogate_pairs() {
        let rendered = render(&json!(["fan 😀 ok"])).unwrap();
        assert_eq!(rendered, "[\n    \"fan \\ud83d\\ude00 ok\"\n]");
        assert!(rendered.is_ascii());
    }

    #[test]
    fn test_writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::new(dir.path());

        let written = writer
            .write(&json!({"a": 1, "b": 2}), Some("report"))
            .unwrap();

        let path = dir.path().join("report.txt");
        assert_eq!(written, Some(path.clone()));
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents, "{\n    \"a\": 1,\n    \"b\": 2\n}");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::new(dir.path());
        std::fs::write(dir.path().join("report.txt"), "stale contents that are longer").unwrap();

        writer.write(&json!([]), Some("report")).unwrap();

        let contents = std::fs::read_to_string(dir.path().join("report.txt")).unwrap();
        assert_eq!(contents, "[]");
    }

    #[test]
    fn test_no_filename_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::new(dir.path());

        assert_eq!(writer.write(&json!({"a": 1}), None).unwrap(), None);
        assert_eq!(
            writer.write(&json!({"a": 1}), Some(NO_FILE_SENTINEL)).unwrap(),
            None
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unwritable_target() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::new(dir.path().join("missing-dir"));

        let err = writer.write(&json!({}), Some("report")).unwrap_err();
        assert!(matches!(err, InventoryError::Io { .. }));
    }
}
