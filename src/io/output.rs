use crate::core::ProjectMetadata;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub trait OutputWriter {
    fn write_metadata(&mut self, metadata: &ProjectMetadata) -> anyhow::Result<()>;
}

/// Writes the document as pretty-printed JSON followed by a newline.
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_metadata(&mut self, metadata: &ProjectMetadata) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(metadata)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Create a writer for `output`, or stdout when no path is given.
pub fn create_writer(output: Option<&Path>) -> anyhow::Result<Box<dyn OutputWriter>> {
    match output {
        Some(path) => {
            let file = File::create(path)?;
            Ok(Box::new(JsonWriter::new(BufWriter::new(file))))
        }
        None => Ok(Box::new(JsonWriter::new(std::io::stdout()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ClassInfo, RelationshipInfo, RelationshipKind};

    #[test]
    fn test_json_writer_uses_wire_shape() {
        let metadata = ProjectMetadata {
            entities: vec![ClassInfo::new("Order", "/src/order.entity.ts")],
            relationships: vec![RelationshipInfo {
                from: "Order".into(),
                to: "Customer".into(),
                kind: RelationshipKind::ManyToOne,
            }],
            ..Default::default()
        };

        let mut writer = JsonWriter::new(Vec::new());
        writer.write_metadata(&metadata).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();

        assert!(text.starts_with("{\n  \"entities\": ["));
        assert!(text.contains("\"filePath\": \"/src/order.entity.ts\""));
        assert!(text.contains("\"type\": \"ManyToOne\""));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_empty_document_keeps_all_keys() {
        let mut writer = JsonWriter::new(Vec::new());
        writer.write_metadata(&ProjectMetadata::default()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&writer.into_inner()).unwrap();

        for key in ["entities", "classes", "functions", "relationships"] {
            assert_eq!(value[key], serde_json::json!([]), "{key} should be an empty list");
        }
    }
}
