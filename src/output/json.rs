use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{Result, ToolError};

/// Render any report as pretty JSON (4-space indent, trailing newline).
pub fn render<T: Serialize>(report: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    report.serialize(&mut serializer)?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|e| ToolError::Output(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::FrequencyReport;

    #[test]
    fn four_space_indent() {
        let report = FrequencyReport {
            filename: "a.c".into(),
            symbols: vec![],
        };
        let rendered = render(&report).unwrap();
        assert_eq!(rendered, "{\n    \"filename\": \"a.c\",\n    \"symbols\": []\n}\n");
    }
}
