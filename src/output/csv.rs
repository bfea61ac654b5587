use crate::labels::LabelRecord;

/// One line per record: `file,line,parentKind,parentName,label,...`.
pub fn render_line(record: &LabelRecord) -> String {
    let mut fields = vec![
        record.file.clone(),
        record.line.to_string(),
        record.parent_kind.clone(),
        record.parent_name.clone(),
    ];
    fields.extend(record.labels.iter().cloned());
    fields.join(",")
}

/// Render all records, each line newline-terminated.
pub fn render_labels(records: &[LabelRecord]) -> String {
    let mut output = String::new();
    for record in records {
        output.push_str(&render_line(record));
        output.push('\n');
    }
    output
}
