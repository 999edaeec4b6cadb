use serde_json::Value;

use crate::codec::ObjectWriter;
use crate::domain::TemplateSelection;

/// Serialize a template selection. Empty substitution maps are omitted.
pub fn encode_template_selection(selection: &TemplateSelection) -> Value {
    let mut writer = ObjectWriter::new();
    writer.string("template_id", selection.template_id());
    if !selection.substitutions().is_empty() {
        let mut substitutions = ObjectWriter::new();
        for (key, value) in selection.substitutions() {
            substitutions.string(key.clone(), value);
        }
        writer.field("substitutions", substitutions.finish());
    }
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_substitutions_are_omitted() {
        let selection = TemplateSelection::builder()
            .template_id("ef34a8d9-0ad7-491c-86b0-aea74da15161")
            .build()
            .unwrap();
        assert_eq!(
            encode_template_selection(&selection).to_string(),
            r#"{"template_id":"ef34a8d9-0ad7-491c-86b0-aea74da15161"}"#
        );
    }

    #[test]
    fn substitutions_are_nested() {
        let selection = TemplateSelection::builder()
            .template_id("ef34a8d9-0ad7-491c-86b0-aea74da15161")
            .substitution("FIRST_NAME", "Ada")
            .build()
            .unwrap();
        assert_eq!(
            encode_template_selection(&selection).to_string(),
            r#"{"template_id":"ef34a8d9-0ad7-491c-86b0-aea74da15161","substitutions":{"FIRST_NAME":"Ada"}}"#
        );
    }
}
