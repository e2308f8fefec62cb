// Minted only by `SchemaAllowList`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SqlIdentifier(String);

impl SqlIdentifier {
    pub(crate) fn introspected(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0.replace('"', "\"\""))
    }
}
