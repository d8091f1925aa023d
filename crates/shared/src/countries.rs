use crate::error::MapError;
use crate::models::CountryRecord;

/// Lookup table from country identifier to its framing on the map.
///
/// Identifiers are the `properties.name` strings of the geometry document,
/// so a record's `value` doubles as the selection key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryTable {
    records: Vec<CountryRecord>,
}

impl CountryTable {
    pub fn new(records: Vec<CountryRecord>) -> Self {
        Self { records }
    }

    pub fn from_json(data: &str) -> Result<Self, MapError> {
        let records: Vec<CountryRecord> =
            serde_json::from_str(data).map_err(|e| MapError::decode("country table", e))?;
        Ok(Self::new(records))
    }

    /// Exact, case-sensitive match on the identifier.
    pub fn find(&self, value: &str) -> Option<&CountryRecord> {
        self.records.iter().find(|c| c.value == value)
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
