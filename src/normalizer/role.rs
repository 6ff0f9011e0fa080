//! Source table roles
//!
//! The three files in the registry bundle each play a fixed role in
//! the pipeline. The role carries the column prefix that namespaces
//! the table's fields after normalization, so the merged record never
//! collides field names across tables.

use std::fmt;

/// Role of a source table within a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableRole {
    /// Master registration records (no prefix)
    Registration,
    /// Engine reference table (prefix `eng_`)
    Engine,
    /// Airframe reference table (prefix `acft_`)
    AirframeReference,
}

impl TableRole {
    /// All roles, in load order.
    pub const ALL: [TableRole; 3] = [
        TableRole::Registration,
        TableRole::Engine,
        TableRole::AirframeReference,
    ];

    /// Column-name prefix applied after normalization.
    pub fn prefix(&self) -> &'static str {
        match self {
            TableRole::Registration => "",
            TableRole::Engine => "eng_",
            TableRole::AirframeReference => "acft_",
        }
    }

    /// Fixed file name of this table inside the bundle.
    pub fn file_name(&self) -> &'static str {
        match self {
            TableRole::Registration => "MASTER.txt",
            TableRole::Engine => "ENGINE.txt",
            TableRole::AirframeReference => "ACFTREF.txt",
        }
    }

    /// Human-readable role label.
    pub fn label(&self) -> &'static str {
        match self {
            TableRole::Registration => "registration",
            TableRole::Engine => "engine",
            TableRole::AirframeReference => "airframe-reference",
        }
    }
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(TableRole::Registration.prefix(), "");
        assert_eq!(TableRole::Engine.prefix(), "eng_");
        assert_eq!(TableRole::AirframeReference.prefix(), "acft_");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(TableRole::Registration.file_name(), "MASTER.txt");
        assert_eq!(TableRole::Engine.file_name(), "ENGINE.txt");
        assert_eq!(TableRole::AirframeReference.file_name(), "ACFTREF.txt");
    }
}
