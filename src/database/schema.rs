/// Table holding enquiry rows
pub const ENQUIRY_TABLE: &str = "enquiries";

/// Table holding child records, keyed by their server `_id`
pub const CHILD_TABLE: &str = "children";

/// Storage type of a column, used to pick the cursor getter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Text,
    Boolean,
}

/// Columns of the enquiries table, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnquiryColumn {
    UniqueIdentifier,
    CreatedBy,
    CreatedOrganisation,
    EnquirerName,
    Criteria,
    PotentialMatches,
    CreatedAt,
    LastUpdatedAt,
    LastSyncedAt,
    Synced,
}

impl EnquiryColumn {
    pub const ALL: [EnquiryColumn; 10] = [
        EnquiryColumn::UniqueIdentifier,
        EnquiryColumn::CreatedBy,
        EnquiryColumn::CreatedOrganisation,
        EnquiryColumn::EnquirerName,
        EnquiryColumn::Criteria,
        EnquiryColumn::PotentialMatches,
        EnquiryColumn::CreatedAt,
        EnquiryColumn::LastUpdatedAt,
        EnquiryColumn::LastSyncedAt,
        EnquiryColumn::Synced,
    ];

    pub const fn column_name(self) -> &'static str {
        match self {
            EnquiryColumn::UniqueIdentifier => "unique_identifier",
            EnquiryColumn::CreatedBy => "created_by",
            EnquiryColumn::CreatedOrganisation => "created_organisation",
            EnquiryColumn::EnquirerName => "enquirer_name",
            EnquiryColumn::Criteria => "criteria",
            EnquiryColumn::PotentialMatches => "potential_matches",
            EnquiryColumn::CreatedAt => "created_at",
            EnquiryColumn::LastUpdatedAt => "last_updated_at",
            EnquiryColumn::LastSyncedAt => "last_synced_at",
            EnquiryColumn::Synced => "synced",
        }
    }

    pub const fn primitive_type(self) -> PrimitiveType {
        match self {
            EnquiryColumn::Synced => PrimitiveType::Boolean,
            _ => PrimitiveType::Text,
        }
    }

    pub fn column_names() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(Self::column_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_column_names_are_unique() {
        let names: HashSet<&str> = EnquiryColumn::column_names().collect();
        assert_eq!(names.len(), EnquiryColumn::ALL.len());
    }

    #[test]
    fn test_only_synced_is_boolean() {
        let booleans: Vec<_> = EnquiryColumn::ALL
            .into_iter()
            .filter(|c| c.primitive_type() == PrimitiveType::Boolean)
            .collect();
        assert_eq!(booleans, vec![EnquiryColumn::Synced]);
    }
}
