//! # table
//!
//! Upstream OpenFLIS tables and the menu selections that lead to them.

use clap::builder::PossibleValue;
use clap::ValueEnum;

/// An upstream table that can be queried by NIIN.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    Nsn,
    History,
    ManagementFuture,
    Management,
    ArmyManagement,
    Standardization,
    MoeRule,
    ManagementHistory,
}

impl Table {
    /// All tables in menu order.
    pub const ALL: [Table; 8] = [
        Table::Nsn,
        Table::History,
        Table::ManagementFuture,
        Table::Management,
        Table::ArmyManagement,
        Table::Standardization,
        Table::MoeRule,
        Table::ManagementHistory,
    ];

    /// Selection key used on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Table::Nsn               => "nsn",
            Table::History           => "history",
            Table::ManagementFuture  => "management_future",
            Table::Management        => "management",
            Table::ArmyManagement    => "army_management",
            Table::Standardization   => "standardization",
            Table::MoeRule           => "moe_rule",
            Table::ManagementHistory => "management_history",
        }
    }

    /// Table name expected by the API.
    pub fn upstream(self) -> &'static str {
        match self {
            Table::Nsn               => "NSN",
            Table::History           => "HISTORY_PICK",
            Table::ManagementFuture  => "MANAGEMENT_FUTURE",
            Table::Management        => "MANAGEMENT",
            Table::ArmyManagement    => "MGMT_ARMY",
            Table::Standardization   => "STANDARDIZATION",
            Table::MoeRule           => "MOE_RULE",
            Table::ManagementHistory => "MANAGEMENT_HISTORY",
        }
    }

    /// Human readable name shown after selection and while fetching.
    pub fn label(self) -> &'static str {
        match self {
            Table::Nsn               => "FLIS NSN",
            Table::History           => "History",
            Table::ManagementFuture  => "Management Future",
            Table::Management        => "Management",
            Table::ArmyManagement    => "Army Management",
            Table::Standardization   => "Standardization",
            Table::MoeRule           => "MOE Rule Coded",
            Table::ManagementHistory => "Management History",
        }
    }
}

impl ValueEnum for Table {
    fn value_variants<'a>() -> &'a [Self] {
        &Table::ALL
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.key()).help(self.label()))
    }
}

/// One entry of the interactive menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Table(Table),
    PartSummary,
}

impl Selection {
    /// Menu entries in display order. Entry n is chosen by typing n + 1.
    pub fn menu() -> impl Iterator<Item = Selection> {
        Table::ALL
            .into_iter()
            .map(Selection::Table)
            .chain(std::iter::once(Selection::PartSummary))
    }

    /// Parses the number typed at the menu prompt.
    pub fn from_menu(input: &str) -> Option<Selection> {
        Selection::menu()
            .zip(1..)
            .find(|(_, n): &(Selection, usize)| n.to_string() == input)
            .map(|(s, _)| s)
    }

    pub fn label(self) -> &'static str {
        match self {
            Selection::Table(t)    => t.label(),
            Selection::PartSummary => "Part Summary (Comprehensive Info)",
        }
    }

    /// Line shown for this entry in the menu.
    pub fn menu_entry(self) -> String {
        match self {
            Selection::Table(t)    => format!("{} ({} Table)", t.label(), t.upstream()),
            Selection::PartSummary => String::from("Part Summary (Comprehensive Info)"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_to_upstream() {
        let expected = [
            ("nsn", "NSN"),
            ("history", "HISTORY_PICK"),
            ("management_future", "MANAGEMENT_FUTURE"),
            ("management", "MANAGEMENT"),
            ("army_management", "MGMT_ARMY"),
            ("standardization", "STANDARDIZATION"),
            ("moe_rule", "MOE_RULE"),
            ("management_history", "MANAGEMENT_HISTORY"),
        ];

        for (key, upstream) in expected {
            let table = Table::from_str(key, false).unwrap();
            assert_eq!(table.upstream(), upstream);
            assert_eq!(table.key(), key);
        }
        assert!(Table::from_str("NSN", false).is_err());
        assert!(Table::from_str("", false).is_err());
        assert_eq!(Table::from_str("MOE_RULE", true), Ok(Table::MoeRule));
    }

    #[test]
    fn test_menu_selection() {
        assert_eq!(Selection::from_menu("1"), Some(Selection::Table(Table::Nsn)));
        assert_eq!(Selection::from_menu("7"), Some(Selection::Table(Table::MoeRule)));
        assert_eq!(Selection::from_menu("9"), Some(Selection::PartSummary));
        assert_eq!(Selection::from_menu("0"), None);
        assert_eq!(Selection::from_menu("10"), None);
        assert_eq!(Selection::from_menu("nsn"), None);
        assert_eq!(Selection::from_menu("+1"), None);
        assert_eq!(Selection::from_menu("01"), None);
        assert_eq!(Selection::from_menu(""), None);
    }

    #[test]
    fn test_menu_entries() {
        let entries: Vec<String> = Selection::menu().map(Selection::menu_entry).collect();
        assert_eq!(entries.len(), 9);
        assert_eq!(entries[0], "FLIS NSN (NSN Table)");
        assert_eq!(entries[4], "Army Management (MGMT_ARMY Table)");
        assert_eq!(entries[6], "MOE Rule Coded (MOE_RULE Table)");
        assert_eq!(entries[8], "Part Summary (Comprehensive Info)");
    }
}
