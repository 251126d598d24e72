//! Command to managed-object class tables

use aci_inventory_api::Command;

/// Commands whose class differs on controller nodes
const CONTROLLER_SPECIFIC: [Command; 2] = [Command::Interfaces, Command::Firmware];

/// One command → class mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    pub command: Command,
    pub class: String,
}

impl ClassEntry {
    pub fn new(command: Command, class: impl Into<String>) -> Self {
        Self {
            command,
            class: class.into(),
        }
    }
}

/// Immutable class tables, built once and shared by reference
///
/// The default table is ordered; `all` queries its entries in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMap {
    default: Vec<ClassEntry>,
    controller: Vec<ClassEntry>,
}

impl Default for ClassMap {
    fn default() -> Self {
        Self::new(
            vec![
                ClassEntry::new(Command::Fantray, "eqptFt"),
                ClassEntry::new(Command::PowerSupplies, "eqptPsu"),
                ClassEntry::new(Command::SupervisorModule, "eqptSupC"),
                ClassEntry::new(Command::LinecardModule, "eqptLC"),
                ClassEntry::new(Command::Interfaces, "ethpmPhysIf"),
                ClassEntry::new(Command::Firmware, "firmwareRunning"),
            ],
            vec![
                ClassEntry::new(Command::Interfaces, "cnwPhysIf"),
                ClassEntry::new(Command::Firmware, "ethpmPhysIf"),
            ],
        )
    }
}

impl ClassMap {
    pub fn new(default: Vec<ClassEntry>, controller: Vec<ClassEntry>) -> Self {
        Self {
            default,
            controller,
        }
    }

    /// Nodes with a single-digit id are controllers
    #[must_use]
    pub fn is_controller(node_id: &str) -> bool {
        node_id.len() == 1
    }

    /// Entries of the default table, in table order
    #[must_use]
    pub fn default_entries(&self) -> &[ClassEntry] {
        &self.default
    }

    /// Resolve the managed-object class for `command` on `node_id`
    ///
    /// Interfaces and firmware on a controller node come from the controller
    /// table; everything else from the default table. `None` when the
    /// selected table has no entry for the command.
    #[must_use]
    pub fn get_mo_class(&self, command: Command, node_id: &str) -> Option<&str> {
        let table = if CONTROLLER_SPECIFIC.contains(&command) && Self::is_controller(node_id) {
            &self.controller
        } else {
            &self.default
        };
        table
            .iter()
            .find(|e| e.command == command)
            .map(|e| e.class.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interfaces_on_switch_uses_default_table() {
        let classes = ClassMap::default();
        assert_eq!(
            classes.get_mo_class(Command::Interfaces, "105"),
            Some("ethpmPhysIf")
        );
    }

    #[test]
    fn test_interfaces_on_controller() {
        let classes = ClassMap::default();
        assert_eq!(
            classes.get_mo_class(Command::Interfaces, "1"),
            Some("cnwPhysIf")
        );
        assert_eq!(
            classes.get_mo_class(Command::Interfaces, "5"),
            Some("cnwPhysIf")
        );
    }

    #[test]
    fn test_firmware_controller_override() {
        let classes = ClassMap::default();
        assert_eq!(
            classes.get_mo_class(Command::Firmware, "1"),
            Some("ethpmPhysIf")
        );
        assert_eq!(
            classes.get_mo_class(Command::Firmware, "12"),
            Some("firmwareRunning")
        );
    }

    #[test]
    fn test_hardware_classes_ignore_controller_rule() {
        let classes = ClassMap::default();
        assert_eq!(classes.get_mo_class(Command::Fantray, "1"), Some("eqptFt"));
        assert_eq!(classes.get_mo_class(Command::Fantray, "201"), Some("eqptFt"));
        assert_eq!(
            classes.get_mo_class(Command::SupervisorModule, "3"),
            Some("eqptSupC")
        );
    }

    #[test]
    fn test_unmapped_commands() {
        let classes = ClassMap::default();
        assert_eq!(classes.get_mo_class(Command::Nodes, "101"), None);
        assert_eq!(classes.get_mo_class(Command::All, "1"), None);
    }

    #[test]
    fn test_default_table_order() {
        let order: Vec<Command> = ClassMap::default()
            .default_entries()
            .iter()
            .map(|e| e.command)
            .collect();
        assert_eq!(
            order,
            vec![
                Command::Fantray,
                Command::PowerSupplies,
                Command::SupervisorModule,
                Command::LinecardModule,
                Command::Interfaces,
                Command::Firmware,
            ]
        );
    }

    #[test]
    fn test_controller_table_missing_entry() {
        let classes = ClassMap::new(
            vec![ClassEntry::new(Command::Firmware, "firmwareRunning")],
            Vec::new(),
        );
        assert_eq!(classes.get_mo_class(Command::Firmware, "2"), None);
        assert_eq!(
            classes.get_mo_class(Command::Firmware, "102"),
            Some("firmwareRunning")
        );
    }
}
