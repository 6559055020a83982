pub mod config;
pub mod entry;
pub mod records;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(entry::definitions());
    commands.extend(records::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in all_definitions() {
        registry.register(entry);
    }
    registry.alias("delete", "del");
    registry.alias("clear", "clr");
    registry.alias("quit", "exit");
}
