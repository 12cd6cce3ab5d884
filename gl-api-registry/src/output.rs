//! Turns resolved subsets into the text and lists templates are rendered with.

use std::collections::{ HashMap, HashSet };
use crate::model::{ ApiSubset, Command, Function, Type };

/// Functions introduced by one subset, under the subset's name.
pub type FunctionGroup = (String, Vec<Function>);

/// Everything the templates need from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratedOutput {
    pub passthru: String,
    pub enums: String,
    pub functions: Vec<FunctionGroup>,
}

/// Definitions of the required types in registry order, separated by blank lines.
pub fn generate_passthru(required: &HashSet<String>, types: &[Type]) -> String {
    types.iter()
        .filter(|ty| required.contains(&ty.name))
        .map(|ty| ty.definition.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One `#define` block per subset that lists enums.
pub fn generate_enums(subsets: &[ApiSubset], values: &HashMap<String, String>) -> String {
    let mut decl = String::new();

    for subset in subsets.iter().filter(|s| !s.enums.is_empty()) {
        if !decl.is_empty() {
            decl.push_str("\n\n");
        }
        decl.push_str(&format!("/* GL_{} */\n", subset.name));
        for name in &subset.enums {
            if let Some(value) = values.get(name) {
                decl.push_str(&format!("\n#define {} {}", name, value));
            }
        }
    }

    decl
}

/// Groups functions by the subset that first lists them.
///
/// `emitted` holds the command names already placed in a group; anything in it is
/// skipped and every command placed here is added to it.
pub fn generate_functions(subsets: &[ApiSubset], commands: &HashMap<String, Command>, emitted: &mut HashSet<String>) -> Vec<FunctionGroup> {
    subsets.iter()
        .map(|subset| {
            let functions = subset.commands.iter()
                .filter_map(|name| commands.get(name))
                .filter(|command| emitted.insert(command.name.clone()))
                .map(Function::from_command)
                .collect();
            (subset.name.clone(), functions)
        })
        .collect()
}
