//! Cross-references between subsets, commands and types.

use std::collections::{ HashMap, HashSet };
use crate::model::{ ApiSubset, Command, Enum, Type };
use crate::profile::ExtensionRequest;
use crate::ResolveError;

/// Registry prefix of extension names; profiles list them without it.
pub const EXTENSION_PREFIX: &'static str = "GL_";

/// Keeps, for every type name, the most specific applicable declaration.
///
/// An API-agnostic declaration is dropped when an API-specific declaration of the same
/// name follows it. Everything else survives, in declaration order.
pub fn resolve_specializations(types: Vec<Type>) -> Vec<Type> {
    let mut last_specific: HashMap<String, usize> = HashMap::new();
    for (index, ty) in types.iter().enumerate() {
        if ty.api.is_some() {
            last_specific.insert(ty.name.clone(), index);
        }
    }

    types.into_iter()
        .enumerate()
        .filter(|&(index, ref ty)| {
            ty.api.is_some() || last_specific.get(&ty.name).map_or(true, |&specific| specific < index)
        })
        .map(|(_, ty)| ty)
        .collect()
}

/// One subset per requested extension, in request order.
///
/// Requests that name nothing in `extensions` are logged and left out.
pub fn extension_subsets(extensions: &HashMap<String, ApiSubset>, requests: &[ExtensionRequest]) -> Vec<ApiSubset> {
    let mut subsets = Vec::new();

    for request in requests {
        let key = format!("{}{}", EXTENSION_PREFIX, request.name);
        match extensions.get(&key) {
            Some(extension) => {
                subsets.push(ApiSubset {
                    name: request.name.clone(),
                    ..extension.clone()
                });
            },
            None => {
                warn!("{} is not an extension", request.name);
            },
        }
    }

    subsets
}

/// Names of every type the selected subsets need declared.
///
/// That is each subset's own types plus the types its commands reference, extended by one
/// level of `requires`: the dependent of a directly needed type is added, the dependent of
/// that dependent is not.
pub fn resolve_type_dependencies(subsets: &[ApiSubset], types: &[Type], commands: &HashMap<String, Command>) -> Result<HashSet<String>, ResolveError> {
    let mut direct: HashSet<String> = HashSet::new();

    for subset in subsets {
        direct.extend(subset.types.iter().cloned());
        for name in &subset.commands {
            let command = commands.get(name).ok_or_else(|| ResolveError::UnknownCommand {
                subset: subset.name.clone(),
                name: name.clone(),
            })?;
            direct.extend(command.required_types.iter().cloned());
        }
    }

    let dependents: Vec<String> = types.iter()
        .filter(|ty| direct.contains(&ty.name))
        .filter_map(|ty| ty.dependent.clone())
        .collect();

    let mut required = direct;
    required.extend(dependents);
    Ok(required)
}

/// Values of every enum the subsets list.
pub fn resolve_enum_values(subsets: &[ApiSubset], enums: &HashMap<String, Enum>) -> Result<HashMap<String, String>, ResolveError> {
    let mut values = HashMap::new();
    for subset in subsets {
        for name in &subset.enums {
            let e = enums.get(name).ok_or_else(|| ResolveError::UnknownEnum {
                subset: subset.name.clone(),
                name: name.clone(),
            })?;
            values.insert(name.clone(), e.value.clone());
        }
    }
    Ok(values)
}
