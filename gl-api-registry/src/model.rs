//! Entities read from the registry.

use std::collections::BTreeSet;

/// A `<type>` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    /// `None` when the declaration applies to every API.
    pub api: Option<String>,
    pub name: String,
    /// Literal source text of the declaration.
    pub definition: String,
    /// Type this one needs declared before it.
    pub dependent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
    /// Literal value, with the type suffix (e.g. `ull`) appended when the registry gives one.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub returntype: String,
    /// `(name, type)` pairs in declaration order.
    pub params: Vec<(String, String)>,
    /// Registry types referenced by the return type or any parameter.
    pub required_types: BTreeSet<String>,
}

/// Names contributed by one version feature or one extension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiSubset {
    pub name: String,
    pub types: Vec<String>,
    pub enums: Vec<String>,
    pub commands: Vec<String>,
}

impl ApiSubset {
    pub fn new<S: Into<String>>(name: S) -> ApiSubset {
        ApiSubset {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A command as the templates see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Command name without its `gl` prefix.
    pub name: String,
    pub returntype: String,
    pub params: Vec<(String, String)>,
}

impl Function {
    pub fn from_command(command: &Command) -> Function {
        Function {
            name: command.name.chars().skip(2).collect(),
            returntype: command.returntype.clone(),
            params: command.params.clone(),
        }
    }

    /// `type name, type name, ...`, or `void` when there are no parameters.
    pub fn param_list_string(&self) -> String {
        if self.params.is_empty() {
            return "void".into();
        }
        self.params.iter()
            .map(|&(ref name, ref ty)| format!("{} {}", ty, name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parameter types only, or `void` when there are no parameters.
    pub fn param_type_list_string(&self) -> String {
        if self.params.is_empty() {
            return "void".into();
        }
        self.params.iter()
            .map(|&(_, ref ty)| ty.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(params: &[(&str, &str)]) -> Command {
        Command {
            name: "glBufferData".into(),
            returntype: "void".into(),
            params: params.iter().map(|&(n, t)| (n.to_owned(), t.to_owned())).collect(),
            required_types: BTreeSet::new(),
        }
    }

    #[test]
    fn function_strips_prefix() {
        let f = Function::from_command(&command(&[]));
        assert_eq!(f.name, "BufferData");
    }

    #[test]
    fn param_strings() {
        let f = Function::from_command(&command(&[("target", "GLenum"), ("data", "const void *")]));
        assert_eq!(f.param_list_string(), "GLenum target, const void * data");
        assert_eq!(f.param_type_list_string(), "GLenum, const void *");

        let empty = Function::from_command(&command(&[]));
        assert_eq!(empty.param_list_string(), "void");
        assert_eq!(empty.param_type_list_string(), "void");
    }
}
