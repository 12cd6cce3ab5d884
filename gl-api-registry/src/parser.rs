//! Reads entity tables out of a registry document tree.

use std::collections::{ BTreeSet, HashMap, HashSet };
use regex::Regex;
use crate::model::{ ApiSubset, Command, Enum, Type };
use crate::profile::{ Api, Version };
use crate::resolver::resolve_specializations;
use crate::xast::Node;
use crate::{ ParseError, ParseResult };

lazy_static! {
    static ref FEATURE_NUMBER_PATTERN: Regex = Regex::new(r"^(\d)\.(\d)").unwrap();
}

fn api_matches(node: &Node, api: &str) -> bool {
    node.get_attribute("api").map(|a| a == api).unwrap_or(true)
}

/// All `<types>/<type>` entries applicable to `api`, with each name resolved to its most
/// specific declaration.
pub fn parse_types(root: &Node, api: &str) -> ParseResult<Vec<Type>> {
    let mut types = Vec::new();

    for block in root.children_named("types") {
        for ty in block.children_named("type") {
            if !api_matches(ty, api) {
                continue;
            }
            let name = match ty.get_attribute("name") {
                Some(name) => name.to_owned(),
                None => ty.require_child("name")?.leading_text(),
            };
            types.push(Type {
                api: ty.get_attribute("api").map(String::from),
                name: name,
                definition: ty.flatten_text(&[("apientry", "APIENTRY")]),
                dependent: ty.get_attribute("requires").map(String::from),
            });
        }
    }

    Ok(resolve_specializations(types))
}

/// All `<enums>/<enum>` entries applicable to `api`, keyed by name. A later entry with the
/// same name replaces an earlier one.
pub fn parse_enums(root: &Node, api: &str) -> ParseResult<HashMap<String, Enum>> {
    let mut enums = HashMap::new();

    for block in root.children_named("enums") {
        for e in block.children_named("enum") {
            if !api_matches(e, api) {
                continue;
            }
            let name = e.require_attribute("name")?;
            let value = e.require_attribute("value")?;
            let value = match e.get_attribute("type") {
                Some(suffix) => format!("{}{}", value, suffix),
                None => value.to_owned(),
            };
            enums.insert(name.to_owned(), Enum {
                name: name.to_owned(),
                value: value,
            });
        }
    }

    Ok(enums)
}

/// `(name, type, referenced registry type)` of a `<proto>` or `<param>` element.
fn parse_type_name_pair(node: &Node) -> ParseResult<(String, String, Option<String>)> {
    let name = node.require_child("name")?.leading_text().trim().to_owned();
    let ty = node.flatten_text(&[("name", "")]).trim().to_owned();
    let ptype = node.get_child("ptype").map(|p| p.leading_text().trim().to_owned());
    Ok((name, ty, ptype))
}

/// Every `<commands>/<command>`, regardless of API.
pub fn parse_commands(root: &Node) -> ParseResult<HashMap<String, Command>> {
    let mut commands = HashMap::new();

    for block in root.children_named("commands") {
        for cmd in block.children_named("command") {
            let mut required_types = BTreeSet::new();
            let (name, returntype, ptype) = parse_type_name_pair(cmd.require_child("proto")?)?;
            required_types.extend(ptype);

            let mut params = Vec::new();
            for param in cmd.children_named("param") {
                let (pname, pty, ptype) = parse_type_name_pair(param)?;
                params.push((pname, pty));
                required_types.extend(ptype);
            }

            commands.insert(name.clone(), Command {
                name: name,
                returntype: returntype,
                params: params,
                required_types: required_types,
            });
        }
    }

    Ok(commands)
}

/// `"3.2"` -> `32`.
pub fn parse_int_version(feature: &str, number: &str) -> ParseResult<u32> {
    let invalid = || ParseError::InvalidVersionNumber {
        feature: feature.to_owned(),
        number: number.to_owned(),
    };
    let caps = FEATURE_NUMBER_PATTERN.captures(number).ok_or_else(invalid)?;
    let major: u32 = caps[1].parse().map_err(|_| invalid())?;
    let minor: u32 = caps[2].parse().map_err(|_| invalid())?;
    Ok(major * 10 + minor)
}

/// One subset per `<feature>` of the requested API up to and including `version`.
///
/// `require` blocks add names to the feature being built. `remove` blocks strip names from
/// every subset built so far, the one in progress included, so a later feature can empty
/// entries out of an earlier one. On desktop GL, blocks tagged with a different profile
/// are skipped.
pub fn parse_features(root: &Node, version: &Version) -> ParseResult<Vec<ApiSubset>> {
    let api = version.api().as_str();
    let profile = version.profile().as_str();
    let mut subsets: Vec<ApiSubset> = Vec::new();

    let features = root.children_named("feature")
        .filter(|f| f.get_attribute("api") == Some(api))
        .filter(|f| f.has_attribute("name") && f.has_attribute("number"));

    for feature in features {
        let feature_name = feature.require_attribute("name")?;
        let number = parse_int_version(feature_name, feature.require_attribute("number")?)?;
        if number > version.int_value() {
            debug!("skipping {}: newer than {}", feature_name, version);
            continue;
        }

        let mut current = ApiSubset::new(feature_name.chars().skip(3).collect::<String>());

        for action_set in feature.children() {
            if version.api() == Api::Gl {
                if let Some(tag) = action_set.get_attribute("profile") {
                    if tag != profile {
                        continue;
                    }
                }
            }

            match action_set.name.as_str() {
                "require" => {
                    current.types.extend(action_set.child_names("type"));
                    current.enums.extend(action_set.child_names("enum"));
                    current.commands.extend(action_set.child_names("command"));
                },
                "remove" => {
                    let types: HashSet<String> = action_set.child_names("type").into_iter().collect();
                    let enums: HashSet<String> = action_set.child_names("enum").into_iter().collect();
                    let commands: HashSet<String> = action_set.child_names("command").into_iter().collect();
                    for subset in subsets.iter_mut().chain(Some(&mut current)) {
                        subset.types.retain(|entry| !types.contains(entry));
                        subset.enums.retain(|entry| !enums.contains(entry));
                        subset.commands.retain(|entry| !commands.contains(entry));
                    }
                },
                _ => {},
            }
        }

        subsets.push(current);
    }

    Ok(subsets)
}

/// Every `<extensions>/<extension>`, keyed by its full registry name (`GL_EXT_foo`).
///
/// The subsets take everything listed under the extension's `require` blocks.
pub fn parse_extensions(root: &Node) -> ParseResult<HashMap<String, ApiSubset>> {
    let mut extensions = HashMap::new();

    for block in root.children_named("extensions") {
        for ext in block.children_named("extension") {
            let name = ext.require_attribute("name")?;
            let mut subset = ApiSubset::new(name);
            for require in ext.children_named("require") {
                subset.types.extend(require.child_names("type"));
                subset.enums.extend(require.child_names("enum"));
                subset.commands.extend(require.child_names("command"));
            }
            extensions.insert(name.to_owned(), subset);
        }
    }

    Ok(extensions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::GlProfile;

    fn doc(xml: &str) -> Node {
        Node::parse_document(xml.as_bytes()).unwrap()
    }

    fn gl(major: u32, minor: u32, profile: GlProfile) -> Version {
        Version::new(Api::Gl, major, minor, profile)
    }

    const TYPES: &'static str = r#"<registry><types>
        <type name="khrplatform">#include &lt;KHR/khrplatform.h&gt;</type>
        <type requires="khrplatform">typedef khronos_int8_t <name>GLbyte</name>;</type>
        <type>typedef void (<apientry/> *<name>GLDEBUGPROC</name>)(GLenum source);</type>
        <type>typedef unsigned int <name>GLhandleARB</name>;</type>
        <type api="gles2">typedef int <name>GLhandleARB</name>;</type>
        <type api="gl">#ifdef __APPLE__ typedef void *<name>GLhandleARB</name>; #endif</type>
    </types></registry>"#;

    #[test]
    fn types_are_flattened_and_filtered() {
        let types = parse_types(&doc(TYPES), "gl").unwrap();
        let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["khrplatform", "GLbyte", "GLDEBUGPROC", "GLhandleARB"]);
        assert_eq!(types[0].definition, "#include <KHR/khrplatform.h>");
        assert_eq!(types[1].definition, "typedef khronos_int8_t GLbyte;");
        assert_eq!(types[1].dependent.as_ref().map(|s| s.as_str()), Some("khrplatform"));
        assert_eq!(types[2].definition, "typedef void (APIENTRY *GLDEBUGPROC)(GLenum source);");
    }

    #[test]
    fn specific_type_replaces_generic_one() {
        let types = parse_types(&doc(TYPES), "gl").unwrap();
        let handles: Vec<&Type> = types.iter().filter(|t| t.name == "GLhandleARB").collect();
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].api.as_ref().map(|s| s.as_str()), Some("gl"));
        assert!(handles[0].definition.contains("void *GLhandleARB"));

        let es_types = parse_types(&doc(TYPES), "gles2").unwrap();
        let handle = es_types.iter().find(|t| t.name == "GLhandleARB").unwrap();
        assert_eq!(handle.definition, "typedef int GLhandleARB;");
    }

    #[test]
    fn enums_are_api_filtered_and_suffixed() {
        let root = doc(r#"<registry>
            <enums namespace="GL"><enum value="0x0001" name="GL_ONE"/>
            <enum value="0xFFFFFFFFFFFFFFFF" type="ull" name="GL_TIMEOUT_IGNORED"/>
            <enum value="0x8D64" name="GL_ETC1" api="gles2"/></enums>
            <enums><enum value="0x0002" name="GL_ONE"/></enums>
        </registry>"#);
        let enums = parse_enums(&root, "gl").unwrap();
        assert_eq!(enums.len(), 2);
        assert_eq!(enums["GL_ONE"].value, "0x0002");
        assert_eq!(enums["GL_TIMEOUT_IGNORED"].value, "0xFFFFFFFFFFFFFFFFull");
        assert!(parse_enums(&root, "gles2").unwrap().contains_key("GL_ETC1"));
    }

    #[test]
    fn enum_without_value_is_an_error() {
        let root = doc(r#"<registry><enums><enum name="GL_BAD"/></enums></registry>"#);
        match parse_enums(&root, "gl") {
            Err(ParseError::MissingAttribute { attribute, .. }) => assert_eq!(attribute, "value"),
            other => panic!("expected missing attribute, got {:?}", other),
        }
    }

    #[test]
    fn commands_record_params_and_required_types() {
        let root = doc(r#"<registry><commands namespace="GL">
            <command>
                <proto>const <ptype>GLubyte</ptype> *<name>glGetString</name></proto>
                <param group="StringName"><ptype>GLenum</ptype> <name>name</name></param>
            </command>
            <command>
                <proto>void <name>glFinish</name></proto>
            </command>
            <command api="gles2">
                <proto>void <name>glShaderBinary</name></proto>
                <param>const <ptype>GLuint</ptype> *<name>shaders</name></param>
                <param>const void *<name>binary</name></param>
            </command>
        </commands></registry>"#);
        let commands = parse_commands(&root).unwrap();
        assert_eq!(commands.len(), 3);

        let get_string = &commands["glGetString"];
        assert_eq!(get_string.returntype, "const GLubyte *");
        assert_eq!(get_string.params, vec![("name".to_owned(), "GLenum".to_owned())]);
        let required: Vec<&str> = get_string.required_types.iter().map(|s| s.as_str()).collect();
        assert_eq!(required, vec!["GLenum", "GLubyte"]);

        assert!(commands["glFinish"].params.is_empty());
        assert!(commands["glFinish"].required_types.is_empty());

        let binary = &commands["glShaderBinary"];
        assert_eq!(binary.params[1], ("binary".to_owned(), "const void *".to_owned()));
        assert_eq!(binary.required_types.len(), 1);
    }

    #[test]
    fn int_version_numbers() {
        assert_eq!(parse_int_version("GL_VERSION_4_6", "4.6").unwrap(), 46);
        assert_eq!(parse_int_version("GL_ES_VERSION_2_0", "2.0").unwrap(), 20);
        assert!(parse_int_version("GL_BAD", "four").is_err());
    }

    const FEATURES: &'static str = r#"<registry>
        <feature api="gl" name="GL_VERSION_1_0" number="1.0">
            <require><type name="GLenum"/><command name="glBegin"/><command name="glClear"/><enum name="GL_QUADS"/></require>
        </feature>
        <feature api="gles2" name="GL_ES_VERSION_2_0" number="2.0">
            <require><command name="glClear"/></require>
        </feature>
        <feature api="gl" name="GL_VERSION_3_2" number="3.2">
            <require><command name="glFenceSync"/></require>
            <require profile="compatibility"><enum name="GL_CONTEXT_COMPATIBILITY_PROFILE_BIT"/></require>
            <remove profile="core"><command name="glBegin"/><enum name="GL_QUADS"/></remove>
        </feature>
        <feature api="gl" name="GL_VERSION_4_0" number="4.0">
            <require><command name="glPatchParameteri"/></require>
        </feature>
    </registry>"#;

    #[test]
    fn features_up_to_requested_version() {
        let subsets = parse_features(&doc(FEATURES), &gl(3, 3, GlProfile::Compatibility)).unwrap();
        let names: Vec<&str> = subsets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["VERSION_1_0", "VERSION_3_2"]);
        assert_eq!(subsets[0].commands, vec!["glBegin", "glClear"]);
        assert_eq!(subsets[0].types, vec!["GLenum"]);
        assert_eq!(subsets[1].enums, vec!["GL_CONTEXT_COMPATIBILITY_PROFILE_BIT"]);
    }

    #[test]
    fn core_remove_strips_earlier_features() {
        let subsets = parse_features(&doc(FEATURES), &gl(3, 2, GlProfile::Core)).unwrap();
        assert_eq!(subsets[0].commands, vec!["glClear"]);
        assert!(subsets[0].enums.is_empty());
        assert!(subsets[1].enums.is_empty());
        assert_eq!(subsets[1].commands, vec!["glFenceSync"]);
    }

    #[test]
    fn unprofiled_request_skips_profile_tagged_blocks() {
        let subsets = parse_features(&doc(FEATURES), &gl(3, 2, GlProfile::Unspecified)).unwrap();
        assert_eq!(subsets[0].commands, vec!["glBegin", "glClear"]);
        assert!(subsets[1].enums.is_empty());
    }

    #[test]
    fn remove_applies_to_the_feature_in_progress() {
        let root = doc(r#"<registry><feature api="gl" name="GL_VERSION_1_0" number="1.0">
            <require><type name="A"/><type name="B"/><type name="C"/></require>
            <remove><type name="B"/></remove>
        </feature></registry>"#);
        let subsets = parse_features(&root, &gl(1, 0, GlProfile::Unspecified)).unwrap();
        assert_eq!(subsets[0].types, vec!["A", "C"]);
    }

    #[test]
    fn later_remove_is_retroactive() {
        let root = doc(r#"<registry>
            <feature api="gl" name="GL_VERSION_1_0" number="1.0">
                <require><command name="glA"/><command name="glB"/></require>
            </feature>
            <feature api="gl" name="GL_VERSION_1_1" number="1.1">
                <require><command name="glC"/></require>
            </feature>
            <feature api="gl" name="GL_VERSION_1_2" number="1.2">
                <remove><command name="glA"/><command name="glC"/></remove>
                <require><command name="glA"/></require>
            </feature>
        </registry>"#);
        let subsets = parse_features(&root, &gl(1, 2, GlProfile::Unspecified)).unwrap();
        assert_eq!(subsets[0].commands, vec!["glB"]);
        assert!(subsets[1].commands.is_empty());
        assert_eq!(subsets[2].commands, vec!["glA"]);
    }

    #[test]
    fn es_profile_tags_are_not_filtered() {
        let root = doc(r#"<registry><feature api="gles2" name="GL_ES_VERSION_2_0" number="2.0">
            <require profile="common"><command name="glClear"/></require>
        </feature></registry>"#);
        let version = Version::new(Api::Gles2, 2, 0, GlProfile::Unspecified);
        let subsets = parse_features(&root, &version).unwrap();
        assert_eq!(subsets[0].name, "ES_VERSION_2_0");
        assert_eq!(subsets[0].commands, vec!["glClear"]);
    }

    #[test]
    fn extensions_collect_all_require_blocks() {
        let root = doc(r#"<registry><extensions>
            <extension name="GL_EXT_foo" supported="gl">
                <require><enum name="GL_FOO"/><command name="glFooEXT"/></require>
                <require api="gles2"><type name="GLfoo"/></require>
            </extension>
        </extensions></registry>"#);
        let extensions = parse_extensions(&root).unwrap();
        let foo = &extensions["GL_EXT_foo"];
        assert_eq!(foo.enums, vec!["GL_FOO"]);
        assert_eq!(foo.commands, vec!["glFooEXT"]);
        assert_eq!(foo.types, vec!["GLfoo"]);
    }
}
