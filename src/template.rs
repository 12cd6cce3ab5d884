//! Rendering `*.template` files into the output directory.

use std::fs;
use std::path::{ Path, PathBuf };
use gl_api_registry::{ ExtensionRequest, Function, FunctionGroup, Version };
use glob::Pattern;
use minijinja::{ Environment, UndefinedBehavior };
use serde::{ Serialize, Serializer };
use serde::ser::SerializeStruct;
use crate::error::{ GenerateError, Result };
use crate::options::GeneratorOptions;

const TEMPLATE_SUFFIX: &'static str = ".template";

/// Values a template is rendered with.
///
/// Templates see `passthru` and `enums` as text, `functions` as a list of
/// `(group, functions)` pairs, `extensions` as `{ name, required }` records, and
/// `version` and `options` as records of their fields.
#[derive(Debug, Clone, Copy)]
pub struct Namespace<'a> {
    pub passthru: &'a str,
    pub functions: &'a [FunctionGroup],
    pub enums: &'a str,
    pub options: &'a GeneratorOptions,
    pub version: &'a Version,
    pub extensions: &'a [ExtensionRequest],
}

#[derive(Serialize)]
struct VersionValue<'a> {
    api: &'a str,
    profile: &'a str,
    major: u32,
    minor: u32,
    int_value: u32,
    description: String,
}

impl<'a> From<&'a Version> for VersionValue<'a> {
    fn from(version: &'a Version) -> VersionValue<'a> {
        VersionValue {
            api: version.api().as_str(),
            profile: version.profile().as_str(),
            major: version.major(),
            minor: version.minor(),
            int_value: version.int_value(),
            description: version.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ParamValue<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ty: &'a str,
}

#[derive(Serialize)]
struct FunctionValue<'a> {
    name: &'a str,
    returntype: &'a str,
    params: Vec<ParamValue<'a>>,
    param_list: String,
    param_type_list: String,
}

impl<'a> From<&'a Function> for FunctionValue<'a> {
    fn from(f: &'a Function) -> FunctionValue<'a> {
        FunctionValue {
            name: &f.name,
            returntype: &f.returntype,
            params: f.params.iter()
                .map(|&(ref name, ref ty)| ParamValue { name: name, ty: ty })
                .collect(),
            param_list: f.param_list_string(),
            param_type_list: f.param_type_list_string(),
        }
    }
}

#[derive(Serialize)]
struct ExtensionValue<'a> {
    name: &'a str,
    required: bool,
}

#[derive(Serialize)]
struct OptionsValue {
    profile: String,
    template_dir: String,
    outdir: String,
    spec_dir: String,
    download: bool,
}

impl<'a> From<&'a GeneratorOptions> for OptionsValue {
    fn from(options: &'a GeneratorOptions) -> OptionsValue {
        OptionsValue {
            profile: options.profile.display().to_string(),
            template_dir: options.template_dir.display().to_string(),
            outdir: options.outdir.display().to_string(),
            spec_dir: options.spec_dir.display().to_string(),
            download: options.download,
        }
    }
}

impl<'a> Serialize for Namespace<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
        let functions: Vec<(&str, Vec<FunctionValue>)> = self.functions.iter()
            .map(|&(ref group, ref fns)| (group.as_str(), fns.iter().map(FunctionValue::from).collect()))
            .collect();
        let extensions: Vec<ExtensionValue> = self.extensions.iter()
            .map(|e| ExtensionValue { name: &e.name, required: e.required })
            .collect();

        let mut state = serializer.serialize_struct("Namespace", 6)?;
        state.serialize_field("passthru", self.passthru)?;
        state.serialize_field("functions", &functions)?;
        state.serialize_field("enums", self.enums)?;
        state.serialize_field("options", &OptionsValue::from(self.options))?;
        state.serialize_field("version", &VersionValue::from(self.version))?;
        state.serialize_field("extensions", &extensions)?;
        state.end()
    }
}

pub trait TemplateEngine {
    /// Renders template text. Errors are reported as a message.
    fn render(&self, template: &str, namespace: &Namespace) -> ::std::result::Result<String, String>;
}

/// Renders Jinja-syntax templates with `minijinja`.
///
/// Block tags swallow the newline that follows them and the indentation before them, and
/// using a name the namespace does not define is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct JinjaEngine;

impl JinjaEngine {
    fn environment(&self) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env
    }
}

impl TemplateEngine for JinjaEngine {
    fn render(&self, template: &str, namespace: &Namespace) -> ::std::result::Result<String, String> {
        self.environment()
            .render_str(template, namespace)
            .map_err(|e| e.to_string())
    }
}

/// Output file for a template: its name with the `.template` suffix removed, in `outdir`.
pub fn output_path(template: &Path, outdir: &Path) -> Option<PathBuf> {
    let name = template.file_name()?.to_str()?;
    let stem = name.strip_suffix(TEMPLATE_SUFFIX)?;
    Some(outdir.join(stem))
}

fn find_templates(template_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*{}",
                          Pattern::escape(&template_dir.to_string_lossy()),
                          TEMPLATE_SUFFIX);
    let mut templates = Vec::new();
    for entry in glob::glob(&pattern).map_err(|e| GenerateError::Render {
        template: pattern.clone(),
        message: e.to_string(),
    })? {
        templates.push(entry.map_err(|e| e.into_error())?);
    }
    templates.sort();
    Ok(templates)
}

/// Renders every template in `options.template_dir` into `options.outdir`.
///
/// Every template is rendered before anything is written, so a template that fails to
/// render leaves the output directory untouched. Returns `(generated, total)`.
pub fn generate_source<E: TemplateEngine + ?Sized>(options: &GeneratorOptions, engine: &E, namespace: &Namespace) -> Result<(usize, usize)> {
    if !options.template_dir.is_dir() {
        return Err(GenerateError::NotADirectory(options.template_dir.clone()));
    }
    if options.outdir.exists() && !options.outdir.is_dir() {
        return Err(GenerateError::NotADirectory(options.outdir.clone()));
    }

    let mut rendered = Vec::new();
    for template_path in find_templates(&options.template_dir)? {
        let outfile = match output_path(&template_path, &options.outdir) {
            Some(outfile) => outfile,
            None => continue,
        };
        let template = fs::read_to_string(&template_path)?;
        let text = engine.render(&template, namespace).map_err(|message| GenerateError::Render {
            template: template_path.display().to_string(),
            message: message,
        })?;
        rendered.push((outfile, text));
    }

    if !options.outdir.exists() {
        fs::create_dir_all(&options.outdir)?;
    }

    let all_files = rendered.len();
    let mut generated_files = 0;
    for (outfile, text) in rendered {
        fs::write(&outfile, text)?;
        info!("Successfully generated {}", outfile.display());
        generated_files += 1;
    }

    info!("Generated {} of {} files", generated_files, all_files);
    Ok((generated_files, all_files))
}
