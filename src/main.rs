extern crate clap;
extern crate env_logger;
extern crate gl_loadgen;
#[macro_use]
extern crate log;

use std::path::PathBuf;
use std::process;
use clap::Parser;
use gl_loadgen::{ GeneratorOptions, HttpFetcher, JinjaEngine };

#[derive(Debug, Parser)]
#[clap(name = "gl-loadgen")]
#[clap(version)]
#[clap(about = "Generates OpenGL loader sources from the API registry")]
struct CliArgs {
    /// Profile description: target version and extensions
    #[clap(value_name = "PROFILE")]
    profile: PathBuf,

    /// Directory the generated files are written to
    #[clap(value_name = "OUTDIR")]
    outdir: PathBuf,

    /// Directory holding the *.template files
    #[clap(short = 't', long, value_name = "DIR", default_value = "templates")]
    template_dir: PathBuf,

    /// Directory the registry is cached in
    #[clap(long, value_name = "DIR", default_value = "spec")]
    spec_dir: PathBuf,

    /// Download the registry even if the cached copy is recent
    #[clap(short = 'D', long)]
    download: bool,
}

impl From<CliArgs> for GeneratorOptions {
    fn from(args: CliArgs) -> GeneratorOptions {
        GeneratorOptions {
            profile: args.profile,
            template_dir: args.template_dir,
            outdir: args.outdir,
            spec_dir: args.spec_dir,
            download: args.download,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = GeneratorOptions::from(CliArgs::parse());
    if let Err(e) = gl_loadgen::run(&options, &HttpFetcher, &JinjaEngine) {
        error!("{}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
