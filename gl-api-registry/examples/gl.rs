extern crate gl_api_registry;

use std::env;
use std::fs;
use gl_api_registry::{ parse_profile, Registry };

fn main() {
    let mut args = env::args().skip(1);
    let profile = args.next().unwrap_or_else(|| "profile.txt".into());
    let spec = args.next().unwrap_or_else(|| "spec/gl.xml".into());

    let (version, extensions) = parse_profile(&profile).unwrap();
    let registry = Registry::from_reader(fs::File::open(&spec).unwrap(), &version).unwrap();
    let output = registry.generate(&extensions).unwrap();
    for &(ref group, ref functions) in &output.functions {
        println!("GL_{}: {} functions", group, functions.len());
    }
}
