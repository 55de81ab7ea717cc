//! File loading.
//!
//! Control and material files are read line by line. Each line is
//! tokenized, empty tokens are skipped, and the first rejected directive
//! ends the load with an [`InputError`] naming the file and line. A
//! `material:file` directive loads the material file to completion before
//! the next control line is read; a `geometry` field inside it does the
//! same for its polygon file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use spinconf_lexer::{tokenize, Variant};
use spinconf_units::{Convert, SiUnits};
use tracing::{debug, info, warn};

use crate::config::Configuration;
use crate::dispatch::Dispatcher;
use crate::error::{InputError, Reason, Result};
use crate::material::Material;
use crate::matchers::material::Builder;
use crate::matchers::Directive;

/// Default capacity of the material table.
pub const DEFAULT_MAX_MATERIALS: usize = 100;

/// Loader settings.
#[derive(Clone, Copy)]
pub struct Options<'a> {
    /// Capacity of the material table; indices must be below it.
    pub max_materials: usize,
    pub converter: &'a dyn Convert,
}

impl Default for Options<'static> {
    fn default() -> Self {
        Self {
            max_materials: DEFAULT_MAX_MATERIALS,
            converter: &SiUnits,
        }
    }
}

impl std::fmt::Debug for Options<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("max_materials", &self.max_materials)
            .finish_non_exhaustive()
    }
}

/// Load a control file into a fresh configuration.
pub fn load(path: &Path, options: &Options<'_>) -> Result<Configuration> {
    let mut config = Configuration::default();
    load_control_file(path, &mut config, options)?;
    Ok(config)
}

/// Apply every directive of a control file to `config`.
pub fn load_control_file(
    path: &Path,
    config: &mut Configuration,
    options: &Options<'_>,
) -> Result<()> {
    let file = File::open(path).map_err(|e| InputError::open(path, e))?;
    info!("reading control file {}", path.display());
    read_control(BufReader::new(file), path, config, options)
}

/// Apply control directives read from `reader`.
///
/// `origin` names the source in diagnostics and anchors relative
/// material file paths.
pub fn read_control<R: BufRead>(
    reader: R,
    origin: &Path,
    config: &mut Configuration,
    options: &Options<'_>,
) -> Result<()> {
    let dispatcher = Dispatcher::new(options, parent_dir(origin));
    let mut applied = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.map_err(|source| read_error(origin, number, source))?;
        let token =
            tokenize(&line, Variant::Control).map_err(|e| Reason::from(e).at(origin, number))?;
        if token.is_empty() {
            continue;
        }

        debug!(
            line = number,
            value = %token.value,
            unit = %token.unit,
            "{}",
            token.statement()
        );
        dispatcher
            .dispatch(config, &token)
            .map_err(|reason| reason.at(origin, number))?;
        applied += 1;
    }

    info!(directives = applied, "loaded {}", origin.display());
    Ok(())
}

/// Build the material table from a material file.
pub fn load_material_file(path: &Path, options: &Options<'_>) -> Result<Vec<Material>> {
    let file = File::open(path).map_err(|e| InputError::open(path, e))?;
    read_materials(BufReader::new(file), path, options)
}

/// Build the material table from material lines read from `reader`.
pub fn read_materials<R: BufRead>(
    reader: R,
    origin: &Path,
    options: &Options<'_>,
) -> Result<Vec<Material>> {
    let variant = Variant::Material {
        max_index: options.max_materials,
    };
    let mut builder = Builder::new(options.max_materials, parent_dir(origin));

    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.map_err(|source| read_error(origin, number, source))?;
        let token = tokenize(&line, variant).map_err(|e| Reason::from(e).at(origin, number))?;
        if token.is_empty() {
            continue;
        }

        let directive = Directive::material(&token, options.converter);
        debug!(
            line = number,
            value = %token.value,
            unit = %token.unit,
            "{}",
            directive.statement()
        );
        builder
            .apply(&directive)
            .map_err(|reason| reason.at(origin, number))?;
    }

    let count = builder.table().num_materials();
    if count == 0 {
        warn!("{} does not set num-materials, no materials defined", origin.display());
    }
    info!(materials = count, "loaded {}", origin.display());
    Ok(builder.finish())
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

fn read_error(path: &Path, line: usize, source: std::io::Error) -> InputError {
    Reason::Read {
        path: path.to_path_buf(),
        source,
    }
    .at(path, line)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::config::Program;
    use crate::error::Severity;

    fn read(source: &str) -> Result<Configuration> {
        let mut config = Configuration::default();
        read_control(
            Cursor::new(source),
            Path::new("input"),
            &mut config,
            &Options::default(),
        )?;
        Ok(config)
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let config = read("\n# header\n   \n\tsim:program = Field-Cool  # cool down\n").unwrap();
        assert_eq!(config.sim.program, Program::FieldCool);
    }

    #[test]
    fn test_error_reports_line() {
        let err = read("sim:dt=1e-16\n\nsim:dt=2.0e-5\nsim:runs=2\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.file, PathBuf::from("input"));
        assert_eq!(err.severity(), Severity::Fatal);
        assert!(err.to_string().starts_with("input:3: 'sim:dt'"));
    }

    #[test]
    fn test_stops_at_first_error() {
        let mut config = Configuration::default();
        let result = read_control(
            Cursor::new("sim:runs=2\nsim:bogus=1\nsim:runs=5\n"),
            Path::new("input"),
            &mut config,
            &Options::default(),
        );
        let err = result.unwrap_err();
        assert_eq!(err.severity(), Severity::Recoverable);
        assert_eq!(config.sim.runs, 2);
    }

    #[test]
    fn test_material_index_error_reports_line() {
        let options = Options {
            max_materials: 2,
            ..Options::default()
        };
        let err = read_materials(
            Cursor::new("material:num-materials=2\nmaterial[2]:alpha=0.1\n"),
            Path::new("Co.mat"),
            &options,
        )
        .unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(err.reason, Reason::Index(_)));
    }

    #[test]
    fn test_compaction_to_num_materials() {
        let source = "\
material:num-materials=2
material[0]:name=Co
material[1]:name=Pt
material[2]:name=unused
";
        let materials =
            read_materials(Cursor::new(source), Path::new("mat"), &Options::default()).unwrap();
        let names: Vec<_> = materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Co", "Pt"]);
    }

    #[test]
    fn test_num_materials_may_follow_records() {
        let source = "material[0]:alpha=0.05\nmaterial:num-materials=1\n";
        let materials =
            read_materials(Cursor::new(source), Path::new("mat"), &Options::default()).unwrap();
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].alpha, 0.05);
    }

    #[test]
    fn test_missing_control_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent"), &Options::default()).unwrap_err();
        assert_eq!(err.line, 0);
        assert!(matches!(err.reason, Reason::Open { .. }));
    }
}
