//! Category dispatch for control-file directives.

use std::path::{Path, PathBuf};

use spinconf_lexer::Token;
use tracing::info;

use crate::config::Configuration;
use crate::error::Reason;
use crate::loader::{load_material_file, Options};
use crate::matchers::{apply, atoms, create, dimensions, output, sim, Directive};

/// Top-level keyword namespace of a control-file line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Create,
    Dimensions,
    Sim,
    /// `vmag`, per-step file output.
    FileOutput,
    ScreenOutput,
    /// `vgrain`, per-grain output.
    GrainOutput,
    /// `config`, atomic configuration snapshots.
    Atoms,
    /// `material`, only `material:file=<path>`.
    Material,
}

/// Category keys in matching order.
pub const CATEGORIES: &[(&str, Category)] = &[
    ("create", Category::Create),
    ("dimensions", Category::Dimensions),
    ("sim", Category::Sim),
    ("vmag", Category::FileOutput),
    ("screen", Category::ScreenOutput),
    ("vgrain", Category::GrainOutput),
    ("config", Category::Atoms),
    ("material", Category::Material),
];

impl Category {
    pub fn from_key(key: &str) -> Option<Self> {
        CATEGORIES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, category)| *category)
    }
}

/// Routes tokens of one control file to the category matchers.
pub struct Dispatcher<'a> {
    options: &'a Options<'a>,
    /// Directory of the control file; `material:file` paths are relative
    /// to it.
    dir: PathBuf,
}

impl<'a> Dispatcher<'a> {
    pub fn new(options: &'a Options<'a>, dir: impl Into<PathBuf>) -> Self {
        Self {
            options,
            dir: dir.into(),
        }
    }

    /// Validate `token` and apply it to `config`.
    pub fn dispatch(&self, config: &mut Configuration, token: &Token) -> Result<(), Reason> {
        let directive = Directive::new(token, self.options.converter);
        let category = Category::from_key(&token.key).ok_or_else(|| directive.unknown())?;

        match category {
            Category::Create => apply(create::TABLE, &mut config.create, &directive),
            Category::Dimensions => apply(dimensions::TABLE, &mut config.dimensions, &directive),
            Category::Sim => apply(sim::TABLE, &mut config.sim, &directive),
            Category::FileOutput => apply(output::STREAM, &mut config.output.file, &directive),
            Category::ScreenOutput => apply(output::STREAM, &mut config.output.screen, &directive),
            Category::GrainOutput => apply(output::GRAIN, &mut config.output, &directive),
            Category::Atoms => apply(atoms::TABLE, &mut config.atoms, &directive),
            Category::Material => self.material_file(config, &directive),
        }
    }

    fn material_file(&self, config: &mut Configuration, d: &Directive<'_>) -> Result<(), Reason> {
        if d.word() != "file" {
            return Err(d.unknown());
        }
        let name = d.filename()?;
        let path = self.resolve(&name);
        info!("loading materials from {}", path.display());

        config.materials =
            load_material_file(&path, self.options).map_err(|err| Reason::Nested(Box::new(err)))?;
        Ok(())
    }

    fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }
}
