//! Sample program finder and loader
//!
//! Sample sources live in `$CARGO_MANIFEST_DIR/samples/`. File names are
//! `<kind>-<number>-<description>.bl`, e.g. `program-03-nested-loops.bl` or
//! `invalid-02-name-mismatch.bl`. A sample is resolved from its kind and number; the
//! description is free text. Two files with the same kind and number are a corpus error.
//!
//! ```rust,ignore
//! let program = Samples::program(3).parse();
//! let error = Samples::invalid(2).parse_err();
//! ```

use crate::bl::ast::Program;
use crate::bl::loader::{LoaderError, ProgramLoader};
use crate::bl::parsing::ParseError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const SAMPLES_DIR: &str = "samples";
const SAMPLE_EXTENSION: &str = "bl";

/// Categories of sample sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// Well-formed programs
    Program,
    /// Programs that must be rejected
    Invalid,
}

impl SampleKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            SampleKind::Program => "program",
            SampleKind::Invalid => "invalid",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("No {kind:?} sample numbered {number} in {}", dir.display())]
    NotFound {
        kind: SampleKind,
        number: usize,
        dir: PathBuf,
    },
    #[error("Duplicate sample number: {} and {}", .0.display(), .1.display())]
    DuplicateNumber(PathBuf, PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn samples_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(SAMPLES_DIR)
}

/// Map number -> path for every sample of `kind` in `dir`
pub fn list_samples(dir: &Path, kind: SampleKind) -> Result<BTreeMap<usize, PathBuf>, SampleError> {
    let mut samples = BTreeMap::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(SAMPLE_EXTENSION) {
            continue;
        }
        let Some(number) = sample_number(&path, kind) else {
            continue;
        };
        if let Some(previous) = samples.insert(number, path.clone()) {
            return Err(SampleError::DuplicateNumber(previous, path));
        }
    }

    Ok(samples)
}

fn sample_number(path: &Path, kind: SampleKind) -> Option<usize> {
    let stem = path.file_stem()?.to_str()?;
    let rest = stem.strip_prefix(kind.prefix())?.strip_prefix('-')?;
    let digits = rest.split('-').next()?;
    digits.parse().ok()
}

pub fn find_sample(kind: SampleKind, number: usize) -> Result<PathBuf, SampleError> {
    let dir = samples_root();
    list_samples(&dir, kind)?
        .remove(&number)
        .ok_or(SampleError::NotFound { kind, number, dir })
}

/// Entry point for loading samples in tests
pub struct Samples;

impl Samples {
    pub fn program(number: usize) -> SampleLoader {
        SampleLoader::new(SampleKind::Program, number)
    }

    pub fn invalid(number: usize) -> SampleLoader {
        SampleLoader::new(SampleKind::Invalid, number)
    }

    /// All samples of a kind, ordered by number
    pub fn all(kind: SampleKind) -> Vec<(usize, PathBuf)> {
        list_samples(&samples_root(), kind)
            .unwrap_or_else(|e| panic!("Failed to list {kind:?} samples: {e}"))
            .into_iter()
            .collect()
    }
}

/// Loads one sample; every method panics on failure
pub struct SampleLoader {
    path: PathBuf,
}

impl SampleLoader {
    fn new(kind: SampleKind, number: usize) -> Self {
        let path = find_sample(kind, number)
            .unwrap_or_else(|e| panic!("Failed to find {kind:?} #{number}: {e}"));
        SampleLoader { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> String {
        fs::read_to_string(&self.path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", self.path.display(), e))
    }

    fn loader(&self) -> ProgramLoader {
        ProgramLoader::from_string(self.source())
    }

    /// Parse as a program, panicking on error
    pub fn parse(&self) -> Program {
        self.loader()
            .parse()
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", self.path.display(), e))
    }

    /// Parse as a program and return the error, panicking if parsing succeeds
    pub fn parse_err(&self) -> ParseError {
        match self.loader().parse() {
            Err(LoaderError::Parse(error)) => error,
            Err(other) => panic!("{}: expected a parse error, got {}", self.path.display(), other),
            Ok(program) => panic!(
                "{}: expected a parse error, parsed program {:?}",
                self.path.display(),
                program.name
            ),
        }
    }
}
