//! Persistence capability: the macro table as Turtille source.
//!
//! A store holds one definition per line, `name -> cmd arg cmd arg ...`, in the order the
//! macros were first defined. Loading is forgiving: a missing file or a bad line is
//! logged and skipped, never fatal.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::{
    ast::{Program, ProgramDisplay},
    errors::{Result, TurtilleError},
    runtime::Interpreter,
    syntax,
};

#[derive(Debug, Clone)]
pub struct Persistence {
    store: PathBuf,
}

impl Persistence {
    pub fn new(store: impl Into<PathBuf>) -> Self {
        Self {
            store: store.into(),
        }
    }

    pub fn store(&self) -> &Path {
        &self.store
    }
}

/// Renders every macro as a definition line.
pub fn encode(macros: &IndexMap<String, Program>) -> String {
    macros
        .iter()
        .map(|(name, body)| format!("{name} -> {}\n", ProgramDisplay(body)))
        .collect()
}

impl Interpreter {
    fn store_path(&self, path: Option<&Path>) -> Option<PathBuf> {
        path.map(Path::to_path_buf).or_else(|| self.store())
    }

    /// Writes the macro table to `path`, or to the configured store.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let Some(path) = self.store_path(path) else {
            return Err(TurtilleError::invalid_argument("save", "no store configured"));
        };
        fs::write(&path, encode(&self.macros)).map_err(|source| TurtilleError::Io {
            operation: "save",
            path: path.clone(),
            source,
        })?;
        for name in self.macros.keys() {
            debug!("saved func: {name}");
        }
        info!(
            "saved {} macro(s) to {}: {:?}",
            self.macros.len(),
            path.display(),
            self.macros.keys().collect::<Vec<_>>()
        );
        Ok(())
    }

    /// Reads definitions from `path`, or the configured store, registering each macro.
    ///
    /// Returns the non-definition commands found in the file. With `silent` the summary
    /// is logged at debug instead of info.
    pub fn load(&mut self, path: Option<&Path>, silent: bool) -> Program {
        let level = if silent {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        let Some(path) = self.store_path(path) else {
            log::log!(level, "no store configured, nothing to load");
            return Vec::new();
        };
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                log::log!(level, "nothing to load from {} ({err})", path.display());
                return Vec::new();
            }
        };

        let before = self.macros.len();
        let program = self.load_source(&text, &path.display().to_string());
        log::log!(
            level,
            "loaded functions from {} ({} new)",
            path.display(),
            self.macros.len().saturating_sub(before)
        );
        program
    }

    /// Applies `text` line by line. Definitions are registered, other commands collected
    /// and returned; a line that fails to parse or define is logged and skipped.
    pub fn load_source(&mut self, text: &str, source_name: &str) -> Program {
        let mut program = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line_name = format!("{source_name}:{}", index + 1);
            let applied = syntax::parse_line(line, &line_name).and_then(|statement| match statement {
                Some(statement) => self.apply(statement, &mut program),
                None => Ok(()),
            });
            if let Err(err) = applied {
                warn!("skipping {line_name}: {err}");
            }
        }
        program
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Arg, Command};

    #[test]
    fn encodes_in_definition_order() {
        let mut macros = IndexMap::new();
        macros.insert("zz".to_string(), vec![Command::new("f", vec![Arg::Number(10.0)])]);
        macros.insert(
            "aa".to_string(),
            vec![Command::new(
                "repeat",
                vec![Arg::Number(4.0), Arg::Program(vec![Command::bare("zz")])],
            )],
        );
        assert_eq!(encode(&macros), "zz -> f 10\naa -> repeat 4 [zz]\n");
    }

    #[test]
    fn encoded_bodies_parse_back_to_equal_commands() {
        let body = vec![
            Command::new("move", vec![Arg::Number(3.0), Arg::Number(-4.5)]),
            Command::new(
                "repeat",
                vec![
                    Arg::Number(2.0),
                    Arg::Program(vec![
                        Command::new("f", vec![Arg::Number(0.25)]),
                        Command::new("r", vec![Arg::Number(-90.0)]),
                    ]),
                ],
            ),
            Command::new("inspect", vec![Arg::Text("sq".into())]),
        ];
        let mut macros = IndexMap::new();
        macros.insert("shape".to_string(), body.clone());
        let text = encode(&macros);
        match syntax::parse_line(text.trim_end(), "store").unwrap() {
            Some(crate::ast::Statement::Define { name, body: parsed }) => {
                assert_eq!(name, "shape");
                assert_eq!(parsed, body);
            }
            other => panic!("expected a definition, got {other:?}"),
        }
    }
}
