//! JSON network description.
//!
//! Mirrors the line and section records kept by the line-management store:
//! each line lists its own stations and sections. Stations shared between
//! lines appear in every line that serves them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Line, NetworkGraph};
use crate::domain::{EngineError, Segment, Station};
use crate::stations::StationSet;

/// Errors that can occur when loading a network file.
#[derive(Debug, thiserror::Error)]
pub enum NetworkFileError {
    /// Reading the file failed
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not valid network JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but describes an inconsistent network
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// One line as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    pub name: String,
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub sections: Vec<Segment>,
}

/// The on-disk document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkFile {
    pub lines: Vec<LineRecord>,
}

impl NetworkFile {
    /// Read and parse a network file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NetworkFileError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| NetworkFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, NetworkFileError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Write the document as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), NetworkFileError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| NetworkFileError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Stations and lines ready for graph building.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub stations: StationSet,
    pub lines: Vec<Line>,
}

impl Network {
    /// Convert a parsed document.
    ///
    /// Each line's station list must be free of repeated ids; across lines
    /// repeats are the same station and are merged.
    pub fn from_file(file: NetworkFile) -> Result<Self, EngineError> {
        let mut stations = StationSet::new();
        let mut lines = Vec::with_capacity(file.lines.len());

        for record in file.lines {
            let line_stations = StationSet::from_stations(record.stations)?;
            stations.merge(&line_stations);
            lines.push(Line::new(record.name, record.sections));
        }

        debug!(
            stations = stations.len(),
            lines = lines.len(),
            "network loaded"
        );

        Ok(Self { stations, lines })
    }

    /// Load and convert a network file in one step.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NetworkFileError> {
        let file = NetworkFile::load(path)?;
        Ok(Self::from_file(file)?)
    }

    /// Every segment of every line, in line order.
    pub fn segments(&self) -> Vec<Segment> {
        self.lines
            .iter()
            .flat_map(|line| line.segments().iter().copied())
            .collect()
    }

    pub fn build_graph(&self) -> Result<NetworkGraph, EngineError> {
        NetworkGraph::from_lines(&self.stations, &self.lines)
    }
}
