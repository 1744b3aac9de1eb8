//! File loaders and report writer.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::RockConfig;
use crate::error::{Error, Result};
use crate::profile::AttributeProfile;
use crate::report::{parameters_text, ClusterReport};

/// Read a delimited table: one record per line, tokens kept verbatim.
///
/// Empty lines are skipped.
pub fn read_matrix(path: &Path, delimiter: char) -> Result<Vec<Vec<String>>> {
    let ctx = || format!("reading matrix {}", path.display());
    let file = File::open(path).map_err(|e| Error::io(ctx(), e))?;

    let mut rows = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| Error::io(ctx(), e))?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }
        rows.push(line.split(delimiter).map(str::to_string).collect());
    }
    Ok(rows)
}

/// Read one label per line.
///
/// Empty lines are kept as empty labels, except at the end of the file.
pub fn read_labels(path: &Path) -> Result<Vec<String>> {
    let ctx = || format!("reading labels {}", path.display());
    let text = fs::read_to_string(path).map_err(|e| Error::io(ctx(), e))?;
    let mut labels: Vec<String> = text
        .lines()
        .map(|l| l.trim_end_matches('\r').to_string())
        .collect();
    while labels.last().is_some_and(String::is_empty) {
        labels.pop();
    }
    Ok(labels)
}

/// Load a profile with optional row and column label files.
pub fn load_profile(
    matrix: &Path,
    row_names: Option<&Path>,
    col_names: Option<&Path>,
    delimiter: char,
) -> Result<AttributeProfile> {
    let mut profile = AttributeProfile::new(read_matrix(matrix, delimiter)?)?;
    if let Some(path) = row_names {
        profile = profile.with_row_labels(read_labels(path)?)?;
    }
    if let Some(path) = col_names {
        profile = profile.with_col_labels(read_labels(path)?)?;
    }
    info!(
        records = profile.n_records(),
        attributes = profile.n_attributes(),
        "loaded profile"
    );
    Ok(profile)
}

/// Write `parameters_<name>.txt` and `final_output_<name>.txt` under
/// `<out_dir>/<name>/`, returning that directory.
///
/// The dataset directory must not exist yet.
pub fn write_report(out_dir: &Path, config: &RockConfig, report: &ClusterReport) -> Result<PathBuf> {
    let name = &config.data_name;
    let dir = out_dir.join(name);
    fs::create_dir(&dir).map_err(|e| Error::io(format!("creating {}", dir.display()), e))?;

    let params = dir.join(format!("parameters_{name}.txt"));
    fs::write(&params, parameters_text(config))
        .map_err(|e| Error::io(format!("writing {}", params.display()), e))?;

    let output = dir.join(format!("final_output_{name}.txt"));
    fs::write(&output, report.to_string())
        .map_err(|e| Error::io(format!("writing {}", output.display()), e))?;

    info!(dir = %dir.display(), clusters = report.clusters.len(), "wrote report");
    Ok(dir)
}
