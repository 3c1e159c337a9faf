//! In-memory output bundles.
//!
//! Every artifact of a run is serialized before anything touches the output
//! directory. A bundle maps paths relative to the run's output root to file
//! contents.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use acadmod_core::{SemesterOutput, YearOutput};
use acadmod_model::SemesterModule;
use acadmod_transform::CategoryRecords;

use crate::error::{OutputError, Result};
use crate::projection::{
    module_information, module_list, module_timetables, semester_module_codes, year_module_codes,
};
use crate::venue_info::venue_information;

pub const REPORT_FILE: &str = "report.json";

/// `consolidated.json` entry: the merged module plus its per-category records.
#[derive(Serialize)]
struct ConsolidatedEntry<'a> {
    #[serde(flatten)]
    module: &'a SemesterModule,
    sources: &'a CategoryRecords,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBundle {
    files: BTreeMap<PathBuf, Vec<u8>>,
    indent: usize,
}

impl OutputBundle {
    /// `indent` of zero writes compact JSON.
    pub fn new(indent: usize) -> Self {
        Self {
            files: BTreeMap::new(),
            indent,
        }
    }

    pub fn add_json<T: Serialize + ?Sized>(
        &mut self,
        path: impl Into<PathBuf>,
        value: &T,
    ) -> Result<()> {
        let path = path.into();
        let mut bytes = Vec::new();
        let result = if self.indent == 0 {
            serde_json::to_writer(&mut bytes, value)
        } else {
            let indent = " ".repeat(self.indent);
            let formatter = PrettyFormatter::with_indent(indent.as_bytes());
            let mut serializer = Serializer::with_formatter(&mut bytes, formatter);
            value.serialize(&mut serializer)
        };
        result.map_err(|source| OutputError::Serialize {
            path: path.clone(),
            source,
        })?;
        bytes.push(b'\n');
        self.files.insert(path, bytes);
        Ok(())
    }

    /// Nests another bundle under `prefix`.
    pub fn merge_under(&mut self, prefix: &Path, other: OutputBundle) {
        for (path, bytes) in other.files {
            self.files.insert(prefix.join(path), bytes);
        }
    }

    pub fn files(&self) -> impl Iterator<Item = (&Path, &[u8])> {
        self.files
            .iter()
            .map(|(path, bytes)| (path.as_path(), bytes.as_slice()))
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        self.files.get(path.as_ref()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }
}

/// Artifacts of one semester, relative to `<acadYear>/<semester>/`.
pub fn semester_bundle(output: &SemesterOutput, indent: usize) -> Result<OutputBundle> {
    let mut bundle = OutputBundle::new(indent);

    let consolidated: BTreeMap<&str, ConsolidatedEntry<'_>> = output
        .modules
        .iter()
        .filter_map(|module| {
            let sources = output.records.get(&module.module_code)?;
            Some((module.module_code.as_str(), ConsolidatedEntry { module, sources }))
        })
        .collect();
    bundle.add_json("consolidated.json", &consolidated)?;
    bundle.add_json("modules.json", &output.modules)?;
    bundle.add_json("moduleCodes.json", &semester_module_codes(&output.modules))?;
    bundle.add_json("venues.json", &output.venues)?;
    bundle.add_json("venueInformation.json", &venue_information(&output.modules))?;
    bundle.add_json(REPORT_FILE, &output.report)?;
    Ok(bundle)
}

/// Artifacts of a year, relative to `<acadYear>/`, including every semester.
pub fn year_bundle(output: &YearOutput, indent: usize) -> Result<OutputBundle> {
    let mut bundle = OutputBundle::new(indent);

    bundle.add_json("modules.json", &output.modules)?;
    bundle.add_json("moduleList.json", &module_list(&output.modules))?;
    bundle.add_json("moduleInformation.json", &module_information(&output.modules))?;
    bundle.add_json("moduleCodes.json", &year_module_codes(&output.modules))?;
    for module in &output.modules {
        let dir = Path::new("modules").join(&module.module_code);
        bundle.add_json(
            Path::new("modules").join(format!("{}.json", module.module_code)),
            module,
        )?;
        bundle.add_json(dir.join("index.json"), module)?;
        bundle.add_json(dir.join("timetable.json"), &module_timetables(module))?;
    }
    bundle.add_json(REPORT_FILE, &output.report)?;

    for semester in &output.semesters {
        let nested = semester_bundle(semester, indent)?;
        bundle.merge_under(Path::new(&semester.semester.to_string()), nested);
    }
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation_is_configurable() {
        let mut bundle = OutputBundle::new(4);
        bundle.add_json("a.json", &vec![1, 2]).unwrap();
        assert_eq!(bundle.get("a.json"), Some(&b"[\n    1,\n    2\n]\n"[..]));

        let mut compact = OutputBundle::new(0);
        compact.add_json("a.json", &vec![1, 2]).unwrap();
        assert_eq!(compact.get("a.json"), Some(&b"[1,2]\n"[..]));
    }

    #[test]
    fn nested_bundles_are_prefixed() {
        let mut semester = OutputBundle::new(2);
        semester.add_json("venues.json", &["LT19"]).unwrap();
        let mut year = OutputBundle::new(2);
        year.merge_under(Path::new("1"), semester);
        assert!(year.get(Path::new("1").join("venues.json")).is_some());
        assert_eq!(year.len(), 1);
    }
}
