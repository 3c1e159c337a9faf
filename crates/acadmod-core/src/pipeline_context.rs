//! Inputs shared by every semester run of a pipeline invocation.

use std::path::{Path, PathBuf};

use acadmod_ingest::{LessonTypeTable, SourceLayout, load_lesson_types};

use crate::error::{PipelineError, Result};

#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Root holding `<YYYY-YYYY>/<semester>/<category>.json`.
    pub input_dir: PathBuf,
    pub layout: SourceLayout,
    pub lesson_types: LessonTypeTable,
}

impl PipelineContext {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            layout: SourceLayout::default(),
            lesson_types: LessonTypeTable::default(),
        }
    }

    pub fn with_layout(mut self, layout: SourceLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_lesson_types(mut self, lesson_types: LessonTypeTable) -> Self {
        self.lesson_types = lesson_types;
        self
    }

    /// Loads the lesson type table named by the layout.
    ///
    /// # Errors
    ///
    /// Any defect in the table is fatal, see [`load_lesson_types`].
    pub fn load_lesson_types(self) -> Result<Self> {
        let path = self.lesson_types_path();
        let table = load_lesson_types(&path).map_err(PipelineError::LessonTypes)?;
        Ok(self.with_lesson_types(table))
    }

    pub fn lesson_types_path(&self) -> PathBuf {
        self.layout.lesson_types_path(&self.input_dir)
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }
}
