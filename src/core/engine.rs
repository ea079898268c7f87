use crate::domain::model::TransformResult;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct ConversionEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ConversionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract and transform only; nothing is written.
    pub fn dry_run(&self) -> Result<TransformResult> {
        let lines = self.pipeline.extract()?;
        tracing::info!("Read {} lines", lines.len());
        self.transform(lines)
    }

    /// Runs the full conversion and returns the path written.
    pub fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting conversion");

        let lines = self.pipeline.extract()?;
        tracing::info!("Read {} lines", lines.len());

        let result = self.transform(lines)?;

        let output_path = self.pipeline.load(result)?;
        tracing::info!(
            "Wrote {} in {:?}",
            output_path,
            started.elapsed()
        );

        Ok(output_path)
    }

    fn transform(&self, lines: Vec<String>) -> Result<TransformResult> {
        let result = self.pipeline.transform(lines)?;
        tracing::info!(
            "Parsed {} sections, {} properties, {} groups",
            result.section_count,
            result.property_count,
            result.group_count
        );
        Ok(result)
    }
}
