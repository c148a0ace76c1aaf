use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ExpandEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExpandEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs the pipeline end to end and returns the output path. Nothing is
    /// written until every record has an expansion result, so a failed run
    /// leaves no partial output behind.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting expand run...");

        tracing::info!("Reading and parsing input...");
        let records = self.pipeline.extract().await?;
        tracing::info!("Parsed {} short-link records", records.len());

        tracing::info!("Expanding identifiers...");
        let report = self.pipeline.transform(records).await?;
        tracing::info!("Expanded {} records", report.rows.len());

        tracing::info!("Writing output...");
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
