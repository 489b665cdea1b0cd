use std::fmt;
use std::sync::Arc;
use tracing::instrument;

use super::{AppendValuesResponse, SheetSchema, SheetWriter, SheetsError};

/// Header initialization and row appends for one sheet tab.
///
/// Without a writer (no usable credential) every operation fails with
/// `SheetsError::NotConfigured` before any network call.
#[derive(Clone)]
pub struct SpreadsheetService {
    writer: Option<Arc<dyn SheetWriter>>,
    schema: SheetSchema,
    sheet_name: String,
}

impl fmt::Debug for SpreadsheetService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpreadsheetService")
            .field("configured", &self.is_configured())
            .field("schema", &self.schema)
            .field("sheet_name", &self.sheet_name)
            .finish()
    }
}

impl SpreadsheetService {
    pub fn new(
        writer: Option<Arc<dyn SheetWriter>>,
        schema: SheetSchema,
        sheet_name: impl Into<String>,
    ) -> Self {
        SpreadsheetService {
            writer,
            schema,
            sheet_name: sheet_name.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.writer.is_some()
    }

    pub fn schema(&self) -> &SheetSchema {
        &self.schema
    }

    fn writer(&self) -> Result<&Arc<dyn SheetWriter>, SheetsError> {
        self.writer.as_ref().ok_or(SheetsError::NotConfigured)
    }

    /// Write the schema's header row over the first row of the tab.
    #[instrument(skip(self))]
    pub async fn init_headers(&self, spreadsheet_id: &str) -> Result<(), SheetsError> {
        let writer = self.writer()?;
        let range = self.schema.header_range(&self.sheet_name);

        let response = writer
            .update_values(spreadsheet_id, &range, vec![self.schema.header_row()])
            .await?;

        tracing::info!(
            updated_range = ?response.updated_range,
            "Headers created"
        );
        Ok(())
    }

    /// Append one row below the existing data.
    #[instrument(skip(self, row))]
    pub async fn append_row(
        &self,
        spreadsheet_id: &str,
        row: Vec<String>,
    ) -> Result<AppendValuesResponse, SheetsError> {
        let writer = self.writer()?;
        if row.len() != self.schema.width() {
            return Err(SheetsError::RowWidth {
                expected: self.schema.width(),
                actual: row.len(),
            });
        }

        let range = self.schema.append_range(&self.sheet_name);
        let response = writer.append_values(spreadsheet_id, &range, vec![row]).await?;

        tracing::info!(
            updated_range = ?response.updated_range(),
            "Data written"
        );
        Ok(response)
    }
}
