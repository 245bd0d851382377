use eyre::Result;

use crate::error::PsiError;

/// Per-event metadata stored as string columns of equal length.
/// Row `i` of every column describes the event in row `i` of the matching PSI table.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct EventTable {
    nrows: usize,
    columns: Vec<Vec<String>>,
}

impl EventTable {
    pub fn new(columns: Vec<Vec<String>>) -> Result<Self> {
        let nrows = columns.first().map(Vec::len).unwrap_or(0);
        for column in &columns {
            PsiError::shape("event table column length", nrows, column.len())?;
        }
        Ok(Self { nrows, columns })
    }

    pub fn from_columns(
        columns: impl IntoIterator<Item = impl IntoIterator<Item = impl Into<String>>>,
    ) -> Result<Self> {
        Self::new(
            columns
                .into_iter()
                .map(|column| column.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, ind: usize) -> Result<&[String]> {
        PsiError::index("event table column", ind, self.columns.len())?;
        Ok(&self.columns[ind])
    }
}
