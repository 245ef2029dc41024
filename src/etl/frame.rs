use crate::error::VitiError;
use crate::etl::text::{clean_cell, clean_header};
use csv::{ReaderBuilder, Trim};

/// How the column names of a source file are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLayout {
    /// The first line names the columns.
    Present,
    /// The file starts with data; columns are `leading` followed by one
    /// column per year from `first_year`.
    Synthesized {
        leading: &'static [&'static str],
        first_year: u16,
    },
}

/// A rectangular, fully cleaned CSV table.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Frame {
    pub fn parse(text: &str, separator: u8, layout: HeaderLayout) -> Result<Self, VitiError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(separator)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            // blank lines and separator-only lines
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            records.push(record);
        }

        let mut records = records.into_iter();
        let headers: Vec<String> = match layout {
            HeaderLayout::Present => match records.next() {
                Some(first) => first.iter().map(clean_header).collect(),
                None => Vec::new(),
            },
            HeaderLayout::Synthesized { leading, first_year } => {
                let width = records.as_slice().first().map_or(0, |r| r.len());
                let years = width.saturating_sub(leading.len());
                leading
                    .iter()
                    .map(|name| name.to_string())
                    .chain((0..years).map(|offset| (usize::from(first_year) + offset).to_string()))
                    .collect()
            }
        };

        let rows = records
            .map(|record| {
                let mut row: Vec<String> = record.iter().map(clean_cell).collect();
                row.resize(headers.len(), String::new());
                row
            })
            .collect();

        Ok(Self { headers, rows })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn drop_column(&mut self, name: &str) {
        let Some(idx) = self.column_index(name) else {
            return;
        };
        self.headers.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
    }

    /// Columns whose header is a four digit year, in file order.
    pub fn year_columns(&self) -> Vec<(usize, &str)> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.len() == 4 && h.bytes().all(|b| b.is_ascii_digit()))
            .map(|(idx, h)| (idx, h.as_str()))
            .collect()
    }
}
