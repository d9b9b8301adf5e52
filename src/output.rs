use std::io::{self, Write};

use serde::Serialize;

use crate::pipeline::IngestSummary;

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Text,
    Json,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_summary(summary: &IngestSummary) -> io::Result<()> {
        Self::print_json(summary)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

pub struct TextOutput;

impl TextOutput {
    pub fn print_summary(summary: &IngestSummary, output: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        Self::write_summary(&mut stdout, summary, output)
    }

    pub fn write_summary<W: Write>(
        out: &mut W,
        summary: &IngestSummary,
        output: &str,
    ) -> io::Result<()> {
        writeln!(out, "RNAi screen ingestion summary")?;
        writeln!(out, "  output: {output}")?;
        writeln!(out, "  finished: {}", summary.finished_at)?;
        for (class, count) in &summary.items {
            writeln!(out, "  {class}: {count}")?;
        }
        writeln!(out, "  active screens: {}", summary.active_screens.join(", "))?;
        if !summary.screens_without_hits.is_empty() {
            writeln!(
                out,
                "  screens without hits: {}",
                summary.screens_without_hits.join(", ")
            )?;
        }
        if !summary.unresolved_genes.is_empty() {
            writeln!(
                out,
                "  unresolved gene symbols: {}",
                summary.unresolved_genes.len()
            )?;
            for (symbol, candidates) in &summary.unresolved_genes {
                writeln!(out, "    {symbol} ({candidates} candidates)")?;
            }
        }
        Ok(())
    }
}
