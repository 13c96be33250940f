//! Interactive collaborator: asks questions on a writer and reads answers from a reader.

use std::io::{self, BufRead, Write};

use crate::error::{AnalysisError, AnalysisResult, Stage};
use crate::pipeline::{ParameterSource, ReportSink, StatisticsDisplay};
use crate::report::{format_average, write_report};
use crate::types::{FilterCriteria, Statistics};

/// Line-based question/answer session.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// A prompter on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and return the trimmed answer.
    ///
    /// End of input before an answer is an error attributed to [`Stage::Parameters`].
    pub fn ask(&mut self, question: &str) -> AnalysisResult<String> {
        self.ask_during(Stage::Parameters, question)
    }

    /// Like [`Self::ask`], attributing a read failure to `stage`.
    pub fn ask_during(&mut self, stage: Stage, question: &str) -> AnalysisResult<String> {
        let prompt_err = |source: io::Error| AnalysisError::Prompt {
            stage,
            question: question.to_owned(),
            source,
        };

        write!(self.output, "{question}: ").map_err(prompt_err)?;
        self.output.flush().map_err(prompt_err)?;

        let mut answer = String::new();
        let n = self.input.read_line(&mut answer).map_err(prompt_err)?;
        if n == 0 {
            return Err(prompt_err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            )));
        }
        Ok(answer.trim().to_owned())
    }

    /// Give back the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn write_statistics(&mut self, stats: &Statistics) -> io::Result<()> {
        writeln!(self.output, "Total Listings: {}", stats.total_listings)?;
        writeln!(self.output, "Average Price: {}", format_average(stats.average_price))?;
        writeln!(self.output, "Ranked Hosts:")?;
        for host in &stats.ranked_hosts {
            writeln!(self.output, "  {} ({} listings)", host.host_id, host.count)?;
        }
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> ParameterSource for Prompter<R, W> {
    fn filter_criteria(&mut self) -> AnalysisResult<FilterCriteria> {
        let min_price = self.ask("Enter minimum price")?;
        let max_price = self.ask("Enter maximum price")?;
        let min_rooms = self.ask("Enter minimum rooms")?;
        let max_rooms = self.ask("Enter maximum rooms")?;
        let min_rating = self.ask("Enter minimum rating")?;
        FilterCriteria::from_inputs([&min_price, &max_price, &min_rooms, &max_rooms, &min_rating])
    }
}

impl<R: BufRead, W: Write> StatisticsDisplay for Prompter<R, W> {
    fn show(&mut self, stats: &Statistics) -> AnalysisResult<()> {
        self.write_statistics(stats).map_err(AnalysisError::DisplayOutput)
    }
}

/// Asks for the export path, then writes the report there.
impl<R: BufRead, W: Write> ReportSink for Prompter<R, W> {
    fn persist(&mut self, report: &str) -> AnalysisResult<()> {
        let path = self.ask_during(Stage::Report, "Enter the export file path")?;
        write_report(&path, report)?;
        // Confirmation only; the report is already on disk.
        let _ = writeln!(self.output, "Data exported successfully to {path}");
        Ok(())
    }
}
