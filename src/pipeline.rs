//! Run orchestration: input, fetch, extract, save.
//!
//! Every collaborator is passed in, so a run can be driven entirely from
//! memory in tests.

use crate::extract::{self, ExtractError};
use crate::fetch::{DocumentProvider, FetchError};
use crate::sanitize::summary_filename;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const PROMPT: &str = "Enter the full Wikipedia URL or just the page title";

#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),
    #[error("no page title or URL given")]
    EmptyInput,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("could not find the page title")]
    MissingTitle,
    #[error("could not extract a summary from the page")]
    EmptySummary,
    #[error("error writing to file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<ExtractError> for RunError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::TitleNotFound => RunError::MissingTitle,
        }
    }
}

/// Source of the page title or URL to summarise
pub trait InputSource {
    fn read_target(&mut self) -> io::Result<String>;
}

/// Asks on the terminal, or reads one line when stdin is piped
pub struct Prompt;

impl InputSource for Prompt {
    fn read_target(&mut self) -> io::Result<String> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return read_line(&mut stdin.lock());
        }

        dialoguer::Input::<String>::new()
            .with_prompt(PROMPT)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

/// First line of `reader` without its line terminator. End of input gives "".
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// A target known up front (command line argument)
pub struct FixedInput(pub String);

impl InputSource for FixedInput {
    fn read_target(&mut self) -> io::Result<String> {
        Ok(self.0.clone())
    }
}

/// Destination for the finished summary file
pub trait SummarySink {
    /// Write `contents` under `filename`, returning the full path
    fn write(&self, filename: &str, contents: &str) -> Result<PathBuf, RunError>;
}

/// Writes summary files into a directory
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl SummarySink for DirectorySink {
    fn write(&self, filename: &str, contents: &str) -> Result<PathBuf, RunError> {
        let path = self.dir.join(filename);
        std::fs::write(&path, contents).map_err(|source| RunError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub url: String,
    pub title: String,
    pub summary: String,
    pub path: PathBuf,
}

/// Turn user input into an article URL.
///
/// Anything starting with `http` is used as-is; otherwise the input is a page
/// title whose spaces become underscores, appended to `base_url`.
pub fn resolve_url(input: &str, base_url: &str) -> String {
    let input = input.trim();
    if input.starts_with("http") {
        input.to_string()
    } else {
        format!("{}{}", base_url, input.replace(' ', "_"))
    }
}

/// Body of the saved summary file
pub fn render_file(title: &str, summary: &str) -> String {
    format!("Title: {title}\n\n{summary}")
}

/// One fetch-extract-save run
pub struct Pipeline<P, S> {
    provider: P,
    sink: S,
    base_url: String,
    max_words: usize,
}

impl<P: DocumentProvider, S: SummarySink> Pipeline<P, S> {
    pub fn new(provider: P, sink: S, base_url: impl Into<String>, max_words: usize) -> Self {
        Self {
            provider,
            sink,
            base_url: base_url.into(),
            max_words,
        }
    }

    /// Read a target from `input`, summarise it and save the result.
    /// Progress lines go to `out`.
    pub async fn run<I, W>(&self, input: &mut I, out: &mut W) -> Result<RunReport, RunError>
    where
        I: InputSource + ?Sized,
        W: Write,
    {
        let target = input.read_target().map_err(RunError::Input)?;
        if target.trim().is_empty() {
            return Err(RunError::EmptyInput);
        }

        let url = resolve_url(&target, &self.base_url);
        progress(out, format_args!("Fetching data from: {url}"));
        let document = self.provider.fetch(&url).await?;

        let title = extract::extract_title(&document)?;
        progress(out, format_args!("\nTitle: {title}\n"));

        let summary = extract::extract_summary(&document, self.max_words);
        if summary.is_empty() {
            return Err(RunError::EmptySummary);
        }
        info!(
            paragraphs = summary.paragraphs.len(),
            words = summary.word_count,
            "summary extracted"
        );
        let summary = summary.text();
        progress(out, format_args!("Summary:\n{summary}"));

        let filename = summary_filename(&title);
        let path = self.sink.write(&filename, &render_file(&title, &summary))?;
        info!(path = %path.display(), "summary written");
        progress(out, format_args!("\nSummary saved to {}", path.display()));

        Ok(RunReport {
            url,
            title,
            summary,
            path,
        })
    }
}

/// Progress output is best effort; a closed stdout must not fail the run
fn progress<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) {
    let _ = writeln!(out, "{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use std::cell::RefCell;
    use std::collections::HashMap;

    const PARIS: &str = r#"<html><body>
        <h1 id="firstHeading">Paris</h1>
        <div class="mw-parser-output">
            <p><span id="coordinates">48°51′N 2°21′E</span></p>
            <p>Paris is the capital of France.</p>
            <p>It has 2M residents.</p>
        </div>
    </body></html>"#;

    /// Serves canned pages keyed by URL
    struct StaticProvider {
        pages: HashMap<String, String>,
        requested: RefCell<Vec<String>>,
    }

    impl StaticProvider {
        fn new(url: &str, html: &str) -> Self {
            Self {
                pages: HashMap::from([(url.to_string(), html.to_string())]),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl DocumentProvider for StaticProvider {
        async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            let html = self.pages.get(url).map(String::as_str).unwrap_or("<html></html>");
            Ok(Document::parse(html))
        }
    }

    #[derive(Default)]
    struct MemorySink {
        files: RefCell<Vec<(String, String)>>,
    }

    impl SummarySink for &MemorySink {
        fn write(&self, filename: &str, contents: &str) -> Result<PathBuf, RunError> {
            self.files
                .borrow_mut()
                .push((filename.to_string(), contents.to_string()));
            Ok(PathBuf::from(filename))
        }
    }

    const BASE: &str = "https://en.wikipedia.org/wiki/";

    #[test]
    fn resolve_url_passes_urls_through() {
        assert_eq!(
            resolve_url("  https://fr.wikipedia.org/wiki/Paris ", BASE),
            "https://fr.wikipedia.org/wiki/Paris"
        );
        assert_eq!(resolve_url("http://example.org/x y", BASE), "http://example.org/x y");
    }

    #[test]
    fn resolve_url_builds_from_title() {
        assert_eq!(
            resolve_url("New York City", BASE),
            "https://en.wikipedia.org/wiki/New_York_City"
        );
        assert_eq!(resolve_url(" Tokyo\n", BASE), "https://en.wikipedia.org/wiki/Tokyo");
    }

    #[test]
    fn read_line_takes_first_line_only() {
        let mut piped = io::Cursor::new("New York City\r\nignored\n");
        assert_eq!(read_line(&mut piped).unwrap(), "New York City");
    }

    #[test]
    fn read_line_at_end_of_input_is_empty() {
        let mut piped = io::Cursor::new("");
        assert_eq!(read_line(&mut piped).unwrap(), "");
    }

    #[test]
    fn render_file_layout() {
        assert_eq!(render_file("Paris", "a\n\nb"), "Title: Paris\n\na\n\nb");
    }

    #[tokio::test]
    async fn run_writes_title_and_summary() {
        let provider = StaticProvider::new("https://en.wikipedia.org/wiki/Paris", PARIS);
        let sink = MemorySink::default();
        let pipeline = Pipeline::new(provider, &sink, BASE, 5);
        let mut out = Vec::new();

        let report = pipeline
            .run(&mut FixedInput("Paris".into()), &mut out)
            .await
            .unwrap();

        assert_eq!(report.title, "Paris");
        assert_eq!(report.summary, "Paris is the capital of France.");
        let files = sink.files.borrow();
        assert_eq!(
            files.as_slice(),
            &[(
                "Paris_summary.txt".to_string(),
                "Title: Paris\n\nParis is the capital of France.".to_string()
            )]
        );

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Fetching data from: https://en.wikipedia.org/wiki/Paris\n"));
        assert!(out.contains("Summary saved to Paris_summary.txt"));
    }

    #[tokio::test]
    async fn missing_title_writes_nothing() {
        let provider = StaticProvider::new(
            "https://en.wikipedia.org/wiki/X",
            r#"<div class="mw-parser-output"><p>Text.</p></div>"#,
        );
        let sink = MemorySink::default();
        let pipeline = Pipeline::new(provider, &sink, BASE, 100);

        let err = pipeline
            .run(&mut FixedInput("X".into()), &mut io::sink())
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::MissingTitle));
        assert!(sink.files.borrow().is_empty());
    }

    #[tokio::test]
    async fn coordinate_only_page_is_empty_summary() {
        let provider = StaticProvider::new(
            "https://en.wikipedia.org/wiki/Somewhere",
            r#"<h1 id="firstHeading">Somewhere</h1>
               <div class="mw-parser-output"><p><span id="coordinates">1°N 2°E</span></p></div>"#,
        );
        let sink = MemorySink::default();
        let pipeline = Pipeline::new(provider, &sink, BASE, 100);

        let err = pipeline
            .run(&mut FixedInput("Somewhere".into()), &mut io::sink())
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::EmptySummary));
        assert!(sink.files.borrow().is_empty());
    }

    #[tokio::test]
    async fn blank_input_never_fetches() {
        let provider = StaticProvider::new("unused", PARIS);
        let sink = MemorySink::default();
        let pipeline = Pipeline::new(provider, &sink, BASE, 100);

        let err = pipeline
            .run(&mut FixedInput("   ".into()), &mut io::sink())
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::EmptyInput));
        assert!(pipeline.provider.requested.borrow().is_empty());
    }

    #[tokio::test]
    async fn title_is_sanitized_for_filename() {
        let provider = StaticProvider::new(
            "https://en.wikipedia.org/wiki/AC/DC",
            r#"<h1 id="firstHeading">AC/DC</h1><div class="mw-parser-output"><p>Rock band.</p></div>"#,
        );
        let sink = MemorySink::default();
        let pipeline = Pipeline::new(provider, &sink, BASE, 100);

        pipeline
            .run(&mut FixedInput("AC/DC".into()), &mut io::sink())
            .await
            .unwrap();

        let files = sink.files.borrow();
        assert_eq!(files[0].0, "AC_DC_summary.txt");
        assert!(files[0].1.starts_with("Title: AC/DC\n\n"));
    }

    #[test]
    fn directory_sink_reports_write_errors() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("missing"));

        let err = sink.write("a_summary.txt", "x").unwrap_err();
        match err {
            RunError::Write { path, .. } => {
                assert_eq!(path, dir.path().join("missing").join("a_summary.txt"))
            }
            other => panic!("expected write error, got {other:?}"),
        }
    }
}
