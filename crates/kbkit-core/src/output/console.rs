//! Console output facade
//!
//! [`ConsoleOutput`] maps semantic output calls onto severities of an
//! injected [`Logger`]:
//!
//! | call | severity |
//! |---|---|
//! | `print` | INFO |
//! | `critical_print` | CRITICAL |
//! | `verbose_print` | DEBUG, verbose mode only |
//! | `status` / `try_status` | INFO `[START]`/`[END]` brackets |
//! | `verbose_status` / `try_verbose_status` | DEBUG brackets, verbose mode only |
//! | `print_table` / `verbose_print_table` | rendered by the configured [`TableRenderer`] |
//!
//! Constructing a facade never touches global logging state; see
//! [`crate::logging_facility::init`].

use super::{Logger, RendererKind, Severity, SilentRenderer, TableOptions, TableRenderer};
use crate::config::OutputConfig;
use kbkit_core_types::schema::{STATUS_END, STATUS_START};
use std::convert::Infallible;
use std::fmt;

/// Verbosity-aware console output facade
#[derive(Debug)]
pub struct ConsoleOutput {
    logger: Logger,
    verbose: bool,
    renderer: Box<dyn TableRenderer>,
}

impl ConsoleOutput {
    /// Non-verbose facade with a silent table renderer
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            verbose: false,
            renderer: Box::new(SilentRenderer),
        }
    }

    pub fn from_config(logger: Logger, config: &OutputConfig) -> Self {
        Self::new(logger)
            .with_verbose(config.verbose)
            .with_renderer(config.renderer.build())
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn TableRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_renderer_kind(self, kind: RendererKind) -> Self {
        self.with_renderer(kind.build())
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Emit `message` at INFO
    pub fn print(&self, message: impl fmt::Display) {
        self.logger.emit(Severity::Info, &message);
    }

    /// Emit `message` at CRITICAL
    pub fn critical_print(&self, message: impl fmt::Display) {
        self.logger.emit(Severity::Critical, &message);
    }

    /// Emit `message` at DEBUG when verbose mode is on
    pub fn verbose_print(&self, message: impl fmt::Display) {
        if self.verbose {
            self.logger.emit(Severity::Debug, &message);
        }
    }

    /// Run `handler` between `[START]` and `[END]` INFO records
    ///
    /// Returns the handler's value unchanged. A panic in `handler` unwinds
    /// through this call and the `[END]` record is never emitted.
    pub fn status<T>(&self, message: impl fmt::Display, handler: impl FnOnce() -> T) -> T {
        into_ok(self.bracketed(Severity::Info, &message, || Ok(handler())))
    }

    /// [`ConsoleOutput::status`] for a fallible handler
    ///
    /// An `Err` is returned untouched and suppresses the `[END]` record.
    pub fn try_status<T, E>(
        &self,
        message: impl fmt::Display,
        handler: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        self.bracketed(Severity::Info, &message, handler)
    }

    /// [`ConsoleOutput::status`] with DEBUG brackets, emitted only in verbose mode
    ///
    /// The handler runs either way.
    pub fn verbose_status<T>(&self, message: impl fmt::Display, handler: impl FnOnce() -> T) -> T {
        if !self.verbose {
            return handler();
        }
        into_ok(self.bracketed(Severity::Debug, &message, || Ok(handler())))
    }

    pub fn try_verbose_status<T, E>(
        &self,
        message: impl fmt::Display,
        handler: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        if !self.verbose {
            return handler();
        }
        self.bracketed(Severity::Debug, &message, handler)
    }

    /// Render a table of `items` at INFO
    ///
    /// `row_extractor(index, item)` yields the cell values of one row. With a
    /// silent renderer the items are never iterated.
    pub fn print_table<I, F>(
        &self,
        items: I,
        columns: &[&str],
        row_extractor: F,
        options: &TableOptions,
    ) where
        I: IntoIterator,
        F: FnMut(usize, &I::Item) -> Vec<String>,
    {
        self.emit_table(Severity::Info, items, columns, row_extractor, options);
    }

    /// [`ConsoleOutput::print_table`] at DEBUG, verbose mode only
    pub fn verbose_print_table<I, F>(
        &self,
        items: I,
        columns: &[&str],
        row_extractor: F,
        options: &TableOptions,
    ) where
        I: IntoIterator,
        F: FnMut(usize, &I::Item) -> Vec<String>,
    {
        if self.verbose {
            self.emit_table(Severity::Debug, items, columns, row_extractor, options);
        }
    }

    fn bracketed<T, E>(
        &self,
        severity: Severity,
        message: &dyn fmt::Display,
        handler: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        self.logger
            .emit(severity, &format_args!("{} {}", STATUS_START, message));
        let value = handler()?;
        self.logger
            .emit(severity, &format_args!("{} {}", STATUS_END, message));
        Ok(value)
    }

    fn emit_table<I, F>(
        &self,
        severity: Severity,
        items: I,
        columns: &[&str],
        mut row_extractor: F,
        options: &TableOptions,
    ) where
        I: IntoIterator,
        F: FnMut(usize, &I::Item) -> Vec<String>,
    {
        if self.renderer.is_silent() || !self.logger.enabled(severity) {
            return;
        }

        let rows: Vec<Vec<String>> = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| row_extractor(index, &item))
            .collect();

        if let Some(table) = self.renderer.render(columns, &rows, options) {
            // One record per line keeps columns aligned under the line prefix
            for line in table.lines() {
                self.logger.emit(severity, &line);
            }
        }
    }
}

fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
