//! Interactive home menu.
//!
//! A single "awaiting input" state with five transitions. Remove and query
//! are placeholders. Unrecognised input is reported and the menu is shown
//! again; only quit or end of input leaves the loop.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::Local;
use rand::RngCore;
use yansi::{Condition, Paint};

use crate::logging::SessionLog;
use crate::session::{Entry, SessionStore};

const RULE: &str = "#----------------------------------------------------------------------------#";
const TITLE: &str = "OSBA: Our [Simulated] Business Application";
const PAUSE: &str = "Press enter to return to the home menu ...";

/// A recognised menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddRecord,
    RemoveRecord,
    PrintRecords,
    QueryRecord,
    Quit,
}

impl MenuChoice {
    /// Parse user input. Surrounding whitespace is ignored.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AddRecord),
            "2" => Some(Self::RemoveRecord),
            "3" => Some(Self::PrintRecords),
            "4" => Some(Self::QueryRecord),
            "5" => Some(Self::Quit),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::AddRecord => "Add Record",
            Self::RemoveRecord => "Remove Record",
            Self::PrintRecords => "Print All Records",
            Self::QueryRecord => "Submit Query",
            Self::Quit => "Quit",
        }
    }

    const ALL: [Self; 5] = [
        Self::AddRecord,
        Self::RemoveRecord,
        Self::PrintRecords,
        Self::QueryRecord,
        Self::Quit,
    ];
}

/// What the loop does after handling one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Quit,
}

/// The menu loop, reading from `R` and writing to `W`.
pub struct Menu<'a, R, W, L: Write> {
    input: R,
    output: W,
    store: &'a SessionStore,
    log: &'a mut SessionLog<L>,
    rng: Box<dyn RngCore>,
    color: Condition,
}

impl<'a, R: BufRead, W: Write, L: Write> Menu<'a, R, W, L> {
    pub fn new(input: R, output: W, store: &'a SessionStore, log: &'a mut SessionLog<L>) -> Self {
        Self {
            input,
            output,
            store,
            log,
            rng: Box::new(rand::thread_rng()),
            color: Condition::TTY_AND_COLOR,
        }
    }

    /// Replace the random source used for generated records.
    #[must_use]
    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Replace the condition under which the header is styled.
    ///
    /// Defaults to [`Condition::TTY_AND_COLOR`], so piped output stays plain.
    #[must_use]
    pub fn with_color(mut self, color: Condition) -> Self {
        self.color = color;
        self
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        while self.step()? == Transition::Continue {}
        self.log.info("[Terminating application]");
        Ok(())
    }

    /// Show the menu, read one choice and handle it.
    pub fn step(&mut self) -> Result<Transition> {
        self.home()?;
        let Some(input) = self.read_line()? else {
            self.log.info("Input closed, exiting");
            return Ok(Transition::Quit);
        };

        let choice = input.trim();
        match MenuChoice::parse(choice) {
            Some(MenuChoice::Quit) => {
                self.log.info("User initiated program exit");
                Ok(Transition::Quit)
            }
            Some(selected) => {
                self.log
                    .info(&format!("Option selected by user: {choice}"));
                match selected {
                    MenuChoice::AddRecord => self.add_record()?,
                    MenuChoice::RemoveRecord => self.unsupported("Remove Record    ")?,
                    MenuChoice::PrintRecords => self.print_records()?,
                    MenuChoice::QueryRecord => self.unsupported("Submit Query     ")?,
                    MenuChoice::Quit => {}
                }
                self.pause()
            }
            None => {
                self.log
                    .info(&format!("Option selected by user: {choice}"));
                self.log.info(&format!("Unrecognised option: {choice}"));
                writeln!(self.output, "Unrecognised option: {choice}")?;
                writeln!(self.output)?;
                self.pause()
            }
        }
    }

    fn home(&mut self) -> Result<()> {
        let now = Local::now().format("%Y-%m-%d %H:%M");
        writeln!(self.output)?;
        writeln!(self.output, "{RULE}")?;
        writeln!(
            self.output,
            "                 {}",
            TITLE.bold().whenever(self.color)
        )?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "                            {now}")?;
        writeln!(self.output)?;
        writeln!(self.output, "     >>> HOME MENU")?;
        writeln!(self.output)?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.output, "         {}) {}", i + 1, choice.label())?;
        }
        writeln!(self.output)?;
        write!(self.output, "    Selection: ")?;
        self.output.flush()?;
        Ok(())
    }

    fn add_record(&mut self) -> Result<()> {
        let entry = Entry::random(&mut *self.rng);
        let message = format!("Adding new record    : {}", entry.identifier);
        self.store
            .add_entry(entry)
            .context("Failed to add record")?;

        writeln!(self.output, "{message}")?;
        writeln!(self.output)?;
        self.log.info(&message);
        Ok(())
    }

    fn print_records(&mut self) -> Result<()> {
        let json = self
            .store
            .to_pretty_json()
            .context("Failed to read records")?;
        writeln!(self.output)?;
        writeln!(self.output, "Printing all records:")?;
        writeln!(self.output)?;
        writeln!(self.output, "{json}")?;
        Ok(())
    }

    fn unsupported(&mut self, label: &str) -> Result<()> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{label}[Not currently supported at this time]"
        )?;
        writeln!(self.output)?;
        Ok(())
    }

    fn pause(&mut self) -> Result<Transition> {
        write!(self.output, "{PAUSE}")?;
        self.output.flush()?;
        Ok(match self.read_line()? {
            Some(_) => Transition::Continue,
            None => {
                self.log.info("Input closed, exiting");
                Transition::Quit
            }
        })
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        let read = self
            .input
            .read_line(&mut buf)
            .context("Failed to read menu input")?;
        Ok((read > 0).then_some(buf))
    }
}
