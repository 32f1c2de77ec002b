//! Turns a coordinator [`Snapshot`] into display text.

use crate::coordinator::Snapshot;
use crate::task::{ClassificationTask, FailureReason, Label, TaskStatus};
use crate::FileMeta;
use std::fmt::{self, Write};

pub const LOADING: &str = "Loading...";
pub const INVALID_INPUT_MESSAGE: &str = "Please select a valid .wav file";

/// What one endpoint's column shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Idle,
    Loading,
    Label(Label),
    Failed(FailureReason),
}

impl Cell {
    fn of(task: Option<&ClassificationTask>) -> Self {
        match task.map(ClassificationTask::status) {
            None | Some(TaskStatus::Idle) => Cell::Idle,
            Some(TaskStatus::Pending) => Cell::Loading,
            Some(TaskStatus::Succeeded(label)) => Cell::Label(label.clone()),
            Some(TaskStatus::Failed(reason)) => Cell::Failed(*reason),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Idle => f.write_str("-"),
            Cell::Loading => f.write_str(LOADING),
            Cell::Label(label) => write!(f, "{}", label),
            Cell::Failed(reason) => write!(f, "error ({})", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// Nothing submitted yet
    Empty,
    /// At least one service rejected the file
    InvalidInput,
    Results { closed: Cell, open: Cell },
}

pub fn summarize(snapshot: &Snapshot) -> Summary {
    let closed = Cell::of(snapshot.closed.as_ref());
    let open = Cell::of(snapshot.open.as_ref());

    let rejected = |cell: &Cell| *cell == Cell::Failed(FailureReason::InvalidInput);
    if rejected(&closed) || rejected(&open) {
        Summary::InvalidInput
    } else if closed == Cell::Idle && open == Cell::Idle {
        Summary::Empty
    } else {
        Summary::Results { closed, open }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Empty => Ok(()),
            Summary::InvalidInput => writeln!(f, "{}", INVALID_INPUT_MESSAGE),
            Summary::Results { closed, open } => {
                writeln!(f, "Closed Classifier Class: {}", closed)?;
                writeln!(f, "Open Classifier Class: {}", open)
            }
        }
    }
}

pub fn render_file_details(meta: &FileMeta) -> String {
    format!(
        "File Details:\nFile Name: {}\nFile Type: {}\nLast Modified: {}\n",
        meta.name,
        meta.mime_type,
        meta.last_modified.format("%a %b %d %Y")
    )
}

/// File details (when a file is held) followed by the results summary.
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    if let Some(meta) = &snapshot.file_meta {
        out.push_str(&render_file_details(meta));
    }
    let summary = summarize(snapshot);
    if summary != Summary::Empty {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = write!(out, "{}", summary);
    }
    out
}
