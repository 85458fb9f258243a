use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "askboard", version, about = "Student question board with remote classification")]
pub struct Cli {
    /// Config file (default ./askboard.toml)
    #[arg(long, global = true, env = "ASKBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Replace the roster with freshly generated students
    Roster {
        /// Number of students (defaults to roster.size)
        #[arg(long)]
        size: Option<usize>,
    },
    /// Show the roster and the current student
    Students,
    /// Make the student with this enrollment number current
    Switch { student_id: String },
    /// Submit a question as the current student and classify it
    Ask { content: String },
    /// Ask the backend to suggest a question for the current student
    Generate {
        #[arg(long)]
        topic: Option<String>,
    },
    /// List stored questions
    List {
        /// Every student's questions, not only the current student's
        #[arg(long)]
        all: bool,
    },
    /// Classify every unclassified question, one at a time
    ClassifyAll,
    /// Set a question's category by hand
    Classify { question_id: String, category: String },
    /// Record a question on the backend for the current student
    Publish { content: String },
    /// Read what the backend holds
    Remote {
        #[command(subcommand)]
        what: RemoteCmd,
    },
    /// Adopt the backend's roster
    Sync,
    /// Show the built-in category catalogue
    Categories,
}

#[derive(Subcommand)]
pub enum RemoteCmd {
    Students,
    Questions {
        /// Only questions that already carry a category
        #[arg(long)]
        classified: bool,
    },
}
