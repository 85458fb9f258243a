//! askboard — submit, classify and review student questions from the terminal.

mod cli;
mod config;

use std::sync::Arc;

use anyhow::Context;
use askboard_client::{HttpClassificationClient, RemoteClassifier};
use askboard_common::{builtin_categories, Question};
use askboard_flows::{Notice, NoticeLevel, Notifier, StudentFlow, TeacherFlow};
use askboard_store::{JsonFilePersistence, QuestionStore, SharedStore};
use clap::Parser;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Cmd, RemoteCmd};
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("askboard=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let mut store = QuestionStore::open(JsonFilePersistence::new(&config.storage.path))
        .with_context(|| format!("Opening store at {}", config.storage.path.display()))?;
    ensure_roster(&mut store, &config);
    let store = store.into_shared();

    let http = HttpClassificationClient::new(config.api.base_url.clone(), config.api.timeout())?;
    info!(endpoint = %http.base_url, "Classification backend");
    let remote = RemoteClassifier::new(Arc::new(http));

    let notifier = Notifier::new();
    let mut notices = notifier.subscribe();
    let student = StudentFlow::new(store.clone(), remote.clone(), notifier.clone());
    let teacher = TeacherFlow::new(store.clone(), remote, notifier);

    let outcome = run(cli.cmd, &config, &store, &student, &teacher).await;
    print_notices(&mut notices);
    outcome?;

    store.lock().await.flush().context("Saving question store")?;
    Ok(())
}

/// A first run starts with a generated roster and its first student selected.
/// After a roster change the current student must still be on the roster.
fn ensure_roster(store: &mut QuestionStore, config: &Config) {
    if store.students().is_empty() {
        store.generate_and_load_students(config.roster.size, &config.roster.enrollment_prefix);
    }
    let on_roster = store
        .current_student()
        .is_some_and(|c| store.students().iter().any(|s| s.student_id == c.student_id));
    if !on_roster {
        if let Some(first) = store.students().first().cloned() {
            store.set_current_student(first);
        }
    }
}

async fn run(
    cmd: Cmd,
    config: &Config,
    store: &SharedStore,
    student: &StudentFlow,
    teacher: &TeacherFlow,
) -> anyhow::Result<()> {
    match cmd {
        Cmd::Roster { size } => {
            let mut store = store.lock().await;
            let students = store.generate_and_load_students(
                size.unwrap_or(config.roster.size),
                &config.roster.enrollment_prefix,
            );
            if let Some(first) = students.first() {
                store.set_current_student(first.clone());
            }
            println!("Generated {} students", students.len());
        }
        Cmd::Students => {
            let store = store.lock().await;
            let current = store.current_student().map(|s| s.student_id.as_str());
            for s in store.students() {
                let marker = if Some(s.student_id.as_str()) == current { "*" } else { " " };
                println!("{marker} {}  {}", s.student_id, s.name);
            }
        }
        Cmd::Switch { student_id } => {
            let mut store = store.lock().await;
            if !store.switch_student_by_student_id(&student_id) {
                anyhow::bail!("No student with enrollment number {student_id}");
            }
            if let Some(s) = store.current_student() {
                println!("Current student: {} ({})", s.name, s.student_id);
            }
        }
        Cmd::Ask { content } => {
            let submission = student.submit_question(&content).await?;
            print_question(&submission.question);
        }
        Cmd::Generate { topic } => {
            println!("{}", student.request_generated_question(topic.as_deref()).await);
        }
        Cmd::List { all } => {
            let questions = if all {
                store.lock().await.all_student_questions()
            } else {
                student.load_student_questions().await.context("No current student")?
            };
            questions.iter().for_each(print_question);
        }
        Cmd::ClassifyAll => {
            let report = teacher.classify_unclassified().await;
            println!("{}", serde_json::to_string(&report)?);
        }
        Cmd::Classify { question_id, category } => {
            if !teacher.classify_manually(&question_id, &category).await {
                anyhow::bail!("Backend did not accept the category for {question_id}");
            }
        }
        Cmd::Publish { content } => {
            let created = student.publish_question(&content).await?;
            println!("{}  {}  {}", created.id, created.student_id, created.content);
        }
        Cmd::Remote { what: RemoteCmd::Students } => {
            for s in teacher.fetch_all_students().await {
                println!("{}  {}", s.student_id, s.name);
            }
        }
        Cmd::Remote { what: RemoteCmd::Questions { classified } } => {
            let questions = if classified {
                teacher.fetch_classified_questions().await
            } else {
                teacher.fetch_all_questions().await
            };
            questions.iter().for_each(print_question);
        }
        Cmd::Sync => {
            let adopted = teacher.sync_roster().await;
            if adopted > 0 {
                ensure_roster(&mut *store.lock().await, config);
            }
        }
        Cmd::Categories => {
            for c in builtin_categories() {
                println!("{:<14} {}", c.name, c.description);
            }
        }
    }
    Ok(())
}

fn print_question(q: &Question) {
    println!(
        "{}  [{}]  {}  {}: {}",
        q.timestamp.format("%Y-%m-%d %H:%M:%S"),
        q.category_label(),
        q.id,
        q.student_name,
        q.content
    );
}

fn print_notices(rx: &mut broadcast::Receiver<Notice>) {
    while let Ok(notice) = rx.try_recv() {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warn",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{tag}] {}", notice.message);
    }
}
