//! In-process classification backend with scripted answers.
//!
//! Answers are keyed by exact question content. Per-content delays let a test
//! make a later request resolve before an earlier one, and the in-flight
//! counter tells whether a caller ever had two requests outstanding.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use askboard_client::{ClassificationApi, ClientError, CreatedQuestion};
use askboard_common::{Classification, Question, Student};
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Classify(String),
    Create { content: String, student_id: String },
    Generate { topic: Option<String>, student_id: Option<String> },
    BatchClassify(usize),
    ListStudents,
    ListQuestions,
    ListClassified,
    ManualClassify { question_id: String, category: String },
}

#[derive(Default)]
struct Script {
    classifications: HashMap<String, Classification>,
    default_classification: Option<Classification>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    students: Vec<Student>,
    questions: Vec<Question>,
    generated: Option<String>,
    manual_ok: bool,
    offline: bool,
}

#[derive(Default)]
pub struct ScriptedApi {
    script: Mutex<Script>,
    calls: Mutex<Vec<ApiCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ScriptedApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.script.lock().unwrap().manual_ok = true;
        api
    }

    fn edit(mut self, f: impl FnOnce(&mut Script)) -> Self {
        f(self.script.get_mut().unwrap());
        self
    }

    pub fn classify(self, content: &str, category: &str, confidence: f64) -> Self {
        let c = Classification::new(category, confidence);
        self.edit(|s| { s.classifications.insert(content.to_string(), c); })
    }

    /// Answer for any content without a specific script.
    pub fn classify_everything(self, category: &str, confidence: f64) -> Self {
        let c = Classification::new(category, confidence);
        self.edit(|s| s.default_classification = Some(c))
    }

    pub fn fail_on(self, content: &str) -> Self {
        self.edit(|s| { s.failing.insert(content.to_string()); })
    }

    pub fn delay(self, content: &str, by: Duration) -> Self {
        self.edit(|s| { s.delays.insert(content.to_string(), by); })
    }

    pub fn with_students(self, students: Vec<Student>) -> Self {
        self.edit(|s| s.students = students)
    }

    pub fn with_questions(self, questions: Vec<Question>) -> Self {
        self.edit(|s| s.questions = questions)
    }

    pub fn generates(self, content: &str) -> Self {
        self.edit(|s| s.generated = Some(content.to_string()))
    }

    pub fn reject_manual(self) -> Self {
        self.edit(|s| s.manual_ok = false)
    }

    /// Every operation fails as if the network were down.
    pub fn offline(self) -> Self {
        self.edit(|s| s.offline = true)
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn classify_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::Classify(content) => Some(content),
                _ => None,
            })
            .collect()
    }

    /// Highest number of classify requests outstanding at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_online(&self) -> Result<(), ClientError> {
        if self.script.lock().unwrap().offline {
            return Err(ClientError::Unavailable("scripted backend is offline".to_string()));
        }
        Ok(())
    }

    fn enter(&self) -> InFlight<'_> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        InFlight(&self.in_flight)
    }

    fn lookup(&self, content: &str) -> Result<Classification, ClientError> {
        let script = self.script.lock().unwrap();
        if script.offline || script.failing.contains(content) {
            return Err(ClientError::Unavailable(format!("scripted failure for {content:?}")));
        }
        script
            .classifications
            .get(content)
            .or(script.default_classification.as_ref())
            .cloned()
            .ok_or_else(|| ClientError::Unavailable(format!("no scripted classification for {content:?}")))
    }
}

#[async_trait]
impl ClassificationApi for ScriptedApi {
    async fn classify_content(&self, content: &str) -> Result<Classification, ClientError> {
        self.record(ApiCall::Classify(content.to_string()));
        let _guard = self.enter();
        let delay = self.script.lock().unwrap().delays.get(content).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.lookup(content)
    }

    async fn create_question(&self, content: &str, student_id: &str) -> Result<CreatedQuestion, ClientError> {
        self.record(ApiCall::Create { content: content.to_string(), student_id: student_id.to_string() });
        self.check_online()?;
        let script = self.script.lock().unwrap();
        let student_name = script
            .students
            .iter()
            .find(|s| s.student_id == student_id)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        Ok(CreatedQuestion {
            id: format!("remote-{}", self.calls.lock().unwrap().len()),
            content: content.to_string(),
            category: None,
            student_id: student_id.to_string(),
            student_name,
        })
    }

    async fn generate_question(&self, topic: Option<&str>, student_id: Option<&str>) -> Result<String, ClientError> {
        self.record(ApiCall::Generate {
            topic: topic.map(str::to_string),
            student_id: student_id.map(str::to_string),
        });
        self.check_online()?;
        self.script
            .lock()
            .unwrap()
            .generated
            .clone()
            .ok_or_else(|| ClientError::Unavailable("no scripted generation".to_string()))
    }

    async fn batch_classify(&self, questions: &[Question]) -> Result<Vec<Question>, ClientError> {
        self.record(ApiCall::BatchClassify(questions.len()));
        self.check_online()?;
        Ok(questions
            .iter()
            .cloned()
            .map(|q| {
                let category = self.lookup(&q.content).ok().and_then(|c| c.category);
                q.with_category(category)
            })
            .collect())
    }

    async fn list_students(&self) -> Result<Vec<Student>, ClientError> {
        self.record(ApiCall::ListStudents);
        self.check_online()?;
        Ok(self.script.lock().unwrap().students.clone())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, ClientError> {
        self.record(ApiCall::ListQuestions);
        self.check_online()?;
        Ok(self.script.lock().unwrap().questions.clone())
    }

    async fn list_classified_questions(&self) -> Result<Vec<Question>, ClientError> {
        self.record(ApiCall::ListClassified);
        self.check_online()?;
        Ok(self.script.lock().unwrap().questions.iter().filter(|q| q.is_classified()).cloned().collect())
    }

    async fn manual_classify(&self, question_id: &str, category: &str) -> Result<(), ClientError> {
        self.record(ApiCall::ManualClassify {
            question_id: question_id.to_string(),
            category: category.to_string(),
        });
        self.check_online()?;
        if !self.script.lock().unwrap().manual_ok {
            return Err(ClientError::ApiError { status: 404, message: "Question not found".to_string() });
        }
        Ok(())
    }

    fn endpoint(&self) -> &str { "scripted://backend" }
}
