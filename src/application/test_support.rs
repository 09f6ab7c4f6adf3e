//! Hand-rolled in-memory doubles for orchestrator tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::assistant_gateway::{
    Assistant, AssistantGateway, AssistantGatewayError, BatchStatus, CreateAssistantRequest,
    IndexBatch, PostedMessage, RemoteFile, RemoteThread, Run, RunError, RunStatus, ThreadMessage,
    VectorStore,
};
use crate::application::ports::file_storage::{FileStorage, FileStorageError, StagedFile};
use crate::domain::entities::{ChatMessage, ChatSession, Project, UploadedFile};
use crate::domain::repositories::chat_message_repository::{
    ChatMessageRepository, ChatMessageRepositoryError,
};
use crate::domain::repositories::chat_session_repository::{
    ChatSessionRepository, ChatSessionRepositoryError,
};
use crate::domain::repositories::project_repository::{ProjectRepository, ProjectRepositoryError};
use crate::domain::repositories::uploaded_file_repository::{
    UploadedFileRepository, UploadedFileRepositoryError,
};

#[derive(Default)]
pub struct InMemoryProjectRepository {
    projects: Mutex<HashMap<Uuid, Project>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn save(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        self.projects
            .lock()
            .unwrap()
            .insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(self.projects.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        Ok(self.projects.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        self.projects
            .lock()
            .unwrap()
            .insert(project.id(), project.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ProjectRepositoryError> {
        Ok(self.projects.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryUploadedFileRepository {
    files: Mutex<Vec<UploadedFile>>,
    fail_saves: Mutex<bool>,
}

impl InMemoryUploadedFileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_saves(&self) {
        *self.fail_saves.lock().unwrap() = true;
    }

    pub fn stored(&self) -> Vec<UploadedFile> {
        self.files.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadedFileRepository for InMemoryUploadedFileRepository {
    async fn save(&self, file: &UploadedFile) -> Result<(), UploadedFileRepositoryError> {
        if *self.fail_saves.lock().unwrap() {
            return Err(UploadedFileRepositoryError::DatabaseError(
                "stubbed save failure".to_string(),
            ));
        }

        self.files.lock().unwrap().push(file.clone());
        Ok(())
    }

    async fn find_by_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<UploadedFile>, UploadedFileRepositoryError> {
        let mut files: Vec<UploadedFile> = self
            .files
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.project_id() == project_id)
            .cloned()
            .collect();
        files.sort_by_key(|f| std::cmp::Reverse(f.uploaded_at()));
        Ok(files)
    }
}

#[derive(Default)]
pub struct InMemoryChatSessionRepository {
    sessions: Mutex<HashMap<Uuid, ChatSession>>,
}

impl InMemoryChatSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatSessionRepository for InMemoryChatSessionRepository {
    async fn save(&self, session: &ChatSession) -> Result<(), ChatSessionRepositoryError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id(), session.clone());
        Ok(())
    }

    async fn find_by_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<ChatSession>, ChatSessionRepositoryError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.project_id() == project_id)
            .cloned()
            .collect())
    }

    async fn find_in_project(
        &self,
        project_id: Uuid,
        session_id: Uuid,
    ) -> Result<Option<ChatSession>, ChatSessionRepositoryError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .get(&session_id)
            .filter(|s| s.project_id() == project_id)
            .cloned())
    }

    async fn update(&self, session: &ChatSession) -> Result<(), ChatSessionRepositoryError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id(), session.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ChatSessionRepositoryError> {
        Ok(self.sessions.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryChatMessageRepository {
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryChatMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(&self) -> Vec<ChatMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatMessageRepository for InMemoryChatMessageRepository {
    async fn save(&self, message: &ChatMessage) -> Result<(), ChatMessageRepositoryError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<ChatMessage>, ChatMessageRepositoryError> {
        let mut messages: Vec<ChatMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.session_id() == session_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.timestamp());
        Ok(messages)
    }
}

#[derive(Default)]
pub struct InMemoryFileStorage {
    staged: Mutex<Vec<PathBuf>>,
    removed: Mutex<Vec<PathBuf>>,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staged(&self) -> Vec<PathBuf> {
        self.staged.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<PathBuf> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn stage(&self, _data: &[u8], filename: &str) -> Result<StagedFile, FileStorageError> {
        let path = PathBuf::from(format!("/tmp/stub/{}", filename));
        self.staged.lock().unwrap().push(path.clone());
        Ok(StagedFile { path })
    }

    async fn remove(&self, staged: &StagedFile) -> Result<bool, FileStorageError> {
        self.removed.lock().unwrap().push(staged.path.clone());
        Ok(true)
    }
}

struct StubGatewayState {
    calls: HashMap<&'static str, usize>,
    fail_next: HashSet<&'static str>,
    assistants: HashMap<String, Assistant>,
    files: HashMap<String, RemoteFile>,
    batch_status: BatchStatus,
    batch_error: Option<String>,
    run_status: RunStatus,
    run_error: Option<RunError>,
    thread_messages: Vec<ThreadMessage>,
    deleted_files: Vec<String>,
    deleted_threads: Vec<String>,
    posted_messages: Vec<(String, String)>,
    counter: usize,
}

impl Default for StubGatewayState {
    fn default() -> Self {
        Self {
            calls: HashMap::new(),
            fail_next: HashSet::new(),
            assistants: HashMap::new(),
            files: HashMap::new(),
            batch_status: BatchStatus::Completed,
            batch_error: None,
            run_status: RunStatus::Completed,
            run_error: None,
            thread_messages: Vec::new(),
            deleted_files: Vec::new(),
            deleted_threads: Vec::new(),
            posted_messages: Vec::new(),
            counter: 0,
        }
    }
}

/// Scriptable gateway double: records every call, can fail a named method
/// once, and returns configured batch/run outcomes.
#[derive(Default)]
pub struct StubGateway {
    state: Mutex<StubGatewayState>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self, method: &str) -> usize {
        *self.state.lock().unwrap().calls.get(method).unwrap_or(&0)
    }

    pub fn fail_next(&self, method: &'static str) {
        self.state.lock().unwrap().fail_next.insert(method);
    }

    pub fn register_assistant(&self, id: &str, model: &str, vector_store_ids: &[&str]) {
        self.state.lock().unwrap().assistants.insert(
            id.to_string(),
            Assistant {
                id: id.to_string(),
                model: model.to_string(),
                vector_store_ids: vector_store_ids.iter().map(|s| s.to_string()).collect(),
            },
        );
    }

    pub fn register_file(&self, id: &str, filename: &str) {
        self.state.lock().unwrap().files.insert(
            id.to_string(),
            RemoteFile {
                id: id.to_string(),
                filename: filename.to_string(),
            },
        );
    }

    pub fn set_batch_outcome(&self, status: BatchStatus, error: Option<&str>) {
        let mut state = self.state.lock().unwrap();
        state.batch_status = status;
        state.batch_error = error.map(|s| s.to_string());
    }

    pub fn set_run_outcome(&self, status: RunStatus, error: Option<RunError>) {
        let mut state = self.state.lock().unwrap();
        state.run_status = status;
        state.run_error = error;
    }

    pub fn set_thread_messages(&self, messages: Vec<ThreadMessage>) {
        self.state.lock().unwrap().thread_messages = messages;
    }

    pub fn deleted_files(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted_files.clone()
    }

    pub fn deleted_threads(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted_threads.clone()
    }

    pub fn posted_messages(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().posted_messages.clone()
    }

    fn record(&self, method: &'static str) -> Result<(), AssistantGatewayError> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry(method).or_insert(0) += 1;

        if state.fail_next.remove(method) {
            return Err(AssistantGatewayError::ApiError {
                status: 500,
                message: format!("stubbed {} failure", method),
            });
        }

        Ok(())
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut state = self.state.lock().unwrap();
        state.counter += 1;
        format!("{}_{}", prefix, state.counter)
    }
}

#[async_trait]
impl AssistantGateway for StubGateway {
    async fn create_assistant(
        &self,
        request: CreateAssistantRequest,
    ) -> Result<Assistant, AssistantGatewayError> {
        self.record("create_assistant")?;
        let assistant = Assistant {
            id: self.next_id("asst_stub"),
            model: request.model,
            vector_store_ids: vec![request.vector_store_id],
        };
        self.state
            .lock()
            .unwrap()
            .assistants
            .insert(assistant.id.clone(), assistant.clone());
        Ok(assistant)
    }

    async fn retrieve_assistant(
        &self,
        assistant_id: &str,
    ) -> Result<Assistant, AssistantGatewayError> {
        self.record("retrieve_assistant")?;
        self.state
            .lock()
            .unwrap()
            .assistants
            .get(assistant_id)
            .cloned()
            .ok_or_else(|| AssistantGatewayError::ApiError {
                status: 404,
                message: format!("No assistant {}", assistant_id),
            })
    }

    async fn update_assistant_model(
        &self,
        assistant_id: &str,
        model: &str,
    ) -> Result<Assistant, AssistantGatewayError> {
        self.record("update_assistant_model")?;
        let mut state = self.state.lock().unwrap();
        let assistant =
            state
                .assistants
                .get_mut(assistant_id)
                .ok_or_else(|| AssistantGatewayError::ApiError {
                    status: 404,
                    message: format!("No assistant {}", assistant_id),
                })?;
        assistant.model = model.to_string();
        Ok(assistant.clone())
    }

    async fn update_assistant_vector_store(
        &self,
        assistant_id: &str,
        vector_store_id: &str,
    ) -> Result<Assistant, AssistantGatewayError> {
        self.record("update_assistant_vector_store")?;
        let mut state = self.state.lock().unwrap();
        let assistant =
            state
                .assistants
                .get_mut(assistant_id)
                .ok_or_else(|| AssistantGatewayError::ApiError {
                    status: 404,
                    message: format!("No assistant {}", assistant_id),
                })?;
        assistant.vector_store_ids = vec![vector_store_id.to_string()];
        Ok(assistant.clone())
    }

    async fn create_vector_store(&self, _name: &str) -> Result<VectorStore, AssistantGatewayError> {
        self.record("create_vector_store")?;
        Ok(VectorStore {
            id: self.next_id("vs_stub"),
        })
    }

    async fn upload_file(
        &self,
        _path: &Path,
        filename: &str,
    ) -> Result<RemoteFile, AssistantGatewayError> {
        self.record("upload_file")?;
        let file = RemoteFile {
            id: self.next_id("file_stub"),
            filename: filename.to_string(),
        };
        self.state
            .lock()
            .unwrap()
            .files
            .insert(file.id.clone(), file.clone());
        Ok(file)
    }

    async fn retrieve_file(&self, file_id: &str) -> Result<RemoteFile, AssistantGatewayError> {
        self.record("retrieve_file")?;
        self.state
            .lock()
            .unwrap()
            .files
            .get(file_id)
            .cloned()
            .ok_or_else(|| AssistantGatewayError::ApiError {
                status: 404,
                message: format!("No file {}", file_id),
            })
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), AssistantGatewayError> {
        self.record("delete_file")?;
        self.state
            .lock()
            .unwrap()
            .deleted_files
            .push(file_id.to_string());
        Ok(())
    }

    async fn index_file(
        &self,
        _vector_store_id: &str,
        _file_id: &str,
    ) -> Result<IndexBatch, AssistantGatewayError> {
        self.record("index_file")?;
        let state = self.state.lock().unwrap();
        Ok(IndexBatch {
            id: "batch_stub".to_string(),
            status: state.batch_status,
            last_error: state.batch_error.clone(),
        })
    }

    async fn create_thread(&self) -> Result<RemoteThread, AssistantGatewayError> {
        self.record("create_thread")?;
        Ok(RemoteThread {
            id: self.next_id("thread_stub"),
        })
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<(), AssistantGatewayError> {
        self.record("delete_thread")?;
        self.state
            .lock()
            .unwrap()
            .deleted_threads
            .push(thread_id.to_string());
        Ok(())
    }

    async fn post_user_message(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<PostedMessage, AssistantGatewayError> {
        self.record("post_user_message")?;
        self.state
            .lock()
            .unwrap()
            .posted_messages
            .push((thread_id.to_string(), content.to_string()));
        Ok(PostedMessage {
            id: self.next_id("msg_stub"),
        })
    }

    async fn run_to_completion(
        &self,
        _thread_id: &str,
        _assistant_id: &str,
    ) -> Result<Run, AssistantGatewayError> {
        self.record("run_to_completion")?;
        let state = self.state.lock().unwrap();
        Ok(Run {
            id: "run_stub".to_string(),
            status: state.run_status,
            last_error: state.run_error.clone(),
        })
    }

    async fn list_messages_after(
        &self,
        _thread_id: &str,
        _after_message_id: &str,
    ) -> Result<Vec<ThreadMessage>, AssistantGatewayError> {
        self.record("list_messages_after")?;
        Ok(self.state.lock().unwrap().thread_messages.clone())
    }
}
