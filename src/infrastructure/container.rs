use std::{path::PathBuf, sync::Arc};

use crate::{
    application::{
        ports::{AssistantGateway, FileStorage},
        services::AssistantService,
        use_cases::{
            CreateSessionUseCase, DeleteSessionUseCase, SendChatMessageUseCase,
            UploadDocumentUseCase,
        },
    },
    domain::repositories::{
        ChatMessageRepository, ChatSessionRepository, ProjectRepository, TokenRepository,
        UploadedFileRepository, UserRepository,
    },
    infrastructure::{
        database::{
            create_connection_pool, get_connection_from_pool,
            repositories::{
                PostgresAuthRepository, PostgresChatMessageRepository,
                PostgresChatSessionRepository, PostgresProjectRepository,
                PostgresUploadedFileRepository,
            },
            run_migrations,
        },
        external_services::{AssistantClient, AssistantClientConfig, HostedAssistantGateway},
        file_system::LocalFileStorage,
    },
    presentation::http::handlers::{
        AuthHandler, ChatHandler, FileHandler, ProjectHandler, SessionHandler,
    },
};

/// Builds the whole object graph once at startup. The assistant client is
/// constructed here and handed to the orchestrators explicitly; nothing in
/// the crate reaches for process-global state.
pub struct AppContainer {
    // Repositories
    pub project_repository: Arc<dyn ProjectRepository>,
    pub file_repository: Arc<dyn UploadedFileRepository>,
    pub session_repository: Arc<dyn ChatSessionRepository>,
    pub message_repository: Arc<dyn ChatMessageRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub token_repository: Arc<dyn TokenRepository>,

    // External services
    pub gateway: Arc<dyn AssistantGateway>,
    pub file_storage: Arc<dyn FileStorage>,

    // Application services
    pub assistant_service: Arc<AssistantService>,

    // Use cases
    pub upload_document_use_case: Arc<UploadDocumentUseCase>,
    pub send_chat_message_use_case: Arc<SendChatMessageUseCase>,
    pub create_session_use_case: Arc<CreateSessionUseCase>,
    pub delete_session_use_case: Arc<DeleteSessionUseCase>,

    // HTTP handlers
    pub project_handler: Arc<ProjectHandler>,
    pub file_handler: Arc<FileHandler>,
    pub session_handler: Arc<SessionHandler>,
    pub chat_handler: Arc<ChatHandler>,
    pub auth_handler: Arc<AuthHandler>,
}

impl AppContainer {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let db_pool = create_connection_pool()?;

        let mut conn = get_connection_from_pool(&db_pool)
            .map_err(|e| format!("Failed to get database connection: {}", e))?;
        run_migrations(&mut conn).map_err(|e| format!("Failed to run migrations: {}", e))?;
        drop(conn);

        // Repositories
        let project_repository: Arc<dyn ProjectRepository> =
            Arc::new(PostgresProjectRepository::new(db_pool.clone()));
        let file_repository: Arc<dyn UploadedFileRepository> =
            Arc::new(PostgresUploadedFileRepository::new(db_pool.clone()));
        let session_repository: Arc<dyn ChatSessionRepository> =
            Arc::new(PostgresChatSessionRepository::new(db_pool.clone()));
        let message_repository: Arc<dyn ChatMessageRepository> =
            Arc::new(PostgresChatMessageRepository::new(db_pool.clone()));

        let auth_repository = Arc::new(PostgresAuthRepository::new(db_pool));
        let user_repository: Arc<dyn UserRepository> = auth_repository.clone();
        let token_repository: Arc<dyn TokenRepository> = auth_repository;

        // External services
        let client_config = AssistantClientConfig::from_env()?;
        let client = AssistantClient::new(client_config)?;
        let gateway: Arc<dyn AssistantGateway> = Arc::new(HostedAssistantGateway::new(client));

        let tmp_dir =
            PathBuf::from(std::env::var("TMP_UPLOAD_DIR").unwrap_or_else(|_| "./tmp".to_string()));
        let file_storage: Arc<dyn FileStorage> = Arc::new(LocalFileStorage::new(tmp_dir));

        // Application services
        let assistant_service = Arc::new(AssistantService::new(
            project_repository.clone(),
            gateway.clone(),
        ));

        // Use cases
        let upload_document_use_case = Arc::new(UploadDocumentUseCase::new(
            project_repository.clone(),
            file_repository.clone(),
            file_storage.clone(),
            gateway.clone(),
        ));

        let send_chat_message_use_case = Arc::new(SendChatMessageUseCase::new(
            project_repository.clone(),
            session_repository.clone(),
            message_repository.clone(),
            assistant_service.clone(),
            gateway.clone(),
        ));

        let create_session_use_case = Arc::new(CreateSessionUseCase::new(
            project_repository.clone(),
            session_repository.clone(),
            gateway.clone(),
        ));

        let delete_session_use_case = Arc::new(DeleteSessionUseCase::new(
            session_repository.clone(),
            gateway.clone(),
        ));

        // HTTP handlers
        let project_handler = Arc::new(ProjectHandler::new(project_repository.clone()));

        let file_handler = Arc::new(FileHandler::new(
            upload_document_use_case.clone(),
            file_repository.clone(),
            project_repository.clone(),
        ));

        let session_handler = Arc::new(SessionHandler::new(
            create_session_use_case.clone(),
            delete_session_use_case.clone(),
            session_repository.clone(),
            project_repository.clone(),
        ));

        let chat_handler = Arc::new(ChatHandler::new(
            send_chat_message_use_case.clone(),
            message_repository.clone(),
            session_repository.clone(),
        ));

        let auth_handler = Arc::new(AuthHandler::new(
            user_repository.clone(),
            token_repository.clone(),
        ));

        Ok(Self {
            project_repository,
            file_repository,
            session_repository,
            message_repository,
            user_repository,
            token_repository,
            gateway,
            file_storage,
            assistant_service,
            upload_document_use_case,
            send_chat_message_use_case,
            create_session_use_case,
            delete_session_use_case,
            project_handler,
            file_handler,
            session_handler,
            chat_handler,
            auth_handler,
        })
    }
}
