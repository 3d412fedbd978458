use http::Method;
use pyrus_sdk::requests::{
    CatalogRequest, RegisterCallEventRequest, RoleRequest, RoleUpdateRequest, SyncCatalogRequest,
};
use pyrus_sdk::{
    AddCallDetailsRequest, CallEventType, CatalogItem, CatalogResponse, CatalogsResponse,
    ContactsResponse, DownloadResponse, Event, FormRegisterResponse, FormResponse, FormsResponse,
    ListsResponse, Member, MemberRequest, MembersResponse, ProfileResponse, RegisterCallRequest,
    RegisterCallResponse, RegistryRequest, Role, RolesResponse, SyncCatalogResponse,
    TaskCommentRequest, TaskListResponse, TaskRequest, TaskResponse, UploadResponse, Validate,
};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;

use crate::body::RequestBody;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transport::Transport;
use crate::webhook::{self, WebhookVerifier};

// ---------------------------------------------------------------------------
// Service trait
// ---------------------------------------------------------------------------

/// Every Pyrus endpoint, one method each.
///
/// [`PyrusClient`] is the real implementation; applications can provide their
/// own to test code that talks to Pyrus.
#[async_trait::async_trait]
pub trait PyrusApi: Send + Sync {
    /// Exchanges credentials for an access token. The token is returned, not
    /// stored.
    async fn auth(&self, login: &str, security_key: &str) -> Result<String, ClientError>;

    /// Form templates available to the caller.
    async fn forms(&self) -> Result<FormsResponse, ClientError>;

    async fn form(&self, form_id: i64) -> Result<FormResponse, ClientError>;

    /// Tasks created from a form template.
    async fn registry(
        &self,
        form_id: i64,
        request: &RegistryRequest,
    ) -> Result<FormRegisterResponse, ClientError>;

    /// A task with all its comments.
    async fn task(&self, task_id: i64) -> Result<TaskResponse, ClientError>;

    async fn create_task(&self, request: &TaskRequest) -> Result<TaskResponse, ClientError>;

    async fn comment_task(
        &self,
        task_id: i64,
        request: &TaskCommentRequest,
    ) -> Result<TaskResponse, ClientError>;

    /// Uploads a file. Reference the returned guid from an attachment.
    async fn upload_file(
        &self,
        name: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<UploadResponse, ClientError>;

    /// Downloads a file into memory.
    async fn download_file(&self, file_id: i64) -> Result<DownloadResponse, ClientError>;

    /// Streams a file into `writer` and returns its name.
    async fn download_file_to(
        &self,
        file_id: i64,
        writer: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<String, ClientError>;

    async fn catalogs(&self) -> Result<CatalogsResponse, ClientError>;

    async fn catalog(&self, catalog_id: i64) -> Result<CatalogResponse, ClientError>;

    async fn create_catalog(
        &self,
        name: &str,
        headers: &[String],
        items: &[CatalogItem],
    ) -> Result<CatalogResponse, ClientError>;

    /// Replaces catalog contents. With `apply == false` the server only
    /// reports what would change.
    async fn sync_catalog(
        &self,
        catalog_id: i64,
        apply: bool,
        headers: &[String],
        items: &[CatalogItem],
    ) -> Result<SyncCatalogResponse, ClientError>;

    async fn contacts(&self) -> Result<ContactsResponse, ClientError>;

    async fn members(&self) -> Result<MembersResponse, ClientError>;

    async fn create_member(&self, request: &MemberRequest) -> Result<Member, ClientError>;

    async fn update_member(
        &self,
        member_id: i64,
        request: &MemberRequest,
    ) -> Result<Member, ClientError>;

    async fn block_member(&self, member_id: i64) -> Result<Member, ClientError>;

    async fn roles(&self) -> Result<RolesResponse, ClientError>;

    async fn create_role(&self, name: &str, members: &[i64]) -> Result<Role, ClientError>;

    async fn update_role(
        &self,
        role_id: i64,
        name: &str,
        add: &[i64],
        remove: &[i64],
        banned: bool,
    ) -> Result<Role, ClientError>;

    async fn profile(&self) -> Result<ProfileResponse, ClientError>;

    async fn lists(&self) -> Result<ListsResponse, ClientError>;

    /// Tasks of a list. `item_count == 0` leaves the page size to the server.
    async fn task_list(
        &self,
        list_id: i64,
        item_count: u32,
        include_archived: bool,
    ) -> Result<TaskListResponse, ClientError>;

    async fn inbox(&self, item_count: u32) -> Result<TaskListResponse, ClientError>;

    async fn register_call(
        &self,
        request: &RegisterCallRequest,
    ) -> Result<RegisterCallResponse, ClientError>;

    /// The response body is not inspected.
    async fn add_call_details(
        &self,
        call_guid: &str,
        request: &AddCallDetailsRequest,
    ) -> Result<(), ClientError>;

    /// The response body is not inspected.
    async fn register_call_event(
        &self,
        call_guid: &str,
        event_type: CallEventType,
        extension: &str,
    ) -> Result<(), ClientError>;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Pyrus API client.
///
/// Cheap to share behind an `Arc`; all calls take `&self`.
#[derive(Debug)]
pub struct PyrusClient {
    transport: Transport,
    verifier: WebhookVerifier,
    event_buffer_size: usize,
}

impl PyrusClient {
    /// Create client from configuration
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let event_buffer_size = config.event_buffer_size.max(1);
        let verifier = WebhookVerifier::new(&config.security_key)?;
        Ok(Self {
            transport: Transport::new(config)?,
            verifier,
            event_buffer_size,
        })
    }

    /// Current access token, for applications that want to reuse it via
    /// [`ClientConfig::with_access_token`].
    pub fn access_token(&self) -> Option<String> {
        self.transport.tokens().read()
    }

    /// Webhook receiver for this client's bot.
    ///
    /// Returns a router answering `POST /` and the receiving end of the event
    /// channel. Nest the router wherever the bot's webhook URL points.
    pub fn webhook(&self) -> (axum::Router, mpsc::Receiver<Event>) {
        webhook::router(self.verifier.clone(), self.event_buffer_size)
    }
}

fn list_query(item_count: u32, include_archived: bool) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if item_count > 0 {
        query.push(("item_count", item_count.to_string()));
    }
    if include_archived {
        query.push(("include_archived", "y".to_owned()));
    }
    query
}

#[async_trait::async_trait]
impl PyrusApi for PyrusClient {
    async fn auth(&self, login: &str, security_key: &str) -> Result<String, ClientError> {
        self.transport.authenticate(login, security_key).await
    }

    async fn forms(&self) -> Result<FormsResponse, ClientError> {
        self.transport
            .request_json(Method::GET, "/forms", &[], RequestBody::Empty)
            .await
    }

    async fn form(&self, form_id: i64) -> Result<FormResponse, ClientError> {
        self.transport
            .request_json(Method::GET, &format!("/forms/{form_id}"), &[], RequestBody::Empty)
            .await
    }

    async fn registry(
        &self,
        form_id: i64,
        request: &RegistryRequest,
    ) -> Result<FormRegisterResponse, ClientError> {
        let body = RequestBody::json(request)?;
        self.transport
            .request_json(Method::POST, &format!("/forms/{form_id}/register"), &[], body)
            .await
    }

    async fn task(&self, task_id: i64) -> Result<TaskResponse, ClientError> {
        self.transport
            .request_json(Method::GET, &format!("/tasks/{task_id}"), &[], RequestBody::Empty)
            .await
    }

    async fn create_task(&self, request: &TaskRequest) -> Result<TaskResponse, ClientError> {
        request.validate()?;
        let body = RequestBody::json(request)?;
        self.transport
            .request_json(Method::POST, "/tasks", &[], body)
            .await
    }

    async fn comment_task(
        &self,
        task_id: i64,
        request: &TaskCommentRequest,
    ) -> Result<TaskResponse, ClientError> {
        request.validate()?;
        let body = RequestBody::json(request)?;
        self.transport
            .request_json(Method::POST, &format!("/tasks/{task_id}/comments"), &[], body)
            .await
    }

    async fn upload_file(
        &self,
        name: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<UploadResponse, ClientError> {
        let body = RequestBody::file(name, reader).await?;
        self.transport
            .request_json(Method::POST, "/files/upload", &[], body)
            .await
    }

    async fn download_file(&self, file_id: i64) -> Result<DownloadResponse, ClientError> {
        let mut raw_file = Vec::new();
        let filename = self.download_file_to(file_id, &mut raw_file).await?;
        Ok(DownloadResponse { filename, raw_file })
    }

    async fn download_file_to(
        &self,
        file_id: i64,
        writer: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<String, ClientError> {
        self.transport
            .download(&format!("/files/download/{file_id}"), writer)
            .await
    }

    async fn catalogs(&self) -> Result<CatalogsResponse, ClientError> {
        self.transport
            .request_json(Method::GET, "/catalogs", &[], RequestBody::Empty)
            .await
    }

    async fn catalog(&self, catalog_id: i64) -> Result<CatalogResponse, ClientError> {
        self.transport
            .request_json(Method::GET, &format!("/catalogs/{catalog_id}"), &[], RequestBody::Empty)
            .await
    }

    async fn create_catalog(
        &self,
        name: &str,
        headers: &[String],
        items: &[CatalogItem],
    ) -> Result<CatalogResponse, ClientError> {
        let body = RequestBody::json(&CatalogRequest {
            name,
            catalog_headers: headers,
            items,
        })?;
        self.transport
            .request_json(Method::PUT, "/catalogs", &[], body)
            .await
    }

    async fn sync_catalog(
        &self,
        catalog_id: i64,
        apply: bool,
        headers: &[String],
        items: &[CatalogItem],
    ) -> Result<SyncCatalogResponse, ClientError> {
        let body = RequestBody::json(&SyncCatalogRequest {
            apply,
            catalog_headers: headers,
            items,
        })?;
        self.transport
            .request_json(Method::POST, &format!("/catalogs/{catalog_id}"), &[], body)
            .await
    }

    async fn contacts(&self) -> Result<ContactsResponse, ClientError> {
        self.transport
            .request_json(Method::GET, "/contacts", &[], RequestBody::Empty)
            .await
    }

    async fn members(&self) -> Result<MembersResponse, ClientError> {
        self.transport
            .request_json(Method::GET, "/members", &[], RequestBody::Empty)
            .await
    }

    async fn create_member(&self, request: &MemberRequest) -> Result<Member, ClientError> {
        let body = RequestBody::json(request)?;
        self.transport
            .request_json(Method::POST, "/members", &[], body)
            .await
    }

    async fn update_member(
        &self,
        member_id: i64,
        request: &MemberRequest,
    ) -> Result<Member, ClientError> {
        let body = RequestBody::json(request)?;
        self.transport
            .request_json(Method::PUT, &format!("/members/{member_id}"), &[], body)
            .await
    }

    async fn block_member(&self, member_id: i64) -> Result<Member, ClientError> {
        self.transport
            .request_json(Method::DELETE, &format!("/members/{member_id}"), &[], RequestBody::Empty)
            .await
    }

    async fn roles(&self) -> Result<RolesResponse, ClientError> {
        self.transport
            .request_json(Method::GET, "/roles", &[], RequestBody::Empty)
            .await
    }

    async fn create_role(&self, name: &str, members: &[i64]) -> Result<Role, ClientError> {
        let body = RequestBody::json(&RoleRequest {
            name,
            member_add: members,
        })?;
        self.transport
            .request_json(Method::POST, "/roles", &[], body)
            .await
    }

    async fn update_role(
        &self,
        role_id: i64,
        name: &str,
        add: &[i64],
        remove: &[i64],
        banned: bool,
    ) -> Result<Role, ClientError> {
        let body = RequestBody::json(&RoleUpdateRequest {
            name,
            member_add: add,
            member_remove: remove,
            banned,
        })?;
        self.transport
            .request_json(Method::PUT, &format!("/roles/{role_id}"), &[], body)
            .await
    }

    async fn profile(&self) -> Result<ProfileResponse, ClientError> {
        self.transport
            .request_json(Method::GET, "/profile", &[], RequestBody::Empty)
            .await
    }

    async fn lists(&self) -> Result<ListsResponse, ClientError> {
        self.transport
            .request_json(Method::GET, "/lists", &[], RequestBody::Empty)
            .await
    }

    async fn task_list(
        &self,
        list_id: i64,
        item_count: u32,
        include_archived: bool,
    ) -> Result<TaskListResponse, ClientError> {
        let query = list_query(item_count, include_archived);
        self.transport
            .request_json(
                Method::GET,
                &format!("/lists/{list_id}/tasks"),
                &query,
                RequestBody::Empty,
            )
            .await
    }

    async fn inbox(&self, item_count: u32) -> Result<TaskListResponse, ClientError> {
        let query = list_query(item_count, false);
        self.transport
            .request_json(Method::GET, "/inbox", &query, RequestBody::Empty)
            .await
    }

    async fn register_call(
        &self,
        request: &RegisterCallRequest,
    ) -> Result<RegisterCallResponse, ClientError> {
        request.validate()?;
        let body = RequestBody::json(request)?;
        self.transport
            .request_json(Method::POST, "/calls", &[], body)
            .await
    }

    async fn add_call_details(
        &self,
        call_guid: &str,
        request: &AddCallDetailsRequest,
    ) -> Result<(), ClientError> {
        let body = RequestBody::json(request)?;
        self.transport
            .request_discard(Method::PUT, &format!("/calls/{call_guid}"), body)
            .await
    }

    async fn register_call_event(
        &self,
        call_guid: &str,
        event_type: CallEventType,
        extension: &str,
    ) -> Result<(), ClientError> {
        let body = RequestBody::json(&RegisterCallEventRequest {
            event_type,
            extension,
        })?;
        self.transport
            .request_discard(Method::POST, &format!("/calls/{call_guid}/event"), body)
            .await
    }
}
