//! Session: route dispatch over a shared store.

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::{json, Value as Json};
use std::sync::Arc;
use warden_core::{Caller, RecordId};
use warden_mutation::{ResourceMutationPipeline, SecretHasher, Sha256Hasher, UpdateOutcome};
use warden_query::Page;
use warden_registry::{Registry, TypeDef};
use warden_store::Store;

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::logging;
use crate::reply::Reply;
use crate::request::{CreateRequest, ListRequest, UpdateRequest};
use crate::validate::{check_page, decode_filter, decode_object};

/// The three operations every resource route offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Update,
    Create,
}

impl Action {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "list" => Some(Action::List),
            "update" => Some(Action::Update),
            "create" => Some(Action::Create),
            _ => None,
        }
    }
}

/// A handle serving requests against one registry and one shared store.
///
/// Clones share the store. `list` holds the read lock for its whole run;
/// `create` checks references and inserts under one write lock; `update`
/// plans under a read lock and applies under a later write lock.
#[derive(Clone)]
pub struct Session {
    registry: Arc<Registry>,
    store: Arc<RwLock<Store>>,
    hasher: Arc<dyn SecretHasher>,
    config: SessionConfig,
}

impl Session {
    /// Create a session over an empty store.
    pub fn new(registry: Registry, config: SessionConfig) -> Self {
        Self::with_store(registry, Store::new(), config)
    }

    /// Create a session over an existing store.
    ///
    /// Installs the `log_filter` subscriber unless one is already in place.
    pub fn with_store(registry: Registry, store: Store, config: SessionConfig) -> Self {
        logging::init_from(&config);
        let hasher = Arc::new(Sha256Hasher::new(config.password_salt.clone()));
        Self {
            registry: Arc::new(registry),
            store: Arc::new(RwLock::new(store)),
            hasher,
            config,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The shared store.
    pub fn store(&self) -> &Arc<RwLock<Store>> {
        &self.store
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ==================== Boundary ====================

    /// Serve one request and wrap the outcome in a reply envelope.
    pub fn handle(&self, route: &str, body: &Json, caller: &Caller) -> Reply {
        let result = self.dispatch(route, body, caller);
        match &result {
            Ok(_) => tracing::info!(route, "request succeeded"),
            Err(e) => tracing::warn!(route, code = e.kind().code(), error = %e, "request failed"),
        }
        Reply::from(result)
    }

    /// Serve one request, returning the bare result.
    pub fn dispatch(&self, route: &str, body: &Json, caller: &Caller) -> SessionResult<Json> {
        let (type_def, action) = self.resolve(route)?;
        match action {
            Action::List => {
                let request: ListRequest = parse_body(body)?;
                let page = self.list(type_def, request, caller)?;
                serde_json::to_value(page).map_err(|e| SessionError::internal(e.to_string()))
            }
            Action::Update => {
                let request: UpdateRequest = parse_body(body)?;
                self.update(type_def, request, caller)?;
                Ok(Json::Null)
            }
            Action::Create => {
                let request: CreateRequest = parse_body(body)?;
                let id = self.create(type_def, request, caller)?;
                Ok(json!({ "id": id.raw() }))
            }
        }
    }

    /// Split `/<resource>/<action>` into a type and an action.
    pub fn resolve(&self, route: &str) -> SessionResult<(&TypeDef, Action)> {
        let mut parts = route.trim_matches('/').split('/');
        let (Some(resource), Some(action), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(SessionError::unknown_route(route));
        };
        let type_def = self
            .registry
            .get_type_by_route(resource)
            .ok_or_else(|| SessionError::unknown_route(route))?;
        let action = Action::parse(action).ok_or_else(|| SessionError::unknown_route(route))?;
        Ok((type_def, action))
    }

    // ==================== Typed Operations ====================

    pub fn list(
        &self,
        type_def: &TypeDef,
        request: ListRequest,
        caller: &Caller,
    ) -> SessionResult<Page<Json>> {
        check_page(request.page, request.limit, self.config.max_page_limit)?;
        let filter = decode_filter(&self.registry, type_def, &request.filter)?;

        let store = self.store.read();
        Ok(self.pipeline().list(
            &store,
            type_def.id,
            filter,
            request.page,
            request.limit,
            caller,
        )?)
    }

    pub fn update(
        &self,
        type_def: &TypeDef,
        request: UpdateRequest,
        caller: &Caller,
    ) -> SessionResult<UpdateOutcome> {
        let filter = decode_filter(&self.registry, type_def, &request.filter)?;
        let object = decode_object(type_def, &request.obj, false)?;
        let pipeline = self.pipeline();

        let plan = {
            let store = self.store.read();
            pipeline.plan_update(&store, type_def.id, filter, object, caller)?
        };
        let mut store = self.store.write();
        Ok(pipeline.apply_update(&mut store, plan)?)
    }

    pub fn create(
        &self,
        type_def: &TypeDef,
        request: CreateRequest,
        caller: &Caller,
    ) -> SessionResult<RecordId> {
        let object = decode_object(type_def, &request.obj, true)?;

        let mut store = self.store.write();
        Ok(self
            .pipeline()
            .create(&mut store, type_def.id, object, caller)?)
    }

    fn pipeline(&self) -> ResourceMutationPipeline<'_> {
        ResourceMutationPipeline::new(&self.registry, self.hasher.as_ref())
    }
}

fn parse_body<T: DeserializeOwned>(body: &Json) -> SessionResult<T> {
    serde_json::from_value(body.clone()).map_err(|e| SessionError::validation(e.to_string()))
}
