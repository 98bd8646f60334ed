//! # Resource Services
//!
//! Every table behind the API is exposed through the same five operations.
//! [`ResourceService`] implements them once; each entity binding supplies its
//! schema, required fields, and access policy through the [`Resource`] trait.

use std::{fmt, marker::PhantomData};

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    EntityTrait, FromQueryResult, IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, Value,
};
use serde_json::json;
use uuid::Uuid;

use crate::auth::{AccessPolicy, Caller, Session};
use crate::config::AppConfig;
use crate::error::{ApiError, forbidden, not_found, store_error, unauthorized, validation_error};

pub mod leads;
pub mod properties;
pub mod learning;
pub mod saved_properties;
pub mod search_alerts;
pub mod testimonials;

pub use leads::Leads;
pub use properties::Properties;
pub use learning::Resources;
pub use saved_properties::SavedProperties;
pub use search_alerts::SearchAlerts;
pub use testimonials::Testimonials;

/// Store operation, used in error tags such as `LEAD_CREATE_ERROR`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Get,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "LIST",
            Operation::Create => "CREATE",
            Operation::Get => "GET",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Binding between a table and the generic CRUD operations.
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    type Entity: EntityTrait<Model = Self::Model>;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Send
        + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send;
    /// Request body accepted by `create`
    type Create: Send + Sync;

    /// Human-readable name used in messages, e.g. `Saved property`
    const LABEL: &'static str;
    /// Prefix for store error tags, e.g. `SAVED_PROPERTY`
    const LOG_TAG: &'static str;

    fn policy(config: &AppConfig) -> AccessPolicy;

    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    fn created_at_column() -> <Self::Entity as EntityTrait>::Column;

    fn id_of(model: &Self::Model) -> Uuid;

    /// Column holding the owning user for owner-scoped tables
    fn owner_column() -> Option<<Self::Entity as EntityTrait>::Column> {
        None
    }

    fn owner_of(_model: &Self::Model) -> Option<&str> {
        None
    }

    /// Names of required fields that are absent or blank in `body`
    fn missing_fields(body: &Self::Create) -> Vec<&'static str>;

    /// Verify rows referenced by `body` exist.
    async fn check_references(
        _db: &DatabaseConnection,
        _body: &Self::Create,
    ) -> Result<(), ApiError> {
        Ok(())
    }

    /// Build the row to insert. Only called once `missing_fields` is empty.
    fn new_row(body: Self::Create, session: Option<&Session>) -> Self::ActiveModel;
}

/// Resources that accept partial updates.
pub trait Patchable: Resource {
    type Patch: Send;

    /// Required text fields that the patch would set to blank
    fn blank_fields(patch: &Self::Patch) -> Vec<&'static str>;

    fn apply_patch(row: &mut Self::ActiveModel, patch: Self::Patch);
}

/// Collects the names of required fields missing from a request body.
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text must be present and not blank.
    pub fn text(mut self, name: &'static str, value: &Option<String>) -> Self {
        if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
            self.missing.push(name);
        }
        self
    }

    /// Text may be absent, but not blank when given.
    pub fn text_if_present(mut self, name: &'static str, value: &Option<String>) -> Self {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            self.missing.push(name);
        }
        self
    }

    pub fn value<T>(mut self, name: &'static str, value: &Option<T>) -> Self {
        if value.is_none() {
            self.missing.push(name);
        }
        self
    }

    pub fn finish(self) -> Vec<&'static str> {
        self.missing
    }
}

/// Set `slot` to `value` when one was supplied and it differs from the stored value.
pub(crate) fn assign<V>(slot: &mut ActiveValue<V>, value: Option<V>)
where
    V: Into<Value> + PartialEq,
{
    let Some(value) = value else {
        return;
    };

    match slot {
        ActiveValue::Unchanged(current) if *current == value => {}
        _ => *slot = ActiveValue::Set(value),
    }
}

fn missing_fields_error(missing: &[&'static str]) -> ApiError {
    validation_error(
        &format!("Missing required fields: {}", missing.join(", ")),
        json!({ "missing": missing }),
    )
}

fn blank_fields_error(blank: &[&'static str]) -> ApiError {
    validation_error(
        &format!("Required fields cannot be blank: {}", blank.join(", ")),
        json!({ "blank": blank }),
    )
}

/// Generic list/create/get/update/delete over one [`Resource`].
pub struct ResourceService<'a, R> {
    db: &'a DatabaseConnection,
    policy: AccessPolicy,
    _resource: PhantomData<R>,
}

impl<'a, R: Resource> ResourceService<'a, R> {
    pub fn new(db: &'a DatabaseConnection, config: &AppConfig) -> Self {
        Self {
            db,
            policy: R::policy(config),
            _resource: PhantomData,
        }
    }

    fn tag(operation: Operation) -> String {
        format!("{}_{}_ERROR", R::LOG_TAG, operation)
    }

    /// Rows matching `filter`, newest first. Owner-scoped tables only return
    /// the caller's rows.
    pub async fn list(&self, caller: &Caller, filter: Condition) -> Result<Vec<R::Model>, ApiError> {
        let session = caller.authorize(self.policy.read)?;

        let mut condition = filter;
        if let Some(owner_column) = R::owner_column() {
            let session = session.ok_or_else(|| unauthorized(None))?;
            condition = condition.add(owner_column.eq(session.user_id.as_str()));
        }

        R::Entity::find()
            .filter(condition)
            .order_by_desc(R::created_at_column())
            .all(self.db)
            .await
            .map_err(|err| store_error(&Self::tag(Operation::List), err))
    }

    pub async fn create(&self, caller: &Caller, body: R::Create) -> Result<R::Model, ApiError> {
        let session = caller.authorize(self.policy.write)?;

        let missing = R::missing_fields(&body);
        if !missing.is_empty() {
            return Err(missing_fields_error(&missing));
        }

        R::check_references(self.db, &body).await?;

        let model = R::new_row(body, session)
            .insert(self.db)
            .await
            .map_err(|err| store_error(&Self::tag(Operation::Create), err))?;

        tracing::info!(resource = R::LABEL, id = %R::id_of(&model), "created");
        Ok(model)
    }

    pub async fn get(&self, caller: &Caller, id: Uuid) -> Result<R::Model, ApiError> {
        let session = caller.authorize(self.policy.read)?;
        self.load_for(session, id, Operation::Get).await
    }

    pub async fn delete(&self, caller: &Caller, id: Uuid) -> Result<(), ApiError> {
        let session = caller.authorize(self.policy.write)?;
        let model = self.load_for(session, id, Operation::Delete).await?;

        let row: R::ActiveModel = model.into_active_model();
        row.delete(self.db)
            .await
            .map_err(|err| store_error(&Self::tag(Operation::Delete), err))?;

        tracing::info!(resource = R::LABEL, %id, "deleted");
        Ok(())
    }

    /// Load a row, enforcing ownership for owner-scoped tables.
    async fn load_for(
        &self,
        session: Option<&Session>,
        id: Uuid,
        operation: Operation,
    ) -> Result<R::Model, ApiError> {
        let model = R::Entity::find()
            .filter(R::id_column().eq(id))
            .one(self.db)
            .await
            .map_err(|err| store_error(&Self::tag(operation), err))?
            .ok_or_else(|| not_found(&format!("{} not found", R::LABEL)))?;

        let permitted = match R::owner_of(&model) {
            Some(owner) => session.is_some_and(|session| session.user_id == owner),
            None => true,
        };

        if !permitted {
            tracing::info!(resource = R::LABEL, %id, %operation, "caller does not own row");
            return Err(forbidden(Some("You do not own this resource")));
        }

        Ok(model)
    }
}

impl<R: Patchable> ResourceService<'_, R> {
    /// Apply the fields present in `patch`. A patch that changes nothing
    /// returns the stored row without writing.
    pub async fn update(&self, caller: &Caller, id: Uuid, patch: R::Patch) -> Result<R::Model, ApiError> {
        let session = caller.authorize(self.policy.write)?;
        let model = self.load_for(session, id, Operation::Update).await?;

        let blank = R::blank_fields(&patch);
        if !blank.is_empty() {
            return Err(blank_fields_error(&blank));
        }

        let mut row: R::ActiveModel = model.clone().into_active_model();
        R::apply_patch(&mut row, patch);

        if !row.is_changed() {
            return Ok(model);
        }

        let updated = row
            .update(self.db)
            .await
            .map_err(|err| store_error(&Self::tag(Operation::Update), err))?;

        tracing::info!(resource = R::LABEL, %id, "updated");
        Ok(updated)
    }
}

/// Deserialize a field that may be absent, `null`, or a value.
///
/// Absent leaves the column untouched, `null` clears it.
pub(crate) mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
