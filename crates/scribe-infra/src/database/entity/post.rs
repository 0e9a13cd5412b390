//! Post entity for SeaORM.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use scribe_core::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    /// JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// Identity and timestamps are owned by the store: the id and `created_at`
/// are assigned on insert, `updated_at` on every save.
#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now: DateTimeWithTimeZone = Utc::now().into();
        if insert {
            if self.id.is_not_set() {
                self.id = Set(Uuid::new_v4());
            }
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl TryFrom<Model> for scribe_core::domain::Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let tags: Vec<String> = serde_json::from_value(model.tags)
            .map_err(|e| RepoError::Query(format!("malformed tags for post {}: {e}", model.id)))?;

        Ok(Self {
            id: model.id,
            title: model.title,
            content: model.content,
            category: model.category,
            tags,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

/// Column values for a validated draft. Id and timestamps are left to
/// [`ActiveModelBehavior::before_save`].
pub(crate) fn apply_draft(active: &mut ActiveModel, draft: scribe_core::domain::PostDraft) {
    active.title = Set(draft.title);
    active.content = Set(draft.content);
    active.category = Set(draft.category);
    active.tags = Set(Json::from(draft.tags));
}
