//! PostgreSQL post store.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, Condition, DbConn, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use scribe_core::domain::{Post, PostDraft, PostFilter};
use scribe_core::error::RepoError;
use scribe_core::ports::PostStore;

use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post store.
pub struct PostgresPostStore {
    db: DbConn,
}

impl PostgresPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_error(e: sea_orm::DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// `%term%` with LIKE metacharacters escaped. Case folding is left to `ILIKE`.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn search_condition(term: &str) -> Condition {
    let pattern = contains_pattern(term);
    [post::Column::Title, post::Column::Content, post::Column::Category]
        .into_iter()
        .fold(Condition::any(), |cond, column| {
            cond.add(Expr::col(column).ilike(pattern.as_str()))
        })
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let mut active = <post::ActiveModel as Default>::default();
        post::apply_draft(&mut active, draft);

        let model = active.insert(&self.db).await.map_err(query_error)?;
        model.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        result.map(Post::try_from).transpose()
    }

    async fn find(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(term = ?filter.term(), "Listing posts");

        let mut query = PostEntity::find();
        if let Some(term) = filter.term() {
            query = query.filter(search_condition(term));
        }

        let models = query
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        models.into_iter().map(Post::try_from).collect()
    }

    async fn update(&self, id: Uuid, draft: PostDraft) -> Result<Post, RepoError> {
        let existing = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?
            .ok_or(RepoError::NotFound)?;

        let mut active = existing.into_active_model();
        post::apply_draft(&mut active, draft);

        let model = active.update(&self.db).await.map_err(query_error)?;
        model.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
