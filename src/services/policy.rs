//! Ownership policy for owned resources (blogs, news).
//!
//! Rules are a closed set selected by `ResourceKind`:
//! - create: admin only, for every kind
//! - update / delete on a Blog: owner only (role does not matter)
//! - update / delete on a News item: admin *and* owner
//!
//! The Blog/News asymmetry is current product behavior and is kept on purpose.
//! Evaluation is always existence first, then ownership, so callers can tell
//! "not found" apart from "exists but not yours".
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::repos::store::{Resource, ResourceStore};
use crate::services::auth::identity::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Blog,
    News,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Blog => "Blog",
            ResourceKind::News => "News",
        }
    }

    pub fn ownership_rule(self) -> OwnershipRule {
        match self {
            ResourceKind::Blog => OwnershipRule::OwnerOnly,
            ResourceKind::News => OwnershipRule::AdminAndOwner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipRule {
    OwnerOnly,
    AdminAndOwner,
}

impl OwnershipRule {
    pub fn permits(self, identity: &Identity, author_id: Uuid) -> bool {
        let is_owner = identity.account_id() == author_id;
        match self {
            OwnershipRule::OwnerOnly => is_owner,
            OwnershipRule::AdminAndOwner => identity.is_admin() && is_owner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

/// Why a mutation was refused. Rendered to HTTP by `AppError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denial {
    pub kind: ResourceKind,
    pub operation: Operation,
}

pub fn authorize_create(kind: ResourceKind, identity: &Identity) -> Result<(), Denial> {
    if identity.is_admin() {
        Ok(())
    } else {
        tracing::info!(
            account_id = %identity.account_id(),
            kind = kind.label(),
            "create denied: admin role required"
        );
        Err(Denial {
            kind,
            operation: Operation::Create,
        })
    }
}

pub fn authorize_mutation(
    kind: ResourceKind,
    operation: Operation,
    identity: &Identity,
    author_id: Uuid,
) -> Result<(), Denial> {
    if kind.ownership_rule().permits(identity, author_id) {
        Ok(())
    } else {
        tracing::info!(
            account_id = %identity.account_id(),
            kind = kind.label(),
            ?operation,
            "mutation denied by ownership rule"
        );
        Err(Denial { kind, operation })
    }
}

#[derive(Debug)]
pub enum Evaluation<R> {
    NotFound,
    Forbidden(Denial),
    Permitted(R),
}

/// Existence check, then the kind's ownership rule.
pub fn evaluate<R: Resource>(
    operation: Operation,
    identity: &Identity,
    existing: Option<R>,
) -> Evaluation<R> {
    let Some(resource) = existing else {
        return Evaluation::NotFound;
    };

    match authorize_mutation(R::KIND, operation, identity, resource.author_id()) {
        Ok(()) => Evaluation::Permitted(resource),
        Err(denial) => Evaluation::Forbidden(denial),
    }
}

/// Fetch a resource and evaluate whether `identity` may mutate it.
pub async fn load_for<R: Resource>(
    store: &dyn ResourceStore<R>,
    id: i64,
    operation: Operation,
    identity: &Identity,
) -> RepoResult<Evaluation<R>> {
    let existing = store.find_by_id(id).await?;
    Ok(evaluate(operation, identity, existing))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    NotFound,
    Forbidden(Denial),
    Deleted,
}

/// Two-step delete: existence + ownership, then a plain delete by id.
///
/// A row removed by someone else between the check and the delete reports `NotFound`.
pub async fn delete_owned<R: Resource>(
    store: &dyn ResourceStore<R>,
    id: i64,
    identity: &Identity,
) -> RepoResult<DeleteOutcome> {
    match load_for(store, id, Operation::Delete, identity).await? {
        Evaluation::NotFound => Ok(DeleteOutcome::NotFound),
        Evaluation::Forbidden(denial) => Ok(DeleteOutcome::Forbidden(denial)),
        Evaluation::Permitted(resource) => {
            if store.delete(resource.id()).await? {
                Ok(DeleteOutcome::Deleted)
            } else {
                Ok(DeleteOutcome::NotFound)
            }
        }
    }
}
