//! Ownership authorization for path-addressed objects.
//!
//! A route that addresses `/tasks/{id}` resolves the id through a
//! [`Findable`] lookup and, when the lookup yields an [`Owned`] object,
//! checks that the requesting user owns it. The outcome is an
//! [`Authorized`] handle that the handler receives as an argument.
//!
//! Failures, in the order they are checked:
//!
//! | condition                                 | error                        |
//! |-------------------------------------------|------------------------------|
//! | id is not a non-negative integer          | [`AccessError::InvalidId`]   |
//! | id exceeds the store's integer range      | [`AccessError::NotFound`]    |
//! | no live record                            | [`AccessError::NotFound`]    |
//! | any other lookup failure                  | [`AccessError::Lookup`]      |
//! | owner differs from the requesting user    | [`AccessError::Forbidden`]   |
//!
//! Existence is not hidden from non-owners: a foreign task is `Forbidden`,
//! never `NotFound`.

use super::error::TaskError;
use super::messages::Message;
use super::task::Task;
use super::user::User;
use std::ops::Deref;
use thiserror::Error;

/// Lookup capability used by the gate.
pub trait Findable {
    type Object;

    fn find(&self, id: i64) -> Result<Self::Object, TaskError>;
}

/// Objects that belong to a single user.
pub trait Owned {
    fn owner_id(&self) -> i64;
}

impl Owned for Task {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("invalid {0} parameter(only non-negative integers)")]
    InvalidId(&'static str),

    #[error("record not found")]
    NotFound,

    #[error("access denied")]
    Forbidden,

    #[error(transparent)]
    Lookup(TaskError),
}

/// An object the requesting user is allowed to act on.
#[derive(Debug, Clone, PartialEq)]
pub struct Authorized<T>(T);

impl<T> Authorized<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Authorized<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// A syntactically valid path id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathId {
    Stored(i64),
    /// Parses as `u64` but no stored row can carry it.
    OutOfRange(u64),
}

pub fn parse_path_id(key: &'static str, raw: &str) -> Result<PathId, AccessError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AccessError::InvalidId(key));
    }
    let id: u64 = raw.parse().map_err(|_| AccessError::InvalidId(key))?;
    Ok(i64::try_from(id).map_or(PathId::OutOfRange(id), PathId::Stored))
}

/// Resolves a raw path id without any ownership rule.
pub fn resolve<F: Findable>(finder: &F, key: &'static str, raw: &str) -> Result<F::Object, AccessError> {
    let id = match parse_path_id(key, raw)? {
        PathId::Stored(id) => id,
        PathId::OutOfRange(_) => return Err(AccessError::NotFound),
    };

    finder.find(id).map_err(|e| match e {
        TaskError::NotFound => AccessError::NotFound,
        other => {
            tracing::error!("{}", Message::GateFailed(other.to_string()));
            AccessError::Lookup(other)
        }
    })
}

/// Resolves a raw path id and requires `principal` to own the result.
pub fn authorize<F>(finder: &F, key: &'static str, raw: &str, principal: &User) -> Result<Authorized<F::Object>, AccessError>
where
    F: Findable,
    F::Object: Owned,
{
    let object = resolve(finder, key, raw)?;

    if object.owner_id() != principal.id {
        tracing::debug!(user_id = principal.id, owner_id = object.owner_id(), "{}", Message::TaskAccessDenied);
        return Err(AccessError::Forbidden);
    }

    Ok(Authorized(object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq)]
    struct Doc {
        owner: i64,
    }

    impl Owned for Doc {
        fn owner_id(&self) -> i64 {
            self.owner
        }
    }

    struct Docs(HashMap<i64, Doc>);

    impl Findable for Docs {
        type Object = Doc;

        fn find(&self, id: i64) -> Result<Doc, TaskError> {
            self.0.get(&id).cloned().ok_or(TaskError::NotFound)
        }
    }

    struct Broken;

    impl Findable for Broken {
        type Object = Doc;

        fn find(&self, _id: i64) -> Result<Doc, TaskError> {
            Err(TaskError::Database(rusqlite::Error::InvalidQuery))
        }
    }

    fn user(id: i64) -> User {
        User {
            id,
            name: format!("user{id}"),
            token: format!("token{id}"),
            created_date: Utc::now(),
        }
    }

    fn docs() -> Docs {
        Docs(HashMap::from([(1, Doc { owner: 7 })]))
    }

    #[test]
    fn owner_gets_the_object() {
        let authorized = authorize(&docs(), "taskId", "1", &user(7)).unwrap();
        assert_eq!(authorized.owner, 7);
        assert_eq!(authorized.into_inner(), Doc { owner: 7 });
    }

    #[test]
    fn foreign_object_is_forbidden_not_missing() {
        let err = authorize(&docs(), "taskId", "1", &user(5)).unwrap_err();
        assert!(matches!(err, AccessError::Forbidden));
    }

    #[test]
    fn missing_object_is_not_found() {
        let err = authorize(&docs(), "taskId", "2", &user(5)).unwrap_err();
        assert!(matches!(err, AccessError::NotFound));
    }

    #[test]
    fn out_of_range_id_is_not_found() {
        let raw = (i64::MAX as u64 + 1).to_string();
        assert_eq!(parse_path_id("taskId", &raw).unwrap(), PathId::OutOfRange(i64::MAX as u64 + 1));
        assert!(matches!(resolve(&docs(), "taskId", &raw), Err(AccessError::NotFound)));
        assert!(matches!(resolve(&docs(), "taskId", &u64::MAX.to_string()), Err(AccessError::NotFound)));
    }

    #[test]
    fn malformed_ids_are_invalid() {
        for raw in ["-1", "+1", " 1", "abc", "", "1.5", "18446744073709551616"] {
            let err = resolve(&docs(), "taskId", raw).unwrap_err();
            assert_eq!(err.to_string(), "invalid taskId parameter(only non-negative integers)", "{raw}");
        }
    }

    #[test]
    fn lookup_failure_is_internal() {
        let err = resolve(&Broken, "taskId", "1").unwrap_err();
        assert!(matches!(err, AccessError::Lookup(TaskError::Database(_))));
    }
}
