//! Column descriptors for the `users` table.
//!
//! Kept apart from [`ProfileFields`] so the persistence and query layers can
//! read bounds and defaults without the record knowing about them. The
//! migration declares the same bounds as `CHECK` constraints.

use sea_orm::{ConnectionTrait, DbBackend, Statement};

use crate::error::ProfileError;
use crate::profile::{ProfileFields, DEFAULT_BIO, DEFAULT_USERNAME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Serial,
    Varchar,
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDefault {
    None,
    Text(&'static str),
    Now,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Maximum length in characters, for `Varchar` columns.
    pub max_chars: Option<usize>,
    pub default: ColumnDefault,
}

pub const USERNAME: FieldSpec = FieldSpec {
    name: "username",
    kind: ColumnKind::Varchar,
    max_chars: Some(12),
    default: ColumnDefault::Text(DEFAULT_USERNAME),
};

pub const AVATAR: FieldSpec = FieldSpec {
    name: "avatar",
    kind: ColumnKind::Varchar,
    max_chars: Some(200),
    default: ColumnDefault::Text(""),
};

pub const BIO: FieldSpec = FieldSpec {
    name: "bio",
    kind: ColumnKind::Varchar,
    max_chars: Some(200),
    default: ColumnDefault::Text(DEFAULT_BIO),
};

pub const USER_COLUMNS: &[FieldSpec] = &[
    FieldSpec {
        name: "id",
        kind: ColumnKind::Serial,
        max_chars: None,
        default: ColumnDefault::None,
    },
    USERNAME,
    AVATAR,
    BIO,
    FieldSpec {
        name: "created_on",
        kind: ColumnKind::Timestamp,
        max_chars: None,
        default: ColumnDefault::Now,
    },
    FieldSpec {
        name: "modified_on",
        kind: ColumnKind::Timestamp,
        max_chars: None,
        default: ColumnDefault::Now,
    },
];

pub fn column(name: &str) -> Option<&'static FieldSpec> {
    USER_COLUMNS.iter().find(|c| c.name == name)
}

impl FieldSpec {
    pub fn check(&self, value: &str) -> Result<(), ProfileError> {
        let Some(max) = self.max_chars else {
            return Ok(());
        };
        let actual = value.chars().count();
        if actual > max {
            return Err(ProfileError::FieldTooLong {
                field: self.name,
                max,
                actual,
            });
        }
        Ok(())
    }
}

impl FieldSpec {
    /// The type as written in the `CREATE TABLE` statement.
    pub fn declared_type(&self) -> String {
        match (self.kind, self.max_chars) {
            (ColumnKind::Serial, _) => "INTEGER".to_string(),
            (ColumnKind::Varchar, Some(max)) => format!("VARCHAR({max})"),
            (ColumnKind::Varchar, None) => "VARCHAR".to_string(),
            (ColumnKind::Timestamp, _) => "TIMESTAMP".to_string(),
        }
    }
}

impl ColumnDefault {
    /// The default expression as `pragma_table_info` reports it.
    pub fn declared(&self) -> Option<String> {
        match self {
            ColumnDefault::None => None,
            ColumnDefault::Text(t) => Some(format!("'{}'", t.replace('\'', "''"))),
            ColumnDefault::Now => Some("CURRENT_TIMESTAMP".to_string()),
        }
    }
}

/// Compares the live `users` table against [`USER_COLUMNS`]: every described
/// column must exist with the same declared type and default. Extra columns
/// are tolerated.
pub async fn verify_users_table<C: ConnectionTrait>(db: &C) -> Result<(), ProfileError> {
    let rows = db
        .query_all(Statement::from_string(
            DbBackend::Sqlite,
            "SELECT name, type, dflt_value FROM pragma_table_info('users')",
        ))
        .await?;

    let mut seen = Vec::with_capacity(rows.len());
    for row in rows {
        let name: String = row.try_get("", "name")?;
        let Some(spec) = column(&name) else {
            continue;
        };

        let ty = row.try_get::<String>("", "type")?.to_uppercase();
        let expected = spec.declared_type();
        if ty != expected {
            return Err(ProfileError::SchemaMismatch(format!(
                "users.{name} is {ty}, expected {expected}"
            )));
        }

        let default: Option<String> = row.try_get("", "dflt_value")?;
        let expected = spec.default.declared();
        let matches = match (&default, &expected) {
            (Some(live), Some(want)) => live.eq_ignore_ascii_case(want),
            (None, None) => true,
            _ => false,
        };
        if !matches {
            return Err(ProfileError::SchemaMismatch(format!(
                "users.{name} defaults to {}, expected {}",
                default.as_deref().unwrap_or("nothing"),
                expected.as_deref().unwrap_or("nothing"),
            )));
        }

        seen.push(spec.name);
    }

    if let Some(missing) = USER_COLUMNS.iter().find(|c| !seen.contains(&c.name)) {
        return Err(ProfileError::SchemaMismatch(format!(
            "users.{} is missing",
            missing.name
        )));
    }

    tracing::debug!("users table matches {} column descriptors", USER_COLUMNS.len());
    Ok(())
}

/// Rejects any profile field longer than its declared bound. Values are never
/// truncated.
pub fn check_bounds(profile: &ProfileFields) -> Result<(), ProfileError> {
    USERNAME.check(&profile.username)?;
    AVATAR.check(&profile.avatar)?;
    BIO.check(&profile.bio)
}
