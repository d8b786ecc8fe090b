//! The named collections the store understands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One persisted collection of records.
///
/// Statements carry a caller-supplied collection *name*; backends resolve
/// it with [`Entity::from_name`] and treat unresolvable names as empty
/// collections rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
  Students,
  Grades,
  Classes,
  Courses,
  Users,
}

impl Entity {
  /// Every collection the store persists, in a stable order.
  pub const ALL: [Entity; 5] = [
    Entity::Students,
    Entity::Grades,
    Entity::Classes,
    Entity::Courses,
    Entity::Users,
  ];

  /// Resolve a caller-supplied collection name.
  pub fn from_name(name: &str) -> Option<Entity> {
    match name {
      "students" => Some(Entity::Students),
      "grades" => Some(Entity::Grades),
      "classes" => Some(Entity::Classes),
      "courses" => Some(Entity::Courses),
      "users" => Some(Entity::Users),
      _ => None,
    }
  }

  /// The canonical collection name; also the stem of the backing file.
  pub fn name(self) -> &'static str {
    match self {
      Entity::Students => "students",
      Entity::Grades => "grades",
      Entity::Classes => "classes",
      Entity::Courses => "courses",
      Entity::Users => "users",
    }
  }
}

impl fmt::Display for Entity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
