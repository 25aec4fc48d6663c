//! Logical layout of the output tables.
//!
//! Each [`TableKind`] owns a static [`TableSchema`]: the ordered column list
//! handed to the table writer, the partition keys (one directory tier per key,
//! in declared order) and the column that must be unique, if any.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Physical column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Utf8,
    Int32,
    Int64,
    Float64,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Utf8 => "utf8",
            ColumnType::Int32 => "int32",
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub nullable: bool,
}

const fn column(name: &'static str, column_type: ColumnType, nullable: bool) -> ColumnSpec {
    ColumnSpec {
        name,
        column_type,
        nullable,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub kind: TableKind,
    pub columns: &'static [ColumnSpec],
    pub partition_by: &'static [&'static str],
    pub unique_key: Option<&'static str>,
}

impl TableSchema {
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|column| column.name)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn is_partitioned(&self) -> bool {
        !self.partition_by.is_empty()
    }
}

/// The five tables of the star schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Songs,
    Artists,
    Users,
    Time,
    Songplays,
}

use ColumnType::{Float64, Int32, Int64, Utf8};

static SONGS: TableSchema = TableSchema {
    kind: TableKind::Songs,
    columns: &[
        column("song_id", Utf8, false),
        column("title", Utf8, true),
        column("artist_id", Utf8, false),
        column("year", Int32, true),
        column("duration", Float64, true),
    ],
    partition_by: &["year", "artist_id"],
    unique_key: None,
};

static ARTISTS: TableSchema = TableSchema {
    kind: TableKind::Artists,
    columns: &[
        column("artist_id", Utf8, false),
        column("name", Utf8, true),
        column("location", Utf8, true),
        column("latitude", Float64, true),
        column("longitude", Float64, true),
    ],
    partition_by: &[],
    unique_key: Some("artist_id"),
};

static USERS: TableSchema = TableSchema {
    kind: TableKind::Users,
    columns: &[
        column("user_id", Utf8, false),
        column("first_name", Utf8, true),
        column("last_name", Utf8, true),
        column("gender", Utf8, true),
        column("level", Utf8, true),
    ],
    partition_by: &[],
    unique_key: Some("user_id"),
};

static TIME: TableSchema = TableSchema {
    kind: TableKind::Time,
    columns: &[
        column("ts", Int64, false),
        column("start_time", Utf8, false),
        column("year", Int32, false),
        column("month", Int32, false),
        column("day_of_month", Int32, false),
        column("day_of_week", Int32, false),
        column("week", Int32, false),
        column("hour", Int32, false),
    ],
    partition_by: &["year", "month"],
    unique_key: Some("ts"),
};

static SONGPLAYS: TableSchema = TableSchema {
    kind: TableKind::Songplays,
    columns: &[
        column("songplay_id", Int64, false),
        column("ts", Int64, false),
        column("user_id", Utf8, false),
        column("level", Utf8, true),
        column("song_id", Utf8, false),
        column("artist_id", Utf8, false),
        column("session_id", Int64, true),
        column("location", Utf8, true),
        column("user_agent", Utf8, true),
        column("year", Int32, false),
        column("month", Int32, false),
    ],
    partition_by: &["year", "month"],
    unique_key: Some("songplay_id"),
};

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::Songs,
        TableKind::Artists,
        TableKind::Users,
        TableKind::Time,
        TableKind::Songplays,
    ];

    pub fn schema(self) -> &'static TableSchema {
        match self {
            TableKind::Songs => &SONGS,
            TableKind::Artists => &ARTISTS,
            TableKind::Users => &USERS,
            TableKind::Time => &TIME,
            TableKind::Songplays => &SONGPLAYS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TableKind::Songs => "songs",
            TableKind::Artists => "artists",
            TableKind::Users => "users",
            TableKind::Time => "time",
            TableKind::Songplays => "songplays",
        }
    }

    /// Directory name under the output root.
    pub fn dir_name(self) -> &'static str {
        match self {
            TableKind::Songs => "song_table.parquet",
            TableKind::Artists => "artist_table.parquet",
            TableKind::Users => "users_table.parquet",
            TableKind::Time => "time_table.parquet",
            TableKind::Songplays => "songplays_table.parquet",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TableKind::Songs => "Song dimension",
            TableKind::Artists => "Artist dimension",
            TableKind::Users => "User dimension (latest profile)",
            TableKind::Time => "Calendar dimension per play timestamp",
            TableKind::Songplays => "Song-play fact",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
